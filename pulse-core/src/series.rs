use std::collections::VecDeque;

/// One chart point.
#[derive(Clone, Debug, PartialEq)]
pub struct MetricSample {
    pub time: String,
    pub value: f64,
}

impl MetricSample {
    pub fn new(time: impl Into<String>, value: f64) -> Self {
        Self {
            time: time.into(),
            value,
        }
    }
}

/// Rolling window of samples for one metric. Oldest points are evicted first.
#[derive(Clone, Debug, PartialEq)]
pub struct MetricSeries {
    samples: VecDeque<MetricSample>,
    max_points: usize,
}

impl MetricSeries {
    pub fn new(max_points: usize) -> Self {
        Self {
            samples: VecDeque::with_capacity(max_points + 1),
            max_points,
        }
    }

    /// Build a series from seed points, keeping at most `max_points` of the newest.
    pub fn seeded(max_points: usize, seed: impl IntoIterator<Item = MetricSample>) -> Self {
        let mut series = Self::new(max_points);
        for sample in seed {
            series.push(sample);
        }
        series
    }

    /// Append a sample and trim from the front back down to `max_points`.
    pub fn push(&mut self, sample: MetricSample) {
        self.samples.push_back(sample);
        while self.samples.len() > self.max_points {
            self.samples.pop_front();
        }
    }

    pub fn latest(&self) -> Option<&MetricSample> {
        self.samples.back()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn max_points(&self) -> usize {
        self.max_points
    }

    pub fn iter(&self) -> impl Iterator<Item = &MetricSample> {
        self.samples.iter()
    }

    /// Values only, oldest first (for sparklines).
    pub fn values(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.value).collect()
    }

    /// `(index, value)` pairs for a line chart.
    pub fn points(&self) -> Vec<(f64, f64)> {
        self.samples
            .iter()
            .enumerate()
            .map(|(i, s)| (i as f64, s.value))
            .collect()
    }

    /// Smallest and largest value currently held.
    pub fn bounds(&self) -> Option<(f64, f64)> {
        let mut it = self.samples.iter().map(|s| s.value);
        let first = it.next()?;
        Some(it.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v))))
    }
}
