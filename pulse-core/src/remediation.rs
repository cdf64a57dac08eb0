//! Formatter for the GenAI remediation report.
//!
//! The report is one text blob. Each section starts with a marker glyph,
//! optionally followed by a `*bold title*`, then the section body.

/// Section marker glyphs, in the order the assistant emits them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Marker {
    HealthSummary,
    ActionsTaken,
    Documentation,
    NextActions,
    OptimizationTip,
    Signature,
}

impl Marker {
    pub const ALL: [Marker; 6] = [
        Marker::HealthSummary,
        Marker::ActionsTaken,
        Marker::Documentation,
        Marker::NextActions,
        Marker::OptimizationTip,
        Marker::Signature,
    ];

    pub fn glyph(&self) -> char {
        match self {
            Marker::HealthSummary => '\u{1FA7A}',
            Marker::ActionsTaken => '\u{2699}',
            Marker::Documentation => '\u{1F4D8}',
            Marker::NextActions => '\u{1F680}',
            Marker::OptimizationTip => '\u{1F4C8}',
            Marker::Signature => '\u{1F4DD}',
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Marker::HealthSummary => "System Health Summary",
            Marker::ActionsTaken => "Automated Remediation Actions",
            Marker::Documentation => "Documentation Insight",
            Marker::NextActions => "Recommended Next Actions",
            Marker::OptimizationTip => "Optimization Tip",
            Marker::Signature => "Generated by",
        }
    }

    pub fn from_glyph(c: char) -> Option<Marker> {
        Marker::ALL.into_iter().find(|m| m.glyph() == c)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum SectionBody {
    Numbered(Vec<String>),
    Bullets(Vec<String>),
    Line(String),
    Lines(Vec<String>),
}

#[derive(Clone, Debug, PartialEq)]
pub struct RemediationSection {
    pub marker: Marker,
    /// Title written inline as `*...*` right after the marker, if any.
    pub inline_title: Option<String>,
    pub body: SectionBody,
}

impl RemediationSection {
    /// Heading shown in the left column, e.g. "🚀 Recommended Next Actions".
    pub fn heading(&self) -> String {
        format!("{} {}", self.marker.glyph(), self.marker.title())
    }
}

const SIGNATURE_PREFIX: &str = "Generated by: ";
const VARIATION_SELECTOR: char = '\u{FE0F}';

/// Split a report into sections. Text ahead of the first marker is dropped.
pub fn parse_report(text: &str) -> Vec<RemediationSection> {
    let starts: Vec<usize> = text
        .char_indices()
        .filter(|(_, c)| Marker::from_glyph(*c).is_some())
        .map(|(i, _)| i)
        .collect();

    let mut sections = Vec::with_capacity(starts.len());
    let mut bounds = vec![0];
    bounds.extend(starts.iter().copied());
    bounds.push(text.len());
    bounds.dedup();

    for pair in bounds.windows(2) {
        if let Some(section) = parse_section(&text[pair[0]..pair[1]]) {
            sections.push(section);
        }
    }
    sections
}

fn parse_section(raw: &str) -> Option<RemediationSection> {
    let mut chars = raw.chars();
    let marker = Marker::from_glyph(chars.next()?)?;
    let rest = chars.as_str();
    let rest = rest.strip_prefix(VARIATION_SELECTOR).unwrap_or(rest);
    let rest = rest.trim_start_matches([' ', '\t']);

    let (inline_title, content) = split_inline_title(rest);
    let content = content.trim();

    let body = match marker {
        Marker::NextActions => SectionBody::Numbered(split_items(content, strip_enumerator)),
        Marker::ActionsTaken | Marker::HealthSummary => SectionBody::Bullets(
            split_items(content, |l| l.strip_prefix("- "))
                .into_iter()
                .map(|item| item.replace('*', "").trim().to_string())
                .filter(|item| !item.is_empty())
                .collect(),
        ),
        Marker::Signature => SectionBody::Line(content.replacen(SIGNATURE_PREFIX, "", 1)),
        Marker::Documentation | Marker::OptimizationTip => SectionBody::Lines(
            content
                .replace('*', "")
                .split('\n')
                .map(|l| l.trim_end().to_string())
                .collect(),
        ),
    };

    Some(RemediationSection {
        marker,
        inline_title,
        body,
    })
}

/// `*Title*` on the marker's line becomes the inline title.
fn split_inline_title(rest: &str) -> (Option<String>, &str) {
    let Some(after) = rest.strip_prefix('*') else {
        return (None, rest);
    };
    match after.find(['*', '\n']) {
        Some(end) if after[end..].starts_with('*') => {
            let title = after[..end].trim();
            let title = (!title.is_empty()).then(|| title.to_string());
            (title, &after[end + 1..])
        }
        _ => (None, rest),
    }
}

/// Break a body into list items. A new item starts at every line for which
/// `item_start` returns the text after the list marker.
fn split_items<'a>(content: &'a str, item_start: impl Fn(&'a str) -> Option<&'a str>) -> Vec<String> {
    let mut items: Vec<String> = Vec::new();
    for (i, line) in content.split('\n').enumerate() {
        match item_start(line) {
            Some(text) => items.push(text.to_string()),
            None if i == 0 || items.is_empty() => items.push(line.to_string()),
            None => {
                if let Some(last) = items.last_mut() {
                    last.push('\n');
                    last.push_str(line);
                }
            }
        }
    }
    items
        .into_iter()
        .map(|item| item.trim().to_string())
        .filter(|item| !item.is_empty())
        .collect()
}

/// `"12. text"` -> `"text"`.
fn strip_enumerator(line: &str) -> Option<&str> {
    let digits = line.chars().take_while(|c| c.is_ascii_digit()).count();
    if digits == 0 {
        return None;
    }
    line[digits..].strip_prefix(". ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::REMEDIATION_REPORT;

    #[test]
    fn canned_report_has_six_sections_in_order() {
        let sections = parse_report(REMEDIATION_REPORT);
        let markers: Vec<Marker> = sections.iter().map(|s| s.marker).collect();
        assert_eq!(markers, Marker::ALL.to_vec());
        assert_eq!(sections[0].heading(), "\u{1FA7A} System Health Summary");
        assert_eq!(sections[3].marker.title(), "Recommended Next Actions");
        assert_eq!(sections[5].marker.title(), "Generated by");
    }

    #[test]
    fn inline_titles_are_captured() {
        let sections = parse_report(REMEDIATION_REPORT);
        assert_eq!(sections[0].inline_title.as_deref(), Some("System Health Summary"));
        assert_eq!(
            sections[1].inline_title.as_deref(),
            Some("Automated Remediation Actions (Already Performed)")
        );
        assert_eq!(sections[5].inline_title, None);
    }

    #[test]
    fn health_summary_renders_bullets_without_emphasis() {
        let sections = parse_report(REMEDIATION_REPORT);
        let SectionBody::Bullets(items) = &sections[0].body else {
            panic!("expected bullets, got {:?}", sections[0].body);
        };
        assert_eq!(items.len(), 4);
        assert_eq!(items[0], "Service-A latency is high: 2100ms (threshold exceeded).");
        assert!(items.iter().all(|i| !i.contains('*')));
    }

    #[test]
    fn next_actions_render_numbered() {
        let sections = parse_report(REMEDIATION_REPORT);
        let SectionBody::Numbered(items) = &sections[3].body else {
            panic!("expected numbered list");
        };
        assert_eq!(items.len(), 4);
        assert!(items[0].starts_with("Monitor service-B"));
        assert!(items[3].starts_with("Create fallback routing rule"));
    }

    #[test]
    fn signature_prefix_is_removed() {
        let sections = parse_report(REMEDIATION_REPORT);
        assert_eq!(
            sections[5].body,
            SectionBody::Line("GenAI Remediation Assistant \u{2013} v1.0".to_string())
        );
    }

    #[test]
    fn plain_sections_keep_line_breaks() {
        let sections = parse_report(REMEDIATION_REPORT);
        let SectionBody::Lines(lines) = &sections[2].body else {
            panic!("expected lines");
        };
        assert_eq!(lines.len(), 2);
        assert!(lines[1].starts_with("Suggested fix"));
    }

    #[test]
    fn preamble_is_discarded() {
        let text = "Report follows.\n\u{1F4C8} *Tip*\nUse *caching*.";
        let sections = parse_report(text);
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].inline_title.as_deref(), Some("Tip"));
        assert_eq!(sections[0].body, SectionBody::Lines(vec!["Use caching.".into()]));
    }

    #[test]
    fn no_markers_means_no_sections() {
        assert!(parse_report("nothing to see").is_empty());
        assert!(parse_report("").is_empty());
    }

    #[test]
    fn variation_selector_after_marker_is_ignored() {
        let text = "\u{2699}\u{FE0F} *Actions*\n- one\n- two";
        let sections = parse_report(text);
        assert_eq!(sections[0].inline_title.as_deref(), Some("Actions"));
        assert_eq!(
            sections[0].body,
            SectionBody::Bullets(vec!["one".into(), "two".into()])
        );
    }

    #[test]
    fn unclosed_emphasis_is_not_a_title() {
        let text = "\u{1F4D8} *half open\nbody";
        let sections = parse_report(text);
        assert_eq!(sections[0].inline_title, None);
        assert_eq!(
            sections[0].body,
            SectionBody::Lines(vec!["half open".into(), "body".into()])
        );
    }

    #[test]
    fn enumerator_requires_digits_dot_space() {
        assert_eq!(strip_enumerator("10. ten"), Some("ten"));
        assert_eq!(strip_enumerator("1.no"), None);
        assert_eq!(strip_enumerator("- x"), None);
    }
}
