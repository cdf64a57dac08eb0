use std::time::Instant;

use pulse_core::csv::BAD_REQUEST_COLUMNS;
use pulse_core::fixtures::{self, ServerSummary, ANOMALIES, ENDPOINT_SERVERS, ENDPOINT_TYPES, SERVERS};
use pulse_core::{
    format_bytes_mb, format_uptime, CsvTable, LiveMetrics, MetricSeries, RemediationSection,
    SectionBody,
};
use ratatui::{
    prelude::*,
    symbols,
    widgets::{
        Axis, BarChart, Block, Borders, Cell, Chart, Dataset, GraphType, List, ListItem,
        ListState, Paragraph, Row, Table, Tabs, Wrap,
    },
};

use crate::app::{App, CsvState, Detail, DetailTab, View, LANDING_ENTRIES};
use crate::{input, widgets};

const SPARK_WIDTH: usize = 16;

pub fn draw(f: &mut Frame, app: &App, now: Instant) {
    let chunks = Layout::vertical([
        Constraint::Length(1), // status bar
        Constraint::Min(8),    // body
        Constraint::Length(1), // key hints
    ])
    .split(f.area());

    draw_status_bar(f, chunks[0], app);

    match app.view {
        View::Landing => {
            let items = LANDING_ENTRIES
                .iter()
                .map(|(label, blurb)| {
                    ListItem::new(vec![
                        Line::from(Span::styled(*label, Style::default().fg(Color::White).bold())),
                        Line::from(Span::styled(
                            format!("  {}", blurb),
                            Style::default().fg(Color::DarkGray),
                        )),
                        Line::from(""),
                    ])
                })
                .collect();
            draw_list(f, chunks[1], "Pulse", items, app.selected);
        }
        View::Fleet => draw_fleet(f, chunks[1], app.selected),
        View::EndpointTypes => {
            let items = ENDPOINT_TYPES
                .iter()
                .map(|t| ListItem::new(format!(" {}", t.label)))
                .collect();
            draw_list(f, chunks[1], "Endpoint types", items, app.selected);
        }
        View::EndpointServers(t) => {
            let items = ENDPOINT_SERVERS
                .iter()
                .map(|(_, name)| ListItem::new(format!(" {}", name)))
                .collect();
            draw_list(f, chunks[1], t.label, items, app.selected);
        }
        View::ServerDetail { .. } => match &app.detail {
            Some(d) => draw_detail(f, chunks[1], app, d, now),
            None => f.render_widget(Paragraph::new("  No server selected."), chunks[1]),
        },
    }

    draw_footer(f, chunks[2], app);
}

fn panel(title: &str) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(Span::styled(
            format!(" {} ", title),
            Style::default().fg(Color::White).bold(),
        ))
}

fn badge(text: &str, bg: Color) -> Span<'static> {
    Span::styled(
        format!(" {} ", text),
        Style::default().fg(Color::Black).bg(bg).bold(),
    )
}

fn draw_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![
        badge("PULSE", Color::Cyan),
        Span::raw(" "),
        Span::styled(app.breadcrumb(), Style::default().fg(Color::White)),
    ];

    if let Some(m) = app.detail.as_ref().and_then(Detail::metrics) {
        spans.push(Span::raw("  "));
        spans.push(if m.live {
            badge("LIVE", Color::Green)
        } else {
            badge("FALLBACK", Color::Yellow)
        });
        spans.push(Span::styled(
            format!(" ok:{} failed:{} ", m.successes, m.failures),
            Style::default().fg(Color::DarkGray),
        ));
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_footer(f: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![Span::styled(
        input::help(&app.view),
        Style::default().fg(Color::DarkGray),
    )];
    if let Some(notice) = &app.notice {
        spans.push(Span::styled(
            format!(" {} ", notice),
            Style::default().fg(Color::Red),
        ));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_list(f: &mut Frame, area: Rect, title: &str, items: Vec<ListItem>, selected: usize) {
    let list = List::new(items)
        .block(panel(title))
        .highlight_style(Style::default().fg(Color::Cyan).bold())
        .highlight_symbol("> ");
    let mut state = ListState::default().with_selected(Some(selected));
    f.render_stateful_widget(list, area, &mut state);
}

// Fleet

fn draw_fleet(f: &mut Frame, area: Rect, selected: usize) {
    let rows = Layout::vertical([Constraint::Ratio(1, 2); 2]).split(area);
    for (i, server) in SERVERS.iter().enumerate() {
        let cols = Layout::horizontal([Constraint::Ratio(1, 3); 3]).split(rows[i / 3]);
        draw_server_card(f, cols[i % 3], server, i == selected);
    }
}

fn draw_server_card(f: &mut Frame, area: Rect, server: &ServerSummary, selected: bool) {
    let border = if selected { Color::Cyan } else { Color::DarkGray };
    let bar_width = (area.width as usize).saturating_sub(16).clamp(4, 20);

    let lines = vec![
        Line::from(Span::styled(
            server.location,
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
        Line::from(badge(server.status.label(), widgets::status_color(server.status))),
        Line::from(""),
        Line::from(vec![
            Span::styled(" CPU ", Style::default().fg(Color::White)),
            Span::styled(
                widgets::meter(server.cpu_usage, bar_width),
                Style::default().fg(widgets::usage_color(server.cpu_usage)),
            ),
        ]),
        Line::from(vec![
            Span::styled(" Mem ", Style::default().fg(Color::White)),
            Span::styled(
                widgets::meter(server.memory_usage, bar_width),
                Style::default().fg(widgets::usage_color(server.memory_usage)),
            ),
        ]),
    ];

    let card = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .title(Span::styled(
                format!(" {} ", server.name),
                Style::default().fg(Color::White).bold(),
            )),
    );
    f.render_widget(card, area);
}

// Server detail

fn draw_detail(f: &mut Frame, area: Rect, app: &App, d: &Detail, now: Instant) {
    let chunks = Layout::vertical([
        Constraint::Length(3), // header
        Constraint::Length(1), // tabs
        Constraint::Min(6),
    ])
    .split(area);

    let metrics = d.metrics();
    draw_detail_header(f, chunks[0], d, metrics.as_ref());

    let tabs = Tabs::new(DetailTab::ALL.iter().map(|t| t.label()))
        .select(d.tab.index())
        .style(Style::default().fg(Color::DarkGray))
        .highlight_style(Style::default().fg(Color::Cyan).bold());
    f.render_widget(tabs, chunks[1]);

    match d.tab {
        DetailTab::Overview => match &metrics {
            Some(m) => draw_overview(f, chunks[2], m),
            None => f.render_widget(
                Paragraph::new("  Telemetry client unavailable, see log for details.")
                    .style(Style::default().fg(Color::Red)),
                chunks[2],
            ),
        },
        DetailTab::Anomalies => draw_anomalies(f, chunks[2], d.scroll),
        DetailTab::BadRequests => draw_bad_requests(f, chunks[2], app, d, now),
        DetailTab::Remediation => draw_remediation(f, chunks[2], d, now),
    }
}

fn draw_detail_header(f: &mut Frame, area: Rect, d: &Detail, metrics: Option<&LiveMetrics>) {
    let header = Paragraph::new(detail_header_line(d, metrics)).block(panel(d.id));
    f.render_widget(header, area);
}

/// Name, fleet location, status badge, uptime, CPU trend and the last poll error.
fn detail_header_line(d: &Detail, metrics: Option<&LiveMetrics>) -> Line<'static> {
    let mut spans = vec![Span::styled(
        format!(" {} ", d.name),
        Style::default().fg(Color::White).bold(),
    )];
    if let Some(server) = fixtures::server(d.id) {
        spans.push(Span::styled(
            format!("{}  ", server.location),
            Style::default().fg(Color::DarkGray),
        ));
    }
    if let Some(m) = metrics {
        let status = m.status();
        spans.push(badge(status.label(), widgets::status_color(status)));
        spans.push(Span::styled(
            format!("  Uptime {}", format_uptime(m.snapshot.uptime_seconds)),
            Style::default().fg(Color::DarkGray),
        ));
        spans.push(Span::styled("  CPU ", Style::default().fg(Color::White)));
        spans.push(Span::styled(
            widgets::sparkline(&m.cpu.values(), SPARK_WIDTH),
            Style::default().fg(widgets::usage_color(m.snapshot.cpu_percent())),
        ));
        if let Some(err) = &m.last_error {
            if !m.live {
                spans.push(Span::styled(
                    format!("  last error: {}", err),
                    Style::default().fg(Color::Yellow),
                ));
            }
        }
    }
    Line::from(spans)
}

fn draw_overview(f: &mut Frame, area: Rect, m: &LiveMetrics) {
    let chunks = Layout::vertical([Constraint::Min(10), Constraint::Length(12)]).split(area);

    let rows = Layout::vertical([Constraint::Ratio(1, 2); 2]).split(chunks[0]);
    let top = Layout::horizontal([Constraint::Ratio(1, 2); 2]).split(rows[0]);
    let bottom = Layout::horizontal([Constraint::Ratio(1, 2); 2]).split(rows[1]);

    let snap = &m.snapshot;
    draw_series_chart(
        f,
        top[0],
        &format!("CPU {:.2}%", snap.cpu_percent()),
        &m.cpu,
        Color::Cyan,
    );
    draw_series_chart(
        f,
        top[1],
        &format!("Memory {:.2}%", snap.mem_percent()),
        &m.memory,
        Color::Magenta,
    );
    draw_series_chart(
        f,
        bottom[0],
        &format!("Latency {} ms", snap.latency_ms()),
        &m.latency,
        Color::Yellow,
    );
    draw_series_chart(
        f,
        bottom[1],
        &format!("Processes {}", snap.process_count()),
        &m.processes,
        Color::Green,
    );

    let info = Layout::horizontal([Constraint::Ratio(1, 2); 2]).split(chunks[1]);
    draw_system_info(f, info[0], m);
    draw_top_processes(f, info[1], m);
}

fn draw_series_chart(f: &mut Frame, area: Rect, title: &str, series: &MetricSeries, color: Color) {
    let data = series.points();
    let (lo, hi) = series.bounds().unwrap_or((0.0, 1.0));
    let pad = ((hi - lo) * 0.1).max(1.0);
    let y = [(lo - pad).max(0.0), hi + pad];
    let x_max = series.max_points().saturating_sub(1).max(1) as f64;

    let first = series.iter().next().map(|s| s.time.clone()).unwrap_or_default();
    let last = series.latest().map(|s| s.time.clone()).unwrap_or_default();

    let dataset = Dataset::default()
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(color))
        .data(&data);

    let axis_style = Style::default().fg(Color::DarkGray);
    let chart = Chart::new(vec![dataset])
        .block(panel(title))
        .x_axis(
            Axis::default()
                .style(axis_style)
                .bounds([0.0, x_max])
                .labels(vec![first, last]),
        )
        .y_axis(
            Axis::default()
                .style(axis_style)
                .bounds(y)
                .labels(vec![format!("{:.0}", y[0]), format!("{:.0}", y[1])]),
        );
    f.render_widget(chart, area);
}

fn draw_system_info(f: &mut Frame, area: Rect, m: &LiveMetrics) {
    let snap = &m.snapshot;
    let mut pairs = vec![
        (
            "CPU",
            format!(
                "user {:.2}%  sys {:.2}%  irq {:.2}%",
                snap.cpu.user_load, snap.cpu.system_load, snap.cpu.irq_load
            ),
        ),
        ("Cores", snap.cpu_cores.len().to_string()),
        (
            "Memory",
            format!(
                "{} / {} ({} free)",
                format_bytes_mb(snap.memory.used_mb),
                format_bytes_mb(snap.memory.total_mb),
                format_bytes_mb(snap.memory.free_mb)
            ),
        ),
        (
            "Processes",
            format!(
                "{} total, {} running, {} blocked",
                snap.system_metrics.processes.total,
                snap.system_metrics.processes.running,
                snap.system_metrics.processes.blocked
            ),
        ),
    ];
    if let Some(disk) = snap.primary_disk() {
        pairs.push((
            "Disk",
            format!("{} {} {:.2} GB ({})", disk.name, disk.kind, disk.size_gb, disk.health),
        ));
    }
    if let Some(nic) = snap.primary_interface() {
        pairs.push((
            "Network",
            format!("{} {} {} Mbps", nic.iface, nic.ip4, nic.speed_mbps),
        ));
    }
    if let Some(traffic) = snap.functional_metrics.traffic_analysis.first() {
        let flag = if traffic.is_spike {
            " spike"
        } else if traffic.is_drop {
            " drop"
        } else {
            ""
        };
        pairs.push((
            "Traffic",
            format!(
                "rx {} tx {}{}",
                format_bytes_mb(traffic.rx_bytes as f64 / 1_048_576.0),
                format_bytes_mb(traffic.tx_bytes as f64 / 1_048_576.0),
                flag
            ),
        ));
    }

    let lines: Vec<Line> = widgets::key_value_lines(&pairs)
        .into_iter()
        .map(|l| Line::from(format!(" {}", l)))
        .collect();
    f.render_widget(
        Paragraph::new(lines).block(panel("System information")),
        area,
    );
}

fn draw_top_processes(f: &mut Frame, area: Rect, m: &LiveMetrics) {
    let rows = m.snapshot.system_metrics.processes.top_processes.iter().map(|p| {
        Row::new(vec![
            Cell::from(p.pid.to_string()),
            Cell::from(p.name.clone()),
            Cell::from(format!("{:.2}", p.cpu)),
            Cell::from(format!("{:.2}", p.memory)),
        ])
    });
    let table = Table::new(
        rows,
        [
            Constraint::Length(7),
            Constraint::Min(12),
            Constraint::Length(7),
            Constraint::Length(7),
        ],
    )
    .header(
        Row::new(vec!["PID", "Name", "CPU %", "Mem %"])
            .style(Style::default().fg(Color::White).bold()),
    )
    .block(panel("Top processes"));
    f.render_widget(table, area);
}

// Anomalies

fn draw_anomalies(f: &mut Frame, area: Rect, scroll: u16) {
    let chunks = Layout::vertical([Constraint::Min(6), Constraint::Length(9)]).split(area);

    let rows = ANOMALIES.iter().skip(scroll as usize).map(|a| {
        Row::new(vec![
            Cell::from(a.id.to_string()),
            Cell::from(a.kind.label()),
            Cell::from(a.description),
            Cell::from(a.timestamp),
            Cell::from(Span::styled(
                a.severity.label(),
                Style::default().fg(widgets::severity_color(a.severity)),
            )),
        ])
    });
    let table = Table::new(
        rows,
        [
            Constraint::Length(4),
            Constraint::Length(13),
            Constraint::Min(20),
            Constraint::Length(20),
            Constraint::Length(8),
        ],
    )
    .header(
        Row::new(vec!["ID", "Type", "Description", "Timestamp", "Severity"])
            .style(Style::default().fg(Color::White).bold()),
    )
    .block(panel(&format!("Detected anomalies ({})", ANOMALIES.len())));
    f.render_widget(table, chunks[0]);

    let per_minute = fixtures::anomaly_time_series();
    let bars: Vec<(&str, u64)> = per_minute
        .iter()
        .map(|s| (s.time.as_str(), s.value as u64))
        .collect();
    let chart = BarChart::default()
        .block(panel("Anomalies per minute"))
        .data(bars.as_slice())
        .bar_width(5)
        .bar_gap(1)
        .bar_style(Style::default().fg(Color::Red))
        .value_style(Style::default().fg(Color::Black).bg(Color::Red));
    f.render_widget(chart, chunks[1]);
}

// Bad request CSV

fn draw_bad_requests(f: &mut Frame, area: Rect, app: &App, d: &Detail, now: Instant) {
    let block = panel("Bad request inspector");
    match &d.csv {
        CsvState::Idle => {
            let hint = match &app.config.csv_path {
                Some(path) => format!("  Press c to load {}", path.display()),
                None => "  No CSV configured. Start with --csv <file> or set PULSE_CSV.".into(),
            };
            f.render_widget(
                Paragraph::new(hint)
                    .style(Style::default().fg(Color::DarkGray))
                    .block(block),
                area,
            );
        }
        CsvState::Processing { since, .. } => {
            let text = widgets::processing(now.saturating_duration_since(*since));
            f.render_widget(
                Paragraph::new(format!("  {}", text))
                    .style(Style::default().fg(Color::Yellow).bold())
                    .block(block),
                area,
            );
        }
        CsvState::Failed(msg) => {
            f.render_widget(
                Paragraph::new(format!("  {}", msg))
                    .style(Style::default().fg(Color::Red))
                    .block(block),
                area,
            );
        }
        CsvState::Loaded(table) => draw_csv_table(f, area, table, d.scroll, block),
    }
}

fn draw_csv_table(f: &mut Frame, area: Rect, table: &CsvTable, scroll: u16, block: Block) {
    if table.is_empty() {
        f.render_widget(
            Paragraph::new("  The file has no data rows.")
                .style(Style::default().fg(Color::DarkGray))
                .block(block),
            area,
        );
        return;
    }

    let col_width = (area.width.saturating_sub(2) as usize / BAD_REQUEST_COLUMNS.len()).max(4);
    let rows = table.rows.iter().skip(scroll as usize).map(|row| {
        Row::new(
            BAD_REQUEST_COLUMNS
                .iter()
                .map(|col| {
                    let value = row.get(*col).map(String::as_str).unwrap_or("");
                    Cell::from(widgets::truncate(value, col_width))
                })
                .collect::<Vec<_>>(),
        )
    });
    let widget = Table::new(rows, [Constraint::Fill(1); BAD_REQUEST_COLUMNS.len()])
        .header(
            Row::new(BAD_REQUEST_COLUMNS.to_vec())
                .style(Style::default().fg(Color::White).bold()),
        )
        .block(block.title_bottom(Span::styled(
            format!(" {} rows ", table.len()),
            Style::default().fg(Color::DarkGray),
        )));
    f.render_widget(widget, area);
}

// GenAI remediation

fn draw_remediation(f: &mut Frame, area: Rect, d: &Detail, now: Instant) {
    let block = panel("GenAI remediation");
    if !d.report_ready(now) {
        let text = widgets::processing(now.saturating_duration_since(d.opened));
        f.render_widget(
            Paragraph::new(format!("  {}", text))
                .style(Style::default().fg(Color::Yellow).bold())
                .block(block),
            area,
        );
        return;
    }

    let lines: Vec<Line> = d.report.iter().flat_map(section_lines).collect();
    f.render_widget(
        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false })
            .scroll((d.scroll, 0)),
        area,
    );
}

fn section_lines(section: &RemediationSection) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(Span::styled(
        section.heading(),
        Style::default().fg(Color::Cyan).bold(),
    ))];
    if let Some(title) = &section.inline_title {
        lines.push(Line::from(Span::styled(
            format!("  {}", title),
            Style::default().fg(Color::White).italic(),
        )));
    }
    match &section.body {
        SectionBody::Numbered(items) => {
            lines.extend(
                items
                    .iter()
                    .enumerate()
                    .map(|(i, item)| Line::from(format!("  {}. {}", i + 1, item))),
            );
        }
        SectionBody::Bullets(items) => {
            lines.extend(items.iter().map(|item| Line::from(format!("  \u{2022} {}", item))));
        }
        SectionBody::Line(text) => {
            lines.push(Line::from(Span::styled(
                format!("  {}", text),
                Style::default().fg(Color::DarkGray),
            )));
        }
        SectionBody::Lines(text) => {
            lines.extend(text.iter().map(|l| Line::from(format!("  {}", l))));
        }
    }
    lines.push(Line::from(""));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{CSV_DELAY, REPORT_DELAY};
    use crate::input::AppAction;
    use pulse_core::{parse_report, Marker};
    use ratatui::backend::TestBackend;

    fn text(lines: &[Line]) -> Vec<String> {
        lines.iter().map(|l| l.to_string()).collect()
    }

    #[test]
    fn numbered_section_is_enumerated() {
        let sections = parse_report("\u{1F680} *Next*\n1. Restart\n2. Scale out");
        assert_eq!(sections[0].marker, Marker::NextActions);
        let lines = text(&section_lines(&sections[0]));
        assert_eq!(lines[1], "  Next");
        assert_eq!(lines[2], "  1. Restart");
        assert_eq!(lines[3], "  2. Scale out");
        assert_eq!(lines.last().map(String::as_str), Some(""));
    }

    #[test]
    fn inline_title_gets_its_own_line() {
        let sections = parse_report("\u{1F4C8} *Cache warmup*\nPreload hot keys");
        let lines = text(&section_lines(&sections[0]));
        assert_eq!(lines[1], "  Cache warmup");
        assert_eq!(lines[2], "  Preload hot keys");
    }

    fn rendered(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    /// App with the first fleet server's detail view open against a dead port.
    fn detail_app(csv: Option<std::path::PathBuf>) -> App {
        let mut cfg = pulse_core::Config::default();
        cfg.endpoint = "http://127.0.0.1:9/healthcheck".into();
        cfg.csv_path = csv;
        let mut app = App::new(cfg);
        let now = Instant::now();
        app.handle(AppAction::Open, now);
        app.handle(AppAction::Open, now);
        app
    }

    #[test]
    fn draws_list_views() {
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        let mut app = App::new(pulse_core::Config::default());
        let now = Instant::now();
        for view in [
            View::Landing,
            View::Fleet,
            View::EndpointTypes,
            View::EndpointServers(&ENDPOINT_TYPES[0]),
        ] {
            app.view = view;
            terminal.draw(|f| draw(f, &app, now)).unwrap();
        }
        assert!(rendered(&terminal).contains("Server 1"));
    }

    #[tokio::test]
    async fn draws_every_detail_tab_at_any_size() {
        use std::io::Write;
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "method,path,body,Predicted_Label").unwrap();
        writeln!(file, "POST,/login,\"' OR 1=1 --\",bad").unwrap();

        let mut app = detail_app(Some(file.path().to_path_buf()));
        let opened = app.detail.as_ref().unwrap().opened;
        app.handle(AppAction::LoadCsv, opened);

        for (w, h) in [(120, 40), (40, 12), (10, 4)] {
            let mut terminal = Terminal::new(TestBackend::new(w, h)).unwrap();
            for tab in DetailTab::ALL {
                app.detail.as_mut().unwrap().tab = tab;
                // before and after both delays
                for now in [opened, opened + REPORT_DELAY + CSV_DELAY] {
                    app.tick(now);
                    terminal.draw(|f| draw(f, &app, now)).unwrap();
                }
            }
        }
        assert!(matches!(app.detail.as_ref().unwrap().csv, CsvState::Loaded(_)));
    }

    #[tokio::test]
    async fn detail_tabs_show_their_content() {
        let mut app = detail_app(None);
        let opened = app.detail.as_ref().unwrap().opened;
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();

        terminal.draw(|f| draw(f, &app, opened)).unwrap();
        let overview = rendered(&terminal);
        assert!(overview.contains("Web Server 01"));
        assert!(overview.contains("Top processes"));

        app.detail.as_mut().unwrap().tab = DetailTab::Remediation;
        terminal.draw(|f| draw(f, &app, opened)).unwrap();
        assert!(rendered(&terminal).contains("Processing"));

        let later = opened + REPORT_DELAY;
        terminal.draw(|f| draw(f, &app, later)).unwrap();
        assert!(rendered(&terminal).contains("System Health Summary"));

        app.detail.as_mut().unwrap().tab = DetailTab::BadRequests;
        terminal.draw(|f| draw(f, &app, later)).unwrap();
        assert!(rendered(&terminal).contains("No CSV configured"));
    }

    #[tokio::test]
    async fn detail_header_carries_location_and_cpu_trend() {
        let app = detail_app(None);
        let d = app.detail.as_ref().unwrap();
        let m = d.metrics().unwrap();
        let line = detail_header_line(d, Some(&m)).to_string();
        assert!(line.contains("US East - Virginia"));
        // seed values span 20..30, so the trend has a floor and a peak
        assert!(line.contains('\u{2581}'));
        assert!(line.contains('\u{2588}'));

        let bare = detail_header_line(d, None).to_string();
        assert!(!bare.contains("Uptime"));
    }
}
