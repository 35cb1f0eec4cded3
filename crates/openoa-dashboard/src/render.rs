//! Plain-text rendering of dashboard views.

use crate::views::{DashboardView, NavIndicator, RowView, SummaryView};

const PATH_WIDTH: usize = 32;

pub fn render_table(view: &DashboardView) -> String {
    let mut lines = vec![format!(
        "{:<3} {:<6} {:<PATH_WIDTH$} {:<6} {:<8} {}",
        "", "METHOD", "PATH", "CODE", "LATENCY", "ENDPOINT"
    )];
    for row in &view.rows {
        lines.push(render_row(row));
        if let Some(detail) = &row.detail {
            lines.push(format!("    {}", detail.heading));
            lines.extend(detail.body.lines().map(|l| format!("    {l}")));
        }
    }
    lines.join("\n")
}

fn render_row(row: &RowView) -> String {
    let marker = if row.expanded { "▾" } else { " " };
    format!(
        "{}{:<2} {:<6} {:<PATH_WIDTH$} {:<6} {:<8} {}",
        marker,
        row.indicator.symbol(),
        row.method,
        row.path,
        row.status_code_display,
        row.latency_display,
        row.label
    )
    .trim_end()
    .to_string()
}

pub fn render_summary(summary: &SummaryView) -> String {
    let mut out = format!(
        "Endpoints: {}  Healthy: {}  Failed: {}  Avg latency: {}",
        summary.total_endpoints,
        summary.healthy,
        summary.failed,
        summary.average_latency_display
    );
    if summary.sweeping {
        out.push('\n');
        out.push_str(summary.action_label);
    }
    if let Some(banner) = summary.banner {
        out.push('\n');
        out.push_str(banner.message());
    }
    out
}

pub fn render_nav(nav: &NavIndicator) -> String {
    let dot = match nav.dot_class {
        "api-dot-ok" => "●",
        "api-dot-fail" => "○",
        _ => "◌",
    };
    format!("{dot} {}", nav.title)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::views::{Banner, DetailPanel, StatusIndicator};
    use openoa_health::HealthState;

    fn row(id: &str, expanded: bool, detail: Option<DetailPanel>) -> RowView {
        RowView {
            id: id.to_string(),
            method: "GET".to_string(),
            path: format!("/api/{id}"),
            label: id.to_string(),
            indicator: StatusIndicator::Ok,
            status_code_display: "200".to_string(),
            latency_display: "4ms".to_string(),
            expanded,
            detail,
        }
    }

    fn summary(banner: Option<Banner>) -> SummaryView {
        SummaryView {
            total_endpoints: 9,
            healthy: 9,
            failed: 0,
            total_tested: 9,
            average_latency_display: "4ms".to_string(),
            banner,
            sweeping: false,
            action_label: "Test All Endpoints",
        }
    }

    #[test]
    fn table_lists_rows_in_order_with_open_detail() {
        let view = DashboardView {
            summary: summary(None),
            rows: vec![
                row("health", false, None),
                row(
                    "team",
                    true,
                    Some(DetailPanel {
                        heading: "Response (Success)",
                        body: "{\n  \"members\": []\n}".to_string(),
                    }),
                ),
            ],
        };
        let text = render_table(&view);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 7);
        assert!(lines[0].contains("METHOD"));
        assert!(lines[1].contains("/api/health"));
        assert!(lines[2].starts_with('▾'));
        assert!(lines[2].ends_with("team"));
        assert_eq!(lines[3], "    Response (Success)");
        assert_eq!(lines[5], "      \"members\": []");
    }

    #[test]
    fn summary_includes_banner() {
        let text = render_summary(&summary(Some(Banner::AllHealthy)));
        assert!(text.starts_with("Endpoints: 9  Healthy: 9  Failed: 0  Avg latency: 4ms"));
        assert!(text.ends_with(Banner::AllHealthy.message()));

        let plain = render_summary(&summary(None));
        assert_eq!(plain.lines().count(), 1);
    }

    #[test]
    fn nav_rendering() {
        let nav = NavIndicator::from_state(HealthState::Down);
        assert_eq!(render_nav(&nav), "○ Backend disconnected");
        let nav = NavIndicator::from_state(HealthState::Unknown);
        assert_eq!(render_nav(&nav), "◌ Checking…");
    }
}
