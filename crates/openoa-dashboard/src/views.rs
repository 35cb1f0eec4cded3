//! View types for diagnostics rendering.
//!
//! These carry pre-formatted strings and computed fields so renderers
//! stay trivial. Everything here is a pure function of orchestrator
//! state, the registry, and the current expansion.

use serde::Serialize;

use openoa_diagnostics::{
    AggregateStats, DiagnosticsSnapshot, ProbeDescriptor, ProbeResult, Registry,
};
use openoa_health::HealthState;

use crate::selection::Expansion;

pub const NO_VALUE: &str = "—";

// ── Row ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusIndicator {
    Loading,
    Ok,
    Fail,
}

impl StatusIndicator {
    /// No result yet and pending both read as loading.
    pub fn from_result(result: Option<&ProbeResult>) -> Self {
        match result {
            None | Some(ProbeResult::Pending) => StatusIndicator::Loading,
            Some(ProbeResult::Success { .. }) => StatusIndicator::Ok,
            Some(ProbeResult::Failure { .. }) => StatusIndicator::Fail,
        }
    }

    pub fn class(self) -> &'static str {
        match self {
            StatusIndicator::Loading => "status-loading",
            StatusIndicator::Ok => "status-ok",
            StatusIndicator::Fail => "status-fail",
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            StatusIndicator::Loading => "…",
            StatusIndicator::Ok => "✔",
            StatusIndicator::Fail => "✘",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailPanel {
    pub heading: &'static str,
    pub body: String,
}

impl DetailPanel {
    /// Pretty JSON for a success, the raw message for a failure.
    pub fn from_result(result: &ProbeResult) -> Option<Self> {
        match result {
            ProbeResult::Pending => None,
            ProbeResult::Success { payload, .. } => Some(Self {
                heading: "Response (Success)",
                body: serde_json::to_string_pretty(payload)
                    .unwrap_or_else(|_| payload.to_string()),
            }),
            ProbeResult::Failure { error_message, .. } => Some(Self {
                heading: "Response (Error)",
                body: error_message.clone(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowView {
    pub id: String,
    pub method: String,
    pub path: String,
    pub label: String,
    pub indicator: StatusIndicator,
    pub status_code_display: String,
    pub latency_display: String,
    pub expanded: bool,
    /// Present only when the row is open and has a resolved result.
    pub detail: Option<DetailPanel>,
}

impl RowView {
    pub fn build(
        descriptor: &ProbeDescriptor,
        result: Option<&ProbeResult>,
        expansion: &Expansion,
    ) -> Self {
        let expanded = expansion.is_open(descriptor.id());
        let detail = if expanded {
            result.and_then(DetailPanel::from_result)
        } else {
            None
        };

        Self {
            id: descriptor.id().to_string(),
            method: descriptor.method().to_string(),
            path: descriptor.path().to_string(),
            label: descriptor.label().to_string(),
            indicator: StatusIndicator::from_result(result),
            status_code_display: result
                .and_then(ProbeResult::status_code)
                .map(|c| c.to_string())
                .unwrap_or_else(|| NO_VALUE.to_string()),
            latency_display: result
                .and_then(ProbeResult::duration_ms)
                .map(|ms| format!("{ms}ms"))
                .unwrap_or_else(|| NO_VALUE.to_string()),
            expanded,
            detail,
        }
    }
}

// ── Summary ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Banner {
    AllHealthy,
    AllDown,
}

impl Banner {
    /// Derived from counts; never stored.
    pub fn derive(stats: &AggregateStats, registry_len: usize) -> Option<Self> {
        if stats.total_tested == 0 {
            return None;
        }
        if stats.success_count == registry_len {
            Some(Banner::AllHealthy)
        } else if stats.error_count == registry_len {
            Some(Banner::AllDown)
        } else {
            None
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Banner::AllHealthy => {
                "All endpoints are healthy! The client is fully connected to the backend."
            }
            Banner::AllDown => {
                "Backend is unreachable. Make sure the API server is running."
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryView {
    pub total_endpoints: usize,
    pub healthy: usize,
    pub failed: usize,
    pub total_tested: usize,
    pub average_latency_display: String,
    pub banner: Option<Banner>,
    pub sweeping: bool,
    pub action_label: &'static str,
}

impl SummaryView {
    pub fn build(snapshot: &DiagnosticsSnapshot, registry_len: usize) -> Self {
        let stats = snapshot.aggregate();
        Self {
            total_endpoints: registry_len,
            healthy: stats.success_count,
            failed: stats.error_count,
            total_tested: stats.total_tested,
            average_latency_display: format_average(stats.average_latency_ms),
            banner: Banner::derive(&stats, registry_len),
            sweeping: snapshot.sweeping,
            action_label: if snapshot.sweeping {
                "Testing…"
            } else {
                "Test All Endpoints"
            },
        }
    }
}

// ── Dashboard ───────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub summary: SummaryView,
    pub rows: Vec<RowView>,
}

impl DashboardView {
    /// Rows follow registry order.
    pub fn build(registry: &Registry, snapshot: &DiagnosticsSnapshot, expansion: &Expansion) -> Self {
        let rows = registry
            .iter()
            .map(|d| RowView::build(d, snapshot.result(d.id()), expansion))
            .collect();
        Self {
            summary: SummaryView::build(snapshot, registry.len()),
            rows,
        }
    }
}

// ── Navigation indicator ────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NavIndicator {
    pub state: HealthState,
    pub title: &'static str,
    pub dot_class: &'static str,
}

impl NavIndicator {
    pub fn from_state(state: HealthState) -> Self {
        let (title, dot_class) = match state {
            HealthState::Unknown => ("Checking…", "api-dot-checking"),
            HealthState::Up => ("Backend connected", "api-dot-ok"),
            HealthState::Down => ("Backend disconnected", "api-dot-fail"),
        };
        Self {
            state,
            title,
            dot_class,
        }
    }
}

fn format_average(avg: Option<f64>) -> String {
    match avg {
        Some(ms) => format!("{}ms", ms.round() as u64),
        None => NO_VALUE.to_string(),
    }
}
