//! Per-activity training statistics for the bar chart.

use serde::Serialize;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Total minutes and session count for one activity.
///
/// Rebuilt from the full training list on every fetch.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ActivityStat {
    /// Grouping key, unique within a result set
    pub activity: String,
    /// Sum of durations (minutes)
    pub minutes: f64,
    /// Number of trainings
    pub sessions: u32,
}
