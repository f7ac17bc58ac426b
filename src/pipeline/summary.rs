//! Provenance recorded alongside clustered output.

use super::config::ClusterConfig;
use crate::clustering::ClusterStats;
use crate::core::duration_seconds;
use crate::transform::ScoreOrder;
use chrono::Duration;
use serde::Serialize;

/// What a clustering run did, for the output writer to store with the data.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClusterSummary {
    /// Window the triggers were clustered with.
    #[serde(with = "duration_seconds")]
    pub cluster_window: Duration,
    /// Threshold applied before clustering, if any.
    pub score_threshold: Option<f64>,
    /// Order applied to the survivors, if any.
    pub sort_order: Option<ScoreOrder>,
    /// Whether the time bailout was used.
    pub bailout: bool,
    /// Triggers received.
    pub n_input: usize,
    /// Triggers dropped by the threshold.
    pub n_discarded: usize,
    /// Triggers surviving clustering.
    pub n_events: usize,
    /// Clustering passes performed.
    pub passes: usize,
    /// Merges performed.
    pub merges: usize,
}

impl ClusterSummary {
    pub(crate) fn new(
        config: &ClusterConfig,
        n_input: usize,
        n_discarded: usize,
        stats: &ClusterStats,
    ) -> Self {
        Self {
            cluster_window: config.cluster_window,
            score_threshold: config.score_threshold,
            sort_order: config.sort_order,
            bailout: config.bailout,
            n_input,
            n_discarded,
            n_events: stats.output_len,
            passes: stats.passes,
            merges: stats.merges,
        }
    }

    /// Fraction of input triggers that survived, or 0 for empty input.
    pub fn survival_fraction(&self) -> f64 {
        if self.n_input == 0 {
            0.0
        } else {
            self.n_events as f64 / self.n_input as f64
        }
    }
}
