//! Configuration for a filter → cluster → sort run.

use crate::core::{duration_seconds, format_duration};
use crate::error::{ClusterError, Result};
use crate::transform::ScoreOrder;
use chrono::Duration;
use serde::{Deserialize, Serialize};

/// Configuration for [`run_cluster`](super::run_cluster).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusterConfig {
    /// Triggers within this separation are one event.
    #[serde(with = "duration_seconds")]
    pub cluster_window: Duration,
    /// Discard triggers scoring below this before clustering.
    pub score_threshold: Option<f64>,
    /// Order of the surviving triggers; `None` leaves clustering order.
    pub sort_order: Option<ScoreOrder>,
    /// Sort by time and stop each scan early once triggers are out of reach.
    pub bailout: bool,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            cluster_window: Duration::seconds(1),
            score_threshold: None,
            sort_order: None,
            bailout: true,
        }
    }
}

impl ClusterConfig {
    /// Create a configuration with the given window.
    pub fn with_window(cluster_window: Duration) -> Self {
        Self {
            cluster_window,
            ..Default::default()
        }
    }

    /// Set the cluster window.
    pub fn window(mut self, cluster_window: Duration) -> Self {
        self.cluster_window = cluster_window;
        self
    }

    /// Set the score threshold.
    pub fn score_threshold(mut self, threshold: f64) -> Self {
        self.score_threshold = Some(threshold);
        self
    }

    /// Sort survivors by score.
    pub fn sort_order(mut self, order: ScoreOrder) -> Self {
        self.sort_order = Some(order);
        self
    }

    /// Enable or disable the time bailout.
    pub fn bailout(mut self, bailout: bool) -> Self {
        self.bailout = bailout;
        self
    }

    /// Check the window and threshold.
    pub fn validate(&self) -> Result<()> {
        if self.cluster_window < Duration::zero() {
            return Err(ClusterError::InvalidParameter(format!(
                "cluster window must be non-negative, got {}",
                format_duration(self.cluster_window)
            )));
        }
        if let Some(threshold) = self.score_threshold {
            if !threshold.is_finite() {
                return Err(ClusterError::InvalidParameter(format!(
                    "score threshold must be finite, got {threshold}"
                )));
            }
        }
        Ok(())
    }
}
