//! End-to-end clustering of a trigger set.
//!
//! [`run_cluster`] applies the optional score threshold, clusters the
//! remaining triggers with the canonical policies, optionally orders the
//! survivors by score, and reports what it did in a [`ClusterSummary`].
//! Reading and writing trigger files is left to the caller.
//!
//! # Example
//!
//! ```
//! use chrono::Duration;
//! use trigger_cluster::core::{GpsTime, TriggerRecord};
//! use trigger_cluster::pipeline::{run_cluster, ClusterConfig};
//! use trigger_cluster::transform::ScoreOrder;
//!
//! let triggers = vec![
//!     TriggerRecord::new(GpsTime::from_seconds(0), 5.0, "a"),
//!     TriggerRecord::new(GpsTime::from_seconds(1), 9.0, "b"),
//!     TriggerRecord::new(GpsTime::from_seconds(100), 6.0, "c"),
//!     TriggerRecord::new(GpsTime::from_seconds(200), 1.0, "d"),
//! ];
//!
//! let config = ClusterConfig::with_window(Duration::seconds(10))
//!     .score_threshold(2.0)
//!     .sort_order(ScoreOrder::Descending);
//! let run = run_cluster(triggers, &config).unwrap();
//!
//! let tags: Vec<_> = run.triggers.iter().map(|t| t.payload).collect();
//! assert_eq!(tags, vec!["b", "c"]);
//! assert_eq!(run.summary.n_discarded, 1);
//! ```

mod config;
mod summary;

pub use config::ClusterConfig;
pub use summary::ClusterSummary;

use crate::clustering::cluster_loudest;
use crate::core::{format_duration, Trigger};
use crate::error::Result;
use crate::transform::{discard_below_threshold, sort_by_score, validate_triggers};
use tracing::info;

/// Clustered triggers and the record of how they were produced.
#[derive(Debug, Clone)]
pub struct ClusterRun<T> {
    /// Surviving triggers.
    pub triggers: Vec<T>,
    /// Provenance for the output writer.
    pub summary: ClusterSummary,
}

/// Threshold, cluster and sort `triggers` according to `config`.
///
/// Fails if the configuration is invalid or a trigger has a non-finite
/// score; clustering itself cannot fail.
pub fn run_cluster<T: Trigger>(
    mut triggers: Vec<T>,
    config: &ClusterConfig,
) -> Result<ClusterRun<T>> {
    config.validate()?;
    validate_triggers(&triggers)?;

    let n_input = triggers.len();
    let n_discarded = match config.score_threshold {
        Some(threshold) => {
            info!(threshold, "discarding triggers below score threshold");
            discard_below_threshold(&mut triggers, threshold)
        }
        None => 0,
    };

    info!(
        window = %format_duration(config.cluster_window),
        bailout = config.bailout,
        triggers = triggers.len(),
        "clustering"
    );
    let stats = cluster_loudest(&mut triggers, config.cluster_window, config.bailout);

    if let Some(order) = config.sort_order {
        info!(?order, "sorting by score");
        sort_by_score(&mut triggers, order);
    }

    let summary = ClusterSummary::new(config, n_input, n_discarded, &stats);
    info!(
        events = summary.n_events,
        passes = summary.passes,
        "clustering complete"
    );

    Ok(ClusterRun { triggers, summary })
}
