//! # trigger-cluster
//!
//! Windowed greedy clustering of time-stamped, scored detection triggers.
//!
//! Triggers closer in time than a cluster window are merged, keeping the
//! higher-scored one, and merging repeats until no pair is left to merge.
//! An optional time-sorted bailout strategy cuts each scan short once
//! triggers fall out of reach. Around the engine sit a score threshold,
//! a post-clustering score sort, and an end-to-end [`pipeline`].

pub mod clustering;
pub mod core;
pub mod error;
pub mod pipeline;
pub mod transform;

pub use error::{ClusterError, Result};

pub mod prelude {
    pub use crate::clustering::{
        cluster_loudest, cluster_triggers, keep_loudest, separated_in_time, time_bailout,
        ClusterEngine, ClusterStats, ClusterStrategy,
    };
    pub use crate::core::{GpsTime, Trigger, TriggerRecord};
    pub use crate::error::{ClusterError, Result};
    pub use crate::pipeline::{run_cluster, ClusterConfig, ClusterRun, ClusterSummary};
    pub use crate::transform::{discard_below_threshold, sort_by_score, ScoreOrder};
}
