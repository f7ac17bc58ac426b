//! Trigger clustering.
//!
//! Collapses time-stamped, scored triggers into one representative per
//! event: any two triggers within the cluster window are merged, and merging
//! repeats until a full pass finds nothing left to merge.
//!
//! # Strategies
//!
//! - **Exhaustive**: compares every pair, input order is kept
//! - **SortedWithBailout**: sorts by time and stops each inner scan once the
//!   bailout predicate reports that no later trigger can be in reach
//!
//! # Example
//!
//! ```
//! use chrono::Duration;
//! use trigger_cluster::clustering::cluster_loudest;
//! use trigger_cluster::core::{GpsTime, TriggerRecord};
//!
//! let mut triggers = vec![
//!     TriggerRecord::bare(GpsTime::from_seconds(0), 3.0),
//!     TriggerRecord::bare(GpsTime::from_seconds(5), 7.0),
//!     TriggerRecord::bare(GpsTime::from_seconds(11), 2.0),
//! ];
//!
//! // 0 and 5 merge into the trigger at 5, which is then within 10 s of 11.
//! let stats = cluster_loudest(&mut triggers, Duration::seconds(10), true);
//! assert_eq!(triggers.len(), 1);
//! assert_eq!(triggers[0].score, 7.0);
//! assert_eq!(stats.merges, 2);
//! ```

pub mod engine;
pub mod policy;

pub use engine::{
    cluster_loudest, cluster_triggers, Bailout, ClusterEngine, ClusterStats, ClusterStrategy,
};
pub use policy::{keep_loudest, separated_in_time, time_bailout};
