//! Trigger transformations around clustering.
//!
//! A score threshold can thin the input before clustering, and the
//! converged output can be ordered by score.
//!
//! # Example
//!
//! ```
//! use trigger_cluster::core::{GpsTime, TriggerRecord};
//! use trigger_cluster::transform::{discard_below_threshold, sort_by_score, ScoreOrder};
//!
//! let mut triggers = vec![
//!     TriggerRecord::bare(GpsTime::from_seconds(0), 4.0),
//!     TriggerRecord::bare(GpsTime::from_seconds(50), 9.0),
//!     TriggerRecord::bare(GpsTime::from_seconds(90), 6.5),
//! ];
//!
//! let discarded = discard_below_threshold(&mut triggers, 5.0);
//! assert_eq!(discarded, 1);
//!
//! sort_by_score(&mut triggers, ScoreOrder::Descending);
//! assert_eq!(triggers[0].score, 9.0);
//! ```

pub mod sort;
pub mod threshold;

pub use sort::{sort_by_score, ScoreOrder};
pub use threshold::{discard_below_threshold, validate_triggers};
