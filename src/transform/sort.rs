//! Score ordering applied after clustering has converged.

use crate::core::Trigger;
use serde::{Deserialize, Serialize};

/// Direction of the post-clustering sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreOrder {
    /// Quietest first.
    Ascending,
    /// Loudest first.
    Descending,
}

/// Sort triggers by score.
///
/// The ascending sort is stable. `Descending` reverses the ascending order,
/// so triggers with equal scores come out in reverse input order.
pub fn sort_by_score<T: Trigger>(triggers: &mut [T], order: ScoreOrder) {
    triggers.sort_by(|a, b| a.score().total_cmp(&b.score()));
    if order == ScoreOrder::Descending {
        triggers.reverse();
    }
}
