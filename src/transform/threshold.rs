//! Score pre-filter applied before clustering.

use crate::core::Trigger;
use crate::error::{ClusterError, Result};

/// Drop triggers scoring below `threshold`, keeping the rest in order.
///
/// Triggers with a NaN score are dropped. Returns the number discarded.
pub fn discard_below_threshold<T: Trigger>(triggers: &mut Vec<T>, threshold: f64) -> usize {
    let before = triggers.len();
    triggers.retain(|t| t.score() >= threshold);
    before - triggers.len()
}

/// Reject triggers whose score cannot be ranked.
pub fn validate_triggers<T: Trigger>(triggers: &[T]) -> Result<()> {
    match triggers
        .iter()
        .enumerate()
        .find(|(_, t)| !t.score().is_finite())
    {
        Some((index, t)) => Err(ClusterError::NonFiniteScore {
            index,
            score: t.score(),
        }),
        None => Ok(()),
    }
}
