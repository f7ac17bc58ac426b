//! Canonical clustering policies.
//!
//! The engine is parametric over its distinctness test, merge rule and
//! bailout predicate. These are the standard choices: two triggers belong
//! to the same event when their times are within the window, and the
//! louder trigger represents the cluster.

use crate::core::Trigger;
use chrono::Duration;

/// Distinctness test: true when the triggers are further apart than `window`.
///
/// Triggers exactly `window` apart are clustered.
pub fn separated_in_time<T: Trigger>(a: &T, b: &T, window: Duration) -> bool {
    a.time().abs_diff(b.time()) > window
}

/// Merge rule: keep the higher-scored trigger.
///
/// Ties favour `other`, the later trigger in scan order, so its payload
/// survives when scores are equal. A NaN score never displaces `kept`.
pub fn keep_loudest<T: Trigger>(kept: &mut T, other: T) {
    if other.score() >= kept.score() {
        *kept = other;
    }
}

/// Bailout predicate matching [`separated_in_time`] on time-sorted input.
///
/// Given `a` at or before `b`, once `b` is more than `window` after `a` every
/// later trigger is too, so the inner scan for `a` can stop.
pub fn time_bailout<T: Trigger>(window: Duration) -> impl Fn(&T, &T) -> bool {
    move |a: &T, b: &T| b.time() - a.time() > window
}
