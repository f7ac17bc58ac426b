//! Windowed greedy clustering to a fixed point.
//!
//! Each pass compares every ordered pair `(i, j)` with `i < j`. When two
//! triggers are not distinct, `j` is merged into `i` and removed, and the
//! scan continues with the next surviving trigger against the updated `i`.
//! Passes repeat until one completes without a merge, because a merge can
//! move a trigger within reach of one already passed over.
//!
//! Removed triggers leave an empty slot for the rest of the pass; survivors
//! are compacted back in their original relative order once it ends.

use super::policy::{keep_loudest, separated_in_time, time_bailout};
use crate::core::Trigger;
use chrono::Duration;
use std::fmt;
use tracing::{debug, trace};

/// Boxed bailout predicate.
pub type Bailout<'a, T> = Box<dyn FnMut(&T, &T) -> bool + 'a>;

/// How the inner scan of a pass is bounded.
pub enum ClusterStrategy<'a, T> {
    /// Compare every pair. Input order is left as given.
    Exhaustive,
    /// Sort by time before each pass and stop the inner scan for `i` at the
    /// first `j` that is distinct from `i` and for which the predicate holds.
    ///
    /// The predicate must be consistent with the distinctness test in time
    /// order, otherwise clusterable pairs are silently skipped.
    SortedWithBailout(Bailout<'a, T>),
}

impl<'a, T> ClusterStrategy<'a, T> {
    /// Bailout strategy from any predicate.
    pub fn sorted_with_bailout<B>(bailout: B) -> Self
    where
        B: FnMut(&T, &T) -> bool + 'a,
    {
        ClusterStrategy::SortedWithBailout(Box::new(bailout))
    }

    /// Whether the sequence is sorted by time before each pass.
    pub fn sorts_by_time(&self) -> bool {
        matches!(self, ClusterStrategy::SortedWithBailout(_))
    }

    fn should_bail(&mut self, a: &T, b: &T) -> bool {
        match self {
            ClusterStrategy::Exhaustive => false,
            ClusterStrategy::SortedWithBailout(bailout) => bailout(a, b),
        }
    }
}

impl<T> Default for ClusterStrategy<'_, T> {
    fn default() -> Self {
        ClusterStrategy::Exhaustive
    }
}

impl<T> fmt::Debug for ClusterStrategy<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClusterStrategy::Exhaustive => f.write_str("Exhaustive"),
            ClusterStrategy::SortedWithBailout(_) => f.write_str("SortedWithBailout(..)"),
        }
    }
}

/// Bookkeeping from one clustering run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClusterStats {
    /// Passes performed, including the final pass without merges.
    pub passes: usize,
    /// Total merges; equals `input_len - output_len`.
    pub merges: usize,
    /// Triggers before clustering.
    pub input_len: usize,
    /// Triggers surviving clustering.
    pub output_len: usize,
}

/// Clustering engine holding the window, policies and strategy.
///
/// # Example
///
/// ```
/// use chrono::Duration;
/// use trigger_cluster::clustering::{keep_loudest, separated_in_time, time_bailout, ClusterEngine};
/// use trigger_cluster::core::{GpsTime, TriggerRecord};
///
/// let window = Duration::seconds(10);
/// let mut triggers = vec![
///     TriggerRecord::bare(GpsTime::from_seconds(0), 5.0),
///     TriggerRecord::bare(GpsTime::from_seconds(1), 9.0),
///     TriggerRecord::bare(GpsTime::from_seconds(100), 1.0),
/// ];
///
/// let mut engine = ClusterEngine::new(window, separated_in_time, keep_loudest)
///     .with_bailout(time_bailout::<TriggerRecord>(window));
/// let stats = engine.run(&mut triggers);
///
/// assert_eq!(triggers.len(), 2);
/// assert_eq!(stats.merges, 1);
/// ```
pub struct ClusterEngine<'a, T, D, M> {
    window: Duration,
    is_distinct: D,
    merge: M,
    strategy: ClusterStrategy<'a, T>,
}

impl<'a, T, D, M> ClusterEngine<'a, T, D, M>
where
    T: Trigger,
    D: FnMut(&T, &T, Duration) -> bool,
    M: FnMut(&mut T, T),
{
    /// Create an exhaustive engine.
    ///
    /// `is_distinct(a, b, window)` returns true when `a` and `b` must not be
    /// clustered. `merge(kept, other)` folds `other` into `kept`.
    pub fn new(window: Duration, is_distinct: D, merge: M) -> Self {
        Self {
            window,
            is_distinct,
            merge,
            strategy: ClusterStrategy::Exhaustive,
        }
    }

    /// Switch to [`ClusterStrategy::SortedWithBailout`].
    pub fn with_bailout<B>(self, bailout: B) -> Self
    where
        B: FnMut(&T, &T) -> bool + 'a,
    {
        self.with_strategy(ClusterStrategy::sorted_with_bailout(bailout))
    }

    /// Set the strategy.
    pub fn with_strategy(mut self, strategy: ClusterStrategy<'a, T>) -> Self {
        self.strategy = strategy;
        self
    }

    /// Cluster window passed to the distinctness test.
    pub fn window(&self) -> Duration {
        self.window
    }

    /// Scanning strategy used by [`ClusterEngine::run`].
    pub fn strategy(&self) -> &ClusterStrategy<'a, T> {
        &self.strategy
    }

    /// Cluster `triggers` in place until a pass performs no merge.
    pub fn run(&mut self, triggers: &mut Vec<T>) -> ClusterStats {
        let mut stats = ClusterStats {
            input_len: triggers.len(),
            ..Default::default()
        };

        loop {
            if self.strategy.sorts_by_time() {
                triggers.sort_by_key(|t| t.time());
            }

            let merges = self.pass(triggers);
            stats.passes += 1;
            stats.merges += merges;
            debug!(
                pass = stats.passes,
                merges,
                remaining = triggers.len(),
                "cluster pass complete"
            );

            if merges == 0 {
                break;
            }
        }

        stats.output_len = triggers.len();
        stats
    }

    /// Cluster an owned sequence and return the survivors.
    pub fn run_owned(&mut self, mut triggers: Vec<T>) -> Vec<T> {
        self.run(&mut triggers);
        triggers
    }

    /// One scan over all pairs. Returns the number of merges.
    fn pass(&mut self, triggers: &mut Vec<T>) -> usize {
        let mut slots: Vec<Option<T>> = triggers.drain(..).map(Some).collect();
        let mut merges = 0;

        for i in 0..slots.len() {
            let (head, tail) = slots.split_at_mut(i + 1);
            let Some(anchor) = head[i].as_mut() else {
                continue;
            };

            for slot in tail.iter_mut() {
                let Some(candidate) = slot.as_ref() else {
                    continue;
                };

                if (self.is_distinct)(&*anchor, candidate, self.window) {
                    if self.strategy.should_bail(&*anchor, candidate) {
                        break;
                    }
                    continue;
                }

                if let Some(absorbed) = slot.take() {
                    trace!(
                        kept = %anchor.time(),
                        absorbed = %absorbed.time(),
                        "merging triggers"
                    );
                    (self.merge)(&mut *anchor, absorbed);
                    merges += 1;
                }
            }
        }

        triggers.extend(slots.into_iter().flatten());
        merges
    }
}

impl<T, D, M> fmt::Debug for ClusterEngine<'_, T, D, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClusterEngine")
            .field("window", &self.window)
            .field("strategy", &self.strategy)
            .finish_non_exhaustive()
    }
}

/// Cluster `triggers` in place with caller-supplied policies.
pub fn cluster_triggers<T, D, M>(
    triggers: &mut Vec<T>,
    window: Duration,
    is_distinct: D,
    merge: M,
    strategy: ClusterStrategy<'_, T>,
) -> ClusterStats
where
    T: Trigger,
    D: FnMut(&T, &T, Duration) -> bool,
    M: FnMut(&mut T, T),
{
    ClusterEngine::new(window, is_distinct, merge)
        .with_strategy(strategy)
        .run(triggers)
}

/// Cluster with the canonical policies: triggers within `window` of each
/// other form one event, represented by the loudest.
///
/// With `use_bailout` the sequence is sorted by time and each inner scan
/// stops once triggers are more than `window` away.
pub fn cluster_loudest<T: Trigger>(
    triggers: &mut Vec<T>,
    window: Duration,
    use_bailout: bool,
) -> ClusterStats {
    let strategy = if use_bailout {
        ClusterStrategy::sorted_with_bailout(time_bailout::<T>(window))
    } else {
        ClusterStrategy::Exhaustive
    };
    cluster_triggers(
        triggers,
        window,
        separated_in_time::<T>,
        keep_loudest::<T>,
        strategy,
    )
}
