//! Concrete clustering scenarios through the public API.

use chrono::Duration;
use trigger_cluster::prelude::*;

/// Trigger with a detector tag, as a single-detector search would produce.
type Tagged = TriggerRecord<&'static str>;

fn trig(seconds: i64, score: f64, tag: &'static str) -> Tagged {
    TriggerRecord::new(GpsTime::from_seconds(seconds), score, tag)
}

fn times_and_scores(triggers: &[Tagged]) -> Vec<(i64, f64)> {
    triggers
        .iter()
        .map(|t| (t.time.seconds(), t.score))
        .collect()
}

// =============================================================================
// Scenario A: one close pair, one distant trigger
// =============================================================================

#[test]
fn close_pair_collapses_to_louder_trigger() {
    let mut triggers = vec![trig(0, 5.0, "a"), trig(1, 9.0, "b"), trig(100, 1.0, "c")];
    let stats = cluster_loudest(&mut triggers, Duration::seconds(10), false);

    assert_eq!(times_and_scores(&triggers), vec![(1, 9.0), (100, 1.0)]);
    assert_eq!(stats.output_len, 2);
}

// =============================================================================
// Scenario B: cascading merge
// =============================================================================

#[test]
fn merged_survivor_cascades_into_next_trigger() {
    let mut triggers = vec![trig(0, 3.0, "a"), trig(5, 7.0, "b"), trig(11, 2.0, "c")];
    let stats = cluster_loudest(&mut triggers, Duration::seconds(10), false);

    assert_eq!(times_and_scores(&triggers), vec![(5, 7.0)]);
    assert_eq!(triggers[0].payload, "b");
    assert_eq!(stats.merges, 2);
}

// =============================================================================
// Scenario C: bailout reproduces the exhaustive result
// =============================================================================

#[test]
fn bailout_reproduces_exhaustive_results() {
    let window = Duration::seconds(10);
    for input in [
        vec![trig(0, 5.0, "a"), trig(1, 9.0, "b"), trig(100, 1.0, "c")],
        vec![trig(0, 3.0, "a"), trig(5, 7.0, "b"), trig(11, 2.0, "c")],
    ] {
        let mut exhaustive = input.clone();
        cluster_loudest(&mut exhaustive, window, false);

        let mut engine = ClusterEngine::new(window, separated_in_time, keep_loudest)
            .with_bailout(time_bailout::<Tagged>(window));
        let with_bailout = engine.run_owned(input);

        assert_eq!(with_bailout, exhaustive);
    }
}

// =============================================================================
// Caller-supplied policies
// =============================================================================

/// Triggers from different detectors never cluster.
fn distinct_detector_or_time(a: &Tagged, b: &Tagged, window: Duration) -> bool {
    a.payload != b.payload || separated_in_time(a, b, window)
}

#[test]
fn time_bailout_stays_consistent_with_detector_aware_test() {
    let window = Duration::seconds(10);
    let mut triggers = vec![trig(0, 4.0, "H1"), trig(1, 8.0, "L1"), trig(2, 6.0, "H1")];

    cluster_triggers(
        &mut triggers,
        window,
        distinct_detector_or_time,
        keep_loudest,
        ClusterStrategy::sorted_with_bailout(time_bailout::<Tagged>(window)),
    );

    assert_eq!(times_and_scores(&triggers), vec![(1, 8.0), (2, 6.0)]);
    assert_eq!(triggers[1].payload, "H1");
}

#[test]
fn inconsistent_bailout_skips_clusterable_pairs() {
    // Stopping at the first distinct trigger hides the second H1 trigger
    // from the first; the caller owns this contract.
    let window = Duration::seconds(10);
    let mut triggers = vec![trig(0, 4.0, "H1"), trig(1, 8.0, "L1"), trig(2, 6.0, "H1")];

    cluster_triggers(
        &mut triggers,
        window,
        distinct_detector_or_time,
        keep_loudest,
        ClusterStrategy::sorted_with_bailout(|_: &Tagged, _: &Tagged| true),
    );

    assert_eq!(triggers.len(), 3);
}

#[test]
fn engine_can_be_reused_across_trigger_sets() {
    let window = Duration::seconds(2);
    let mut engine = ClusterEngine::new(window, separated_in_time, keep_loudest);

    let mut first = vec![trig(0, 1.0, "a"), trig(1, 2.0, "b")];
    let mut second = vec![trig(10, 3.0, "c"), trig(20, 4.0, "d")];

    assert_eq!(engine.run(&mut first).merges, 1);
    assert_eq!(engine.run(&mut second).merges, 0);
    assert_eq!(times_and_scores(&first), vec![(1, 2.0)]);
    assert_eq!(times_and_scores(&second), vec![(10, 3.0), (20, 4.0)]);
}

#[test]
fn sub_second_windows_use_nanosecond_times() {
    let window = Duration::milliseconds(16);
    let base = GpsTime::from_seconds(1_000_000_000);
    let mut triggers = vec![
        TriggerRecord::new(base, 6.0, "a"),
        TriggerRecord::new(base + Duration::milliseconds(15), 8.0, "b"),
        TriggerRecord::new(base + Duration::milliseconds(40), 7.0, "c"),
    ];

    cluster_loudest(&mut triggers, window, true);

    let tags: Vec<_> = triggers.iter().map(|t| t.payload).collect();
    assert_eq!(tags, vec!["b", "c"]);
}

// =============================================================================
// Extreme timestamps
// =============================================================================

#[test]
fn far_apart_times_stay_distinct_without_overflow() {
    let far: GpsTime = "9223372036854775807".parse().unwrap();
    let huge = GpsTime::from_f64(1.0e16).unwrap();

    for (late, use_bailout) in [(far, false), (far, true), (huge, false), (huge, true)] {
        let mut triggers = vec![
            TriggerRecord::new(GpsTime::from_seconds(0), 1.0, "early"),
            TriggerRecord::new(late, 2.0, "late"),
        ];
        let stats = cluster_loudest(&mut triggers, Duration::seconds(10), use_bailout);

        let tags: Vec<_> = triggers.iter().map(|t| t.payload).collect();
        assert_eq!(tags, vec!["early", "late"]);
        assert_eq!(stats.merges, 0);
    }
}

#[test]
fn extreme_times_within_window_still_cluster() {
    let top = GpsTime::from_seconds(i64::MAX);
    let mut triggers = vec![
        TriggerRecord::new(top - Duration::seconds(5), 3.0, "a"),
        TriggerRecord::new(top, 4.0, "b"),
        TriggerRecord::new(GpsTime::from_seconds(i64::MIN), 1.0, "c"),
    ];

    cluster_loudest(&mut triggers, Duration::seconds(10), true);

    let tags: Vec<_> = triggers.iter().map(|t| t.payload).collect();
    assert_eq!(tags, vec!["c", "b"]);
}

// =============================================================================
// Pipeline
// =============================================================================

#[test]
fn pipeline_filters_clusters_sorts_and_summarizes() {
    let triggers = vec![
        trig(0, 5.0, "a"),
        trig(1, 9.0, "b"),
        trig(100, 6.0, "c"),
        trig(104, 5.5, "d"),
        trig(200, 1.0, "e"),
    ];
    let config = ClusterConfig::with_window(Duration::seconds(10))
        .score_threshold(2.0)
        .sort_order(ScoreOrder::Descending);

    let run = run_cluster(triggers, &config).unwrap();

    let tags: Vec<_> = run.triggers.iter().map(|t| t.payload).collect();
    assert_eq!(tags, vec!["b", "c"]);

    let summary = serde_json::to_value(&run.summary).unwrap();
    assert_eq!(summary["cluster_window"], "10.000000000");
    assert_eq!(summary["score_threshold"], 2.0);
    assert_eq!(summary["sort_order"], "descending");
    assert_eq!(summary["bailout"], true);
    assert_eq!(summary["n_input"], 5);
    assert_eq!(summary["n_discarded"], 1);
    assert_eq!(summary["n_events"], 2);
    assert_eq!(summary["merges"], 2);
}

#[test]
fn pipeline_config_from_json() {
    let config: ClusterConfig = serde_json::from_str(
        r#"{"cluster_window": "0.5", "score_threshold": 3.0, "bailout": false}"#,
    )
    .unwrap();
    let triggers = vec![trig(0, 2.0, "quiet"), trig(0, 4.0, "loud")];

    let run = run_cluster(triggers, &config).unwrap();

    assert_eq!(run.triggers.len(), 1);
    assert_eq!(run.triggers[0].payload, "loud");
    assert!(!run.summary.bailout);
}

#[test]
fn pipeline_rejects_bad_input() {
    let config = ClusterConfig::default();
    let err = run_cluster(vec![trig(0, f64::INFINITY, "bad")], &config).unwrap_err();
    assert_eq!(
        err,
        ClusterError::NonFiniteScore {
            index: 0,
            score: f64::INFINITY
        }
    );
}
