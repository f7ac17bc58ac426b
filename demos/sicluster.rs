//! Single-detector trigger clustering example.
//!
//! Builds a synthetic trigger stream, clusters it with a 16 ms window and
//! prints the survivors and the run summary.
//!
//! Run with: cargo run --example sicluster

use chrono::Duration;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;
use trigger_cluster::prelude::*;

/// Template parameters carried along untouched by clustering.
#[derive(Debug, Clone)]
struct Template {
    mass1: f64,
    mass2: f64,
}

fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::DEBUG)
        .with_target(false)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);

    println!("=== Trigger Clustering Example ===\n");

    // Three bursts of template matches around one second apart, plus a
    // quiet trigger that falls under the threshold.
    let raw = [
        ("1000000000.001", 6.1, 1.4, 1.4),
        ("1000000000.009", 8.7, 1.5, 1.3),
        ("1000000000.012", 7.2, 1.6, 1.2),
        ("1000000001.250", 5.9, 10.0, 9.0),
        ("1000000001.262", 6.4, 11.0, 8.5),
        ("1000000002.700", 4.2, 2.0, 1.0),
        ("1000000003.100", 12.3, 30.0, 25.0),
    ];

    let mut triggers = Vec::with_capacity(raw.len());
    for (time, snr, mass1, mass2) in raw {
        let time: GpsTime = time.parse()?;
        triggers.push(TriggerRecord::new(time, snr, Template { mass1, mass2 }));
    }

    println!("Input triggers:");
    for t in &triggers {
        println!(
            "  {}  snr={:5.2}  m1={:5.2} m2={:5.2}",
            t.time, t.score, t.payload.mass1, t.payload.mass2
        );
    }

    let config = ClusterConfig::with_window(Duration::milliseconds(16))
        .score_threshold(5.5)
        .sort_order(ScoreOrder::Descending);
    let run = run_cluster(triggers, &config)?;

    println!("\nClustered triggers (loudest first):");
    for t in &run.triggers {
        println!(
            "  {}  snr={:5.2}  m1={:5.2} m2={:5.2}",
            t.time, t.score, t.payload.mass1, t.payload.mass2
        );
    }

    println!("\nSummary:");
    match serde_json::to_string_pretty(&run.summary) {
        Ok(json) => println!("{json}"),
        Err(e) => println!("  could not serialize summary: {e}"),
    }
    println!(
        "\nKept {:.0}% of the input triggers.",
        100.0 * run.summary.survival_fraction()
    );

    Ok(())
}
