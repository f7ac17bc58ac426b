//! Trigger records: time-stamped, scored detections.

use super::time::GpsTime;
use serde::{Deserialize, Serialize};

/// A detection that can be clustered.
///
/// The engine only ever reads a trigger's time and score; everything else a
/// type carries is payload that rides along with whichever trigger survives.
pub trait Trigger {
    /// Time of the detection.
    fn time(&self) -> GpsTime;

    /// Ranking statistic; higher is more significant.
    fn score(&self) -> f64;
}

impl<T: Trigger + ?Sized> Trigger for Box<T> {
    fn time(&self) -> GpsTime {
        (**self).time()
    }

    fn score(&self) -> f64 {
        (**self).score()
    }
}

/// A concrete trigger with an arbitrary payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriggerRecord<P = ()> {
    /// Time of the detection.
    pub time: GpsTime,
    /// Ranking statistic.
    pub score: f64,
    /// Caller data, untouched by clustering.
    pub payload: P,
}

impl<P> TriggerRecord<P> {
    /// Create a trigger carrying `payload`.
    pub fn new(time: GpsTime, score: f64, payload: P) -> Self {
        Self {
            time,
            score,
            payload,
        }
    }

    /// Replace the payload, keeping time and score.
    pub fn with_payload<Q>(self, payload: Q) -> TriggerRecord<Q> {
        TriggerRecord {
            time: self.time,
            score: self.score,
            payload,
        }
    }
}

impl TriggerRecord {
    /// A trigger with no payload.
    pub fn bare(time: GpsTime, score: f64) -> Self {
        Self::new(time, score, ())
    }
}

impl<P> Trigger for TriggerRecord<P> {
    fn time(&self) -> GpsTime {
        self.time
    }

    fn score(&self) -> f64 {
        self.score
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn record_exposes_time_and_score() {
        let trigger = TriggerRecord::new(GpsTime::new(100, 5), 8.5, "H1");
        assert_eq!(trigger.time(), GpsTime::new(100, 5));
        assert_relative_eq!(trigger.score(), 8.5);
        assert_eq!(trigger.payload, "H1");
    }

    #[test]
    fn with_payload_keeps_time_and_score() {
        let trigger = TriggerRecord::bare(GpsTime::from_seconds(7), 3.0).with_payload(42_u64);
        assert_eq!(trigger.time, GpsTime::from_seconds(7));
        assert_eq!(trigger.payload, 42);
    }

    #[test]
    fn boxed_triggers_delegate() {
        let boxed: Box<dyn Trigger> = Box::new(TriggerRecord::bare(GpsTime::from_seconds(3), 1.0));
        assert_eq!(boxed.time(), GpsTime::from_seconds(3));
        assert_relative_eq!(boxed.score(), 1.0);
    }

    #[test]
    fn serializes_with_payload() {
        let trigger = TriggerRecord::new(GpsTime::new(1, 500_000_000), 6.0, 9_u32);
        let json = serde_json::to_value(&trigger).unwrap();
        assert_eq!(json["time"], "1.500000000");
        assert_eq!(json["payload"], 9);
    }
}
