//! Core data structures: fixed-point timestamps and trigger records.

pub mod time;
mod trigger;

pub use time::{duration_seconds, format_duration, parse_duration, GpsTime};
pub use trigger::{Trigger, TriggerRecord};
