//! Time-of-day phase classification.
//!
//! Boundaries are half-open on the local hour:
//!
//! | hours        | phase     |
//! |--------------|-----------|
//! | 05–06        | dawn      |
//! | 07–10        | morning   |
//! | 11–14        | midday    |
//! | 15–17        | afternoon |
//! | 18–20        | evening   |
//! | 21–23, 00–04 | night     |
//!
//! Hours outside 0–23 are a caller bug; they land in the catch-all arm and
//! classify as night.

use chrono::{DateTime, TimeZone, Timelike};

use crate::types::TimePhase;

/// Map an hour of the day to its phase.
pub fn classify(hour: u32) -> TimePhase {
    match hour {
        5..=6 => TimePhase::Dawn,
        7..=10 => TimePhase::Morning,
        11..=14 => TimePhase::Midday,
        15..=17 => TimePhase::Afternoon,
        18..=20 => TimePhase::Evening,
        _ => TimePhase::Night,
    }
}

/// Classify a timestamp by its hour in its own time zone.
pub fn classify_at<Tz: TimeZone>(at: &DateTime<Tz>) -> TimePhase {
    classify(at.hour())
}
