//! Shared types for the snapshot server.
//!
//! Everything that crosses a module boundary or ends up in the JSON
//! response lives here, so the quote, weather and server modules can
//! depend on it without depending on each other.

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Time phase
// ---------------------------------------------------------------------------

/// A named segment of the day, used to pick a fitting quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimePhase {
    Dawn,
    Morning,
    Midday,
    Afternoon,
    Evening,
    Night,
}

impl TimePhase {
    /// All phases in day order, starting at dawn.
    pub const ALL: &'static [TimePhase] = &[
        TimePhase::Dawn,
        TimePhase::Morning,
        TimePhase::Midday,
        TimePhase::Afternoon,
        TimePhase::Evening,
        TimePhase::Night,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TimePhase::Dawn => "dawn",
            TimePhase::Morning => "morning",
            TimePhase::Midday => "midday",
            TimePhase::Afternoon => "afternoon",
            TimePhase::Evening => "evening",
            TimePhase::Night => "night",
        }
    }
}

impl fmt::Display for TimePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Case-insensitive parse from the lowercase wire name.
impl std::str::FromStr for TimePhase {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        TimePhase::ALL
            .iter()
            .copied()
            .find(|p| p.as_str() == lower)
            .ok_or_else(|| anyhow::anyhow!("Unknown time phase: {s}"))
    }
}

// ---------------------------------------------------------------------------
// Location
// ---------------------------------------------------------------------------

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Whether both components are finite and inside the valid ranges.
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lon.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lon)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.lat, self.lon)
    }
}

// ---------------------------------------------------------------------------
// Weather
// ---------------------------------------------------------------------------

/// Current conditions, normalised for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherRecord {
    /// Period start time exactly as the upstream reported it.
    pub timestamp: String,
    /// e.g. `"72 F"`
    pub temperature: String,
    /// e.g. `"10 mph NW"`
    pub wind: String,
    pub short: String,
    pub detailed: String,
}

// ---------------------------------------------------------------------------
// Theme
// ---------------------------------------------------------------------------

/// A colour palette for the client UI. Colours are CSS hex strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,
    pub background: String,
    pub surface: String,
    pub text: String,
    pub accent: String,
    pub muted: String,
}

// ---------------------------------------------------------------------------
// Snapshot
// ---------------------------------------------------------------------------

/// The combined point-in-time response served at `/api/snapshot`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotResponse {
    pub unix_ms: i64,
    pub quote: String,
    pub phase: TimePhase,
    pub weather: WeatherRecord,
    pub theme: Theme,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
