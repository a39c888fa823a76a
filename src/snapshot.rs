//! Snapshot aggregation.
//!
//! Combines phase, quote, weather and theme into one response. The clock
//! is read once per request, before any sub-fetch. Weather failures are
//! not papered over: the whole snapshot fails and the error is returned
//! unchanged.

use chrono::Local;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use tracing::{info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::error::SnapshotError;
use crate::phase;
use crate::quotes::QuoteRotator;
use crate::types::{Coordinate, SnapshotResponse, Theme, TimePhase};
use crate::weather::WeatherSource;

pub struct SnapshotAggregator {
    rotator: QuoteRotator,
    weather: Arc<dyn WeatherSource>,
    location: Coordinate,
    theme: Theme,
    /// Highest `unix_ms` handed out so far.
    last_unix_ms: AtomicI64,
}

impl SnapshotAggregator {
    pub fn new(
        rotator: QuoteRotator,
        weather: Arc<dyn WeatherSource>,
        location: Coordinate,
        theme: Theme,
    ) -> Self {
        Self {
            rotator,
            weather,
            location,
            theme,
            last_unix_ms: AtomicI64::new(i64::MIN),
        }
    }

    /// Build a snapshot for the current local time.
    pub async fn build(&self) -> Result<SnapshotResponse, SnapshotError> {
        let now = Local::now();
        self.build_for(now.timestamp_millis(), phase::classify_at(&now)).await
    }

    /// Build a snapshot as of `unix_ms`, classified by the local `hour`.
    pub async fn build_at(&self, unix_ms: i64, hour: u32) -> Result<SnapshotResponse, SnapshotError> {
        self.build_for(unix_ms, phase::classify(hour)).await
    }

    async fn build_for(&self, unix_ms: i64, phase: TimePhase) -> Result<SnapshotResponse, SnapshotError> {
        let span = info_span!("snapshot", request_id = %Uuid::new_v4());
        self.assemble(unix_ms, phase).instrument(span).await
    }

    async fn assemble(&self, unix_ms: i64, phase: TimePhase) -> Result<SnapshotResponse, SnapshotError> {
        let unix_ms = self.stamp(unix_ms);

        // Check before the network round-trip so a bad bank fails fast.
        if !self.rotator.bank().contains(phase) {
            return Err(SnapshotError::MissingPhase(phase));
        }

        // Weather first: a failed snapshot should not advance the rotation.
        let weather = match self.weather.resolve(self.location).await {
            Ok(w) => w,
            Err(e) => {
                warn!(%phase, error = %e, "Snapshot failed: weather unavailable");
                return Err(e);
            }
        };

        let quote = self.rotator.select(phase)?;

        info!(unix_ms, %phase, "Snapshot built");

        Ok(SnapshotResponse {
            unix_ms,
            quote,
            phase,
            weather,
            theme: self.theme.clone(),
        })
    }

    /// Clamp `now_ms` so issued timestamps never go backwards, even if the
    /// wall clock does.
    fn stamp(&self, now_ms: i64) -> i64 {
        let previous = self.last_unix_ms.fetch_max(now_ms, Ordering::SeqCst);
        previous.max(now_ms)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
