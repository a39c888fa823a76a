//! Live weather lookup.
//!
//! Defines the `WeatherSource` trait the aggregator depends on, and the
//! National Weather Service implementation in [`nws`].

pub mod nws;

use async_trait::async_trait;

use crate::error::SnapshotError;
use crate::types::{Coordinate, WeatherRecord};

/// Abstraction over current-conditions providers.
///
/// Implementations must not cache: every call reflects the upstream at
/// the time of the call.
#[async_trait]
pub trait WeatherSource: Send + Sync {
    /// Current conditions at `coord`.
    async fn resolve(&self, coord: Coordinate) -> Result<WeatherRecord, SnapshotError>;
}
