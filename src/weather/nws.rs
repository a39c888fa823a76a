//! National Weather Service current-conditions client.
//!
//! Two hops per lookup:
//! 1. `GET {base}/points/{lat},{lon}` → `properties.forecastHourly`
//! 2. `GET {forecastHourly}` → `properties.periods[0]` is "now"
//!
//! API docs: https://www.weather.gov/documentation/services-web-api
//! Auth: none, but a descriptive `User-Agent` is mandatory.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{header, Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info, warn};

use super::WeatherSource;
use crate::config::WeatherConfig;
use crate::error::{SnapshotError, UpstreamStage};
use crate::types::{Coordinate, WeatherRecord};

// ---------------------------------------------------------------------------
// API response types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct PointsResponse {
    #[serde(default)]
    properties: Option<PointsProperties>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PointsProperties {
    #[serde(default)]
    forecast_hourly: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    #[serde(default)]
    properties: Option<ForecastProperties>,
}

#[derive(Debug, Deserialize)]
struct ForecastProperties {
    #[serde(default)]
    periods: Option<Vec<ForecastPeriod>>,
}

/// One hourly period. Fields are optional here so a missing one surfaces
/// as a format error naming the field, not a generic decode failure.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ForecastPeriod {
    #[serde(default)]
    start_time: Option<String>,
    #[serde(default)]
    temperature: Option<serde_json::Number>,
    #[serde(default)]
    temperature_unit: Option<String>,
    #[serde(default)]
    wind_speed: Option<String>,
    #[serde(default)]
    wind_direction: Option<String>,
    #[serde(default)]
    short_forecast: Option<String>,
    #[serde(default)]
    detailed_forecast: Option<String>,
}

impl ForecastPeriod {
    fn into_record(self) -> Result<WeatherRecord, SnapshotError> {
        fn require<T>(value: Option<T>, field: &str) -> Result<T, SnapshotError> {
            value.ok_or_else(|| {
                SnapshotError::format(UpstreamStage::Forecast, format!("period is missing `{field}`"))
            })
        }

        let temperature = require(self.temperature, "temperature")?;
        let unit = require(self.temperature_unit, "temperatureUnit")?;
        let speed = require(self.wind_speed, "windSpeed")?;
        let direction = require(self.wind_direction, "windDirection")?;

        Ok(WeatherRecord {
            timestamp: require(self.start_time, "startTime")?,
            temperature: format!("{temperature} {unit}"),
            wind: format!("{speed} {direction}"),
            short: require(self.short_forecast, "shortForecast")?,
            detailed: require(self.detailed_forecast, "detailedForecast")?,
        })
    }
}

// ---------------------------------------------------------------------------
// Lookup state machine
// ---------------------------------------------------------------------------

/// Progress of one lookup. `Complete` and `Failed` are terminal.
#[derive(Debug)]
pub enum FetchState {
    Unresolved,
    GridResolved { forecast_url: String },
    Complete(WeatherRecord),
    Failed(SnapshotError),
}

impl FetchState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, FetchState::Complete(_) | FetchState::Failed(_))
    }
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// NWS client. Holds no per-lookup state, so one instance serves all requests.
pub struct NwsClient {
    http: Client,
    base_url: String,
    max_retries: u32,
    base_backoff_ms: u64,
}

impl NwsClient {
    pub fn new(config: &WeatherConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.clone())
            .build()
            .context("Failed to build NWS HTTP client")?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            max_retries: config.max_retries,
            base_backoff_ms: config.base_backoff_ms,
        })
    }

    /// Move a lookup one step forward. Terminal states are returned as-is.
    pub async fn advance(&self, state: FetchState, coord: Coordinate) -> FetchState {
        match state {
            FetchState::Unresolved => match self.resolve_grid(coord).await {
                Ok(forecast_url) => FetchState::GridResolved { forecast_url },
                Err(e) => FetchState::Failed(e),
            },
            FetchState::GridResolved { forecast_url } => {
                match self.fetch_current(&forecast_url).await {
                    Ok(record) => FetchState::Complete(record),
                    Err(e) => FetchState::Failed(e),
                }
            }
            terminal => terminal,
        }
    }

    /// Hop 1: coordinate → hourly forecast URL.
    async fn resolve_grid(&self, coord: Coordinate) -> Result<String, SnapshotError> {
        let url = format!("{}/points/{coord}", self.base_url);
        debug!(url = %url, "Resolving NWS grid");

        // A grid body we cannot read has no locator either.
        let points: PointsResponse = match self.get_json(&url, UpstreamStage::Grid).await {
            Err(SnapshotError::UpstreamFormat { stage, message }) => {
                return Err(SnapshotError::Upstream { stage, message })
            }
            other => other?,
        };

        points
            .properties
            .and_then(|p| p.forecast_hourly)
            .filter(|u| !u.trim().is_empty())
            .ok_or_else(|| {
                SnapshotError::upstream(UpstreamStage::Grid, "response has no `properties.forecastHourly`")
            })
    }

    /// Hop 2: hourly forecast → first period.
    async fn fetch_current(&self, forecast_url: &str) -> Result<WeatherRecord, SnapshotError> {
        debug!(url = %forecast_url, "Fetching NWS hourly forecast");
        let forecast: ForecastResponse = self.get_json(forecast_url, UpstreamStage::Forecast).await?;

        let current = forecast
            .properties
            .and_then(|p| p.periods)
            .and_then(|periods| periods.into_iter().next())
            .ok_or_else(|| {
                SnapshotError::format(UpstreamStage::Forecast, "response has no forecast periods")
            })?;

        current.into_record()
    }

    /// GET and decode JSON, retrying connection errors, 429 and 5xx with
    /// exponential backoff. Timeouts fail the hop without a retry.
    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        stage: UpstreamStage,
    ) -> Result<T, SnapshotError> {
        let mut last_error = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                let delay = self.backoff(attempt);
                debug!(attempt, delay_ms = delay.as_millis() as u64, %stage, "Retrying NWS request");
                tokio::time::sleep(delay).await;
            }

            let resp = self
                .http
                .get(url)
                .header(header::ACCEPT, "application/geo+json")
                .send()
                .await;

            match resp {
                Ok(response) => {
                    let status = response.status();

                    if status.is_success() {
                        let body = response.text().await.map_err(|e| {
                            SnapshotError::upstream(stage, format!("failed to read body: {e}"))
                        })?;
                        return serde_json::from_str(&body).map_err(|e| {
                            SnapshotError::format(stage, format!("invalid JSON: {e}"))
                        });
                    }

                    if is_retryable(status) {
                        warn!(status = %status, attempt, %stage, "Retryable NWS error");
                        last_error = Some(format!("HTTP {status}"));
                        continue;
                    }

                    return Err(SnapshotError::upstream(stage, format!("HTTP {status}")));
                }
                // A timeout already spent the whole per-request budget.
                Err(e) if e.is_timeout() => {
                    warn!(attempt, %stage, error = %e, "NWS request timed out");
                    return Err(SnapshotError::upstream(stage, format!("timed out: {e}")));
                }
                Err(e) => {
                    warn!(attempt, %stage, error = %e, "NWS request failed");
                    last_error = Some(format!("request error: {e}"));
                    continue;
                }
            }
        }

        Err(SnapshotError::upstream(
            stage,
            format!(
                "failed after {} attempt(s): {}",
                self.max_retries + 1,
                last_error.unwrap_or_default()
            ),
        ))
    }

    fn backoff(&self, attempt: u32) -> Duration {
        let factor = 2u64.saturating_pow(attempt.saturating_sub(1));
        Duration::from_millis(self.base_backoff_ms.saturating_mul(factor))
    }
}

fn is_retryable(status: StatusCode) -> bool {
    status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
}

#[async_trait]
impl WeatherSource for NwsClient {
    async fn resolve(&self, coord: Coordinate) -> Result<WeatherRecord, SnapshotError> {
        let mut state = FetchState::Unresolved;
        while !state.is_terminal() {
            state = self.advance(state, coord).await;
        }

        match state {
            FetchState::Complete(record) => {
                info!(
                    %coord,
                    temperature = %record.temperature,
                    short = %record.short,
                    "Weather resolved"
                );
                Ok(record)
            }
            FetchState::Failed(err) => Err(err),
            // The loop above only exits on a terminal state.
            FetchState::Unresolved | FetchState::GridResolved { .. } => Err(
                SnapshotError::Configuration("weather lookup stopped before completing".into()),
            ),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
