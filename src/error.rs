//! Error taxonomy for snapshot aggregation.
//!
//! Upstream failures are split by whether the weather service could not be
//! reached (or refused us) versus answered with something we cannot read.

use std::fmt;
use thiserror::Error;

use crate::types::TimePhase;

/// Which hop of the weather lookup failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpstreamStage {
    /// `/points/{lat},{lon}` grid resolution.
    Grid,
    /// The hourly forecast at the resolved locator.
    Forecast,
}

impl fmt::Display for UpstreamStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpstreamStage::Grid => write!(f, "grid"),
            UpstreamStage::Forecast => write!(f, "forecast"),
        }
    }
}

#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("weather upstream {stage} request failed: {message}")]
    Upstream {
        stage: UpstreamStage,
        message: String,
    },

    #[error("weather upstream {stage} response malformed: {message}")]
    UpstreamFormat {
        stage: UpstreamStage,
        message: String,
    },

    #[error("no quotes configured for phase {0}")]
    MissingPhase(TimePhase),

    #[error("configuration error: {0}")]
    Configuration(String),
}

impl SnapshotError {
    pub fn upstream(stage: UpstreamStage, message: impl Into<String>) -> Self {
        Self::Upstream { stage, message: message.into() }
    }

    pub fn format(stage: UpstreamStage, message: impl Into<String>) -> Self {
        Self::UpstreamFormat { stage, message: message.into() }
    }

    /// Whether the failure came from the weather service rather than from us.
    pub fn is_upstream(&self) -> bool {
        matches!(self, Self::Upstream { .. } | Self::UpstreamFormat { .. })
    }

    /// Whether the configuration layer is at fault (programming error).
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::MissingPhase(_) | Self::Configuration(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_name_the_stage() {
        let err = SnapshotError::upstream(UpstreamStage::Grid, "HTTP 503");
        assert_eq!(err.to_string(), "weather upstream grid request failed: HTTP 503");

        let err = SnapshotError::format(UpstreamStage::Forecast, "no periods");
        assert!(err.to_string().contains("forecast response malformed"));
    }

    #[test]
    fn test_classification() {
        assert!(SnapshotError::upstream(UpstreamStage::Grid, "x").is_upstream());
        assert!(SnapshotError::format(UpstreamStage::Grid, "x").is_upstream());
        assert!(SnapshotError::MissingPhase(TimePhase::Dawn).is_configuration());
        assert!(!SnapshotError::Configuration("x".into()).is_upstream());
    }
}
