//! Snapshot server — time-of-day quote, live weather and theme in one call.
//!
//! Library crate exposing all modules for use by integration tests
//! and the binary entry point.

pub mod config;
pub mod error;
pub mod types;
pub mod phase;
pub mod quotes;
pub mod weather;
pub mod theme;
pub mod snapshot;
pub mod server;
