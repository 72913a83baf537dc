//! Shared configuration, error types, IDs, and observability primitives for Lakebed crates.
//!
//! Architecture role:
//! - defines the scan/write tuning knobs passed across layers
//! - provides common [`LkbError`] / [`Result`] contracts
//! - hosts the metrics registry used at planning boundaries
//!
//! Key modules:
//! - [`config`]
//! - [`error`]
//! - [`ids`]
//! - [`metrics`]

pub mod config;
pub mod error;
pub mod ids;
pub mod metrics;

pub use config::{ScanConfig, WriteConfig};
pub use error::{LkbError, Result};
pub use ids::*;
pub use metrics::MetricsRegistry;
