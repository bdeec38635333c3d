//! Stateful monitoring layer over `vitalwatch_core`.
//!
//! Validates inbound readings, assigns alert identity, suppresses repeat
//! alerts and caches risk scores per patient. Persistence and delivery stay
//! with the embedding service.

pub mod cache;
pub mod config;
pub mod cooldown;
pub mod error;
pub mod monitor;

pub use config::MonitorConfig;
pub use error::{MonitorError, MonitorResult};
pub use monitor::{Assessment, PatientAlert, RiskSnapshot, VitalsMonitor};
