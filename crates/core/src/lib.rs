//! Vitalwatch risk and alerting engine.
//!
//! Two independent, pure components share one vocabulary:
//!
//! - [`thresholds::evaluate`] turns one reading into zero or more
//!   [`alert::AlertRecord`]s, at most one per vital.
//! - [`risk::score`] turns the latest reading, a trailing history and the
//!   patient's conditions into a [`risk::RiskScoreResult`].
//!
//! Persistence, identity, notification and caching belong to the caller.

pub mod alert;
pub mod error;
pub mod reading;
pub mod risk;
pub mod thresholds;
pub mod types;
pub mod validation;
pub mod vitals;
