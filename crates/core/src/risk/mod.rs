//! Risk scoring engine.
//!
//! All logic in this module is pure (no I/O, no clock, no shared state) so
//! it can be called from any number of request handlers concurrently and
//! tested in isolation.

pub mod conditions;
pub mod score;
pub mod trend;
pub mod tuning;
pub mod zones;

pub use conditions::ConditionSet;
pub use score::{score, score_with, RiskCategory, RiskFactor, RiskScoreResult};
pub use trend::Trend;
pub use tuning::RiskTuning;
pub use zones::Zone;
