use std::str::FromStr;

use chrono::Duration;
use vitalwatch_core::risk::RiskTuning;

use crate::error::{MonitorError, MonitorResult};

/// Default repeat-alert suppression window (5 minutes).
pub const DEFAULT_ALERT_COOLDOWN_SECS: i64 = 300;
/// Default risk score cache lifetime (10 minutes).
pub const DEFAULT_RISK_CACHE_TTL_SECS: i64 = 600;

/// Monitor configuration loaded from environment variables.
///
/// All fields have defaults matching the reviewed engine constants.
#[derive(Debug, Clone, PartialEq)]
pub struct MonitorConfig {
    /// Window in which a repeated alert for the same patient and vital is
    /// suppressed.
    pub alert_cooldown: Duration,
    /// How long a computed risk score is served from cache.
    pub risk_cache_ttl: Duration,
    /// Engine constants passed to every scoring call.
    pub tuning: RiskTuning,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            alert_cooldown: Duration::seconds(DEFAULT_ALERT_COOLDOWN_SECS),
            risk_cache_ttl: Duration::seconds(DEFAULT_RISK_CACHE_TTL_SECS),
            tuning: RiskTuning::default(),
        }
    }
}

impl MonitorConfig {
    /// Load a `.env` file if present, then read [`MonitorConfig::from_env`].
    pub fn load() -> MonitorResult<Self> {
        dotenvy::dotenv().ok();
        Self::from_env()
    }

    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                    | Default |
    /// |----------------------------|---------|
    /// | `ALERT_COOLDOWN_SECS`      | `300`   |
    /// | `RISK_CACHE_TTL_SECS`      | `600`   |
    /// | `RISK_COMPOUND_PAIR_BONUS` | `5`     |
    /// | `RISK_COMPOUND_MANY_BONUS` | `10`    |
    /// | `RISK_TREND_DEAD_ZONE`     | `0.5`   |
    /// | `RISK_TREND_PENALTY_CAP`   | `5`     |
    pub fn from_env() -> MonitorResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> MonitorResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = RiskTuning::default();

        let alert_cooldown_secs: i64 =
            parse_var(&lookup, "ALERT_COOLDOWN_SECS", DEFAULT_ALERT_COOLDOWN_SECS)?;
        let risk_cache_ttl_secs: i64 =
            parse_var(&lookup, "RISK_CACHE_TTL_SECS", DEFAULT_RISK_CACHE_TTL_SECS)?;

        let tuning = RiskTuning {
            compound_pair_bonus: parse_var(
                &lookup,
                "RISK_COMPOUND_PAIR_BONUS",
                defaults.compound_pair_bonus,
            )?,
            compound_many_bonus: parse_var(
                &lookup,
                "RISK_COMPOUND_MANY_BONUS",
                defaults.compound_many_bonus,
            )?,
            trend_dead_zone: parse_var(&lookup, "RISK_TREND_DEAD_ZONE", defaults.trend_dead_zone)?,
            trend_penalty_cap: parse_var(
                &lookup,
                "RISK_TREND_PENALTY_CAP",
                defaults.trend_penalty_cap,
            )?,
            ..defaults
        };
        tuning
            .validate()
            .map_err(|e| MonitorError::Config(e.to_string()))?;

        Ok(Self {
            alert_cooldown: non_negative_secs("ALERT_COOLDOWN_SECS", alert_cooldown_secs)?,
            risk_cache_ttl: non_negative_secs("RISK_CACHE_TTL_SECS", risk_cache_ttl_secs)?,
            tuning,
        })
    }
}

fn parse_var<T, F>(lookup: &F, key: &str, default: T) -> MonitorResult<T>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| MonitorError::Config(format!("{key} has invalid value '{raw}'"))),
    }
}

fn non_negative_secs(key: &str, secs: i64) -> MonitorResult<Duration> {
    if secs < 0 {
        return Err(MonitorError::Config(format!("{key} must not be negative")));
    }
    Duration::try_seconds(secs)
        .ok_or_else(|| MonitorError::Config(format!("{key} is out of range")))
}
