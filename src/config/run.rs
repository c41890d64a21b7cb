//! Run configuration.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::{AssignmentPolicy, DurationBounds};

/// Environment variable prefix used by [`RunConfig::from_env`].
pub const ENV_PREFIX: &str = "DUNGEON_";

/// Startup parameters for one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunConfig {
    /// Number of dungeon instances (worker threads).
    pub instance_count: usize,
    /// Tanks in the initial pool.
    pub tanks: u32,
    /// Healers in the initial pool.
    pub healers: u32,
    /// Damage dealers in the initial pool.
    pub dps: u32,
    /// Shortest job, in ticks.
    pub min_duration: u64,
    /// Longest job, in ticks.
    pub max_duration: u64,
    /// Wall-clock length of one tick in milliseconds (real-time runs only).
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,
    /// Upper bound on the scheduler's back-off wait in milliseconds.
    #[serde(default = "default_retry_interval_ms")]
    pub retry_interval_ms: u64,
    /// Status display cadence in milliseconds.
    #[serde(default = "default_status_interval_ms")]
    pub status_interval_ms: u64,
    /// Assignments per scheduler cycle.
    #[serde(default)]
    pub policy: AssignmentPolicy,
    /// Fixed seed for duration sampling.
    #[serde(default)]
    pub seed: Option<u64>,
}

const fn default_tick_ms() -> u64 {
    1000
}

const fn default_retry_interval_ms() -> u64 {
    100
}

const fn default_status_interval_ms() -> u64 {
    1000
}

impl RunConfig {
    /// Configuration with the given pool and bounds and default timings.
    #[must_use]
    pub const fn new(
        instance_count: usize,
        tanks: u32,
        healers: u32,
        dps: u32,
        min_duration: u64,
        max_duration: u64,
    ) -> Self {
        Self {
            instance_count,
            tanks,
            healers,
            dps,
            min_duration,
            max_duration,
            tick_ms: default_tick_ms(),
            retry_interval_ms: default_retry_interval_ms(),
            status_interval_ms: default_status_interval_ms(),
            policy: AssignmentPolicy::Single,
            seed: None,
        }
    }

    /// Set the tick length.
    #[must_use]
    pub const fn with_tick_ms(mut self, tick_ms: u64) -> Self {
        self.tick_ms = tick_ms;
        self
    }

    /// Set the scheduler back-off bound.
    #[must_use]
    pub const fn with_retry_interval_ms(mut self, retry_interval_ms: u64) -> Self {
        self.retry_interval_ms = retry_interval_ms;
        self
    }

    /// Set the status display cadence.
    #[must_use]
    pub const fn with_status_interval_ms(mut self, status_interval_ms: u64) -> Self {
        self.status_interval_ms = status_interval_ms;
        self
    }

    /// Set the assignment policy.
    #[must_use]
    pub const fn with_policy(mut self, policy: AssignmentPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Fix the sampling seed.
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns a description of the first invalid field.
    pub fn validate(&self) -> Result<(), String> {
        DurationBounds::new(self.min_duration, self.max_duration)?;
        if self.tick_ms == 0 {
            return Err("tick_ms must be greater than 0".into());
        }
        if self.retry_interval_ms == 0 {
            return Err("retry_interval_ms must be greater than 0".into());
        }
        if self.status_interval_ms == 0 {
            return Err("status_interval_ms must be greater than 0".into());
        }
        Ok(())
    }

    /// Parse configuration from a JSON string and validate.
    ///
    /// # Errors
    ///
    /// Returns a message on malformed JSON or invalid values.
    pub fn from_json_str(input: &str) -> Result<Self, String> {
        let cfg: Self = serde_json::from_str(input).map_err(|e| format!("parse error: {e}"))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Load configuration from `DUNGEON_*` environment variables, reading a
    /// `.env` file first if one is present.
    ///
    /// # Errors
    ///
    /// Returns a message when a required variable is missing or unparsable.
    pub fn from_env() -> Result<Self, String> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from any key lookup using the `DUNGEON_*` names.
    ///
    /// # Errors
    ///
    /// Returns a message when a required key is missing or unparsable.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::new(
            required(&lookup, "INSTANCES")?,
            required(&lookup, "TANKS")?,
            required(&lookup, "HEALERS")?,
            required(&lookup, "DPS")?,
            required(&lookup, "MIN_DURATION")?,
            required(&lookup, "MAX_DURATION")?,
        );
        if let Some(v) = optional(&lookup, "TICK_MS")? {
            cfg.tick_ms = v;
        }
        if let Some(v) = optional(&lookup, "RETRY_INTERVAL_MS")? {
            cfg.retry_interval_ms = v;
        }
        if let Some(v) = optional(&lookup, "STATUS_INTERVAL_MS")? {
            cfg.status_interval_ms = v;
        }
        if let Some(v) = optional(&lookup, "POLICY")? {
            cfg.policy = v;
        }
        cfg.seed = optional(&lookup, "SEED")?;
        cfg.validate()?;
        Ok(cfg)
    }
}

fn optional<T, F>(lookup: &F, name: &str) -> Result<Option<T>, String>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    let key = format!("{ENV_PREFIX}{name}");
    lookup(&key)
        .map(|raw| {
            raw.trim()
                .parse::<T>()
                .map_err(|e| format!("{key}: invalid value `{raw}`: {e}"))
        })
        .transpose()
}

fn required<T, F>(lookup: &F, name: &str) -> Result<T, String>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    optional(lookup, name)?.ok_or_else(|| format!("{ENV_PREFIX}{name} is not set"))
}
