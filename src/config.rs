use std::time::Duration;

/// Env variable which Lambda sets when advanced logging controls are used
pub const LOG_LEVEL_ENV: &str = "AWS_LAMBDA_LOG_LEVEL";

/// Delay simulating a slow runtime initialisation. Elapses once per
/// execution environment, before the first invocation is served.
///
/// Three seconds, not the three microseconds a bare nanosecond
/// literal of `3000` would give.
pub const COLD_START: Duration = Duration::from_secs(3);

/// Process wide settings, read once during startup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Maximum level of emitted log records
    pub log_level: log::LevelFilter,
    /// See [`COLD_START`]
    pub cold_start: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: log::LevelFilter::Info,
            cold_start: COLD_START,
        }
    }
}

impl Config {
    /// Reads the configuration from the environment
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_log_level(std::env::var(LOG_LEVEL_ENV).ok().as_deref())
    }

    fn from_log_level(log_level: Option<&str>) -> anyhow::Result<Self> {
        use anyhow::Context;

        let mut config = Self::default();
        match log_level.filter(|level| !level.is_empty()) {
            // Lambda knows FATAL, log does not
            Some(level) if level.eq_ignore_ascii_case("fatal") => {
                config.log_level = log::LevelFilter::Error;
            }
            Some(level) => {
                config.log_level = level
                    .parse()
                    .with_context(|| format!("Invalid {LOG_LEVEL_ENV} value: {level}"))?;
            }
            None => {}
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::Config;

    #[test]
    fn test_default_log_level() {
        let config = Config::from_log_level(None).expect("Unable to read config");
        assert_eq!(config.log_level, log::LevelFilter::Info);
        let config = Config::from_log_level(Some("")).expect("Unable to read config");
        assert_eq!(config.log_level, log::LevelFilter::Info);
    }

    #[test]
    fn test_lambda_log_level_names() {
        let config = Config::from_log_level(Some("DEBUG")).expect("Unable to read config");
        assert_eq!(config.log_level, log::LevelFilter::Debug);
        let config = Config::from_log_level(Some("warn")).expect("Unable to read config");
        assert_eq!(config.log_level, log::LevelFilter::Warn);
        let config = Config::from_log_level(Some("FATAL")).expect("Unable to read config");
        assert_eq!(config.log_level, log::LevelFilter::Error);
    }

    #[test]
    fn test_invalid_log_level() {
        assert!(Config::from_log_level(Some("loud")).is_err());
    }
}
