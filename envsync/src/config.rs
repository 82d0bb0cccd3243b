use client::ApiConfig;
use serde::Deserialize;
use std::fs::File;
use std::path::Path;

/// Overrides `api.api_key` from the config file when set.
pub const API_KEY_ENV: &str = "ENVSYNC_API_KEY";

fn default_level() -> String {
    "info".into()
}

#[derive(Clone, Deserialize, Debug, PartialEq)]
pub struct LoggingConfig {
    /// Default filter directive, `RUST_LOG` takes precedence
    #[serde(default = "default_level")]
    pub level: String,
    #[serde(default)]
    pub sentry_dsn: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: default_level(),
            sentry_dsn: None,
        }
    }
}

#[derive(Clone, Deserialize, Debug, PartialEq)]
pub struct MetricsConfig {
    pub statsd_host: String,
    pub statsd_port: u16,
}

#[derive(Clone, Deserialize, Debug, PartialEq)]
pub struct Config {
    pub api: ApiConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    pub metrics: Option<MetricsConfig>,
}

impl Config {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let file = File::open(path)?;
        let data = serde_yaml::from_reader(file)?;

        Ok(data)
    }

    /// Reads the file, applies the environment override and validates.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::from_file(path)?;
        config.override_api_key(std::env::var(API_KEY_ENV).ok());
        config.validate()?;

        Ok(config)
    }

    fn override_api_key(&mut self, api_key: Option<String>) {
        if let Some(key) = api_key.filter(|k| !k.trim().is_empty()) {
            self.api.api_key = Some(key);
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        match self.api.api_key.as_deref() {
            None => return Err(ValidationError::MissingApiKey),
            Some(key) if key.trim().is_empty() => return Err(ValidationError::MissingApiKey),
            Some(_) => {}
        }

        if self.api.timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }

        if let Some(metrics) = &self.metrics
            && metrics.statsd_port == 0
        {
            return Err(ValidationError::InvalidPort);
        }

        Ok(())
    }
}

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("no API key configured, set api.api_key or ENVSYNC_API_KEY")]
    MissingApiKey,
    #[error("api.timeout_secs must be greater than 0")]
    InvalidTimeout,
    #[error("Port cannot be 0")]
    InvalidPort,
}

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("could not load config from file: {0}")]
    LoadError(#[from] std::io::Error),
    #[error("could not parse config: {0}")]
    ParseError(#[from] serde_yaml::Error),
    #[error("invalid config: {0}")]
    Invalid(#[from] ValidationError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_tmp_file(s: &str) -> tempfile::NamedTempFile {
        let mut tmp = tempfile::NamedTempFile::new().expect("create temp file");
        write!(tmp, "{}", s).expect("write yaml");

        tmp
    }

    #[test]
    fn full_config() {
        let yaml = r#"
            api:
                url: https://api.envsync.internal/
                api_key: es_live_123
                timeout_secs: 10
            logging:
                level: debug
                sentry_dsn: https://public@sentry.example.com/1
            metrics:
                statsd_host: 127.0.0.1
                statsd_port: 8125
            "#;
        let tmp = write_tmp_file(yaml);
        let config = Config::from_file(tmp.path()).expect("load config");
        assert!(config.validate().is_ok());

        assert_eq!(config.api.url.as_str(), "https://api.envsync.internal/");
        assert_eq!(config.api.timeout_secs, 10);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(
            config.metrics,
            Some(MetricsConfig {
                statsd_host: "127.0.0.1".into(),
                statsd_port: 8125,
            })
        );
    }

    #[test]
    fn minimal_config_defaults() {
        let tmp = write_tmp_file("api:\n  url: http://localhost:4000/\n");
        let config = Config::from_file(tmp.path()).expect("load config");

        assert_eq!(config.logging, LoggingConfig::default());
        assert_eq!(config.metrics, None);
        assert!(matches!(
            config.validate().unwrap_err(),
            ValidationError::MissingApiKey
        ));
    }

    #[test]
    fn api_key_override() {
        let tmp = write_tmp_file("api:\n  url: http://localhost:4000/\n  api_key: from_file\n");
        let mut config = Config::from_file(tmp.path()).unwrap();

        config.override_api_key(Some("  ".into()));
        assert_eq!(config.api.api_key.as_deref(), Some("from_file"));

        config.override_api_key(Some("from_env".into()));
        assert_eq!(config.api.api_key.as_deref(), Some("from_env"));
    }

    #[test]
    fn validation_errors() {
        let tmp = write_tmp_file(
            "api: {url: 'http://localhost:4000/', api_key: k, timeout_secs: 0}\n",
        );
        let config = Config::from_file(tmp.path()).unwrap();
        assert!(matches!(
            config.validate().unwrap_err(),
            ValidationError::InvalidTimeout
        ));

        let tmp = write_tmp_file(
            "api: {url: 'http://localhost:4000/', api_key: k}\nmetrics: {statsd_host: localhost, statsd_port: 0}\n",
        );
        let config = Config::from_file(tmp.path()).unwrap();
        assert!(matches!(
            config.validate().unwrap_err(),
            ValidationError::InvalidPort
        ));
    }

    #[test]
    fn load_errors() {
        assert!(matches!(
            Config::from_file(Path::new("/nonexistent/envsync.yaml")).unwrap_err(),
            ConfigError::LoadError(_)
        ));

        let tmp = write_tmp_file("api: {url: not-a-url}\n");
        assert!(matches!(
            Config::from_file(tmp.path()).unwrap_err(),
            ConfigError::ParseError(_)
        ));
    }
}
