use serde::Deserialize;
use url::Url;

const DEFAULT_TIMEOUT_SECS: u64 = 30;

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

/// Connection settings for the EnvSync API.
#[derive(Clone, Deserialize, Debug, PartialEq)]
pub struct ApiConfig {
    /// Base URL of the API, e.g. `https://api.envsync.example/`
    pub url: Url,
    /// Bearer token sent with every request
    #[serde(default)]
    pub api_key: Option<String>,
    /// Per-request timeout enforced by the transport
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl ApiConfig {
    pub fn new(url: Url) -> Self {
        ApiConfig {
            url,
            api_key: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    pub fn with_api_key<K: Into<String>>(mut self, api_key: K) -> Self {
        self.api_key = Some(api_key.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config: ApiConfig = serde_yaml::from_str("url: http://127.0.0.1:4000/").unwrap();
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.api_key, None);

        assert!(serde_yaml::from_str::<ApiConfig>("url: not-a-url").is_err());
    }
}
