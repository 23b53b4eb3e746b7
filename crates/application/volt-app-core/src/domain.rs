use std::time::Duration;

use serde::{Deserialize, Serialize};

fn default_api_base_url() -> String {
    volt_config::DEFAULT_API_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    volt_config::DEFAULT_REQUEST_TIMEOUT_SECS
}

fn default_refresh_secs() -> u64 {
    volt_config::CHARGING_REFRESH_INTERVAL_SECS
}

/// Operator-local preferences, persisted between runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsoleSettings {
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_refresh_secs")]
    pub refresh_interval_secs: u64,
    #[serde(default)]
    pub default_station_id: Option<String>,
}

impl Default for ConsoleSettings {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            request_timeout_secs: default_timeout_secs(),
            refresh_interval_secs: default_refresh_secs(),
            default_station_id: None,
        }
    }
}

impl ConsoleSettings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(volt_config::clamp_timeout_secs(self.request_timeout_secs))
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(volt_config::clamp_refresh_interval_secs(
            self.refresh_interval_secs,
        ))
    }

    /// `VOLT_API_URL` wins over the stored base when set and non-empty.
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(url) = std::env::var(volt_config::API_URL_ENV) {
            if !url.trim().is_empty() {
                self.api_base_url = url.trim().to_string();
            }
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_take_defaults() {
        let s: ConsoleSettings = serde_json::from_str(r#"{"default_station_id":"STN001"}"#).unwrap();
        assert_eq!(s.api_base_url, volt_config::DEFAULT_API_BASE_URL);
        assert_eq!(s.request_timeout_secs, 15);
        assert_eq!(s.default_station_id.as_deref(), Some("STN001"));
    }

    #[test]
    fn durations_are_clamped() {
        let s = ConsoleSettings {
            request_timeout_secs: 0,
            refresh_interval_secs: 100_000,
            ..Default::default()
        };
        assert_eq!(s.request_timeout(), Duration::from_secs(1));
        assert_eq!(
            s.refresh_interval(),
            Duration::from_secs(volt_config::MAX_REFRESH_INTERVAL_SECS)
        );
    }
}
