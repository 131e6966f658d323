use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Feed client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedConfig {
    /// Base URL of the reports API (the part before `reports/`).
    pub base_url: String,

    /// Bearer credential attached to every request.
    pub token: String,

    /// Trailing-edge delay before a burst of filter edits triggers a
    /// reset fetch (one request per settled edit, not per keystroke).
    #[serde(with = "duration_millis")]
    pub settle_delay: Duration,

    /// Per-request network timeout.
    #[serde(with = "duration_secs")]
    pub request_timeout: Duration,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000/api".to_string(),
            token: String::new(),
            settle_delay: Duration::from_millis(400),
            request_timeout: Duration::from_secs(10),
        }
    }
}

impl FeedConfig {
    /// Build from the environment, falling back to defaults field by field.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            base_url: std::env::var("CAMPUSFIND_API_URL").unwrap_or(defaults.base_url),
            token: std::env::var("CAMPUSFIND_API_TOKEN").unwrap_or(defaults.token),
            settle_delay: std::env::var("CAMPUSFIND_SETTLE_DELAY_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_millis)
                .unwrap_or(defaults.settle_delay),
            request_timeout: std::env::var("CAMPUSFIND_REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.request_timeout),
        }
    }
}

mod duration_millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        Ok(Duration::from_millis(u64::deserialize(deserializer)?))
    }
}

mod duration_secs {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_secs())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        Ok(Duration::from_secs(u64::deserialize(deserializer)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = FeedConfig::default();
        assert_eq!(config.settle_delay, Duration::from_millis(400));
        assert_eq!(config.request_timeout, Duration::from_secs(10));
        assert!(config.token.is_empty());
    }

    #[test]
    fn test_round_trips_through_json() {
        let config = FeedConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let back: FeedConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.settle_delay, config.settle_delay);
        assert_eq!(back.base_url, config.base_url);
    }
}
