//! Runtime configuration.
//!
//! Sources, later ones winning: built-in defaults, `coursai.toml` in the
//! working directory, then `COURSAI_*` environment variables.

use figment::Figment;
use figment::providers::{Env, Format, Toml};
use fundu::DurationParser;
use serde::{Deserialize, Deserializer};
use std::time::Duration;

pub const CONFIG_FILE: &str = "coursai.toml";
pub const ENV_PREFIX: &str = "COURSAI_";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Level for this crate's logs; overridden entirely by `RUST_LOG`.
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Base URL of the plan service.
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Whole-request timeout. Unset keeps the HTTP client's default.
    #[serde(default, deserialize_with = "deserialize_optional_duration")]
    pub request_timeout: Option<Duration>,
    #[serde(
        default = "default_slow_request_threshold",
        deserialize_with = "deserialize_duration"
    )]
    pub slow_request_threshold: Duration,
}

fn default_log_level() -> String {
    "info".to_owned()
}

fn default_api_url() -> String {
    "http://localhost:8080".to_owned()
}

fn default_slow_request_threshold() -> Duration {
    Duration::from_secs(10)
}

impl Config {
    pub fn figment() -> Figment {
        Figment::new()
            .merge(Toml::file(CONFIG_FILE))
            .merge(Env::prefixed(ENV_PREFIX))
    }

    pub fn load() -> Result<Self, figment::Error> {
        Self::figment().extract()
    }
}

/// Integer seconds, or a string with units such as `"30s"` or `"2m"`.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawDuration {
    Seconds(u64),
    Text(String),
}

fn parse_duration(raw: RawDuration) -> Result<Duration, String> {
    match raw {
        RawDuration::Seconds(secs) => Ok(Duration::from_secs(secs)),
        RawDuration::Text(text) => {
            let parsed = DurationParser::with_all_time_units()
                .parse(text.trim())
                .map_err(|e| format!("invalid duration '{text}': {e}"))?;
            Duration::try_from(parsed).map_err(|e| format!("invalid duration '{text}': {e}"))
        }
    }
}

fn deserialize_duration<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
    parse_duration(RawDuration::deserialize(deserializer)?).map_err(serde::de::Error::custom)
}

fn deserialize_optional_duration<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<Duration>, D::Error> {
    Option::<RawDuration>::deserialize(deserializer)?
        .map(parse_duration)
        .transpose()
        .map_err(serde::de::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::providers::Serialized;

    fn extract(toml: &str) -> Result<Config, figment::Error> {
        Figment::new().merge(Toml::string(toml)).extract()
    }

    #[test]
    fn defaults_apply_when_empty() {
        let config = extract("").unwrap();
        assert_eq!(config.api_url, "http://localhost:8080");
        assert_eq!(config.log_level, "info");
        assert_eq!(config.request_timeout, None);
        assert_eq!(config.slow_request_threshold, Duration::from_secs(10));
    }

    #[test]
    fn durations_accept_units_and_seconds() {
        let config = extract("request_timeout = \"90s\"\nslow_request_threshold = 3").unwrap();
        assert_eq!(config.request_timeout, Some(Duration::from_secs(90)));
        assert_eq!(config.slow_request_threshold, Duration::from_secs(3));

        let config = extract("request_timeout = \"2m\"").unwrap();
        assert_eq!(config.request_timeout, Some(Duration::from_secs(120)));
    }

    #[test]
    fn bad_duration_is_an_error() {
        assert!(extract("request_timeout = \"soon\"").is_err());
    }

    #[test]
    fn later_sources_override_earlier() {
        let config: Config = Figment::new()
            .merge(Toml::string("api_url = \"http://file:1\""))
            .merge(Serialized::default("api_url", "http://env:2"))
            .extract()
            .unwrap();
        assert_eq!(config.api_url, "http://env:2");
    }
}
