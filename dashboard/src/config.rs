//! Host configuration, loaded from environment variables.

use std::time::Duration;

use covid_core::{DisplayMode, MalformedPolicy};

use crate::error::DashboardError;

/// Where the backend lives, plus the initial view settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardConfig {
    /// Backend base URL (e.g. `http://localhost:5268`).
    pub api_base_url: String,
    /// Mode the widgets start in.
    pub display_mode: DisplayMode,
    /// Whether records without a country name are skipped instead of
    /// failing the load.
    pub malformed_policy: MalformedPolicy,
    /// Overall request timeout; `None` waits as long as the network does.
    pub http_timeout: Option<Duration>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:5268".to_owned(),
            display_mode: DisplayMode::Confirmed,
            malformed_policy: MalformedPolicy::Abort,
            http_timeout: None,
        }
    }
}

impl DashboardConfig {
    /// Load configuration from environment variables.
    ///
    /// All variables are optional:
    /// - `COVID_API_BASE_URL` -- backend base URL (default `http://localhost:5268`)
    /// - `COVID_DISPLAY_MODE` -- `confirmed` or `death` (default `confirmed`)
    /// - `COVID_SKIP_MALFORMED` -- skip records without a country (default `false`);
    ///   accepts `true`/`false`, `1`/`0`, `yes`/`no` or `on`/`off`, in any case
    /// - `COVID_HTTP_TIMEOUT_SECS` -- request timeout in seconds (default none)
    pub fn from_env() -> Result<Self, DashboardError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with a custom variable source.
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, DashboardError> {
        let defaults = Self::default();

        let api_base_url = get("COVID_API_BASE_URL").unwrap_or(defaults.api_base_url);
        if !(api_base_url.starts_with("http://") || api_base_url.starts_with("https://")) {
            return Err(DashboardError::Config(format!(
                "invalid COVID_API_BASE_URL: {api_base_url:?} is not an http(s) URL"
            )));
        }

        let display_mode = match get("COVID_DISPLAY_MODE") {
            Some(raw) => raw
                .parse()
                .map_err(|e| DashboardError::Config(format!("invalid COVID_DISPLAY_MODE: {e}")))?,
            None => defaults.display_mode,
        };

        let skip = match get("COVID_SKIP_MALFORMED") {
            Some(raw) => parse_flag(&raw).ok_or_else(|| {
                DashboardError::Config(format!(
                    "invalid COVID_SKIP_MALFORMED: {raw:?} is not a boolean"
                ))
            })?,
            None => false,
        };
        let malformed_policy = if skip {
            MalformedPolicy::Skip
        } else {
            MalformedPolicy::Abort
        };

        let http_timeout = get("COVID_HTTP_TIMEOUT_SECS")
            .map(|raw| {
                raw.parse::<u64>().map(Duration::from_secs).map_err(|e| {
                    DashboardError::Config(format!("invalid COVID_HTTP_TIMEOUT_SECS: {e}"))
                })
            })
            .transpose()?;

        Ok(Self {
            api_base_url,
            display_mode,
            malformed_policy,
            http_timeout,
        })
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<DashboardConfig, DashboardError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        DashboardConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn empty_environment_gives_defaults() {
        assert_eq!(load(&[]).unwrap(), DashboardConfig::default());
    }

    #[test]
    fn reads_every_variable() {
        let config = load(&[
            ("COVID_API_BASE_URL", "https://covid.example.org"),
            ("COVID_DISPLAY_MODE", "Death"),
            ("COVID_SKIP_MALFORMED", "true"),
            ("COVID_HTTP_TIMEOUT_SECS", "30"),
        ])
        .unwrap();
        assert_eq!(config.api_base_url, "https://covid.example.org");
        assert_eq!(config.display_mode, DisplayMode::Death);
        assert_eq!(config.malformed_policy, MalformedPolicy::Skip);
        assert_eq!(config.http_timeout, Some(Duration::from_secs(30)));
    }

    #[test]
    fn rejects_bad_values() {
        for (key, value) in [
            ("COVID_API_BASE_URL", "localhost:5268"),
            ("COVID_DISPLAY_MODE", "recovered"),
            ("COVID_SKIP_MALFORMED", "maybe"),
            ("COVID_HTTP_TIMEOUT_SECS", "-1"),
        ] {
            let err = load(&[(key, value)]).unwrap_err();
            assert!(err.to_string().contains(key), "{key}: {err}");
        }
    }

    #[test]
    fn skip_malformed_accepts_common_spellings() {
        for raw in ["true", "TRUE", "1", "yes", " On "] {
            let config = load(&[("COVID_SKIP_MALFORMED", raw)]).unwrap();
            assert_eq!(config.malformed_policy, MalformedPolicy::Skip, "{raw}");
        }
        for raw in ["false", "False", "0", "no", "OFF"] {
            let config = load(&[("COVID_SKIP_MALFORMED", raw)]).unwrap();
            assert_eq!(config.malformed_policy, MalformedPolicy::Abort, "{raw}");
        }
    }
}
