use service_core::config as core_config;
use service_core::error::AppError;
use std::env;
use std::time::Duration;

/// Public Gemini REST endpoint.
pub const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";

/// Upper bound on a single upstream call.
pub const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 15;

#[derive(Debug, Clone)]
pub struct AdvisorConfig {
    pub common: core_config::Config,
    pub gemini: GeminiSettings,
}

#[derive(Debug, Clone)]
pub struct GeminiSettings {
    pub api_key: String,
    /// Base URL up to and excluding `/models/...`.
    pub api_base: String,
    pub model: String,
    pub timeout_seconds: u64,
}

impl GeminiSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl AdvisorConfig {
    pub fn load() -> Result<Self, AppError> {
        let common_config = core_config::Config::load()?;
        let is_prod = env::var("ENVIRONMENT").unwrap_or_else(|_| "dev".to_string()) == "prod";

        Ok(AdvisorConfig {
            common: common_config,
            gemini: GeminiSettings {
                api_key: get_env("GEMINI_API_KEY", None, is_prod)?,
                api_base: get_env("GEMINI_API_BASE", Some(DEFAULT_GEMINI_API_BASE), is_prod)?,
                model: get_env("GEMINI_MODEL", Some(DEFAULT_GEMINI_MODEL), is_prod)?,
                timeout_seconds: parse_timeout(&get_env(
                    "GEMINI_TIMEOUT_SECONDS",
                    Some(&DEFAULT_UPSTREAM_TIMEOUT_SECS.to_string()),
                    is_prod,
                )?),
            },
        })
    }
}

/// Zero would make every upstream call fail at once, so it falls back like garbage does.
fn parse_timeout(raw: &str) -> u64 {
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => secs,
        _ => DEFAULT_UPSTREAM_TIMEOUT_SECS,
    }
}

fn get_env(key: &str, default: Option<&str>, is_prod: bool) -> Result<String, AppError> {
    match env::var(key) {
        Ok(val) => Ok(val),
        Err(_) => {
            if is_prod {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required in production but not set",
                    key
                )))
            } else if let Some(def) = default {
                Ok(def.to_string())
            } else {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required but not set",
                    key
                )))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_required_key_is_a_config_error() {
        let err = get_env("ADVISOR_TEST_UNSET_VARIABLE", None, false).unwrap_err();
        assert!(matches!(err, AppError::ConfigError(_)));
        assert!(err.to_string().contains("ADVISOR_TEST_UNSET_VARIABLE"));
    }

    #[test]
    fn default_applies_outside_production() {
        let value = get_env("ADVISOR_TEST_UNSET_VARIABLE", Some("fallback"), false).unwrap();
        assert_eq!(value, "fallback");
    }

    #[test]
    fn production_rejects_defaults() {
        let err = get_env("ADVISOR_TEST_UNSET_VARIABLE", Some("fallback"), true).unwrap_err();
        assert!(err.to_string().contains("required in production"));
    }

    #[test]
    fn zero_or_unparsable_timeout_falls_back_to_default() {
        assert_eq!(parse_timeout("0"), DEFAULT_UPSTREAM_TIMEOUT_SECS);
        assert_eq!(parse_timeout("soon"), DEFAULT_UPSTREAM_TIMEOUT_SECS);
        assert_eq!(parse_timeout("-3"), DEFAULT_UPSTREAM_TIMEOUT_SECS);
        assert_eq!(parse_timeout(" 30 "), 30);
    }

    #[test]
    fn timeout_converts_seconds() {
        let settings = GeminiSettings {
            api_key: "k".to_string(),
            api_base: DEFAULT_GEMINI_API_BASE.to_string(),
            model: DEFAULT_GEMINI_MODEL.to_string(),
            timeout_seconds: DEFAULT_UPSTREAM_TIMEOUT_SECS,
        };
        assert_eq!(settings.timeout(), Duration::from_secs(15));
    }
}
