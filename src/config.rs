use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::error::ConfigError;

const HOST: &str = "0.0.0.0";
const PORT: u16 = 8080;

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_TEMPERATURE: f32 = 0.7;
const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 8192;
const DEFAULT_FALLBACK_DELAY_MS: u64 = 1000;

#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub timeout: Option<Duration>,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct GenerationConfig {
    pub model: String,
    pub temperature: f32,
    pub max_output_tokens: u32,
    /// Pause before a fallback itinerary is handed back, so the loading
    /// screen does not flicker.
    pub fallback_delay: Duration,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
            fallback_delay: Duration::from_millis(DEFAULT_FALLBACK_DELAY_MS),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub gemini: GeminiConfig,
    pub generation: GenerationConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: HOST.to_string(),
            port: PORT,
            gemini: GeminiConfig::default(),
            generation: GenerationConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = AppConfig::default();

        let host = env::var("HOST").unwrap_or(defaults.host);
        // A bad PORT has always meant "use the default".
        let port = env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(defaults.port);

        let gemini = GeminiConfig {
            api_key: env::var("GEMINI_API_KEY")
                .ok()
                .filter(|key| !key.trim().is_empty()),
            base_url: env::var("GEMINI_BASE_URL").unwrap_or(defaults.gemini.base_url),
            timeout: parse_var::<u64>("GENERATION_TIMEOUT_SECS")?.map(Duration::from_secs),
        };

        let temperature =
            parse_var::<f32>("GENERATION_TEMPERATURE")?.unwrap_or(defaults.generation.temperature);
        if !(0.0..=2.0).contains(&temperature) {
            return Err(ConfigError::InvalidValue {
                name: "GENERATION_TEMPERATURE",
                reason: format!("{} is outside 0.0..=2.0", temperature),
            });
        }

        let generation = GenerationConfig {
            model: env::var("GEMINI_MODEL").unwrap_or(defaults.generation.model),
            temperature,
            max_output_tokens: parse_var("GENERATION_MAX_OUTPUT_TOKENS")?
                .unwrap_or(defaults.generation.max_output_tokens),
            fallback_delay: parse_var::<u64>("FALLBACK_DELAY_MS")?
                .map(Duration::from_millis)
                .unwrap_or(defaults.generation.fallback_delay),
        };

        Ok(Self {
            host,
            port,
            gemini,
            generation,
        })
    }
}

fn parse_var<T>(name: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e: T::Err| ConfigError::InvalidValue {
                name,
                reason: e.to_string(),
            }),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: [&str; 9] = [
        "HOST",
        "PORT",
        "GEMINI_API_KEY",
        "GEMINI_MODEL",
        "GEMINI_BASE_URL",
        "GENERATION_TIMEOUT_SECS",
        "GENERATION_TEMPERATURE",
        "GENERATION_MAX_OUTPUT_TOKENS",
        "FALLBACK_DELAY_MS",
    ];

    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    #[serial]
    fn test_defaults_without_environment() {
        clear_env();
        let config = AppConfig::from_env().unwrap();

        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8080);
        assert!(config.gemini.api_key.is_none());
        assert_eq!(config.generation.model, DEFAULT_MODEL);
        assert_eq!(config.generation.max_output_tokens, 8192);
        assert_eq!(config.generation.fallback_delay, Duration::from_secs(1));
    }

    #[test]
    #[serial]
    fn test_overrides_from_environment() {
        clear_env();
        env::set_var("PORT", "not-a-port");
        env::set_var("GEMINI_API_KEY", "secret");
        env::set_var("GEMINI_MODEL", "gemini-test");
        env::set_var("FALLBACK_DELAY_MS", "0");
        env::set_var("GENERATION_TIMEOUT_SECS", "30");

        let config = AppConfig::from_env().unwrap();
        clear_env();

        assert_eq!(config.port, 8080);
        assert_eq!(config.gemini.api_key.as_deref(), Some("secret"));
        assert_eq!(config.generation.model, "gemini-test");
        assert_eq!(config.gemini.timeout, Some(Duration::from_secs(30)));
        assert_eq!(config.generation.fallback_delay, Duration::ZERO);
    }

    #[test]
    #[serial]
    fn test_rejects_bad_temperature() {
        clear_env();
        env::set_var("GENERATION_TEMPERATURE", "7.5");
        let result = AppConfig::from_env();
        clear_env();

        assert!(matches!(
            result,
            Err(ConfigError::InvalidValue {
                name: "GENERATION_TEMPERATURE",
                ..
            })
        ));
    }
}
