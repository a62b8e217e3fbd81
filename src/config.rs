use std::env;
use std::path::PathBuf;
use std::time::Duration;

use tracing::warn;

use crate::error::SimulationError;

#[derive(Debug, Clone)]
pub struct Config {
    pub log_level: String,
    pub log_dir: PathBuf,
    pub gemini_api_key: String,
    pub gemini_api_base_url: String,
    pub gemini_image_model: String,
    pub gemini_text_model: String,
    pub gemini_temperature: f32,
    pub gemini_safety_settings: String,
    pub request_timeout: Duration,
}

fn env_string(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

fn env_f32(name: &str, default: f32) -> f32 {
    env::var(name)
        .ok()
        .and_then(|value| value.parse::<f32>().ok())
        .unwrap_or(default)
}

fn env_u64(name: &str, default: u64) -> u64 {
    env::var(name)
        .ok()
        .and_then(|value| value.parse::<u64>().ok())
        .unwrap_or(default)
}

fn normalize_gemini_safety_settings(value: String) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return "permissive".to_string();
    }

    let lowered = trimmed.to_lowercase();
    match lowered.as_str() {
        "permissive" | "off" | "none" => "permissive".to_string(),
        "standard" => "standard".to_string(),
        _ => {
            warn!(
                "Unknown GEMINI_SAFETY_SETTINGS value '{}'; defaulting to permissive.",
                value
            );
            "permissive".to_string()
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, SimulationError> {
        let gemini_api_key = env_string("GEMINI_API_KEY", "");
        if gemini_api_key.trim().is_empty() {
            return Err(SimulationError::Configuration(
                "GEMINI_API_KEY is required".to_string(),
            ));
        }

        let timeout_secs = env_u64("GEMINI_REQUEST_TIMEOUT_SECONDS", 90);
        if timeout_secs == 0 {
            return Err(SimulationError::Configuration(
                "GEMINI_REQUEST_TIMEOUT_SECONDS must be greater than zero".to_string(),
            ));
        }

        Ok(Config {
            log_level: env_string("LOG_LEVEL", "info").to_lowercase(),
            log_dir: PathBuf::from(env_string("LOG_DIR", "logs")),
            gemini_api_key: gemini_api_key.trim().to_string(),
            gemini_api_base_url: env_string(
                "GEMINI_API_BASE_URL",
                "https://generativelanguage.googleapis.com/v1beta",
            )
            .trim_end_matches('/')
            .to_string(),
            gemini_image_model: env_string("GEMINI_IMAGE_MODEL", "gemini-2.5-flash-image"),
            gemini_text_model: env_string("GEMINI_TEXT_MODEL", "gemini-2.5-flash"),
            gemini_temperature: env_f32("GEMINI_TEMPERATURE", 0.7),
            gemini_safety_settings: normalize_gemini_safety_settings(env_string(
                "GEMINI_SAFETY_SETTINGS",
                "permissive",
            )),
            request_timeout: Duration::from_secs(timeout_secs),
        })
    }

    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Config {
            log_level: "info".to_string(),
            log_dir: PathBuf::from("logs"),
            gemini_api_key: api_key.into(),
            gemini_api_base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            gemini_image_model: "gemini-2.5-flash-image".to_string(),
            gemini_text_model: "gemini-2.5-flash".to_string(),
            gemini_temperature: 0.7,
            gemini_safety_settings: "permissive".to_string(),
            request_timeout: Duration::from_secs(90),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_safety_profile_falls_back_to_permissive() {
        assert_eq!(normalize_gemini_safety_settings("strict".into()), "permissive");
        assert_eq!(normalize_gemini_safety_settings(" Standard ".into()), "standard");
        assert_eq!(normalize_gemini_safety_settings(String::new()), "permissive");
    }

    #[test]
    fn defaults_target_current_gemini_models() {
        let config = Config::with_api_key("test-key");
        assert_eq!(config.gemini_image_model, "gemini-2.5-flash-image");
        assert_eq!(config.gemini_text_model, "gemini-2.5-flash");
        assert_eq!(config.request_timeout, Duration::from_secs(90));
    }

    #[test]
    fn load_rejects_missing_key_and_zero_timeout() {
        env::remove_var("GEMINI_API_KEY");
        env::remove_var("GEMINI_REQUEST_TIMEOUT_SECONDS");
        assert!(matches!(Config::load(), Err(SimulationError::Configuration(_))));

        env::set_var("GEMINI_API_KEY", "   ");
        assert!(matches!(Config::load(), Err(SimulationError::Configuration(_))));

        env::set_var("GEMINI_API_KEY", " test-key ");
        env::set_var("GEMINI_REQUEST_TIMEOUT_SECONDS", "0");
        let err = Config::load().unwrap_err();
        assert!(err.to_string().contains("GEMINI_REQUEST_TIMEOUT_SECONDS"));

        env::set_var("GEMINI_REQUEST_TIMEOUT_SECONDS", "5");
        let config = Config::load().unwrap();
        assert_eq!(config.gemini_api_key, "test-key");
        assert_eq!(config.request_timeout, Duration::from_secs(5));

        env::remove_var("GEMINI_API_KEY");
        env::remove_var("GEMINI_REQUEST_TIMEOUT_SECONDS");
    }
}
