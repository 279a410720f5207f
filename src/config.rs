use crate::constants::{
    DEFAULT_CHAT_MODEL, DEFAULT_IDEA_MODEL, DEFAULT_IMAGE_MODEL, GEMINI_API_BASE,
    MISSING_CREDENTIAL_MESSAGE,
};
use crate::errors::{TuraError, TuraResult};
use log::LevelFilter;
use serde::Deserialize;
use std::{env, fs, path::Path, path::PathBuf, str::FromStr};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_key: Option<String>,
    pub api_base: String,
    pub chat_model: String,
    pub idea_model: String,
    pub image_model: String,
    pub log_level: String,
    pub log_dir: Option<PathBuf>,
    pub export_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base: GEMINI_API_BASE.to_string(),
            chat_model: DEFAULT_CHAT_MODEL.to_string(),
            idea_model: DEFAULT_IDEA_MODEL.to_string(),
            image_model: DEFAULT_IMAGE_MODEL.to_string(),
            log_level: "info".to_string(),
            log_dir: None,
            export_dir: None,
        }
    }
}

impl Config {
    /// Reads `~/.config/tura/config.json` if it exists, then applies
    /// environment overrides. A `.env` file in the working directory is
    /// honoured.
    pub fn load() -> TuraResult<Config> {
        dotenv::dotenv().ok();
        let path = get_config_path();
        Self::load_from(path.as_deref(), |key| env::var(key).ok())
    }

    pub fn load_from(
        path: Option<&Path>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> TuraResult<Config> {
        let mut config = match path {
            Some(path) if path.exists() => {
                let config_str = fs::read_to_string(path).map_err(|e| {
                    TuraError::init_error(format!("Failed to read config file: {}", e))
                })?;
                serde_json::from_str(&config_str).map_err(|e| {
                    TuraError::init_error(format!("Failed to parse config: {}", e))
                })?
            }
            _ => Config::default(),
        };

        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(key) = non_empty("GEMINI_API_KEY").or_else(|| non_empty("API_KEY")) {
            config.api_key = Some(key);
        }
        if let Some(base) = non_empty("TURA_API_BASE") {
            config.api_base = base;
        }
        if let Some(model) = non_empty("TURA_CHAT_MODEL") {
            config.chat_model = model;
        }
        if let Some(model) = non_empty("TURA_IDEA_MODEL") {
            config.idea_model = model;
        }
        if let Some(model) = non_empty("TURA_IMAGE_MODEL") {
            config.image_model = model;
        }
        if let Some(level) = non_empty("TURA_LOG_LEVEL") {
            config.log_level = level;
        }
        if let Some(dir) = non_empty("TURA_LOG_DIR") {
            config.log_dir = Some(PathBuf::from(dir));
        }
        if let Some(dir) = non_empty("TURA_EXPORT_DIR") {
            config.export_dir = Some(PathBuf::from(dir));
        }

        config.api_base = config.api_base.trim().trim_end_matches('/').to_string();
        validate_config(&config)?;
        Ok(config)
    }

    /// The API credential. Its absence is an initialization failure.
    pub fn credential(&self) -> TuraResult<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or_else(|| TuraError::init_error(MISSING_CREDENTIAL_MESSAGE))
    }

    pub fn log_level_filter(&self) -> LevelFilter {
        LevelFilter::from_str(&self.log_level).unwrap_or(LevelFilter::Info)
    }

    pub fn log_directory(&self) -> PathBuf {
        self.log_dir.clone().unwrap_or_else(|| data_dir().join("logs"))
    }

    pub fn export_directory(&self) -> PathBuf {
        self.export_dir.clone().unwrap_or_else(|| {
            dirs::cache_dir()
                .unwrap_or_else(env::temp_dir)
                .join("tura")
        })
    }
}

fn get_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".config").join("tura").join("config.json"))
}

fn data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(env::temp_dir)
        .join("tura")
}

pub fn validate_config(config: &Config) -> TuraResult<()> {
    if !(config.api_base.starts_with("http://") || config.api_base.starts_with("https://")) {
        return Err(TuraError::init_error(format!(
            "api_base must be an http(s) URL, got '{}'",
            config.api_base
        )));
    }

    for (name, model) in [
        ("chat_model", &config.chat_model),
        ("idea_model", &config.idea_model),
        ("image_model", &config.image_model),
    ] {
        if model.trim().is_empty() {
            return Err(TuraError::init_error(format!("{} is required", name)));
        }
    }

    if LevelFilter::from_str(&config.log_level).is_err() {
        return Err(TuraError::init_error(format!(
            "Unknown log level '{}'",
            config.log_level
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;
    use std::collections::HashMap;
    use tempfile::tempdir;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_validate_config_valid() {
        let config = Config::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validate_config_invalid_empty_model() {
        let mut config = Config::default();
        config.image_model = " ".to_string();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_config_invalid_base_and_level() {
        let mut config = Config::default();
        config.api_base = "generativelanguage.googleapis.com".to_string();
        assert!(validate_config(&config).is_err());

        let mut config = Config::default();
        config.log_level = "loud".to_string();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_missing_credential_is_initialization_error() {
        let config = Config::load_from(None, env_of(&[])).unwrap();
        let err = config.credential().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Initialization);
        assert_eq!(err.to_string(), MISSING_CREDENTIAL_MESSAGE);
    }

    #[test]
    fn test_api_key_fallback_and_precedence() {
        let config = Config::load_from(None, env_of(&[("API_KEY", "fallback")])).unwrap();
        assert_eq!(config.credential().unwrap(), "fallback");

        let config = Config::load_from(
            None,
            env_of(&[("API_KEY", "fallback"), ("GEMINI_API_KEY", "primary")]),
        )
        .unwrap();
        assert_eq!(config.credential().unwrap(), "primary");
    }

    #[test]
    fn test_file_then_env_overrides() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(
            &path,
            r#"{ "api_key": "from-file", "chat_model": "gemini-file", "api_base": "http://localhost:9/" }"#,
        )
        .unwrap();

        let config =
            Config::load_from(Some(&path), env_of(&[("TURA_CHAT_MODEL", "gemini-env")])).unwrap();
        assert_eq!(config.credential().unwrap(), "from-file");
        assert_eq!(config.chat_model, "gemini-env");
        assert_eq!(config.api_base, "http://localhost:9");
        assert_eq!(config.image_model, DEFAULT_IMAGE_MODEL);
    }

    #[test]
    fn test_malformed_file_is_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();
        let err = Config::load_from(Some(&path), env_of(&[])).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Initialization);
    }
}
