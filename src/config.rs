use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

fn default_source_extension() -> String {
    String::from("psc")
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    pub sources_dir: PathBuf,
    pub env_name: String,
    #[serde(default = "default_source_extension")]
    pub source_extension: String,
}

impl Default for Config {
    fn default() -> Self {
        let env_name = env::var("PSC_ENV").unwrap_or_else(|_| String::from("default"));
        let base_dir = if cfg!(windows) {
            PathBuf::from(env::var("USERPROFILE").unwrap_or_else(|_| String::from(".")))
        } else {
            PathBuf::from(env::var("HOME").unwrap_or_else(|_| String::from(".")))
        };

        let sources_dir = if let Ok(custom_dir) = env::var("PSC_SOURCES_DIR") {
            PathBuf::from(custom_dir)
        } else {
            // Prefer a local sources directory when one exists.
            let local_sources = Path::new("./sources");
            if local_sources.is_dir() {
                local_sources.to_path_buf()
            } else {
                base_dir.join(".psc").join(&env_name).join("sources")
            }
        };

        Config {
            sources_dir,
            env_name,
            source_extension: default_source_extension(),
        }
    }
}

impl Config {
    pub fn load() -> Self {
        let config_path = Self::get_config_path();
        if !config_path.exists() {
            let config = Config::default();
            config.save().unwrap_or_default();
            return config;
        }

        let contents = fs::read_to_string(&config_path).unwrap_or_default();
        serde_json::from_str(&contents).unwrap_or_default()
    }

    pub fn save(&self) -> io::Result<()> {
        let config_path = Self::get_config_path();
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = serde_json::to_string_pretty(self)?;
        fs::write(&config_path, contents)
    }

    pub fn get_config_path() -> PathBuf {
        let env_name = env::var("PSC_ENV").unwrap_or_else(|_| String::from("default"));
        let base_dir = if cfg!(windows) {
            PathBuf::from(env::var("USERPROFILE").unwrap_or_else(|_| String::from(".")))
        } else {
            PathBuf::from(env::var("HOME").unwrap_or_else(|_| String::from(".")))
        };
        base_dir.join(".psc").join(&env_name).join("config.json")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_extension_is_psc() {
        let config = Config::default();
        assert_eq!(config.source_extension, "psc");
        assert!(!config.env_name.is_empty());
    }

    #[test]
    fn config_path_ends_with_config_json() {
        let path = Config::get_config_path();
        assert_eq!(path.file_name().unwrap(), "config.json");
        assert!(path.to_string_lossy().contains(".psc"));
    }

    #[test]
    fn config_roundtrips_through_json() {
        let config = Config {
            sources_dir: PathBuf::from("/tmp/sources"),
            env_name: String::from("test"),
            source_extension: String::from("psc"),
        };
        let json = serde_json::to_string(&config).unwrap();
        let parsed: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.sources_dir, config.sources_dir);
        assert_eq!(parsed.env_name, "test");
        assert_eq!(parsed.source_extension, "psc");
    }

    #[test]
    fn missing_extension_field_defaults() {
        let parsed: Config =
            serde_json::from_str(r#"{"sources_dir": "/tmp/s", "env_name": "default"}"#).unwrap();
        assert_eq!(parsed.source_extension, "psc");
    }
}
