//! Planner configuration: store URL + anon key.
//!
//! Loaded from `~/.kwata-planner/config.json` (camelCase keys), with
//! `SUPABASE_URL` / `SUPABASE_ANON_KEY` environment overrides taking
//! precedence when both are set.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::store::StoreConfig;

/// Configuration stored in ~/.kwata-planner/config.json
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(alias = "supabase_url")]
    pub supabase_url: String,
    #[serde(alias = "supabase_anon_key")]
    pub supabase_anon_key: String,
}

impl Config {
    pub fn store_config(&self) -> StoreConfig {
        StoreConfig {
            url: self.supabase_url.clone(),
            anon_key: self.supabase_anon_key.clone(),
        }
    }
}

pub fn config_path() -> Result<PathBuf, String> {
    let home = dirs::home_dir().ok_or("Could not find home directory")?;
    Ok(home.join(".kwata-planner").join("config.json"))
}

/// Load configuration: environment first, config file second.
pub fn load_config() -> Result<Config, String> {
    if let (Ok(url), Ok(key)) = (env::var("SUPABASE_URL"), env::var("SUPABASE_ANON_KEY")) {
        if !url.is_empty() && !key.is_empty() {
            return Ok(Config { supabase_url: url, supabase_anon_key: key });
        }
    }

    let path = config_path()?;
    load_config_from(&path)
}

pub fn load_config_from(path: &Path) -> Result<Config, String> {
    if !path.exists() {
        return Err(format!(
            "Config file not found at {}. Create it with: {{ \"supabaseUrl\": \"https://...\", \"supabaseAnonKey\": \"...\" }}",
            path.display()
        ));
    }

    let content =
        fs::read_to_string(path).map_err(|e| format!("Failed to read config: {}", e))?;

    let config: Config =
        serde_json::from_str(&content).map_err(|e| format!("Failed to parse config: {}", e))?;

    if config.supabase_url.is_empty() || config.supabase_anon_key.is_empty() {
        return Err("Config must set both supabaseUrl and supabaseAnonKey".to_string());
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parses_camel_case_and_snake_case_keys() {
        let camel: Config =
            serde_json::from_str(r#"{"supabaseUrl": "https://x.co", "supabaseAnonKey": "k"}"#)
                .unwrap();
        assert_eq!(camel.supabase_url, "https://x.co");

        let snake: Config =
            serde_json::from_str(r#"{"supabase_url": "https://x.co", "supabase_anon_key": "k"}"#)
                .unwrap();
        assert_eq!(snake.supabase_anon_key, "k");
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        let mut file = fs::File::create(&path).unwrap();
        write!(file, r#"{{"supabaseUrl": "https://x.co", "supabaseAnonKey": "k"}}"#).unwrap();

        let config = load_config_from(&path).unwrap();
        assert_eq!(config.supabase_url, "https://x.co");
        assert_eq!(config.store_config().anon_key, "k");
    }

    #[test]
    fn missing_file_yields_setup_hint() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_config_from(&dir.path().join("nope.json")).unwrap_err();
        assert!(err.contains("supabaseUrl"));
    }

    #[test]
    fn empty_values_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"supabaseUrl": "", "supabaseAnonKey": "k"}"#).unwrap();
        assert!(load_config_from(&path).is_err());
    }
}
