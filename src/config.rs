use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Base URL of the content provider; `/posts` and `/posts/{id}/blocks`
    /// hang off it.
    #[serde(default = "default_provider_url")]
    pub provider_url: String,
    /// Override for the state file holding cache entries and the theme.
    #[serde(default)]
    pub store_path: Option<PathBuf>,
}

fn default_provider_url() -> String {
    "http://localhost:3000/api".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            provider_url: default_provider_url(),
            store_path: None,
        }
    }
}

fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".config/foliotui/config.toml"))
}

pub fn load_config() -> AppConfig {
    let Some(path) = config_path() else {
        return AppConfig::default();
    };

    let Ok(contents) = fs::read_to_string(&path) else {
        return AppConfig::default();
    };

    toml::from_str(&contents).unwrap_or_default()
}
