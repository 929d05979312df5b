use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::domain::{DEFAULT_COUNTDOWN_SECS, ESCALA_NOTURNA};

const API_URL_ENV: &str = "RONDA_API_URL";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RondaConfig {
    /// Base URL of the backend, e.g. "http://localhost:5000"
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Escala selected at startup: "18 às 06" or "06h às 18h"
    #[serde(default = "default_escala")]
    pub default_escala: String,
    /// Minutes between patrols
    #[serde(default = "default_countdown_minutes")]
    pub countdown_minutes: u32,
    /// Sent along with sporadic patrols
    #[serde(default = "default_user_id")]
    pub user_id: i64,
    /// WhatsApp number that receives shared reports. Any formatting is fine.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub whatsapp_phone: Option<String>,
    /// Name printed as "Responsável" at the end of occurrence reports
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signer: Option<String>,
    #[serde(default = "default_vtr_options")]
    pub vtr_options: Vec<String>,
}

fn default_api_url() -> String {
    ronda_api::DEFAULT_API_URL.to_string()
}

fn default_escala() -> String {
    ESCALA_NOTURNA.to_string()
}

fn default_countdown_minutes() -> u32 {
    DEFAULT_COUNTDOWN_SECS / 60
}

fn default_user_id() -> i64 {
    1
}

fn default_vtr_options() -> Vec<String> {
    (3..=11).map(|n| format!("VTR {:02}", n)).collect()
}

impl Default for RondaConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            default_escala: default_escala(),
            countdown_minutes: default_countdown_minutes(),
            user_id: default_user_id(),
            whatsapp_phone: None,
            signer: None,
            vtr_options: default_vtr_options(),
        }
    }
}

impl RondaConfig {
    pub fn config_path() -> Result<PathBuf> {
        Ok(crate::session_store::root_path()?.join("config.toml"))
    }

    /// Load config from disk. Returns default config if file doesn't exist.
    /// `RONDA_API_URL` overrides `api_url`.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        let mut config = if path.exists() {
            let raw = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config at {}", path.display()))?;
            Self::from_toml(&raw)
                .with_context(|| format!("Failed to parse config at {}", path.display()))?
        } else {
            Self::default()
        };

        if let Ok(url) = std::env::var(API_URL_ENV) {
            if !url.trim().is_empty() {
                config.api_url = url;
            }
        }
        Ok(config)
    }

    pub fn from_toml(raw: &str) -> Result<Self> {
        Ok(toml::from_str(raw)?)
    }

    /// Writes the default config if none exists and returns its path.
    pub fn ensure_exists() -> Result<PathBuf> {
        let path = Self::config_path()?;
        if !path.exists() {
            Self::default().save_to(&path)?;
        }
        Ok(path)
    }

    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let raw = toml::to_string_pretty(self)?;
        std::fs::write(path, raw)
            .with_context(|| format!("Failed to write config at {}", path.display()))?;
        Ok(())
    }

    pub fn countdown_secs(&self) -> u32 {
        self.countdown_minutes.saturating_mul(60)
    }
}
