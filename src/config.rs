use anyhow::{Context, Result};
use config::Config;
use serde::Deserialize;

/// Runtime settings, read once at startup from `LEET_*` environment
/// variables (e.g. `LEET_DB_PATH`, `LEET_BASE_URL`) over these defaults.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub db_path: String,
    pub csv_path: String,
    pub base_url: String,
    pub request_delay_ms: u64,
    pub user_agent: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            db_path: "data/leet.sqlite".into(),
            csv_path: "data/leet_problems.csv".into(),
            base_url: "https://leetcode.ca".into(),
            request_delay_ms: 3000,
            user_agent: "Mozilla/5.0 (compatible; LeetScraper/3.1)".into(),
        }
    }
}

impl Settings {
    pub fn load() -> Result<Settings> {
        Config::builder()
            .add_source(config::Environment::with_prefix("LEET"))
            .build()
            .context("Failed to read LEET_* environment")?
            .try_deserialize()
            .context("Invalid LEET_* setting")
    }
}

// ── Tests ──
