use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::engine::selector::FocusMode;

const LOOKAHEAD_RANGE: (usize, usize) = (1, 5);
const RECENT_RANGE: (usize, usize) = (1, 20);

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_hint_delay_ms")]
    pub hint_delay_ms: u64,
    #[serde(default = "default_lookahead_len")]
    pub lookahead_len: usize,
    #[serde(default = "default_recent_len")]
    pub recent_len: usize,
    #[serde(default = "default_focus_mode")]
    pub focus_mode: String,
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
}

fn default_hint_delay_ms() -> u64 {
    4000
}
fn default_lookahead_len() -> usize {
    3
}
fn default_recent_len() -> usize {
    5
}
fn default_focus_mode() -> String {
    "all".to_string()
}
fn default_data_dir() -> String {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("hangul-drill")
        .to_string_lossy()
        .to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            hint_delay_ms: default_hint_delay_ms(),
            lookahead_len: default_lookahead_len(),
            recent_len: default_recent_len(),
            focus_mode: default_focus_mode(),
            data_dir: default_data_dir(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        if path.exists() {
            let content = fs::read_to_string(&path)?;
            let mut config: Config = toml::from_str(&content)?;
            config.validate();
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        Ok(())
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("hangul-drill")
            .join("config.toml")
    }

    /// Clamp sizes into supported ranges and normalize the focus key.
    pub fn validate(&mut self) {
        self.lookahead_len = self.lookahead_len.clamp(LOOKAHEAD_RANGE.0, LOOKAHEAD_RANGE.1);
        self.recent_len = self.recent_len.clamp(RECENT_RANGE.0, RECENT_RANGE.1);
        self.focus_mode = self.focus().to_key().to_string();
        if self.data_dir.trim().is_empty() {
            self.data_dir = default_data_dir();
        }
    }

    pub fn focus(&self) -> FocusMode {
        FocusMode::from_key(&self.focus_mode)
    }

    pub fn hint_delay(&self) -> Duration {
        Duration::from_millis(self.hint_delay_ms)
    }

    pub fn data_path(&self) -> PathBuf {
        PathBuf::from(&self.data_dir)
    }
}
