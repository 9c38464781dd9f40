use crate::controller::LAYOUT_SETTLE_DELAY;
use crate::motion::ANIMATION_DURATION;
use crate::visibility::DEFAULT_AUTO_HIDE_DELAY;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Settings {
    /// When enabled the application initialises the logger at debug level.
    /// Defaults to `false` when the field is missing in the settings file.
    #[serde(default)]
    pub debug_logging: bool,
    /// Optional file that receives log output instead of stdout.
    #[serde(default)]
    pub log_file: Option<String>,
    /// Where per-screen bar flags are persisted.
    #[serde(default = "default_store_path")]
    pub store_path: String,
    /// Length of animated bar slides in milliseconds.
    #[serde(default = "default_animation_ms")]
    pub animation_ms: u64,
    /// Delay before geometry is re-read after a resize.
    #[serde(default = "default_layout_settle_ms")]
    pub layout_settle_ms: u64,
    /// Seconds of idle time before shown bars hide again. `None` turns
    /// auto-hide off.
    #[serde(default = "default_auto_hide_delay_secs")]
    pub auto_hide_delay_secs: Option<f32>,
}

fn default_store_path() -> String {
    "bars.json".into()
}

fn default_animation_ms() -> u64 {
    ANIMATION_DURATION.as_millis() as u64
}

fn default_layout_settle_ms() -> u64 {
    LAYOUT_SETTLE_DELAY.as_millis() as u64
}

fn default_auto_hide_delay_secs() -> Option<f32> {
    Some(DEFAULT_AUTO_HIDE_DELAY.as_secs_f32())
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            debug_logging: false,
            log_file: None,
            store_path: default_store_path(),
            animation_ms: default_animation_ms(),
            layout_settle_ms: default_layout_settle_ms(),
            auto_hide_delay_secs: default_auto_hide_delay_secs(),
        }
    }
}

impl Settings {
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path).unwrap_or_default();
        if content.is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_str(&content).with_context(|| format!("parsing {path}"))
    }

    pub fn save(&self, path: &str) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn animation_duration(&self) -> Duration {
        Duration::from_millis(self.animation_ms)
    }

    pub fn layout_settle_delay(&self) -> Duration {
        Duration::from_millis(self.layout_settle_ms)
    }

    pub fn auto_hide_delay(&self) -> Option<Duration> {
        let secs = self.auto_hide_delay_secs?;
        match Duration::try_from_secs_f32(secs) {
            Ok(delay) => Some(delay),
            Err(e) => {
                tracing::warn!("auto_hide_delay_secs {} is invalid ({}); disabling auto-hide", secs, e);
                None
            }
        }
    }
}
