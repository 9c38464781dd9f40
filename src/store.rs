use crate::visibility::VisibilitySettings;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// The flags a screen remembers between runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersistedFlags {
    pub hide_primary_bar: bool,
    pub hide_secondary_bar: bool,
    pub hide_on_appear: bool,
    pub show_on_appear: bool,
}

impl Default for PersistedFlags {
    fn default() -> Self {
        Self::from(&VisibilitySettings::default())
    }
}

impl From<&VisibilitySettings> for PersistedFlags {
    fn from(s: &VisibilitySettings) -> Self {
        Self {
            hide_primary_bar: s.hide_primary_bar,
            hide_secondary_bar: s.hide_secondary_bar,
            hide_on_appear: s.hide_on_appear,
            show_on_appear: s.show_on_appear,
        }
    }
}

impl PersistedFlags {
    pub fn apply_to(&self, s: &mut VisibilitySettings) {
        s.hide_primary_bar = self.hide_primary_bar;
        s.hide_secondary_bar = self.hide_secondary_bar;
        s.hide_on_appear = self.hide_on_appear;
        s.show_on_appear = self.show_on_appear;
    }
}

/// Per-screen flags keyed by a screen identifier, kept in one JSON file.
#[derive(Debug, Default)]
pub struct SettingsStore {
    path: PathBuf,
    screens: BTreeMap<String, PersistedFlags>,
}

impl SettingsStore {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let content = std::fs::read_to_string(&path).unwrap_or_default();
        let screens = if content.trim().is_empty() {
            BTreeMap::new()
        } else {
            serde_json::from_str(&content)
                .with_context(|| format!("parsing settings store {}", path.display()))?
        };
        Ok(Self { path, screens })
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(&self.screens)?;
        std::fs::write(&self.path, json)
            .with_context(|| format!("writing settings store {}", self.path.display()))?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get(&self, id: &str) -> Option<&PersistedFlags> {
        self.screens.get(id)
    }

    pub fn len(&self) -> usize {
        self.screens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.screens.is_empty()
    }

    /// Defaults overlaid with whatever was stored for `id`.
    pub fn restore(&self, id: &str) -> VisibilitySettings {
        let mut settings = VisibilitySettings::default();
        if let Some(flags) = self.screens.get(id) {
            flags.apply_to(&mut settings);
        }
        settings
    }

    /// Capture the flags of `settings` under `id`. Screens that opted out of
    /// persistence are skipped and `false` is returned.
    pub fn record(&mut self, id: &str, settings: &VisibilitySettings) -> bool {
        if !settings.persisted {
            return false;
        }
        self.screens.insert(id.to_string(), PersistedFlags::from(settings));
        true
    }

    pub fn forget(&mut self, id: &str) -> bool {
        self.screens.remove(id).is_some()
    }
}
