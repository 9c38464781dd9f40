use crate::shared::SharedSettings;
use crate::visibility::{SettingName, VisibilitySettings};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

const DEFAULT_CATALOG: &str = r#"[
  { "name": "hidePrimaryBar", "label": "Hide top bar", "detail": "The top bar slides away with the bottom bar" },
  { "name": "hideSecondaryBar", "label": "Hide bottom bar", "detail": "The bottom bar slides away with the top bar" },
  { "name": "hideOnAppear", "label": "Auto-hide", "detail": "Hide the bars a few seconds after they are shown" },
  { "name": "showOnAppear", "label": "Show on appear", "detail": "Always show the bars when the screen appears" }
]"#;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct RawEntry {
    name: String,
    label: String,
    #[serde(default)]
    detail: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CatalogEntry {
    pub name: SettingName,
    pub label: String,
    pub detail: String,
}

/// What a settings list row displays.
#[derive(Debug, Clone, PartialEq)]
pub struct RowContent<'a> {
    pub label: &'a str,
    pub detail: &'a str,
    pub is_on: bool,
}

/// Ordered label/detail/switch rows backing a settings list.
#[derive(Debug, Clone, PartialEq)]
pub struct SettingsCatalog {
    entries: Vec<CatalogEntry>,
}

impl Default for SettingsCatalog {
    fn default() -> Self {
        Self::from_json(DEFAULT_CATALOG).unwrap_or(Self { entries: Vec::new() })
    }
}

impl SettingsCatalog {
    /// Parse a JSON array of `{name, label, detail}` rows. Rows naming an
    /// unknown setting are dropped.
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let raw: Vec<RawEntry> = serde_json::from_str(json).context("invalid settings catalog")?;
        let entries = raw
            .into_iter()
            .filter_map(|e| match e.name.parse() {
                Ok(name) => Some(CatalogEntry {
                    name,
                    label: e.label,
                    detail: e.detail,
                }),
                Err(err) => {
                    tracing::warn!("dropping catalog row: {err}");
                    None
                }
            })
            .collect();
        Ok(Self { entries })
    }

    /// Load from `path`, falling back to the built-in rows when the file is
    /// missing or empty.
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).unwrap_or_default();
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Self::from_json(&content).with_context(|| format!("loading {}", path.as_ref().display()))
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn row_count(&self) -> usize {
        self.entries.len()
    }

    pub fn name_at(&self, row: usize) -> Option<SettingName> {
        self.entries.get(row).map(|e| e.name)
    }

    pub fn content<'a>(&'a self, row: usize, settings: &VisibilitySettings) -> Option<RowContent<'a>> {
        self.entries.get(row).map(|e| RowContent {
            label: &e.label,
            detail: &e.detail,
            is_on: settings.value(e.name),
        })
    }

    /// Flip the switch on `row`, notifying observers of `shared`.
    pub fn set_row(&self, row: usize, on: bool, shared: &SharedSettings) -> bool {
        match self.name_at(row) {
            Some(name) => {
                shared.set(name, on);
                true
            }
            None => false,
        }
    }
}
