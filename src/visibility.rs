use crate::motion::CompanionAnchor;
use crate::scheduler::AutoHideScheduler;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Delay used when no explicit auto-hide delay is configured.
pub const DEFAULT_AUTO_HIDE_DELAY: Duration = Duration::from_secs(3);

/// The two pieces of chrome a screen can hide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BarKind {
    /// The top bar (navigation bar).
    Primary,
    /// The bottom bar (tab bar).
    Secondary,
}

impl BarKind {
    pub const ALL: [BarKind; 2] = [BarKind::Primary, BarKind::Secondary];
}

impl fmt::Display for BarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BarKind::Primary => write!(f, "primary"),
            BarKind::Secondary => write!(f, "secondary"),
        }
    }
}

/// Boolean configuration flags addressable by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SettingName {
    HidePrimaryBar,
    HideSecondaryBar,
    HideOnAppear,
    ShowOnAppear,
}

impl SettingName {
    pub const ALL: [SettingName; 4] = [
        SettingName::HidePrimaryBar,
        SettingName::HideSecondaryBar,
        SettingName::HideOnAppear,
        SettingName::ShowOnAppear,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SettingName::HidePrimaryBar => "hidePrimaryBar",
            SettingName::HideSecondaryBar => "hideSecondaryBar",
            SettingName::HideOnAppear => "hideOnAppear",
            SettingName::ShowOnAppear => "showOnAppear",
        }
    }

    /// The bar whose hide eligibility this flag controls, if any.
    pub fn bar(self) -> Option<BarKind> {
        match self {
            SettingName::HidePrimaryBar => Some(BarKind::Primary),
            SettingName::HideSecondaryBar => Some(BarKind::Secondary),
            _ => None,
        }
    }
}

impl fmt::Display for SettingName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a setting name does not match any known flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownSetting(pub String);

impl fmt::Display for UnknownSetting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown setting '{}'", self.0)
    }
}

impl std::error::Error for UnknownSetting {}

impl FromStr for SettingName {
    type Err = UnknownSetting;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SettingName::ALL
            .into_iter()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| UnknownSetting(s.to_string()))
    }
}

/// Configuration and runtime state for one screen's chrome.
///
/// Configuration fields are set by the host screen or a settings list.
/// `bars_hidden` and `auto_hide_overridden` are owned by the controller.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VisibilitySettings {
    /// When true, the primary bar can be hidden.
    pub hide_primary_bar: bool,
    /// When true, the secondary bar can be hidden.
    pub hide_secondary_bar: bool,
    /// When true, shown bars hide automatically after `auto_hide_delay`.
    pub hide_on_appear: bool,
    /// When true, the bars reset to shown every time the screen appears.
    pub show_on_appear: bool,
    /// Auto-hide is disabled when this is `None`, regardless of `hide_on_appear`.
    #[serde(with = "delay_secs")]
    pub auto_hide_delay: Option<Duration>,
    /// Bar the companion element is glued to. `None` means no companion.
    pub companion_bar: Option<BarKind>,
    /// Distance between the companion element and the bar it tracks.
    pub companion_gap: f64,
    /// Whether the host should write these flags back to its store.
    pub persisted: bool,
    pub bars_hidden: bool,
    pub auto_hide_overridden: bool,
    #[serde(skip)]
    pub(crate) auto_hide: AutoHideScheduler,
}

impl Default for VisibilitySettings {
    fn default() -> Self {
        Self {
            hide_primary_bar: true,
            hide_secondary_bar: true,
            hide_on_appear: true,
            show_on_appear: true,
            auto_hide_delay: Some(DEFAULT_AUTO_HIDE_DELAY),
            companion_bar: None,
            companion_gap: 0.0,
            persisted: true,
            bars_hidden: false,
            auto_hide_overridden: false,
            auto_hide: AutoHideScheduler::default(),
        }
    }
}

impl VisibilitySettings {
    /// Look up a flag by its string name.
    pub fn flag(&self, name: &str) -> Option<bool> {
        name.parse().ok().map(|name| self.value(name))
    }

    pub fn value(&self, name: SettingName) -> bool {
        match name {
            SettingName::HidePrimaryBar => self.hide_primary_bar,
            SettingName::HideSecondaryBar => self.hide_secondary_bar,
            SettingName::HideOnAppear => self.hide_on_appear,
            SettingName::ShowOnAppear => self.show_on_appear,
        }
    }

    /// Write a flag without notifying anyone. Observers are driven by
    /// [`crate::shared::SharedSettings::set`].
    pub fn set_value(&mut self, name: SettingName, value: bool) {
        match name {
            SettingName::HidePrimaryBar => self.hide_primary_bar = value,
            SettingName::HideSecondaryBar => self.hide_secondary_bar = value,
            SettingName::HideOnAppear => self.hide_on_appear = value,
            SettingName::ShowOnAppear => self.show_on_appear = value,
        }
    }

    pub fn hides(&self, bar: BarKind) -> bool {
        match bar {
            BarKind::Primary => self.hide_primary_bar,
            BarKind::Secondary => self.hide_secondary_bar,
        }
    }

    pub fn hides_any(&self) -> bool {
        self.hide_primary_bar || self.hide_secondary_bar
    }

    /// The countdown to use after bars are shown, or `None` when auto-hide
    /// is switched off for this screen.
    pub fn active_auto_hide_delay(&self) -> Option<Duration> {
        if self.hide_on_appear {
            self.auto_hide_delay
        } else {
            None
        }
    }

    pub fn auto_hide_enabled(&self) -> bool {
        self.active_auto_hide_delay().is_some()
    }

    pub fn companion_anchor(&self) -> Option<CompanionAnchor> {
        self.companion_bar.map(|bar| CompanionAnchor {
            bar,
            gap: self.companion_gap,
        })
    }

    pub fn has_pending_auto_hide(&self) -> bool {
        self.auto_hide.is_pending()
    }

    pub fn cancel_pending_auto_hide(&mut self) {
        self.auto_hide.cancel();
    }
}

mod delay_secs {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(delay: &Option<Duration>, s: S) -> Result<S::Ok, S::Error> {
        match delay {
            Some(d) => s.serialize_some(&d.as_secs_f64()),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Duration>, D::Error> {
        let secs = Option::<f64>::deserialize(d)?;
        Ok(secs.and_then(|s| match Duration::try_from_secs_f64(s) {
            Ok(delay) => Some(delay),
            Err(e) => {
                tracing::warn!("ignoring auto-hide delay {s}: {e}");
                None
            }
        }))
    }
}
