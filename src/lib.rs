pub mod catalog;
pub mod controller;
pub mod gui;
pub mod logging;
pub mod motion;
pub mod scheduler;
pub mod settings;
pub mod shared;
pub mod store;
pub mod visibility;

pub use controller::{ChromeVisibilityController, DeferredAction};
pub use motion::{BarHandle, BarMotionSynchronizer, ChromeHost, CompanionHandle, Edge, Transition, Viewport};
pub use shared::{SettingChange, SharedSettings};
pub use visibility::{BarKind, SettingName, VisibilitySettings};
