use crate::catalog::SettingsCatalog;
use crate::controller::ChromeVisibilityController;
use crate::motion::{BarHandle, BarMotionSynchronizer, ChromeHost, CompanionHandle, Edge, Transition, Viewport};
use crate::settings::Settings;
use crate::shared::{SettingChange, SharedSettings};
use crate::store::SettingsStore;
use crate::visibility::BarKind;
use eframe::egui;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

const SCREEN_ID: &str = "demo";
const PRIMARY_THICKNESS: f64 = 44.0;
const SECONDARY_THICKNESS: f64 = 49.0;
const COMPANION_THICKNESS: f64 = 36.0;
const COMPANION_GAP: f64 = 5.0;

/// A vertical position that may be mid-animation.
#[derive(Debug, Clone, Copy)]
struct Slide {
    from: f64,
    to: f64,
    start: Instant,
    duration: Duration,
}

impl Slide {
    fn at(offset: f64) -> Self {
        Self {
            from: offset,
            to: offset,
            start: Instant::now(),
            duration: Duration::ZERO,
        }
    }

    fn retarget(&mut self, offset: f64, transition: Transition) {
        let now = Instant::now();
        self.from = self.current(now);
        self.to = offset;
        self.start = now;
        self.duration = match transition {
            Transition::Immediate => Duration::ZERO,
            Transition::Animated(d) => d,
        };
    }

    fn current(&self, now: Instant) -> f64 {
        if self.duration.is_zero() {
            return self.to;
        }
        let t = (now.saturating_duration_since(self.start).as_secs_f64() / self.duration.as_secs_f64()).min(1.0);
        let eased = 1.0 - (1.0 - t) * (1.0 - t);
        self.from + (self.to - self.from) * eased
    }

    fn animating(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.start) < self.duration
    }
}

struct DemoBar {
    edge: Edge,
    thickness: f64,
    slide: Slide,
}

impl BarHandle for DemoBar {
    fn edge(&self) -> Edge {
        self.edge
    }

    fn offset(&self) -> f64 {
        self.slide.to
    }

    fn thickness(&self) -> f64 {
        self.thickness
    }

    fn move_to(&mut self, offset: f64, transition: Transition) {
        self.slide.retarget(offset, transition);
    }
}

struct DemoCompanion {
    thickness: f64,
    slide: Slide,
}

impl CompanionHandle for DemoCompanion {
    fn offset(&self) -> f64 {
        self.slide.to
    }

    fn thickness(&self) -> f64 {
        self.thickness
    }

    fn move_to(&mut self, offset: f64, transition: Transition) {
        self.slide.retarget(offset, transition);
    }
}

/// The chrome screen: bars laid out in a viewport of the central panel.
struct DemoScreen {
    viewport: Viewport,
    primary: DemoBar,
    secondary: DemoBar,
    companion: DemoCompanion,
}

impl DemoScreen {
    fn new(viewport: Viewport) -> Self {
        let secondary_top = viewport.height - SECONDARY_THICKNESS;
        Self {
            viewport,
            primary: DemoBar {
                edge: Edge::Top,
                thickness: PRIMARY_THICKNESS,
                slide: Slide::at(0.0),
            },
            secondary: DemoBar {
                edge: Edge::Bottom,
                thickness: SECONDARY_THICKNESS,
                slide: Slide::at(secondary_top),
            },
            companion: DemoCompanion {
                thickness: COMPANION_THICKNESS,
                slide: Slide::at(secondary_top - COMPANION_GAP - COMPANION_THICKNESS),
            },
        }
    }

    /// Re-anchor the bottom bar to the new bottom edge, keeping it on or off
    /// screen as it was.
    fn resize(&mut self, viewport: Viewport) {
        let was_hidden = self.secondary.slide.to >= self.viewport.height;
        let top = if was_hidden {
            viewport.height
        } else {
            viewport.height - self.secondary.thickness
        };
        self.secondary.slide = Slide::at(top);
        self.viewport = viewport;
    }

    fn animating(&self, now: Instant) -> bool {
        self.primary.slide.animating(now)
            || self.secondary.slide.animating(now)
            || self.companion.slide.animating(now)
    }
}

impl ChromeHost for DemoScreen {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn bar(&mut self, kind: BarKind) -> Option<&mut dyn BarHandle> {
        match kind {
            BarKind::Primary => Some(&mut self.primary),
            BarKind::Secondary => Some(&mut self.secondary),
        }
    }

    fn companion(&mut self) -> Option<&mut dyn CompanionHandle> {
        Some(&mut self.companion)
    }
}

pub struct HidingBarsApp {
    settings: SharedSettings,
    controller: ChromeVisibilityController,
    catalog: SettingsCatalog,
    store: SettingsStore,
    screen: Option<DemoScreen>,
    changes: Rc<RefCell<Vec<SettingChange>>>,
    error: Option<String>,
}

impl HidingBarsApp {
    pub fn new(app_settings: &Settings) -> Self {
        let mut error = None;
        let store = match SettingsStore::load(&app_settings.store_path) {
            Ok(store) => store,
            Err(e) => {
                tracing::warn!("failed to load bar store: {e:#}");
                error = Some(format!("Failed to load {}: {e}", app_settings.store_path));
                SettingsStore::default()
            }
        };

        let mut restored = store.restore(SCREEN_ID);
        restored.auto_hide_delay = app_settings.auto_hide_delay();
        restored.companion_bar = Some(BarKind::Secondary);
        restored.companion_gap = COMPANION_GAP;
        let settings = SharedSettings::new(restored);

        let changes: Rc<RefCell<Vec<SettingChange>>> = Rc::default();
        let inbox = changes.clone();
        settings.subscribe(move |change| inbox.borrow_mut().push(*change));

        let controller = ChromeVisibilityController::new(settings.clone())
            .with_motion(BarMotionSynchronizer::new(app_settings.animation_duration()))
            .with_settle_delay(app_settings.layout_settle_delay());

        Self {
            settings,
            controller,
            catalog: SettingsCatalog::default(),
            store,
            screen: None,
            changes,
            error,
        }
    }

    fn settings_panel(&mut self, ui: &mut egui::Ui) {
        ui.heading("Bars");
        for row in 0..self.catalog.row_count() {
            let Some((label, detail, mut on)) = self
                .catalog
                .content(row, &self.settings.borrow())
                .map(|c| (c.label.to_string(), c.detail.to_string(), c.is_on))
            else {
                continue;
            };
            if ui.checkbox(&mut on, label).changed() {
                self.catalog.set_row(row, on, &self.settings);
            }
            ui.label(egui::RichText::new(detail).small().weak());
        }
        ui.separator();
        let Some(screen) = self.screen.as_mut() else {
            return;
        };
        if ui.button("Leave and return").clicked() {
            self.controller.handle_disappear();
            self.controller.handle_appear(screen);
        }
        if ui.button("Reveal bottom bar").clicked() {
            self.controller.reveal_secondary_bar(screen);
        }
        let s = self.settings.borrow();
        ui.label(format!(
            "hidden: {}  override: {}  auto-hide pending: {}",
            s.bars_hidden,
            s.auto_hide_overridden,
            s.has_pending_auto_hide()
        ));
    }

    fn apply_changes(&mut self) {
        let changes: Vec<SettingChange> = self.changes.borrow_mut().drain(..).collect();
        if changes.is_empty() {
            return;
        }
        if let Some(screen) = self.screen.as_mut() {
            for change in &changes {
                self.controller.on_setting_changed(screen, change);
            }
        }
        if self.store.record(SCREEN_ID, &self.settings.borrow()) {
            if let Err(e) = self.store.save() {
                tracing::error!("failed to save bar store: {e:#}");
                self.error = Some(format!("Failed to save: {e}"));
            }
        }
    }

    fn paint(&self, painter: &egui::Painter, origin: egui::Pos2, width: f32, now: Instant) {
        let Some(screen) = &self.screen else {
            return;
        };
        let strip = |offset: f64, thickness: f64| {
            egui::Rect::from_min_size(
                origin + egui::vec2(0.0, offset as f32),
                egui::vec2(width, thickness as f32),
            )
        };
        let companion = strip(screen.companion.slide.current(now), screen.companion.thickness);
        painter.rect_filled(companion.shrink2(egui::vec2(24.0, 0.0)), 6.0, egui::Color32::from_rgb(90, 140, 90));
        painter.text(
            companion.center(),
            egui::Align2::CENTER_CENTER,
            "companion",
            egui::FontId::proportional(13.0),
            egui::Color32::WHITE,
        );
        for (bar, name) in [(&screen.primary, "top bar"), (&screen.secondary, "bottom bar")] {
            let rect = strip(bar.slide.current(now), bar.thickness);
            painter.rect_filled(rect, 0.0, egui::Color32::from_rgb(60, 70, 90));
            painter.text(
                rect.center(),
                egui::Align2::CENTER_CENTER,
                name,
                egui::FontId::proportional(14.0),
                egui::Color32::WHITE,
            );
        }
    }
}

impl eframe::App for HidingBarsApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::SidePanel::right("bar_settings").min_width(220.0).show(ctx, |ui| {
            if let Some(err) = &self.error {
                ui.colored_label(egui::Color32::RED, err);
            }
            self.settings_panel(ui);
        });
        self.apply_changes();

        egui::CentralPanel::default().show(ctx, |ui| {
            let (rect, response) = ui.allocate_exact_size(ui.available_size(), egui::Sense::click());
            let viewport = Viewport::new(rect.width() as f64, rect.height() as f64);

            if self.screen.is_none() {
                let screen = self.screen.insert(DemoScreen::new(viewport));
                self.controller.handle_appear(screen);
            } else if let Some(screen) = self.screen.as_mut().filter(|s| s.viewport != viewport) {
                self.controller.handle_will_transition(screen, viewport);
                screen.resize(viewport);
                self.controller.handle_layout(screen);
            }

            if let Some(screen) = self.screen.as_mut() {
                if response.clicked() {
                    self.controller.handle_toggle_requested(screen);
                }
                self.controller.poll(screen);
            }

            let now = Instant::now();
            self.paint(&ui.painter_at(rect), rect.min, rect.width(), now);
        });

        let now = Instant::now();
        if self.screen.as_ref().is_some_and(|s| s.animating(now)) {
            ctx.request_repaint();
        } else if let Some(deadline) = self.controller.next_deadline() {
            ctx.request_repaint_after(deadline.saturating_duration_since(now));
        }
    }
}
