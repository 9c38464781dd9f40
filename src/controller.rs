//! Event-driven state machine that decides when the chrome hides and shows.
//!
//! The host forwards its lifecycle events and the toggle gesture to the
//! controller and calls [`ChromeVisibilityController::poll`] from its event
//! loop so deferred actions (auto-hide, layout settle) can fire.

use crate::motion::{BarMotionSynchronizer, ChromeHost, Viewport};
use crate::scheduler::{Clock, DeferredQueue, SystemClock, TaskHandle};
use crate::shared::{SettingChange, SharedSettings};
use crate::visibility::{BarKind, SettingName};
use std::time::{Duration, Instant};

/// Wait before re-reading geometry after a size transition.
pub const LAYOUT_SETTLE_DELAY: Duration = Duration::from_millis(10);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeferredAction {
    AutoHide,
    SettleLayout,
}

pub struct ChromeVisibilityController<C: Clock = SystemClock> {
    settings: SharedSettings,
    queue: DeferredQueue<DeferredAction, C>,
    motion: BarMotionSynchronizer,
    settle_delay: Duration,
    pending_settle: Option<TaskHandle>,
}

impl ChromeVisibilityController<SystemClock> {
    pub fn new(settings: SharedSettings) -> Self {
        Self::with_clock(settings, SystemClock)
    }
}

impl<C: Clock> ChromeVisibilityController<C> {
    pub fn with_clock(settings: SharedSettings, clock: C) -> Self {
        Self {
            settings,
            queue: DeferredQueue::with_clock(clock),
            motion: BarMotionSynchronizer::default(),
            settle_delay: LAYOUT_SETTLE_DELAY,
            pending_settle: None,
        }
    }

    pub fn with_motion(mut self, motion: BarMotionSynchronizer) -> Self {
        self.motion = motion;
        self
    }

    pub fn with_settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay = delay;
        self
    }

    pub fn settings(&self) -> &SharedSettings {
        &self.settings
    }

    pub fn bars_hidden(&self) -> bool {
        self.settings.borrow().bars_hidden
    }

    pub fn has_pending_auto_hide(&self) -> bool {
        self.settings.borrow().has_pending_auto_hide()
    }

    pub fn has_pending_settle(&self) -> bool {
        self.pending_settle.as_ref().is_some_and(TaskHandle::is_pending)
    }

    /// Live deferred actions of any kind.
    pub fn pending_tasks(&self) -> usize {
        self.queue.pending()
    }

    /// When the host should next call [`Self::poll`].
    pub fn next_deadline(&mut self) -> Option<Instant> {
        self.queue.next_deadline()
    }

    /// The screen became active.
    pub fn handle_appear<H: ChromeHost + ?Sized>(&mut self, host: &mut H) {
        let target = {
            let mut s = self.settings.borrow_mut();
            s.auto_hide_overridden = false;
            appear_target(s.show_on_appear, s.bars_hidden)
        };
        tracing::debug!(hidden = target, "appear");
        self.set_bars(host, target, false);
    }

    /// The screen is about to change size. Only the frontmost screen reacts,
    /// and only after layout has had a moment to settle.
    pub fn handle_will_transition<H: ChromeHost + ?Sized>(&mut self, host: &mut H, new_size: Viewport) {
        if !host.is_frontmost() {
            tracing::debug!("ignoring size transition on background screen");
            return;
        }
        if host.viewport() == new_size {
            return;
        }
        if let Some(task) = self.pending_settle.take() {
            task.cancel();
        }
        self.pending_settle = Some(self.queue.schedule(self.settle_delay, DeferredAction::SettleLayout));
    }

    /// Re-apply the current state after the host laid out its views. Keeps
    /// the companion attached without restarting the auto-hide countdown.
    pub fn handle_layout<H: ChromeHost + ?Sized>(&mut self, host: &mut H) {
        let (hidden, anchor) = {
            let s = self.settings.borrow();
            (s.bars_hidden, s.companion_anchor())
        };
        for kind in self.eligible_bars() {
            self.motion.apply(host, kind, hidden, false, anchor);
        }
        if let Some(anchor) = anchor {
            self.motion.reseat(host, anchor, false);
        }
    }

    /// The screen is going away; nothing may fire against it afterwards.
    pub fn handle_disappear(&mut self) {
        self.settings.borrow_mut().cancel_pending_auto_hide();
        if let Some(task) = self.pending_settle.take() {
            task.cancel();
        }
        tracing::debug!("disappear");
    }

    pub fn handle_toggle_requested<H: ChromeHost + ?Sized>(&mut self, host: &mut H) {
        let hidden = {
            let mut s = self.settings.borrow_mut();
            if !s.hides_any() {
                tracing::debug!("toggle ignored, no bar may hide");
                return;
            }
            if s.auto_hide_enabled() {
                s.auto_hide_overridden = s.bars_hidden;
            }
            s.bars_hidden
        };
        self.set_bars(host, !hidden, true);
    }

    /// Hide or show every eligible bar. Any pending auto-hide is cancelled
    /// before anything else happens; a new one is started only when the bars
    /// end up shown, auto-hide is enabled and the user has not overridden it.
    pub fn set_bars<H: ChromeHost + ?Sized>(&mut self, host: &mut H, hidden: bool, animated: bool) {
        let anchor = {
            let mut s = self.settings.borrow_mut();
            s.cancel_pending_auto_hide();
            s.bars_hidden = hidden;
            s.companion_anchor()
        };
        tracing::debug!(hidden, animated, "set bars");

        for kind in self.eligible_bars() {
            self.motion.apply(host, kind, hidden, animated, anchor);
        }

        if hidden {
            return;
        }
        let mut s = self.settings.borrow_mut();
        if let Some(delay) = s.active_auto_hide_delay() {
            if !s.auto_hide_overridden {
                s.auto_hide
                    .schedule_hide_after(&mut self.queue, delay, DeferredAction::AutoHide);
            }
        }
    }

    /// React to a flag edited on the shared settings. While the bars are
    /// hidden, flipping a bar's eligibility slides just that bar. Switching
    /// auto-hide off stops the countdown; switching it on while the bars are
    /// shown starts one.
    pub fn on_setting_changed<H: ChromeHost + ?Sized>(&mut self, host: &mut H, change: &SettingChange) {
        if change.name == SettingName::HideOnAppear {
            self.sync_auto_hide();
            return;
        }
        let Some(kind) = change.name.bar() else {
            return;
        };
        let anchor = {
            let s = self.settings.borrow();
            if !s.bars_hidden {
                return;
            }
            s.companion_anchor()
        };
        tracing::debug!(bar = %kind, hidden = change.value, "eligibility changed while hidden");
        self.motion.apply(host, kind, change.value, true, anchor);
    }

    /// Same as [`Self::on_setting_changed`] for a raw name; unknown names are ignored.
    pub fn on_setting_named<H: ChromeHost + ?Sized>(&mut self, host: &mut H, name: &str, value: bool) {
        if let Ok(name) = name.parse() {
            self.on_setting_changed(host, &SettingChange { name, value });
        }
    }

    /// Bring the secondary bar back before the host navigates to a
    /// sub-screen that needs it. `bars_hidden` is left unchanged.
    pub fn reveal_secondary_bar<H: ChromeHost + ?Sized>(&mut self, host: &mut H) {
        let anchor = self.settings.borrow().companion_anchor();
        self.motion.apply(host, BarKind::Secondary, false, true, anchor);
    }

    /// Run every deferred action that is due. Returns how many ran.
    pub fn poll<H: ChromeHost + ?Sized>(&mut self, host: &mut H) -> usize {
        let mut fired = 0;
        while let Some(action) = self.queue.pop_due() {
            fired += 1;
            match action {
                DeferredAction::AutoHide => {
                    tracing::debug!("auto-hide fired");
                    self.set_bars(host, true, true);
                }
                DeferredAction::SettleLayout => {
                    self.pending_settle = None;
                    let target = {
                        let s = self.settings.borrow();
                        appear_target(s.show_on_appear, s.bars_hidden)
                    };
                    tracing::debug!(hidden = target, "layout settled");
                    self.set_bars(host, target, true);
                }
            }
        }
        fired
    }

    fn sync_auto_hide(&mut self) {
        let mut s = self.settings.borrow_mut();
        match s.active_auto_hide_delay() {
            None => s.cancel_pending_auto_hide(),
            Some(delay) => {
                if !s.bars_hidden && !s.auto_hide_overridden && !s.has_pending_auto_hide() {
                    s.auto_hide
                        .schedule_hide_after(&mut self.queue, delay, DeferredAction::AutoHide);
                }
            }
        }
    }

    fn eligible_bars(&self) -> Vec<BarKind> {
        let s = self.settings.borrow();
        BarKind::ALL.into_iter().filter(|k| s.hides(*k)).collect()
    }
}

fn appear_target(show_on_appear: bool, bars_hidden: bool) -> bool {
    if show_on_appear {
        false
    } else {
        bars_hidden
    }
}
