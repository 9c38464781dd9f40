use hiding_bars::scheduler::ManualClock;
use hiding_bars::{BarKind, ChromeVisibilityController, SharedSettings, Transition, VisibilitySettings};
use std::time::Duration;

#[path = "mock_host.rs"]
mod mock_host;
use mock_host::{MockHost, HEIGHT, TOP_THICKNESS};

const GAP: f64 = 5.0;
const COMPANION: f64 = 36.0;

fn controller(anchor: BarKind) -> ChromeVisibilityController<ManualClock> {
    let mut settings = VisibilitySettings::default();
    settings.companion_bar = Some(anchor);
    settings.companion_gap = GAP;
    ChromeVisibilityController::with_clock(SharedSettings::new(settings), ManualClock::new())
}

#[test]
fn companion_stays_above_bottom_bar_through_toggles() {
    let mut ctrl = controller(BarKind::Secondary);
    let mut host = MockHost::with_companion(COMPANION);

    ctrl.handle_appear(&mut host);
    for _ in 0..5 {
        assert_eq!(host.attached().offset, host.bottom().offset - GAP - COMPANION);
        ctrl.handle_toggle_requested(&mut host);
    }
    assert!(ctrl.bars_hidden());
    assert_eq!(host.attached().offset, HEIGHT - GAP - COMPANION);
}

#[test]
fn companion_animates_with_the_bar() {
    let mut ctrl = controller(BarKind::Secondary);
    let mut host = MockHost::with_companion(COMPANION);
    ctrl.handle_appear(&mut host);

    ctrl.set_bars(&mut host, true, true);
    let animated = Transition::Animated(Duration::from_millis(250));
    assert_eq!(host.bottom().moves.last().map(|m| m.1), Some(animated));
    assert_eq!(host.attached().moves.last().map(|m| m.1), Some(animated));
}

#[test]
fn companion_is_seated_even_when_bar_does_not_move() {
    let mut ctrl = controller(BarKind::Secondary);
    let mut host = MockHost::with_companion(COMPANION);
    assert_eq!(host.attached().offset, 0.0);

    ctrl.set_bars(&mut host, false, false);
    assert!(host.bottom().moves.is_empty());
    assert_eq!(host.attached().moves.len(), 1);
    assert_eq!(host.attached().offset, host.bottom().offset - GAP - COMPANION);

    ctrl.set_bars(&mut host, false, false);
    assert_eq!(host.attached().moves.len(), 1);
}

#[test]
fn companion_hangs_below_top_bar() {
    let mut ctrl = controller(BarKind::Primary);
    let mut host = MockHost::with_companion(COMPANION);

    ctrl.set_bars(&mut host, false, false);
    assert_eq!(host.attached().offset, TOP_THICKNESS + GAP);

    ctrl.set_bars(&mut host, true, false);
    assert_eq!(host.attached().offset, GAP);
}

#[test]
fn layout_pass_reseats_companion_without_animation() {
    let mut ctrl = controller(BarKind::Secondary);
    let mut host = MockHost::with_companion(COMPANION);
    ctrl.handle_appear(&mut host);

    host.companion.as_mut().unwrap().offset = 12.0;
    ctrl.handle_layout(&mut host);
    assert_eq!(host.attached().offset, host.bottom().offset - GAP - COMPANION);
    assert_eq!(host.attached().moves.last().map(|m| m.1), Some(Transition::Immediate));
}

#[test]
fn anchor_without_companion_is_harmless() {
    let mut ctrl = controller(BarKind::Secondary);
    let mut host = MockHost::default();

    ctrl.handle_toggle_requested(&mut host);
    assert!(ctrl.bars_hidden());
    assert!(!host.secondary_on_screen());
}
