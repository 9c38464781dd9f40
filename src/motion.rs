use crate::visibility::BarKind;
use std::time::Duration;

/// Length of an animated bar slide.
pub const ANIMATION_DURATION: Duration = Duration::from_millis(250);

/// Screen edge a bar slides off of. Offsets grow downwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Top,
    Bottom,
}

impl Edge {
    /// Sign of the direction that moves a bar off-screen.
    fn outward(self) -> f64 {
        match self {
            Edge::Top => -1.0,
            Edge::Bottom => 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Transition {
    Immediate,
    Animated(Duration),
}

/// A strip of chrome that can be slid along the vertical axis.
pub trait BarHandle {
    fn edge(&self) -> Edge;
    /// Settled position of the bar's top edge, ignoring any in-flight animation.
    fn offset(&self) -> f64;
    fn thickness(&self) -> f64;
    fn move_to(&mut self, offset: f64, transition: Transition);
}

/// An element that rides along with one of the bars.
pub trait CompanionHandle {
    fn offset(&self) -> f64;
    fn thickness(&self) -> f64;
    fn move_to(&mut self, offset: f64, transition: Transition);
}

/// What the controller needs from the screen that hosts the chrome.
pub trait ChromeHost {
    fn viewport(&self) -> Viewport;
    fn bar(&mut self, kind: BarKind) -> Option<&mut dyn BarHandle>;
    fn companion(&mut self) -> Option<&mut dyn CompanionHandle>;

    /// Whether this screen is the selected one among its siblings.
    fn is_frontmost(&self) -> bool {
        true
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompanionAnchor {
    pub bar: BarKind,
    pub gap: f64,
}

fn is_on_screen(edge: Edge, offset: f64, thickness: f64, viewport: Viewport) -> bool {
    match edge {
        Edge::Top => offset + thickness > 0.0,
        Edge::Bottom => offset < viewport.height,
    }
}

/// Turns a logical hidden/shown target into geometry commands for one bar
/// and keeps the companion element glued to it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarMotionSynchronizer {
    pub duration: Duration,
}

impl Default for BarMotionSynchronizer {
    fn default() -> Self {
        Self {
            duration: ANIMATION_DURATION,
        }
    }
}

impl BarMotionSynchronizer {
    pub fn new(duration: Duration) -> Self {
        Self { duration }
    }

    pub fn transition(&self, animated: bool) -> Transition {
        if animated {
            Transition::Animated(self.duration)
        } else {
            Transition::Immediate
        }
    }

    /// Slide `kind` on or off screen. A bar already in the requested state
    /// is left alone, but the companion is still re-seated since it can lag
    /// behind the bar after a size change.
    ///
    /// Returns the bar's offset after the move, or `None` if the host has no
    /// such bar.
    pub fn apply<H: ChromeHost + ?Sized>(
        &self,
        host: &mut H,
        kind: BarKind,
        hidden: bool,
        animated: bool,
        anchor: Option<CompanionAnchor>,
    ) -> Option<f64> {
        let viewport = host.viewport();
        let transition = self.transition(animated);
        let bar = host.bar(kind)?;

        let edge = bar.edge();
        let thickness = bar.thickness();
        let mut offset = bar.offset();
        if is_on_screen(edge, offset, thickness, viewport) == hidden {
            let direction = if hidden { 1.0 } else { -1.0 };
            offset += edge.outward() * direction * thickness;
            tracing::trace!(bar = %kind, hidden, offset, "moving bar");
            bar.move_to(offset, transition);
        }

        if let Some(anchor) = anchor.filter(|a| a.bar == kind) {
            self.seat_companion(host, edge, offset, thickness, anchor.gap, transition);
        }
        Some(offset)
    }

    /// Re-seat the companion against the bar's current settled position.
    pub fn reseat<H: ChromeHost + ?Sized>(&self, host: &mut H, anchor: CompanionAnchor, animated: bool) {
        let Some(bar) = host.bar(anchor.bar) else {
            return;
        };
        let (edge, offset, thickness) = (bar.edge(), bar.offset(), bar.thickness());
        self.seat_companion(host, edge, offset, thickness, anchor.gap, self.transition(animated));
    }

    fn seat_companion<H: ChromeHost + ?Sized>(
        &self,
        host: &mut H,
        edge: Edge,
        bar_offset: f64,
        bar_thickness: f64,
        gap: f64,
        transition: Transition,
    ) {
        let Some(companion) = host.companion() else {
            return;
        };
        let target = match edge {
            Edge::Bottom => bar_offset - gap - companion.thickness(),
            Edge::Top => bar_offset + bar_thickness + gap,
        };
        if (companion.offset() - target).abs() > f64::EPSILON {
            tracing::trace!(target, "moving companion");
            companion.move_to(target, transition);
        }
    }
}
