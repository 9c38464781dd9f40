#![allow(dead_code)]

use hiding_bars::motion::{BarHandle, ChromeHost, CompanionHandle, Edge, Transition, Viewport};
use hiding_bars::BarKind;

pub const HEIGHT: f64 = 480.0;
pub const TOP_THICKNESS: f64 = 44.0;
pub const BOTTOM_THICKNESS: f64 = 49.0;

#[derive(Debug, Clone)]
pub struct MockBar {
    pub edge: Edge,
    pub offset: f64,
    pub thickness: f64,
    pub moves: Vec<(f64, Transition)>,
}

impl BarHandle for MockBar {
    fn edge(&self) -> Edge {
        self.edge
    }

    fn offset(&self) -> f64 {
        self.offset
    }

    fn thickness(&self) -> f64 {
        self.thickness
    }

    fn move_to(&mut self, offset: f64, transition: Transition) {
        self.offset = offset;
        self.moves.push((offset, transition));
    }
}

#[derive(Debug, Clone)]
pub struct MockCompanion {
    pub offset: f64,
    pub thickness: f64,
    pub moves: Vec<(f64, Transition)>,
}

impl CompanionHandle for MockCompanion {
    fn offset(&self) -> f64 {
        self.offset
    }

    fn thickness(&self) -> f64 {
        self.thickness
    }

    fn move_to(&mut self, offset: f64, transition: Transition) {
        self.offset = offset;
        self.moves.push((offset, transition));
    }
}

/// A screen with a top and a bottom bar, both shown.
#[derive(Debug, Clone)]
pub struct MockHost {
    pub viewport: Viewport,
    pub primary: Option<MockBar>,
    pub secondary: Option<MockBar>,
    pub companion: Option<MockCompanion>,
    pub frontmost: bool,
}

impl Default for MockHost {
    fn default() -> Self {
        Self {
            viewport: Viewport::new(320.0, HEIGHT),
            primary: Some(MockBar {
                edge: Edge::Top,
                offset: 0.0,
                thickness: TOP_THICKNESS,
                moves: Vec::new(),
            }),
            secondary: Some(MockBar {
                edge: Edge::Bottom,
                offset: HEIGHT - BOTTOM_THICKNESS,
                thickness: BOTTOM_THICKNESS,
                moves: Vec::new(),
            }),
            companion: None,
            frontmost: true,
        }
    }
}

impl MockHost {
    pub fn with_companion(thickness: f64) -> Self {
        Self {
            companion: Some(MockCompanion {
                offset: 0.0,
                thickness,
                moves: Vec::new(),
            }),
            ..Self::default()
        }
    }

    pub fn top(&self) -> &MockBar {
        self.primary.as_ref().unwrap()
    }

    pub fn bottom(&self) -> &MockBar {
        self.secondary.as_ref().unwrap()
    }

    pub fn attached(&self) -> &MockCompanion {
        self.companion.as_ref().unwrap()
    }

    pub fn primary_on_screen(&self) -> bool {
        self.top().offset + self.top().thickness > 0.0
    }

    pub fn secondary_on_screen(&self) -> bool {
        self.bottom().offset < self.viewport.height
    }
}

impl ChromeHost for MockHost {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn bar(&mut self, kind: BarKind) -> Option<&mut dyn BarHandle> {
        let bar = match kind {
            BarKind::Primary => self.primary.as_mut(),
            BarKind::Secondary => self.secondary.as_mut(),
        };
        bar.map(|b| b as &mut dyn BarHandle)
    }

    fn companion(&mut self) -> Option<&mut dyn CompanionHandle> {
        self.companion.as_mut().map(|c| c as &mut dyn CompanionHandle)
    }

    fn is_frontmost(&self) -> bool {
        self.frontmost
    }
}
