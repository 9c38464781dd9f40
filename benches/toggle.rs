use criterion::{criterion_group, criterion_main, Criterion};
use hiding_bars::motion::{BarHandle, ChromeHost, CompanionHandle, Edge, Transition, Viewport};
use hiding_bars::scheduler::ManualClock;
use hiding_bars::{BarKind, ChromeVisibilityController, SharedSettings, VisibilitySettings};
use std::time::Duration;

struct Strip {
    edge: Edge,
    offset: f64,
    thickness: f64,
}

impl BarHandle for Strip {
    fn edge(&self) -> Edge {
        self.edge
    }

    fn offset(&self) -> f64 {
        self.offset
    }

    fn thickness(&self) -> f64 {
        self.thickness
    }

    fn move_to(&mut self, offset: f64, _transition: Transition) {
        self.offset = offset;
    }
}

impl CompanionHandle for Strip {
    fn offset(&self) -> f64 {
        self.offset
    }

    fn thickness(&self) -> f64 {
        self.thickness
    }

    fn move_to(&mut self, offset: f64, _transition: Transition) {
        self.offset = offset;
    }
}

struct Screen {
    bars: [Strip; 2],
    companion: Strip,
}

impl ChromeHost for Screen {
    fn viewport(&self) -> Viewport {
        Viewport::new(320.0, 480.0)
    }

    fn bar(&mut self, kind: BarKind) -> Option<&mut dyn BarHandle> {
        let [top, bottom] = &mut self.bars;
        match kind {
            BarKind::Primary => Some(top),
            BarKind::Secondary => Some(bottom),
        }
    }

    fn companion(&mut self) -> Option<&mut dyn CompanionHandle> {
        Some(&mut self.companion)
    }
}

fn bench_toggle(c: &mut Criterion) {
    let mut settings = VisibilitySettings::default();
    settings.companion_bar = Some(BarKind::Secondary);
    settings.companion_gap = 5.0;
    let clock = ManualClock::new();
    let mut ctrl = ChromeVisibilityController::with_clock(SharedSettings::new(settings), clock.clone());
    let mut screen = Screen {
        bars: [
            Strip { edge: Edge::Top, offset: 0.0, thickness: 44.0 },
            Strip { edge: Edge::Bottom, offset: 431.0, thickness: 49.0 },
        ],
        companion: Strip { edge: Edge::Bottom, offset: 390.0, thickness: 36.0 },
    };
    ctrl.handle_appear(&mut screen);

    c.bench_function("toggle_and_auto_hide", |b| {
        b.iter(|| {
            ctrl.handle_toggle_requested(&mut screen);
            ctrl.handle_toggle_requested(&mut screen);
            clock.advance(Duration::from_secs(3));
            ctrl.poll(&mut screen)
        })
    });
}

criterion_group!(benches, bench_toggle);
criterion_main!(benches);
