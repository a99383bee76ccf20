//! View-Triggered Counter - A number that counts up when scrolled into view.
//!
//! The counter renders 0 until its region first intersects the viewport.
//! That first intersection - and only that one - retargets a damped spring
//! from 0 to the configured value; every frame the displayed integer is
//! re-derived as `floor(position)`, so the display never runs ahead of the
//! simulation and reads the target exactly only once truly reached. After
//! settling the tick subscription removes itself and the value is stable
//! forever. Later viewport exits and re-entries change nothing.
//!
//! # State machine
//!
//! Two phases: `Dormant` (initial, display 0) and `Activated` (entered at
//! most once, irreversible). There is no separate settled phase - settling
//! only drops the frame subscription.
//!
//! # Example
//!
//! ```ignore
//! use inview_tui::primitives::{view_counter, CounterProps};
//! use inview_tui::types::Rect;
//!
//! let counter = view_counter(CounterProps {
//!     value: 443,
//!     suffix: Some("亿+".to_string()),
//!     region: Rect::row(120, 80).into(),
//!     ..Default::default()
//! });
//!
//! // After scrolling row 120 into view and letting the clock run:
//! assert_eq!(counter.text(), "443亿+");
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use spark_signals::{Signal, signal};

use crate::animation::{Spring, SpringParams, subscribe_to_frames};
use crate::viewport::observer::{self, Intersection, ObserveOptions};

use super::types::{Cleanup, CounterProps};

// =============================================================================
// Phase
// =============================================================================

/// Counter lifecycle phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Not yet seen; display is 0.
    Dormant,
    /// First intersection happened; animating or settled at the target.
    Activated,
}

// =============================================================================
// Counter
// =============================================================================

struct CounterInner {
    spring: Spring,
    phase: Phase,
    target: f64,
    fps: u8,
    /// Present only while the spring is being ticked.
    tick_unsubscribe: Option<Cleanup>,
}

/// Handle to a mounted view-triggered counter.
///
/// Holds the counter's state for its whole lifetime; dropping the handle
/// unmounts it (observer entry and any frame subscription are released, no
/// tick fires afterward).
pub struct CounterHandle {
    display: Signal<i64>,
    suffix: String,
    value: i64,
    inner: Rc<RefCell<CounterInner>>,
    observer_unsubscribe: Option<Cleanup>,
}

/// Create a view-triggered counter.
///
/// Registers a one-shot visibility observer for `props.region` with
/// `props.margin`. The value is accepted as-is - negative or otherwise -
/// and animated literally once triggered.
pub fn view_counter(props: CounterProps) -> CounterHandle {
    let display = signal(0i64);

    let inner = Rc::new(RefCell::new(CounterInner {
        spring: Spring::at_rest(0.0, SpringParams::COUNTER),
        phase: Phase::Dormant,
        target: props.value as f64,
        fps: props.fps,
        tick_unsubscribe: None,
    }));

    let inner_for_observer = inner.clone();
    let display_for_observer = display.clone();
    let observer_unsubscribe = observer::observe(
        props.region,
        ObserveOptions {
            margin: props.margin,
            once: true,
        },
        Rc::new(move |hit: &Intersection| {
            if hit.visible {
                activate(&inner_for_observer, &display_for_observer);
            }
        }),
    );

    CounterHandle {
        display,
        suffix: props.suffix.unwrap_or_default(),
        value: props.value,
        inner,
        observer_unsubscribe: Some(observer_unsubscribe),
    }
}

/// Retarget the spring and start ticking. Guarded by the phase latch so a
/// second visibility event is a no-op even if one slipped through.
fn activate(inner: &Rc<RefCell<CounterInner>>, display: &Signal<i64>) {
    let fps = {
        let mut state = inner.borrow_mut();
        if state.phase == Phase::Activated {
            return;
        }
        state.phase = Phase::Activated;

        let target = state.target;
        state.spring.set_target(target);
        if state.spring.is_settled() {
            // Target 0: nothing to animate, display already reads it.
            return;
        }
        state.fps
    };

    let inner_for_tick = inner.clone();
    let display_for_tick = display.clone();
    let tick = Rc::new(move |dt: f64| {
        let (value, settled) = {
            let mut state = inner_for_tick.borrow_mut();
            let settled = state.spring.step(dt);
            (state.spring.position.floor() as i64, settled)
        };

        if display_for_tick.get() != value {
            display_for_tick.set(value);
        }

        if settled {
            if let Some(unsubscribe) = inner_for_tick.borrow_mut().tick_unsubscribe.take() {
                unsubscribe();
            }
        }
    });

    inner.borrow_mut().tick_unsubscribe = Some(subscribe_to_frames(fps, tick));
}

impl CounterHandle {
    /// The live displayed integer: floor of the simulated value.
    ///
    /// Note: This creates a reactive dependency when called from a derived/effect.
    pub fn display(&self) -> i64 {
        self.display.get()
    }

    /// The display signal, for reactive composition into text props.
    pub fn display_signal(&self) -> Signal<i64> {
        self.display.clone()
    }

    /// The rendered text: `<display><suffix>`.
    pub fn text(&self) -> String {
        format!("{}{}", self.display.get(), self.suffix)
    }

    /// The configured target value.
    pub fn value(&self) -> i64 {
        self.value
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> Phase {
        self.inner.borrow().phase
    }

    /// Unmount: deregister the visibility observer and stop any frame
    /// subscription. No tick fires afterward.
    pub fn unmount(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if let Some(unsubscribe) = self.observer_unsubscribe.take() {
            unsubscribe();
        }
        if let Some(unsubscribe) = self.inner.borrow_mut().tick_unsubscribe.take() {
            unsubscribe();
        }
    }
}

impl Drop for CounterHandle {
    fn drop(&mut self) {
        self.release();
    }
}

// =============================================================================
// Tests
// =============================================================================
