//! Visibility Observer - One-shot viewport intersection tracking.
//!
//! Components register the region they occupy in the content column and a
//! callback; the registry fires the callback when the region first
//! intersects the (margin-inset) viewport. With `once` set - the default -
//! the entry deregisters itself after that first satisfying evaluation, so
//! later exits and re-entries are never observed.
//!
//! Evaluation is reactive: [`start`] installs one effect that re-runs on
//! every scroll-offset or viewport-size change (and whenever the set of
//! observers changes), in the same way the render effect monitors the
//! pipeline in a full TUI. There is no polling.
//!
//! If no viewport was ever established, [`start`] is inert and every
//! observer stays dormant. That is the designed degrade path, not an error.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use spark_signals::{Signal, effect, signal};

use crate::primitives::PropValue;
use crate::state::scroll;
use crate::types::{Edges, Margin, Rect};
use crate::viewport::terminal;

// =============================================================================
// Types
// =============================================================================

/// How an observation behaves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObserveOptions {
    /// Inset applied to the viewport before the intersection test. The
    /// default of 2 cells means a region must be two rows past the literal
    /// edge before it counts as visible.
    pub margin: Margin,
    /// Deregister after the first satisfying evaluation.
    pub once: bool,
}

impl Default for ObserveOptions {
    fn default() -> Self {
        Self {
            margin: Margin::inset(2),
            once: true,
        }
    }
}

/// Intersection report passed to observer callbacks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intersection {
    /// Whether the region intersects the effective viewport.
    pub visible: bool,
    /// Sides of the effective viewport clipping the region.
    pub clipped: Edges,
    /// The observed region at evaluation time.
    pub region: Rect,
}

/// Observer callback type.
pub type ObserverCallback = Rc<dyn Fn(&Intersection)>;

struct ObserverEntry {
    region: PropValue<Rect>,
    options: ObserveOptions,
    callback: ObserverCallback,
    /// Visibility at the previous evaluation, for enter-edge detection.
    was_visible: bool,
}

// =============================================================================
// Registry State
// =============================================================================

thread_local! {
    /// Map observer id to entry.
    static OBSERVERS: RefCell<HashMap<usize, ObserverEntry>> = RefCell::new(HashMap::new());

    /// Counter for generating observer ids.
    static NEXT_OBSERVER_ID: RefCell<usize> = const { RefCell::new(0) };

    /// Bumped when observers are added or removed, so the evaluation
    /// effect re-runs for registrations too, not just geometry changes.
    static GENERATION: Signal<u64> = signal(0);
}

fn bump_generation() {
    GENERATION.with(|g| g.set(g.get() + 1));
}

// =============================================================================
// PUBLIC API
// =============================================================================

/// Observe a region of the content column.
///
/// `region` may be static, signal-bound, or a getter - a component whose
/// layout moves keeps its observation accurate for free.
///
/// Returns an unsubscribe function. Call it on unmount; after it runs the
/// callback can never fire again. Entries with `once` remove themselves
/// after their first visible evaluation, in which case the returned
/// function is a safe no-op.
pub fn observe(
    region: PropValue<Rect>,
    options: ObserveOptions,
    callback: ObserverCallback,
) -> Box<dyn FnOnce()> {
    let id = NEXT_OBSERVER_ID.with(|next| {
        let mut next = next.borrow_mut();
        let id = *next;
        *next += 1;
        id
    });

    OBSERVERS.with(|observers| {
        observers.borrow_mut().insert(
            id,
            ObserverEntry {
                region,
                options,
                callback,
                was_visible: false,
            },
        );
    });
    bump_generation();

    Box::new(move || {
        let removed = OBSERVERS.with(|observers| observers.borrow_mut().remove(&id).is_some());
        if removed {
            bump_generation();
        }
    })
}

/// Evaluate every observer against the given viewport.
///
/// Fires callbacks for entries whose region entered visibility since the
/// last evaluation. Latch state is committed (and `once` entries removed)
/// before any callback runs, so re-entrant evaluation cannot double-fire.
pub fn evaluate_all(viewport: Rect) {
    let mut fired: Vec<(ObserverCallback, Intersection)> = Vec::new();

    OBSERVERS.with(|observers| {
        let mut observers = observers.borrow_mut();
        let mut done: Vec<usize> = Vec::new();

        for (&id, entry) in observers.iter_mut() {
            let region = entry.region.get();
            let effective = viewport.inset(entry.options.margin);
            let visible = region.intersects(&effective);

            if visible && !entry.was_visible {
                fired.push((
                    entry.callback.clone(),
                    Intersection {
                        visible,
                        clipped: region.clipped_by(&effective),
                        region,
                    },
                ));
                if entry.options.once {
                    done.push(id);
                }
            }
            entry.was_visible = visible;
        }

        for id in done {
            observers.remove(&id);
        }
    });

    for (callback, intersection) in fired {
        callback(&intersection);
    }
}

// =============================================================================
// Observer Handle
// =============================================================================

/// Handle for the evaluation effect created by [`start`].
///
/// Dropping the handle stops evaluation (best effort); [`stop`] does so
/// explicitly. An inert handle (viewport unsupported) is safe to hold and
/// stop.
///
/// [`stop`]: ObserverHandle::stop
pub struct ObserverHandle {
    stop_effect: Option<Box<dyn FnOnce()>>,
}

impl ObserverHandle {
    /// True when an evaluation effect is actually installed.
    pub fn is_active(&self) -> bool {
        self.stop_effect.is_some()
    }

    /// Stop evaluating observers.
    pub fn stop(mut self) {
        if let Some(stop) = self.stop_effect.take() {
            stop();
        }
    }
}

impl Drop for ObserverHandle {
    fn drop(&mut self) {
        if let Some(stop) = self.stop_effect.take() {
            stop();
        }
    }
}

/// Install the reactive evaluation effect.
///
/// The effect reads the scroll offset, viewport size, and observer
/// generation, so every change re-evaluates all observers - including the
/// initial state at call time (a region already in view fires immediately,
/// matching lay-out-then-observe ordering).
///
/// When the viewport capability is unavailable the returned handle is
/// inert: nothing ever evaluates and every counter stays dormant.
pub fn start() -> ObserverHandle {
    if !terminal::is_viewport_supported() {
        log::debug!("viewport unsupported; visibility observers stay dormant");
        return ObserverHandle { stop_effect: None };
    }

    let generation = GENERATION.with(|g| g.clone());
    let stop_fn = effect(move || {
        // Read generation (creates reactive dependency on the observer set)
        let _gen = generation.get();

        // Reads offset + size signals (reactive dependencies)
        let viewport = scroll::visible_viewport();
        evaluate_all(viewport);
    });

    ObserverHandle {
        stop_effect: Some(Box::new(stop_fn)),
    }
}

/// Number of registered observers.
pub fn observer_count() -> usize {
    OBSERVERS.with(|observers| observers.borrow().len())
}

/// Reset the observer registry (for testing).
pub fn reset_observers() {
    OBSERVERS.with(|observers| observers.borrow_mut().clear());
    NEXT_OBSERVER_ID.with(|next| *next.borrow_mut() = 0);
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::scroll::{reset_scroll_state, set_content_height, set_scroll_offset};
    use crate::viewport::terminal::{reset_viewport_state, set_viewport_size};
    use std::cell::Cell;

    fn setup() {
        reset_observers();
        reset_scroll_state();
        reset_viewport_state();
    }

    fn counting_callback() -> (Rc<Cell<u32>>, ObserverCallback) {
        let count = Rc::new(Cell::new(0));
        let count_for_cb = count.clone();
        let callback: ObserverCallback = Rc::new(move |_| {
            count_for_cb.set(count_for_cb.get() + 1);
        });
        (count, callback)
    }

    #[test]
    fn test_fires_on_intersection() {
        setup();

        let (count, callback) = counting_callback();
        let _unsub = observe(
            PropValue::Static(Rect::row(10, 80)),
            ObserveOptions {
                margin: Margin::NONE,
                once: true,
            },
            callback,
        );

        // Region below the fold
        evaluate_all(Rect::new(0, 0, 80, 8));
        assert_eq!(count.get(), 0);

        // Scrolled into view
        evaluate_all(Rect::new(0, 0, 80, 12));
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_once_latches_and_removes() {
        setup();

        let (count, callback) = counting_callback();
        let _unsub = observe(
            PropValue::Static(Rect::row(10, 80)),
            ObserveOptions {
                margin: Margin::NONE,
                once: true,
            },
            callback,
        );
        assert_eq!(observer_count(), 1);

        evaluate_all(Rect::new(0, 0, 80, 24));
        assert_eq!(count.get(), 1);
        assert_eq!(observer_count(), 0);

        // Exit and re-enter: nothing observes anymore.
        evaluate_all(Rect::new(0, 100, 80, 24));
        evaluate_all(Rect::new(0, 0, 80, 24));
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_repeating_observer_fires_per_entry() {
        setup();

        let (count, callback) = counting_callback();
        let _unsub = observe(
            PropValue::Static(Rect::row(10, 80)),
            ObserveOptions {
                margin: Margin::NONE,
                once: false,
            },
            callback,
        );

        evaluate_all(Rect::new(0, 0, 80, 24)); // enter
        evaluate_all(Rect::new(0, 5, 80, 24)); // still visible: no re-fire
        assert_eq!(count.get(), 1);

        evaluate_all(Rect::new(0, 100, 80, 24)); // exit
        evaluate_all(Rect::new(0, 0, 80, 24)); // re-enter
        assert_eq!(count.get(), 2);
        assert_eq!(observer_count(), 1);
    }

    #[test]
    fn test_margin_requires_deeper_entry() {
        setup();

        let (count, callback) = counting_callback();
        let _unsub = observe(
            PropValue::Static(Rect::row(23, 80)),
            ObserveOptions {
                margin: Margin::inset(2),
                once: true,
            },
            callback,
        );

        // Row 23 is inside the literal 24-row viewport but not inside the
        // 2-row inset (rows 2..22).
        evaluate_all(Rect::new(0, 0, 80, 24));
        assert_eq!(count.get(), 0);

        // Two rows of scroll bring it past the inset edge.
        evaluate_all(Rect::new(0, 2, 80, 24));
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_unsubscribe_before_fire() {
        setup();

        let (count, callback) = counting_callback();
        let unsub = observe(
            PropValue::Static(Rect::row(10, 80)),
            ObserveOptions::default(),
            callback,
        );

        unsub();
        assert_eq!(observer_count(), 0);

        evaluate_all(Rect::new(0, 0, 80, 24));
        assert_eq!(count.get(), 0);
    }

    #[test]
    fn test_unsubscribe_after_once_fired_is_noop() {
        setup();

        let (_, callback) = counting_callback();
        let unsub = observe(
            PropValue::Static(Rect::row(1, 80)),
            ObserveOptions {
                margin: Margin::NONE,
                once: true,
            },
            callback,
        );

        evaluate_all(Rect::new(0, 0, 80, 24));
        assert_eq!(observer_count(), 0);

        // Entry already removed itself; must not panic or remove others.
        unsub();
    }

    #[test]
    fn test_signal_bound_region() {
        setup();

        let row = spark_signals::signal(100u16);
        let row_for_getter = row.clone();

        let (count, callback) = counting_callback();
        let _unsub = observe(
            PropValue::Getter(Rc::new(move || Rect::row(row_for_getter.get(), 80))),
            ObserveOptions {
                margin: Margin::NONE,
                once: true,
            },
            callback,
        );

        evaluate_all(Rect::new(0, 0, 80, 24));
        assert_eq!(count.get(), 0);

        // The component moved into the first screenful.
        row.set(5);
        evaluate_all(Rect::new(0, 0, 80, 24));
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_intersection_report_clipping() {
        setup();

        let seen = Rc::new(Cell::new(Edges::empty()));
        let seen_for_cb = seen.clone();
        let _unsub = observe(
            PropValue::Static(Rect::new(0, 20, 80, 10)),
            ObserveOptions {
                margin: Margin::NONE,
                once: true,
            },
            Rc::new(move |hit: &Intersection| {
                assert!(hit.visible);
                seen_for_cb.set(hit.clipped);
            }),
        );

        // Region straddles the bottom edge of rows 0..24.
        evaluate_all(Rect::new(0, 0, 80, 24));
        assert_eq!(seen.get(), Edges::BOTTOM);
    }

    #[test]
    fn test_start_inert_when_viewport_unsupported() {
        setup();

        let (count, callback) = counting_callback();
        let _unsub = observe(
            PropValue::Static(Rect::row(0, 80)),
            ObserveOptions::default(),
            callback,
        );

        let handle = start();
        assert!(!handle.is_active());
        assert_eq!(count.get(), 0);
        handle.stop();
    }

    #[test]
    fn test_start_evaluates_reactively() {
        setup();
        set_viewport_size(80, 24);
        set_content_height(200);

        let (count, callback) = counting_callback();
        let _unsub = observe(
            PropValue::Static(Rect::row(100, 80)),
            ObserveOptions {
                margin: Margin::NONE,
                once: true,
            },
            callback,
        );

        let handle = start();
        assert!(handle.is_active());
        // Initial evaluation: row 100 not visible yet.
        assert_eq!(count.get(), 0);

        // Scrolling to it triggers through the effect, no manual call.
        set_scroll_offset(90);
        assert_eq!(count.get(), 1);

        handle.stop();
    }

    #[test]
    fn test_registration_after_start_is_picked_up() {
        setup();
        set_viewport_size(80, 24);
        set_content_height(200);

        let handle = start();

        let (count, callback) = counting_callback();
        let _unsub = observe(
            PropValue::Static(Rect::row(3, 80)),
            ObserveOptions {
                margin: Margin::NONE,
                once: true,
            },
            callback,
        );

        // The generation bump re-ran the effect; already-visible regions
        // fire without any scroll.
        assert_eq!(count.get(), 1);

        handle.stop();
    }

    #[test]
    fn test_stop_ends_evaluation() {
        setup();
        set_viewport_size(80, 24);
        set_content_height(200);

        let handle = start();

        let (count, callback) = counting_callback();
        let _unsub = observe(
            PropValue::Static(Rect::row(100, 80)),
            ObserveOptions {
                margin: Margin::NONE,
                once: true,
            },
            callback,
        );
        handle.stop();

        set_scroll_offset(90);
        assert_eq!(count.get(), 0);
    }
}
