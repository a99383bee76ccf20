//! Frame Ticker - Shared animation clocks per FPS.
//!
//! All animations at the same FPS share a single timer for efficiency and
//! visual sync. The timer thread only accumulates elapsed milliseconds into
//! an atomic; subscriber callbacks always run on the UI thread, either when
//! the clock is pumped from the event loop or when a test advances time
//! manually.
//!
//! # Pattern
//!
//! - Multiple animations at 30 FPS share one timer
//! - Timer starts with the first subscriber, stops with the last
//! - `pump()` drains accumulated time and ticks every subscriber
//! - `advance()` drives subscribers without any timer (tests, headless)
//!
//! # Example
//!
//! ```ignore
//! use std::rc::Rc;
//! use inview_tui::animation::{subscribe_to_frames, pump};
//!
//! let unsubscribe = subscribe_to_frames(30, Rc::new(|dt| {
//!     // advance some animation by dt seconds
//! }));
//!
//! // In the event loop:
//! pump(30);
//!
//! // Cleanup when done
//! unsubscribe();
//! ```

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Per-tick callback. Receives elapsed time in seconds.
pub type FrameCallback = Rc<dyn Fn(f64)>;

// =============================================================================
// CLOCK REGISTRY
// =============================================================================

/// Per-FPS clock containing shared timer state.
struct FrameClock {
    /// Subscriber callbacks by id (local; only touched on the UI thread).
    subscribers: HashMap<usize, FrameCallback>,
    /// Next subscriber id.
    next_id: usize,
    /// Milliseconds accumulated by the timer thread, drained by pump().
    elapsed_ms: Arc<AtomicU64>,
    /// Flag to signal the timer thread to stop.
    running: Arc<AtomicBool>,
    /// Background timer thread handle.
    handle: Option<JoinHandle<()>>,
}

thread_local! {
    /// Map from FPS to frame clock.
    static CLOCKS: RefCell<HashMap<u8, FrameClock>> = RefCell::new(HashMap::new());
}

// =============================================================================
// PUBLIC API
// =============================================================================

/// Subscribe to frame ticks at the given FPS.
///
/// Returns an unsubscribe function that must be called when done. Multiple
/// subscribers at the same FPS share one timer (efficient + synced).
///
/// # Arguments
///
/// * `fps` - Tick frequency. If 0, returns a no-op unsubscribe (disabled).
/// * `callback` - Invoked with elapsed seconds on every pump/advance.
pub fn subscribe_to_frames(fps: u8, callback: FrameCallback) -> Box<dyn FnOnce()> {
    // Guard against invalid fps (0 would cause an infinite interval)
    if fps == 0 {
        return Box::new(|| {}); // No-op unsubscribe
    }

    let id = CLOCKS.with(|clocks| {
        let mut clocks = clocks.borrow_mut();

        let clock = clocks.entry(fps).or_insert_with(|| FrameClock {
            subscribers: HashMap::new(),
            next_id: 0,
            elapsed_ms: Arc::new(AtomicU64::new(0)),
            running: Arc::new(AtomicBool::new(false)),
            handle: None,
        });

        let id = clock.next_id;
        clock.next_id += 1;
        clock.subscribers.insert(id, callback);

        // Start timer if first subscriber
        if clock.subscribers.len() == 1 {
            let ms = 1000u64 / fps as u64;
            let elapsed = clock.elapsed_ms.clone();
            let running = clock.running.clone();
            running.store(true, Ordering::SeqCst);

            clock.handle = Some(thread::spawn(move || {
                while running.load(Ordering::SeqCst) {
                    thread::sleep(Duration::from_millis(ms));
                    if running.load(Ordering::SeqCst) {
                        elapsed.fetch_add(ms, Ordering::SeqCst);
                    }
                }
            }));
        }

        id
    });

    // Return unsubscribe closure
    Box::new(move || {
        CLOCKS.with(|clocks| {
            let mut clocks = clocks.borrow_mut();
            if let Some(clock) = clocks.get_mut(&fps) {
                clock.subscribers.remove(&id);

                // Stop timer if no more subscribers
                if clock.subscribers.is_empty() {
                    clock.running.store(false, Ordering::SeqCst);

                    // Fresh atomics so a later resubscribe spawns a clean
                    // timer instead of reviving the stopping one. The old
                    // thread exits on its next wakeup; not joined here to
                    // avoid blocking the UI thread.
                    clock.running = Arc::new(AtomicBool::new(false));
                    clock.elapsed_ms = Arc::new(AtomicU64::new(0));
                    clock.handle = None;
                }
            }
        });
    })
}

/// Drain accumulated timer time and tick every subscriber once.
///
/// Call this from the event loop. Does nothing when no time has elapsed,
/// so calling it more often than the FPS is harmless.
///
/// The subscriber list is snapshotted before invoking, so callbacks may
/// unsubscribe themselves (or others) mid-tick.
pub fn pump(fps: u8) {
    let (dt_ms, callbacks) = CLOCKS.with(|clocks| {
        let clocks = clocks.borrow();
        match clocks.get(&fps) {
            Some(clock) => (
                clock.elapsed_ms.swap(0, Ordering::SeqCst),
                clock.subscribers.values().cloned().collect::<Vec<_>>(),
            ),
            None => (0, Vec::new()),
        }
    });

    if dt_ms == 0 {
        return;
    }

    let dt = dt_ms as f64 / 1000.0;
    for callback in callbacks {
        callback(dt);
    }
}

/// Tick every subscriber at `fps` with an explicit `dt` in seconds.
///
/// Bypasses the timer entirely - this is how tests and headless callers
/// drive animation deterministically.
pub fn advance(fps: u8, dt: f64) {
    let callbacks = CLOCKS.with(|clocks| {
        let clocks = clocks.borrow();
        clocks
            .get(&fps)
            .map(|clock| clock.subscribers.values().cloned().collect::<Vec<_>>())
            .unwrap_or_default()
    });

    for callback in callbacks {
        callback(dt);
    }
}

/// Number of subscribers at the given FPS (0 if no clock).
pub fn subscriber_count(fps: u8) -> usize {
    CLOCKS.with(|clocks| {
        let clocks = clocks.borrow();
        clocks.get(&fps).map(|c| c.subscribers.len()).unwrap_or(0)
    })
}

/// Check if a timer thread is currently running for the given FPS.
pub fn is_clock_running(fps: u8) -> bool {
    CLOCKS.with(|clocks| {
        let clocks = clocks.borrow();
        clocks
            .get(&fps)
            .map(|c| c.running.load(Ordering::SeqCst) && !c.subscribers.is_empty())
            .unwrap_or(false)
    })
}

/// Reset all frame clocks (for testing).
///
/// Stops all timers and clears all registries.
pub fn reset_tickers() {
    CLOCKS.with(|clocks| {
        let mut clocks = clocks.borrow_mut();

        for clock in clocks.values_mut() {
            clock.running.store(false, Ordering::SeqCst);
            clock.elapsed_ms.store(0, Ordering::SeqCst);
            clock.subscribers.clear();
        }

        clocks.clear();
    });
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn setup() {
        reset_tickers();
    }

    #[test]
    fn test_subscribe_returns_unsubscribe() {
        setup();

        let unsubscribe = subscribe_to_frames(30, Rc::new(|_| {}));
        assert_eq!(subscriber_count(30), 1);

        unsubscribe();
        assert_eq!(subscriber_count(30), 0);
    }

    #[test]
    fn test_shared_clock_same_fps() {
        setup();

        let unsub1 = subscribe_to_frames(30, Rc::new(|_| {}));
        let unsub2 = subscribe_to_frames(30, Rc::new(|_| {}));

        assert_eq!(subscriber_count(30), 2);

        // Only one clock should exist
        let clock_count = CLOCKS.with(|c| c.borrow().len());
        assert_eq!(clock_count, 1);

        unsub1();
        assert_eq!(subscriber_count(30), 1);
        assert!(is_clock_running(30));

        unsub2();
        assert_eq!(subscriber_count(30), 0);
        assert!(!is_clock_running(30));
    }

    #[test]
    fn test_different_fps_separate_clocks() {
        setup();

        let _unsub1 = subscribe_to_frames(30, Rc::new(|_| {}));
        let _unsub2 = subscribe_to_frames(60, Rc::new(|_| {}));

        let clock_count = CLOCKS.with(|c| c.borrow().len());
        assert_eq!(clock_count, 2);

        assert_eq!(subscriber_count(30), 1);
        assert_eq!(subscriber_count(60), 1);
    }

    #[test]
    fn test_advance_invokes_with_dt() {
        setup();

        let total = Rc::new(Cell::new(0.0));
        let total_for_cb = total.clone();
        let _unsub = subscribe_to_frames(30, Rc::new(move |dt| {
            total_for_cb.set(total_for_cb.get() + dt);
        }));

        advance(30, 0.5);
        advance(30, 0.25);
        assert!((total.get() - 0.75).abs() < 1e-9);
    }

    #[test]
    fn test_advance_unknown_fps_noop() {
        setup();
        // No clock registered - must not panic.
        advance(42, 1.0);
    }

    #[test]
    fn test_pump_without_elapsed_time_skips() {
        setup();

        let ticks = Rc::new(Cell::new(0u32));
        let ticks_for_cb = ticks.clone();
        let _unsub = subscribe_to_frames(30, Rc::new(move |_| {
            ticks_for_cb.set(ticks_for_cb.get() + 1);
        }));

        // Timer thread has almost certainly not fired yet; either way the
        // atomic was just created at zero before any sleep completes.
        pump(30);
        pump(30);
        assert!(ticks.get() <= 1);
    }

    #[test]
    fn test_pump_drains_timer() {
        setup();

        let ticks = Rc::new(Cell::new(0u32));
        let ticks_for_cb = ticks.clone();
        // 50 FPS = 20ms interval, fast enough for a test.
        let _unsub = subscribe_to_frames(50, Rc::new(move |dt| {
            assert!(dt > 0.0);
            ticks_for_cb.set(ticks_for_cb.get() + 1);
        }));

        std::thread::sleep(Duration::from_millis(80));
        pump(50);
        assert!(ticks.get() >= 1);
    }

    #[test]
    fn test_unsubscribe_during_tick() {
        setup();

        // A subscriber that removes itself on its first tick.
        let slot: Rc<RefCell<Option<Box<dyn FnOnce()>>>> = Rc::new(RefCell::new(None));
        let slot_for_cb = slot.clone();
        let ticks = Rc::new(Cell::new(0u32));
        let ticks_for_cb = ticks.clone();

        let unsub = subscribe_to_frames(30, Rc::new(move |_| {
            ticks_for_cb.set(ticks_for_cb.get() + 1);
            if let Some(unsub) = slot_for_cb.borrow_mut().take() {
                unsub();
            }
        }));
        *slot.borrow_mut() = Some(unsub);

        advance(30, 0.1);
        assert_eq!(ticks.get(), 1);
        assert_eq!(subscriber_count(30), 0);

        // No further ticks after self-removal.
        advance(30, 0.1);
        assert_eq!(ticks.get(), 1);
    }

    #[test]
    fn test_zero_fps_noop() {
        setup();

        let unsub = subscribe_to_frames(0, Rc::new(|_| {}));

        let clock_count = CLOCKS.with(|c| c.borrow().len());
        assert_eq!(clock_count, 0);

        // Calling unsubscribe should be safe
        unsub();
    }

    #[test]
    fn test_resubscribe_restarts_clock() {
        setup();

        let unsub1 = subscribe_to_frames(30, Rc::new(|_| {}));
        assert!(is_clock_running(30));

        unsub1();
        assert!(!is_clock_running(30));

        let _unsub2 = subscribe_to_frames(30, Rc::new(|_| {}));
        assert!(is_clock_running(30));
    }
}
