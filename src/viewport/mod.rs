//! Viewport Module - Window geometry and visibility observation.
//!
//! - **Terminal** - viewport size as signals, detection, degrade path
//! - **Observer** - one-shot intersection observers over the content column
//!
//! The contract mirrors the browser's IntersectionObserver shape without
//! polling: one reactive effect re-evaluates registered observers whenever
//! scroll offset, viewport size, or the observer set changes.

pub mod observer;
pub mod terminal;

pub use observer::{
    Intersection, ObserveOptions, ObserverCallback, ObserverHandle, evaluate_all, observe,
    observer_count, reset_observers, start as start_observers,
};
pub use terminal::{
    DEFAULT_VIEWPORT_HEIGHT, DEFAULT_VIEWPORT_WIDTH, detect_viewport, is_viewport_supported,
    reset_viewport_state, set_viewport_size, viewport_height, viewport_height_signal,
    viewport_width, viewport_width_signal,
};
