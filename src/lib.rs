//! # inview-tui
//!
//! Viewport visibility tracking and spring-animated values for reactive
//! terminal UIs.
//!
//! Built on [spark-signals](https://github.com/RLabs-Inc/spark-signals) for
//! fine-grained reactivity.
//!
//! ## Architecture
//!
//! Content is a vertical column of rows; the terminal window is a viewport
//! scrolled over it. Scroll offset, viewport size, and content height are
//! signals, and everything that reacts to scrolling is derived from them:
//!
//! ```text
//! scroll/resize signals → observer effect → one-shot triggers → spring ticks → display signals
//! ```
//!
//! The flagship primitive is [`view_counter`]: a number that stays at 0
//! until its row first scrolls into view, then counts up on a damped
//! spring and parks exactly at its target, never re-triggering.
//!
//! ## Modules
//!
//! - [`types`] - Core geometry (Rect, Margin, Edges)
//! - [`animation`] - Damped springs and shared frame clocks
//! - [`viewport`] - Viewport signals and one-shot visibility observers
//! - [`state`] - Scroll state, progress, anchors and smooth navigation
//! - [`primitives`] - Components built from the above

pub mod animation;
pub mod primitives;
pub mod state;
pub mod types;
pub mod viewport;

// Re-export commonly used items
pub use types::{Edges, Margin, Rect};

pub use animation::{
    Spring, SpringParams, advance, is_clock_running, pump, reset_tickers, subscribe_to_frames,
    subscriber_count,
};

pub use viewport::{
    Intersection, ObserveOptions, ObserverHandle, detect_viewport, is_viewport_supported,
    observe, set_viewport_size, start_observers, viewport_height, viewport_width,
};

pub use state::{
    // Scroll
    LINE_SCROLL, PAGE_SCROLL_FACTOR, WHEEL_SCROLL, content_height, create_progress_derived,
    is_scrollable, max_scroll, page_down, page_up, progress, scroll_by, scroll_offset,
    scroll_offset_signal, scroll_to_bottom, scroll_to_top, set_content_height,
    set_scroll_offset, visible_viewport,
    // Anchors
    ScrollAnimation, anchor_row, register_anchor, scroll_to_anchor, smooth_scroll_to_anchor,
};

pub use primitives::{
    Cleanup, CounterHandle, CounterProps, DEFAULT_COUNTER_FPS, Phase, PropValue, view_counter,
};
