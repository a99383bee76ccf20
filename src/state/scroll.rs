//! Scroll State Module - The content column and its window.
//!
//! Manages scrolling over a single vertical column of content rows:
//! - Scroll offset (user state, clamped to valid range)
//! - Content height (set by whoever composes the page)
//! - Scroll operations: lines, pages, jumps
//! - Scroll-linked progress for indicator bars
//!
//! Offset and content height are signals, so the visibility observers and
//! any progress indicator re-evaluate automatically on every scroll.

use spark_signals::{Derived, Signal, derived, signal};

use crate::types::Rect;
use crate::viewport::terminal;

// =============================================================================
// SCROLL CONSTANTS
// =============================================================================

/// Default scroll amount for arrow keys (lines).
pub const LINE_SCROLL: u16 = 1;

/// Default scroll amount for mouse wheel.
pub const WHEEL_SCROLL: u16 = 3;

/// Default scroll amount for Page Up/Down (90% of viewport).
pub const PAGE_SCROLL_FACTOR: f32 = 0.9;

// =============================================================================
// SCROLL STATE
// =============================================================================

thread_local! {
    /// Vertical scroll offset: the content row at the top of the viewport.
    static SCROLL_OFFSET: Signal<u16> = signal(0);

    /// Total content height in rows.
    static CONTENT_HEIGHT: Signal<u16> = signal(0);
}

// =============================================================================
// SCROLL STATE ACCESS
// =============================================================================

/// Current scroll offset.
///
/// Note: This creates a reactive dependency when called from a derived/effect.
pub fn scroll_offset() -> u16 {
    SCROLL_OFFSET.with(|s| s.get())
}

/// The scroll offset signal, for reactive composition.
pub fn scroll_offset_signal() -> Signal<u16> {
    SCROLL_OFFSET.with(|s| s.clone())
}

/// Total content height in rows.
pub fn content_height() -> u16 {
    CONTENT_HEIGHT.with(|c| c.get())
}

/// Set the total content height (page composition calls this once the
/// content column is built, and again whenever it changes).
pub fn set_content_height(height: u16) {
    CONTENT_HEIGHT.with(|c| {
        if c.get() != height {
            c.set(height);
        }
    });
    // Content may have shrunk above the current offset.
    let offset = scroll_offset();
    let max = max_scroll();
    if offset > max {
        SCROLL_OFFSET.with(|s| s.set(max));
    }
}

/// Maximum valid scroll offset (0 when the content fits the viewport).
pub fn max_scroll() -> u16 {
    content_height().saturating_sub(terminal::viewport_height())
}

/// True when there is anything to scroll.
pub fn is_scrollable() -> bool {
    max_scroll() > 0
}

/// The currently visible window into the content column.
pub fn visible_viewport() -> Rect {
    Rect::new(
        0,
        scroll_offset(),
        terminal::viewport_width(),
        terminal::viewport_height(),
    )
}

// =============================================================================
// SCROLL OPERATIONS
// =============================================================================

/// Set the scroll offset (clamped to valid range).
pub fn set_scroll_offset(y: u16) {
    let clamped = y.min(max_scroll());
    SCROLL_OFFSET.with(|s| {
        if s.get() != clamped {
            s.set(clamped);
        }
    });
}

/// Scroll by a delta amount.
///
/// Returns `true` if scrolling occurred, `false` if already at boundary.
pub fn scroll_by(delta: i32) -> bool {
    let current = scroll_offset();
    let max = max_scroll();

    let new = ((current as i32) + delta).clamp(0, max as i32) as u16;
    if new == current {
        return false; // Already at boundary
    }

    SCROLL_OFFSET.with(|s| s.set(new));
    true
}

/// Scroll down by ~90% of the viewport.
pub fn page_down() -> bool {
    let page = (terminal::viewport_height() as f32 * PAGE_SCROLL_FACTOR) as i32;
    scroll_by(page.max(1))
}

/// Scroll up by ~90% of the viewport.
pub fn page_up() -> bool {
    let page = (terminal::viewport_height() as f32 * PAGE_SCROLL_FACTOR) as i32;
    scroll_by(-page.max(1))
}

/// Jump to the top of the content.
pub fn scroll_to_top() {
    set_scroll_offset(0);
}

/// Jump to the bottom of the content.
pub fn scroll_to_bottom() {
    set_scroll_offset(max_scroll());
}

// =============================================================================
// SCROLL PROGRESS
// =============================================================================

/// Scroll-linked progress in `0.0..=1.0`.
///
/// 0.0 at the top, 1.0 with the last content row visible. Defined as 0.0
/// when the content fits the viewport - a progress bar starts empty.
pub fn progress() -> f64 {
    let max = max_scroll();
    if max == 0 {
        return 0.0;
    }
    scroll_offset() as f64 / max as f64
}

/// Create a derived tracking scroll progress.
///
/// Re-evaluates whenever the offset, content height, or viewport changes.
pub fn create_progress_derived() -> Derived<f64> {
    let offset = scroll_offset_signal();
    let content = CONTENT_HEIGHT.with(|c| c.clone());
    let height = terminal::viewport_height_signal();

    derived(move || {
        let max = content.get().saturating_sub(height.get());
        if max == 0 {
            return 0.0;
        }
        offset.get() as f64 / max as f64
    })
}

/// Reset scroll state (for testing).
pub fn reset_scroll_state() {
    SCROLL_OFFSET.with(|s| s.set(0));
    CONTENT_HEIGHT.with(|c| c.set(0));
}

// =============================================================================
// TESTS
// =============================================================================
