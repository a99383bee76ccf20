//! Terminal Viewport - Window geometry as reactive signals.
//!
//! The terminal window is the viewport: `width` columns by `height` rows.
//! Both dimensions are signals, so deriveds and effects that read them
//! re-run on resize.
//!
//! Detection goes through crossterm. When the environment cannot report a
//! size (headless, non-interactive output), the viewport capability is
//! marked unsupported and visibility observers stay dormant forever - the
//! mandated degrade path. Never fatal: one decorative animation must not
//! take the rest of the program down.

use std::cell::Cell;
use std::io;

use spark_signals::{Signal, signal};

/// Fallback size reported before any detection has run.
pub const DEFAULT_VIEWPORT_WIDTH: u16 = 80;
pub const DEFAULT_VIEWPORT_HEIGHT: u16 = 24;

// =============================================================================
// Viewport State
// =============================================================================

thread_local! {
    /// Viewport width in columns.
    static VIEWPORT_WIDTH: Signal<u16> = signal(DEFAULT_VIEWPORT_WIDTH);

    /// Viewport height in rows.
    static VIEWPORT_HEIGHT: Signal<u16> = signal(DEFAULT_VIEWPORT_HEIGHT);

    /// Whether a real viewport has been established (detected or injected).
    /// False means observers never evaluate.
    static SUPPORTED: Cell<bool> = const { Cell::new(false) };
}

// =============================================================================
// PUBLIC API
// =============================================================================

/// Detect the terminal size and establish the viewport.
///
/// On success the size signals are updated and the viewport capability is
/// marked supported. On failure the capability is marked unsupported, the
/// condition is logged at debug level, and the error is returned for
/// callers that want to surface it - but ignoring it is a valid choice:
/// everything downstream degrades to dormant instead of failing.
pub fn detect_viewport() -> io::Result<(u16, u16)> {
    match crossterm::terminal::size() {
        Ok((width, height)) => {
            set_viewport_size(width, height);
            Ok((width, height))
        }
        Err(err) => {
            SUPPORTED.with(|s| s.set(false));
            log::debug!("viewport size detection unavailable ({err}); observers stay dormant");
            Err(err)
        }
    }
}

/// Set the viewport size directly (resize events, tests).
///
/// Also marks the viewport capability supported: an explicitly injected
/// size is as good as a detected one.
pub fn set_viewport_size(width: u16, height: u16) {
    VIEWPORT_WIDTH.with(|w| {
        if w.get() != width {
            w.set(width);
        }
    });
    VIEWPORT_HEIGHT.with(|h| {
        if h.get() != height {
            h.set(height);
        }
    });
    SUPPORTED.with(|s| s.set(true));
}

/// Current viewport width in columns.
///
/// Note: This creates a reactive dependency when called from a derived/effect.
pub fn viewport_width() -> u16 {
    VIEWPORT_WIDTH.with(|w| w.get())
}

/// Current viewport height in rows.
///
/// Note: This creates a reactive dependency when called from a derived/effect.
pub fn viewport_height() -> u16 {
    VIEWPORT_HEIGHT.with(|h| h.get())
}

/// The width signal, for reactive composition.
pub fn viewport_width_signal() -> Signal<u16> {
    VIEWPORT_WIDTH.with(|w| w.clone())
}

/// The height signal, for reactive composition.
pub fn viewport_height_signal() -> Signal<u16> {
    VIEWPORT_HEIGHT.with(|h| h.clone())
}

/// True once a viewport has been detected or injected.
pub fn is_viewport_supported() -> bool {
    SUPPORTED.with(|s| s.get())
}

/// Reset viewport state to defaults (for testing).
pub fn reset_viewport_state() {
    VIEWPORT_WIDTH.with(|w| w.set(DEFAULT_VIEWPORT_WIDTH));
    VIEWPORT_HEIGHT.with(|h| h.set(DEFAULT_VIEWPORT_HEIGHT));
    SUPPORTED.with(|s| s.set(false));
}

// =============================================================================
// TESTS
// =============================================================================
