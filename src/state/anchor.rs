//! Anchor State Module - Named jump targets in the content column.
//!
//! The terminal equivalent of in-page `#anchor` navigation: sections
//! register the row they start at under a name, and navigation either
//! jumps there instantly or glides there on a critically damped spring.
//!
//! Smooth scrolls drive the clamped scroll setter once per frame, so
//! everything downstream of the offset signal (observers, progress bars)
//! sees every intermediate position.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::animation::{Spring, SpringParams, subscribe_to_frames};
use crate::state::scroll;

/// Stiffness for smooth scrolling (critically damped).
pub const SMOOTH_SCROLL_STIFFNESS: f64 = 120.0;

// =============================================================================
// Anchor Registry
// =============================================================================

thread_local! {
    /// Map anchor name to content row.
    static ANCHORS: RefCell<HashMap<String, u16>> = RefCell::new(HashMap::new());
}

/// Register a named anchor at a content row.
///
/// Returns a cleanup function that removes the registration. Registering
/// the same name again overwrites the row (last writer wins).
pub fn register_anchor(name: &str, row: u16) -> Box<dyn FnOnce()> {
    let name_owned = name.to_string();
    ANCHORS.with(|anchors| {
        anchors.borrow_mut().insert(name_owned.clone(), row);
    });

    Box::new(move || {
        ANCHORS.with(|anchors| {
            anchors.borrow_mut().remove(&name_owned);
        });
    })
}

/// Look up the row of a named anchor.
pub fn anchor_row(name: &str) -> Option<u16> {
    ANCHORS.with(|anchors| anchors.borrow().get(name).copied())
}

/// Number of registered anchors.
pub fn anchor_count() -> usize {
    ANCHORS.with(|anchors| anchors.borrow().len())
}

/// Reset the anchor registry (for testing).
pub fn reset_anchors() {
    ANCHORS.with(|anchors| anchors.borrow_mut().clear());
}

// =============================================================================
// Navigation
// =============================================================================

/// Jump to an anchor instantly (clamped).
///
/// Returns `false` for an unknown anchor.
pub fn scroll_to_anchor(name: &str) -> bool {
    match anchor_row(name) {
        Some(row) => {
            scroll::set_scroll_offset(row);
            true
        }
        None => false,
    }
}

/// Handle for an in-flight smooth scroll.
///
/// Dropping the handle lets the glide finish on its own; [`cancel`] stops
/// it at the current offset.
///
/// [`cancel`]: ScrollAnimation::cancel
pub struct ScrollAnimation {
    unsubscribe: Rc<RefCell<Option<Box<dyn FnOnce()>>>>,
}

impl ScrollAnimation {
    /// True while the glide is still ticking.
    pub fn is_running(&self) -> bool {
        self.unsubscribe.borrow().is_some()
    }

    /// Stop the glide at the current offset.
    pub fn cancel(self) {
        if let Some(unsubscribe) = self.unsubscribe.borrow_mut().take() {
            unsubscribe();
        }
    }
}

/// Glide to an anchor on a critically damped spring.
///
/// Returns `None` for an unknown anchor. The animation subscribes to the
/// frame clock at `fps` and unsubscribes itself on settle; an anchor that
/// is already at the current offset returns an already-finished handle.
pub fn smooth_scroll_to_anchor(name: &str, fps: u8) -> Option<ScrollAnimation> {
    let row = anchor_row(name)?;
    let target = row.min(scroll::max_scroll()) as f64;

    let mut spring = Spring::at_rest(
        scroll::scroll_offset() as f64,
        SpringParams::with_damping_ratio(SMOOTH_SCROLL_STIFFNESS, 1.0),
    );
    spring.set_target(target);

    let unsubscribe: Rc<RefCell<Option<Box<dyn FnOnce()>>>> = Rc::new(RefCell::new(None));
    if spring.is_settled() {
        return Some(ScrollAnimation { unsubscribe });
    }

    let spring = Rc::new(RefCell::new(spring));
    let unsubscribe_for_tick = unsubscribe.clone();
    let tick = Rc::new(move |dt: f64| {
        let settled = {
            let mut spring = spring.borrow_mut();
            let settled = spring.step(dt);
            scroll::set_scroll_offset(spring.position.round() as u16);
            settled
        };
        if settled {
            if let Some(unsubscribe) = unsubscribe_for_tick.borrow_mut().take() {
                unsubscribe();
            }
        }
    });

    *unsubscribe.borrow_mut() = Some(subscribe_to_frames(fps, tick));
    Some(ScrollAnimation { unsubscribe })
}

// =============================================================================
// TESTS
// =============================================================================
