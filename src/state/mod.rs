//! State Module - Runtime state for the content column.
//!
//! - **Scroll** - offset, clamping, paging, scroll-linked progress
//! - **Anchor** - named jump targets, instant and spring-smooth navigation

pub mod anchor;
pub mod scroll;

pub use anchor::{
    SMOOTH_SCROLL_STIFFNESS, ScrollAnimation, anchor_count, anchor_row, register_anchor,
    reset_anchors, scroll_to_anchor, smooth_scroll_to_anchor,
};
pub use scroll::{
    LINE_SCROLL, PAGE_SCROLL_FACTOR, WHEEL_SCROLL, content_height, create_progress_derived,
    is_scrollable, max_scroll, page_down, page_up, progress, reset_scroll_state, scroll_by,
    scroll_offset, scroll_offset_signal, scroll_to_bottom, scroll_to_top, set_content_height,
    set_scroll_offset, visible_viewport,
};
