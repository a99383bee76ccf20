//! Core types for inview-tui.
//!
//! Geometry lives in content-column cell coordinates: `x` is the column,
//! `y` the row measured from the top of the scrollable content, one cell
//! per unit. The visible viewport is just another [`Rect`] positioned at
//! the current scroll offset.

// =============================================================================
// Rect
// =============================================================================

/// Axis-aligned rectangle in cell coordinates.
///
/// Using integers for exact comparison - no floating point epsilon needed.
/// A zero width or height makes the rect empty; empty rects intersect
/// nothing, including themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Rect {
    /// Create a new rect.
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// A single full-width row at `y` - the common shape for one line of
    /// content being observed.
    pub const fn row(y: u16, width: u16) -> Self {
        Self {
            x: 0,
            y,
            width,
            height: 1,
        }
    }

    /// One-past-the-end column.
    pub const fn right(&self) -> u16 {
        self.x.saturating_add(self.width)
    }

    /// One-past-the-end row.
    pub const fn bottom(&self) -> u16 {
        self.y.saturating_add(self.height)
    }

    /// True when the rect covers no cells.
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// True when `self` and `other` overlap in at least one cell.
    pub fn intersects(&self, other: &Rect) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// Overlapping region of `self` and `other`, if any.
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        if !self.intersects(other) {
            return None;
        }
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        Some(Rect::new(x, y, right - x, bottom - y))
    }

    /// Shrink (or grow, for negative margins) the rect by a [`Margin`].
    ///
    /// Saturates at the coordinate origin and never inverts: an inset
    /// larger than the rect collapses it to an empty rect.
    pub fn inset(&self, margin: Margin) -> Rect {
        let x0 = (self.x as i32 + margin.left as i32).max(0);
        let y0 = (self.y as i32 + margin.top as i32).max(0);
        let x1 = (self.right() as i32 - margin.right as i32).max(x0);
        let y1 = (self.bottom() as i32 - margin.bottom as i32).max(y0);
        Rect::new(
            x0 as u16,
            y0 as u16,
            (x1 - x0) as u16,
            (y1 - y0) as u16,
        )
    }

    /// Which sides of `self` extend past `bounds`.
    ///
    /// Empty for a rect fully inside the bounds. A rect can be clipped on
    /// opposite sides at once when it is larger than the bounds.
    pub fn clipped_by(&self, bounds: &Rect) -> Edges {
        let mut edges = Edges::empty();
        if self.y < bounds.y {
            edges |= Edges::TOP;
        }
        if self.bottom() > bounds.bottom() {
            edges |= Edges::BOTTOM;
        }
        if self.x < bounds.x {
            edges |= Edges::LEFT;
        }
        if self.right() > bounds.right() {
            edges |= Edges::RIGHT;
        }
        edges
    }
}

// =============================================================================
// Margin
// =============================================================================

/// Signed per-side inset applied to the viewport before intersection tests.
///
/// Positive values shrink the effective viewport, so an observed region must
/// be that much further inside the window before it counts as visible.
/// Negative values grow it, triggering before the region actually enters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Margin {
    pub top: i16,
    pub right: i16,
    pub bottom: i16,
    pub left: i16,
}

impl Margin {
    /// No inset: the literal viewport edge triggers.
    pub const NONE: Self = Self {
        top: 0,
        right: 0,
        bottom: 0,
        left: 0,
    };

    /// Uniform inset on all four sides.
    pub const fn inset(n: i16) -> Self {
        Self {
            top: n,
            right: n,
            bottom: n,
            left: n,
        }
    }
}

// =============================================================================
// Edges (bitflags)
// =============================================================================

bitflags::bitflags! {
    /// Sides of the effective viewport that clip an observed region.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Edges: u8 {
        const TOP    = 1 << 0;
        const BOTTOM = 1 << 1;
        const LEFT   = 1 << 2;
        const RIGHT  = 1 << 3;
    }
}

// =============================================================================
// Tests
// =============================================================================
