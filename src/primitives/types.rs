//! Primitive types - Props and cleanup.
//!
//! Props support static values, signals, and getters for reactivity.
//! Pass the reactive source itself - extracting a value before binding
//! breaks the connection.

use std::rc::Rc;

use spark_signals::Signal;

use crate::types::{Margin, Rect};

// =============================================================================
// Cleanup Function
// =============================================================================

/// Cleanup function returned by components.
///
/// Call this to unmount the component and release resources.
pub type Cleanup = Box<dyn FnOnce()>;

// =============================================================================
// Prop Value - Reactive property wrapper
// =============================================================================

/// A property value that can be static, a signal, or a getter.
///
/// This enables reactive props while maintaining type safety. When a prop
/// is read during observer evaluation or a derived, the reactive
/// connection is preserved.
#[derive(Clone)]
pub enum PropValue<T: Clone + PartialEq + 'static> {
    /// Static value (not reactive).
    Static(T),
    /// Reactive signal (changes propagate automatically).
    Signal(Signal<T>),
    /// Getter function (called each time value is needed).
    Getter(Rc<dyn Fn() -> T>),
}

impl<T: Clone + PartialEq + 'static> PropValue<T> {
    /// Get the current value (for immediate reads).
    pub fn get(&self) -> T {
        match self {
            PropValue::Static(v) => v.clone(),
            PropValue::Signal(s) => s.get(),
            PropValue::Getter(f) => f(),
        }
    }
}

impl<T: Clone + PartialEq + Default + 'static> Default for PropValue<T> {
    fn default() -> Self {
        PropValue::Static(T::default())
    }
}

impl<T: Clone + PartialEq + 'static> From<T> for PropValue<T> {
    fn from(value: T) -> Self {
        PropValue::Static(value)
    }
}

impl<T: Clone + PartialEq + 'static> From<Signal<T>> for PropValue<T> {
    fn from(signal: Signal<T>) -> Self {
        PropValue::Signal(signal)
    }
}

// =============================================================================
// Counter Props
// =============================================================================

/// Default frame rate for counter animation.
pub const DEFAULT_COUNTER_FPS: u8 = 30;

/// Props for [`view_counter`].
///
/// [`view_counter`]: crate::primitives::view_counter
pub struct CounterProps {
    /// Final displayed value. Accepted as-is: negative values animate
    /// downward literally, they are not a validation error.
    pub value: i64,
    /// Opaque display content appended after the number ("亿+", "+", "倍").
    pub suffix: Option<String>,
    /// The region the counter occupies in the content column.
    pub region: PropValue<Rect>,
    /// Viewport inset for the visibility trigger.
    pub margin: Margin,
    /// Frame clock the animation subscribes to once triggered.
    pub fps: u8,
}

impl Default for CounterProps {
    fn default() -> Self {
        Self {
            value: 0,
            suffix: None,
            region: PropValue::Static(Rect::default()),
            margin: Margin::inset(2),
            fps: DEFAULT_COUNTER_FPS,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use spark_signals::signal;

    #[test]
    fn test_prop_value_static() {
        let prop: PropValue<u16> = 7.into();
        assert_eq!(prop.get(), 7);
    }

    #[test]
    fn test_prop_value_signal_stays_connected() {
        let row = signal(10u16);
        let prop: PropValue<u16> = row.clone().into();

        assert_eq!(prop.get(), 10);
        row.set(20);
        assert_eq!(prop.get(), 20);
    }

    #[test]
    fn test_prop_value_getter() {
        let prop: PropValue<Rect> = PropValue::Getter(Rc::new(|| Rect::row(5, 80)));
        assert_eq!(prop.get(), Rect::row(5, 80));
    }

    #[test]
    fn test_counter_props_defaults() {
        let props = CounterProps::default();
        assert_eq!(props.value, 0);
        assert!(props.suffix.is_none());
        assert_eq!(props.margin, Margin::inset(2));
        assert_eq!(props.fps, DEFAULT_COUNTER_FPS);
    }
}
