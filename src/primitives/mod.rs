//! Primitives - Component building blocks.
//!
//! - [`view_counter`] - integer that counts up when scrolled into view
//!
//! # Architecture
//!
//! A component is created from a props struct, binds its reactive inputs
//! (observer region, frame clock), and hands back a handle that owns every
//! registration. Dropping the handle unmounts the component.
//!
//! # Reactivity
//!
//! Props can be static values, signals, or getters. The key is to pass
//! props directly - don't extract values before binding!
//!
//! ```ignore
//! // CORRECT - signal stays connected
//! view_counter(CounterProps { region: region_signal.into(), ..Default::default() });
//!
//! // WRONG - extracts value, breaks reactivity
//! view_counter(CounterProps { region: region_signal.get().into(), ..Default::default() });
//! ```

mod counter;
mod types;

pub use counter::{CounterHandle, Phase, view_counter};
pub use types::{Cleanup, CounterProps, DEFAULT_COUNTER_FPS, PropValue};
