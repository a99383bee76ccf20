//! Animation Module - Spring physics and shared frame clocks.
//!
//! Two pieces that compose into every animated value in the crate:
//!
//! - **Spring** - damped harmonic integrator moving a value toward a target
//! - **Ticker** - per-FPS shared frame clocks that deliver dt to subscribers
//!
//! The ticker's timer threads never run user code; callbacks fire on the UI
//! thread from `pump()` (event loop) or `advance()` (tests, headless).

mod spring;
mod ticker;

pub use spring::{Spring, SpringParams};
pub use ticker::{
    FrameCallback, advance, is_clock_running, pump, reset_tickers, subscribe_to_frames,
    subscriber_count,
};
