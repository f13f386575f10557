//! Time subsystem.
//!
//! `Ticker` is a coalescing periodic deadline the event loop sleeps towards.
//! It takes explicit `Instant`s so tests never sleep.

mod ticker;

pub use ticker::Ticker;
