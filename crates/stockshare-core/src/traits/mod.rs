//! Seams the rest of the workspace injects implementations through.

pub mod time_source;

pub use time_source::{ManualTimeSource, SystemTimeSource, TimeSource};
