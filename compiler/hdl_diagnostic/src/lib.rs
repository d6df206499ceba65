//! Source-located errors and their terminal rendering.
//!
//! Frontend and test failures that carry a span are reported as
//! [`PositionalError`]s; everything else is an internal error and never
//! reaches this crate.

pub mod emitter;
mod positional;
pub mod span_utils;

pub use emitter::{ColorMode, TerminalEmitter};
pub use positional::{ErrorKind, PositionalError};
