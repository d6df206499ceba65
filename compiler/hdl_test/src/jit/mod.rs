//! Differential execution against the JIT.
//!
//! [`JitComparator`] re-runs every function the interpreter evaluates
//! through a compiled artifact and fails the evaluation when the two
//! disagree. Artifacts are compiled once per mangled name and kept in a
//! [`JitCache`] for the comparator's lifetime.

mod cache;
mod comparator;

pub use cache::JitCache;
pub use comparator::{ComparatorHook, JitComparator};

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
