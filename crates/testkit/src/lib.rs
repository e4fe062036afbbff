#![warn(missing_docs)]
//! Test helpers for deterministic randomness: draw traces and JSON goldens.

mod snapshot;
mod trace;

pub use snapshot::*;
pub use trace::*;
