#![warn(missing_docs)]
//! Deterministic, `java.util.Random`-compatible randomness for server tooling.
//!
//! [`JavaRandom`] reproduces the JVM generator bit for bit, [`AmbientRandom`]
//! offers the same [`RandomSource`] interface without reproducibility, and
//! [`sampling`] layers ranges, picks, shuffles and weighted choice on top.

mod ambient;
pub mod constants;
mod draw;
mod error;
pub mod global;
mod java_random;
pub mod registry;
pub mod sampling;
pub mod seed;
mod source;

pub use ambient::AmbientRandom;
pub use constants::{ConstantError, ConstantTable, JavaEnum};
pub use draw::{DrawStep, DrawValue};
pub use error::{RandomError, Result};
pub use java_random::JavaRandom;
pub use registry::{RegistryKey, RegistryKeyError};
pub use sampling::{
    random_chance, random_double, random_element, random_elements, random_int, random_weighted,
    shuffle,
};
pub use source::RandomSource;
