//! The draw interface shared by every generator.

use crate::error::Result;

/// A source of pseudo-random draws with the `java.util.Random` method set.
///
/// The sampling helpers in [`crate::sampling`] are generic over this trait, so
/// deterministic ([`crate::JavaRandom`]) and ambient ([`crate::AmbientRandom`])
/// sources can be swapped without touching call sites.
pub trait RandomSource {
    /// Uniform boolean.
    fn next_boolean(&mut self) -> bool;

    /// Fill `buf` with random bytes.
    fn next_bytes(&mut self, buf: &mut [u8]);

    /// Uniform `f64` in `[0, 1)`.
    fn next_double(&mut self) -> f64;

    /// Uniform `f32` in `[0, 1)`.
    fn next_float(&mut self) -> f32;

    /// Normally distributed `f64` with mean 0 and standard deviation 1.
    fn next_gaussian(&mut self) -> f64;

    /// Uniform `i32` over the full range.
    fn next_int(&mut self) -> i32;

    /// Uniform `i32` in `[0, bound)`.
    ///
    /// Fails with [`crate::RandomError::InvalidArgument`] when `bound <= 0`.
    fn next_int_bounded(&mut self, bound: i32) -> Result<i32>;

    /// Uniform `i64` over the full range.
    fn next_long(&mut self) -> i64;

    /// Reseed the source. Sources without a seed may ignore this.
    fn set_seed(&mut self, seed: i64);
}

impl<R: RandomSource + ?Sized> RandomSource for Box<R> {
    fn next_boolean(&mut self) -> bool {
        (**self).next_boolean()
    }

    fn next_bytes(&mut self, buf: &mut [u8]) {
        (**self).next_bytes(buf)
    }

    fn next_double(&mut self) -> f64 {
        (**self).next_double()
    }

    fn next_float(&mut self) -> f32 {
        (**self).next_float()
    }

    fn next_gaussian(&mut self) -> f64 {
        (**self).next_gaussian()
    }

    fn next_int(&mut self) -> i32 {
        (**self).next_int()
    }

    fn next_int_bounded(&mut self, bound: i32) -> Result<i32> {
        (**self).next_int_bounded(bound)
    }

    fn next_long(&mut self) -> i64 {
        (**self).next_long()
    }

    fn set_seed(&mut self, seed: i64) {
        (**self).set_seed(seed)
    }
}
