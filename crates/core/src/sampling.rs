//! Sampling helpers built on any [`RandomSource`].
//!
//! Every helper takes the generator explicitly; nothing here touches the
//! global handle. Empty inputs yield `None` or an empty `Vec`, while invalid
//! ranges are reported as [`RandomError::InvalidArgument`].

use crate::error::{RandomError, Result};
use crate::source::RandomSource;

/// Uniform integer in `[min, max]`, inclusive on both ends.
pub fn random_int<R>(rng: &mut R, min: i32, max: i32) -> Result<i32>
where
    R: RandomSource + ?Sized,
{
    if max < min {
        return Err(RandomError::invalid(format!(
            "max ({max}) must not be less than min ({min})"
        )));
    }
    let span = i64::from(max) - i64::from(min) + 1;
    let bound = i32::try_from(span).map_err(|_| {
        RandomError::invalid(format!("range [{min}, {max}] spans more than i32::MAX values"))
    })?;
    Ok(min + rng.next_int_bounded(bound)?)
}

/// Uniform double in `[min, max)`.
pub fn random_double<R>(rng: &mut R, min: f64, max: f64) -> Result<f64>
where
    R: RandomSource + ?Sized,
{
    if max < min {
        return Err(RandomError::invalid(format!(
            "max ({max}) must not be less than min ({min})"
        )));
    }
    Ok(min + rng.next_double() * (max - min))
}

/// `true` with the given probability.
///
/// A probability of `0` never succeeds and `1` always does; values outside
/// `[0, 1]` saturate the same way.
pub fn random_chance<R>(rng: &mut R, probability: f64) -> bool
where
    R: RandomSource + ?Sized,
{
    rng.next_double() < probability
}

/// A uniformly chosen element, or `None` for an empty slice.
pub fn random_element<'a, R, T>(rng: &mut R, items: &'a [T]) -> Option<&'a T>
where
    R: RandomSource + ?Sized,
{
    let index = draw_index(rng, items.len())?;
    items.get(index)
}

/// Up to `count` distinct elements, in draw order.
///
/// Each draw picks a uniform index into the remaining pool and removes it, so
/// no source element is returned twice. Asking for at least `items.len()`
/// elements returns all of them.
pub fn random_elements<R, T>(rng: &mut R, items: &[T], count: usize) -> Vec<T>
where
    R: RandomSource + ?Sized,
    T: Clone,
{
    let mut pool = items.to_vec();
    let take = count.min(pool.len());
    let mut picked = Vec::with_capacity(take);
    while picked.len() < take {
        let Some(index) = draw_index(rng, pool.len()) else {
            break;
        };
        picked.push(pool.remove(index));
    }
    picked
}

/// Fisher–Yates shuffle in place.
pub fn shuffle<R, T>(rng: &mut R, items: &mut [T])
where
    R: RandomSource + ?Sized,
{
    for i in (1..items.len()).rev() {
        if let Some(j) = draw_index(rng, i + 1) {
            items.swap(i, j);
        }
    }
}

/// Pick an item with probability proportional to its weight.
///
/// Zero or negative weights make an item unreachable; supplying sensible
/// weights is the caller's job. Rounding that leaves the roll above the
/// cumulative sum falls back to the last item.
pub fn random_weighted<'a, R, T>(rng: &mut R, items: &'a [(T, f64)]) -> Option<&'a T>
where
    R: RandomSource + ?Sized,
{
    let (last, _) = items.last()?;
    let total: f64 = items.iter().map(|(_, weight)| weight).sum();
    let mut roll = rng.next_double() * total;
    for (item, weight) in items {
        roll -= weight;
        if roll <= 0.0 {
            return Some(item);
        }
    }
    Some(last)
}

/// Uniform index into a collection of `len` elements; `None` when empty.
fn draw_index<R>(rng: &mut R, len: usize) -> Option<usize>
where
    R: RandomSource + ?Sized,
{
    let bound = i32::try_from(len).ok().filter(|bound| *bound > 0)?;
    rng.next_int_bounded(bound).ok().map(|index| index as usize)
}
