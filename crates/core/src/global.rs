//! Process-wide default generator.
//!
//! Convenience call sites can borrow a shared source instead of threading one
//! through every call. The handle is created lazily on first use and can be
//! replaced or reset at any time. Code that needs reproducible output should
//! own its [`JavaRandom`] instead.

use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::debug;

use crate::java_random::JavaRandom;
use crate::source::RandomSource;

type SharedSource = Box<dyn RandomSource + Send>;

static GLOBAL: Mutex<Option<SharedSource>> = Mutex::new(None);

fn lock() -> MutexGuard<'static, Option<SharedSource>> {
    GLOBAL.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Borrow the global source, creating a time-seeded [`JavaRandom`] on first use.
///
/// The handle stays locked while `f` runs, so `f` must not call back into this
/// module.
pub fn with_global<F, T>(f: F) -> T
where
    F: FnOnce(&mut dyn RandomSource) -> T,
{
    let mut guard = lock();
    let source = guard.get_or_insert_with(|| {
        debug!("initialising global random source");
        Box::new(JavaRandom::from_time())
    });
    f(source.as_mut())
}

/// Replace the global source.
pub fn set_global<R>(source: R)
where
    R: RandomSource + Send + 'static,
{
    *lock() = Some(Box::new(source));
}

/// Replace the global source with a fresh [`JavaRandom`].
///
/// `None` picks a time-based seed.
pub fn reset_global(seed: Option<i64>) {
    let source = match seed {
        Some(seed) => JavaRandom::new(seed),
        None => JavaRandom::from_time(),
    };
    debug!(?seed, "resetting global random source");
    *lock() = Some(Box::new(source));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sampling::random_int;
    use crate::AmbientRandom;

    // One test drives the whole lifecycle: the handle is shared by every test thread.
    #[test]
    fn global_lifecycle() {
        with_global(|rng| rng.next_int());

        reset_global(Some(0));
        assert_eq!(with_global(|rng| rng.next_int()), -1_155_484_576);

        reset_global(Some(0));
        let roll = with_global(|rng| random_int(rng, 1, 6)).unwrap();
        assert!((1..=6).contains(&roll));

        set_global(JavaRandom::new(42));
        assert_eq!(with_global(|rng| rng.next_int()), -1_170_105_035);

        set_global(AmbientRandom::new());
        assert!((0..10).contains(&with_global(|rng| rng.next_int_bounded(10)).unwrap()));

        reset_global(None);
        with_global(|rng| rng.next_double());
    }
}
