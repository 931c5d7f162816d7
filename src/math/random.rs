//! Uniform sampling helpers shared by shape synthesis and run scheduling
//!
//! All helpers draw a single `f64` in `[0, 1)` from the generator and map it,
//! so a seeded generator replays the exact same sequence of choices.

use rand::Rng;

/// Uniform sample in `[0, 1)`
pub fn random_unit<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    rng.random::<f64>()
}

/// Inclusive random integer: `floor(min + random() * (max + 1 - min))`
///
/// Both bounds are reachable for integer arguments. Fractional bounds are
/// accepted and follow the same formula, so the result may land one below a
/// fractional `min`.
pub fn random_int<R: Rng + ?Sized>(rng: &mut R, min: f64, max: f64) -> i64 {
    random_unit(rng).mul_add(max + 1.0 - min, min).floor() as i64
}

/// Uniform sample in `[min, max)`
pub fn random_between<R: Rng + ?Sized>(rng: &mut R, min: f64, max: f64) -> f64 {
    random_unit(rng).mul_add(max - min, min)
}

/// Uniform index into a collection of `len` items, `None` when empty
pub fn random_index<R: Rng + ?Sized>(rng: &mut R, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let index = (random_unit(rng) * len as f64).floor() as usize;
    Some(index.min(len - 1))
}
