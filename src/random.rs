/// Bounded random sampling.  The only source of nondeterminism in the engine;
/// callers inject the RNG so tests can seed it.

use rand::Rng;

/// Uniform integer in `[min, max]`.  An inverted or empty range yields `min`.
pub fn sample(rng: &mut impl Rng, min: i32, max: i32) -> i32 {
    if max <= min {
        return min;
    }
    rng.gen_range(min..=max)
}

/// `true` with probability `percent`/100.  Values above 100 always hit.
pub fn chance(rng: &mut impl Rng, percent: u32) -> bool {
    rng.gen_ratio(percent.min(100), 100)
}

/// Random horizontal heading, `-1` or `+1`.
pub fn direction(rng: &mut impl Rng) -> i32 {
    if rng.gen_bool(0.5) {
        1
    } else {
        -1
    }
}

/// One random-walk step in `[-step, step]`.
pub fn jitter(rng: &mut impl Rng, step: i32) -> i32 {
    sample(rng, -step, step)
}
