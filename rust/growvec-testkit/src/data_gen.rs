//! Seeded data generation for tests.
//!
//! All generators take an explicit seed so that a failing randomized test can
//! be replayed exactly.

/// A single mutation applied to a container under test.
#[derive(Debug, Clone, PartialEq)]
pub enum Op<T> {
    Push(T),
    PopBack,
    TakeBack,
    Set(usize, T),
    Reserve(usize),
    ShrinkToFit,
    Clear,
}

/// Generates `len` values in `-1000..1000`.
pub fn random_values(seed: u64, len: usize) -> Vec<i64> {
    let mut rng = fastrand::Rng::with_seed(seed);
    (0..len).map(|_| rng.i64(-1000..1000)).collect()
}

/// Generates `len` lowercase strings of up to `max_len` characters.
pub fn random_strings(seed: u64, len: usize, max_len: usize) -> Vec<String> {
    let mut rng = fastrand::Rng::with_seed(seed);
    (0..len)
        .map(|_| {
            let n = rng.usize(0..=max_len);
            (0..n).map(|_| rng.lowercase()).collect()
        })
        .collect()
}

/// Generates a stream of `count` operations, biased towards appends so that
/// containers keep growing through several reallocations.
///
/// `Set` indices are arbitrary and may be out of range; the consumer decides
/// how to treat them.
pub fn random_ops(seed: u64, count: usize) -> Vec<Op<i64>> {
    let mut rng = fastrand::Rng::with_seed(seed);
    (0..count)
        .map(|_| match rng.u8(0..20) {
            0..=9 => Op::Push(rng.i64(..)),
            10..=11 => Op::PopBack,
            12 => Op::TakeBack,
            13..=15 => Op::Set(rng.usize(0..64), rng.i64(..)),
            16 => Op::Reserve(rng.usize(0..128)),
            17..=18 => Op::ShrinkToFit,
            19 => Op::Clear,
            _ => unreachable!(),
        })
        .collect()
}
