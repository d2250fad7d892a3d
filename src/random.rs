use std::collections::HashMap;
use std::sync::Mutex;

use num_bigint::{BigInt, RandBigInt};
use num_traits::Zero;
use once_cell::sync::Lazy;
use rand::rngs::{OsRng, StdRng};
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Non-deterministic source of uniform big integers.
pub struct Csprng {
    generator: StdRng,
}

impl Csprng {
    pub fn new() -> Self {
        let seed = (u64::from(OsRng.next_u32()) << 32) | u64::from(OsRng.next_u32());
        Csprng {
            generator: StdRng::seed_from_u64(seed),
        }
    }

    /// Uniform integer over an n-bit domain. The top bit is not
    /// guaranteed to be set.
    pub fn get_bits(&mut self, bits: u64) -> BigInt {
        BigInt::from(self.generator.gen_biguint(bits))
    }

    /// Uniform integer in `[0, 2^bits)`.
    pub fn get_range_bits(&mut self, bits: u64) -> BigInt {
        BigInt::from(self.generator.gen_biguint(bits))
    }

    /// Uniform integer in `[0, upper_bound)`.
    pub fn get_range(&mut self, upper_bound: &BigInt) -> BigInt {
        self.generator.gen_bigint_range(&BigInt::zero(), upper_bound)
    }
}

impl Default for Csprng {
    fn default() -> Self {
        Csprng::new()
    }
}

type StreamKey = (u64, u64);

// Every stream with the same (size, seed) reads through this cache, so all
// observers of one key see byte-identical outputs. A stream's own generator
// is consumed only when it extends the cache past its current length.
static STREAM_CACHE: Lazy<Mutex<HashMap<StreamKey, Vec<BigInt>>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

/// Deterministic, seed-keyed stream of `size`-bit integers.
pub struct OracleStream {
    size: u64,
    seed: u64,
    generator: ChaCha8Rng,
    position: usize,
}

impl OracleStream {
    pub fn new(size: u64, seed: u64) -> Self {
        OracleStream {
            size,
            seed,
            generator: ChaCha8Rng::seed_from_u64(seed),
            position: 0,
        }
    }

    /// The next integer of the stream. Two streams with the same
    /// `(size, seed)` return the same sequence.
    pub fn next(&mut self) -> BigInt {
        let mut cache = STREAM_CACHE.lock().unwrap();
        let values = cache.entry((self.size, self.seed)).or_default();

        while values.len() <= self.position {
            values.push(BigInt::from(self.generator.gen_biguint(self.size)));
        }

        let value = values[self.position].clone();
        self.position += 1;
        value
    }

    /// Rewinds to position 0 without reseeding; the cache guarantees a
    /// subsequent `next` replays the value observed at position 0.
    pub fn reset(&mut self) {
        self.position = 0;
    }

    /// Clears the process-wide cache. Freshly built streams produce
    /// matching sequences again; an already-positioned stream will draw
    /// new integers from its own advanced generator instead.
    pub fn reset_cache() {
        STREAM_CACHE.lock().unwrap().clear();
    }
}
