// Copyright 2019 Developers of the Rand project.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The caller-owned generator state and the uniform derivation layer.

use rand_core::{Error as RngError, RngCore, SeedableRng};
#[cfg(feature = "serde1")] use serde::{Deserialize, Serialize};

use crate::dist::BinomialCache;
use crate::engine::{Mt19937, N};
use crate::{entropy, Error};

/// A seeded source of uniform and non-uniform random variates.
///
/// `Generator` is the single mutable state record threaded through every
/// sampling operation: the [`Mt19937`] bit engine plus the two sampler
/// caches that some distributions maintain across calls, namely the
/// spare Gaussian deviate produced by the polar method and the
/// parameter-keyed binomial setup constants. All state is owned by the
/// caller; there is no process-wide default instance.
///
/// A `Generator` is not safe for concurrent mutation. Use one instance
/// per thread, or external mutual exclusion around a shared instance.
///
/// # Example
///
/// ```
/// use rand_mt19937::Generator;
///
/// let mut rng = Generator::new(42);
/// let lam = rng.gamma(2.0, 5.0);
/// let n = rng.poisson(lam);
/// # let _ = n;
/// ```
///
/// # Serialization
///
/// With the `serde1` feature the complete state round-trips through
/// serde, field order fixed as: engine (624-word key, then position),
/// spare Gaussian deviate, binomial cache. Deserializing a state saved
/// mid-stream and resuming reproduces the uninterrupted stream
/// bit-exactly.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
pub struct Generator {
    pub(crate) engine: Mt19937,
    pub(crate) gauss: Option<f64>,
    pub(crate) binomial: Option<BinomialCache>,
}

impl Generator {
    /// Create a generator from a 32-bit integer seed.
    ///
    /// Identical seeds reproduce identical variate streams.
    pub fn new(seed: u32) -> Generator {
        Generator {
            engine: Mt19937::new(seed),
            gauss: None,
            binomial: None,
        }
    }

    /// Create a generator seeded from the operating system.
    ///
    /// Equivalent to [`seed_from_entropy`](Generator::seed_from_entropy)
    /// with the error discarded: if no entropy device is available the
    /// generator is silently seeded from the clock instead (a warning is
    /// logged when the `log` feature is enabled).
    pub fn from_entropy() -> Generator {
        let mut rng = Generator::new(0);
        let _ = rng.seed_from_entropy();
        rng
    }

    /// Reinitialise from a 32-bit integer seed, clearing both sampler
    /// caches.
    pub fn seed(&mut self, seed: u32) {
        self.engine.seed(seed);
        self.gauss = None;
        self.binomial = None;
    }

    /// Reseed the full 624-word state from the operating system.
    ///
    /// On success every state word comes from the OS entropy source. If
    /// the source is unavailable the generator falls back to a seed
    /// derived from the wall clock and reports
    /// [`Error::NoEntropyDevice`]; it is left valid and usable either
    /// way. Both sampler caches are cleared.
    pub fn seed_from_entropy(&mut self) -> Result<(), Error> {
        let mut raw = [0u8; 4 * N];
        match entropy::device_fill(&mut raw, false) {
            Ok(()) => {
                debug!("Generator: seeded full state from OS entropy");
                self.reseed_from_raw(&raw);
                Ok(())
            }
            Err(err) => {
                warn!("Generator: entropy device unavailable, falling back to clock seed");
                self.seed(entropy::clock_seed());
                Err(err)
            }
        }
    }

    /// Reseed the full 624-word state from an injected entropy source.
    ///
    /// Behaves like [`seed_from_entropy`](Generator::seed_from_entropy)
    /// but draws the raw bytes from `device` instead of the OS. If
    /// `device` fails, the generator falls back to a clock-derived seed
    /// and reports [`Error::NoEntropyDevice`].
    pub fn seed_from_device<R: RngCore + ?Sized>(&mut self, device: &mut R) -> Result<(), Error> {
        let mut raw = [0u8; 4 * N];
        match device.try_fill_bytes(&mut raw) {
            Ok(()) => {
                self.reseed_from_raw(&raw);
                Ok(())
            }
            Err(_) => {
                warn!("Generator: entropy source failed, falling back to clock seed");
                self.seed(entropy::clock_seed());
                Err(Error::NoEntropyDevice)
            }
        }
    }

    fn reseed_from_raw(&mut self, raw: &[u8; 4 * N]) {
        self.engine.set_key_bytes(raw);
        self.gauss = None;
        self.binomial = None;
    }

    /// The next raw 32-bit engine word.
    #[inline]
    pub fn next_u32(&mut self) -> u32 {
        self.engine.next_u32()
    }

    /// The next 64 bits of engine output; the first of the two
    /// underlying draws fills the high half.
    #[inline]
    pub fn next_u64(&mut self) -> u64 {
        self.engine.next_u64()
    }

    /// Fill `dest` with raw engine output.
    ///
    /// Whole 32-bit words are written little-endian; unused high-order
    /// bytes of the final word are discarded, so a filled buffer is a
    /// prefix of the byte stream regardless of its length.
    #[inline]
    pub fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.engine.fill_bytes(dest)
    }

    /// A uniform integer on `[0, max]`, inclusive.
    ///
    /// Rejection-samples against the smallest bitmask covering `max`, so
    /// no modulo bias is introduced. `max == 0` returns 0 without
    /// consuming any engine output; a full-range `max` returns raw draws
    /// unmodified.
    pub fn random_interval(&mut self, max: u64) -> u64 {
        if max == 0 {
            return 0;
        }
        let mask = u64::MAX >> max.leading_zeros();
        if max <= u64::from(u32::MAX) {
            loop {
                let value = u64::from(self.next_u32()) & mask;
                if value <= max {
                    return value;
                }
            }
        }
        loop {
            let value = self.next_u64() & mask;
            if value <= max {
                return value;
            }
        }
    }

    /// A uniform double on `[0, 1)` with full 53-bit precision.
    ///
    /// Assembled from two engine words as `(a >> 5) * 2^26 + (b >> 6)`
    /// over `2^53`.
    #[inline]
    pub fn standard_uniform(&mut self) -> f64 {
        let a = self.next_u32() >> 5;
        let b = self.next_u32() >> 6;
        (a as f64 * 67108864.0 + b as f64) / 9007199254740992.0
    }

    /// A uniform double on `[loc, loc + scale)`.
    pub fn uniform(&mut self, loc: f64, scale: f64) -> f64 {
        loc + scale * self.standard_uniform()
    }
}

impl RngCore for Generator {
    #[inline]
    fn next_u32(&mut self) -> u32 {
        self.engine.next_u32()
    }

    #[inline]
    fn next_u64(&mut self) -> u64 {
        self.engine.next_u64()
    }

    #[inline]
    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.engine.fill_bytes(dest)
    }

    #[inline]
    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), RngError> {
        self.engine.try_fill_bytes(dest)
    }
}

impl SeedableRng for Generator {
    type Seed = [u8; 4];

    /// Create a generator from a little-endian 32-bit seed.
    fn from_seed(seed: [u8; 4]) -> Generator {
        Generator::new(u32::from_le_bytes(seed))
    }

    /// Seed from a `u64`, keeping the low 32 bits.
    fn seed_from_u64(state: u64) -> Generator {
        Generator::new((state & 0xffff_ffff) as u32)
    }
}
