// Copyright 2019 Developers of the Rand project.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The MT19937 bit engine.

use core::fmt;
use rand_core::{le, Error, RngCore, SeedableRng};
#[cfg(feature = "serde1")] use serde::{Deserialize, Serialize};

/// Number of 32-bit words in the engine state.
pub(crate) const N: usize = 624;
const M: usize = 397;
const MATRIX_A: u32 = 0x9908_b0df;
const UPPER_MASK: u32 = 0x8000_0000;
const LOWER_MASK: u32 = 0x7fff_ffff;

/// A Mersenne Twister (MT19937) random number generator.
///
/// The twisted generalised feedback shift register of Matsumoto and
/// Nishimura, with a 624-word internal state and a period of 2^19937 − 1.
/// The recurrence regenerates the state one full 624-word block at a
/// time, amortising the twist cost over 624 draws; `pos == 624` marks an
/// exhausted block.
///
/// Seeding from a 32-bit integer is a binding reproducibility contract:
/// identical seeds produce identical output streams on every platform.
/// The statistical quality is excellent, but the generator is trivially
/// predictable from its output and must not be used for secrets.
#[derive(Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
pub struct Mt19937 {
    #[cfg_attr(feature = "serde1", serde(with = "key_serde"))]
    key: [u32; N],
    pos: usize,
}

impl Mt19937 {
    /// Create an engine from a 32-bit integer seed.
    pub fn new(seed: u32) -> Mt19937 {
        let mut mt = Mt19937 { key: [0; N], pos: N };
        mt.seed(seed);
        mt
    }

    /// Reinitialise the state from a 32-bit integer seed.
    ///
    /// Uses the initialisation recurrence of the reference
    /// implementation: `key[0] = seed` and
    /// `key[i] = 1812433253 * (key[i-1] ^ (key[i-1] >> 30)) + i`.
    /// The multiplier never produces the all-zero state, which the twist
    /// recurrence cannot leave.
    pub fn seed(&mut self, seed: u32) {
        let mut s = seed;
        for (i, word) in self.key.iter_mut().enumerate() {
            *word = s;
            s = 1812433253u32
                .wrapping_mul(s ^ (s >> 30))
                .wrapping_add(i as u32 + 1);
        }
        self.pos = N;
    }

    /// Replace the full state with raw device output.
    ///
    /// `raw` must hold exactly `4 * 624` bytes, read as little-endian
    /// words. The top bit of the first word is forced on so the state
    /// can never be all zero.
    pub(crate) fn set_key_bytes(&mut self, raw: &[u8; 4 * N]) {
        le::read_u32_into(raw, &mut self.key);
        self.key[0] |= UPPER_MASK;
        self.pos = N;
    }

    /// Regenerate the full 624-word block in place.
    fn twist(&mut self) {
        const MAG: [u32; 2] = [0, MATRIX_A];

        for i in 0..N - M {
            let y = (self.key[i] & UPPER_MASK) | (self.key[i + 1] & LOWER_MASK);
            self.key[i] = self.key[i + M] ^ (y >> 1) ^ MAG[(y & 1) as usize];
        }
        for i in N - M..N - 1 {
            let y = (self.key[i] & UPPER_MASK) | (self.key[i + 1] & LOWER_MASK);
            self.key[i] = self.key[i + M - N] ^ (y >> 1) ^ MAG[(y & 1) as usize];
        }
        let y = (self.key[N - 1] & UPPER_MASK) | (self.key[0] & LOWER_MASK);
        self.key[N - 1] = self.key[M - 1] ^ (y >> 1) ^ MAG[(y & 1) as usize];

        self.pos = 0;
    }
}

// Custom Debug implementation that does not expose the internal state
impl fmt::Debug for Mt19937 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Mt19937 {{}}")
    }
}

impl RngCore for Mt19937 {
    #[inline]
    fn next_u32(&mut self) -> u32 {
        if self.pos == N {
            self.twist();
        }
        let mut y = self.key[self.pos];
        self.pos += 1;

        // Tempering
        y ^= y >> 11;
        y ^= (y << 7) & 0x9d2c_5680;
        y ^= (y << 15) & 0xefc6_0000;
        y ^ (y >> 18)
    }

    #[inline]
    fn next_u64(&mut self) -> u64 {
        // first draw fills the high half
        let high = u64::from(self.next_u32());
        let low = u64::from(self.next_u32());
        (high << 32) | low
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        let mut chunks = dest.chunks_exact_mut(4);
        for chunk in &mut chunks {
            chunk.copy_from_slice(&self.next_u32().to_le_bytes());
        }
        let rem = chunks.into_remainder();
        if !rem.is_empty() {
            // unused high-order bytes of the final word are discarded
            let last = self.next_u32().to_le_bytes();
            rem.copy_from_slice(&last[..rem.len()]);
        }
    }

    #[inline]
    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl SeedableRng for Mt19937 {
    type Seed = [u8; 4];

    /// Create an engine from a little-endian 32-bit seed.
    #[inline]
    fn from_seed(seed: [u8; 4]) -> Mt19937 {
        Mt19937::new(u32::from_le_bytes(seed))
    }

    /// Seed from a `u64`, keeping the low 32 bits.
    fn seed_from_u64(state: u64) -> Mt19937 {
        Mt19937::new((state & 0xffff_ffff) as u32)
    }
}

#[cfg(feature = "serde1")]
mod key_serde {
    use super::N;
    use core::fmt;
    use serde::de::{self, SeqAccess, Visitor};
    use serde::ser::SerializeTuple;
    use serde::{Deserializer, Serializer};

    pub fn serialize<S>(key: &[u32; N], ser: S) -> Result<S::Ok, S::Error>
    where S: Serializer {
        let mut seq = ser.serialize_tuple(N)?;
        for word in key.iter() {
            seq.serialize_element(word)?;
        }
        seq.end()
    }

    pub fn deserialize<'de, D>(de: D) -> Result<[u32; N], D::Error>
    where D: Deserializer<'de> {
        struct KeyVisitor;

        impl<'de> Visitor<'de> for KeyVisitor {
            type Value = [u32; N];

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("MT19937 state array")
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<[u32; N], A::Error>
            where A: SeqAccess<'de> {
                let mut out = [0u32; N];
                for (i, word) in out.iter_mut().enumerate() {
                    match seq.next_element()? {
                        Some(value) => *word = value,
                        None => return Err(de::Error::invalid_length(i, &self)),
                    }
                }
                Ok(out)
            }
        }

        de.deserialize_tuple(N, KeyVisitor)
    }
}
