// Copyright 2019 Developers of the Rand project.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The hypergeometric distribution.

use super::loggam;
use crate::Generator;

/// Sample sizes above this use the HRUA rejection algorithm; smaller
/// draws simulate the urn directly.
const HRUA_THRESHOLD: u64 = 10;

/// 2 * sqrt(2 / e)
const D1: f64 = 1.7155277699214135;
/// 3 - 2 * sqrt(3 / e)
const D2: f64 = 0.8989161620588988;

impl Generator {
    /// A hypergeometric deviate: the number of marked items in a
    /// `sample`-sized draw, without replacement, from a population of
    /// `good` marked and `bad` unmarked items.
    ///
    /// Small samples run the urn simulation directly (linear in
    /// `sample`); larger ones use the HRUA ratio-of-uniforms rejection
    /// algorithm of Stadlober, with Frohne's corrections for asymmetric
    /// populations and samples beyond half the population.
    pub fn hypergeometric(&mut self, good: u64, bad: u64, sample: u64) -> u64 {
        if sample > HRUA_THRESHOLD {
            self.hypergeometric_hrua(good, bad, sample)
        } else {
            self.hypergeometric_hyp(good, bad, sample)
        }
    }

    /// Sequential urn simulation, counting draws from the smaller side.
    fn hypergeometric_hyp(&mut self, good: u64, bad: u64, sample: u64) -> u64 {
        let d1 = bad as i64 + good as i64 - sample as i64;
        let d2 = bad.min(good) as f64;

        let mut y = d2;
        let mut k = sample as i64;
        while y > 0.0 {
            let u = self.standard_uniform();
            y -= (u + y / (d1 + k) as f64).floor();
            k -= 1;
            if k == 0 {
                break;
            }
        }

        let mut z = (d2 - y) as i64;
        if good > bad {
            z = sample as i64 - z;
        }
        z as u64
    }

    /// HRUA ratio-of-uniforms rejection.
    fn hypergeometric_hrua(&mut self, good: u64, bad: u64, sample: u64) -> u64 {
        let popsize = good + bad;
        let mingoodbad = good.min(bad) as f64;
        let maxgoodbad = good.max(bad) as f64;
        let computed_sample = sample.min(popsize - sample);
        let m = computed_sample as f64;
        let popf = popsize as f64;

        let d4 = mingoodbad / popf;
        let d5 = 1.0 - d4;
        let d6 = m * d4 + 0.5;
        let d7 = ((popf - m) * sample as f64 * d4 * d5 / (popf - 1.0) + 0.5).sqrt();
        let d8 = D1 * d7 + D2;
        let d9 = ((m + 1.0) * (mingoodbad + 1.0) / (popf + 2.0)).floor();
        let d10 = loggam(d9 + 1.0)
            + loggam(mingoodbad - d9 + 1.0)
            + loggam(m - d9 + 1.0)
            + loggam(maxgoodbad - m + d9 + 1.0);
        // 16 sigmas for the 16-decimal-digit precision of D1 and D2
        let d11 = (m.min(mingoodbad) + 1.0).min((d6 + 16.0 * d7).floor());

        let z = loop {
            let x = self.standard_uniform();
            let y = self.standard_uniform();
            let w = d6 + d8 * (y - 0.5) / x;

            // fast rejection
            if w < 0.0 || w >= d11 {
                continue;
            }

            let z = w.floor();
            let t = d10
                - (loggam(z + 1.0)
                    + loggam(mingoodbad - z + 1.0)
                    + loggam(m - z + 1.0)
                    + loggam(maxgoodbad - m + z + 1.0));

            // fast acceptance
            if x * (4.0 - x) - 3.0 <= t {
                break z;
            }
            // fast rejection
            if x * (x - t) >= 1.0 {
                continue;
            }
            // exact acceptance
            if 2.0 * x.ln() <= t {
                break z;
            }
        };

        // undo the symmetry reductions applied above
        let mut z = z as i64;
        if good > bad {
            z = computed_sample as i64 - z;
        }
        if computed_sample < sample {
            z = good as i64 - z;
        }
        z as u64
    }
}

#[cfg(test)]
mod test {
    fn check_mean_and_variance(popgood: u64, popbad: u64, sample: u64, seed: u32) {
        let mut rng = crate::test::generator(seed);
        let total = popgood + popbad;

        let expected_mean = sample as f64 * popgood as f64 / total as f64;
        let expected_variance = {
            let numerator = (sample * popgood * popbad * (total - sample)) as f64;
            let denominator = (total * total * (total - 1)) as f64;
            numerator / denominator
        };

        let n = 10_000;
        let mut sum = 0.0;
        let mut sumsq = 0.0;
        for _ in 0..n {
            let x = rng.hypergeometric(popgood, popbad, sample);
            assert!(x <= sample);
            assert!(x <= popgood);
            let x = x as f64;
            sum += x;
            sumsq += x * x;
        }
        let mean = sum / n as f64;
        let variance = sumsq / n as f64 - mean * mean;
        assert!((mean - expected_mean).abs() < expected_mean / 20.0 + 0.05);
        assert!((variance - expected_variance).abs() < expected_variance / 5.0 + 0.05);
    }

    #[test]
    fn test_hypergeometric_urn_regime() {
        check_mean_and_variance(100, 30, 7, 380);
        check_mean_and_variance(60, 24, 7, 381);
        check_mean_and_variance(10, 10, 10, 382);
    }

    #[test]
    fn test_hypergeometric_hrua_regime() {
        check_mean_and_variance(1000, 500, 100, 383);
        check_mean_and_variance(500, 400, 30, 384);
        // good < bad exercises the symmetry correction
        check_mean_and_variance(400, 500, 30, 385);
        // sample beyond half the population exercises the second fix
        check_mean_and_variance(300, 200, 400, 386);
    }

    #[test]
    fn test_hypergeometric_exhaustive_sample() {
        let mut rng = crate::test::generator(387);
        // drawing the whole population takes every marked item
        for _ in 0..100 {
            assert_eq!(rng.hypergeometric(7, 3, 10), 7);
        }
    }
}
