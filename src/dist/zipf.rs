// Copyright 2019 Developers of the Rand project.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The Zipf and logarithmic series distributions.

use crate::Generator;

impl Generator {
    /// A Zipf (zeta) deviate with exponent `a > 1`, via rejection
    /// against a shifted Pareto envelope.
    ///
    /// Candidates beyond the representable integer range are rejected
    /// and redrawn, so the sampler models a Zipf distribution truncated
    /// to that range; the affected mass is far below one part in 10^18.
    pub fn zipf(&mut self, a: f64) -> u64 {
        let am1 = a - 1.0;
        let b = 2.0f64.powf(am1);
        loop {
            // reflected so the envelope inversion never sees zero
            let u = 1.0 - self.standard_uniform();
            let v = self.standard_uniform();
            let x = u.powf(-1.0 / am1).floor();
            if !(1.0..=i64::MAX as f64).contains(&x) {
                continue;
            }
            let t = (1.0 + 1.0 / x).powf(am1);
            if v * x * (t - 1.0) / (b - 1.0) <= t / b {
                return x as u64;
            }
        }
    }

    /// A logarithmic series deviate with shape `p`, via Kemp's
    /// inversion-rejection hybrid: the frequent outcomes 1 and 2 are
    /// emitted directly, the tail through inversion.
    pub fn logseries(&mut self, p: f64) -> u64 {
        let r = (1.0 - p).ln();

        loop {
            let v = self.standard_uniform();
            if v >= p {
                return 1;
            }
            let u = self.standard_uniform();
            let q = 1.0 - (r * u).exp();
            if v <= q * q {
                let result = (1.0 + v.ln() / q.ln()).floor();
                if result < 1.0 {
                    continue;
                }
                return result as u64;
            }
            if v >= q {
                return 1;
            }
            return 2;
        }
    }
}

#[cfg(test)]
mod test {
    #[test]
    fn test_zipf_support_and_head() {
        let mut rng = crate::test::generator(390);
        let n = 10_000;
        let mut ones = 0;
        for _ in 0..n {
            let x = rng.zipf(2.0);
            assert!(x >= 1);
            if x == 1 {
                ones += 1;
            }
        }
        // P(X = 1) = 1 / zeta(2)
        let expected = 6.0 / (core::f64::consts::PI * core::f64::consts::PI);
        assert!((ones as f64 / n as f64 - expected).abs() < 0.025);
    }

    #[test]
    fn test_zipf_mean() {
        let mut rng = crate::test::generator(391);
        let n = 10_000;
        let mut sum = 0.0;
        for _ in 0..n {
            sum += rng.zipf(4.0) as f64;
        }
        // E[X] = zeta(3) / zeta(4)
        let expected = 1.2020569031595943 / 1.0823232337111382;
        assert!((sum / n as f64 - expected).abs() < 0.05);
    }

    #[test]
    fn test_logseries_support_and_mean() {
        let mut rng = crate::test::generator(392);
        let n = 10_000;
        let mut sum = 0.0;
        for _ in 0..n {
            let x = rng.logseries(0.5);
            assert!(x >= 1);
            sum += x as f64;
        }
        // E[X] = -p / ((1-p) ln(1-p)) = 1 / ln 2 for p = 1/2
        let expected = 1.0 / 2.0f64.ln();
        assert!((sum / n as f64 - expected).abs() < 0.06);
    }
}
