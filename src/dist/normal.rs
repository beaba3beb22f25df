// Copyright 2019 Developers of the Rand project.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The normal and derived distributions.

use crate::Generator;

impl Generator {
    /// A standard normal deviate (mean 0, variance 1).
    ///
    /// Implemented via the Marsaglia polar method, which produces two
    /// independent deviates per accepted candidate pair; one is
    /// returned, the other cached and consumed by the next call. A call
    /// that consumes the cache draws nothing from the engine.
    pub fn standard_normal(&mut self) -> f64 {
        if let Some(spare) = self.gauss.take() {
            return spare;
        }

        let (x1, x2, r2) = loop {
            let x1 = 2.0 * self.standard_uniform() - 1.0;
            let x2 = 2.0 * self.standard_uniform() - 1.0;
            let r2 = x1 * x1 + x2 * x2;
            if r2 < 1.0 && r2 != 0.0 {
                break (x1, x2, r2);
            }
        };

        // Box-Muller transform
        let f = (-2.0 * r2.ln() / r2).sqrt();
        self.gauss = Some(f * x1);
        f * x2
    }

    /// A normal deviate with mean `loc` and standard deviation `scale`.
    pub fn normal(&mut self, loc: f64, scale: f64) -> f64 {
        loc + scale * self.standard_normal()
    }

    /// A log-normal deviate; `mean` and `sigma` parameterise the
    /// underlying normal distribution of the logarithm.
    pub fn lognormal(&mut self, mean: f64, sigma: f64) -> f64 {
        self.normal(mean, sigma).exp()
    }
}

#[cfg(test)]
mod test {
    #[test]
    fn test_spare_is_cached_and_consumed() {
        let mut rng = crate::test::generator(210);
        assert!(rng.gauss.is_none());
        rng.standard_normal();
        assert!(rng.gauss.is_some());
        rng.standard_normal();
        assert!(rng.gauss.is_none());
    }

    #[test]
    fn test_pair_from_same_uniform_draws() {
        // the second draw of a pair consumes no engine output
        let mut a = crate::test::generator(211);
        let mut b = crate::test::generator(211);

        a.standard_normal();
        let first = a.next_u32();

        b.standard_normal();
        b.standard_normal();
        let second = b.next_u32();

        assert_eq!(first, second);
    }

    #[test]
    fn test_normal_mean_and_variance() {
        let mut rng = crate::test::generator(212);
        let n = 10_000;
        let mut sum = 0.0;
        let mut sumsq = 0.0;
        for _ in 0..n {
            let x = rng.normal(2.0, 3.0);
            sum += x;
            sumsq += x * x;
        }
        let mean = sum / n as f64;
        let var = sumsq / n as f64 - mean * mean;
        assert!((mean - 2.0).abs() < 0.15);
        assert!((var - 9.0).abs() < 0.9);
    }

    #[test]
    fn test_lognormal_mean() {
        let mut rng = crate::test::generator(213);
        let n = 10_000;
        let mut sum = 0.0;
        for _ in 0..n {
            sum += rng.lognormal(0.0, 1.0);
        }
        let mean = sum / n as f64;
        // E[X] = exp(sigma^2 / 2)
        assert!((mean - 0.5f64.exp()).abs() < 0.15);
    }
}
