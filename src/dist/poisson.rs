// Copyright 2019 Developers of the Rand project.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The Poisson and negative binomial distributions.

use super::loggam;
use crate::Generator;

/// Regime boundary: below this rate the repeated-multiplication search
/// is cheaper, at or above it the PTRS rejection algorithm wins.
/// Empirically tuned, not a correctness knob.
const PTRS_THRESHOLD: f64 = 10.0;

impl Generator {
    /// A Poisson deviate with rate `lambda`.
    ///
    /// `lambda == 0` returns 0. Small rates use the classic
    /// repeated-multiplication decrement test (expected iterations
    /// `lambda + 1`); large rates use the transformed rejection
    /// algorithm PTRS of Hörmann[^1].
    ///
    /// [^1]: Wolfgang Hörmann. 1993. The transformed rejection method
    ///       for generating Poisson random variables.
    ///       Insurance: Mathematics and Economics 12, 39-45.
    pub fn poisson(&mut self, lambda: f64) -> u64 {
        if lambda >= PTRS_THRESHOLD {
            self.poisson_ptrs(lambda)
        } else if lambda == 0.0 {
            0
        } else {
            self.poisson_mult(lambda)
        }
    }

    /// Multiply uniform deviates until the product drops below
    /// `exp(-lambda)`.
    fn poisson_mult(&mut self, lambda: f64) -> u64 {
        let enlam = (-lambda).exp();
        let mut x: u64 = 0;
        let mut prod = 1.0;
        loop {
            prod *= self.standard_uniform();
            if prod > enlam {
                x += 1;
            } else {
                return x;
            }
        }
    }

    /// Transformed rejection with squeeze (PTRS).
    fn poisson_ptrs(&mut self, lambda: f64) -> u64 {
        let slam = lambda.sqrt();
        let loglam = lambda.ln();
        let b = 0.931 + 2.53 * slam;
        let a = -0.059 + 0.02483 * b;
        let invalpha = 1.1239 + 1.1328 / (b - 3.4);
        let vr = 0.9277 - 3.6224 / (b - 2.0);

        loop {
            let u = self.standard_uniform() - 0.5;
            let v = self.standard_uniform();
            let us = 0.5 - u.abs();
            let k = ((2.0 * a / us + b) * u + lambda + 0.43).floor();

            // cheap acceptance for the bulk of the distribution
            if us >= 0.07 && v <= vr {
                return k as u64;
            }
            if k < 0.0 || (us < 0.013 && v > us) {
                continue;
            }
            // exact test in log space
            if v.ln() + invalpha.ln() - (a / (us * us) + b).ln()
                <= -lambda + k * loglam - loggam(k + 1.0)
            {
                return k as u64;
            }
        }
    }

    /// A negative binomial deviate: mix a `Gamma(n, (1-p)/p)` rate into
    /// a Poisson draw. `n` need not be an integer.
    pub fn negative_binomial(&mut self, n: f64, p: f64) -> u64 {
        let y = self.gamma(n, (1.0 - p) / p);
        self.poisson(y)
    }
}
