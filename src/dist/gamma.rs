// Copyright 2019 Developers of the Rand project.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The Gamma and derived distributions.

use crate::Generator;

impl Generator {
    /// A standard gamma deviate with the given shape parameter.
    ///
    /// Three regimes, selected once per call:
    ///
    /// -   `shape < 1`: Devroye's boundary algorithm.
    /// -   `shape == 1`: a standard exponential deviate.
    /// -   `shape > 1`: the squeeze rejection method of Marsaglia and
    ///     Tsang (2000)[^1].
    ///
    /// [^1]: George Marsaglia and Wai Wan Tsang. 2000. "A Simple Method
    ///       for Generating Gamma Variables" *ACM Trans. Math. Softw.*
    ///       26, 3 (September 2000), 363-372.
    pub fn standard_gamma(&mut self, shape: f64) -> f64 {
        if shape == 1.0 {
            return self.standard_exponential();
        }

        if shape < 1.0 {
            loop {
                let u = self.standard_uniform();
                let v = self.standard_exponential();
                if u <= 1.0 - shape {
                    let x = u.powf(1.0 / shape);
                    if x <= v {
                        return x;
                    }
                } else {
                    let y = -((1.0 - u) / shape).ln();
                    let x = (1.0 - shape + shape * y).powf(1.0 / shape);
                    if x <= v + y {
                        return x;
                    }
                }
            }
        }

        // Marsaglia & Tsang method, 2000
        let b = shape - 1.0 / 3.0;
        let c = 1.0 / (9.0 * b).sqrt();
        loop {
            let (x, v) = loop {
                let x = self.standard_normal();
                let v = 1.0 + c * x;
                if v > 0.0 {
                    break (x, v);
                }
            };
            let v = v * v * v;
            let u = self.standard_uniform();
            if u < 1.0 - 0.0331 * (x * x) * (x * x) {
                return b * v;
            }
            if u.ln() < 0.5 * x * x + b * (1.0 - v + v.ln()) {
                return b * v;
            }
        }
    }

    /// A gamma deviate with the given shape and scale.
    pub fn gamma(&mut self, shape: f64, scale: f64) -> f64 {
        scale * self.standard_gamma(shape)
    }

    /// A beta deviate with shape parameters `a` and `b`.
    ///
    /// Uses Jöhnk's algorithm when both shapes are at most 1 (where the
    /// gamma samplers are at their slowest), otherwise the ratio of two
    /// gamma deviates.
    pub fn beta(&mut self, a: f64, b: f64) -> f64 {
        if a <= 1.0 && b <= 1.0 {
            loop {
                let u = self.standard_uniform();
                let v = self.standard_uniform();
                let x = u.powf(1.0 / a);
                let y = v.powf(1.0 / b);

                if x + y <= 1.0 {
                    if x + y > 0.0 {
                        return x / (x + y);
                    }
                    // both terms underflowed; redo the ratio in log space
                    let mut log_x = u.ln() / a;
                    let mut log_y = v.ln() / b;
                    let log_m = log_x.max(log_y);
                    log_x -= log_m;
                    log_y -= log_m;
                    return (log_x - (log_x.exp() + log_y.exp()).ln()).exp();
                }
            }
        }

        let ga = self.standard_gamma(a);
        let gb = self.standard_gamma(b);
        ga / (ga + gb)
    }

    /// A chi-square deviate with `df` degrees of freedom, as
    /// `Gamma(df/2, 2)`.
    pub fn chisquare(&mut self, df: f64) -> f64 {
        2.0 * self.standard_gamma(df / 2.0)
    }

    /// A noncentral chi-square deviate with `df` degrees of freedom and
    /// noncentrality `nonc`.
    pub fn noncentral_chisquare(&mut self, df: f64, nonc: f64) -> f64 {
        if nonc == 0.0 {
            return self.chisquare(df);
        }
        if df > 1.0 {
            let chi2 = self.chisquare(df - 1.0);
            let n = self.standard_normal() + nonc.sqrt();
            chi2 + n * n
        } else {
            let i = self.poisson(nonc / 2.0);
            self.chisquare(df + 2.0 * i as f64)
        }
    }

    /// An F deviate with `dfnum` and `dfden` degrees of freedom, as the
    /// ratio of two normalised chi-square deviates.
    pub fn fisher_f(&mut self, dfnum: f64, dfden: f64) -> f64 {
        (self.chisquare(dfnum) * dfden) / (self.chisquare(dfden) * dfnum)
    }

    /// A noncentral F deviate: the ratio of a noncentral chi-square and
    /// a central chi-square deviate, each normalised.
    pub fn noncentral_f(&mut self, dfnum: f64, dfden: f64, nonc: f64) -> f64 {
        let t = self.noncentral_chisquare(dfnum, nonc) * dfden;
        t / (self.chisquare(dfden) * dfnum)
    }

    /// A Student's t deviate with `df` degrees of freedom.
    pub fn standard_t(&mut self, df: f64) -> f64 {
        let n = self.standard_normal();
        let g = self.standard_gamma(df / 2.0);
        (df / 2.0).sqrt() * n / g.sqrt()
    }
}

#[cfg(test)]
mod test {
    fn mean_and_variance(n: usize, mut draw: impl FnMut() -> f64) -> (f64, f64) {
        let mut sum = 0.0;
        let mut sumsq = 0.0;
        for _ in 0..n {
            let x = draw();
            sum += x;
            sumsq += x * x;
        }
        let mean = sum / n as f64;
        (mean, sumsq / n as f64 - mean * mean)
    }

    #[test]
    fn test_gamma_large_shape() {
        let mut rng = crate::test::generator(230);
        let (mean, var) = mean_and_variance(10_000, || rng.gamma(4.0, 2.0));
        assert!((mean - 8.0).abs() < 0.3);
        assert!((var - 16.0).abs() < 2.5);
    }

    #[test]
    fn test_gamma_small_shape() {
        let mut rng = crate::test::generator(231);
        let (mean, var) = mean_and_variance(10_000, || rng.gamma(0.5, 1.0));
        assert!((mean - 0.5).abs() < 0.06);
        assert!((var - 0.5).abs() < 0.15);
    }

    #[test]
    fn test_gamma_shape_one_is_exponential() {
        let mut a = crate::test::generator(232);
        let mut b = crate::test::generator(232);
        for _ in 0..100 {
            assert_eq!(a.standard_gamma(1.0), b.standard_exponential());
        }
    }

    #[test]
    fn test_beta_johnk_regime() {
        let mut rng = crate::test::generator(233);
        let (mean, _) = mean_and_variance(10_000, || rng.beta(0.5, 0.5));
        for _ in 0..1000 {
            let x = rng.beta(0.5, 0.5);
            assert!((0.0..=1.0).contains(&x));
        }
        assert!((mean - 0.5).abs() < 0.05);
    }

    #[test]
    fn test_beta_gamma_regime() {
        let mut rng = crate::test::generator(234);
        let (mean, _) = mean_and_variance(10_000, || rng.beta(2.0, 5.0));
        // E[X] = a / (a + b)
        assert!((mean - 2.0 / 7.0).abs() < 0.03);
    }

    #[test]
    fn test_chisquare_mean_and_variance() {
        let mut rng = crate::test::generator(235);
        let (mean, var) = mean_and_variance(10_000, || rng.chisquare(11.0));
        assert!((mean - 11.0).abs() < 0.4);
        assert!((var - 22.0).abs() < 4.0);
    }

    #[test]
    fn test_noncentral_chisquare_mean() {
        let mut rng = crate::test::generator(236);
        // df > 1 path
        let (mean, _) = mean_and_variance(10_000, || rng.noncentral_chisquare(5.0, 3.0));
        assert!((mean - 8.0).abs() < 0.4);
        // df <= 1 Poisson-mixture path
        let (mean, _) = mean_and_variance(10_000, || rng.noncentral_chisquare(0.5, 2.0));
        assert!((mean - 2.5).abs() < 0.3);
    }

    #[test]
    fn test_fisher_f_mean() {
        let mut rng = crate::test::generator(237);
        let (mean, _) = mean_and_variance(20_000, || rng.fisher_f(8.0, 16.0));
        // E[X] = dfden / (dfden - 2)
        assert!((mean - 16.0 / 14.0).abs() < 0.08);
    }

    #[test]
    fn test_standard_t_symmetry() {
        let mut rng = crate::test::generator(238);
        let (mean, var) = mean_and_variance(20_000, || rng.standard_t(11.0));
        assert!(mean.abs() < 0.05);
        // Var = df / (df - 2)
        assert!((var - 11.0 / 9.0).abs() < 0.15);
    }
}
