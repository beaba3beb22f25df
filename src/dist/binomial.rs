// Copyright 2019 Developers of the Rand project.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The binomial distribution.

use crate::Generator;
#[cfg(feature = "serde1")] use serde::{Deserialize, Serialize};

/// Regime boundary: expected count at or below this uses chop-down
/// inversion, above it the BTPE rejection algorithm. Empirically tuned;
/// moving it trades setup cost against expected iteration count, it is
/// not a correctness knob.
const BTPE_THRESHOLD: f64 = 30.0;

/// Cached setup constants for the binomial sampler.
///
/// Keyed by the exact `(n, p)` pair that populated it (after the
/// symmetry flip to `p <= 0.5`, when one was applied). A call whose
/// parameters match reuses the constants; any mismatch recomputes and
/// replaces the cache, so stale constants can never be observed.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
pub(crate) enum BinomialCache {
    /// Setup for the chop-down inversion regime.
    Inversion(InversionSetup),
    /// Setup for the BTPE rejection regime.
    Btpe(BtpeSetup),
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
pub(crate) struct InversionSetup {
    n: u64,
    p: f64,
    /// 1 - p
    q: f64,
    /// q^n, the mass at zero where the search starts
    qn: f64,
    /// search cutoff; accumulated mass beyond it restarts the search
    bound: u64,
}

impl InversionSetup {
    fn new(n: u64, p: f64) -> InversionSetup {
        let q = 1.0 - p;
        let qn = (n as f64 * q.ln()).exp();
        let np = n as f64 * p;
        let bound = (n as f64).min(np + 10.0 * (np * q + 1.0).sqrt()) as u64;
        InversionSetup { n, p, q, qn, bound }
    }
}

/// The thirteen derived constants of the BTPE algorithm
/// (Kachitvichyanukul and Schmeiser 1988[^1]): the mode and the four
/// region boundaries of the piecewise majorising function, plus the
/// tail exponents and region areas.
///
/// [^1]: Voratas Kachitvichyanukul and Bruce W. Schmeiser. 1988.
///       Binomial random variate generation.
///       Commun. ACM 31, 2 (February 1988), 216-222.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
pub(crate) struct BtpeSetup {
    n: u64,
    p: f64,
    r: f64,
    q: f64,
    m: i64,
    p1: f64,
    xm: f64,
    xl: f64,
    xr: f64,
    c: f64,
    laml: f64,
    lamr: f64,
    p2: f64,
    p3: f64,
    p4: f64,
}

impl BtpeSetup {
    fn new(n: u64, p: f64) -> BtpeSetup {
        let nf = n as f64;
        let r = p;
        let q = 1.0 - r;
        let fm = nf * r + r;
        let m = fm.floor() as i64;
        let p1 = (2.195 * (nf * r * q).sqrt() - 4.6 * q).floor() + 0.5;
        let xm = m as f64 + 0.5;
        let xl = xm - p1;
        let xr = xm + p1;
        let c = 0.134 + 20.5 / (15.3 + m as f64);
        let a = (fm - xl) / (fm - xl * r);
        let laml = a * (1.0 + a / 2.0);
        let a = (xr - fm) / (xr * q);
        let lamr = a * (1.0 + a / 2.0);
        let p2 = p1 * (1.0 + 2.0 * c);
        let p3 = p2 + c / laml;
        let p4 = p3 + c / lamr;

        BtpeSetup {
            n,
            p,
            r,
            q,
            m,
            p1,
            xm,
            xl,
            xr,
            c,
            laml,
            lamr,
            p2,
            p3,
            p4,
        }
    }
}

impl Generator {
    /// A binomial deviate: the number of successes in `n` Bernoulli
    /// trials with success probability `p`.
    ///
    /// The distribution is symmetric under `p -> 1-p`, `k -> n-k`, so
    /// sampling always runs with the smaller of the two probabilities
    /// and the result is flipped back if needed. With the expected count
    /// at most 30 the chop-down inversion search is used (bounded
    /// expected iterations); above it, the BTPE rejection algorithm.
    ///
    /// Setup constants for either regime are cached in the generator
    /// state, keyed by `(n, p)`: repeated calls with fixed parameters
    /// pay the setup cost once, and any parameter change recomputes it.
    pub fn binomial(&mut self, n: u64, p: f64) -> u64 {
        if p <= 0.5 {
            if p * n as f64 <= BTPE_THRESHOLD {
                self.binomial_inversion(n, p)
            } else {
                self.binomial_btpe(n, p)
            }
        } else {
            let q = 1.0 - p;
            if q * n as f64 <= BTPE_THRESHOLD {
                n - self.binomial_inversion(n, q)
            } else {
                n - self.binomial_btpe(n, q)
            }
        }
    }

    /// Chop-down inversion ("second waiting time" search): accumulate
    /// probability mass upward from zero until the uniform draw is
    /// covered. Requires `p <= 0.5`.
    fn binomial_inversion(&mut self, n: u64, p: f64) -> u64 {
        let setup = match self.binomial {
            Some(BinomialCache::Inversion(setup)) if setup.n == n && setup.p == p => setup,
            _ => {
                let setup = InversionSetup::new(n, p);
                self.binomial = Some(BinomialCache::Inversion(setup));
                setup
            }
        };
        let InversionSetup { q, qn, bound, .. } = setup;

        let mut x: u64 = 0;
        let mut px = qn;
        let mut u = self.standard_uniform();
        while u > px {
            x += 1;
            if x > bound {
                // fell off the numerically meaningful tail; restart
                x = 0;
                px = qn;
                u = self.standard_uniform();
            } else {
                u -= px;
                px = ((n - x + 1) as f64 * p * px) / (x as f64 * q);
            }
        }
        x
    }

    /// BTPE: rejection from a piecewise majorising function (triangle,
    /// parallelogram and two exponential tails), with a squeeze step
    /// and a Stirling-corrected exact test for candidates near the
    /// mode. Requires `p <= 0.5` and `n * p` large enough that the
    /// triangle around the mode is well formed (the regime split
    /// guarantees both).
    fn binomial_btpe(&mut self, n: u64, p: f64) -> u64 {
        let setup = match self.binomial {
            Some(BinomialCache::Btpe(setup)) if setup.n == n && setup.p == p => setup,
            _ => {
                let setup = BtpeSetup::new(n, p);
                self.binomial = Some(BinomialCache::Btpe(setup));
                setup
            }
        };
        let BtpeSetup {
            r,
            q,
            m,
            p1,
            xm,
            xl,
            xr,
            c,
            laml,
            lamr,
            p2,
            p3,
            p4,
            ..
        } = setup;

        let nf = n as f64;
        let mf = m as f64;
        let nrq = nf * r * q;

        let y: i64 = loop {
            let u = self.standard_uniform() * p4;
            let mut v = self.standard_uniform();

            if u <= p1 {
                // triangular central region
                break (xm - p1 * v + u).floor() as i64;
            }

            let y: i64;
            if u <= p2 {
                // parallelogram region
                let x = xl + (u - p1) / c;
                v = v * c + 1.0 - (xm - x).abs() / p1;
                if v > 1.0 {
                    continue;
                }
                y = x.floor() as i64;
            } else if u <= p3 {
                // left exponential tail
                y = (xl + v.ln() / laml).floor() as i64;
                if y < 0 {
                    continue;
                }
                v *= (u - p2) * laml;
            } else {
                // right exponential tail
                y = (xr - v.ln() / lamr).floor() as i64;
                if y > n as i64 {
                    continue;
                }
                v *= (u - p3) * lamr;
            }

            let k = (y - m).abs();
            if k <= 20 || k as f64 >= nrq / 2.0 - 1.0 {
                // evaluate f(y) as a product of ratios from the mode
                let s = r / q;
                let a = s * (nf + 1.0);
                let mut f = 1.0;
                if m < y {
                    for i in (m + 1)..=y {
                        f *= a / i as f64 - s;
                    }
                } else if m > y {
                    for i in (y + 1)..=m {
                        f /= a / i as f64 - s;
                    }
                }
                if v <= f {
                    break y;
                }
            } else {
                // squeeze on log f(y), then the Stirling-corrected
                // exact comparison
                let kf = k as f64;
                let rho =
                    (kf / nrq) * ((kf * (kf / 3.0 + 0.625) + 0.16666666666666666) / nrq + 0.5);
                let t = -kf * kf / (2.0 * nrq);
                let log_v = v.ln();
                if log_v < t - rho {
                    break y;
                }
                if log_v > t + rho {
                    continue;
                }

                let yf = y as f64;
                let x1 = yf + 1.0;
                let f1 = mf + 1.0;
                let z = nf + 1.0 - mf;
                let w = nf - yf + 1.0;
                let x2 = x1 * x1;
                let f2 = f1 * f1;
                let z2 = z * z;
                let w2 = w * w;
                let bound = xm * (f1 / x1).ln()
                    + (nf - mf + 0.5) * (z / w).ln()
                    + (yf - mf) * (w * r / (x1 * q)).ln()
                    + (13680.0 - (462.0 - (132.0 - (99.0 - 140.0 / f2) / f2) / f2) / f2) / f1
                        / 166320.0
                    + (13680.0 - (462.0 - (132.0 - (99.0 - 140.0 / z2) / z2) / z2) / z2) / z
                        / 166320.0
                    + (13680.0 - (462.0 - (132.0 - (99.0 - 140.0 / x2) / x2) / x2) / x2) / x1
                        / 166320.0
                    + (13680.0 - (462.0 - (132.0 - (99.0 - 140.0 / w2) / w2) / w2) / w2) / w
                        / 166320.0;
                if log_v <= bound {
                    break y;
                }
            }
        };

        y as u64
    }
}
