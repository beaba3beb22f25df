// Copyright 2019 Developers of the Rand project.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

#![doc(
    html_logo_url = "https://www.rust-lang.org/logos/rust-logo-128x128-blk.png",
    html_favicon_url = "https://www.rust-lang.org/favicon.ico"
)]
#![deny(missing_docs)]
#![deny(missing_debug_implementations)]
#![allow(clippy::excessive_precision, clippy::unreadable_literal)]

//! The MT19937 (Mersenne Twister) random number engine together with a
//! library of statistical distribution samplers built on top of it.
//!
//! The primary goal of this crate is reproducible, statistically
//! high-quality randomness for numeric work: the same seed always yields
//! the same stream of variates, on every platform, forever. It is
//! explicitly **not** a cryptographic generator.
//!
//! ## Generators
//!
//! -   [`Mt19937`]: the bare bit engine. A twisted generalised feedback
//!     shift register with a 624-word state and a period of 2^19937 − 1,
//!     implementing [`RngCore`] and [`SeedableRng`].
//! -   [`Generator`]: the type most users want. Owns an [`Mt19937`] plus
//!     the sampler caches (spare Gaussian deviate, binomial setup
//!     constants) and exposes one method per distribution.
//!
//! ## Distributions
//!
//! Continuous: uniform, normal, log-normal, exponential, gamma, beta,
//! chi-square (central and noncentral), F (central and noncentral),
//! Student's t, Cauchy, von Mises, Pareto, Weibull, power, Laplace,
//! Gumbel, logistic, Rayleigh, Wald, triangular.
//!
//! Discrete: bounded integers, binomial, negative binomial, Poisson,
//! geometric, hypergeometric, Zipf, logarithmic series.
//!
//! Parameter domains are the caller's responsibility: samplers do not
//! validate their arguments, and out-of-domain parameters produce
//! unspecified numeric results (commonly `NaN`) rather than an error.
//!
//! ```
//! use rand_mt19937::Generator;
//!
//! let mut rng = Generator::new(12345);
//! let x = rng.standard_normal();
//! let k = rng.binomial(100, 0.25);
//! assert!(k <= 100);
//! # let _ = x;
//! ```
//!
//! ## Seeding
//!
//! [`Generator::new`] seeds deterministically from a 32-bit integer.
//! [`Generator::seed_from_entropy`] seeds all 624 state words from the
//! operating system; if no entropy device is available it falls back to a
//! clock-derived seed and reports [`Error::NoEntropyDevice`], leaving the
//! generator valid and usable either way.
//!
//! ## Crate features
//!
//! -   `serde1`: serialization of the complete generator state. A state
//!     saved mid-stream resumes bit-exactly, including a pending spare
//!     Gaussian deviate and the binomial setup cache.
//! -   `log`: a warning is emitted when entropy seeding falls back to the
//!     clock.
//!
//! [`RngCore`]: rand_core::RngCore
//! [`SeedableRng`]: rand_core::SeedableRng

#[macro_use]
mod log_macros;

mod dist;
mod engine;
mod entropy;
mod error;
mod generator;

pub use crate::engine::Mt19937;
pub use crate::entropy::device_fill;
pub use crate::error::Error;
pub use crate::generator::Generator;

pub use rand_core;
