//! Adaptive quadrature for closures, on top of R's native `Rdqags` and
//! `Rdqagi` routines.
//!
//! The routines are driven through a C callback. This crate supplies that
//! callback for any `FnMut(f64) -> f64` (or fallible integrand), keeps panics
//! from unwinding through foreign code, and turns the routine's integer
//! status into an `IntegrationError` that still carries the partial result.
//!
//! # Features
//!
//! - `r`: links against R's `libR` and enables `RApplic`, `integrate`,
//!   `Integrator::new` and the numeric tests in `rapplic::test`. The build
//!   script finds R through `R_INCLUDE_DIR`, `R_HOME` or `R RHOME`, e.g.
//!   `R_HOME=$(R RHOME) cargo test --features r`. Without it only the
//!   scripted-routine tests run.
//! - `serde-derive`: `Serialize`/`Deserialize` for `Config` and
//!   `IntegrationResult`.
//!
//! ```no_run
//! # #[cfg(feature = "r")] {
//! use rintegrate::{integrate, Config};
//!
//! let res = integrate(|x: f64| x, 0.0, 1.0, Config::default()).unwrap();
//! assert!((res.value - 0.5).abs() < 1e-8);
//! # }
//! ```

#[cfg(feature = "serde-derive")]
use serde::{Deserialize, Serialize};

pub mod config;
pub mod error;
pub mod ffi;
pub mod integrator;
pub mod traits;

#[cfg(feature = "r")]
mod bindings;

#[cfg(feature = "r")]
pub mod rapplic;


pub type Real = f64;

pub use config::Config;
pub use error::{ErrorCategory, ErrorKind, IntegrandFault, IntegrationError, QuadResult};
pub use integrator::{Integrator, Interval};
pub use traits::{Fallible, Infinity, Integrand, QuadratureRoutine};

#[cfg(feature = "r")]
pub use rapplic::RApplic;

/// Outcome of an integration. Also attached to every `IntegrationError`,
/// where it holds the estimate reached before the failure.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde-derive", derive(Serialize, Deserialize))]
pub struct IntegrationResult {
    /// The approximation to the integral.
    pub value: Real,
    /// Estimate of the absolute error, `>= |I - value|`.
    pub abserr: Real,
    /// Number of subintervals in the final partition.
    pub subdivisions: i32,
    /// Number of integrand evaluations.
    pub neval: i32,
}

#[cfg(feature = "r")]
impl Integrator<RApplic> {
    /// An integrator backed by R's routines. `config` is not validated here.
    pub fn new(config: Config) -> Self {
        Integrator::with_routine(config, RApplic)
    }

    /// Positional form of `Integrator::new(Config::from_parts(..))`.
    pub fn from_parts(max_subdivisions: i32, relative_accuracy: Real,
                      absolute_accuracy: Real, workspace_size: i32) -> Self {
        Integrator::new(Config::from_parts(max_subdivisions, relative_accuracy,
                                           absolute_accuracy, workspace_size))
    }
}

#[cfg(feature = "r")]
impl Default for Integrator<RApplic> {
    fn default() -> Self {
        Integrator::new(Config::default())
    }
}

#[cfg(feature = "r")]
impl From<Config> for Integrator<RApplic> {
    fn from(config: Config) -> Self {
        Integrator::new(config)
    }
}

/// Integrates `fun` from `lower` to `upper` with a throwaway integrator.
#[cfg(feature = "r")]
pub fn integrate<F: Integrand>(fun: F, lower: Real, upper: Real, config: Config)
        -> QuadResult<IntegrationResult> {
    Integrator::new(config).integrate(fun, lower, upper)
}

/// Like `integrate`, but with any `QuadratureRoutine`.
pub fn integrate_with<Q, F>(routine: Q, fun: F, lower: Real, upper: Real, config: Config)
        -> QuadResult<IntegrationResult>
    where Q: QuadratureRoutine,
          F: Integrand
{
    Integrator::with_routine(config, routine).integrate(fun, lower, upper)
}
