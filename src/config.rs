//! Tunable parameters handed to the quadrature routine.
//!
//! A `Config` can be built in an invalid state; nothing is checked until
//! `is_valid()` or `assert_validity()` is called, which the `Integrator`
//! does right before every integration. That lets several setters be
//! applied one after another and checked once.

#[cfg(feature = "serde-derive")]
use serde::{Deserialize, Serialize};

use super::error::{ErrorKind, IntegrationError, QuadResult};
use super::{IntegrationResult, Real};

/// Default maximum number of subintervals.
pub const DEFAULT_MAX_SUBDIVISIONS: i32 = 100;

/// The default requested accuracy, the fourth root of the machine epsilon.
pub fn default_accuracy() -> Real {
    Real::EPSILON.powf(0.25)
}

/// The smallest relative accuracy the routine accepts when the absolute
/// accuracy is not positive: `max(50 * eps, 0.5e-28)`.
pub fn min_relative_accuracy() -> Real {
    (50.0 * Real::EPSILON).max(0.5e-28)
}

/// Integration parameters for `Rdqags`/`Rdqagi`.
///
/// - `max_subdivisions` (`limit`): upper bound on the number of subintervals,
///   must be at least 1.
/// - `relative_accuracy` and `absolute_accuracy` (`epsrel`, `epsabs`): the
///   requested accuracies. If `absolute_accuracy <= 0`, then
///   `relative_accuracy` must be at least `min_relative_accuracy()`.
/// - `workspace_size` (`lenw`): length of the floating point work array,
///   must be at least `4 * max_subdivisions`.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-derive", derive(Serialize, Deserialize))]
pub struct Config {
    max_subdivisions: i32,
    relative_accuracy: Real,
    absolute_accuracy: Real,
    workspace_size: i32,
}

impl Default for Config {
    fn default() -> Self {
        Config::new(DEFAULT_MAX_SUBDIVISIONS)
    }
}

impl Config {
    /// Uses the default accuracies and a workspace of `4 * max_subdivisions`.
    pub fn new(max_subdivisions: i32) -> Self {
        Config::with_relative_accuracy(max_subdivisions, default_accuracy())
    }

    /// The absolute accuracy defaults to `relative_accuracy`.
    pub fn with_relative_accuracy(max_subdivisions: i32, relative_accuracy: Real) -> Self {
        Config::with_accuracies(max_subdivisions, relative_accuracy, relative_accuracy)
    }

    pub fn with_accuracies(max_subdivisions: i32, relative_accuracy: Real,
                           absolute_accuracy: Real) -> Self {
        Config::from_parts(max_subdivisions, relative_accuracy, absolute_accuracy,
                           max_subdivisions.saturating_mul(4))
    }

    pub fn from_parts(max_subdivisions: i32, relative_accuracy: Real,
                      absolute_accuracy: Real, workspace_size: i32) -> Self {
        Config {
            max_subdivisions,
            relative_accuracy,
            absolute_accuracy,
            workspace_size,
        }
    }

    pub fn max_subdivisions(&self) -> i32 {
        self.max_subdivisions
    }

    pub fn relative_accuracy(&self) -> Real {
        self.relative_accuracy
    }

    pub fn absolute_accuracy(&self) -> Real {
        self.absolute_accuracy
    }

    pub fn workspace_size(&self) -> i32 {
        self.workspace_size
    }

    pub fn set_max_subdivisions(&mut self, max_subdivisions: i32) {
        self.max_subdivisions = max_subdivisions;
    }

    pub fn set_relative_accuracy(&mut self, relative_accuracy: Real) {
        self.relative_accuracy = relative_accuracy;
    }

    pub fn set_absolute_accuracy(&mut self, absolute_accuracy: Real) {
        self.absolute_accuracy = absolute_accuracy;
    }

    pub fn set_workspace_size(&mut self, workspace_size: i32) {
        self.workspace_size = workspace_size;
    }

    /// Checks the same conditions the routine itself rejects with `ier = 6`.
    pub fn is_valid(&self) -> bool {
        if self.max_subdivisions < 1 {
            return false;
        }
        if self.absolute_accuracy <= 0.0
            && self.relative_accuracy < min_relative_accuracy() {
            return false;
        }
        // i64 so a large `max_subdivisions` cannot overflow.
        i64::from(self.workspace_size) >= 4 * i64::from(self.max_subdivisions)
    }

    /// Fails with `ErrorKind::InvalidInput` and an all-zero result unless
    /// `is_valid()`.
    pub fn assert_validity(&self) -> QuadResult<()> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(IntegrationError::new(ErrorKind::InvalidInput,
                                      IntegrationResult::default()))
        }
    }
}

/// Positional forms, in the order `(max_subdivisions, relative_accuracy,
/// absolute_accuracy, workspace_size)`; omitted trailing fields default.
impl From<(i32,)> for Config {
    fn from((max_subdivisions,): (i32,)) -> Self {
        Config::new(max_subdivisions)
    }
}

impl From<(i32, Real)> for Config {
    fn from((max_subdivisions, relative_accuracy): (i32, Real)) -> Self {
        Config::with_relative_accuracy(max_subdivisions, relative_accuracy)
    }
}

impl From<(i32, Real, Real)> for Config {
    fn from((max_subdivisions, relative_accuracy, absolute_accuracy): (i32, Real, Real)) -> Self {
        Config::with_accuracies(max_subdivisions, relative_accuracy, absolute_accuracy)
    }
}

impl From<(i32, Real, Real, i32)> for Config {
    fn from((max_subdivisions, relative_accuracy, absolute_accuracy, workspace_size):
            (i32, Real, Real, i32)) -> Self {
        Config::from_parts(max_subdivisions, relative_accuracy, absolute_accuracy, workspace_size)
    }
}
