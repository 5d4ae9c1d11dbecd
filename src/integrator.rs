use std::convert::TryFrom;

use tracing::{debug, warn};

use super::config::Config;
use super::error::{ErrorKind, IntegrationError, QuadResult};
use super::ffi::LandingPad;
use super::traits::{Infinity, Integrand, QuadratureRoutine, Workspace};
use super::{IntegrationResult, Real};

/// How a pair of bounds is handed to the routine.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Interval {
    /// Both bounds finite: `qags` over `(lower, upper)`.
    Finite { lower: Real, upper: Real },
    /// At least one bound infinite: `qagi` around `bound`.
    Infinite { bound: Real, inf: Infinity },
}

impl Interval {
    /// Decides by finiteness alone: a finite `lower` gives `LowerBounded`,
    /// else a finite `upper` gives `UpperBounded`, else `Both` around 0.
    /// The sign of an infinite bound plays no part. `None` if either bound
    /// is NaN.
    pub fn classify(lower: Real, upper: Real) -> Option<Self> {
        if lower.is_nan() || upper.is_nan() {
            return None;
        }
        let interval = if lower.is_finite() && upper.is_finite() {
            Interval::Finite { lower, upper }
        } else if lower.is_finite() {
            Interval::Infinite { bound: lower, inf: Infinity::LowerBounded }
        } else if upper.is_finite() {
            Interval::Infinite { bound: upper, inf: Infinity::UpperBounded }
        } else {
            Interval::Infinite { bound: 0.0, inf: Infinity::Both }
        };
        Some(interval)
    }
}

/// Adaptive quadrature over finite and infinite intervals.
///
/// Dispatches to `qags` when both bounds are finite and to `qagi`
/// otherwise. The configuration is validated on every call; fresh scratch
/// space is allocated per call, so an `Integrator` keeps no state between
/// integrations besides its `Config`.
#[derive(Clone, Debug)]
pub struct Integrator<Q> {
    config: Config,
    routine: Q,
}

impl<Q: QuadratureRoutine> Integrator<Q> {
    /// Does not validate `config`; that happens when integrating.
    pub fn with_routine(config: Config, routine: Q) -> Self {
        Integrator { config, routine }
    }

    pub fn config(&self) -> Config {
        self.config
    }

    pub fn set_config(&mut self, config: Config) {
        self.config = config;
    }

    pub fn routine(&self) -> &Q {
        &self.routine
    }

    pub fn max_subdivisions(&self) -> i32 {
        self.config.max_subdivisions()
    }

    pub fn relative_accuracy(&self) -> Real {
        self.config.relative_accuracy()
    }

    pub fn absolute_accuracy(&self) -> Real {
        self.config.absolute_accuracy()
    }

    pub fn workspace_size(&self) -> i32 {
        self.config.workspace_size()
    }

    pub fn set_max_subdivisions(&mut self, max_subdivisions: i32) {
        self.config.set_max_subdivisions(max_subdivisions);
    }

    pub fn set_relative_accuracy(&mut self, relative_accuracy: Real) {
        self.config.set_relative_accuracy(relative_accuracy);
    }

    pub fn set_absolute_accuracy(&mut self, absolute_accuracy: Real) {
        self.config.set_absolute_accuracy(absolute_accuracy);
    }

    pub fn set_workspace_size(&mut self, workspace_size: i32) {
        self.config.set_workspace_size(workspace_size);
    }

    pub fn is_valid(&self) -> bool {
        self.config.is_valid()
    }

    pub fn assert_validity(&self) -> QuadResult<()> {
        self.config.assert_validity()
    }

    /// Integrates `fun` from `lower` to `upper`.
    ///
    /// Fails with `ErrorKind::InvalidInput` before evaluating anything if
    /// the configuration is invalid or a bound is NaN. If the integrand
    /// fails, that failure is reported instead of whatever status the
    /// routine returned. Otherwise the routine's status code decides.
    ///
    /// # Panics
    ///
    /// If the routine reports invalid input (`ier = 6`) for a configuration
    /// that passed validation, or an unknown status code.
    pub fn integrate<F: Integrand>(&self, fun: F, lower: Real, upper: Real)
            -> QuadResult<IntegrationResult> {
        self.config.assert_validity()?;
        let interval = Interval::classify(lower, upper)
            .ok_or_else(|| IntegrationError::new(ErrorKind::InvalidInput,
                                                 IntegrationResult::default()))?;
        debug!(lower, upper, ?interval, "dispatching integration");

        // Both sizes are positive after validation.
        let limit = usize::try_from(self.config.max_subdivisions()).unwrap_or(0);
        let lenw = usize::try_from(self.config.workspace_size()).unwrap_or(0);
        let epsabs = self.config.absolute_accuracy();
        let epsrel = self.config.relative_accuracy();

        let mut lp = LandingPad::new(fun);
        let mut wkspc = Workspace::new(limit, lenw);
        let output = match interval {
            Interval::Finite { lower, upper } => unsafe {
                self.routine.qags(lp.callback(), lp.context(),
                                  lower, upper, epsabs, epsrel, &mut wkspc)
            },
            Interval::Infinite { bound, inf } => unsafe {
                self.routine.qagi(lp.callback(), lp.context(),
                                  bound, inf, epsabs, epsrel, &mut wkspc)
            },
        };

        let result = IntegrationResult {
            value: output.value,
            abserr: output.abserr,
            subdivisions: output.last,
            neval: output.neval,
        };
        debug!(ier = output.ier, value = result.value, abserr = result.abserr,
               subdivisions = result.subdivisions, neval = result.neval,
               "routine returned");

        // An integrand fault makes the status code meaningless.
        if let Some(fault) = lp.finish() {
            warn!(%fault, "integrand evaluation failed");
            return Err(IntegrationError::from_fault(fault, result));
        }

        match output.ier {
            0 => Ok(result),
            6 => panic!("quadrature routine rejected a validated configuration \
                         {:?} (ier = 6)", self.config),
            ier => match ErrorKind::from_status(ier) {
                Some(kind) => Err(IntegrationError::new(kind, result)),
                None => panic!("quadrature routine returned unknown status code {}", ier),
            },
        }
    }
}
