//! Errors raised by an integration.
//!
//! There is a single error type, `IntegrationError`. Callers tell failures
//! apart by `kind()` (what went wrong) or `category()` (whether the input was
//! bad or the computation itself failed), never by type. Every error carries
//! the `IntegrationResult` the routine had reached when it stopped, so a
//! caller can still look at the best estimate.

use std::any::Any;
use std::error;
use std::fmt;

use thiserror::Error;

use super::{IntegrationResult, Real};

/// Broad class of an `IntegrationError`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// A precondition was violated: an invalid `Config` or a NaN bound.
    Logic,
    /// The integration itself failed.
    Runtime,
}

/// What went wrong. The first six mirror the routine's `ier` codes 1 to 6.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// `ier = 1`: the maximum number of subdivisions was reached. Allowing
    /// more subdivisions may help; if not, splitting the interval at a known
    /// singularity or discontinuity usually does.
    MaxSubdivisions,
    /// `ier = 2`: roundoff error prevents the requested tolerance from being
    /// reached. The error estimate may be too small.
    Roundoff,
    /// `ier = 3`: extremely bad integrand behaviour at some points of the
    /// interval.
    BadIntegrand,
    /// `ier = 4`: the algorithm does not converge because of roundoff in the
    /// extrapolation table. The returned result is the best obtainable.
    ExtrapolationRoundoff,
    /// `ier = 5`: the integral is probably divergent, or converges too slowly.
    Divergence,
    /// `ier = 6`: invalid configuration or bounds. Caught before the routine
    /// is ever called.
    InvalidInput,
    /// The integrand panicked or returned an error.
    IntegrandFailure,
    /// The integrand returned NaN or an infinity.
    NonFiniteValue,
}

impl ErrorKind {
    pub fn category(self) -> ErrorCategory {
        match self {
            ErrorKind::InvalidInput => ErrorCategory::Logic,
            _ => ErrorCategory::Runtime,
        }
    }

    /// The routine status code for this kind, if it has one.
    pub fn status_code(self) -> Option<i32> {
        use self::ErrorKind::*;
        match self {
            MaxSubdivisions => Some(1),
            Roundoff => Some(2),
            BadIntegrand => Some(3),
            ExtrapolationRoundoff => Some(4),
            Divergence => Some(5),
            InvalidInput => Some(6),
            IntegrandFailure | NonFiniteValue => None,
        }
    }

    /// Maps a non-zero routine status code to its kind. `0` (success) and
    /// codes outside `1..=6` yield `None`.
    pub fn from_status(ier: i32) -> Option<Self> {
        use self::ErrorKind::*;
        match ier {
            1 => Some(MaxSubdivisions),
            2 => Some(Roundoff),
            3 => Some(BadIntegrand),
            4 => Some(ExtrapolationRoundoff),
            5 => Some(Divergence),
            6 => Some(InvalidInput),
            _ => None,
        }
    }

    pub fn description(self) -> &'static str {
        use self::ErrorKind::*;
        match self {
            MaxSubdivisions => "maximum number of subdivisions reached",
            Roundoff => "roundoff error was detected",
            BadIntegrand => "extremely bad integrand behaviour",
            ExtrapolationRoundoff => "roundoff error is detected in the extrapolation table",
            Divergence => "the integral is probably divergent",
            InvalidInput => "the input is invalid",
            IntegrandFailure => "evaluation of the integrand failed",
            NonFiniteValue => "non-finite function value",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt.write_str(self.description())
    }
}

/// Message for a panic whose payload is not a string.
pub const UNKNOWN_ERROR: &str = "Unknown error";

/// A failure captured inside the integrand while the routine was running.
#[derive(Debug, Error)]
pub enum IntegrandFault {
    /// A fallible integrand returned `Err`.
    #[error("{0}")]
    Failed(Box<dyn error::Error + Send + Sync + 'static>),
    /// The integrand panicked. Holds the panic message, or `"Unknown error"`
    /// when the payload was not a string.
    #[error("{0}")]
    Panicked(String),
    /// The integrand returned `value` at `x`.
    #[error("non-finite function value {value} at x = {x}")]
    NonFinite { x: Real, value: Real },
}

impl IntegrandFault {
    /// Builds an `IntegrandFault` from the payload of a caught panic.
    pub fn from_panic(payload: Box<dyn Any + Send + 'static>) -> Self {
        let message = if let Some(msg) = payload.downcast_ref::<&'static str>() {
            (*msg).to_owned()
        } else if let Some(msg) = payload.downcast_ref::<String>() {
            msg.clone()
        } else {
            UNKNOWN_ERROR.to_owned()
        };
        IntegrandFault::Panicked(message)
    }

    /// The `ErrorKind` this fault surfaces as.
    pub fn kind(&self) -> ErrorKind {
        match self {
            IntegrandFault::NonFinite { .. } => ErrorKind::NonFiniteValue,
            _ => ErrorKind::IntegrandFailure,
        }
    }
}

/// The error type of every fallible operation in this crate.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct IntegrationError {
    kind: ErrorKind,
    message: String,
    result: IntegrationResult,
    #[source]
    cause: Option<IntegrandFault>,
}

impl IntegrationError {
    /// Uses the kind's description as the message.
    pub fn new(kind: ErrorKind, result: IntegrationResult) -> Self {
        IntegrationError::with_message(kind, kind.description(), result)
    }

    pub fn with_message<S: Into<String>>(kind: ErrorKind, message: S,
                                         result: IntegrationResult) -> Self {
        IntegrationError {
            kind,
            message: message.into(),
            result,
            cause: None,
        }
    }

    /// Wraps a fault captured by the callback bridge. The message embeds the
    /// fault's own message; the fault stays reachable through `source()`.
    pub fn from_fault(fault: IntegrandFault, result: IntegrationResult) -> Self {
        let kind = fault.kind();
        let message = match &fault {
            IntegrandFault::NonFinite { .. } => kind.description().to_owned(),
            other => format!("{}: {}", kind.description(), other),
        };
        IntegrationError {
            kind,
            message,
            result,
            cause: Some(fault),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn category(&self) -> ErrorCategory {
        self.kind.category()
    }

    pub fn is_logic(&self) -> bool {
        self.category() == ErrorCategory::Logic
    }

    pub fn is_runtime(&self) -> bool {
        self.category() == ErrorCategory::Runtime
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// The result reached before the failure. Use with caution.
    pub fn result(&self) -> IntegrationResult {
        self.result
    }

    /// The captured integrand fault, for `IntegrandFailure` and
    /// `NonFiniteValue`.
    pub fn fault(&self) -> Option<&IntegrandFault> {
        self.cause.as_ref()
    }

    pub fn into_result(self) -> IntegrationResult {
        self.result
    }
}

pub type QuadResult<T> = Result<T, IntegrationError>;
