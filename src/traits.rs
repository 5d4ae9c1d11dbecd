use std::error;
use std::os::raw::{c_int, c_void};

use super::Real;

/// A real function of one real variable, as seen by the integrator.
///
/// Any `FnMut(Real) -> Real` is an `Integrand`. Integrands that can fail
/// without panicking should be wrapped in `Fallible`.
pub trait Integrand {
    fn evaluate(&mut self, x: Real) -> Result<Real, Box<dyn error::Error + Send + Sync>>;
}

impl<F: FnMut(Real) -> Real> Integrand for F {
    fn evaluate(&mut self, x: Real) -> Result<Real, Box<dyn error::Error + Send + Sync>> {
        Ok(self(x))
    }
}

/// Adapts a closure returning `Result` into an `Integrand`. The first `Err`
/// stops the integration and is reported through `IntegrationError::source`.
#[derive(Clone, Copy, Debug)]
pub struct Fallible<F>(pub F);

impl<F, E> Integrand for Fallible<F>
    where F: FnMut(Real) -> Result<Real, E>,
          E: Into<Box<dyn error::Error + Send + Sync>>
{
    fn evaluate(&mut self, x: Real) -> Result<Real, Box<dyn error::Error + Send + Sync>> {
        (self.0)(x).map_err(Into::into)
    }
}

/// The batch callback of the quadrature routine: overwrite each of the `n`
/// points at `x` with the integrand's value there. `ex` is the context
/// pointer given to the routine, passed back verbatim.
pub type RawIntegrand = unsafe extern "C" fn(x: *mut Real, n: c_int, ex: *mut c_void);

/// Which side(s) of `bound` an infinite-interval integration extends to.
/// The discriminants are the routine's `inf` codes.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Infinity {
    /// `(bound, +inf)`
    LowerBounded = 1,
    /// `(-inf, bound)`
    UpperBounded = -1,
    /// `(-inf, +inf)`; `bound` is ignored.
    Both = 2,
}

impl Infinity {
    pub fn code(self) -> c_int {
        self as c_int
    }
}

/// Scratch arrays for one call of the routine: `iwork` holds `limit`
/// integers, `work` holds `lenw` reals. Never reused between calls.
#[derive(Clone, Debug)]
pub struct Workspace {
    pub iwork: Vec<c_int>,
    pub work: Vec<Real>,
}

impl Workspace {
    pub fn new(limit: usize, lenw: usize) -> Self {
        Workspace {
            iwork: vec![0; limit],
            work: vec![0.0; lenw],
        }
    }

    pub fn limit(&self) -> c_int {
        self.iwork.len() as c_int
    }

    pub fn lenw(&self) -> c_int {
        self.work.len() as c_int
    }
}

/// Everything the routine reports through its output parameters.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct RoutineOutput {
    pub value: Real,
    pub abserr: Real,
    pub neval: c_int,
    pub ier: c_int,
    /// Number of subintervals in the final partition.
    pub last: c_int,
}

/// An adaptive quadrature routine driven through a batch callback, with the
/// calling convention of R's `Rdqags`/`Rdqagi`.
///
/// Implementations must only ever call `f` with `ex` as its context pointer
/// and with a buffer of `n` valid, writable points, and must return only
/// after the last call to `f`.
pub trait QuadratureRoutine {
    /// Integrates over the finite interval `(lower, upper)`.
    ///
    /// # Safety
    ///
    /// `ex` must be a context pointer `f` accepts, valid for the whole call.
    unsafe fn qags(&self, f: RawIntegrand, ex: *mut c_void,
                   lower: Real, upper: Real,
                   epsabs: Real, epsrel: Real,
                   wkspc: &mut Workspace) -> RoutineOutput;

    /// Integrates over an infinite interval described by `bound` and `inf`.
    ///
    /// # Safety
    ///
    /// Same as `qags`.
    unsafe fn qagi(&self, f: RawIntegrand, ex: *mut c_void,
                   bound: Real, inf: Infinity,
                   epsabs: Real, epsrel: Real,
                   wkspc: &mut Workspace) -> RoutineOutput;
}

impl<'a, Q: QuadratureRoutine + ?Sized> QuadratureRoutine for &'a Q {
    unsafe fn qags(&self, f: RawIntegrand, ex: *mut c_void, lower: Real, upper: Real,
                   epsabs: Real, epsrel: Real, wkspc: &mut Workspace) -> RoutineOutput {
        (**self).qags(f, ex, lower, upper, epsabs, epsrel, wkspc)
    }

    unsafe fn qagi(&self, f: RawIntegrand, ex: *mut c_void, bound: Real, inf: Infinity,
                   epsabs: Real, epsrel: Real, wkspc: &mut Workspace) -> RoutineOutput {
        (**self).qagi(f, ex, bound, inf, epsabs, epsrel, wkspc)
    }
}

#[cfg(test)]
mod test_traits {
    use std::fmt;

    use super::*;

    #[derive(Debug)]
    struct Negative(Real);

    impl fmt::Display for Negative {
        fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
            write!(fmt, "negative argument {}", self.0)
        }
    }

    impl error::Error for Negative {}

    #[test]
    fn test_closure_integrand() {
        let mut calls = 0;
        let mut f = |x: Real| {
            calls += 1;
            2.0 * x
        };
        assert_eq!(f.evaluate(1.5).ok(), Some(3.0));
        assert_eq!(calls, 1);
    }

    #[test]
    fn test_fallible_integrand() {
        let mut f = Fallible(|x: Real| if x < 0.0 { Err(Negative(x)) } else { Ok(x.sqrt()) });
        assert_eq!(f.evaluate(4.0).ok(), Some(2.0));
        let err = f.evaluate(-1.0).unwrap_err();
        assert_eq!(err.to_string(), "negative argument -1");

        let mut g = Fallible(|_: Real| Err::<Real, _>("plain message"));
        assert_eq!(g.evaluate(0.0).unwrap_err().to_string(), "plain message");
    }

    #[test]
    fn test_infinity_codes() {
        assert_eq!(Infinity::LowerBounded.code(), 1);
        assert_eq!(Infinity::UpperBounded.code(), -1);
        assert_eq!(Infinity::Both.code(), 2);
    }

    #[test]
    fn test_workspace_sizes() {
        let wkspc = Workspace::new(100, 400);
        assert_eq!(wkspc.limit(), 100);
        assert_eq!(wkspc.lenw(), 400);
        assert!(wkspc.iwork.iter().all(|&i| i == 0));
    }
}
