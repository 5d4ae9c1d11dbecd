//! R's native adaptive quadrature, `Rdqags` and `Rdqagi` from
//! `<R_ext/Applic.h>`. Both are QUADPACK's `dqagse`/`dqagie` with a
//! vectorized callback. See `src/appl/integrate.c` in the R sources.

use std::os::raw::c_void;

use super::bindings;
use super::traits::{Infinity, QuadratureRoutine, RawIntegrand, RoutineOutput, Workspace};
use super::Real;


/// The routines in the linked `libR`. They only compute; R itself does not
/// need to be initialized.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct RApplic;

impl QuadratureRoutine for RApplic {
    unsafe fn qags(&self, f: RawIntegrand, ex: *mut c_void,
                   lower: Real, upper: Real,
                   epsabs: Real, epsrel: Real,
                   wkspc: &mut Workspace) -> RoutineOutput {
        let mut a = lower;
        let mut b = upper;
        let mut epsabs = epsabs;
        let mut epsrel = epsrel;
        let mut limit = wkspc.limit();
        let mut lenw = wkspc.lenw();
        let mut out = RoutineOutput::default();
        bindings::Rdqags(Some(f), ex,
                         &mut a, &mut b,
                         &mut epsabs, &mut epsrel,
                         &mut out.value, &mut out.abserr,
                         &mut out.neval, &mut out.ier,
                         &mut limit, &mut lenw, &mut out.last,
                         wkspc.iwork.as_mut_ptr(),
                         wkspc.work.as_mut_ptr());
        out
    }

    unsafe fn qagi(&self, f: RawIntegrand, ex: *mut c_void,
                   bound: Real, inf: Infinity,
                   epsabs: Real, epsrel: Real,
                   wkspc: &mut Workspace) -> RoutineOutput {
        let mut bound = bound;
        let mut inf = inf.code();
        let mut epsabs = epsabs;
        let mut epsrel = epsrel;
        let mut limit = wkspc.limit();
        let mut lenw = wkspc.lenw();
        let mut out = RoutineOutput::default();
        bindings::Rdqagi(Some(f), ex,
                         &mut bound, &mut inf,
                         &mut epsabs, &mut epsrel,
                         &mut out.value, &mut out.abserr,
                         &mut out.neval, &mut out.ier,
                         &mut limit, &mut lenw, &mut out.last,
                         wkspc.iwork.as_mut_ptr(),
                         wkspc.work.as_mut_ptr());
        out
    }
}
