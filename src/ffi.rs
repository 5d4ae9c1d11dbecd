//! The bridge between a Rust integrand and the routine's C callback.
//!
//! The routine calls back into Rust through `landing_pad_callback`, handing
//! it a buffer of points to overwrite in place. Unwinding out of that
//! callback and through the routine's frames is undefined behavior, so
//! nothing may escape it: every evaluation runs under `catch_unwind`, and
//! any failure (a panic, an `Err`, or a non-finite value) is parked in the
//! `LandingPad`. Once foreign code has returned, the caller takes the fault
//! back out with `finish()` and reports it through ordinary Rust code.

use std::any::Any;
use std::mem;
use std::os::raw::{c_int, c_void};
use std::panic::{self, AssertUnwindSafe};
use std::slice;

use tracing::trace;

use super::error::{IntegrandFault, UNKNOWN_ERROR};
use super::traits::{Integrand, RawIntegrand};
use super::Real;

/// Context record passed to the routine: the integrand plus a slot for the
/// first fault it produced.
pub struct LandingPad<F> {
    fun: F,
    pending: Option<IntegrandFault>,
}

impl<F: Integrand> LandingPad<F> {
    pub fn new(fun: F) -> Self {
        LandingPad { fun, pending: None }
    }

    pub fn has_fault(&self) -> bool {
        self.pending.is_some()
    }

    /// Overwrites every point in `xs` with the integrand's value there.
    ///
    /// On the first fault the rest of the buffer, including the failing
    /// point, is zero-filled and the fault is recorded. After that the
    /// integrand is not called again: later batches are zero-filled whole.
    pub fn transform(&mut self, xs: &mut [Real]) {
        if self.pending.is_some() {
            zero_fill(xs);
            return;
        }
        for i in 0..xs.len() {
            let x = xs[i];
            let fun = &mut self.fun;
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
                match fun.evaluate(x) {
                    Ok(value) if value.is_finite() => Ok(value),
                    Ok(value) => Err(IntegrandFault::NonFinite { x, value }),
                    Err(err) => Err(IntegrandFault::Failed(err)),
                }
            }));
            let fault = match outcome {
                Ok(Ok(value)) => {
                    xs[i] = value;
                    continue;
                },
                Ok(Err(fault)) => fault,
                Err(payload) => fault_from_panic(payload),
            };
            zero_fill(&mut xs[i..]);
            self.pending = Some(fault);
            return;
        }
    }

    /// The C callback to hand to the routine along with `context()`.
    pub fn callback(&self) -> RawIntegrand {
        landing_pad_callback::<F>
    }

    /// Opaque pointer to this pad, valid as long as the pad is neither moved
    /// nor dropped.
    pub fn context(&mut self) -> *mut c_void {
        self as *mut LandingPad<F> as *mut c_void
    }

    /// Consumes the pad, yielding the recorded fault if there was one.
    pub fn finish(self) -> Option<IntegrandFault> {
        self.pending
    }
}

/// Reading and dropping the payload runs user code too, so it is guarded
/// as well. A payload whose `Drop` panics is leaked.
fn fault_from_panic(payload: Box<dyn Any + Send + 'static>) -> IntegrandFault {
    panic::catch_unwind(AssertUnwindSafe(move || IntegrandFault::from_panic(payload)))
        .unwrap_or_else(|nested| {
            mem::forget(nested);
            IntegrandFault::Panicked(UNKNOWN_ERROR.to_owned())
        })
}

fn zero_fill(xs: &mut [Real]) {
    for x in xs.iter_mut() {
        *x = 0.0;
    }
}

/// # Safety
///
/// `ex` must point to a live `LandingPad<F>` not otherwise borrowed, and `x`
/// must point to `n` writable reals.
unsafe extern "C"
fn landing_pad_callback<F: Integrand>(x: *mut Real, n: c_int, ex: *mut c_void) {
    if x.is_null() || ex.is_null() || n <= 0 {
        return;
    }
    let pad: &mut LandingPad<F> = &mut *(ex as *mut LandingPad<F>);
    let xs = slice::from_raw_parts_mut(x, n as usize);
    trace!(n, "evaluating integrand batch");
    pad.transform(xs);
}
