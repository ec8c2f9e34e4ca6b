//! Scalar function minimization via bracketing and Brent's method.
//!
//! [`minimize_scalar`] walks downhill from the interval [0, 1] with
//! golden-ratio expansion until a bracket encloses a local minimum, then
//! refines it with Brent's combination of parabolic interpolation and
//! golden-section steps. No derivatives are required.
//!
//! This backs the peak normalization of
//! [`DoubleEmaAdEnvelope`](crate::decay::DoubleEmaAdEnvelope), whose peak
//! position has no closed form. Everything runs in f64 because the
//! convergence tolerances sit below f32 resolution.
//!
//! # Reference
//!
//! Brent, "Algorithms for Minimization Without Derivatives", chapter 5;
//! layout follows the scipy `minimize_scalar` formulation.

use libm::fabs;

/// Golden ratio, (1 + sqrt(5)) / 2.
const GOLD: f64 = 1.618034;
/// Cap on how far a parabolic bracket step may overshoot.
const GROW_LIMIT: f64 = 110.0;
const MAX_BRACKET_ITERATIONS: usize = 1000;

/// Golden-section fraction, 2 - GOLD.
const CG: f64 = 0.3819660;
/// Absolute floor on the convergence tolerance.
const MINTOL: f64 = 1.0e-11;
/// Relative convergence tolerance.
const TOL: f64 = 1.48e-8;
const MAX_ITERATIONS: usize = 64;

/// A located minimum: the argument and the function value there.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Minimum {
    /// Argument at which the minimum was found.
    pub x: f64,
    /// Function value at [`x`](Minimum::x).
    pub value: f64,
}

/// Find a local minimum of `func`, searching outward from [0, 1].
///
/// The bracket phase evaluates `func` at 0 and 1, orients itself downhill
/// and expands by the golden ratio (with parabolic shortcuts) until the
/// function value rises again. Brent's method then narrows the bracket.
/// Convergence is to roughly `1.48e-8 * |x|` absolute precision in the
/// argument.
pub fn minimize_scalar<F>(func: F) -> Minimum
where
    F: Fn(f64) -> f64,
{
    // Bracket the minimum: after this block the positions xa, xb, xc
    // satisfy f(xb) <= f(xa), f(xb) <= f(xc) with xb between the others.
    let mut xa = 0.0_f64;
    let mut xb = 1.0_f64;
    let mut fa = func(xa);
    let mut fb = func(xb);
    if fa < fb {
        core::mem::swap(&mut xa, &mut xb);
        core::mem::swap(&mut fa, &mut fb);
    }
    let mut xc = xb + GOLD * (xb - xa);
    let mut fc = func(xc);
    let mut iter = 0;

    while fc < fb {
        let tmp1 = (xb - xa) * (fb - fc);
        let tmp2 = (xb - xc) * (fb - fa);
        let val = tmp2 - tmp1;
        let denom = if fabs(val) < f64::EPSILON {
            2.0 * f64::EPSILON
        } else {
            2.0 * val
        };
        let mut w = xb - ((xb - xc) * tmp2 - (xb - xa) * tmp1) / denom;
        let wlim = xb + GROW_LIMIT * (xc - xb);

        if iter > MAX_BRACKET_ITERATIONS {
            break;
        }
        iter += 1;

        let mut fw;
        if (w - xc) * (xb - w) > 0.0 {
            // Parabolic candidate between xb and xc.
            fw = func(w);
            if fw < fc {
                xa = xb;
                xb = w;
                break;
            } else if fw > fb {
                xc = w;
                break;
            }
            w = xc + GOLD * (xc - xb);
            fw = func(w);
        } else if (w - wlim) * (wlim - xc) >= 0.0 {
            // Candidate beyond the growth limit: clamp to it.
            w = wlim;
            fw = func(w);
        } else if (w - wlim) * (xc - w) > 0.0 {
            fw = func(w);
            if fw < fc {
                xb = xc;
                xc = w;
                w = xc + GOLD * (xc - xb);
                fb = fc;
                fc = fw;
                fw = func(w);
            }
        } else {
            w = xc + GOLD * (xc - xb);
            fw = func(w);
        }
        xa = xb;
        xb = xc;
        xc = w;
        fa = fb;
        fb = fc;
        fc = fw;
    }

    // Brent refinement inside [min(xa, xc), max(xa, xc)].
    let mut x = xb;
    let mut w = xb;
    let mut v = xb;

    let mut fw = func(x);
    let mut fv = fw;
    let mut fx = fw;

    let (mut a, mut b) = if xa < xc { (xa, xc) } else { (xc, xa) };

    let mut deltax = 0.0_f64;
    let mut rat = 0.0_f64;
    let mut iter = 0;

    while iter < MAX_ITERATIONS {
        let tol1 = TOL * fabs(x) + MINTOL;
        let tol2 = 2.0 * tol1;
        let xmid = 0.5 * (a + b);

        if fabs(x - xmid) < tol2 - 0.5 * (b - a) {
            break;
        }

        if fabs(deltax) <= tol1 {
            // Golden-section step toward the larger side.
            deltax = if x >= xmid { a - x } else { b - x };
            rat = CG * deltax;
        } else {
            // Parabolic step through (v, w, x).
            let tmp1 = (x - w) * (fx - fv);
            let mut tmp2 = (x - v) * (fx - fw);
            let mut p = (x - v) * tmp2 - (x - w) * tmp1;
            tmp2 = 2.0 * (tmp2 - tmp1);
            if tmp2 > 0.0 {
                p = -p;
            }
            tmp2 = fabs(tmp2);
            let dx_temp = deltax;
            deltax = rat;

            let fit_usable = p > tmp2 * (a - x)
                && p < tmp2 * (b - x)
                && fabs(p) < fabs(0.5 * tmp2 * dx_temp);
            if fit_usable {
                rat = p / tmp2;
                let u = x + rat;
                if (u - a) < tol2 || (b - u) < tol2 {
                    rat = if xmid - x >= 0.0 { tol1 } else { -tol1 };
                }
            } else {
                deltax = if x >= xmid { a - x } else { b - x };
                rat = CG * deltax;
            }
        }

        // Never step by less than the tolerance.
        let u = if fabs(rat) < tol1 {
            if rat >= 0.0 { x + tol1 } else { x - tol1 }
        } else {
            x + rat
        };

        let fu = func(u);

        if fu > fx {
            if u < x {
                a = u;
            } else {
                b = u;
            }
            if fu <= fw || w == x {
                v = w;
                w = u;
                fv = fw;
                fw = fu;
            } else if fu <= fv || v == x || v == w {
                v = u;
                fv = fu;
            }
        } else {
            if u >= x {
                a = x;
            } else {
                b = x;
            }
            v = w;
            w = x;
            x = u;
            fv = fw;
            fw = fx;
            fx = fu;
        }

        iter += 1;
    }

    Minimum { x, value: fx }
}
