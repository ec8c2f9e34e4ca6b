//! Cubic Bézier easing curve with numeric inversion of the x component.
//!
//! A [`Curve`] maps x in [0, 1] to y through a cubic Bézier anchored at
//! (0, 0) and (1, 1) and shaped by two control points `(x1, y1)` and
//! `(x2, y2)`. The x components are confined to [0, 1] so x(t) stays a
//! function of the curve parameter and can be inverted; the y components
//! are free, which permits overshoot below 0 or above 1.
//!
//! Evaluation solves `x(t) = x` numerically: an 11-point table of x(t)
//! brackets the parameter and seeds a linear guess, Newton-Raphson refines
//! it while the local slope stays trustworthy, and bisection takes over on
//! flat stretches where Newton would diverge.
//!
//! # Usage
//!
//! ```rust
//! use curvato_core::Curve;
//!
//! let ease = Curve::new(0.42, 0.0, 0.58, 1.0).unwrap();
//! assert_eq!(ease.evaluate(0.0), 0.0);
//! assert_eq!(ease.evaluate(1.0), 1.0);
//! assert!(ease.evaluate(0.2) < 0.2); // slow start
//! ```

use crate::error::DomainError;
use crate::math::lerp;
use libm::fabsf;

/// Newton-Raphson refinement steps per solve.
const NEWTON_ITERATIONS: usize = 4;
/// Minimum |dx/dt| for Newton-Raphson to remain numerically trustworthy.
const NEWTON_MIN_SLOPE: f32 = 0.001;
/// Bisection stops once the x residual falls below this.
const SUBDIVISION_PRECISION: f32 = 1e-7;
/// Bisection iteration cap.
const SUBDIVISION_MAX_ITERATIONS: usize = 10;
/// Resolution of the bracketing table for x(t).
const SPLINE_TABLE_SIZE: usize = 11;
/// Parameter step between adjacent table entries.
const SAMPLE_STEP: f32 = 1.0 / (SPLINE_TABLE_SIZE as f32 - 1.0);

// One Bézier component collapses to ((A·t + B)·t + C)·t for control
// values a1, a2 once the (0,0) and (1,1) anchors are folded in.
#[inline]
fn poly_a(a1: f32, a2: f32) -> f32 {
    1.0 - 3.0 * a2 + 3.0 * a1
}

#[inline]
fn poly_b(a1: f32, a2: f32) -> f32 {
    3.0 * a2 - 6.0 * a1
}

#[inline]
fn poly_c(a1: f32) -> f32 {
    3.0 * a1
}

/// Evaluate one Bézier component at parameter `t`.
#[inline]
fn sample_component(t: f32, a1: f32, a2: f32) -> f32 {
    ((poly_a(a1, a2) * t + poly_b(a1, a2)) * t + poly_c(a1)) * t
}

/// Derivative of one Bézier component with respect to `t`.
#[inline]
fn sample_slope(t: f32, a1: f32, a2: f32) -> f32 {
    3.0 * poly_a(a1, a2) * t * t + 2.0 * poly_b(a1, a2) * t + poly_c(a1)
}

/// Cubic Bézier easing curve anchored at (0, 0) and (1, 1).
///
/// # Parameters
///
/// - `x1`, `y1`: first control point; `x1` in [0, 1]
/// - `x2`, `y2`: second control point; `x2` in [0, 1]
///
/// # Invariants
///
/// - `evaluate(0.0) == 0.0` and `evaluate(1.0) == 1.0` exactly
/// - Evaluation is deterministic and reads only the precomputed table
#[derive(Debug, Clone)]
pub struct Curve {
    x1: f32,
    y1: f32,
    x2: f32,
    y2: f32,
    /// x(t) at uniform t steps, used to bracket the solve.
    table: [f32; SPLINE_TABLE_SIZE],
    /// Both control points lie on y = x, so the curve is the identity.
    linear: bool,
}

impl Curve {
    /// Create a curve from two control points.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError`] if `x1` or `x2` falls outside [0, 1]. The
    /// y components are unrestricted.
    pub fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Result<Self, DomainError> {
        if !(0.0..=1.0).contains(&x1) {
            return Err(DomainError {
                param: "x1",
                value: x1,
            });
        }
        if !(0.0..=1.0).contains(&x2) {
            return Err(DomainError {
                param: "x2",
                value: x2,
            });
        }

        let linear = x1 == y1 && x2 == y2;
        let mut table = [0.0; SPLINE_TABLE_SIZE];
        if !linear {
            for (i, entry) in table.iter_mut().enumerate() {
                *entry = sample_component(i as f32 * SAMPLE_STEP, x1, x2);
            }
        }

        #[cfg(feature = "tracing")]
        tracing::debug!("curve_new: ({x1}, {y1}) ({x2}, {y2}) linear={linear}");

        Ok(Self {
            x1,
            y1,
            x2,
            y2,
            table,
            linear,
        })
    }

    /// The control points as `(x1, y1, x2, y2)`.
    pub fn control_points(&self) -> (f32, f32, f32, f32) {
        (self.x1, self.y1, self.x2, self.y2)
    }

    /// Map `x` in [0, 1] through the curve.
    ///
    /// The endpoints short-circuit before any solving, so they are exact.
    /// Inputs outside [0, 1] are not clamped; callers keep x in range.
    pub fn evaluate(&self, x: f32) -> f32 {
        if self.linear {
            return x;
        }
        if x == 0.0 || x == 1.0 {
            return x;
        }
        let t = self.solve_t_for_x(x);
        sample_component(t, self.y1, self.y2)
    }

    /// Find the curve parameter whose x component equals `x`.
    fn solve_t_for_x(&self, x: f32) -> f32 {
        // Walk the table to the interval containing x, then seed the
        // solver with a linear interpolation inside that interval.
        let mut interval_start = 0.0;
        let mut current = 1;
        let last = SPLINE_TABLE_SIZE - 1;
        while current != last && self.table[current] <= x {
            interval_start += SAMPLE_STEP;
            current += 1;
        }
        current -= 1;

        let dist =
            (x - self.table[current]) / (self.table[current + 1] - self.table[current]);
        let guess = lerp(interval_start, interval_start + SAMPLE_STEP, dist);

        let initial_slope = sample_slope(guess, self.x1, self.x2);
        if initial_slope >= NEWTON_MIN_SLOPE {
            self.newton_raphson(x, guess)
        } else if initial_slope == 0.0 {
            guess
        } else {
            // Slope too shallow for Newton: bisect the bracketed interval.
            self.binary_subdivide(x, interval_start, interval_start + SAMPLE_STEP)
        }
    }

    fn newton_raphson(&self, x: f32, mut t: f32) -> f32 {
        for _ in 0..NEWTON_ITERATIONS {
            let slope = sample_slope(t, self.x1, self.x2);
            if slope == 0.0 {
                return t;
            }
            let residual = sample_component(t, self.x1, self.x2) - x;
            t -= residual / slope;
        }
        t
    }

    fn binary_subdivide(&self, x: f32, mut lo: f32, mut hi: f32) -> f32 {
        let mut t = lo;
        for _ in 0..SUBDIVISION_MAX_ITERATIONS {
            t = lo + (hi - lo) / 2.0;
            let residual = sample_component(t, self.x1, self.x2) - x;
            if residual > 0.0 {
                hi = t;
            } else {
                lo = t;
            }
            if fabsf(residual) <= SUBDIVISION_PRECISION {
                break;
            }
        }
        t
    }
}
