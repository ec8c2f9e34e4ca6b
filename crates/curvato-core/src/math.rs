//! Small math helpers shared across the crate.
//!
//! Allocation-free and `no_std`-friendly. These cover the handful of
//! conversions and blends the curve, envelope, and dynamics code keeps
//! reaching for.

use libm::ceilf;

/// Linear interpolation between two values.
///
/// # Arguments
/// * `a` - Start value (at t=0)
/// * `b` - End value (at t=1)
/// * `t` - Interpolation factor (0.0 to 1.0)
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Crossfade between dry and wet signals.
///
/// Equivalent to `dry * (1 - mix) + wet * mix` but uses one fewer multiply:
/// `dry + (wet - dry) * mix`.
///
/// # Arguments
///
/// * `dry` - Unprocessed signal
/// * `wet` - Processed signal
/// * `mix` - Blend factor in \[0.0, 1.0\]: 0.0 = all dry, 1.0 = all wet
#[inline]
pub fn wet_dry_mix(dry: f32, wet: f32, mix: f32) -> f32 {
    dry + (wet - dry) * mix
}

/// Convert a duration in seconds to a whole sample count, rounding up.
///
/// Rounding up keeps sub-sample durations audible: any positive duration
/// maps to at least one sample at a positive rate.
#[inline]
pub fn seconds_to_samples(seconds: f32, sample_rate: f32) -> u32 {
    ceilf(seconds * sample_rate) as u32
}
