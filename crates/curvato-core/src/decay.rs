//! Self-running attack/decay envelope generators.
//!
//! Unlike the [`Processor`](crate::Processor) shapes, these take no input
//! signal: each [`advance`] call steps the envelope one sample and
//! returns its level, for multiplying into a voice. All parameters are
//! fixed at construction, including the gain that normalizes the peak, so
//! a generator is built per note and discarded afterward.
//!
//! - [`ExpAdEnvelope`] - independent exponential attack and decay stages
//! - [`ExpPolyEnvelope`] - polynomial-times-exponential hump, `t^a e^(bt)`
//! - [`DoubleEmaAdEnvelope`] - cascaded one-pole pairs with a numerically
//!   located peak
//!
//! [`advance`]: ExpAdEnvelope::advance

use crate::brent::minimize_scalar;
use crate::error::InvalidConfiguration;
use libm::{cos, expf, logf, pow, powf, sqrt};

/// One-pole EMA coefficient with cutoff at `1 / time_in_samples` of the
/// sample rate.
///
/// Closed form: `y = 1 - cos(2 pi / n)`, `kp = -y + sqrt(y (y + 2))`.
/// Times below f64 epsilon collapse to a coefficient of 1, an instant
/// step.
pub fn samples_to_kp(time_in_samples: f64) -> f64 {
    if time_in_samples < f64::EPSILON {
        return 1.0;
    }
    let y = 1.0 - cos(2.0 * core::f64::consts::PI / time_in_samples);
    -y + sqrt(y * (y + 2.0))
}

/// Exponential attack/decay envelope with an analytically normalized peak.
///
/// Both stages are exponential approaches truncated at `threshold`: the
/// attack multiplier is `threshold^(1/attack_samples)` so the rise spends
/// `attack_samples` covering all but `threshold` of its travel, and
/// likewise for the fall. The peak position has a closed form, so the
/// normalizing gain is computed directly at construction.
///
/// The output crosses zero once the decay stage reaches its threshold and
/// settles just below zero afterward; callers treating it as an amplitude
/// envelope stop reading it around that point.
#[derive(Debug, Clone)]
pub struct ExpAdEnvelope {
    value_a: f32,
    value_d: f32,
    alpha_a: f32,
    alpha_d: f32,
    threshold: f32,
    gain: f32,
    peak: f32,
}

impl ExpAdEnvelope {
    /// Conventional truncation threshold, -60 dB.
    pub const DEFAULT_THRESHOLD: f32 = 1e-3;

    /// Create an envelope with the default threshold.
    ///
    /// Attack and decay lengths below one sample are clamped to one.
    pub fn new(attack_samples: f32, decay_samples: f32) -> Result<Self, InvalidConfiguration> {
        Self::with_threshold(attack_samples, decay_samples, Self::DEFAULT_THRESHOLD)
    }

    /// Create an envelope with an explicit truncation threshold.
    ///
    /// # Errors
    ///
    /// `threshold` must lie strictly inside (0, 1) for the stage
    /// multipliers to decay.
    pub fn with_threshold(
        attack_samples: f32,
        decay_samples: f32,
        threshold: f32,
    ) -> Result<Self, InvalidConfiguration> {
        if threshold <= 0.0 || threshold >= 1.0 {
            return Err(InvalidConfiguration::Threshold(threshold));
        }
        let attack_samples = attack_samples.max(1.0);
        let decay_samples = decay_samples.max(1.0);

        let alpha_a = powf(threshold, 1.0 / attack_samples);
        let alpha_d = powf(threshold, 1.0 / decay_samples);

        // Analytic peak of (1 - alpha_a^t) * alpha_d^t.
        let log_a = logf(alpha_a);
        let log_d = logf(alpha_d);
        let peak = logf(log_d / (log_a + log_d)) / log_a;
        let gain = 1.0 / ((1.0 - powf(alpha_a, peak)) * powf(alpha_d, peak));

        #[cfg(feature = "tracing")]
        tracing::debug!(
            "exp_ad_new: attack={attack_samples} decay={decay_samples} peak={peak} gain={gain}"
        );

        Ok(Self {
            value_a: 1.0,
            value_d: 1.0,
            alpha_a,
            alpha_d,
            threshold,
            gain,
            peak,
        })
    }

    /// Sample position of the envelope peak, possibly fractional.
    pub fn peak_samples(&self) -> f32 {
        self.peak
    }

    /// Step one sample and return the envelope level.
    #[inline]
    pub fn advance(&mut self) -> f32 {
        self.value_a *= self.alpha_a;
        self.value_d *= self.alpha_d;
        self.gain * (1.0 - self.threshold - self.value_a) * (self.value_d - self.threshold)
    }
}

/// Polynomial-times-exponential envelope, `gain * t^a * e^(b t)`.
///
/// With `a = attack_seconds * curve` and `b = -curve` the profile rises
/// from zero, peaks at exactly `t = attack_seconds`, and decays with a
/// tail whose weight `curve` trades attack sharpness against decay
/// length. `gain` scales the peak to 1.
#[derive(Debug, Clone)]
pub struct ExpPolyEnvelope {
    time: f32,
    delta: f32,
    a: f32,
    b: f32,
    gain: f32,
}

impl ExpPolyEnvelope {
    /// Create an envelope peaking at `attack_seconds`.
    ///
    /// `curve` is expected positive; larger values pull the hump tighter
    /// around the peak.
    ///
    /// # Errors
    ///
    /// `sample_rate` and `attack_seconds` must be positive.
    pub fn new(
        sample_rate: f32,
        attack_seconds: f32,
        curve: f32,
    ) -> Result<Self, InvalidConfiguration> {
        if sample_rate <= 0.0 {
            return Err(InvalidConfiguration::SampleRate(sample_rate));
        }
        if attack_seconds <= 0.0 {
            return Err(InvalidConfiguration::AttackTime(attack_seconds));
        }
        let a = attack_seconds * curve;
        let b = -curve;
        let gain = 1.0 / (powf(attack_seconds, a) * expf(b * attack_seconds));

        Ok(Self {
            time: 0.0,
            delta: 1.0 / sample_rate,
            a,
            b,
            gain,
        })
    }

    /// Elapsed time in seconds.
    pub fn elapsed(&self) -> f32 {
        self.time
    }

    /// Step one sample and return the envelope level.
    #[inline]
    pub fn advance(&mut self) -> f32 {
        self.time += self.delta;
        self.gain * powf(self.time, self.a) * expf(self.b * self.time)
    }
}

/// Closed-form double-EMA attack/decay response at continuous sample
/// position `n`, negated so a minimizer locates the peak.
fn negated_response(n: f64, k_a: f64, k_d: f64) -> f64 {
    let attack = pow(1.0 - k_a, n + 1.0) * (k_a * n + k_a + 1.0);
    let decay = pow(1.0 - k_d, n + 1.0) * (k_d * n + k_d + 1.0);
    (attack - 1.0) * decay
}

/// Attack/decay envelope from two cascaded one-pole pairs.
///
/// The attack pair relaxes from 0 toward 1 and the decay pair from 1
/// toward 0; their product is a smooth hump with continuous first
/// derivative at the onset, noticeably rounder than [`ExpAdEnvelope`].
/// The peak position has no closed form, so construction minimizes the
/// negated closed-form response with
/// [`minimize_scalar`](crate::brent::minimize_scalar) and folds the
/// normalizing gain into `target_amplitude`.
#[derive(Debug, Clone)]
pub struct DoubleEmaAdEnvelope {
    v1_a: f32,
    v2_a: f32,
    v1_d: f32,
    v2_d: f32,
    k_a: f32,
    k_d: f32,
    gain: f32,
    peak_point: u32,
    attack_counter: u32,
}

impl DoubleEmaAdEnvelope {
    /// Create an envelope peaking at `target_amplitude`.
    ///
    /// Stage times at or below zero samples collapse that stage to an
    /// instant step.
    pub fn new(target_amplitude: f32, attack_samples: f32, decay_samples: f32) -> Self {
        let k_a = samples_to_kp(f64::from(attack_samples));
        let k_d = samples_to_kp(f64::from(decay_samples));

        let (gain, peak_point) = if k_a == 1.0 || k_d == 1.0 {
            (1.0, attack_samples as u32)
        } else {
            let found = minimize_scalar(|n| negated_response(n, k_a, k_d));
            let peak = -found.value;
            let gain = if peak < f64::EPSILON { 1.0 } else { 1.0 / peak };
            (gain, (found.x as u32).saturating_add(1))
        };

        #[cfg(feature = "tracing")]
        tracing::debug!(
            "double_ema_new: k_a={k_a} k_d={k_d} gain={gain} peak_point={peak_point}"
        );

        Self {
            v1_a: 0.0,
            v2_a: 0.0,
            v1_d: 1.0,
            v2_d: 1.0,
            k_a: k_a as f32,
            k_d: k_d as f32,
            gain: (gain * f64::from(target_amplitude)) as f32,
            peak_point,
            attack_counter: 0,
        }
    }

    /// Sample position of the envelope peak.
    pub fn peak_samples(&self) -> u32 {
        self.peak_point
    }

    /// Whether the envelope is still rising toward its peak.
    pub fn is_attacking(&self) -> bool {
        self.attack_counter < self.peak_point
    }

    /// Step one sample and return the envelope level.
    #[inline]
    pub fn advance(&mut self) -> f32 {
        if self.attack_counter < self.peak_point {
            self.attack_counter += 1;
        }

        self.v1_a += self.k_a * (1.0 - self.v1_a);
        self.v2_a += self.k_a * (self.v1_a - self.v2_a);

        // The decay pair tracks a zero target.
        self.v1_d -= self.k_d * self.v1_d;
        self.v2_d += self.k_d * (self.v1_d - self.v2_d);

        self.gain * self.v2_a * self.v2_d
    }
}
