//! Soft-knee limiter with curve-shaped engage and disengage ramps.
//!
//! Hard gain switching at a threshold clicks. This limiter crossfades
//! between the dry signal and the fully limited signal instead, with the
//! crossfade amount read off an [`Envelope`] shape, so the knee follows
//! whatever curve the caller picked.

use curvato_core::{Envelope, InvalidConfiguration, Processor, seconds_to_samples, wet_dry_mix};
use libm::{ceilf, fabsf};

/// Which ramp the limiter applied to the most recent sample.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LimiterState {
    /// Signal below threshold with no ramp running; passed through.
    #[default]
    Bypass,
    /// Loud signal, gain reduction still ramping in.
    Attack,
    /// Loud signal, fully limited.
    Sustain,
    /// Signal fell below threshold, gain reduction ramping out.
    Release,
}

/// Soft-knee limiter driven by an envelope shape.
///
/// While the input magnitude sits at or above `threshold`, the output
/// crossfades from dry toward `ratio * input` over `attack_time`. When
/// the input falls below the threshold the crossfade runs back out over
/// `release_time`, rescaling whatever attack progress was made so the
/// mix never jumps. Quiet input with no ramp running passes through
/// untouched.
///
/// # Parameters
///
/// - `threshold`: magnitude at which limiting engages; an input equal to
///   the threshold counts as loud
/// - `ratio`: gain applied when fully limited; 0.1 turns a unit peak
///   into 0.1
/// - `attack_time`, `release_time`: ramp durations in seconds, converted
///   to whole samples by rounding up
///
/// # Invariants
///
/// - `wet_ratio` stays in [0, 1]
/// - ramp durations are at least one sample, so the per-sample ratios
///   never divide by zero
/// - one branch runs per sample; construction is the only allocationless
///   validation point
///
/// # Example
///
/// ```rust
/// use curvato_core::{CurveEnvelope, Processor};
/// use curvato_dynamics::SoftKneeLimiter;
///
/// let knee = CurveEnvelope::new(0.42, 0.0, 0.58, 1.0).unwrap();
/// let mut limiter = SoftKneeLimiter::new(48000.0, 0.5, 0.1, 0.01, 0.05, knee).unwrap();
///
/// let output = limiter.process(0.9);
/// assert!(output.abs() < 0.9);
/// ```
#[derive(Debug, Clone)]
pub struct SoftKneeLimiter<E: Envelope> {
    threshold: f32,
    ratio: f32,
    attack_samples: u32,
    release_samples: u32,
    envelope: E,

    /// Position on the active ramp, in samples of that ramp's clock.
    envelope_time: u32,
    /// Normalized ramp position fed to the envelope shape.
    wet_ratio: f32,
    /// Whether the last ramp step was an attack step.
    is_on_attack: bool,
    /// Ramp applied to the most recent sample.
    state: LimiterState,
}

impl<E: Envelope> SoftKneeLimiter<E> {
    /// Create a limiter for one render.
    ///
    /// `threshold` and `ratio` are taken as-is; values outside the unit
    /// range are legal and simply shift where the knee sits.
    ///
    /// # Errors
    ///
    /// `sample_rate`, `attack_time`, and `release_time` must be
    /// positive.
    pub fn new(
        sample_rate: f32,
        threshold: f32,
        ratio: f32,
        attack_time: f32,
        release_time: f32,
        envelope: E,
    ) -> Result<Self, InvalidConfiguration> {
        if sample_rate <= 0.0 {
            return Err(InvalidConfiguration::SampleRate(sample_rate));
        }
        if attack_time <= 0.0 {
            return Err(InvalidConfiguration::AttackTime(attack_time));
        }
        if release_time <= 0.0 {
            return Err(InvalidConfiguration::ReleaseTime(release_time));
        }

        Ok(Self {
            threshold,
            ratio,
            attack_samples: seconds_to_samples(attack_time, sample_rate).max(1),
            release_samples: seconds_to_samples(release_time, sample_rate).max(1),
            envelope,
            envelope_time: 0,
            wet_ratio: 0.0,
            is_on_attack: true,
            state: LimiterState::Bypass,
        })
    }

    /// Ramp applied to the most recent sample.
    pub fn state(&self) -> LimiterState {
        self.state
    }

    /// Normalized position on the active ramp.
    pub fn wet_ratio(&self) -> f32 {
        self.wet_ratio
    }

    /// Position on the active ramp in samples.
    pub fn envelope_time(&self) -> u32 {
        self.envelope_time
    }

    /// Magnitude at which limiting engages.
    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Gain applied when fully limited.
    pub fn ratio(&self) -> f32 {
        self.ratio
    }

    /// Attack ramp length in samples.
    pub fn attack_samples(&self) -> u32 {
        self.attack_samples
    }

    /// Release ramp length in samples.
    pub fn release_samples(&self) -> u32 {
        self.release_samples
    }

    /// The shape driving the crossfade.
    pub fn envelope(&self) -> &E {
        &self.envelope
    }
}

impl<E: Envelope> Processor for SoftKneeLimiter<E> {
    fn process(&mut self, input: f32) -> f32 {
        if fabsf(input) < self.threshold {
            if self.envelope_time == 0 {
                self.state = LimiterState::Bypass;
                return input;
            }
            if self.is_on_attack {
                // Rescale attack progress onto the release clock so the
                // crossfade resumes from the same mix.
                self.is_on_attack = false;
                self.envelope_time = ceilf(self.wet_ratio * self.release_samples as f32) as u32;
            }
            self.envelope_time -= 1;
            self.wet_ratio = self.envelope_time as f32 / self.release_samples as f32;
            let amount = self.envelope.attack(self.wet_ratio);
            self.state = LimiterState::Release;
            return wet_dry_mix(input, self.ratio * input, amount);
        }

        if self.envelope_time >= self.attack_samples {
            self.state = LimiterState::Sustain;
            return self.ratio * input;
        }

        self.is_on_attack = true;
        self.envelope_time += 1;
        self.wet_ratio = self.envelope_time as f32 / self.attack_samples as f32;
        let amount = self.envelope.attack(self.wet_ratio);
        self.state = LimiterState::Attack;
        wet_dry_mix(input, self.ratio * input, amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use curvato_core::{CurveEnvelope, ExponentialEnvelope};

    fn ease_limiter() -> SoftKneeLimiter<CurveEnvelope> {
        let knee = CurveEnvelope::new(0.42, 0.0, 0.58, 1.0).unwrap();
        SoftKneeLimiter::new(48000.0, 0.5, 0.1, 0.01, 0.05, knee).unwrap()
    }

    #[test]
    fn test_silence_stays_bypassed() {
        let mut limiter = ease_limiter();
        assert_eq!(limiter.state(), LimiterState::Bypass);

        for _ in 0..1000 {
            assert_eq!(limiter.process(0.0), 0.0);
        }
        assert_eq!(limiter.state(), LimiterState::Bypass);
        assert_eq!(limiter.envelope_time(), 0);
    }

    #[test]
    fn test_quiet_signal_passes_untouched() {
        let mut limiter = ease_limiter();
        let output = limiter.process(0.3);
        assert_eq!(output, 0.3, "below threshold must be bit-exact passthrough");
        assert_eq!(limiter.state(), LimiterState::Bypass);
    }

    #[test]
    fn test_attack_ramps_into_sustain() {
        let mut limiter = ease_limiter();
        let attack = limiter.attack_samples() as usize;
        assert_eq!(attack, 480, "10 ms at 48 kHz");

        let outputs: Vec<f32> = (0..1000).map(|_| limiter.process(1.0)).collect();

        // Gain reduction deepens monotonically across the attack.
        for i in 1..attack {
            assert!(
                outputs[i] <= outputs[i - 1] + 1e-6,
                "attack should only deepen: sample {i} went {} -> {}",
                outputs[i - 1],
                outputs[i]
            );
        }

        // The last attack sample lands on the sustain value.
        assert!(
            (outputs[attack - 1] - 0.1).abs() < 1e-6,
            "attack should finish at ratio * input, got {}",
            outputs[attack - 1]
        );
        assert_eq!(limiter.state(), LimiterState::Sustain);
        assert_eq!(outputs[attack], 0.1 * 1.0, "sustain is a plain multiply");
    }

    #[test]
    fn test_threshold_input_counts_as_loud() {
        let mut limiter = ease_limiter();
        limiter.process(0.5);
        assert_eq!(limiter.state(), LimiterState::Attack);
        assert_eq!(limiter.envelope_time(), 1);
    }

    #[test]
    fn test_release_runs_out_to_bypass() {
        let mut limiter = ease_limiter();
        let release = limiter.release_samples() as usize;
        assert_eq!(release, 2400, "50 ms at 48 kHz");

        // Fully engage, then hold sustain a moment.
        for _ in 0..600 {
            limiter.process(1.0);
        }
        assert_eq!(limiter.state(), LimiterState::Sustain);

        // Quiet input walks the crossfade back out toward dry.
        let mut previous = f32::NEG_INFINITY;
        for _ in 0..release {
            let out = limiter.process(0.2);
            assert_eq!(limiter.state(), LimiterState::Release);
            assert!(
                out >= previous - 1e-6,
                "release should only restore level: {previous} -> {out}"
            );
            previous = out;
        }
        assert_eq!(limiter.envelope_time(), 0);

        // The ramp's final sample is already fully dry.
        assert_eq!(previous, 0.2);

        let out = limiter.process(0.2);
        assert_eq!(out, 0.2);
        assert_eq!(limiter.state(), LimiterState::Bypass);
    }

    #[test]
    fn test_release_rescales_partial_attack() {
        let mut limiter = ease_limiter();
        for _ in 0..100 {
            limiter.process(1.0);
        }
        let wet_before = limiter.wet_ratio();
        let release_step = 1.0 / limiter.release_samples() as f32;

        limiter.process(0.2);
        let wet_after = limiter.wet_ratio();
        assert!(
            (wet_after - wet_before).abs() <= release_step + 1e-6,
            "crossfade must resume where the attack left it: {wet_before} -> {wet_after}"
        );
    }

    #[test]
    fn test_reattack_after_shallow_release_sustains() {
        let mut limiter = ease_limiter();
        for _ in 0..600 {
            limiter.process(1.0);
        }
        // 100 release steps leave far more clock than a full attack.
        for _ in 0..100 {
            limiter.process(0.2);
        }
        assert!(limiter.envelope_time() >= limiter.attack_samples());

        let out = limiter.process(1.0);
        assert_eq!(limiter.state(), LimiterState::Sustain);
        assert_eq!(out, 0.1 * 1.0);
    }

    #[test]
    fn test_reattack_after_deep_release_resumes_attack() {
        let mut limiter = ease_limiter();
        for _ in 0..600 {
            limiter.process(1.0);
        }
        // Run the release clock down to 300 samples.
        for _ in 0..2100 {
            limiter.process(0.2);
        }
        assert_eq!(limiter.envelope_time(), 300);

        limiter.process(1.0);
        assert_eq!(limiter.state(), LimiterState::Attack);
        assert_eq!(limiter.envelope_time(), 301);
        assert_eq!(limiter.wet_ratio(), 301.0 / 480.0);
    }

    #[test]
    fn test_sub_sample_attack_clamps_to_one_sample() {
        let knee = CurveEnvelope::new(0.42, 0.0, 0.58, 1.0).unwrap();
        let mut limiter = SoftKneeLimiter::new(48000.0, 0.5, 0.1, 1e-9, 0.05, knee).unwrap();
        assert_eq!(limiter.attack_samples(), 1);

        let out = limiter.process(1.0);
        assert!(
            (out - 0.1).abs() < 1e-6,
            "one-sample attack is fully limited at once, got {out}"
        );

        limiter.process(1.0);
        assert_eq!(limiter.state(), LimiterState::Sustain);
    }

    #[test]
    fn test_rejects_bad_config() {
        let knee = || CurveEnvelope::new(0.42, 0.0, 0.58, 1.0).unwrap();
        assert!(matches!(
            SoftKneeLimiter::new(0.0, 0.5, 0.1, 0.01, 0.05, knee()),
            Err(InvalidConfiguration::SampleRate(_))
        ));
        assert!(matches!(
            SoftKneeLimiter::new(48000.0, 0.5, 0.1, 0.0, 0.05, knee()),
            Err(InvalidConfiguration::AttackTime(_))
        ));
        assert!(matches!(
            SoftKneeLimiter::new(48000.0, 0.5, 0.1, 0.01, -0.05, knee()),
            Err(InvalidConfiguration::ReleaseTime(_))
        ));
    }

    #[test]
    fn test_generic_over_envelope_shapes() {
        let shape = ExponentialEnvelope::new(1000, 1e-5).unwrap();
        let mut limiter = SoftKneeLimiter::new(48000.0, 0.5, 0.5, 0.01, 0.05, shape).unwrap();

        for _ in 0..480 {
            assert!(limiter.process(1.0).is_finite());
        }
        limiter.process(1.0);
        assert_eq!(limiter.state(), LimiterState::Sustain);
    }

    #[test]
    fn test_negative_peaks_limit_symmetrically() {
        let mut positive = ease_limiter();
        let mut negative = ease_limiter();

        for _ in 0..600 {
            let p = positive.process(1.0);
            let n = negative.process(-1.0);
            assert_eq!(p, -n, "limiting must be symmetric in sign");
        }
    }
}
