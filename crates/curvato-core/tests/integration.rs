//! Integration tests for curvato-core primitives.
//!
//! Tests cross-module interactions on rendered audio: curve-shaped fades
//! applied to sine bursts, per-sample decay attenuation measured by RMS,
//! and generator envelopes gating voices.

use curvato_core::{
    CosineEnvelope, CurveEnvelope, DoubleEmaAdEnvelope, Envelope, ExpPolyEnvelope,
    ExponentialEnvelope, Processor,
};

const SAMPLE_RATE: f32 = 48000.0;
const TAU: f32 = core::f32::consts::TAU;

/// Generate a sine wave buffer at the given frequency and sample rate.
fn generate_sine(freq_hz: f32, sample_rate: f32, num_samples: usize) -> Vec<f32> {
    (0..num_samples)
        .map(|n| libm::sinf(TAU * freq_hz * n as f32 / sample_rate))
        .collect()
}

/// Measure RMS amplitude of a signal buffer.
fn rms(signal: &[f32]) -> f32 {
    let sum_sq: f32 = signal.iter().map(|&s| s * s).sum();
    libm::sqrtf(sum_sq / signal.len() as f32)
}

// ============================================================================
// 1. Curve-shaped fades
// ============================================================================

#[test]
fn curve_fade_front_loads_energy() {
    // A fade read off a monotone ease keeps the head loud and silences
    // the tail.
    let len = 4800;
    let envelope = CurveEnvelope::new(0.25, 0.1, 0.25, 1.0).unwrap();
    let voice = generate_sine(440.0, SAMPLE_RATE, len);

    let faded: Vec<f32> = voice
        .iter()
        .zip(envelope.sampled_table(len))
        .map(|(&sample, gain)| sample * gain)
        .collect();

    let head = rms(&faded[..len / 2]);
    let tail = rms(&faded[len / 2..]);
    assert!(
        head > tail,
        "fade should front-load energy: head {head:.4}, tail {tail:.4}"
    );
    assert_eq!(faded[len - 1], 0.0, "fade must end in exact silence");
}

#[test]
fn sampled_table_matches_pointwise_decay() {
    let envelope = CurveEnvelope::new(0.42, 0.0, 0.58, 1.0).unwrap();
    let len = 257;

    for (i, gain) in envelope.sampled_table(len).enumerate() {
        let t = i as f32 / (len - 1) as f32;
        assert_eq!(
            gain,
            envelope.decay(t),
            "table entry {i} should equal the pointwise decay"
        );
    }
}

// ============================================================================
// 2. Per-sample decay processors
// ============================================================================

#[test]
fn exponential_decay_silences_the_tail() {
    let len = 4800;
    let mut envelope = ExponentialEnvelope::with_default_end(len as u32).unwrap();
    let voice = generate_sine(440.0, SAMPLE_RATE, len);

    let mut rendered = vec![0.0_f32; len];
    envelope.process_block(&voice, &mut rendered);

    let head = rms(&rendered[..480]);
    let tail = rms(&rendered[len - 480..]);
    assert!(
        tail < head * 1e-3,
        "tail should be far below the head: head {head:.5}, tail {tail:.7}"
    );
}

#[test]
fn cosine_fade_has_no_steps() {
    // Applied to DC, the fade's sample-to-sample change stays under the
    // raised-cosine slope bound.
    let length = 4800_u32;
    let mut envelope = CosineEnvelope::new(length).unwrap();
    let bound = core::f32::consts::PI / (2.0 * (length - 1) as f32) + 1e-6;

    let mut previous = envelope.process(1.0);
    for _ in 1..length {
        let out = envelope.process(1.0);
        let jump = (out - previous).abs();
        assert!(
            jump <= bound,
            "fade stepped by {jump:.6}, bound {bound:.6}"
        );
        previous = out;
    }
}

#[test]
fn block_processing_matches_per_sample() {
    let input = generate_sine(440.0, SAMPLE_RATE, 1024);

    let mut by_sample = CosineEnvelope::new(1024).unwrap();
    let mut by_block = CosineEnvelope::new(1024).unwrap();

    let sample_out: Vec<f32> = input.iter().map(|&s| by_sample.process(s)).collect();
    let mut block_out = vec![0.0_f32; 1024];
    by_block.process_block(&input, &mut block_out);

    for (i, (&s, &b)) in sample_out.iter().zip(block_out.iter()).enumerate() {
        assert_eq!(s, b, "sample vs block mismatch at {i}");
    }
}

// ============================================================================
// 3. Generator envelopes gating voices
// ============================================================================

#[test]
fn double_ema_gates_a_voice_to_its_target() {
    let target = 0.5;
    let mut envelope = DoubleEmaAdEnvelope::new(target, 480.0, 4800.0);
    let voice = generate_sine(440.0, SAMPLE_RATE, 48000);

    let mut peak = 0.0_f32;
    for &sample in &voice {
        peak = peak.max((sample * envelope.advance()).abs());
    }
    assert!(
        peak <= target * 1.001,
        "gated voice should not exceed the target: peak {peak:.4}"
    );
    assert!(
        peak >= target * 0.9,
        "gated voice should reach near the target: peak {peak:.4}"
    );
}

#[test]
fn exp_poly_onset_rises_from_silence() {
    // A heavy curve weight keeps the t^a rise flat near zero.
    let mut envelope = ExpPolyEnvelope::new(SAMPLE_RATE, 0.1, 20.0).unwrap();
    let voice = generate_sine(440.0, SAMPLE_RATE, 9600);

    let rendered: Vec<f32> = voice.iter().map(|&s| s * envelope.advance()).collect();

    let onset = rms(&rendered[..48]);
    assert!(onset < 0.05, "onset should be quiet, got rms {onset:.4}");

    let peak_region = rms(&rendered[4320..5280]);
    assert!(
        peak_region > 0.5,
        "peak region should carry the voice, got rms {peak_region:.4}"
    );
}
