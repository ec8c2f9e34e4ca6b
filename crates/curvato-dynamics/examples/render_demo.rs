//! Limiter render demo: state timeline, knee behavior, and a WAV render.
//!
//! Run with: cargo run -p curvato-dynamics --example render_demo

use curvato_core::{CurveEnvelope, Processor};
use curvato_dynamics::{LimiterState, SoftKneeLimiter};

const SAMPLE_RATE: f32 = 48000.0;

fn make_limiter(threshold: f32, ratio: f32) -> SoftKneeLimiter<CurveEnvelope> {
    let knee = CurveEnvelope::new(0.42, 0.0, 0.58, 1.0).unwrap();
    SoftKneeLimiter::new(SAMPLE_RATE, threshold, ratio, 0.005, 0.010, knee).unwrap()
}

fn peak(samples: &[f32]) -> f32 {
    samples.iter().fold(0.0_f32, |acc, &s| acc.max(s.abs()))
}

fn write_wav_16(path: &str, samples: &[f32]) {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: SAMPLE_RATE as u32,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(path, spec).unwrap();
    let max_val = (1i32 << 15) as f32;
    for &sample in samples {
        let int_sample = (sample * max_val).clamp(-max_val, max_val - 1.0) as i32;
        writer.write_sample(int_sample).unwrap();
    }
    writer.finalize().unwrap();
}

fn main() {
    // --- Configuration ---
    println!("=== Limiter Setup ===\n");

    let limiter = make_limiter(0.5, 0.25);
    println!("Threshold:       {:.2}", limiter.threshold());
    println!("Ratio:           {:.2}", limiter.ratio());
    println!(
        "Attack:          5.0 ms ({} samples)",
        limiter.attack_samples()
    );
    println!(
        "Release:        10.0 ms ({} samples)",
        limiter.release_samples()
    );
    println!("Knee shape:      cubic-bezier(0.42, 0.00, 0.58, 1.00)");

    // --- State machine timeline over a flat burst ---
    println!("\n=== Burst Timeline ===\n");
    println!("Input: 0.3 for 100 samples, 0.9 for 600, then 0.3 again.\n");

    let burst: Vec<f32> = std::iter::repeat_n(0.3, 100)
        .chain(std::iter::repeat_n(0.9, 600))
        .chain(std::iter::repeat_n(0.3, 900))
        .collect();

    let mut limiter = make_limiter(0.5, 0.25);
    let mut state = limiter.state();

    println!(
        "{:>8} {:>10} {:>8} {:>8} {:>8}",
        "Sample", "State", "Wet", "In", "Out"
    );
    println!("{:->8} {:->10} {:->8} {:->8} {:->8}", "", "", "", "", "");

    for (i, &sample) in burst.iter().enumerate() {
        let out = limiter.process(sample);
        if limiter.state() != state {
            state = limiter.state();
            println!(
                "{:>8} {:>10} {:>8.3} {:>8.2} {:>8.4}",
                i,
                format!("{state:?}"),
                limiter.wet_ratio(),
                sample,
                out
            );
        }
    }
    println!(
        "\nFinal state after burst: {:?}, wet ratio {:.3}",
        limiter.state(),
        limiter.wet_ratio()
    );

    // --- Full render through the limiter ---
    println!("\n=== Sine Render ===\n");

    let segments: [(f32, usize); 3] = [(0.2, 4800), (0.95, 9600), (0.2, 9600)];
    let mut input = Vec::new();
    for &(amplitude, samples) in &segments {
        let offset = input.len();
        for n in 0..samples {
            let t = (offset + n) as f32 / SAMPLE_RATE;
            input.push(amplitude * (2.0 * std::f32::consts::PI * 220.0 * t).sin());
        }
    }

    let mut limiter = make_limiter(0.5, 0.5);
    let mut output = vec![0.0; input.len()];
    limiter.process_block(&input, &mut output);

    println!("{:<12} {:>10} {:>10}", "Segment", "In Peak", "Out Peak");
    println!("{:-<12} {:->10} {:->10}", "", "", "");

    let bounds = [(0, 4800, "quiet"), (4800, 14400, "loud"), (14400, 24000, "tail")];
    for &(start, end, name) in &bounds {
        println!(
            "{:<12} {:>10.3} {:>10.3}",
            name,
            peak(&input[start..end]),
            peak(&output[start..end])
        );
    }

    write_wav_16("limiter_dry.wav", &input);
    write_wav_16("limiter_wet.wav", &output);
    println!(
        "\nWrote limiter_dry.wav and limiter_wet.wav ({} samples, 16-bit mono)",
        input.len()
    );

    println!("\nRender demo complete.");
}
