//! Envelope shapes demo: curve presets, fade tables, and decay generators.
//!
//! Run with: cargo run -p curvato-core --example envelope_shapes

use curvato_core::{
    CurveEnvelope, DoubleEmaAdEnvelope, Envelope, ExpAdEnvelope, ExpPolyEnvelope,
};

/// Render a value in [0, 1] as a fixed-width bar.
fn bar(value: f32, width: usize) -> String {
    let filled = (value.clamp(0.0, 1.0) * width as f32) as usize;
    let mut s = String::with_capacity(width);
    for i in 0..width {
        s.push(if i < filled { '#' } else { '.' });
    }
    s
}

fn main() {
    let sample_rate = 48000.0_f32;

    // --- CSS-style curve presets ---
    println!("=== Curve Presets ===\n");

    let presets = [
        ("linear", (0.0, 0.0, 1.0, 1.0)),
        ("ease", (0.25, 0.1, 0.25, 1.0)),
        ("ease-in", (0.42, 0.0, 1.0, 1.0)),
        ("ease-out", (0.0, 0.0, 0.58, 1.0)),
        ("ease-in-out", (0.42, 0.0, 0.58, 1.0)),
    ];

    println!(
        "{:<14} {:>6} {:>6} {:>6} {:>6} {:>6}",
        "Preset", "x=0.1", "x=0.3", "x=0.5", "x=0.7", "x=0.9"
    );
    println!("{:-<14} {:->6} {:->6} {:->6} {:->6} {:->6}", "", "", "", "", "", "");

    for (name, (x1, y1, x2, y2)) in &presets {
        let shape = CurveEnvelope::new(*x1, *y1, *x2, *y2).unwrap();
        println!(
            "{:<14} {:>6.3} {:>6.3} {:>6.3} {:>6.3} {:>6.3}",
            name,
            shape.attack(0.1),
            shape.attack(0.3),
            shape.attack(0.5),
            shape.attack(0.7),
            shape.attack(0.9),
        );
    }

    // --- Fade table from a curve ---
    println!("\n=== Sampled Fade (ease-in-out, 17 points) ===\n");

    let fade = CurveEnvelope::new(0.42, 0.0, 0.58, 1.0).unwrap();
    for (i, gain) in fade.sampled_table(17).enumerate() {
        println!("{:>4}  {:>6.3}  {}", i, gain, bar(gain, 40));
    }

    // --- Decay generators ---
    println!("\n=== Decay Generators (10 ms attack, 100 ms decay) ===\n");

    let attack_samples = 0.010 * sample_rate;
    let decay_samples = 0.100 * sample_rate;

    let mut exp_ad = ExpAdEnvelope::new(attack_samples, decay_samples).unwrap();
    let mut double_ema = DoubleEmaAdEnvelope::new(1.0, attack_samples, decay_samples);
    let mut exp_poly = ExpPolyEnvelope::new(sample_rate, 0.010, 20.0).unwrap();

    println!("ExpAd peak at     {:>8.1} samples", exp_ad.peak_samples());
    println!("DoubleEma peak at {:>8} samples", double_ema.peak_samples());

    println!("\n{:>8} {:>8} {:>8} {:>8}", "Sample", "ExpAd", "2xEMA", "ExpPoly");
    println!("{:->8} {:->8} {:->8} {:->8}", "", "", "", "");

    let total = (0.150 * sample_rate) as usize;
    let step = total / 15;
    for i in 0..total {
        let a = exp_ad.advance();
        let b = double_ema.advance();
        let c = exp_poly.advance();
        if i % step == 0 {
            println!("{:>8} {:>8.4} {:>8.4} {:>8.4}", i, a, b, c);
        }
    }

    println!("\nEnvelope shapes demo complete.");
}
