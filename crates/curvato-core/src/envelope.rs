//! Envelope shapes behind a uniform attack/decay contract.
//!
//! The [`Envelope`] trait exposes a rising profile `attack(t)` and its
//! complement `decay(t)` over normalized time in [0, 1], plus a lazy
//! [`sampled_table`](Envelope::sampled_table) used for plotting a shape
//! before a render. Three shapes implement it:
//!
//! - [`CurveEnvelope`] - arbitrary easing through a cubic Bézier [`Curve`]
//! - [`ExponentialEnvelope`] - classic exponential decay toward an end value
//! - [`CosineEnvelope`] - raised-cosine taper over a fixed sample count
//!
//! The exponential and cosine shapes also carry per-sample state and
//! implement [`Processor`], scaling an input stream by the advancing
//! profile. The stateless trait methods never touch that state, so a
//! plot and a render of the same envelope cannot interfere.

use crate::curve::Curve;
use crate::error::{DomainError, InvalidConfiguration};
use crate::processor::Processor;
use core::f32::consts::PI;
use libm::{cosf, powf};

/// Common contract for envelope shapes over normalized time.
///
/// For every shape, `attack(t) + decay(t) == 1` up to rounding. The trait
/// is object-safe; `sampled_table` is available on sized types.
pub trait Envelope {
    /// Rising profile at normalized time `t` in [0, 1].
    fn attack(&self, t: f32) -> f32;

    /// Falling profile at normalized time `t`, the complement of
    /// [`attack`](Envelope::attack).
    fn decay(&self, t: f32) -> f32 {
        1.0 - self.attack(t)
    }

    /// Lazily sample the decay profile at `len` evenly spaced points.
    ///
    /// Yields `decay(i / (len - 1))` for `i` in `0..len`: exactly `len`
    /// items, from `decay(0.0)` down to `decay(1.0)`. Each call starts an
    /// independent pass over the shape. `len == 0` yields nothing and
    /// `len == 1` yields the single starting value.
    fn sampled_table(&self, len: usize) -> SampledTable<'_, Self>
    where
        Self: Sized,
    {
        SampledTable {
            envelope: self,
            index: 0,
            len,
        }
    }
}

/// Iterator over an envelope's decay profile.
///
/// Created by [`Envelope::sampled_table`]. Holds only a shared reference
/// and a cursor, so tables of any length cost no allocation.
#[derive(Debug, Clone)]
pub struct SampledTable<'a, E> {
    envelope: &'a E,
    index: usize,
    len: usize,
}

impl<E: Envelope> Iterator for SampledTable<'_, E> {
    type Item = f32;

    fn next(&mut self) -> Option<f32> {
        if self.index >= self.len {
            return None;
        }
        // Guard the denominator so len == 1 yields decay(0.0).
        let denom = (self.len - 1).max(1) as f32;
        let t = self.index as f32 / denom;
        self.index += 1;
        Some(self.envelope.decay(t))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.len - self.index;
        (remaining, Some(remaining))
    }
}

impl<E: Envelope> ExactSizeIterator for SampledTable<'_, E> {}

/// Envelope shaped by a cubic Bézier easing curve.
///
/// `attack(t)` is the curve evaluated at `t`; `decay(t)` is its mirror.
/// The y control points may leave [0, 1], so the attack can overshoot
/// before settling, which the other shapes cannot express.
#[derive(Debug, Clone)]
pub struct CurveEnvelope {
    curve: Curve,
}

impl CurveEnvelope {
    /// Create an envelope from curve control points.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError`] if either x control falls outside [0, 1].
    pub fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Result<Self, DomainError> {
        Ok(Self {
            curve: Curve::new(x1, y1, x2, y2)?,
        })
    }

    /// The underlying curve.
    pub fn curve(&self) -> &Curve {
        &self.curve
    }
}

impl From<Curve> for CurveEnvelope {
    fn from(curve: Curve) -> Self {
        Self { curve }
    }
}

impl Envelope for CurveEnvelope {
    fn attack(&self, t: f32) -> f32 {
        self.curve.evaluate(t)
    }
}

/// Exponentially decaying envelope over a fixed length.
///
/// The per-sample multiplier is `gamma = end^(1/length)`, so the running
/// value walks from `gamma` down to exactly `end` across `length` calls
/// of [`process`](Processor::process). The value advances before the
/// input is scaled; feeding `1.0` for `length` samples therefore ends on
/// `end` itself.
#[derive(Debug, Clone)]
pub struct ExponentialEnvelope {
    value: f32,
    gamma: f32,
    end: f32,
    length: u32,
}

impl ExponentialEnvelope {
    /// Conventional end value: -100 dB, inaudible for amplitude work.
    pub const DEFAULT_END: f32 = 1e-5;

    /// Create an envelope decaying to [`DEFAULT_END`](Self::DEFAULT_END)
    /// over `length` samples.
    ///
    /// # Errors
    ///
    /// `length` must be at least 1.
    pub fn with_default_end(length: u32) -> Result<Self, InvalidConfiguration> {
        Self::new(length, Self::DEFAULT_END)
    }

    /// Create an envelope decaying to `end` over `length` samples.
    ///
    /// # Errors
    ///
    /// `length` must be at least 1 and `end` positive; a non-positive end
    /// value has no finite decay rate.
    pub fn new(length: u32, end: f32) -> Result<Self, InvalidConfiguration> {
        if length == 0 {
            return Err(InvalidConfiguration::Length { samples: 0, min: 1 });
        }
        if end <= 0.0 {
            return Err(InvalidConfiguration::EndValue(end));
        }
        let gamma = powf(end, 1.0 / length as f32);

        #[cfg(feature = "tracing")]
        tracing::debug!("exp_envelope_new: length={length} end={end} gamma={gamma}");

        Ok(Self {
            value: 1.0,
            gamma,
            end,
            length,
        })
    }

    /// Decay length in samples.
    pub fn length(&self) -> u32 {
        self.length
    }

    /// Current multiplier, without advancing.
    pub fn value(&self) -> f32 {
        self.value
    }
}

impl Processor for ExponentialEnvelope {
    #[inline]
    fn process(&mut self, input: f32) -> f32 {
        self.value *= self.gamma;
        input * self.value
    }
}

impl Envelope for ExponentialEnvelope {
    /// `1 - end^t`: the normalized profile of the decay, mirrored.
    fn attack(&self, t: f32) -> f32 {
        1.0 - powf(self.end, t)
    }
}

/// Raised-cosine taper from 1 to 0 over a fixed number of samples.
///
/// `process` scales its input by `(1 + cos(pi * n / (length - 1))) / 2`,
/// reading the sample index before advancing it: the first call passes
/// the input through at full scale and call `length` lands on zero. The
/// index saturates at `length - 1`, holding the output at zero for any
/// further calls.
#[derive(Debug, Clone)]
pub struct CosineEnvelope {
    index: u32,
    length: u32,
}

impl CosineEnvelope {
    /// Create a taper over `length` samples.
    ///
    /// # Errors
    ///
    /// `length` must be at least 2; a single-sample taper has no interior.
    pub fn new(length: u32) -> Result<Self, InvalidConfiguration> {
        if length < 2 {
            return Err(InvalidConfiguration::Length {
                samples: length,
                min: 2,
            });
        }
        Ok(Self { index: 0, length })
    }

    /// Taper length in samples.
    pub fn length(&self) -> u32 {
        self.length
    }
}

impl Processor for CosineEnvelope {
    #[inline]
    fn process(&mut self, input: f32) -> f32 {
        let phase = PI * self.index as f32 / (self.length - 1) as f32;
        if self.index < self.length - 1 {
            self.index += 1;
        }
        input * (1.0 + cosf(phase)) / 2.0
    }
}

impl Envelope for CosineEnvelope {
    /// `(1 - cos(pi t)) / 2`: the taper's profile, mirrored.
    fn attack(&self, t: f32) -> f32 {
        (1.0 - cosf(PI * t)) / 2.0
    }
}
