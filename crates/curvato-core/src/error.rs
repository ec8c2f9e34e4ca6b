//! Construction-time error types.
//!
//! All validation happens when a curve, envelope, or processor is built.
//! Per-sample processing never fails: once a configuration is accepted a
//! render runs to completion, and solver edge cases (flat curve regions,
//! plateaus) are resolved internally instead of being surfaced.

/// A curve control point's x-coordinate fell outside `[0, 1]`.
///
/// The x components of both control points must stay inside the unit
/// interval so the curve's x polynomial remains invertible. The y
/// components are unrestricted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DomainError {
    /// Which coordinate was rejected (`"x1"` or `"x2"`).
    pub param: &'static str,
    /// The rejected value.
    pub value: f32,
}

#[cfg(feature = "std")]
impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "curve control point {} must be in [0, 1], got {}",
            self.param, self.value
        )
    }
}

#[cfg(feature = "std")]
impl std::error::Error for DomainError {}

/// A processor or envelope was configured with an unusable parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InvalidConfiguration {
    /// Attack time must be positive.
    AttackTime(f32),
    /// Release time must be positive.
    ReleaseTime(f32),
    /// Sample rate must be positive.
    SampleRate(f32),
    /// Envelope length in samples is below the variant's minimum.
    Length {
        /// The rejected length.
        samples: u32,
        /// Smallest length the variant accepts.
        min: u32,
    },
    /// Decay end value must be positive to define a decay rate.
    EndValue(f32),
    /// Decay threshold must lie strictly inside (0, 1).
    Threshold(f32),
}

#[cfg(feature = "std")]
impl std::fmt::Display for InvalidConfiguration {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::AttackTime(s) => write!(f, "attack time must be positive, got {s} s"),
            Self::ReleaseTime(s) => write!(f, "release time must be positive, got {s} s"),
            Self::SampleRate(r) => write!(f, "sample rate must be positive, got {r} Hz"),
            Self::Length { samples, min } => {
                write!(f, "length must be at least {min} samples, got {samples}")
            }
            Self::EndValue(v) => write!(f, "end value must be positive, got {v}"),
            Self::Threshold(v) => write!(f, "threshold must be in (0, 1), got {v}"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for InvalidConfiguration {}
