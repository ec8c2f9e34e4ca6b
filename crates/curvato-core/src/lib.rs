//! Curvato Core - curve and envelope primitives for offline synthesis
//!
//! This crate provides the shaping layer of a renderer: cubic Bezier
//! easing curves solved to sample precision, envelope shapes derived from
//! them, and self-running decay generators, all allocation-free and
//! usable sample-by-sample.
//!
//! # Core Abstractions
//!
//! ## Curve Solver
//!
//! - [`Curve`] - Unit-square cubic Bezier evaluated as y(x), Newton with
//!   bisection fallback
//!
//! ## Envelope Shapes
//!
//! Stateless shapes over normalized time plus stateful per-sample
//! processors:
//!
//! - [`Envelope`] - Attack/decay shape trait with table sampling
//! - [`CurveEnvelope`] - Shape read off a [`Curve`]
//! - [`ExponentialEnvelope`] - Geometric decay hitting an exact floor
//! - [`CosineEnvelope`] - Raised-cosine fade to silence
//!
//! ## Decay Generators
//!
//! Self-running attack/decay humps for gating voices:
//!
//! - [`ExpAdEnvelope`] - Exponential stages, analytic peak
//! - [`ExpPolyEnvelope`] - Polynomial-times-exponential hump
//! - [`DoubleEmaAdEnvelope`] - Cascaded one-pole pairs, minimized peak
//!
//! ## Processing
//!
//! - [`Processor`] - Sample-in, sample-out trait with block helpers
//! - [`minimize_scalar`] - Bracketing scalar minimizer for peak finding
//!
//! ## Utilities
//!
//! - Math helpers: [`lerp`], [`wet_dry_mix`], [`seconds_to_samples`]
//! - Errors: [`DomainError`], [`InvalidConfiguration`]
//!
//! # no_std Support
//!
//! This crate is `no_std` compatible. Disable the default `std` feature
//! in your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! curvato-core = { version = "0.1", default-features = false }
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use curvato_core::{Curve, CurveEnvelope, Envelope, Processor, ExponentialEnvelope};
//!
//! // Shape a fade with an ease-in-out curve
//! let shape = CurveEnvelope::new(0.42, 0.0, 0.58, 1.0)?;
//! for gain in shape.sampled_table(1024) {
//!     // apply gain to one sample of the rendered voice
//! }
//!
//! // Or run a decay against the signal sample-by-sample
//! let mut decay = ExponentialEnvelope::with_default_end(44100)?;
//! for sample in buffer.iter_mut() {
//!     *sample = decay.process(*sample);
//! }
//! ```
//!
//! # Design Principles
//!
//! - **Offline-oriented**: Deterministic output, no real-time scheduling
//! - **No dependencies on std**: Pure `no_std` with `libm` for math
//! - **Construct per render**: Configuration is fixed at creation, no
//!   reset or live retuning
//! - **Allocation-free**: Table sampling is lazy iteration, not buffers

#![cfg_attr(not(feature = "std"), no_std)]

pub mod brent;
pub mod curve;
pub mod decay;
pub mod envelope;
pub mod error;
pub mod math;
pub mod processor;

// Re-export main types at crate root
pub use brent::{Minimum, minimize_scalar};
pub use curve::Curve;
pub use decay::{DoubleEmaAdEnvelope, ExpAdEnvelope, ExpPolyEnvelope, samples_to_kp};
pub use envelope::{CosineEnvelope, CurveEnvelope, Envelope, ExponentialEnvelope, SampledTable};
pub use error::{DomainError, InvalidConfiguration};
pub use math::{lerp, seconds_to_samples, wet_dry_mix};
pub use processor::Processor;
