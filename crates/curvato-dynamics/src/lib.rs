//! Curvato Dynamics - curve-driven dynamics processors
//!
//! This crate provides dynamics processing built on curvato-core:
//!
//! - [`SoftKneeLimiter`] - Limiter whose knee is an [`Envelope`] shape,
//!   crossfading between dry and limited signal over attack and release
//!   ramps
//! - [`LimiterState`] - Which ramp the limiter applied to the most
//!   recent sample
//!
//! ## Example
//!
//! ```rust,ignore
//! use curvato_core::{CurveEnvelope, Processor};
//! use curvato_dynamics::SoftKneeLimiter;
//!
//! let knee = CurveEnvelope::new(0.42, 0.0, 0.58, 1.0)?;
//! let mut limiter = SoftKneeLimiter::new(48000.0, 0.5, 0.1, 0.01, 0.05, knee)?;
//!
//! for sample in buffer.iter_mut() {
//!     *sample = limiter.process(*sample);
//! }
//! ```
//!
//! [`Envelope`]: curvato_core::Envelope

#![cfg_attr(not(feature = "std"), no_std)]

pub mod clipper;

// Re-export main types at crate root
pub use clipper::{LimiterState, SoftKneeLimiter};
