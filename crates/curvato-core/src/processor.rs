//! Per-sample processing contract.
//!
//! [`Processor`] is the boundary between a render loop and a stateful
//! sample transformer: one call per input sample, in temporal order, one
//! output per call. Configuration is fixed at construction; there is no
//! reset or reconfiguration mid-stream, a fresh render builds fresh
//! instances.

/// Trait for stateful per-sample processors.
///
/// `process` advances internal state by exactly one sample. Hosts that
/// hand over whole buffers use the provided block methods, which preserve
/// the one-call-per-sample ordering.
///
/// # Example
///
/// ```rust
/// use curvato_core::Processor;
///
/// struct Gain {
///     gain: f32,
/// }
///
/// impl Processor for Gain {
///     fn process(&mut self, input: f32) -> f32 {
///         input * self.gain
///     }
/// }
/// ```
pub trait Processor {
    /// Process a single sample, advancing internal state by one step.
    fn process(&mut self, input: f32) -> f32;

    /// Process a block of samples into `output`.
    ///
    /// Default implementation calls `process()` per sample.
    ///
    /// # Panics
    /// Default implementation debug-panics if `input.len() != output.len()`.
    fn process_block(&mut self, input: &[f32], output: &mut [f32]) {
        debug_assert_eq!(
            input.len(),
            output.len(),
            "Input and output buffers must have same length"
        );
        for (inp, out) in input.iter().zip(output.iter_mut()) {
            *out = self.process(*inp);
        }
    }

    /// Process a block of samples in place.
    fn process_block_inplace(&mut self, buffer: &mut [f32]) {
        for sample in buffer.iter_mut() {
            *sample = self.process(*sample);
        }
    }
}
