#![warn(missing_docs)]

//! Arbitrary-time resampling of uniformly-sampled complex signals.
//!
//! The input is upsampled by zero-stuffing and FIR filtering, and every
//! requested output time is linearly interpolated between the two nearest
//! upsampled samples. Query times may be arbitrary and unordered. The
//! upsampled signal is never materialized: each needed grid sample is computed
//! on demand, skipping the stuffed zeros.
//!
//! ## Example
//! ```
//! use upfirlerp::UpfirLerp64;
//! use upfirlerp::num_complex::Complex;
//!
//! fn main() -> Result<(), upfirlerp::Error> {
//!     let mut ufl = UpfirLerp64::new();
//!     ufl.set_up_rate(4)?.set_threads(4)?.set_up_taps(&[0.25, 0.5, 1.0, 0.5, 0.25]);
//!
//!     let input: Vec<Complex<f64>> = (0..100).map(|n| Complex::new(n as f64, 0.0)).collect();
//!     let t = [0.5, 0.0125, 7.3, 1e6];
//!     let output = ufl.interpolate_to_vec(&input, 0.1, &t)?;
//!
//!     assert_eq!(output.len(), t.len());
//!     // out of range
//!     assert_eq!(output[3], Complex::new(0.0, 0.0));
//!     Ok(())
//! }
//! ```

/// Logging macro
#[macro_use]
pub extern crate tracing;

// re-exports
pub use num_complex;
pub use num_traits;
pub use upfirdsp;

mod engine;
mod error;
pub mod runtime;

pub use engine::EngineConfig;
pub use engine::UpfirLerp;
pub use engine::UpfirLerp32;
pub use engine::UpfirLerp64;
pub use error::Error;
