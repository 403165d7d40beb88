//! Kernels for resampling a uniformly-sampled complex signal at arbitrary
//! points in time.
//!
//! The input is conceptually upsampled by zero-stuffing and FIR filtering.
//! Grid samples are computed on demand by [`GridKernel`] and linearly
//! interpolated by [`GridMapper`]; the upsampled signal is never materialized.
//!
//! ```
//! use upfirdsp::GridKernel;
//! use upfirdsp::GridMapper;
//! use upfirdsp::ReversedTaps;
//! use upfirdsp::num_complex::Complex;
//!
//! let taps = ReversedTaps::new(&[0.5f64, 1.0, 0.5]);
//! let kernel = GridKernel::new(2, &taps);
//! let input = [Complex::new(1.0, 0.0), Complex::new(1.0, 0.0)];
//! let mapper = GridMapper::new(&kernel, &input, 1.0);
//!
//! assert_eq!(mapper.resample_one(0.25), Some(Complex::new(0.75, 0.0)));
//! assert_eq!(mapper.resample_one(2.0), None);
//! ```
#![warn(missing_docs)]
#![no_std]

#[macro_use]
extern crate alloc;
#[macro_use]
extern crate tracing;

pub use num_complex;
pub use num_traits;

pub use kernel::GridKernel;
pub use kernel::GridWindow;
pub use lerp::GridMapper;
pub use taps::ReversedTaps;
pub use taps::Taps;

pub mod kernel;
pub mod lerp;
pub mod taps;

/// Prelude with common traits
pub mod prelude {
    pub use num_traits;

    pub use super::GridKernel;
    pub use super::GridMapper;
    pub use super::ReversedTaps;
    pub use super::Taps;
}
