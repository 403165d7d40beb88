//! Zero-Stuffing FIR Kernel
use num_complex::Complex;
use num_traits::Float;
use num_traits::Zero;

use crate::Taps;

/// Grid indices of the real input samples that contribute to one upsampled
/// grid sample.
///
/// Only every `step`th grid index holds a real sample; the zero-stuffed
/// positions in between are never visited.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridWindow {
    /// First contributing grid index, a multiple of `step`.
    pub first: usize,
    /// Last grid index that may contribute (inclusive).
    pub last: usize,
    /// Upsampling rate.
    pub step: usize,
    /// Index into the reversed taps that multiplies the sample at `first`.
    pub first_tap: usize,
}

impl GridWindow {
    /// Number of multiply-accumulate operations needed for this window.
    pub fn num_macs(&self) -> usize {
        (self.last - self.first) / self.step + 1
    }
}

/// Computes samples of the virtual upsampled grid on demand.
///
/// The grid is formed by inserting `up_rate - 1` zeros between consecutive
/// input samples and filtering the result with the given taps. Since the
/// zeros never contribute, a grid sample costs `num_taps / up_rate`
/// multiplications instead of `num_taps`.
///
/// ```
/// use upfirdsp::GridKernel;
/// use upfirdsp::ReversedTaps;
/// use upfirdsp::num_complex::Complex;
///
/// let taps = ReversedTaps::new(&[1.0f64, 0.5]);
/// let kernel = GridKernel::new(2, &taps);
/// let input = [Complex::new(1.0, 0.0), Complex::new(2.0, 0.0)];
///
/// assert_eq!(kernel.compute(0, &input), Complex::new(1.0, 0.0));
/// assert_eq!(kernel.compute(1, &input), Complex::new(0.5, 0.0));
/// assert_eq!(kernel.compute(2, &input), Complex::new(2.0, 0.0));
/// ```
#[derive(Clone, Debug)]
pub struct GridKernel<TA> {
    up_rate: usize,
    taps: TA,
}

impl<TA: Taps> GridKernel<TA> {
    /// Create a kernel for the given upsampling rate and reversed taps.
    ///
    /// Panics if `up_rate` is zero.
    pub fn new(up_rate: usize, taps: TA) -> Self {
        assert!(up_rate > 0, "upsampling rate must be positive");
        Self { up_rate, taps }
    }

    /// Upsampling rate
    pub fn up_rate(&self) -> usize {
        self.up_rate
    }

    /// Number of taps
    pub fn num_taps(&self) -> usize {
        self.taps.num_taps()
    }

    /// Aligned window of real samples contributing to grid index `j`, or
    /// `None` if nothing contributes (empty taps, empty input, or `j` too
    /// far past either end of the signal).
    pub fn window(&self, j: usize, input_len: usize) -> Option<GridWindow> {
        let num_taps = self.taps.num_taps();
        if num_taps == 0 || input_len == 0 {
            return None;
        }
        let up = self.up_rate;

        // earliest grid index covered by the taps, clamped to the signal start
        let lowest = (j + 1).saturating_sub(num_taps);
        let first = lowest.next_multiple_of(up);
        let last = j.min(input_len * up - 1);
        if first > last {
            return None;
        }

        Some(GridWindow {
            first,
            last,
            step: up,
            first_tap: first + num_taps - 1 - j,
        })
    }

    /// Computes the upsampled grid sample at index `j`.
    pub fn compute<T>(&self, j: usize, input: &[Complex<T>]) -> Complex<T>
    where
        TA: Taps<TapType = T>,
        T: Float,
    {
        match self.window(j, input.len()) {
            Some(w) => {
                trace!(
                    "grid {}: dot product over {}..={} (taps from {})",
                    j, w.first, w.last, w.first_tap
                );
                grid_kernel_core(&self.taps, &w, input, Complex::zero, |accum, sample, tap| {
                    accum + sample * tap
                })
            }
            None => {
                trace!("grid {}: no valid dot product", j);
                Complex::zero()
            }
        }
    }
}

/// Internal helper function to abstract away everything but the core computation.
fn grid_kernel_core<
    InputType,
    OutputType,
    TapsType: Taps,
    InitFn: Fn() -> OutputType,
    MacFn: Fn(OutputType, InputType, TapsType::TapType) -> OutputType,
>(
    taps: &TapsType,
    w: &GridWindow,
    i: &[InputType],
    init: InitFn,
    mac: MacFn,
) -> OutputType
where
    InputType: Copy,
{
    let mut sum = init();
    let mut tap = w.first_tap;
    // `w.last < i.len() * step` and `tap <= w.first_tap + (w.last - w.first)`,
    // which is below `num_taps()` by construction of the window.
    debug_assert!(w.last / w.step < i.len());
    unsafe {
        for k in (w.first..=w.last).step_by(w.step) {
            sum = mac(sum, *i.get_unchecked(k / w.step), taps.get(tap));
            tap += w.step;
        }
    }
    sum
}
