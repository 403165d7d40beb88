//! Arbitrary-Time Interpolation on the Upsampled Grid
use core::ops::RangeInclusive;
use num_complex::Complex;
use num_traits::AsPrimitive;
use num_traits::Float;

use crate::GridKernel;
use crate::Taps;

/// Maps absolute query times onto the upsampled grid of one input signal and
/// linearly interpolates between the two bracketing grid samples.
///
/// A mapper borrows everything it reads and never mutates it, so a single
/// instance can be shared by any number of threads.
pub struct GridMapper<'a, T, TA> {
    kernel: &'a GridKernel<TA>,
    input: &'a [Complex<T>],
    interim_period: f64,
    t_max: f64,
}

impl<'a, T, TA> GridMapper<'a, T, TA>
where
    TA: Taps<TapType = T>,
    T: Float + 'static,
    f64: AsPrimitive<T>,
{
    /// Create a mapper for `input`, sampled with period `input_period`.
    pub fn new(kernel: &'a GridKernel<TA>, input: &'a [Complex<T>], input_period: f64) -> Self {
        let interim_period = input_period / kernel.up_rate() as f64;
        let t_max = interim_period * ((input.len() * kernel.up_rate()) as f64 - 1.0);
        Self {
            kernel,
            input,
            interim_period,
            t_max,
        }
    }

    /// Spacing of the upsampled grid.
    pub fn interim_period(&self) -> f64 {
        self.interim_period
    }

    /// Closed interval of accepted query times.
    ///
    /// The interval is empty (`start > end`) for an empty input.
    pub fn valid_range(&self) -> RangeInclusive<f64> {
        0.0..=self.t_max
    }

    /// Resamples the signal at time `t`.
    ///
    /// Returns `None` if `t` lies outside of [`valid_range`](Self::valid_range).
    /// Query times that are not a number are treated as out of range.
    pub fn resample_one(&self, t: f64) -> Option<Complex<T>> {
        if !self.valid_range().contains(&t) {
            trace!("t = {} outside of valid range [0, {}]", t, self.t_max);
            return None;
        }

        // t >= 0, so truncation is floor
        let j = (t / self.interim_period) as usize;
        trace!("t = {} -> grid {}", t, j);

        let xj1 = self.kernel.compute(j, self.input);
        let xj2 = self.kernel.compute(j + 1, self.input);
        let frac: T = ((t - self.interim_period * j as f64) / self.interim_period).as_();

        Some(xj1 + (xj2 - xj1) * frac)
    }

    /// Resamples the signal at every time of `t`, writing into the slot of
    /// `out` at the same position. Slots of out-of-range times are left as is.
    ///
    /// Only the common prefix of `t` and `out` is processed.
    pub fn resample_into(&self, t: &[f64], out: &mut [Complex<T>]) {
        for (t, o) in t.iter().zip(out.iter_mut()) {
            if let Some(v) = self.resample_one(*t) {
                *o = v;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ReversedTaps;

    const TAPS: [f64; 8] = [
        0.003560172702628888,
        0.03808372279569934,
        0.1610318523331153,
        0.2973242521685565,
        0.2973242521685565,
        0.1610318523331153,
        0.03808372279569934,
        0.003560172702628888,
    ];

    fn input() -> [Complex<f64>; 5] {
        [
            Complex::new(1.0, 0.0),
            Complex::new(0.0, 1.0),
            Complex::new(0.0, -1.0),
            Complex::new(-1.0, 0.0),
            Complex::new(0.0, -1.0),
        ]
    }

    #[test]
    fn range_bounds() {
        let taps = ReversedTaps::new(&TAPS);
        let kernel = GridKernel::new(4, &taps);
        let input = input();
        let mapper = GridMapper::new(&kernel, &input, 0.01);

        assert!((mapper.interim_period() - 0.0025).abs() < 1e-15);
        let range = mapper.valid_range();
        assert!((range.end() - 0.0475).abs() < 1e-12);

        assert!(mapper.resample_one(-0.0001).is_none());
        assert!(mapper.resample_one(0.05).is_none());
        assert!(mapper.resample_one(f64::NAN).is_none());
        assert!(mapper.resample_one(0.0).is_some());
        assert!(mapper.resample_one(*range.end()).is_some());
    }

    #[test]
    fn on_grid_equals_kernel() {
        let taps = ReversedTaps::new(&TAPS);
        let kernel = GridKernel::new(4, &taps);
        let input = input();
        let mapper = GridMapper::new(&kernel, &input, 1.0);

        // interim period 0.25 is exact, so grid times carry no fraction
        for j in 0..20 {
            let t = 0.25 * j as f64;
            assert_eq!(mapper.resample_one(t), Some(kernel.compute(j, &input)));
        }
    }

    #[test]
    fn linear_between_grid_samples() {
        let taps = ReversedTaps::new(&TAPS);
        let kernel = GridKernel::new(4, &taps);
        let input = input();
        let mapper = GridMapper::new(&kernel, &input, 1.0);

        let a = kernel.compute(5, &input);
        let b = kernel.compute(6, &input);
        let have = mapper.resample_one(1.25 + 0.25 * 0.5).unwrap();
        let want = (a + b) * 0.5;
        assert!((have - want).norm() < 1e-12);
    }

    #[test]
    fn empty_input_rejects_everything() {
        let taps = ReversedTaps::new(&TAPS);
        let kernel = GridKernel::new(4, &taps);
        let input: [Complex<f64>; 0] = [];
        let mapper = GridMapper::new(&kernel, &input, 0.01);

        assert!(mapper.valid_range().is_empty());
        assert!(mapper.resample_one(0.0).is_none());
    }

    #[test]
    fn resample_into_keeps_defaults() {
        let taps = ReversedTaps::new(&[1.0f32, 1.0]);
        let kernel = GridKernel::new(2, &taps);
        let input = [Complex::new(1.0f32, 0.0); 3];
        let mapper = GridMapper::new(&kernel, &input, 1.0);

        let sentinel = Complex::new(7.0f32, 7.0);
        let mut out = [sentinel; 3];
        mapper.resample_into(&[-1.0, 1.0, 100.0], &mut out);
        assert_eq!(out[0], sentinel);
        assert_eq!(out[1], Complex::new(1.0, 0.0));
        assert_eq!(out[2], sentinel);
    }
}
