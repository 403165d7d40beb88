//! Resampling Engine
use num_complex::Complex;
use num_traits::AsPrimitive;
use num_traits::Float;
use std::ops::RangeInclusive;
use tracing::Dispatch;
use upfirdsp::GridKernel;
use upfirdsp::GridMapper;
use upfirdsp::ReversedTaps;

use crate::Error;
use crate::runtime::config;
use crate::runtime::dispatch;
use crate::runtime::dispatch::WorkerOptions;
use crate::runtime::logging;

/// Engine configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EngineConfig {
    /// Upsampling factor
    pub up_rate: usize,
    /// Number of worker threads per call
    pub threads: usize,
}

impl EngineConfig {
    /// Defaults from the global [`config`](crate::runtime::config).
    ///
    /// Invalid global values fall back to `1`.
    pub fn from_global() -> Self {
        let c = config::config();
        let fallback = |field: &str, v: usize| {
            if v == 0 {
                warn!("configured {field} is zero, using 1");
                1
            } else {
                v
            }
        };
        EngineConfig {
            up_rate: fallback("up_rate", c.up_rate),
            threads: fallback("threads", c.threads),
        }
    }

    /// Check that all fields are positive.
    pub fn validate(&self) -> Result<(), Error> {
        if self.up_rate == 0 {
            return Err(Error::Configuration {
                field: "up_rate",
                value: self.up_rate,
            });
        }
        if self.threads == 0 {
            return Err(Error::Configuration {
                field: "threads",
                value: self.threads,
            });
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            up_rate: 1,
            threads: 1,
        }
    }
}

/// Resamples a uniformly-sampled complex signal at arbitrary query times.
///
/// The input is conceptually upsampled by `up_rate` (zero-stuffing followed by
/// the configured FIR filter). Each output is the linear interpolation of the
/// two upsampled samples around its query time. Work is split over `threads`
/// worker threads that are spawned and joined within each call.
///
/// ```
/// use upfirlerp::UpfirLerp64;
/// use upfirlerp::num_complex::Complex;
///
/// # fn main() -> Result<(), upfirlerp::Error> {
/// let mut ufl = UpfirLerp64::new();
/// ufl.set_up_rate(10)?.set_threads(2)?.set_up_taps(&[0.1, 1.0, 0.1]);
///
/// let input = vec![Complex::new(1.0, 0.0); 10];
/// let mut output = Vec::new();
/// ufl.interpolate(&input, 0.1, &[0.01, 0.5, -1.0], &mut output)?;
///
/// assert_eq!(output.len(), 3);
/// assert_eq!(output[2], Complex::new(0.0, 0.0));
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct UpfirLerp<T> {
    config: EngineConfig,
    taps: ReversedTaps<T>,
    workers: WorkerOptions,
}

/// Single precision engine
pub type UpfirLerp32 = UpfirLerp<f32>;
/// Double precision engine
pub type UpfirLerp64 = UpfirLerp<f64>;

impl<T> UpfirLerp<T>
where
    T: Float + Send + Sync + 'static,
    f64: AsPrimitive<T>,
{
    /// Create an engine with the globally configured defaults and no taps.
    pub fn new() -> Self {
        logging::init();
        UpfirLerp {
            config: EngineConfig::from_global(),
            taps: ReversedTaps::default(),
            workers: WorkerOptions::default(),
        }
    }

    /// Create an engine with the given configuration and no taps.
    pub fn with_config(config: EngineConfig) -> Result<Self, Error> {
        config.validate()?;
        let mut ufl = Self::new();
        ufl.config = config;
        Ok(ufl)
    }

    /// Current configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Set the upsampling rate.
    pub fn set_up_rate(&mut self, up_rate: usize) -> Result<&mut Self, Error> {
        EngineConfig {
            up_rate,
            ..self.config
        }
        .validate()?;
        self.config.up_rate = up_rate;
        Ok(self)
    }

    /// Upsampling rate
    pub fn up_rate(&self) -> usize {
        self.config.up_rate
    }

    /// Set the number of worker threads.
    pub fn set_threads(&mut self, threads: usize) -> Result<&mut Self, Error> {
        EngineConfig {
            threads,
            ..self.config
        }
        .validate()?;
        self.config.threads = threads;
        Ok(self)
    }

    /// Number of worker threads
    pub fn threads(&self) -> usize {
        self.config.threads
    }

    /// Replace the upsampling filter taps. An empty slice makes every output
    /// zero.
    pub fn set_up_taps(&mut self, taps: &[T]) -> &mut Self {
        self.taps.replace(taps);
        self
    }

    /// Stored taps, in reversed order
    pub fn taps(&self) -> &ReversedTaps<T> {
        &self.taps
    }

    /// Number of taps
    pub fn num_taps(&self) -> usize {
        self.taps.len()
    }

    /// Report worker diagnostics to `dispatch` instead of the caller's
    /// current subscriber.
    pub fn set_trace_dispatch(&mut self, dispatch: Dispatch) -> &mut Self {
        self.workers.dispatch = Some(dispatch);
        self
    }

    /// Set the stack size of worker threads.
    pub fn set_stack_size(&mut self, stack_size: usize) -> &mut Self {
        self.workers.stack_size = stack_size;
        self
    }

    /// Spacing of the upsampled grid for an input with period `input_period`.
    pub fn interim_period(&self, input_period: f64) -> f64 {
        input_period / self.config.up_rate as f64
    }

    /// Closed interval of query times that produce an output for `input`.
    pub fn valid_range(&self, input: &[Complex<T>], input_period: f64) -> RangeInclusive<f64> {
        let kernel = GridKernel::new(self.config.up_rate, &self.taps);
        GridMapper::new(&kernel, input, input_period).valid_range()
    }

    /// Resample `input` at the times `t` into the pre-sized buffer `out`.
    ///
    /// `out` must have the same length as `t`. Slots of query times outside
    /// of [`valid_range`](Self::valid_range) are not written.
    pub fn interpolate_into(
        &self,
        input: &[Complex<T>],
        input_period: f64,
        t: &[f64],
        out: &mut [Complex<T>],
    ) -> Result<(), Error> {
        if out.len() != t.len() {
            return Err(Error::Precondition {
                queries: t.len(),
                output: out.len(),
            });
        }
        if !(input_period.is_finite() && input_period > 0.0) {
            return Err(Error::InvalidPeriod(input_period));
        }

        debug!(
            "interpolating {} queries from {} samples (up {}, {} taps, {} threads)",
            t.len(),
            input.len(),
            self.config.up_rate,
            self.taps.len(),
            self.config.threads
        );

        let kernel = GridKernel::new(self.config.up_rate, &self.taps);
        let mapper = GridMapper::new(&kernel, input, input_period);

        dispatch::run(self.config.threads, out, &self.workers, |range, block| {
            mapper.resample_into(&t[range], block);
        })
    }

    /// Resample `input` at the times `t`.
    ///
    /// `out` is resized to the length of `t`; added elements are zero.
    pub fn interpolate(
        &self,
        input: &[Complex<T>],
        input_period: f64,
        t: &[f64],
        out: &mut Vec<Complex<T>>,
    ) -> Result<(), Error> {
        out.resize(t.len(), Complex::new(T::zero(), T::zero()));
        self.interpolate_into(input, input_period, t, out)
    }

    /// Resample `input` at the times `t` into a new, zero-initialized vector.
    pub fn interpolate_to_vec(
        &self,
        input: &[Complex<T>],
        input_period: f64,
        t: &[f64],
    ) -> Result<Vec<Complex<T>>, Error> {
        let mut out = Vec::new();
        self.interpolate(input, input_period, t, &mut out)?;
        Ok(out)
    }
}

impl<T> Default for UpfirLerp<T>
where
    T: Float + Send + Sync + 'static,
    f64: AsPrimitive<T>,
{
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn setters_chain() -> Result<(), Error> {
        let mut ufl = UpfirLerp64::new();
        ufl.set_up_rate(4)?.set_threads(3)?.set_up_taps(&[1.0, 2.0]);
        assert_eq!(ufl.up_rate(), 4);
        assert_eq!(ufl.threads(), 3);
        assert_eq!(ufl.taps().as_slice(), &[2.0, 1.0]);
        assert_eq!(ufl.num_taps(), 2);
        assert_eq!(ufl.config(), &EngineConfig { up_rate: 4, threads: 3 });
        Ok(())
    }

    #[test]
    fn zero_config_rejected() {
        let mut ufl = UpfirLerp32::new();
        ufl.set_up_rate(2).unwrap();

        let err = ufl.set_up_rate(0).unwrap_err();
        assert!(matches!(err, Error::Configuration { field: "up_rate", value: 0 }));
        assert_eq!(ufl.up_rate(), 2);

        let err = ufl.set_threads(0).unwrap_err();
        assert!(matches!(err, Error::Configuration { field: "threads", .. }));

        let res = UpfirLerp32::with_config(EngineConfig {
            up_rate: 1,
            threads: 0,
        });
        assert!(res.is_err());
    }

    #[test]
    fn shape_mismatch_before_write() {
        let mut ufl = UpfirLerp64::new();
        ufl.set_up_taps(&[1.0]);
        let input = [Complex::new(1.0, 0.0); 4];
        let sentinel = Complex::new(3.0, 3.0);
        let mut out = [sentinel; 2];

        let err = ufl
            .interpolate_into(&input, 1.0, &[0.0, 1.0, 2.0], &mut out)
            .unwrap_err();
        assert!(matches!(err, Error::Precondition { queries: 3, output: 2 }));
        assert_eq!(out, [sentinel; 2]);
    }

    #[test]
    fn invalid_period() {
        let ufl = UpfirLerp64::new();
        let input = [Complex::new(1.0, 0.0); 4];
        for period in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let res = ufl.interpolate_to_vec(&input, period, &[0.0]);
            assert!(matches!(res, Err(Error::InvalidPeriod(_))));
        }
    }

    #[test]
    fn resize_keeps_existing_prefix() -> Result<(), Error> {
        let mut ufl = UpfirLerp64::new();
        ufl.set_up_rate(1)?.set_up_taps(&[1.0]);
        let input = [Complex::new(1.0, 0.0); 2];
        let sentinel = Complex::new(5.0, 5.0);
        let mut out = vec![sentinel];

        ufl.interpolate(&input, 1.0, &[-1.0, -2.0, 0.0], &mut out)?;
        assert_eq!(out.len(), 3);
        assert_eq!(out[0], sentinel);
        assert_eq!(out[1], Complex::new(0.0, 0.0));
        assert_eq!(out[2], Complex::new(1.0, 0.0));

        ufl.interpolate(&input, 1.0, &[], &mut out)?;
        assert!(out.is_empty());
        Ok(())
    }

    #[test]
    fn derived_grid() {
        let mut ufl = UpfirLerp64::new();
        ufl.set_up_rate(4).unwrap();
        assert_eq!(ufl.interim_period(1.0), 0.25);
        let input = [Complex::new(0.0, 0.0); 5];
        assert_eq!(ufl.valid_range(&input, 1.0), 0.0..=4.75);
    }
}
