//! Parallel Dispatcher
//!
//! Splits an output buffer into contiguous, disjoint blocks and processes each
//! block on a freshly spawned worker thread. All workers are joined before
//! [`run`] returns.
use std::ops::Range;
use std::thread;
use tracing::Dispatch;

use crate::Error;

/// Worker thread settings.
#[derive(Clone, Debug)]
pub struct WorkerOptions {
    /// Stack size of each worker thread
    pub stack_size: usize,
    /// Subscriber the workers report to. Defaults to the caller's current
    /// dispatcher.
    pub dispatch: Option<Dispatch>,
}

impl Default for WorkerOptions {
    fn default() -> Self {
        WorkerOptions {
            stack_size: crate::runtime::config::config().stack_size,
            dispatch: None,
        }
    }
}

/// Index range of block `k` out of `workers` blocks covering `0..len`.
///
/// ```
/// use upfirlerp::runtime::dispatch::partition;
///
/// assert_eq!(partition(0, 3, 10), 0..3);
/// assert_eq!(partition(1, 3, 10), 3..6);
/// assert_eq!(partition(2, 3, 10), 6..10);
/// ```
pub fn partition(k: usize, workers: usize, len: usize) -> Range<usize> {
    let start = k * len / workers;
    let end = ((k + 1) * len / workers).min(len);
    start..end
}

/// Run `f` over `workers` disjoint blocks of `out`, one thread per block.
///
/// `f` is called with the index range of the block and the corresponding
/// mutable slice of `out`. The caller must pass `workers > 0`.
pub fn run<T, F>(workers: usize, out: &mut [T], options: &WorkerOptions, f: F) -> Result<(), Error>
where
    T: Send,
    F: Fn(Range<usize>, &mut [T]) + Sync,
{
    debug_assert!(workers > 0);
    let len = out.len();
    let dispatch = options
        .dispatch
        .clone()
        .unwrap_or_else(|| tracing::dispatcher::get_default(|d| d.clone()));

    thread::scope(|s| -> Result<(), Error> {
        let mut handles = Vec::with_capacity(workers);
        let mut rest = out;

        for k in 0..workers {
            let range = partition(k, workers, len);
            let (block, tail) = std::mem::take(&mut rest).split_at_mut(range.len());
            rest = tail;

            let f = &f;
            let dispatch = dispatch.clone();
            let handle = thread::Builder::new()
                .name(format!("upfirlerp-{k}"))
                .stack_size(options.stack_size)
                .spawn_scoped(s, move || {
                    tracing::dispatcher::with_default(&dispatch, || {
                        trace!("worker {k}: indices {range:?}");
                        f(range, block);
                    })
                })?;
            handles.push(handle);
        }

        let mut result = Ok(());
        for handle in handles {
            if handle.join().is_err() {
                result = Err(Error::WorkerPanicked);
            }
        }
        result
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partitions_cover_range() {
        for workers in 1..8 {
            for len in [0, 1, 5, 7, 100, 101] {
                let mut next = 0;
                for k in 0..workers {
                    let r = partition(k, workers, len);
                    assert_eq!(r.start, next);
                    next = r.end;
                }
                assert_eq!(next, len);
            }
        }
    }

    #[test]
    fn each_index_written_once() {
        let mut out = vec![0usize; 103];
        run(4, &mut out, &WorkerOptions::default(), |range, block| {
            assert_eq!(range.len(), block.len());
            for (i, o) in range.zip(block.iter_mut()) {
                *o += i + 1;
            }
        })
        .unwrap();
        assert!(out.iter().enumerate().all(|(i, o)| *o == i + 1));
    }

    #[test]
    fn more_workers_than_items() {
        let mut out = vec![0u8; 2];
        run(5, &mut out, &WorkerOptions::default(), |_, block| {
            for o in block {
                *o = 1;
            }
        })
        .unwrap();
        assert_eq!(out, vec![1, 1]);

        let mut out: Vec<u8> = Vec::new();
        run(3, &mut out, &WorkerOptions::default(), |range, _| {
            assert!(range.is_empty());
        })
        .unwrap();
    }

    #[test]
    fn worker_panic_is_reported() {
        let mut out = vec![0u8; 4];
        let res = run(2, &mut out, &WorkerOptions::default(), |range, _| {
            if range.start == 0 {
                panic!("boom");
            }
        });
        assert!(matches!(res, Err(Error::WorkerPanicked)));
    }
}
