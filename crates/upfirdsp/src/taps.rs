//! Filter Taps
use alloc::vec::Vec;

/// Abstraction over taps stored in traversal order.
///
/// Index `0` is the tap applied to the earliest grid sample of a kernel
/// window, i.e., the *last* coefficient of the designed filter.
pub trait Taps: Send {
    /// Tap type
    type TapType;

    /// Number of taps
    fn num_taps(&self) -> usize;

    /// Gets the `index`th tap.
    ///
    /// # Safety
    /// The invariant `index < num_taps()` must be upheld.
    unsafe fn get(&self, index: usize) -> Self::TapType;
}

/// Filter coefficients, stored reversed so that a kernel walks grid indices
/// and tap indices in the same, increasing direction.
///
/// The whole sequence is replaced at once; individual coefficients cannot be
/// changed.
///
/// ```
/// use upfirdsp::ReversedTaps;
///
/// let taps = ReversedTaps::new(&[1.0f64, 2.0, 3.0]);
/// assert_eq!(taps.as_slice(), &[3.0, 2.0, 1.0]);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct ReversedTaps<T> {
    rev: Vec<T>,
}

impl<T> Default for ReversedTaps<T> {
    fn default() -> Self {
        Self { rev: Vec::new() }
    }
}

impl<T: Copy> ReversedTaps<T> {
    /// Store a reversed copy of `coeffs`.
    pub fn new(coeffs: &[T]) -> Self {
        Self {
            rev: coeffs.iter().rev().copied().collect(),
        }
    }

    /// Replace the stored sequence with a reversed copy of `coeffs`.
    pub fn replace(&mut self, coeffs: &[T]) {
        self.rev.clear();
        self.rev.extend(coeffs.iter().rev().copied());
    }

    /// Reversed coefficients, in traversal order.
    pub fn as_slice(&self) -> &[T] {
        &self.rev
    }

    /// Coefficients in their original (designed) order.
    pub fn to_coefficients(&self) -> Vec<T> {
        self.rev.iter().rev().copied().collect()
    }

    /// Number of taps
    pub fn len(&self) -> usize {
        self.rev.len()
    }

    /// Whether no taps are configured.
    pub fn is_empty(&self) -> bool {
        self.rev.is_empty()
    }
}

impl<T> Taps for ReversedTaps<T>
where
    T: Send + Sync + Copy,
{
    type TapType = T;

    fn num_taps(&self) -> usize {
        self.rev.len()
    }

    unsafe fn get(&self, index: usize) -> T {
        debug_assert!(index < self.num_taps());
        unsafe { *self.rev.get_unchecked(index) }
    }
}

impl<T> Taps for &ReversedTaps<T>
where
    T: Send + Sync + Copy,
{
    type TapType = T;

    fn num_taps(&self) -> usize {
        self.rev.len()
    }

    unsafe fn get(&self, index: usize) -> T {
        debug_assert!(index < self.num_taps());
        unsafe { *self.rev.get_unchecked(index) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stores_reversed() {
        let taps = ReversedTaps::new(&[1.0f32, 2.0, 3.0, 4.0]);
        assert_eq!(taps.as_slice(), &[4.0, 3.0, 2.0, 1.0]);
        assert_eq!(taps.to_coefficients(), vec![1.0, 2.0, 3.0, 4.0]);
        assert_eq!(taps.num_taps(), 4);
        assert_eq!(unsafe { taps.get(0) }, 4.0);
    }

    #[test]
    fn replace_swaps_whole_sequence() {
        let mut taps = ReversedTaps::new(&[1.0f64, 2.0, 3.0]);
        taps.replace(&[5.0, 6.0]);
        assert_eq!(taps.as_slice(), &[6.0, 5.0]);

        taps.replace(&[]);
        assert!(taps.is_empty());
        assert_eq!((&taps).num_taps(), 0);
    }
}
