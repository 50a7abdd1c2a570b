use num::Num;

use super::SparseVec;

impl<N> SparseVec<N>
where
    N: Num + Copy + Into<f64>,
{
    /// Dot product against a dense weight row.
    /// Indices past the end of `dense` count as zero weight.
    ///
    /// # Returns
    /// * `f64` - Σ(a_i * w_i)
    #[inline]
    pub fn dot_dense(&self, dense: &[f64]) -> f64 {
        self.raw_iter()
            .map(|(idx, val)| dense.get(idx).copied().unwrap_or(0.0) * val.into())
            .sum()
    }
}
