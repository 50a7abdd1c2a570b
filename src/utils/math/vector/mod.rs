pub mod math;

use std::fmt::{self, Debug};

use num::Num;
use serde::{Deserialize, Serialize};

use crate::error::{ClassifierError, Result};

/// SparseVec stores the non-zero elements of a fixed-length vector.
/// `inds` holds element indices and `vals` their values.
///
/// Indices are kept strictly ascending and zeros are never stored.
/// Deserialization checks both, along with `index < len`.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    try_from = "RawSparseVec<N>",
    bound(deserialize = "N: Num + Copy + Deserialize<'de>")
)]
pub struct SparseVec<N>
where
    N: Num + Copy,
{
    len: usize,
    inds: Vec<u32>,
    vals: Vec<N>,
}

/// Unchecked wire form of `SparseVec`
#[derive(Deserialize)]
struct RawSparseVec<N> {
    len: usize,
    inds: Vec<u32>,
    vals: Vec<N>,
}

impl<N> TryFrom<RawSparseVec<N>> for SparseVec<N>
where
    N: Num + Copy,
{
    type Error = ClassifierError;

    fn try_from(raw: RawSparseVec<N>) -> Result<Self> {
        if raw.inds.len() != raw.vals.len() {
            return Err(ClassifierError::persist(format!(
                "sparse vector has {} indices but {} values",
                raw.inds.len(),
                raw.vals.len()
            )));
        }
        if raw.inds.windows(2).any(|w| w[0] >= w[1]) {
            return Err(ClassifierError::persist(
                "sparse vector indices are not strictly ascending",
            ));
        }
        if let Some(&last) = raw.inds.last() {
            if last as usize >= raw.len {
                return Err(ClassifierError::persist(format!(
                    "sparse vector index {} out of range for length {}",
                    last, raw.len
                )));
            }
        }
        if raw.vals.iter().any(|v| *v == N::zero()) {
            return Err(ClassifierError::persist("sparse vector stores a zero"));
        }
        Ok(SparseVec {
            len: raw.len,
            inds: raw.inds,
            vals: raw.vals,
        })
    }
}

impl<N> SparseVec<N>
where
    N: Num + Copy,
{
    /// All-zero vector of length `len`
    #[inline]
    pub fn new(len: usize) -> Self {
        SparseVec {
            len,
            inds: Vec::new(),
            vals: Vec::new(),
        }
    }

    #[inline]
    pub fn with_capacity(len: usize, nnz: usize) -> Self {
        SparseVec {
            len,
            inds: Vec::with_capacity(nnz),
            vals: Vec::with_capacity(nnz),
        }
    }

    /// Build from (index, value) pairs in any order.
    /// Zero values are skipped; duplicate indices are summed.
    ///
    /// # Errors
    /// `DimensionMismatch` if an index is out of range (`index >= len`).
    pub fn from_pairs(len: usize, mut pairs: Vec<(usize, N)>) -> Result<Self> {
        pairs.sort_by_key(|(idx, _)| *idx);
        if let Some(&(max, _)) = pairs.last() {
            if max >= len {
                return Err(ClassifierError::dimension_mismatch(len, max + 1));
            }
        }
        let mut vec = Self::with_capacity(len, pairs.len());
        for (idx, val) in pairs {
            match vec.inds.last() {
                Some(&last) if last as usize == idx => {
                    if let Some(slot) = vec.vals.last_mut() {
                        *slot = *slot + val;
                    }
                }
                _ => {
                    vec.inds.push(idx as u32);
                    vec.vals.push(val);
                }
            }
        }
        vec.drop_zeros();
        Ok(vec)
    }

    /// Build from a dense slice
    pub fn from_dense(dense: &[N]) -> Self {
        let mut vec = Self::new(dense.len());
        for (idx, &val) in dense.iter().enumerate() {
            if val != N::zero() {
                vec.inds.push(idx as u32);
                vec.vals.push(val);
            }
        }
        vec
    }

    fn drop_zeros(&mut self) {
        if self.vals.iter().all(|v| *v != N::zero()) {
            return;
        }
        let (inds, vals): (Vec<u32>, Vec<N>) = self
            .inds
            .iter()
            .zip(self.vals.iter())
            .filter(|(_, v)| **v != N::zero())
            .map(|(i, v)| (*i, *v))
            .unzip();
        self.inds = inds;
        self.vals = vals;
    }

    #[inline]
    fn ind_binary_search(&self, index: usize) -> std::result::Result<usize, usize> {
        self.inds.binary_search(&(index as u32))
    }

    /// Logical length
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of stored (non-zero) elements
    #[inline]
    pub fn nnz(&self) -> usize {
        self.inds.len()
    }

    #[inline]
    pub fn is_all_zero(&self) -> bool {
        self.inds.is_empty()
    }

    /// Element at `index`, zero when not stored, `None` past the end
    #[inline]
    pub fn get(&self, index: usize) -> Option<N> {
        if index >= self.len {
            return None;
        }
        match self.ind_binary_search(index) {
            Ok(pos) => Some(self.vals[pos]),
            Err(_) => Some(N::zero()),
        }
    }

    /// Iterate over stored (index, value) pairs in ascending index order
    #[inline]
    pub fn raw_iter(&self) -> impl Iterator<Item = (usize, N)> + '_ {
        self.inds.iter().zip(self.vals.iter()).map(|(i, v)| (*i as usize, *v))
    }

    /// Iterate over every element, zeros included
    pub fn iter(&self) -> impl Iterator<Item = N> + '_ {
        (0..self.len).map(move |i| self.get(i).unwrap_or_else(N::zero))
    }

    pub fn to_dense(&self) -> Vec<N> {
        let mut dense = vec![N::zero(); self.len];
        for (idx, val) in self.raw_iter() {
            dense[idx] = val;
        }
        dense
    }
}

impl<N: Num + Copy + Debug> Debug for SparseVec<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            writeln!(f, "SparseVec({}) [", self.len)?;
            for (idx, val) in self.raw_iter() {
                writeln!(f, "    {}: {:?}", idx, val)?;
            }
            write!(f, "]")
        } else {
            f.debug_struct("SparseVec")
                .field("len", &self.len)
                .field("entries", &self.raw_iter().collect::<Vec<_>>())
                .finish()
        }
    }
}
