//! Sparse boundary matrix of a filtered complex over GF(2).
//!
//! Column `j` holds the filtration indices of the codimension-1 faces of
//! simplex `j`; index `j` of the matrix always denotes the simplex at
//! position `j` of the complex it was built from. Each column also records
//! the dimension of its simplex, and the matrix records the top dimension of
//! the complex. A dualized matrix stores `top - dim` per column, which keeps
//! [`dualize`](BoundaryMatrix::dualize) an exact involution.

use std::fmt;

use crate::data::column::{Column, VecColumn};
use crate::debug_invariants::DebugInvariants;
use crate::homology_error::HomologyError;
use crate::topology::bounds::{VertexLike, WeightLike};
use crate::topology::complex::FilteredComplex;

/// Column-oriented boundary matrix with storage `C`.
#[derive(Clone, Debug, PartialEq)]
pub struct BoundaryMatrix<C = VecColumn> {
    pub(crate) columns: Vec<C>,
    pub(crate) dimensions: Vec<usize>,
    pub(crate) top_dimension: usize,
    pub(crate) dualized: bool,
}

impl<C: Column> Default for BoundaryMatrix<C> {
    fn default() -> Self {
        Self::new(0)
    }
}

impl<C: Column> BoundaryMatrix<C> {
    /// `n × n` zero matrix; every column has dimension 0.
    pub fn new(num_columns: usize) -> Self {
        Self {
            columns: vec![C::default(); num_columns],
            dimensions: vec![0; num_columns],
            top_dimension: 0,
            dualized: false,
        }
    }

    /// Builds the boundary matrix of `complex` in its current order.
    ///
    /// # Errors
    /// [`HomologyError::SimplexNotFound`] if a face is missing, which only
    /// happens for complexes modified through
    /// [`FilteredComplex::remove_unchecked`] against its contract.
    pub fn from_complex<V, W>(complex: &FilteredComplex<V, W>) -> Result<Self, HomologyError>
    where
        V: VertexLike,
        W: WeightLike,
    {
        let mut m = Self::new(complex.len());
        for (j, simplex) in complex.iter().enumerate() {
            let rows = simplex
                .boundary()
                .map(|face| complex.index(&face))
                .collect::<Result<Vec<_>, _>>()?;
            m.columns[j].assign(rows);
            m.dimensions[j] = simplex.dimension();
        }
        m.top_dimension = complex.dimension().unwrap_or(0);
        log::debug!(
            "built boundary matrix: {} columns, {} nonzeros, top dimension {}",
            m.num_columns(),
            m.num_nonzeros(),
            m.top_dimension
        );
        crate::debug_invariants!(m.validate_invariants(), "BoundaryMatrix::from_complex");
        Ok(m)
    }

    #[inline]
    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    /// Total number of nonzero entries.
    pub fn num_nonzeros(&self) -> usize {
        self.columns.iter().map(Column::len).sum()
    }

    /// Lowest one of column `j`, i.e. its largest row index.
    ///
    /// # Panics
    /// If `j` is out of range.
    #[inline]
    pub fn max_index(&self, j: usize) -> Option<usize> {
        self.columns[j].max_index()
    }

    /// # Panics
    /// If `j` is out of range.
    #[inline]
    pub fn is_empty_column(&self, j: usize) -> bool {
        self.columns[j].is_empty()
    }

    /// Adds column `source` into column `target` over GF(2).
    ///
    /// # Panics
    /// If either index is out of range.
    pub fn add_columns(&mut self, source: usize, target: usize) {
        if source == target {
            self.columns[target].clear();
            return;
        }
        let (src, tgt) = if source < target {
            let (pre, suf) = self.columns.split_at_mut(target);
            (&pre[source], &mut suf[0])
        } else {
            let (pre, suf) = self.columns.split_at_mut(source);
            (&suf[0], &mut pre[target])
        };
        tgt.add_assign(src);
    }

    /// Row indices of column `j`, ascending.
    ///
    /// # Panics
    /// If `j` is out of range.
    pub fn column(&self, j: usize) -> Vec<usize> {
        self.columns[j].to_vec()
    }

    /// Borrow the storage of column `j`.
    pub fn column_ref(&self, j: usize) -> &C {
        &self.columns[j]
    }

    /// Replaces column `j` by `rows`.
    ///
    /// # Errors
    /// [`HomologyError::IndexOutOfRange`] if `j` or a row index is out of range.
    pub fn set_column<I>(&mut self, j: usize, rows: I) -> Result<(), HomologyError>
    where
        I: IntoIterator<Item = usize>,
    {
        let n = self.num_columns();
        if j >= n {
            return Err(HomologyError::IndexOutOfRange { index: j, len: n });
        }
        let rows: Vec<usize> = rows.into_iter().collect();
        if let Some(&bad) = rows.iter().find(|&&i| i >= n) {
            return Err(HomologyError::IndexOutOfRange { index: bad, len: n });
        }
        self.columns[j].assign(rows);
        Ok(())
    }

    /// # Panics
    /// If `j` is out of range.
    pub fn clear_column(&mut self, j: usize) {
        self.columns[j].clear();
    }

    /// Dimension recorded for column `j`.
    ///
    /// # Panics
    /// If `j` is out of range.
    #[inline]
    pub fn dimension_of(&self, j: usize) -> usize {
        self.dimensions[j]
    }

    /// Records dimension `d` for column `j` and raises the top dimension if needed.
    pub fn set_dimension(&mut self, j: usize, d: usize) -> Result<(), HomologyError> {
        let n = self.num_columns();
        let slot = self
            .dimensions
            .get_mut(j)
            .ok_or(HomologyError::IndexOutOfRange { index: j, len: n })?;
        *slot = d;
        self.top_dimension = self.top_dimension.max(d);
        Ok(())
    }

    /// Top dimension of the underlying complex.
    #[inline]
    pub fn dimension(&self) -> usize {
        self.top_dimension
    }

    #[inline]
    pub fn is_dualized(&self) -> bool {
        self.dualized
    }

    /// Anti-transpose; see [`crate::algs::dualization::dualize`].
    pub fn dualize(&self) -> Self {
        crate::algs::dualization::dualize(self)
    }

    /// Same matrix with a different column storage.
    pub fn convert<D: Column>(&self) -> BoundaryMatrix<D> {
        BoundaryMatrix {
            columns: self
                .columns
                .iter()
                .map(|c| {
                    let mut d = D::default();
                    d.assign(c.to_vec());
                    d
                })
                .collect(),
            dimensions: self.dimensions.clone(),
            top_dimension: self.top_dimension,
            dualized: self.dualized,
        }
    }
}

/// One line per column: its row indices, or `-` if the column is empty.
impl<C: Column> fmt::Display for BoundaryMatrix<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in &self.columns {
            if c.is_empty() {
                writeln!(f, "-")?;
            } else {
                let rows: Vec<String> = c.to_vec().iter().map(usize::to_string).collect();
                writeln!(f, "{}", rows.join(" "))?;
            }
        }
        Ok(())
    }
}

impl<C: Column> DebugInvariants for BoundaryMatrix<C> {
    fn debug_assert_invariants(&self) {
        crate::debug_invariants!(self.validate_invariants(), "BoundaryMatrix");
    }

    fn validate_invariants(&self) -> Result<(), HomologyError> {
        let n = self.num_columns();
        if self.dimensions.len() != n {
            return Err(HomologyError::IndexOutOfRange {
                index: self.dimensions.len(),
                len: n,
            });
        }
        for c in &self.columns {
            if let Some(i) = c.max_index().filter(|&i| i >= n) {
                return Err(HomologyError::IndexOutOfRange { index: i, len: n });
            }
        }
        Ok(())
    }
}
