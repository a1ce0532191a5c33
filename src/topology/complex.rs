//! `FilteredComplex`: an ordered, face-closed collection of simplices.
//!
//! Position `i` in the complex is the filtration index of the simplex stored
//! there; boundary matrices and pairings refer to simplices by this index.
//! A vertex-set index provides O(1) position lookup and is rebuilt after
//! every reordering.
//!
//! # Invariants
//! - No vertex set is stored twice.
//! - Every codimension-1 face of a stored simplex is stored (closure).
//! - After [`FilteredComplex::sort`] with any of the provided orders, every
//!   face precedes its cofaces (filtration invariant). Arbitrary orders may
//!   break this; check with [`FilteredComplex::validate_filtration`].
//!
//! [`FilteredComplex::remove_unchecked`] is the only operation that skips
//! validation; its contract is documented there.

use std::collections::HashMap;
use std::fmt;
use std::ops::Index;

use itertools::Itertools;

use crate::debug_invariants::DebugInvariants;
use crate::homology_error::HomologyError;
use crate::topology::bounds::{VertexLike, WeightLike};
use crate::topology::filtration::{DataOrder, FiltrationOrder};
use crate::topology::simplex::Simplex;

/// A complex whose simplex order is the filtration order.
#[derive(Clone, Debug)]
pub struct FilteredComplex<V = u32, W = f64> {
    simplices: Vec<Simplex<V, W>>,
    index: HashMap<Vec<V>, usize>,
}

impl<V, W> Default for FilteredComplex<V, W> {
    fn default() -> Self {
        Self {
            simplices: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<V: VertexLike, W: WeightLike> FilteredComplex<V, W> {
    /// Creates an empty complex.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a complex from a face-closed set of simplices, keeping the
    /// given order. Call [`sort`](Self::sort) to obtain a filtration.
    ///
    /// # Errors
    /// - [`HomologyError::DuplicateSimplex`] if a vertex set repeats.
    /// - [`HomologyError::MissingFace`] if the set is not closed under faces.
    pub fn from_simplices<I>(simplices: I) -> Result<Self, HomologyError>
    where
        I: IntoIterator<Item = Simplex<V, W>>,
    {
        let mut k = Self::new();
        for s in simplices {
            k.insert_unvalidated(s)?;
        }
        k.validate_closure()?;
        Ok(k)
    }

    /// Builds a complex from an arbitrary set of simplices, adding every
    /// missing face. An added face carries the weight of the coface that
    /// required it, so weights never decrease towards cofaces.
    pub fn with_closure<I>(simplices: I) -> Result<Self, HomologyError>
    where
        I: IntoIterator<Item = Simplex<V, W>>,
    {
        let mut k = Self::new();
        for s in simplices {
            k.insert_unvalidated(s)?;
        }
        let mut pos = 0;
        while pos < k.simplices.len() {
            let missing: Vec<_> = k.simplices[pos]
                .boundary()
                .filter(|f| !k.index.contains_key(f.vertices()))
                .collect();
            for face in missing {
                k.insert_unvalidated(face)?;
            }
            pos += 1;
        }
        Ok(k)
    }

    /// Wraps simplices that are known to be unique and face-closed, keeping
    /// their order even if it is not a filtration.
    pub(crate) fn from_ordered_unchecked(simplices: Vec<Simplex<V, W>>) -> Self {
        let mut k = Self {
            simplices,
            index: HashMap::new(),
        };
        k.rebuild_index();
        k
    }

    fn insert_unvalidated(&mut self, s: Simplex<V, W>) -> Result<(), HomologyError> {
        if self.index.contains_key(s.vertices()) {
            return Err(HomologyError::DuplicateSimplex(s.to_string()));
        }
        self.index.insert(s.vertices().to_vec(), self.simplices.len());
        self.simplices.push(s);
        Ok(())
    }

    fn rebuild_index(&mut self) {
        self.index.clear();
        self.index.reserve(self.simplices.len());
        for (i, s) in self.simplices.iter().enumerate() {
            self.index.insert(s.vertices().to_vec(), i);
        }
    }

    /// Number of simplices.
    #[inline]
    pub fn len(&self) -> usize {
        self.simplices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.simplices.is_empty()
    }

    /// Simplices in filtration order.
    pub fn iter(&self) -> std::slice::Iter<'_, Simplex<V, W>> {
        self.simplices.iter()
    }

    pub fn as_slice(&self) -> &[Simplex<V, W>] {
        &self.simplices
    }

    /// Simplex at filtration index `i`.
    pub fn get(&self, i: usize) -> Option<&Simplex<V, W>> {
        self.simplices.get(i)
    }

    /// Simplex at filtration index `i`, or [`HomologyError::IndexOutOfRange`].
    pub fn at(&self, i: usize) -> Result<&Simplex<V, W>, HomologyError> {
        self.simplices.get(i).ok_or(HomologyError::IndexOutOfRange {
            index: i,
            len: self.simplices.len(),
        })
    }

    /// Filtration index of `simplex` (matched by vertex set).
    ///
    /// # Errors
    /// [`HomologyError::SimplexNotFound`] if the complex does not contain it.
    pub fn index(&self, simplex: &Simplex<V, W>) -> Result<usize, HomologyError> {
        self.index_of_vertices(simplex.vertices())
    }

    /// Filtration index of the simplex with the given sorted vertex set.
    pub fn index_of_vertices(&self, vertices: &[V]) -> Result<usize, HomologyError> {
        self.index
            .get(vertices)
            .copied()
            .ok_or_else(|| HomologyError::SimplexNotFound(format!("{vertices:?}")))
    }

    pub fn contains(&self, simplex: &Simplex<V, W>) -> bool {
        self.index.contains_key(simplex.vertices())
    }

    /// Stored copy of `simplex`, carrying the stored weight.
    pub fn find(&self, simplex: &Simplex<V, W>) -> Option<&Simplex<V, W>> {
        self.index
            .get(simplex.vertices())
            .map(|&i| &self.simplices[i])
    }

    /// Maximum simplex dimension, `None` for the empty complex.
    pub fn dimension(&self) -> Option<usize> {
        self.simplices.iter().map(Simplex::dimension).max()
    }

    /// All vertices occurring as 0-simplices, ascending.
    pub fn vertices(&self) -> Vec<V> {
        self.simplices
            .iter()
            .filter(|s| s.dimension() == 0)
            .map(|s| s.vertices()[0])
            .sorted_unstable()
            .collect()
    }

    /// Weights in filtration order.
    pub fn weights(&self) -> Vec<W> {
        self.simplices.iter().map(Simplex::weight).collect()
    }

    // ---------------------------------------------------------------------
    // Ordering
    // ---------------------------------------------------------------------

    /// Sorts into the default filtration order ([`DataOrder`]).
    pub fn sort(&mut self) {
        self.sort_by(&DataOrder);
    }

    /// Sorts with a user-supplied total order.
    pub fn sort_by<O>(&mut self, order: &O)
    where
        O: FiltrationOrder<V, W> + ?Sized,
    {
        self.simplices.sort_by(|a, b| order.compare(a, b));
        self.rebuild_index();
        log::trace!("sorted complex of {} simplices", self.simplices.len());
    }

    /// Checks that every face is stored and precedes each of its cofaces.
    pub fn validate_filtration(&self) -> Result<(), HomologyError> {
        for (j, s) in self.simplices.iter().enumerate() {
            for face in s.boundary() {
                match self.index.get(face.vertices()) {
                    Some(&i) if i < j => {}
                    Some(&i) => {
                        return Err(HomologyError::FiltrationOrderViolation { face: i, coface: j });
                    }
                    None => {
                        return Err(HomologyError::MissingFace {
                            simplex: s.to_string(),
                            face: face.to_string(),
                        });
                    }
                }
            }
        }
        Ok(())
    }

    /// `true` if [`validate_filtration`](Self::validate_filtration) succeeds.
    pub fn is_filtration(&self) -> bool {
        self.validate_filtration().is_ok()
    }

    fn validate_closure(&self) -> Result<(), HomologyError> {
        for s in &self.simplices {
            if let Some(face) = s.boundary().find(|f| !self.index.contains_key(f.vertices())) {
                return Err(HomologyError::MissingFace {
                    simplex: s.to_string(),
                    face: face.to_string(),
                });
            }
        }
        Ok(())
    }

    // ---------------------------------------------------------------------
    // Range and incidence queries
    // ---------------------------------------------------------------------

    /// Contiguous slice of all simplices of dimension `dim`.
    ///
    /// The slice is empty if no simplex has that dimension.
    ///
    /// # Errors
    /// [`HomologyError::NonContiguousDimension`] if the current order
    /// interleaves `dim` with other dimensions.
    pub fn range(&self, dim: usize) -> Result<&[Simplex<V, W>], HomologyError> {
        let Some(first) = self.simplices.iter().position(|s| s.dimension() == dim) else {
            return Ok(&[]);
        };
        let last = self
            .simplices
            .iter()
            .rposition(|s| s.dimension() == dim)
            .unwrap_or(first);
        let slice = &self.simplices[first..=last];
        if slice.iter().any(|s| s.dimension() != dim) {
            return Err(HomologyError::NonContiguousDimension(dim));
        }
        Ok(slice)
    }

    /// Filtration indices of the codimension-1 faces of simplex `i`, ascending.
    pub fn faces(&self, i: usize) -> Result<Vec<usize>, HomologyError> {
        let s = self.at(i)?;
        let mut out = s
            .boundary()
            .map(|f| self.index(&f))
            .collect::<Result<Vec<_>, _>>()?;
        out.sort_unstable();
        Ok(out)
    }

    /// Filtration indices of the codimension-1 cofaces of simplex `i`,
    /// ascending. Runs in O(n).
    pub fn cofaces(&self, i: usize) -> Result<Vec<usize>, HomologyError> {
        let s = self.at(i)?;
        Ok(self
            .simplices
            .iter()
            .enumerate()
            .filter(|(_, t)| t.dimension() == s.dimension() + 1 && s.is_face_of(t))
            .map(|(j, _)| j)
            .collect())
    }

    /// Dimension of the largest face of `simplex` (itself included) that
    /// this complex contains, `None` if they share no vertex.
    pub fn intersection_dimension(&self, simplex: &Simplex<V, W>) -> Option<usize> {
        let vertices = simplex.vertices();
        (1..=vertices.len()).rev().find(|&k| {
            vertices
                .iter()
                .copied()
                .combinations(k)
                .any(|face| self.index.contains_key(face.as_slice()))
        })
        .map(|k| k - 1)
    }

    // ---------------------------------------------------------------------
    // Mutation
    // ---------------------------------------------------------------------

    /// Appends `simplex` at the end of the filtration.
    ///
    /// # Errors
    /// [`HomologyError::DuplicateSimplex`] or [`HomologyError::MissingFace`].
    pub fn push(&mut self, simplex: Simplex<V, W>) -> Result<(), HomologyError> {
        if let Some(face) = simplex
            .boundary()
            .find(|f| !self.index.contains_key(f.vertices()))
        {
            return Err(HomologyError::MissingFace {
                simplex: simplex.to_string(),
                face: face.to_string(),
            });
        }
        self.insert_unvalidated(simplex)
    }

    /// Removes `simplex` together with every simplex having it as a face.
    ///
    /// Returns the removed simplices in their former filtration order.
    pub fn remove(&mut self, simplex: &Simplex<V, W>) -> Result<Vec<Simplex<V, W>>, HomologyError> {
        let i = self.index(simplex)?;
        let target = self.simplices[i].clone();
        let (removed, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut self.simplices)
            .into_iter()
            .partition(|s| *s == target || target.is_face_of(s));
        self.simplices = kept;
        self.rebuild_index();
        Ok(removed)
    }

    /// Removes the simplex at position `i` without any validation.
    ///
    /// # Contract
    /// The caller guarantees that no remaining simplex has the removed one as
    /// a face (collapse-style algorithms know this by construction). Breaking
    /// the contract leaves a complex that is not closed under faces; debug
    /// builds panic on it.
    ///
    /// # Panics
    /// If `i >= self.len()`.
    pub fn remove_unchecked(&mut self, i: usize) -> Simplex<V, W> {
        let removed = self.simplices.remove(i);
        self.rebuild_index();
        crate::debug_invariants!(self.validate_closure(), "remove_unchecked broke closure");
        removed
    }

    /// Replaces the simplex at position `i`.
    ///
    /// The replacement must keep the complex closed and ordered: all of its
    /// faces must be stored before position `i`, and if the vertex set
    /// changes, no stored simplex may have the old one as a face.
    pub fn replace(&mut self, i: usize, simplex: Simplex<V, W>) -> Result<Simplex<V, W>, HomologyError> {
        let old = self.at(i)?;
        if *old != simplex {
            if self.contains(&simplex) {
                return Err(HomologyError::DuplicateSimplex(simplex.to_string()));
            }
            if let Some(coface) = self.simplices.iter().find(|t| old.is_face_of(t)) {
                return Err(HomologyError::MissingFace {
                    simplex: coface.to_string(),
                    face: old.to_string(),
                });
            }
        }
        for face in simplex.boundary() {
            match self.index.get(face.vertices()) {
                Some(&f) if f < i => {}
                Some(&f) => {
                    return Err(HomologyError::FiltrationOrderViolation { face: f, coface: i });
                }
                None => {
                    return Err(HomologyError::MissingFace {
                        simplex: simplex.to_string(),
                        face: face.to_string(),
                    });
                }
            }
        }
        self.index.remove(self.simplices[i].vertices());
        self.index.insert(simplex.vertices().to_vec(), i);
        Ok(std::mem::replace(&mut self.simplices[i], simplex))
    }

    /// Assigns every simplex of positive dimension the maximum weight of its
    /// faces. Vertex weights are left untouched.
    pub fn recalculate_weights(&mut self) {
        let order: Vec<usize> = (0..self.simplices.len())
            .sorted_by_key(|&i| self.simplices[i].dimension())
            .collect();
        for i in order {
            if self.simplices[i].dimension() == 0 {
                continue;
            }
            let weight = self.simplices[i]
                .boundary()
                .filter_map(|f| self.index.get(f.vertices()).map(|&j| self.simplices[j].weight()))
                .fold(W::neg_infinity(), W::max);
            self.simplices[i].set_weight(weight);
        }
    }

    /// Sets vertex weights from `f` and propagates them upwards with
    /// [`recalculate_weights`](Self::recalculate_weights).
    pub fn recalculate_weights_from_vertices<F>(&mut self, f: F)
    where
        F: Fn(V) -> W,
    {
        for s in self.simplices.iter_mut().filter(|s| s.dimension() == 0) {
            let w = f(s.vertices()[0]);
            s.set_weight(w);
        }
        self.recalculate_weights();
    }
}

impl<V: VertexLike, W: WeightLike> Index<usize> for FilteredComplex<V, W> {
    type Output = Simplex<V, W>;

    fn index(&self, i: usize) -> &Self::Output {
        &self.simplices[i]
    }
}

impl<'a, V, W> IntoIterator for &'a FilteredComplex<V, W> {
    type Item = &'a Simplex<V, W>;
    type IntoIter = std::slice::Iter<'a, Simplex<V, W>>;

    fn into_iter(self) -> Self::IntoIter {
        self.simplices.iter()
    }
}

/// Two complexes are equal if they store the same vertex sets in the same
/// filtration order.
impl<V: VertexLike, W> PartialEq for FilteredComplex<V, W> {
    fn eq(&self, other: &Self) -> bool {
        self.simplices == other.simplices
    }
}

impl<V: VertexLike, W: WeightLike> fmt::Display for FilteredComplex<V, W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for s in &self.simplices {
            writeln!(f, "{s}")?;
        }
        Ok(())
    }
}

impl<V: VertexLike, W: WeightLike> DebugInvariants for FilteredComplex<V, W> {
    fn debug_assert_invariants(&self) {
        crate::debug_invariants!(self.validate_invariants(), "FilteredComplex");
    }

    fn validate_invariants(&self) -> Result<(), HomologyError> {
        if self.index.len() != self.simplices.len() {
            return Err(HomologyError::IndexOutOfRange {
                index: self.index.len(),
                len: self.simplices.len(),
            });
        }
        for (i, s) in self.simplices.iter().enumerate() {
            if self.index.get(s.vertices()) != Some(&i) {
                return Err(HomologyError::SimplexNotFound(s.to_string()));
            }
        }
        self.validate_filtration()
    }
}
