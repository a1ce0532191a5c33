//! Persistence diagrams and their construction from pairings.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::algs::pairing::PersistencePairing;
use crate::homology_error::HomologyError;
use crate::topology::bounds::{VertexLike, WeightLike};
use crate::topology::complex::FilteredComplex;

/// A point `(birth, death)`; essential points die at `+∞`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DiagramPoint<W = f64> {
    pub birth: W,
    pub death: W,
}

impl<W: WeightLike> DiagramPoint<W> {
    pub fn new(birth: W, death: W) -> Self {
        Self { birth, death }
    }

    /// Point of an essential class.
    pub fn essential(birth: W) -> Self {
        Self {
            birth,
            death: W::infinity(),
        }
    }

    /// `death - birth`; `+∞` for essential points.
    #[inline]
    pub fn persistence(&self) -> W {
        self.death - self.birth
    }

    #[inline]
    pub fn is_essential(&self) -> bool {
        self.death.is_infinite()
    }

    #[inline]
    pub fn is_diagonal(&self) -> bool {
        self.birth == self.death
    }
}

impl<W: WeightLike + fmt::Display> fmt::Display for DiagramPoint<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.birth, self.death)
    }
}

/// Multiset of points of one homological dimension.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PersistenceDiagram<W = f64> {
    dimension: usize,
    points: Vec<DiagramPoint<W>>,
}

impl<W: WeightLike> PersistenceDiagram<W> {
    /// Empty diagram of the given dimension.
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension,
            points: Vec::new(),
        }
    }

    pub fn from_points<I>(dimension: usize, points: I) -> Self
    where
        I: IntoIterator<Item = DiagramPoint<W>>,
    {
        Self {
            dimension,
            points: points.into_iter().collect(),
        }
    }

    #[inline]
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn set_dimension(&mut self, dimension: usize) {
        self.dimension = dimension;
    }

    pub fn add(&mut self, birth: W, death: W) {
        self.points.push(DiagramPoint::new(birth, death));
    }

    pub fn add_essential(&mut self, birth: W) {
        self.points.push(DiagramPoint::essential(birth));
    }

    pub fn points(&self) -> &[DiagramPoint<W>] {
        &self.points
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DiagramPoint<W>> {
        self.points.iter()
    }

    /// Mutable access for value normalization.
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, DiagramPoint<W>> {
        self.points.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Number of essential points.
    pub fn betti(&self) -> usize {
        self.points.iter().filter(|p| p.is_essential()).count()
    }

    /// Drops points with `birth == death`; returns how many were dropped.
    pub fn remove_diagonal(&mut self) -> usize {
        let before = self.points.len();
        self.points.retain(|p| !p.is_diagonal());
        before - self.points.len()
    }

    /// Drops essential points; returns how many were dropped.
    pub fn remove_unpaired(&mut self) -> usize {
        let before = self.points.len();
        self.points.retain(|p| !p.is_essential());
        before - self.points.len()
    }

    /// Appends the points of `other`.
    ///
    /// # Errors
    /// [`HomologyError::DiagramDimensionMismatch`] if the dimensions differ.
    pub fn merge(&mut self, other: &Self) -> Result<(), HomologyError> {
        if self.dimension != other.dimension {
            return Err(HomologyError::DiagramDimensionMismatch {
                left: self.dimension,
                right: other.dimension,
            });
        }
        self.points.extend_from_slice(&other.points);
        Ok(())
    }

    /// Sorts points by birth, then death.
    pub fn sort(&mut self) {
        self.points.sort_by(|p, q| {
            p.birth
                .partial_cmp(&q.birth)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| p.death.partial_cmp(&q.death).unwrap_or(std::cmp::Ordering::Equal))
        });
    }
}

impl<'a, W> IntoIterator for &'a PersistenceDiagram<W> {
    type Item = &'a DiagramPoint<W>;
    type IntoIter = std::slice::Iter<'a, DiagramPoint<W>>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

/// One point per line, `birth death`.
impl<W: WeightLike + fmt::Display> fmt::Display for PersistenceDiagram<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for p in &self.points {
            writeln!(f, "{p}")?;
        }
        Ok(())
    }
}

/// One diagram per dimension that occurs among the creators, sorted by
/// dimension. Points take the weights of the creator and destroyer simplices.
///
/// # Errors
/// [`HomologyError::IndexOutOfRange`] if the pairing references a position
/// outside `complex`.
pub fn make_persistence_diagrams<V, W>(
    pairing: &PersistencePairing,
    complex: &FilteredComplex<V, W>,
) -> Result<Vec<PersistenceDiagram<W>>, HomologyError>
where
    V: VertexLike,
    W: WeightLike,
{
    let mut by_dimension: BTreeMap<usize, PersistenceDiagram<W>> = BTreeMap::new();
    for pair in pairing {
        let creator = complex.at(pair.creator)?;
        let dimension = creator.dimension();
        let diagram = by_dimension
            .entry(dimension)
            .or_insert_with(|| PersistenceDiagram::new(dimension));
        match pair.destroyer {
            Some(d) => diagram.add(creator.weight(), complex.at(d)?.weight()),
            None => diagram.add_essential(creator.weight()),
        }
    }
    Ok(by_dimension.into_values().collect())
}

/// Dimension-0 diagram of a pairing over the values of a 1D function.
///
/// # Errors
/// [`HomologyError::ValueLengthMismatch`] if the pairing references an index
/// without value.
pub fn make_persistence_diagram<W: WeightLike>(
    pairing: &PersistencePairing,
    values: &[W],
) -> Result<PersistenceDiagram<W>, HomologyError> {
    let value = |i: usize| {
        values
            .get(i)
            .copied()
            .ok_or(HomologyError::ValueLengthMismatch {
                index: i,
                len: values.len(),
            })
    };
    let mut diagram = PersistenceDiagram::new(0);
    for pair in pairing {
        match pair.destroyer {
            Some(d) => diagram.add(value(pair.creator)?, value(d)?),
            None => diagram.add_essential(value(pair.creator)?),
        }
    }
    Ok(diagram)
}
