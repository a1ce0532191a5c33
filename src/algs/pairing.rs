//! Persistence pairings and their calculation from a boundary matrix.
//!
//! A pairing matches creator indices with destroyer indices of a filtered
//! complex. Creators without destroyer are essential. Indices always refer
//! to positions in the complex the matrix was built from, also when the
//! matrix was dualized before reduction.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::algs::reduction::{ReductionAlgorithm, ReductionStats, reduce};
use crate::data::boundary_matrix::BoundaryMatrix;
use crate::data::column::Column;
use crate::debug_invariants::DebugInvariants;
use crate::homology_error::HomologyError;

/// One (creator, destroyer) pair; `destroyer` is `None` for essential classes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PersistencePair {
    pub creator: usize,
    pub destroyer: Option<usize>,
}

impl PersistencePair {
    #[inline]
    pub fn is_essential(&self) -> bool {
        self.destroyer.is_none()
    }
}

impl fmt::Display for PersistencePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.destroyer {
            Some(d) => write!(f, "({}, {})", self.creator, d),
            None => write!(f, "({}, inf)", self.creator),
        }
    }
}

/// Index-level persistence pairing.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistencePairing {
    pairs: Vec<PersistencePair>,
}

impl PersistencePairing {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records that `destroyer` kills the class created by `creator`.
    pub fn add(&mut self, creator: usize, destroyer: usize) {
        self.pairs.push(PersistencePair {
            creator,
            destroyer: Some(destroyer),
        });
    }

    /// Records an essential class.
    pub fn add_essential(&mut self, creator: usize) {
        self.pairs.push(PersistencePair {
            creator,
            destroyer: None,
        });
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PersistencePair> {
        self.pairs.iter()
    }

    pub fn pairs(&self) -> &[PersistencePair] {
        &self.pairs
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Pair whose creator is `creator`, if any.
    pub fn find(&self, creator: usize) -> Option<&PersistencePair> {
        self.pairs.iter().find(|p| p.creator == creator)
    }

    pub fn contains(&self, creator: usize, destroyer: Option<usize>) -> bool {
        self.pairs.contains(&PersistencePair { creator, destroyer })
    }

    /// Number of essential classes.
    pub fn num_essential(&self) -> usize {
        self.pairs.iter().filter(|p| p.is_essential()).count()
    }

    /// Sorts by creator, then destroyer.
    pub fn sort(&mut self) {
        self.pairs.sort_unstable();
    }
}

impl<'a> IntoIterator for &'a PersistencePairing {
    type Item = &'a PersistencePair;
    type IntoIter = std::slice::Iter<'a, PersistencePair>;

    fn into_iter(self) -> Self::IntoIter {
        self.pairs.iter()
    }
}

impl DebugInvariants for PersistencePairing {
    fn debug_assert_invariants(&self) {
        crate::debug_invariants!(self.validate_invariants(), "PersistencePairing");
    }

    /// Every creator precedes its destroyer, and no index is used twice
    /// in the same role.
    fn validate_invariants(&self) -> Result<(), HomologyError> {
        let mut creators = HashSet::with_capacity(self.pairs.len());
        let mut destroyers = HashSet::with_capacity(self.pairs.len());
        for p in &self.pairs {
            if !creators.insert(p.creator) {
                return Err(HomologyError::InvalidPairing(format!(
                    "creator {} appears twice",
                    p.creator
                )));
            }
            if let Some(d) = p.destroyer {
                if d <= p.creator {
                    return Err(HomologyError::InvalidPairing(format!(
                        "destroyer {d} does not follow creator {}",
                        p.creator
                    )));
                }
                if !destroyers.insert(d) {
                    return Err(HomologyError::InvalidPairing(format!(
                        "destroyer {d} appears twice"
                    )));
                }
            }
        }
        Ok(())
    }
}

/// Options for [`calculate_persistence_pairing`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairingOptions {
    pub algorithm: ReductionAlgorithm,
    /// Keep unpaired creators of the top dimension. Without this, they are
    /// dropped, which suits truncated complexes such as Rips complexes.
    pub include_all_unpaired_creators: bool,
    /// Only simplices at positions `< limit` may create classes. For a
    /// matrix that is not dualized, only columns `< limit` are reduced.
    pub limit: Option<usize>,
}

impl Default for PairingOptions {
    fn default() -> Self {
        Self {
            algorithm: ReductionAlgorithm::default(),
            include_all_unpaired_creators: true,
            limit: None,
        }
    }
}

/// Reduces a copy of `m` and reads off its persistence pairing, sorted.
pub fn calculate_persistence_pairing<C: Column>(
    m: &BoundaryMatrix<C>,
    options: &PairingOptions,
) -> PersistencePairing {
    calculate_persistence_pairing_with_stats(m, options).0
}

/// Like [`calculate_persistence_pairing`], also returning the reduction statistics.
pub fn calculate_persistence_pairing_with_stats<C: Column>(
    m: &BoundaryMatrix<C>,
    options: &PairingOptions,
) -> (PersistencePairing, ReductionStats) {
    let n = m.num_columns();
    let limit = options.limit.map_or(n, |l| l.min(n));
    let dualized = m.is_dualized();

    let mut b = m.clone();
    // Dual indices run backwards, so a prefix of the complex is a suffix of
    // the dual; the whole dual is reduced and the readout is restricted.
    let (stats, columns) = if dualized {
        (reduce(&mut b, options.algorithm, None), n)
    } else {
        (reduce(&mut b, options.algorithm, Some(limit)), limit)
    };

    let lows: Vec<Option<usize>> = (0..columns).map(|j| b.max_index(j)).collect();
    let is_low: HashSet<usize> = lows.iter().flatten().copied().collect();
    let creator_dimension_excluded = if dualized { 0 } else { b.dimension() };

    let mut pairing = PersistencePairing::new();
    for (j, low) in lows.iter().enumerate() {
        match *low {
            Some(i) => {
                let (u, v) = if dualized { (n - 1 - j, n - 1 - i) } else { (i, j) };
                if u < limit {
                    pairing.add(u, v);
                }
            }
            None if is_low.contains(&j) => {}
            None => {
                if !options.include_all_unpaired_creators
                    && b.dimension_of(j) == creator_dimension_excluded
                {
                    continue;
                }
                let c = if dualized { n - 1 - j } else { j };
                if c < limit {
                    pairing.add_essential(c);
                }
            }
        }
    }
    pairing.sort();

    log::debug!(
        "pairing: {} pairs, {} essential (limit {limit} of {n}, dualized = {dualized})",
        pairing.len(),
        pairing.num_essential()
    );
    crate::debug_invariants!(pairing.validate_invariants(), "calculate_persistence_pairing");
    (pairing, stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::column::{SetColumn, VecColumn};
    use crate::topology::complex::FilteredComplex;
    use crate::topology::simplex::Simplex;

    fn complex(simplices: &[&[u32]]) -> FilteredComplex {
        let mut k = FilteredComplex::from_simplices(
            simplices
                .iter()
                .map(|v| Simplex::from_vertices(v.iter().copied()).unwrap()),
        )
        .unwrap();
        k.sort();
        k
    }

    fn triangle_boundary() -> FilteredComplex {
        complex(&[&[0], &[1], &[2], &[0, 1], &[0, 2], &[1, 2]])
    }

    #[test]
    fn triangle_boundary_pairing() {
        let m = BoundaryMatrix::<VecColumn>::from_complex(&triangle_boundary()).unwrap();
        let pairing = calculate_persistence_pairing(&m, &PairingOptions::default());
        let expected = [
            PersistencePair { creator: 0, destroyer: None },
            PersistencePair { creator: 1, destroyer: Some(3) },
            PersistencePair { creator: 2, destroyer: Some(4) },
            PersistencePair { creator: 5, destroyer: None },
        ];
        assert_eq!(pairing.pairs(), &expected);
        assert_eq!(pairing.num_essential(), 2);
        assert!(pairing.validate_invariants().is_ok());
    }

    #[test]
    fn dual_pairing_matches_primal() {
        let k = complex(&[
            &[0],
            &[1],
            &[2],
            &[3],
            &[0, 1],
            &[1, 2],
            &[0, 2],
            &[2, 3],
            &[0, 1, 2],
        ]);
        let m = BoundaryMatrix::<SetColumn>::from_complex(&k).unwrap();
        for algorithm in [ReductionAlgorithm::Standard, ReductionAlgorithm::Twist] {
            let options = PairingOptions {
                algorithm,
                ..PairingOptions::default()
            };
            let primal = calculate_persistence_pairing(&m, &options);
            let dual = calculate_persistence_pairing(&m.dualize(), &options);
            assert_eq!(primal, dual);
        }
    }

    #[test]
    fn top_dimension_creators_can_be_dropped() {
        let m = BoundaryMatrix::<VecColumn>::from_complex(&triangle_boundary()).unwrap();
        let options = PairingOptions {
            include_all_unpaired_creators: false,
            ..PairingOptions::default()
        };
        let pairing = calculate_persistence_pairing(&m, &options);
        assert!(pairing.find(5).is_none());
        assert!(pairing.contains(0, None));

        let dual = calculate_persistence_pairing(&m.dualize(), &options);
        assert_eq!(pairing, dual);
    }

    #[test]
    fn limit_restricts_creators() {
        let m = BoundaryMatrix::<VecColumn>::from_complex(&triangle_boundary()).unwrap();
        let options = PairingOptions {
            limit: Some(4),
            ..PairingOptions::default()
        };
        let pairing = calculate_persistence_pairing(&m, &options);
        // {0,2} and {1,2} lie beyond the limit, so vertex 2 is never killed
        assert!(pairing.contains(1, Some(3)));
        assert!(pairing.contains(2, None));
        assert!(pairing.find(5).is_none());
    }

    #[test]
    fn invalid_pairings_are_reported() {
        let mut p = PersistencePairing::new();
        p.add(3, 1);
        assert!(matches!(
            p.validate_invariants(),
            Err(HomologyError::InvalidPairing(_))
        ));
        let mut p = PersistencePairing::new();
        p.add(0, 2);
        p.add(1, 2);
        assert!(p.validate_invariants().is_err());
    }

    #[test]
    fn display() {
        let mut p = PersistencePairing::new();
        p.add(0, 4);
        p.add_essential(1);
        let shown: Vec<String> = p.iter().map(ToString::to_string).collect();
        assert_eq!(shown, vec!["(0, 4)", "(1, inf)"]);
    }
}
