//! Column reduction of boundary matrices over GF(2).
//!
//! Both strategies bring the matrix into reduced form, where the lowest ones
//! of all nonempty columns are pairwise distinct, by adding earlier columns
//! into later ones. They produce the same lowest ones.
//!
//! - [`ReductionAlgorithm::Standard`] walks the columns left to right.
//! - [`ReductionAlgorithm::Twist`] walks the dimensions from the top down.
//!   Whenever column `j` ends up with lowest one `i`, column `i` is known to
//!   reduce to zero and is cleared without any additions.
//!
//! An optional `limit` restricts the reduction to columns `< limit`. Columns
//! at or after the limit are neither reduced nor cleared.

use serde::{Deserialize, Serialize};

use crate::data::boundary_matrix::BoundaryMatrix;
use crate::data::column::Column;

/// Reduction strategy, selected at runtime.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReductionAlgorithm {
    Standard,
    #[default]
    Twist,
}

/// Work performed by one reduction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReductionStats {
    /// Number of column additions.
    pub additions: usize,
    /// Columns cleared by the twist shortcut.
    pub cleared: usize,
    /// Columns left with a lowest one.
    pub pairs: usize,
}

/// Reduces `m` in place with `algorithm`, touching only columns `< limit`.
pub fn reduce<C: Column>(
    m: &mut BoundaryMatrix<C>,
    algorithm: ReductionAlgorithm,
    limit: Option<usize>,
) -> ReductionStats {
    let limit = limit.map_or(m.num_columns(), |l| l.min(m.num_columns()));
    let stats = match algorithm {
        ReductionAlgorithm::Standard => reduce_standard(m, limit),
        ReductionAlgorithm::Twist => reduce_twist(m, limit),
    };
    log::debug!(
        "{algorithm:?} reduction of {limit}/{} columns: {} additions, {} cleared, {} pairs",
        m.num_columns(),
        stats.additions,
        stats.cleared,
        stats.pairs
    );
    stats
}

/// Eliminates the lowest one of column `j` against the owners recorded in
/// `lut` until it is empty or owns its lowest one. Returns the new owner row.
#[inline]
fn eliminate<C: Column>(
    m: &mut BoundaryMatrix<C>,
    lut: &mut [Option<usize>],
    j: usize,
    stats: &mut ReductionStats,
) -> Option<usize> {
    while let Some(i) = m.max_index(j) {
        match lut[i] {
            Some(k) => {
                m.add_columns(k, j);
                stats.additions += 1;
            }
            None => {
                lut[i] = Some(j);
                stats.pairs += 1;
                return Some(i);
            }
        }
    }
    None
}

fn reduce_standard<C: Column>(m: &mut BoundaryMatrix<C>, limit: usize) -> ReductionStats {
    let mut lut = vec![None; m.num_columns()];
    let mut stats = ReductionStats::default();
    for j in 0..limit {
        eliminate(m, &mut lut, j, &mut stats);
    }
    stats
}

fn reduce_twist<C: Column>(m: &mut BoundaryMatrix<C>, limit: usize) -> ReductionStats {
    let mut lut = vec![None; m.num_columns()];
    let mut stats = ReductionStats::default();
    // dimension 0 is empty for matrices built from a complex, but not for
    // matrices filled through `set_column`
    for d in (0..=m.dimension()).rev() {
        log::trace!("twist pass over dimension {d}");
        for j in 0..limit {
            if m.dimension_of(j) != d {
                continue;
            }
            if let Some(i) = eliminate(m, &mut lut, j, &mut stats) {
                if i < limit && !m.is_empty_column(i) {
                    m.clear_column(i);
                    stats.cleared += 1;
                }
            }
        }
    }
    stats
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

    fn filled_triangle() -> FilteredComplex {
        complex(&[&[0], &[1], &[2], &[0, 1], &[0, 2], &[1, 2], &[0, 1, 2]])
    }

    fn lows<C: Column>(m: &BoundaryMatrix<C>) -> Vec<Option<usize>> {
        (0..m.num_columns()).map(|j| m.max_index(j)).collect()
    }

    #[test]
    fn standard_reduces_triangle() {
        let mut m = BoundaryMatrix::<VecColumn>::from_complex(&filled_triangle()).unwrap();
        let stats = reduce(&mut m, ReductionAlgorithm::Standard, None);
        // {1,2} cancels against {0,1} and {0,2}
        assert_eq!(
            lows(&m),
            vec![None, None, None, Some(1), Some(2), None, Some(5)]
        );
        assert_eq!(stats.pairs, 3);
        assert_eq!(stats.additions, 2);
        assert_eq!(stats.cleared, 0);
    }

    #[test]
    fn twist_clears_and_agrees() {
        let k = filled_triangle();
        let mut standard = BoundaryMatrix::<VecColumn>::from_complex(&k).unwrap();
        let mut twist = BoundaryMatrix::<SetColumn>::from_complex(&k).unwrap();
        reduce(&mut standard, ReductionAlgorithm::Standard, None);
        let stats = reduce(&mut twist, ReductionAlgorithm::Twist, None);
        assert_eq!(lows(&standard), lows(&twist));
        // the triangle's lowest one is {1,2}, whose column is skipped
        assert_eq!(stats.cleared, 1);
        assert_eq!(stats.additions, 0);
    }

    #[test]
    fn limit_leaves_tail_untouched() {
        let k = filled_triangle();
        let original = BoundaryMatrix::<VecColumn>::from_complex(&k).unwrap();
        for algorithm in [ReductionAlgorithm::Standard, ReductionAlgorithm::Twist] {
            let mut m = original.clone();
            reduce(&mut m, algorithm, Some(5));
            assert_eq!(m.column(5), original.column(5));
            assert_eq!(m.column(6), original.column(6));
        }
    }

    #[test]
    fn reduction_is_deterministic() {
        let k = complex(&[
            &[0],
            &[1],
            &[2],
            &[3],
            &[0, 1],
            &[1, 2],
            &[2, 3],
            &[0, 3],
            &[0, 2],
            &[0, 1, 2],
        ]);
        for algorithm in [ReductionAlgorithm::Standard, ReductionAlgorithm::Twist] {
            let mut a = BoundaryMatrix::<VecColumn>::from_complex(&k).unwrap();
            let mut b = a.clone();
            assert_eq!(reduce(&mut a, algorithm, None), reduce(&mut b, algorithm, None));
            assert_eq!(a, b);
        }
    }
}
