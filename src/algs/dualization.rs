//! Anti-transpose of a boundary matrix.
//!
//! Position `i` of the dual matrix corresponds to position `n - 1 - i` of the
//! original, and boundaries become coboundaries: if row `i` is set in column
//! `j` of the original, row `n - 1 - j` is set in column `n - 1 - i` of the
//! dual. Because every original column only holds rows below its own index,
//! the dual keeps that shape and can be reduced by the same engine.

use crate::data::boundary_matrix::BoundaryMatrix;
use crate::data::column::Column;

/// Dual matrix of `m`. Applying it twice returns a matrix equal to `m`.
pub fn dualize<C: Column>(m: &BoundaryMatrix<C>) -> BoundaryMatrix<C> {
    let n = m.num_columns();
    let mut rows: Vec<Vec<usize>> = vec![Vec::new(); n];
    for (j, column) in m.columns.iter().enumerate() {
        for i in column.to_vec() {
            rows[n - 1 - i].push(n - 1 - j);
        }
    }

    let top = m.top_dimension;
    let mut dual = BoundaryMatrix::<C>::new(n);
    for (k, r) in rows.into_iter().enumerate() {
        dual.columns[k].assign(r);
        dual.dimensions[k] = top - m.dimensions[n - 1 - k];
    }
    dual.top_dimension = top;
    dual.dualized = !m.dualized;

    log::debug!(
        "dualized {} columns ({} nonzeros), dualized = {}",
        n,
        dual.num_nonzeros(),
        dual.dualized
    );
    crate::debug_invariants!(
        crate::debug_invariants::DebugInvariants::validate_invariants(&dual),
        "dualize"
    );
    dual
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::column::{SetColumn, VecColumn};
    use crate::topology::complex::FilteredComplex;
    use crate::topology::simplex::Simplex;

    fn triangle_boundary() -> FilteredComplex {
        let mut k = FilteredComplex::from_simplices(
            [&[0][..], &[1], &[2], &[0, 1], &[0, 2], &[1, 2]]
                .iter()
                .map(|v| Simplex::from_vertices(v.iter().copied()).unwrap()),
        )
        .unwrap();
        k.sort();
        k
    }

    #[test]
    fn coboundaries_become_columns() {
        let m = BoundaryMatrix::<VecColumn>::from_complex(&triangle_boundary()).unwrap();
        let d = dualize(&m);
        assert!(d.is_dualized());
        // dual column 5 is vertex {0}; its cofaces {0,1} and {0,2} sit at 3 and 4,
        // i.e. dual rows 2 and 1
        assert_eq!(d.column(5), vec![1, 2]);
        // edges have no cofaces
        assert!(d.is_empty_column(0));
        assert_eq!(d.dimension_of(0), 0);
        assert_eq!(d.dimension_of(5), 1);
    }

    #[test]
    fn dualizing_twice_is_identity() {
        let m = BoundaryMatrix::<SetColumn>::from_complex(&triangle_boundary()).unwrap();
        let back = dualize(&dualize(&m));
        assert_eq!(back, m);
        assert!(!back.is_dualized());
    }

    #[test]
    fn empty_matrix() {
        let m = BoundaryMatrix::<VecColumn>::new(0);
        let d = m.dualize();
        assert_eq!(d.num_columns(), 0);
        assert!(d.is_dualized());
    }
}
