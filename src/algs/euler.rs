//! Euler characteristic of a complex and of its persistence diagrams.

use crate::diagrams::diagram::PersistenceDiagram;
use crate::topology::bounds::{VertexLike, WeightLike};
use crate::topology::complex::FilteredComplex;

#[inline]
fn sign(dimension: usize) -> i64 {
    if dimension % 2 == 0 { 1 } else { -1 }
}

/// `Σ (-1)^dim σ` over all simplices.
pub fn euler_characteristic<V: VertexLike, W: WeightLike>(complex: &FilteredComplex<V, W>) -> i64 {
    complex.iter().map(|s| sign(s.dimension())).sum()
}

/// `Σ (-1)^d β_d`, with Betti numbers counted as essential points.
///
/// Agrees with [`euler_characteristic`] when the diagrams keep every
/// unpaired creator.
pub fn euler_characteristic_from_diagrams<W: WeightLike>(diagrams: &[PersistenceDiagram<W>]) -> i64 {
    diagrams
        .iter()
        .map(|d| sign(d.dimension()) * d.betti() as i64)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::simplex::Simplex;

    #[test]
    fn circle_has_zero_characteristic() {
        let k: FilteredComplex = FilteredComplex::from_simplices(
            [&[0][..], &[1], &[2], &[0, 1], &[0, 2], &[1, 2]]
                .iter()
                .map(|v| Simplex::from_vertices(v.iter().copied()).unwrap()),
        )
        .unwrap();
        assert_eq!(euler_characteristic(&k), 0);
    }

    #[test]
    fn from_betti_numbers() {
        let mut d0 = PersistenceDiagram::<f64>::new(0);
        d0.add_essential(0.0);
        d0.add(0.0, 1.0);
        let mut d1 = PersistenceDiagram::new(1);
        d1.add_essential(1.0);
        d1.add_essential(2.0);
        assert_eq!(euler_characteristic_from_diagrams(&[d0, d1]), -1);
        assert_eq!(euler_characteristic_from_diagrams::<f64>(&[]), 0);
    }
}
