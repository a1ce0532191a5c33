#![allow(dead_code)]
use persistence_core::prelude::*;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Complex from vertex lists, all weights zero, sorted into filtration order.
pub fn complex(simplices: &[&[u32]]) -> FilteredComplex {
    let mut k: FilteredComplex = FilteredComplex::from_simplices(
        simplices
            .iter()
            .map(|v| Simplex::from_vertices(v.iter().copied()).unwrap()),
    )
    .unwrap();
    k.sort();
    k
}

/// Boundary of a triangle: a circle.
pub fn triangle_boundary() -> FilteredComplex {
    complex(&[&[0], &[1], &[2], &[0, 1], &[0, 2], &[1, 2]])
}

pub fn filled_triangle() -> FilteredComplex {
    complex(&[&[0], &[1], &[2], &[0, 1], &[0, 2], &[1, 2], &[0, 1, 2]])
}

/// Circle with an extra edge from vertex 0 to a new vertex 3.
pub fn circle_with_whisker() -> FilteredComplex {
    complex(&[&[0], &[1], &[2], &[3], &[0, 1], &[0, 2], &[0, 3], &[1, 2]])
}

/// Random complex on `n` vertices with up to 2-simplices. Vertex weights are
/// small integers so that ties occur; higher simplices take the maximum of
/// their faces.
pub fn random_complex(seed: u64, n: u32, edge_prob: f64, triangle_prob: f64) -> FilteredComplex {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut simplices: Vec<Simplex> = (0..n).map(|v| Simplex::vertex(v, 0.0)).collect();
    let mut edges = std::collections::HashSet::new();
    for u in 0..n {
        for v in (u + 1)..n {
            if rng.gen_bool(edge_prob) {
                edges.insert((u, v));
                simplices.push(Simplex::from_vertices([u, v]).unwrap());
            }
        }
    }
    for u in 0..n {
        for v in (u + 1)..n {
            for w in (v + 1)..n {
                let closed = edges.contains(&(u, v)) && edges.contains(&(u, w)) && edges.contains(&(v, w));
                if closed && rng.gen_bool(triangle_prob) {
                    simplices.push(Simplex::from_vertices([u, v, w]).unwrap());
                }
            }
        }
    }
    let values: Vec<f64> = (0..n).map(|_| rng.gen_range(0..5) as f64).collect();
    let mut k = FilteredComplex::from_simplices(simplices).unwrap();
    k.recalculate_weights_from_vertices(|v| values[v as usize]);
    k.sort();
    k
}

pub fn betti(diagrams: &[PersistenceDiagram]) -> Vec<usize> {
    diagrams.iter().map(PersistenceDiagram::betti).collect()
}

/// Multiset of (dimension, birth, death) triples, sorted.
pub fn points(diagrams: &[PersistenceDiagram]) -> Vec<(usize, f64, f64)> {
    let mut out: Vec<_> = diagrams
        .iter()
        .flat_map(|d| d.iter().map(move |p| (d.dimension(), p.birth, p.death)))
        .collect();
    out.sort_by(|a, b| a.partial_cmp(b).unwrap());
    out
}
