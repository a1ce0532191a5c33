//! Distances between persistence diagrams under the L∞ point distance.

use std::cmp::Ordering;

use crate::diagrams::diagram::{DiagramPoint, PersistenceDiagram};
use crate::homology_error::HomologyError;
use crate::topology::bounds::WeightLike;

#[inline]
fn cmp_weight<W: WeightLike>(a: &W, b: &W) -> Ordering {
    a.partial_cmp(b).unwrap_or(Ordering::Equal)
}

/// `|a - b|`, with equal infinities at distance zero.
#[inline]
fn coordinate_distance<W: WeightLike>(a: W, b: W) -> W {
    if a == b { W::zero() } else { (a - b).abs() }
}

/// `max(|Δbirth|, |Δdeath|)`. Two essential points differ only in birth.
pub fn infinity_distance<W: WeightLike>(p: &DiagramPoint<W>, q: &DiagramPoint<W>) -> W {
    coordinate_distance(p.birth, q.birth).max(coordinate_distance(p.death, q.death))
}

/// Hausdorff distance between the point sets of two diagrams.
///
/// Zero if both diagrams are empty, `+∞` if exactly one is.
pub fn hausdorff_distance<W: WeightLike>(d1: &PersistenceDiagram<W>, d2: &PersistenceDiagram<W>) -> W {
    match (d1.is_empty(), d2.is_empty()) {
        (true, true) => return W::zero(),
        (true, false) | (false, true) => return W::infinity(),
        _ => {}
    }
    let directed = |a: &PersistenceDiagram<W>, b: &PersistenceDiagram<W>| {
        a.iter()
            .map(|p| {
                b.iter()
                    .map(|q| infinity_distance(p, q))
                    .fold(W::infinity(), W::min)
            })
            .fold(W::zero(), W::max)
    };
    directed(d1, d2).max(directed(d2, d1))
}

/// Bottleneck distance between two diagrams.
///
/// Finite points are matched to each other or to the diagonal through a
/// perfect matching on the diagonal-augmented bipartite graph; the smallest
/// edge weight admitting such a matching is found by binary search.
/// Essential points are matched among themselves by sorted birth; the
/// distance is `+∞` if their counts differ.
pub fn bottleneck_distance<W: WeightLike>(d1: &PersistenceDiagram<W>, d2: &PersistenceDiagram<W>) -> W {
    let (e1, f1): (Vec<_>, Vec<_>) = d1.iter().copied().partition(DiagramPoint::is_essential);
    let (e2, f2): (Vec<_>, Vec<_>) = d2.iter().copied().partition(DiagramPoint::is_essential);

    if e1.len() != e2.len() {
        return W::infinity();
    }
    let mut b1: Vec<W> = e1.iter().map(|p| p.birth).collect();
    let mut b2: Vec<W> = e2.iter().map(|p| p.birth).collect();
    b1.sort_by(cmp_weight);
    b2.sort_by(cmp_weight);
    let essential = b1
        .iter()
        .zip(&b2)
        .map(|(&a, &b)| coordinate_distance(a, b))
        .fold(W::zero(), W::max);

    essential.max(finite_bottleneck(&f1, &f2))
}

fn finite_bottleneck<W: WeightLike>(a: &[DiagramPoint<W>], b: &[DiagramPoint<W>]) -> W {
    let (n, m) = (a.len(), b.len());
    if n + m == 0 {
        return W::zero();
    }
    let two = W::one() + W::one();
    let half = |p: &DiagramPoint<W>| p.persistence().abs() / two;

    // Left: points of `a`, then diagonal projections of `b`.
    // Right: points of `b`, then diagonal projections of `a`.
    let size = n + m;
    let mut edges: Vec<Vec<(usize, W)>> = vec![Vec::new(); size];
    for (i, p) in a.iter().enumerate() {
        for (j, q) in b.iter().enumerate() {
            edges[i].push((j, infinity_distance(p, q)));
        }
        edges[i].push((m + i, half(p)));
    }
    for (j, q) in b.iter().enumerate() {
        edges[n + j].push((j, half(q)));
        for i in 0..n {
            edges[n + j].push((m + i, W::zero()));
        }
    }

    let mut candidates: Vec<W> = edges.iter().flatten().map(|&(_, w)| w).collect();
    candidates.sort_by(cmp_weight);
    candidates.dedup();

    // the largest candidate admits every edge, hence a perfect matching
    let (mut lo, mut hi) = (0, candidates.len() - 1);
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        if has_perfect_matching(&edges, size, candidates[mid]) {
            hi = mid;
        } else {
            lo = mid + 1;
        }
    }
    log::trace!(
        "bottleneck over {n} + {m} points: {} candidate weights",
        candidates.len()
    );
    candidates[lo]
}

/// Kuhn's augmenting path algorithm on edges of weight at most `threshold`.
fn has_perfect_matching<W: WeightLike>(edges: &[Vec<(usize, W)>], size: usize, threshold: W) -> bool {
    fn augment<W: WeightLike>(
        u: usize,
        edges: &[Vec<(usize, W)>],
        threshold: W,
        visited: &mut [bool],
        mate: &mut [Option<usize>],
    ) -> bool {
        for &(v, w) in &edges[u] {
            if w > threshold || visited[v] {
                continue;
            }
            visited[v] = true;
            let free = match mate[v] {
                None => true,
                Some(other) => augment(other, edges, threshold, visited, mate),
            };
            if free {
                mate[v] = Some(u);
                return true;
            }
        }
        false
    }

    let mut mate = vec![None; size];
    let mut visited = vec![false; size];
    for u in 0..size {
        visited.iter_mut().for_each(|v| *v = false);
        if !augment(u, edges, threshold, &mut visited, &mut mate) {
            return false;
        }
    }
    true
}

/// `p`-Wasserstein distance between two diagrams of the same dimension.
///
/// Finite points are matched to each other or to the diagonal by a minimum
/// cost assignment, a match costing the L∞ distance raised to `p`.
/// Essential points are matched among themselves by sorted birth; the
/// distance is `+∞` if their counts differ.
///
/// # Errors
/// [`HomologyError::DiagramDimensionMismatch`] for diagrams of different
/// dimensions, [`HomologyError::InvalidPower`] unless `p > 0`.
pub fn wasserstein_distance<W: WeightLike>(
    d1: &PersistenceDiagram<W>,
    d2: &PersistenceDiagram<W>,
    p: f64,
) -> Result<f64, HomologyError> {
    if d1.dimension() != d2.dimension() {
        return Err(HomologyError::DiagramDimensionMismatch {
            left: d1.dimension(),
            right: d2.dimension(),
        });
    }
    if p.is_nan() || p <= 0.0 {
        return Err(HomologyError::InvalidPower);
    }
    let (e1, f1): (Vec<_>, Vec<_>) = d1.iter().copied().partition(DiagramPoint::is_essential);
    let (e2, f2): (Vec<_>, Vec<_>) = d2.iter().copied().partition(DiagramPoint::is_essential);
    if e1.len() != e2.len() {
        return Ok(f64::INFINITY);
    }
    let mut b1: Vec<W> = e1.iter().map(|q| q.birth).collect();
    let mut b2: Vec<W> = e2.iter().map(|q| q.birth).collect();
    b1.sort_by(cmp_weight);
    b2.sort_by(cmp_weight);

    let cost = |w: W| w.to_f64().unwrap_or(f64::NAN).powf(p);
    let essential: f64 = b1
        .iter()
        .zip(&b2)
        .map(|(&a, &b)| cost(coordinate_distance(a, b)))
        .sum();

    let (n, m) = (f1.len(), f2.len());
    let two = W::one() + W::one();
    let half = |q: &DiagramPoint<W>| cost(q.persistence().abs() / two);

    // Rows: points of `d1`, then diagonal slots for `d2`.
    // Columns: points of `d2`, then diagonal slots for `d1`.
    // Diagonal slots are interchangeable, so every slot of a block costs the same.
    let size = n + m;
    let mut costs = vec![vec![0.0; size]; size];
    for (i, a) in f1.iter().enumerate() {
        for (j, b) in f2.iter().enumerate() {
            costs[i][j] = cost(infinity_distance(a, b));
        }
        let to_diagonal = half(a);
        for slot in m..size {
            costs[i][slot] = to_diagonal;
        }
    }
    for (j, b) in f2.iter().enumerate() {
        let to_diagonal = half(b);
        for row in costs.iter_mut().skip(n) {
            row[j] = to_diagonal;
        }
    }

    let finite = assignment_cost(&costs);
    log::trace!("wasserstein over {n} + {m} points: assignment cost {finite}");
    Ok((essential + finite).powf(p.recip()))
}

/// Minimum total cost of a perfect assignment on a square matrix
/// (Hungarian method with row and column potentials).
fn assignment_cost(costs: &[Vec<f64>]) -> f64 {
    let n = costs.len();
    // 1-based; column 0 is a sentinel holding the row being inserted
    let mut u = vec![0.0; n + 1];
    let mut v = vec![0.0; n + 1];
    let mut owner = vec![0usize; n + 1];
    let mut way = vec![0usize; n + 1];

    for row in 1..=n {
        owner[0] = row;
        let mut j0 = 0;
        let mut min_slack = vec![f64::INFINITY; n + 1];
        let mut used = vec![false; n + 1];
        loop {
            used[j0] = true;
            let i0 = owner[j0];
            let mut delta = f64::INFINITY;
            let mut j1 = 0;
            for j in 1..=n {
                if used[j] {
                    continue;
                }
                let slack = costs[i0 - 1][j - 1] - u[i0] - v[j];
                if slack < min_slack[j] {
                    min_slack[j] = slack;
                    way[j] = j0;
                }
                if min_slack[j] < delta {
                    delta = min_slack[j];
                    j1 = j;
                }
            }
            for j in 0..=n {
                if used[j] {
                    u[owner[j]] += delta;
                    v[j] -= delta;
                } else {
                    min_slack[j] -= delta;
                }
            }
            j0 = j1;
            if owner[j0] == 0 {
                break;
            }
        }
        while j0 != 0 {
            let j1 = way[j0];
            owner[j0] = owner[j1];
            j0 = j1;
        }
    }

    (1..=n).map(|j| costs[owner[j] - 1][j - 1]).sum()
}
