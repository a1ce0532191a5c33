//! Norms of persistence diagrams.
//!
//! Essential points carry infinite persistence and are left out of every
//! norm. In the weighted variants each distinct point counts once, scaled by
//! the fraction of points it accounts for.

use itertools::Itertools;

use crate::diagrams::diagram::{DiagramPoint, PersistenceDiagram};
use crate::homology_error::HomologyError;
use crate::topology::bounds::WeightLike;

fn finite_points<W: WeightLike>(d: &PersistenceDiagram<W>) -> impl Iterator<Item = &DiagramPoint<W>> {
    d.iter().filter(|p| !p.is_essential())
}

#[inline]
fn persistence_f64<W: WeightLike>(p: &DiagramPoint<W>) -> f64 {
    p.persistence().to_f64().unwrap_or(f64::NAN)
}

/// `Σ |death - birth|^p` over finite points.
pub fn total_persistence<W: WeightLike>(d: &PersistenceDiagram<W>, p: f64, weighted: bool) -> f64 {
    if !weighted {
        return finite_points(d)
            .map(|q| persistence_f64(q).abs().powf(p))
            .sum();
    }
    let points: Vec<_> = finite_points(d)
        .copied()
        .sorted_by(|a, b| {
            a.birth
                .partial_cmp(&b.birth)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.death.partial_cmp(&b.death).unwrap_or(std::cmp::Ordering::Equal))
        })
        .collect();
    let total = points.len() as f64;
    points
        .iter()
        .dedup_with_count()
        .map(|(count, q)| count as f64 / total * persistence_f64(q).abs().powf(p))
        .sum()
}

/// `(Σ |death - birth|^p)^(1/p)` over finite points.
///
/// # Errors
/// [`HomologyError::InvalidPower`] for `p == 0`.
pub fn p_norm<W: WeightLike>(d: &PersistenceDiagram<W>, p: f64, weighted: bool) -> Result<f64, HomologyError> {
    if p == 0.0 {
        return Err(HomologyError::InvalidPower);
    }
    Ok(total_persistence(d, p, weighted).powf(p.recip()))
}

/// Largest persistence among finite points, zero if there are none.
pub fn infinity_norm<W: WeightLike>(d: &PersistenceDiagram<W>) -> W {
    finite_points(d)
        .map(|q| q.persistence().abs())
        .fold(W::zero(), W::max)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diagram() -> PersistenceDiagram {
        PersistenceDiagram::from_points(
            0,
            [
                DiagramPoint::new(0.0, 3.0),
                DiagramPoint::new(1.0, 5.0),
                DiagramPoint::essential(0.0),
            ],
        )
    }

    #[test]
    fn unweighted_norms() {
        let d = diagram();
        assert_eq!(total_persistence(&d, 2.0, false), 25.0);
        assert_eq!(p_norm(&d, 2.0, false).unwrap(), 5.0);
        assert_eq!(total_persistence(&d, 1.0, false), 7.0);
        assert_eq!(infinity_norm(&d), 4.0);
    }

    #[test]
    fn weighted_counts_multiplicity() {
        let d = PersistenceDiagram::from_points(
            0,
            [
                DiagramPoint::new(0.0, 2.0),
                DiagramPoint::new(0.0, 2.0),
                DiagramPoint::new(1.0, 2.0),
                DiagramPoint::new(0.0, 4.0),
            ],
        );
        // (2/4)·2 + (1/4)·4 + (1/4)·1
        assert_eq!(total_persistence(&d, 1.0, true), 2.25);
    }

    #[test]
    fn zero_power_is_rejected() {
        assert_eq!(p_norm(&diagram(), 0.0, false), Err(HomologyError::InvalidPower));
    }

    #[test]
    fn empty_diagram() {
        let d = PersistenceDiagram::<f64>::new(1);
        assert_eq!(total_persistence(&d, 2.0, true), 0.0);
        assert_eq!(infinity_norm(&d), 0.0);
    }
}
