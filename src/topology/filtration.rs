//! Filtration orders for sorting a [`FilteredComplex`](crate::topology::complex::FilteredComplex).
//!
//! Every order compares by some function of the weight first and falls back
//! to dimension, then to the lexicographic vertex order. The dimension
//! fallback keeps faces ahead of cofaces when weights tie; the lexicographic
//! fallback makes the order total and deterministic.
//!
//! Any closure `Fn(&Simplex, &Simplex) -> Ordering` is also accepted.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::topology::bounds::{VertexLike, WeightLike};
use crate::topology::simplex::Simplex;

/// Strict total order used to sort a complex into a filtration.
pub trait FiltrationOrder<V, W> {
    fn compare(&self, a: &Simplex<V, W>, b: &Simplex<V, W>) -> Ordering;
}

impl<V, W, F> FiltrationOrder<V, W> for F
where
    F: Fn(&Simplex<V, W>, &Simplex<V, W>) -> Ordering,
{
    fn compare(&self, a: &Simplex<V, W>, b: &Simplex<V, W>) -> Ordering {
        self(a, b)
    }
}

/// Dimension first, then lexicographic vertex order.
#[inline]
pub fn tiebreak<V: VertexLike, W: WeightLike>(a: &Simplex<V, W>, b: &Simplex<V, W>) -> Ordering {
    a.dimension()
        .cmp(&b.dimension())
        .then_with(|| a.cmp(b))
}

/// Incomparable weights (NaN) are treated as equal and left to the tiebreak.
#[inline]
fn weight_cmp<W: WeightLike>(a: W, b: W) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

/// Ascending weight (sublevel set / lower-star filtration). The default.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DataOrder;

impl<V: VertexLike, W: WeightLike> FiltrationOrder<V, W> for DataOrder {
    fn compare(&self, a: &Simplex<V, W>, b: &Simplex<V, W>) -> Ordering {
        weight_cmp(a.weight(), b.weight()).then_with(|| tiebreak(a, b))
    }
}

/// Descending weight (superlevel set / upper-star filtration).
///
/// Equal weights still order faces before cofaces.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct UpperStarOrder;

impl<V: VertexLike, W: WeightLike> FiltrationOrder<V, W> for UpperStarOrder {
    fn compare(&self, a: &Simplex<V, W>, b: &Simplex<V, W>) -> Ordering {
        weight_cmp(b.weight(), a.weight()).then_with(|| tiebreak(a, b))
    }
}

/// Which sign wins when two weights share an absolute value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SignTiebreak {
    #[default]
    NegativeFirst,
    PositiveFirst,
}

/// Ascending absolute weight.
///
/// Ties on `|w|` are broken by dimension first, then by sign as configured,
/// then lexicographically.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AbsoluteValueOrder {
    pub sign: SignTiebreak,
}

impl AbsoluteValueOrder {
    pub fn new(sign: SignTiebreak) -> Self {
        Self { sign }
    }
}

impl<V: VertexLike, W: WeightLike> FiltrationOrder<V, W> for AbsoluteValueOrder {
    fn compare(&self, a: &Simplex<V, W>, b: &Simplex<V, W>) -> Ordering {
        let (wa, wb) = (a.weight(), b.weight());
        weight_cmp(wa.abs(), wb.abs())
            .then_with(|| a.dimension().cmp(&b.dimension()))
            .then_with(|| {
                let by_sign = weight_cmp(wa, wb);
                match self.sign {
                    SignTiebreak::NegativeFirst => by_sign,
                    SignTiebreak::PositiveFirst => by_sign.reverse(),
                }
            })
            .then_with(|| a.cmp(b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(v: &[u32], w: f64) -> Simplex {
        Simplex::new(v.iter().copied(), w).unwrap()
    }

    #[test]
    fn data_order_puts_faces_first_on_ties() {
        let edge = s(&[0, 1], 1.0);
        let vertex = s(&[1], 1.0);
        assert_eq!(DataOrder.compare(&vertex, &edge), Ordering::Less);
        assert_eq!(DataOrder.compare(&s(&[0], 0.0), &vertex), Ordering::Less);
    }

    #[test]
    fn data_order_lexicographic_on_full_tie() {
        assert_eq!(
            DataOrder.compare(&s(&[0, 2], 1.0), &s(&[0, 1], 1.0)),
            Ordering::Greater
        );
    }

    #[test]
    fn upper_star_descends() {
        assert_eq!(
            UpperStarOrder.compare(&s(&[0], 2.0), &s(&[1], 1.0)),
            Ordering::Less
        );
        assert_eq!(
            UpperStarOrder.compare(&s(&[0], 1.0), &s(&[0, 1], 1.0)),
            Ordering::Less
        );
    }

    #[test]
    fn absolute_value_sign_tiebreak() {
        let neg = s(&[0], -1.0);
        let pos = s(&[1], 1.0);
        let order = AbsoluteValueOrder::default();
        assert_eq!(order.compare(&neg, &pos), Ordering::Less);
        let order = AbsoluteValueOrder::new(SignTiebreak::PositiveFirst);
        assert_eq!(order.compare(&neg, &pos), Ordering::Greater);
        // dimension beats sign
        let coface = s(&[0, 1], -1.0);
        assert_eq!(order.compare(&pos, &coface), Ordering::Less);
    }

    #[test]
    fn closures_are_orders() {
        let by_lex = |a: &Simplex, b: &Simplex| a.cmp(b);
        assert_eq!(by_lex.compare(&s(&[0], 5.0), &s(&[1], 0.0)), Ordering::Less);
    }
}
