//! Pluggable storage for boundary-matrix columns.
//!
//! A column holds the row indices of its nonzero entries over GF(2), so a
//! column is a set of indices and column addition is symmetric difference.
//! The reduction engine is generic over [`Column`]; the storage choice
//! changes performance, never results.
//!
//! - [`VecColumn`]: sorted `Vec`. Maximum index is O(1), addition is a
//!   linear merge. The default.
//! - [`SetColumn`]: `BTreeSet`. Addition toggles the other column's indices
//!   one by one, which wins when a long column absorbs short ones.

use std::collections::BTreeSet;
use std::fmt::Debug;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// Column storage over GF(2).
pub trait Column: Clone + Debug + Default + PartialEq + Send + Sync {
    /// Replace the contents with `indices`. Indices occurring an even
    /// number of times cancel.
    fn assign<I: IntoIterator<Item = usize>>(&mut self, indices: I);

    /// Largest row index present, `None` for an empty column.
    fn max_index(&self) -> Option<usize>;

    /// Number of nonzero entries.
    fn len(&self) -> usize;

    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// `self ← self + other` over GF(2).
    fn add_assign(&mut self, other: &Self);

    /// Row indices in ascending order.
    fn to_vec(&self) -> Vec<usize>;

    fn clear(&mut self);
}

/// Reduces `indices` to the ascending set of indices with odd multiplicity.
fn odd_indices<I: IntoIterator<Item = usize>>(indices: I) -> impl Iterator<Item = usize> {
    indices
        .into_iter()
        .sorted_unstable()
        .dedup_with_count()
        .filter_map(|(count, i)| (count % 2 == 1).then_some(i))
}

/// Sorted-vector column (default).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VecColumn(Vec<usize>);

impl Column for VecColumn {
    fn assign<I: IntoIterator<Item = usize>>(&mut self, indices: I) {
        self.0.clear();
        self.0.extend(odd_indices(indices));
    }

    #[inline]
    fn max_index(&self) -> Option<usize> {
        self.0.last().copied()
    }

    #[inline]
    fn len(&self) -> usize {
        self.0.len()
    }

    fn add_assign(&mut self, other: &Self) {
        let mut out = Vec::with_capacity(self.0.len() + other.0.len());
        let (mut a, mut b) = (self.0.iter().peekable(), other.0.iter().peekable());
        loop {
            match (a.peek(), b.peek()) {
                (Some(&&x), Some(&&y)) if x < y => {
                    out.push(x);
                    a.next();
                }
                (Some(&&x), Some(&&y)) if x > y => {
                    out.push(y);
                    b.next();
                }
                (Some(_), Some(_)) => {
                    a.next();
                    b.next();
                }
                (Some(&&x), None) => {
                    out.push(x);
                    a.next();
                }
                (None, Some(&&y)) => {
                    out.push(y);
                    b.next();
                }
                (None, None) => break,
            }
        }
        self.0 = out;
    }

    fn to_vec(&self) -> Vec<usize> {
        self.0.clone()
    }

    fn clear(&mut self) {
        self.0.clear();
    }
}

/// Ordered-set column.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SetColumn(BTreeSet<usize>);

impl Column for SetColumn {
    fn assign<I: IntoIterator<Item = usize>>(&mut self, indices: I) {
        self.0 = odd_indices(indices).collect();
    }

    #[inline]
    fn max_index(&self) -> Option<usize> {
        self.0.last().copied()
    }

    #[inline]
    fn len(&self) -> usize {
        self.0.len()
    }

    fn add_assign(&mut self, other: &Self) {
        for &i in &other.0 {
            if !self.0.remove(&i) {
                self.0.insert(i);
            }
        }
    }

    fn to_vec(&self) -> Vec<usize> {
        self.0.iter().copied().collect()
    }

    fn clear(&mut self) {
        self.0.clear();
    }
}

/// Runtime selector for the column storage.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnRepresentation {
    #[default]
    Vector,
    Set,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check_addition<C: Column>() {
        let mut a = C::default();
        a.assign([4, 1, 7]);
        let mut b = C::default();
        b.assign([7, 2, 1]);
        a.add_assign(&b);
        assert_eq!(a.to_vec(), vec![2, 4]);
        assert_eq!(a.max_index(), Some(4));
        a.add_assign(&a.clone());
        assert!(a.is_empty());
        assert_eq!(a.max_index(), None);
    }

    #[test]
    fn vec_column_addition() {
        check_addition::<VecColumn>();
    }

    #[test]
    fn set_column_addition() {
        check_addition::<SetColumn>();
    }

    #[test]
    fn assign_cancels_even_multiplicity() {
        let mut v = VecColumn::default();
        v.assign([3, 1, 3, 3, 2, 2]);
        assert_eq!(v.to_vec(), vec![1, 3]);
        let mut s = SetColumn::default();
        s.assign([3, 1, 3, 3, 2, 2]);
        assert_eq!(s.to_vec(), vec![1, 3]);
    }

    #[test]
    fn clear_empties() {
        let mut v = VecColumn::default();
        v.assign([0, 5]);
        assert_eq!(v.len(), 2);
        v.clear();
        assert!(v.is_empty());
    }
}
