//! Stratifications, perversities and the allowability partition used by
//! persistent intersection homology.
//!
//! A stratification `X_0 ⊆ X_1 ⊆ … ⊆ X_n = K` is given by its strata as
//! complexes. For a simplex `σ` of `K` and every codimension `k` in `1..=n`
//! the King condition reads
//!
//! ```text
//! dim(σ ∩ X_{n-k}) ≤ dim(σ) - k + p(k)
//! ```
//!
//! where `σ ∩ X_{n-k}` is the largest face of `σ` stored in the stratum. An
//! empty intersection satisfies the condition. A simplex is allowable if the
//! condition holds for every codimension the perversity defines.
//!
//! [`partition`] reorders a complex so that allowable simplices (in their
//! filtration order) come first and returns the split index.

use serde::{Deserialize, Deserializer, Serialize};

use crate::homology_error::HomologyError;
use crate::topology::bounds::{VertexLike, WeightLike};
use crate::topology::complex::FilteredComplex;
use crate::topology::simplex::Simplex;

/// Integer function of codimension controlling allowability.
///
/// Deserialization goes through [`Perversity::new`] or
/// [`Perversity::goresky_macpherson`], depending on `first_codimension`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Perversity {
    values: Vec<i64>,
    first_codimension: usize,
}

impl<'de> Deserialize<'de> for Perversity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Raw {
            values: Vec<i64>,
            first_codimension: usize,
        }
        let raw = Raw::deserialize(deserializer)?;
        match raw.first_codimension {
            1 => Ok(Perversity::new(raw.values)),
            2 => Perversity::goresky_macpherson(raw.values).map_err(serde::de::Error::custom),
            other => Err(serde::de::Error::custom(format!(
                "perversities start at codimension 1 or 2, found {other}"
            ))),
        }
    }
}

impl Perversity {
    /// General perversity; `values[0]` is `p(1)`.
    pub fn new<I>(values: I) -> Self
    where
        I: IntoIterator<Item = i64>,
    {
        Self {
            values: values.into_iter().collect(),
            first_codimension: 1,
        }
    }

    /// Goresky–MacPherson perversity; `values[0]` is `p(2)`.
    ///
    /// Codimension 1 is vacuous. The values must satisfy `p(2) = 0` and
    /// `p(k) ≤ p(k+1) ≤ p(k) + 1`.
    pub fn goresky_macpherson<I>(values: I) -> Result<Self, HomologyError>
    where
        I: IntoIterator<Item = i64>,
    {
        let values: Vec<i64> = values.into_iter().collect();
        if let Some(&first) = values.first() {
            if first != 0 {
                return Err(HomologyError::InvalidPerversity(format!(
                    "p(2) must be 0, found {first}"
                )));
            }
        }
        if let Some(w) = values.windows(2).find(|w| w[1] < w[0] || w[1] > w[0] + 1) {
            return Err(HomologyError::InvalidPerversity(format!(
                "consecutive values {} and {} violate p(k) <= p(k+1) <= p(k) + 1",
                w[0], w[1]
            )));
        }
        Ok(Self {
            values,
            first_codimension: 2,
        })
    }

    /// `p(k)`, or `None` if codimension `k` is vacuous or undefined.
    pub fn value(&self, codimension: usize) -> Option<i64> {
        codimension
            .checked_sub(self.first_codimension)
            .and_then(|i| self.values.get(i).copied())
    }

    /// Smallest codimension this perversity constrains.
    pub fn first_codimension(&self) -> usize {
        self.first_codimension
    }

    pub fn values(&self) -> &[i64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of values needed to cover codimensions `1..=depth`.
    pub fn required_len(&self, depth: usize) -> usize {
        (depth + 1).saturating_sub(self.first_codimension)
    }
}

/// Nested strata `X_0 ⊆ … ⊆ X_n`, the last coinciding with the ambient complex.
#[derive(Clone, Debug)]
pub struct Stratification<V = u32, W = f64> {
    strata: Vec<FilteredComplex<V, W>>,
}

impl<V: VertexLike, W: WeightLike> Stratification<V, W> {
    /// Validates and wraps `strata` for the ambient complex `ambient`.
    ///
    /// # Errors
    /// - [`HomologyError::EmptyStratification`] without strata.
    /// - [`HomologyError::StrataNotNested`] if `X_i ⊄ X_{i+1}`.
    /// - [`HomologyError::TopStratumMismatch`] if `X_n ≠ K` as simplex sets.
    pub fn new(
        strata: Vec<FilteredComplex<V, W>>,
        ambient: &FilteredComplex<V, W>,
    ) -> Result<Self, HomologyError> {
        let Some(top) = strata.last() else {
            return Err(HomologyError::EmptyStratification);
        };
        for (lower, pair) in strata.windows(2).enumerate() {
            if !pair[0].iter().all(|s| pair[1].contains(s)) {
                return Err(HomologyError::StrataNotNested {
                    lower,
                    upper: lower + 1,
                });
            }
        }
        if top.len() != ambient.len() || !ambient.iter().all(|s| top.contains(s)) {
            return Err(HomologyError::TopStratumMismatch);
        }
        Ok(Self { strata })
    }

    /// `n`, the index of the top stratum.
    pub fn depth(&self) -> usize {
        self.strata.len() - 1
    }

    pub fn stratum(&self, i: usize) -> Option<&FilteredComplex<V, W>> {
        self.strata.get(i)
    }

    pub fn strata(&self) -> &[FilteredComplex<V, W>] {
        &self.strata
    }

    /// Checks that `perversity` defines every codimension it must.
    pub fn check_perversity(&self, perversity: &Perversity) -> Result<(), HomologyError> {
        let expected = perversity.required_len(self.depth());
        let found = perversity.len();
        if found < expected {
            return Err(HomologyError::PerversityLength { expected, found });
        }
        if found > expected {
            log::warn!("perversity defines {found} values, only {expected} are used");
        }
        Ok(())
    }
}

/// Allowability predicate for one stratification and perversity.
#[derive(Clone, Copy, Debug)]
pub struct Allowability<'a, V = u32, W = f64> {
    stratification: &'a Stratification<V, W>,
    perversity: &'a Perversity,
}

impl<'a, V: VertexLike, W: WeightLike> Allowability<'a, V, W> {
    /// # Errors
    /// [`HomologyError::PerversityLength`] if the perversity is too short.
    pub fn new(
        stratification: &'a Stratification<V, W>,
        perversity: &'a Perversity,
    ) -> Result<Self, HomologyError> {
        stratification.check_perversity(perversity)?;
        Ok(Self {
            stratification,
            perversity,
        })
    }

    /// King condition for every constrained codimension.
    pub fn is_allowable(&self, simplex: &Simplex<V, W>) -> bool {
        let n = self.stratification.depth();
        let dim = simplex.dimension() as i64;
        (1..=n).all(|k| {
            let Some(p) = self.perversity.value(k) else {
                return true;
            };
            match self.stratification.strata[n - k].intersection_dimension(simplex) {
                Some(d) => d as i64 <= dim - k as i64 + p,
                None => true,
            }
        })
    }
}

/// Convenience wrapper around [`Allowability::is_allowable`].
pub fn is_allowable<V: VertexLike, W: WeightLike>(
    simplex: &Simplex<V, W>,
    stratification: &Stratification<V, W>,
    perversity: &Perversity,
) -> Result<bool, HomologyError> {
    Ok(Allowability::new(stratification, perversity)?.is_allowable(simplex))
}

/// A complex reordered so that positions `< split` hold the simplices
/// satisfying the partition predicate.
#[derive(Clone, Debug)]
pub struct Partition<V = u32, W = f64> {
    pub complex: FilteredComplex<V, W>,
    pub split: usize,
}

impl<V: VertexLike, W: WeightLike> Partition<V, W> {
    /// `true` if position `i` lies in the allowable part.
    #[inline]
    pub fn is_allowable_index(&self, i: usize) -> bool {
        i < self.split
    }
}

/// Moves the simplices satisfying `predicate` to the front, keeping the
/// relative filtration order within both parts.
///
/// The reordered complex is generally not a filtration: a non-allowable face
/// now follows its allowable cofaces. Reductions restricted to the first
/// `split` columns rely on exactly that placement.
pub fn partition<V, W, F>(complex: &FilteredComplex<V, W>, mut predicate: F) -> Partition<V, W>
where
    V: VertexLike,
    W: WeightLike,
    F: FnMut(&Simplex<V, W>) -> bool,
{
    let (allowable, rest): (Vec<_>, Vec<_>) = complex.iter().cloned().partition(|s| predicate(s));
    let split = allowable.len();
    log::debug!(
        "partitioned {} simplices: {} allowable, {} not",
        complex.len(),
        split,
        rest.len()
    );
    let mut simplices = allowable;
    simplices.extend(rest);
    Partition {
        complex: FilteredComplex::from_ordered_unchecked(simplices),
        split,
    }
}
