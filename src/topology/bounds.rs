//! Common bound aliases used across topology code.
//!
//! These traits have blanket impls, so any type satisfying the underlying
//! bounds will automatically implement them. They only reduce duplication in
//! `where` clauses.

/// Canonical bound set for vertex identifiers.
///
/// - `Copy` for cheap pass-by-value in tight loops
/// - `Eq + Hash` for the vertex-set index of a complex
/// - `Ord` so vertex sets can be kept sorted and compared lexicographically
/// - `Debug` for diagnostics and error messages
pub trait VertexLike: Copy + Eq + std::hash::Hash + Ord + std::fmt::Debug {}
impl<T> VertexLike for T where T: Copy + Eq + std::hash::Hash + Ord + std::fmt::Debug {}

/// Bound set for filtration values.
///
/// Weights must provide an infinity (essential classes die at `+∞`) and
/// arithmetic for persistence, norms and distances.
pub trait WeightLike: num_traits::Float + std::fmt::Debug {}
impl<T> WeightLike for T where T: num_traits::Float + std::fmt::Debug {}
