//! `Simplex`: an immutable vertex set annotated with a filtration value.
//!
//! A simplex is identified by its vertex set alone. The weight (filtration
//! value) is an annotation: equality, hashing and the lexicographic order
//! ignore it, so a complex can be queried with a simplex whose weight is
//! unknown and hand back the stored one.
//!
//! Vertices are kept sorted and unique. The dimension of a simplex is the
//! number of its vertices minus one.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use itertools::Itertools;
use serde::{Deserialize, Deserializer, Serialize};

use crate::homology_error::HomologyError;
use crate::topology::bounds::{VertexLike, WeightLike};

/// A weighted simplex over vertex type `V` with filtration values of type `W`.
///
/// Deserialization goes through [`Simplex::new`], so empty or repeating
/// vertex lists are rejected and the vertices come back sorted.
#[derive(Clone, Debug, Serialize)]
pub struct Simplex<V = u32, W = f64> {
    vertices: Vec<V>,
    weight: W,
}

impl<V: VertexLike, W: WeightLike> Simplex<V, W> {
    /// Creates a simplex from an arbitrary vertex sequence.
    ///
    /// # Errors
    /// [`HomologyError::EmptySimplex`] for an empty sequence and
    /// [`HomologyError::DuplicateVertex`] if a vertex occurs twice.
    pub fn new<I>(vertices: I, weight: W) -> Result<Self, HomologyError>
    where
        I: IntoIterator<Item = V>,
    {
        let mut vertices: Vec<V> = vertices.into_iter().collect();
        if vertices.is_empty() {
            return Err(HomologyError::EmptySimplex);
        }
        vertices.sort_unstable();
        if let Some((a, _)) = vertices.iter().tuple_windows().find(|(a, b)| a == b) {
            return Err(HomologyError::DuplicateVertex(format!("{a:?}")));
        }
        Ok(Self { vertices, weight })
    }

    /// Creates a simplex with weight zero.
    pub fn from_vertices<I>(vertices: I) -> Result<Self, HomologyError>
    where
        I: IntoIterator<Item = V>,
    {
        Self::new(vertices, W::zero())
    }

    /// Creates a 0-simplex.
    pub fn vertex(v: V, weight: W) -> Self {
        Self {
            vertices: vec![v],
            weight,
        }
    }

    /// Builds a simplex from vertices that are already sorted and unique.
    pub(crate) fn from_sorted_unchecked(vertices: Vec<V>, weight: W) -> Self {
        debug_assert!(!vertices.is_empty());
        debug_assert!(vertices.windows(2).all(|w| w[0] < w[1]));
        Self { vertices, weight }
    }

    /// Dimension, i.e. number of vertices minus one.
    #[inline]
    pub fn dimension(&self) -> usize {
        self.vertices.len() - 1
    }

    /// Number of vertices.
    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Always `false`; simplices cannot be constructed without vertices.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Sorted vertex slice.
    #[inline]
    pub fn vertices(&self) -> &[V] {
        &self.vertices
    }

    /// Filtration value.
    #[inline]
    pub fn weight(&self) -> W {
        self.weight
    }

    pub fn set_weight(&mut self, weight: W) {
        self.weight = weight;
    }

    /// Returns a copy carrying `weight`.
    pub fn with_weight(&self, weight: W) -> Self {
        Self {
            vertices: self.vertices.clone(),
            weight,
        }
    }

    /// `true` if `v` is one of the vertices.
    pub fn contains(&self, v: V) -> bool {
        self.vertices.binary_search(&v).is_ok()
    }

    /// `true` if every vertex of `self` is a vertex of `other` and `self` is
    /// strictly smaller.
    pub fn is_face_of(&self, other: &Self) -> bool {
        self.len() < other.len() && is_sorted_subset(&self.vertices, &other.vertices)
    }

    /// Codimension-1 faces, each carrying this simplex's weight.
    ///
    /// A 0-simplex has no faces. Faces are produced by dropping one vertex at
    /// a time, starting with the first.
    pub fn boundary(&self) -> impl Iterator<Item = Simplex<V, W>> + '_ {
        let n = if self.vertices.len() > 1 {
            self.vertices.len()
        } else {
            0
        };
        (0..n).map(move |skip| {
            let vertices = self
                .vertices
                .iter()
                .enumerate()
                .filter_map(|(i, &v)| (i != skip).then_some(v))
                .collect();
            Simplex::from_sorted_unchecked(vertices, self.weight)
        })
    }
}

impl<'de, V, W> Deserialize<'de> for Simplex<V, W>
where
    V: VertexLike + Deserialize<'de>,
    W: WeightLike + Deserialize<'de>,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Raw<V, W> {
            vertices: Vec<V>,
            weight: W,
        }
        let raw = Raw::<V, W>::deserialize(deserializer)?;
        Simplex::new(raw.vertices, raw.weight).map_err(serde::de::Error::custom)
    }
}

/// Both slices must be sorted ascending.
pub(crate) fn is_sorted_subset<V: Ord>(small: &[V], large: &[V]) -> bool {
    let mut it = large.iter();
    'outer: for v in small {
        for w in it.by_ref() {
            match w.cmp(v) {
                Ordering::Less => continue,
                Ordering::Equal => continue 'outer,
                Ordering::Greater => return false,
            }
        }
        return false;
    }
    true
}

impl<V: VertexLike, W> PartialEq for Simplex<V, W> {
    fn eq(&self, other: &Self) -> bool {
        self.vertices == other.vertices
    }
}

impl<V: VertexLike, W> Eq for Simplex<V, W> {}

impl<V: VertexLike, W> Hash for Simplex<V, W> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.vertices.hash(state);
    }
}

/// Lexicographic order on the sorted vertex sequences.
impl<V: VertexLike, W> PartialOrd for Simplex<V, W> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<V: VertexLike, W> Ord for Simplex<V, W> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.vertices.cmp(&other.vertices)
    }
}

/// Prints `{v0, v1, ...} (weight)`.
impl<V: VertexLike, W: WeightLike> fmt::Display for Simplex<V, W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{{}}} ({:?})",
            self.vertices.iter().map(|v| format!("{v:?}")).join(", "),
            self.weight
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(v: &[u32]) -> Simplex {
        Simplex::from_vertices(v.iter().copied()).unwrap()
    }

    #[test]
    fn vertices_are_sorted() {
        let t = Simplex::<u32, f64>::new([2, 0, 1], 1.5).unwrap();
        assert_eq!(t.vertices(), &[0, 1, 2]);
        assert_eq!(t.dimension(), 2);
        assert_eq!(t.weight(), 1.5);
    }

    #[test]
    fn empty_and_duplicate_vertices_rejected() {
        assert_eq!(
            Simplex::<u32, f64>::from_vertices([]).unwrap_err(),
            HomologyError::EmptySimplex
        );
        assert!(matches!(
            Simplex::<u32, f64>::from_vertices([1, 2, 1]),
            Err(HomologyError::DuplicateVertex(_))
        ));
    }

    #[test]
    fn equality_ignores_weight() {
        let a = Simplex::<u32, f64>::new([0, 1], 1.0).unwrap();
        let b = Simplex::<u32, f64>::new([1, 0], 7.0).unwrap();
        assert_eq!(a, b);
        use std::collections::HashSet;
        let set: HashSet<_> = [a, b].into_iter().collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn boundary_of_triangle() {
        let t = Simplex::<u32, f64>::new([0, 1, 2], 3.0).unwrap();
        let faces: Vec<_> = t.boundary().collect();
        assert_eq!(faces, vec![s(&[1, 2]), s(&[0, 2]), s(&[0, 1])]);
        assert!(faces.iter().all(|f| f.weight() == 3.0));
    }

    #[test]
    fn vertex_has_no_boundary() {
        assert_eq!(Simplex::<u32, f64>::vertex(4, 0.0).boundary().count(), 0);
    }

    #[test]
    fn face_relation() {
        assert!(s(&[0, 2]).is_face_of(&s(&[0, 1, 2])));
        assert!(!s(&[0, 3]).is_face_of(&s(&[0, 1, 2])));
        assert!(!s(&[0, 1, 2]).is_face_of(&s(&[0, 1, 2])));
        assert!(s(&[1]).is_face_of(&s(&[0, 1])));
    }

    #[test]
    fn lexicographic_order() {
        assert!(s(&[0]) < s(&[0, 1]));
        assert!(s(&[0, 1]) < s(&[0, 2]));
        assert!(s(&[0, 2]) < s(&[1]));
    }

    #[test]
    fn display() {
        let t = Simplex::<u32, f64>::new([1, 0], 0.5).unwrap();
        assert_eq!(format!("{t}"), "{0, 1} (0.5)");
    }

    #[test]
    fn json_roundtrip() {
        let t = Simplex::<u32, f64>::new([3, 1], 2.0).unwrap();
        let js = serde_json::to_string(&t).unwrap();
        let back: Simplex<u32, f64> = serde_json::from_str(&js).unwrap();
        assert_eq!(back, t);
        assert_eq!(back.weight(), 2.0);
    }

    #[test]
    fn deserialization_validates_vertices() {
        assert!(serde_json::from_str::<Simplex>(r#"{"vertices":[],"weight":0.0}"#).is_err());
        assert!(serde_json::from_str::<Simplex>(r#"{"vertices":[1,1],"weight":0.0}"#).is_err());
        let s: Simplex = serde_json::from_str(r#"{"vertices":[2,0,1],"weight":0.5}"#).unwrap();
        assert_eq!(s.vertices(), &[0, 1, 2]);
        assert_eq!(s, Simplex::<u32, f64>::from_vertices([0, 1, 2]).unwrap());
        assert_eq!(s.dimension(), 2);
    }
}
