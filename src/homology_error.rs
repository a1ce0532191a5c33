//! HomologyError: Unified error type for persistence-core public APIs
//!
//! Every fallible operation in the crate reports through this enum. Broken
//! structural invariants are surfaced immediately and never repaired, lookup
//! misses report what was looked for, and degenerate-but-valid inputs (an
//! empty complex, an empty diagram) are not errors at all.

use thiserror::Error;

/// Unified error type for persistence-core operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HomologyError {
    /// A simplex must contain at least one vertex.
    #[error("Simplex must contain at least one vertex")]
    EmptySimplex,
    /// A vertex was listed more than once in the same simplex.
    #[error("Simplex lists vertex `{0}` more than once")]
    DuplicateVertex(String),
    /// The same vertex set was supplied twice to one complex.
    #[error("Complex contains simplex `{0}` more than once")]
    DuplicateSimplex(String),
    /// A simplex was supplied without one of its codimension-1 faces.
    #[error("Complex is not closed under faces: `{simplex}` lacks face `{face}`")]
    MissingFace { simplex: String, face: String },
    /// A face appears after one of its cofaces in the current order.
    #[error("Filtration order violated: face at {face} follows coface at {coface}")]
    FiltrationOrderViolation { face: usize, coface: usize },
    /// Simplices of one dimension are not stored contiguously.
    #[error("Simplices of dimension {0} are not contiguous in the current order")]
    NonContiguousDimension(usize),
    /// A simplex or vertex set was looked up but is not part of the complex.
    #[error("Simplex `{0}` not found")]
    SimplexNotFound(String),
    /// An index lies outside `[0, len)`.
    #[error("Index {index} out of range for length {len}")]
    IndexOutOfRange { index: usize, len: usize },
    /// Stratum `lower` is not contained in stratum `upper`.
    #[error("Stratification is not nested: stratum {lower} is not contained in stratum {upper}")]
    StrataNotNested { lower: usize, upper: usize },
    /// The last stratum must coincide with the ambient complex.
    #[error("Top stratum does not coincide with the ambient complex")]
    TopStratumMismatch,
    /// A stratification needs at least one stratum.
    #[error("Stratification must contain at least one stratum")]
    EmptyStratification,
    /// The perversity does not cover every codimension of the stratification.
    #[error("Perversity defines {found} values but the stratification requires {expected}")]
    PerversityLength { expected: usize, found: usize },
    /// The perversity violates the Goresky–MacPherson growth conditions.
    #[error("Invalid perversity: {0}")]
    InvalidPerversity(String),
    /// A pairing reuses an index or pairs a creator with an earlier destroyer.
    #[error("Invalid persistence pairing: {0}")]
    InvalidPairing(String),
    /// Two diagrams of different homological dimensions were combined.
    #[error("Diagram dimension mismatch: {left} vs {right}")]
    DiagramDimensionMismatch { left: usize, right: usize },
    /// A norm was requested with power zero.
    #[error("Power must be non-zero")]
    InvalidPower,
    /// A value vector does not match the pairing it is combined with.
    #[error("Value vector too short: pairing references index {index} but only {len} values exist")]
    ValueLengthMismatch { index: usize, len: usize },
}

impl HomologyError {
    /// `true` for errors caused by a broken filtration, stratification or
    /// diagram invariant.
    pub fn is_structural(&self) -> bool {
        !matches!(
            self,
            HomologyError::SimplexNotFound(_) | HomologyError::IndexOutOfRange { .. }
        )
    }

    /// `true` for lookup misses.
    pub fn is_not_found(&self) -> bool {
        !self.is_structural()
    }
}
