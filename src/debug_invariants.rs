use crate::homology_error::HomologyError;

/// Structural checks of the core types.
///
/// - [`FilteredComplex`](crate::topology::FilteredComplex): faces precede
///   cofaces and the vertex-set index points at the right positions.
/// - [`BoundaryMatrix`](crate::data::BoundaryMatrix): row indices are in
///   range and every column is sorted without repeats.
/// - [`PersistencePairing`](crate::algs::PersistencePairing): each creator
///   precedes its destroyer and no destroyer occurs twice.
pub trait DebugInvariants {
    /// Panics on a violation in debug builds or with `strict-invariants`.
    fn debug_assert_invariants(&self);
    /// First violation found, as a [`HomologyError`].
    fn validate_invariants(&self) -> Result<(), HomologyError>;
}

/// Runs a `Result`-returning invariant check after a construction step and
/// panics with `context` on failure. Compiled out of release builds unless
/// `strict-invariants` or `check-invariants` is enabled.
#[macro_export]
macro_rules! debug_invariants {
    ($expr:expr, $($ctx:tt)*) => {
        #[cfg(any(debug_assertions, feature = "strict-invariants", feature = "check-invariants"))]
        if let Err(e) = $expr {
            panic!(concat!("[invariants] ", $($ctx)*, ": {}"), e);
        }
    };
}
