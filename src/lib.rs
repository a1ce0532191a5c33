#![cfg_attr(docsrs, feature(doc_cfg))]
//! # persistence-core
//!
//! persistence-core computes persistent homology of filtered simplicial
//! complexes over GF(2): given simplices in the order in which they appear,
//! it tracks the birth and death of connected components, loops and voids
//! and reports them as persistence diagrams. The same pairing machinery
//! computes persistent intersection homology of stratified complexes.
//!
//! ## Features
//! - Filtered complexes with validated construction, pluggable filtration
//!   orders and face/coface queries
//! - Sparse boundary matrices with pluggable column storage
//! - Standard and twist reduction, optionally on the dualized matrix
//! - Persistence diagrams with norms, Hausdorff, bottleneck and Wasserstein distances
//! - Stratifications, perversities and allowability partitions
//! - Optional `rayon` batch processing of independent complexes
//!
//! ## Usage
//!
//! ```rust
//! use persistence_core::prelude::*;
//!
//! let mut k: FilteredComplex = FilteredComplex::from_simplices(
//!     [&[0][..], &[1], &[2], &[0, 1], &[0, 2], &[1, 2]]
//!         .iter()
//!         .map(|v| Simplex::from_vertices(v.iter().copied()).unwrap()),
//! )
//! .unwrap();
//! k.sort();
//!
//! let diagrams = calculate_persistence_diagrams(&k, &HomologyConfig::default()).unwrap();
//! let betti: Vec<usize> = diagrams.iter().map(|d| d.betti()).collect();
//! assert_eq!(betti, vec![1, 1]);
//! ```
//!
//! ## Determinism
//!
//! Every filtration order breaks ties by dimension and then lexicographically,
//! and both reduction strategies produce identical pairings, so results do
//! not depend on the configuration.
//!
//! ## Logging
//!
//! The crate logs through the `log` facade and installs no logger.

pub mod algs;
pub mod config;
pub mod data;
pub mod debug_invariants;
pub mod diagrams;
pub mod homology_error;
pub mod topology;

pub use debug_invariants::DebugInvariants;
pub use homology_error::HomologyError;

static_assertions::assert_impl_all!(topology::FilteredComplex: Send, Sync);
static_assertions::assert_impl_all!(data::BoundaryMatrix<data::VecColumn>: Send, Sync);
static_assertions::assert_impl_all!(data::BoundaryMatrix<data::SetColumn>: Send, Sync);
static_assertions::assert_impl_all!(diagrams::PersistenceDiagram: Send, Sync);
static_assertions::assert_impl_all!(HomologyError: Send, Sync, std::error::Error);

/// A convenient prelude to import the most-used traits & types:
pub mod prelude {
    pub use crate::algs::calculation::{
        calculate_intersection_homology, calculate_persistence_diagram,
        calculate_persistence_diagrams, calculate_persistence_diagrams_batch,
    };
    pub use crate::algs::euler::{euler_characteristic, euler_characteristic_from_diagrams};
    pub use crate::algs::pairing::{
        PairingOptions, PersistencePair, PersistencePairing, calculate_persistence_pairing,
    };
    pub use crate::algs::reduction::{ReductionAlgorithm, ReductionStats};
    pub use crate::config::HomologyConfig;
    pub use crate::data::boundary_matrix::BoundaryMatrix;
    pub use crate::data::column::{Column, ColumnRepresentation, SetColumn, VecColumn};
    pub use crate::debug_invariants::DebugInvariants;
    pub use crate::diagrams::diagram::{DiagramPoint, PersistenceDiagram};
    pub use crate::diagrams::distances::{
        bottleneck_distance, hausdorff_distance, infinity_distance, wasserstein_distance,
    };
    pub use crate::diagrams::norms::{infinity_norm, p_norm, total_persistence};
    pub use crate::homology_error::HomologyError;
    pub use crate::topology::bounds::{VertexLike, WeightLike};
    pub use crate::topology::complex::FilteredComplex;
    pub use crate::topology::filtration::{
        AbsoluteValueOrder, DataOrder, FiltrationOrder, SignTiebreak, UpperStarOrder,
    };
    pub use crate::topology::simplex::Simplex;
    pub use crate::topology::stratification::{Perversity, Stratification, is_allowable, partition};
}
