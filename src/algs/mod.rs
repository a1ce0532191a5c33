//! Algorithms on boundary matrices: reduction, dualization, pairing and
//! the end-to-end calculation drivers.

pub mod calculation;
pub mod dualization;
pub mod euler;
pub mod pairing;
pub mod reduction;

pub use calculation::{
    calculate_intersection_homology, calculate_persistence_diagram,
    calculate_persistence_diagrams, calculate_persistence_diagrams_batch,
};
pub use dualization::dualize;
pub use euler::{euler_characteristic, euler_characteristic_from_diagrams};
pub use pairing::{
    PairingOptions, PersistencePair, PersistencePairing, calculate_persistence_pairing,
    calculate_persistence_pairing_with_stats,
};
pub use reduction::{ReductionAlgorithm, ReductionStats, reduce};
