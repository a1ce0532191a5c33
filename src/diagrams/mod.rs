//! Persistence diagrams, their norms and distances.

pub mod diagram;
pub mod distances;
pub mod norms;

pub use diagram::{DiagramPoint, PersistenceDiagram, make_persistence_diagram, make_persistence_diagrams};
pub use distances::{bottleneck_distance, hausdorff_distance, infinity_distance, wasserstein_distance};
pub use norms::{infinity_norm, p_norm, total_persistence};
