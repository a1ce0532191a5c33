//! Data module: column storage and boundary matrices.

pub mod boundary_matrix;
pub mod column;

pub use boundary_matrix::BoundaryMatrix;
pub use column::{Column, ColumnRepresentation, SetColumn, VecColumn};
