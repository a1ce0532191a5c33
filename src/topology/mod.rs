//! Top-level module for simplicial topology.
//!
//! This module provides the types describing a filtered space:
//! - [`Simplex`](simplex::Simplex), a weighted vertex set
//! - [`FilteredComplex`](complex::FilteredComplex), an ordered face-closed collection of simplices
//! - filtration orders for sorting a complex
//! - stratifications, perversities and the allowability partition for intersection homology

pub mod bounds;
pub mod complex;
pub mod filtration;
pub mod simplex;
pub mod stratification;

pub use complex::FilteredComplex;
pub use filtration::{AbsoluteValueOrder, DataOrder, FiltrationOrder, SignTiebreak, UpperStarOrder};
pub use simplex::Simplex;
pub use stratification::{Allowability, Partition, Perversity, Stratification, partition};
