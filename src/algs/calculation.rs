//! End-to-end calculation of persistence diagrams.
//!
//! complex → boundary matrix → (dualization) → reduction → pairing → diagrams.
//! The column representation and reduction strategy are taken from a
//! [`HomologyConfig`] at runtime.

use crate::algs::pairing::{PersistencePairing, calculate_persistence_pairing};
use crate::config::HomologyConfig;
use crate::data::boundary_matrix::BoundaryMatrix;
use crate::data::column::{Column, ColumnRepresentation, SetColumn, VecColumn};
use crate::diagrams::diagram::{PersistenceDiagram, make_persistence_diagram, make_persistence_diagrams};
use crate::homology_error::HomologyError;
use crate::topology::bounds::{VertexLike, WeightLike};
use crate::topology::complex::FilteredComplex;
use crate::topology::stratification::{Allowability, Perversity, Stratification, partition};

fn pairing_with<C, V, W>(
    complex: &FilteredComplex<V, W>,
    config: &HomologyConfig,
    limit: Option<usize>,
    dualize: bool,
) -> Result<PersistencePairing, HomologyError>
where
    C: Column,
    V: VertexLike,
    W: WeightLike,
{
    let m = BoundaryMatrix::<C>::from_complex(complex)?;
    let m = if dualize { m.dualize() } else { m };
    Ok(calculate_persistence_pairing(&m, &config.pairing_options(limit)))
}

/// Pairing of `complex` under `config`, dispatched on the column representation.
fn pairing_of<V, W>(
    complex: &FilteredComplex<V, W>,
    config: &HomologyConfig,
    limit: Option<usize>,
    dualize: bool,
) -> Result<PersistencePairing, HomologyError>
where
    V: VertexLike,
    W: WeightLike,
{
    match config.representation {
        ColumnRepresentation::Vector => pairing_with::<VecColumn, _, _>(complex, config, limit, dualize),
        ColumnRepresentation::Set => pairing_with::<SetColumn, _, _>(complex, config, limit, dualize),
    }
}

/// Persistent homology of a complex in filtration order.
///
/// Returns one diagram per dimension that has creators, sorted by dimension.
/// Diagonal points are kept.
///
/// # Errors
/// [`HomologyError::FiltrationOrderViolation`] if a face follows one of its
/// cofaces.
pub fn calculate_persistence_diagrams<V, W>(
    complex: &FilteredComplex<V, W>,
    config: &HomologyConfig,
) -> Result<Vec<PersistenceDiagram<W>>, HomologyError>
where
    V: VertexLike,
    W: WeightLike,
{
    complex.validate_filtration()?;
    let pairing = pairing_of(complex, config, None, config.dualize)?;
    make_persistence_diagrams(&pairing, complex)
}

/// Persistent intersection homology of `complex` for a stratification and
/// perversity.
///
/// Allowable simplices are moved to the front, the boundary matrix of the
/// reordered complex is reduced on the allowable columns only, and only
/// allowable simplices may create classes. Dualization is never applied.
/// Diagonal points are removed and diagrams left empty are dropped.
///
/// # Errors
/// [`HomologyError::FiltrationOrderViolation`] for an unsorted complex,
/// [`HomologyError::PerversityLength`] if the perversity is too short for
/// the stratification.
pub fn calculate_intersection_homology<V, W>(
    complex: &FilteredComplex<V, W>,
    stratification: &Stratification<V, W>,
    perversity: &Perversity,
    config: &HomologyConfig,
) -> Result<Vec<PersistenceDiagram<W>>, HomologyError>
where
    V: VertexLike,
    W: WeightLike,
{
    complex.validate_filtration()?;
    let allowability = Allowability::new(stratification, perversity)?;
    let part = partition(complex, |s| allowability.is_allowable(s));
    let pairing = pairing_of(&part.complex, config, Some(part.split), false)?;

    let mut diagrams = make_persistence_diagrams(&pairing, &part.complex)?;
    for d in &mut diagrams {
        let removed = d.remove_diagonal();
        log::trace!("dimension {}: removed {removed} diagonal points", d.dimension());
    }
    diagrams.retain(|d| !d.is_empty());
    Ok(diagrams)
}

/// Diagram of a 1D function from a boundary matrix and one value per column.
///
/// # Errors
/// [`HomologyError::ValueLengthMismatch`] if `values` is shorter than the matrix.
pub fn calculate_persistence_diagram<C, W>(
    m: &BoundaryMatrix<C>,
    values: &[W],
    config: &HomologyConfig,
) -> Result<PersistenceDiagram<W>, HomologyError>
where
    C: Column,
    W: WeightLike,
{
    let pairing = calculate_persistence_pairing(m, &config.pairing_options(None));
    make_persistence_diagram(&pairing, values)
}

/// [`calculate_persistence_diagrams`] over independent complexes; in
/// parallel with the `rayon` feature.
#[cfg(feature = "rayon")]
pub fn calculate_persistence_diagrams_batch<V, W>(
    complexes: &[FilteredComplex<V, W>],
    config: &HomologyConfig,
) -> Vec<Result<Vec<PersistenceDiagram<W>>, HomologyError>>
where
    V: VertexLike + Send + Sync,
    W: WeightLike + Send + Sync,
{
    use rayon::prelude::*;
    complexes
        .par_iter()
        .map(|k| calculate_persistence_diagrams(k, config))
        .collect()
}

/// [`calculate_persistence_diagrams`] over independent complexes; in
/// parallel with the `rayon` feature.
#[cfg(not(feature = "rayon"))]
pub fn calculate_persistence_diagrams_batch<V, W>(
    complexes: &[FilteredComplex<V, W>],
    config: &HomologyConfig,
) -> Vec<Result<Vec<PersistenceDiagram<W>>, HomologyError>>
where
    V: VertexLike + Send + Sync,
    W: WeightLike + Send + Sync,
{
    complexes
        .iter()
        .map(|k| calculate_persistence_diagrams(k, config))
        .collect()
}
