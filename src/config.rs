//! Configuration of persistent homology calculations.

use serde::{Deserialize, Serialize};

use crate::algs::pairing::PairingOptions;
use crate::algs::reduction::ReductionAlgorithm;
use crate::data::column::ColumnRepresentation;

/// Runtime choices for [`calculate_persistence_diagrams`](crate::algs::calculation::calculate_persistence_diagrams)
/// and friends.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HomologyConfig {
    pub algorithm: ReductionAlgorithm,
    pub representation: ColumnRepresentation,
    /// Reduce the anti-transposed matrix. Ignored for intersection homology.
    pub dualize: bool,
    /// Report unpaired creators of the top dimension as essential classes.
    pub include_all_unpaired_creators: bool,
}

impl Default for HomologyConfig {
    fn default() -> Self {
        Self {
            algorithm: ReductionAlgorithm::Twist,
            representation: ColumnRepresentation::Vector,
            dualize: true,
            include_all_unpaired_creators: true,
        }
    }
}

impl HomologyConfig {
    pub fn with_algorithm(mut self, algorithm: ReductionAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    pub fn with_representation(mut self, representation: ColumnRepresentation) -> Self {
        self.representation = representation;
        self
    }

    pub fn with_dualize(mut self, dualize: bool) -> Self {
        self.dualize = dualize;
        self
    }

    pub fn with_all_unpaired_creators(mut self, include: bool) -> Self {
        self.include_all_unpaired_creators = include;
        self
    }

    /// Pairing options for a matrix whose creators are restricted to `limit`.
    pub fn pairing_options(&self, limit: Option<usize>) -> PairingOptions {
        PairingOptions {
            algorithm: self.algorithm,
            include_all_unpaired_creators: self.include_all_unpaired_creators,
            limit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let c = HomologyConfig::default();
        assert_eq!(c.algorithm, ReductionAlgorithm::Twist);
        assert_eq!(c.representation, ColumnRepresentation::Vector);
        assert!(c.dualize);
        assert!(c.include_all_unpaired_creators);
    }

    #[test]
    fn builders() {
        let c = HomologyConfig::default()
            .with_algorithm(ReductionAlgorithm::Standard)
            .with_representation(ColumnRepresentation::Set)
            .with_dualize(false)
            .with_all_unpaired_creators(false);
        let o = c.pairing_options(Some(3));
        assert_eq!(o.algorithm, ReductionAlgorithm::Standard);
        assert!(!o.include_all_unpaired_creators);
        assert_eq!(o.limit, Some(3));
        assert!(!c.dualize);
    }

    #[test]
    fn json_roundtrip() {
        let c = HomologyConfig::default().with_representation(ColumnRepresentation::Set);
        let s = serde_json::to_string(&c).unwrap();
        let back: HomologyConfig = serde_json::from_str(&s).unwrap();
        assert_eq!(back, c);
    }
}
