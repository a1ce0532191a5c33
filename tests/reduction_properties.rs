mod util;
use persistence_core::algs::pairing::calculate_persistence_pairing_with_stats;
use persistence_core::prelude::*;
use proptest::prelude::*;
use std::collections::HashSet;
use util::*;

fn options(algorithm: ReductionAlgorithm) -> PairingOptions {
    PairingOptions {
        algorithm,
        ..PairingOptions::default()
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn standard_and_twist_agree(
        seed in any::<u64>(),
        n in 1u32..9,
        edge_prob in 0.2f64..0.9,
        triangle_prob in 0.0f64..1.0,
    ) {
        let k = random_complex(seed, n, edge_prob, triangle_prob);
        let standard = HomologyConfig::default()
            .with_algorithm(ReductionAlgorithm::Standard)
            .with_dualize(false);
        let twist = HomologyConfig::default()
            .with_algorithm(ReductionAlgorithm::Twist)
            .with_representation(ColumnRepresentation::Set);
        let a = calculate_persistence_diagrams(&k, &standard).unwrap();
        let b = calculate_persistence_diagrams(&k, &twist).unwrap();
        prop_assert_eq!(points(&a), points(&b));
    }

    #[test]
    fn reduction_is_deterministic(seed in any::<u64>(), n in 1u32..9) {
        let k = random_complex(seed, n, 0.6, 0.5);
        let m = BoundaryMatrix::<VecColumn>::from_complex(&k).unwrap();
        for algorithm in [ReductionAlgorithm::Standard, ReductionAlgorithm::Twist] {
            let first = calculate_persistence_pairing(&m, &options(algorithm));
            let second = calculate_persistence_pairing(&m, &options(algorithm));
            prop_assert_eq!(first, second);
        }
    }

    #[test]
    fn dualizing_twice_is_identity(seed in any::<u64>(), n in 1u32..9) {
        let k = random_complex(seed, n, 0.5, 0.5);
        let m = BoundaryMatrix::<SetColumn>::from_complex(&k).unwrap();
        let dual = m.dualize();
        prop_assert!(dual.is_dualized());
        prop_assert_eq!(dual.dualize(), m);
    }

    #[test]
    fn pairings_are_valid(seed in any::<u64>(), n in 1u32..9, dualize in any::<bool>()) {
        let k = random_complex(seed, n, 0.5, 0.7);
        let m = BoundaryMatrix::<VecColumn>::from_complex(&k).unwrap();
        let m = if dualize { m.dualize() } else { m };
        for algorithm in [ReductionAlgorithm::Standard, ReductionAlgorithm::Twist] {
            let pairing = calculate_persistence_pairing(&m, &options(algorithm));
            let mut destroyers = HashSet::new();
            for pair in &pairing {
                if let Some(d) = pair.destroyer {
                    prop_assert!(pair.creator < d);
                    prop_assert!(destroyers.insert(d));
                }
            }
            prop_assert!(pairing.validate_invariants().is_ok());
            // every simplex is a creator or a destroyer, exactly once
            prop_assert_eq!(pairing.len() + destroyers.len(), k.len());
        }
    }

    #[test]
    fn twist_never_adds_more_columns(seed in any::<u64>(), n in 1u32..9) {
        let k = random_complex(seed, n, 0.7, 0.8);
        let m = BoundaryMatrix::<VecColumn>::from_complex(&k).unwrap();
        let (p1, standard) = calculate_persistence_pairing_with_stats(&m, &options(ReductionAlgorithm::Standard));
        let (p2, twist) = calculate_persistence_pairing_with_stats(&m, &options(ReductionAlgorithm::Twist));
        prop_assert_eq!(p1, p2);
        prop_assert_eq!(standard.pairs, twist.pairs);
        prop_assert!(twist.additions <= standard.additions);
    }
}
