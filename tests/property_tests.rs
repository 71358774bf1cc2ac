use collatz_visualizer::*;
use num_bigint::BigUint;
use proptest::prelude::*;

proptest! {
    #[test]
    fn sequence_ends_at_one_and_follows_recurrence(n in 1u64..1_000_000) {
        let seq = collatz_sequence(&BigUint::from(n)).unwrap();
        prop_assert_eq!(seq.first(), Some(&BigUint::from(n)));
        prop_assert_eq!(seq.last(), Some(&BigUint::from(1u32)));
        for w in seq.windows(2) {
            prop_assert_eq!(&w[1], &collatz_next(&w[0]));
        }
    }

    #[test]
    fn tree_is_path_over_sequence(n in 1u64..100_000) {
        let start = BigUint::from(n);
        let seq = collatz_sequence(&start).unwrap();
        let tree = collatz_tree(&start).unwrap();
        prop_assert_eq!(tree.node_count(), seq.len());
        prop_assert_eq!(tree.edge_count(), seq.len() - 1);
        let edges: Vec<(BigUint, BigUint)> =
            tree.edges().map(|(a, b)| (a.clone(), b.clone())).collect();
        let expected: Vec<(BigUint, BigUint)> =
            seq.windows(2).map(|w| (w[0].clone(), w[1].clone())).collect();
        prop_assert_eq!(edges, expected);
    }

    #[test]
    fn layout_levels_follow_sequence(n in 1u64..100_000) {
        let start = BigUint::from(n);
        let seq = collatz_sequence(&start).unwrap();
        let tree = collatz_tree(&start).unwrap();
        let layout = hierarchical_layout(&tree, &start).unwrap();
        prop_assert_eq!(layout.len(), seq.len());
        for (level, v) in seq.iter().enumerate() {
            prop_assert_eq!(layout.get(v), Some(LayoutPos { column: 0, level }));
        }
    }

    #[test]
    fn summary_counts_are_consistent(n in 1u64..1_000_000) {
        let seq = collatz_sequence(&BigUint::from(n)).unwrap();
        let s = SequenceSummary::from_sequence(&seq).unwrap();
        prop_assert_eq!(s.total_steps, s.odd_steps + s.even_steps);
        prop_assert_eq!(&seq[s.peak_step], &s.peak);
        prop_assert!(seq.iter().all(|v| v <= &s.peak));
    }

    #[test]
    fn parse_start_accepts_positive_decimal(n in 1u64..u64::MAX) {
        prop_assert_eq!(parse_start(&n.to_string()).unwrap(), BigUint::from(n));
    }
}
