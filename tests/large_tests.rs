use collatz_visualizer::*;
use num_bigint::BigUint;
use num_traits::One;

/// 2^k は k ステップで単調に 1 へ下る
#[test]
fn test_power_of_two_1000() {
    let n = BigUint::one() << 1000u32;
    let seq = collatz_sequence(&n).unwrap();
    assert_eq!(seq.len(), 1001);
    let s = SequenceSummary::from_sequence(&seq).unwrap();
    assert_eq!(s.peak, n);
    assert_eq!(s.odd_steps, 0);
}

/// 2^100 - 1 (約30桁): u64 に収まらない中間値を扱う
#[test]
fn test_2pow100_minus1() {
    let n = (BigUint::one() << 100u32) - BigUint::one();
    let seq = collatz_sequence(&n).unwrap();
    assert_eq!(seq.last(), Some(&BigUint::one()));
    assert!(seq.iter().max().unwrap() > &n);

    let tree = collatz_tree(&n).unwrap();
    assert_eq!(tree.node_count(), seq.len());
    let layout = hierarchical_layout(&tree, &n).unwrap();
    assert_eq!(layout.depth(), seq.len());
}

/// 既知の長い軌道: 63728127 は 949 ステップ
#[test]
fn test_63728127() {
    let seq = collatz_sequence(&BigUint::from(63_728_127u64)).unwrap();
    assert_eq!(seq.len(), 950);
}

#[test]
fn test_bounded_large() {
    let n = BigUint::from(63_728_127u64);
    assert!(collatz_sequence_bounded(&n, 949).is_ok());
    assert!(matches!(
        collatz_sequence_bounded(&n, 948),
        Err(CollatzError::StepLimitExceeded { max_steps: 948, .. })
    ));
}

/// 1〜10^5 の並列走査: 最長は 77031 (350 ステップ)
#[test]
fn test_scan_1_to_100000() {
    let result = scan_range_parallel(1, 100_000, &Config::default(), |_, _| {}).unwrap();
    assert_eq!(result.total_checked, 100_000);
    assert!(result.all_reached_one);
    assert_eq!(result.longest, Some((77_031, 350)));
}
