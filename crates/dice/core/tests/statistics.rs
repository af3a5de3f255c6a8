use dice_core::{BigUint, DiceError, Die};
use num_traits::ToPrimitive;

#[test]
fn closed_form_bounds_hold_for_small_pools() {
    for count in 1..=6 {
        for faces in 1..=12 {
            let die = Die::new(count, faces).unwrap();
            let (min, max) = (u64::from(count), u64::from(count * faces));

            assert_eq!(die.stats_min(), min);
            assert_eq!(die.stats_max(), max);
            assert_eq!(die.stats_range(), max - min);
            assert_eq!(die.stats_midpoint(), (min + max) / 2);
            assert_eq!(die.stats_mean(), (min + max) as f64 / 2.0);

            let dist = die.distribution().unwrap();
            assert_eq!(dist.min_total(), min);
            assert_eq!(dist.max_total(), max);
            assert_eq!(dist.outcomes(), &BigUint::from(faces).pow(count));
            assert_eq!(&dist.iter().map(|(_, f)| f).sum::<BigUint>(), dist.outcomes());
        }
    }
}

#[test]
fn mean_matches_the_weighted_distribution() {
    let die = Die::new(4, 6).unwrap();
    let dist = die.distribution().unwrap();
    let weighted: BigUint = dist.iter().map(|(total, f)| f * total).sum();
    let mean = weighted.to_f64().unwrap() / dist.outcomes().to_f64().unwrap();
    assert!((mean - die.stats_mean()).abs() < 1e-9);
}

#[test]
fn symmetric_distributions_have_median_at_the_mean() {
    for (count, faces) in [(1, 6), (2, 6), (3, 6), (2, 20), (5, 4)] {
        let die = Die::new(count, faces).unwrap();
        assert_eq!(die.stats_median().unwrap(), die.stats_mean(), "{die}");
    }
}

#[test]
fn two_d6_median_and_mode_are_seven() {
    let die = Die::new(2, 6).unwrap();
    assert_eq!(die.stats_median().unwrap(), 7.0);
    assert_eq!(die.stats_mode().unwrap(), 7);
}

#[test]
fn one_sided_pools_collapse_every_statistic() {
    let die = Die::new(7, 1).unwrap();
    for _ in 0..20 {
        assert_eq!(die.roll(), 7);
    }
    assert_eq!(die.stats_min(), 7);
    assert_eq!(die.stats_max(), 7);
    assert_eq!(die.stats_range(), 0);
    assert_eq!(die.stats_midpoint(), 7);
    assert_eq!(die.stats_mean(), 7.0);
    assert_eq!(die.stats_median().unwrap(), 7.0);
    assert_eq!(die.stats_mode().unwrap(), 7);
}

#[test]
fn cached_statistics_are_stable_between_reads() {
    let die = Die::new(3, 8).unwrap();
    let first = die.stats().unwrap();
    let _ = die.roll();
    let second = die.stats().unwrap();
    assert_eq!(first, second);
    assert!(std::ptr::eq(
        die.distribution().unwrap(),
        die.distribution().unwrap()
    ));
}

#[test]
fn clones_keep_their_own_cache() {
    let mut die = Die::new(2, 6).unwrap();
    let snapshot = die.clone();
    die.set_count(3).unwrap();
    assert_eq!(snapshot.stats_mode().unwrap(), 7);
    assert_eq!(die.stats_mode().unwrap(), 10);
}

#[test]
fn large_pools_have_exact_median_and_mode() {
    let die = Die::new(50, 6).unwrap();
    assert_eq!(die.stats_median().unwrap(), 175.0);
    assert_eq!(die.stats_mode().unwrap(), 175);

    let die = Die::new(100, 20).unwrap();
    assert_eq!(die.stats_median().unwrap(), 1050.0);
    assert_eq!(die.stats_mode().unwrap(), 1050);
    assert_eq!(die.stats().unwrap().notation, "100d20");
}

#[test]
fn oversized_pools_report_overflow_but_keep_closed_forms() {
    let die = Die::single(u32::MAX).unwrap();
    assert_eq!(die.stats_max(), u64::from(u32::MAX));
    assert_eq!(die.stats_mean(), (1 + u64::from(u32::MAX)) as f64 / 2.0);
    assert_eq!(
        die.stats_median().unwrap_err(),
        DiceError::DistributionOverflow {
            count: 1,
            faces: u32::MAX
        }
    );
    assert!(die.stats_mode().is_err());
}

#[test]
fn distribution_is_shared_across_threads() {
    let die = Die::new(3, 6).unwrap();
    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| die.stats_mode().unwrap()))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), 10);
        }
    });
}
