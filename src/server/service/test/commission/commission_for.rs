use super::*;

/// Tests the default rates on a round amount.
///
/// Expected: 3, 2 and 1 for levels 1 to 3
#[test]
fn applies_default_rates() {
    let schedule = CommissionSchedule::default();

    assert_eq!(schedule.commission_for(100, 1), 3);
    assert_eq!(schedule.commission_for(100, 2), 2);
    assert_eq!(schedule.commission_for(100, 3), 1);
    assert_eq!(schedule.commission_for(1000, 1), 30);
}

/// Tests that fractional commissions round down.
///
/// 3% of 40 is 1.2 and 2% of 40 is 0.8.
///
/// Expected: 1 and 0
#[test]
fn floors_fractional_amounts() {
    let schedule = CommissionSchedule::default();

    assert_eq!(schedule.commission_for(40, 1), 1);
    assert_eq!(schedule.commission_for(40, 2), 0);
    assert_eq!(schedule.commission_for(40, 3), 0);
    assert_eq!(schedule.commission_for(99, 1), 2);
    assert_eq!(schedule.commission_for(0, 1), 0);
}

/// Tests levels outside the schedule.
///
/// Expected: 0
#[test]
fn pays_nothing_outside_schedule() {
    let schedule = CommissionSchedule::default();

    assert_eq!(schedule.depth(), 3);
    assert_eq!(schedule.commission_for(1000, 0), 0);
    assert_eq!(schedule.commission_for(1000, 4), 0);
}

/// Tests that very large amounts do not overflow.
///
/// Expected: exact floor of 3% of i64::MAX
#[test]
fn handles_large_amounts() {
    let schedule = CommissionSchedule::default();

    let expected = (i128::from(i64::MAX) * 300 / 10_000) as i64;
    assert_eq!(schedule.commission_for(i64::MAX, 1), expected);
}
