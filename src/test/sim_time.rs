use crate::sim::SimTime;

#[test]
fn sim_time_unit_conversions() {
    assert_eq!(SimTime::from_millis(1), SimTime(1_000_000));
    assert_eq!(SimTime::from_secs(1), SimTime(1_000_000_000));
    assert_eq!(SimTime::from_secs_f64(1.5), SimTime(1_500_000_000));
    assert_eq!(SimTime(2_500_000_000).as_secs_f64(), 2.5);
}

#[test]
fn from_secs_f64_quantizes_to_nanoseconds() {
    // 0.1 + 0.2 != 0.3 in f64, but both land on the same nanosecond.
    assert_ne!(0.1 + 0.2, 0.3);
    assert_eq!(SimTime::from_secs_f64(0.1 + 0.2), SimTime::from_secs_f64(0.3));
    assert_eq!(SimTime::from_secs_f64(1e-10), SimTime::ZERO);
}

#[test]
fn from_secs_f64_clamps_negative_nan_and_overflow() {
    assert_eq!(SimTime::from_secs_f64(-3.0), SimTime::ZERO);
    assert_eq!(SimTime::from_secs_f64(f64::NAN), SimTime::ZERO);
    assert_eq!(SimTime::from_secs_f64(f64::INFINITY), SimTime::MAX);
    assert_eq!(SimTime::from_secs_f64(1e300), SimTime::MAX);
}

#[test]
fn sim_time_add_saturates_and_displays_seconds() {
    assert_eq!(SimTime::MAX.saturating_add(SimTime(1)), SimTime::MAX);
    assert_eq!(SimTime::from_secs(2).to_string(), "2.000000000s");
}
