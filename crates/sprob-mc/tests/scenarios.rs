use sprob_core::{discrete, interval, or_of, SprobError};
use sprob_mc::{estimate, exact_probability, Estimator, SampleRange, EXACT_ENUMERATION_LIMIT};

#[test]
fn ordered_interval_matches_population_probability() {
    let p = estimate(&interval(0, 500), -1000, 1000, 100_000, 42).unwrap();
    let exact = 501.0 / 2001.0;
    assert!((p - exact).abs() < 0.01, "p = {p}, exact = {exact}");
}

#[test]
fn two_point_union_converges() {
    let state = or_of(discrete(-5), discrete(5));
    let p = estimate(&state, -10, 10, 1_000_000, 7).unwrap();
    assert!((p - 2.0 / 21.0).abs() < 0.003, "p = {p}");
}

#[test]
fn zero_samples_is_invalid_argument() {
    let err = estimate(&interval(0, 1), 0, 10, 0, 1).unwrap_err();
    assert!(matches!(err, SprobError::InvalidArgument(_)));
    assert_eq!(err.info().code, "zero-samples");
}

#[test]
fn inverted_sampling_range_is_invalid_argument() {
    let err = estimate(&interval(0, 1), 10, -10, 100, 1).unwrap_err();
    assert_eq!(err.info().code, "inverted-range");
    assert!(SampleRange::new(10, -10).is_err());
}

#[test]
fn inverted_interval_predicate_never_matches() {
    let p = estimate(&interval(5, -5), -10, 10, 10_000, 1).unwrap();
    assert_eq!(p, 0.0);
}

#[test]
fn report_exposes_counts_and_error() {
    let estimator = Estimator::new(SampleRange::symmetric(1000).unwrap());
    let report = estimator.estimate_report(&interval(0, 500), 40_000, 8).unwrap();
    assert_eq!(report.samples, 40_000);
    assert_eq!(report.probability, report.hits as f64 / 40_000.0);
    let expected_se = (0.25f64 * 0.75 / 40_000.0).sqrt();
    assert!((report.standard_error - expected_se).abs() < 5e-4);
}

#[test]
fn exact_probability_matches_closed_forms() {
    let range = SampleRange::new(-1000, 1000).unwrap();
    assert_eq!(exact_probability(&interval(0, 500), range).unwrap(), 501.0 / 2001.0);
    let small = SampleRange::new(-10, 10).unwrap();
    let union = or_of(discrete(-5), discrete(5));
    assert_eq!(exact_probability(&union, small).unwrap(), 2.0 / 21.0);
}

#[test]
fn exact_probability_refuses_huge_ranges() {
    let range = SampleRange::new(i32::MIN, i32::MAX).unwrap();
    assert!(range.width() > EXACT_ENUMERATION_LIMIT);
    let err = exact_probability(&interval(0, 1), range).unwrap_err();
    assert_eq!(err.info().code, "range-too-wide");
}
