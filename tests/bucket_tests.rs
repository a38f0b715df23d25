use rstest::rstest;
use trendforge::config::ThresholdProfile;
use trendforge::signals::{classify, classify_side, format_pct, normalize_pct, Bucket};

#[rstest]
#[case(30.0, Bucket::Red)]
#[case(44.9, Bucket::Red)]
#[case(45.0, Bucket::Yellow)] // Red is strictly below 45
#[case(50.0, Bucket::Yellow)]
#[case(55.0, Bucket::Yellow)] // Green is strictly above 55
#[case(55.1, Bucket::Green)]
#[case(62.0, Bucket::Green)]
#[case(0.62, Bucket::Green)]
#[case(0.40, Bucket::Red)]
#[case(1.0, Bucket::Green)] // 1.0 reads as 100%
fn test_general_profile(#[case] value: f64, #[case] expected: Bucket) {
    assert_eq!(classify(Some(value), &ThresholdProfile::GENERAL), Some(expected));
}

#[rstest]
#[case(40.0, Bucket::Red)]
#[case(53.0, Bucket::Red)] // Red includes 53
#[case(53.1, Bucket::Yellow)]
#[case(54.0, Bucket::Yellow)]
#[case(57.0, Bucket::Yellow)]
#[case(57.1, Bucket::Green)]
#[case(0.54, Bucket::Yellow)]
#[case(0.50, Bucket::Red)]
fn test_half_profile(#[case] value: f64, #[case] expected: Bucket) {
    assert_eq!(classify(Some(value), &ThresholdProfile::HALF), Some(expected));
}

#[rstest]
#[case(None)]
#[case(Some(f64::NAN))]
#[case(Some(f64::INFINITY))]
fn test_missing_values_have_no_bucket(#[case] value: Option<f64>) {
    assert_eq!(classify(value, &ThresholdProfile::GENERAL), None);
    assert_eq!(classify(value, &ThresholdProfile::HALF), None);
}

#[test]
fn test_fraction_and_percentage_agree() {
    for profile in [ThresholdProfile::GENERAL, ThresholdProfile::HALF] {
        assert_eq!(classify(Some(0.62), &profile), classify(Some(62.0), &profile));
        assert_eq!(classify(Some(0.5), &profile), classify(Some(50.0), &profile));
    }
}

#[test]
fn test_zero_is_red_not_missing() {
    assert_eq!(classify(Some(0.0), &ThresholdProfile::GENERAL), Some(Bucket::Red));
}

#[test]
fn test_classify_side_keeps_normalized_pct() {
    let c = classify_side(Some(0.25), &ThresholdProfile::HALF).unwrap();
    assert!((c.pct - 25.0).abs() < 1e-9);
    assert_eq!(c.bucket, Bucket::Red);
    assert_eq!(normalize_pct(62.0), Some(62.0));
}

#[test]
fn test_bucket_ordering() {
    assert!(Bucket::Red < Bucket::Yellow);
    assert!(Bucket::Yellow < Bucket::Green);
}

#[rstest]
#[case(Some(62.0), "62.0%")]
#[case(Some(0.625), "62.5%")]
#[case(None, "-")]
#[case(Some(f64::NAN), "-")]
fn test_format_pct(#[case] value: Option<f64>, #[case] expected: &str) {
    assert_eq!(format_pct(value), expected);
}
