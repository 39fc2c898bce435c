use crate::condition::{classify, ConditionLabel, ConditionScale};
use crate::error::RailError;
use crate::integrate::{integrate_unit, quantify, quantify_with, OddIntervalRule};
use crate::profile::Profile;
use crate::synth::{seeded_rng, synthesize_defect_profile, synthesize_noise};
use proptest::prelude::*;
use rand::Rng;
use std::f64::consts::PI;

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-12
}

#[test]
fn defect_profile_has_requested_length() {
    let mut rng = seeded_rng(7);
    for length in [1, 2, 3, 500, 1001] {
        let profile = synthesize_defect_profile(length, 0.5, 0.05, &mut rng).unwrap();
        assert_eq!(profile.len(), length);
    }
}

#[test]
fn synthesis_rejects_bad_arguments() {
    let mut rng = seeded_rng(1);
    assert!(matches!(
        synthesize_noise(0, 0.5, 0.05, &mut rng),
        Err(RailError::InvalidArgument(_))
    ));
    assert!(matches!(
        synthesize_noise(10, -0.1, 0.05, &mut rng),
        Err(RailError::InvalidArgument(_))
    ));
    assert!(matches!(
        synthesize_noise(10, 0.5, 0.0, &mut rng),
        Err(RailError::InvalidArgument(_))
    ));
    assert!(matches!(
        synthesize_noise(10, f64::NAN, 0.05, &mut rng),
        Err(RailError::InvalidArgument(_))
    ));
}

#[test]
fn same_seed_gives_identical_noise() {
    let a = synthesize_noise(500, 0.3, 0.02, &mut seeded_rng(42)).unwrap();
    let b = synthesize_noise(500, 0.3, 0.02, &mut seeded_rng(42)).unwrap();
    let c = synthesize_noise(500, 0.3, 0.02, &mut seeded_rng(43)).unwrap();
    assert_eq!(a, b);
    assert_ne!(a, c);
}

#[test]
fn noise_is_bounded_by_harmonic_weights() {
    // Sum over i in 3..=7 of amplitude / i.
    let bound = 0.4 * (1.0 / 3.0 + 1.0 / 4.0 + 1.0 / 5.0 + 1.0 / 6.0 + 1.0 / 7.0);
    let noise = synthesize_noise(500, 0.4, 0.015, &mut seeded_rng(9)).unwrap();
    assert!(noise.samples().iter().all(|v| v.abs() <= bound));
}

#[test]
fn noise_matches_hand_replayed_harmonics() {
    let (length, amplitude, frequency) = (64, 0.5, 0.05);
    let noise = synthesize_noise(length, amplitude, frequency, &mut seeded_rng(2024)).unwrap();

    // Phase then weight per harmonic; the phase goes into the argument as is.
    let mut rng = seeded_rng(2024);
    let harmonics: Vec<(f64, f64, f64)> = (3..=7)
        .map(|i| {
            let i = i as f64;
            let phase: f64 = rng.gen();
            let weight = rng.gen::<f64>() * amplitude / i;
            (phase, weight, frequency * i / 5.0)
        })
        .collect();

    for x in [0usize, 1, 7, 31, 63] {
        let expected: f64 = harmonics
            .iter()
            .map(|(phase, weight, freq)| weight * (2.0 * PI * freq * x as f64 + phase).sin())
            .sum();
        assert!(
            (noise.samples()[x] - expected).abs() < 1e-12,
            "sample {x}: got {}, expected {expected}",
            noise.samples()[x]
        );
    }
}

#[test]
fn zero_amplitude_yields_zero_integral() {
    let mut rng = seeded_rng(3);
    for frequency in [0.01, 0.05, 1.0, 7.5] {
        let defect = synthesize_defect_profile(500, 0.0, frequency, &mut rng).unwrap();
        let q = quantify(&Profile::baseline(500, 0.0), &defect).unwrap();
        assert!(q.difference.samples().iter().all(|d| *d == 0.0));
        assert_eq!(q.integral, 0.0);
    }
}

#[test]
fn unchanged_baseline_is_excellent() {
    let baseline = Profile::baseline(500, 0.0);
    let observed = baseline.clone();
    let q = quantify(&baseline, &observed).unwrap();
    assert_eq!(q.integral, 0.0);
    assert_eq!(classify(q.integral).label, ConditionLabel::Excellent);
}

#[test]
fn quantify_rejects_unequal_lengths() {
    let err = quantify(&Profile::baseline(500, 0.0), &Profile::baseline(499, 0.0)).unwrap_err();
    assert_eq!(
        err,
        RailError::LengthMismatch {
            baseline: 500,
            observed: 499
        }
    );
}

#[test]
fn offset_baseline_measures_against_its_own_level() {
    let ideal_bottom = Profile::baseline(5, -3.0);
    let observed = Profile::from_samples(vec![-3.0, -2.0, -3.0, -4.0, -3.0]);
    let q = quantify(&ideal_bottom, &observed).unwrap();
    assert_eq!(q.difference.samples(), &[0.0, 1.0, 0.0, 1.0, 0.0]);
    // (0 + 4*1 + 2*0 + 4*1 + 0) / 3
    assert!(close(q.integral, 8.0 / 3.0));
}

#[test]
fn simpson_is_exact_for_quadratics_on_odd_counts() {
    let samples: Vec<f64> = (0..5).map(|x| (x * x) as f64).collect();
    // Integral of x^2 over [0, 4].
    assert!(close(
        integrate_unit(&samples, OddIntervalRule::EndCorrection),
        64.0 / 3.0
    ));
}

#[test]
fn end_correction_is_exact_for_quadratics_on_even_counts() {
    let samples = [0.0, 1.0, 4.0, 9.0];
    assert!(close(integrate_unit(&samples, OddIntervalRule::EndCorrection), 9.0));
    // 8/3 from Simpson plus a 6.5 trapezoid on [2, 3].
    assert!(close(
        integrate_unit(&samples, OddIntervalRule::Trapezoid),
        8.0 / 3.0 + 6.5
    ));
}

#[test]
fn both_rules_agree_on_linear_data() {
    let samples = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0];
    let expected = 12.5;
    assert!(close(integrate_unit(&samples, OddIntervalRule::EndCorrection), expected));
    assert!(close(integrate_unit(&samples, OddIntervalRule::Trapezoid), expected));
}

#[test]
fn degenerate_lengths_integrate_deterministically() {
    assert_eq!(integrate_unit(&[], OddIntervalRule::EndCorrection), 0.0);
    assert_eq!(integrate_unit(&[4.0], OddIntervalRule::EndCorrection), 0.0);
    assert_eq!(integrate_unit(&[1.0, 3.0], OddIntervalRule::Trapezoid), 2.0);
    assert_eq!(integrate_unit(&[1.0, 3.0], OddIntervalRule::EndCorrection), 2.0);
}

#[test]
fn end_correction_tail_can_be_negative() {
    // A spike two samples from the end gives the corrected last interval a
    // negative weight; the head still dominates.
    let samples = [0.0, 0.0, 0.0, 0.0, 0.0, 12.0, 0.0, 0.0];
    assert!(close(integrate_unit(&samples, OddIntervalRule::EndCorrection), 16.0 - 1.0));
    assert!(close(integrate_unit(&samples, OddIntervalRule::Trapezoid), 16.0));
}

#[test]
fn negative_integrand_is_clamped() {
    assert_eq!(integrate_unit(&[-1.0, -1.0, -1.0], OddIntervalRule::EndCorrection), 0.0);
}

#[test]
fn classification_ladder() {
    assert_eq!(classify(0.0).label, ConditionLabel::Excellent);
    assert_eq!(classify(19.99).label, ConditionLabel::Excellent);
    assert_eq!(classify(35.0).label, ConditionLabel::Good);
    assert_eq!(classify(75.0).label, ConditionLabel::NeedsAttention);
    assert_eq!(classify(250.0).label, ConditionLabel::NeedsReplacement);
}

#[test]
fn boundaries_belong_to_the_worse_tier() {
    assert_eq!(classify(20.0).label, ConditionLabel::Good);
    assert_eq!(classify(50.0).label, ConditionLabel::NeedsAttention);
    assert_eq!(classify(100.0).label, ConditionLabel::NeedsReplacement);
}

#[test]
fn severity_rank_and_hints_follow_label() {
    let c = classify(60.0);
    assert_eq!(c.severity_rank, 2);
    assert_eq!(c.label.color_hint(), "orange");
    assert_eq!(c.label.to_string(), "Needs attention");
    assert_eq!(classify(f64::INFINITY).label, ConditionLabel::NeedsReplacement);
}

#[test]
fn custom_scale_must_increase_strictly() {
    assert!(ConditionScale::new([1.0, 2.0, 3.0]).is_ok());
    assert!(matches!(
        ConditionScale::new([1.0, 1.0, 3.0]),
        Err(RailError::InvalidThresholds(_))
    ));
    assert!(matches!(
        ConditionScale::new([5.0, 2.0, 3.0]),
        Err(RailError::InvalidThresholds(_))
    ));
    assert!(matches!(
        ConditionScale::new([1.0, 2.0, f64::INFINITY]),
        Err(RailError::InvalidThresholds(_))
    ));

    let scale = ConditionScale::new([1.0, 2.0, 3.0]).unwrap();
    assert_eq!(scale.classify(1.0).label, ConditionLabel::Good);
    assert_eq!(scale.thresholds(), vec![1.0, 2.0, 3.0]);
}

#[test]
fn scale_deserializes_only_through_validation() {
    let scale: ConditionScale = serde_json::from_str("[10.0, 30.0, 60.0]").unwrap();
    assert_eq!(scale, ConditionScale::new([10.0, 30.0, 60.0]).unwrap());
    assert_eq!(scale.classify(45.0).label, ConditionLabel::NeedsAttention);
    assert_eq!(serde_json::to_string(&scale).unwrap(), "[10.0,30.0,60.0]");

    assert!(serde_json::from_str::<ConditionScale>("[100.0, 20.0, 50.0]").is_err());
    assert!(serde_json::from_str::<ConditionScale>("[20.0, 20.0, 50.0]").is_err());
    assert!(serde_json::from_str::<ConditionScale>(
        r#"{"tiers":[[100.0,"needs_replacement"],[20.0,"excellent"]],"worst":"good"}"#
    )
    .is_err());
}

#[test]
fn profile_composition() {
    let a = Profile::from_samples(vec![1.0, 2.0, 3.0]);
    let b = Profile::baseline(3, 0.5);
    assert_eq!(a.try_add(&b).unwrap().samples(), &[1.5, 2.5, 3.5]);
    assert_eq!(a.shifted(-1.0).samples(), &[0.0, 1.0, 2.0]);
    assert_eq!(a.min(), Some(1.0));
    assert_eq!(a.max(), Some(3.0));
    assert!(a.try_add(&Profile::baseline(2, 0.0)).is_err());
    assert_eq!(Profile::baseline(0, 0.0).max(), None);
}

fn profile_pair() -> impl Strategy<Value = (Vec<f64>, Vec<f64>)> {
    (0usize..64).prop_flat_map(|len| {
        (
            prop::collection::vec(-10.0f64..10.0, len),
            prop::collection::vec(-10.0f64..10.0, len),
        )
    })
}

proptest! {
    #[test]
    fn integral_is_symmetric((a, b) in profile_pair()) {
        let a = Profile::from_samples(a);
        let b = Profile::from_samples(b);
        let ab = quantify(&a, &b).unwrap();
        let ba = quantify(&b, &a).unwrap();
        prop_assert_eq!(ab.integral, ba.integral);
    }

    #[test]
    fn self_difference_is_zero((a, _) in profile_pair()) {
        let a = Profile::from_samples(a);
        let q = quantify_with(&a, &a, OddIntervalRule::Trapezoid).unwrap();
        prop_assert_eq!(q.integral, 0.0);
    }

    #[test]
    fn difference_is_non_negative((a, b) in profile_pair()) {
        let q = quantify(&Profile::from_samples(a), &Profile::from_samples(b)).unwrap();
        prop_assert!(q.difference.samples().iter().all(|d| *d >= 0.0));
        prop_assert!(q.integral >= 0.0);
    }

    #[test]
    fn mismatched_lengths_always_fail(l1 in 0usize..200, l2 in 0usize..200) {
        prop_assume!(l1 != l2);
        let err = quantify(&Profile::baseline(l1, 0.0), &Profile::baseline(l2, 0.0));
        let is_mismatch = matches!(err, Err(RailError::LengthMismatch { .. }));
        prop_assert!(is_mismatch);
    }

    #[test]
    fn classification_is_monotone(x in 0.0f64..500.0, y in 0.0f64..500.0) {
        let (lo, hi) = if x <= y { (x, y) } else { (y, x) };
        prop_assert!(classify(lo).label <= classify(hi).label);
    }
}
