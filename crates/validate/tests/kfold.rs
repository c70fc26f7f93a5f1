use chrono::{Duration, NaiveDate, NaiveDateTime};
use naiad_curve::{CurveType, FitConfig};
use naiad_segments::RecessionSegment;
use naiad_validate::{CvConfig, CvMethod, cross_validate};

fn ts(y: i32, m: u32, d: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

fn decay_segments(n: usize, a: f64) -> Vec<RecessionSegment> {
    (0..n)
        .map(|i| {
            let start = ts(2000, 1, 1) + Duration::days(50 * i as i64);
            let points: Vec<(NaiveDateTime, f64)> = (0..25)
                .map(|j| (start + Duration::days(j), 10.0 * (-a * j as f64).exp()))
                .collect();
            RecessionSegment::from_points(&points).unwrap()
        })
        .collect()
}

#[test]
fn identical_inputs_give_identical_results() {
    let segments = decay_segments(9, 0.05);
    let run = || {
        cross_validate(
            &segments,
            CurveType::Exponential,
            0.9999,
            &FitConfig::new(),
            &CvConfig::new(),
        )
        .unwrap()
    };
    let a = serde_json::to_string(&run()).unwrap();
    let b = serde_json::to_string(&run()).unwrap();
    assert_eq!(a, b);
}

#[test]
fn every_method_completes_on_clean_data() {
    let segments = decay_segments(10, 0.05);
    for method in [CvMethod::KFold, CvMethod::LeaveOneOut, CvMethod::TemporalSplit] {
        let result = cross_validate(
            &segments,
            CurveType::Exponential,
            0.9999,
            &FitConfig::new(),
            &CvConfig::new().with_method(method),
        )
        .unwrap();
        assert_eq!(result.method(), method);
        assert!(
            result.mean_r_squared() > 0.999,
            "{}: mean r2 = {}",
            method.label(),
            result.mean_r_squared()
        );
        assert!(!result.degraded(), "{}", method.label());
        let expected_folds = match method {
            CvMethod::KFold => 5,
            CvMethod::LeaveOneOut => 10,
            CvMethod::TemporalSplit => 1,
        };
        assert_eq!(result.folds().len(), expected_folds, "{}", method.label());
    }
}

#[test]
fn fold_parameters_track_the_generating_curve() {
    let segments = decay_segments(8, 0.05);
    let result = cross_validate(
        &segments,
        CurveType::Exponential,
        0.9999,
        &FitConfig::new(),
        &CvConfig::new(),
    )
    .unwrap();
    for fold in result.folds() {
        assert_eq!(fold.parameters.len(), 2);
        assert!((fold.parameters[0] - 10.0).abs() < 0.1, "L0 = {}", fold.parameters[0]);
        assert!((fold.parameters[1] - 0.05).abs() < 0.001, "a = {}", fold.parameters[1]);
    }
}
