use super::*;

#[test]
fn empty_object_yields_defaults() {
    let s = EngineSettings::from_reader("{}".as_bytes()).unwrap();
    assert_eq!(s, EngineSettings::default());
    assert!(s.parallel);
    assert_eq!(s.precompute_blur_radius, DEFAULT_PRECOMPUTE_BLUR_RADIUS);
}

#[test]
fn fields_are_read() {
    let json = r#"{"parallel": false, "threads": 2, "noise_seed": 42, "precompute_blur_radius": 4.5}"#;
    let s = EngineSettings::from_reader(json.as_bytes()).unwrap();
    assert!(!s.parallel);
    assert_eq!(s.threads, Some(2));
    assert_eq!(s.noise_seed, Some(42));
    assert_eq!(s.precompute_blur_radius, 4.5);
}

#[test]
fn zero_threads_is_rejected() {
    let err = EngineSettings::from_reader(r#"{"threads": 0}"#.as_bytes()).unwrap_err();
    assert!(matches!(err, BlendError::Validation(_)));
}

#[test]
fn unknown_fields_are_rejected() {
    let err = EngineSettings::from_reader(r#"{"thread": 2}"#.as_bytes()).unwrap_err();
    assert!(matches!(err, BlendError::Serde(_)));
}

#[test]
fn negative_blur_radius_is_rejected() {
    let s = EngineSettings {
        precompute_blur_radius: -1.0,
        ..EngineSettings::default()
    };
    assert!(s.validate().is_err());
}

#[test]
fn missing_file_is_a_validation_error() {
    let err = EngineSettings::from_path("/nonexistent/layerblend/settings.json").unwrap_err();
    assert!(err.to_string().contains("open settings JSON"));
}

#[test]
fn oversized_blur_radius_from_json_is_rejected() {
    let err = EngineSettings::from_reader(r#"{"precompute_blur_radius": 3.0e9}"#.as_bytes())
        .unwrap_err();
    assert!(matches!(err, BlendError::Validation(_)));

    let s = EngineSettings {
        precompute_blur_radius: 25.0,
        ..EngineSettings::default()
    };
    assert!(s.validate().is_ok());
}
