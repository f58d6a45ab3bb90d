use acs_scenario::{InstanceRole, ReadError, Scenario, ScenarioError, ScenarioSource};
use acs_test_utils::ScenarioFixture;
use std::path::PathBuf;

#[test]
fn test_missing_algo() {
    let fixture = ScenarioFixture::new().unwrap().without_key("algo");
    let err = Scenario::load(fixture.source()).unwrap_err();
    assert!(matches!(err, ScenarioError::MissingRequiredField(ref key) if key == "algo"));
}

#[test]
fn test_missing_paramfile_key() {
    let fixture = ScenarioFixture::new().unwrap().without_key("paramfile");
    let err = Scenario::load(fixture.source()).unwrap_err();
    assert!(matches!(err, ScenarioError::MissingRequiredField(ref key) if key == "paramfile"));
}

#[test]
fn test_missing_paramfile_path() {
    let fixture = ScenarioFixture::new().unwrap();
    let missing = fixture.path().join("nope.pcs");
    let fixture = fixture.with_key("paramfile", missing.to_str().unwrap());

    let err = Scenario::load(fixture.source()).unwrap_err();
    assert!(err.is_missing_file());
    assert!(matches!(err, ScenarioError::MissingParameterSpaceFile { ref path } if *path == missing));
}

#[test]
fn test_missing_training_instance_file() {
    let fixture = ScenarioFixture::new().unwrap();
    let missing = fixture.path().join("train.txt");
    let fixture = fixture.with_key("instance_file", missing.to_str().unwrap());

    let err = Scenario::load(fixture.source()).unwrap_err();
    assert!(matches!(
        err,
        ScenarioError::MissingInstanceFile { role: InstanceRole::Train, .. }
    ));
}

#[test]
fn test_missing_test_instance_file() {
    let fixture = ScenarioFixture::new().unwrap();
    let missing = fixture.path().join("test.txt");
    let fixture = fixture.with_key("test_instance_file", missing.to_str().unwrap());

    let err = Scenario::load(fixture.source()).unwrap_err();
    assert!(matches!(
        err,
        ScenarioError::MissingInstanceFile { role: InstanceRole::Test, .. }
    ));
}

#[test]
fn test_missing_feature_entry_names_instance() {
    let fixture = ScenarioFixture::new()
        .unwrap()
        .with_instances("a\nb\nc\n")
        .unwrap()
        .with_features("instance,f1\na,1\nc,3\n")
        .unwrap();

    let err = Scenario::load(fixture.source()).unwrap_err();
    assert!(matches!(err, ScenarioError::MissingFeatureEntry(ref id) if id == "b"));
}

#[test]
fn test_missing_feature_file_is_read_error() {
    let fixture = ScenarioFixture::new().unwrap();
    let missing = fixture.path().join("features.csv");
    let fixture = fixture.with_key("feature_file", missing.to_str().unwrap());

    let err = Scenario::load(fixture.source()).unwrap_err();
    assert!(matches!(err, ScenarioError::Read(ReadError::Io { .. })));
}

#[test]
fn test_malformed_objective() {
    for objective in ["parX", "par", "mean-", "par0"] {
        let fixture = ScenarioFixture::new().unwrap().with_key("overall_obj", objective);
        let err = Scenario::load(fixture.source()).unwrap_err();
        assert!(
            matches!(err, ScenarioError::InvalidObjective(ref o) if o == objective),
            "{objective}"
        );
    }
}

#[test]
fn test_invalid_numeric_field_names_key_and_value() {
    let fixture = ScenarioFixture::new().unwrap().with_key("wallclock-limit", "forever");
    let err = Scenario::load(fixture.source()).unwrap_err();
    assert!(matches!(
        err,
        ScenarioError::InvalidFieldValue { ref key, ref value } if key == "wallclock-limit" && value == "forever"
    ));
}

#[test]
fn test_deterministic_flag_table() {
    for (raw, expected) in [("1", true), ("true", true), ("0", false), ("false", false), ("", false)] {
        let fixture = ScenarioFixture::new().unwrap().with_key("deterministic", raw);
        let scenario = Scenario::load(fixture.source()).unwrap();
        assert_eq!(scenario.deterministic(), expected, "deterministic = {raw:?}");
    }
    let scenario = Scenario::load(ScenarioFixture::new().unwrap().source()).unwrap();
    assert!(!scenario.deterministic());
}

#[test]
fn test_unreadable_scenario_file() {
    let err = Scenario::load(PathBuf::from("/no/such/scenario.txt")).unwrap_err();
    assert!(matches!(err, ScenarioError::InvalidSource(ReadError::Io { .. })));
}

#[test]
fn test_unsupported_json_source() {
    let err = ScenarioSource::try_from(serde_json::json!([1, 2, 3])).unwrap_err();
    assert!(matches!(err, ScenarioError::UnsupportedSourceType(ref kind) if kind == "array"));
}

#[test]
fn test_forbidden_default_pcs_rejected() {
    let fixture = ScenarioFixture::new().unwrap();
    let pcs = fixture
        .write("forbidden.pcs", "a {x, y} [x]\nb {u, v} [u]\n{a=x, b=u}\n")
        .unwrap();
    let fixture = fixture.with_key("paramfile", pcs.to_str().unwrap());

    // a forbidden default only surfaces when the default is requested
    let scenario = Scenario::load(fixture.source()).unwrap();
    assert!(scenario.parameter_space().default_configuration().is_err());
}

#[test]
fn test_empty_numeric_fields_rejected() {
    for key in ["cutoff_time", "tunerTimeout", "wallclock-limit", "runcount-limit"] {
        let fixture = ScenarioFixture::new().unwrap().with_key(key, "");
        let err = Scenario::load(fixture.source()).unwrap_err();
        assert!(
            matches!(err, ScenarioError::InvalidFieldValue { key: ref k, ref value } if k == key && value.is_empty()),
            "{key}"
        );
    }
}

#[test]
fn test_empty_objective_kept_literal() {
    let fixture = ScenarioFixture::new().unwrap().with_key("overall_obj", "");
    let scenario = Scenario::load(fixture.source()).unwrap();
    assert_eq!(scenario.overall_objective(), "");
    assert_eq!(scenario.par_factor(), 1);
}

#[test]
fn test_empty_instance_file_means_no_instances() {
    let fixture = ScenarioFixture::new().unwrap().with_key("instance_file", "");
    let scenario = Scenario::load(fixture.source()).unwrap();
    assert!(scenario.train_instances().is_empty());
}
