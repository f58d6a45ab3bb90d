use acs_scenario::{
    runner_fn, RunObjective, RunRequest, RunStatus, RunValue, Scenario, ScenarioSource,
    TargetAlgorithmRunner, PARAMETER_SPACE_SEED,
};
use acs_test_utils::{init_tracing, ScenarioFixture};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[test]
fn test_minimal_source_gets_defaults() {
    init_tracing();
    let fixture = ScenarioFixture::new().unwrap();
    let scenario = Scenario::load(fixture.source()).unwrap();

    assert_eq!(scenario.command(), &["python".to_string(), "wrapper.py".to_string()]);
    assert_eq!(scenario.exec_dir(), PathBuf::from(".").as_path());
    assert!(!scenario.deterministic());
    assert_eq!(scenario.run_objective(), RunObjective::Runtime);
    assert_eq!(scenario.overall_objective(), "par10");
    assert_eq!(scenario.par_factor(), 10);
    assert!(scenario.algo_runs_time_limit().is_infinite());
    assert!(scenario.wallclock_limit().is_infinite());
    assert!(scenario.run_count_limit().is_infinite());
    assert!(scenario.train_instances().is_empty());
    assert!(scenario.test_instances().is_empty());
    assert!(scenario.instances().specific.is_empty());
    assert!(scenario.features().is_none());
    assert_eq!(scenario.parameter_space().current_seed(), Some(PARAMETER_SPACE_SEED));
}

#[test]
fn test_objective_table() {
    for (objective, factor) in [("par10", 10), ("PAR1", 1), ("mean5", 5), ("MEAN2", 2), ("something", 1)] {
        let fixture = ScenarioFixture::new().unwrap().with_key("overall_obj", objective);
        let scenario = Scenario::load(fixture.source()).unwrap();
        assert_eq!(scenario.par_factor(), factor, "{objective}");
    }
}

#[test]
fn test_instance_specific_arguments() {
    let fixture = ScenarioFixture::new()
        .unwrap()
        .with_instances("i7 -seed 5\ni8\n")
        .unwrap();
    let scenario = Scenario::load(fixture.source()).unwrap();

    assert_eq!(scenario.train_instances(), &["i7".to_string(), "i8".to_string()]);
    assert_eq!(scenario.instance_specific("i7"), Some("-seed 5"));
    assert_eq!(scenario.instance_specific("i8"), None);
}

#[test]
fn test_train_and_test_are_separate() {
    let fixture = ScenarioFixture::new()
        .unwrap()
        .with_instances("a\nb\n")
        .unwrap()
        .with_test_instances("b\nz  --size   3\n")
        .unwrap();
    let scenario = Scenario::load(fixture.source()).unwrap();

    assert_eq!(scenario.train_instances(), &["a".to_string(), "b".to_string()]);
    assert_eq!(scenario.test_instances(), &["b".to_string(), "z".to_string()]);
    assert_eq!(scenario.instance_specific("z"), Some("--size 3"));
}

#[test]
fn test_features_follow_training_order() {
    let fixture = ScenarioFixture::new()
        .unwrap()
        .with_instances("a\nb\nc\n")
        .unwrap()
        .with_features("instance,f1,f2\nc,3,30\nb,2,20\na,1,10\n")
        .unwrap();
    let scenario = Scenario::load(fixture.source()).unwrap();

    let features = scenario.features().unwrap();
    assert_eq!(features.names(), &["f1".to_string(), "f2".to_string()]);
    assert_eq!(features.map().len(), 3);

    let rows: Vec<&[f64]> = features.matrix().iter_rows().collect();
    assert_eq!(rows, vec![&[1.0, 10.0][..], &[2.0, 20.0][..], &[3.0, 30.0][..]]);
}

#[test]
fn test_scenario_file_source() {
    let fixture = ScenarioFixture::new()
        .unwrap()
        .with_key("deterministic", "1")
        .with_key("run_obj", "quality")
        .with_key("cutoff_time", "30")
        .with_key("outdir", "runs/out")
        .with_instances("i1\ni2\n")
        .unwrap();
    let path = fixture.write_scenario_file().unwrap();

    let scenario = Scenario::load(path).unwrap();
    assert!(scenario.deterministic());
    assert_eq!(scenario.run_objective(), RunObjective::Quality);
    assert_eq!(scenario.cutoff_time(), 30.0);
    assert_eq!(scenario.output_dir(), Some(PathBuf::from("runs/out").as_path()));
    assert_eq!(scenario.train_instances().len(), 2);
}

#[test]
fn test_file_and_mapping_sources_agree() {
    let fixture = ScenarioFixture::new()
        .unwrap()
        .with_key("overall_obj", "mean3")
        .with_instances("x --flag\ny\n")
        .unwrap();
    let path = fixture.write_scenario_file().unwrap();

    let from_file = Scenario::load(path).unwrap();
    let from_map = Scenario::load(fixture.source()).unwrap();
    assert_eq!(from_file.options(), from_map.options());
    assert_eq!(from_file.instances(), from_map.instances());
}

#[test]
fn test_json_source() {
    let fixture = ScenarioFixture::new().unwrap();
    let mut json = serde_json::Map::new();
    for (k, v) in fixture.map() {
        json.insert(k.clone(), serde_json::Value::String(v.clone()));
    }
    json.insert("runcount-limit".into(), serde_json::json!(500));
    json.insert("deterministic".into(), serde_json::json!(true));

    let source = ScenarioSource::try_from(serde_json::Value::Object(json)).unwrap();
    let scenario = Scenario::load(source).unwrap();
    assert_eq!(scenario.run_count_limit(), 500.0);
    assert!(scenario.deterministic());
}

#[test]
fn test_construction_is_idempotent() {
    let fixture = ScenarioFixture::new()
        .unwrap()
        .with_instances("a -v 1\nb\n")
        .unwrap()
        .with_features("instance,f\na,1\nb,2\n")
        .unwrap();

    let first = Scenario::load(fixture.source()).unwrap();
    let second = Scenario::load(fixture.source()).unwrap();

    assert_eq!(first.options(), second.options());
    assert_eq!(first.par_factor(), second.par_factor());
    assert_eq!(first.instances(), second.instances());
    assert_eq!(first.features(), second.features());
    assert_eq!(first.parameter_space(), second.parameter_space());
}

#[test]
fn test_seeded_space_samples_reproducibly() {
    let fixture = ScenarioFixture::new().unwrap();
    let a = Scenario::load(fixture.source()).unwrap();
    let b = Scenario::load(fixture.source()).unwrap();

    let (mut rng_a, mut rng_b) = (a.parameter_space().rng(), b.parameter_space().rng());
    for _ in 0..5 {
        let x = a.parameter_space().sample_configuration(&mut rng_a).unwrap();
        let y = b.parameter_space().sample_configuration(&mut rng_b).unwrap();
        assert_eq!(x, y);
    }
}

#[test]
fn test_custom_runner_receives_scenario_context() {
    let fixture = ScenarioFixture::new()
        .unwrap()
        .with_key("cutoff_time", "12")
        .with_instances("i1 --depth 3\n")
        .unwrap();

    let runner: Arc<dyn TargetAlgorithmRunner> = Arc::new(runner_fn(|req: &RunRequest<'_>| {
        Ok(RunValue {
            status: RunStatus::Success,
            cost: req.cutoff,
            runtime: 0.5,
            additional_info: req.instance_specific.unwrap_or_default().to_string(),
        })
    }));
    let scenario = Scenario::new(fixture.source(), Some(runner)).unwrap();

    let config = scenario.parameter_space().default_configuration().unwrap();
    let value = scenario.evaluate(&config, Some("i1"), 7).unwrap();
    assert_eq!(value.cost, 12.0);
    assert_eq!(value.additional_info, "--depth 3");
}

#[test]
fn test_scenario_is_shareable_across_threads() {
    let fixture = ScenarioFixture::new().unwrap().with_instances("a\nb\n").unwrap();
    let scenario = Arc::new(Scenario::load(fixture.source()).unwrap());

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let scenario = Arc::clone(&scenario);
            std::thread::spawn(move || scenario.train_instances().len())
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), 2);
    }
}

proptest! {
    #[test]
    fn prop_instance_ids_are_first_tokens(
        lines in proptest::collection::vec(
            ("[a-z][a-z0-9_]{0,6}", proptest::collection::vec("-[a-z]{1,4}", 0..3)),
            1..12,
        )
    ) {
        let text: String = lines
            .iter()
            .map(|(id, args)| format!("{id} {}\n", args.join(" ")))
            .collect();
        let fixture = ScenarioFixture::new().unwrap().with_instances(&text).unwrap();
        let scenario = Scenario::load(fixture.source()).unwrap();

        let expected: Vec<String> = lines.iter().map(|(id, _)| id.clone()).collect();
        prop_assert_eq!(scenario.train_instances(), expected.as_slice());
        for (id, args) in &lines {
            if !args.is_empty() {
                prop_assert!(scenario.instance_specific(id).is_some());
            }
        }
    }
}

#[test]
fn test_scenario_file_keeps_quoted_command_spacing() {
    let fixture = ScenarioFixture::new()
        .unwrap()
        .with_key("algo", "python \"my  solver.py\"  --seed 1")
        .with_key("execdir", "/opt/solver");
    let path = fixture.write_scenario_file().unwrap();

    let scenario = Scenario::load(path).unwrap();
    assert_eq!(scenario.command(), &["python", "my  solver.py", "--seed", "1"]);

    let config = scenario.parameter_space().default_configuration().unwrap();
    let req = scenario.run_request(&config, None, 3);
    assert_eq!(req.exec_dir, Some(Path::new("/opt/solver")));
}
