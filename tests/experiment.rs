use reptree::prelude::*;
use reptree::BatchSummary;

use rand::prelude::*;


fn noisy_set(n_examples: usize, seed: u64) -> ExampleSet {
    let mut rng = StdRng::seed_from_u64(seed);

    let mut class = Vec::with_capacity(n_examples);
    let mut b = Vec::with_capacity(n_examples);
    let mut x = Vec::with_capacity(n_examples);
    for _ in 0..n_examples {
        let bi = rng.gen_bool(0.5);
        let xi = rng.gen_range(-1.0..1.0_f64);
        let yi = (xi > 0.0) ^ rng.gen_bool(0.1);

        class.push(yi);
        b.push(bi);
        x.push(xi);
    }

    ExampleSet::new(
        ["class", "b", "x"],
        vec![Column::binary(class), Column::binary(b), Column::continuous(x)],
    ).unwrap()
}


#[test]
fn single_run_prunes_and_profiles() {
    let set = noisy_set(400, 21);
    let report = Experiment::new(ExperimentConfig::default())
        .run(&set)
        .unwrap();

    assert_eq!(report.partition.sizes(), (240, 80, 80));

    let (summary, profile) = report.pruned.as_ref().unwrap();
    assert_eq!(report.grown.last().n_nodes, summary.n_nodes_before);
    assert_eq!(profile.last().n_nodes, summary.n_nodes_after);
    assert_eq!(report.tree.n_nodes(), summary.n_nodes_after);
    assert!(summary.accuracy_after >= summary.accuracy_before);

    let last = report.final_profile().last();
    assert!((0.0..=1.0).contains(&last.train_accuracy));
    assert!(last.test_accuracy.is_some());

    let text = report.to_string();
    assert!(text.contains("Training:       240 examples"));
    assert!(text.contains("FINAL"));
}


#[test]
fn run_without_pruning_examples() {
    let set = noisy_set(100, 4);
    let config = ExperimentConfig {
        train_fraction: 0.8,
        prune_fraction: 0.0,
        test_fraction: 0.2,
        ..ExperimentConfig::default()
    };
    let report = Experiment::new(config).run(&set).unwrap();

    assert!(report.pruned.is_none());
    assert_eq!(report.final_profile(), &report.grown);
}


#[test]
fn empty_training_subset_is_an_error() {
    let set = noisy_set(1, 0);
    let config = ExperimentConfig {
        train_fraction: 0.1,
        ..ExperimentConfig::default()
    };
    let err = Experiment::new(config).run(&set).unwrap_err();

    assert!(matches!(err, TreeError::InvalidPartition(_)));
}


#[test]
fn batch_summarizes_every_run() {
    let set = noisy_set(300, 8);
    let config = ExperimentConfig {
        batch: 4,
        prune_order: PruneOrder::PreOrder,
        ..ExperimentConfig::default()
    };
    let summary: BatchSummary = Experiment::new(config)
        .run_batch(&set)
        .unwrap();

    assert_eq!(summary.n_runs, 4);
    assert!(summary.n_nodes.mean >= 1.0);
    assert!(summary.n_nodes.std >= 0.0);
    assert!((0.0..=1.0).contains(&summary.train_accuracy.mean));
    assert!(summary.test_accuracy.is_some());
    assert!(summary.to_string().contains("#nodes"));
}


#[test]
fn config_reads_partial_json() {
    let path = std::env::temp_dir().join("reptree-config-test.json");
    std::fs::write(
        &path,
        r#"{ "batch": 5, "prune_order": "PreOrder", "max_depth": 4 }"#,
    ).unwrap();
    let config = ExperimentConfig::from_json_file(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(config.batch, 5);
    assert_eq!(config.prune_order, PruneOrder::PreOrder);
    assert_eq!(config.max_depth, Some(4));
    assert_eq!(config.epsilon, 0.005);
    assert_eq!(config.seed, 1234);
}


#[test]
fn out_of_range_parameters_are_errors() {
    let set = noisy_set(50, 3);

    let config = ExperimentConfig {
        positive_prior: 1.5,
        ..ExperimentConfig::default()
    };
    let err = Experiment::new(config).run(&set).unwrap_err();
    assert!(matches!(err, TreeError::InvalidConfig(_)));

    let config = ExperimentConfig {
        epsilon: -0.1,
        batch: 3,
        ..ExperimentConfig::default()
    };
    let experiment = Experiment::new(config);
    assert!(matches!(
        experiment.run(&set).unwrap_err(),
        TreeError::InvalidConfig(_)
    ));
    assert!(matches!(
        experiment.run_batch(&set).unwrap_err(),
        TreeError::InvalidConfig(_)
    ));
}


#[test]
fn invalid_json_config_is_rejected_before_running() {
    let path = std::env::temp_dir().join("reptree-bad-config-test.json");
    std::fs::write(&path, r#"{ "positive_prior": 1.5 }"#).unwrap();
    let config = ExperimentConfig::from_json_file(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert!(matches!(config.validate(), Err(TreeError::InvalidConfig(_))));
}
