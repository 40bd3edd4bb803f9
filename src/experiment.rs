//! Single and batch runs of grow / prune / evaluate.
use serde::{Serialize, Deserialize};

use crate::sample::{ExampleSet, Partition, Partitioner};
use crate::tree::{
    DecisionTree,
    DecisionTreeBuilder,
    Evaluator,
    PruneOrder,
    PruneSummary,
    Pruner,
};
use crate::tree::{builder, evaluate, prune};
use crate::report::DepthProfile;
use crate::error::{Result, TreeError};
use crate::sample::partition::DEFAULT_SEED;

use std::fmt;
use std::path::Path;
use std::fs::File;
use std::io::BufReader;


/// Every parameter of an experiment.
/// Missing fields of a JSON file take their default values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperimentConfig {
    /// Fraction of examples used for growing.
    pub train_fraction: f64,
    /// Fraction of examples used for pruning.
    pub prune_fraction: f64,
    /// Fraction of examples held out for testing.
    pub test_fraction: f64,
    /// Seed of the first partition.
    pub seed: u64,
    /// A node with at most this many members becomes a leaf.
    pub min_leaf_members: usize,
    /// Maximal number of tests on a root-to-leaf path.
    pub max_depth: Option<usize>,
    /// Minimal accuracy improvement that commits a pruning step.
    pub epsilon: f64,
    /// Prior used to turn class counts into a prediction.
    pub positive_prior: f64,
    /// Node visiting order of the pruner.
    pub prune_order: PruneOrder,
    /// Number of runs of a batch.
    pub batch: usize,
}


impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            train_fraction: 0.6,
            prune_fraction: 0.2,
            test_fraction: 0.2,
            seed: DEFAULT_SEED,
            min_leaf_members: builder::DEFAULT_MIN_LEAF_MEMBERS,
            max_depth: None,
            epsilon: prune::DEFAULT_EPSILON,
            positive_prior: evaluate::DEFAULT_POSITIVE_PRIOR,
            prune_order: PruneOrder::default(),
            batch: 1,
        }
    }
}


impl ExperimentConfig {
    /// Read a configuration from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let f = BufReader::new(File::open(path)?);
        let config = serde_json::from_reader(f)?;
        Ok(config)
    }


    /// Check the parameters that the tree builders would reject.
    /// The fractions are checked by [`Partitioner::new`].
    pub fn validate(&self) -> Result<()> {
        if !(0f64..=1f64).contains(&self.positive_prior) {
            return Err(TreeError::InvalidConfig(format!(
                "the positive prior must lie in [0, 1], got {}",
                self.positive_prior
            )));
        }
        if self.epsilon.is_nan() || self.epsilon < 0f64 {
            return Err(TreeError::InvalidConfig(format!(
                "epsilon must be non-negative, got {}", self.epsilon
            )));
        }
        Ok(())
    }
}


/// Outcome of [`Experiment::run`].
#[derive(Debug, Clone)]
pub struct RunReport {
    /// The partition used by this run.
    pub partition: Partition,
    /// The tree after pruning.
    pub tree: DecisionTree,
    /// Profile of the unpruned tree.
    pub grown: DepthProfile,
    /// Pruning summary and profile of the pruned tree,
    /// `None` if the pruning subset is empty.
    pub pruned: Option<(PruneSummary, DepthProfile)>,
}


impl RunReport {
    /// Returns the profile of the final tree.
    pub fn final_profile(&self) -> &DepthProfile {
        self.pruned.as_ref()
            .map_or(&self.grown, |(_, profile)| profile)
    }
}


impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (n_train, n_prune, n_test) = self.partition.sizes();
        writeln!(f, "Training:       {n_train} examples")?;
        writeln!(f, "Pruning:        {n_prune} examples")?;
        writeln!(f, "Testing:        {n_test} examples")?;
        writeln!(f)?;
        write!(f, "{}", self.grown)?;

        if let Some((summary, profile)) = &self.pruned {
            writeln!(f)?;
            if summary.changed() {
                writeln!(
                    f,
                    "Pruning reduced the tree size from {} to {} nodes",
                    summary.n_nodes_before,
                    summary.n_nodes_after,
                )?;
            } else {
                writeln!(f, "Pruning did not remove any nodes")?;
            }
            writeln!(f)?;
            write!(f, "{profile}")?;
        }
        Ok(())
    }
}


/// Mean and standard deviation of the sample mean.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeanStd {
    /// Sample mean.
    pub mean: f64,
    /// Standard deviation of the sample mean;
    /// `0` for fewer than two values.
    pub std: f64,
}


impl MeanStd {
    /// Compute the statistics of `values`.
    pub fn of(values: &[f64]) -> Self {
        let n = values.len();
        if n == 0 {
            return Self { mean: 0.0, std: 0.0 };
        }

        let mean = values.iter().sum::<f64>() / n as f64;
        if n < 2 {
            return Self { mean, std: 0.0 };
        }

        let sum_squares = values.iter()
            .map(|v| (v - mean).powi(2))
            .sum::<f64>();
        let sample_var = sum_squares / (n - 1) as f64;
        let std = (sample_var / (n - 1) as f64).sqrt();

        Self { mean, std }
    }
}


/// Outcome of [`Experiment::run_batch`].
/// Accuracies are fractions in `[0, 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchSummary {
    /// Number of runs.
    pub n_runs: usize,
    /// Node count of the final trees.
    pub n_nodes: MeanStd,
    /// Training accuracy of the final trees.
    pub train_accuracy: MeanStd,
    /// Test accuracy of the final trees, `None` without test examples.
    pub test_accuracy: Option<MeanStd>,
}


impl fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const RULE: &str = "----------------------------------------------";
        let test = self.test_accuracy
            .unwrap_or(MeanStd { mean: 0.0, std: 0.0 });

        writeln!(f, "{RULE}")?;
        writeln!(f, "#nodes\t#nodes\ttrain%\ttrain%\ttest%\ttest%")?;
        writeln!(f, "mean\tstd\tmean\tstd\tmean\tstd")?;
        writeln!(f, "{RULE}")?;
        writeln!(
            f,
            "{:6.2}\t{:6.2}\t{:6.2}\t{:6.2}\t{:6.2}\t{:6.2}",
            self.n_nodes.mean,
            self.n_nodes.std,
            100.0 * self.train_accuracy.mean,
            100.0 * self.train_accuracy.std,
            100.0 * test.mean,
            100.0 * test.std,
        )?;
        writeln!(f, "{RULE}")
    }
}


/// Runs partition, growing, pruning and evaluation
/// as described by an [`ExperimentConfig`].
///
/// # Example
/// ```no_run
/// use reptree::prelude::*;
///
/// let set = SsvReader::new()
///     .file("/path/to/file.ssv")
///     .read()
///     .unwrap();
/// let config = ExperimentConfig {
///     batch: 10,
///     ..ExperimentConfig::default()
/// };
/// let summary = Experiment::new(config)
///     .run_batch(&set)
///     .unwrap();
/// println!("{summary}");
/// ```
#[derive(Debug, Clone)]
pub struct Experiment {
    config: ExperimentConfig,
}


impl Experiment {
    /// Construct a new instance of [`Experiment`].
    pub fn new(config: ExperimentConfig) -> Self {
        Self { config }
    }


    /// Returns the configuration.
    pub fn config(&self) -> &ExperimentConfig {
        &self.config
    }


    /// Partition `set` with the configured seed and run once.
    pub fn run(&self, set: &ExampleSet) -> Result<RunReport> {
        let partition = self.partitioner()?
            .seed(self.config.seed)
            .split(set.n_examples());
        self.run_on(set, partition)
    }


    /// Run once on a given partition of `set`.
    pub fn run_on(&self, set: &ExampleSet, partition: Partition)
        -> Result<RunReport>
    {
        let config = &self.config;
        config.validate()?;
        let evaluator = Evaluator::new()
            .positive_prior(config.positive_prior);

        let mut builder = DecisionTreeBuilder::new()
            .min_leaf_members(config.min_leaf_members);
        if let Some(depth) = config.max_depth {
            builder = builder.max_depth(depth);
        }
        let mut tree = builder.build(set, &partition.train)?
            .ok_or_else(|| {
                TreeError::InvalidPartition("no examples to train on".into())
            })?;


        let test = Some(&partition.test);
        let grown = DepthProfile::compute(
            &tree, set, &partition.train, test, &evaluator
        );


        let pruned = if partition.prune.is_empty() {
            None
        } else {
            let summary = Pruner::new()
                .epsilon(config.epsilon)
                .order(config.prune_order)
                .positive_prior(config.positive_prior)
                .prune(&mut tree, set, &partition.prune);
            let profile = DepthProfile::compute(
                &tree, set, &partition.train, test, &evaluator
            );
            Some((summary, profile))
        };


        let report = RunReport { partition, tree, grown, pruned };
        let last = report.final_profile().last();
        tracing::info!(
            n_nodes = last.n_nodes,
            train_accuracy = last.train_accuracy,
            test_accuracy = ?last.test_accuracy,
            "finished run"
        );

        Ok(report)
    }


    /// Run `batch` times with seeds `seed, seed + 1, ...` and
    /// summarize the final trees.
    pub fn run_batch(&self, set: &ExampleSet) -> Result<BatchSummary> {
        self.config.validate()?;
        let partitioner = self.partitioner()?;
        let n_runs = self.config.batch;

        let mut n_nodes = Vec::with_capacity(n_runs);
        let mut train = Vec::with_capacity(n_runs);
        let mut test = Vec::with_capacity(n_runs);
        for k in 0..n_runs {
            let seed = self.config.seed.wrapping_add(k as u64);
            let partition = partitioner.clone()
                .seed(seed)
                .split(set.n_examples());
            let report = self.run_on(set, partition)?;

            let last = report.final_profile().last();
            n_nodes.push(last.n_nodes as f64);
            train.push(last.train_accuracy);
            if let Some(accuracy) = last.test_accuracy {
                test.push(accuracy);
            }
        }


        let summary = BatchSummary {
            n_runs,
            n_nodes: MeanStd::of(&n_nodes),
            train_accuracy: MeanStd::of(&train),
            test_accuracy: (!test.is_empty()).then(|| MeanStd::of(&test)),
        };
        tracing::info!(
            n_runs,
            n_nodes = summary.n_nodes.mean,
            train_accuracy = summary.train_accuracy.mean,
            "finished batch"
        );

        Ok(summary)
    }


    fn partitioner(&self) -> Result<Partitioner> {
        let config = &self.config;
        Partitioner::new(
            config.train_fraction,
            config.prune_fraction,
            config.test_fraction,
        )
    }
}
