#![warn(missing_docs)]

//!
//! A crate that grows ID3-style decision trees for binary classification
//! and post-prunes them by reduced-error pruning.
//!
//! The examples live in an [`ExampleSet`]: attribute `0` is the binary
//! class label, the other attributes are binary, discrete or continuous.
//! A [`MembershipSet`] selects the examples a computation runs on.
//!
//! - [`DecisionTreeBuilder`] grows a tree by recursively choosing the test
//!     with the greatest information gain.
//!     Continuous attributes are split at the midpoint threshold
//!     that minimizes the two-sided entropy.
//!
//! - [`Pruner`] replaces a branch by a leaf whenever this raises the
//!     accuracy on a held-out pruning subset by more than `epsilon`.
//!
//! - [`Evaluator`] classifies examples and measures accuracy,
//!     optionally cutting the tree at a given depth.
//!
//! [`Experiment`] ties these together with a random train/prune/test
//! [`Partition`] and reports per-depth statistics.
//!
//! ```no_run
//! use reptree::prelude::*;
//!
//! let set = SsvReader::new()
//!     .file("/path/to/file.ssv")
//!     .read()
//!     .unwrap();
//! let partition = Partitioner::new(0.6, 0.2, 0.2)
//!     .unwrap()
//!     .seed(777)
//!     .split(set.n_examples());
//!
//! let mut tree = DecisionTreeBuilder::new()
//!     .build(&set, &partition.train)
//!     .unwrap()
//!     .expect("the training subset is not empty");
//! Pruner::new().prune(&mut tree, &set, &partition.prune);
//!
//! let accuracy = Evaluator::new()
//!     .accuracy(tree.root(), &set, &partition.test);
//! println!("{}", tree.display(&set));
//! println!("test accuracy: {accuracy}");
//! ```

pub mod error;
pub mod sample;
pub mod tree;
pub mod report;
pub mod experiment;
pub mod prelude;


pub use error::{Result, TreeError};

pub use sample::{
    AttributeKind,
    Column,
    ExampleSet,
    MembershipSet,
    Partition,
    Partitioner,
    SsvReader,
    Value,
};

pub use tree::{
    Confusion,
    DecisionTree,
    DecisionTreeBuilder,
    Evaluator,
    Node,
    PruneOrder,
    PruneSummary,
    Pruner,
    Split,
    Test,
};

pub use report::{DepthProfile, DepthRow, PathDisplay, TreeDisplay};

pub use experiment::{
    BatchSummary,
    Experiment,
    ExperimentConfig,
    MeanStd,
    RunReport,
};
