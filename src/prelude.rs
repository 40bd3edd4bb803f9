//! Exports the structs needed to grow, prune and evaluate a tree.
//!
pub use crate::sample::{
    // Data ---------------------------------------
    ExampleSet,
    Column,
    AttributeKind,
    Value,
    MembershipSet,


    // Loading and partitioning -------------------
    SsvReader,
    Partition,
    Partitioner,
};


pub use crate::tree::{
    // Growing
    DecisionTree,
    DecisionTreeBuilder,
    Node,
    Test,


    // Evaluation and pruning
    Evaluator,
    Confusion,
    Pruner,
    PruneOrder,
};


pub use crate::report::DepthProfile;


pub use crate::experiment::{
    Experiment,
    ExperimentConfig,
};


pub use crate::error::TreeError;
