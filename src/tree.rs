//! ID3-style decision trees:
//! growing, classification and reduced-error pruning.

/// Entropy and the split selection.
pub mod entropy;
/// Defines the nodes of `DecisionTree`.
pub mod node;
/// Defines `DecisionTreeBuilder`.
pub mod builder;
/// Classification and accuracy.
pub mod evaluate;
/// Defines `Pruner`.
pub mod prune;
/// Defines `DecisionTree`.
pub mod dtree;


pub use entropy::{entropy, best_split, Split};
pub use node::{Node, Test};
pub use builder::DecisionTreeBuilder;
pub use evaluate::{Evaluator, Confusion};
pub use prune::{Pruner, PruneOrder, PruneSummary};
pub use dtree::DecisionTree;
