//! Reduced-error post-pruning.
use serde::{Serialize, Deserialize};

use crate::sample::{ExampleSet, MembershipSet};
use super::dtree::DecisionTree;
use super::evaluate::Evaluator;
use super::node::Node;

use std::fmt;
use std::mem;


/// The minimal accuracy improvement that commits a pruning step.
pub const DEFAULT_EPSILON: f64 = 0.005;


/// Order in which the pruner visits the nodes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PruneOrder {
    /// Decide on a node first, then descend into its children
    /// if it is kept.
    PreOrder,
    /// Prune the children first, then decide on the node.
    #[default]
    PostOrder,
}


impl fmt::Display for PruneOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::PreOrder => "pre-order",
            Self::PostOrder => "post-order",
        };

        write!(f, "{name}")
    }
}


/// What a pruning pass did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PruneSummary {
    /// Number of nodes before pruning.
    pub n_nodes_before: usize,
    /// Number of nodes after pruning.
    pub n_nodes_after: usize,
    /// Number of branches turned into leaves.
    pub n_collapsed: usize,
    /// Accuracy on the pruning subset before pruning.
    pub accuracy_before: f64,
    /// Accuracy on the pruning subset after pruning.
    pub accuracy_after: f64,
}


impl PruneSummary {
    /// Returns `true` if the pass removed some node.
    #[inline]
    pub fn changed(&self) -> bool {
        self.n_nodes_after < self.n_nodes_before
    }
}


/// A struct that post-prunes a [`DecisionTree`] against a pruning subset.
///
/// Each branch is tentatively replaced by a leaf carrying its class counts.
/// The replacement is kept iff the accuracy of the whole tree on the
/// pruning subset grows by more than `epsilon`.
///
/// # Example
///
/// ```no_run
/// use reptree::prelude::*;
///
/// # let set = SsvReader::parse_str("1 1\nclass\nb\n1\n").unwrap();
/// # let partition = Partition::stacked(1, 0, 0);
/// let mut tree = DecisionTreeBuilder::new()
///     .build(&set, &partition.train)
///     .unwrap()
///     .unwrap();
/// let summary = Pruner::new()
///     .epsilon(0.01)
///     .order(PruneOrder::PreOrder)
///     .prune(&mut tree, &set, &partition.prune);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Pruner {
    epsilon: f64,
    order: PruneOrder,
    evaluator: Evaluator,
}


impl Default for Pruner {
    fn default() -> Self {
        Self {
            epsilon: DEFAULT_EPSILON,
            order: PruneOrder::default(),
            evaluator: Evaluator::default(),
        }
    }
}


impl Pruner {
    /// Construct a new instance of [`Pruner`].
    /// By default, [`Pruner`] sets the parameters as follows;
    /// ```text
    /// epsilon: DEFAULT_EPSILON == 0.005,
    /// order: PruneOrder::PostOrder,
    /// positive_prior: 0.5,
    /// ```
    pub fn new() -> Self {
        Self::default()
    }


    /// Set the minimal accuracy improvement.
    #[inline]
    pub fn epsilon(mut self, epsilon: f64) -> Self {
        assert!(epsilon >= 0.0, "Epsilon must be non-negative");
        self.epsilon = epsilon;
        self
    }


    /// Set the traversal order.
    #[inline]
    pub fn order(mut self, order: PruneOrder) -> Self {
        self.order = order;
        self
    }


    /// Set the positive prior used to classify the pruning examples.
    #[inline]
    pub fn positive_prior(mut self, prior: f64) -> Self {
        self.evaluator = self.evaluator.positive_prior(prior);
        self
    }


    /// Prune `tree` in place against the examples of `set` in `members`.
    /// An empty `members` leaves the tree untouched.
    pub fn prune(
        &self,
        tree: &mut DecisionTree,
        set: &ExampleSet,
        members: &MembershipSet,
    ) -> PruneSummary
    {
        let n_nodes_before = tree.n_nodes();
        let accuracy_before = self.evaluator.accuracy(tree.root(), set, members);
        let mut summary = PruneSummary {
            n_nodes_before,
            n_nodes_after: n_nodes_before,
            n_collapsed: 0,
            accuracy_before,
            accuracy_after: accuracy_before,
        };

        if members.is_empty() {
            return summary;
        }


        let mut path = Vec::new();
        self.visit(tree.root_mut(), &mut path, set, members, &mut summary);


        summary.n_nodes_after = tree.n_nodes();
        summary.accuracy_after = self.evaluator
            .accuracy(tree.root(), set, members);
        tracing::info!(
            order = %self.order,
            n_nodes_before = summary.n_nodes_before,
            n_nodes_after = summary.n_nodes_after,
            accuracy_before = summary.accuracy_before,
            accuracy_after = summary.accuracy_after,
            "pruned decision tree"
        );

        summary
    }


    fn visit(
        &self,
        root: &mut Node,
        path: &mut Vec<usize>,
        set: &ExampleSet,
        members: &MembershipSet,
        summary: &mut PruneSummary,
    )
    {
        if root.descendant(path).is_leaf() {
            return;
        }

        if self.order == PruneOrder::PreOrder
            && self.try_collapse(root, path, set, members, summary)
        {
            return;
        }

        let n_children = root.descendant(path).children().len();
        for k in 0..n_children {
            path.push(k);
            self.visit(root, path, set, members, summary);
            path.pop();
        }

        if self.order == PruneOrder::PostOrder {
            self.try_collapse(root, path, set, members, summary);
        }
    }


    /// Tentatively replace the node at `path` by a leaf.
    /// Returns `true` if the replacement is committed.
    fn try_collapse(
        &self,
        root: &mut Node,
        path: &[usize],
        set: &ExampleSet,
        members: &MembershipSet,
        summary: &mut PruneSummary,
    ) -> bool
    {
        let node = root.descendant_mut(path);
        node.refresh_counts();
        let attribute = node.test_attribute();
        let leaf = node.as_leaf();

        let before = self.evaluator.accuracy(root, set, members);
        let subtree = mem::replace(root.descendant_mut(path), leaf);
        let after = self.evaluator.accuracy(root, set, members);


        let attribute = attribute.map(|a| set.name(a));
        if after - before > self.epsilon {
            tracing::debug!(?attribute, before, after, "pruning");
            summary.n_collapsed += 1;
            true
        } else {
            tracing::debug!(?attribute, before, after, "not pruning");
            *root.descendant_mut(path) = subtree;
            false
        }
    }
}
