use crate::sample::{Column, ExampleSet, MembershipSet};
use crate::error::Result;
use super::entropy::{best_split, Split};
use super::node::{Node, Test};
use super::dtree::DecisionTree;


/// The minimal number of members of a splittable node set as default.
pub const DEFAULT_MIN_LEAF_MEMBERS: usize = 1;


/// A struct that grows a [`DecisionTree`] on a subset of an
/// [`ExampleSet`] by recursively choosing the test with the greatest
/// information gain.
///
/// # Example
///
/// ```no_run
/// use reptree::prelude::*;
///
/// let set = SsvReader::new()
///     .file("/path/to/file.ssv")
///     .read()
///     .unwrap();
/// let tree = DecisionTreeBuilder::new()
///     .min_leaf_members(2)
///     .build(&set, &set.all())
///     .unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct DecisionTreeBuilder {
    min_leaf_members: usize,
    max_depth: Option<usize>,
}


impl Default for DecisionTreeBuilder {
    fn default() -> Self {
        Self {
            min_leaf_members: DEFAULT_MIN_LEAF_MEMBERS,
            max_depth: None,
        }
    }
}


impl DecisionTreeBuilder {
    /// Construct a new instance of [`DecisionTreeBuilder`].
    /// By default, [`DecisionTreeBuilder`] sets the parameters as follows;
    /// ```text
    /// min_leaf_members: DEFAULT_MIN_LEAF_MEMBERS == 1,
    /// max_depth: None (unbounded),
    /// ```
    pub fn new() -> Self {
        Self::default()
    }


    /// A node with at most `n` members becomes a leaf.
    /// Default value is `1`.
    #[inline]
    pub fn min_leaf_members(mut self, n: usize) -> Self {
        self.min_leaf_members = n;
        self
    }


    /// Specify the maximal number of tests on a root-to-leaf path.
    /// `max_depth(0)` yields a single leaf.
    /// By default the depth is unbounded.
    #[inline]
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }


    /// Grow a tree on the examples of `set` in `members`.
    /// Returns `Ok(None)` if `members` is empty.
    pub fn build(&self, set: &ExampleSet, members: &MembershipSet)
        -> Result<Option<DecisionTree>>
    {
        assert_eq!(
            members.n_examples(), set.n_examples(),
            "The membership set ranges over a different number of examples"
        );

        if members.is_empty() {
            return Ok(None);
        }

        let root = self.grow(set, members, 0)?;
        let tree = DecisionTree::from(root);
        tracing::info!(
            n_members = members.count_set(),
            n_nodes = tree.n_nodes(),
            depth = tree.depth(),
            "grew decision tree"
        );

        Ok(Some(tree))
    }


    fn grow(&self, set: &ExampleSet, members: &MembershipSet, depth: usize)
        -> Result<Node>
    {
        let n_members = members.count_set();
        let (n_positive, n_negative) = set.count_labels(members);
        let leaf = Node::leaf(n_positive, n_negative);


        if n_members <= self.min_leaf_members
            || self.max_depth.is_some_and(|max| depth >= max)
        {
            return Ok(leaf);
        }


        let Some(split) = best_split(set, members)? else {
            return Ok(leaf);
        };
        let Split { attribute, gain, threshold } = split;
        tracing::debug!(
            attribute = set.name(attribute),
            gain,
            ?threshold,
            n_members,
            depth,
            "selected split"
        );


        let column = set.column(attribute);
        let (test, subsets) = match (column, threshold) {
            (Column::Continuous(values), Some(threshold)) => {
                let test = Test::Continuous { attribute, threshold };
                let lower = members.filter(|i| values[i] < threshold);
                let upper = members.filter(|i| values[i] >= threshold);
                (test, vec![lower, upper])
            },
            (Column::Binary(_), _) => {
                let test = Test::Binary(attribute);
                (test, restrict(set, members, column, &test))
            },
            _ => {
                let test = Test::Discrete(attribute);
                (test, restrict(set, members, column, &test))
            },
        };


        // A test that leaves a branch empty, or sends everything down one
        // branch, does not partition the subset.
        let degenerate = subsets.iter()
            .any(|s| {
                let n = s.count_set();
                n == 0 || n == n_members
            });
        if degenerate {
            tracing::debug!(
                attribute = set.name(attribute),
                "degenerate split, created a leaf"
            );
            return Ok(leaf);
        }


        let children = subsets.iter()
            .map(|subset| self.grow(set, subset, depth + 1))
            .collect::<Result<Vec<_>>>()?;

        Ok(Node::branch(n_positive, n_negative, test, children))
    }
}


/// One membership set per branch of `test`,
/// each holding the members that the test sends to that branch.
fn restrict(
    set: &ExampleSet,
    members: &MembershipSet,
    column: &Column,
    test: &Test,
) -> Vec<MembershipSet>
{
    (0..column.n_branches())
        .map(|k| members.filter(|i| test.branch(set, i) == k))
        .collect()
}
