//! Text reports on a grown tree.
use crate::sample::{ExampleSet, MembershipSet};
use crate::tree::{DecisionTree, Evaluator, Node, Test};
use crate::tree::node::edge_label;

use std::fmt;


const INDENT: usize = 4;
const RULE: &str = "-------------------------------";


/// One row of a [`DepthProfile`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DepthRow {
    /// Number of levels kept, `1` being the root alone.
    pub depth: usize,
    /// Number of nodes within `depth` levels.
    pub n_nodes: usize,
    /// Accuracy on the training subset.
    pub train_accuracy: f64,
    /// Accuracy on the test subset, if there is one.
    pub test_accuracy: Option<f64>,
}


/// Accuracy of a tree cut at increasing depths.
///
/// Rows are computed for depth `1, 2, ...` until the node count
/// stops growing; the final row describes the whole tree.
#[derive(Debug, Clone, PartialEq)]
pub struct DepthProfile {
    rows: Vec<DepthRow>,
    last: DepthRow,
}


impl DepthProfile {
    /// Compute the profile of `tree` on the training and test subsets.
    /// An empty `test` subset is treated as missing.
    pub fn compute(
        tree: &DecisionTree,
        set: &ExampleSet,
        train: &MembershipSet,
        test: Option<&MembershipSet>,
        evaluator: &Evaluator,
    ) -> Self
    {
        let test = test.filter(|t| !t.is_empty());
        let root = tree.root();
        let row_at = |depth: usize, n_nodes: usize| {
            let max_depth = depth - 1;
            DepthRow {
                depth,
                n_nodes,
                train_accuracy: evaluator.accuracy_at_depth(
                    root, set, train, max_depth
                ),
                test_accuracy: test.map(|t| {
                    evaluator.accuracy_at_depth(root, set, t, max_depth)
                }),
            }
        };


        // The root alone.
        let mut last = row_at(1, 1);
        let mut rows = vec![last];
        let mut prev_count = 1;
        let mut depth = 2;
        let mut count = tree.n_nodes_to_depth(depth);
        while count != prev_count {
            last = row_at(depth, count);
            rows.push(last);
            prev_count = count;
            depth += 1;
            count = tree.n_nodes_to_depth(depth);
        }
        last.n_nodes = count;

        Self { rows, last }
    }


    /// Returns the per-depth rows.
    pub fn rows(&self) -> &[DepthRow] {
        &self.rows[..]
    }


    /// Returns the row for the whole tree.
    pub fn last(&self) -> &DepthRow {
        &self.last
    }
}


impl fmt::Display for DepthProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{RULE}")?;
        writeln!(f, "Max\t# of\tCorrect\tCorrect")?;
        writeln!(f, "depth\tnodes\ttrain %\ttest %")?;
        writeln!(f, "{RULE}")?;
        for row in &self.rows {
            write_row(f, &row.depth.to_string(), row)?;
        }
        writeln!(f, "{RULE}")?;
        write_row(f, "FINAL", &self.last)?;
        writeln!(f, "{RULE}")
    }
}


fn write_row(f: &mut fmt::Formatter<'_>, head: &str, row: &DepthRow)
    -> fmt::Result
{
    write!(
        f, "{head}\t{}\t{:.1}", row.n_nodes, 100.0 * row.train_accuracy
    )?;
    if let Some(test) = row.test_accuracy {
        write!(f, "\t{:.1}", 100.0 * test)?;
    }
    writeln!(f)
}


/// Indented printout of a tree structure.
/// Built by [`DecisionTree::display`].
pub struct TreeDisplay<'a> {
    tree: &'a DecisionTree,
    set: &'a ExampleSet,
}


impl<'a> TreeDisplay<'a> {
    pub(crate) fn new(tree: &'a DecisionTree, set: &'a ExampleSet) -> Self {
        Self { tree, set }
    }


    fn write_node(&self, f: &mut fmt::Formatter<'_>, node: &Node, indent: usize)
        -> fmt::Result
    {
        let target = self.set.name(0);
        let (test, children) = match node {
            Node::Leaf { n_positive, n_negative, .. } => {
                writeln!(f, "{:indent$}{target} == NO : {n_negative}", "")?;
                return writeln!(
                    f, "{:indent$}{target} == YES : {n_positive}", ""
                );
            },
            Node::Branch { test, children, .. } => (test, children),
        };


        let name = self.set.name(test.attribute());
        for (k, child) in children.iter().enumerate() {
            match test {
                Test::Binary(_) => {
                    writeln!(f, "{:indent$}{name} : {k}", "")?;
                },
                Test::Discrete(_) => {
                    let label = edge_label(self.set, test, k);
                    writeln!(f, "{:indent$}{name} == \"{label}\"", "")?;
                },
                Test::Continuous { threshold, .. } => {
                    let op = if k == 0 { "<" } else { ">=" };
                    writeln!(f, "{:indent$}{name} {op} {threshold}", "")?;
                },
            }
            self.write_node(f, child, indent + INDENT)?;
        }
        Ok(())
    }
}


impl fmt::Display for TreeDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_node(f, self.tree.root(), 0)
    }
}


/// One rule per root-to-leaf path, with the class counts of the leaf.
/// Built by [`DecisionTree::display_paths`].
///
/// ```text
/// ( outlook == "sunny" ) ? ( windy == 0 ) ? play: YES 2, NO 0
/// ```
pub struct PathDisplay<'a> {
    tree: &'a DecisionTree,
    set: &'a ExampleSet,
}


impl<'a> PathDisplay<'a> {
    pub(crate) fn new(tree: &'a DecisionTree, set: &'a ExampleSet) -> Self {
        Self { tree, set }
    }


    fn write_paths(
        &self,
        f: &mut fmt::Formatter<'_>,
        node: &Node,
        prefix: &mut String,
    ) -> fmt::Result
    {
        let (test, children) = match node {
            Node::Leaf { n_positive, n_negative, .. } => {
                let target = self.set.name(0);
                return writeln!(
                    f, "{prefix}{target}: YES {n_positive}, NO {n_negative}"
                );
            },
            Node::Branch { test, children, .. } => (test, children),
        };


        let name = self.set.name(test.attribute());
        let len = prefix.len();
        for (k, child) in children.iter().enumerate() {
            let condition = match test {
                Test::Binary(_) => format!("{name} == {k}"),
                Test::Discrete(_) => {
                    format!("{name} == \"{}\"", edge_label(self.set, test, k))
                },
                Test::Continuous { threshold, .. } => {
                    let op = if k == 0 { "<" } else { ">=" };
                    format!("{name} {op} {threshold}")
                },
            };
            prefix.push_str(&format!("( {condition} ) ? "));
            self.write_paths(f, child, prefix)?;
            prefix.truncate(len);
        }
        Ok(())
    }
}


impl fmt::Display for PathDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut prefix = String::new();
        self.write_paths(f, self.tree.root(), &mut prefix)
    }
}
