//! Defines the inner representation
//! of the decision tree.
use serde::{Serialize, Deserialize};

use crate::sample::{ExampleSet, Value};


/// The test carried by a branch node.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Test {
    /// Branch on a binary attribute: `0` goes to child `0`,
    /// `1` goes to child `1`.
    Binary(usize),


    /// Branch on a discrete attribute:
    /// the `k`-th label goes to child `k`.
    Discrete(usize),


    /// Branch on a continuous attribute:
    /// `value < threshold` goes to child `0`, otherwise to child `1`.
    Continuous {
        /// Index of the tested attribute.
        attribute: usize,
        /// Splitting threshold.
        threshold: f64,
    },
}


impl Test {
    /// Returns the index of the tested attribute.
    #[inline]
    pub fn attribute(&self) -> usize {
        match self {
            Self::Binary(attribute)
                | Self::Discrete(attribute)
                | Self::Continuous { attribute, .. } => *attribute,
        }
    }


    /// Returns the threshold of a continuous test.
    #[inline]
    pub fn threshold(&self) -> Option<f64> {
        match self {
            Self::Continuous { threshold, .. } => Some(*threshold),
            _ => None,
        }
    }


    /// Returns the index of the child that the `example`-th example
    /// of `set` is sent to.
    ///
    /// This method panics if the attribute kind of `set`
    /// does not match the test.
    #[inline]
    pub fn branch(&self, set: &ExampleSet, example: usize) -> usize {
        let value = set.column(self.attribute()).read(example);
        match (self, value) {
            (Self::Binary(_), Value::Binary(bit)) => bit as usize,
            (Self::Discrete(_), Value::Discrete(code)) => code,
            (Self::Continuous { threshold, .. }, Value::Continuous(v)) => {
                if v < *threshold { 0 } else { 1 }
            },
            (test, value) => {
                panic!(
                    "The test on attribute {} does not accept a {} value",
                    test.attribute(),
                    value.kind(),
                );
            },
        }
    }
}


/// Enumeration of branch and leaf nodes.
/// A node owns its children.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Node {
    /// A node that predicts from its class counts.
    Leaf {
        /// Number of training examples that reached this node.
        n_members: usize,
        /// Number of positive training examples among them.
        n_positive: usize,
        /// Number of negative training examples among them.
        n_negative: usize,
    },


    /// A node that sends each example to one of its children.
    Branch {
        /// Number of training examples that reached this node.
        n_members: usize,
        /// Number of positive training examples among them.
        n_positive: usize,
        /// Number of negative training examples among them.
        n_negative: usize,
        /// The test that selects a child.
        test: Test,
        /// `2` children for binary and continuous tests,
        /// one child per label for discrete tests.
        children: Vec<Node>,
    },
}


impl Node {
    /// Construct a leaf from its class counts.
    #[inline]
    pub fn leaf(n_positive: usize, n_negative: usize) -> Self {
        Self::Leaf {
            n_members: n_positive + n_negative,
            n_positive,
            n_negative,
        }
    }


    /// Construct a branch from its class counts, test and children.
    #[inline]
    pub fn branch(
        n_positive: usize,
        n_negative: usize,
        test: Test,
        children: Vec<Node>,
    ) -> Self
    {
        Self::Branch {
            n_members: n_positive + n_negative,
            n_positive,
            n_negative,
            test,
            children,
        }
    }


    /// Returns `true` if this node is a leaf.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf { .. })
    }


    /// Returns the test of a branch node.
    #[inline]
    pub fn test(&self) -> Option<&Test> {
        match self {
            Self::Branch { test, .. } => Some(test),
            Self::Leaf { .. } => None,
        }
    }


    /// Returns the tested attribute of a branch node.
    #[inline]
    pub fn test_attribute(&self) -> Option<usize> {
        self.test().map(Test::attribute)
    }


    /// Returns the threshold of a continuous branch node.
    #[inline]
    pub fn threshold(&self) -> Option<f64> {
        self.test().and_then(Test::threshold)
    }


    /// Returns the children of this node.
    /// A leaf has no child.
    #[inline]
    pub fn children(&self) -> &[Node] {
        match self {
            Self::Branch { children, .. } => &children[..],
            Self::Leaf { .. } => &[],
        }
    }


    /// Number of training examples that reached this node.
    #[inline]
    pub fn n_members(&self) -> usize {
        match self {
            Self::Leaf { n_members, .. }
                | Self::Branch { n_members, .. } => *n_members,
        }
    }


    /// Number of positive training examples that reached this node.
    #[inline]
    pub fn n_positive(&self) -> usize {
        match self {
            Self::Leaf { n_positive, .. }
                | Self::Branch { n_positive, .. } => *n_positive,
        }
    }


    /// Number of negative training examples that reached this node.
    #[inline]
    pub fn n_negative(&self) -> usize {
        match self {
            Self::Leaf { n_negative, .. }
                | Self::Branch { n_negative, .. } => *n_negative,
        }
    }


    /// Recompute the class counts bottom-up.
    /// A leaf keeps its counts; a branch stores the sums over its children.
    /// Returns the pair `(n_positive, n_negative)` of this node.
    pub fn refresh_counts(&mut self) -> (usize, usize) {
        match self {
            Self::Leaf { n_positive, n_negative, .. } => {
                (*n_positive, *n_negative)
            },
            Self::Branch {
                n_members, n_positive, n_negative, children, ..
            } => {
                let (p, n) = children.iter_mut()
                    .map(Node::refresh_counts)
                    .fold((0, 0), |(p, n), (cp, cn)| (p + cp, n + cn));
                *n_positive = p;
                *n_negative = n;
                *n_members = p + n;
                (p, n)
            },
        }
    }


    /// Returns a leaf carrying the counts of this node.
    #[inline]
    pub(crate) fn as_leaf(&self) -> Self {
        Self::leaf(self.n_positive(), self.n_negative())
    }


    /// Returns the number of nodes in this subtree.
    pub fn count_nodes(&self) -> usize {
        1 + self.children()
            .iter()
            .map(Node::count_nodes)
            .sum::<usize>()
    }


    /// Returns the number of nodes within the first `depth` levels
    /// of this subtree. `depth = 1` counts this node only.
    pub fn count_nodes_to_depth(&self, depth: usize) -> usize {
        match depth {
            0 => 0,
            1 => 1,
            _ => {
                1 + self.children()
                    .iter()
                    .map(|child| child.count_nodes_to_depth(depth - 1))
                    .sum::<usize>()
            },
        }
    }


    /// Returns the number of levels of this subtree.
    /// A single leaf has depth `1`.
    pub fn depth(&self) -> usize {
        1 + self.children()
            .iter()
            .map(Node::depth)
            .max()
            .unwrap_or(0)
    }


    /// Returns the number of leaves in this subtree.
    pub fn count_leaves(&self) -> usize {
        match self {
            Self::Leaf { .. } => 1,
            Self::Branch { children, .. } => {
                children.iter().map(Node::count_leaves).sum()
            },
        }
    }


    /// Returns the node reached by following `path`,
    /// a sequence of child indices from this node.
    pub(crate) fn descendant(&self, path: &[usize]) -> &Node {
        path.iter()
            .fold(self, |node, &k| &node.children()[k])
    }


    /// Mutable version of [`Node::descendant`].
    pub(crate) fn descendant_mut(&mut self, path: &[usize]) -> &mut Node {
        let mut node = self;
        for &k in path {
            node = match node {
                Self::Branch { children, .. } => &mut children[k],
                Self::Leaf { .. } => {
                    panic!("A leaf has no child to descend into");
                },
            };
        }
        node
    }


    pub(super) fn to_dot_info(&self, set: &ExampleSet, id: usize)
        -> (Vec<String>, usize)
    {
        match self {
            Self::Branch { test, children, .. } => {
                let name = set.name(test.attribute());
                let label = match test {
                    Test::Binary(_) => format!("{name} ?"),
                    Test::Discrete(_) => format!("{name} = ?"),
                    Test::Continuous { threshold, .. } => {
                        format!("{name} < {threshold:.2} ?")
                    },
                };
                let mut info = vec![
                    format!("\tnode_{id} [ label = \"{label}\" ];\n")
                ];


                let mut next_id = id + 1;
                for (k, child) in children.iter().enumerate() {
                    let child_id = next_id;
                    let (mut child_info, ret_id) = child.to_dot_info(
                        set, child_id
                    );
                    info.append(&mut child_info);
                    next_id = ret_id;

                    let edge = edge_label(set, test, k);
                    info.push(format!(
                        "\tnode_{id} -- node_{child_id} [ label = \"{edge}\" ];\n"
                    ));
                }

                (info, next_id)
            },
            Self::Leaf { n_positive, n_negative, .. } => {
                let info = format!(
                    "\tnode_{id} [ \
                     label = \"+{n_positive} / -{n_negative}\", \
                     shape = box, \
                     ];\n",
                );

                (vec![info], id + 1)
            },
        }
    }
}


/// Text describing the `k`-th outcome of `test`.
pub(crate) fn edge_label(set: &ExampleSet, test: &Test, k: usize) -> String {
    match test {
        Test::Binary(_) => format!("{k}"),
        Test::Discrete(attribute) => {
            set.column(*attribute)
                .labels()
                .and_then(|labels| labels.get(k))
                .cloned()
                .unwrap_or_else(|| format!("#{k}"))
        },
        Test::Continuous { .. } => {
            if k == 0 { "Yes".into() } else { "No".into() }
        },
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tree() -> Node {
        let left = Node::leaf(3, 1);
        let right = Node::branch(
            1, 3,
            Test::Continuous { attribute: 2, threshold: 0.5 },
            vec![Node::leaf(1, 0), Node::leaf(0, 3)],
        );
        Node::branch(4, 4, Test::Binary(1), vec![left, right])
    }


    #[test]
    fn counts_nodes_per_depth() {
        let tree = sample_tree();
        assert_eq!(tree.count_nodes(), 5);
        assert_eq!(tree.count_nodes_to_depth(1), 1);
        assert_eq!(tree.count_nodes_to_depth(2), 3);
        assert_eq!(tree.count_nodes_to_depth(3), 5);
        assert_eq!(tree.count_nodes_to_depth(9), 5);
        assert_eq!(tree.depth(), 3);
        assert_eq!(tree.count_leaves(), 3);
    }


    #[test]
    fn refresh_sums_children() {
        let mut tree = sample_tree();
        if let Node::Branch { n_positive, n_negative, .. } = &mut tree {
            *n_positive = 0;
            *n_negative = 0;
        }
        assert_eq!(tree.refresh_counts(), (4, 4));
        assert_eq!(tree.n_members(), 8);
    }


    #[test]
    fn paths_reach_descendants() {
        let mut tree = sample_tree();
        assert_eq!(tree.descendant(&[1, 1]), &Node::leaf(0, 3));

        *tree.descendant_mut(&[1]) = Node::leaf(1, 3);
        assert_eq!(tree.count_nodes(), 3);
        assert_eq!(tree.threshold(), None);
        assert_eq!(tree.test_attribute(), Some(1));
    }
}
