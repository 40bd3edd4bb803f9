//! Defines the decision tree.
use serde::{Serialize, Deserialize};

use crate::sample::ExampleSet;
use crate::error::Result;
use crate::report::{PathDisplay, TreeDisplay};
use super::node::*;
use super::evaluate::Evaluator;

use std::path::Path;
use std::fs::File;
use std::io::{BufReader, BufWriter, prelude::*};


/// Decision tree for binary classification.
/// This struct is just a wrapper of the root [`Node`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionTree {
    root: Node,
}


impl From<Node> for DecisionTree {
    #[inline]
    fn from(root: Node) -> Self {
        Self { root }
    }
}


impl DecisionTree {
    /// Returns the root node.
    #[inline]
    pub fn root(&self) -> &Node {
        &self.root
    }


    #[inline]
    pub(crate) fn root_mut(&mut self) -> &mut Node {
        &mut self.root
    }


    /// Returns the number of nodes.
    #[inline]
    pub fn n_nodes(&self) -> usize {
        self.root.count_nodes()
    }


    /// Returns the number of nodes in the first `depth` levels.
    #[inline]
    pub fn n_nodes_to_depth(&self, depth: usize) -> usize {
        self.root.count_nodes_to_depth(depth)
    }


    /// Returns the number of levels; a single leaf has depth `1`.
    #[inline]
    pub fn depth(&self) -> usize {
        self.root.depth()
    }


    /// Returns the number of leaves.
    #[inline]
    pub fn n_leaves(&self) -> usize {
        self.root.count_leaves()
    }


    /// Predict the label of the `example`-th example of `set`
    /// with the default [`Evaluator`].
    #[inline]
    pub fn predict(&self, set: &ExampleSet, example: usize) -> bool {
        Evaluator::default().classify(&self.root, set, example, None)
    }


    /// Returns a value that prints the tree structure,
    /// naming attributes after `set`.
    #[inline]
    pub fn display<'a>(&'a self, set: &'a ExampleSet) -> TreeDisplay<'a> {
        TreeDisplay::new(self, set)
    }


    /// Returns a value that prints one rule per root-to-leaf path.
    #[inline]
    pub fn display_paths<'a>(&'a self, set: &'a ExampleSet) -> PathDisplay<'a> {
        PathDisplay::new(self, set)
    }


    /// Write the current decision tree to dot file.
    /// Attribute names and discrete labels are taken from `set`.
    pub fn to_dot_file<P>(&self, set: &ExampleSet, path: P) -> Result<()>
        where P: AsRef<Path>
    {
        let mut f = BufWriter::new(File::create(path)?);
        f.write_all(b"graph DecisionTree {\n")?;


        let info = self.root.to_dot_info(set, 0).0;
        for row in info {
            f.write_all(row.as_bytes())?;
        }

        f.write_all(b"}\n")?;
        f.flush()?;

        Ok(())
    }


    /// Serialize the tree to a JSON file.
    pub fn to_json_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let f = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(f, self)?;
        Ok(())
    }


    /// Load a tree written by [`DecisionTree::to_json_file`].
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let f = BufReader::new(File::open(path)?);
        let tree = serde_json::from_reader(f)?;
        Ok(tree)
    }
}
