//! Classification through a tree and accuracy measurement.
use crate::sample::{ExampleSet, MembershipSet};
use super::node::Node;


/// The positive prior set as default.
pub const DEFAULT_POSITIVE_PRIOR: f64 = 0.5;


/// Error counts of a tree over a subset of examples.
///
/// `false_positives` counts misclassified negative examples and
/// `false_negatives` counts misclassified positive examples.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Confusion {
    /// Number of positive members.
    pub n_positive: usize,
    /// Number of negative members.
    pub n_negative: usize,
    /// Number of negative members predicted positive.
    pub false_positives: usize,
    /// Number of positive members predicted negative.
    pub false_negatives: usize,
}


impl Confusion {
    /// Returns the number of members.
    #[inline]
    pub fn n_members(&self) -> usize {
        self.n_positive + self.n_negative
    }


    /// Returns the number of misclassified members.
    #[inline]
    pub fn n_errors(&self) -> usize {
        self.false_positives + self.false_negatives
    }


    /// Returns the fraction of correctly classified members,
    /// or `0.0` if there is no member.
    #[inline]
    pub fn accuracy(&self) -> f64 {
        let n_members = self.n_members();
        if n_members == 0 {
            return 0.0;
        }
        (n_members - self.n_errors()) as f64 / n_members as f64
    }
}


/// A struct that classifies examples through a tree.
///
/// A node predicts positive iff
/// `n_positive >= positive_prior * n_members`.
#[derive(Debug, Clone, Copy)]
pub struct Evaluator {
    positive_prior: f64,
}


impl Default for Evaluator {
    fn default() -> Self {
        Self { positive_prior: DEFAULT_POSITIVE_PRIOR }
    }
}


impl Evaluator {
    /// Construct a new instance of [`Evaluator`]
    /// with `positive_prior == 0.5`.
    pub fn new() -> Self {
        Self::default()
    }


    /// Set the positive prior.
    /// Default value is `0.5`.
    #[inline]
    pub fn positive_prior(mut self, prior: f64) -> Self {
        assert!(
            (0.0..=1.0).contains(&prior),
            "The positive prior must lie in [0, 1]"
        );
        self.positive_prior = prior;
        self
    }


    /// Returns the positive prior.
    #[inline]
    pub fn prior(&self) -> f64 {
        self.positive_prior
    }


    /// Predict the label of the `example`-th example of `set`.
    /// Descends at most `max_depth` levels below `node`;
    /// `Some(0)` predicts from the counts of `node` itself
    /// and `None` descends to a leaf.
    pub fn classify(
        &self,
        node: &Node,
        set: &ExampleSet,
        example: usize,
        max_depth: Option<usize>,
    ) -> bool
    {
        let mut node = node;
        let mut remaining = max_depth;
        while let Node::Branch { test, children, .. } = node {
            if remaining == Some(0) { break; }

            node = &children[test.branch(set, example)];
            remaining = remaining.map(|d| d - 1);
        }

        self.predict_here(node)
    }


    /// Returns `true` if the prediction for the `example`-th example
    /// matches its label.
    #[inline]
    pub fn is_correct(
        &self,
        node: &Node,
        set: &ExampleSet,
        example: usize,
        max_depth: Option<usize>,
    ) -> bool
    {
        self.classify(node, set, example, max_depth) == set.label(example)
    }


    /// Count the errors over the examples in `members`.
    pub fn confusion(
        &self,
        node: &Node,
        set: &ExampleSet,
        members: &MembershipSet,
        max_depth: Option<usize>,
    ) -> Confusion
    {
        let mut confusion = Confusion::default();
        for i in members.iter() {
            let label = set.label(i);
            let correct = self.classify(node, set, i, max_depth) == label;
            match (label, correct) {
                (true, true) => confusion.n_positive += 1,
                (true, false) => {
                    confusion.n_positive += 1;
                    confusion.false_negatives += 1;
                },
                (false, true) => confusion.n_negative += 1,
                (false, false) => {
                    confusion.n_negative += 1;
                    confusion.false_positives += 1;
                },
            }
        }
        confusion
    }


    /// Returns the accuracy of the full tree below `node`
    /// on the examples in `members`; `0.0` if `members` is empty.
    #[inline]
    pub fn accuracy(
        &self,
        node: &Node,
        set: &ExampleSet,
        members: &MembershipSet,
    ) -> f64
    {
        self.confusion(node, set, members, None).accuracy()
    }


    /// Returns the accuracy of the tree cut `max_depth` levels
    /// below `node`.
    #[inline]
    pub fn accuracy_at_depth(
        &self,
        node: &Node,
        set: &ExampleSet,
        members: &MembershipSet,
        max_depth: usize,
    ) -> f64
    {
        self.confusion(node, set, members, Some(max_depth)).accuracy()
    }


    #[inline]
    fn predict_here(&self, node: &Node) -> bool {
        node.n_positive() as f64 >= self.positive_prior * node.n_members() as f64
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_confusion_has_zero_accuracy() {
        assert_eq!(Confusion::default().accuracy(), 0.0);
    }


    #[test]
    fn ties_are_predicted_positive() {
        let evaluator = Evaluator::new();
        assert!(evaluator.predict_here(&Node::leaf(2, 2)));
        assert!(!evaluator.predict_here(&Node::leaf(1, 2)));

        let strict = Evaluator::new().positive_prior(0.75);
        assert!(!strict.predict_here(&Node::leaf(2, 1)));
    }
}
