use rand::prelude::*;
use colored::Colorize;

use super::example_set::ExampleSet;
use super::membership::MembershipSet;
use crate::error::{Result, TreeError};


/// Default seed for shuffling.
pub const DEFAULT_SEED: u64 = 1234;
const FRACTION_TOLERANCE: f64 = 1e-8;
const WIDTH: usize = 6;


/// Disjoint training, pruning and test subsets of one [`ExampleSet`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partition {
    /// Examples used to grow the tree.
    pub train: MembershipSet,
    /// Examples used to post-prune the tree.
    pub prune: MembershipSet,
    /// Examples held out for testing.
    pub test: MembershipSet,
}


impl Partition {
    /// Construct a partition of `n_train + n_prune + n_test` examples
    /// made of three consecutive ranges, in this order.
    pub fn stacked(n_train: usize, n_prune: usize, n_test: usize) -> Self {
        let n_examples = n_train + n_prune + n_test;
        let train = MembershipSet::range(n_examples, 0..n_train);
        let prune = MembershipSet::range(
            n_examples, n_train..n_train + n_prune
        );
        let test = MembershipSet::range(
            n_examples, n_train + n_prune..n_examples
        );

        Self { train, prune, test }
    }


    /// Merge separately loaded training, pruning and test sets
    /// into one [`ExampleSet`] and return it with the matching partition.
    /// Missing pruning/test sets yield empty subsets.
    pub fn from_parts(
        train: &ExampleSet,
        prune: Option<&ExampleSet>,
        test: Option<&ExampleSet>,
    ) -> Result<(ExampleSet, Self)>
    {
        let mut merged = train.clone();
        let n_train = train.n_examples();
        let mut n_prune = 0;
        let mut n_test = 0;

        if let Some(prune) = prune {
            merged = merged.merge(prune)?;
            n_prune = prune.n_examples();
        }
        if let Some(test) = test {
            merged = merged.merge(test)?;
            n_test = test.n_examples();
        }

        Ok((merged, Self::stacked(n_train, n_prune, n_test)))
    }


    /// Returns the number of examples in each subset
    /// as `(train, prune, test)`.
    pub fn sizes(&self) -> (usize, usize, usize) {
        (
            self.train.count_set(),
            self.prune.count_set(),
            self.test.count_set(),
        )
    }
}


/// A struct that splits the examples into
/// training/pruning/test subsets at random.
///
/// # Example
/// ```no_run
/// use reptree::Partitioner;
/// let partition = Partitioner::new(0.6, 0.2, 0.2)
///     .unwrap()
///     .seed(777)
///     .split(100);
/// ```
#[derive(Debug, Clone)]
pub struct Partitioner {
    train: f64,
    prune: f64,
    test: f64,
    seed: u64,
    verbose: bool,
}


impl Partitioner {
    /// Construct a new `Partitioner` from the fraction of examples
    /// assigned to each subset.
    /// Every fraction must lie in `[0, 1]`, the training fraction must be
    /// positive, and the fractions must not sum to more than `1`.
    pub fn new(train: f64, prune: f64, test: f64) -> Result<Self> {
        let in_unit = |x: f64| (0f64..=1f64).contains(&x);
        if !(train > 0f64 && in_unit(train) && in_unit(prune) && in_unit(test)) {
            return Err(TreeError::InvalidPartition(format!(
                "fractions must lie in [0, 1] with a positive training part, \
                 got {train}/{prune}/{test}"
            )));
        }
        if train + prune + test > 1f64 + FRACTION_TOLERANCE {
            return Err(TreeError::InvalidPartition(format!(
                "fractions sum to {} > 1", train + prune + test
            )));
        }

        Ok(Self { train, prune, test, seed: DEFAULT_SEED, verbose: false })
    }


    /// Set the seed of the randomness for shuffling.
    /// Default value is `1234`.
    #[inline]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }


    /// Set the verbose parameter.
    /// If `true`, `Partitioner` prints the subset sizes.
    /// Default value is `false`.
    #[inline]
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }


    /// Split `n_examples` examples.
    /// Training examples are drawn first, then test, then pruning
    /// examples, each subset receiving `round(n_examples * fraction)`
    /// examples or whatever remains.
    pub fn split(&self, n_examples: usize) -> Partition {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut ix = (0..n_examples).collect::<Vec<_>>();
        ix.shuffle(&mut rng);


        let n = n_examples as f64;
        let mut rest = &ix[..];
        let mut take = |fraction: f64| {
            let size = ((n * fraction).round() as usize).min(rest.len());
            let (head, tail) = rest.split_at(size);
            rest = tail;
            MembershipSet::from_indices(n_examples, head.iter().copied())
        };
        let train = take(self.train);
        let test = take(self.test);
        let prune = take(self.prune);
        let partition = Partition { train, prune, test };


        let (n_train, n_prune, n_test) = partition.sizes();
        tracing::debug!(
            seed = self.seed, n_train, n_prune, n_test,
            "partitioned examples"
        );
        if self.verbose {
            println!(
                "{}    {}    {}",
                format!("[TRAIN {n_train:>WIDTH$}]").bold().green(),
                format!("[PRUNE {n_prune:>WIDTH$}]").bold().blue(),
                format!("[TEST {n_test:>WIDTH$}]").bold().yellow(),
            );
        }

        partition
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_fractions_are_rejected() {
        assert!(Partitioner::new(0.0, 0.5, 0.5).is_err());
        assert!(Partitioner::new(0.7, 0.3, 0.1).is_err());
        assert!(Partitioner::new(0.5, -0.1, 0.1).is_err());
        assert!(Partitioner::new(0.5, 0.25, 0.25).is_ok());
    }


    #[test]
    fn stacked_ranges_are_consecutive() {
        let partition = Partition::stacked(3, 2, 1);
        assert_eq!(partition.train.iter().collect::<Vec<_>>(), vec![0, 1, 2]);
        assert_eq!(partition.prune.iter().collect::<Vec<_>>(), vec![3, 4]);
        assert_eq!(partition.test.iter().collect::<Vec<_>>(), vec![5]);
    }
}
