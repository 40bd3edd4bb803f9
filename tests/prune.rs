use reptree::prelude::*;

use rand::prelude::*;


// The first 8 rows teach `class == f1`;
// rows 8..12 are pruning examples.
const TRAIN_THEN_PRUNE: &str = "\
3 12
class f1 f2
bbb
1 1 0
1 1 1
1 1 0
1 1 1
0 0 0
0 0 1
0 0 0
0 0 1
# pruning rows contradict `f1`
1 0 0
1 0 1
1 0 0
0 1 1
";


fn grown(set: &ExampleSet) -> DecisionTree {
    DecisionTreeBuilder::new()
        .build(set, &MembershipSet::range(set.n_examples(), 0..8))
        .unwrap()
        .unwrap()
}


fn noisy_set(n_examples: usize, seed: u64) -> ExampleSet {
    let mut rng = StdRng::seed_from_u64(seed);

    let mut class = Vec::with_capacity(n_examples);
    let mut b = Vec::with_capacity(n_examples);
    let mut d = Vec::with_capacity(n_examples);
    let mut x = Vec::with_capacity(n_examples);
    for _ in 0..n_examples {
        let bi = rng.gen_bool(0.5);
        let di = rng.gen_range(0..4_usize);
        let xi = rng.gen_range(0.0..1.0_f64);
        let yi = (xi > 0.4) ^ rng.gen_bool(0.2);

        class.push(yi);
        b.push(bi);
        d.push(di);
        x.push(xi);
    }

    ExampleSet::new(
        ["class", "b", "d", "x"],
        vec![
            Column::binary(class),
            Column::binary(b),
            Column::discrete(d, vec!["w", "x", "y", "z"]),
            Column::continuous(x),
        ],
    ).unwrap()
}


#[test]
fn harmful_branch_is_pruned() {
    let set = SsvReader::parse_str(TRAIN_THEN_PRUNE).unwrap();
    let mut tree = grown(&set);
    assert_eq!(tree.n_nodes(), 3);

    let prune = MembershipSet::range(12, 8..12);
    let summary = Pruner::new().prune(&mut tree, &set, &prune);

    // The leaf (4, 4) predicts positive: 3 of 4 pruning rows are right.
    assert_eq!(tree.root(), &Node::leaf(4, 4));
    assert_eq!(summary.n_nodes_before, 3);
    assert_eq!(summary.n_nodes_after, 1);
    assert_eq!(summary.n_collapsed, 1);
    assert_eq!(summary.accuracy_before, 0.0);
    assert_eq!(summary.accuracy_after, 0.75);
    assert!(summary.changed());
}


#[test]
fn useful_branch_is_kept() {
    let set = SsvReader::parse_str(TRAIN_THEN_PRUNE).unwrap();
    let mut tree = grown(&set);
    let before = tree.clone();

    // Prune against examples that agree with the tree.
    let prune = MembershipSet::from_indices(12, [0, 5]);
    let summary = Pruner::new().prune(&mut tree, &set, &prune);

    assert_eq!(tree, before);
    assert_eq!(summary.n_collapsed, 0);
    assert!(!summary.changed());
}


#[test]
fn epsilon_bounds_the_required_improvement() {
    let set = SsvReader::parse_str(TRAIN_THEN_PRUNE).unwrap();
    let prune = MembershipSet::range(12, 8..12);

    // Collapsing the root gains exactly 0.75.
    let mut tree = grown(&set);
    Pruner::new().epsilon(0.8).prune(&mut tree, &set, &prune);
    assert_eq!(tree.n_nodes(), 3);

    let mut tree = grown(&set);
    Pruner::new().epsilon(0.7).prune(&mut tree, &set, &prune);
    assert_eq!(tree.n_nodes(), 1);
}


#[test]
fn empty_pruning_subset_is_a_no_op() {
    let set = noisy_set(200, 2);
    let mut tree = DecisionTreeBuilder::new()
        .build(&set, &set.all())
        .unwrap()
        .unwrap();
    let before = tree.clone();

    let empty = MembershipSet::new(set.n_examples());
    let summary = Pruner::new().prune(&mut tree, &set, &empty);

    assert_eq!(tree, before);
    assert_eq!(summary.n_nodes_before, summary.n_nodes_after);
}


#[test]
fn pruning_never_lowers_pruning_accuracy() {
    let evaluator = Evaluator::new();
    for seed in 0..5 {
        let set = noisy_set(300, seed);
        let partition = Partitioner::new(0.5, 0.3, 0.2)
            .unwrap()
            .seed(seed)
            .split(set.n_examples());
        let grown = DecisionTreeBuilder::new()
            .build(&set, &partition.train)
            .unwrap()
            .unwrap();
        let accuracy = evaluator.accuracy(grown.root(), &set, &partition.prune);

        for order in [PruneOrder::PreOrder, PruneOrder::PostOrder] {
            let mut tree = grown.clone();
            let summary = Pruner::new()
                .order(order)
                .prune(&mut tree, &set, &partition.prune);

            let after = evaluator.accuracy(tree.root(), &set, &partition.prune);
            assert!(after >= accuracy - 0.005, "{order}: {accuracy} -> {after}");
            assert_eq!(summary.accuracy_after, after);
            assert_eq!(summary.n_nodes_after, tree.n_nodes());
            assert!(tree.n_nodes() <= grown.n_nodes());
        }
    }
}


#[test]
fn re_pruning_changes_nothing() {
    for seed in 0..5 {
        let set = noisy_set(300, seed);
        let partition = Partitioner::new(0.5, 0.3, 0.2)
            .unwrap()
            .seed(seed)
            .split(set.n_examples());
        let mut tree = DecisionTreeBuilder::new()
            .build(&set, &partition.train)
            .unwrap()
            .unwrap();

        let pruner = Pruner::new().order(PruneOrder::PostOrder);
        pruner.prune(&mut tree, &set, &partition.prune);
        let once = tree.clone();

        let summary = pruner.prune(&mut tree, &set, &partition.prune);
        assert_eq!(tree, once);
        assert_eq!(summary.n_collapsed, 0);
    }
}


#[test]
fn pruned_leaves_keep_training_counts() {
    let set = noisy_set(300, 9);
    let partition = Partitioner::new(0.5, 0.3, 0.2)
        .unwrap()
        .seed(9)
        .split(set.n_examples());
    let mut tree = DecisionTreeBuilder::new()
        .build(&set, &partition.train)
        .unwrap()
        .unwrap();
    let n_train = partition.train.count_set();

    Pruner::new().prune(&mut tree, &set, &partition.prune);

    let n_members = leaf_members(tree.root());
    assert_eq!(n_members, n_train);
    assert_eq!(tree.root().n_members(), n_train);
}


fn leaf_members(node: &Node) -> usize {
    if node.is_leaf() {
        return node.n_members();
    }
    node.children()
        .iter()
        .map(leaf_members)
        .sum()
}
