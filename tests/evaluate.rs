use reptree::prelude::*;


// Toy example: `f1` decides the class, `f2` is noise.
const CORRELATED: &str = "\
3 8
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
";


fn grown() -> (ExampleSet, DecisionTree) {
    let set = SsvReader::parse_str(CORRELATED).unwrap();
    let tree = DecisionTreeBuilder::new()
        .build(&set, &set.all())
        .unwrap()
        .unwrap();
    (set, tree)
}


#[test]
fn full_tree_classifies_every_example() {
    let (set, tree) = grown();
    let evaluator = Evaluator::new();

    for i in 0..set.n_examples() {
        assert_eq!(evaluator.classify(tree.root(), &set, i, None), set.label(i));
        assert!(evaluator.is_correct(tree.root(), &set, i, None));
        assert_eq!(tree.predict(&set, i), set.label(i));
    }
    assert_eq!(evaluator.accuracy(tree.root(), &set, &set.all()), 1.0);
}


#[test]
fn depth_zero_predicts_from_the_root_counts() {
    let (set, tree) = grown();

    // The root holds 4 positive and 4 negative examples:
    // with the default prior the tie goes to the positive class.
    let confusion = Evaluator::new()
        .confusion(tree.root(), &set, &set.all(), Some(0));
    assert_eq!(
        confusion,
        Confusion {
            n_positive: 4,
            n_negative: 4,
            false_positives: 4,
            false_negatives: 0,
        }
    );
    assert_eq!(confusion.n_members(), 8);
    assert_eq!(confusion.n_errors(), 4);
    assert_eq!(confusion.accuracy(), 0.5);

    let confusion = Evaluator::new()
        .positive_prior(0.75)
        .confusion(tree.root(), &set, &set.all(), Some(0));
    assert_eq!(confusion.false_positives, 0);
    assert_eq!(confusion.false_negatives, 4);

    let evaluator = Evaluator::new();
    assert_eq!(evaluator.accuracy_at_depth(tree.root(), &set, &set.all(), 0), 0.5);
    assert_eq!(evaluator.accuracy_at_depth(tree.root(), &set, &set.all(), 1), 1.0);
    assert_eq!(evaluator.accuracy_at_depth(tree.root(), &set, &set.all(), 9), 1.0);
}


#[test]
fn accuracy_only_counts_members() {
    let (set, tree) = grown();
    let members = MembershipSet::from_indices(8, [0, 7]);
    let evaluator = Evaluator::new();

    assert_eq!(evaluator.accuracy(tree.root(), &set, &members), 1.0);
    assert_eq!(
        evaluator.confusion(tree.root(), &set, &members, None).n_members(),
        2
    );
}


#[test]
fn empty_subset_has_zero_accuracy() {
    let (set, tree) = grown();
    let empty = MembershipSet::new(set.n_examples());

    assert_eq!(Evaluator::new().accuracy(tree.root(), &set, &empty), 0.0);
}


#[test]
fn errors_are_split_by_true_label() {
    // A hand-made stump that calls every `f2 == 1` example positive.
    let set = SsvReader::parse_str(CORRELATED).unwrap();
    let stump = Node::branch(
        4, 4,
        Test::Binary(2),
        vec![Node::leaf(0, 4), Node::leaf(4, 0)],
    );

    let confusion = Evaluator::new()
        .confusion(&stump, &set, &set.all(), None);
    assert_eq!(confusion.false_positives, 2);
    assert_eq!(confusion.false_negatives, 2);
    assert_eq!(confusion.accuracy(), 0.5);
}


#[test]
fn profile_grows_one_level_at_a_time() {
    let (set, tree) = grown();
    let train = MembershipSet::range(8, 0..8);
    let profile = DepthProfile::compute(
        &tree, &set, &train, None, &Evaluator::new()
    );

    let rows = profile.rows();
    assert_eq!(rows.len(), 2);
    assert_eq!((rows[0].depth, rows[0].n_nodes), (1, 1));
    assert_eq!(rows[0].train_accuracy, 0.5);
    assert_eq!((rows[1].depth, rows[1].n_nodes), (2, 3));
    assert_eq!(rows[1].train_accuracy, 1.0);
    assert_eq!(rows[1].test_accuracy, None);

    assert_eq!(profile.last().n_nodes, 3);
    assert_eq!(profile.last().train_accuracy, 1.0);

    let text = profile.to_string();
    assert!(text.contains("1\t1\t50.0\n"));
    assert!(text.contains("FINAL\t3\t100.0\n"));
}


#[test]
fn profile_reports_test_accuracy() {
    let (set, tree) = grown();
    let train = MembershipSet::range(8, 0..6);
    let test = MembershipSet::range(8, 6..8);
    let profile = DepthProfile::compute(
        &tree, &set, &train, Some(&test), &Evaluator::new()
    );

    // Both test examples are negative.
    assert_eq!(profile.rows()[0].test_accuracy, Some(0.0));
    assert_eq!(profile.last().test_accuracy, Some(1.0));
}
