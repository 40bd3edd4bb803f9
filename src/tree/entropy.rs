//! Entropy-based split selection.
use crate::sample::{AttributeKind, Column, ExampleSet, MembershipSet};
use crate::error::{Result, TreeError};


/// The winning test found by [`best_split`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Split {
    /// Index of the attribute to test.
    pub attribute: usize,
    /// Information gain of the test, always positive.
    pub gain: f64,
    /// The threshold of a continuous test,
    /// `None` for binary and discrete tests.
    pub threshold: Option<f64>,
}


/// Binary entropy of a group with `n_positive` positive and
/// `n_negative` negative examples.
/// A pure or empty group has entropy `0`.
#[inline]
pub fn entropy(n_positive: usize, n_negative: usize) -> f64 {
    if n_positive == 0 || n_negative == 0 {
        return 0.0;
    }

    let total = (n_positive + n_negative) as f64;
    let p = n_positive as f64 / total;
    let n = n_negative as f64 / total;

    -(p * p.log2()) - n * n.log2()
}


/// Weighted entropy of disjoint groups of `(n_positive, n_negative)`
/// that together hold `n_members` examples.
/// Empty groups contribute nothing.
#[inline]
pub fn partial_entropy<I>(groups: I, n_members: usize) -> f64
    where I: IntoIterator<Item = (usize, usize)>
{
    if n_members == 0 {
        return 0.0;
    }

    let weighted = groups.into_iter()
        .map(|(p, n)| (p + n) as f64 * entropy(p, n))
        .sum::<f64>();

    weighted / n_members as f64
}


/// Find the attribute with the greatest information gain
/// on the examples in `members`.
///
/// Attributes are scanned in ascending order and only a strictly greater
/// gain replaces the current best, so ties keep the first attribute.
/// Returns `Ok(None)` if no attribute has a positive gain.
pub fn best_split(set: &ExampleSet, members: &MembershipSet)
    -> Result<Option<Split>>
{
    let kind = set.kind(0);
    if kind != AttributeKind::Binary {
        return Err(TreeError::TargetNotBinary { kind });
    }

    let n_members = members.count_set();
    if n_members == 0 {
        return Ok(None);
    }


    let (n_positive, n_negative) = set.count_labels(members);
    let base = entropy(n_positive, n_negative);


    let mut best: Option<Split> = None;
    let mut max_gain = 0.0;
    for attribute in 1..set.n_attributes() {
        let (partial, threshold) = match set.column(attribute) {
            Column::Binary(bits) => {
                let groups = count_groups(set, members, 2, |i| {
                    bits.contains(i) as usize
                });
                (partial_entropy(groups, n_members), None)
            },
            Column::Discrete { codes, labels } => {
                let groups = count_groups(
                    set, members, labels.len(), |i| codes[i]
                );
                (partial_entropy(groups, n_members), None)
            },
            Column::Continuous(values) => {
                match best_threshold(set, members, values) {
                    Some((partial, threshold)) => (partial, Some(threshold)),
                    // Every member shares the same value.
                    None => continue,
                }
            },
        };


        let gain = base - partial;
        tracing::trace!(attribute, gain, "considered attribute");
        if gain > max_gain {
            max_gain = gain;
            best = Some(Split { attribute, gain, threshold });
        }
    }

    Ok(best)
}


/// Count the positive and negative members falling in each of
/// `n_groups` groups, where `group_of` maps an example to its group.
fn count_groups<F>(
    set: &ExampleSet,
    members: &MembershipSet,
    n_groups: usize,
    group_of: F,
) -> Vec<(usize, usize)>
    where F: Fn(usize) -> usize
{
    let mut groups = vec![(0_usize, 0_usize); n_groups];
    for i in members.iter() {
        let group = &mut groups[group_of(i)];
        if set.label(i) {
            group.0 += 1;
        } else {
            group.1 += 1;
        }
    }
    groups
}


/// Scan the sorted values of the members once and return the
/// smallest two-sided partial entropy with its threshold.
/// Only boundaries between different adjacent values are candidates;
/// the threshold is the midpoint of the two values.
/// Among equal entropies the smallest threshold wins.
fn best_threshold(
    set: &ExampleSet,
    members: &MembershipSet,
    values: &[f64],
) -> Option<(f64, f64)>
{
    let mut pairs = members.iter()
        .map(|i| (values[i], set.label(i)))
        .collect::<Vec<_>>();
    pairs.sort_by(|a, b| a.0.total_cmp(&b.0));


    let n_members = pairs.len();
    let (mut right_pos, mut right_neg) = pairs.iter()
        .fold((0, 0), |(p, n), &(_, y)| if y { (p + 1, n) } else { (p, n + 1) });
    let (mut left_pos, mut left_neg) = (0_usize, 0_usize);


    let mut best: Option<(f64, f64)> = None;
    for window in pairs.windows(2) {
        let (value, label) = window[0];
        let next = window[1].0;
        if label {
            left_pos += 1;
            right_pos -= 1;
        } else {
            left_neg += 1;
            right_neg -= 1;
        }

        if value == next { continue; }

        let partial = partial_entropy(
            [(left_pos, left_neg), (right_pos, right_neg)], n_members
        );
        if best.map_or(true, |(min, _)| partial < min) {
            best = Some((partial, (value + next) / 2.0));
        }
    }

    best
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_entropy_of_pure_groups_is_zero() {
        assert_eq!(partial_entropy([(3, 0), (0, 5)], 8), 0.0);
        assert_eq!(partial_entropy([(0, 0), (2, 0)], 2), 0.0);
    }


    #[test]
    fn even_groups_keep_full_entropy() {
        let partial = partial_entropy([(2, 2), (2, 2)], 8);
        assert!((partial - 1.0).abs() < 1e-12);
    }
}
