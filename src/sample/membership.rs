//! Membership sets: which examples take part in a computation.
use fixedbitset::FixedBitSet;

use std::ops::Range;


/// A fixed-size bitset over example indices.
/// Bit `i` is set iff the `i`-th example is a member.
///
/// The universe size (the number of examples of the underlying
/// [`ExampleSet`](crate::ExampleSet)) never changes,
/// except through [`MembershipSet::grow`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MembershipSet {
    bits: FixedBitSet,
}


impl MembershipSet {
    /// Construct an empty set over `n_examples` examples.
    #[inline]
    pub fn new(n_examples: usize) -> Self {
        Self { bits: FixedBitSet::with_capacity(n_examples) }
    }


    /// Construct a set that contains every example.
    #[inline]
    pub fn full(n_examples: usize) -> Self {
        let mut bits = FixedBitSet::with_capacity(n_examples);
        bits.insert_range(..);
        Self { bits }
    }


    /// Construct a set whose members are the examples in `range`.
    pub fn range(n_examples: usize, range: Range<usize>) -> Self {
        assert!(
            range.end <= n_examples,
            "The range {range:?} exceeds {n_examples} examples"
        );
        let mut bits = FixedBitSet::with_capacity(n_examples);
        bits.insert_range(range);
        Self { bits }
    }


    /// Construct a set from member indices.
    pub fn from_indices<I>(n_examples: usize, indices: I) -> Self
        where I: IntoIterator<Item = usize>
    {
        let mut set = Self::new(n_examples);
        indices.into_iter()
            .for_each(|i| set.insert(i));
        set
    }


    /// Returns the number of examples this set ranges over.
    #[inline]
    pub fn n_examples(&self) -> usize {
        self.bits.len()
    }


    /// Returns `true` if the `index`-th example is a member.
    #[inline]
    pub fn get(&self, index: usize) -> bool {
        self.bits.contains(index)
    }


    /// Set the membership of the `index`-th example.
    #[inline]
    pub fn set(&mut self, index: usize, member: bool) {
        self.bits.set(index, member);
    }


    /// Add the `index`-th example.
    #[inline]
    pub fn insert(&mut self, index: usize) {
        self.bits.insert(index);
    }


    /// Remove every member.
    #[inline]
    pub fn clear(&mut self) {
        self.bits.clear();
    }


    /// Returns the number of members.
    #[inline]
    pub fn count_set(&self) -> usize {
        self.bits.count_ones(..)
    }


    /// Returns `true` if this set has no member.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bits.ones().next().is_none()
    }


    /// Copy `count` bits of `source`, starting at `source_begin`,
    /// into `self`, starting at `dest_begin`.
    pub fn copy_range(
        &mut self,
        dest_begin: usize,
        source: &MembershipSet,
        source_begin: usize,
        count: usize,
    )
    {
        for i in 0..count {
            self.set(dest_begin + i, source.get(source_begin + i));
        }
    }


    /// Enlarge the universe to `n_examples` examples.
    /// New examples are not members.
    pub fn grow(&mut self, n_examples: usize) {
        self.bits.grow(n_examples);
    }


    /// Returns the members that satisfy `predicate`.
    pub fn filter<F>(&self, mut predicate: F) -> Self
        where F: FnMut(usize) -> bool
    {
        let mut subset = Self::new(self.n_examples());
        self.iter()
            .filter(|&i| predicate(i))
            .for_each(|i| subset.insert(i));
        subset
    }


    /// Iterate over the member indices in ascending order.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.bits.ones()
    }


    /// Add every member of `other` to `self`.
    pub fn union_with(&mut self, other: &MembershipSet) {
        self.bits.union_with(&other.bits);
    }


    /// Returns `true` if `self` and `other` share no member.
    pub fn is_disjoint(&self, other: &MembershipSet) -> bool {
        self.bits.is_disjoint(&other.bits)
    }


    /// Returns `true` if every member of `self` is a member of `other`.
    pub fn is_subset(&self, other: &MembershipSet) -> bool {
        self.bits.is_subset(&other.bits)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_follow_updates() {
        let mut set = MembershipSet::new(10);
        assert!(set.is_empty());

        set.set(3, true);
        set.insert(7);
        assert_eq!(set.count_set(), 2);
        assert!(set.get(3) && set.get(7) && !set.get(4));

        set.set(3, false);
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![7]);

        set.clear();
        assert!(set.is_empty());
        assert_eq!(set.n_examples(), 10);
    }


    #[test]
    fn copy_range_moves_bits_at_an_offset() {
        let source = MembershipSet::from_indices(4, [0, 2, 3]);
        let mut dest = MembershipSet::new(8);
        dest.copy_range(4, &source, 0, 4);

        assert_eq!(dest.iter().collect::<Vec<_>>(), vec![4, 6, 7]);
    }


    #[test]
    fn full_and_range() {
        assert_eq!(MembershipSet::full(5).count_set(), 5);

        let set = MembershipSet::range(6, 2..5);
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![2, 3, 4]);
    }


    #[test]
    fn filter_keeps_only_members() {
        let set = MembershipSet::from_indices(6, [1, 2, 4]);
        let even = set.filter(|i| i % 2 == 0);
        assert_eq!(even.iter().collect::<Vec<_>>(), vec![2, 4]);
        assert!(even.is_subset(&set));
    }
}
