//! Feature subsets used as lattice vertex identity.
//!
//! Purpose
//! - Give every subset of feature indices a single canonical value so two sets
//!   built in different orders compare and hash equal.
//!
//! Model
//! - Sets whose members are all `< INLINE_CAPACITY` live in a `u64` bitmask
//!   (O(1) equality/hash, no allocation). Anything wider falls back to an
//!   ordered `BTreeSet`. The representation is chosen by content, never by
//!   construction path, so the derived `PartialEq`/`Hash` are set equality.

use std::collections::BTreeSet;
use std::fmt;

/// Column index of a feature in the training matrix.
pub type FeatureIndex = usize;

/// Largest index + 1 that fits the bitmask representation.
pub const INLINE_CAPACITY: usize = 64;

/// Immutable, duplicate-free set of feature indices.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum FeatureSet {
    Bits(u64),
    Wide(BTreeSet<FeatureIndex>),
}

impl Default for FeatureSet {
    fn default() -> Self {
        FeatureSet::Bits(0)
    }
}

impl FeatureSet {
    pub fn empty() -> Self {
        Self::default()
    }

    /// All features `0..total`.
    pub fn full(total: usize) -> Self {
        (0..total).collect()
    }

    pub fn len(&self) -> usize {
        match self {
            FeatureSet::Bits(bits) => bits.count_ones() as usize,
            FeatureSet::Wide(set) => set.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, feature: FeatureIndex) -> bool {
        match self {
            FeatureSet::Bits(bits) => feature < INLINE_CAPACITY && bits & (1u64 << feature) != 0,
            FeatureSet::Wide(set) => set.contains(&feature),
        }
    }

    /// A new set with `feature` added; `self` is left untouched.
    pub fn with(&self, feature: FeatureIndex) -> Self {
        match self {
            FeatureSet::Bits(bits) if feature < INLINE_CAPACITY => {
                FeatureSet::Bits(bits | (1u64 << feature))
            }
            _ => {
                let mut set: BTreeSet<FeatureIndex> = self.iter().collect();
                set.insert(feature);
                FeatureSet::Wide(set)
            }
        }
    }

    /// Members in ascending order.
    pub fn iter(&self) -> Iter<'_> {
        match self {
            FeatureSet::Bits(bits) => Iter::Bits(*bits),
            FeatureSet::Wide(set) => Iter::Wide(set.iter()),
        }
    }

    pub fn to_vec(&self) -> Vec<FeatureIndex> {
        self.iter().collect()
    }

    /// Members of `self` missing from `other`, ascending.
    pub fn difference(&self, other: &FeatureSet) -> Vec<FeatureIndex> {
        match (self, other) {
            (FeatureSet::Bits(a), FeatureSet::Bits(b)) => Iter::Bits(a & !b).collect(),
            _ => self.iter().filter(|&f| !other.contains(f)).collect(),
        }
    }

    pub fn is_subset(&self, other: &FeatureSet) -> bool {
        match (self, other) {
            (FeatureSet::Bits(a), FeatureSet::Bits(b)) => a & !b == 0,
            _ => self.iter().all(|f| other.contains(f)),
        }
    }

    /// Sum of `costs[f]` over members. Indices beyond `costs` count as zero.
    pub fn cost(&self, costs: &[f64]) -> f64 {
        self.iter().filter_map(|f| costs.get(f)).sum()
    }
}

impl FromIterator<FeatureIndex> for FeatureSet {
    fn from_iter<I: IntoIterator<Item = FeatureIndex>>(iter: I) -> Self {
        let mut bits = 0u64;
        let mut wide: Option<BTreeSet<FeatureIndex>> = None;
        for f in iter {
            if let Some(set) = wide.as_mut() {
                set.insert(f);
            } else if f < INLINE_CAPACITY {
                bits |= 1u64 << f;
            } else {
                let mut set: BTreeSet<FeatureIndex> = Iter::Bits(bits).collect();
                set.insert(f);
                wide = Some(set);
            }
        }
        match wide {
            Some(set) => FeatureSet::Wide(set),
            None => FeatureSet::Bits(bits),
        }
    }
}

impl<'a> FromIterator<&'a FeatureIndex> for FeatureSet {
    fn from_iter<I: IntoIterator<Item = &'a FeatureIndex>>(iter: I) -> Self {
        iter.into_iter().copied().collect()
    }
}

impl fmt::Display for FeatureSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, feature) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{feature}")?;
        }
        write!(f, "}}")
    }
}

/// Ascending iterator over a [`FeatureSet`].
pub enum Iter<'a> {
    Bits(u64),
    Wide(std::collections::btree_set::Iter<'a, FeatureIndex>),
}

impl Iterator for Iter<'_> {
    type Item = FeatureIndex;

    fn next(&mut self) -> Option<FeatureIndex> {
        match self {
            Iter::Bits(rest) => {
                if *rest == 0 {
                    return None;
                }
                let f = rest.trailing_zeros() as usize;
                *rest &= *rest - 1;
                Some(f)
            }
            Iter::Wide(it) => it.next().copied(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_ignores_construction_order() {
        let a: FeatureSet = [3, 0, 2].iter().collect();
        let b: FeatureSet = [0, 2, 3, 2].iter().collect();
        assert_eq!(a, b);
        assert_eq!(a.len(), 3);
        assert_eq!(a.to_vec(), vec![0, 2, 3]);
    }

    #[test]
    fn with_leaves_the_base_set_untouched() {
        let base: FeatureSet = [1].iter().collect();
        let grown = base.with(4);
        assert_eq!(base.to_vec(), vec![1]);
        assert_eq!(grown.to_vec(), vec![1, 4]);
        assert!(base.is_subset(&grown));
        assert!(!grown.is_subset(&base));
    }

    #[test]
    fn wide_sets_fall_back_and_stay_canonical() {
        let wide: FeatureSet = [70, 1].iter().collect();
        assert!(matches!(wide, FeatureSet::Wide(_)));
        let grown = FeatureSet::Bits(0b10).with(70);
        assert_eq!(wide, grown);
        assert!(wide.contains(70) && wide.contains(1) && !wide.contains(2));
        assert_eq!(wide.difference(&[1].iter().collect()), vec![70]);
    }

    #[test]
    fn difference_and_cost() {
        let a: FeatureSet = [0, 1, 2, 3].iter().collect();
        let b: FeatureSet = [0, 2].iter().collect();
        assert_eq!(a.difference(&b), vec![1, 3]);
        assert!(b.difference(&a).is_empty());
        assert!((a.cost(&[1.0, 2.0, 3.0, 4.0]) - 10.0).abs() < 1e-12);
    }

    #[test]
    fn display_lists_members() {
        let a: FeatureSet = [2, 0].iter().collect();
        assert_eq!(a.to_string(), "{0, 2}");
        assert_eq!(FeatureSet::empty().to_string(), "{}");
        assert_eq!(FeatureSet::full(3).to_string(), "{0, 1, 2}");
    }
}
