//! Player resource pools.

use std::collections::BTreeMap;

use strum::IntoEnumIterator;

use crate::config::GameConfig;

/// Kind of stockpiled resource.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ResourceKind {
    Wood,
    Mercury,
    Ore,
    Sulfur,
    Crystal,
    Gems,
    Gold,
}

impl ResourceKind {
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// One signed amount per resource kind.
///
/// Used both as a reward delta and as a player's stockpile. Serialized as a
/// map of the non-zero amounts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(
        from = "BTreeMap<ResourceKind, i32>",
        into = "BTreeMap<ResourceKind, i32>"
    )
)]
pub struct ResourceSet(pub [i32; GameConfig::RESOURCE_KINDS]);

impl ResourceSet {
    pub const EMPTY: Self = Self([0; GameConfig::RESOURCE_KINDS]);

    pub fn new() -> Self {
        Self::EMPTY
    }

    /// Builder: set a single amount.
    #[must_use]
    pub fn with(mut self, kind: ResourceKind, amount: i32) -> Self {
        self.0[kind.index()] = amount;
        self
    }

    pub fn get(&self, kind: ResourceKind) -> i32 {
        self.0[kind.index()]
    }

    pub fn set(&mut self, kind: ResourceKind, amount: i32) {
        self.0[kind.index()] = amount;
    }

    pub fn is_empty(&self) -> bool {
        self.0.iter().all(|amount| *amount == 0)
    }

    /// True when every amount in `cost` is covered by this pool.
    pub fn can_afford(&self, cost: &ResourceSet) -> bool {
        self.0.iter().zip(cost.0.iter()).all(|(have, need)| have >= need)
    }

    /// Adds `delta` amount-wise (saturating).
    pub fn apply(&mut self, delta: &ResourceSet) {
        for (have, change) in self.0.iter_mut().zip(delta.0.iter()) {
            *have = have.saturating_add(*change);
        }
    }

    /// Non-zero entries in declaration order.
    pub fn nonzero(&self) -> impl Iterator<Item = (ResourceKind, i32)> + '_ {
        ResourceKind::iter()
            .map(|kind| (kind, self.get(kind)))
            .filter(|(_, amount)| *amount != 0)
    }
}

impl From<BTreeMap<ResourceKind, i32>> for ResourceSet {
    fn from(amounts: BTreeMap<ResourceKind, i32>) -> Self {
        amounts
            .into_iter()
            .fold(Self::EMPTY, |set, (kind, amount)| set.with(kind, amount))
    }
}

impl From<ResourceSet> for BTreeMap<ResourceKind, i32> {
    fn from(set: ResourceSet) -> Self {
        set.nonzero().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_resource_names() {
        assert_eq!("gold".parse::<ResourceKind>(), Ok(ResourceKind::Gold));
        assert_eq!("Mercury".parse::<ResourceKind>(), Ok(ResourceKind::Mercury));
        assert_eq!(ResourceKind::Gems.to_string(), "gems");
        assert!("mithril".parse::<ResourceKind>().is_err());
    }

    #[test]
    fn affordability_is_per_kind() {
        let pool = ResourceSet::new()
            .with(ResourceKind::Gold, 1000)
            .with(ResourceKind::Wood, 5);
        assert!(pool.can_afford(&ResourceSet::new().with(ResourceKind::Gold, 1000)));
        assert!(!pool.can_afford(&ResourceSet::new().with(ResourceKind::Wood, 6)));
        assert!(pool.can_afford(&ResourceSet::EMPTY));
    }

    #[test]
    fn map_conversion_keeps_nonzero_amounts() {
        let set = ResourceSet::new().with(ResourceKind::Ore, 3);
        let map: BTreeMap<_, _> = set.into();
        assert_eq!(map.len(), 1);
        assert_eq!(ResourceSet::from(map), set);
    }

    #[test]
    fn nonzero_follows_kind_order() {
        let set = ResourceSet::new()
            .with(ResourceKind::Gold, 500)
            .with(ResourceKind::Wood, -2);
        let entries: Vec<_> = set.nonzero().collect();
        assert_eq!(
            entries,
            vec![(ResourceKind::Wood, -2), (ResourceKind::Gold, 500)]
        );
    }
}
