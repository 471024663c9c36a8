//! Declarative table of multi-step effect groups.

use std::collections::BTreeMap;

use crate::types::EffectId;

/// Effects that are pushed together and removed together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectGroup {
    members: Vec<EffectId>,
}

impl EffectGroup {
    /// Creates a group from its members in push order.
    ///
    /// The last member identifies the group when popping.
    pub fn new(members: Vec<EffectId>) -> Self {
        assert!(!members.is_empty(), "an effect group needs at least one member");
        Self { members }
    }

    /// Two-pass separable Gaussian blur.
    pub fn blur_pair() -> Self {
        Self::new(vec![
            EffectId::GaussianBlurHorizontal,
            EffectId::GaussianBlurVertical,
        ])
    }

    /// Bloom capture, `iterations` dual-filter passes, then the merge.
    pub fn bloom_chain(iterations: usize) -> Self {
        let mut members = Vec::with_capacity(iterations + 2);
        members.push(EffectId::Bloom);
        members.extend(std::iter::repeat_n(EffectId::DualFiltering, iterations));
        members.push(EffectId::MergeTextures);
        Self::new(members)
    }

    pub fn members(&self) -> &[EffectId] {
        &self.members
    }

    pub fn terminal(&self) -> EffectId {
        self.members[self.members.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Group table keyed by each group's terminal effect.
#[derive(Debug, Clone, Default)]
pub struct EffectGroups {
    by_terminal: BTreeMap<EffectId, EffectGroup>,
}

impl EffectGroups {
    /// Creates an empty table (every pop removes a single entry).
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates the built-in table: blur pair and bloom chain.
    pub fn new(bloom_iterations: usize) -> Self {
        let mut groups = Self::empty();
        groups.insert(EffectGroup::blur_pair());
        groups.insert(EffectGroup::bloom_chain(bloom_iterations));
        groups
    }

    /// Adds a group, replacing any group with the same terminal effect.
    pub fn insert(&mut self, group: EffectGroup) -> Option<EffectGroup> {
        self.by_terminal.insert(group.terminal(), group)
    }

    /// Returns the group whose last member is `effect`.
    pub fn ending_with(&self, effect: EffectId) -> Option<&EffectGroup> {
        self.by_terminal.get(&effect)
    }

    pub fn len(&self) -> usize {
        self.by_terminal.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_terminal.is_empty()
    }
}

/// What a single user action pushes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectPreset {
    Single(EffectId),
    /// The registered group ending with the given effect
    Group(EffectId),
}

impl EffectPreset {
    pub const BLUR_PAIR: EffectPreset = EffectPreset::Group(EffectId::GaussianBlurVertical);
    pub const BLOOM_CHAIN: EffectPreset = EffectPreset::Group(EffectId::MergeTextures);

    /// Resolves the preset to the effects it pushes, in order.
    pub fn members(&self, groups: &EffectGroups) -> Vec<EffectId> {
        match self {
            EffectPreset::Single(effect) => vec![*effect],
            EffectPreset::Group(terminal) => groups
                .ending_with(*terminal)
                .map(|group| group.members().to_vec())
                .unwrap_or_else(|| vec![*terminal]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bloom_chain_layout() {
        let group = EffectGroup::bloom_chain(8);
        assert_eq!(group.len(), 10);
        assert_eq!(group.members()[0], EffectId::Bloom);
        assert_eq!(group.terminal(), EffectId::MergeTextures);
        assert!(group.members()[1..9]
            .iter()
            .all(|e| *e == EffectId::DualFiltering));
    }

    #[test]
    fn test_lookup_by_terminal() {
        let groups = EffectGroups::new(3);
        assert_eq!(groups.len(), 2);
        assert_eq!(
            groups.ending_with(EffectId::GaussianBlurVertical).map(|g| g.len()),
            Some(2)
        );
        assert_eq!(groups.ending_with(EffectId::MergeTextures).map(|g| g.len()), Some(5));
        assert!(groups.ending_with(EffectId::Tint).is_none());
    }

    #[test]
    fn test_preset_members() {
        let groups = EffectGroups::new(8);
        assert_eq!(EffectPreset::BLUR_PAIR.members(&groups).len(), 2);
        assert_eq!(EffectPreset::BLOOM_CHAIN.members(&groups).len(), 10);
        assert_eq!(
            EffectPreset::Single(EffectId::Tint).members(&groups),
            vec![EffectId::Tint]
        );

        // Unknown group degrades to its terminal effect
        let empty = EffectGroups::empty();
        assert_eq!(
            EffectPreset::BLUR_PAIR.members(&empty),
            vec![EffectId::GaussianBlurVertical]
        );
    }
}
