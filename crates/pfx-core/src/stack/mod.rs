//! Effect Stack
//!
//! Ordered list of active post-processes. Insertion order is composition
//! order: entry `i` always consumes the output of entry `i - 1`, entry 0
//! consumes the scene render.
//!
//! The bottom of the stack holds the baseline window effects. Interactive
//! removal never goes below them.

mod groups;

pub use groups::*;

use crate::types::{ApplicationMode, EffectId, StackEntry};

/// A user-level change to the stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StackAction {
    Push(EffectPreset, ApplicationMode),
    PopOne,
    PopGroup,
    ClearAndReset,
}

/// Ordered sequence of active (effect, mode) entries.
#[derive(Debug, Clone)]
pub struct EffectStack {
    entries: Vec<StackEntry>,
    baseline: Vec<EffectId>,
    groups: EffectGroups,
}

impl EffectStack {
    /// Creates a stack holding the baseline window effects in Polygon mode.
    pub fn new(baseline: Vec<EffectId>, groups: EffectGroups) -> Self {
        let mut stack = Self {
            entries: Vec::new(),
            baseline: Vec::new(),
            groups,
        };
        stack.clear_and_reset(&baseline);
        stack
    }

    /// Creates an empty stack with no floor and no groups.
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
            baseline: Vec::new(),
            groups: EffectGroups::empty(),
        }
    }

    /// Number of entries `pop_one` and `pop_group` never remove.
    pub fn floor(&self) -> usize {
        self.baseline.len()
    }

    pub fn groups(&self) -> &EffectGroups {
        &self.groups
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[StackEntry] {
        &self.entries
    }

    pub fn last(&self) -> Option<&StackEntry> {
        self.entries.last()
    }

    /// Appends an entry. Any effect may be paired with any mode.
    pub fn push(&mut self, effect: EffectId, mode: ApplicationMode) {
        self.entries.push(StackEntry::new(effect, mode));
        tracing::debug!("Pushed {} ({:?}), depth {}", effect, mode, self.entries.len());
    }

    /// Pushes every effect of a preset with the same mode.
    pub fn push_preset(&mut self, preset: EffectPreset, mode: ApplicationMode) {
        for effect in preset.members(&self.groups) {
            self.push(effect, mode);
        }
    }

    /// Removes the last entry unless only the floor remains.
    pub fn pop_one(&mut self) -> Option<StackEntry> {
        if self.entries.len() <= self.floor() {
            return None;
        }
        let entry = self.entries.pop();
        if let Some(entry) = &entry {
            tracing::debug!("Popped {}, depth {}", entry.effect, self.entries.len());
        }
        entry
    }

    /// Removes the trailing group atomically, or a single entry.
    ///
    /// The group is only removed when the trailing entries match its members
    /// exactly and removing them keeps the floor intact. Returns the number of
    /// entries removed.
    pub fn pop_group(&mut self) -> usize {
        let Some(last_effect) = self.entries.last().map(|entry| entry.effect) else {
            return 0;
        };

        if let Some(group) = self.groups.ending_with(last_effect)
            && self.entries.len() >= self.floor() + group.len()
        {
            let start = self.entries.len() - group.len();
            let matches = self.entries[start..]
                .iter()
                .map(|entry| entry.effect)
                .eq(group.members().iter().copied());
            if matches {
                self.entries.truncate(start);
                tracing::debug!(
                    "Popped group ending with {} ({} entries), depth {}",
                    last_effect,
                    group.len(),
                    self.entries.len()
                );
                return group.len();
            }
        }

        usize::from(self.pop_one().is_some())
    }

    /// Empties the stack and pushes `baseline` in Polygon mode.
    ///
    /// The baseline becomes the new floor.
    pub fn clear_and_reset(&mut self, baseline: &[EffectId]) {
        self.entries.clear();
        self.baseline = baseline.to_vec();
        for effect in baseline {
            self.entries
                .push(StackEntry::new(*effect, ApplicationMode::Polygon));
        }
        tracing::debug!("Reset effect stack to {} baseline entries", baseline.len());
    }

    /// Restores the current baseline.
    pub fn reset(&mut self) {
        let baseline = std::mem::take(&mut self.baseline);
        self.clear_and_reset(&baseline);
    }

    /// Executes a user action.
    pub fn apply(&mut self, action: StackAction) {
        match action {
            StackAction::Push(preset, mode) => self.push_preset(preset, mode),
            StackAction::PopOne => {
                self.pop_one();
            }
            StackAction::PopGroup => {
                self.pop_group();
            }
            StackAction::ClearAndReset => self.reset(),
        }
    }

    /// Passes in composition order, numbered from zero.
    ///
    /// The iterator borrows the stack, so it can be recreated every frame.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (usize, StackEntry)> + Clone + '_ {
        self.entries.iter().copied().enumerate()
    }
}

impl Default for EffectStack {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window_baseline() -> Vec<EffectId> {
        vec![
            EffectId::NightVision,
            EffectId::Contour,
            EffectId::Sepia,
            EffectId::Inverted,
        ]
    }

    fn window_stack() -> EffectStack {
        EffectStack::new(window_baseline(), EffectGroups::new(8))
    }

    #[test]
    fn test_baseline_uses_polygon_mode() {
        let stack = window_stack();
        assert_eq!(stack.len(), 4);
        assert_eq!(stack.floor(), 4);
        assert!(stack
            .entries()
            .iter()
            .all(|entry| entry.mode == ApplicationMode::Polygon));
    }

    #[test]
    fn test_floor_protection() {
        let mut stack = window_stack();
        for _ in 0..4 {
            stack.pop_one();
        }
        assert_eq!(stack.len(), 4);
        assert!(stack.pop_one().is_none());
        assert_eq!(stack.len(), 4);
    }

    #[test]
    fn test_pop_one_removes_last() {
        let mut stack = window_stack();
        stack.push(EffectId::Tint, ApplicationMode::Fullscreen);
        stack.push(EffectId::Burn, ApplicationMode::Area);
        let popped = stack.pop_one();
        assert_eq!(popped, Some(StackEntry::new(EffectId::Burn, ApplicationMode::Area)));
        assert_eq!(stack.last().map(|e| e.effect), Some(EffectId::Tint));
    }

    #[test]
    fn test_pop_group_blur_pair() {
        let mut stack = window_stack();
        let before = stack.len();
        stack.push_preset(EffectPreset::BLUR_PAIR, ApplicationMode::Fullscreen);
        assert_eq!(stack.len(), before + 2);
        assert_eq!(stack.pop_group(), 2);
        assert_eq!(stack.len(), before);
    }

    #[test]
    fn test_pop_group_bloom_chain() {
        let mut stack = window_stack();
        stack.push(EffectId::Tint, ApplicationMode::Fullscreen);
        let before = stack.len();
        stack.push_preset(EffectPreset::BLOOM_CHAIN, ApplicationMode::Fullscreen);
        assert_eq!(stack.len(), before + 10);
        assert_eq!(stack.pop_group(), 10);
        assert_eq!(stack.len(), before);
        assert_eq!(stack.last().map(|e| e.effect), Some(EffectId::Tint));
    }

    #[test]
    fn test_pop_group_ungrouped_pops_one() {
        let mut stack = window_stack();
        stack.push(EffectId::Tint, ApplicationMode::Fullscreen);
        stack.push(EffectId::Sepia, ApplicationMode::Fullscreen);
        assert_eq!(stack.pop_group(), 1);
        assert_eq!(stack.len(), 5);
    }

    #[test]
    fn test_pop_group_partial_match_pops_one() {
        let mut stack = window_stack();
        // A lone vertical blur is not a complete group
        stack.push(EffectId::Tint, ApplicationMode::Fullscreen);
        stack.push(EffectId::GaussianBlurVertical, ApplicationMode::Fullscreen);
        assert_eq!(stack.pop_group(), 1);
        assert_eq!(stack.last().map(|e| e.effect), Some(EffectId::Tint));
    }

    #[test]
    fn test_pop_group_respects_floor() {
        let mut stack = window_stack();
        assert_eq!(stack.pop_group(), 0);
        assert_eq!(stack.len(), 4);
    }

    #[test]
    fn test_clear_and_reset() {
        let mut stack = window_stack();
        stack.push(EffectId::Tint, ApplicationMode::Fullscreen);
        stack.push_preset(EffectPreset::BLOOM_CHAIN, ApplicationMode::Fullscreen);
        stack.apply(StackAction::ClearAndReset);
        assert_eq!(stack.len(), 4);
        let effects: Vec<EffectId> = stack.entries().iter().map(|e| e.effect).collect();
        assert_eq!(effects, window_baseline());
    }

    #[test]
    fn test_iter_numbers_passes_in_order() {
        let mut stack = EffectStack::empty();
        stack.push(EffectId::GaussianBlurHorizontal, ApplicationMode::Fullscreen);
        stack.push(EffectId::GaussianBlurVertical, ApplicationMode::Fullscreen);
        stack.push(EffectId::Tint, ApplicationMode::Area);

        let passes: Vec<(usize, EffectId)> = stack.iter().map(|(i, e)| (i, e.effect)).collect();
        assert_eq!(
            passes,
            vec![
                (0, EffectId::GaussianBlurHorizontal),
                (1, EffectId::GaussianBlurVertical),
                (2, EffectId::Tint),
            ]
        );

        // Restartable
        assert_eq!(stack.iter().len(), 3);
    }

    #[test]
    fn test_empty_stack_pops_nothing() {
        let mut stack = EffectStack::empty();
        assert!(stack.pop_one().is_none());
        assert_eq!(stack.pop_group(), 0);
    }
}
