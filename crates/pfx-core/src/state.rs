//! Per-effect runtime accumulators.
//!
//! State is keyed by [`EffectId`], not by stack slot: two entries of the same
//! effect share one timer and one iteration counter.

use std::collections::HashMap;

use crate::types::EffectId;

/// Mutable values an effect carries from frame to frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EffectRuntimeState {
    /// Seconds accumulated while the effect runs
    pub timer: f32,
    /// Animation phase (radians or normalized, effect-specific)
    pub phase: f32,
    /// Loop counter for multi-iteration effects
    pub iteration: u32,
}

impl EffectRuntimeState {
    /// Adds `dt` to the timer and returns the new value.
    pub fn advance_timer(&mut self, dt: f32) -> f32 {
        self.timer += dt;
        self.timer
    }
}

/// Runtime state of every effect that has run at least once.
#[derive(Debug, Clone, Default)]
pub struct EffectStates {
    states: HashMap<EffectId, EffectRuntimeState>,
}

impl EffectStates {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state of an effect (default if it never ran).
    pub fn get(&self, effect: EffectId) -> EffectRuntimeState {
        self.states.get(&effect).copied().unwrap_or_default()
    }

    /// Mutable state of an effect, created on first use.
    pub fn get_mut(&mut self, effect: EffectId) -> &mut EffectRuntimeState {
        self.states.entry(effect).or_default()
    }

    /// Resets one effect's state to its initial values.
    pub fn reset(&mut self, effect: EffectId) {
        self.states.insert(effect, EffectRuntimeState::default());
    }

    pub fn clear(&mut self) {
        self.states.clear();
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}
