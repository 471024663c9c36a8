//! Mutable pipeline state threaded through the frame orchestrator.

use crate::config::PipelineConfig;
use crate::input::{InputSource, KeyBindings};
use crate::stack::{EffectStack, StackAction};
use crate::state::EffectStates;

/// The effect stack plus the runtime state of every effect.
#[derive(Debug, Clone, Default)]
pub struct PipelineState {
    pub stack: EffectStack,
    pub effects: EffectStates,
}

impl PipelineState {
    pub fn new(stack: EffectStack) -> Self {
        Self {
            stack,
            effects: EffectStates::new(),
        }
    }

    /// State with the configured baseline windows on the stack.
    pub fn from_config(config: &PipelineConfig) -> Self {
        Self::new(config.build_stack())
    }

    /// Applies a stack action. A reset also drops every effect's state.
    pub fn apply(&mut self, action: StackAction) {
        self.stack.apply(action);
        if action == StackAction::ClearAndReset {
            self.effects.clear();
            tracing::debug!("Cleared effect runtime state");
        }
    }

    /// Applies every action bound to a key pressed this frame.
    pub fn handle_input(&mut self, bindings: &KeyBindings, input: &impl InputSource) {
        for action in bindings.poll(input) {
            self.apply(action);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stack::EffectPreset;
    use crate::types::{ApplicationMode, EffectId};

    #[test]
    fn test_reset_clears_effect_state() {
        let mut state = PipelineState::from_config(&PipelineConfig::default());
        state.apply(StackAction::Push(
            EffectPreset::Single(EffectId::Spiral),
            ApplicationMode::Fullscreen,
        ));
        state.effects.get_mut(EffectId::Spiral).phase = 1.5;

        state.apply(StackAction::PopOne);
        assert_eq!(state.effects.get(EffectId::Spiral).phase, 1.5);

        state.apply(StackAction::ClearAndReset);
        assert_eq!(state.stack.len(), 4);
        assert!(state.effects.is_empty());
    }
}
