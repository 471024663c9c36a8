//! Key bindings that translate input into effect stack actions.

use crate::stack::EffectPreset;
pub use crate::stack::StackAction;
use crate::types::{ApplicationMode, EffectId};

/// Keys the default bindings respond to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Num0,
    Num1,
    Num2,
    Num3,
    Num4,
    Num5,
    Num6,
    Num7,
    Num8,
    Num9,
    Q,
    E,
    R,
    T,
    Y,
    U,
    I,
    O,
    P,
    Backspace,
}

/// Per-frame key state supplied by the windowing layer.
pub trait InputSource {
    /// Returns true if `key` went down since the previous frame.
    fn key_was_pressed_this_frame(&self, key: Key) -> bool;
}

/// One key and the action it triggers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyBinding {
    pub key: Key,
    pub action: StackAction,
}

impl KeyBinding {
    pub fn new(key: Key, action: StackAction) -> Self {
        Self { key, action }
    }

    fn fullscreen(key: Key, effect: EffectId) -> Self {
        Self::new(
            key,
            StackAction::Push(EffectPreset::Single(effect), ApplicationMode::Fullscreen),
        )
    }
}

/// Ordered binding table.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    bindings: Vec<KeyBinding>,
}

impl KeyBindings {
    pub fn new(bindings: Vec<KeyBinding>) -> Self {
        Self { bindings }
    }

    pub fn bindings(&self) -> &[KeyBinding] {
        &self.bindings
    }

    /// Replaces the action of `key`, or appends a new binding.
    pub fn bind(&mut self, key: Key, action: StackAction) {
        match self.bindings.iter_mut().find(|b| b.key == key) {
            Some(binding) => binding.action = action,
            None => self.bindings.push(KeyBinding::new(key, action)),
        }
    }

    /// Actions for every key pressed this frame, in table order.
    pub fn poll(&self, input: &impl InputSource) -> Vec<StackAction> {
        self.bindings
            .iter()
            .filter(|binding| input.key_was_pressed_this_frame(binding.key))
            .map(|binding| binding.action)
            .collect()
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        use EffectId::*;

        Self::new(vec![
            KeyBinding::fullscreen(Key::Num1, VerticalColourGradient),
            KeyBinding::new(
                Key::Num2,
                StackAction::Push(EffectPreset::BLUR_PAIR, ApplicationMode::Fullscreen),
            ),
            KeyBinding::fullscreen(Key::Num3, UnderWater),
            KeyBinding::fullscreen(Key::Num4, DepthOfField),
            KeyBinding::fullscreen(Key::Num5, Distort),
            KeyBinding::fullscreen(Key::Num6, Spiral),
            KeyBinding::fullscreen(Key::Num7, HeatHaze),
            KeyBinding::fullscreen(Key::Num8, Tint),
            KeyBinding::fullscreen(Key::Num9, GreyNoise),
            KeyBinding::fullscreen(Key::Q, Copy),
            KeyBinding::fullscreen(Key::E, HueVerticalColourGradient),
            KeyBinding::fullscreen(Key::R, NightVision),
            KeyBinding::fullscreen(Key::T, Sepia),
            KeyBinding::fullscreen(Key::Y, Inverted),
            KeyBinding::fullscreen(Key::U, Contour),
            KeyBinding::fullscreen(Key::I, GameBoy),
            KeyBinding::new(
                Key::O,
                StackAction::Push(EffectPreset::BLOOM_CHAIN, ApplicationMode::Fullscreen),
            ),
            KeyBinding::fullscreen(Key::P, Burn),
            KeyBinding::new(Key::Num0, StackAction::ClearAndReset),
            KeyBinding::new(Key::Backspace, StackAction::PopGroup),
        ])
    }
}
