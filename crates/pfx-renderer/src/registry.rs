//! Effect registry.
//!
//! Maps each [`EffectId`] to the handler that configures it. The pass executor
//! only ever talks to handlers through this table.

use std::collections::HashMap;

use pfx_core::EffectId;

use crate::effects::builtin_effects;
use crate::error::{PipelineError, Result};
use crate::traits::PostEffect;

/// Registry of post-effect handlers, one per effect.
pub struct EffectRegistry {
    handlers: HashMap<EffectId, Box<dyn PostEffect>>,
}

impl EffectRegistry {
    /// Creates a new empty registry.
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Creates a registry holding every built-in handler.
    pub fn with_builtin_effects() -> Self {
        let mut registry = Self::new();
        for handler in builtin_effects() {
            registry.register_boxed(handler);
        }
        registry
    }

    /// Registers a handler, replacing any previous handler for the same effect.
    ///
    /// Returns the replaced handler.
    pub fn register<E: PostEffect + 'static>(&mut self, handler: E) -> Option<Box<dyn PostEffect>> {
        self.register_boxed(Box::new(handler))
    }

    pub fn register_boxed(&mut self, handler: Box<dyn PostEffect>) -> Option<Box<dyn PostEffect>> {
        let id = handler.id();
        let previous = self.handlers.insert(id, handler);
        if previous.is_some() {
            tracing::debug!("Replaced handler for {}", id);
        }
        previous
    }

    /// Unregisters the handler for an effect.
    pub fn unregister(&mut self, effect: EffectId) -> Option<Box<dyn PostEffect>> {
        self.handlers.remove(&effect)
    }

    pub fn get(&self, effect: EffectId) -> Option<&dyn PostEffect> {
        self.handlers.get(&effect).map(|h| h.as_ref())
    }

    /// Returns true if the registry has a handler for the effect.
    pub fn contains(&self, effect: EffectId) -> bool {
        self.handlers.contains_key(&effect)
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Iterates over registered handlers in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn PostEffect> {
        self.handlers.values().map(|h| h.as_ref())
    }

    /// Fails on the first effect in `effects` that has no handler.
    pub fn ensure_registered(&self, effects: &[EffectId]) -> Result<()> {
        match effects.iter().find(|effect| !self.contains(**effect)) {
            Some(&missing) => Err(PipelineError::UnregisteredEffect(missing)),
            None => Ok(()),
        }
    }

    /// Fails unless every effect the stack can hold has a handler.
    pub fn ensure_complete(&self) -> Result<()> {
        self.ensure_registered(&EffectId::ALL)
    }

    /// Handler for an effect that is known to be registered.
    ///
    /// # Panics
    ///
    /// Panics if no handler is registered; the orchestrator checks the whole
    /// catalogue when it is built, so this is a wiring defect.
    pub fn handler(&self, effect: EffectId) -> &dyn PostEffect {
        match self.get(effect) {
            Some(handler) => handler,
            None => panic!("no handler registered for effect `{}`", effect),
        }
    }
}

impl Default for EffectRegistry {
    fn default() -> Self {
        Self::with_builtin_effects()
    }
}

impl std::fmt::Debug for EffectRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut ids: Vec<EffectId> = self.handlers.keys().copied().collect();
        ids.sort();
        f.debug_struct("EffectRegistry").field("effects", &ids).finish()
    }
}
