//! Pipeline construction errors.

use pfx_core::{ConfigError, EffectId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("no handler registered for effect `{0}`")]
    UnregisteredEffect(EffectId),
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
}

pub type Result<T> = std::result::Result<T, PipelineError>;
