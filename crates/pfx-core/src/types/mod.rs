//! Core type definitions

mod buffer;
mod effect;

pub use buffer::*;
pub use effect::*;
