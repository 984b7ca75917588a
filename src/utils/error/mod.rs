//! Error handling for the rank engine

mod helpers;
mod types;

pub use types::{EngineError, Result};
