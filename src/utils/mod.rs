//! Utility modules for the rank engine
//!
//! - **error**: Error handling for the configuration and storage boundaries
//! - **logging**: Tracing subscriber setup

pub mod error;
pub mod logging;
