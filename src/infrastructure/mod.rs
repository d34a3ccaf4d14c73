//! Infrastructure layer - External concerns
//!
//! This layer contains:
//! - Config: Configuration loading
//! - Adapters: Rendering surfaces (console)

pub mod config;
pub mod adapters;
