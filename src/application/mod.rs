//! Application layer - Use cases and dialog logic
//!
//! This layer contains:
//! - Services: conversation controller, reply generation, page shell, commands
//! - Errors: Dialog-specific errors

pub mod errors;
pub mod services;
