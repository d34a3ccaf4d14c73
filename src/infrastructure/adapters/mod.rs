//! Surface adapters

pub mod console;
