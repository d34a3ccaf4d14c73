//! Domain traits - Abstractions for infrastructure implementations

pub mod surface;
pub mod reply;

pub use surface::{Surface, DialogView};
pub use reply::ReplySource;
