//! Domain layer - Core conversation model
//!
//! This layer contains:
//! - Entities: Core objects (Message, Transcript, ModalState, Command)
//! - Traits: Abstractions for infrastructure (Surface, ReplySource)
//! - Rules: the transcript is append-only, ids are insertion positions

pub mod entities;
pub mod traits;
