//! Domain entities - Core dialog objects

pub mod message;
pub mod transcript;
pub mod modal;
pub mod search;
pub mod command;

pub use message::{Message, MessageId, Origin};
pub use transcript::{Transcript, DayGrouped, StreamItem};
pub use modal::ModalState;
pub use search::SearchResult;
pub use command::{Command, CommandOutcome, CommandRegistry};
