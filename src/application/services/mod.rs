//! Application services - Dialog logic orchestration

pub mod conversation;
pub mod reply;
pub mod page_shell;
pub mod command_service;

pub use conversation::{ConversationController, DialogEvent, DEFAULT_REPLY_DELAY};
pub use reply::{RandomReply, DEFAULT_REPLY_LENGTH};
pub use page_shell::{PageShell, MetaTag, DEFAULT_TITLE};
pub use command_service::CommandService;
