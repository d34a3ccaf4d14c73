use async_trait::async_trait;
use crate::domain::entities::{MessageId, ModalState, Transcript};
use crate::application::errors::DialogError;

/// Surface trait - abstraction for whatever the dialog is drawn on
#[async_trait]
pub trait Surface: Send + Sync {
    /// Prepare the surface (page title, metadata)
    async fn start(&self) -> Result<(), DialogError>;

    /// Draw the whole dialog from a controller snapshot
    async fn render(&self, view: &DialogView) -> Result<(), DialogError>;

    /// Show a transient line of text outside the message list
    async fn notice(&self, text: &str) -> Result<(), DialogError>;
}

/// Snapshot of the controller state a surface draws from
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DialogView {
    pub modal: ModalState,
    pub transcript: Transcript,
    pub input: String,
    pub scrolled_to: Option<MessageId>,
}

impl DialogView {
    pub fn is_open(&self) -> bool {
        self.modal.is_open()
    }
}
