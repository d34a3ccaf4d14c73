//! Conversation controller - owns the transcript, the input buffer and the
//! modal flag, and schedules synthetic replies.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use chrono::Local;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;

use crate::domain::entities::{MessageId, ModalState, Origin, Transcript};
use crate::domain::traits::{DialogView, ReplySource};
use super::reply::RandomReply;

/// Default delay between a submit and its synthetic reply
pub const DEFAULT_REPLY_DELAY: Duration = Duration::from_millis(1000);

/// Notifications for the surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogEvent {
    MessageAppended(MessageId),
    ScrollTo(MessageId),
    OpenChanged(bool),
}

#[derive(Debug, Default)]
struct ConversationState {
    transcript: Transcript,
    input: String,
    modal: ModalState,
    scrolled_to: Option<MessageId>,
    disposed: bool,
}

/// State shared with the reply tasks
struct Shared {
    state: Mutex<ConversationState>,
    events: Option<UnboundedSender<DialogEvent>>,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, ConversationState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn emit(&self, event: DialogEvent) {
        if let Some(events) = &self.events {
            // receiver gone means nobody is drawing anymore
            let _ = events.send(event);
        }
    }

    /// Append under the lock, then scroll to it. Returns None once disposed.
    fn append(&self, origin: Origin, content: String) -> Option<MessageId> {
        let id = {
            let mut state = self.lock();
            if state.disposed {
                return None;
            }
            let id = state.transcript.append(origin, content, Local::now());
            state.scrolled_to = Some(id);
            id
        };

        self.emit(DialogEvent::MessageAppended(id));
        self.emit(DialogEvent::ScrollTo(id));
        Some(id)
    }

    fn deliver_synthetic_reply(&self, replies: &dyn ReplySource) -> Option<MessageId> {
        if self.lock().disposed {
            tracing::debug!("Controller disposed, dropping synthetic reply");
            return None;
        }
        let id = self.append(Origin::SystemReply, replies.generate());
        if let Some(id) = id {
            tracing::debug!("Synthetic reply appended: {}", id);
        }
        id
    }
}

/// Drives one conversation. Submits must happen inside a tokio runtime,
/// since every accepted submit spawns its reply task.
pub struct ConversationController {
    shared: Arc<Shared>,
    replies: Arc<dyn ReplySource>,
    reply_delay: Duration,
    pending: Mutex<Vec<JoinHandle<()>>>,
}

impl ConversationController {
    pub fn new(replies: Arc<dyn ReplySource>, reply_delay: Duration) -> Self {
        Self::build(replies, reply_delay, None)
    }

    /// Controller that reports appends, scrolls and visibility changes
    pub fn with_events(replies: Arc<dyn ReplySource>, reply_delay: Duration, events: UnboundedSender<DialogEvent>) -> Self {
        Self::build(replies, reply_delay, Some(events))
    }

    fn build(replies: Arc<dyn ReplySource>, reply_delay: Duration, events: Option<UnboundedSender<DialogEvent>>) -> Self {
        Self {
            shared: Arc::new(Shared {
                state: Mutex::new(ConversationState::default()),
                events,
            }),
            replies,
            reply_delay,
            pending: Mutex::new(Vec::new()),
        }
    }

    pub fn reply_delay(&self) -> Duration {
        self.reply_delay
    }

    /// Append a user message and schedule its reply. Blank input is ignored.
    pub fn submit(&self, text: &str) {
        let content = text.trim();
        if content.is_empty() {
            return;
        }

        {
            let mut state = self.shared.lock();
            if state.disposed {
                tracing::debug!("Submit after dispose ignored");
                return;
            }
            state.input.clear();
        }

        let Some(id) = self.shared.append(Origin::User, content.to_string()) else {
            return;
        };
        tracing::debug!("User message appended: {}", id);

        self.schedule_reply();
    }

    /// Submit whatever is in the input buffer
    pub fn submit_input(&self) {
        let input = self.shared.lock().input.clone();
        self.submit(&input);
    }

    pub fn set_input(&self, text: impl Into<String>) {
        self.shared.lock().input = text.into();
    }

    pub fn input(&self) -> String {
        self.shared.lock().input.clone()
    }

    fn schedule_reply(&self) {
        let shared = Arc::clone(&self.shared);
        let replies = Arc::clone(&self.replies);
        let delay = self.reply_delay;

        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            shared.deliver_synthetic_reply(replies.as_ref());
        });

        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        pending.retain(|h| !h.is_finished());
        pending.push(handle);
    }

    /// Number of replies still waiting on their timer
    pub fn pending_replies(&self) -> usize {
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|h| !h.is_finished())
            .count()
    }

    /// Bring the newest message into view
    pub fn scroll_to_latest(&self) {
        let latest = {
            let mut state = self.shared.lock();
            let latest = state.transcript.last().map(|m| m.id);
            if latest.is_some() {
                state.scrolled_to = latest;
            }
            latest
        };
        if let Some(id) = latest {
            self.shared.emit(DialogEvent::ScrollTo(id));
        }
    }

    pub fn scrolled_to(&self) -> Option<MessageId> {
        self.shared.lock().scrolled_to
    }

    pub fn is_open(&self) -> bool {
        self.shared.lock().modal.is_open()
    }

    pub fn modal(&self) -> ModalState {
        self.shared.lock().modal
    }

    /// Close trigger of the dialog
    pub fn close(&self) {
        self.set_open(false);
    }

    /// Open-change binding. Only real transitions are reported.
    pub fn set_open(&self, open: bool) {
        let changed = {
            let mut state = self.shared.lock();
            let next = ModalState::from_open(open);
            let changed = state.modal != next;
            state.modal = next;
            changed
        };
        if changed {
            tracing::info!("Dialog {}", if open { "opened" } else { "closed" });
            self.shared.emit(DialogEvent::OpenChanged(open));
        }
    }

    pub fn transcript(&self) -> Transcript {
        self.shared.lock().transcript.clone()
    }

    pub fn latest_reply(&self) -> Option<String> {
        self.shared.lock().transcript.latest_reply().map(|m| m.content.clone())
    }

    pub fn view(&self) -> DialogView {
        let state = self.shared.lock();
        DialogView {
            modal: state.modal,
            transcript: state.transcript.clone(),
            input: state.input.clone(),
            scrolled_to: state.scrolled_to,
        }
    }

    pub fn is_disposed(&self) -> bool {
        self.shared.lock().disposed
    }

    /// Tear down: cancel pending replies, refuse further mutation
    pub fn dispose(&self) {
        {
            let mut state = self.shared.lock();
            if state.disposed {
                return;
            }
            state.disposed = true;
        }

        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        let cancelled = pending.iter().filter(|h| !h.is_finished()).count();
        for handle in pending.drain(..) {
            handle.abort();
        }
        tracing::info!("Conversation disposed, {} pending replies cancelled", cancelled);
    }
}

impl Default for ConversationController {
    fn default() -> Self {
        Self::new(Arc::new(RandomReply::default()), DEFAULT_REPLY_DELAY)
    }
}

impl Drop for ConversationController {
    fn drop(&mut self) {
        self.dispose();
    }
}
