//! Append-only message list and its day-grouped view

use chrono::{DateTime, Local, NaiveDate};
use super::message::{Message, MessageId, Origin};

/// Ordered, append-only list of messages
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transcript {
    messages: Vec<Message>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message. Its id is the length of the list before the push.
    pub fn append(&mut self, origin: Origin, content: impl Into<String>, created_at: DateTime<Local>) -> MessageId {
        let id = MessageId::new(self.messages.len());
        self.messages.push(Message::new(id, origin, content, created_at));
        id
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Most recent synthetic reply, if any
    pub fn latest_reply(&self) -> Option<&Message> {
        self.messages.iter().rev().find(|m| !m.is_user())
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Lazy traversal that puts a day separator in front of the first
    /// message of every calendar day. Call again to restart.
    pub fn day_grouped(&self) -> DayGrouped<'_> {
        DayGrouped {
            inner: self.messages.iter(),
            current_day: None,
            held: None,
        }
    }
}

/// Item of the day-grouped stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamItem<'a> {
    DaySeparator(NaiveDate),
    Message(&'a Message),
}

#[derive(Debug, Clone)]
pub struct DayGrouped<'a> {
    inner: std::slice::Iter<'a, Message>,
    current_day: Option<NaiveDate>,
    held: Option<&'a Message>,
}

impl<'a> Iterator for DayGrouped<'a> {
    type Item = StreamItem<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(message) = self.held.take() {
            return Some(StreamItem::Message(message));
        }

        let message = self.inner.next()?;
        let day = message.day();
        if self.current_day != Some(day) {
            self.current_day = Some(day);
            self.held = Some(message);
            return Some(StreamItem::DaySeparator(day));
        }

        Some(StreamItem::Message(message))
    }
}
