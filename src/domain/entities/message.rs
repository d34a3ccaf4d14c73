use chrono::{DateTime, Local, NaiveDate};
use std::fmt;

/// Position of a message inside its transcript
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MessageId(pub usize);

impl MessageId {
    pub const fn new(raw: usize) -> Self {
        Self(raw)
    }

    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Who authored a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Origin {
    User,
    SystemReply,
}

impl Origin {
    pub fn as_str(&self) -> &str {
        match self {
            Origin::User => "user",
            Origin::SystemReply => "system-reply",
        }
    }

    pub fn is_user(&self) -> bool {
        matches!(self, Origin::User)
    }
}

/// One turn of the conversation. Never mutated once appended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub id: MessageId,
    pub content: String,
    pub origin: Origin,
    pub created_at: DateTime<Local>,
}

impl Message {
    pub fn new(id: MessageId, origin: Origin, content: impl Into<String>, created_at: DateTime<Local>) -> Self {
        Self {
            id,
            content: content.into(),
            origin,
            created_at,
        }
    }

    pub fn is_user(&self) -> bool {
        self.origin.is_user()
    }

    /// Local calendar day the message was written on
    pub fn day(&self) -> NaiveDate {
        self.created_at.date_naive()
    }
}
