use rand::distributions::Alphanumeric;
use rand::Rng;
use crate::domain::traits::ReplySource;

/// Default reply length
pub const DEFAULT_REPLY_LENGTH: usize = 50;

/// Stand-in for a response generator: a fixed number of random
/// characters from `[A-Za-z0-9]`.
#[derive(Debug, Clone)]
pub struct RandomReply {
    length: usize,
}

impl RandomReply {
    pub fn new(length: usize) -> Self {
        Self { length }
    }

    pub fn length(&self) -> usize {
        self.length
    }
}

impl Default for RandomReply {
    fn default() -> Self {
        Self::new(DEFAULT_REPLY_LENGTH)
    }
}

impl ReplySource for RandomReply {
    fn generate(&self) -> String {
        rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(self.length)
            .map(char::from)
            .collect()
    }
}
