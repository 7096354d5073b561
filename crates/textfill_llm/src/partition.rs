//! Strategies for splitting a conversation into request-sized batches.

use crate::types::Message;

/// Splits a message sequence into consecutive, non-empty batches.
pub trait Partition: Send + Sync {
    fn partition<'a>(&self, messages: &'a [Message]) -> Vec<&'a [Message]>;
}

/// Fixed number of messages per batch, whatever their length.
#[derive(Debug, Clone, Copy)]
pub struct CountPartition {
    max_messages: usize,
}

impl CountPartition {
    pub fn new(max_messages: usize) -> Self {
        Self {
            max_messages: max_messages.max(1),
        }
    }

    pub fn max_messages(&self) -> usize {
        self.max_messages
    }
}

impl Partition for CountPartition {
    fn partition<'a>(&self, messages: &'a [Message]) -> Vec<&'a [Message]> {
        messages.chunks(self.max_messages).collect()
    }
}

/// Batches bounded by an estimated token budget.
///
/// Tokens are estimated at four characters each plus a fixed per-message
/// overhead. A message larger than the budget is sent alone.
#[derive(Debug, Clone, Copy)]
pub struct TokenEstimatePartition {
    max_tokens: usize,
}

impl TokenEstimatePartition {
    const CHARS_PER_TOKEN: usize = 4;
    const MESSAGE_OVERHEAD: usize = 4;

    pub fn new(max_tokens: usize) -> Self {
        Self {
            max_tokens: max_tokens.max(1),
        }
    }

    pub fn estimate(message: &Message) -> usize {
        message.content.chars().count().div_ceil(Self::CHARS_PER_TOKEN) + Self::MESSAGE_OVERHEAD
    }
}

impl Partition for TokenEstimatePartition {
    fn partition<'a>(&self, messages: &'a [Message]) -> Vec<&'a [Message]> {
        let mut batches = Vec::new();
        let mut start = 0;
        let mut used = 0;

        for (index, message) in messages.iter().enumerate() {
            let cost = Self::estimate(message);
            if index > start && used + cost > self.max_tokens {
                batches.push(&messages[start..index]);
                start = index;
                used = 0;
            }
            used += cost;
        }

        if start < messages.len() {
            batches.push(&messages[start..]);
        }

        batches
    }
}
