//! Messenger that records outgoing messages instead of sending them

use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::Mutex;
use async_trait::async_trait;
use bowlbot::services::{Messenger, OutgoingMessage};
use bowlbot::Result;

/// Ids handed out for sent messages start here
pub const FIRST_SENT_ID: i32 = 1000;

#[derive(Debug)]
pub struct RecordingMessenger {
    sent: Mutex<Vec<(i32, OutgoingMessage)>>,
    next_id: AtomicI32,
}

impl RecordingMessenger {
    pub fn new() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            next_id: AtomicI32::new(FIRST_SENT_ID),
        }
    }

    /// Every message sent so far with its assigned id
    pub fn sent(&self) -> Vec<(i32, OutgoingMessage)> {
        self.sent.lock().unwrap().clone()
    }

    pub fn count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }

    pub fn last(&self) -> (i32, OutgoingMessage) {
        self.sent
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("no message was sent")
    }

    pub fn last_text(&self) -> String {
        self.last().1.text
    }

    /// Messages sent after the first `skip`
    pub fn since(&self, skip: usize) -> Vec<OutgoingMessage> {
        self.sent().into_iter().skip(skip).map(|(_, message)| message).collect()
    }
}

#[async_trait]
impl Messenger for RecordingMessenger {
    async fn send(&self, message: OutgoingMessage) -> Result<i32> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        self.sent.lock().unwrap().push((id, message));
        Ok(id)
    }
}
