//! Contact-form messages landing in the shared inbox.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::grid::Record;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageStatus {
    New,
    Read,
    Replied,
}

impl MessageStatus {
    pub fn label(self) -> &'static str {
        match self {
            MessageStatus::New => "New",
            MessageStatus::Read => "Read",
            MessageStatus::Replied => "Replied",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InboxMessage {
    pub id: String,
    pub sender: String,
    pub email: String,
    pub subject: String,
    pub body: String,
    pub received: NaiveDate,
    pub status: MessageStatus,
    pub reply: Option<String>,
}

impl InboxMessage {
    /// Opening a message marks it read. Replied messages keep their status.
    pub fn mark_read(&mut self) {
        if self.status == MessageStatus::New {
            self.status = MessageStatus::Read;
        }
    }

    pub fn record_reply(&mut self, body: String) {
        self.reply = Some(body);
        self.status = MessageStatus::Replied;
    }
}

impl Record for InboxMessage {
    fn id(&self) -> &str {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(status: MessageStatus) -> InboxMessage {
        InboxMessage {
            id: "m1".into(),
            sender: "Dana Whitfield".into(),
            email: "dana@example.com".into(),
            subject: "Partnership enquiry".into(),
            body: "Hello, we would like to talk.".into(),
            received: NaiveDate::from_ymd_opt(2024, 3, 14).unwrap(),
            status,
            reply: None,
        }
    }

    #[test]
    fn test_mark_read_only_promotes_new() {
        let mut new = message(MessageStatus::New);
        new.mark_read();
        assert_eq!(new.status, MessageStatus::Read);

        let mut replied = message(MessageStatus::Replied);
        replied.mark_read();
        assert_eq!(replied.status, MessageStatus::Replied);
    }

    #[test]
    fn test_record_reply_sets_status() {
        let mut msg = message(MessageStatus::Read);
        msg.record_reply("Thanks for reaching out.".into());
        assert_eq!(msg.status, MessageStatus::Replied);
        assert!(msg.reply.is_some());
    }
}
