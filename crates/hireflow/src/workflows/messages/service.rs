use std::sync::Mutex;

use chrono::{Local, NaiveDateTime};
use tracing::{info, warn};

use crate::catalog::{ConversationId, EntityCatalog, Message};

use super::inbox::{ConversationSummary, ConversationView, Inbox, MessageError};

/// Candidate messaging: conversation list, thread view and sending.
pub struct MessageService {
    inbox: Mutex<Inbox>,
}

impl MessageService {
    pub fn new(catalog: &EntityCatalog) -> Self {
        Self::with_inbox(Inbox::from_catalog(catalog))
    }

    pub fn with_inbox(inbox: Inbox) -> Self {
        Self {
            inbox: Mutex::new(inbox),
        }
    }

    pub fn conversations(&self, search: Option<&str>) -> Vec<ConversationSummary> {
        self.inbox
            .lock()
            .expect("inbox mutex poisoned")
            .summaries(search)
    }

    pub fn conversation(&self, id: ConversationId) -> Result<ConversationView, MessageError> {
        self.inbox.lock().expect("inbox mutex poisoned").thread(id)
    }

    pub fn send(
        &self,
        id: ConversationId,
        user_id: u32,
        content: &str,
    ) -> Result<Message, MessageError> {
        self.send_at(id, user_id, content, Local::now().naive_local())
    }

    pub fn send_at(
        &self,
        id: ConversationId,
        user_id: u32,
        content: &str,
        at: NaiveDateTime,
    ) -> Result<Message, MessageError> {
        let sent = self
            .inbox
            .lock()
            .expect("inbox mutex poisoned")
            .send(id, user_id, content, at);

        match &sent {
            Ok(message) => {
                info!(conversation_id = %id, message_id = message.id, user_id, "message sent")
            }
            Err(err) => warn!(conversation_id = %id, user_id, error = %err, "message rejected"),
        }
        sent
    }
}
