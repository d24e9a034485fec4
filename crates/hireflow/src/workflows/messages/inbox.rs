use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::catalog::{
    CandidateId, Conversation, ConversationId, EntityCatalog, Message, MessageSender, User,
};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MessageError {
    #[error("message cannot be empty")]
    EmptyMessage,
    #[error("user {0} is not a member of the hiring team")]
    UnknownUser(u32),
    #[error("conversation {0} not found")]
    UnknownConversation(ConversationId),
}

/// Row in the conversation list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConversationSummary {
    pub id: ConversationId,
    pub candidate_id: CandidateId,
    pub candidate_name: String,
    pub message_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_message: Option<Message>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConversationView {
    pub id: ConversationId,
    pub candidate_id: CandidateId,
    pub candidate_name: String,
    pub messages: Vec<Message>,
}

/// Message threads with the candidate names and team members needed to search and post.
#[derive(Debug, Clone)]
pub struct Inbox {
    conversations: Vec<Conversation>,
    candidate_names: BTreeMap<CandidateId, String>,
    users: Vec<User>,
}

impl Inbox {
    pub fn new(
        conversations: Vec<Conversation>,
        candidate_names: BTreeMap<CandidateId, String>,
        users: Vec<User>,
    ) -> Self {
        Self {
            conversations,
            candidate_names,
            users,
        }
    }

    pub fn from_catalog(catalog: &EntityCatalog) -> Self {
        let candidate_names = catalog
            .candidates
            .iter()
            .map(|candidate| (candidate.id, candidate.name.clone()))
            .collect();
        Self::new(
            catalog.conversations.clone(),
            candidate_names,
            catalog.users.clone(),
        )
    }

    /// Threads whose candidate name contains `search`, ignoring case. A blank search lists
    /// every thread. Threads with an unknown candidate are never listed.
    pub fn summaries(&self, search: Option<&str>) -> Vec<ConversationSummary> {
        let needle = search
            .map(str::trim)
            .filter(|needle| !needle.is_empty())
            .map(str::to_lowercase);

        self.conversations
            .iter()
            .filter_map(|conversation| {
                let name = self.candidate_names.get(&conversation.candidate_id)?;
                if let Some(needle) = &needle {
                    if !name.to_lowercase().contains(needle.as_str()) {
                        return None;
                    }
                }
                Some(ConversationSummary {
                    id: conversation.id,
                    candidate_id: conversation.candidate_id,
                    candidate_name: name.clone(),
                    message_count: conversation.messages.len(),
                    last_message: conversation.last_message().cloned(),
                })
            })
            .collect()
    }

    pub fn thread(&self, id: ConversationId) -> Result<ConversationView, MessageError> {
        let conversation = self.find(id)?;
        Ok(ConversationView {
            id: conversation.id,
            candidate_id: conversation.candidate_id,
            candidate_name: self
                .candidate_names
                .get(&conversation.candidate_id)
                .cloned()
                .unwrap_or_default(),
            messages: conversation.messages.clone(),
        })
    }

    /// Append a team message. Blank content is rejected; surrounding whitespace is dropped.
    pub fn send(
        &mut self,
        id: ConversationId,
        user_id: u32,
        content: &str,
        at: NaiveDateTime,
    ) -> Result<Message, MessageError> {
        let content = content.trim();
        if content.is_empty() {
            return Err(MessageError::EmptyMessage);
        }
        if !self.users.iter().any(|user| user.id == user_id) {
            return Err(MessageError::UnknownUser(user_id));
        }

        let conversation = self
            .conversations
            .iter_mut()
            .find(|conversation| conversation.id == id)
            .ok_or(MessageError::UnknownConversation(id))?;
        let message = Message {
            id: conversation.next_message_id(),
            sender: MessageSender::User,
            user_id: Some(user_id),
            candidate_id: None,
            content: content.to_string(),
            timestamp: at,
        };
        conversation.messages.push(message.clone());
        Ok(message)
    }

    fn find(&self, id: ConversationId) -> Result<&Conversation, MessageError> {
        self.conversations
            .iter()
            .find(|conversation| conversation.id == id)
            .ok_or(MessageError::UnknownConversation(id))
    }
}
