//! Candidate messaging: per-candidate threads, a name search over them, and posting as a
//! member of the hiring team.

pub mod inbox;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use inbox::{ConversationSummary, ConversationView, Inbox, MessageError};
pub use router::messages_router;
pub use service::MessageService;
