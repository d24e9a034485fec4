use super::common::*;
use crate::catalog::{CandidateId, ConversationId, MessageSender};
use crate::workflows::messages::MessageError;

#[test]
fn search_matches_candidate_names_ignoring_case() {
    let service = build_service();

    assert_eq!(service.conversations(None).len(), 2);
    assert_eq!(service.conversations(Some("   ")).len(), 2);

    let sophia = service.conversations(Some("MARTINEZ"));
    assert_eq!(sophia.len(), 1);
    assert_eq!(sophia[0].candidate_id, CandidateId(3));
    assert_eq!(sophia[0].message_count, 7);
    assert_eq!(
        sophia[0].last_message.as_ref().map(|message| message.content.as_str()),
        Some("Thursday at 2:00 PM is perfect. Thank you!")
    );

    assert!(service.conversations(Some("david")).is_empty());
}

#[test]
fn sending_appends_a_trimmed_team_message() {
    let service = build_service();
    let emma = ConversationId(1);

    let sent = service
        .send_at(emma, 1, "  See you Tuesday!  ", noon())
        .expect("message sent");
    assert_eq!(sent.id, 7);
    assert_eq!(sent.sender, MessageSender::User);
    assert_eq!(sent.user_id, Some(1));
    assert_eq!(sent.content, "See you Tuesday!");

    let thread = service.conversation(emma).expect("thread exists");
    assert_eq!(thread.candidate_name, "Emma Thompson");
    assert_eq!(thread.messages.last(), Some(&sent));
    assert_eq!(service.conversations(Some("emma"))[0].message_count, 7);
}

#[test]
fn sending_rejects_blank_text_unknown_users_and_missing_threads() {
    let service = build_service();

    assert_eq!(
        service.send_at(ConversationId(1), 1, " \n ", noon()),
        Err(MessageError::EmptyMessage)
    );
    assert_eq!(
        service.send_at(ConversationId(1), 42, "Hello", noon()),
        Err(MessageError::UnknownUser(42))
    );
    assert_eq!(
        service.send_at(ConversationId(9), 1, "Hello", noon()),
        Err(MessageError::UnknownConversation(ConversationId(9)))
    );
    assert_eq!(
        service.conversation(ConversationId(1)).map(|thread| thread.messages.len()),
        Ok(6)
    );
}
