use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use super::CandidateId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConversationId(pub u32);

impl std::fmt::Display for ConversationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageSender {
    System,
    User,
    Candidate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: u32,
    pub sender: MessageSender,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub candidate_id: Option<CandidateId>,
    pub content: String,
    pub timestamp: NaiveDateTime,
}

/// Message thread between the hiring team and one candidate. Messages are kept in send
/// order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversation {
    pub id: ConversationId,
    pub candidate_id: CandidateId,
    pub messages: Vec<Message>,
}

impl Conversation {
    pub fn next_message_id(&self) -> u32 {
        self.messages
            .iter()
            .map(|message| message.id)
            .max()
            .unwrap_or(0)
            + 1
    }

    pub fn last_message(&self) -> Option<&Message> {
        self.messages.last()
    }
}

struct ThreadSeed {
    candidate: u32,
    user: u32,
    lines: &'static [(MessageSender, &'static str, i64)],
}

const THREADS: [ThreadSeed; 2] = [
    ThreadSeed {
        candidate: 1,
        user: 1,
        lines: &[
            (MessageSender::System, "Conversation started with Emma Thompson", 5),
            (
                MessageSender::User,
                "Hi Emma, thanks for applying to the Senior Frontend Developer position. We'd like to schedule a technical interview with you.",
                5,
            ),
            (
                MessageSender::Candidate,
                "Hi Alex, thank you for considering my application. I'm available for an interview next week.",
                4,
            ),
            (MessageSender::User, "Great! How about next Tuesday at 10:00 AM PT?", 4),
            (
                MessageSender::Candidate,
                "That works perfectly for me. Looking forward to it!",
                3,
            ),
            (
                MessageSender::User,
                "Excellent! You'll be meeting with me and Taylor from the engineering team. We'll send a calendar invite shortly.",
                3,
            ),
        ],
    },
    ThreadSeed {
        candidate: 3,
        user: 2,
        lines: &[
            (MessageSender::System, "Conversation started with Sophia Martinez", 6),
            (
                MessageSender::User,
                "Hi Sophia, this is Jamie from the recruiting team. Thanks for applying to the Marketing Manager position!",
                6,
            ),
            (
                MessageSender::Candidate,
                "Hi Jamie, thank you for reaching out. I'm very excited about this opportunity.",
                6,
            ),
            (
                MessageSender::User,
                "Your experience looks great! Are you available for a phone screening this week?",
                5,
            ),
            (
                MessageSender::Candidate,
                "Absolutely! I'm free on Wednesday or Thursday afternoon.",
                5,
            ),
            (
                MessageSender::User,
                "Let's schedule for Thursday at 2:00 PM. Does that work for you?",
                4,
            ),
            (MessageSender::Candidate, "Thursday at 2:00 PM is perfect. Thank you!", 4),
        ],
    },
];

pub(super) fn seed(today: NaiveDate) -> Vec<Conversation> {
    (1u32..)
        .zip(THREADS.iter())
        .map(|(id, thread)| {
            let candidate_id = CandidateId(thread.candidate);
            let messages = (1u32..)
                .zip(thread.lines.iter())
                .map(|(message_id, &(sender, content, days_ago))| Message {
                    id: message_id,
                    sender,
                    user_id: (sender == MessageSender::User).then_some(thread.user),
                    candidate_id: (sender == MessageSender::Candidate).then_some(candidate_id),
                    content: content.to_string(),
                    timestamp: seeded_timestamp(today, days_ago, message_id),
                })
                .collect();

            Conversation {
                id: ConversationId(id),
                candidate_id,
                messages,
            }
        })
        .collect()
}

/// Same-day messages are spaced a few minutes apart so send order survives sorting.
fn seeded_timestamp(today: NaiveDate, days_ago: i64, message_id: u32) -> NaiveDateTime {
    let base = NaiveTime::from_hms_opt(9, 0, 0).unwrap_or_default();
    (today - Duration::days(days_ago)).and_time(base)
        + Duration::minutes(i64::from(message_id) * 5)
}
