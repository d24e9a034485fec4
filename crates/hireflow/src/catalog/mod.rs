//! Read-only entity catalog backing the recruiting dashboard.
//!
//! The catalog is seeded once at process start and never refreshed. Pipeline state that
//! changes at runtime (column order, candidate status, the activity feed) lives in
//! [`crate::workflows::pipeline::PipelineStore`], which snapshots the catalog on creation.
//! Message threads are copied into [`crate::workflows::messages::Inbox`] the same way.

mod activity;
mod conversation;
mod search;
mod seed;

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub use activity::{newest_first, Activity, ActivityKind};
pub use conversation::{Conversation, ConversationId, Message, MessageSender};
pub use search::{tag_vocabulary, CandidateQuery, JobQuery};

/// Identifier of a pipeline stage. Column ids share this space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StageId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CandidateId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(pub u32);

impl fmt::Display for StageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for CandidateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A named step in the hiring pipeline. `color` is a presentation token such as
/// `bg-indigo-500`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stage {
    pub id: StageId,
    pub name: String,
    pub color: String,
}

impl Stage {
    pub fn new(id: u32, name: &str, color: &str) -> Self {
        Self {
            id: StageId(id),
            name: name.to_string(),
            color: color.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    pub id: u32,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub id: u32,
    pub name: String,
}

/// Posting state of a job (Open, Paused, Closed, Draft).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobStatus {
    pub id: u32,
    pub name: String,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u32,
    pub name: String,
    pub email: String,
    pub role: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    pub id: JobId,
    pub title: String,
    pub department: Department,
    pub location: Location,
    pub status: JobStatus,
    pub posted_date: NaiveDate,
    pub applications: u32,
}

/// A job applicant. `status` embeds the full stage by value so readers never need a second
/// lookup to render it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: CandidateId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub job_id: JobId,
    pub applied_date: NaiveDate,
    pub status: Stage,
    /// Insertion order is the display order.
    pub tags: Vec<String>,
}

/// Static collections of jobs, candidates, users, stages and lookup tables, plus the seeded
/// activity feed and message threads.
#[derive(Debug, Clone, Default)]
pub struct EntityCatalog {
    pub users: Vec<User>,
    pub departments: Vec<Department>,
    pub locations: Vec<Location>,
    pub job_statuses: Vec<JobStatus>,
    pub stages: Vec<Stage>,
    pub jobs: Vec<Job>,
    pub candidates: Vec<Candidate>,
    pub activities: Vec<Activity>,
    pub conversations: Vec<Conversation>,
}

impl EntityCatalog {
    /// Build the demo catalog with posted/applied dates relative to `today`.
    pub fn seeded(today: NaiveDate) -> Self {
        seed::build(today)
    }

    pub fn job(&self, id: JobId) -> Option<&Job> {
        self.jobs.iter().find(|job| job.id == id)
    }

    pub fn candidate(&self, id: CandidateId) -> Option<&Candidate> {
        self.candidates
            .iter()
            .find(|candidate| candidate.id == id)
    }

    pub fn stage(&self, id: StageId) -> Option<&Stage> {
        self.stages.iter().find(|stage| stage.id == id)
    }
}
