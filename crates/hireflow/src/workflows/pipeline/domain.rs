use std::fmt;

use serde::{Deserialize, Serialize};

use crate::catalog::{CandidateId, JobId, Stage, StageId};

/// View state pairing a stage with the ordered candidate cards currently in it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub id: StageId,
    pub title: String,
    pub color: String,
    pub candidate_ids: Vec<CandidateId>,
}

impl Column {
    pub fn empty(id: StageId, title: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            color: color.into(),
            candidate_ids: Vec::new(),
        }
    }

    /// The stage this column renders, as embedded into a candidate's status.
    pub fn stage(&self) -> Stage {
        Stage {
            id: self.id,
            name: self.title.clone(),
            color: self.color.clone(),
        }
    }

    pub fn position_of(&self, candidate_id: CandidateId) -> Option<usize> {
        self.candidate_ids.iter().position(|id| *id == candidate_id)
    }

    pub fn is_empty(&self) -> bool {
        self.candidate_ids.is_empty()
    }
}

/// Drag-and-drop outcome reported by the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PipelineEvent {
    /// A column header was dragged. `destination_index` is absent when the drop was
    /// cancelled.
    ReorderColumns {
        source_index: usize,
        #[serde(default)]
        destination_index: Option<usize>,
    },
    MoveCandidate {
        candidate_id: CandidateId,
        source_column_id: StageId,
        destination_column_id: StageId,
        destination_index: usize,
    },
}

impl PipelineEvent {
    pub const fn label(&self) -> &'static str {
        match self {
            PipelineEvent::ReorderColumns { .. } => "reorder_columns",
            PipelineEvent::MoveCandidate { .. } => "move_candidate",
        }
    }
}

/// Active job restriction on the board view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JobFilter {
    #[default]
    All,
    Job(JobId),
    /// A token that names no job; nothing is visible.
    NoMatch,
}

impl JobFilter {
    pub const ALL_TOKEN: &'static str = "all";

    /// Parse the filter token sent by the job picker: `"all"` or a job id.
    pub fn from_token(token: &str) -> Self {
        let token = token.trim();
        if token.is_empty() || token.eq_ignore_ascii_case(Self::ALL_TOKEN) {
            return Self::All;
        }

        match token.parse::<u32>() {
            Ok(id) => Self::Job(JobId(id)),
            Err(_) => Self::NoMatch,
        }
    }

    pub fn admits(&self, job_id: JobId) -> bool {
        match self {
            JobFilter::All => true,
            JobFilter::Job(expected) => *expected == job_id,
            JobFilter::NoMatch => false,
        }
    }
}

impl fmt::Display for JobFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JobFilter::All => f.write_str(Self::ALL_TOKEN),
            JobFilter::Job(id) => write!(f, "{id}"),
            JobFilter::NoMatch => f.write_str("none"),
        }
    }
}
