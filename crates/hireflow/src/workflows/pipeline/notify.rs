use serde::{Deserialize, Serialize};

use crate::catalog::{CandidateId, StageId};

/// Presentation notice produced by a pipeline change (rendered as a toast).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PipelineNotice {
    StageChanged {
        candidate_id: CandidateId,
        candidate_name: String,
        stage_id: StageId,
        stage_name: String,
    },
    StagesReordered,
    /// Follow-up suggestion published shortly after a candidate reaches the advisory stage.
    Advisory {
        candidate_id: CandidateId,
        candidate_name: String,
        stage_name: String,
    },
}

impl PipelineNotice {
    pub fn title(&self) -> String {
        match self {
            PipelineNotice::StageChanged { stage_name, .. } => {
                format!("Candidate moved to {stage_name}")
            }
            PipelineNotice::StagesReordered => "Pipeline updated".to_string(),
            PipelineNotice::Advisory { .. } => "AI Recommendation".to_string(),
        }
    }

    pub fn description(&self) -> String {
        match self {
            PipelineNotice::StageChanged {
                candidate_name,
                stage_name,
                ..
            } => format!("{candidate_name} is now in the {stage_name} stage."),
            PipelineNotice::StagesReordered => {
                "The workflow stages have been reordered.".to_string()
            }
            PipelineNotice::Advisory { candidate_name, .. } => format!(
                "Based on {candidate_name}'s resume, we suggest focusing on their project management experience."
            ),
        }
    }
}

/// Outbound hook for notices (toast feed, chat bridge, e-mail).
pub trait NotificationPublisher: Send + Sync {
    fn publish(&self, notice: PipelineNotice) -> Result<(), NotifyError>;
}

#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("notification transport unavailable: {0}")]
    Transport(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_change_text_names_candidate_and_stage() {
        let notice = PipelineNotice::StageChanged {
            candidate_id: CandidateId(1),
            candidate_name: "Emma Thompson".to_string(),
            stage_id: StageId(3),
            stage_name: "Interview".to_string(),
        };
        assert_eq!(notice.title(), "Candidate moved to Interview");
        assert_eq!(
            notice.description(),
            "Emma Thompson is now in the Interview stage."
        );
    }

    #[test]
    fn advisory_mentions_candidate() {
        let notice = PipelineNotice::Advisory {
            candidate_id: CandidateId(6),
            candidate_name: "Michael Brown".to_string(),
            stage_name: "Interview".to_string(),
        };
        assert!(notice.description().starts_with("Based on Michael Brown's resume"));
    }
}
