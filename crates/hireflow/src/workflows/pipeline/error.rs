use crate::catalog::{CandidateId, StageId};

/// Failure of a pipeline operation. The board is left untouched in every case.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PipelineError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Constraint(#[from] ConstraintError),
    #[error(transparent)]
    Defect(#[from] StateDefect),
}

/// User input failed a precondition.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("stage name cannot be empty")]
    EmptyStageName,
    #[error("stage {0} does not exist")]
    UnknownStage(StageId),
}

/// The operation would break a structural invariant of the board.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConstraintError {
    #[error("you must keep at least one stage in the workflow")]
    LastStage,
    #[error("stage {stage} contains {candidates} candidate(s); move them before deleting")]
    StageNotEmpty { stage: StageId, candidates: usize },
}

/// Internal inconsistency between the caller's view and the board. Indicates a caller bug.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StateDefect {
    #[error("candidate {candidate} is not in column {column}")]
    CandidateNotInColumn {
        candidate: CandidateId,
        column: StageId,
    },
    #[error("candidate {0} is not in the catalog")]
    UnknownCandidate(CandidateId),
    #[error("candidate {candidate} appears in {placements} columns")]
    DuplicatePlacement {
        candidate: CandidateId,
        placements: usize,
    },
    #[error("candidate {candidate} sits in column {column} but its status is stage {status}")]
    StatusMismatch {
        candidate: CandidateId,
        column: StageId,
        status: StageId,
    },
    #[error("candidate {0} is missing from the board")]
    Unplaced(CandidateId),
}
