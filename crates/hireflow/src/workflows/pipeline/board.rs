use std::collections::BTreeMap;

use crate::catalog::{Candidate, CandidateId, Stage, StageId};

use super::domain::Column;
use super::error::StateDefect;

/// Derive the board from the stage catalog. Columns follow catalog order and each column
/// lists the candidates whose status is that stage, in catalog order. Candidates whose
/// status names no known stage are left off the board.
pub fn initialize<'a, I>(stages: &[Stage], candidates: I) -> Vec<Column>
where
    I: IntoIterator<Item = &'a Candidate>,
{
    let mut columns: Vec<Column> = stages
        .iter()
        .map(|stage| Column::empty(stage.id, stage.name.clone(), stage.color.clone()))
        .collect();

    for candidate in candidates {
        if let Some(column) = columns
            .iter_mut()
            .find(|column| column.id == candidate.status.id)
        {
            column.candidate_ids.push(candidate.id);
        }
    }

    columns
}

/// Total number of cards across all columns.
pub fn placed_count(columns: &[Column]) -> usize {
    columns.iter().map(|column| column.candidate_ids.len()).sum()
}

pub fn column(columns: &[Column], id: StageId) -> Option<&Column> {
    columns.iter().find(|column| column.id == id)
}

/// Column and index currently holding `candidate_id`.
pub fn locate(columns: &[Column], candidate_id: CandidateId) -> Option<(StageId, usize)> {
    columns.iter().find_map(|column| {
        column
            .position_of(candidate_id)
            .map(|index| (column.id, index))
    })
}

/// Check that every candidate whose status is a board stage appears exactly once, in that
/// stage's column, and that nothing else is on the board.
pub fn verify_membership<'a, I>(columns: &[Column], candidates: I) -> Result<(), StateDefect>
where
    I: IntoIterator<Item = &'a Candidate>,
{
    let mut placements: BTreeMap<CandidateId, Vec<StageId>> = BTreeMap::new();
    for column in columns {
        for candidate_id in &column.candidate_ids {
            placements.entry(*candidate_id).or_default().push(column.id);
        }
    }

    for candidate in candidates {
        let on_board = column(columns, candidate.status.id).is_some();
        match placements.remove(&candidate.id) {
            None if on_board => return Err(StateDefect::Unplaced(candidate.id)),
            None => {}
            Some(found) if found.len() > 1 => {
                return Err(StateDefect::DuplicatePlacement {
                    candidate: candidate.id,
                    placements: found.len(),
                })
            }
            Some(found) => {
                let column = found[0];
                if column != candidate.status.id {
                    return Err(StateDefect::StatusMismatch {
                        candidate: candidate.id,
                        column,
                        status: candidate.status.id,
                    });
                }
            }
        }
    }

    match placements.into_keys().next() {
        Some(stray) => Err(StateDefect::UnknownCandidate(stray)),
        None => Ok(()),
    }
}
