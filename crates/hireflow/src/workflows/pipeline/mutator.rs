use crate::catalog::{CandidateId, StageId};

use super::board;
use super::domain::Column;
use super::error::{PipelineError, StateDefect};

/// Move the item at `source_index` so it ends up at `destination_index`, shifting the
/// others. A missing or out-of-range destination is a cancelled drag and leaves the order
/// as it was.
pub fn reorder<T: Clone>(
    items: &[T],
    source_index: usize,
    destination_index: Option<usize>,
) -> Vec<T> {
    let mut reordered = items.to_vec();
    let Some(destination_index) = destination_index else {
        return reordered;
    };

    if source_index == destination_index
        || source_index >= reordered.len()
        || destination_index >= reordered.len()
    {
        return reordered;
    }

    let moved = reordered.remove(source_index);
    reordered.insert(destination_index, moved);
    reordered
}

/// Reorder whole columns after a column header drag.
pub fn reorder_columns(
    columns: &[Column],
    source_index: usize,
    destination_index: Option<usize>,
) -> Vec<Column> {
    reorder(columns, source_index, destination_index)
}

/// True when the move would leave the board exactly as it is: same column and the card is
/// already at the clamped destination, or either column id is unknown (cancelled drag).
pub fn is_noop_move(
    columns: &[Column],
    candidate_id: CandidateId,
    source: StageId,
    destination: StageId,
    destination_index: usize,
) -> bool {
    let (Some(source_column), Some(_)) = (
        board::column(columns, source),
        board::column(columns, destination),
    ) else {
        return true;
    };

    if source != destination {
        return false;
    }

    match source_column.position_of(candidate_id) {
        Some(current) => {
            let last = source_column.candidate_ids.len().saturating_sub(1);
            current == destination_index.min(last)
        }
        None => false,
    }
}

/// Move a card from `source` to `destination`, inserting it at `destination_index`
/// (clamped to the destination length). The candidate must currently sit in `source`.
///
/// Status mirroring and notices are handled by [`super::store::PipelineStore::apply`].
pub fn move_candidate(
    columns: &[Column],
    candidate_id: CandidateId,
    source: StageId,
    destination: StageId,
    destination_index: usize,
) -> Result<Vec<Column>, PipelineError> {
    if is_noop_move(columns, candidate_id, source, destination, destination_index) {
        if let Some(column) = board::column(columns, source) {
            if column.position_of(candidate_id).is_none() {
                return Err(StateDefect::CandidateNotInColumn {
                    candidate: candidate_id,
                    column: source,
                }
                .into());
            }
        }
        return Ok(columns.to_vec());
    }

    let mut updated = columns.to_vec();

    let source_column = updated
        .iter_mut()
        .find(|column| column.id == source)
        .ok_or(StateDefect::CandidateNotInColumn {
            candidate: candidate_id,
            column: source,
        })?;
    let position = source_column
        .position_of(candidate_id)
        .ok_or(StateDefect::CandidateNotInColumn {
            candidate: candidate_id,
            column: source,
        })?;
    source_column.candidate_ids.remove(position);

    let destination_column = updated
        .iter_mut()
        .find(|column| column.id == destination)
        .ok_or(StateDefect::CandidateNotInColumn {
            candidate: candidate_id,
            column: destination,
        })?;
    let index = destination_index.min(destination_column.candidate_ids.len());
    destination_column.candidate_ids.insert(index, candidate_id);

    Ok(updated)
}
