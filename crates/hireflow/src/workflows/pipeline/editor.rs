use crate::catalog::StageId;

use super::domain::Column;
use super::error::{ConstraintError, PipelineError, ValidationError};

fn sanitized_name(name: &str) -> Result<String, ValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyStageName);
    }
    Ok(trimmed.to_string())
}

/// Id for a new stage: one past the highest id on the board. Ids of deleted stages are not
/// reused unless they were the highest.
pub fn next_stage_id(columns: &[Column]) -> StageId {
    let max = columns.iter().map(|column| column.id.0).max().unwrap_or(0);
    StageId(max + 1)
}

/// Append an empty stage.
pub fn add_stage(
    columns: &[Column],
    name: &str,
    color: &str,
) -> Result<Vec<Column>, PipelineError> {
    let title = sanitized_name(name)?;
    let mut updated = columns.to_vec();
    updated.push(Column::empty(next_stage_id(columns), title, color));
    Ok(updated)
}

/// Rename or recolor a stage. Cards stay where they are.
pub fn update_stage(
    columns: &[Column],
    id: StageId,
    name: &str,
    color: &str,
) -> Result<Vec<Column>, PipelineError> {
    let title = sanitized_name(name)?;
    let mut updated = columns.to_vec();
    let column = updated
        .iter_mut()
        .find(|column| column.id == id)
        .ok_or(ValidationError::UnknownStage(id))?;

    column.title = title;
    column.color = color.to_string();
    Ok(updated)
}

/// Remove an empty stage. The last remaining stage can never be removed.
pub fn delete_stage(columns: &[Column], id: StageId) -> Result<Vec<Column>, PipelineError> {
    if columns.len() <= 1 {
        return Err(ConstraintError::LastStage.into());
    }

    let target = columns
        .iter()
        .find(|column| column.id == id)
        .ok_or(ValidationError::UnknownStage(id))?;

    if !target.is_empty() {
        return Err(ConstraintError::StageNotEmpty {
            stage: id,
            candidates: target.candidate_ids.len(),
        }
        .into());
    }

    Ok(columns
        .iter()
        .filter(|column| column.id != id)
        .cloned()
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CandidateId;

    fn board() -> Vec<Column> {
        vec![
            Column {
                id: StageId(1),
                title: "New".to_string(),
                color: "bg-blue-500".to_string(),
                candidate_ids: vec![CandidateId(5)],
            },
            Column::empty(StageId(4), "Offer", "bg-pink-500"),
        ]
    }

    #[test]
    fn add_rejects_blank_names() {
        for name in ["", "   "] {
            assert_eq!(
                add_stage(&board(), name, "bg-blue-500"),
                Err(PipelineError::Validation(ValidationError::EmptyStageName))
            );
        }
    }

    #[test]
    fn add_appends_empty_column_with_next_id() {
        let columns = board();
        let updated = add_stage(&columns, "Screening", "bg-blue-500").expect("stage added");

        assert_eq!(updated.len(), columns.len() + 1);
        let added = updated.last().expect("new column");
        assert_eq!(added.id, StageId(5));
        assert_eq!(added.title, "Screening");
        assert!(added.is_empty());
        assert_eq!(&updated[..columns.len()], &columns[..]);
    }

    #[test]
    fn add_to_empty_board_starts_at_one() {
        assert_eq!(next_stage_id(&[]), StageId(1));
    }

    #[test]
    fn update_changes_title_and_color_only() {
        let updated =
            update_stage(&board(), StageId(1), "  Applied ", "bg-green-500").expect("updated");
        assert_eq!(updated[0].title, "Applied");
        assert_eq!(updated[0].color, "bg-green-500");
        assert_eq!(updated[0].candidate_ids, [CandidateId(5)]);
    }

    #[test]
    fn update_validates_name_and_id() {
        assert_eq!(
            update_stage(&board(), StageId(1), " ", "bg-green-500"),
            Err(PipelineError::Validation(ValidationError::EmptyStageName))
        );
        assert_eq!(
            update_stage(&board(), StageId(9), "Hired", "bg-green-500"),
            Err(PipelineError::Validation(ValidationError::UnknownStage(
                StageId(9)
            )))
        );
    }

    #[test]
    fn delete_guards_non_empty_and_last_stage() {
        assert_eq!(
            delete_stage(&board(), StageId(1)),
            Err(PipelineError::Constraint(ConstraintError::StageNotEmpty {
                stage: StageId(1),
                candidates: 1,
            }))
        );

        let single = vec![Column::empty(StageId(1), "New", "bg-blue-500")];
        assert_eq!(
            delete_stage(&single, StageId(1)),
            Err(PipelineError::Constraint(ConstraintError::LastStage))
        );
    }

    #[test]
    fn delete_removes_empty_stage() {
        let updated = delete_stage(&board(), StageId(4)).expect("deleted");
        assert_eq!(updated.len(), 1);
        assert_eq!(updated[0].id, StageId(1));

        let readded = add_stage(&updated, "Offer", "bg-pink-500").expect("added");
        assert_eq!(readded[1].id, StageId(2));
    }
}
