use std::collections::BTreeMap;

use crate::catalog::{Candidate, CandidateId};

use super::domain::{Column, JobFilter};

/// Project the board down to the candidates admitted by `filter`. The input is never
/// modified; drag events keep operating on the unfiltered columns. Under a job filter, ids
/// without a backing candidate are dropped.
pub fn apply_filter(
    columns: &[Column],
    filter: JobFilter,
    candidates: &BTreeMap<CandidateId, Candidate>,
) -> Vec<Column> {
    if filter == JobFilter::All {
        return columns.to_vec();
    }

    columns
        .iter()
        .map(|column| Column {
            candidate_ids: column
                .candidate_ids
                .iter()
                .copied()
                .filter(|id| {
                    candidates
                        .get(id)
                        .is_some_and(|candidate| filter.admits(candidate.job_id))
                })
                .collect(),
            ..column.clone()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{EntityCatalog, JobId};
    use crate::workflows::pipeline::board::initialize;
    use chrono::NaiveDate;

    fn fixture() -> (Vec<Column>, BTreeMap<CandidateId, Candidate>) {
        let catalog =
            EntityCatalog::seeded(NaiveDate::from_ymd_opt(2025, 10, 1).expect("valid date"));
        let columns = initialize(&catalog.stages, &catalog.candidates);
        let index = catalog
            .candidates
            .into_iter()
            .map(|candidate| (candidate.id, candidate))
            .collect();
        (columns, index)
    }

    #[test]
    fn all_returns_equal_copy() {
        let (columns, index) = fixture();
        assert_eq!(apply_filter(&columns, JobFilter::All, &index), columns);
    }

    #[test]
    fn job_filter_keeps_order_and_structure() {
        let (columns, index) = fixture();
        let filtered = apply_filter(&columns, JobFilter::Job(JobId(1)), &index);

        assert_eq!(filtered.len(), columns.len());
        let visible: Vec<_> = filtered
            .iter()
            .flat_map(|column| column.candidate_ids.iter().map(|id| id.0))
            .collect();
        assert_eq!(visible, [2, 1]);
        assert_eq!(filtered[2].title, "Interview");
    }

    #[test]
    fn unknown_ids_and_no_match_are_dropped() {
        let (mut columns, index) = fixture();
        columns[0].candidate_ids.push(CandidateId(404));
        let snapshot = columns.clone();

        let filtered = apply_filter(&columns, JobFilter::Job(JobId(4)), &index);
        assert_eq!(filtered[0].candidate_ids, [CandidateId(5)]);
        assert_eq!(columns, snapshot, "input must not be mutated");

        let none = apply_filter(&columns, JobFilter::NoMatch, &index);
        assert!(none.iter().all(Column::is_empty));
    }
}
