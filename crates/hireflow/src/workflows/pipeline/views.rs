use chrono::NaiveDate;
use serde::Serialize;

use crate::catalog::{Candidate, CandidateId, Job, JobId, Stage, StageId};

use super::board::placed_count;
use super::domain::{Column, JobFilter};
use super::scoring::CandidateAnnotation;
use super::store::PipelineStore;

#[derive(Debug, Clone, Serialize)]
pub struct CandidateCard {
    pub id: CandidateId,
    pub name: String,
    pub job_id: JobId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_title: Option<String>,
    pub applied_date: NaiveDate,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ColumnView {
    pub id: StageId,
    pub title: String,
    pub color: String,
    pub count: usize,
    pub cards: Vec<CandidateCard>,
}

/// Board as rendered under a job filter.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineBoardView {
    pub filter: String,
    pub columns: Vec<ColumnView>,
}

impl PipelineBoardView {
    pub fn build(store: &PipelineStore, filter: JobFilter) -> Self {
        let columns = store
            .view(filter)
            .into_iter()
            .map(|column| column_view(store, column))
            .collect();

        Self {
            filter: filter.to_string(),
            columns,
        }
    }
}

fn column_view(store: &PipelineStore, column: Column) -> ColumnView {
    let cards: Vec<CandidateCard> = column
        .candidate_ids
        .iter()
        .filter_map(|id| store.candidate(*id))
        .map(|candidate| CandidateCard {
            id: candidate.id,
            name: candidate.name.clone(),
            job_id: candidate.job_id,
            job_title: store.job(candidate.job_id).map(|job| job.title.clone()),
            applied_date: candidate.applied_date,
            tags: candidate.tags.clone(),
        })
        .collect();

    ColumnView {
        id: column.id,
        title: column.title,
        color: column.color,
        count: cards.len(),
        cards,
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StageCountEntry {
    pub stage_id: StageId,
    pub title: String,
    pub color: String,
    pub candidates: usize,
    pub share_pct: f32,
}

/// Hiring status breakdown across the board, in column order.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineSummary {
    pub total: usize,
    pub stages: Vec<StageCountEntry>,
}

impl PipelineSummary {
    pub fn from_columns(columns: &[Column]) -> Self {
        let total = placed_count(columns);
        let stages = columns
            .iter()
            .map(|column| {
                let candidates = column.candidate_ids.len();
                let share_pct = if total == 0 {
                    0.0
                } else {
                    (candidates as f32 / total as f32) * 100.0
                };
                StageCountEntry {
                    stage_id: column.id,
                    title: column.title.clone(),
                    color: column.color.clone(),
                    candidates,
                    share_pct,
                }
            })
            .collect();

        Self { total, stages }
    }

    /// Stage holding the most candidates; ties go to the earlier column.
    pub fn busiest_stage(&self) -> Option<&StageCountEntry> {
        self.stages
            .iter()
            .rev()
            .filter(|entry| entry.candidates > 0)
            .max_by_key(|entry| entry.candidates)
    }
}

/// Candidate drawer contents.
#[derive(Debug, Clone, Serialize)]
pub struct CandidateDetailView {
    pub id: CandidateId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub applied_date: NaiveDate,
    pub status: Stage,
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job: Option<Job>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annotation: Option<CandidateAnnotation>,
}

impl CandidateDetailView {
    pub fn new(
        candidate: &Candidate,
        job: Option<&Job>,
        annotation: Option<CandidateAnnotation>,
    ) -> Self {
        Self {
            id: candidate.id,
            name: candidate.name.clone(),
            email: candidate.email.clone(),
            phone: candidate.phone.clone(),
            location: candidate.location.clone(),
            applied_date: candidate.applied_date,
            status: candidate.status.clone(),
            tags: candidate.tags.clone(),
            job: job.cloned(),
            annotation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::EntityCatalog;

    fn store() -> PipelineStore {
        PipelineStore::from_catalog(&EntityCatalog::seeded(
            NaiveDate::from_ymd_opt(2025, 10, 1).expect("valid date"),
        ))
    }

    #[test]
    fn board_view_resolves_cards() {
        let view = PipelineBoardView::build(&store(), JobFilter::Job(JobId(1)));
        assert_eq!(view.filter, "1");
        let interview = &view.columns[2];
        assert_eq!(interview.count, 1);
        assert_eq!(interview.cards[0].name, "Emma Thompson");
        assert_eq!(
            interview.cards[0].job_title.as_deref(),
            Some("Senior Frontend Developer")
        );
    }

    #[test]
    fn summary_counts_every_stage() {
        let summary = PipelineSummary::from_columns(store().columns());
        assert_eq!(summary.total, 9);
        assert_eq!(summary.stages.len(), 7);
        let shares: f32 = summary.stages.iter().map(|entry| entry.share_pct).sum();
        assert!((shares - 100.0).abs() < 0.01);
        assert_eq!(
            summary.busiest_stage().map(|entry| entry.stage_id),
            Some(StageId(2))
        );
    }

    #[test]
    fn empty_board_has_zero_shares() {
        let summary = PipelineSummary::from_columns(&[Column::empty(StageId(1), "New", "x")]);
        assert_eq!(summary.total, 0);
        assert_eq!(summary.stages[0].share_pct, 0.0);
        assert!(summary.busiest_stage().is_none());
    }
}
