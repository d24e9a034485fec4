//! Recruiting dashboard: headline totals, application trend, hiring status, department
//! distribution and the recent activity feed, all derived from the live store.

use std::collections::BTreeSet;

use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;

use crate::catalog::{newest_first, Activity, ActivityKind, CandidateId};

use super::store::PipelineStore;
use super::views::PipelineSummary;

/// Entries shown in the dashboard's activity card.
pub const RECENT_ACTIVITY_LIMIT: usize = 5;
/// Days covered by the application trend, ending today.
pub const TREND_DAYS: i64 = 7;

const OPEN_JOB_STATUS: &str = "Open";
const HIRED_STAGE: &str = "Hired";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardTotals {
    /// Applications received within the trend window.
    pub new_applications: usize,
    pub open_jobs: usize,
    pub interviewing: usize,
    pub hired_this_month: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub applications: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DepartmentShare {
    pub department: String,
    pub applications: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub today: NaiveDate,
    pub totals: DashboardTotals,
    pub application_trend: Vec<TrendPoint>,
    pub hiring_status: PipelineSummary,
    pub department_distribution: Vec<DepartmentShare>,
    pub recent_activity: Vec<Activity>,
}

impl DashboardView {
    /// `interview_stage` names the column counted as interviewing.
    pub fn build(store: &PipelineStore, today: NaiveDate, interview_stage: &str) -> Self {
        let application_trend = application_trend(store, today);
        let totals = DashboardTotals {
            new_applications: application_trend.iter().map(|point| point.applications).sum(),
            open_jobs: store
                .jobs()
                .iter()
                .filter(|job| job.status.name == OPEN_JOB_STATUS)
                .count(),
            interviewing: candidates_in_stage(store, interview_stage),
            hired_this_month: hired_this_month(store, today),
        };

        let mut recent_activity = newest_first(store.activities());
        recent_activity.truncate(RECENT_ACTIVITY_LIMIT);

        Self {
            today,
            totals,
            application_trend,
            hiring_status: PipelineSummary::from_columns(store.columns()),
            department_distribution: department_distribution(store),
            recent_activity,
        }
    }
}

fn application_trend(store: &PipelineStore, today: NaiveDate) -> Vec<TrendPoint> {
    (0..TREND_DAYS)
        .rev()
        .map(|days_ago| {
            let date = today - Duration::days(days_ago);
            let applications = store
                .candidates()
                .values()
                .filter(|candidate| candidate.applied_date == date)
                .count();
            TrendPoint { date, applications }
        })
        .collect()
}

fn candidates_in_stage(store: &PipelineStore, title: &str) -> usize {
    store
        .columns()
        .iter()
        .filter(|column| column.title.eq_ignore_ascii_case(title))
        .map(|column| column.candidate_ids.len())
        .sum()
}

/// Candidates sitting in a Hired column whose move there happened in today's calendar month.
fn hired_this_month(store: &PipelineStore, today: NaiveDate) -> usize {
    let hired: BTreeSet<(CandidateId, _)> = store
        .columns()
        .iter()
        .filter(|column| column.title.eq_ignore_ascii_case(HIRED_STAGE))
        .flat_map(|column| column.candidate_ids.iter().map(move |id| (*id, column.id)))
        .collect();

    store
        .activities()
        .iter()
        .filter(|activity| activity.kind == ActivityKind::StatusChange)
        .filter(|activity| {
            let date = activity.timestamp.date();
            date <= today && date.year() == today.year() && date.month() == today.month()
        })
        .filter_map(|activity| Some((activity.candidate_id?, activity.stage_id?)))
        .filter(|placement| hired.contains(placement))
        .map(|(candidate_id, _)| candidate_id)
        .collect::<BTreeSet<_>>()
        .len()
}

/// Applications per department, summed over jobs in catalog order.
fn department_distribution(store: &PipelineStore) -> Vec<DepartmentShare> {
    let mut shares: Vec<DepartmentShare> = Vec::new();
    for job in store.jobs() {
        match shares
            .iter_mut()
            .find(|share| share.department == job.department.name)
        {
            Some(share) => share.applications += job.applications,
            None => shares.push(DepartmentShare {
                department: job.department.name.clone(),
                applications: job.applications,
            }),
        }
    }
    shares
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{EntityCatalog, StageId};
    use crate::workflows::pipeline::PipelineEvent;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 10, 1).expect("valid date")
    }

    fn store() -> PipelineStore {
        PipelineStore::from_catalog(&EntityCatalog::seeded(today()))
    }

    #[test]
    fn seeded_dashboard_totals() {
        let view = DashboardView::build(&store(), today(), "Interview");
        assert_eq!(
            view.totals,
            DashboardTotals {
                new_applications: 5,
                open_jobs: 6,
                interviewing: 2,
                hired_this_month: 0,
            }
        );
        assert_eq!(view.application_trend.len(), 7);
        assert_eq!(view.application_trend[6].date, today());
        assert_eq!(view.hiring_status.total, 9);
    }

    #[test]
    fn hires_count_toward_the_month_they_happened() {
        let september_end = NaiveDate::from_ymd_opt(2025, 9, 30).expect("valid date");
        let view = DashboardView::build(&store(), september_end, "Interview");
        assert_eq!(view.totals.hired_this_month, 1);
    }

    #[test]
    fn a_hire_moved_back_out_no_longer_counts() {
        let mut store = store();
        let at = today().and_hms_opt(11, 0, 0).expect("valid time");
        store
            .apply_at(
                PipelineEvent::MoveCandidate {
                    candidate_id: CandidateId(5),
                    source_column_id: StageId(1),
                    destination_column_id: StageId(6),
                    destination_index: 0,
                },
                at,
            )
            .expect("hired");
        assert_eq!(
            DashboardView::build(&store, today(), "Interview").totals.hired_this_month,
            1
        );

        store
            .apply_at(
                PipelineEvent::MoveCandidate {
                    candidate_id: CandidateId(5),
                    source_column_id: StageId(6),
                    destination_column_id: StageId(4),
                    destination_index: 0,
                },
                at,
            )
            .expect("moved back");
        assert_eq!(
            DashboardView::build(&store, today(), "Interview").totals.hired_this_month,
            0
        );
    }

    #[test]
    fn departments_sum_job_applications_in_catalog_order() {
        let shares = department_distribution(&store());
        assert_eq!(shares.len(), 8);
        assert_eq!(
            shares[0],
            DepartmentShare {
                department: "Engineering".to_string(),
                applications: 18,
            }
        );
        assert_eq!(shares[7].department, "Human Resources");
    }

    #[test]
    fn recent_activity_is_capped_and_newest_first() {
        let view = DashboardView::build(&store(), today(), "Interview");
        let ids: Vec<u32> = view.recent_activity.iter().map(|a| a.id).collect();
        assert_eq!(ids, [8, 5, 2, 1, 3]);
    }
}
