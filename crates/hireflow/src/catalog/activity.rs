use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use super::{CandidateId, JobId, StageId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    Application,
    StatusChange,
    Interview,
    JobPost,
    Note,
}

/// One line of the dashboard's recent activity feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    pub id: u32,
    #[serde(rename = "type")]
    pub kind: ActivityKind,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub candidate_id: Option<CandidateId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_id: Option<JobId>,
    /// Destination stage of a status change.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stage_id: Option<StageId>,
    pub timestamp: NaiveDateTime,
}

impl Activity {
    pub fn status_change(
        id: u32,
        candidate_name: &str,
        candidate_id: CandidateId,
        job_id: JobId,
        stage_id: StageId,
        stage_name: &str,
        timestamp: NaiveDateTime,
    ) -> Self {
        Self {
            id,
            kind: ActivityKind::StatusChange,
            content: format!("{candidate_name} moved to {stage_name} stage"),
            candidate_id: Some(candidate_id),
            job_id: Some(job_id),
            stage_id: Some(stage_id),
            timestamp,
        }
    }
}

/// Newest first. Ties keep the later id first.
pub fn newest_first(activities: &[Activity]) -> Vec<Activity> {
    let mut sorted = activities.to_vec();
    sorted.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then(b.id.cmp(&a.id)));
    sorted
}

struct ActivitySeed {
    kind: ActivityKind,
    content: &'static str,
    candidate: Option<u32>,
    job: Option<u32>,
    stage: Option<u32>,
    days_ago: i64,
}

const ACTIVITIES: [ActivitySeed; 8] = [
    ActivitySeed {
        kind: ActivityKind::Application,
        content: "New application received for Senior Frontend Developer",
        candidate: Some(1),
        job: Some(1),
        stage: None,
        days_ago: 2,
    },
    ActivitySeed {
        kind: ActivityKind::StatusChange,
        content: "Sophia Martinez moved to Offer stage",
        candidate: Some(3),
        job: Some(2),
        stage: Some(5),
        days_ago: 1,
    },
    ActivitySeed {
        kind: ActivityKind::Interview,
        content: "Interview scheduled with James Wilson",
        candidate: Some(4),
        job: Some(3),
        stage: None,
        days_ago: 3,
    },
    ActivitySeed {
        kind: ActivityKind::JobPost,
        content: "New job posted: UX/UI Designer",
        candidate: None,
        job: Some(6),
        stage: None,
        days_ago: 20,
    },
    ActivitySeed {
        kind: ActivityKind::StatusChange,
        content: "Emily Johnson moved to Hired stage",
        candidate: Some(7),
        job: Some(6),
        stage: Some(6),
        days_ago: 1,
    },
    ActivitySeed {
        kind: ActivityKind::Application,
        content: "New application received for Financial Analyst",
        candidate: Some(4),
        job: Some(3),
        stage: None,
        days_ago: 5,
    },
    ActivitySeed {
        kind: ActivityKind::StatusChange,
        content: "Daniel Kim moved to Rejected stage",
        candidate: Some(8),
        job: Some(7),
        stage: Some(7),
        days_ago: 4,
    },
    ActivitySeed {
        kind: ActivityKind::Note,
        content: "New note added for Emma Thompson",
        candidate: Some(1),
        job: Some(1),
        stage: None,
        days_ago: 1,
    },
];

pub(super) fn seed(today: NaiveDate) -> Vec<Activity> {
    let morning = NaiveTime::from_hms_opt(10, 0, 0).unwrap_or_default();
    (1u32..)
        .zip(ACTIVITIES.iter())
        .map(|(id, seed)| Activity {
            id,
            kind: seed.kind,
            content: seed.content.to_string(),
            candidate_id: seed.candidate.map(CandidateId),
            job_id: seed.job.map(JobId),
            stage_id: seed.stage.map(StageId),
            timestamp: (today - Duration::days(seed.days_ago)).and_time(morning),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newest_first_breaks_ties_by_id() {
        let today = NaiveDate::from_ymd_opt(2025, 10, 1).expect("valid date");
        let ordered: Vec<u32> = newest_first(&seed(today))
            .iter()
            .map(|activity| activity.id)
            .collect();
        assert_eq!(ordered, [8, 5, 2, 1, 3, 7, 6, 4]);
    }

    #[test]
    fn status_change_serializes_with_type_tag() {
        let at = NaiveDate::from_ymd_opt(2025, 10, 1)
            .and_then(|date| date.and_hms_opt(9, 30, 0))
            .expect("valid timestamp");
        let activity = Activity::status_change(
            9,
            "Olivia Davis",
            CandidateId(5),
            JobId(4),
            StageId(2),
            "Screening",
            at,
        );

        let json = serde_json::to_value(&activity).expect("serialize");
        assert_eq!(json["type"], "status_change");
        assert_eq!(json["content"], "Olivia Davis moved to Screening stage");
        assert_eq!(json["stage_id"], 2);
    }
}
