use serde::Deserialize;

use super::{Candidate, Job, JobId, StageId};

/// Candidate list filters. Every criterion that is set must match.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CandidateQuery {
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub job_id: Option<JobId>,
    #[serde(default)]
    pub stage_id: Option<StageId>,
    #[serde(default)]
    pub tag: Option<String>,
}

impl CandidateQuery {
    pub fn matches(&self, candidate: &Candidate) -> bool {
        if !contains_ignore_case(&candidate.name, self.search.as_deref()) {
            return false;
        }

        if self.job_id.is_some_and(|job_id| candidate.job_id != job_id) {
            return false;
        }

        if self
            .stage_id
            .is_some_and(|stage_id| candidate.status.id != stage_id)
        {
            return false;
        }

        match self.tag.as_deref().filter(|tag| !tag.is_empty()) {
            Some(tag) => candidate.tags.iter().any(|candidate_tag| candidate_tag == tag),
            None => true,
        }
    }

    pub fn apply<'a, I>(&self, candidates: I) -> Vec<Candidate>
    where
        I: IntoIterator<Item = &'a Candidate>,
    {
        candidates
            .into_iter()
            .filter(|candidate| self.matches(candidate))
            .cloned()
            .collect()
    }
}

/// Distinct tags across `candidates`, in first-seen order. Feeds the tag filter.
pub fn tag_vocabulary<'a, I>(candidates: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a Candidate>,
{
    let mut tags: Vec<String> = Vec::new();
    for candidate in candidates {
        for tag in &candidate.tags {
            if !tags.contains(tag) {
                tags.push(tag.clone());
            }
        }
    }
    tags
}

/// Job board filters, keyed by catalog ids.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct JobQuery {
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub department_id: Option<u32>,
    #[serde(default)]
    pub location_id: Option<u32>,
    #[serde(default)]
    pub status_id: Option<u32>,
}

impl JobQuery {
    pub fn matches(&self, job: &Job) -> bool {
        contains_ignore_case(&job.title, self.search.as_deref())
            && self.department_id.map_or(true, |id| job.department.id == id)
            && self.location_id.map_or(true, |id| job.location.id == id)
            && self.status_id.map_or(true, |id| job.status.id == id)
    }

    pub fn apply<'a, I>(&self, jobs: I) -> Vec<Job>
    where
        I: IntoIterator<Item = &'a Job>,
    {
        jobs.into_iter()
            .filter(|job| self.matches(job))
            .cloned()
            .collect()
    }
}

fn contains_ignore_case(haystack: &str, needle: Option<&str>) -> bool {
    match needle.map(str::trim).filter(|needle| !needle.is_empty()) {
        Some(needle) => haystack
            .to_lowercase()
            .contains(&needle.to_lowercase()),
        None => true,
    }
}
