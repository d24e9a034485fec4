use std::collections::BTreeMap;

use chrono::{Local, NaiveDateTime};

use crate::catalog::{
    Activity, Candidate, CandidateId, EntityCatalog, Job, JobId, Stage, StageId,
};

use super::board;
use super::domain::{Column, JobFilter, PipelineEvent};
use super::editor;
use super::error::{PipelineError, StateDefect, ValidationError};
use super::filter::apply_filter;
use super::mutator;
use super::notify::PipelineNotice;

/// Owned pipeline state. The store is the only writer of column order, candidate status
/// and the activity feed; everyone else reads clones.
#[derive(Debug, Clone)]
pub struct PipelineStore {
    jobs: Vec<Job>,
    candidates: BTreeMap<CandidateId, Candidate>,
    columns: Vec<Column>,
    activities: Vec<Activity>,
}

impl PipelineStore {
    pub fn new(stages: &[Stage], jobs: Vec<Job>, candidates: Vec<Candidate>) -> Self {
        let columns = board::initialize(stages, &candidates);
        let candidates = candidates
            .into_iter()
            .map(|candidate| (candidate.id, candidate))
            .collect();

        Self {
            jobs,
            candidates,
            columns,
            activities: Vec::new(),
        }
    }

    pub fn from_catalog(catalog: &EntityCatalog) -> Self {
        let mut store = Self::new(
            &catalog.stages,
            catalog.jobs.clone(),
            catalog.candidates.clone(),
        );
        store.activities = catalog.activities.clone();
        store
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, id: StageId) -> Option<&Column> {
        board::column(&self.columns, id)
    }

    pub fn candidates(&self) -> &BTreeMap<CandidateId, Candidate> {
        &self.candidates
    }

    pub fn candidate(&self, id: CandidateId) -> Option<&Candidate> {
        self.candidates.get(&id)
    }

    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    pub fn job(&self, id: JobId) -> Option<&Job> {
        self.jobs.iter().find(|job| job.id == id)
    }

    /// Activity feed in insertion order.
    pub fn activities(&self) -> &[Activity] {
        &self.activities
    }

    /// Filtered projection of the board for rendering.
    pub fn view(&self, filter: JobFilter) -> Vec<Column> {
        apply_filter(&self.columns, filter, &self.candidates)
    }

    /// Apply a drag-and-drop event and return the notices it produced. No-op events
    /// (cancelled drags, drops in place) produce no notices.
    pub fn apply(&mut self, event: PipelineEvent) -> Result<Vec<PipelineNotice>, PipelineError> {
        self.apply_at(event, Local::now().naive_local())
    }

    /// Like [`PipelineStore::apply`], stamping any feed entry with `at`.
    pub fn apply_at(
        &mut self,
        event: PipelineEvent,
        at: NaiveDateTime,
    ) -> Result<Vec<PipelineNotice>, PipelineError> {
        match event {
            PipelineEvent::ReorderColumns {
                source_index,
                destination_index,
            } => {
                let reordered =
                    mutator::reorder_columns(&self.columns, source_index, destination_index);
                if reordered == self.columns {
                    return Ok(Vec::new());
                }
                self.columns = reordered;
                Ok(vec![PipelineNotice::StagesReordered])
            }
            PipelineEvent::MoveCandidate {
                candidate_id,
                source_column_id,
                destination_column_id,
                destination_index,
            } => self.move_candidate(
                candidate_id,
                source_column_id,
                destination_column_id,
                destination_index,
                at,
            ),
        }
    }

    fn move_candidate(
        &mut self,
        candidate_id: CandidateId,
        source: StageId,
        destination: StageId,
        destination_index: usize,
        at: NaiveDateTime,
    ) -> Result<Vec<PipelineNotice>, PipelineError> {
        if !self.candidates.contains_key(&candidate_id) {
            return Err(StateDefect::UnknownCandidate(candidate_id).into());
        }

        let moved = mutator::move_candidate(
            &self.columns,
            candidate_id,
            source,
            destination,
            destination_index,
        )?;
        if moved == self.columns {
            return Ok(Vec::new());
        }

        let stage = board::column(&moved, destination)
            .map(Column::stage)
            .ok_or(StateDefect::CandidateNotInColumn {
                candidate: candidate_id,
                column: destination,
            })?;

        self.columns = moved;
        let candidate = self
            .candidates
            .get_mut(&candidate_id)
            .ok_or(StateDefect::UnknownCandidate(candidate_id))?;
        candidate.status = stage.clone();
        let candidate_name = candidate.name.clone();
        let job_id = candidate.job_id;

        let activity_id = self.activities.iter().map(|a| a.id).max().unwrap_or(0) + 1;
        self.activities.push(Activity::status_change(
            activity_id,
            &candidate_name,
            candidate_id,
            job_id,
            stage.id,
            &stage.name,
            at,
        ));

        Ok(vec![PipelineNotice::StageChanged {
            candidate_id,
            candidate_name,
            stage_id: stage.id,
            stage_name: stage.name,
        }])
    }

    pub fn add_stage(&mut self, name: &str, color: &str) -> Result<Column, PipelineError> {
        let id = editor::next_stage_id(&self.columns);
        self.columns = editor::add_stage(&self.columns, name, color)?;
        let added = board::column(&self.columns, id)
            .cloned()
            .ok_or(ValidationError::UnknownStage(id))?;
        Ok(added)
    }

    /// Rename or recolor a stage. Candidates in that stage get the refreshed stage embedded
    /// in their status.
    pub fn update_stage(
        &mut self,
        id: StageId,
        name: &str,
        color: &str,
    ) -> Result<Column, PipelineError> {
        self.columns = editor::update_stage(&self.columns, id, name, color)?;

        let column = board::column(&self.columns, id)
            .cloned()
            .ok_or(ValidationError::UnknownStage(id))?;
        let stage = column.stage();
        for candidate_id in &column.candidate_ids {
            if let Some(candidate) = self.candidates.get_mut(candidate_id) {
                candidate.status = stage.clone();
            }
        }

        Ok(column)
    }

    pub fn delete_stage(&mut self, id: StageId) -> Result<(), PipelineError> {
        self.columns = editor::delete_stage(&self.columns, id)?;
        Ok(())
    }

    /// Check single-column membership for every candidate.
    pub fn verify(&self) -> Result<(), StateDefect> {
        board::verify_membership(&self.columns, self.candidates.values())
    }
}
