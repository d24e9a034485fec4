use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use chrono::{Local, NaiveDate, NaiveDateTime};
use tracing::{error, info, warn};

use crate::catalog::{
    newest_first, tag_vocabulary, Activity, Candidate, CandidateId, CandidateQuery,
    EntityCatalog, Job, JobQuery, StageId,
};
use crate::config::PipelineConfig;
use crate::workflows::templates::{
    SaveOutcome, TemplateError, TemplateId, TemplateLibrary, TemplateStage, WorkflowTemplate,
};

use super::dashboard::DashboardView;
use super::domain::{Column, JobFilter, PipelineEvent};
use super::error::PipelineError;
use super::notify::{NotificationPublisher, NotifyError, PipelineNotice};
use super::scoring::{CandidateAnnotation, CandidateScorer};
use super::store::PipelineStore;
use super::views::{CandidateDetailView, PipelineBoardView, PipelineSummary};

/// Result of applying a drag-and-drop event.
#[derive(Debug, Clone, serde::Serialize)]
pub struct EventReceipt {
    pub columns: Vec<Column>,
    pub notices: Vec<PipelineNotice>,
}

/// Service composing the pipeline store, notification hook, scoring annotations and the
/// template library.
pub struct PipelineService<N, S> {
    store: Arc<Mutex<PipelineStore>>,
    templates: Mutex<TemplateLibrary>,
    annotations: Mutex<BTreeMap<CandidateId, CandidateAnnotation>>,
    notifier: Arc<N>,
    scorer: Arc<S>,
    config: PipelineConfig,
}

impl<N, S> PipelineService<N, S>
where
    N: NotificationPublisher + 'static,
    S: CandidateScorer + 'static,
{
    pub fn new(
        catalog: &EntityCatalog,
        notifier: Arc<N>,
        scorer: Arc<S>,
        config: PipelineConfig,
    ) -> Self {
        Self::with_store(PipelineStore::from_catalog(catalog), notifier, scorer, config)
    }

    pub fn with_store(
        store: PipelineStore,
        notifier: Arc<N>,
        scorer: Arc<S>,
        config: PipelineConfig,
    ) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
            templates: Mutex::new(TemplateLibrary::standard()),
            annotations: Mutex::new(BTreeMap::new()),
            notifier,
            scorer,
            config,
        }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    fn read<T>(&self, f: impl FnOnce(&PipelineStore) -> T) -> T {
        let store = self.store.lock().expect("pipeline store mutex poisoned");
        f(&store)
    }

    /// Unfiltered columns, as drag events see them.
    pub fn columns(&self) -> Vec<Column> {
        self.read(|store| store.columns().to_vec())
    }

    pub fn board(&self, filter: JobFilter) -> PipelineBoardView {
        self.read(|store| PipelineBoardView::build(store, filter))
    }

    pub fn summary(&self) -> PipelineSummary {
        self.read(|store| PipelineSummary::from_columns(store.columns()))
    }

    /// Dashboard as of `today`.
    pub fn dashboard(&self, today: NaiveDate) -> DashboardView {
        self.read(|store| DashboardView::build(store, today, &self.config.advisory_stage))
    }

    /// Activity feed, newest first.
    pub fn activities(&self, limit: Option<usize>) -> Vec<Activity> {
        let mut activities = self.read(|store| newest_first(store.activities()));
        if let Some(limit) = limit {
            activities.truncate(limit);
        }
        activities
    }

    /// Apply a drag-and-drop event, publish its notices, and schedule the advisory when a
    /// candidate lands in the advisory stage.
    pub fn apply(&self, event: PipelineEvent) -> Result<EventReceipt, PipelineServiceError> {
        self.apply_at(event, Local::now().naive_local())
    }

    pub fn apply_at(
        &self,
        event: PipelineEvent,
        at: NaiveDateTime,
    ) -> Result<EventReceipt, PipelineServiceError> {
        let label = event.label();
        let (notices, columns) = {
            let mut store = self.store.lock().expect("pipeline store mutex poisoned");
            let notices = store
                .apply_at(event, at)
                .map_err(|err| log_rejection(label, err))?;
            (notices, store.columns().to_vec())
        };

        info!(event = label, notices = notices.len(), "pipeline event applied");

        for notice in &notices {
            self.notifier.publish(notice.clone())?;
            if let PipelineNotice::StageChanged {
                candidate_id,
                stage_name,
                ..
            } = notice
            {
                if *stage_name == self.config.advisory_stage {
                    self.schedule_advisory(*candidate_id);
                }
            }
        }

        Ok(EventReceipt { columns, notices })
    }

    /// Publish the advisory after the configured delay. The candidate is re-read when the
    /// timer fires, so a later move shows up in the text.
    fn schedule_advisory(&self, candidate_id: CandidateId) {
        let store = Arc::clone(&self.store);
        let notifier = Arc::clone(&self.notifier);
        let delay = self.config.advisory_delay;

        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move {
                    tokio::time::sleep(delay).await;
                    publish_advisory(&store, notifier.as_ref(), candidate_id);
                });
            }
            Err(_) => publish_advisory(&store, notifier.as_ref(), candidate_id),
        }
    }

    pub fn add_stage(&self, name: &str, color: &str) -> Result<Column, PipelineServiceError> {
        let mut store = self.store.lock().expect("pipeline store mutex poisoned");
        let column = store
            .add_stage(name, color)
            .map_err(|err| log_rejection("add_stage", err))?;
        info!(stage_id = %column.id, title = %column.title, "stage added");
        Ok(column)
    }

    pub fn update_stage(
        &self,
        id: StageId,
        name: &str,
        color: &str,
    ) -> Result<Column, PipelineServiceError> {
        let mut store = self.store.lock().expect("pipeline store mutex poisoned");
        let column = store
            .update_stage(id, name, color)
            .map_err(|err| log_rejection("update_stage", err))?;
        info!(stage_id = %id, title = %column.title, "stage updated");
        Ok(column)
    }

    pub fn delete_stage(&self, id: StageId) -> Result<Vec<Column>, PipelineServiceError> {
        let mut store = self.store.lock().expect("pipeline store mutex poisoned");
        store
            .delete_stage(id)
            .map_err(|err| log_rejection("delete_stage", err))?;
        info!(stage_id = %id, "stage deleted");
        Ok(store.columns().to_vec())
    }

    /// Candidate drawer. Annotations are scored once per candidate, and only when scoring
    /// is enabled.
    pub fn candidate_detail(
        &self,
        id: CandidateId,
    ) -> Result<CandidateDetailView, PipelineServiceError> {
        let (candidate, job) = self.read(|store| {
            let candidate = store.candidate(id).cloned();
            let job = candidate
                .as_ref()
                .and_then(|candidate| store.job(candidate.job_id).cloned());
            (candidate, job)
        });
        let candidate = candidate.ok_or(PipelineServiceError::CandidateNotFound(id))?;

        let annotation = if self.config.scoring_enabled {
            let mut annotations = self
                .annotations
                .lock()
                .expect("annotation mutex poisoned");
            Some(
                *annotations
                    .entry(id)
                    .or_insert_with(|| self.scorer.score(&candidate)),
            )
        } else {
            None
        };

        Ok(CandidateDetailView::new(&candidate, job.as_ref(), annotation))
    }

    pub fn annotation(&self, id: CandidateId) -> Option<CandidateAnnotation> {
        self.annotations
            .lock()
            .expect("annotation mutex poisoned")
            .get(&id)
            .copied()
    }

    pub fn search_candidates(&self, query: &CandidateQuery) -> Vec<Candidate> {
        self.read(|store| query.apply(store.candidates().values()))
    }

    pub fn search_jobs(&self, query: &JobQuery) -> Vec<Job> {
        self.read(|store| query.apply(store.jobs()))
    }

    /// Tags offered by the candidate tag filter.
    pub fn tags(&self) -> Vec<String> {
        self.read(|store| tag_vocabulary(store.candidates().values()))
    }

    pub fn templates(&self) -> Vec<WorkflowTemplate> {
        self.templates
            .lock()
            .expect("template mutex poisoned")
            .templates()
            .to_vec()
    }

    pub fn save_template(
        &self,
        template: WorkflowTemplate,
    ) -> Result<SaveOutcome, PipelineServiceError> {
        let id = template.id.0.clone();
        let outcome = self
            .templates
            .lock()
            .expect("template mutex poisoned")
            .save(template)
            .map_err(|err| log_template_rejection(&TemplateId(id.clone()), err))?;
        info!(template_id = %id, ?outcome, "template saved");
        Ok(outcome)
    }

    pub fn add_template_stage(
        &self,
        id: &TemplateId,
        name: &str,
        color: &str,
    ) -> Result<TemplateStage, PipelineServiceError> {
        let stage = self
            .templates
            .lock()
            .expect("template mutex poisoned")
            .add_stage(id, name, color)
            .map_err(|err| log_template_rejection(id, err))?;
        info!(template_id = %id.0, stage_id = %stage.id, "template stage added");
        Ok(stage)
    }

    pub fn remove_template_stage(
        &self,
        id: &TemplateId,
        stage_id: &str,
    ) -> Result<WorkflowTemplate, PipelineServiceError> {
        let template = self
            .templates
            .lock()
            .expect("template mutex poisoned")
            .remove_stage(id, stage_id)
            .map_err(|err| log_template_rejection(id, err))?;
        info!(template_id = %id.0, stage_id, "template stage removed");
        Ok(template)
    }

    pub fn reorder_template_stages(
        &self,
        id: &TemplateId,
        source_index: usize,
        destination_index: Option<usize>,
    ) -> Result<WorkflowTemplate, PipelineServiceError> {
        let template = self
            .templates
            .lock()
            .expect("template mutex poisoned")
            .reorder_stages(id, source_index, destination_index)
            .map_err(|err| log_template_rejection(id, err))?;
        info!(template_id = %id.0, source_index, ?destination_index, "template stages reordered");
        Ok(template)
    }

    pub fn delete_template(&self, id: &TemplateId) -> bool {
        let removed = self
            .templates
            .lock()
            .expect("template mutex poisoned")
            .delete(id);
        if removed {
            info!(template_id = %id.0, "template deleted");
        }
        removed
    }
}

fn publish_advisory<N: NotificationPublisher>(
    store: &Mutex<PipelineStore>,
    notifier: &N,
    candidate_id: CandidateId,
) {
    let notice = {
        let store = store.lock().expect("pipeline store mutex poisoned");
        store
            .candidate(candidate_id)
            .map(|candidate| PipelineNotice::Advisory {
                candidate_id,
                candidate_name: candidate.name.clone(),
                stage_name: candidate.status.name.clone(),
            })
    };

    let Some(notice) = notice else {
        return;
    };
    if let Err(err) = notifier.publish(notice) {
        warn!(candidate_id = %candidate_id, error = %err, "advisory notice dropped");
    }
}

fn log_rejection(operation: &'static str, err: PipelineError) -> PipelineError {
    match &err {
        PipelineError::Defect(defect) => {
            error!(operation, error = %defect, "pipeline state defect");
        }
        PipelineError::Validation(_) | PipelineError::Constraint(_) => {
            warn!(operation, error = %err, "pipeline operation rejected");
        }
    }
    err
}

fn log_template_rejection(id: &TemplateId, err: TemplateError) -> TemplateError {
    warn!(template_id = %id.0, error = %err, "template change rejected");
    err
}

/// Error raised by the pipeline service.
#[derive(Debug, thiserror::Error)]
pub enum PipelineServiceError {
    #[error(transparent)]
    Pipeline(#[from] PipelineError),
    #[error(transparent)]
    Notify(#[from] NotifyError),
    #[error(transparent)]
    Template(#[from] TemplateError),
    #[error("candidate {0} not found")]
    CandidateNotFound(CandidateId),
}
