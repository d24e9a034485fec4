use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::response::Response;
use chrono::NaiveDate;
use serde_json::Value;

use crate::catalog::{Candidate, EntityCatalog};
use crate::config::PipelineConfig;
use crate::workflows::pipeline::notify::{NotificationPublisher, NotifyError, PipelineNotice};
use crate::workflows::pipeline::scoring::{CandidateAnnotation, CandidateScorer};
use crate::workflows::pipeline::{pipeline_router, PipelineService};

pub(super) fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 10, 1).expect("valid date")
}

pub(super) fn catalog() -> EntityCatalog {
    EntityCatalog::seeded(today())
}

pub(super) fn pipeline_config() -> PipelineConfig {
    PipelineConfig {
        advisory_delay: Duration::ZERO,
        ..PipelineConfig::default()
    }
}

pub(super) fn scoring_config() -> PipelineConfig {
    PipelineConfig {
        scoring_enabled: true,
        ..pipeline_config()
    }
}

#[derive(Clone, Default)]
pub(super) struct MemoryNotifier {
    notices: Arc<Mutex<Vec<PipelineNotice>>>,
}

impl MemoryNotifier {
    pub(super) fn notices(&self) -> Vec<PipelineNotice> {
        self.notices.lock().expect("notices mutex poisoned").clone()
    }
}

impl NotificationPublisher for MemoryNotifier {
    fn publish(&self, notice: PipelineNotice) -> Result<(), NotifyError> {
        self.notices
            .lock()
            .expect("notices mutex poisoned")
            .push(notice);
        Ok(())
    }
}

pub(super) struct FailingNotifier;

impl NotificationPublisher for FailingNotifier {
    fn publish(&self, _notice: PipelineNotice) -> Result<(), NotifyError> {
        Err(NotifyError::Transport("toast feed offline".to_string()))
    }
}

/// Scorer returning the same annotation every time and counting calls.
#[derive(Default)]
pub(super) struct FixedScorer {
    calls: Mutex<usize>,
}

impl FixedScorer {
    pub(super) const ANNOTATION: CandidateAnnotation = CandidateAnnotation {
        score: 88,
        fit_percentage: 74,
    };

    pub(super) fn calls(&self) -> usize {
        *self.calls.lock().expect("calls mutex poisoned")
    }
}

impl CandidateScorer for FixedScorer {
    fn score(&self, _candidate: &Candidate) -> CandidateAnnotation {
        *self.calls.lock().expect("calls mutex poisoned") += 1;
        Self::ANNOTATION
    }
}

pub(super) type TestService = PipelineService<MemoryNotifier, FixedScorer>;

pub(super) fn build_service_with(
    config: PipelineConfig,
) -> (Arc<TestService>, MemoryNotifier, Arc<FixedScorer>) {
    let notifier = MemoryNotifier::default();
    let scorer = Arc::new(FixedScorer::default());
    let service = Arc::new(PipelineService::new(
        &catalog(),
        Arc::new(notifier.clone()),
        Arc::clone(&scorer),
        config,
    ));
    (service, notifier, scorer)
}

pub(super) fn build_service() -> (Arc<TestService>, MemoryNotifier, Arc<FixedScorer>) {
    build_service_with(pipeline_config())
}

pub(super) fn router_with_service(service: Arc<TestService>) -> axum::Router {
    pipeline_router(service)
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
