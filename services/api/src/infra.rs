use chrono::NaiveDate;
use hireflow::catalog::EntityCatalog;
use hireflow::config::PipelineConfig;
use hireflow::workflows::messages::MessageService;
use hireflow::workflows::pipeline::{
    NotificationPublisher, NotifyError, PipelineNotice, PipelineService, RandomScorer,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::VecDeque;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

pub(crate) type ApiPipelineService = PipelineService<InMemoryNotificationPublisher, RandomScorer>;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Notices retained by the feed. Older entries are dropped first.
pub(crate) const NOTICE_FEED_CAPACITY: usize = 50;

/// Notice feed kept in memory and served to the dashboard's toast poller.
#[derive(Clone)]
pub(crate) struct InMemoryNotificationPublisher {
    notices: Arc<Mutex<VecDeque<PipelineNotice>>>,
    capacity: usize,
}

impl Default for InMemoryNotificationPublisher {
    fn default() -> Self {
        Self::with_capacity(NOTICE_FEED_CAPACITY)
    }
}

impl NotificationPublisher for InMemoryNotificationPublisher {
    fn publish(&self, notice: PipelineNotice) -> Result<(), NotifyError> {
        let mut guard = self.notices.lock().expect("notice mutex poisoned");
        while guard.len() >= self.capacity {
            guard.pop_front();
        }
        guard.push_back(notice);
        Ok(())
    }
}

impl InMemoryNotificationPublisher {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            notices: Arc::new(Mutex::new(VecDeque::with_capacity(capacity))),
            capacity: capacity.max(1),
        }
    }

    /// Retained notices, oldest first.
    pub(crate) fn notices(&self) -> Vec<PipelineNotice> {
        self.notices
            .lock()
            .expect("notice mutex poisoned")
            .iter()
            .cloned()
            .collect()
    }
}

/// Seed the catalog for `today` and wire the in-memory notice feed and the demo scorer.
pub(crate) fn pipeline_service(
    config: PipelineConfig,
    today: NaiveDate,
) -> (Arc<ApiPipelineService>, InMemoryNotificationPublisher) {
    let catalog = EntityCatalog::seeded(today);
    let notifier = InMemoryNotificationPublisher::default();
    let scorer = Arc::new(RandomScorer::new(config.scoring_seed));
    let service = Arc::new(PipelineService::new(
        &catalog,
        Arc::new(notifier.clone()),
        scorer,
        config,
    ));
    (service, notifier)
}

/// Message threads seeded for the same `today` as the pipeline.
pub(crate) fn message_service(today: NaiveDate) -> Arc<MessageService> {
    Arc::new(MessageService::new(&EntityCatalog::seeded(today)))
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}
