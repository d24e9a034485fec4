//! Candidate pipeline board: stage columns, drag-and-drop mutation, job filtering, stage
//! editing, the notices and feed entries those changes produce, and the dashboard built
//! on top of them.

pub mod board;
pub mod dashboard;
pub mod domain;
pub mod editor;
pub mod error;
pub mod filter;
pub mod mutator;
pub mod notify;
pub mod router;
pub mod scoring;
pub mod service;
pub mod store;
pub mod views;

#[cfg(test)]
mod tests;

pub use dashboard::DashboardView;
pub use domain::{Column, JobFilter, PipelineEvent};
pub use error::{ConstraintError, PipelineError, StateDefect, ValidationError};
pub use notify::{NotificationPublisher, NotifyError, PipelineNotice};
pub use router::pipeline_router;
pub use scoring::{CandidateAnnotation, CandidateScorer, RandomScorer};
pub use service::{EventReceipt, PipelineService, PipelineServiceError};
pub use store::PipelineStore;
pub use views::{CandidateDetailView, PipelineBoardView, PipelineSummary};
