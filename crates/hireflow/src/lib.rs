//! Hiring pipeline state management for the recruiting dashboard.
//!
//! The crate owns the static entity catalog (jobs, candidates, stages), derives the kanban
//! board from it, and applies drag-and-drop events and stage edits through a single-writer
//! store that also keeps the activity feed behind the dashboard. Candidate messaging lives
//! in `workflows::messages`. Both workflows expose their operations over HTTP through
//! their `router` modules.

pub mod catalog;
pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
