pub mod messages;
pub mod pipeline;
pub mod templates;
