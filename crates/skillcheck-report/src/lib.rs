//! Rendering for skillcheck results.
//!
//! Plain-text and JSON check reports, batch summaries, and the
//! `<available_skills>` XML prompt export.

pub mod prompt;
pub mod reports;
pub mod summary;

pub use prompt::to_prompt;
pub use reports::ReportGenerator;
pub use summary::{StatusCounts, Summary};
