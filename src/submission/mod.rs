//! The form-facing submission pipeline.
//!
//! [`SubmissionOrchestrator`] owns the form for one registration, validates
//! it, resolves the selected host and dispatches the visitor confirmation and
//! host notification as one batch. Only the visitor confirmation decides
//! whether the submission succeeded.

mod orchestrator;
mod state;

pub use orchestrator::{SubmissionOrchestrator, SubmissionReport};
pub use state::SubmissionState;
