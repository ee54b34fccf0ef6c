//! Scripted application conversation: a fixed table of steps, each
//! validating one candidate field, driven by the pure [`advance`] function.

pub mod draft;
pub mod engine;
pub mod field;
pub mod step;

pub use draft::CandidateDraft;
pub use engine::{advance, ApplicationSession, Outcome};
pub use field::{validate, Field, FieldValue, Rejection};
pub use step::{Expect, Step, StepSpec, COMPLETION, GREETING};

pub const SESSION_EXPIRED: &str = "Session expired. Please start over from the job application link.";
pub const INVALID_JOB: &str = "Invalid job. Please start over from the job application link.";
