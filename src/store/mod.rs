//! Storage seams. Services only see these traits, so the same code runs on
//! Postgres in production and on the in-memory stores in tests.

pub mod memory;
pub mod postgres;
pub mod session;

use async_trait::async_trait;
use uuid::Uuid;

use crate::conversation::ApplicationSession;
use crate::error::Result;
use crate::models::candidate::{Candidate, NewCandidate};
use crate::models::job::{Job, JobChanges, NewJob};
use crate::utils::token::generate_link_token;

pub use memory::MemoryRecordStore;
pub use postgres::PgRecordStore;
pub use session::MemorySessionStore;

/// Durable jobs and candidates.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn create_job(&self, job: NewJob) -> Result<Job>;

    async fn get_job(&self, id: Uuid) -> Result<Option<Job>>;

    async fn get_job_by_link(&self, link_hash: &str) -> Result<Option<Job>>;

    /// Newest first.
    async fn list_jobs(&self) -> Result<Vec<Job>>;

    /// Fails with `NotFound` when the job is gone.
    async fn update_job(&self, id: Uuid, changes: JobChanges) -> Result<Job>;

    /// Removes the job and every candidate that applied to it.
    async fn delete_job(&self, id: Uuid) -> Result<bool>;

    /// Fails with `Conflict` when the job no longer exists.
    async fn insert_candidate(&self, candidate: &NewCandidate) -> Result<Candidate>;

    /// Newest submission first, optionally restricted to one job.
    async fn list_candidates(&self, job_id: Option<Uuid>) -> Result<Vec<Candidate>>;

    async fn get_candidate(&self, id: Uuid) -> Result<Option<Candidate>>;

    async fn count_candidates(&self, job_id: Option<Uuid>) -> Result<i64>;
}

/// Opaque id carried in the applicant's session cookie.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionId(String);

impl SessionId {
    pub fn generate() -> Self {
        Self(generate_link_token(24))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for SessionId {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Ephemeral per-applicant conversation state.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// `None` when the id is unknown or the session outlived its TTL.
    async fn load(&self, id: &SessionId) -> Result<Option<ApplicationSession>>;

    async fn save(&self, id: &SessionId, session: ApplicationSession) -> Result<()>;

    async fn remove(&self, id: &SessionId) -> Result<()>;
}
