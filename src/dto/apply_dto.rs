use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::job::Job;

/// Job details shown to an applicant. The link token is not echoed back.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PublicJob {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub end_date: DateTime<Utc>,
}

impl From<&Job> for PublicJob {
    fn from(job: &Job) -> Self {
        Self {
            id: job.id,
            title: job.title.clone(),
            description: job.description.clone(),
            end_date: job.end_date,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApplyResponse {
    pub job: PublicJob,
    pub session_expires_at: DateTime<Utc>,
}
