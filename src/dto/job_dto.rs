use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::models::candidate::Candidate;
use crate::models::job::Job;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateJobPayload {
    #[validate(length(min = 1, max = 100))]
    pub title: String,
    #[validate(length(min = 1))]
    pub description: String,
    #[validate(range(min = 1, max = 365))]
    pub days_valid: Option<i64>,
}

/// Partial edit. Dates are calendar days (`YYYY-MM-DD`), taken as UTC midnight.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateJobPayload {
    #[validate(length(min = 1, max = 100))]
    pub title: Option<String>,
    #[validate(length(min = 1))]
    pub description: Option<String>,
    pub is_active: Option<bool>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

/// A job with its shareable link and number of applications.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct JobOverview {
    #[serde(flatten)]
    pub job: Job,
    pub application_link: String,
    pub is_expired: bool,
    pub candidate_count: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DashboardResponse {
    pub jobs: Vec<JobOverview>,
    pub active_jobs: usize,
    pub total_candidates: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct JobDetailResponse {
    pub job: JobOverview,
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ToggleJobResponse {
    pub success: bool,
    pub is_active: bool,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DeleteJobResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CandidateFilter {
    /// Restrict to applications for this job.
    pub job_id: Option<Uuid>,
}

/// Compact row of the JSON candidate export.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CandidateSummary {
    pub id: Uuid,
    pub job_id: Uuid,
    pub name: String,
    pub email: String,
    pub mobile: String,
    pub experience: f64,
    pub skills: String,
    pub submitted_at: DateTime<Utc>,
}

impl From<&Candidate> for CandidateSummary {
    fn from(candidate: &Candidate) -> Self {
        Self {
            id: candidate.id,
            job_id: candidate.job_id,
            name: candidate.full_name(),
            email: candidate.personal_email.clone(),
            mobile: candidate.mobile_no.clone(),
            experience: candidate.total_experience,
            skills: candidate.primary_skills.clone(),
            submitted_at: candidate.submitted_at,
        }
    }
}
