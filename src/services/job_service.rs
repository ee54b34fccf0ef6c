use std::sync::Arc;

use url::Url;
use uuid::Uuid;
use validator::Validate;

use crate::dto::job_dto::{
    CandidateSummary, CreateJobPayload, DashboardResponse, JobDetailResponse, JobOverview,
    UpdateJobPayload,
};
use crate::error::{Error, Result};
use crate::models::candidate::Candidate;
use crate::models::job::{Job, JobChanges, NewJob};
use crate::store::RecordStore;
use crate::utils::time::{now, start_of_day};
use crate::utils::token::generate_link_token;

const LINK_TOKEN_BYTES: usize = 16;
const LINK_ATTEMPTS: usize = 5;

#[derive(Clone)]
pub struct JobService {
    records: Arc<dyn RecordStore>,
    base_url: Url,
    default_days_valid: i64,
}

impl JobService {
    pub fn new(records: Arc<dyn RecordStore>, public_base_url: &str, default_days_valid: i64) -> Result<Self> {
        let mut base_url = Url::parse(public_base_url)
            .map_err(|e| Error::Config(format!("Invalid PUBLIC_BASE_URL: {}", e)))?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Ok(Self {
            records,
            base_url,
            default_days_valid,
        })
    }

    pub fn application_link(&self, job: &Job) -> String {
        self.base_url
            .join(&format!("apply/{}", job.link_hash))
            .map(|url| url.to_string())
            .unwrap_or_else(|_| job.application_path())
    }

    pub async fn create(&self, payload: CreateJobPayload) -> Result<Job> {
        payload.validate()?;
        let days_valid = payload.days_valid.unwrap_or(self.default_days_valid);

        let mut attempt = 0;
        loop {
            attempt += 1;
            let new_job = NewJob::open_for(
                payload.title.trim().to_string(),
                payload.description.trim().to_string(),
                generate_link_token(LINK_TOKEN_BYTES),
                now(),
                days_valid,
            );
            match self.records.create_job(new_job).await {
                Ok(job) => {
                    tracing::info!(job_id = %job.id, days_valid, "job created");
                    return Ok(job);
                }
                Err(Error::Conflict(_)) if attempt < LINK_ATTEMPTS => {
                    tracing::warn!(attempt, "link token collision, regenerating");
                }
                Err(err) => return Err(err),
            }
        }
    }

    pub async fn get(&self, id: Uuid) -> Result<Job> {
        self.records
            .get_job(id)
            .await?
            .ok_or_else(|| Error::NotFound("Job not found".to_string()))
    }

    pub async fn update(&self, id: Uuid, payload: UpdateJobPayload) -> Result<Job> {
        payload.validate()?;
        let mut job = self.get(id).await?;

        let changes = JobChanges {
            title: payload.title.map(|t| t.trim().to_string()),
            description: payload.description.map(|d| d.trim().to_string()),
            is_active: payload.is_active,
            start_date: payload.start_date.map(start_of_day),
            end_date: payload.end_date.map(start_of_day),
        };
        changes.apply_to(&mut job);
        if job.start_date > job.end_date {
            return Err(Error::BadRequest(
                "Start date cannot be after end date".to_string(),
            ));
        }

        let job = self.records.update_job(id, changes).await?;
        tracing::info!(job_id = %job.id, "job updated");
        Ok(job)
    }

    pub async fn toggle(&self, id: Uuid) -> Result<Job> {
        let job = self.get(id).await?;
        let changes = JobChanges {
            is_active: Some(!job.is_active),
            ..JobChanges::default()
        };
        let job = self.records.update_job(id, changes).await?;
        tracing::info!(job_id = %job.id, is_active = job.is_active, "job toggled");
        Ok(job)
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        if !self.records.delete_job(id).await? {
            return Err(Error::NotFound("Job not found".to_string()));
        }
        tracing::info!(job_id = %id, "job deleted with its candidates");
        Ok(())
    }

    async fn overview(&self, job: Job) -> Result<JobOverview> {
        let candidate_count = self.records.count_candidates(Some(job.id)).await?;
        Ok(JobOverview {
            application_link: self.application_link(&job),
            is_expired: job.is_expired(),
            candidate_count,
            job,
        })
    }

    pub async fn dashboard(&self) -> Result<DashboardResponse> {
        let jobs = self.records.list_jobs().await?;
        let current = now();
        let active_jobs = jobs
            .iter()
            .filter(|job| job.is_active && !job.is_expired_at(current))
            .count();

        let mut overviews = Vec::with_capacity(jobs.len());
        for job in jobs {
            overviews.push(self.overview(job).await?);
        }
        let total_candidates = self.records.count_candidates(None).await?;

        Ok(DashboardResponse {
            jobs: overviews,
            active_jobs,
            total_candidates,
        })
    }

    pub async fn detail(&self, id: Uuid) -> Result<JobDetailResponse> {
        let job = self.get(id).await?;
        let candidates = self.records.list_candidates(Some(job.id)).await?;
        Ok(JobDetailResponse {
            job: self.overview(job).await?,
            candidates,
        })
    }

    pub async fn candidates(&self, job_id: Option<Uuid>) -> Result<Vec<Candidate>> {
        if let Some(id) = job_id {
            self.get(id).await?;
        }
        self.records.list_candidates(job_id).await
    }

    pub async fn candidate_summaries(&self) -> Result<Vec<CandidateSummary>> {
        let candidates = self.records.list_candidates(None).await?;
        Ok(candidates.iter().map(CandidateSummary::from).collect())
    }
}
