use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::RecordStore;
use crate::error::{Error, Result};
use crate::models::candidate::{Candidate, NewCandidate};
use crate::models::job::{Job, JobChanges, NewJob};

const JOB_COLUMNS: &str =
    "id, title, description, link_hash, start_date, end_date, is_active, created_at";

const CANDIDATE_COLUMNS: &str = r#"
    id, job_id, first_name, last_name, personal_email, mobile_no,
    alternate_contact_no, highest_educational_qualifications,
    academic_performance, current_company, current_designation,
    total_experience, relevant_experience, primary_skills,
    resume_attachments, self_introduction_video, referred_by,
    self_declaration, submitted_at
"#;

#[derive(Clone)]
pub struct PgRecordStore {
    pool: PgPool,
}

impl PgRecordStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecordStore for PgRecordStore {
    async fn create_job(&self, job: NewJob) -> Result<Job> {
        let sql = format!(
            r#"
            INSERT INTO jobs (id, title, description, link_hash, start_date, end_date, is_active)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {JOB_COLUMNS}
            "#
        );
        let job = sqlx::query_as::<_, Job>(&sql)
            .bind(Uuid::new_v4())
            .bind(&job.title)
            .bind(&job.description)
            .bind(&job.link_hash)
            .bind(job.start_date)
            .bind(job.end_date)
            .bind(job.is_active)
            .fetch_one(&self.pool)
            .await?;
        Ok(job)
    }

    async fn get_job(&self, id: Uuid) -> Result<Option<Job>> {
        let sql = format!("SELECT {JOB_COLUMNS} FROM jobs WHERE id = $1");
        let job = sqlx::query_as::<_, Job>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(job)
    }

    async fn get_job_by_link(&self, link_hash: &str) -> Result<Option<Job>> {
        let sql = format!("SELECT {JOB_COLUMNS} FROM jobs WHERE link_hash = $1");
        let job = sqlx::query_as::<_, Job>(&sql)
            .bind(link_hash)
            .fetch_optional(&self.pool)
            .await?;
        Ok(job)
    }

    async fn list_jobs(&self) -> Result<Vec<Job>> {
        let sql = format!("SELECT {JOB_COLUMNS} FROM jobs ORDER BY created_at DESC");
        let jobs = sqlx::query_as::<_, Job>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(jobs)
    }

    async fn update_job(&self, id: Uuid, changes: JobChanges) -> Result<Job> {
        let sql = format!(
            r#"
            UPDATE jobs
            SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                is_active = COALESCE($4, is_active),
                start_date = COALESCE($5, start_date),
                end_date = COALESCE($6, end_date)
            WHERE id = $1
            RETURNING {JOB_COLUMNS}
            "#
        );
        sqlx::query_as::<_, Job>(&sql)
            .bind(id)
            .bind(changes.title)
            .bind(changes.description)
            .bind(changes.is_active)
            .bind(changes.start_date)
            .bind(changes.end_date)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| Error::NotFound("Job not found".to_string()))
    }

    async fn delete_job(&self, id: Uuid) -> Result<bool> {
        // candidates.job_id is ON DELETE CASCADE
        let result = sqlx::query("DELETE FROM jobs WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn insert_candidate(&self, candidate: &NewCandidate) -> Result<Candidate> {
        let sql = format!(
            r#"
            INSERT INTO candidates (
                id, job_id, first_name, last_name, personal_email, mobile_no,
                alternate_contact_no, highest_educational_qualifications,
                academic_performance, current_company, current_designation,
                total_experience, relevant_experience, primary_skills,
                resume_attachments, self_introduction_video, referred_by,
                self_declaration, submitted_at
            ) VALUES (
                $1, $2, $3, $4, $5, $6,
                $7, $8,
                $9, $10, $11,
                $12, $13, $14,
                $15, $16, $17,
                $18, $19
            )
            RETURNING {CANDIDATE_COLUMNS}
            "#
        );
        let stored = sqlx::query_as::<_, Candidate>(&sql)
            .bind(Uuid::new_v4())
            .bind(candidate.job_id)
            .bind(&candidate.first_name)
            .bind(&candidate.last_name)
            .bind(&candidate.personal_email)
            .bind(&candidate.mobile_no)
            .bind(&candidate.alternate_contact_no)
            .bind(&candidate.highest_educational_qualifications)
            .bind(&candidate.academic_performance)
            .bind(&candidate.current_company)
            .bind(&candidate.current_designation)
            .bind(candidate.total_experience)
            .bind(candidate.relevant_experience)
            .bind(&candidate.primary_skills)
            .bind(&candidate.resume_attachments)
            .bind(&candidate.self_introduction_video)
            .bind(&candidate.referred_by)
            .bind(candidate.self_declaration)
            .bind(candidate.submitted_at)
            .fetch_one(&self.pool)
            .await?;
        Ok(stored)
    }

    async fn list_candidates(&self, job_id: Option<Uuid>) -> Result<Vec<Candidate>> {
        let sql = format!(
            r#"
            SELECT {CANDIDATE_COLUMNS}
            FROM candidates
            WHERE ($1::uuid IS NULL OR job_id = $1)
            ORDER BY submitted_at DESC
            "#
        );
        let candidates = sqlx::query_as::<_, Candidate>(&sql)
            .bind(job_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(candidates)
    }

    async fn get_candidate(&self, id: Uuid) -> Result<Option<Candidate>> {
        let sql = format!("SELECT {CANDIDATE_COLUMNS} FROM candidates WHERE id = $1");
        let candidate = sqlx::query_as::<_, Candidate>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(candidate)
    }

    async fn count_candidates(&self, job_id: Option<Uuid>) -> Result<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM candidates WHERE ($1::uuid IS NULL OR job_id = $1)",
        )
        .bind(job_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }
}
