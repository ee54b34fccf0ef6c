use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use uuid::Uuid;

use super::RecordStore;
use crate::error::{Error, Result};
use crate::models::candidate::{Candidate, NewCandidate};
use crate::models::job::{Job, JobChanges, NewJob};
use crate::utils::time::now;

#[derive(Debug, Default)]
struct Tables {
    jobs: HashMap<Uuid, Job>,
    candidates: HashMap<Uuid, Candidate>,
}

/// Process-local record store used when no database is configured and in
/// tests. Enforces the same keys and references as the Postgres schema.
#[derive(Debug, Default)]
pub struct MemoryRecordStore {
    tables: Mutex<Tables>,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn tables(&self) -> Result<MutexGuard<'_, Tables>> {
        self.tables
            .lock()
            .map_err(|_| Error::Internal("record store lock poisoned".to_string()))
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn create_job(&self, job: NewJob) -> Result<Job> {
        let mut tables = self.tables()?;
        if tables.jobs.values().any(|j| j.link_hash == job.link_hash) {
            return Err(Error::Conflict(
                "A record with the same unique key already exists".to_string(),
            ));
        }
        let job = Job {
            id: Uuid::new_v4(),
            title: job.title,
            description: job.description,
            link_hash: job.link_hash,
            start_date: job.start_date,
            end_date: job.end_date,
            is_active: job.is_active,
            created_at: now(),
        };
        tables.jobs.insert(job.id, job.clone());
        Ok(job)
    }

    async fn get_job(&self, id: Uuid) -> Result<Option<Job>> {
        Ok(self.tables()?.jobs.get(&id).cloned())
    }

    async fn get_job_by_link(&self, link_hash: &str) -> Result<Option<Job>> {
        Ok(self
            .tables()?
            .jobs
            .values()
            .find(|job| job.link_hash == link_hash)
            .cloned())
    }

    async fn list_jobs(&self) -> Result<Vec<Job>> {
        let mut jobs: Vec<Job> = self.tables()?.jobs.values().cloned().collect();
        jobs.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(jobs)
    }

    async fn update_job(&self, id: Uuid, changes: JobChanges) -> Result<Job> {
        let mut tables = self.tables()?;
        let job = tables
            .jobs
            .get_mut(&id)
            .ok_or_else(|| Error::NotFound("Job not found".to_string()))?;
        changes.apply_to(job);
        Ok(job.clone())
    }

    async fn delete_job(&self, id: Uuid) -> Result<bool> {
        let mut tables = self.tables()?;
        if tables.jobs.remove(&id).is_none() {
            return Ok(false);
        }
        tables.candidates.retain(|_, c| c.job_id != id);
        Ok(true)
    }

    async fn insert_candidate(&self, candidate: &NewCandidate) -> Result<Candidate> {
        let mut tables = self.tables()?;
        if !tables.jobs.contains_key(&candidate.job_id) {
            return Err(Error::Conflict(
                "The referenced job no longer exists".to_string(),
            ));
        }
        let stored = candidate.clone().into_candidate(Uuid::new_v4());
        tables.candidates.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn list_candidates(&self, job_id: Option<Uuid>) -> Result<Vec<Candidate>> {
        let mut candidates: Vec<Candidate> = self
            .tables()?
            .candidates
            .values()
            .filter(|c| job_id.map_or(true, |id| c.job_id == id))
            .cloned()
            .collect();
        candidates.sort_by(|a, b| b.submitted_at.cmp(&a.submitted_at));
        Ok(candidates)
    }

    async fn get_candidate(&self, id: Uuid) -> Result<Option<Candidate>> {
        Ok(self.tables()?.candidates.get(&id).cloned())
    }

    async fn count_candidates(&self, job_id: Option<Uuid>) -> Result<i64> {
        let count = self
            .tables()?
            .candidates
            .values()
            .filter(|c| job_id.map_or(true, |id| c.job_id == id))
            .count();
        Ok(count as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn candidate_for(job_id: Uuid) -> NewCandidate {
        NewCandidate {
            job_id,
            first_name: "Asha".into(),
            last_name: "Rao".into(),
            personal_email: "asha@example.com".into(),
            mobile_no: "9876543210".into(),
            alternate_contact_no: None,
            highest_educational_qualifications: "B.Tech".into(),
            academic_performance: "75%".into(),
            current_company: None,
            current_designation: None,
            total_experience: 0.0,
            relevant_experience: 0.0,
            primary_skills: "Python".into(),
            resume_attachments: "resumes/cv.pdf".into(),
            self_introduction_video: None,
            referred_by: None,
            self_declaration: true,
            submitted_at: Utc::now(),
        }
    }

    async fn seeded(store: &MemoryRecordStore, link: &str) -> Job {
        store
            .create_job(NewJob::open_for(
                "Backend Engineer".into(),
                "Rust services".into(),
                link.into(),
                Utc::now(),
                10,
            ))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn candidates_need_an_existing_job() {
        let store = MemoryRecordStore::new();
        let err = store
            .insert_candidate(&candidate_for(Uuid::new_v4()))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Conflict(_)));
    }

    #[tokio::test]
    async fn deleting_a_job_cascades_to_candidates() {
        let store = MemoryRecordStore::new();
        let kept = seeded(&store, "keep").await;
        let dropped = seeded(&store, "drop").await;
        store.insert_candidate(&candidate_for(kept.id)).await.unwrap();
        store.insert_candidate(&candidate_for(dropped.id)).await.unwrap();

        assert!(store.delete_job(dropped.id).await.unwrap());
        assert!(!store.delete_job(dropped.id).await.unwrap());
        assert_eq!(store.count_candidates(None).await.unwrap(), 1);
        assert_eq!(store.count_candidates(Some(dropped.id)).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn link_hash_is_unique() {
        let store = MemoryRecordStore::new();
        seeded(&store, "same").await;
        let err = store
            .create_job(NewJob::open_for(
                "Other".into(),
                "Other".into(),
                "same".into(),
                Utc::now(),
                5,
            ))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Conflict(_)));
    }

    #[tokio::test]
    async fn updates_keep_the_link() {
        let store = MemoryRecordStore::new();
        let job = seeded(&store, "stable").await;
        let updated = store
            .update_job(
                job.id,
                JobChanges {
                    title: Some("Platform Engineer".into()),
                    is_active: Some(false),
                    ..JobChanges::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.title, "Platform Engineer");
        assert!(!updated.is_active);
        assert_eq!(updated.link_hash, "stable");
        assert!(store
            .update_job(Uuid::new_v4(), JobChanges::default())
            .await
            .is_err());
    }
}
