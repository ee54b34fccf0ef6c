use std::sync::Arc;

use bytes::Bytes;
use chrono::{DateTime, Duration, Utc};

use crate::conversation::{advance, ApplicationSession, Outcome, INVALID_JOB, SESSION_EXPIRED};
use crate::dto::chat_dto::ChatReply;
use crate::error::{Error, Result};
use crate::models::job::{Availability, Job};
use crate::models::upload::UploadCategory;
use crate::services::upload_service::UploadService;
use crate::store::{RecordStore, SessionId, SessionStore};
use crate::utils::time::now;

/// A freshly opened application: the session bound to the job behind the link.
#[derive(Debug, Clone)]
pub struct OpenedApplication {
    pub session_id: SessionId,
    pub job: Job,
    pub expires_at: DateTime<Utc>,
}

/// Drives applicant sessions: opening a link, chat turns and uploads.
#[derive(Clone)]
pub struct ChatService {
    records: Arc<dyn RecordStore>,
    sessions: Arc<dyn SessionStore>,
    uploads: UploadService,
    session_ttl: Duration,
}

impl ChatService {
    pub fn new(
        records: Arc<dyn RecordStore>,
        sessions: Arc<dyn SessionStore>,
        uploads: UploadService,
        session_ttl: Duration,
    ) -> Self {
        Self {
            records,
            sessions,
            uploads,
            session_ttl,
        }
    }

    pub fn session_ttl(&self) -> Duration {
        self.session_ttl
    }

    /// Resolves a job link and starts a new session for it, replacing any
    /// session the browser already had. Closed jobs never get a session.
    pub async fn open(&self, link_token: &str, previous: Option<&SessionId>) -> Result<OpenedApplication> {
        let job = self
            .records
            .get_job_by_link(link_token)
            .await?
            .ok_or_else(|| Error::NotFound("Job not found".to_string()))?;

        let current = now();
        match job.availability_at(current) {
            Availability::Open => {}
            Availability::Expired => return Err(Error::Gone("job_expired".to_string())),
            Availability::Inactive => return Err(Error::Forbidden("job_inactive".to_string())),
            Availability::NotYetOpen => return Err(Error::Forbidden("job_not_open".to_string())),
        }

        if let Some(previous) = previous {
            self.sessions.remove(previous).await?;
        }
        let session_id = SessionId::generate();
        let session = ApplicationSession::new(job.id, current);
        let expires_at = session.expires_at(self.session_ttl);
        self.sessions.save(&session_id, session).await?;

        tracing::info!(job_id = %job.id, "application session opened");
        Ok(OpenedApplication {
            session_id,
            job,
            expires_at,
        })
    }

    /// Loads a session and confirms its job still exists. A session whose
    /// job vanished is dropped.
    async fn bound_session(
        &self,
        id: &SessionId,
    ) -> Result<std::result::Result<ApplicationSession, &'static str>> {
        let Some(session) = self.sessions.load(id).await? else {
            return Ok(Err(SESSION_EXPIRED));
        };
        if self.records.get_job(session.job_id).await?.is_none() {
            tracing::warn!(job_id = %session.job_id, "session bound to a missing job");
            self.sessions.remove(id).await?;
            return Ok(Err(INVALID_JOB));
        }
        Ok(Ok(session))
    }

    pub async fn chat(&self, session_id: Option<&SessionId>, message: &str) -> Result<ChatReply> {
        let Some(id) = session_id else {
            return Ok(ChatReply::say(SESSION_EXPIRED));
        };
        let session = match self.bound_session(id).await? {
            Ok(session) => session,
            Err(restart) => return Ok(ChatReply::say(restart)),
        };

        match advance(session, message, now()) {
            Outcome::Reply { session, response } => {
                self.sessions.save(id, session).await?;
                Ok(ChatReply::say(response))
            }
            Outcome::Submit { session, candidate } => {
                match self.records.insert_candidate(&candidate).await {
                    Ok(stored) => {
                        self.sessions.remove(id).await?;
                        tracing::info!(
                            candidate_id = %stored.id,
                            job_id = %stored.job_id,
                            "application submitted"
                        );
                        Ok(ChatReply::completed())
                    }
                    Err(err) => {
                        tracing::error!(job_id = %session.job_id, error = %err, "failed to save application");
                        let reason = err.client_message();
                        self.sessions.save(id, session).await?;
                        Ok(ChatReply::retry_commit(&reason))
                    }
                }
            }
        }
    }

    /// Stores an uploaded file and records its reference in the session.
    /// Returns the success message for the category.
    pub async fn upload(
        &self,
        session_id: Option<&SessionId>,
        category: UploadCategory,
        filename: &str,
        data: &Bytes,
    ) -> Result<&'static str> {
        UploadService::check(category, filename)?;

        let id = session_id.ok_or_else(|| Error::BadRequest(SESSION_EXPIRED.to_string()))?;
        let session = self
            .bound_session(id)
            .await?
            .map_err(|restart| Error::BadRequest(restart.to_string()))?;

        let reference = self.uploads.store(category, filename, data).await?;
        let session = match session.record_upload(category, &reference) {
            Ok(session) => session,
            Err(rejection) => {
                self.uploads.discard(&reference).await;
                return Err(Error::BadRequest(rejection.into_message()));
            }
        };
        self.sessions.save(id, session).await?;
        Ok(category.success_message())
    }
}
