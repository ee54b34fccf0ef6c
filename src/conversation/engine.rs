use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::draft::CandidateDraft;
use super::field::{validate, FieldValue, Rejection};
use super::step::{Expect, Step};
use crate::models::candidate::NewCandidate;
use crate::models::upload::UploadCategory;

/// Per-browser conversation state, owned by the session store between turns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationSession {
    pub job_id: Uuid,
    pub step: Step,
    pub draft: CandidateDraft,
    pub created_at: DateTime<Utc>,
}

impl ApplicationSession {
    pub fn new(job_id: Uuid, created_at: DateTime<Utc>) -> Self {
        Self {
            job_id,
            step: Step::Initial,
            draft: CandidateDraft::default(),
            created_at,
        }
    }

    pub fn expires_at(&self, ttl: Duration) -> DateTime<Utc> {
        self.created_at + ttl
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        now >= self.expires_at(ttl)
    }

    pub fn record_upload(mut self, category: UploadCategory, reference: &str) -> Result<Self, Rejection> {
        self.draft.record_upload(category, reference)?;
        Ok(self)
    }
}

/// Result of one conversational turn.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Keep talking. `session` is the state to persist for the next turn.
    Reply {
        session: ApplicationSession,
        response: String,
    },
    /// The declaration was accepted and `candidate` passed every rule.
    /// `session` is unchanged so it can be kept if the commit fails.
    Submit {
        session: ApplicationSession,
        candidate: NewCandidate,
    },
}

impl Outcome {
    fn reply(session: ApplicationSession, response: impl Into<String>) -> Self {
        Outcome::Reply {
            session,
            response: response.into(),
        }
    }
}

fn move_on(mut session: ApplicationSession, next: Step) -> Outcome {
    session.step = next;
    Outcome::reply(session, next.prompt())
}

/// Runs one turn of the application conversation. Pure: all effects are
/// described by the returned `Outcome`.
pub fn advance(session: ApplicationSession, message: &str, now: DateTime<Utc>) -> Outcome {
    let message = message.trim();
    let step = session.step;

    match step.spec().expects {
        Expect::Any => match step.next(&FieldValue::Absent) {
            Some(next) => move_on(session, next),
            None => Outcome::reply(session, step.prompt()),
        },
        Expect::Upload(category) => {
            if !message.eq_ignore_ascii_case(category.sentinel()) {
                return Outcome::reply(session, category.use_control_prompt());
            }
            if category == UploadCategory::Resume && !session.draft.has_upload(category) {
                return Outcome::reply(
                    session,
                    "We have not received your resume yet. Please use the upload button to submit your resume.",
                );
            }
            match step.next(&FieldValue::Absent) {
                Some(next) => move_on(session, next),
                None => Outcome::reply(session, step.prompt()),
            }
        }
        Expect::Answer(field) => {
            let value = match validate(field, message, &session.draft) {
                Ok(value) => value,
                Err(rejection) => return Outcome::reply(session, rejection.into_message()),
            };
            match step.next(&value) {
                Some(next) => {
                    let mut session = session;
                    session.draft.apply(field, value);
                    move_on(session, next)
                }
                None => {
                    let mut draft = session.draft.clone();
                    draft.apply(field, value);
                    match draft.finalize(session.job_id, now) {
                        Ok(candidate) => Outcome::Submit { session, candidate },
                        Err(rejection) => Outcome::reply(session, rejection.into_message()),
                    }
                }
            }
        }
    }
}
