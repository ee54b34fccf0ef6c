use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Job {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub link_hash: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// Whether a job link currently accepts applications.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Availability {
    Open,
    NotYetOpen,
    Expired,
    Inactive,
}

impl Job {
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.end_date
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    /// Expiry wins over deactivation so an old link always reads as expired.
    pub fn availability_at(&self, now: DateTime<Utc>) -> Availability {
        if self.is_expired_at(now) {
            Availability::Expired
        } else if !self.is_active {
            Availability::Inactive
        } else if now < self.start_date {
            Availability::NotYetOpen
        } else {
            Availability::Open
        }
    }

    pub fn application_path(&self) -> String {
        format!("/apply/{}", self.link_hash)
    }
}

/// A job ready to be inserted, with its link and window already generated.
#[derive(Debug, Clone, PartialEq)]
pub struct NewJob {
    pub title: String,
    pub description: String,
    pub link_hash: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub is_active: bool,
}

impl NewJob {
    pub fn open_for(
        title: String,
        description: String,
        link_hash: String,
        now: DateTime<Utc>,
        days_valid: i64,
    ) -> Self {
        Self {
            title,
            description,
            link_hash,
            start_date: now,
            end_date: now + Duration::days(days_valid),
            is_active: true,
        }
    }
}

/// Admin edits. `link_hash` is deliberately absent: it never changes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JobChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub is_active: Option<bool>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
}

impl JobChanges {
    pub fn apply_to(&self, job: &mut Job) {
        if let Some(title) = &self.title {
            job.title = title.clone();
        }
        if let Some(description) = &self.description {
            job.description = description.clone();
        }
        if let Some(is_active) = self.is_active {
            job.is_active = is_active;
        }
        if let Some(start) = self.start_date {
            job.start_date = start;
        }
        if let Some(end) = self.end_date {
            job.end_date = end;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn job(now: DateTime<Utc>) -> Job {
        let new = NewJob::open_for("Dev".into(), "Build".into(), "tok".into(), now, 10);
        Job {
            id: Uuid::new_v4(),
            title: new.title,
            description: new.description,
            link_hash: new.link_hash,
            start_date: new.start_date,
            end_date: new.end_date,
            is_active: new.is_active,
            created_at: now,
        }
    }

    #[test]
    fn window_spans_days_valid() {
        let now = Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap();
        let job = job(now);
        assert_eq!(job.end_date, Utc.with_ymd_and_hms(2025, 1, 11, 12, 0, 0).unwrap());
        assert_eq!(job.availability_at(now), Availability::Open);
        assert_eq!(job.application_path(), "/apply/tok");
    }

    #[test]
    fn expiry_takes_precedence_over_inactive() {
        let now = Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap();
        let mut job = job(now);
        job.is_active = false;
        assert_eq!(job.availability_at(now), Availability::Inactive);
        assert_eq!(
            job.availability_at(now + Duration::days(11)),
            Availability::Expired
        );
        assert_eq!(
            job.availability_at(now - Duration::hours(1)),
            Availability::Inactive
        );
        job.is_active = true;
        assert_eq!(
            job.availability_at(now - Duration::hours(1)),
            Availability::NotYetOpen
        );
    }
}
