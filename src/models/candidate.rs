use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::utils::validation::{
    academic_rule, declaration_rule, email_rule, name_rule, phone_rule, resume_rule,
    skills_rule, video_rule,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Candidate {
    pub id: Uuid,
    pub job_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub personal_email: String,
    pub mobile_no: String,
    pub alternate_contact_no: Option<String>,
    pub highest_educational_qualifications: String,
    pub academic_performance: String,
    pub current_company: Option<String>,
    pub current_designation: Option<String>,
    pub total_experience: f64,
    pub relevant_experience: f64,
    pub primary_skills: String,
    pub resume_attachments: String,
    pub self_introduction_video: Option<String>,
    pub referred_by: Option<String>,
    pub self_declaration: bool,
    pub submitted_at: DateTime<Utc>,
}

impl Candidate {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// A fully validated application, bound to its job but not yet stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[validate(schema(function = "experience_is_ordered"))]
pub struct NewCandidate {
    pub job_id: Uuid,
    #[validate(custom(function = "name_rule"))]
    pub first_name: String,
    #[validate(custom(function = "name_rule"))]
    pub last_name: String,
    #[validate(custom(function = "email_rule"))]
    pub personal_email: String,
    #[validate(custom(function = "phone_rule"))]
    pub mobile_no: String,
    #[validate(custom(function = "phone_rule"))]
    pub alternate_contact_no: Option<String>,
    #[validate(length(min = 1, max = 200))]
    pub highest_educational_qualifications: String,
    #[validate(custom(function = "academic_rule"))]
    pub academic_performance: String,
    #[validate(length(min = 1, max = 100))]
    pub current_company: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub current_designation: Option<String>,
    #[validate(range(min = 0.0))]
    pub total_experience: f64,
    #[validate(range(min = 0.0))]
    pub relevant_experience: f64,
    #[validate(custom(function = "skills_rule"))]
    pub primary_skills: String,
    #[validate(length(min = 1, max = 255), custom(function = "resume_rule"))]
    pub resume_attachments: String,
    #[validate(length(min = 1, max = 255), custom(function = "video_rule"))]
    pub self_introduction_video: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub referred_by: Option<String>,
    #[validate(custom(function = "declaration_rule"))]
    pub self_declaration: bool,
    pub submitted_at: DateTime<Utc>,
}

fn experience_is_ordered(candidate: &NewCandidate) -> Result<(), ValidationError> {
    if candidate.relevant_experience > candidate.total_experience {
        let mut err = ValidationError::new("experience");
        err.message = Some("Relevant experience cannot exceed total experience".into());
        return Err(err);
    }
    Ok(())
}

impl NewCandidate {
    pub fn into_candidate(self, id: Uuid) -> Candidate {
        Candidate {
            id,
            job_id: self.job_id,
            first_name: self.first_name,
            last_name: self.last_name,
            personal_email: self.personal_email,
            mobile_no: self.mobile_no,
            alternate_contact_no: self.alternate_contact_no,
            highest_educational_qualifications: self.highest_educational_qualifications,
            academic_performance: self.academic_performance,
            current_company: self.current_company,
            current_designation: self.current_designation,
            total_experience: self.total_experience,
            relevant_experience: self.relevant_experience,
            primary_skills: self.primary_skills,
            resume_attachments: self.resume_attachments,
            self_introduction_video: self.self_introduction_video,
            referred_by: self.referred_by,
            self_declaration: self.self_declaration,
            submitted_at: self.submitted_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::validation::describe;

    fn valid() -> NewCandidate {
        NewCandidate {
            job_id: Uuid::new_v4(),
            first_name: "Asha".into(),
            last_name: "Rao".into(),
            personal_email: "asha@example.com".into(),
            mobile_no: "9876543210".into(),
            alternate_contact_no: None,
            highest_educational_qualifications: "B.Tech".into(),
            academic_performance: "8.2 CGPA".into(),
            current_company: None,
            current_designation: None,
            total_experience: 0.0,
            relevant_experience: 0.0,
            primary_skills: "Python, SQL".into(),
            resume_attachments: "resumes/20250101_120000_ab12cd34_cv.pdf".into(),
            self_introduction_video: None,
            referred_by: None,
            self_declaration: true,
            submitted_at: Utc::now(),
        }
    }

    #[test]
    fn complete_application_passes() {
        assert!(valid().validate().is_ok());
    }

    #[test]
    fn relevant_experience_cannot_exceed_total() {
        let mut candidate = valid();
        candidate.total_experience = 2.0;
        candidate.relevant_experience = 3.0;
        let errors = candidate.validate().unwrap_err();
        assert_eq!(
            describe(&errors),
            "Relevant experience cannot exceed total experience"
        );
    }

    #[test]
    fn declaration_and_resume_are_enforced() {
        let mut candidate = valid();
        candidate.self_declaration = false;
        candidate.resume_attachments = "resumes/cv.exe".into();
        candidate.alternate_contact_no = Some("12345".into());
        let errors = candidate.validate().unwrap_err();
        let text = describe(&errors);
        assert!(text.contains("self_declaration"));
        assert!(text.contains("resume_attachments"));
        assert!(text.contains("alternate_contact_no"));
    }
}
