use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::field::{validate, Field, FieldValue, Rejection};
use crate::models::candidate::NewCandidate;
use crate::models::upload::UploadCategory;
use crate::utils::validation::describe;

/// Answers collected so far. Every field stays optional until `finalize`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CandidateDraft {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub personal_email: Option<String>,
    pub mobile_no: Option<String>,
    pub alternate_contact_no: Option<String>,
    pub highest_educational_qualifications: Option<String>,
    pub academic_performance: Option<String>,
    pub current_company: Option<String>,
    pub current_designation: Option<String>,
    pub total_experience: Option<f64>,
    pub relevant_experience: Option<f64>,
    pub primary_skills: Option<String>,
    pub resume_attachments: Option<String>,
    pub self_introduction_video: Option<String>,
    pub referred_by: Option<String>,
    pub self_declaration: Option<bool>,
}

fn text(value: FieldValue) -> Option<String> {
    match value {
        FieldValue::Text(text) => Some(text),
        FieldValue::Number(n) => Some(n.to_string()),
        FieldValue::Flag(_) | FieldValue::Absent => None,
    }
}

fn number(value: FieldValue) -> Option<f64> {
    match value {
        FieldValue::Number(n) => Some(n),
        FieldValue::Text(text) => text.parse().ok(),
        FieldValue::Flag(_) | FieldValue::Absent => None,
    }
}

impl CandidateDraft {
    /// Records an accepted answer.
    pub fn apply(&mut self, field: Field, value: FieldValue) {
        match field {
            Field::FirstName => self.first_name = text(value),
            Field::LastName => self.last_name = text(value),
            Field::PersonalEmail => self.personal_email = text(value),
            Field::MobileNo => self.mobile_no = text(value),
            Field::AlternateContactNo => self.alternate_contact_no = text(value),
            Field::HighestEducationalQualifications => {
                self.highest_educational_qualifications = text(value)
            }
            Field::AcademicPerformance => self.academic_performance = text(value),
            Field::CurrentCompany => {
                if value.is_absent() {
                    // Not employed: no designation and no experience to ask about.
                    self.current_company = None;
                    self.current_designation = None;
                    self.total_experience = Some(0.0);
                    self.relevant_experience = Some(0.0);
                } else {
                    self.current_company = text(value);
                }
            }
            Field::CurrentDesignation => self.current_designation = text(value),
            Field::TotalExperience => self.total_experience = number(value),
            Field::RelevantExperience => self.relevant_experience = number(value),
            Field::PrimarySkills => self.primary_skills = text(value),
            Field::ResumeAttachments => self.resume_attachments = text(value),
            Field::SelfIntroductionVideo => self.self_introduction_video = text(value),
            Field::ReferredBy => self.referred_by = text(value),
            Field::SelfDeclaration => {
                self.self_declaration = match value {
                    FieldValue::Flag(flag) => Some(flag),
                    _ => None,
                }
            }
        }
    }

    /// Stores the reference returned by the upload store once it passes the
    /// same rules the finalized record is held to.
    pub fn record_upload(&mut self, category: UploadCategory, reference: &str) -> Result<(), Rejection> {
        let field = match category {
            UploadCategory::Resume => Field::ResumeAttachments,
            UploadCategory::Video => Field::SelfIntroductionVideo,
        };
        let value = validate(field, reference, self)?;
        self.apply(field, value);
        Ok(())
    }

    pub fn has_upload(&self, category: UploadCategory) -> bool {
        match category {
            UploadCategory::Resume => self.resume_attachments.is_some(),
            UploadCategory::Video => self.self_introduction_video.is_some(),
        }
    }

    fn missing_fields(&self) -> Vec<&'static str> {
        let required = [
            (Field::FirstName, self.first_name.is_some()),
            (Field::LastName, self.last_name.is_some()),
            (Field::PersonalEmail, self.personal_email.is_some()),
            (Field::MobileNo, self.mobile_no.is_some()),
            (
                Field::HighestEducationalQualifications,
                self.highest_educational_qualifications.is_some(),
            ),
            (Field::AcademicPerformance, self.academic_performance.is_some()),
            (Field::TotalExperience, self.total_experience.is_some()),
            (Field::RelevantExperience, self.relevant_experience.is_some()),
            (Field::PrimarySkills, self.primary_skills.is_some()),
            (Field::ResumeAttachments, self.resume_attachments.is_some()),
            (Field::SelfDeclaration, self.self_declaration.is_some()),
        ];
        required
            .into_iter()
            .filter(|(_, present)| !present)
            .map(|(field, _)| field.column())
            .collect()
    }

    /// Builds the immutable record after checking every candidate rule,
    /// including the ones spanning several fields.
    pub fn finalize(&self, job_id: Uuid, submitted_at: DateTime<Utc>) -> Result<NewCandidate, Rejection> {
        let missing = self.missing_fields();
        if !missing.is_empty() {
            return Err(Rejection::new(format!(
                "Your application is missing required details ({}). Open the job application link again to start a new application.",
                missing.join(", ")
            )));
        }

        let draft = self.clone();
        let candidate = NewCandidate {
            job_id,
            first_name: draft.first_name.unwrap_or_default(),
            last_name: draft.last_name.unwrap_or_default(),
            personal_email: draft.personal_email.unwrap_or_default(),
            mobile_no: draft.mobile_no.unwrap_or_default(),
            alternate_contact_no: draft.alternate_contact_no,
            highest_educational_qualifications: draft
                .highest_educational_qualifications
                .unwrap_or_default(),
            academic_performance: draft.academic_performance.unwrap_or_default(),
            current_company: draft.current_company,
            current_designation: draft.current_designation,
            total_experience: draft.total_experience.unwrap_or_default(),
            relevant_experience: draft.relevant_experience.unwrap_or_default(),
            primary_skills: draft.primary_skills.unwrap_or_default(),
            resume_attachments: draft.resume_attachments.unwrap_or_default(),
            self_introduction_video: draft.self_introduction_video,
            referred_by: draft.referred_by,
            self_declaration: draft.self_declaration.unwrap_or(false),
            submitted_at,
        };

        candidate.validate().map_err(|errors| {
            Rejection::new(format!(
                "Your application could not be submitted: {}. Type \"yes\" to try again, or open the job application link again to start a new application.",
                describe(&errors)
            ))
        })?;
        Ok(candidate)
    }
}
