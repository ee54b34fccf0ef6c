use std::fmt;

use serde::{Deserialize, Serialize};

use super::draft::CandidateDraft;
use crate::utils::validation::{
    self, has_allowed_extension, EDUCATION_MAX_LEN, NAME_MAX_LEN, OPTIONAL_TEXT_MAX_LEN,
    REFERENCE_MAX_LEN, RESUME_EXTENSIONS, VIDEO_EXTENSIONS,
};

pub const SKIP_TOKEN: &str = "skip";
pub const NEGATION_TOKEN: &str = "no";
pub const AFFIRMATIVE_TOKEN: &str = "yes";

/// Candidate columns the conversation can fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    FirstName,
    LastName,
    PersonalEmail,
    MobileNo,
    AlternateContactNo,
    HighestEducationalQualifications,
    AcademicPerformance,
    CurrentCompany,
    CurrentDesignation,
    TotalExperience,
    RelevantExperience,
    PrimarySkills,
    ResumeAttachments,
    SelfIntroductionVideo,
    ReferredBy,
    SelfDeclaration,
}

impl Field {
    pub fn column(self) -> &'static str {
        match self {
            Field::FirstName => "first_name",
            Field::LastName => "last_name",
            Field::PersonalEmail => "personal_email",
            Field::MobileNo => "mobile_no",
            Field::AlternateContactNo => "alternate_contact_no",
            Field::HighestEducationalQualifications => "highest_educational_qualifications",
            Field::AcademicPerformance => "academic_performance",
            Field::CurrentCompany => "current_company",
            Field::CurrentDesignation => "current_designation",
            Field::TotalExperience => "total_experience",
            Field::RelevantExperience => "relevant_experience",
            Field::PrimarySkills => "primary_skills",
            Field::ResumeAttachments => "resume_attachments",
            Field::SelfIntroductionVideo => "self_introduction_video",
            Field::ReferredBy => "referred_by",
            Field::SelfDeclaration => "self_declaration",
        }
    }
}

/// Normalized value produced by an accepted answer.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Number(f64),
    Flag(bool),
    /// The applicant skipped an optional field or answered the negation token.
    Absent,
}

impl FieldValue {
    pub fn is_absent(&self) -> bool {
        matches!(self, FieldValue::Absent)
    }
}

/// Re-prompt shown when an answer is not accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection(String);

impl Rejection {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }

    pub fn message(&self) -> &str {
        &self.0
    }

    pub fn into_message(self) -> String {
        self.0
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn is_token(raw: &str, token: &str) -> bool {
    raw.eq_ignore_ascii_case(token)
}

fn bounded_text(raw: &str, max: usize, empty: &str, too_long: &str) -> Result<FieldValue, Rejection> {
    if raw.is_empty() {
        return Err(Rejection::new(empty));
    }
    if raw.chars().count() > max {
        return Err(Rejection::new(too_long));
    }
    Ok(FieldValue::Text(raw.to_string()))
}

fn name(raw: &str, label: &str) -> Result<FieldValue, Rejection> {
    if raw.chars().count() > NAME_MAX_LEN {
        return Err(Rejection::new(format!(
            "{} must be at most 50 characters. Please try again:",
            label
        )));
    }
    if !validation::is_valid_name(raw) {
        return Err(Rejection::new(format!(
            "{} must contain only alphabets. Please try again:",
            label
        )));
    }
    Ok(FieldValue::Text(raw.to_string()))
}

fn experience(raw: &str) -> Result<f64, Rejection> {
    validation::parse_experience(raw).map_err(|msg| match msg {
        "Experience cannot be negative" => {
            Rejection::new("Experience cannot be negative. Please try again:")
        }
        _ => Rejection::new("Please enter a valid number for experience (e.g., 2.5):"),
    })
}

fn upload_reference(raw: &str, allowed: &[&str], message: &str) -> Result<FieldValue, Rejection> {
    if raw.is_empty() || raw.chars().count() > REFERENCE_MAX_LEN || !has_allowed_extension(raw, allowed) {
        return Err(Rejection::new(message));
    }
    Ok(FieldValue::Text(raw.to_string()))
}

/// Checks one raw answer for `field`. `draft` supplies earlier answers for
/// rules that compare fields. Never touches the draft itself.
pub fn validate(field: Field, raw: &str, draft: &CandidateDraft) -> Result<FieldValue, Rejection> {
    let raw = raw.trim();
    match field {
        Field::FirstName => name(raw, "First name"),
        Field::LastName => name(raw, "Last name"),
        Field::PersonalEmail => {
            if validation::is_valid_email(raw) {
                Ok(FieldValue::Text(raw.to_string()))
            } else {
                Err(Rejection::new(
                    "Invalid email format. Please enter a valid email address:",
                ))
            }
        }
        Field::MobileNo => {
            if validation::is_valid_phone(raw) {
                Ok(FieldValue::Text(raw.to_string()))
            } else {
                Err(Rejection::new(
                    "Mobile number must be exactly 10 digits. Please try again:",
                ))
            }
        }
        Field::AlternateContactNo => {
            if is_token(raw, SKIP_TOKEN) {
                Ok(FieldValue::Absent)
            } else if validation::is_valid_phone(raw) {
                Ok(FieldValue::Text(raw.to_string()))
            } else {
                Err(Rejection::new(
                    "Alternate number must be exactly 10 digits. Please try again or type \"skip\":",
                ))
            }
        }
        Field::HighestEducationalQualifications => bounded_text(
            raw,
            EDUCATION_MAX_LEN,
            "Please enter your highest educational qualification:",
            "Educational qualification must be at most 200 characters. Please try again:",
        ),
        Field::AcademicPerformance => validation::parse_academic_performance(raw)
            .map(|_| FieldValue::Text(raw.to_string()))
            .map_err(|msg| {
                Rejection::new(format!(
                    "{}. Please enter your academic performance (e.g., \"8.5 CGPA\" or \"75%\"):",
                    msg
                ))
            }),
        Field::CurrentCompany => {
            if is_token(raw, NEGATION_TOKEN) {
                return Ok(FieldValue::Absent);
            }
            bounded_text(
                raw,
                OPTIONAL_TEXT_MAX_LEN,
                "Please enter your company name (or type \"no\"):",
                "Company name must be at most 100 characters. Please try again:",
            )
        }
        Field::CurrentDesignation => bounded_text(
            raw,
            OPTIONAL_TEXT_MAX_LEN,
            "Please enter your current designation:",
            "Designation must be at most 100 characters. Please try again:",
        ),
        Field::TotalExperience => experience(raw).map(FieldValue::Number),
        Field::RelevantExperience => {
            let years = experience(raw)?;
            match draft.total_experience {
                Some(total) if years > total => Err(Rejection::new(format!(
                    "Relevant experience cannot exceed your total experience of {} years. Please try again:",
                    total
                ))),
                _ => Ok(FieldValue::Number(years)),
            }
        }
        Field::PrimarySkills => validation::parse_skills(raw)
            .map(|skills| FieldValue::Text(skills.join(", ")))
            .map_err(|msg| {
                Rejection::new(format!(
                    "{}. Please enter up to 3 primary skills (comma-separated):",
                    msg
                ))
            }),
        Field::ResumeAttachments => upload_reference(
            raw,
            RESUME_EXTENSIONS,
            "Resume must be in PDF or DOC format.",
        ),
        Field::SelfIntroductionVideo => upload_reference(
            raw,
            VIDEO_EXTENSIONS,
            "Video must be an MP4, WebM or MOV file.",
        ),
        Field::ReferredBy => {
            if is_token(raw, NEGATION_TOKEN) {
                return Ok(FieldValue::Absent);
            }
            bounded_text(
                raw,
                OPTIONAL_TEXT_MAX_LEN,
                "Please enter the name of the person who referred you (or type \"no\"):",
                "Referrer name must be at most 100 characters. Please try again:",
            )
        }
        Field::SelfDeclaration => {
            if is_token(raw, AFFIRMATIVE_TOKEN) {
                Ok(FieldValue::Flag(true))
            } else {
                Err(Rejection::new(
                    "You must confirm the declaration to proceed. Type \"yes\" to confirm:",
                ))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty() -> CandidateDraft {
        CandidateDraft::default()
    }

    #[test]
    fn names_are_trimmed_and_checked() {
        assert_eq!(
            validate(Field::FirstName, "  Asha ", &empty()),
            Ok(FieldValue::Text("Asha".into()))
        );
        assert_eq!(
            validate(Field::LastName, "R4o", &empty()).unwrap_err().message(),
            "Last name must contain only alphabets. Please try again:"
        );
        assert!(validate(Field::FirstName, &"a".repeat(51), &empty())
            .unwrap_err()
            .message()
            .contains("at most 50"));
    }

    #[test]
    fn tokens_are_case_insensitive() {
        assert_eq!(
            validate(Field::AlternateContactNo, "SKIP", &empty()),
            Ok(FieldValue::Absent)
        );
        assert_eq!(
            validate(Field::CurrentCompany, "No", &empty()),
            Ok(FieldValue::Absent)
        );
        assert_eq!(
            validate(Field::SelfDeclaration, "Yes", &empty()),
            Ok(FieldValue::Flag(true))
        );
        assert!(validate(Field::SelfDeclaration, "sure", &empty()).is_err());
    }

    #[test]
    fn relevant_experience_is_checked_against_total() {
        let mut draft = empty();
        draft.total_experience = Some(2.0);
        assert_eq!(
            validate(Field::RelevantExperience, "1.5", &draft),
            Ok(FieldValue::Number(1.5))
        );
        assert!(validate(Field::RelevantExperience, "2.5", &draft).is_err());
        assert_eq!(
            validate(Field::RelevantExperience, "-1", &draft).unwrap_err().message(),
            "Experience cannot be negative. Please try again:"
        );
    }

    #[test]
    fn skills_are_normalized() {
        assert_eq!(
            validate(Field::PrimarySkills, "Python,SQL ,  Rust", &empty()),
            Ok(FieldValue::Text("Python, SQL, Rust".into()))
        );
        assert!(validate(Field::PrimarySkills, "a, b, c, d", &empty()).is_err());
    }

    #[test]
    fn academic_rejections_explain_the_range() {
        let rejection = validate(Field::AcademicPerformance, "12 CGPA", &empty()).unwrap_err();
        assert!(rejection.message().starts_with("CGPA must be between 0 and 10."));
        assert!(validate(Field::AcademicPerformance, "95.5%", &empty()).is_ok());
    }

    #[test]
    fn validation_is_deterministic() {
        let draft = empty();
        for (field, raw) in [
            (Field::PersonalEmail, "asha@example.com"),
            (Field::MobileNo, "12345"),
            (Field::AcademicPerformance, "8.2 CGPA"),
            (Field::PrimarySkills, "Python, SQL"),
        ] {
            assert_eq!(validate(field, raw, &draft), validate(field, raw, &draft));
        }
    }
}
