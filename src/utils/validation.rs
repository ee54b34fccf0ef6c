//! Field rules shared by the conversational validators and the
//! `validator` derives on finalized records.

use std::borrow::Cow;
use std::sync::OnceLock;

use regex::Regex;
use validator::{ValidationError, ValidationErrors};

pub const NAME_MAX_LEN: usize = 50;
pub const EMAIL_MAX_LEN: usize = 120;
pub const EDUCATION_MAX_LEN: usize = 200;
pub const ACADEMIC_MAX_LEN: usize = 50;
pub const OPTIONAL_TEXT_MAX_LEN: usize = 100;
pub const SKILLS_MAX_LEN: usize = 255;
pub const SKILLS_MAX_ENTRIES: usize = 3;
pub const REFERENCE_MAX_LEN: usize = 255;

pub const RESUME_EXTENSIONS: &[&str] = &["pdf", "doc", "docx"];
pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "webm", "mov"];

fn name_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Za-z\s]+$").expect("name pattern compiles"))
}

fn email_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
            .expect("email pattern compiles")
    })
}

fn phone_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[0-9]{10}$").expect("phone pattern compiles"))
}

fn number_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"-?(?:[0-9]+(?:\.[0-9]+)?|\.[0-9]+)").expect("number pattern compiles"))
}

pub fn is_valid_name(value: &str) -> bool {
    value.chars().count() <= NAME_MAX_LEN && name_regex().is_match(value)
}

pub fn is_valid_email(value: &str) -> bool {
    value.chars().count() <= EMAIL_MAX_LEN && email_regex().is_match(value)
}

pub fn is_valid_phone(value: &str) -> bool {
    phone_regex().is_match(value)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreScale {
    Cgpa,
    Percentage,
}

impl ScoreScale {
    pub fn max(self) -> f64 {
        match self {
            ScoreScale::Cgpa => 10.0,
            ScoreScale::Percentage => 100.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AcademicScore {
    pub scale: ScoreScale,
    pub value: f64,
}

/// Reads the first number in `value`. Text mentioning "cgpa" is scored on a
/// 0-10 scale, anything else as a percentage.
pub fn parse_academic_performance(value: &str) -> Result<AcademicScore, &'static str> {
    if value.trim().is_empty() {
        return Err("Academic performance is required");
    }
    if value.chars().count() > ACADEMIC_MAX_LEN {
        return Err("Academic performance must be at most 50 characters");
    }
    let scale = if value.to_lowercase().contains("cgpa") {
        ScoreScale::Cgpa
    } else {
        ScoreScale::Percentage
    };
    let score = number_regex()
        .find(value)
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .ok_or("Invalid academic performance format")?;

    if !(0.0..=scale.max()).contains(&score) {
        return Err(match scale {
            ScoreScale::Cgpa => "CGPA must be between 0 and 10",
            ScoreScale::Percentage => "Percentage must be between 0 and 100",
        });
    }
    Ok(AcademicScore { scale, value: score })
}

pub fn parse_experience(value: &str) -> Result<f64, &'static str> {
    let years: f64 = value
        .trim()
        .parse()
        .map_err(|_| "Experience must be a number")?;
    if !years.is_finite() {
        return Err("Experience must be a number");
    }
    if years < 0.0 {
        return Err("Experience cannot be negative");
    }
    Ok(years)
}

/// Splits a comma separated skill list. Empty pieces still count towards the
/// entry limit but are dropped from the result.
pub fn parse_skills(value: &str) -> Result<Vec<String>, &'static str> {
    if value.chars().count() > SKILLS_MAX_LEN {
        return Err("Skills must be at most 255 characters in total");
    }
    let pieces: Vec<&str> = value.split(',').map(str::trim).collect();
    if pieces.len() > SKILLS_MAX_ENTRIES {
        return Err("Maximum 3 primary skills are allowed");
    }
    let skills: Vec<String> = pieces
        .into_iter()
        .filter(|skill| !skill.is_empty())
        .map(str::to_string)
        .collect();
    if skills.is_empty() {
        return Err("Primary skills are required");
    }
    Ok(skills)
}

pub fn file_extension(filename: &str) -> Option<String> {
    let (_, ext) = filename.rsplit_once('.')?;
    if ext.is_empty() {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

pub fn has_allowed_extension(filename: &str, allowed: &[&str]) -> bool {
    file_extension(filename)
        .map(|ext| allowed.contains(&ext.as_str()))
        .unwrap_or(false)
}

fn rule_error(code: &'static str, message: impl Into<Cow<'static, str>>) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(message.into());
    err
}

pub fn name_rule(value: &str) -> Result<(), ValidationError> {
    if is_valid_name(value) {
        Ok(())
    } else {
        Err(rule_error(
            "name",
            "must contain only alphabets and spaces (at most 50 characters)",
        ))
    }
}

pub fn email_rule(value: &str) -> Result<(), ValidationError> {
    if is_valid_email(value) {
        Ok(())
    } else {
        Err(rule_error("email", "Invalid email format"))
    }
}

pub fn phone_rule(value: &str) -> Result<(), ValidationError> {
    if is_valid_phone(value) {
        Ok(())
    } else {
        Err(rule_error("phone", "must be a 10-digit number"))
    }
}

pub fn academic_rule(value: &str) -> Result<(), ValidationError> {
    parse_academic_performance(value)
        .map(|_| ())
        .map_err(|msg| rule_error("academic_performance", msg))
}

pub fn skills_rule(value: &str) -> Result<(), ValidationError> {
    parse_skills(value)
        .map(|_| ())
        .map_err(|msg| rule_error("primary_skills", msg))
}

pub fn resume_rule(value: &str) -> Result<(), ValidationError> {
    if has_allowed_extension(value, RESUME_EXTENSIONS) {
        Ok(())
    } else {
        Err(rule_error("resume", "Resume must be in PDF or DOC format"))
    }
}

pub fn video_rule(value: &str) -> Result<(), ValidationError> {
    if has_allowed_extension(value, VIDEO_EXTENSIONS) {
        Ok(())
    } else {
        Err(rule_error("video", "Video must be an MP4, WebM or MOV file"))
    }
}

pub fn declaration_rule(value: &bool) -> Result<(), ValidationError> {
    if *value {
        Ok(())
    } else {
        Err(rule_error("self_declaration", "You must accept the self declaration"))
    }
}

/// Flattens validation errors into one sorted, human readable sentence.
pub fn describe(errors: &ValidationErrors) -> String {
    let mut parts: Vec<String> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            let field = field.to_string();
            errs.iter()
                .map(move |err| match &err.message {
                    Some(message) if field == "__all__" => message.to_string(),
                    Some(message) => format!("{}: {}", field, message),
                    None => format!("{}: invalid value", field),
                })
                .collect::<Vec<_>>()
        })
        .collect();
    parts.sort();
    parts.join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mobile_accepts_exactly_ten_digits() {
        assert!(is_valid_phone("9876543210"));
        assert!(is_valid_phone("0000000000"));
        assert!(!is_valid_phone("987654321"));
        assert!(!is_valid_phone("98765432101"));
        assert!(!is_valid_phone("98765x3210"));
        assert!(!is_valid_phone("+919876543"));
        assert!(!is_valid_phone(""));
        assert!(!is_valid_phone("٩٨٧٦٥٤٣٢١٠"));
    }

    #[test]
    fn names_are_letters_and_spaces_only() {
        assert!(is_valid_name("Asha"));
        assert!(is_valid_name("Mary Ann"));
        assert!(!is_valid_name("R2D2"));
        assert!(!is_valid_name("O'Neil"));
        assert!(!is_valid_name(""));
        assert!(!is_valid_name(&"a".repeat(51)));
        assert!(is_valid_name(&"a".repeat(50)));
    }

    #[test]
    fn email_follows_local_at_domain_tld() {
        assert!(is_valid_email("asha@example.com"));
        assert!(is_valid_email("first.last+tag@mail.example.co"));
        assert!(!is_valid_email("asha@example"));
        assert!(!is_valid_email("asha.example.com"));
        assert!(!is_valid_email("asha@example.c"));
        let long = format!("{}@example.com", "a".repeat(120));
        assert!(!is_valid_email(&long));
    }

    #[test]
    fn cgpa_scores_use_ten_point_scale() {
        let score = parse_academic_performance("8.2 CGPA").unwrap();
        assert_eq!(score.scale, ScoreScale::Cgpa);
        assert!((score.value - 8.2).abs() < f64::EPSILON);
        assert!(parse_academic_performance("10 cgpa").is_ok());
        assert_eq!(
            parse_academic_performance("11 CGPA"),
            Err("CGPA must be between 0 and 10")
        );
        assert!(parse_academic_performance("cGpA 85").is_err());
        assert_eq!(
            parse_academic_performance("-3 CGPA"),
            Err("CGPA must be between 0 and 10")
        );
        let fractional = parse_academic_performance(".5 CGPA").unwrap();
        assert!((fractional.value - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn percentages_use_hundred_point_scale() {
        let score = parse_academic_performance("75%").unwrap();
        assert_eq!(score.scale, ScoreScale::Percentage);
        assert!(parse_academic_performance("100%").is_ok());
        assert_eq!(
            parse_academic_performance("100.5%"),
            Err("Percentage must be between 0 and 100")
        );
        assert_eq!(
            parse_academic_performance("-50%"),
            Err("Percentage must be between 0 and 100")
        );
        assert_eq!(
            parse_academic_performance("excellent"),
            Err("Invalid academic performance format")
        );
    }

    #[test]
    fn skills_are_capped_at_three_entries() {
        assert_eq!(
            parse_skills(" Python , SQL ").unwrap(),
            vec!["Python".to_string(), "SQL".to_string()]
        );
        assert!(parse_skills("a,b,c").is_ok());
        assert_eq!(
            parse_skills("a,b,c,d"),
            Err("Maximum 3 primary skills are allowed")
        );
        assert_eq!(parse_skills("a,,b,c"), Err("Maximum 3 primary skills are allowed"));
        assert_eq!(parse_skills(" , "), Err("Primary skills are required"));
        assert!(parse_skills(&"x".repeat(256)).is_err());
    }

    #[test]
    fn experience_must_be_finite_and_non_negative() {
        assert_eq!(parse_experience("2.5"), Ok(2.5));
        assert_eq!(parse_experience(" 0 "), Ok(0.0));
        assert_eq!(parse_experience("-1"), Err("Experience cannot be negative"));
        assert_eq!(parse_experience("two"), Err("Experience must be a number"));
        assert_eq!(parse_experience("inf"), Err("Experience must be a number"));
        assert_eq!(parse_experience("NaN"), Err("Experience must be a number"));
    }

    #[test]
    fn extensions_compare_case_insensitively() {
        assert_eq!(file_extension("CV.PDF"), Some("pdf".to_string()));
        assert_eq!(file_extension("archive.tar.gz"), Some("gz".to_string()));
        assert_eq!(file_extension("noext"), None);
        assert_eq!(file_extension("trailing."), None);
        assert!(has_allowed_extension("resume.DOCX", RESUME_EXTENSIONS));
        assert!(!has_allowed_extension("resume.exe", RESUME_EXTENSIONS));
        assert!(has_allowed_extension("clip.webm", VIDEO_EXTENSIONS));
    }
}
