use serde::{Deserialize, Serialize};

use super::field::{Field, FieldValue};
use crate::models::upload::UploadCategory;

pub const GREETING: &str = "Hi! I'm the RecruitEase chatbot. I'll help you with your job application. Let's start with your name. What should I call you?";
pub const COMPLETION: &str = "Thank you for completing your application! We will review your information and get back to you soon.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    Initial,
    Greeting,
    AskingFirstName,
    AskingLastName,
    AskingEmail,
    AskingMobile,
    AskingAlternateMobile,
    AskingEducation,
    AskingAcademic,
    AskingCompany,
    AskingDesignation,
    AskingTotalExperience,
    AskingRelevantExperience,
    AskingSkills,
    AskingResume,
    AskingVideo,
    AskingReferral,
    AskingDeclaration,
}

/// What a step consumes from the applicant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expect {
    /// Any text moves the conversation on.
    Any,
    /// Text validated into one candidate field.
    Answer(Field),
    /// Only the upload sentinel for the category.
    Upload(UploadCategory),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepSpec {
    pub step: Step,
    /// Shown when the conversation arrives at this step.
    pub prompt: &'static str,
    pub expects: Expect,
}

const fn spec(step: Step, prompt: &'static str, expects: Expect) -> StepSpec {
    StepSpec {
        step,
        prompt,
        expects,
    }
}

static STEP_TABLE: [StepSpec; 18] = [
    spec(
        Step::Initial,
        "Send any message to start your application.",
        Expect::Any,
    ),
    spec(Step::Greeting, GREETING, Expect::Any),
    spec(
        Step::AskingFirstName,
        "Great! What is your first name?",
        Expect::Answer(Field::FirstName),
    ),
    spec(
        Step::AskingLastName,
        "What is your last name?",
        Expect::Answer(Field::LastName),
    ),
    spec(
        Step::AskingEmail,
        "Please enter your personal email address:",
        Expect::Answer(Field::PersonalEmail),
    ),
    spec(
        Step::AskingMobile,
        "Please enter your 10-digit mobile number:",
        Expect::Answer(Field::MobileNo),
    ),
    spec(
        Step::AskingAlternateMobile,
        "Would you like to provide an alternate contact number? (Enter the number or type \"skip\"):",
        Expect::Answer(Field::AlternateContactNo),
    ),
    spec(
        Step::AskingEducation,
        "What is your highest educational qualification?",
        Expect::Answer(Field::HighestEducationalQualifications),
    ),
    spec(
        Step::AskingAcademic,
        "Please enter your academic performance (e.g., \"8.5 CGPA\" or \"75%\"):",
        Expect::Answer(Field::AcademicPerformance),
    ),
    spec(
        Step::AskingCompany,
        "Are you currently employed? If yes, please enter your company name (or type \"no\"):",
        Expect::Answer(Field::CurrentCompany),
    ),
    spec(
        Step::AskingDesignation,
        "What is your current designation?",
        Expect::Answer(Field::CurrentDesignation),
    ),
    spec(
        Step::AskingTotalExperience,
        "Please enter your total work experience in years (e.g., 2.5):",
        Expect::Answer(Field::TotalExperience),
    ),
    spec(
        Step::AskingRelevantExperience,
        "Please enter your relevant experience in years:",
        Expect::Answer(Field::RelevantExperience),
    ),
    spec(
        Step::AskingSkills,
        "Please enter up to 3 primary skills (comma-separated):",
        Expect::Answer(Field::PrimarySkills),
    ),
    spec(
        Step::AskingResume,
        "Please upload your resume (PDF/DOC format):",
        Expect::Upload(UploadCategory::Resume),
    ),
    spec(
        Step::AskingVideo,
        "Great! Now, please record a short self-introduction video (maximum 2 minutes):",
        Expect::Upload(UploadCategory::Video),
    ),
    spec(
        Step::AskingReferral,
        "Were you referred by someone? If yes, please enter their name (or type \"no\"):",
        Expect::Answer(Field::ReferredBy),
    ),
    spec(
        Step::AskingDeclaration,
        "Please confirm that all information provided is true and accurate (type \"yes\" to confirm):",
        Expect::Answer(Field::SelfDeclaration),
    ),
];

impl Step {
    pub const ALL: [Step; 18] = [
        Step::Initial,
        Step::Greeting,
        Step::AskingFirstName,
        Step::AskingLastName,
        Step::AskingEmail,
        Step::AskingMobile,
        Step::AskingAlternateMobile,
        Step::AskingEducation,
        Step::AskingAcademic,
        Step::AskingCompany,
        Step::AskingDesignation,
        Step::AskingTotalExperience,
        Step::AskingRelevantExperience,
        Step::AskingSkills,
        Step::AskingResume,
        Step::AskingVideo,
        Step::AskingReferral,
        Step::AskingDeclaration,
    ];

    pub fn spec(self) -> &'static StepSpec {
        &STEP_TABLE[self as usize]
    }

    pub fn prompt(self) -> &'static str {
        self.spec().prompt
    }

    /// Step reached after an accepted answer, `None` once the declaration is
    /// accepted and the application is ready to commit.
    pub fn next(self, accepted: &FieldValue) -> Option<Step> {
        let next = match self {
            Step::Initial => Step::Greeting,
            Step::Greeting => Step::AskingFirstName,
            Step::AskingFirstName => Step::AskingLastName,
            Step::AskingLastName => Step::AskingEmail,
            Step::AskingEmail => Step::AskingMobile,
            Step::AskingMobile => Step::AskingAlternateMobile,
            Step::AskingAlternateMobile => Step::AskingEducation,
            Step::AskingEducation => Step::AskingAcademic,
            Step::AskingAcademic => Step::AskingCompany,
            Step::AskingCompany if accepted.is_absent() => Step::AskingSkills,
            Step::AskingCompany => Step::AskingDesignation,
            Step::AskingDesignation => Step::AskingTotalExperience,
            Step::AskingTotalExperience => Step::AskingRelevantExperience,
            Step::AskingRelevantExperience => Step::AskingSkills,
            Step::AskingSkills => Step::AskingResume,
            Step::AskingResume => Step::AskingVideo,
            Step::AskingVideo => Step::AskingReferral,
            Step::AskingReferral => Step::AskingDeclaration,
            Step::AskingDeclaration => return None,
        };
        Some(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_indexed_by_step() {
        for (index, step) in Step::ALL.iter().enumerate() {
            assert_eq!(*step as usize, index);
            assert_eq!(step.spec().step, *step);
        }
    }

    #[test]
    fn linear_path_visits_every_step_once() {
        let mut visited = vec![Step::Initial];
        let mut step = Step::Initial;
        let employed = FieldValue::Text("Acme".into());
        while let Some(next) = step.next(&employed) {
            visited.push(next);
            step = next;
        }
        assert_eq!(visited, Step::ALL.to_vec());
    }

    #[test]
    fn unemployed_branch_skips_to_skills() {
        assert_eq!(
            Step::AskingCompany.next(&FieldValue::Absent),
            Some(Step::AskingSkills)
        );
        assert_eq!(
            Step::AskingCompany.next(&FieldValue::Text("Acme".into())),
            Some(Step::AskingDesignation)
        );
    }

    #[test]
    fn upload_steps_name_their_category() {
        assert_eq!(
            Step::AskingResume.spec().expects,
            Expect::Upload(UploadCategory::Resume)
        );
        assert_eq!(
            Step::AskingVideo.spec().expects,
            Expect::Upload(UploadCategory::Video)
        );
        assert!(Step::AskingResume.prompt().contains("upload your resume"));
        assert!(Step::AskingVideo
            .prompt()
            .contains("record a short self-introduction video"));
    }

    #[test]
    fn steps_serialize_as_snake_case() {
        assert_eq!(
            serde_json::to_string(&Step::AskingAlternateMobile).unwrap(),
            "\"asking_alternate_mobile\""
        );
    }
}
