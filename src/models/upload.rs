use serde::{Deserialize, Serialize};

use crate::utils::validation::{RESUME_EXTENSIONS, VIDEO_EXTENSIONS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UploadCategory {
    Resume,
    Video,
}

impl UploadCategory {
    /// Subdirectory under the uploads root, also the reference prefix.
    pub fn dir(self) -> &'static str {
        match self {
            UploadCategory::Resume => "resumes",
            UploadCategory::Video => "videos",
        }
    }

    /// Multipart field carrying the file.
    pub fn form_field(self) -> &'static str {
        match self {
            UploadCategory::Resume => "resume",
            UploadCategory::Video => "video",
        }
    }

    pub fn allowed_extensions(self) -> &'static [&'static str] {
        match self {
            UploadCategory::Resume => RESUME_EXTENSIONS,
            UploadCategory::Video => VIDEO_EXTENSIONS,
        }
    }

    /// Chat message the client sends once the upload succeeded.
    pub fn sentinel(self) -> &'static str {
        match self {
            UploadCategory::Resume => "resume uploaded",
            UploadCategory::Video => "video uploaded",
        }
    }

    pub fn use_control_prompt(self) -> &'static str {
        match self {
            UploadCategory::Resume => "Please use the upload button to submit your resume.",
            UploadCategory::Video => "Please use the record button to submit your video.",
        }
    }

    pub fn invalid_type_message(self) -> &'static str {
        match self {
            UploadCategory::Resume => "Invalid file type. Please upload PDF or DOC files only.",
            UploadCategory::Video => "Invalid file type. Please upload MP4, WebM or MOV files only.",
        }
    }

    pub fn success_message(self) -> &'static str {
        match self {
            UploadCategory::Resume => "Resume uploaded successfully",
            UploadCategory::Video => "Video uploaded successfully",
        }
    }
}
