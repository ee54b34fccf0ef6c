use std::path::PathBuf;

use bytes::Bytes;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::upload::UploadCategory;
use crate::utils::time::{file_stamp, now};
use crate::utils::validation::file_extension;

/// Longest sanitized original name kept in a stored file name. With the
/// stamp, id and category prefix the reference stays within 255 characters.
const ORIGINAL_NAME_MAX_LEN: usize = 120;

/// Writes applicant files under `<root>/resumes` and `<root>/videos` and
/// hands back references relative to the root.
#[derive(Clone, Debug)]
pub struct UploadService {
    root: PathBuf,
}

/// Keeps the last path component, replaces anything outside
/// `[A-Za-z0-9._-]` with `_` and shortens the stem to fit
/// [`ORIGINAL_NAME_MAX_LEN`].
fn sanitize_filename(filename: &str) -> String {
    let base = filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default();
    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let cleaned = cleaned.trim_start_matches('.');
    if cleaned.is_empty() {
        return "upload".to_string();
    }
    if cleaned.len() <= ORIGINAL_NAME_MAX_LEN {
        return cleaned.to_string();
    }
    match cleaned.rsplit_once('.') {
        Some((stem, ext)) if ext.len() < ORIGINAL_NAME_MAX_LEN / 2 => {
            let keep = ORIGINAL_NAME_MAX_LEN - ext.len() - 1;
            format!("{}.{}", &stem[..keep.min(stem.len())], ext)
        }
        _ => cleaned[..ORIGINAL_NAME_MAX_LEN].to_string(),
    }
}

impl UploadService {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Removes a stored file that will not be referenced. Failures are only
    /// logged.
    pub async fn discard(&self, reference: &str) {
        let path = self.root.join(reference);
        if let Err(e) = fs::remove_file(&path).await {
            tracing::warn!(path = %path.display(), error = %e, "failed to remove discarded upload");
        }
    }

    pub async fn ensure_dirs(&self) -> Result<()> {
        for category in [UploadCategory::Resume, UploadCategory::Video] {
            fs::create_dir_all(self.root.join(category.dir())).await?;
        }
        Ok(())
    }

    /// Filename checks that need no IO. Returns the lowercased extension.
    pub fn check(category: UploadCategory, filename: &str) -> Result<String> {
        if filename.trim().is_empty() {
            return Err(Error::BadRequest("No file selected".to_string()));
        }
        match file_extension(filename) {
            Some(ext) if category.allowed_extensions().contains(&ext.as_str()) => Ok(ext),
            _ => Err(Error::BadRequest(
                category.invalid_type_message().to_string(),
            )),
        }
    }

    pub async fn store(
        &self,
        category: UploadCategory,
        filename: &str,
        data: &Bytes,
    ) -> Result<String> {
        let ext = Self::check(category, filename)?;
        if data.is_empty() {
            return Err(Error::BadRequest("Uploaded file is empty".to_string()));
        }

        let original = match category {
            UploadCategory::Resume => sanitize_filename(filename),
            UploadCategory::Video => format!("recording.{}", ext),
        };
        let short_id = Uuid::new_v4().simple().to_string();
        let stored_name = format!("{}_{}_{}", file_stamp(now()), &short_id[..8], original);

        let dir = self.root.join(category.dir());
        fs::create_dir_all(&dir).await?;
        let path = dir.join(&stored_name);

        let mut file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
            .map_err(|e| {
                tracing::error!(path = %path.display(), error = %e, "failed to create upload");
                Error::Io(e)
            })?;
        file.write_all(data).await?;
        file.flush().await?;

        tracing::info!(category = category.dir(), file = %stored_name, bytes = data.len(), "upload stored");
        Ok(format!("{}/{}", category.dir(), stored_name))
    }
}
