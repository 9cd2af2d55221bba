//! Raw upload storage
//!
//! Writes uploaded bytes below `<root>/prd` under a timestamp-prefixed name.
//! Existing files are never overwritten. Nothing reads them back.

use chrono::{DateTime, Utc};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

use prd_common::Result;

/// MIME types accepted by the upload endpoint
pub const ACCEPTED_MIME_TYPES: [&str; 2] = [
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
];

pub fn is_accepted_mime(content_type: &str) -> bool {
    ACCEPTED_MIME_TYPES.contains(&content_type.trim())
}

/// Final path component of a client-supplied file name
///
/// Both `/` and `\` separators are stripped; an empty result becomes `"upload"`.
pub fn sanitize_file_name(name: &str) -> String {
    let base = name
        .rsplit(|c: char| c == '/' || c == '\\')
        .next()
        .unwrap_or_default()
        .trim();
    if base.is_empty() || base == "." || base == ".." {
        "upload".to_string()
    } else {
        base.to_string()
    }
}

/// `<file_stamp>_<basename>`
pub fn stored_file_name(original: &str, at: DateTime<Utc>) -> String {
    numbered_file_name(original, at, 0)
}

/// `<file_stamp>-<n>_<basename>` for the n-th name clash
fn numbered_file_name(original: &str, at: DateTime<Utc>, n: u32) -> String {
    let stamp = prd_common::time::file_stamp(at);
    let base = sanitize_file_name(original);
    if n == 0 {
        format!("{}_{}", stamp, base)
    } else {
        format!("{}-{}_{}", stamp, n, base)
    }
}

#[derive(Debug, Clone)]
pub struct UploadStore {
    dir: PathBuf,
}

impl UploadStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write the bytes and return the stored path
    ///
    /// The directory is created on demand. A name already on disk is retried
    /// with a numbered stamp.
    pub async fn save(&self, original_name: &str, bytes: &[u8], at: DateTime<Utc>) -> Result<PathBuf> {
        if !self.dir.exists() {
            debug!("Creating uploads directory: {}", self.dir.display());
            tokio::fs::create_dir_all(&self.dir).await?;
        }

        let mut attempt = 0u32;
        loop {
            let path = self.dir.join(numbered_file_name(original_name, at, attempt));
            let opened = tokio::fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&path)
                .await;
            match opened {
                Ok(mut file) => {
                    file.write_all(bytes).await?;
                    file.flush().await?;
                    info!(path = %path.display(), bytes = bytes.len(), "Upload stored");
                    return Ok(path);
                }
                Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                    debug!(path = %path.display(), "Upload name taken");
                    attempt += 1;
                }
                Err(e) => return Err(e.into()),
            }
        }
    }
}
