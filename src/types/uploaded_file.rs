use std::path::Path;

use crate::error::{Error, Result};

/// Largest file the client will send, in bytes.
pub const MAX_UPLOAD_BYTES: u64 = 5 * 1024 * 1024;

/// MIME types the server accepts for documents.
pub const ALLOWED_MIME_TYPES: &[&str] = &["application/pdf", "image/jpeg", "image/jpg", "image/png"];

/// A document picked by the user, held in memory until it is sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    /// File name without directories.
    pub name: String,

    /// MIME type of the contents.
    pub mime_type: String,

    /// File contents.
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    /// Creates a file from raw parts.
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            bytes,
        }
    }

    /// Reads a file from disk, deriving its MIME type from the extension.
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| {
                Error::validation(
                    format!("{} does not name a file", path.display()),
                    Some("file".to_string()),
                )
            })?;
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|err| Error::io(format!("failed to read {}", path.display()), err))?;
        Ok(Self::new(name, mime_type_for(path), bytes))
    }

    /// Size of the contents in bytes.
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// Checks type and size before anything goes over the wire.
    ///
    /// The error messages are the ones shown to the user.
    pub fn validate(&self) -> Result<()> {
        if !ALLOWED_MIME_TYPES.contains(&self.mime_type.as_str()) {
            return Err(Error::validation(
                "Please upload a PDF, JPG, or PNG file",
                Some("type".to_string()),
            ));
        }
        if self.size() > MAX_UPLOAD_BYTES {
            return Err(Error::validation(
                "File size should be less than 5MB",
                Some("size".to_string()),
            ));
        }
        Ok(())
    }
}

/// MIME type implied by a file's extension.
pub fn mime_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase());
    match ext.as_deref() {
        Some("pdf") => "application/pdf",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        _ => "application/octet-stream",
    }
}
