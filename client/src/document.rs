use crate::error::{ClientError, Result};
use std::fmt;
use std::path::Path;
use std::sync::Arc;

pub const PDF_MEDIA_TYPE: &str = "application/pdf";

/// A file the user picked, before validation.
#[derive(Clone)]
pub struct FileCandidate {
    pub name: String,
    pub media_type: String,
    pub bytes: Vec<u8>,
}

impl FileCandidate {
    pub fn new(name: impl Into<String>, media_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            media_type: media_type.into(),
            bytes,
        }
    }

    /// Reads a file from disk, declaring its media type from the extension.
    /// Only PDFs are read; anything else comes back with no bytes, since
    /// selection will reject it anyway.
    pub async fn from_path(path: &Path) -> Result<Self> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .ok_or_else(|| {
                ClientError::Io(std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    format!("'{}' does not name a file", path.display()),
                ))
            })?;

        let media_type = mime_guess::from_path(path).first_or_octet_stream().to_string();
        let metadata = tokio::fs::metadata(path).await?;
        if !metadata.is_file() {
            return Err(ClientError::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("'{}' is not a regular file", path.display()),
            )));
        }

        if !media_type.eq_ignore_ascii_case(PDF_MEDIA_TYPE) {
            log::debug!("Skipping read of {} ({})", name, media_type);
            return Ok(Self::new(name, media_type, Vec::new()));
        }
        let bytes = tokio::fs::read(path).await?;

        log::debug!("Read {} ({}, {} bytes)", name, media_type, bytes.len());
        Ok(Self::new(name, media_type, bytes))
    }

    pub fn is_pdf(&self) -> bool {
        self.media_type.trim().eq_ignore_ascii_case(PDF_MEDIA_TYPE)
    }

    pub fn validate(self) -> Result<SelectedFile> {
        if !self.is_pdf() {
            return Err(ClientError::InvalidFileType {
                media_type: self.media_type,
            });
        }
        Ok(SelectedFile {
            name: self.name,
            bytes: Arc::from(self.bytes),
        })
    }
}

impl fmt::Debug for FileCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileCandidate")
            .field("name", &self.name)
            .field("media_type", &self.media_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// A validated PDF waiting to be uploaded. Cloning shares the bytes.
#[derive(Clone, PartialEq, Eq)]
pub struct SelectedFile {
    name: String,
    bytes: Arc<[u8]>,
}

impl SelectedFile {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn media_type(&self) -> &'static str {
        PDF_MEDIA_TYPE
    }
}

impl fmt::Debug for SelectedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectedFile")
            .field("name", &self.name)
            .field("len", &self.bytes.len())
            .finish()
    }
}
