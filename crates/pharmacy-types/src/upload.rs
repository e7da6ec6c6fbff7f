//! Prescription upload data: the selected file and the submission lifecycle.
//!
//! The lifecycle is a single tagged variant so that an upload in flight
//! without a file cannot be expressed.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{PharmacyError, Result};

/// `accept` attribute for the browser file input.
pub const ACCEPTED_FILE_TYPES: &str = "image/*,.pdf";

/// Renderable reference to a selected file (an object URL in the browser).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PreviewRef(pub String);

impl PreviewRef {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FileKind {
    Image { mime: String },
    Pdf,
}

impl FileKind {
    pub fn label(&self) -> &str {
        match self {
            FileKind::Image { .. } => "Image",
            FileKind::Pdf => "PDF document",
        }
    }
}

/// Decide whether a picked file is an accepted prescription format.
pub fn classify(name: &str, mime: &str) -> Result<FileKind> {
    let mime = mime.trim().to_ascii_lowercase();
    if mime.starts_with("image/") {
        return Ok(FileKind::Image { mime });
    }
    if mime == "application/pdf" || name.to_ascii_lowercase().ends_with(".pdf") {
        return Ok(FileKind::Pdf);
    }
    Err(PharmacyError::UnsupportedFile(format!(
        "{} ({})",
        name,
        if mime.is_empty() { "unknown type" } else { mime.as_str() }
    )))
}

/// A file held in the upload slot. Only metadata and a preview are kept;
/// the bytes are never transmitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrescriptionFile {
    pub name: String,
    pub kind: FileKind,
    pub size_bytes: u64,
    pub preview: PreviewRef,
}

impl PrescriptionFile {
    pub fn new(name: impl Into<String>, kind: FileKind, size_bytes: u64, preview: PreviewRef) -> Self {
        Self {
            name: name.into(),
            kind,
            size_bytes,
            preview,
        }
    }

    pub fn size_label(&self) -> String {
        const KB: u64 = 1024;
        const MB: u64 = KB * 1024;
        if self.size_bytes >= MB {
            format!("{:.1} MB", self.size_bytes as f64 / MB as f64)
        } else if self.size_bytes >= KB {
            format!("{:.0} KB", self.size_bytes as f64 / KB as f64)
        } else {
            format!("{} B", self.size_bytes)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum UploadState {
    Idle,
    Selected { file: PrescriptionFile },
    Uploading { file: PrescriptionFile },
    Success { file: PrescriptionFile, reference: Uuid },
}

impl Default for UploadState {
    fn default() -> Self {
        UploadState::Idle
    }
}

impl UploadState {
    pub fn status(&self) -> UploadStatus {
        match self {
            UploadState::Idle | UploadState::Selected { .. } => UploadStatus::Idle,
            UploadState::Uploading { .. } => UploadStatus::Uploading,
            UploadState::Success { .. } => UploadStatus::Success,
        }
    }

    pub fn file(&self) -> Option<&PrescriptionFile> {
        match self {
            UploadState::Idle => None,
            UploadState::Selected { file }
            | UploadState::Uploading { file }
            | UploadState::Success { file, .. } => Some(file),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            UploadState::Idle => "idle",
            UploadState::Selected { .. } => "selected",
            UploadState::Uploading { .. } => "uploading",
            UploadState::Success { .. } => "success",
        }
    }
}

/// Status projection shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UploadStatus {
    Idle,
    Uploading,
    Success,
}
