//! File-picker validation and browser file handles.
//!
//! SYSTEM CONTEXT
//! ==============
//! Forms validate a picked file as soon as it changes (so the error shows next
//! to the input) and hand the browser `File` to `net::api` on submit. The
//! validation rules only look at `FileMeta`, which keeps them testable outside
//! the browser.

#[cfg(test)]
#[path = "upload_test.rs"]
mod upload_test;

pub const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
pub const DICOM_MIME: &str = "application/dicom";
pub const MAX_IMAGE_BYTES: u64 = 5 * 1024 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum UploadError {
    #[error("Please select a file to upload")]
    Missing,
    #[error("Please upload a valid Excel file (.xlsx)")]
    NotSpreadsheet,
    #[error("Please upload a valid DICOM file (.dcm)")]
    NotDicom,
    #[error("Please upload a valid image file (JPG, PNG, etc.)")]
    NotImage,
    #[error("Image file size should be less than 5MB")]
    ImageTooLarge,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UploadKind {
    /// Genetic marker spreadsheet.
    Genetic,
    Dicom,
    SkinImage,
}

/// What the browser reports about a picked file.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FileMeta {
    pub name: String,
    pub mime: String,
    pub size: u64,
}

impl UploadKind {
    /// # Errors
    ///
    /// Returns the matching `UploadError` when `meta` is not acceptable for
    /// this kind of upload.
    pub fn validate(self, meta: &FileMeta) -> Result<(), UploadError> {
        match self {
            Self::Genetic if meta.mime == XLSX_MIME => Ok(()),
            Self::Genetic => Err(UploadError::NotSpreadsheet),
            Self::Dicom if meta.mime == DICOM_MIME || meta.name.to_ascii_lowercase().ends_with(".dcm") => Ok(()),
            Self::Dicom => Err(UploadError::NotDicom),
            Self::SkinImage if !meta.mime.starts_with("image/") => Err(UploadError::NotImage),
            Self::SkinImage if meta.size > MAX_IMAGE_BYTES => Err(UploadError::ImageTooLarge),
            Self::SkinImage => Ok(()),
        }
    }
}

/// Spreadsheet accepted by the bulk patient import (`.xls` or `.xlsx`).
#[must_use]
pub fn is_spreadsheet_name(name: &str) -> bool {
    let lower = name.to_ascii_lowercase();
    lower.ends_with(".xlsx") || lower.ends_with(".xls")
}

/// A validated file ready to be sent. Outside the browser it only carries
/// metadata.
#[derive(Clone, Debug)]
pub struct Upload {
    pub meta: FileMeta,
    #[cfg(feature = "hydrate")]
    pub(crate) file: web_sys::File,
}

impl Upload {
    /// Take the first file of an `<input type="file">` and validate it.
    ///
    /// # Errors
    ///
    /// `UploadError::Missing` when nothing is selected, otherwise whatever
    /// `kind` rejects.
    #[cfg(feature = "hydrate")]
    pub fn from_input(input: &web_sys::HtmlInputElement, kind: Option<UploadKind>) -> Result<Self, UploadError> {
        let file = input.files().and_then(|list| list.get(0)).ok_or(UploadError::Missing)?;
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let meta = FileMeta { name: file.name(), mime: file.type_(), size: file.size() as u64 };
        if let Some(kind) = kind {
            kind.validate(&meta)?;
        }
        Ok(Self { meta, file })
    }

    /// Object URL for an `<img>` preview. Callers revoke it with
    /// `revoke_preview_url`.
    #[cfg(feature = "hydrate")]
    #[must_use]
    pub fn preview_url(&self) -> Option<String> {
        web_sys::Url::create_object_url_with_blob(&self.file).ok()
    }
}

pub fn revoke_preview_url(url: &str) {
    #[cfg(feature = "hydrate")]
    {
        if web_sys::Url::revoke_object_url(url).is_err() {
            log::debug!("preview url already revoked: {url}");
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = url;
    }
}
