//! Receipt intake and viewing.
//!
//! A candidate file is validated (type first, then size), its bytes are read
//! through the injected [`ByteReader`], and the result is embedded as a
//! `data:<mime>;base64,<payload>` URL so the receipt lives entirely inside
//! the stored transaction.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use log::{info, warn};
use shared::ReceiptPreview;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::errors::{LedgerError, RejectReason, Result};
use super::models::{Receipt, ReceiptMimeType};
use crate::backend::storage::ByteReader;

/// Largest receipt accepted, in bytes (2 MB)
pub const MAX_RECEIPT_BYTES: u64 = 2 * 1024 * 1024;

/// A file the user picked, before it has been read
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateFile {
    pub path: PathBuf,
    pub file_name: String,
    pub mime_type: String,
    pub size_bytes: u64,
}

impl CandidateFile {
    pub fn new<P: AsRef<Path>>(path: P, mime_type: &str, size_bytes: u64) -> Self {
        let path = path.as_ref().to_path_buf();
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self {
            path,
            file_name,
            mime_type: mime_type.to_string(),
            size_bytes,
        }
    }

    /// Build a candidate from file metadata, guessing the MIME type from the
    /// extension. Unknown extensions get `application/octet-stream`, which
    /// validation then rejects.
    pub async fn from_path<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        let path = path.as_ref();
        let metadata = tokio::fs::metadata(path).await?;
        let mime_type = path
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(ReceiptMimeType::from_extension)
            .map(|mime| mime.as_str())
            .unwrap_or("application/octet-stream");
        Ok(Self::new(path, mime_type, metadata.len()))
    }
}

/// Decoded receipt, ready to be displayed or handed to an external viewer
#[derive(Debug, Clone, PartialEq)]
pub struct ReceiptView {
    pub bytes: Vec<u8>,
    pub mime_type: ReceiptMimeType,
    pub file_name: String,
}

#[derive(Clone)]
pub struct ReceiptService {
    reader: Arc<dyn ByteReader>,
}

impl ReceiptService {
    pub fn new(reader: Arc<dyn ByteReader>) -> Self {
        Self { reader }
    }

    /// Check a candidate against the MIME allow-list and the size ceiling
    pub fn validate(mime_type: &str, size_bytes: u64) -> Result<ReceiptMimeType> {
        let mime = ReceiptMimeType::parse(mime_type)
            .ok_or(LedgerError::ReceiptRejected(RejectReason::UnsupportedType))?;
        if size_bytes > MAX_RECEIPT_BYTES {
            return Err(LedgerError::ReceiptRejected(RejectReason::TooLarge));
        }
        Ok(mime)
    }

    pub fn validate_candidate(candidate: &CandidateFile) -> Result<ReceiptMimeType> {
        Self::validate(&candidate.mime_type, candidate.size_bytes)
    }

    /// Embed raw bytes into a self-contained receipt
    pub fn encode(bytes: &[u8], mime_type: ReceiptMimeType, file_name: &str) -> Receipt {
        Receipt {
            file_name: file_name.to_string(),
            mime_type,
            data_url: format!("data:{};base64,{}", mime_type.as_str(), STANDARD.encode(bytes)),
        }
    }

    /// Inverse of [`ReceiptService::encode`]
    pub fn open_for_viewing(receipt: &Receipt) -> Result<ReceiptView> {
        let (header, payload) = receipt
            .data_url
            .split_once(',')
            .ok_or_else(|| LedgerError::MalformedReceipt("missing data URL payload".to_string()))?;

        if !header.starts_with("data:") || !header.ends_with(";base64") {
            return Err(LedgerError::MalformedReceipt(format!(
                "unexpected data URL header {:?}",
                header
            )));
        }

        let bytes = STANDARD
            .decode(payload.trim())
            .map_err(|e| LedgerError::MalformedReceipt(e.to_string()))?;

        Ok(ReceiptView {
            bytes,
            mime_type: receipt.mime_type,
            file_name: receipt.file_name.clone(),
        })
    }

    /// How the receipt should be previewed: PDFs by name, images inline
    pub fn preview(receipt: &Receipt) -> ReceiptPreview {
        let is_pdf = receipt.mime_type.is_pdf();
        ReceiptPreview {
            file_name: receipt.file_name.clone(),
            mime_type: receipt.mime_type.as_str().to_string(),
            thumbnail_data_url: if is_pdf { None } else { Some(receipt.data_url.clone()) },
            is_pdf,
        }
    }

    /// Validate, read and encode a candidate file.
    ///
    /// Read errors surface as [`LedgerError::ReadFailure`]. The bytes actually
    /// read are checked against the ceiling again in case the file grew.
    pub async fn read_receipt(&self, candidate: &CandidateFile) -> Result<Receipt> {
        let mime_type = Self::validate_candidate(candidate)?;

        let bytes = self
            .reader
            .read(&candidate.path)
            .await
            .map_err(|e| {
                warn!("Failed to read receipt {}: {}", candidate.path.display(), e);
                LedgerError::ReadFailure(e)
            })?;

        if bytes.len() as u64 > MAX_RECEIPT_BYTES {
            return Err(LedgerError::ReceiptRejected(RejectReason::TooLarge));
        }

        info!("Read receipt '{}' ({} bytes)", candidate.file_name, bytes.len());
        Ok(Self::encode(&bytes, mime_type, &candidate.file_name))
    }
}
