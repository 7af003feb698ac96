//! Domain model for a receipt attached to a transaction.
use serde::{Deserialize, Serialize};

/// MIME types accepted for receipts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReceiptMimeType {
    #[serde(rename = "image/png")]
    Png,
    #[serde(rename = "image/jpeg", alias = "image/jpg")]
    Jpeg,
    #[serde(rename = "application/pdf")]
    Pdf,
}

impl ReceiptMimeType {
    /// Parse a MIME type string, returning `None` when it is not allowed
    pub fn parse(mime_type: &str) -> Option<Self> {
        match mime_type.trim().to_ascii_lowercase().as_str() {
            "image/png" => Some(ReceiptMimeType::Png),
            "image/jpeg" | "image/jpg" => Some(ReceiptMimeType::Jpeg),
            "application/pdf" => Some(ReceiptMimeType::Pdf),
            _ => None,
        }
    }

    /// Guess the MIME type from a file extension
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_ascii_lowercase().as_str() {
            "png" => Some(ReceiptMimeType::Png),
            "jpg" | "jpeg" => Some(ReceiptMimeType::Jpeg),
            "pdf" => Some(ReceiptMimeType::Pdf),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ReceiptMimeType::Png => "image/png",
            ReceiptMimeType::Jpeg => "image/jpeg",
            ReceiptMimeType::Pdf => "application/pdf",
        }
    }

    pub fn is_pdf(&self) -> bool {
        matches!(self, ReceiptMimeType::Pdf)
    }
}

/// A receipt embedded by value in its transaction.
///
/// `data_url` is a self-contained `data:<mime>;base64,<payload>` string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Receipt {
    #[serde(rename = "nome")]
    pub file_name: String,
    #[serde(rename = "tipo")]
    pub mime_type: ReceiptMimeType,
    #[serde(rename = "data")]
    pub data_url: String,
}

impl Receipt {
    /// Rewrite the `data:` header to the canonical name of `mime_type` when it
    /// holds an alias of it (legacy `image/jpg`), keeping both fields in step.
    pub fn with_canonical_header(mut self) -> Self {
        let canonical = self.mime_type.as_str();
        let rewritten = self
            .data_url
            .strip_prefix("data:")
            .and_then(|rest| rest.split_once(";base64,"))
            .filter(|(mime, _)| *mime != canonical && ReceiptMimeType::parse(mime) == Some(self.mime_type))
            .map(|(_, payload)| format!("data:{};base64,{}", canonical, payload));
        if let Some(data_url) = rewritten {
            self.data_url = data_url;
        }
        self
    }
}
