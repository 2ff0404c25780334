use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Deserializer};

/// One row of `GET /history`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HistoryRecord {
    #[serde(deserialize_with = "opaque_id")]
    pub id: String,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub summary: String,
}

/// The service hands out integer ids today; keep them opaque either way.
fn opaque_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Int(i64),
        Text(String),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Int(value) => value.to_string(),
        RawId::Text(value) => value,
    })
}

/// Body of a `POST /summarize` request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SummarizePayload {
    /// Sent as JSON `{text, model}`.
    Text { text: String, model: String },
    /// Sent as multipart with `file` and `model` parts.
    File { path: PathBuf, model: String },
}

impl SummarizePayload {
    pub fn model(&self) -> &str {
        match self {
            SummarizePayload::Text { model, .. } | SummarizePayload::File { model, .. } => model,
        }
    }
}

/// Document formats the service extracts text from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadKind {
    Pdf,
    Docx,
    Txt,
}

impl UploadKind {
    pub fn from_filename(name: &str) -> Option<Self> {
        let (_, ext) = name.rsplit_once('.')?;
        match ext.to_ascii_lowercase().as_str() {
            "pdf" => Some(UploadKind::Pdf),
            "docx" => Some(UploadKind::Docx),
            "txt" => Some(UploadKind::Txt),
            _ => None,
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            UploadKind::Pdf => "application/pdf",
            UploadKind::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            UploadKind::Txt => "text/plain",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    HistoryLoaded(Result<Vec<HistoryRecord>, ServiceError>),
    /// `Ok(None)` means the service answered without a summary.
    Summarized(Result<Option<String>, ServiceError>),
    Deleted {
        id: String,
        result: Result<(), ServiceError>,
    },
    Cleared(Result<(), ServiceError>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceError {
    pub kind: FailureKind,
    pub message: String,
}

impl ServiceError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.message.is_empty() {
            write!(f, "{}", self.kind)
        } else {
            write!(f, "{}: {}", self.kind, self.message)
        }
    }
}

impl std::error::Error for ServiceError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    Network,
    Decode,
    Io,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::Network => write!(f, "network error"),
            FailureKind::Decode => write!(f, "invalid response body"),
            FailureKind::Io => write!(f, "io error"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn history_ids_accept_numbers_and_strings() {
        let records: Vec<HistoryRecord> = serde_json::from_str(
            r#"[{"id": 3, "model": "t5", "text": "a", "summary": "b"},
                {"id": "abc", "model": "bart", "text": "c", "summary": "d"}]"#,
        )
        .unwrap();
        assert_eq!(records[0].id, "3");
        assert_eq!(records[1].id, "abc");
    }

    #[test]
    fn upload_kind_matches_extension_case_insensitively() {
        assert_eq!(UploadKind::from_filename("a.PDF"), Some(UploadKind::Pdf));
        assert_eq!(UploadKind::from_filename("b.docx"), Some(UploadKind::Docx));
        assert_eq!(UploadKind::from_filename("c.tar.txt"), Some(UploadKind::Txt));
        assert_eq!(UploadKind::from_filename("noext"), None);
        assert_eq!(UploadKind::from_filename("d.md"), None);
    }
}
