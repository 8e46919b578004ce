/// Shared data structures for the application state
///
/// These structs represent the data model that flows between
/// the uploader, the controller, the backend and the UI layer.

use std::sync::Arc;

use chrono::{DateTime, Local};
use serde_json::Value;

/// Media type used when a file's type cannot be determined
pub const UNKNOWN_MEDIA_TYPE: &str = "application/octet-stream";

/// Guess a media type from the leading bytes of a file
pub fn sniff_media_type(bytes: &[u8]) -> &'static str {
    infer::get(bytes)
        .map(|kind| kind.mime_type())
        .unwrap_or(UNKNOWN_MEDIA_TYPE)
}

/// A file offered by the user, before validation
#[derive(Debug, Clone, PartialEq)]
pub struct FileCandidate {
    /// Filename only (e.g., "photo.jpg")
    pub name: String,
    /// Declared media type (e.g., "image/jpeg")
    pub media_type: String,
    pub bytes: Arc<[u8]>,
}

impl FileCandidate {
    pub fn new(name: impl Into<String>, media_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            media_type: media_type.into(),
            bytes: bytes.into(),
        }
    }

    /// Build a candidate from file contents, sniffing the media type
    pub fn sniffed(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let media_type = sniff_media_type(&bytes);
        Self::new(name, media_type, bytes)
    }

    pub fn is_image(&self) -> bool {
        self.media_type.starts_with("image/")
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

/// An image accepted by the uploader
///
/// Cloning is cheap: the bytes are shared.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadedImage {
    pub name: String,
    pub media_type: String,
    pub bytes: Arc<[u8]>,
}

impl From<FileCandidate> for UploadedImage {
    fn from(candidate: FileCandidate) -> Self {
        Self {
            name: candidate.name,
            media_type: candidate.media_type,
            bytes: candidate.bytes,
        }
    }
}

/// The backend's answer to an analysis request
///
/// The body is kept exactly as received. The accessors below are lenient
/// readers for the display and never fail: a missing or oddly typed field
/// simply reads as empty.
#[derive(Debug, Clone)]
pub struct AnalysisResult {
    body: Value,
    received_at: DateTime<Local>,
}

impl AnalysisResult {
    pub fn new(body: Value) -> Self {
        Self {
            body,
            received_at: Local::now(),
        }
    }

    /// The response body, untouched
    pub fn body(&self) -> &Value {
        &self.body
    }

    pub fn received_at(&self) -> DateTime<Local> {
        self.received_at
    }

    pub fn captions(&self) -> Vec<&str> {
        self.string_list("captions")
    }

    pub fn hashtags(&self) -> Vec<&str> {
        self.string_list("hashtags")
    }

    /// The backend's description of what it saw in the image
    pub fn description(&self) -> Option<&str> {
        self.body.get("description").and_then(Value::as_str)
    }

    /// Style the backend reports having used
    pub fn style(&self) -> Option<&str> {
        self.body.get("style").and_then(Value::as_str)
    }

    fn string_list(&self, key: &str) -> Vec<&str> {
        self.body
            .get(key)
            .and_then(Value::as_array)
            .map(|items| items.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }
}

/// Two results are equal when their bodies are; the receive time is ignored
impl PartialEq for AnalysisResult {
    fn eq(&self, other: &Self) -> bool {
        self.body == other.body
    }
}

/// Client-visible request state, derived from the controller
///
/// The window reads the loading indicator and the error banner from this.
/// A stored result stays on screen under `Failed`, so the result panel reads
/// `Controller::result` instead of waiting for `Success`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RequestState<'a> {
    Idle,
    Loading,
    Success(&'a AnalysisResult),
    Failed(&'a str),
}
