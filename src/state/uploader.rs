/// Image uploader state
///
/// Captures one image at a time from the file picker or a window drop,
/// validates it, and keeps the local preview. The uploader never talks to
/// the backend: an accepted file is handed to the caller, who forwards it to
/// the controller and starts preview encoding as two independent tasks.

use std::path::Path;

use tokio::io::AsyncReadExt;

use super::data::{sniff_media_type, FileCandidate, UploadedImage};
use crate::config::AppConfig;
use crate::error::UploadError;
use crate::preview::Preview;

/// What the upload area shows, highest priority first
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Surface {
    /// An analysis is in progress
    Loading,
    /// A file was accepted and its preview is ready
    Preview,
    /// Nothing accepted yet
    Prompt,
}

#[derive(Debug)]
pub struct Uploader {
    preview: Option<Preview>,
    /// Cosmetic only: highlights the drop zone while files hover the window
    drag_active: bool,
    /// Open until the first file of a drop gesture is taken
    drop_open: bool,
    /// Local message for files that were rejected for their size
    notice: Option<String>,
    /// Bumped for each accepted file so a late preview cannot replace a newer one
    preview_seq: u64,
    max_upload_bytes: u64,
    max_upload_label: String,
}

impl Uploader {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            preview: None,
            drag_active: false,
            drop_open: true,
            notice: None,
            preview_seq: 0,
            max_upload_bytes: config.max_upload_bytes,
            max_upload_label: config.max_upload_label(),
        }
    }

    /// Validate a picked or dropped file
    ///
    /// Files whose media type is not `image/*` are ignored without any
    /// feedback. Images over the size limit are refused with a notice.
    pub fn accept(&mut self, candidate: FileCandidate) -> Option<UploadedImage> {
        if !candidate.is_image() {
            log::debug!(
                "Ignoring {} ({}): not an image",
                candidate.name,
                candidate.media_type
            );
            return None;
        }

        if candidate.size() > self.max_upload_bytes {
            log::warn!(
                "⚠️  Refusing {}: {} bytes exceeds the {} limit",
                candidate.name,
                candidate.size(),
                self.max_upload_label
            );
            self.refuse_oversized();
            return None;
        }

        self.notice = None;
        self.preview_seq += 1;
        log::info!(
            "🖼️  Accepted {} ({}, {} bytes)",
            candidate.name,
            candidate.media_type,
            candidate.size()
        );
        Some(candidate.into())
    }

    /// Handle a file that never became a candidate
    ///
    /// Oversized images get the same notice as in `accept`; anything else
    /// that failed to load is only logged.
    pub fn load_failed(&mut self, error: &UploadError) {
        match error {
            UploadError::TooLarge { media_type, .. } if media_type.starts_with("image/") => {
                log::warn!("⚠️  Refusing {}", error);
                self.refuse_oversized();
            }
            UploadError::TooLarge { .. } => log::debug!("Ignoring {}", error),
            UploadError::Read { .. } => log::warn!("⚠️  {}", error),
        }
    }

    fn refuse_oversized(&mut self) {
        self.notice = Some(format!("Image exceeds the {} limit.", self.max_upload_label));
    }

    /// Sequence number to tag the preview of the last accepted file with
    pub fn preview_seq(&self) -> u64 {
        self.preview_seq
    }

    /// Store a finished preview unless a newer file was accepted meanwhile
    pub fn preview_ready(&mut self, seq: u64, preview: Preview) -> bool {
        if seq != self.preview_seq {
            return false;
        }
        self.preview = Some(preview);
        true
    }

    /// Files entered the window; this starts a new drop gesture
    pub fn drag_entered(&mut self) {
        self.drag_active = true;
        self.drop_open = true;
    }

    pub fn drag_left(&mut self) {
        self.drag_active = false;
    }

    /// A file was dropped; returns whether it should be loaded
    ///
    /// The window reports every file of a multi-file drop separately. Only
    /// the first one of a gesture is taken, the rest are ignored until files
    /// hover the window again. The highlight ends before anything is loaded.
    pub fn take_drop(&mut self) -> bool {
        self.drag_active = false;
        std::mem::replace(&mut self.drop_open, false)
    }

    pub fn is_drag_active(&self) -> bool {
        self.drag_active
    }

    pub fn preview(&self) -> Option<&Preview> {
        self.preview.as_ref()
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn max_upload_bytes(&self) -> u64 {
        self.max_upload_bytes
    }

    pub fn max_upload_label(&self) -> &str {
        &self.max_upload_label
    }

    pub fn surface(&self, loading: bool) -> Surface {
        if loading {
            Surface::Loading
        } else if self.preview.is_some() {
            Surface::Preview
        } else {
            Surface::Prompt
        }
    }

    /// The whole upload area opens the picker only until a preview is shown;
    /// after that the "Change Image" button does
    pub fn can_browse_from_area(&self) -> bool {
        self.preview.is_none()
    }
}

/// Bytes read from an oversized file to tell images from everything else
const SNIFF_LEN: u64 = 8192;

/// Read a picked or dropped file from disk
///
/// The size is checked from the file metadata first: a file over
/// `max_bytes` is refused with `UploadError::TooLarge` after reading only
/// its header.
pub async fn load_candidate(
    path: impl AsRef<Path>,
    max_bytes: u64,
) -> Result<FileCandidate, UploadError> {
    let path = path.as_ref();
    let read_error = |e: std::io::Error| UploadError::Read {
        path: path.to_path_buf(),
        reason: e.to_string(),
    };

    let metadata = tokio::fs::metadata(path).await.map_err(read_error)?;
    if metadata.len() > max_bytes {
        let file = tokio::fs::File::open(path).await.map_err(read_error)?;
        let mut header = Vec::new();
        file.take(SNIFF_LEN)
            .read_to_end(&mut header)
            .await
            .map_err(read_error)?;

        return Err(UploadError::TooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            limit: max_bytes,
            media_type: sniff_media_type(&header).to_string(),
        });
    }

    let bytes = tokio::fs::read(path).await.map_err(read_error)?;

    let name = path
        .file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string();

    Ok(FileCandidate::sniffed(name, bytes))
}
