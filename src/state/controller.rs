/// Request lifecycle controller
///
/// Owns every piece of request state (selected style, last analysed image,
/// last result, loading flag, error) and exposes one transition per user
/// or network event. Transitions never perform I/O: the ones that start an
/// analysis return a `Submission` for the caller to dispatch, and the
/// outcome comes back through `complete`.
///
/// Each submission carries a `RequestToken`. Only the completion for the
/// latest token is applied; anything older is dropped, so a slow response
/// can never overwrite a newer one.

use super::data::{AnalysisResult, RequestState, UploadedImage};
use super::style::Style;
use crate::error::AnalysisError;

/// Message shown for every failed analysis, whatever the cause
pub const ANALYSIS_FAILED_MESSAGE: &str = "Failed to analyze image. Please try again.";

/// Captions requested per analysis
pub const NUM_CAPTIONS: u32 = 3;

/// Hashtags requested per analysis
pub const NUM_HASHTAGS: u32 = 10;

/// Monotonically increasing id of a submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct RequestToken(u64);

impl RequestToken {
    fn next(self) -> Self {
        RequestToken(self.0 + 1)
    }
}

impl std::fmt::Display for RequestToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One analysis request, ready to be sent
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub token: RequestToken,
    pub image: UploadedImage,
    pub style: Style,
    pub num_captions: u32,
    pub num_hashtags: u32,
}

/// The outcome of a dispatched submission
#[derive(Debug, Clone)]
pub struct Completion {
    pub token: RequestToken,
    pub image: UploadedImage,
    pub outcome: Result<AnalysisResult, AnalysisError>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
enum Phase {
    #[default]
    Idle,
    Loading,
    Failed(String),
}

#[derive(Debug, Default)]
pub struct Controller {
    selected_style: Style,
    /// Image of the last successful analysis
    image: Option<UploadedImage>,
    result: Option<AnalysisResult>,
    phase: Phase,
    latest_token: RequestToken,
}

impl Controller {
    pub fn new(selected_style: Style) -> Self {
        Self {
            selected_style,
            ..Self::default()
        }
    }

    /// A new file was accepted by the uploader
    pub fn upload(&mut self, image: UploadedImage) -> Submission {
        self.submit(image, self.selected_style)
    }

    /// Start an analysis of `image` with `style`
    ///
    /// Any request still in flight is superseded: its completion will be
    /// discarded.
    pub fn submit(&mut self, image: UploadedImage, style: Style) -> Submission {
        self.latest_token = self.latest_token.next();
        self.phase = Phase::Loading;

        Submission {
            token: self.latest_token,
            image,
            style,
            num_captions: NUM_CAPTIONS,
            num_hashtags: NUM_HASHTAGS,
        }
    }

    /// Record a new style selection
    ///
    /// Once a result exists, changing the style re-runs the analysis of the
    /// stored image. Before that it only sets the style for the next upload.
    pub fn select_style(&mut self, style: Style) -> Option<Submission> {
        self.selected_style = style;

        if self.result.is_none() {
            return None;
        }
        let image = self.image.clone()?;
        Some(self.submit(image, style))
    }

    /// Resubmit the last analysed image with the current style
    pub fn retry(&mut self) -> Option<Submission> {
        let image = self.image.clone()?;
        Some(self.submit(image, self.selected_style))
    }

    /// Apply the outcome of a submission
    ///
    /// Returns `false` if the completion belongs to a superseded request and
    /// was ignored.
    pub fn complete(&mut self, completion: Completion) -> bool {
        if completion.token != self.latest_token {
            log::debug!(
                "Discarding stale response {} (latest is {})",
                completion.token,
                self.latest_token
            );
            return false;
        }

        match completion.outcome {
            Ok(result) => {
                self.result = Some(result);
                self.image = Some(completion.image);
                self.phase = Phase::Idle;
            }
            Err(e) => {
                log::error!("❌ Analysis {} failed: {}", completion.token, e);
                self.phase = Phase::Failed(ANALYSIS_FAILED_MESSAGE.to_string());
            }
        }
        true
    }

    /// Hide the error banner; the stored result is kept
    pub fn dismiss_error(&mut self) {
        if matches!(self.phase, Phase::Failed(_)) {
            self.phase = Phase::Idle;
        }
    }

    pub fn is_loading(&self) -> bool {
        self.phase == Phase::Loading
    }

    pub fn error(&self) -> Option<&str> {
        match &self.phase {
            Phase::Failed(message) => Some(message.as_str()),
            _ => None,
        }
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        self.result.as_ref()
    }

    pub fn image(&self) -> Option<&UploadedImage> {
        self.image.as_ref()
    }

    pub fn selected_style(&self) -> Style {
        self.selected_style
    }

    pub fn latest_token(&self) -> RequestToken {
        self.latest_token
    }

    /// Loading, error or result state, in that priority
    ///
    /// Drives the loading indicator and the error banner. A failure outranks
    /// the stored result here, but the result itself stays available through
    /// `result`.
    pub fn request_state(&self) -> RequestState<'_> {
        match (&self.phase, &self.result) {
            (Phase::Loading, _) => RequestState::Loading,
            (Phase::Failed(message), _) => RequestState::Failed(message.as_str()),
            (Phase::Idle, Some(result)) => RequestState::Success(result),
            (Phase::Idle, None) => RequestState::Idle,
        }
    }
}
