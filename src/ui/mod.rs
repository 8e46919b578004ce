/// View functions for the three panels of the window
///
/// Each function is a pure mapping from state to widgets; all state lives in
/// `CaptionStudio` and the `state` module of the library.

pub mod caption_display;
pub mod style_selector;
pub mod uploader;
