/// State management module
///
/// This module handles all application state, including:
/// - The request lifecycle and its transitions (controller.rs)
/// - Shared data structures (data.rs)
/// - The fixed set of caption styles (style.rs)
/// - File capture, validation and preview bookkeeping (uploader.rs)

pub mod controller;
pub mod data;
pub mod style;
pub mod uploader;
