//! Caption Studio
//!
//! A native client for an AI caption service: pick or drop an image, choose
//! a caption style, and get captions and hashtags back.
//!
//! The crate is split the way the application is wired:
//! - `state` holds the request lifecycle, the uploader and the style set
//! - `backend` talks to the analysis service
//! - `preview` encodes local previews
//! - `config` and `error` are the ambient pieces
//!
//! The iced shell lives in the binary (`main.rs` and `ui/`).

pub mod backend;
pub mod config;
pub mod error;
pub mod preview;
pub mod state;
