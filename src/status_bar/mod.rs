//! Status-bar payloads
//!
//! Turns usage snapshots into the single-line JSON object a status-bar
//! custom module reads from stdout: `text`, `tooltip`, `class`,
//! `percentage` and `alt`.

pub mod codexbar;
pub mod format;
pub mod limitsbar;
pub mod payload;

pub use format::StatusClass;
pub use payload::{emit, Payload};
