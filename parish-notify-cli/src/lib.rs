//! parish-notify CLI library
//!
//! Commands behind the `parish-notify` binary, kept in a library so they can
//! be exercised from tests without spawning a process.

pub mod commands;
pub mod input;

pub use commands::{PlaceholdersCommand, PreviewCommand, RenderCommand};
pub use input::{load_context, load_submission, TemplateInput};
