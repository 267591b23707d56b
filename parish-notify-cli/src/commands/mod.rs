//! CLI command implementations

pub mod placeholders;
pub mod preview;
pub mod render;

pub use placeholders::PlaceholdersCommand;
pub use preview::PreviewCommand;
pub use render::RenderCommand;
