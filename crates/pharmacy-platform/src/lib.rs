//! Browser adapters for the pharmacy frontend.

pub mod llm;
pub mod timer;
pub mod files;


pub use llm::GeminiProvider;
pub use timer::GlooTimer;
pub use files::{FilePicker, ObjectUrlPreviews};
