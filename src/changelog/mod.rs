pub mod client;
pub mod error;
pub mod gemini;
pub mod output;
pub mod prompt;
pub mod response;
pub mod types;

pub use client::{ChangelogClient, GeminiSettings, GenerationRequest, TextGenerator};
pub use error::{ErrorKind, GenerationError};
pub use gemini::GeminiTransport;
pub use prompt::{build_prompt, PromptBuilder};
pub use response::parse_changelog;
pub use types::{ChangelogEntry, ChangelogInput, GeneratedChangelog, ReleaseCategory, TemplateType};
