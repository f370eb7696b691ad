pub mod app;
pub mod auth;
pub mod changelog;
pub mod config;
pub mod github;

pub use app::AppState;
pub use changelog::{
    build_prompt, parse_changelog, ChangelogClient, ChangelogEntry, ChangelogInput, GeminiSettings, GeminiTransport,
    GeneratedChangelog, GenerationError, ReleaseCategory, TemplateType,
};
pub use config::Config;
