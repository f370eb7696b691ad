use thiserror::Error;

/// Message shown to the person who submitted the form, whatever went wrong.
pub const GENERATION_FAILED_MESSAGE: &str = "AI generation failed. Please check your API key.";

#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("Generation credential is not configured (set GEMINI_API_KEY)")]
    MissingCredential,

    #[error("Generation request failed: {0}")]
    Transport(String),

    #[error("Generation service returned an empty response")]
    EmptyResponse,

    #[error("Generation response is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Prompt template error: {0}")]
    Template(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Configuration,
    Transport,
    EmptyResponse,
    Parse,
    Template,
}

impl GenerationError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            GenerationError::MissingCredential => ErrorKind::Configuration,
            GenerationError::Transport(_) => ErrorKind::Transport,
            GenerationError::EmptyResponse => ErrorKind::EmptyResponse,
            GenerationError::Parse(_) => ErrorKind::Parse,
            GenerationError::Template(_) => ErrorKind::Template,
        }
    }

    pub fn user_message(&self) -> &'static str {
        GENERATION_FAILED_MESSAGE
    }
}

impl From<reqwest::Error> for GenerationError {
    fn from(err: reqwest::Error) -> Self {
        GenerationError::Transport(err.to_string())
    }
}

impl From<handlebars::RenderError> for GenerationError {
    fn from(err: handlebars::RenderError) -> Self {
        GenerationError::Template(err.to_string())
    }
}

impl From<handlebars::TemplateError> for GenerationError {
    fn from(err: handlebars::TemplateError) -> Self {
        GenerationError::Template(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, GenerationError>;
