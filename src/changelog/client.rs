use async_trait::async_trait;
use serde_json::{json, Value};
use super::error::{GenerationError, Result};
use super::prompt::PromptBuilder;
use super::response::parse_changelog;
use super::types::{ChangelogInput, GeneratedChangelog};

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// One generation call: the prompt plus the structured output it must follow.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub model: String,
    pub contents: String,
    pub response_mime_type: String,
    pub response_schema: Value,
}

impl GenerationRequest {
    pub fn changelog(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            contents: prompt.into(),
            response_mime_type: "application/json".to_string(),
            response_schema: changelog_schema(),
        }
    }
}

/// Object with the three required string fields of a [`GeneratedChangelog`].
pub fn changelog_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "markdown": { "type": "STRING" },
            "html": { "type": "STRING" },
            "plainText": { "type": "STRING" },
        },
        "required": ["markdown", "html", "plainText"],
    })
}

/// Hosted text generation. Returns the raw text payload, `None` when the
/// service answered without any text.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, api_key: &str, request: &GenerationRequest) -> Result<Option<String>>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeminiSettings {
    pub api_key: Option<String>,
    pub model: String,
}

impl Default for GeminiSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
        }
    }
}

pub struct ChangelogClient<T> {
    settings: GeminiSettings,
    prompt_builder: PromptBuilder,
    transport: T,
}

impl<T: TextGenerator> ChangelogClient<T> {
    pub fn new(settings: GeminiSettings, transport: T) -> Result<Self> {
        Ok(Self::with_prompt_builder(settings, transport, PromptBuilder::new()?))
    }

    pub fn with_prompt_builder(settings: GeminiSettings, transport: T, prompt_builder: PromptBuilder) -> Self {
        Self {
            settings,
            prompt_builder,
            transport,
        }
    }

    pub fn settings(&self) -> &GeminiSettings {
        &self.settings
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn render_prompt(&self, input: &ChangelogInput) -> Result<String> {
        self.prompt_builder.build(input)
    }

    /// Single-shot generation. No retry: the first failure is returned.
    pub async fn generate(&self, input: &ChangelogInput) -> Result<GeneratedChangelog> {
        let api_key = self
            .settings
            .api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or(GenerationError::MissingCredential)?;

        let prompt = self.render_prompt(input)?;
        tracing::debug!(
            "Requesting changelog {} ({} template, {} entries) from {}",
            input.version,
            input.template,
            input.non_empty_entries().count(),
            self.settings.model
        );

        let request = GenerationRequest::changelog(&self.settings.model, prompt);
        let payload = self.transport.generate(api_key, &request).await?;
        let changelog = parse_changelog(payload.as_deref())?;

        tracing::info!("Generated changelog for version {}", input.version);
        Ok(changelog)
    }
}
