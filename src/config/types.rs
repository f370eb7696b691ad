use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use crate::changelog::client::{GeminiSettings, DEFAULT_BASE_URL, DEFAULT_MODEL};
use crate::changelog::gemini::GeminiTransport;
use crate::changelog::types::TemplateType;
use crate::github::client::{DEFAULT_PER_PAGE, DEFAULT_USERNAME};

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub gemini: GeminiConfig,
    pub github: GithubConfig,
    pub session: SessionConfig,
    pub defaults: DefaultsConfig,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct GeminiConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct GithubConfig {
    pub username: String,
    pub per_page: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    pub base_uri: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub path: Option<PathBuf>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    pub template: TemplateType,
    pub prompt_template: Option<PathBuf>,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        GeminiConfig {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl Default for GithubConfig {
    fn default() -> Self {
        GithubConfig {
            username: DEFAULT_USERNAME.to_string(),
            per_page: DEFAULT_PER_PAGE,
            token: None,
            base_uri: None,
        }
    }
}

impl GeminiConfig {
    pub fn transport(&self) -> GeminiTransport {
        GeminiTransport::new(&self.base_url)
    }

    pub fn settings(&self) -> GeminiSettings {
        GeminiSettings {
            api_key: self.api_key.clone(),
            model: self.model.clone(),
        }
    }
}
