use serde::{Deserialize, Serialize};
use super::types::GeneratedChangelog;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Markdown,
    Html,
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            "html" => Ok(OutputFormat::Html),
            "text" | "txt" | "plain" | "plaintext" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown output format: {}", s)),
        }
    }
}

impl OutputFormat {
    /// Picks the rendering for this format; `Json` emits all three fields.
    pub fn render(&self, changelog: &GeneratedChangelog) -> serde_json::Result<String> {
        match self {
            OutputFormat::Markdown => Ok(changelog.markdown.clone()),
            OutputFormat::Html => Ok(changelog.html.clone()),
            OutputFormat::Text => Ok(changelog.plain_text.clone()),
            OutputFormat::Json => serde_json::to_string_pretty(changelog),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn changelog() -> GeneratedChangelog {
        GeneratedChangelog {
            markdown: "## 2.1.0".into(),
            html: "<h2>2.1.0</h2>".into(),
            plain_text: "2.1.0".into(),
        }
    }

    #[test]
    fn renders_the_selected_field() {
        assert_eq!(OutputFormat::Markdown.render(&changelog()).unwrap(), "## 2.1.0");
        assert_eq!(OutputFormat::Html.render(&changelog()).unwrap(), "<h2>2.1.0</h2>");
        assert_eq!(OutputFormat::Text.render(&changelog()).unwrap(), "2.1.0");
    }

    #[test]
    fn json_contains_all_fields() {
        let rendered = OutputFormat::Json.render(&changelog()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(value["plainText"], "2.1.0");
        assert_eq!(value["html"], "<h2>2.1.0</h2>");
    }

    #[test]
    fn parses_aliases() {
        assert_eq!("md".parse::<OutputFormat>(), Ok(OutputFormat::Markdown));
        assert_eq!("plaintext".parse::<OutputFormat>(), Ok(OutputFormat::Text));
        assert!("pdf".parse::<OutputFormat>().is_err());
    }
}
