use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReleaseCategory {
    Features,
    Fixes,
    Improvements,
    Breaking,
}

impl ReleaseCategory {
    pub const ALL: [ReleaseCategory; 4] = [
        ReleaseCategory::Features,
        ReleaseCategory::Fixes,
        ReleaseCategory::Improvements,
        ReleaseCategory::Breaking,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReleaseCategory::Features => "features",
            ReleaseCategory::Fixes => "fixes",
            ReleaseCategory::Improvements => "improvements",
            ReleaseCategory::Breaking => "breaking",
        }
    }

    /// Label used for the entry lines of the prompt, e.g. `FEATURES`.
    pub fn label(&self) -> String {
        self.as_str().to_uppercase()
    }
}

impl fmt::Display for ReleaseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ReleaseCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "features" | "feature" => Ok(ReleaseCategory::Features),
            "fixes" | "fix" => Ok(ReleaseCategory::Fixes),
            "improvements" | "improvement" => Ok(ReleaseCategory::Improvements),
            "breaking" => Ok(ReleaseCategory::Breaking),
            _ => Err(format!("Unknown release category: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateType {
    #[default]
    Standard,
    Marketing,
    Technical,
    Minimal,
}

impl TemplateType {
    pub const ALL: [TemplateType; 4] = [
        TemplateType::Standard,
        TemplateType::Marketing,
        TemplateType::Technical,
        TemplateType::Minimal,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateType::Standard => "standard",
            TemplateType::Marketing => "marketing",
            TemplateType::Technical => "technical",
            TemplateType::Minimal => "minimal",
        }
    }

    /// Tone guidance placed at the top of the prompt.
    pub fn style_instruction(&self) -> &'static str {
        match self {
            TemplateType::Standard => {
                "Write in a balanced, professional tone that suits a general audience."
            }
            TemplateType::Marketing => {
                "Write in an exciting, benefit-driven tone that sells the value each change brings to users."
            }
            TemplateType::Technical => {
                "Write precisely for engineers and preserve every technical detail such as identifiers, versions, flags and configuration keys."
            }
            TemplateType::Minimal => {
                "Aim for extreme brevity: bullet points only, no introductory text."
            }
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            TemplateType::Standard => "Standard",
            TemplateType::Marketing => "SaaS Update",
            TemplateType::Technical => "Technical",
            TemplateType::Minimal => "Minimal",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            TemplateType::Standard => "Balanced & professional",
            TemplateType::Marketing => "Benefit-focused & punchy",
            TemplateType::Technical => "Detailed & precise",
            TemplateType::Minimal => "Short & sweet",
        }
    }
}

impl fmt::Display for TemplateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for TemplateType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "standard" => Ok(TemplateType::Standard),
            "marketing" | "saas" => Ok(TemplateType::Marketing),
            "technical" => Ok(TemplateType::Technical),
            "minimal" => Ok(TemplateType::Minimal),
            _ => Err(format!("Unknown template: {}", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangelogEntry {
    pub category: ReleaseCategory,
    #[serde(default)]
    pub content: String,
}

impl ChangelogEntry {
    pub fn new(category: ReleaseCategory, content: impl Into<String>) -> Self {
        Self {
            category,
            content: content.into(),
        }
    }

    pub fn is_blank(&self) -> bool {
        self.content.trim().is_empty()
    }
}

/// Raw release notes as typed into the form.
///
/// Nothing here is validated. Callers check [`ChangelogInput::has_content`]
/// before asking for a generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangelogInput {
    pub version: String,
    pub date: String,
    #[serde(default)]
    pub template: TemplateType,
    #[serde(default)]
    pub entries: Vec<ChangelogEntry>,
}

impl ChangelogInput {
    /// The blank form: version `1.0.0`, standard template and one empty
    /// entry for features, fixes and improvements.
    pub fn new_form(date: impl Into<String>) -> Self {
        Self {
            version: "1.0.0".to_string(),
            date: date.into(),
            template: TemplateType::Standard,
            entries: vec![
                ChangelogEntry::new(ReleaseCategory::Features, ""),
                ChangelogEntry::new(ReleaseCategory::Fixes, ""),
                ChangelogEntry::new(ReleaseCategory::Improvements, ""),
            ],
        }
    }

    pub fn has_content(&self) -> bool {
        self.entries.iter().any(|e| !e.is_blank())
    }

    pub fn non_empty_entries(&self) -> impl Iterator<Item = &ChangelogEntry> {
        self.entries.iter().filter(|e| !e.is_blank())
    }

    /// Replaces the content of the entry at `index`. Out of range indexes are ignored.
    pub fn set_entry(&mut self, index: usize, content: impl Into<String>) {
        if let Some(entry) = self.entries.get_mut(index) {
            entry.content = content.into();
        }
    }

    /// Sets the content of the first entry with `category`, appending a new
    /// entry when the form has none for it.
    pub fn set_category(&mut self, category: ReleaseCategory, content: impl Into<String>) {
        let content = content.into();
        match self.entries.iter_mut().find(|e| e.category == category) {
            Some(entry) => entry.content = content,
            None => self.entries.push(ChangelogEntry::new(category, content)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedChangelog {
    pub markdown: String,
    pub html: String,
    #[serde(rename = "plainText")]
    pub plain_text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_form_has_three_empty_entries() {
        let form = ChangelogInput::new_form("2024-05-01");
        assert_eq!(form.version, "1.0.0");
        assert_eq!(form.template, TemplateType::Standard);
        let categories: Vec<_> = form.entries.iter().map(|e| e.category).collect();
        assert_eq!(
            categories,
            vec![
                ReleaseCategory::Features,
                ReleaseCategory::Fixes,
                ReleaseCategory::Improvements
            ]
        );
        assert!(!form.has_content());
    }

    #[test]
    fn whitespace_only_content_does_not_count() {
        let mut form = ChangelogInput::new_form("2024-05-01");
        form.set_entry(1, "  \n\t ");
        assert!(!form.has_content());

        form.set_entry(2, "faster startup");
        assert!(form.has_content());
        assert_eq!(form.non_empty_entries().count(), 1);
    }

    #[test]
    fn set_category_appends_missing_category() {
        let mut form = ChangelogInput::new_form("2024-05-01");
        form.set_category(ReleaseCategory::Breaking, "dropped v1 API");
        assert_eq!(form.entries.len(), 4);
        assert_eq!(form.entries[3].content, "dropped v1 API");

        form.set_category(ReleaseCategory::Features, "dark mode");
        assert_eq!(form.entries.len(), 4);
        assert_eq!(form.entries[0].content, "dark mode");
    }

    #[test]
    fn input_deserializes_from_form_json() {
        let json = r#"{
            "version": "2.1.0",
            "date": "2024-05-01",
            "template": "minimal",
            "entries": [
                { "category": "features", "content": "added dark mode" },
                { "category": "breaking", "content": "" }
            ]
        }"#;

        let input: ChangelogInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.template, TemplateType::Minimal);
        assert_eq!(input.entries[1].category, ReleaseCategory::Breaking);
    }

    #[test]
    fn generated_changelog_uses_plain_text_wire_name() {
        let changelog = GeneratedChangelog {
            markdown: "# 1.0".into(),
            html: "<h1>1.0</h1>".into(),
            plain_text: "1.0".into(),
        };
        let value = serde_json::to_value(&changelog).unwrap();
        assert_eq!(value["plainText"], "1.0");
    }

    #[test]
    fn template_names_parse() {
        assert_eq!("SaaS".parse::<TemplateType>(), Ok(TemplateType::Marketing));
        assert_eq!("minimal".parse::<TemplateType>(), Ok(TemplateType::Minimal));
        assert!("fancy".parse::<TemplateType>().is_err());
    }
}
