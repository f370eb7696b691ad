use handlebars::Handlebars;
use serde_json::json;
use std::path::Path;
use super::error::{GenerationError, Result};
use super::types::ChangelogInput;

const PROMPT_TEMPLATE: &str = "prompt";

/// Renders a [`ChangelogInput`] into the instruction sent to the model.
///
/// The template receives `style`, `version`, `date` and `entries` (each with
/// `label` and `content`). Blank entries are dropped before rendering so their
/// category never reaches the template. User text is not escaped.
pub struct PromptBuilder {
    template_engine: Handlebars<'static>,
}

impl PromptBuilder {
    pub fn new() -> Result<Self> {
        Self::from_template(include_str!("../../templates/prompt.hbs"))
    }

    pub fn with_template_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            GenerationError::Template(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_template(&content)
    }

    fn from_template(template: &str) -> Result<Self> {
        let mut template_engine = Handlebars::new();
        template_engine.register_escape_fn(handlebars::no_escape);
        template_engine.register_template_string(PROMPT_TEMPLATE, template)?;
        Ok(Self { template_engine })
    }

    pub fn build(&self, input: &ChangelogInput) -> Result<String> {
        let entries: Vec<_> = input
            .non_empty_entries()
            .map(|entry| {
                json!({
                    "label": entry.category.label(),
                    "content": entry.content,
                })
            })
            .collect();

        let data = json!({
            "style": input.template.style_instruction(),
            "version": input.version,
            "date": input.date,
            "entries": entries,
        });

        Ok(self.template_engine.render(PROMPT_TEMPLATE, &data)?)
    }
}

/// Renders `input` with the built-in prompt template.
pub fn build_prompt(input: &ChangelogInput) -> Result<String> {
    PromptBuilder::new()?.build(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::changelog::types::{ChangelogEntry, ReleaseCategory, TemplateType};
    use pretty_assertions::assert_eq;

    fn sample_input() -> ChangelogInput {
        ChangelogInput {
            version: "2.1.0".to_string(),
            date: "2024-05-01".to_string(),
            template: TemplateType::Minimal,
            entries: vec![
                ChangelogEntry::new(ReleaseCategory::Features, "added dark mode"),
                ChangelogEntry::new(ReleaseCategory::Fixes, ""),
                ChangelogEntry::new(ReleaseCategory::Improvements, "faster startup"),
            ],
        }
    }

    #[test]
    fn renders_non_empty_entries_and_skips_blank_ones() {
        let prompt = build_prompt(&sample_input()).unwrap();

        assert!(prompt.contains("[FEATURES]: added dark mode"));
        assert!(prompt.contains("[IMPROVEMENTS]: faster startup"));
        assert!(!prompt.contains("[FIXES]"));
    }

    #[test]
    fn blank_categories_are_never_mentioned() {
        let mut input = sample_input();
        input.entries.push(ChangelogEntry::new(ReleaseCategory::Breaking, "   \n  "));
        let prompt = build_prompt(&input).unwrap().to_lowercase();

        assert!(!prompt.contains("fixes"));
        assert!(!prompt.contains("breaking"));
    }

    #[test]
    fn each_non_empty_category_appears_once_in_entry_order() {
        let input = ChangelogInput {
            version: "3.0.0".into(),
            date: "2024-06-01".into(),
            template: TemplateType::Standard,
            entries: vec![
                ChangelogEntry::new(ReleaseCategory::Breaking, "removed legacy sync"),
                ChangelogEntry::new(ReleaseCategory::Fixes, "crash on empty project"),
                ChangelogEntry::new(ReleaseCategory::Features, "team workspaces"),
            ],
        };
        let prompt = build_prompt(&input).unwrap();

        let positions: Vec<usize> = ["[BREAKING]", "[FIXES]", "[FEATURES]"]
            .iter()
            .map(|label| {
                assert_eq!(prompt.matches(label).count(), 1, "{} count", label);
                prompt.find(label).unwrap()
            })
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn each_template_carries_only_its_own_style() {
        for template in TemplateType::ALL {
            let mut input = sample_input();
            input.template = template;
            let prompt = build_prompt(&input).unwrap();

            for other in TemplateType::ALL {
                let present = prompt.contains(other.style_instruction());
                assert_eq!(present, other == template, "{} in {} prompt", other, template);
            }
        }
    }

    #[test]
    fn sections_render_in_order() {
        let prompt = build_prompt(&sample_input()).unwrap();

        let style = prompt.find(TemplateType::Minimal.style_instruction()).unwrap();
        let rules = prompt.find("Group the changes by category").unwrap();
        let version = prompt.find("Version: 2.1.0").unwrap();
        let date = prompt.find("Date: 2024-05-01").unwrap();
        let first_entry = prompt.find("[FEATURES]").unwrap();

        assert!(style < rules);
        assert!(rules < version);
        assert!(version < date);
        assert!(date < first_entry);
    }

    #[test]
    fn user_content_is_passed_through_verbatim() {
        let mut input = sample_input();
        input.set_entry(0, "support <script> & \"quotes\"\nsecond line");
        let prompt = build_prompt(&input).unwrap();

        assert!(prompt.contains("[FEATURES]: support <script> & \"quotes\"\nsecond line"));
    }

    #[test]
    fn rendering_is_deterministic() {
        let input = sample_input();
        assert_eq!(build_prompt(&input).unwrap(), build_prompt(&input).unwrap());
    }

    #[test]
    fn custom_template_file_is_used() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("short.hbs");
        std::fs::write(&path, "{{version}}|{{#each entries}}{{label}}={{content}};{{/each}}").unwrap();

        let builder = PromptBuilder::with_template_file(&path).unwrap();
        let prompt = builder.build(&sample_input()).unwrap();

        assert_eq!(prompt, "2.1.0|FEATURES=added dark mode;IMPROVEMENTS=faster startup;");
    }

    #[test]
    fn missing_template_file_is_a_template_error() {
        let err = PromptBuilder::with_template_file(Path::new("/nonexistent/prompt.hbs"))
            .err()
            .unwrap();
        assert!(matches!(err, GenerationError::Template(_)));
    }
}
