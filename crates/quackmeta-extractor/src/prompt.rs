//! Prompt template resolution and rendering
//!
//! Templates are plain text files with `{{ name }}` placeholders (the
//! triple-brace form `{{{ name }}}` is accepted too). Only values supplied
//! in the context may be referenced; an unknown placeholder is an error.

use crate::error::ExtractorError;
use regex::Regex;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tracing::{debug, warn};

/// Built-in template used when no template file can be found
pub const DEFAULT_TEMPLATE: &str = include_str!("../prompts/metadata/generic.mustache");

/// File extension of template files
pub const TEMPLATE_EXTENSION: &str = "mustache";

const PLACEHOLDER_PATTERN: &str = r"\{\{\{?\s*([A-Za-z0-9_.]+)\s*\}?\}\}";

static PLACEHOLDER: OnceLock<Result<Regex, regex::Error>> = OnceLock::new();

fn placeholder() -> Result<&'static Regex, ExtractorError> {
    PLACEHOLDER
        .get_or_init(|| Regex::new(PLACEHOLDER_PATTERN))
        .as_ref()
        .map_err(|e| ExtractorError::TemplateRender(e.to_string()))
}

/// Variables available to a template
pub type PromptContext<'a> = HashMap<&'a str, &'a str>;

/// Locates template files by category and name
///
/// Candidates are checked in order:
///
/// 1. packaged prompts next to the installed binary (`share/quackmeta/prompts`)
/// 2. the legacy packaged location (`share/quacktool/prompts`)
/// 3. `prompts/` under the working directory
/// 4. this crate's own `prompts/` directory, returned even when absent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateResolver {
    search_roots: Vec<PathBuf>,
    fallback_root: PathBuf,
}

impl TemplateResolver {
    /// Create a resolver with explicit search roots
    ///
    /// Each root is a `prompts` directory holding `{category}/{name}` files.
    pub fn new(search_roots: Vec<PathBuf>, fallback_root: impl Into<PathBuf>) -> Self {
        Self {
            search_roots,
            fallback_root: fallback_root.into(),
        }
    }

    /// Create a resolver for the running installation
    pub fn from_environment() -> Self {
        let mut roots = Vec::new();

        if let Some(prefix) = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().and_then(Path::parent).map(Path::to_path_buf))
        {
            roots.push(prefix.join("share").join("quackmeta").join("prompts"));
            roots.push(prefix.join("share").join("quacktool").join("prompts"));
        }

        if let Ok(cwd) = std::env::current_dir() {
            roots.push(cwd.join("prompts"));
        }

        Self::new(roots, Path::new(env!("CARGO_MANIFEST_DIR")).join("prompts"))
    }

    /// Resolve a template to a path
    ///
    /// Never fails: when no candidate exists the fallback path is returned
    /// and the caller finds out on render.
    pub fn get_template_path(&self, name: &str, category: &str) -> PathBuf {
        let file_name = format!("{}.{}", name, TEMPLATE_EXTENSION);

        for root in &self.search_roots {
            for candidate in [root.join(category).join(&file_name), root.join(category).join(name)] {
                if candidate.is_file() {
                    debug!("Resolved template {}/{} to {}", category, name, candidate.display());
                    return candidate;
                }
            }
        }

        self.fallback_root.join(category).join(file_name)
    }
}

impl Default for TemplateResolver {
    fn default() -> Self {
        Self::from_environment()
    }
}

/// Substitute placeholders in template text
pub fn render_template(template: &str, context: &PromptContext<'_>) -> Result<String, ExtractorError> {
    let regex = placeholder()?;
    let mut rendered = String::with_capacity(template.len());
    let mut last = 0;

    for captures in regex.captures_iter(template) {
        let (Some(whole), Some(key)) = (captures.get(0), captures.get(1)) else {
            continue;
        };
        let value = context.get(key.as_str()).ok_or_else(|| {
            ExtractorError::TemplateRender(format!("Missing required context key: {}", key.as_str()))
        })?;
        rendered.push_str(&template[last..whole.start()]);
        rendered.push_str(value);
        last = whole.end();
    }

    rendered.push_str(&template[last..]);
    Ok(rendered)
}

/// Load a template file and render it
///
/// Only a path with no file behind it is [`ExtractorError::TemplateNotFound`];
/// a file that exists but cannot be read is a render error.
pub fn render_prompt(template_path: &Path, context: &PromptContext<'_>) -> Result<String, ExtractorError> {
    if !template_path.is_file() {
        return Err(ExtractorError::TemplateNotFound(
            template_path.display().to_string(),
        ));
    }

    let template = fs::read_to_string(template_path).map_err(|e| {
        ExtractorError::TemplateRender(format!(
            "Failed to read template {}: {}",
            template_path.display(),
            e
        ))
    })?;

    let rendered = render_template(&template, context)?;
    debug!("Rendered template {}", template_path.display());
    Ok(rendered)
}

/// Produce the extraction prompt for `content`
///
/// A missing template falls back to [`DEFAULT_TEMPLATE`]. Any other
/// failure is reported as [`ExtractorError::PromptRender`].
pub fn build_prompt(template_path: &Path, content: &str) -> Result<String, ExtractorError> {
    let context = PromptContext::from([("content", content)]);

    match render_prompt(template_path, &context) {
        Ok(prompt) => Ok(prompt),
        Err(ExtractorError::TemplateNotFound(location)) => {
            warn!("Template not found ({}), using built-in default", location);
            render_template(DEFAULT_TEMPLATE, &context)
                .map_err(|e| ExtractorError::PromptRender(e.to_string()))
        }
        Err(e) => Err(ExtractorError::PromptRender(e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn content_context(content: &str) -> PromptContext<'_> {
        PromptContext::from([("content", content)])
    }

    #[test]
    fn test_render_template_substitutes_variants() {
        let context = content_context("hello");
        assert_eq!(
            render_template("a {{content}} b {{ content }} c {{{content}}}", &context).unwrap(),
            "a hello b hello c hello"
        );
    }

    #[test]
    fn test_render_template_missing_key() {
        let context = content_context("hello");
        let err = render_template("{{ author }}", &context).unwrap_err();
        assert!(matches!(err, ExtractorError::TemplateRender(ref m) if m.contains("author")));
    }

    #[test]
    fn test_render_does_not_recurse_into_values() {
        let context = content_context("{{ title }}");
        assert_eq!(render_template("[{{content}}]", &context).unwrap(), "[{{ title }}]");
    }

    #[test]
    fn test_default_template_renders_content() {
        let rendered = render_template(DEFAULT_TEMPLATE, &content_context("THE DOCUMENT")).unwrap();
        assert!(rendered.contains("THE DOCUMENT"));
        assert!(rendered.contains("author_profile"));
        assert!(!rendered.contains("{{"));
    }

    #[test]
    fn test_resolver_prefers_earlier_roots() {
        let first = TempDir::new().unwrap();
        let second = TempDir::new().unwrap();
        for dir in [&first, &second] {
            fs::create_dir_all(dir.path().join("metadata")).unwrap();
            fs::write(dir.path().join("metadata/generic.mustache"), "x").unwrap();
        }

        let resolver = TemplateResolver::new(
            vec![first.path().to_path_buf(), second.path().to_path_buf()],
            "/nonexistent",
        );
        assert_eq!(
            resolver.get_template_path("generic", "metadata"),
            first.path().join("metadata/generic.mustache")
        );
    }

    #[test]
    fn test_resolver_accepts_name_without_extension() {
        let root = TempDir::new().unwrap();
        fs::create_dir_all(root.path().join("metadata")).unwrap();
        fs::write(root.path().join("metadata/short"), "x").unwrap();

        let resolver = TemplateResolver::new(vec![root.path().to_path_buf()], "/nonexistent");
        assert_eq!(
            resolver.get_template_path("short", "metadata"),
            root.path().join("metadata/short")
        );
    }

    #[test]
    fn test_resolver_always_returns_a_path() {
        let resolver = TemplateResolver::new(vec![], "/fallback/prompts");
        assert_eq!(
            resolver.get_template_path("generic", "metadata"),
            PathBuf::from("/fallback/prompts/metadata/generic.mustache")
        );
    }

    #[test]
    fn test_crate_fallback_template_exists() {
        let resolver = TemplateResolver::new(vec![], Path::new(env!("CARGO_MANIFEST_DIR")).join("prompts"));
        assert!(resolver.get_template_path("generic", "metadata").is_file());
    }

    #[test]
    fn test_render_prompt_missing_file() {
        let err = render_prompt(Path::new("/no/such/template.mustache"), &content_context("x")).unwrap_err();
        assert!(matches!(err, ExtractorError::TemplateNotFound(_)));
    }

    #[test]
    fn test_build_prompt_falls_back_to_default() {
        let prompt = build_prompt(Path::new("/no/such/template.mustache"), "body text").unwrap();
        assert!(prompt.contains("body text"));
        assert!(prompt.contains("\"title\""));
    }

    #[test]
    fn test_build_prompt_custom_template() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("custom.mustache");
        fs::write(&path, "Describe: {{content}}").unwrap();
        assert_eq!(build_prompt(&path, "abc").unwrap(), "Describe: abc");
    }

    #[test]
    fn test_build_prompt_bad_custom_template_is_fatal() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("custom.mustache");
        fs::write(&path, "{{content}} by {{author}}").unwrap();
        let err = build_prompt(&path, "abc").unwrap_err();
        assert!(matches!(err, ExtractorError::PromptRender(_)));
    }

    #[test]
    fn test_unreadable_custom_template_is_fatal() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("latin1.mustache");
        fs::write(&path, b"R\xe9sum\xe9: {{content}}").unwrap();

        let err = render_prompt(&path, &content_context("x")).unwrap_err();
        assert!(matches!(err, ExtractorError::TemplateRender(ref m) if m.contains("latin1.mustache")));

        let err = build_prompt(&path, "abc").unwrap_err();
        assert!(matches!(err, ExtractorError::PromptRender(_)));
    }
}
