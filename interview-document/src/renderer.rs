//! Document rendering: Handlebars templates to Markdown, Markdown to HTML.

use chrono::{Local, NaiveDateTime};
use handlebars::Handlebars;
use interview::{Answers, Definition, template_data};
use pulldown_cmark::{Event, Options, Parser, html};
use serde_json::Value;

/// Error type for document rendering.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// The template failed to parse or render.
    #[error("Template error: {0}")]
    Template(#[from] handlebars::RenderError),
}

/// A rendered document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// The filled-in template text.
    pub markdown: String,
    /// The Markdown converted to an HTML fragment.
    pub html: String,
}

/// The built-in summary template.
const DEFAULT_TEMPLATE: &str = "# {{metadata.title}}

## Summary Information

**Name:** {{user_name}}
**Date:** {{current_date}}

## Responses

{{#each questions}}
### {{question}}
**Answer:** {{answer}}

{{/each}}

---
*Generated on {{current_date}} at {{current_time}}*
";

/// Get the built-in summary template.
pub fn default_template() -> &'static str {
    DEFAULT_TEMPLATE
}

/// Turn a template source into template text.
///
/// Remote sources (`http…`) are not fetched; a warning is logged and the
/// default template is used. Sources starting with `/` are read from disk,
/// falling back to the default template if that fails. Anything else is the
/// template text itself.
pub fn resolve_template(source: &str) -> String {
    if source.starts_with("http") {
        log::warn!("Remote templates are not supported, using the default template: {source}");
        return DEFAULT_TEMPLATE.to_string();
    }
    if source.starts_with('/') {
        return match std::fs::read_to_string(source) {
            Ok(text) => text,
            Err(err) => {
                log::warn!("Failed to load template {source}: {err}");
                DEFAULT_TEMPLATE.to_string()
            }
        };
    }
    source.to_string()
}

/// Renders templates against interview data.
///
/// Values are inserted verbatim (no HTML escaping) and missing values render
/// as empty text.
pub struct DocumentRenderer {
    handlebars: Handlebars<'static>,
}

impl DocumentRenderer {
    /// Create a renderer.
    pub fn new() -> Self {
        let mut handlebars = Handlebars::new();
        handlebars.register_escape_fn(handlebars::no_escape);
        Self { handlebars }
    }

    /// Render `template` against `data`, then convert the result to HTML.
    pub fn render(&self, template: &str, data: &Value) -> Result<Document, RenderError> {
        let markdown = self.handlebars.render_template(template, data)?;
        let html = markdown_to_html(&markdown);
        Ok(Document { markdown, html })
    }

    /// Generate the document for `definition` and `answers`, stamped with `now`.
    ///
    /// `template` is a template source as accepted by [`resolve_template`];
    /// `None` selects the default template.
    pub fn generate(
        &self,
        definition: &Definition,
        answers: &Answers,
        template: Option<&str>,
        now: NaiveDateTime,
    ) -> Result<Document, RenderError> {
        let template = template.map_or_else(|| DEFAULT_TEMPLATE.to_string(), resolve_template);
        let data = template_data(definition, answers, now);
        self.render(&template, &data)
    }
}

impl Default for DocumentRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Generate the document for `definition` and `answers` at the current local time.
pub fn generate_document(
    definition: &Definition,
    answers: &Answers,
    template: Option<&str>,
) -> Result<Document, RenderError> {
    DocumentRenderer::new().generate(definition, answers, template, Local::now().naive_local())
}

/// Convert Markdown to an HTML fragment.
///
/// GitHub-flavoured extensions are enabled and single line breaks are kept as `<br />`.
pub fn markdown_to_html(markdown: &str) -> String {
    let options = Options::ENABLE_TABLES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_FOOTNOTES;
    let parser = Parser::new_ext(markdown, options).map(|event| match event {
        Event::SoftBreak => Event::HardBreak,
        other => other,
    });
    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}

/// Options for the standalone HTML page.
#[derive(Debug, Clone)]
pub struct PageOptions {
    /// Title of the page.
    pub title: String,
    /// Whether to embed the default stylesheet.
    pub include_styles: bool,
}

impl PageOptions {
    /// Create options with the default title and stylesheet.
    pub fn new() -> Self {
        Self {
            title: "Generated Document".to_string(),
            include_styles: true,
        }
    }

    /// Set the page title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Enable or disable the default stylesheet.
    pub fn with_styles(mut self, include: bool) -> Self {
        self.include_styles = include;
        self
    }
}

impl Default for PageOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// Wrap an HTML fragment in a standalone page titled "Generated Document".
pub fn html_page(body: &str) -> String {
    html_page_with_options(body, &PageOptions::new())
}

/// Wrap an HTML fragment in a standalone page.
pub fn html_page_with_options(body: &str, options: &PageOptions) -> String {
    let mut page = String::new();
    page.push_str("<!DOCTYPE html>\n<html>\n<head>\n");
    page.push_str("    <meta charset=\"UTF-8\">\n");
    page.push_str(&format!("    <title>{}</title>\n", escape_html(&options.title)));
    if options.include_styles {
        page.push_str(STYLES);
    }
    page.push_str("</head>\n<body>\n");
    page.push_str(body);
    page.push_str("\n</body>\n</html>");
    page
}

const STYLES: &str = r#"    <style>
        body {
            font-family: Arial, sans-serif;
            max-width: 800px;
            margin: 0 auto;
            padding: 20px;
            line-height: 1.6;
        }
        h1, h2, h3 { color: #333; }
        hr { border: 1px solid #eee; }
    </style>
"#;

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
