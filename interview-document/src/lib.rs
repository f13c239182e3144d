//! # interview-document
//!
//! Turns a finished interview into documents.
//!
//! - [`DocumentRenderer`] fills a Handlebars template with the interview's
//!   template data and converts the resulting Markdown to HTML.
//! - [`html_page`] wraps the HTML in a standalone page for export.
//! - [`flowchart`] describes the question flow as a Mermaid diagram.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use interview_document::{generate_document, html_page};
//!
//! let template = engine.definition().templates().first().map(|t| t.content.as_str());
//! let document = generate_document(engine.definition(), engine.answers(), template)?;
//! std::fs::write("summary.md", &document.markdown)?;
//! std::fs::write("summary.html", html_page(&document.html))?;
//! ```

mod renderer;
pub use renderer::{
    Document, DocumentRenderer, PageOptions, RenderError, default_template, generate_document,
    html_page, html_page_with_options, markdown_to_html, resolve_template,
};

pub mod diagram;
pub use diagram::flowchart;
