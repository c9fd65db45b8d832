//! End-to-end document pipeline: raw Markdown through the renderer, the
//! sanitizer, the template engine, and optionally the minifier.
//!
//! Stage order is load-bearing. Sanitization runs on renderer output (the
//! rendered HTML is the attack surface, not the Markdown source), templating
//! wraps only sanitized markup, and minification is last because it is
//! lossy. Callers that need a bare fragment for live preview use
//! [`preview_fragment`], which stops after sanitization.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::minify::minify_html;
use crate::render::render_markdown;
use crate::sanitize::{SanitizePolicy, sanitize_html};
use crate::template::{self, TemplateError, TemplateId, TemplateOptions};

/// Everything needed to produce a standalone document from author input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportRequest {
    /// Untrusted Markdown source.
    pub markdown: String,
    pub template: TemplateId,
    #[serde(default)]
    pub options: TemplateOptions,
    #[serde(default)]
    pub policy: SanitizePolicy,
}

impl ExportRequest {
    pub fn new(markdown: impl Into<String>, template: TemplateId) -> Self {
        Self {
            markdown: markdown.into(),
            template,
            options: TemplateOptions::default(),
            policy: SanitizePolicy::default(),
        }
    }

    pub fn with_options(mut self, options: TemplateOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_policy(mut self, policy: SanitizePolicy) -> Self {
        self.policy = policy;
        self
    }
}

/// Structured errors surfaced by the export pipeline. Rendering and
/// sanitization cannot fail; everything funnels through template assembly.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error(transparent)]
    Template(#[from] TemplateError),
}

/// Produce a complete HTML document for the request.
pub fn export_document(request: &ExportRequest) -> Result<String, ExportError> {
    let rendered = render_markdown(&request.markdown);
    debug!(bytes = rendered.len(), "markdown rendered");

    let sanitized = sanitize_html(&rendered, &request.policy);
    debug!(bytes = sanitized.len(), "fragment sanitized");

    let document = template::apply(request.template, &sanitized, &request.options)?;
    debug!(template = %request.template, "document assembled");

    if request.options.minify {
        return Ok(minify_html(&document));
    }
    Ok(document)
}

/// Render and sanitize a fragment without wrapping it in a document:
/// the live-preview path.
pub fn preview_fragment(markdown: &str, policy: &SanitizePolicy) -> String {
    sanitize_html(&render_markdown(markdown), policy)
}

#[cfg(test)]
mod tests {
    use super::{ExportRequest, export_document, preview_fragment};
    use crate::sanitize::SanitizePolicy;
    use crate::template::{TemplateId, TemplateOptions};

    #[test]
    fn export_produces_a_full_document() {
        let request = ExportRequest::new("# Hello World", TemplateId::Minimal);
        let html = export_document(&request).unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<h1>Hello World</h1>"));
    }

    #[test]
    fn export_sanitizes_before_templating() {
        let request = ExportRequest::new(
            "safe\n\n<script>alert('xss')</script>",
            TemplateId::Minimal,
        );
        let html = export_document(&request).unwrap();
        // The shell's own stylesheet link survives; the body script must not.
        assert!(!html.contains("<script"));
        assert!(html.contains("safe"));
    }

    #[test]
    fn export_minifies_when_requested() {
        let options = TemplateOptions {
            minify: true,
            ..TemplateOptions::default()
        };
        let request =
            ExportRequest::new("# Title\n\ntext", TemplateId::Minimal).with_options(options);
        let html = export_document(&request).unwrap();
        assert!(html.starts_with("<!DOCTYPE html><html"));
        assert!(!html.contains('\n'));
    }

    #[test]
    fn preview_returns_a_sanitized_fragment() {
        let fragment = preview_fragment("**bold** <iframe src=\"https://x.example\"></iframe>", &SanitizePolicy::default());
        assert!(fragment.contains("<strong>bold</strong>"));
        assert!(!fragment.contains("<iframe"));
        assert!(!fragment.contains("<!DOCTYPE"));
    }

    #[test]
    fn preview_honours_the_policy() {
        let policy = SanitizePolicy {
            allow_iframes: true,
            ..SanitizePolicy::default()
        };
        let fragment =
            preview_fragment("<iframe src=\"https://x.example\"></iframe>", &policy);
        assert!(fragment.contains("<iframe"));
    }
}
