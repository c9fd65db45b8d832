//! Markdown rendering: comrak configured for the editor dialect this crate
//! serves.
//!
//! The renderer is deliberately trusting: raw HTML in the source passes
//! through unescaped (`render.unsafe`), because sanitization is a separate,
//! mandatory stage with its own policy input. Do not hand this output to a
//! DOM without running it through [`crate::sanitize::sanitize_html`].

use std::cell::RefCell;

use comrak::nodes::{Ast, AstNode, LineColumn, NodeValue};
use comrak::{Arena, Options, format_html, parse_document};
use once_cell::sync::Lazy;
use tracing::error;

/// Comrak-based Markdown renderer with the dialect extensions this pipeline
/// guarantees: tables, strikethrough, autolinked URLs, task lists, and
/// footnotes, plus typographic substitution and hard line breaks.
pub struct MarkdownRenderer {
    options: Options<'static>,
}

impl MarkdownRenderer {
    pub fn new() -> Self {
        Self {
            options: default_options(),
        }
    }

    /// Render Markdown to an HTML fragment.
    ///
    /// Never fails: Markdown grammars are error-tolerant, and malformed
    /// constructs degrade to literal text instead of erroring. The output
    /// may contain arbitrary raw HTML from the source and is unsafe to
    /// display unsanitized.
    pub fn render(&self, markdown: &str) -> String {
        let arena = Arena::new();
        let root = parse_document(&arena, markdown, &self.options);

        label_task_items(&arena, root);

        let mut html = String::new();
        if let Err(err) = format_html(root, &self.options, &mut html) {
            // A String sink does not fail mid-write; surface whatever was
            // produced rather than breaking the no-error contract.
            error!(error = %err, "html formatting stopped early");
        }
        html
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

static RENDERER: Lazy<MarkdownRenderer> = Lazy::new(MarkdownRenderer::new);

/// Render Markdown with the shared process-wide renderer.
pub fn render_markdown(markdown: &str) -> String {
    RENDERER.render(markdown)
}

fn default_options() -> Options<'static> {
    let mut options = Options::default();

    let ext = &mut options.extension;
    ext.strikethrough = true;
    ext.table = true;
    ext.autolink = true;
    ext.tasklist = true;
    ext.footnotes = true;

    // Typographic pass: curly quotes, dash substitution.
    options.parse.smart = true;

    let render = &mut options.render;
    // Soft break -> <br>.
    render.hardbreaks = true;
    // Raw HTML passthrough; the sanitizer is the downstream boundary.
    render.r#unsafe = true;
    render.tasklist_classes = true;

    options
}

/// Wrap each task-list item's inline content in a `<label>` so the disabled
/// checkbox keeps an accessible text association.
fn label_task_items<'a>(arena: &'a Arena<'a>, root: &'a AstNode<'a>) {
    let paragraphs: Vec<&'a AstNode<'a>> = root
        .descendants()
        .filter(|node| matches!(node.data.borrow().value, NodeValue::TaskItem { .. }))
        .filter_map(|item| item.first_child())
        .filter(|child| matches!(child.data.borrow().value, NodeValue::Paragraph))
        .collect();

    for paragraph in paragraphs {
        let open = arena.alloc(AstNode::new(RefCell::new(Ast::new(
            NodeValue::HtmlInline("<label>".to_string()),
            LineColumn { line: 0, column: 0 },
        ))));
        let close = arena.alloc(AstNode::new(RefCell::new(Ast::new(
            NodeValue::HtmlInline("</label>".to_string()),
            LineColumn { line: 0, column: 0 },
        ))));
        paragraph.prepend(open);
        paragraph.append(close);
    }
}

#[cfg(test)]
mod tests {
    use super::render_markdown;

    #[test]
    fn renders_headings() {
        let html = render_markdown("# Hello World");
        assert!(html.contains("<h1>Hello World</h1>"));
    }

    #[test]
    fn renders_bold_text() {
        let html = render_markdown("This is **bold** text");
        assert!(html.contains("<strong>bold</strong>"));
    }

    #[test]
    fn fenced_code_keeps_language_annotation() {
        let html = render_markdown("```javascript\nconst x = 1;\n```");
        assert!(html.contains("<pre>"));
        assert!(html.contains("<code class=\"language-javascript\">"));
    }

    #[test]
    fn renders_links_and_autolinks() {
        let html = render_markdown("[Link](https://example.com)");
        assert!(html.contains("<a href=\"https://example.com\">Link</a>"));

        let auto = render_markdown("visit https://example.com today");
        assert!(auto.contains("<a href=\"https://example.com\">"));
    }

    #[test]
    fn single_newline_becomes_a_hard_break() {
        let html = render_markdown("line one\nline two");
        assert!(html.contains("<br"));
    }

    #[test]
    fn renders_pipe_tables() {
        let html = render_markdown("| a | b |\n| --- | --- |\n| 1 | 2 |");
        assert!(html.contains("<table>"));
        assert!(html.contains("<th>a</th>"));
        assert!(html.contains("<td>2</td>"));
    }

    #[test]
    fn task_items_render_as_labelled_disabled_checkboxes() {
        let html = render_markdown("- [ ] todo\n- [x] done");
        assert!(html.contains("type=\"checkbox\""));
        assert!(html.contains("disabled"));
        assert!(html.contains("checked"));
        assert!(html.contains("<label>todo</label>"));
        assert!(html.contains("<label>done</label>"));
    }

    #[test]
    fn ordinary_list_items_are_not_labelled() {
        let html = render_markdown("- plain item");
        assert!(!html.contains("<label>"));
    }

    #[test]
    fn footnotes_resolve_with_backlinks() {
        let html = render_markdown("Claim.[^1]\n\n[^1]: Evidence.");
        assert!(html.contains("data-footnote-ref"));
        assert!(html.contains("data-footnote-backref"));
        assert!(html.contains("Evidence."));
    }

    #[test]
    fn raw_html_passes_through_unescaped() {
        let html = render_markdown("before\n\n<div class=\"embed\">inner</div>\n\nafter");
        assert!(html.contains("<div class=\"embed\">"));
    }

    #[test]
    fn applies_typographic_substitution() {
        let html = render_markdown("\"quoted\" text -- dash");
        assert!(html.contains("\u{201c}quoted\u{201d}"));
        assert!(html.contains("\u{2013}"));
    }

    #[test]
    fn strikethrough_renders_as_del() {
        let html = render_markdown("~~gone~~");
        assert!(html.contains("<del>gone</del>"));
    }

    #[test]
    fn malformed_emphasis_degrades_to_literal_text() {
        let html = render_markdown("**unterminated");
        assert!(html.contains("**unterminated"));
    }

    #[test]
    fn renders_blockquotes_and_rules() {
        let html = render_markdown("> quoted\n\n---");
        assert!(html.contains("<blockquote>"));
        assert!(html.contains("<hr"));
    }
}
