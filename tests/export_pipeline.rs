use foglio::pipeline::{ExportRequest, export_document, preview_fragment};
use foglio::render::render_markdown;
use foglio::sanitize::{SanitizePolicy, sanitize_html};
use foglio::template::{TemplateId, TemplateOptions};
use foglio::toc::{extract_headings, generate_toc};

fn fixture() -> &'static str {
    include_str!("fixtures/feature_tour.md")
}

#[test]
fn fixture_preview_keeps_every_safe_feature() {
    let fragment = preview_fragment(fixture(), &SanitizePolicy::default());

    assert!(fragment.contains("<h1>Feature Tour</h1>"));
    assert!(fragment.contains("<strong>bold</strong>"));
    assert!(fragment.contains("<em>italic</em>"));
    assert!(fragment.contains("<del>struck</del>"));
    assert!(fragment.contains("<ol>"));
    assert!(fragment.contains("<li>nested</li>"));
    assert!(fragment.contains("code span"));
    assert!(fragment.contains("language-rust"));
    assert!(fragment.contains("<table>"));
    assert!(fragment.contains("<th>Name</th>"));
    assert!(fragment.contains("<blockquote>"));
    assert!(fragment.contains("<hr"));
    assert!(fragment.contains("href=\"https://example.com/docs\""));
    assert!(fragment.contains("src=\"https://example.com/image.png\""));
    assert!(fragment.contains("alt=\"alt text\""));
    assert!(fragment.contains("The supporting source."));
    assert!(fragment.contains("class=\"embed\""));
}

#[test]
fn fixture_preview_never_leaks_scripts() {
    let fragment = preview_fragment(fixture(), &SanitizePolicy::default());
    assert!(!fragment.contains("<script"));
    assert!(!fragment.contains("must never survive"));
}

#[test]
fn rendered_script_is_present_until_sanitization() {
    // The renderer passes raw HTML through; only the sanitizer removes it.
    let rendered = render_markdown(fixture());
    assert!(rendered.contains("<script>"));
    assert!(!sanitize_html(&rendered, &SanitizePolicy::default()).contains("<script"));
}

#[test]
fn iframe_policy_gates_embedding_end_to_end() {
    let markdown = "intro\n\n<iframe src=\"https://player.example/v/1\" frameborder=\"0\" onload=\"steal()\"></iframe>";

    let denied = preview_fragment(markdown, &SanitizePolicy::default());
    assert!(!denied.contains("<iframe"));

    let policy = SanitizePolicy {
        allow_iframes: true,
        ..SanitizePolicy::default()
    };
    let allowed = preview_fragment(markdown, &policy);
    assert!(allowed.contains("<iframe"));
    assert!(allowed.contains("frameborder=\"0\""));
    // Event handlers stay behind the scripts toggle.
    assert!(!allowed.contains("onload"));
}

#[test]
fn sanitization_is_idempotent_over_rendered_fixtures() {
    let policy = SanitizePolicy::default();
    let once = preview_fragment(fixture(), &policy);
    assert_eq!(sanitize_html(&once, &policy), once);
}

#[test]
fn exported_document_embeds_the_sanitized_fixture() {
    let request = ExportRequest::new(fixture(), TemplateId::Blog);
    let html = export_document(&request).unwrap();

    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("<article>"));
    assert!(html.contains("<h1>Feature Tour</h1>"));
    assert!(!html.contains("<script"));
}

#[test]
fn export_escapes_shell_text_independently_of_the_body() {
    let options = TemplateOptions {
        title: Some("<script>x</script>".to_string()),
        ..TemplateOptions::default()
    };
    let request = ExportRequest::new("# ok", TemplateId::Minimal).with_options(options);
    let html = export_document(&request).unwrap();
    assert!(html.contains("&lt;script&gt;"));
    assert!(!html.contains("<script>"));
}

#[test]
fn minified_export_collapses_whitespace_without_losing_content() {
    let options = TemplateOptions {
        minify: true,
        ..TemplateOptions::default()
    };
    let request = ExportRequest::new("# Title\n\nsome body text", TemplateId::Readme)
        .with_options(options);
    let html = export_document(&request).unwrap();
    assert!(!html.contains('\n'));
    assert!(html.contains("<h1>Title</h1>"));
    assert!(html.contains("some body text"));
}

#[test]
fn toc_agrees_with_the_fixture_headings() {
    let headings = extract_headings(fixture());
    assert_eq!(headings[0].level, 1);
    assert_eq!(headings[0].text, "Feature Tour");
    assert_eq!(headings[0].id, "feature-tour");
    assert!(headings.iter().any(|h| h.id == "quotes-and-rules"));

    let toc = generate_toc(fixture());
    assert!(toc.starts_with("## Table of Contents\n\n"));
    assert!(toc.contains("- [Feature Tour](#feature-tour)\n"));
    assert!(toc.contains("  - [Tasks](#tasks)\n"));
    assert!(toc.ends_with("\n---\n\n"));
}

#[test]
fn headingless_document_yields_no_toc() {
    assert_eq!(generate_toc("plain paragraph\n\nanother one"), "");
}
