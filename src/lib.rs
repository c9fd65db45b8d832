//! foglio converts untrusted author Markdown into safe, embeddable HTML and
//! packages that HTML into standalone documents through named presentation
//! templates.
//!
//! The pipeline is a chain of pure, synchronous stages:
//!
//! ```text
//! markdown --render--> raw HTML --sanitize(policy)--> safe fragment
//!          --template(options)--> full document --minify?--> output
//! ```
//!
//! Rendering deliberately passes raw HTML through unescaped; sanitization is
//! the mandatory downstream stage and the only trust boundary. Never feed
//! renderer output to a DOM without running it through [`sanitize::sanitize_html`]
//! first. The [`toc`] module operates on raw Markdown alongside the pipeline
//! and splices its output back into the source, not into the HTML.
//!
//! Every stage owns its output exclusively and shares no mutable state, so
//! independent documents can be processed from any number of threads without
//! coordination.

pub mod minify;
pub mod pipeline;
pub mod render;
pub mod sanitize;
pub mod starters;
pub mod stats;
pub mod template;
pub mod toc;

pub use minify::minify_html;
pub use pipeline::{ExportError, ExportRequest, export_document, preview_fragment};
pub use render::{MarkdownRenderer, render_markdown};
pub use sanitize::{SanitizePolicy, sanitize_html, sanitizer_available};
pub use stats::DocumentStats;
pub use template::{SyntaxTheme, TemplateError, TemplateId, TemplateOptions};
pub use toc::{HeadingEntry, extract_headings, generate_toc, heading_slug, insert_toc};
