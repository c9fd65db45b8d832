//! Document templates: wrap a sanitized fragment in a complete, standalone
//! HTML document.
//!
//! Templates are a closed set dispatched through [`TemplateId`], so an
//! unknown identifier is a typed error at the string boundary instead of a
//! silent fallback deep in the pipeline. Shell text the caller supplies
//! (title, description, theme color) is entity-escaped by askama on
//! interpolation, a second escaping discipline, independent of body
//! sanitization, that protects the document shell itself. Only the already
//! sanitized body and the caller's CSS pass through unescaped.

use std::fmt;
use std::str::FromStr;

use askama::Template;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const HIGHLIGHT_CDN_BASE: &str =
    "https://cdnjs.cloudflare.com/ajax/libs/highlight.js/11.10.0/styles";

pub const DEFAULT_THEME_COLOR: &str = "#007AFF";

/// Stylesheet variant for the optional syntax-highlighting link.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SyntaxTheme {
    #[default]
    Light,
    Dark,
}

impl SyntaxTheme {
    /// highlight.js stylesheet name for this variant.
    pub fn stylesheet(self) -> &'static str {
        match self {
            SyntaxTheme::Light => "github",
            SyntaxTheme::Dark => "github-dark",
        }
    }
}

/// Presentation options for document assembly. All fields are optional on
/// the wire; defaults are documented per field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TemplateOptions {
    /// Document title. `None` falls back to the selected template's own
    /// default ("Document", "Blog Post", or "README").
    pub title: Option<String>,
    /// Meta description, used by the templates that carry one.
    pub description: String,
    /// Theme color for meta tags and accent styling.
    pub theme_color: String,
    /// Emit the highlight.js stylesheet link. The core never highlights;
    /// it only leaves `language-*` hooks for an external highlighter.
    pub include_syntax_highlighting: bool,
    pub syntax_theme: SyntaxTheme,
    /// Extra CSS appended to the template's own style block, verbatim.
    pub custom_css: String,
    /// Run the minifier over the assembled document.
    pub minify: bool,
}

impl Default for TemplateOptions {
    fn default() -> Self {
        Self {
            title: None,
            description: String::new(),
            theme_color: DEFAULT_THEME_COLOR.to_string(),
            include_syntax_highlighting: true,
            syntax_theme: SyntaxTheme::default(),
            custom_css: String::new(),
            minify: false,
        }
    }
}

/// The closed set of document templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateId {
    Minimal,
    Blog,
    Readme,
    Custom,
}

impl TemplateId {
    pub const ALL: [TemplateId; 4] = [
        TemplateId::Minimal,
        TemplateId::Blog,
        TemplateId::Readme,
        TemplateId::Custom,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TemplateId::Minimal => "minimal",
            TemplateId::Blog => "blog",
            TemplateId::Readme => "readme",
            TemplateId::Custom => "custom",
        }
    }

    /// Human-readable name for export pickers.
    pub fn name(self) -> &'static str {
        match self {
            TemplateId::Minimal => "Minimal",
            TemplateId::Blog => "Blog Post",
            TemplateId::Readme => "README",
            TemplateId::Custom => "Custom",
        }
    }

    fn default_title(self) -> &'static str {
        match self {
            TemplateId::Blog => "Blog Post",
            TemplateId::Readme => "README",
            TemplateId::Minimal | TemplateId::Custom => "Document",
        }
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TemplateId {
    type Err = TemplateError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "minimal" => Ok(TemplateId::Minimal),
            "blog" => Ok(TemplateId::Blog),
            "readme" => Ok(TemplateId::Readme),
            "custom" => Ok(TemplateId::Custom),
            other => Err(TemplateError::Unknown {
                id: other.to_string(),
            }),
        }
    }
}

/// One row of the template registry surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TemplateDescriptor {
    pub id: TemplateId,
    pub name: &'static str,
}

/// Stable enumeration of selectable templates for export surfaces.
pub fn registry() -> [TemplateDescriptor; 4] {
    TemplateId::ALL.map(|id| TemplateDescriptor {
        id,
        name: id.name(),
    })
}

/// Resolve a string identifier against the registry.
pub fn lookup(id: &str) -> Result<TemplateDescriptor, TemplateError> {
    let id: TemplateId = id.parse()?;
    Ok(TemplateDescriptor {
        id,
        name: id.name(),
    })
}

#[derive(Debug, Error)]
pub enum TemplateError {
    /// Identifier not present in the template registry.
    #[error("unknown template `{id}`")]
    Unknown { id: String },
    #[error("template rendering failed: {0}")]
    Render(#[from] askama::Error),
}

/// Assemble a complete HTML document around an already sanitized body.
pub fn apply(
    id: TemplateId,
    body: &str,
    options: &TemplateOptions,
) -> Result<String, TemplateError> {
    let title = options
        .title
        .clone()
        .unwrap_or_else(|| id.default_title().to_string());
    let syntax_href = format!(
        "{HIGHLIGHT_CDN_BASE}/{}.min.css",
        options.syntax_theme.stylesheet()
    );

    let document = match id {
        TemplateId::Minimal => MinimalDocument {
            title,
            include_syntax_highlighting: options.include_syntax_highlighting,
            syntax_href,
            custom_css: options.custom_css.clone(),
            content: body,
        }
        .render()?,
        TemplateId::Blog => BlogDocument {
            title,
            description: options.description.clone(),
            theme_color: options.theme_color.clone(),
            include_syntax_highlighting: options.include_syntax_highlighting,
            syntax_href,
            custom_css: options.custom_css.clone(),
            content: body,
        }
        .render()?,
        TemplateId::Readme => ReadmeDocument {
            title,
            include_syntax_highlighting: options.include_syntax_highlighting,
            syntax_href,
            custom_css: options.custom_css.clone(),
            content: body,
        }
        .render()?,
        TemplateId::Custom => CustomDocument {
            title,
            description: options.description.clone(),
            theme_color: options.theme_color.clone(),
            include_syntax_highlighting: options.include_syntax_highlighting,
            syntax_href,
            css: if options.custom_css.is_empty() {
                "/* Add your custom CSS here */".to_string()
            } else {
                options.custom_css.clone()
            },
            content: body,
        }
        .render()?,
    };

    Ok(document)
}

#[derive(Template)]
#[template(path = "minimal.html")]
struct MinimalDocument<'a> {
    title: String,
    include_syntax_highlighting: bool,
    syntax_href: String,
    custom_css: String,
    content: &'a str,
}

#[derive(Template)]
#[template(path = "blog.html")]
struct BlogDocument<'a> {
    title: String,
    description: String,
    theme_color: String,
    include_syntax_highlighting: bool,
    syntax_href: String,
    custom_css: String,
    content: &'a str,
}

#[derive(Template)]
#[template(path = "readme.html")]
struct ReadmeDocument<'a> {
    title: String,
    include_syntax_highlighting: bool,
    syntax_href: String,
    custom_css: String,
    content: &'a str,
}

#[derive(Template)]
#[template(path = "custom.html")]
struct CustomDocument<'a> {
    title: String,
    description: String,
    theme_color: String,
    include_syntax_highlighting: bool,
    syntax_href: String,
    css: String,
    content: &'a str,
}
