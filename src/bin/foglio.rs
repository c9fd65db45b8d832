//! foglio: command-line driver for the Markdown document pipeline.
//! Reads Markdown from a file or stdin, writes HTML to a file or stdout.

use std::fmt;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

use foglio::pipeline::{ExportError, ExportRequest, export_document, preview_fragment};
use foglio::render::render_markdown;
use foglio::sanitize::SanitizePolicy;
use foglio::starters::{STARTERS, starter};
use foglio::stats::DocumentStats;
use foglio::template::{SyntaxTheme, TemplateId, TemplateOptions, registry};
use foglio::toc::{generate_toc, insert_toc};

#[derive(Parser, Debug)]
#[command(
    name = "foglio",
    version,
    about = "Convert Markdown into safe, portable HTML documents",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Export a complete HTML document through a presentation template
    Export(ExportArgs),
    /// Render a sanitized HTML fragment (the live-preview path)
    Render(RenderArgs),
    /// Print a table of contents, or splice it into the document
    Toc(TocArgs),
    /// Print document statistics
    Stats(StatsArgs),
    /// List the document template registry
    Templates,
    /// List bundled starter documents, or print one by id
    Starters {
        /// Starter id; omit to list the registry
        id: Option<String>,
    },
}

#[derive(Args, Debug)]
struct ExportArgs {
    /// Input Markdown file, or `-` for stdin
    input: PathBuf,

    #[arg(long, value_enum, default_value_t = TemplateArg::Minimal)]
    template: TemplateArg,

    /// Document title (defaults to the template's own)
    #[arg(long)]
    title: Option<String>,

    /// Meta description
    #[arg(long, default_value = "")]
    description: String,

    /// Theme color for meta tags and accents
    #[arg(long, default_value = "#007AFF")]
    theme_color: String,

    /// Skip the syntax-highlighting stylesheet link
    #[arg(long, default_value_t = false)]
    no_highlight: bool,

    #[arg(long, value_enum, default_value_t = SyntaxThemeArg::Light)]
    syntax_theme: SyntaxThemeArg,

    /// File with extra CSS appended to the template's style block
    #[arg(long)]
    custom_css: Option<PathBuf>,

    /// Minify the assembled document
    #[arg(long, default_value_t = false)]
    minify: bool,

    #[command(flatten)]
    policy: PolicyArgs,

    /// Output file (stdout when omitted)
    #[arg(long, short)]
    output: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct RenderArgs {
    /// Input Markdown file, or `-` for stdin
    input: PathBuf,

    /// Skip sanitization. Diagnostics only: the output is unsafe to
    /// display and must be re-sanitized before it reaches a user.
    #[arg(long, default_value_t = false)]
    no_sanitize: bool,

    #[command(flatten)]
    policy: PolicyArgs,

    /// Output file (stdout when omitted)
    #[arg(long, short)]
    output: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct TocArgs {
    /// Input Markdown file, or `-` for stdin
    input: PathBuf,

    /// Print the whole document with the TOC spliced in, instead of the
    /// TOC block alone
    #[arg(long, default_value_t = false)]
    insert: bool,

    /// Output file (stdout when omitted)
    #[arg(long, short)]
    output: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct StatsArgs {
    /// Input Markdown file, or `-` for stdin
    input: PathBuf,

    /// Emit JSON instead of the text summary
    #[arg(long, default_value_t = false)]
    json: bool,
}

/// Sanitization policy toggles shared by export and render.
#[derive(Args, Debug, Clone, Copy, Default)]
struct PolicyArgs {
    /// Allow embedded iframes through sanitization
    #[arg(long, default_value_t = false)]
    allow_iframes: bool,

    /// Allow script elements and onerror/onload handlers
    #[arg(long, default_value_t = false)]
    allow_scripts: bool,

    /// Allow style elements and inline style attributes
    #[arg(long, default_value_t = false)]
    allow_styles: bool,
}

impl From<PolicyArgs> for SanitizePolicy {
    fn from(args: PolicyArgs) -> Self {
        Self {
            allow_iframes: args.allow_iframes,
            allow_scripts: args.allow_scripts,
            allow_styles: args.allow_styles,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum TemplateArg {
    Minimal,
    Blog,
    Readme,
    Custom,
}

impl From<TemplateArg> for TemplateId {
    fn from(arg: TemplateArg) -> Self {
        match arg {
            TemplateArg::Minimal => TemplateId::Minimal,
            TemplateArg::Blog => TemplateId::Blog,
            TemplateArg::Readme => TemplateId::Readme,
            TemplateArg::Custom => TemplateId::Custom,
        }
    }
}

impl fmt::Display for TemplateArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(TemplateId::from(*self).as_str())
    }
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum SyntaxThemeArg {
    Light,
    Dark,
}

impl From<SyntaxThemeArg> for SyntaxTheme {
    fn from(arg: SyntaxThemeArg) -> Self {
        match arg {
            SyntaxThemeArg::Light => SyntaxTheme::Light,
            SyntaxThemeArg::Dark => SyntaxTheme::Dark,
        }
    }
}

impl fmt::Display for SyntaxThemeArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SyntaxThemeArg::Light => "light",
            SyntaxThemeArg::Dark => "dark",
        })
    }
}

#[derive(Debug, Error)]
enum CliError {
    #[error("failed to read `{path}`: {source}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("failed to write `{path}`: {source}")]
    Write {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Export(#[from] ExportError),
    #[error("unknown starter `{0}`")]
    UnknownStarter(String),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Export(args) => run_export(args),
        Commands::Render(args) => run_render(args),
        Commands::Toc(args) => run_toc(args),
        Commands::Stats(args) => run_stats(args),
        Commands::Templates => {
            for row in registry() {
                println!("{}\t{}", row.id, row.name);
            }
            Ok(())
        }
        Commands::Starters { id } => run_starters(id),
    }
}

fn run_export(args: ExportArgs) -> Result<(), CliError> {
    let markdown = read_input(&args.input)?;
    let custom_css = match &args.custom_css {
        Some(path) => read_input(path)?,
        None => String::new(),
    };

    let options = TemplateOptions {
        title: args.title.clone(),
        description: args.description.clone(),
        theme_color: args.theme_color.clone(),
        include_syntax_highlighting: !args.no_highlight,
        syntax_theme: args.syntax_theme.into(),
        custom_css,
        minify: args.minify,
    };

    let request = ExportRequest::new(markdown, args.template.into())
        .with_options(options)
        .with_policy(args.policy.into());

    let document = export_document(&request)?;
    write_output(args.output.as_deref(), &document)
}

fn run_render(args: RenderArgs) -> Result<(), CliError> {
    let markdown = read_input(&args.input)?;
    let html = if args.no_sanitize {
        render_markdown(&markdown)
    } else {
        preview_fragment(&markdown, &args.policy.into())
    };
    write_output(args.output.as_deref(), &html)
}

fn run_toc(args: TocArgs) -> Result<(), CliError> {
    let markdown = read_input(&args.input)?;
    let output = if args.insert {
        insert_toc(&markdown)
    } else {
        generate_toc(&markdown)
    };
    write_output(args.output.as_deref(), &output)
}

fn run_stats(args: StatsArgs) -> Result<(), CliError> {
    let markdown = read_input(&args.input)?;
    let stats = DocumentStats::measure(&markdown);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        println!("words: {}", stats.words);
        println!("characters: {}", stats.characters);
        println!("lines: {}", stats.lines);
        println!("reading time: {} min", stats.reading_time_minutes);
    }
    Ok(())
}

fn run_starters(id: Option<String>) -> Result<(), CliError> {
    match id {
        Some(id) => {
            let document = starter(&id).ok_or(CliError::UnknownStarter(id))?;
            print!("{}", document.content);
            Ok(())
        }
        None => {
            for document in &STARTERS {
                println!("{}\t{}\t{}", document.id, document.name, document.description);
            }
            Ok(())
        }
    }
}

fn read_input(path: &Path) -> Result<String, CliError> {
    if path.as_os_str() == "-" {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .map_err(|source| CliError::Read {
                path: "stdin".to_string(),
                source,
            })?;
        return Ok(buffer);
    }

    fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.display().to_string(),
        source,
    })
}

fn write_output(path: Option<&Path>, contents: &str) -> Result<(), CliError> {
    match path {
        Some(path) => fs::write(path, contents).map_err(|source| CliError::Write {
            path: path.display().to_string(),
            source,
        }),
        None => {
            println!("{contents}");
            Ok(())
        }
    }
}
