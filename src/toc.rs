//! Heading extraction and table-of-contents generation over raw Markdown.
//!
//! Everything here operates on the Markdown source, never on rendered HTML:
//! the generated TOC block is spliced back into the document before the
//! render pipeline runs, so its links resolve like any other author-written
//! anchors. Slugs are deterministic; two headings with the same text produce
//! the same slug, and the resulting duplicate anchors are a documented
//! limitation rather than something this module disambiguates.

use std::ops::Range;

const TOC_HEADER: &str = "## Table of Contents";

/// A heading scanned from Markdown source, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadingEntry {
    /// Heading depth, 1 through 6.
    pub level: u8,
    /// Display text with surrounding whitespace removed.
    pub text: String,
    /// Anchor id derived from the text via [`heading_slug`].
    pub id: String,
}

/// Scan line-anchored ATX headings (`#` through `######`).
///
/// The scan is purely line-based and does not track fenced code blocks, so a
/// `# comment` line inside a fence is extracted too. Editors that inherited
/// this behavior rely on it staying put.
pub fn extract_headings(markdown: &str) -> Vec<HeadingEntry> {
    markdown.lines().filter_map(parse_heading_line).collect()
}

fn parse_heading_line(line: &str) -> Option<HeadingEntry> {
    let level = line.bytes().take_while(|b| *b == b'#').count();
    if level == 0 || level > 6 {
        return None;
    }

    let rest = &line[level..];
    let mut chars = rest.chars();
    // The marker must be followed by whitespace and then at least one more
    // character, even another space.
    if !chars.next().is_some_and(char::is_whitespace) || chars.next().is_none() {
        return None;
    }

    let text = rest.trim().to_string();
    let id = heading_slug(&text);
    Some(HeadingEntry {
        level: level as u8,
        text,
        id,
    })
}

/// Derive a deterministic anchor slug from heading text.
///
/// Lowercases, strips characters outside ASCII word characters, whitespace,
/// and hyphens, turns whitespace runs into single hyphens, and collapses
/// hyphen runs. `"Crate & Module"` becomes `"crate-module"`; non-ASCII
/// letters are dropped rather than transliterated.
pub fn heading_slug(text: &str) -> String {
    let lowered = text.to_lowercase();
    let filtered: String = lowered
        .chars()
        .filter(|ch| {
            ch.is_ascii_alphanumeric() || *ch == '_' || *ch == '-' || ch.is_whitespace()
        })
        .collect();

    let mut hyphenated = String::with_capacity(filtered.len());
    let mut in_whitespace = false;
    for ch in filtered.chars() {
        if ch.is_whitespace() {
            if !in_whitespace {
                hyphenated.push('-');
            }
            in_whitespace = true;
        } else {
            hyphenated.push(ch);
            in_whitespace = false;
        }
    }

    let mut slug = String::with_capacity(hyphenated.len());
    let mut in_hyphen = false;
    for ch in hyphenated.chars() {
        if ch == '-' {
            if !in_hyphen {
                slug.push('-');
            }
            in_hyphen = true;
        } else {
            slug.push(ch);
            in_hyphen = false;
        }
    }
    slug
}

/// Build a `## Table of Contents` block for the document, or the empty
/// string when the document has no headings.
///
/// Each heading becomes a bullet link indented two spaces per level beyond
/// the first; the block ends with a `---` separator so it reads as a
/// self-contained section when spliced into a document.
pub fn generate_toc(markdown: &str) -> String {
    let headings = extract_headings(markdown);
    if headings.is_empty() {
        return String::new();
    }

    let mut toc = String::from("## Table of Contents\n\n");
    for heading in &headings {
        let indent = "  ".repeat(usize::from(heading.level.saturating_sub(1)));
        toc.push_str(&format!("{indent}- [{}](#{})\n", heading.text, heading.id));
    }
    toc.push_str("\n---\n\n");
    toc
}

/// Splice a generated TOC into the Markdown source.
///
/// A previously generated block, recognized by its `## Table of Contents`
/// header at the start of a line, is replaced in place, and the headings
/// inside it are excluded from regeneration so repeated insertion converges.
/// Without an existing block the TOC is prepended. Documents with no
/// headings come back with any stale block removed and nothing added.
pub fn insert_toc(markdown: &str) -> String {
    match find_toc_block(markdown) {
        Some(range) => {
            let mut stripped = String::with_capacity(markdown.len());
            stripped.push_str(&markdown[..range.start]);
            stripped.push_str(&markdown[range.end..]);

            let toc = generate_toc(&stripped);
            let mut result = String::with_capacity(stripped.len() + toc.len());
            result.push_str(&markdown[..range.start]);
            result.push_str(&toc);
            result.push_str(&markdown[range.end..]);
            result
        }
        None => {
            let toc = generate_toc(markdown);
            if toc.is_empty() {
                return markdown.to_string();
            }
            format!("{toc}{markdown}")
        }
    }
}

/// Locate a previously generated TOC block: the header line through its
/// `---` separator (plus the blank line after it), or up to the next heading
/// when the separator is missing.
fn find_toc_block(markdown: &str) -> Option<Range<usize>> {
    let start = find_line_start(markdown, TOC_HEADER)?;
    let after_header = start + TOC_HEADER.len();
    let tail = &markdown[after_header..];

    if let Some(separator) = tail.find("\n---\n") {
        let mut end = after_header + separator + "\n---\n".len();
        if markdown[end..].starts_with('\n') {
            end += 1;
        }
        return Some(start..end);
    }

    for (idx, _) in tail.match_indices('\n') {
        let line = &tail[idx + 1..];
        if line.starts_with("# ") || line.starts_with("## ") {
            return Some(start..after_header + idx + 1);
        }
    }
    Some(start..markdown.len())
}

fn find_line_start(haystack: &str, needle: &str) -> Option<usize> {
    if haystack.starts_with(needle) {
        return Some(0);
    }
    haystack
        .match_indices('\n')
        .map(|(idx, _)| idx + 1)
        .find(|&idx| haystack[idx..].starts_with(needle))
}
