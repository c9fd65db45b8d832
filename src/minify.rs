//! Best-effort whitespace minification for exported documents.

/// Collapse whitespace runs to single spaces and remove the remaining gaps
/// between adjacent tags.
///
/// This is a lossy size reduction, not a correctness-preserving minifier:
/// whitespace inside `<pre>` blocks collapses like everything else. It is
/// meant for the tail of the export pipeline (sanitize, then template, then
/// minify) and must never run before sanitization.
pub fn minify_html(html: &str) -> String {
    let mut collapsed = String::with_capacity(html.len());
    let mut in_whitespace = false;

    for ch in html.chars() {
        if ch.is_whitespace() {
            if !in_whitespace {
                collapsed.push(' ');
            }
            in_whitespace = true;
        } else {
            collapsed.push(ch);
            in_whitespace = false;
        }
    }

    // Runs are single spaces now, so inter-tag gaps are exactly "> <".
    collapsed.replace("> <", "><").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::minify_html;

    #[test]
    fn collapses_runs_and_inter_tag_gaps() {
        let html = "<p>  a  </p>\n\n<p>b</p>";
        assert_eq!(minify_html(html), "<p> a </p><p>b</p>");
    }

    #[test]
    fn preserves_text_content_beyond_whitespace() {
        let html = "<ul>\n  <li>one</li>\n  <li>two  three</li>\n</ul>";
        assert_eq!(minify_html(html), "<ul><li>one</li><li>two three</li></ul>");
    }

    #[test]
    fn trims_document_edges() {
        assert_eq!(minify_html("  <p>x</p>  "), "<p>x</p>");
    }

    #[test]
    fn empty_input_stays_empty() {
        assert_eq!(minify_html(""), "");
    }

    #[test]
    fn adjacent_tag_chains_collapse_fully() {
        let html = "<div> <span> <em>x</em> </span> </div>";
        assert_eq!(minify_html(html), "<div><span><em>x</em></span></div>");
    }
}
