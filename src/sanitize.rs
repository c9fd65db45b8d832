//! HTML sanitization: the trust boundary between rendered author input and
//! any DOM it is injected into.
//!
//! The renderer passes raw HTML through on purpose, so every fragment must
//! cross this module before display. Cleaning operates on a parsed node
//! tree (ammonia over html5ever), which holds up against tag-fragmentation
//! and encoding tricks that defeat textual filters. Elements outside the
//! allow-list are unwrapped and their text content re-parented into the
//! surrounding context. `script` and `style` are the exception: under a
//! denying policy their contents are dropped outright, since "keep content"
//! would promote code to visible (or parseable) text.

use std::collections::{HashMap, HashSet};

use ammonia::Builder;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Baseline element allow-list applied under every policy: structural,
/// text-formatting, and table markup only.
const ALLOWED_TAGS: [&str; 41] = [
    "p", "br", "strong", "em", "u", "s", "h1", "h2", "h3", "h4", "h5", "h6", "ul", "ol", "li",
    "blockquote", "pre", "code", "a", "img", "table", "thead", "tbody", "tr", "th", "td", "hr",
    "del", "ins", "sub", "sup", "dl", "dt", "dd", "div", "span", "kbd", "mark", "abbr", "details",
    "summary",
];

/// Baseline attribute allow-list, permitted on any kept element. `data-*`
/// attributes are additionally allowed by prefix.
const ALLOWED_ATTRIBUTES: [&str; 13] = [
    "href", "src", "alt", "title", "class", "id", "width", "height", "target", "rel", "colspan",
    "rowspan", "align",
];

const ALLOWED_URL_SCHEMES: [&str; 4] = ["http", "https", "mailto", "tel"];

/// Per-call sanitization policy. Every toggle defaults to deny; enabling one
/// widens the allow-list for exactly that feature and nothing else.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SanitizePolicy {
    /// Permit `iframe` elements plus their embedding attributes
    /// (`allow`, `allowfullscreen`, `frameborder`, `sandbox`).
    pub allow_iframes: bool,
    /// Permit executable `script` elements plus the `onerror`/`onload`
    /// handler attributes. This genuinely opts into executable content.
    pub allow_scripts: bool,
    /// Permit `style` elements and inline `style` attributes.
    pub allow_styles: bool,
}

impl SanitizePolicy {
    /// The safe-by-default policy: frames, scripts, and styles all denied.
    pub const DENY_ALL: Self = Self {
        allow_iframes: false,
        allow_scripts: false,
        allow_styles: false,
    };
}

static DEFAULT_CLEANER: Lazy<Builder<'static>> =
    Lazy::new(|| build_cleaner(&SanitizePolicy::DENY_ALL));

/// Filter an HTML fragment down to the elements and attributes the policy
/// permits.
///
/// Idempotent for any fixed policy: cleaning already-clean markup is a
/// no-op. The output is safe to inject into a live DOM without further
/// escaping, under the guarantees of the policy that produced it.
pub fn sanitize_html(html: &str, policy: &SanitizePolicy) -> String {
    if *policy == SanitizePolicy::DENY_ALL {
        return DEFAULT_CLEANER.clean(html).to_string();
    }
    build_cleaner(policy).clean(html).to_string()
}

/// Capability probe for callers that gate display on sanitizer presence.
///
/// Engines that borrow the host environment's DOM degrade to a passthrough
/// in headless contexts and push re-sanitization onto the caller before
/// anything is displayed. This engine embeds its own HTML parser, so the
/// probe is constantly `true` and that deferred-sanitization path can never
/// silently activate; the function remains so environment checks stay
/// explicit at call sites rather than assumed.
pub const fn sanitizer_available() -> bool {
    true
}

fn build_cleaner(policy: &SanitizePolicy) -> Builder<'static> {
    let mut tags: HashSet<&'static str> = ALLOWED_TAGS.into_iter().collect();
    let mut attributes: HashSet<&'static str> = ALLOWED_ATTRIBUTES.into_iter().collect();

    let mut builder = Builder::default();

    if policy.allow_iframes {
        tags.insert("iframe");
        attributes.extend(["allow", "allowfullscreen", "frameborder", "sandbox"]);
    }
    if policy.allow_scripts {
        tags.insert("script");
        builder.rm_clean_content_tags(&["script"]);
        attributes.extend(["onerror", "onload"]);
    }
    if policy.allow_styles {
        tags.insert("style");
        builder.rm_clean_content_tags(&["style"]);
        attributes.insert("style");
    }

    builder.tags(tags);
    builder.tag_attributes(HashMap::new());
    builder.generic_attributes(attributes);
    builder.add_generic_attribute_prefixes(&["data-"]);
    builder.url_schemes(ALLOWED_URL_SCHEMES.into_iter().collect());
    // `rel` is caller-controlled via the attribute allow-list, which rules
    // out ammonia's automatic link-rel injection.
    builder.link_rel(None);

    builder
}
