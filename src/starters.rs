//! Bundled starter documents for new-document flows.
//!
//! These are whole Markdown documents, not presentation templates: a caller
//! seeds an editor buffer with one, then the normal pipeline takes over.
//! Contents live under `content/starters/` and are embedded at compile time.

use serde::Serialize;

/// Editorial grouping used by pickers that browse the starter library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StarterCategory {
    Blog,
    Documentation,
    Readme,
    Article,
    Other,
}

/// A starter document and its picker metadata.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct StarterDocument {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub category: StarterCategory,
    pub content: &'static str,
}

pub const STARTERS: [StarterDocument; 6] = [
    StarterDocument {
        id: "blog-post",
        name: "Blog Post",
        description: "A complete blog post template with title, meta, and sections",
        category: StarterCategory::Blog,
        content: include_str!("../content/starters/blog-post.md"),
    },
    StarterDocument {
        id: "readme",
        name: "README",
        description: "Professional README template for GitHub projects",
        category: StarterCategory::Readme,
        content: include_str!("../content/starters/readme.md"),
    },
    StarterDocument {
        id: "documentation",
        name: "Documentation",
        description: "Structured documentation template",
        category: StarterCategory::Documentation,
        content: include_str!("../content/starters/documentation.md"),
    },
    StarterDocument {
        id: "article",
        name: "Article",
        description: "Long-form article template",
        category: StarterCategory::Article,
        content: include_str!("../content/starters/article.md"),
    },
    StarterDocument {
        id: "meeting-notes",
        name: "Meeting Notes",
        description: "Template for meeting notes and minutes",
        category: StarterCategory::Other,
        content: include_str!("../content/starters/meeting-notes.md"),
    },
    StarterDocument {
        id: "release-notes",
        name: "Release Notes",
        description: "Template for software release notes",
        category: StarterCategory::Other,
        content: include_str!("../content/starters/release-notes.md"),
    },
];

/// Look up a starter document by id.
pub fn starter(id: &str) -> Option<&'static StarterDocument> {
    STARTERS.iter().find(|document| document.id == id)
}

/// All starter documents in the given category, in registry order.
pub fn starters_in_category(category: StarterCategory) -> Vec<&'static StarterDocument> {
    STARTERS
        .iter()
        .filter(|document| document.category == category)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{STARTERS, StarterCategory, starter, starters_in_category};

    #[test]
    fn ids_are_unique_and_contents_nonempty() {
        for (idx, document) in STARTERS.iter().enumerate() {
            assert!(!document.content.trim().is_empty(), "{} is empty", document.id);
            assert!(
                STARTERS[idx + 1..].iter().all(|other| other.id != document.id),
                "duplicate id {}",
                document.id
            );
        }
    }

    #[test]
    fn lookup_finds_known_ids() {
        assert_eq!(starter("blog-post").map(|d| d.name), Some("Blog Post"));
        assert!(starter("missing").is_none());
    }

    #[test]
    fn category_filter_groups_the_other_bucket() {
        let other = starters_in_category(StarterCategory::Other);
        let ids: Vec<_> = other.iter().map(|d| d.id).collect();
        assert_eq!(ids, ["meeting-notes", "release-notes"]);
    }

    #[test]
    fn starters_begin_with_a_top_level_heading() {
        for document in &STARTERS {
            assert!(
                document.content.starts_with("# "),
                "{} should open with a heading",
                document.id
            );
        }
    }
}
