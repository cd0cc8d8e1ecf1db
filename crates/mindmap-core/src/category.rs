//! Resource categories a node can be tagged with.
//!
//! Maps mark the kind of resource a node points at by prefixing its title
//! with an emoji. The emoji-to-category table lives in the parser crate; this
//! module only defines the closed set of categories the archival output can
//! carry.

use std::fmt;

use serde::Serialize;

/// Category derived from a node's leading emoji.
///
/// Serializes as a lowercase string (`"article"`, `"github"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Article,
    Book,
    Course,
    Discussion,
    Github,
    Image,
    Paper,
    Podcast,
    Reddit,
    StackExchange,
    Tool,
    Video,
}

impl Category {
    /// Returns the serialized name of this category.
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Article => "article",
            Category::Book => "book",
            Category::Course => "course",
            Category::Discussion => "discussion",
            Category::Github => "github",
            Category::Image => "image",
            Category::Paper => "paper",
            Category::Podcast => "podcast",
            Category::Reddit => "reddit",
            Category::StackExchange => "stackexchange",
            Category::Tool => "tool",
            Category::Video => "video",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
