//! Content extraction for whole nodes and connections.

use mindmap_core::{archive::ParsedNode, document::RawConnection, document::RawNode};

use crate::{
    emoji::extract_category,
    markup::{extract_text, extract_url},
};

/// Boilerplate appended to notes by the map authors. Both spellings occur in
/// published maps.
const NOTE_BOILERPLATE: [&str; 2] = [
    "if you think this can be improved in any way  please say",
    "if you think this can be improved in any way please say",
];

/// Parses the content of a single node.
///
/// - `text` is the extracted title text with a recognized category emoji
///   removed
/// - `url` is the first hyperlink target in the title
/// - `note` is the extracted note text with the boilerplate phrase removed,
///   present whenever the node has a note
/// - `position` is the node location, unchanged
///
/// # Examples
///
/// ```
/// # use mindmap_core::{document::RawNode, geometry::Point, category::Category};
/// # use mindmap_parser::parse_node;
/// let raw = RawNode::new(
///     "1",
///     "<p><a href=\"https://github.com/rust-lang/rust\">\u{1F419} rust</a></p>",
///     Point::new(4.0, 2.0),
/// );
/// let node = parse_node(&raw);
/// assert_eq!(node.text(), "rust");
/// assert_eq!(node.category(), Some(Category::Github));
/// assert_eq!(node.url(), Some("https://github.com/rust-lang/rust"));
/// ```
pub fn parse_node(raw: &RawNode) -> ParsedNode {
    let title = raw.title_markup();
    let (category, text) = extract_category(&extract_text(title));
    let note = raw
        .note_markup()
        .map(|markup| strip_boilerplate(&extract_text(markup)));

    ParsedNode::new(text, raw.location())
        .with_url(extract_url(title))
        .with_note(note)
        .with_category(category)
}

/// Returns the label of a connection.
///
/// `None` when the connection has no title or its title markup is empty;
/// otherwise the extracted text, which may itself be empty.
pub fn connection_text(raw: &RawConnection) -> Option<String> {
    raw.title_markup()
        .filter(|markup| !markup.is_empty())
        .map(extract_text)
}

fn strip_boilerplate(note: &str) -> String {
    NOTE_BOILERPLATE
        .iter()
        .fold(note.to_string(), |note, phrase| note.replacen(phrase, "", 1))
}

#[cfg(test)]
mod tests {
    use mindmap_core::{category::Category, geometry::Point};

    use super::*;

    #[test]
    fn test_parse_node_plain() {
        let raw = RawNode::new("1", "<p>Rust</p>", Point::new(1.0, 2.0));
        let node = parse_node(&raw);

        assert_eq!(node.text(), "Rust");
        assert_eq!(node.url(), None);
        assert_eq!(node.note(), None);
        assert_eq!(node.category(), None);
        assert_eq!(node.position(), Point::new(1.0, 2.0));
    }

    #[test]
    fn test_parse_node_note_boilerplate_removed() {
        let raw = RawNode::new("1", "<p>Rust</p>", Point::default()).with_note(
            "<p>Great intro. if you think this can be improved in any way  please say thanks</p>",
        );
        let node = parse_node(&raw);
        assert_eq!(node.note(), Some("Great intro.  thanks"));
    }

    #[test]
    fn test_parse_node_note_single_space_boilerplate() {
        let raw = RawNode::new("1", "<p>Rust</p>", Point::default())
            .with_note("<p>if you think this can be improved in any way please say</p>");
        let node = parse_node(&raw);
        assert_eq!(node.note(), Some(""));
    }

    #[test]
    fn test_parse_node_note_present_but_empty() {
        let raw = RawNode::new("1", "<p>Rust</p>", Point::default()).with_note("no tags");
        let node = parse_node(&raw);
        assert_eq!(node.note(), Some(""));
    }

    #[test]
    fn test_parse_node_category_only_from_text() {
        let raw = RawNode::new("1", "<p>\u{1F4D6} The Book</p>", Point::default())
            .with_note("<p>\u{1F3A5} not a category</p>");
        let node = parse_node(&raw);

        assert_eq!(node.text(), "The Book");
        assert_eq!(node.category(), Some(Category::Article));
        assert_eq!(node.note(), Some("\u{1F3A5} not a category"));
    }

    #[test]
    fn test_connection_text() {
        let curve = Point::default();
        let untitled = RawConnection::new("1", "2", curve);
        let empty = RawConnection::new("1", "2", curve).with_title("");
        let titled = RawConnection::new("1", "2", curve).with_title("<p>uses</p>");
        let tagless = RawConnection::new("1", "2", curve).with_title("uses");

        assert_eq!(connection_text(&untitled), None);
        assert_eq!(connection_text(&empty), None);
        assert_eq!(connection_text(&titled).as_deref(), Some("uses"));
        assert_eq!(connection_text(&tagless).as_deref(), Some(""));
    }
}
