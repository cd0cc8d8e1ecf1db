//! Extraction of plain content from node markup.
//!
//! Node titles and notes arrive as small HTML fragments (`<p>`, `<a>`, inline
//! `style` attributes). These functions pull out the parts the outputs need.
//! Every function is pure: patterns are compiled once and shared, but no scan
//! position survives between calls, so extraction is safe to call re-entrantly
//! and from several threads.
//!
//! Nested or malformed markup is handled best effort: only the innermost run
//! of text without angle brackets inside a tag pair is matched.

use std::sync::OnceLock;

use regex::Regex;

const ANCHOR_TEXT_PATTERN: &str = r"<a\b[^>]*>([^<>]*)</a>";
const PARAGRAPH_TEXT_PATTERN: &str = r"<p\b[^>]*>([^<>]*)</p>";
const HREF_PATTERN: &str = r#"<a\b[^>]*?\bhref\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'>]+))"#;
const STYLE_PATTERN: &str = r#"style="[^"]*"|style='[^']*'"#;
const LINE_BREAK_PATTERN: &str = r"(?i)<br\s*/?>|</p>";
const IMAGE_PATTERN: &str = r"(?i)<img\b[^>]*>";
const TAG_PATTERN: &str = r"<[^>]*>";

fn anchor_text_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(ANCHOR_TEXT_PATTERN).expect("anchor pattern is valid"))
}

fn paragraph_text_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(PARAGRAPH_TEXT_PATTERN).expect("paragraph pattern is valid"))
}

fn href_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(HREF_PATTERN).expect("href pattern is valid"))
}

fn style_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(STYLE_PATTERN).expect("style pattern is valid"))
}

/// Returns the display text of a markup fragment.
///
/// Collects the inner text of every `<a>` element in document order. When
/// the fragment has no anchors, collects every `<p>` element instead. Runs
/// are joined by a single space. A fragment with neither yields an empty
/// string.
///
/// # Examples
///
/// ```
/// # use mindmap_parser::markup::extract_text;
/// assert_eq!(extract_text("<a href='x'>Hello</a>"), "Hello");
/// assert_eq!(extract_text("<p>World</p>"), "World");
/// assert_eq!(extract_text("plain"), "");
/// ```
pub fn extract_text(markup: &str) -> String {
    let anchors = collect_runs(anchor_text_regex(), markup);
    let runs = if anchors.is_empty() {
        collect_runs(paragraph_text_regex(), markup)
    } else {
        anchors
    };
    runs.join(" ")
}

fn collect_runs<'h>(regex: &Regex, markup: &'h str) -> Vec<&'h str> {
    regex
        .captures_iter(markup)
        .filter_map(|caps| caps.get(1))
        .map(|run| run.as_str())
        .collect()
}

/// Returns the target of the first hyperlink in a markup fragment.
///
/// # Examples
///
/// ```
/// # use mindmap_parser::markup::extract_url;
/// let markup = r#"<p><a href="https://www.rust-lang.org">Rust</a></p>"#;
/// assert_eq!(extract_url(markup).as_deref(), Some("https://www.rust-lang.org"));
/// assert_eq!(extract_url("<p>no link</p>"), None);
/// ```
pub fn extract_url(markup: &str) -> Option<String> {
    let caps = href_regex().captures(markup)?;
    (1..=3)
        .find_map(|group| caps.get(group))
        .map(|target| target.as_str().to_string())
}

/// Removes every `style="…"` and `style='…'` attribute from markup.
///
/// Nothing else is touched, including the whitespace that preceded the
/// attribute. The result never contains a style attribute, so applying the
/// function again is a no-op.
///
/// # Examples
///
/// ```
/// # use mindmap_parser::markup::strip_style_attributes;
/// let markup = r#"<p style="color: red">Hi</p>"#;
/// assert_eq!(strip_style_attributes(markup), "<p >Hi</p>");
/// ```
pub fn strip_style_attributes(markup: &str) -> String {
    let regex = style_regex();
    let mut stripped = regex.replace_all(markup, "").into_owned();
    // Removing one attribute can splice the text around it into a new one.
    while regex.is_match(&stripped) {
        stripped = regex.replace_all(&stripped, "").into_owned();
    }
    stripped
}

/// Reduces markup to the text a renderer would lay out.
///
/// Line breaks and paragraph ends become newlines, each image counts as a
/// single `M`-wide glyph, every other tag is dropped, and the common HTML
/// entities are decoded.
pub fn visible_text(markup: &str) -> String {
    static LINE_BREAK: OnceLock<Regex> = OnceLock::new();
    static IMAGE: OnceLock<Regex> = OnceLock::new();
    static TAG: OnceLock<Regex> = OnceLock::new();

    let line_break = LINE_BREAK
        .get_or_init(|| Regex::new(LINE_BREAK_PATTERN).expect("line break pattern is valid"));
    let image = IMAGE.get_or_init(|| Regex::new(IMAGE_PATTERN).expect("image pattern is valid"));
    let tag = TAG.get_or_init(|| Regex::new(TAG_PATTERN).expect("tag pattern is valid"));

    let text = line_break.replace_all(markup, "\n");
    let text = image.replace_all(&text, "M");
    let text = tag.replace_all(&text, "");

    decode_entities(text.trim_end_matches('\n'))
}

fn decode_entities(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}
