//! Emoji handling for node markup.
//!
//! Two independent concerns live here:
//!
//! - [`convert_emojis`] rewrites every supplementary-plane code point into an
//!   `<img>` reference so the rendering surface does not depend on the
//!   viewer's emoji font.
//! - [`extract_category`] recognizes the emoji a title starts with and maps it
//!   to a [`Category`].
//!
//! Both operate on immutable tables and are safe to call concurrently.

use mindmap_core::category::Category;

const EMOJI_IMAGE_BASE: &str = "https://assets-cdn.github.com/images/icons/emoji";

const REDDIT_ICON: &str = "https://encrypted-tbn0.gstatic.com/images?q=tbn:ANd9GcTNpOQVZdTCyVamjJPl92KjaDHigNWVM8mOLHPRU4DHoVNJWxCg";

const STACK_EXCHANGE_ICON: &str =
    "https://cdn.sstatic.net/Sites/stackoverflow/company/img/logos/se/se-icon.png?v=93426798a1d4";

const OCTOPUS: char = '\u{1F419}';
const ROBOT: char = '\u{1F916}';
const CARD_INDEX_DIVIDERS: char = '\u{1F5C2}';

const VARIATION_SELECTOR: char = '\u{FE0F}';
const ZERO_WIDTH_JOINER: char = '\u{200D}';

/// Leading emoji recognized as category markers.
const CATEGORY_EMOJI: &[(char, Category)] = &[
    ('\u{1F4D6}', Category::Article),
    ('\u{1F4F0}', Category::Article),
    ('\u{1F4DA}', Category::Book),
    ('\u{1F4D7}', Category::Book),
    ('\u{1F393}', Category::Course),
    ('\u{1F4AC}', Category::Discussion),
    (OCTOPUS, Category::Github),
    ('\u{1F5BC}', Category::Image),
    ('\u{1F4C4}', Category::Paper),
    ('\u{1F3A7}', Category::Podcast),
    (ROBOT, Category::Reddit),
    (CARD_INDEX_DIVIDERS, Category::StackExchange),
    ('\u{1F527}', Category::Tool),
    ('\u{1F6E0}', Category::Tool),
    ('\u{1F3A5}', Category::Video),
    ('\u{1F4FA}', Category::Video),
];

/// Returns the `<img>` markup for a standard emoji code.
fn unicode_image(code: &str) -> String {
    format!(r#"<img class="mindmap-emoji" src="{EMOJI_IMAGE_BASE}/unicode/{code}.png">"#)
}

/// Returns the `<img>` markup for a named emoji image.
fn named_image(name: &str) -> String {
    format!(r#"<img class="mindmap-emoji" src="{EMOJI_IMAGE_BASE}/{name}.png">"#)
}

/// Image substitutions that bypass the generic decoding.
fn special_image(emoji: char) -> Option<String> {
    match emoji {
        OCTOPUS => Some(named_image("octocat")),
        ROBOT => Some(format!(
            r#"<img class="mindmap-emoji reddit-emoji" src="{REDDIT_ICON}">"#
        )),
        CARD_INDEX_DIVIDERS => Some(format!(
            r#"<img class="mindmap-emoji" src="{STACK_EXCHANGE_ICON}">"#
        )),
        _ => None,
    }
}

/// Returns the image code of a supplementary-plane code point.
///
/// The code is the 20-bit surrogate payload (`code point - 0x10000`) in
/// lower-case hex without padding, prefixed with `1`. For the emoji plane
/// (U+1xxxx) this is exactly the standard hex form of the code point.
fn emoji_code(emoji: char) -> String {
    let payload = u32::from(emoji) - 0x1_0000;
    format!("1{payload:x}")
}

/// Rewrites every code point above the Basic Multilingual Plane into an
/// embeddable emoji image.
///
/// Octopus, robot and card index dividers map to fixed named icons; all
/// other code points use the standard unicode image template. Characters in
/// the Basic Multilingual Plane, markup included, are left untouched.
///
/// # Examples
///
/// ```
/// # use mindmap_parser::emoji::convert_emojis;
/// let html = convert_emojis("<p>\u{1F4D6} Docs</p>");
/// assert_eq!(
///     html,
///     "<p><img class=\"mindmap-emoji\" \
///      src=\"https://assets-cdn.github.com/images/icons/emoji/unicode/1f4d6.png\"> Docs</p>"
/// );
/// ```
pub fn convert_emojis(html: &str) -> String {
    let mut converted = String::with_capacity(html.len());
    for c in html.chars() {
        if u32::from(c) > 0xFFFF {
            match special_image(c) {
                Some(image) => converted.push_str(&image),
                None => converted.push_str(&unicode_image(&emoji_code(c))),
            }
        } else {
            converted.push(c);
        }
    }
    converted
}

fn is_emoji(c: char) -> bool {
    u32::from(c) > 0xFFFF || ('\u{2600}'..='\u{27BF}').contains(&c)
}

fn continues_emoji_run(c: char) -> bool {
    is_emoji(c) || c == VARIATION_SELECTOR || c == ZERO_WIDTH_JOINER
}

fn category_of(emoji: char) -> Option<Category> {
    CATEGORY_EMOJI
        .iter()
        .find(|(candidate, _)| *candidate == emoji)
        .map(|(_, category)| *category)
}

/// Splits a recognized category emoji off the start of `text`.
///
/// When `text` starts with an emoji from the category table, returns the
/// category and the text with the whole leading emoji run (including
/// variation selectors and joiners) removed and trimmed. Otherwise returns
/// `None` and the text unchanged.
///
/// # Examples
///
/// ```
/// # use mindmap_parser::emoji::extract_category;
/// # use mindmap_core::category::Category;
/// let (category, text) = extract_category("\u{1F419} Ship it");
/// assert_eq!(category, Some(Category::Github));
/// assert_eq!(text, "Ship it");
///
/// let (category, text) = extract_category("Plain title");
/// assert_eq!(category, None);
/// assert_eq!(text, "Plain title");
/// ```
pub fn extract_category(text: &str) -> (Option<Category>, String) {
    let candidate = text.trim_start();
    let Some(first) = candidate.chars().next().filter(|c| is_emoji(*c)) else {
        return (None, text.to_string());
    };
    let Some(category) = category_of(first) else {
        return (None, text.to_string());
    };

    let rest = candidate.trim_start_matches(continues_emoji_run);
    (Some(category), rest.trim().to_string())
}
