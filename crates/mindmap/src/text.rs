//! Text measurement with cosmic-text.
//!
//! [`TextMeasurer`] is the default [`Measure`] implementation. It reduces
//! node markup to the text a renderer would lay out, shapes it with real font
//! metrics, and reports the resulting block size. Each style class it knows
//! maps to a [`TextStyle`]; measuring under an unregistered class fails.

use std::{
    collections::HashMap,
    sync::{Mutex, OnceLock},
};

use cosmic_text::{Attrs, Buffer, Family, FontSystem, Metrics, Shaping};
use log::{debug, info};

use mindmap_core::{
    geometry::Size,
    measure::{Measure, MeasureConstraints, MeasureError},
};
use mindmap_parser::markup::visible_text;

use crate::config::{AppConfig, MeasureConfig};

/// Points to pixels at standard DPI.
const POINTS_TO_PIXELS: f32 = 1.33;

/// Average glyph advance, relative to the font size, used when shaping yields no runs.
const FALLBACK_ADVANCE: f32 = 0.55;

/// Font settings for one style class.
#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    font_family: String,
    font_size: u16,
    line_height: f32,
}

impl TextStyle {
    /// Creates a style with a line height of 1.15.
    ///
    /// # Arguments
    ///
    /// * `font_family` - Font family name, or one of the generic families
    ///   `sans-serif`, `serif` and `monospace`
    /// * `font_size` - Font size in points
    pub fn new(font_family: impl Into<String>, font_size: u16) -> Self {
        Self {
            font_family: font_family.into(),
            font_size,
            line_height: 1.15,
        }
    }

    /// Sets the line height as a multiple of the font size.
    pub fn with_line_height(mut self, line_height: f32) -> Self {
        self.line_height = line_height;
        self
    }

    pub fn font_family(&self) -> &str {
        &self.font_family
    }

    pub fn font_size(&self) -> u16 {
        self.font_size
    }

    pub fn line_height(&self) -> f32 {
        self.line_height
    }

    fn family(&self) -> Family<'_> {
        match self.font_family.as_str() {
            "sans-serif" => Family::SansSerif,
            "serif" => Family::Serif,
            "monospace" => Family::Monospace,
            name => Family::Name(name),
        }
    }
}

impl From<&MeasureConfig> for TextStyle {
    fn from(config: &MeasureConfig) -> Self {
        Self::new(config.font_family(), config.font_size()).with_line_height(config.line_height())
    }
}

/// Measures node markup using real font metrics.
///
/// The font database is loaded on first use and reused by every later
/// measurement. Measurements are serialized on it, so a `TextMeasurer` can
/// be shared between threads.
///
/// # Examples
///
/// ```
/// # use mindmap::text::{TextMeasurer, TextStyle};
/// # use mindmap::measure::{Measure, MeasureConstraints};
/// let measurer = TextMeasurer::new().with_style("mindmap-node", TextStyle::new("sans-serif", 14));
///
/// let size = measurer
///     .measure("<p>Hello</p>", &MeasureConstraints::new(Some(200.0)), "mindmap-node")
///     .unwrap();
/// assert!(size.height() > 0.0);
///
/// assert!(measurer.measure("<p>Hello</p>", &MeasureConstraints::default(), "other").is_err());
/// ```
#[derive(Debug, Default)]
pub struct TextMeasurer {
    styles: HashMap<String, TextStyle>,
    font_system: OnceLock<Mutex<FontSystem>>,
}

impl TextMeasurer {
    /// Creates a measurer with no registered style classes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a measurer that knows the node style class of `config`.
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new().with_style(config.graph().style_class(), config.measure().into())
    }

    /// Registers the style used for `class`, replacing any earlier one.
    pub fn with_style(mut self, class: impl Into<String>, style: TextStyle) -> Self {
        self.styles.insert(class.into(), style);
        self
    }

    /// Returns the style registered for `class`.
    pub fn style(&self, class: &str) -> Option<&TextStyle> {
        self.styles.get(class)
    }

    fn font_system(&self) -> &Mutex<FontSystem> {
        self.font_system.get_or_init(|| {
            info!("Initializing FontSystem");
            Mutex::new(FontSystem::new())
        })
    }

    /// Lays out plain text and returns the size of the block.
    ///
    /// Lines wrap at `max_width` when it is given, otherwise only at explicit
    /// line breaks.
    fn layout(
        &self,
        text: &str,
        style: &TextStyle,
        max_width: Option<f32>,
    ) -> Result<Size, MeasureError> {
        if text.is_empty() {
            return Ok(Size::default());
        }

        let mut font_system = self
            .font_system()
            .lock()
            .map_err(|_| MeasureError::Layout("font system lock poisoned".to_string()))?;

        let font_size_px = f32::from(style.font_size()) * POINTS_TO_PIXELS;
        let metrics = Metrics::new(font_size_px, font_size_px * style.line_height());

        let mut buffer = Buffer::new(&mut font_system, metrics);
        let mut buffer = buffer.borrow_with(&mut font_system);

        let attrs = Attrs::new().family(style.family());

        buffer.set_size(max_width, None);
        buffer.set_text(text, &attrs, Shaping::Advanced, None);
        buffer.shape_until_scroll(true);

        let mut width: f32 = 0.0;
        let mut height: f32 = 0.0;

        let layout_runs: Vec<_> = buffer.layout_runs().collect();
        if layout_runs.is_empty() {
            width = text.chars().count() as f32 * font_size_px * FALLBACK_ADVANCE;
            if let Some(max_width) = max_width {
                width = width.min(max_width);
            }
            height = metrics.line_height;
        } else {
            for run in &layout_runs {
                if let Some(last) = run.glyphs.last() {
                    width = width.max(last.x + last.w);
                }
                height += metrics.line_height;
            }
        }

        Ok(Size::new(width, height))
    }
}

impl Measure for TextMeasurer {
    fn measure(
        &self,
        markup: &str,
        constraints: &MeasureConstraints,
        style_class: &str,
    ) -> Result<Size, MeasureError> {
        let style = self
            .style(style_class)
            .ok_or_else(|| MeasureError::UnknownStyle(style_class.to_string()))?;

        let text = visible_text(markup);
        let max_width = constraints.max_width().map(|width| width as f32);
        let size = self.layout(&text, style, max_width)?;

        debug!(
            style_class,
            width = size.width(),
            height = size.height();
            "Measured node markup"
        );
        Ok(size)
    }
}
