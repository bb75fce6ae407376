//! Text nodes: style, measurement, and the in-place edit overlay.
//!
//! Glyph layout and shaping belong to the host. The board only needs a box
//! size for each string, which it asks of a [`TextMeasure`] implementation.
//! [`ApproxTextMeasure`] is a monospace estimate good enough for headless use
//! and tests.

#[cfg(test)]
#[path = "text_test.rs"]
mod text_test;

use serde::{Deserialize, Serialize};

use crate::consts::{APPROX_CHAR_WIDTH, DEFAULT_FONT_SIZE, DEFAULT_TEXT_FILL, LINE_HEIGHT_FACTOR};
use crate::geom::{Affine, Size};
use crate::scene::NodeId;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    /// Font size in board units.
    pub font_size: f64,
    /// Distance between baselines in board units.
    pub line_height: f64,
    /// Fill color as `0xRRGGBB`.
    pub fill: u32,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self::with_font_size(DEFAULT_FONT_SIZE)
    }
}

impl TextStyle {
    #[must_use]
    pub fn with_font_size(font_size: f64) -> Self {
        Self { font_size, line_height: font_size * LINE_HEIGHT_FACTOR, fill: DEFAULT_TEXT_FILL }
    }
}

/// Host-provided text metrics.
pub trait TextMeasure {
    /// Size of the laid-out block for `content` in board units.
    fn measure(&self, content: &str, style: &TextStyle) -> Size;
}

/// Fixed-advance estimate: every glyph is `APPROX_CHAR_WIDTH * font_size` wide.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApproxTextMeasure;

impl TextMeasure for ApproxTextMeasure {
    #[allow(clippy::cast_precision_loss)]
    fn measure(&self, content: &str, style: &TextStyle) -> Size {
        let lines = content.split('\n');
        let mut line_count = 0usize;
        let mut widest = 0usize;
        for line in lines {
            line_count += 1;
            widest = widest.max(line.chars().count());
        }
        Size::new(
            widest as f64 * style.font_size * APPROX_CHAR_WIDTH,
            line_count as f64 * style.line_height,
        )
    }
}

/// State of the open text-edit overlay.
///
/// The host draws an editable box using [`TextEditor::transform`] (a
/// screen-space matrix for the top-left of the text) and reports keystrokes
/// back through [`crate::board::Board::edit_text`]. The board refreshes the
/// matrix every tick so the overlay stays locked to the text while the view
/// pans or zooms.
#[derive(Debug, Clone, PartialEq)]
pub struct TextEditor {
    target: NodeId,
    content: String,
    style: TextStyle,
    transform: Affine,
}

impl TextEditor {
    pub(crate) fn new(target: NodeId, content: String, style: TextStyle, transform: Affine) -> Self {
        Self { target, content, style, transform }
    }

    /// The text node this overlay edits.
    #[must_use]
    pub fn target(&self) -> NodeId {
        self.target
    }

    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    #[must_use]
    pub fn style(&self) -> TextStyle {
        self.style
    }

    /// Local-to-screen matrix of the bound text node.
    #[must_use]
    pub fn transform(&self) -> Affine {
        self.transform
    }

    /// The transform as a CSS `matrix(a,b,c,d,tx,ty)` value.
    #[must_use]
    pub fn css_matrix(&self) -> String {
        let [a, b, c, d, e, f] = self.transform.as_coeffs();
        format!("matrix({a},{b},{c},{d},{e},{f})")
    }

    pub(crate) fn set_content(&mut self, content: String) {
        self.content = content;
    }

    pub(crate) fn set_transform(&mut self, transform: Affine) {
        self.transform = transform;
    }
}
