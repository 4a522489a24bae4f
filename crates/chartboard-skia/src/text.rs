// File: crates/chartboard-skia/src/text.rs
// Summary: Axis label shaping with Skia textlayout: measuring, fill and outline painting.

use skia_safe as skia;
use skia::textlayout::{FontCollection, Paragraph, ParagraphBuilder, ParagraphStyle, TextStyle};

/// Shaped label plus the metrics needed to place it.
pub struct ShapedLabel {
    paragraph: Paragraph,
}

impl ShapedLabel {
    pub fn width(&self) -> f32 { self.paragraph.longest_line() }
    pub fn height(&self) -> f32 { self.paragraph.height() }
    pub fn baseline(&self) -> f32 { self.paragraph.alphabetic_baseline() }

    /// Paint with the paragraph's top-left corner at `(x, y)`.
    pub fn paint(&self, canvas: &skia::Canvas, x: f32, y: f32) {
        self.paragraph.paint(canvas, (x, y));
    }
}

pub struct TextShaper {
    fonts: FontCollection,
    size: f32,
}

impl Default for TextShaper {
    fn default() -> Self { Self::new(11.0) }
}

impl TextShaper {
    pub fn new(size: f32) -> Self {
        let mut fc = FontCollection::new();
        // Use system manager fallback
        fc.set_default_font_manager(skia::FontMgr::default(), None);
        Self { fonts: fc, size: size.max(1.0) }
    }

    pub fn size(&self) -> f32 { self.size }

    fn make_style(&self, paint: &skia::Paint) -> TextStyle {
        let mut ts = TextStyle::new();
        ts.set_font_size(self.size);
        ts.set_foreground_paint(paint);
        // Monospaced first: label width must not change with the digits
        ts.set_font_families(&["Roboto Mono", "Consolas", "Menlo", "DejaVu Sans Mono", "monospace"]);
        ts
    }

    /// Lay out `text` on one line, painted with `paint` (fill or stroke).
    pub fn shape(&self, text: &str, paint: &skia::Paint) -> ShapedLabel {
        let mut pstyle = ParagraphStyle::new();
        pstyle.set_text_align(skia::textlayout::TextAlign::Left);
        let mut builder = ParagraphBuilder::new(&pstyle, &self.fonts);
        builder.push_style(&self.make_style(paint));
        builder.add_text(text);
        let mut paragraph = builder.build();
        paragraph.layout(10_000.0);
        ShapedLabel { paragraph }
    }

    pub fn measure_width(&self, text: &str) -> f32 {
        self.shape(text, &skia::Paint::default()).width()
    }
}
