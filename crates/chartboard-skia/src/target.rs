// File: crates/chartboard-skia/src/target.rs
// Summary: DrawingTarget over a Skia CPU raster surface, scaled by the device pixel ratio.

use chartboard_core::canvas::TextMeasure;
use chartboard_core::{ChartError, ChartResult, Color, DrawingTarget, TextAlign, TextBaseline, TextMetrics};
use skia_safe as skia;

use crate::text::{ShapedLabel, TextShaper};

pub(crate) fn to_skia(c: Color) -> skia::Color {
    skia::Color::from_argb(c.a, c.r, c.g, c.b)
}

/// Device pixels backing `width x height` logical pixels.
pub fn pixel_size(width: f64, height: f64, dpr: f64) -> (i32, i32) {
    ((width * dpr).round().max(1.0) as i32, (height * dpr).round().max(1.0) as i32)
}

pub(crate) fn raster(width: i32, height: i32) -> ChartResult<skia::Surface> {
    skia::surfaces::raster_n32_premul((width, height))
        .ok_or_else(|| ChartError::SurfaceUnavailable(format!("raster surface {width}x{height}")))
}

pub(crate) fn encode_png(image: &skia::Image) -> ChartResult<Vec<u8>> {
    #[allow(deprecated)]
    let data = image
        .encode_to_data(skia::EncodedImageFormat::PNG)
        .ok_or_else(|| ChartError::SurfaceUnavailable("encode PNG failed".to_string()))?;
    Ok(data.as_bytes().to_vec())
}

fn paint(style: skia::paint::Style) -> skia::Paint {
    let mut p = skia::Paint::default();
    p.set_anti_alias(true);
    p.set_style(style);
    p.set_stroke_width(1.0);
    p
}

/// One raster layer. Callers draw in logical pixels; the canvas matrix
/// carries the device pixel ratio.
pub struct SkiaTarget {
    surface: skia::Surface,
    width: f64,
    height: f64,
    dpr: f64,
    path: skia::Path,
    stroke: skia::Paint,
    fill: skia::Paint,
    line_width: f64,
    align: TextAlign,
    baseline: TextBaseline,
    shaper: TextShaper,
    draw_labels: bool,
}

impl SkiaTarget {
    pub fn new(width: f64, height: f64, dpr: f64) -> ChartResult<Self> {
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(ChartError::InvalidDimensions { width, height });
        }
        let dpr = if dpr.is_finite() && dpr > 0.0 { dpr } else { 1.0 };
        let (pw, ph) = pixel_size(width, height, dpr);
        let mut surface = raster(pw, ph)?;
        surface.canvas().scale((dpr as f32, dpr as f32));
        tracing::debug!(width, height, dpr, pw, ph, "skia target created");

        Ok(Self {
            surface,
            width,
            height,
            dpr,
            path: skia::Path::new(),
            stroke: paint(skia::paint::Style::Stroke),
            fill: paint(skia::paint::Style::Fill),
            line_width: 1.0,
            align: TextAlign::default(),
            baseline: TextBaseline::default(),
            shaper: TextShaper::default(),
            draw_labels: true,
        })
    }

    /// Font size for labels, in logical pixels.
    pub fn with_font_size(mut self, size: f32) -> Self {
        self.shaper = TextShaper::new(size);
        self
    }

    /// Skip text entirely (still measured). Snapshot tests turn this off so
    /// system fonts do not leak into golden images.
    pub fn set_draw_labels(&mut self, on: bool) {
        self.draw_labels = on;
    }

    pub fn width(&self) -> f64 { self.width }
    pub fn height(&self) -> f64 { self.height }
    pub fn device_pixel_ratio(&self) -> f64 { self.dpr }
    pub fn draw_labels(&self) -> bool { self.draw_labels }

    pub fn snapshot(&mut self) -> skia::Image {
        self.surface.image_snapshot()
    }

    pub fn encode_png(&mut self) -> ChartResult<Vec<u8>> {
        encode_png(&self.snapshot())
    }

    /// Top-left corner for a label anchored at `(x, y)` under the current
    /// align/baseline state.
    fn label_origin(&self, label: &ShapedLabel, x: f64, y: f64) -> (f32, f32) {
        let w = label.width();
        let left = match self.align {
            TextAlign::Left => x as f32,
            TextAlign::Center => x as f32 - w / 2.0,
            TextAlign::Right => x as f32 - w,
        };
        let top = match self.baseline {
            TextBaseline::Top => y as f32,
            TextBaseline::Middle => y as f32 - label.height() / 2.0,
            TextBaseline::Alphabetic => y as f32 - label.baseline(),
            TextBaseline::Bottom => y as f32 - label.height(),
        };
        (left, top)
    }

    fn draw_label(&mut self, label: ShapedLabel, x: f64, y: f64, max_width: Option<f64>) {
        let (left, top) = self.label_origin(&label, x, y);
        let squeeze = match max_width {
            Some(mw) if mw > 0.0 && (label.width() as f64) > mw => Some(mw as f32 / label.width()),
            _ => None,
        };
        let canvas = self.surface.canvas();
        match squeeze {
            Some(k) => {
                canvas.save();
                canvas.translate((left, top));
                canvas.scale((k, 1.0));
                label.paint(canvas, 0.0, 0.0);
                canvas.restore();
            }
            None => label.paint(canvas, left, top),
        }
    }

    fn rect_of(x: f64, y: f64, w: f64, h: f64) -> skia::Rect {
        skia::Rect::from_xywh(x as f32, y as f32, w as f32, h as f32)
    }
}

impl TextMeasure for SkiaTarget {
    fn measure_text(&self, text: &str) -> TextMetrics {
        TextMetrics { width: self.shaper.measure_width(text) as f64 }
    }
}

impl DrawingTarget for SkiaTarget {
    fn clear(&mut self) {
        self.path = skia::Path::new();
        self.surface.canvas().clear(skia::Color::TRANSPARENT);
    }

    fn begin_path(&mut self) {
        self.path = skia::Path::new();
    }

    fn close_path(&mut self) {
        self.path.close();
    }

    fn stroke(&mut self) {
        let canvas = self.surface.canvas();
        canvas.draw_path(&self.path, &self.stroke);
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.path.move_to((x as f32, y as f32));
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.path.line_to((x as f32, y as f32));
    }

    fn rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        self.path.add_rect(Self::rect_of(x, y, w, h), None);
    }

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        let canvas = self.surface.canvas();
        canvas.draw_rect(Self::rect_of(x, y, w, h), &self.fill);
    }

    fn stroke_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        let canvas = self.surface.canvas();
        canvas.draw_rect(Self::rect_of(x, y, w, h), &self.stroke);
    }

    fn set_stroke_style(&mut self, color: Color) {
        self.stroke.set_color(to_skia(color));
    }

    fn set_fill_style(&mut self, color: Color) {
        self.fill.set_color(to_skia(color));
    }

    fn set_line_width(&mut self, width: f64) {
        self.line_width = width;
        self.stroke.set_stroke_width(width as f32);
    }

    fn line_width(&self) -> f64 { self.line_width }

    fn set_text_align(&mut self, align: TextAlign) { self.align = align; }

    fn set_text_baseline(&mut self, baseline: TextBaseline) { self.baseline = baseline; }

    fn fill_text(&mut self, text: &str, x: f64, y: f64, max_width: Option<f64>) {
        if !self.draw_labels {
            return;
        }
        let label = self.shaper.shape(text, &self.fill);
        self.draw_label(label, x, y, max_width);
    }

    fn stroke_text(&mut self, text: &str, x: f64, y: f64, max_width: Option<f64>) {
        if !self.draw_labels {
            return;
        }
        let label = self.shaper.shape(text, &self.stroke);
        self.draw_label(label, x, y, max_width);
    }
}
