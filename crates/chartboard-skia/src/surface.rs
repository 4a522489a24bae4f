// File: crates/chartboard-skia/src/surface.rs
// Summary: Base + front layer pair for a board, composited on export.

use chartboard_core::{ChartBoard, ChartResult, RedrawLayers};
use skia_safe as skia;

use crate::target::{encode_png, pixel_size, raster, SkiaTarget};

/// Two same-sized raster layers: series and axes on the base, crosshair on
/// the front. Only export flattens them.
pub struct LayeredSurface {
    base: SkiaTarget,
    front: SkiaTarget,
}

impl LayeredSurface {
    pub fn new(width: f64, height: f64, dpr: f64) -> ChartResult<Self> {
        Ok(Self { base: SkiaTarget::new(width, height, dpr)?, front: SkiaTarget::new(width, height, dpr)? })
    }

    /// Surface matching the board's configured size.
    pub fn for_board(board: &ChartBoard, dpr: f64) -> ChartResult<Self> {
        Self::new(board.options().width, board.options().height, dpr)
    }

    pub fn base(&self) -> &SkiaTarget { &self.base }
    pub fn front(&self) -> &SkiaTarget { &self.front }

    pub fn set_draw_labels(&mut self, on: bool) {
        self.base.set_draw_labels(on);
        self.front.set_draw_labels(on);
    }

    /// New layers at the new size. Both start blank, so the next pass must
    /// repaint everything.
    pub fn resize(&mut self, width: f64, height: f64) -> ChartResult<()> {
        let labels = self.base.draw_labels();
        let dpr = self.base.device_pixel_ratio();
        *self = Self::new(width, height, dpr)?;
        self.set_draw_labels(labels);
        Ok(())
    }

    pub fn render(&mut self, board: &mut ChartBoard, layers: RedrawLayers) -> ChartResult<()> {
        board.render(layers, &mut self.base, &mut self.front)
    }

    /// Front drawn over base on a fresh raster.
    pub fn composite(&mut self) -> ChartResult<skia::Image> {
        let (pw, ph) = pixel_size(self.base.width(), self.base.height(), self.base.device_pixel_ratio());
        let mut out = raster(pw, ph)?;
        let base = self.base.snapshot();
        let front = self.front.snapshot();
        let canvas = out.canvas();
        canvas.clear(skia::Color::TRANSPARENT);
        canvas.draw_image(&base, (0.0, 0.0), None);
        canvas.draw_image(&front, (0.0, 0.0), None);
        Ok(out.image_snapshot())
    }

    pub fn encode_png(&mut self) -> ChartResult<Vec<u8>> {
        let bytes = encode_png(&self.composite()?)?;
        tracing::debug!(bytes = bytes.len(), "layers encoded");
        Ok(bytes)
    }
}
