// File: crates/chartboard-skia/src/lib.rs
// Summary: Skia CPU raster backend for chartboard: drawing targets, text shaping and PNG export.

mod surface;
mod target;
mod text;

pub use surface::LayeredSurface;
pub use target::{pixel_size, SkiaTarget};
pub use text::{ShapedLabel, TextShaper};
