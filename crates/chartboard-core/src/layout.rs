// File: crates/chartboard-core/src/layout.rs
// Summary: Frames, insets and the vertical split of a board into panes.

/// Screen margins, in pixels.
/// Contract: all fields are non-negative.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Insets {
    pub left: u32,
    pub right: u32,
    pub top: u32,
    pub bottom: u32,
}

impl Insets {
    /// Create new insets (non-negative by type).
    pub const fn new(left: u32, right: u32, top: u32, bottom: u32) -> Self {
        Self { left, right, top, bottom }
    }
    /// Total horizontal inset (left + right).
    pub const fn hsum(&self) -> u32 { self.left + self.right }
    /// Total vertical inset (top + bottom).
    pub const fn vsum(&self) -> u32 { self.top + self.bottom }
}

impl Default for Insets {
    /// Room on the right for value labels.
    fn default() -> Self {
        Self::new(8, 64, 8, 8)
    }
}

/// Offset and size shared by every visual component (board, pane, axis strip).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Frame {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Frame {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    pub fn right(&self) -> f64 { self.x + self.width }
    pub fn bottom(&self) -> f64 { self.y + self.height }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x && x <= self.right() && y >= self.y && y <= self.bottom()
    }

    /// Shrink by insets, never below zero size.
    pub fn inset(&self, insets: &Insets) -> Frame {
        Frame {
            x: self.x + insets.left as f64,
            y: self.y + insets.top as f64,
            width: (self.width - insets.hsum() as f64).max(0.0),
            height: (self.height - insets.vsum() as f64).max(0.0),
        }
    }
}

/// Split `area` top to bottom in proportion to `weights`. Non-positive
/// weights count as zero; all-zero weights split evenly.
pub fn split_vertical(area: Frame, weights: &[f64]) -> Vec<Frame> {
    if weights.is_empty() {
        return Vec::new();
    }
    let clean: Vec<f64> = weights.iter().map(|w| if w.is_finite() && *w > 0.0 { *w } else { 0.0 }).collect();
    let total: f64 = clean.iter().sum();
    let mut y = area.y;
    clean
        .iter()
        .map(|w| {
            let share = if total > 0.0 { w / total } else { 1.0 / clean.len() as f64 };
            let frame = Frame::new(area.x, y, area.width, area.height * share);
            y += frame.height;
            frame
        })
        .collect()
}

#[inline]
pub fn clamp<T: PartialOrd>(v: T, lo: T, hi: T) -> T {
    if v < lo { lo } else if v > hi { hi } else { v }
}
