// File: crates/chartboard-core/src/canvas.rs
// Summary: Device-independent drawing target contract, pixel snapping, and a
// command recorder that can replay onto any target.

/// Straight (non-premultiplied) ARGB color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    pub a: u8,
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn from_argb(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self { a, r, g, b }
    }

    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self { a: 255, r, g, b }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TextMetrics {
    pub width: f64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextBaseline {
    Top,
    Middle,
    #[default]
    Alphabetic,
    Bottom,
}

pub trait TextMeasure {
    fn measure_text(&self, text: &str) -> TextMetrics;
}

/// Half-pixel offset that keeps odd-width strokes on pixel centers.
///
/// This is a step function of the stroke width: the width is rounded to a
/// whole pixel count, odd counts get `+0.5`, even counts get nothing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PixelSnap {
    offset: f64,
}

impl PixelSnap {
    pub fn for_line_width(line_width: f64) -> Self {
        let whole = line_width.round() as i64;
        let offset = if whole.rem_euclid(2) == 1 { 0.5 } else { 0.0 };
        Self { offset }
    }

    pub fn offset(&self) -> f64 { self.offset }

    pub fn apply(&self, v: f64) -> f64 {
        v.round() + self.offset
    }
}

/// Primitive 2D drawing operations. Coordinates are logical pixels; an
/// implementation may scale them by a device pixel ratio uniformly.
pub trait DrawingTarget: TextMeasure {
    fn clear(&mut self);
    fn begin_path(&mut self);
    fn close_path(&mut self);
    fn stroke(&mut self);
    fn move_to(&mut self, x: f64, y: f64);
    fn line_to(&mut self, x: f64, y: f64);
    fn rect(&mut self, x: f64, y: f64, w: f64, h: f64);
    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64);
    fn stroke_rect(&mut self, x: f64, y: f64, w: f64, h: f64);
    fn set_stroke_style(&mut self, color: Color);
    fn set_fill_style(&mut self, color: Color);
    fn set_line_width(&mut self, width: f64);
    fn line_width(&self) -> f64;
    fn set_text_align(&mut self, align: TextAlign);
    fn set_text_baseline(&mut self, baseline: TextBaseline);
    fn fill_text(&mut self, text: &str, x: f64, y: f64, max_width: Option<f64>);
    fn stroke_text(&mut self, text: &str, x: f64, y: f64, max_width: Option<f64>);

    /// Round `v` to the pixel grid for the current stroke width.
    fn snap(&self, v: f64) -> f64 {
        PixelSnap::for_line_width(self.line_width()).apply(v)
    }
}

/// Monospace-style metrics: every char advances by the same width.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FixedAdvance {
    pub char_width: f64,
}

impl TextMeasure for FixedAdvance {
    fn measure_text(&self, text: &str) -> TextMetrics {
        TextMetrics { width: text.chars().count() as f64 * self.char_width }
    }
}

static DEFAULT_ADVANCE: FixedAdvance = FixedAdvance { char_width: 7.0 };

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Clear,
    BeginPath,
    ClosePath,
    Stroke,
    MoveTo(f64, f64),
    LineTo(f64, f64),
    Rect(f64, f64, f64, f64),
    FillRect(f64, f64, f64, f64),
    StrokeRect(f64, f64, f64, f64),
    StrokeStyle(Color),
    FillStyle(Color),
    LineWidth(f64),
    TextAlign(TextAlign),
    TextBaseline(TextBaseline),
    FillText { text: String, x: f64, y: f64, max_width: Option<f64> },
    StrokeText { text: String, x: f64, y: f64, max_width: Option<f64> },
}

impl DrawCommand {
    /// False for pure state setters (styles, widths, alignment).
    pub fn is_draw_call(&self) -> bool {
        !matches!(
            self,
            DrawCommand::StrokeStyle(_)
                | DrawCommand::FillStyle(_)
                | DrawCommand::LineWidth(_)
                | DrawCommand::TextAlign(_)
                | DrawCommand::TextBaseline(_)
        )
    }

    pub fn apply(&self, target: &mut dyn DrawingTarget) {
        match self {
            DrawCommand::Clear => target.clear(),
            DrawCommand::BeginPath => target.begin_path(),
            DrawCommand::ClosePath => target.close_path(),
            DrawCommand::Stroke => target.stroke(),
            DrawCommand::MoveTo(x, y) => target.move_to(*x, *y),
            DrawCommand::LineTo(x, y) => target.line_to(*x, *y),
            DrawCommand::Rect(x, y, w, h) => target.rect(*x, *y, *w, *h),
            DrawCommand::FillRect(x, y, w, h) => target.fill_rect(*x, *y, *w, *h),
            DrawCommand::StrokeRect(x, y, w, h) => target.stroke_rect(*x, *y, *w, *h),
            DrawCommand::StrokeStyle(c) => target.set_stroke_style(*c),
            DrawCommand::FillStyle(c) => target.set_fill_style(*c),
            DrawCommand::LineWidth(w) => target.set_line_width(*w),
            DrawCommand::TextAlign(a) => target.set_text_align(*a),
            DrawCommand::TextBaseline(b) => target.set_text_baseline(*b),
            DrawCommand::FillText { text, x, y, max_width } => target.fill_text(text, *x, *y, *max_width),
            DrawCommand::StrokeText { text, x, y, max_width } => target.stroke_text(text, *x, *y, *max_width),
        }
    }
}

pub fn replay(commands: &[DrawCommand], target: &mut dyn DrawingTarget) {
    for cmd in commands {
        cmd.apply(target);
    }
}

/// In-memory [`DrawingTarget`]. Text is measured by `M`, which is usually
/// the real target the commands will later be replayed onto.
pub struct Recorder<'m, M: TextMeasure + ?Sized = FixedAdvance> {
    commands: Vec<DrawCommand>,
    metrics: &'m M,
    line_width: f64,
}

impl Recorder<'static, FixedAdvance> {
    pub fn new() -> Self {
        Self::with_metrics(&DEFAULT_ADVANCE)
    }
}

impl Default for Recorder<'static, FixedAdvance> {
    fn default() -> Self { Self::new() }
}

impl<'m, M: TextMeasure + ?Sized> Recorder<'m, M> {
    pub fn with_metrics(metrics: &'m M) -> Self {
        Self { commands: Vec::new(), metrics, line_width: 1.0 }
    }

    pub fn commands(&self) -> &[DrawCommand] { &self.commands }

    pub fn into_commands(self) -> Vec<DrawCommand> { self.commands }

    pub fn draw_calls(&self) -> usize {
        self.commands.iter().filter(|c| c.is_draw_call()).count()
    }

    pub fn is_empty(&self) -> bool { self.commands.is_empty() }

    fn push(&mut self, cmd: DrawCommand) {
        self.commands.push(cmd);
    }
}

impl<'m, M: TextMeasure + ?Sized> TextMeasure for Recorder<'m, M> {
    fn measure_text(&self, text: &str) -> TextMetrics {
        self.metrics.measure_text(text)
    }
}

impl<'m, M: TextMeasure + ?Sized> DrawingTarget for Recorder<'m, M> {
    /// Drops everything recorded so far, like clearing a real surface would.
    fn clear(&mut self) {
        self.commands.clear();
        self.push(DrawCommand::Clear);
    }
    fn begin_path(&mut self) { self.push(DrawCommand::BeginPath) }
    fn close_path(&mut self) { self.push(DrawCommand::ClosePath) }
    fn stroke(&mut self) { self.push(DrawCommand::Stroke) }
    fn move_to(&mut self, x: f64, y: f64) { self.push(DrawCommand::MoveTo(x, y)) }
    fn line_to(&mut self, x: f64, y: f64) { self.push(DrawCommand::LineTo(x, y)) }
    fn rect(&mut self, x: f64, y: f64, w: f64, h: f64) { self.push(DrawCommand::Rect(x, y, w, h)) }
    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64) { self.push(DrawCommand::FillRect(x, y, w, h)) }
    fn stroke_rect(&mut self, x: f64, y: f64, w: f64, h: f64) { self.push(DrawCommand::StrokeRect(x, y, w, h)) }
    fn set_stroke_style(&mut self, color: Color) { self.push(DrawCommand::StrokeStyle(color)) }
    fn set_fill_style(&mut self, color: Color) { self.push(DrawCommand::FillStyle(color)) }

    fn set_line_width(&mut self, width: f64) {
        self.line_width = width;
        self.push(DrawCommand::LineWidth(width));
    }

    fn line_width(&self) -> f64 { self.line_width }
    fn set_text_align(&mut self, align: TextAlign) { self.push(DrawCommand::TextAlign(align)) }
    fn set_text_baseline(&mut self, baseline: TextBaseline) { self.push(DrawCommand::TextBaseline(baseline)) }

    fn fill_text(&mut self, text: &str, x: f64, y: f64, max_width: Option<f64>) {
        self.push(DrawCommand::FillText { text: text.to_owned(), x, y, max_width })
    }

    fn stroke_text(&mut self, text: &str, x: f64, y: f64, max_width: Option<f64>) {
        self.push(DrawCommand::StrokeText { text: text.to_owned(), x, y, max_width })
    }
}
