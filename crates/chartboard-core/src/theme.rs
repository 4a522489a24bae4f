// File: crates/chartboard-core/src/theme.rs
// Summary: Light/Dark theming for board rendering colors.

use crate::canvas::Color;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Theme {
    pub name: &'static str,
    pub background: Color,
    pub grid: Color,
    pub axis_line: Color,
    pub axis_label: Color,
    pub tick: Color,
    pub crosshair: Color,
    pub line_stroke: Color,
    pub candle_up: Color,
    pub candle_down: Color,
    pub candle_outline: Color,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            name: "dark",
            background: Color::from_argb(255, 18, 18, 20),
            grid: Color::from_argb(255, 40, 40, 45),
            axis_line: Color::from_argb(255, 180, 180, 190),
            axis_label: Color::from_argb(255, 235, 235, 245),
            tick: Color::from_argb(255, 150, 150, 160),
            crosshair: Color::from_argb(255, 255, 230, 70),
            line_stroke: Color::from_argb(255, 64, 160, 255),
            candle_up: Color::from_argb(255, 40, 200, 120),
            candle_down: Color::from_argb(255, 220, 80, 80),
            candle_outline: Color::from_argb(255, 200, 200, 210),
        }
    }

    pub fn light() -> Self {
        Self {
            name: "light",
            background: Color::from_argb(255, 250, 250, 252),
            grid: Color::from_argb(255, 230, 230, 235),
            axis_line: Color::from_argb(255, 60, 60, 70),
            axis_label: Color::from_argb(255, 20, 20, 30),
            tick: Color::from_argb(255, 100, 100, 110),
            crosshair: Color::from_argb(255, 30, 120, 240),
            line_stroke: Color::from_argb(255, 32, 120, 200),
            candle_up: Color::from_argb(255, 20, 160, 90),
            candle_down: Color::from_argb(255, 200, 60, 60),
            candle_outline: Color::from_argb(255, 40, 40, 50),
        }
    }

    pub fn high_contrast_dark() -> Self {
        Self {
            name: "high-contrast-dark",
            background: Color::from_argb(255, 0x00, 0x00, 0x00),
            grid: Color::from_argb(255, 0x22, 0x22, 0x22),
            axis_line: Color::from_argb(255, 0xff, 0xff, 0xff),
            axis_label: Color::from_argb(255, 0xff, 0xff, 0xff),
            tick: Color::from_argb(255, 0xcc, 0xcc, 0xcc),
            crosshair: Color::from_argb(255, 0xff, 0xff, 0x00),
            line_stroke: Color::from_argb(255, 0x00, 0xff, 0xff),
            candle_up: Color::from_argb(255, 0x00, 0xff, 0x00),
            candle_down: Color::from_argb(255, 0xff, 0x00, 0x00),
            candle_outline: Color::from_argb(255, 0xff, 0xff, 0xff),
        }
    }
}

impl Default for Theme {
    fn default() -> Self { Self::dark() }
}

/// Return a list of built-in theme presets.
pub fn presets() -> Vec<Theme> {
    vec![Theme::dark(), Theme::light(), Theme::high_contrast_dark()]
}

/// Find a theme by its `name`, falling back to dark.
pub fn find(name: &str) -> Theme {
    presets()
        .into_iter()
        .find(|t| t.name.eq_ignore_ascii_case(name))
        .unwrap_or_else(Theme::dark)
}
