use coarsetime::Instant;
use macroquad::prelude::*;
use tracker_common::settings::{BorderStyle, Theme};

mod error;
mod info;

pub(crate) trait Interpolate {
    /// `value` must be a `float` normally varying from `0f32` to `1f32`
    fn interpolate_linear(&self, value: f32) -> f32;
}

impl Interpolate for (f32, f32) {
    fn interpolate_linear(&self, value: f32) -> f32 {
        (self.1 - self.0).mul_add(value, self.0)
    }
}

/// Colors a theme resolves to on the stage.
pub struct Palette {
    pub surface: Color,
    pub foreground: Color,
    pub muted: Color,
    pub accent: Color,
    pub border: Color,
    pub notice: Color,
}

pub fn palette(theme: Theme) -> Palette {
    match theme {
        Theme::Dark => Palette {
            surface: Color::from_rgba(16, 19, 26, 255),
            foreground: Color::from_rgba(236, 239, 244, 255),
            muted: Color::from_rgba(148, 155, 164, 255),
            accent: Color::from_rgba(28, 176, 246, 255),
            border: Color::from_rgba(28, 176, 246, 255),
            notice: Color::from_rgba(255, 183, 77, 255),
        },
        Theme::Light => Palette {
            surface: Color::from_rgba(245, 246, 248, 255),
            foreground: Color::from_rgba(24, 28, 35, 255),
            muted: Color::from_rgba(110, 117, 126, 255),
            accent: Color::from_rgba(2, 119, 189, 255),
            border: Color::from_rgba(2, 119, 189, 255),
            notice: Color::from_rgba(191, 111, 0, 255),
        },
    }
}

const BORDER_THICKNESS: f32 = 4f32;
const BORDER_MARGIN: f32 = 3f32;
const CORNER_RADIUS: f32 = 24f32;
const ARC_SEGMENTS: u32 = 12;

/// Wrap the given `text` into lines that fit within the specified `width`,
/// breaking at whitespace. A single word wider than `width` still gets its
/// own (overflowing) line.
pub fn multilinify(text: &str, width: f32, font_size: u16) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current_line = String::new();

    for word in text.split_whitespace() {
        let word_width = measure_text(word, None, font_size, 1.0).width;
        let line_width = measure_text(&current_line, None, font_size, 1.0).width;

        if current_line.is_empty() || line_width + word_width <= width {
            if !current_line.is_empty() {
                current_line.push(' ');
            }
            current_line.push_str(word);
        } else {
            lines.push(current_line.clone());
            current_line = word.to_string();
        }
    }

    if !current_line.is_empty() {
        lines.push(current_line);
    }

    lines
}

/// Crops `text` with an ellipsis until it fits within `width`, returning
/// the offset from the field's left edge that centers the result and the
/// (possibly cropped) string.
pub fn fit_text(width: f32, text: &str, font_size: u16) -> (f32, String) {
    let mut text = text.to_string();
    let mut popped = false;
    while !text.is_empty() && width < measure_text(&text, None, font_size, 1.0).width {
        text.pop();
        popped = true;
    }
    if popped {
        text.pop();
        text.push_str("..");
    }
    let x_off = (width - measure_text(&text, None, font_size, 1.0).width) / 2f32;
    (x_off, text)
}

pub(crate) fn draw_centered(text: &str, y: f32, font_size: u16, color: Color) {
    let dims = measure_text(text, None, font_size, 1.0);
    draw_text_ex(
        text,
        (screen_width() - dims.width) / 2f32,
        y,
        TextParams {
            font_size,
            color,
            ..Default::default()
        },
    );
}

/// Formats whole currency amounts with thousands separators ("$1,234,567").
pub fn format_money(amount: f64) -> String {
    let whole = amount.round().max(0.0) as u64;
    let digits = whole.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    out.push('$');
    for (i, c) in digits.chars().enumerate() {
        if i != 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

fn stroke_arc(cx: f32, cy: f32, radius: f32, start: f32, thickness: f32, color: Color) {
    let step = std::f32::consts::FRAC_PI_2 / ARC_SEGMENTS as f32;
    for i in 0..ARC_SEGMENTS {
        let a0 = start + step * i as f32;
        let a1 = a0 + step;
        draw_line(
            cx + radius * a0.cos(),
            cy + radius * a0.sin(),
            cx + radius * a1.cos(),
            cy + radius * a1.sin(),
            thickness,
            color,
        );
    }
}

pub struct PageRenderer {
    /// Holds state for progression of the progress bar fill animation
    animation_register: Instant,
    /// Donation count of the snapshot the fill animation started from
    last_total: Option<u64>,
}

impl PageRenderer {
    pub fn new() -> Self {
        Self {
            animation_register: Instant::now(),
            last_total: None,
        }
    }

    /// Fills the viewport with the theme surface and draws the configured
    /// border decoration.
    pub fn container(&mut self, palette: &Palette, border: BorderStyle) {
        let (w, h) = (screen_width(), screen_height());
        draw_rectangle(0f32, 0f32, w, h, palette.surface);

        let m = BORDER_MARGIN;
        match border {
            BorderStyle::None => {}
            BorderStyle::Square => {
                draw_rectangle_lines(m, m, w - 2f32 * m, h - 2f32 * m, BORDER_THICKNESS, palette.border);
            }
            BorderStyle::Rounded => {
                use std::f32::consts::{FRAC_PI_2, PI};
                let r = CORNER_RADIUS;
                let t = BORDER_THICKNESS;
                draw_line(m + r, m, w - m - r, m, t, palette.border);
                draw_line(w - m, m + r, w - m, h - m - r, t, palette.border);
                draw_line(m + r, h - m, w - m - r, h - m, t, palette.border);
                draw_line(m, m + r, m, h - m - r, t, palette.border);
                stroke_arc(m + r, m + r, r, PI, t, palette.border);
                stroke_arc(w - m - r, m + r, r, PI + FRAC_PI_2, t, palette.border);
                stroke_arc(w - m - r, h - m - r, r, 0f32, t, palette.border);
                stroke_arc(m + r, h - m - r, r, FRAC_PI_2, t, palette.border);
            }
        }
    }
}
