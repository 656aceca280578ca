use super::{PageRenderer, Palette, draw_centered, multilinify};
use crate::localization::fl;
use macroquad::prelude::*;

const TITLE_SIZE: u16 = 48;
const MESSAGE_SIZE: u16 = 30;
const LINE_HEIGHT: f32 = 42f32;

impl PageRenderer {
    /// Full-screen error display: headline plus the wrapped message.
    pub fn error_view(&mut self, message: &str, palette: &Palette) {
        let (w, h) = (screen_width(), screen_height());

        draw_centered(&fl!("config-error-title"), h * 0.38, TITLE_SIZE, palette.foreground);

        let mut y = h * 0.38 + LINE_HEIGHT * 1.5;
        for line in multilinify(message, w * 0.6, MESSAGE_SIZE) {
            draw_centered(&line, y, MESSAGE_SIZE, palette.muted);
            y += LINE_HEIGHT;
        }
    }
}
