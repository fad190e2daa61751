use gpui::{FontWeight, TextRun, Window, font, px};

use crate::axis::TextMeasurer;
use crate::render::Font;

pub(crate) struct GpuiTextMeasurer<'a> {
    window: &'a Window,
}

impl<'a> GpuiTextMeasurer<'a> {
    pub(crate) fn new(window: &'a Window) -> Self {
        Self { window }
    }
}

impl TextMeasurer for GpuiTextMeasurer<'_> {
    fn measure(&self, text: &str, font: &Font) -> (f32, f32) {
        if text.is_empty() {
            return (0.0, 0.0);
        }
        let run = text_run(text, font, gpui::black());
        let shaped = self.window.text_system().shape_line(
            text.to_string().into(),
            px(font.size),
            &[run],
            None,
        );
        let width = f32::from(shaped.width);
        let height = f32::from(shaped.ascent + shaped.descent);
        (width, height.max(font.size * 1.2))
    }
}

pub(crate) fn text_run(text: &str, style: &Font, color: gpui::Hsla) -> TextRun {
    let mut gpui_font = font(style.family.clone());
    if style.bold {
        gpui_font.weight = FontWeight::BOLD;
    }
    TextRun {
        len: text.len(),
        font: gpui_font,
        color,
        background_color: None,
        underline: None,
        strikethrough: None,
    }
}
