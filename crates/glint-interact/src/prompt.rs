//! Prompt styling and the immediate-mode drawing seam

use glint_core::{Color, ScreenRect};
use serde::{Deserialize, Serialize};

/// How the interaction prompt is drawn
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PromptStyle {
    pub font_size: f32,
    pub bold: bool,
    pub color: Color,
    /// Distance of the label from the left screen edge
    pub margin_left: f32,
    /// Distance of the label's top edge from the bottom screen edge
    pub margin_bottom: f32,
    pub width: f32,
    pub height: f32,
}

impl Default for PromptStyle {
    fn default() -> Self {
        Self {
            font_size: 16.0,
            bold: true,
            color: Color::WHITE,
            margin_left: 50.0,
            margin_bottom: 50.0,
            width: 200.0,
            height: 50.0,
        }
    }
}

impl PromptStyle {
    /// Where the label goes on a screen of the given height
    pub fn label_rect(&self, screen_height: f32) -> ScreenRect {
        ScreenRect::new(
            self.margin_left,
            screen_height - self.margin_bottom,
            self.width,
            self.height,
        )
    }
}

/// Immediate-mode text drawing, called from `on_draw_ui`
pub trait PromptCanvas {
    /// Screen size in pixels (width, height)
    fn screen_size(&self) -> (f32, f32);

    /// Draw a text label inside `rect`
    fn label(&mut self, rect: ScreenRect, text: &str, style: &PromptStyle);
}

/// One recorded `label` call
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DrawCommand {
    pub rect: ScreenRect,
    pub text: String,
    pub font_size: f32,
    pub bold: bool,
    pub color: Color,
}

/// A canvas that records draw calls instead of drawing (headless runs, tests)
#[derive(Clone, Debug, Default)]
pub struct RecordingCanvas {
    pub width: f32,
    pub height: f32,
    pub commands: Vec<DrawCommand>,
}

impl RecordingCanvas {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
        }
    }

    /// Take the recorded commands, leaving the canvas empty for the next frame
    pub fn take(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }
}

impl PromptCanvas for RecordingCanvas {
    fn screen_size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    fn label(&mut self, rect: ScreenRect, text: &str, style: &PromptStyle) {
        self.commands.push(DrawCommand {
            rect,
            text: text.to_string(),
            font_size: style.font_size,
            bold: style.bold,
            color: style.color,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_label_rect() {
        let style = PromptStyle::default();
        assert_eq!(
            style.label_rect(720.0),
            ScreenRect::new(50.0, 670.0, 200.0, 50.0)
        );
        assert_eq!(style.font_size, 16.0);
        assert!(style.bold);
        assert_eq!(style.color, Color::WHITE);
    }

    #[test]
    fn test_recording_canvas() {
        let mut canvas = RecordingCanvas::new(1280.0, 720.0);
        let style = PromptStyle::default();
        canvas.label(style.label_rect(720.0), "[E] Open door", &style);

        let commands = canvas.take();
        assert_eq!(commands.len(), 1);
        assert_eq!(commands[0].text, "[E] Open door");
        assert!(canvas.commands.is_empty());
    }
}
