//! HUD overlay - crosshair and interaction prompts
//!
//! Renders a minimal egui overlay on top of the 3D scene:
//! - Center crosshair dot marking where gaze rays go
//! - Prompt labels drawn by interactables through `EguiCanvas`

use glint_core::{Color, ScreenRect};
use glint_interact::{InteractionSystem, PromptCanvas, PromptStyle};

/// A `PromptCanvas` that draws into an egui context for the current frame
pub struct EguiCanvas<'a> {
    ctx: &'a egui::Context,
    labels: usize,
}

impl<'a> EguiCanvas<'a> {
    pub fn new(ctx: &'a egui::Context) -> Self {
        Self { ctx, labels: 0 }
    }

    /// Labels drawn through this canvas so far
    pub fn labels_drawn(&self) -> usize {
        self.labels
    }
}

impl PromptCanvas for EguiCanvas<'_> {
    fn screen_size(&self) -> (f32, f32) {
        let size = self.ctx.screen_rect().size();
        (size.x, size.y)
    }

    fn label(&mut self, rect: ScreenRect, text: &str, style: &PromptStyle) {
        let mut rich = egui::RichText::new(text)
            .size(style.font_size)
            .color(color32(style.color));
        if style.bold {
            rich = rich.strong();
        }

        // One area per label so several prompts in a frame don't share a layer
        egui::Area::new(egui::Id::new(("glint_prompt", self.labels)))
            .order(egui::Order::Foreground)
            .fixed_pos(egui::pos2(rect.x, rect.y))
            .interactable(false)
            .show(self.ctx, |ui| {
                ui.set_width(rect.width);
                ui.set_max_height(rect.height);
                ui.label(rich);
            });
        self.labels += 1;
    }
}

/// Draw the crosshair, then every visible interaction prompt
pub fn render(ctx: &egui::Context, interactions: &InteractionSystem) {
    draw_crosshair(ctx);
    let mut canvas = EguiCanvas::new(ctx);
    interactions.draw(&mut canvas);
}

/// Center crosshair dot
pub fn draw_crosshair(ctx: &egui::Context) {
    egui::Area::new(egui::Id::new("glint_crosshair"))
        .order(egui::Order::Foreground)
        .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
        .interactable(false)
        .show(ctx, |ui| {
            let painter = ui.painter();
            let screen_center = ctx.screen_rect().center();
            painter.circle_filled(
                screen_center,
                2.0,
                egui::Color32::from_rgba_unmultiplied(255, 255, 255, 140),
            );
            // Thin ring around dot for visibility on bright backgrounds
            painter.circle_stroke(
                screen_center,
                3.5,
                egui::Stroke::new(0.8, egui::Color32::from_rgba_unmultiplied(0, 0, 0, 80)),
            );
        });
}

fn color32(color: Color) -> egui::Color32 {
    let [r, g, b, a] = color.to_rgba8();
    egui::Color32::from_rgba_unmultiplied(r, g, b, a)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_input(width: f32, height: f32) -> egui::RawInput {
        egui::RawInput {
            screen_rect: Some(egui::Rect::from_min_size(
                egui::Pos2::ZERO,
                egui::vec2(width, height),
            )),
            ..Default::default()
        }
    }

    #[test]
    fn test_canvas_reports_screen_size() {
        let ctx = egui::Context::default();
        let mut size = (0.0, 0.0);
        let _ = ctx.run(raw_input(800.0, 600.0), |ctx| {
            size = EguiCanvas::new(ctx).screen_size();
        });
        assert_eq!(size, (800.0, 600.0));
    }

    #[test]
    fn test_label_produces_shapes() {
        let ctx = egui::Context::default();
        let style = PromptStyle::default();
        let mut drawn = 0;
        let output = ctx.run(raw_input(800.0, 600.0), |ctx| {
            let mut canvas = EguiCanvas::new(ctx);
            let (_, height) = canvas.screen_size();
            canvas.label(style.label_rect(height), "Examine painting", &style);
            drawn = canvas.labels_drawn();
        });
        assert_eq!(drawn, 1);
        assert!(!output.shapes.is_empty());
    }

    #[test]
    fn test_empty_system_draws_only_crosshair() {
        let ctx = egui::Context::default();
        let system = InteractionSystem::new();
        let output = ctx.run(raw_input(800.0, 600.0), |ctx| render(ctx, &system));
        assert!(!output.shapes.is_empty());
    }

    #[test]
    fn test_color_conversion() {
        assert_eq!(color32(Color::WHITE), egui::Color32::WHITE);
        assert_eq!(color32(Color::BLACK), egui::Color32::BLACK);
    }
}
