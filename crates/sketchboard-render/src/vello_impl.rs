//! Vello-based renderer implementation.

use crate::renderer::{paint, Painter, RenderContext, Renderer};
use kurbo::{Affine, Cap, Join, Point, Rect, Size, Stroke};
use parley::layout::PositionedLayoutItem;
use parley::{FontContext, FontStack, FontWeight, LayoutContext, StyleProperty};
use peniko::{Brush, Color, Fill};
use sketchboard_core::items::polyline_path;
use vello::Scene;

/// Vello-based renderer for GPU-accelerated 2D graphics.
pub struct VelloRenderer {
    /// The Vello scene being built.
    scene: Scene,
    /// Font context for text rendering (cached across frames).
    font_cx: FontContext,
    /// Layout context for text rendering.
    layout_cx: LayoutContext<Brush>,
    /// Logical to physical pixel transform for the current frame.
    transform: Affine,
}

impl Default for VelloRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl VelloRenderer {
    /// Create a new Vello renderer. Text uses the system sans-serif face.
    pub fn new() -> Self {
        Self {
            scene: Scene::new(),
            font_cx: FontContext::new(),
            layout_cx: LayoutContext::new(),
            transform: Affine::IDENTITY,
        }
    }

    /// Get the built scene for rendering.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Take ownership of the scene (resets internal scene).
    pub fn take_scene(&mut self) -> Scene {
        std::mem::take(&mut self.scene)
    }
}

impl Renderer for VelloRenderer {
    fn build_scene(&mut self, ctx: &RenderContext) {
        self.scene.reset();
        self.transform = Affine::scale(ctx.scale_factor);
        paint(ctx, self);
    }
}

impl Painter for VelloRenderer {
    fn clear(&mut self, color: Color, size: Size) {
        let rect = Rect::from_origin_size(Point::ZERO, size);
        self.scene.fill(Fill::NonZero, self.transform, color, None, &rect);
    }

    fn stroke_polyline(&mut self, points: &[Point], width: f64, color: Color) {
        let stroke = Stroke::new(width).with_caps(Cap::Round).with_join(Join::Round);
        let path = polyline_path(points);
        self.scene.stroke(&stroke, self.transform, color, None, &path);
    }

    fn fill_text(&mut self, text: &str, origin: Point, font_size: f64, color: Color) {
        let brush = Brush::Solid(color);

        let mut builder = self.layout_cx.ranged_builder(&mut self.font_cx, text, 1.0, false);
        builder.push_default(StyleProperty::FontSize(font_size as f32));
        builder.push_default(StyleProperty::Brush(brush.clone()));
        builder.push_default(StyleProperty::FontWeight(FontWeight::BOLD));
        builder.push_default(StyleProperty::FontStack(FontStack::Source("sans-serif".into())));
        let mut layout = builder.build(text);

        layout.break_all_lines(None);
        layout.align(None, parley::Alignment::Start, parley::AlignmentOptions::default());

        // Parley lays out with y=0 at the top; shift so the first baseline
        // lands on the anchor.
        let Some(first_baseline) = layout.lines().next().map(|line| line.metrics().baseline) else {
            return;
        };
        let text_transform =
            self.transform * Affine::translate((origin.x, origin.y - first_baseline as f64));

        let mut glyph_count = 0usize;
        for line in layout.lines() {
            for item in line.items() {
                let PositionedLayoutItem::GlyphRun(glyph_run) = item else {
                    continue;
                };
                let mut x = glyph_run.offset();
                let y = glyph_run.baseline();
                let run = glyph_run.run();
                let font = run.font();
                let font_size = run.font_size();
                let synthesis = run.synthesis();
                let glyph_xform = synthesis
                    .skew()
                    .map(|angle| Affine::skew(angle.to_radians().tan() as f64, 0.0));

                let glyphs: Vec<vello::Glyph> = glyph_run
                    .glyphs()
                    .map(|glyph| {
                        let gx = x + glyph.x;
                        let gy = y - glyph.y;
                        x += glyph.advance;
                        vello::Glyph { id: glyph.id, x: gx, y: gy }
                    })
                    .collect();
                glyph_count += glyphs.len();

                if !glyphs.is_empty() {
                    self.scene
                        .draw_glyphs(font)
                        .brush(&brush)
                        .hint(true)
                        .transform(text_transform)
                        .glyph_transform(glyph_xform)
                        .font_size(font_size)
                        .normalized_coords(run.normalized_coords())
                        .draw(Fill::NonZero, glyphs.into_iter());
                }
            }
        }

        if glyph_count == 0 {
            log::warn!("No glyphs rendered for text {text:?}; is a sans-serif font installed?");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sketchboard_core::items::{Item, StrokeTool, TextAnnotation};
    use sketchboard_core::theme::Theme;

    #[test]
    fn test_renderer_creation() {
        let renderer = VelloRenderer::new();
        assert!(renderer.scene().encoding().is_empty());
    }

    #[test]
    fn test_build_empty_scene() {
        let mut renderer = VelloRenderer::new();
        let ctx = RenderContext::new(&[], Size::new(800.0, 600.0));

        renderer.build_scene(&ctx);
        // Background fill at minimum.
        assert!(!renderer.scene().encoding().is_empty());
    }

    #[test]
    fn test_build_scene_with_items() {
        let mut renderer = VelloRenderer::new();
        let items: Vec<Item> = vec![
            sketchboard_core::items::Stroke::new(
                vec![Point::new(100.0, 100.0), Point::new(300.0, 250.0)],
                StrokeTool::Freehand,
                4.0,
            )
            .into(),
            TextAnnotation::new(Point::new(50.0, 50.0), "label", 4.0).unwrap().into(),
        ];

        let ctx = RenderContext::new(&items, Size::new(800.0, 600.0))
            .with_theme(Theme::Dark)
            .with_scale_factor(2.0);
        renderer.build_scene(&ctx);

        let scene = renderer.take_scene();
        assert!(!scene.encoding().is_empty());
        assert!(renderer.scene().encoding().is_empty());
    }
}
