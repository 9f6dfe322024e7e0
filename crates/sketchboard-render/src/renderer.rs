//! Renderer trait abstraction.

use kurbo::{Point, Size};
use peniko::Color;
use sketchboard_core::canvas::{Preview, Sketchboard};
use sketchboard_core::config::SketchConfig;
use sketchboard_core::items::{Item, Stroke};
use sketchboard_core::theme::Theme;
use thiserror::Error;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RendererError {
    #[error("Initialization failed: {0}")]
    InitFailed(String),
    #[error("Surface error: {0}")]
    Surface(String),
}

/// Context for a single render frame.
///
/// Item coordinates are logical drawing-surface pixels; backends apply
/// `scale_factor` when targeting physical pixels.
#[derive(Clone, Copy)]
pub struct RenderContext<'a> {
    /// Committed items in paint order.
    pub items: &'a [Item],
    /// Stroke currently being drawn.
    pub preview: Option<Preview<'a>>,
    /// Viewport size in logical pixels.
    pub viewport_size: Size,
    /// Device pixel ratio (for HiDPI).
    pub scale_factor: f64,
    pub theme: Theme,
    /// Text font size = brush size x this factor.
    pub text_font_factor: f64,
}

impl<'a> RenderContext<'a> {
    /// Create a new render context.
    pub fn new(items: &'a [Item], viewport_size: Size) -> Self {
        Self {
            items,
            preview: None,
            viewport_size,
            scale_factor: 1.0,
            theme: Theme::default(),
            text_font_factor: SketchConfig::default().text_font_factor,
        }
    }

    /// Context for the board's current scene, preview, theme and size.
    pub fn from_board(board: &'a Sketchboard) -> Self {
        Self::new(board.items(), board.viewport_size())
            .with_preview(board.preview())
            .with_theme(board.theme())
            .with_text_font_factor(board.config().text_font_factor)
    }

    /// Set the scale factor for HiDPI.
    pub fn with_scale_factor(mut self, scale_factor: f64) -> Self {
        self.scale_factor = scale_factor;
        self
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn with_preview(mut self, preview: Option<Preview<'a>>) -> Self {
        self.preview = preview;
        self
    }

    pub fn with_text_font_factor(mut self, factor: f64) -> Self {
        self.text_font_factor = factor;
        self
    }

    pub fn background_color(&self) -> Color {
        self.theme.background().into()
    }

    /// Font size for text committed at `brush_size`.
    pub fn text_font_size(&self, brush_size: f64) -> f64 {
        brush_size * self.text_font_factor
    }

    /// Color used for every stroke and text item.
    pub fn ink_color(&self) -> Color {
        self.theme.ink().into()
    }
}

/// Trait for rendering backends.
///
/// Implementations can use Vello, wgpu directly, or other rendering engines.
pub trait Renderer: Send + Sync {
    /// Build the scene/command buffer for a frame.
    ///
    /// This method is called once per frame and should prepare all drawing commands.
    fn build_scene(&mut self, ctx: &RenderContext);
}

/// Drawing primitives a backend must provide for [`paint`].
///
/// Polylines are stroked with round caps and joins. Text is anchored at
/// the left end of its first baseline and set in a bold sans-serif face.
pub trait Painter {
    /// Fill the whole surface.
    fn clear(&mut self, color: Color, size: Size);
    fn stroke_polyline(&mut self, points: &[Point], width: f64, color: Color);
    fn fill_text(&mut self, text: &str, origin: Point, font_size: f64, color: Color);
}

/// Project a frame onto `painter`: background, then every item in order,
/// then the in-progress stroke on top.
///
/// Strokes with fewer than two points and single-point previews are skipped.
pub fn paint<P: Painter + ?Sized>(ctx: &RenderContext, painter: &mut P) {
    let ink = ctx.ink_color();
    painter.clear(ctx.background_color(), ctx.viewport_size);

    for item in ctx.items {
        match item {
            Item::Stroke(stroke) => {
                if stroke.len() < Stroke::MIN_POINTS {
                    continue;
                }
                painter.stroke_polyline(&stroke.points, stroke.brush_size, ink);
            }
            Item::Text(text) => {
                painter.fill_text(&text.value, text.position, ctx.text_font_size(text.brush_size), ink);
            }
        }
    }

    if let Some(preview) = ctx.preview.filter(|p| p.points.len() > 1) {
        painter.stroke_polyline(preview.points, preview.brush_size, ink);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sketchboard_core::input::{KeyEvent, PointerEvent};
    use sketchboard_core::items::{StrokeTool, TextAnnotation};
    use sketchboard_core::theme::Rgba;
    use sketchboard_core::tools::{ToolKind, ToolSettings};

    #[derive(Debug, PartialEq)]
    enum Op {
        Clear(Rgba),
        Polyline { points: usize, width: f64, color: Rgba },
        Text { text: String, origin: Point, font_size: f64, color: Rgba },
    }

    #[derive(Default)]
    struct Recorder(Vec<Op>);

    impl Painter for Recorder {
        fn clear(&mut self, color: Color, _size: Size) {
            self.0.push(Op::Clear(color.into()));
        }

        fn stroke_polyline(&mut self, points: &[Point], width: f64, color: Color) {
            self.0.push(Op::Polyline {
                points: points.len(),
                width,
                color: color.into(),
            });
        }

        fn fill_text(&mut self, text: &str, origin: Point, font_size: f64, color: Color) {
            self.0.push(Op::Text {
                text: text.to_string(),
                origin,
                font_size,
                color: color.into(),
            });
        }
    }

    fn line(brush: f64) -> Item {
        Stroke::new(vec![Point::new(0.0, 0.0), Point::new(10.0, 0.0), Point::new(10.0, 10.0)], StrokeTool::Freehand, brush)
            .into()
    }

    #[test]
    fn test_empty_scene_clears_only() {
        let mut recorder = Recorder::default();
        paint(&RenderContext::new(&[], Size::new(800.0, 600.0)), &mut recorder);
        assert_eq!(recorder.0, vec![Op::Clear(Rgba::white())]);
    }

    #[test]
    fn test_items_in_order_with_theme_ink() {
        let items = vec![
            line(3.0),
            TextAnnotation::new(Point::new(5.0, 40.0), "hi", 2.0).unwrap().into(),
            line(9.0),
        ];
        let ctx = RenderContext::new(&items, Size::new(100.0, 100.0)).with_theme(Theme::Dark);

        let mut recorder = Recorder::default();
        paint(&ctx, &mut recorder);

        let white = Rgba::white();
        assert_eq!(
            recorder.0,
            vec![
                Op::Clear(Rgba::new(13, 17, 23, 255)),
                Op::Polyline { points: 3, width: 3.0, color: white },
                Op::Text {
                    text: "hi".into(),
                    origin: Point::new(5.0, 40.0),
                    font_size: 12.0,
                    color: white,
                },
                Op::Polyline { points: 3, width: 9.0, color: white },
            ]
        );
    }

    #[test]
    fn test_degenerate_stroke_skipped() {
        let items: Vec<Item> = vec![Stroke::new(vec![Point::new(1.0, 1.0)], StrokeTool::Freehand, 4.0).into()];
        let mut recorder = Recorder::default();
        paint(&RenderContext::new(&items, Size::new(10.0, 10.0)), &mut recorder);
        assert_eq!(recorder.0.len(), 1);
    }

    #[test]
    fn test_preview_drawn_last() {
        let mut board = Sketchboard::new();
        let settings = ToolSettings::default().with_tool(ToolKind::Pen).with_brush_size(6.0);

        board.handle_pointer_event(PointerEvent::Down { position: Point::new(0.0, 0.0) }, &settings);
        board.handle_pointer_event(PointerEvent::Move { position: Point::new(5.0, 0.0) }, &settings);
        board.handle_pointer_event(PointerEvent::Up, &settings);

        // Single-point preview is not drawn.
        board.handle_pointer_event(PointerEvent::Down { position: Point::new(0.0, 20.0) }, &settings);
        let mut recorder = Recorder::default();
        paint(&RenderContext::from_board(&board), &mut recorder);
        assert_eq!(recorder.0.len(), 2);

        board.handle_pointer_event(PointerEvent::Move { position: Point::new(9.0, 20.0) }, &settings);
        let mut recorder = Recorder::default();
        paint(&RenderContext::from_board(&board), &mut recorder);
        assert_eq!(recorder.0.len(), 3);
        assert_eq!(
            recorder.0[2],
            Op::Polyline { points: 2, width: 6.0, color: Rgba::black() }
        );
    }

    #[test]
    fn test_text_font_follows_config() {
        let mut board = Sketchboard::new();
        let settings = ToolSettings::default().with_tool(ToolKind::Text).with_brush_size(5.0);
        board.handle_pointer_event(PointerEvent::Down { position: Point::new(30.0, 30.0) }, &settings);
        board.handle_key_event(KeyEvent::Character("note".into()));
        board.handle_key_event(KeyEvent::Enter);

        let ctx = RenderContext::from_board(&board);
        let mut recorder = Recorder::default();
        paint(&ctx, &mut recorder);
        assert!(matches!(&recorder.0[1], Op::Text { font_size, .. } if (*font_size - 30.0).abs() < f64::EPSILON));
        assert!((ctx.text_font_size(4.0) - 24.0).abs() < f64::EPSILON);
    }
}
