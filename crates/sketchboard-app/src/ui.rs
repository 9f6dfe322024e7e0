//! UI components using egui.

use crate::shortcuts::ShortcutRegistry;
use egui::{Align2, Color32, Context, CornerRadius, Frame, Margin, Pos2, RichText, Stroke, Vec2};
use sketchboard_core::canvas::Sketchboard;
use sketchboard_core::theme::Theme;
use sketchboard_core::tools::{TextDraft, ToolKind, ToolSettings};

/// Distance between the text anchor and the top of the inline text field.
const TEXT_FIELD_OFFSET: f32 = 40.0;

/// UI state mirrored from the board once per frame.
#[derive(Debug, Clone)]
pub struct UiState {
    /// Toolbar selection; passed to the board with every pointer event.
    pub settings: ToolSettings,
    pub theme: Theme,
    pub can_undo: bool,
    pub can_redo: bool,
    pub item_count: usize,
    /// Name of the board's current interaction, for the status line.
    pub interaction: &'static str,
    pub shortcuts_open: bool,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            settings: ToolSettings::default(),
            theme: Theme::default(),
            can_undo: false,
            can_redo: false,
            item_count: 0,
            interaction: "idle",
            shortcuts_open: false,
        }
    }
}

impl UiState {
    pub fn new(settings: ToolSettings) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }

    /// Refresh the read-only fields from the board.
    pub fn sync(&mut self, board: &Sketchboard) {
        self.theme = board.theme();
        self.can_undo = board.can_undo();
        self.can_redo = board.can_redo();
        self.item_count = board.item_count();
        self.interaction = board.interaction().name();
    }
}

/// Actions that can be triggered by the UI.
#[derive(Debug, Clone, PartialEq)]
pub enum UiAction {
    /// Change the current tool.
    SetTool(ToolKind),
    SetBrushSize(f64),
    Undo,
    Redo,
    /// Remove every item (undoable).
    Clear,
    ToggleTheme,
    /// Abandon the current stroke, erase or text draft.
    Cancel,
    /// Enter pressed in the inline text field.
    CommitText,
    /// Escape pressed in the inline text field.
    CancelText,
    ToggleShortcuts,
}

/// Render all UI and return the first triggered action.
pub fn render_ui(ctx: &Context, ui_state: &mut UiState, text_draft: Option<&mut TextDraft>) -> Option<UiAction> {
    ctx.set_visuals(if ui_state.theme.is_dark() {
        egui::Visuals::dark()
    } else {
        egui::Visuals::light()
    });

    let toolbar_action = render_toolbar(ctx, ui_state);
    let text_action = text_draft.and_then(|draft| render_text_field(ctx, draft, ui_state.theme));
    render_status(ctx, ui_state);
    if ui_state.shortcuts_open {
        render_shortcuts_modal(ctx, ui_state);
    }

    text_action.or(toolbar_action)
}

/// Render the toolbar and return any triggered action.
fn render_toolbar(ctx: &Context, ui_state: &UiState) -> Option<UiAction> {
    let mut action = None;

    egui::Area::new(egui::Id::new("toolbar"))
        .anchor(Align2::CENTER_TOP, Vec2::new(0.0, 12.0))
        .show(ctx, |ui| {
            panel_frame(ui_state.theme).show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.spacing_mut().item_spacing = Vec2::new(4.0, 0.0);

                    for tool in ToolKind::ALL {
                        let selected = ui_state.settings.tool == tool;
                        if ui
                            .selectable_label(selected, tool.label())
                            .on_hover_text(tool_hint(tool))
                            .clicked()
                        {
                            action = Some(UiAction::SetTool(tool));
                        }
                    }

                    ui.separator();

                    let mut brush = ui_state.settings.brush_size();
                    let slider = egui::Slider::new(&mut brush, ui_state.settings.brush_range())
                        .step_by(1.0)
                        .text("Brush");
                    if ui.add(slider).changed() {
                        action = Some(UiAction::SetBrushSize(brush));
                    }

                    ui.separator();

                    if ui
                        .add_enabled(ui_state.can_undo, egui::Button::new("Undo"))
                        .on_hover_text("Undo (Ctrl+Z)")
                        .clicked()
                    {
                        action = Some(UiAction::Undo);
                    }
                    if ui
                        .add_enabled(ui_state.can_redo, egui::Button::new("Redo"))
                        .on_hover_text("Redo (Ctrl+Y)")
                        .clicked()
                    {
                        action = Some(UiAction::Redo);
                    }
                    if ui
                        .add_enabled(ui_state.item_count > 0, egui::Button::new("Clear"))
                        .on_hover_text("Clear board (Ctrl+Delete)")
                        .clicked()
                    {
                        action = Some(UiAction::Clear);
                    }

                    ui.separator();

                    let theme_label = if ui_state.theme.is_dark() { "Light" } else { "Dark" };
                    if ui.button(theme_label).on_hover_text("Toggle theme (Ctrl+D)").clicked() {
                        action = Some(UiAction::ToggleTheme);
                    }
                    if ui.button("?").on_hover_text("Keyboard shortcuts (F1)").clicked() {
                        action = Some(UiAction::ToggleShortcuts);
                    }
                });
            });
        });

    action
}

fn tool_hint(tool: ToolKind) -> &'static str {
    match tool {
        ToolKind::Pen => "Pen (P)",
        ToolKind::Magic => "Magic: snaps to line, circle or rectangle (M)",
        ToolKind::Text => "Text (T)",
        ToolKind::Eraser => "Eraser (E)",
    }
}

/// Inline single-line field placed just above the text anchor.
fn render_text_field(ctx: &Context, draft: &mut TextDraft, theme: Theme) -> Option<UiAction> {
    let mut action = None;
    let pos = Pos2::new(draft.anchor.x as f32, draft.anchor.y as f32 - TEXT_FIELD_OFFSET);

    egui::Area::new(egui::Id::new("text_field"))
        .fixed_pos(pos)
        .order(egui::Order::Foreground)
        .show(ctx, |ui| {
            panel_frame(theme).inner_margin(Margin::same(4)).show(ui, |ui| {
                let response = ui.add(
                    egui::TextEdit::singleline(&mut draft.value)
                        .hint_text("Type, Enter to place")
                        .desired_width(220.0),
                );
                if !response.has_focus() && !response.lost_focus() {
                    response.request_focus();
                }

                let (enter, escape) =
                    ui.input(|i| (i.key_pressed(egui::Key::Enter), i.key_pressed(egui::Key::Escape)));
                if escape {
                    action = Some(UiAction::CancelText);
                } else if enter && (response.lost_focus() || response.has_focus()) {
                    action = Some(UiAction::CommitText);
                }
            });
        });

    action
}

/// Bottom-left readout of item count and interaction.
fn render_status(ctx: &Context, ui_state: &UiState) {
    egui::Area::new(egui::Id::new("status"))
        .anchor(Align2::LEFT_BOTTOM, Vec2::new(12.0, -12.0))
        .interactable(false)
        .show(ctx, |ui| {
            let color = if ui_state.theme.is_dark() {
                Color32::from_gray(170)
            } else {
                Color32::from_gray(90)
            };
            let noun = if ui_state.item_count == 1 { "item" } else { "items" };
            ui.label(
                RichText::new(format!(
                    "{} {noun} | {} | brush {:.0}",
                    ui_state.item_count,
                    ui_state.interaction,
                    ui_state.settings.brush_size()
                ))
                .size(12.0)
                .color(color),
            );
        });
}

fn render_shortcuts_modal(ctx: &Context, ui_state: &mut UiState) {
    let mut open = ui_state.shortcuts_open;
    egui::Window::new("Keyboard Shortcuts")
        .open(&mut open)
        .collapsible(false)
        .resizable(false)
        .anchor(Align2::CENTER_CENTER, Vec2::ZERO)
        .show(ctx, |ui| {
            egui::Grid::new("shortcuts_grid").striped(true).show(ui, |ui| {
                for shortcut in ShortcutRegistry::all() {
                    ui.label(RichText::new(shortcut.format()).monospace());
                    ui.label(shortcut.description);
                    ui.end_row();
                }
            });
        });
    ui_state.shortcuts_open = open;
}

/// Common panel frame style.
fn panel_frame(theme: Theme) -> Frame {
    let (fill, border) = if theme.is_dark() {
        (Color32::from_rgb(22, 27, 34), Color32::from_gray(60))
    } else {
        (Color32::from_rgba_unmultiplied(250, 250, 252, 250), Color32::from_gray(220))
    };
    Frame::new()
        .fill(fill)
        .corner_radius(CornerRadius::same(8))
        .stroke(Stroke::new(1.0, border))
        .shadow(egui::epaint::Shadow {
            spread: 0,
            blur: 8,
            offset: [0, 2],
            color: Color32::from_black_alpha(15),
        })
        .inner_margin(Margin::same(8))
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Point;
    use sketchboard_core::input::PointerEvent;

    #[test]
    fn test_sync_from_board() {
        let mut board = Sketchboard::new();
        let settings = ToolSettings::default();
        board.handle_pointer_event(PointerEvent::Down { position: Point::new(0.0, 0.0) }, &settings);
        board.handle_pointer_event(PointerEvent::Move { position: Point::new(10.0, 0.0) }, &settings);

        let mut ui_state = UiState::new(settings);
        ui_state.sync(&board);
        assert_eq!(ui_state.interaction, "drawing");
        assert_eq!(ui_state.item_count, 0);

        board.handle_pointer_event(PointerEvent::Up, &settings);
        board.set_theme(Theme::Dark);
        ui_state.sync(&board);
        assert_eq!(ui_state.item_count, 1);
        assert!(ui_state.can_undo);
        assert!(!ui_state.can_redo);
        assert_eq!(ui_state.theme, Theme::Dark);
    }

    #[test]
    fn test_render_ui_headless() {
        let ctx = Context::default();
        let mut ui_state = UiState::default();
        let mut draft = TextDraft::new(Point::new(100.0, 100.0), 4.0);

        let mut action = Some(UiAction::Undo);
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            action = render_ui(ctx, &mut ui_state, Some(&mut draft));
        });
        assert_eq!(action, None);
    }

    fn key_press(key: egui::Key) -> egui::RawInput {
        egui::RawInput {
            events: vec![egui::Event::Key {
                key,
                physical_key: None,
                pressed: true,
                repeat: false,
                modifiers: egui::Modifiers::NONE,
            }],
            ..Default::default()
        }
    }

    #[test]
    fn test_text_field_keys_act_in_their_frame() {
        let ctx = Context::default();
        let mut ui_state = UiState::default();
        let mut draft = TextDraft::new(Point::new(100.0, 100.0), 4.0);

        // First frame focuses the field.
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            render_ui(ctx, &mut ui_state, Some(&mut draft));
        });

        let mut action = None;
        let _ = ctx.run(key_press(egui::Key::Escape), |ctx| {
            action = render_ui(ctx, &mut ui_state, Some(&mut draft));
        });
        assert_eq!(action, Some(UiAction::CancelText));
    }
}
