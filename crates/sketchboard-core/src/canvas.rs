//! Sketch document, undo history and the interactive board.

use crate::config::{ErasePolicy, SketchConfig};
use crate::input::{KeyEvent, PointerEvent};
use crate::items::{Item, Stroke, StrokeTool, TextAnnotation};
use crate::recognizer;
use crate::theme::Theme;
use crate::tools::{Interaction, TextDraft, ToolKind, ToolSettings};
use kurbo::{Point, Size};

/// The ordered scene plus full-snapshot undo/redo stacks.
///
/// Every user-visible change goes through [`SketchDocument::commit`], which
/// pushes the pre-mutation scene onto the undo stack and empties the redo
/// stack. History depth is unbounded.
#[derive(Debug, Clone, Default)]
pub struct SketchDocument {
    items: Vec<Item>,
    undo_stack: Vec<Vec<Item>>,
    /// Last element is the next state to redo.
    redo_stack: Vec<Vec<Item>>,
}

impl SketchDocument {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Items in paint order (back to front).
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Adopt `items` as the current scene, recording the old scene for undo.
    pub fn commit(&mut self, items: Vec<Item>) {
        let previous = std::mem::replace(&mut self.items, items);
        self.record(previous);
    }

    /// Commit the current scene with `item` appended.
    pub fn push(&mut self, item: Item) {
        let mut items = Vec::with_capacity(self.items.len() + 1);
        items.extend_from_slice(&self.items);
        items.push(item);
        self.commit(items);
    }

    /// Undo the last change.
    /// Returns true if undo was performed, false if nothing to undo.
    pub fn undo(&mut self) -> bool {
        let Some(snapshot) = self.undo_stack.pop() else {
            return false;
        };
        let current = std::mem::replace(&mut self.items, snapshot);
        self.redo_stack.push(current);
        true
    }

    /// Redo the last undone change.
    /// Returns true if redo was performed, false if nothing to redo.
    pub fn redo(&mut self) -> bool {
        let Some(snapshot) = self.redo_stack.pop() else {
            return false;
        };
        let current = std::mem::replace(&mut self.items, snapshot);
        self.undo_stack.push(current);
        true
    }

    /// Remove every item as one undoable step. No-op on an empty scene.
    pub fn clear(&mut self) -> bool {
        if self.items.is_empty() {
            return false;
        }
        self.commit(Vec::new());
        true
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }

    /// Replace the live scene without touching history (mid-gesture edits).
    pub(crate) fn replace_live(&mut self, items: Vec<Item>) {
        self.items = items;
    }

    /// Record `previous` as the state preceding the current scene.
    pub(crate) fn record(&mut self, previous: Vec<Item>) {
        self.undo_stack.push(previous);
        self.redo_stack.clear();
    }
}

/// In-progress stroke shown on top of the scene while drawing.
#[derive(Debug, Clone, Copy)]
pub struct Preview<'a> {
    pub points: &'a [Point],
    pub brush_size: f64,
}

/// The sketch engine: document, pointer state machine, theme and viewport.
///
/// All state is owned here and mutated synchronously from the host's event
/// handlers. Tool settings arrive with each pointer event instead of being
/// stored, so the host toolbar stays the single source of truth.
#[derive(Debug, Clone)]
pub struct Sketchboard {
    document: SketchDocument,
    interaction: Interaction,
    theme: Theme,
    viewport_size: Size,
    config: SketchConfig,
    needs_redraw: bool,
}

impl Default for Sketchboard {
    fn default() -> Self {
        Self::new()
    }
}

impl Sketchboard {
    /// Create an empty board with default configuration.
    pub fn new() -> Self {
        Self::with_config(SketchConfig::default())
    }

    pub fn with_config(config: SketchConfig) -> Self {
        Self {
            document: SketchDocument::new(),
            interaction: Interaction::Idle,
            theme: Theme::default(),
            viewport_size: Size::new(800.0, 600.0),
            config,
            needs_redraw: true,
        }
    }

    pub fn config(&self) -> &SketchConfig {
        &self.config
    }

    pub fn document(&self) -> &SketchDocument {
        &self.document
    }

    pub fn items(&self) -> &[Item] {
        self.document.items()
    }

    /// Number of items on the board, for the status readout.
    pub fn item_count(&self) -> usize {
        self.document.len()
    }

    pub fn interaction(&self) -> &Interaction {
        &self.interaction
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn set_theme(&mut self, theme: Theme) {
        if self.theme != theme {
            log::debug!("Theme changed to {}", theme.name());
            self.theme = theme;
            self.needs_redraw = true;
        }
    }

    pub fn viewport_size(&self) -> Size {
        self.viewport_size
    }

    /// Resize the drawing surface. Recorded points are not rescaled.
    pub fn set_viewport_size(&mut self, width: f64, height: f64) {
        self.viewport_size = Size::new(width, height);
        self.needs_redraw = true;
    }

    /// The stroke being drawn, if any.
    pub fn preview(&self) -> Option<Preview<'_>> {
        match &self.interaction {
            Interaction::Drawing { points, brush_size, .. } => Some(Preview {
                points,
                brush_size: *brush_size,
            }),
            _ => None,
        }
    }

    pub fn text_draft(&self) -> Option<&TextDraft> {
        match &self.interaction {
            Interaction::TextPending(draft) => Some(draft),
            _ => None,
        }
    }

    /// Mutable access for hosts that edit the draft through their own widget.
    pub fn text_draft_mut(&mut self) -> Option<&mut TextDraft> {
        match &mut self.interaction {
            Interaction::TextPending(draft) => Some(draft),
            _ => None,
        }
    }

    /// Feed a pointer event with the toolbar state at the time of the event.
    pub fn handle_pointer_event(&mut self, event: PointerEvent, settings: &ToolSettings) {
        match event {
            PointerEvent::Down { position } => self.pointer_down(position, settings),
            PointerEvent::Move { position } => self.pointer_move(position, settings),
            PointerEvent::Up | PointerEvent::Leave => self.end_gesture(),
        }
    }

    /// Feed a key event. Returns true if the open text field consumed it.
    pub fn handle_key_event(&mut self, event: KeyEvent) -> bool {
        let Interaction::TextPending(draft) = &mut self.interaction else {
            return false;
        };
        match event {
            KeyEvent::Character(text) => draft.value.push_str(&text),
            KeyEvent::Backspace => {
                draft.value.pop();
            }
            KeyEvent::Enter => self.commit_text(),
            KeyEvent::Escape => self.discard_text(),
        }
        true
    }

    pub fn undo(&mut self) -> bool {
        self.settle_erase();
        let undone = self.document.undo();
        if undone {
            log::debug!("Undo ({} items, {} more)", self.document.len(), self.document.undo_depth());
            self.needs_redraw = true;
        }
        undone
    }

    pub fn redo(&mut self) -> bool {
        self.settle_erase();
        let redone = self.document.redo();
        if redone {
            log::debug!("Redo ({} items, {} more)", self.document.len(), self.document.redo_depth());
            self.needs_redraw = true;
        }
        redone
    }

    /// Remove every item as one undoable step.
    pub fn clear(&mut self) -> bool {
        self.settle_erase();
        let cleared = self.document.clear();
        if cleared {
            log::debug!("Board cleared");
            self.needs_redraw = true;
        }
        cleared
    }

    pub fn can_undo(&self) -> bool {
        self.document.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.document.can_redo()
    }

    /// Abandon the current interaction (tool switch, focus loss).
    ///
    /// An in-progress stroke or text draft is dropped. Removals already made
    /// by an eraser drag are kept and recorded.
    pub fn cancel(&mut self) {
        match std::mem::take(&mut self.interaction) {
            Interaction::Idle => return,
            Interaction::Drawing { points, .. } => {
                log::trace!("Cancelled stroke with {} points", points.len());
            }
            Interaction::Erasing { base, removed, committed } => {
                self.finish_erase(base, removed, committed);
            }
            Interaction::TextPending(_) => log::trace!("Cancelled text draft"),
        }
        self.needs_redraw = true;
    }

    /// Returns true once after any change that affects the rendered frame.
    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.needs_redraw)
    }

    /// Force the next [`Sketchboard::take_redraw`] to report a change.
    pub fn request_redraw(&mut self) {
        self.needs_redraw = true;
    }

    fn pointer_down(&mut self, position: Point, settings: &ToolSettings) {
        // A missed pointer-up must not leak a gesture into the next one.
        self.end_gesture();
        if let Interaction::TextPending(draft) = &self.interaction {
            log::trace!("Discarding text draft at ({:.0}, {:.0})", draft.anchor.x, draft.anchor.y);
            self.interaction = Interaction::Idle;
        }

        let brush_size = settings.brush_size();
        match settings.tool {
            ToolKind::Pen => self.begin_stroke(StrokeTool::Freehand, position, brush_size),
            ToolKind::Magic => self.begin_stroke(StrokeTool::Shape, position, brush_size),
            ToolKind::Text => {
                self.interaction = Interaction::TextPending(TextDraft::new(position, brush_size));
            }
            ToolKind::Eraser => {
                self.interaction = Interaction::Erasing {
                    base: self.document.items().to_vec(),
                    removed: false,
                    committed: false,
                };
                self.erase_at(position, brush_size);
            }
        }
        self.needs_redraw = true;
    }

    fn begin_stroke(&mut self, tool: StrokeTool, position: Point, brush_size: f64) {
        self.interaction = Interaction::Drawing {
            tool,
            brush_size,
            points: vec![position],
        };
    }

    fn pointer_move(&mut self, position: Point, settings: &ToolSettings) {
        if let Interaction::Drawing { points, .. } = &mut self.interaction {
            points.push(position);
            self.needs_redraw = true;
        } else if matches!(self.interaction, Interaction::Erasing { .. }) {
            self.erase_at(position, settings.brush_size());
        }
    }

    /// Pointer-up or pointer-leave. An open text field stays open.
    fn end_gesture(&mut self) {
        match std::mem::take(&mut self.interaction) {
            Interaction::Drawing { tool, brush_size, points } => {
                self.finish_stroke(tool, brush_size, points);
                self.needs_redraw = true;
            }
            Interaction::Erasing { base, removed, committed } => {
                self.finish_erase(base, removed, committed);
            }
            pending @ Interaction::TextPending(_) => self.interaction = pending,
            Interaction::Idle => {}
        }
    }

    fn finish_stroke(&mut self, tool: StrokeTool, brush_size: f64, points: Vec<Point>) {
        if points.len() < Stroke::MIN_POINTS {
            log::trace!("Discarding tap");
            return;
        }

        let points = match tool {
            StrokeTool::Freehand => points,
            StrokeTool::Shape => match recognizer::recognize(&points, &self.config.recognizer) {
                Some(recognized) => {
                    log::debug!(
                        "Magic stroke of {} points recognized as {}",
                        points.len(),
                        recognized.class.name()
                    );
                    recognized.points
                }
                None => points,
            },
        };

        let stroke = Stroke::new(points, tool, brush_size);
        log::debug!("Committed stroke {} ({} points)", stroke.id(), stroke.len());
        self.document.push(stroke.into());
    }

    fn erase_at(&mut self, position: Point, brush_size: f64) {
        let Interaction::Erasing { removed, committed, .. } = &mut self.interaction else {
            return;
        };

        let stroke_radius = self.config.stroke_erase_radius(brush_size);
        let text_radius = self.config.text_hit_radius;
        let survivors: Vec<Item> = self
            .document
            .items()
            .iter()
            .filter(|item| !item.hit_by_eraser(position, stroke_radius, text_radius))
            .cloned()
            .collect();

        let hits = self.document.len() - survivors.len();
        if hits == 0 {
            return;
        }
        log::debug!("Eraser removed {hits} item(s) at ({:.0}, {:.0})", position.x, position.y);

        match self.config.erase_policy {
            ErasePolicy::FirstHit if !*committed => {
                self.document.commit(survivors);
                *committed = true;
            }
            _ => self.document.replace_live(survivors),
        }
        *removed = true;
        self.needs_redraw = true;
    }

    fn finish_erase(&mut self, base: Vec<Item>, removed: bool, committed: bool) {
        if removed && !committed {
            self.document.record(base);
        }
    }

    /// Close an eraser drag before history is navigated or cleared, so its
    /// snapshot never goes stale.
    fn settle_erase(&mut self) {
        if matches!(self.interaction, Interaction::Erasing { .. }) {
            self.end_gesture();
        }
    }

    fn commit_text(&mut self) {
        let Interaction::TextPending(draft) = std::mem::take(&mut self.interaction) else {
            return;
        };
        match TextAnnotation::new(draft.anchor, draft.value, draft.brush_size) {
            Some(text) => {
                log::debug!("Committed text {} at ({:.0}, {:.0})", text.id(), text.position.x, text.position.y);
                self.document.push(text.into());
            }
            None => log::trace!("Empty text discarded"),
        }
        self.needs_redraw = true;
    }

    fn discard_text(&mut self) {
        self.interaction = Interaction::Idle;
        self.needs_redraw = true;
    }
}
