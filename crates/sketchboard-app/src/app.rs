//! Main application state and event loop.

use kurbo::Point;
use peniko::Color;
use sketchboard_core::canvas::Sketchboard;
use sketchboard_core::config::SketchConfig;
use sketchboard_core::input::{KeyEvent, PointerEvent};
use sketchboard_core::theme::Theme;
use sketchboard_core::tools::ToolSettings;
use sketchboard_render::{RenderContext, Renderer, RendererError, VelloRenderer};
use std::sync::Arc;
use vello::util::RenderSurface;
use vello::wgpu::PresentMode;
use vello::{AaConfig, RenderParams, RendererOptions};
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, MouseButton, TouchPhase, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::keyboard::{Key, ModifiersState, NamedKey};
use winit::window::{Window, WindowId};

use crate::shortcuts::ShortcutRegistry;
use crate::ui::{render_ui, UiAction, UiState};

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// Theme at startup.
    pub theme: Theme,
    /// Engine tunables (brush range, eraser radii, recognizer).
    pub sketch: SketchConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "Mind Vault Sketchboard".to_string(),
            width: 1280,
            height: 800,
            theme: Theme::default(),
            sketch: SketchConfig::default(),
        }
    }
}

/// Runtime state for the application.
struct AppState {
    // Windowing
    window: Arc<Window>,
    surface: RenderSurface<'static>,

    // Rendering
    vello_renderer: vello::Renderer,
    scene_renderer: VelloRenderer,
    /// Texture blitter for RGBA->surface format conversion
    texture_blitter: vello::wgpu::util::TextureBlitter,

    // egui
    egui_ctx: egui::Context,
    egui_state: egui_winit::State,
    egui_renderer: egui_wgpu::Renderer,
    ui_state: UiState,

    // State
    board: Sketchboard,
    /// Last cursor position in logical pixels.
    cursor: Point,
    modifiers: ModifiersState,
    /// Finger driving the current touch gesture; others are ignored.
    active_touch: Option<u64>,
}

/// Main application struct.
pub struct App {
    config: AppConfig,
    state: Option<AppState>,
    render_cx: Option<vello::util::RenderContext>,
}

impl App {
    /// Create a new application with default configuration.
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    /// Create a new application with custom configuration.
    pub fn with_config(config: AppConfig) -> Self {
        Self {
            config,
            state: None,
            render_cx: None,
        }
    }

    /// Run the application until the window closes.
    pub async fn run(config: AppConfig) -> Result<(), winit::error::EventLoopError> {
        let event_loop = EventLoop::new()?;
        let mut app = App::with_config(config);
        event_loop.run_app(&mut app)
    }

    /// Create the GPU surface and every per-window resource.
    fn init_state(&mut self, window: Arc<Window>) -> Result<AppState, RendererError> {
        let size = window.inner_size();
        let (width, height) = if size.width == 0 || size.height == 0 {
            (self.config.width, self.config.height)
        } else {
            (size.width, size.height)
        };
        log::info!("Surface size: {}x{}", width, height);

        let render_cx = self.render_cx.get_or_insert_with(vello::util::RenderContext::new);
        let surface = pollster::block_on(render_cx.create_surface(
            window.clone(),
            width,
            height,
            PresentMode::AutoVsync,
        ))
        .map_err(|e| RendererError::Surface(e.to_string()))?;

        let device = &render_cx.devices[surface.dev_id].device;

        let vello_renderer = vello::Renderer::new(device, RendererOptions::default())
            .map_err(|e| RendererError::InitFailed(e.to_string()))?;

        // Vello renders to Rgba8Unorm; the surface may be Bgra8Unorm.
        let texture_blitter = vello::wgpu::util::TextureBlitter::new(device, surface.config.format);

        let egui_ctx = egui::Context::default();
        let egui_state = egui_winit::State::new(
            egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(
            device,
            surface.config.format,
            egui_wgpu::RendererOptions::default(),
        );

        let mut board = Sketchboard::with_config(self.config.sketch.clone());
        board.set_theme(self.config.theme);
        let logical = winit::dpi::PhysicalSize::new(width, height).to_logical::<f64>(window.scale_factor());
        board.set_viewport_size(logical.width, logical.height);

        let mut ui_state = UiState::new(ToolSettings::from_config(board.config()));
        ui_state.sync(&board);

        log::info!("Sketchboard initialized - {}x{}", surface.config.width, surface.config.height);
        log::info!("Keyboard shortcuts: P=Pen, M=Magic, T=Text, E=Eraser, Ctrl+Z=Undo, Ctrl+Y=Redo");

        Ok(AppState {
            window,
            surface,
            vello_renderer,
            scene_renderer: VelloRenderer::new(),
            texture_blitter,
            egui_ctx,
            egui_state,
            egui_renderer,
            ui_state,
            board,
            cursor: Point::ZERO,
            modifiers: ModifiersState::empty(),
            active_touch: None,
        })
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    fn pointer(&mut self, event: PointerEvent) {
        let settings = self.ui_state.settings;
        self.board.handle_pointer_event(event, &settings);
    }

    fn apply_action(&mut self, action: UiAction) {
        log::debug!("UI action: {:?}", action);
        match action {
            UiAction::SetTool(tool) => {
                if self.ui_state.settings.tool != tool {
                    self.board.cancel();
                    self.ui_state.settings.tool = tool;
                }
            }
            UiAction::SetBrushSize(size) => self.ui_state.settings.set_brush_size(size),
            UiAction::Undo => {
                self.board.undo();
            }
            UiAction::Redo => {
                self.board.redo();
            }
            UiAction::Clear => {
                self.board.clear();
            }
            UiAction::ToggleTheme => self.board.set_theme(self.board.theme().toggled()),
            UiAction::Cancel => self.board.cancel(),
            UiAction::CommitText => {
                self.board.handle_key_event(KeyEvent::Enter);
            }
            UiAction::CancelText => {
                self.board.handle_key_event(KeyEvent::Escape);
            }
            UiAction::ToggleShortcuts => {
                self.ui_state.shortcuts_open = !self.ui_state.shortcuts_open;
            }
        }
        self.board.request_redraw();
    }

    fn handle_shortcut(&mut self, key: &Key) {
        let name = match key {
            Key::Character(c) => c.as_str(),
            Key::Named(NamedKey::Delete) => "Delete",
            Key::Named(NamedKey::Backspace) => "Delete",
            Key::Named(NamedKey::Escape) => "Escape",
            Key::Named(NamedKey::F1) => "F1",
            _ => return,
        };
        let ctrl = self.modifiers.control_key() || self.modifiers.super_key();
        if let Some(action) = ShortcutRegistry::lookup(name, ctrl, self.modifiers.shift_key()) {
            self.apply_action(action);
        }
    }

    fn redraw(&mut self, render_cx: &vello::util::RenderContext) {
        // Run egui and apply any action before the scene is built.
        self.ui_state.sync(&self.board);
        let egui_input = self.egui_state.take_egui_input(&self.window);
        let mut action: Option<UiAction> = None;
        let mut draft = self.board.text_draft_mut();
        let ui_state = &mut self.ui_state;
        let egui_output = self.egui_ctx.run(egui_input, |ctx| {
            if let Some(a) = render_ui(ctx, ui_state, draft.as_deref_mut()) {
                action = Some(a);
            }
        });
        let acted = action.is_some();
        if let Some(action) = action {
            self.apply_action(action);
        }

        self.egui_state.handle_platform_output(&self.window, egui_output.platform_output);
        let egui_primitives = self.egui_ctx.tessellate(egui_output.shapes, egui_output.pixels_per_point);

        let ctx = RenderContext::from_board(&self.board).with_scale_factor(self.window.scale_factor());
        self.scene_renderer.build_scene(&ctx);
        let scene = self.scene_renderer.take_scene();
        let background: Color = self.board.theme().background().into();

        let device_handle = &render_cx.devices[self.surface.dev_id];
        let device = &device_handle.device;
        let queue = &device_handle.queue;

        let surface_texture = match self.surface.surface.get_current_texture() {
            Ok(t) => t,
            Err(e) => {
                log::warn!("Failed to get surface texture: {:?}", e);
                return;
            }
        };

        let width = self.surface.config.width;
        let height = self.surface.config.height;

        let params = RenderParams {
            base_color: background,
            width,
            height,
            antialiasing_method: AaConfig::Area,
        };

        // Vello's compute shaders need a StorageBinding Rgba8Unorm target.
        let render_texture = device.create_texture(&vello::wgpu::TextureDescriptor {
            label: Some("vello render texture"),
            size: vello::wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: vello::wgpu::TextureDimension::D2,
            format: vello::wgpu::TextureFormat::Rgba8Unorm,
            usage: vello::wgpu::TextureUsages::STORAGE_BINDING
                | vello::wgpu::TextureUsages::COPY_SRC
                | vello::wgpu::TextureUsages::TEXTURE_BINDING,
            view_formats: &[],
        });
        let render_texture_view = render_texture.create_view(&vello::wgpu::TextureViewDescriptor::default());

        if let Err(e) =
            self.vello_renderer
                .render_to_texture(device, queue, &scene, &render_texture_view, &params)
        {
            log::error!("Failed to render: {:?}", e);
            return;
        }

        let surface_view = surface_texture
            .texture
            .create_view(&vello::wgpu::TextureViewDescriptor::default());

        {
            let mut blit_encoder = device.create_command_encoder(&vello::wgpu::CommandEncoderDescriptor {
                label: Some("blit encoder"),
            });
            self.texture_blitter
                .copy(device, &mut blit_encoder, &render_texture_view, &surface_view);
            queue.submit(std::iter::once(blit_encoder.finish()));
        }

        for (id, image_delta) in &egui_output.textures_delta.set {
            self.egui_renderer.update_texture(device, queue, *id, image_delta);
        }

        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [width, height],
            pixels_per_point: egui_output.pixels_per_point,
        };

        {
            let mut egui_encoder = device.create_command_encoder(&vello::wgpu::CommandEncoderDescriptor {
                label: Some("egui encoder"),
            });
            self.egui_renderer.update_buffers(
                device,
                queue,
                &mut egui_encoder,
                &egui_primitives,
                &screen_descriptor,
            );

            let render_pass = egui_encoder.begin_render_pass(&vello::wgpu::RenderPassDescriptor {
                label: Some("egui render pass"),
                color_attachments: &[Some(vello::wgpu::RenderPassColorAttachment {
                    view: &surface_view,
                    resolve_target: None,
                    ops: vello::wgpu::Operations {
                        load: vello::wgpu::LoadOp::Load, // Keep Vello content
                        store: vello::wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            // egui-wgpu needs a 'static render pass.
            let mut render_pass = render_pass.forget_lifetime();
            self.egui_renderer
                .render(&mut render_pass, &egui_primitives, &screen_descriptor);
            drop(render_pass);

            queue.submit(std::iter::once(egui_encoder.finish()));
        }

        for id in &egui_output.textures_delta.free {
            self.egui_renderer.free_texture(id);
        }
        surface_texture.present();

        let egui_wants_repaint = egui_output
            .viewport_output
            .get(&egui::ViewportId::ROOT)
            .is_some_and(|viewport| viewport.repaint_delay.is_zero());
        // After an action the toolbar still shows the old state.
        if egui_wants_repaint || acted {
            self.window.request_redraw();
        }
    }
}

/// Whether a window event leaves anything to draw: board changes, or egui
/// input (typing, hover) that only takes effect in the next egui pass.
fn needs_frame(board_dirty: bool, egui_repaint: bool) -> bool {
    board_dirty || egui_repaint
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }

        log::info!("Creating window...");
        let window_attrs = Window::default_attributes()
            .with_title(&self.config.title)
            .with_inner_size(LogicalSize::new(self.config.width, self.config.height));

        let window = match event_loop.create_window(window_attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                log::error!("Failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };

        log::info!("Window created, initializing renderer...");
        match self.init_state(window.clone()) {
            Ok(state) => {
                self.state = Some(state);
                window.request_redraw();
            }
            Err(e) => {
                log::error!("{e}");
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        let Some(state) = &mut self.state else {
            return;
        };

        let egui_response = state.egui_state.on_window_event(&state.window, &event);

        // Strokes in progress keep receiving the pointer even over the toolbar.
        let gesture_active = !state.board.interaction().is_idle() && state.board.text_draft().is_none();
        let egui_wants_pointer =
            egui_response.consumed || state.egui_ctx.is_pointer_over_area() || state.egui_ctx.wants_pointer_input();
        let egui_wants_keyboard = egui_response.consumed || state.egui_ctx.wants_keyboard_input();

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }

            WindowEvent::Resized(size) => {
                if size.width == 0 || size.height == 0 {
                    return;
                }

                let logical = size.to_logical::<f64>(state.window.scale_factor());
                state.board.set_viewport_size(logical.width, logical.height);

                if let Some(render_cx) = self.render_cx.as_mut() {
                    render_cx.resize_surface(&mut state.surface, size.width, size.height);
                }
            }

            WindowEvent::ScaleFactorChanged { .. } => state.board.request_redraw(),

            WindowEvent::RedrawRequested => {
                if let Some(render_cx) = self.render_cx.as_ref() {
                    state.redraw(render_cx);
                }
                // The frame just drawn reflects every change so far.
                state.board.take_redraw();
                return;
            }

            WindowEvent::CursorMoved { position, .. } => {
                let logical = position.to_logical::<f64>(state.window.scale_factor());
                state.cursor = Point::new(logical.x, logical.y);
                if !egui_wants_pointer || gesture_active {
                    state.pointer(PointerEvent::Move { position: state.cursor });
                }
            }

            WindowEvent::MouseInput {
                state: button_state,
                button: MouseButton::Left,
                ..
            } => match button_state {
                ElementState::Pressed => {
                    if !egui_wants_pointer {
                        state.pointer(PointerEvent::Down { position: state.cursor });
                    }
                }
                ElementState::Released => state.pointer(PointerEvent::Up),
            },

            WindowEvent::CursorLeft { .. } => state.pointer(PointerEvent::Leave),

            WindowEvent::Touch(touch) => {
                let logical = touch.location.to_logical::<f64>(state.window.scale_factor());
                let position = Point::new(logical.x, logical.y);
                match touch.phase {
                    TouchPhase::Started => {
                        if state.active_touch.is_none() && !egui_wants_pointer {
                            state.active_touch = Some(touch.id);
                            state.pointer(PointerEvent::Down { position });
                        }
                    }
                    TouchPhase::Moved if state.active_touch == Some(touch.id) => {
                        state.pointer(PointerEvent::Move { position });
                    }
                    TouchPhase::Ended | TouchPhase::Cancelled if state.active_touch == Some(touch.id) => {
                        state.active_touch = None;
                        state.pointer(PointerEvent::Up);
                    }
                    _ => {}
                }
            }

            WindowEvent::ModifiersChanged(modifiers) => {
                state.modifiers = modifiers.state();
            }

            WindowEvent::KeyboardInput { event, .. } => {
                // Keys typed into the text field still need a frame to reach egui.
                if !egui_wants_keyboard && event.state == ElementState::Pressed && !event.repeat {
                    state.handle_shortcut(&event.logical_key);
                }
            }

            WindowEvent::Focused(false) => {
                state.modifiers = ModifiersState::empty();
            }

            _ => {}
        }

        if needs_frame(state.board.take_redraw(), egui_response.repaint) {
            state.window.request_redraw();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_egui_repaint_schedules_frame() {
        // Keys consumed by the text field leave the board clean.
        assert!(needs_frame(false, true));
        assert!(needs_frame(true, false));
        assert!(!needs_frame(false, false));
    }
}
