//! Application state and event loop

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use glam::IVec2;
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::{ElementState, MouseButton, WindowEvent},
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowAttributes, WindowId},
};

use crate::config::AppConfig;
use crate::input::InputState;
use crate::render::Renderer;
use crate::simulation::{Brush, MoleculeId, Simulation};
use crate::ui::{show_brush_outline, show_hud, HudStats};

/// Main application state
pub struct App {
    // Window and rendering
    window: Arc<Window>,
    renderer: Renderer,
    egui_ctx: egui::Context,
    egui_state: egui_winit::State,
    egui_renderer: egui_wgpu::Renderer,

    // Simulation
    simulation: Simulation,
    config: AppConfig,

    // Input state
    input: InputState,
    /// Cursor position in logical window coordinates, for the brush outline
    cursor: Option<(f32, f32)>,

    // Timing
    last_tick: Instant,
    tick_accumulator: Duration,
    tick_interval: Duration,
    frame_count: u64,
    fps_update_time: Instant,
    fps: f32,

    // Pause and single step mode
    paused: bool,
    should_step: bool,
}

impl App {
    /// Create a new app
    pub async fn new(config: AppConfig, seed: u64) -> Result<(Self, EventLoop<()>)> {
        // Create event loop
        let event_loop = EventLoop::new()?;

        // Create window (fixed size, the grid never resizes)
        let window_attrs = WindowAttributes::default()
            .with_title("Molecula")
            .with_inner_size(LogicalSize::new(
                config.display.window_width,
                config.display.window_height,
            ))
            .with_resizable(false);

        let window = Arc::new(event_loop.create_window(window_attrs)?);

        // Create renderer with a texture covering the whole display area
        let renderer = Renderer::new(
            &window,
            config.display.window_width,
            config.display.window_height,
        )
        .await?;

        // Create simulation
        let (grid_width, grid_height) = config.display.grid_size();
        let simulation = Simulation::new(grid_width, grid_height, seed);
        log::info!(
            "World grid {}x{} at {} px/cell",
            grid_width,
            grid_height,
            config.display.cell_scale
        );

        let input = InputState::new(MoleculeId::SAND, config.brush.radius);
        let tick_interval = Duration::from_secs_f64(1.0 / config.sim.tick_rate.max(1) as f64);

        // Setup egui
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
            &renderer.device,
            renderer.surface_format(),
            egui_wgpu::RendererOptions::default(),
        );

        Ok((
            Self {
                window,
                renderer,
                egui_ctx,
                egui_state,
                egui_renderer,
                simulation,
                config,
                input,
                cursor: None,
                last_tick: Instant::now(),
                tick_accumulator: Duration::ZERO,
                tick_interval,
                frame_count: 0,
                fps_update_time: Instant::now(),
                fps: 0.0,
                paused: false,
                should_step: false,
            },
            event_loop,
        ))
    }

    /// Run the event loop
    pub fn run(event_loop: EventLoop<()>, mut app: Self) -> Result<()> {
        event_loop.run_app(&mut app)?;
        Ok(())
    }

    /// Paint with the brush, then advance the simulation on a fixed timestep
    fn update(&mut self) {
        let now = Instant::now();

        // Update FPS
        self.frame_count += 1;
        if now.duration_since(self.fps_update_time).as_secs_f32() >= 1.0 {
            self.fps = self.frame_count as f32;
            self.frame_count = 0;
            self.fps_update_time = now;
        }

        // Paint before stepping so the stroke is part of this generation.
        // Painting also works while paused.
        if self.input.painting() {
            if let Some(pointer) = self.input.pointer() {
                let brush = Brush {
                    radius: self.input.radius(),
                    coverage: self.config.brush.coverage,
                };
                self.simulation.paint(
                    brush,
                    self.config.display.cell_scale,
                    pointer.x,
                    pointer.y,
                    self.input.selected(),
                );
            }
        }

        if self.paused {
            if self.should_step {
                if let Err(e) = self.simulation.advance() {
                    log::error!("Simulation error: {}", e);
                }
                self.should_step = false;
            }
            // Don't accumulate time while paused
            self.tick_accumulator = Duration::ZERO;
            self.last_tick = now;
            return;
        }

        self.tick_accumulator += now.duration_since(self.last_tick);
        self.last_tick = now;

        let mut ticks_run = 0;
        while self.tick_accumulator >= self.tick_interval
            && ticks_run < self.config.sim.max_ticks_per_frame
        {
            if let Err(e) = self.simulation.advance() {
                log::error!("Simulation error: {}", e);
                break;
            }
            self.tick_accumulator -= self.tick_interval;
            ticks_run += 1;
        }

        // Drop backlog instead of spiraling when frames run long
        if self.tick_accumulator >= self.tick_interval {
            self.tick_accumulator = Duration::ZERO;
        }
    }

    /// Render frame
    fn render(&mut self) -> Result<()> {
        // Update world texture
        self.renderer.update_world_texture(
            self.simulation.grid(),
            self.simulation.catalog(),
            self.config.display.cell_scale,
        )?;

        // Collect data for egui closure to avoid borrow checker issues
        let (selected_name, selected_color) =
            match self.simulation.catalog().lookup(self.input.selected()) {
                Ok(kind) => (kind.name.clone(), kind.color),
                Err(_) => ("?".to_string(), [255, 0, 255]),
            };
        let molecule_count = self.simulation.molecule_count();
        let ticks = self.simulation.ticks();
        let fps = self.fps;
        let brush_radius = self.input.radius();
        let paused = self.paused;
        let cursor = self.cursor;

        // Begin frame
        let output = self.renderer.begin_frame()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder =
            self.renderer
                .device
                .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                    label: Some("render_encoder"),
                });

        // Render world
        self.renderer.render_world(&mut encoder, &view)?;

        // Run egui
        let raw_input = self.egui_state.take_egui_input(&self.window);
        let full_output = self.egui_ctx.run(raw_input, |ctx| {
            let stats = HudStats {
                fps,
                ticks,
                molecule_count,
                brush_radius,
                selected_name: &selected_name,
                selected_color,
                paused,
            };
            show_hud(ctx, &stats);

            if let Some(center) = cursor {
                show_brush_outline(ctx, center, brush_radius as f32);
            }
        });

        // Handle egui platform output
        self.egui_state
            .handle_platform_output(&self.window, full_output.platform_output);

        // Tessellate egui shapes
        let paint_jobs = self
            .egui_ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);

        // Update egui textures
        for (id, delta) in &full_output.textures_delta.set {
            self.egui_renderer.update_texture(
                &self.renderer.device,
                &self.renderer.queue,
                *id,
                delta,
            );
        }

        // Create screen descriptor
        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [self.renderer.size().width, self.renderer.size().height],
            pixels_per_point: full_output.pixels_per_point,
        };

        // Update egui buffers
        self.egui_renderer.update_buffers(
            &self.renderer.device,
            &self.renderer.queue,
            &mut encoder,
            &paint_jobs,
            &screen_descriptor,
        );

        // Render egui
        {
            let render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("egui_render_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    depth_slice: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            self.egui_renderer.render(
                &mut render_pass.forget_lifetime(),
                &paint_jobs,
                &screen_descriptor,
            );
        }

        // Free egui textures
        for id in &full_output.textures_delta.free {
            self.egui_renderer.free_texture(id);
        }

        // Submit and present
        self.renderer
            .queue
            .submit(std::iter::once(encoder.finish()));
        self.renderer.end_frame(output);

        Ok(())
    }

    /// Map a cursor position to grid coordinates
    fn cursor_to_grid(&self, logical_x: f32, logical_y: f32) -> IVec2 {
        let scale = self.config.display.cell_scale.max(1) as f32;
        let grid = IVec2::new(
            (logical_x / scale).floor() as i32,
            (logical_y / scale).floor() as i32,
        );
        log::trace!(
            "cursor_to_grid: logical({:.0},{:.0}) -> grid({},{})",
            logical_x,
            logical_y,
            grid.x,
            grid.y
        );
        grid
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, _event_loop: &ActiveEventLoop) {
        // Window is created up front, nothing to do on resume
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        // Let egui handle events first
        let egui_response = self.egui_state.on_window_event(&self.window, &event);
        if egui_response.consumed {
            return;
        }

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                self.renderer.resize(size);
            }
            WindowEvent::RedrawRequested => {
                self.update();
                if let Err(e) = self.render() {
                    log::error!("Render error: {}", e);
                }
                self.window.request_redraw();
            }
            WindowEvent::CursorMoved { position, .. } => {
                let logical = position.to_logical::<f64>(self.window.scale_factor());
                let (x, y) = (logical.x as f32, logical.y as f32);
                self.cursor = Some((x, y));
                self.input.set_pointer(Some(self.cursor_to_grid(x, y)));
            }
            WindowEvent::CursorLeft { .. } => {
                self.cursor = None;
                self.input.set_pointer(None);
                self.input.set_painting(false);
            }
            WindowEvent::MouseInput { state, button, .. } => {
                let pressed = state == ElementState::Pressed;
                match button {
                    MouseButton::Left => self.input.set_painting(pressed),
                    MouseButton::Right => {
                        if pressed {
                            self.input.cycle_selected(self.simulation.catalog());
                        }
                    }
                    _ => {}
                }
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let scroll = match delta {
                    winit::event::MouseScrollDelta::LineDelta(_, y) => y * 3.0,
                    winit::event::MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / 20.0,
                };
                let steps = scroll.round() as i32;
                if steps != 0 {
                    self.input.adjust_radius(steps);
                }
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state == ElementState::Pressed {
                    match event.physical_key {
                        PhysicalKey::Code(KeyCode::Space) => {
                            self.paused = !self.paused;
                        }
                        PhysicalKey::Code(KeyCode::KeyS) => {
                            if self.paused {
                                self.should_step = true;
                            }
                        }
                        PhysicalKey::Code(KeyCode::KeyC) => {
                            self.simulation.clear();
                        }
                        PhysicalKey::Code(KeyCode::BracketLeft) => {
                            self.input.adjust_radius(-1);
                        }
                        PhysicalKey::Code(KeyCode::BracketRight) => {
                            self.input.adjust_radius(1);
                        }
                        PhysicalKey::Code(KeyCode::Escape) => {
                            event_loop.exit();
                        }
                        _ => {}
                    }
                }
            }
            _ => {}
        }
    }
}
