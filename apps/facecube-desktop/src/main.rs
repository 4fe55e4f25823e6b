use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use egui::Context as EguiContext;
use facecube_common::{DEFAULT_VIEWPORT, FaceId, Viewport};
use facecube_input::{Action, Key, KeyInput, PointerTracker};
use facecube_kernel::{CubeVariant, Shell, ShellEvent};
use facecube_render::{ClickReport, InteractiveCube, OrbitCamera};
use facecube_render_wgpu::WgpuRenderer;
use facecube_tools::ShellInspector;
use glam::Vec2;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, KeyEvent, MouseButton, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

#[derive(Parser)]
#[command(name = "facecube-desktop", about = "Interactive face cube")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// What a face click does
    #[arg(short, long, value_enum, default_value = "label")]
    mode: Mode,
}

#[derive(Clone, Copy, ValueEnum)]
enum Mode {
    Reveal,
    Label,
}

impl From<Mode> for CubeVariant {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Reveal => CubeVariant::Reveal,
            Mode::Label => CubeVariant::Label,
        }
    }
}

/// Application state.
struct AppState {
    shell: Shell,
    cube: InteractiveCube,
    camera: OrbitCamera,
    pointer: PointerTracker,
    viewport: Viewport,
    show_inspector: bool,
    /// Face the inline editor last grabbed focus for.
    focused_editor: Option<FaceId>,
}

impl AppState {
    fn new(variant: CubeVariant) -> Self {
        let report = match variant {
            CubeVariant::Reveal => ClickReport::FaceOnly,
            CubeVariant::Label => ClickReport::FaceAndAnchor,
        };
        let mut camera = OrbitCamera::default();
        camera.set_viewport(DEFAULT_VIEWPORT);
        let mut cube = InteractiveCube::new(report);
        let shell = Shell::new(variant);
        cube.render(shell.surfaces());

        Self {
            shell,
            cube,
            camera,
            pointer: PointerTracker::new(),
            viewport: DEFAULT_VIEWPORT,
            show_inspector: false,
            focused_editor: None,
        }
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.viewport = Viewport::new(width.max(1) as f32, height.max(1) as f32);
        self.camera.set_viewport(self.viewport);
    }

    fn apply(&mut self, action: Action) {
        self.shell.apply(action);
        let changed = self.cube.render(self.shell.surfaces());
        for event in self.shell.drain_events() {
            tracing::debug!(?event, "shell");
            // A reopened session needs focus again, even on the same face.
            if matches!(event, ShellEvent::EditStarted { .. }) {
                self.focused_editor = None;
            }
        }
        if !changed.is_empty() {
            tracing::info!(?changed, "faces updated");
        }
    }

    fn pointer_moved(&mut self, pos: Vec2) {
        if let Some(delta) = self.pointer.moved(pos) {
            self.camera.orbit(delta);
        }
    }

    fn pointer_button(&mut self, pressed: bool) {
        if pressed {
            self.pointer.pressed();
            return;
        }
        let Some(pos) = self.pointer.released() else {
            return;
        };
        match self.cube.on_pointer_click(pos, &self.camera, self.viewport) {
            Some(click) => self.apply(Action::ClickFace(click)),
            None => tracing::debug!(x = pos.x, y = pos.y, "click missed the cube"),
        }
    }

    fn handle_key(&mut self, key: KeyCode, pressed: bool) {
        if !pressed {
            return;
        }
        match key {
            KeyCode::F1 => self.show_inspector = !self.show_inspector,
            KeyCode::Digit0 | KeyCode::Numpad0 => self.camera = self.reset_camera(),
            _ => {}
        }
    }

    fn reset_camera(&self) -> OrbitCamera {
        let mut camera = OrbitCamera::default();
        camera.set_viewport(self.viewport);
        camera
    }

    fn draw_ui(&mut self, ctx: &EguiContext) {
        self.draw_editor(ctx);

        if !self.show_inspector {
            return;
        }
        let summary = ShellInspector::summary(&self.shell);
        egui::SidePanel::left("inspector")
            .default_width(260.0)
            .show(ctx, |ui| {
                ui.heading("Face Cube");
                ui.separator();
                ui.label(format!("Variant: {:?}", summary.variant));
                match (&summary.edit_target, &summary.edit_buffer) {
                    (Some(face), Some(buffer)) => {
                        ui.label(format!("Editing {face}: {buffer:?}"));
                    }
                    _ => {
                        ui.label("Idle");
                    }
                }
                ui.separator();
                for face in &summary.faces {
                    ui.monospace(face.to_string());
                }
                ui.separator();
                ui.small("F1: Toggle Inspector | LMB drag: Orbit | Wheel: Zoom | 0: Reset");
            });
    }

    /// True once per opened session: the editor should grab keyboard focus.
    fn claim_editor_focus(&mut self, face: FaceId) -> bool {
        if self.focused_editor == Some(face) {
            return false;
        }
        self.focused_editor = Some(face);
        true
    }

    /// Inline label editor pinned to the anchor captured at click time.
    fn draw_editor(&mut self, ctx: &EguiContext) {
        let Some(overlay) = self.shell.editor_overlay() else {
            self.focused_editor = None;
            return;
        };
        let face = overlay.face;
        let mut text = overlay.text.to_owned();
        let pos = overlay.anchor / ctx.pixels_per_point();

        let mut key = None;
        egui::Area::new(egui::Id::new("face_editor"))
            .fixed_pos(egui::pos2(pos.x, pos.y))
            .pivot(egui::Align2::CENTER_CENTER)
            .show(ctx, |ui| {
                let response = ui.add(
                    egui::TextEdit::singleline(&mut text)
                        .desired_width(160.0)
                        .hint_text(face.spec().name),
                );
                if self.claim_editor_focus(face) {
                    response.request_focus();
                }
                if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                    key = Some(KeyInput::enter(text.clone()));
                } else if response.changed() {
                    key = Some(KeyInput::new(Key::Other, text.clone()));
                }
            });

        if let Some(key) = key {
            self.apply(key.to_action());
        }
    }
}

/// GPU objects created once the window exists.
struct Gpu {
    window: Arc<Window>,
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    renderer: WgpuRenderer,
    egui_winit: egui_winit::State,
    egui_renderer: egui_wgpu::Renderer,
}

struct GpuApp {
    state: AppState,
    gpu: Option<Gpu>,
    egui_ctx: EguiContext,
}

impl GpuApp {
    fn new(variant: CubeVariant) -> Self {
        Self {
            state: AppState::new(variant),
            gpu: None,
            egui_ctx: EguiContext::default(),
        }
    }

    fn init_gpu(&mut self, event_loop: &ActiveEventLoop) -> Result<Gpu> {
        let attrs = Window::default_attributes()
            .with_title("Face Cube")
            .with_inner_size(PhysicalSize::new(
                DEFAULT_VIEWPORT.width as u32,
                DEFAULT_VIEWPORT.height as u32,
            ));
        let window = Arc::new(event_loop.create_window(attrs).context("create window")?);

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance
            .create_surface(window.clone())
            .context("create surface")?;

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .context("find adapter")?;

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("facecube_device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
            },
            None,
        ))
        .context("create device")?;

        let size = window.inner_size();
        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first())
            .copied()
            .context("surface reports no formats")?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);
        self.state.resize(config.width, config.height);

        let renderer = WgpuRenderer::new(
            &device,
            &queue,
            surface_format,
            config.width,
            config.height,
            self.state.cube.geometry(),
        );

        let egui_winit = egui_winit::State::new(
            self.egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(&device, surface_format, None, 1, false);

        tracing::info!(
            "GPU initialized with {} backend",
            adapter.get_info().backend.to_str()
        );

        Ok(Gpu {
            window,
            surface,
            device,
            queue,
            config,
            renderer,
            egui_winit,
            egui_renderer,
        })
    }

    fn redraw(&mut self) {
        let Some(gpu) = &mut self.gpu else {
            return;
        };

        let output = match gpu.surface.get_current_texture() {
            Ok(t) => t,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                gpu.surface.configure(&gpu.device, &gpu.config);
                return;
            }
            Err(e) => {
                tracing::error!("surface error: {e}");
                return;
            }
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let raw_input = gpu.egui_winit.take_egui_input(&gpu.window);
        let full_output = self.egui_ctx.run(raw_input, |ctx| {
            self.state.draw_ui(ctx);
        });
        gpu.egui_winit
            .handle_platform_output(&gpu.window, full_output.platform_output);

        // Editor commits above may have replaced a face; draw after them.
        gpu.renderer.render(
            &gpu.device,
            &gpu.queue,
            &view,
            &self.state.camera,
            &self.state.cube,
        );

        let paint_jobs = self
            .egui_ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);
        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [gpu.config.width, gpu.config.height],
            pixels_per_point: full_output.pixels_per_point,
        };

        for (id, image_delta) in &full_output.textures_delta.set {
            gpu.egui_renderer
                .update_texture(&gpu.device, &gpu.queue, *id, image_delta);
        }
        let mut encoder = gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("egui_encoder"),
            });
        gpu.egui_renderer.update_buffers(
            &gpu.device,
            &gpu.queue,
            &mut encoder,
            &paint_jobs,
            &screen_descriptor,
        );
        {
            let mut pass = encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("egui_pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: &view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Load,
                            store: wgpu::StoreOp::Store,
                        },
                    })],
                    depth_stencil_attachment: None,
                    ..Default::default()
                })
                .forget_lifetime();
            gpu.egui_renderer
                .render(&mut pass, &paint_jobs, &screen_descriptor);
        }
        gpu.queue.submit(std::iter::once(encoder.finish()));
        for id in &full_output.textures_delta.free {
            gpu.egui_renderer.free_texture(id);
        }

        output.present();
    }
}

impl ApplicationHandler for GpuApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.gpu.is_some() {
            return;
        }
        match self.init_gpu(event_loop) {
            Ok(gpu) => {
                gpu.window.request_redraw();
                self.gpu = Some(gpu);
            }
            Err(e) => {
                tracing::error!("failed to initialize GPU: {e:#}");
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if let Some(gpu) = &mut self.gpu {
            let response = gpu.egui_winit.on_window_event(&gpu.window, &event);
            if response.repaint {
                gpu.window.request_redraw();
            }
            if response.consumed {
                return;
            }
        }

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                if let Some(gpu) = &mut self.gpu {
                    gpu.config.width = new_size.width.max(1);
                    gpu.config.height = new_size.height.max(1);
                    gpu.surface.configure(&gpu.device, &gpu.config);
                    gpu.renderer
                        .resize(&gpu.device, gpu.config.width, gpu.config.height);
                    self.state.resize(gpu.config.width, gpu.config.height);
                }
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(key),
                        state: key_state,
                        ..
                    },
                ..
            } => {
                self.state
                    .handle_key(key, key_state == ElementState::Pressed);
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.state
                    .pointer_moved(Vec2::new(position.x as f32, position.y as f32));
            }
            WindowEvent::CursorLeft { .. } => {
                self.state.pointer.left_window();
            }
            WindowEvent::MouseInput {
                button: MouseButton::Left,
                state: btn_state,
                ..
            } => {
                self.state
                    .pointer_button(btn_state == ElementState::Pressed);
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let amount = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(p) => p.y as f32 / 40.0,
                };
                self.state.camera.zoom(amount);
            }
            WindowEvent::RedrawRequested => {
                self.redraw();
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(gpu) = &self.gpu {
            gpu.window.request_redraw();
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    tracing::info!("facecube-desktop starting");

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = GpuApp::new(cli.mode.into());
    event_loop.run_app(&mut app)?;

    Ok(())
}
