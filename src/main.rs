use std::sync::Arc;

use clap::Parser;
use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use shadowbox::camera::OrbitCamera;
use shadowbox::cli::Cli;
use shadowbox::core::Clock;
use shadowbox::node::NodeKind;
use shadowbox::overlay::PerfStats;
use shadowbox::renderer::StageRenderer;
use shadowbox::scenes::{self, SceneVersion};
use shadowbox::traits::{NullRenderer, SceneRenderer};

const INITIAL_WINDOW_WIDTH: u32 = 1280;
const INITIAL_WINDOW_HEIGHT: u32 = 720;

struct App {
    window: Option<Arc<Window>>,
    renderer: Option<StageRenderer>,
    scene: SceneVersion,
    camera: OrbitCamera,
    clock: Clock,
    stats: PerfStats,
    show_ui: bool,
}

impl App {
    fn new(scene: SceneVersion, show_ui: bool) -> Self {
        let controls = scene
            .composer
            .graph()
            .nodes()
            .find_map(|(_, node)| match node.kind {
                NodeKind::Controls(decl) => Some(decl),
                _ => None,
            })
            .unwrap_or_default();

        Self {
            window: None,
            renderer: None,
            camera: OrbitCamera::from_controls(&controls),
            clock: Clock::new(),
            stats: PerfStats::new(),
            scene,
            show_ui,
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            let window = match event_loop.create_window(
                Window::default_attributes()
                    .with_title("Shadowbox")
                    .with_inner_size(winit::dpi::LogicalSize::new(
                        INITIAL_WINDOW_WIDTH,
                        INITIAL_WINDOW_HEIGHT,
                    )),
            ) {
                Ok(w) => Arc::new(w),
                Err(e) => {
                    eprintln!("Failed to create window: {}", e);
                    event_loop.exit();
                    return;
                }
            };

            let renderer = match pollster::block_on(StageRenderer::new(
                window.clone(),
                self.scene.name.to_string(),
                self.show_ui,
            )) {
                Ok(r) => r,
                Err(e) => {
                    eprintln!("Failed to initialize stage: {}", e);
                    event_loop.exit();
                    return;
                }
            };

            self.window = Some(window);
            self.renderer = Some(renderer);
            self.clock.reset();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        // Let egui handle the event first
        if let (Some(renderer), Some(window)) = (&mut self.renderer, &self.window) {
            if renderer.handle_event(window, &event) {
                return;
            }
        }

        match event {
            WindowEvent::CloseRequested
            | WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        ..
                    },
                ..
            } => event_loop.exit(),
            WindowEvent::Resized(size) => {
                if let Some(renderer) = &mut self.renderer {
                    renderer.resize(size);
                }
            }
            WindowEvent::MouseInput { button, state, .. } => {
                self.camera.process_mouse_button(button, state);
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.camera.process_cursor(position.x, position.y);
            }
            WindowEvent::MouseWheel { delta, .. } => {
                self.camera.process_scroll(delta);
            }
            WindowEvent::RedrawRequested => {
                let tick = self.clock.tick();
                self.stats.record(tick.delta);
                self.camera.update(tick.delta);

                if let Err(err) = self.scene.composer.tick(tick.elapsed, tick.delta) {
                    log::error!("tick failed: {err}");
                }

                let snapshot = match self.scene.composer.apply(&self.scene.params) {
                    Ok(snapshot) => snapshot,
                    Err(err) => {
                        log::error!("apply failed: {err}");
                        return;
                    }
                };

                if let (Some(renderer), Some(window)) = (&mut self.renderer, &self.window) {
                    match renderer.render(
                        window,
                        &snapshot,
                        &self.camera,
                        &mut self.scene.params,
                        &self.stats,
                        tick.elapsed,
                    ) {
                        Ok(()) => {}
                        Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                            let size = renderer.size();
                            renderer.resize(size);
                        }
                        Err(wgpu::SurfaceError::OutOfMemory) => {
                            log::error!("surface out of memory");
                            event_loop.exit();
                        }
                        Err(err) => log::warn!("render error: {err}"),
                    }
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

/// Prints the first composed snapshot as JSON.
fn describe(name: &str) -> anyhow::Result<()> {
    let scene = scenes::create_scene(name)?;
    let snapshot = scene.composer.apply(&scene.params)?;
    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    Ok(())
}

/// Ticks the scene at a fixed 60 Hz without a window.
fn run_headless(name: &str, frames: u32) -> anyhow::Result<()> {
    let mut scene = scenes::create_scene(name)?;
    let mut sink = NullRenderer::new();
    let dt = 1.0 / 60.0;
    let mut elapsed = 0.0_f32;

    for _ in 0..frames {
        scene.composer.tick(elapsed, dt)?;
        let snapshot = scene.composer.apply(&scene.params)?;
        sink.render(&snapshot)
            .map_err(|e| anyhow::anyhow!("headless render failed: {e}"))?;
        elapsed += dt;
    }

    println!("Headless run complete: {} frames of '{}'", sink.frames(), name);
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let scene_name = cli.scene_name();

    if cli.describe {
        return describe(&scene_name);
    }
    if let Some(frames) = cli.frames {
        return run_headless(&scene_name, frames);
    }

    let scene = scenes::create_scene(&scene_name)?;
    println!(
        "Shadowbox - scene '{}'. Drag to orbit, scroll to zoom, Escape to quit",
        scene.name
    );

    let event_loop = EventLoop::new()?;
    let mut app = App::new(scene, !cli.no_ui);
    event_loop.run_app(&mut app)?;

    Ok(())
}
