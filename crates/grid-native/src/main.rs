use anyhow::Context;
use glam::Vec2;
use grid_core::gpu::GridRenderer;
use grid_core::{
    DeviceClass, Discipline, DotField, FrameClock, FrameInput, FrameOutput, GridEngine, SceneKind,
    Viewport,
};
use winit::dpi::{PhysicalPosition, PhysicalSize};
use winit::keyboard::Key;
use winit::{event::*, event_loop::EventLoop, window::WindowBuilder};

struct GpuState<'w> {
    window: &'w winit::window::Window,
    surface: wgpu::Surface<'w>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    renderer: GridRenderer,
}

impl<'w> GpuState<'w> {
    async fn new(
        window: &'w winit::window::Window,
        grid_capacity: usize,
        dots: &DotField,
    ) -> anyhow::Result<Self> {
        let size = window.inner_size();
        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(window)?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No GPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await?;

        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| caps.formats.first().copied())
            .context("surface reports no formats")?;
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            desired_maximum_frame_latency: 2,
            view_formats: vec![],
        };
        surface.configure(&device, &config);

        let renderer = GridRenderer::new(
            &device,
            &queue,
            format,
            (config.width, config.height),
            grid_capacity,
            dots,
        );

        Ok(Self {
            window,
            surface,
            device,
            queue,
            config,
            renderer,
        })
    }

    fn resize(&mut self, size: PhysicalSize<u32>) {
        if size.width == 0 || size.height == 0 {
            return;
        }
        self.config.width = size.width;
        self.config.height = size.height;
        self.surface.configure(&self.device, &self.config);
        self.renderer.resize(&self.device, size.width, size.height);
    }

    fn render(&mut self, frame_out: &FrameOutput<'_>) -> Result<(), wgpu::SurfaceError> {
        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        self.renderer
            .encode(&self.device, &self.queue, &mut encoder, &view, frame_out);
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}

/// Window-relative cursor position in `[-1, 1]`, +Y up.
fn cursor_ndc(position: PhysicalPosition<f64>, size: PhysicalSize<u32>) -> Option<Vec2> {
    if size.width == 0 || size.height == 0 {
        return None;
    }
    let x = position.x as f32 / size.width as f32;
    let y = position.y as f32 / size.height as f32;
    Some(Vec2::new(x * 2.0 - 1.0, 1.0 - y * 2.0))
}

fn logical_width(window: &winit::window::Window) -> f32 {
    let size = window.inner_size();
    (size.width as f64 / window.scale_factor()) as f32
}

/// Number keys pick a discipline to focus, 0 shows everything.
fn focus_for_key(key: &Key) -> Option<Option<Discipline>> {
    match key {
        Key::Character(c) => match c.as_str() {
            "0" => Some(None),
            "1" => Some(Some(Discipline::Engineering)),
            "2" => Some(Some(Discipline::Research)),
            "3" => Some(Some(Discipline::Product)),
            _ => None,
        },
        _ => None,
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .init();

    let scene = match std::env::args().nth(1) {
        Some(name) => name.parse::<SceneKind>()?,
        None => SceneKind::Home,
    };

    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title(format!("Influence Grid ({scene})"))
        .build(&event_loop)?;

    let mut engine = GridEngine::new(scene.profile(), logical_width(&window), DeviceClass::Standard)?;
    let mut state = pollster::block_on(GpuState::new(
        &window,
        engine.lattice().len(),
        engine.dots(),
    ))?;
    let mut clock = FrameClock::new();
    let mut pointer: Option<Vec2> = None;
    let mut focus: Option<Discipline> = None;

    event_loop.run(move |event, elwt| match event {
        Event::WindowEvent { event, .. } => match event {
            WindowEvent::Resized(size) => {
                state.resize(size);
                engine.queue_resize(
                    logical_width(state.window),
                    DeviceClass::Standard,
                    clock.elapsed(),
                );
            }
            WindowEvent::CursorMoved { position, .. } => {
                pointer = cursor_ndc(position, state.window.inner_size());
            }
            WindowEvent::CursorLeft { .. } => pointer = None,
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        logical_key,
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => {
                if let Some(next) = focus_for_key(&logical_key) {
                    focus = next;
                    match focus {
                        Some(d) => log::info!("[focus] {}", d),
                        None => log::info!("[focus] cleared"),
                    }
                }
            }
            WindowEvent::CloseRequested => elwt.exit(),
            _ => {}
        },
        Event::AboutToWait => {
            let time = clock.tick();
            let size = state.window.inner_size();
            let input = FrameInput {
                elapsed: time.elapsed,
                dt: time.dt,
                pointer_ndc: pointer,
                viewport: Viewport::new(size.width as f32, size.height as f32),
                focus,
            };
            let rendered = match engine.advance(&input) {
                Ok(out) => state.render(&out),
                Err(e) => {
                    log::error!("frame error: {}", e);
                    return;
                }
            };
            match rendered {
                Ok(()) => {
                    engine.acknowledge_upload();
                    state.window.request_redraw();
                }
                Err(wgpu::SurfaceError::Lost) => state.resize(state.window.inner_size()),
                Err(wgpu::SurfaceError::OutOfMemory) => elwt.exit(),
                Err(e) => log::warn!("surface error: {:?}", e),
            }
        }
        _ => {}
    })?;
    Ok(())
}
