use crate::render::{draw_board, draw_controls, Controls};
use anyhow::Context as _;
use chroma_life::Session;
use winit::{dpi::PhysicalPosition, window::Window};
use std::sync::Arc;

// GUI Imports
use egui_winit::State as EguiWinitState;
use egui_wgpu::Renderer as EguiWgpuRenderer;
use egui::Context as EguiContext;

const BACKGROUND: wgpu::Color = wgpu::Color {
    r: 0.06,
    g: 0.07,
    b: 0.08,
    a: 1.0,
};

pub struct State {
    pub surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    pub size: winit::dpi::PhysicalSize<u32>,
    pub window: Arc<Window>,

    pub session: Session,
    pub controls: Controls,
    /// Top-left of the board in points, as laid out in the last frame.
    pub board_origin: egui::Pos2,
    pub cursor_pos: Option<PhysicalPosition<f64>>,

    // GUI state
    pub egui_ctx: EguiContext,
    pub egui_winit_state: EguiWinitState,
    pub egui_renderer: EguiWgpuRenderer,
}

impl State {
    pub async fn new(window: Arc<Window>, session: Session) -> anyhow::Result<Self> {
        let size = window.inner_size();

        log::info!("Initializing wgpu...");

        let instance = wgpu::Instance::default();
        let surface = instance
            .create_surface(window.clone())
            .context("failed to create a surface for the window")?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                force_fallback_adapter: false,
                compatible_surface: Some(&surface),
            })
            .await
            .context("failed to find an appropriate adapter")?;

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: None,
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                },
                None,
            )
            .await
            .context("failed to create device")?;

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| !f.is_srgb())
            .or_else(|| surface_caps.formats.first().copied())
            .context("surface reports no texture formats")?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: surface_caps.present_modes[0],
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        log::info!("Initializing egui...");
        let egui_ctx = EguiContext::default();
        let egui_winit_state = EguiWinitState::new(egui_ctx.clone(), egui_ctx.viewport_id(), &window, None, None);
        let egui_renderer = EguiWgpuRenderer::new(&device, config.format, None, 1);
        log::info!("wgpu and egui initialized.");

        let controls = Controls::new(&session);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            size,
            window,
            session,
            controls,
            board_origin: egui::Pos2::ZERO,
            cursor_pos: None,
            egui_ctx,
            egui_winit_state,
            egui_renderer,
        })
    }

    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.size = new_size;
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.surface.configure(&self.device, &self.config);
            log::debug!("Reconfigured surface to {}x{}", new_size.width, new_size.height);
        } else {
            log::warn!("Ignoring resize to zero dimensions: {}x{}", new_size.width, new_size.height);
        }
    }

    /// Lays out the UI, paints the board and presents the frame.
    pub fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        let output_frame = match self.surface.get_current_texture() {
            Ok(frame) => frame,
            Err(wgpu::SurfaceError::Lost) => {
                log::warn!("Surface lost, reconfiguring...");
                self.resize(self.size);
                return Err(wgpu::SurfaceError::Lost);
            }
            Err(e) => {
                log::error!("Failed to acquire next swap chain texture: {:?}", e);
                return Err(e);
            }
        };
        let output_view = output_frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        // --- Egui frame ---
        let ctx = self.egui_ctx.clone();
        let raw_input = self.egui_winit_state.take_egui_input(&self.window);
        ctx.begin_frame(raw_input);
        // Panels first, so the board lands in the space they leave.
        draw_controls(&ctx, &mut self.session, &mut self.controls);
        self.board_origin = draw_board(&ctx, &self.session);
        let full_output = ctx.end_frame();

        self.egui_winit_state
            .handle_platform_output(&self.window, full_output.platform_output);

        let pixels_per_point = self.window.scale_factor() as f32;
        let paint_jobs = ctx.tessellate(full_output.shapes, pixels_per_point);
        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [self.config.width, self.config.height],
            pixels_per_point,
        };

        let mut encoder = self.device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("egui Encoder"),
        });
        for (id, image_delta) in &full_output.textures_delta.set {
            self.egui_renderer.update_texture(&self.device, &self.queue, *id, image_delta);
        }
        let callback_buffers = self.egui_renderer.update_buffers(
            &self.device,
            &self.queue,
            &mut encoder,
            &paint_jobs,
            &screen_descriptor,
        );

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("egui Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &output_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(BACKGROUND),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            self.egui_renderer.render(&mut render_pass, &paint_jobs, &screen_descriptor);
        }

        for id in &full_output.textures_delta.free {
            self.egui_renderer.free_texture(id);
        }

        self.queue
            .submit(callback_buffers.into_iter().chain(std::iter::once(encoder.finish())));
        output_frame.present();
        Ok(())
    }
}
