use std::borrow::Cow;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use tracing::{debug, trace};
use wgpu::util::DeviceExt;
use winit::dpi::PhysicalSize;
use winit::window::Window;

use crate::backend::{
    FrameError, GpuBackend, ShaderStage, SurfaceSize, UniformValue, FULLSCREEN_QUAD,
};
use crate::types::GpuPowerPreference;

use super::compile::parse_glsl;
use super::context::GpuContext;
use super::pipeline::{link, CompiledStage, LinkedProgram};
use super::reflect::UniformSlot;

/// A shader object: source text plus the compiled stage once it succeeds.
pub struct GpuShader {
    stage: ShaderStage,
    source: String,
    compiled: Option<CompiledStage>,
}

/// A program object; `linked` is filled by a successful link.
pub struct GpuProgram {
    linked: Option<LinkedProgram>,
}

/// wgpu implementation of the GL-style program model.
pub(crate) struct GpuState {
    context: GpuContext,
    quad: wgpu::Buffer,
    pending_clear: Option<wgpu::Color>,
    frames_since_last_update: u32,
    last_fps_update: Instant,
}

impl GpuState {
    pub(crate) fn new(window: Arc<Window>, gpu_power: GpuPowerPreference) -> Result<Self> {
        let context = GpuContext::new(window, gpu_power)?;
        let quad = context
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("fullscreen quad"),
                contents: bytemuck::cast_slice(&FULLSCREEN_QUAD),
                usage: wgpu::BufferUsages::VERTEX,
            });

        Ok(Self {
            context,
            quad,
            pending_clear: None,
            frames_since_last_update: 0,
            last_fps_update: Instant::now(),
        })
    }

    pub(crate) fn size(&self) -> PhysicalSize<u32> {
        self.context.size
    }

    fn acquire_frame(&mut self) -> Result<wgpu::SurfaceTexture, FrameError> {
        match self.context.surface.get_current_texture() {
            Ok(frame) => Ok(frame),
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.context.reconfigure();
                Err(FrameError::Transient(
                    "surface lost or outdated; reconfigured".to_string(),
                ))
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                Err(FrameError::Fatal("surface out of memory".to_string()))
            }
            Err(other) => Err(FrameError::Transient(other.to_string())),
        }
    }

    /// Acquires the next surface texture, runs one pass over it and presents
    /// it. Without a program the pass only applies `load`.
    fn submit_frame(
        &mut self,
        load: wgpu::LoadOp<wgpu::Color>,
        program: Option<&LinkedProgram>,
    ) -> Result<(), FrameError> {
        let frame = self.acquire_frame()?;
        if let Some(uniforms) = program.and_then(|linked| linked.uniforms.as_ref()) {
            self.context
                .queue
                .write_buffer(&uniforms.buffer, 0, &uniforms.staging);
        }

        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder =
            self.context
                .device
                .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                    label: Some("gallery encoder"),
                });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("gallery pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    depth_slice: None,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load,
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                occlusion_query_set: None,
                timestamp_writes: None,
            });
            if let Some(linked) = program {
                render_pass.set_viewport(
                    0.0,
                    0.0,
                    self.context.config.width as f32,
                    self.context.config.height as f32,
                    0.0,
                    1.0,
                );
                render_pass.set_pipeline(&linked.pipeline);
                if let Some(uniforms) = linked.uniforms.as_ref() {
                    render_pass.set_bind_group(0, &uniforms.bind_group, &[]);
                }
                render_pass.set_vertex_buffer(0, self.quad.slice(..));
                render_pass.draw(0..FULLSCREEN_QUAD.len() as u32, 0..1);
            }
        }

        self.context.queue.submit(std::iter::once(encoder.finish()));
        frame.present();
        self.record_frame();
        Ok(())
    }

    fn record_frame(&mut self) {
        let now = Instant::now();
        self.frames_since_last_update += 1;
        let elapsed = now.saturating_duration_since(self.last_fps_update);
        if elapsed >= Duration::from_secs(1) {
            let fps = self.frames_since_last_update as f32 / elapsed.as_secs_f32();
            debug!(fps = fps.round(), "render stats");
            self.frames_since_last_update = 0;
            self.last_fps_update = now;
        }
    }
}

impl GpuBackend for GpuState {
    type Shader = GpuShader;
    type Program = GpuProgram;
    type UniformLocation = UniformSlot;

    fn create_shader(&mut self, stage: ShaderStage, source: &str) -> GpuShader {
        GpuShader {
            stage,
            source: source.to_string(),
            compiled: None,
        }
    }

    fn compile_shader(&mut self, shader: &mut GpuShader) -> Result<(), String> {
        let module = parse_glsl(shader.stage, &shader.source)?;

        let device = &self.context.device;
        device.push_error_scope(wgpu::ErrorFilter::Validation);
        let shader_module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(match shader.stage {
                ShaderStage::Vertex => "gallery vertex",
                ShaderStage::Fragment => "gallery fragment",
            }),
            source: wgpu::ShaderSource::Naga(Cow::Owned(module.clone())),
        });
        if let Some(err) = pollster::block_on(device.pop_error_scope()) {
            return Err(err.to_string());
        }

        shader.compiled = Some(CompiledStage {
            module,
            shader_module,
        });
        Ok(())
    }

    fn delete_shader(&mut self, shader: GpuShader) {
        trace!(stage = ?shader.stage, "releasing shader object");
        drop(shader);
    }

    fn create_program(&mut self) -> GpuProgram {
        GpuProgram { linked: None }
    }

    fn link_program(
        &mut self,
        program: &mut GpuProgram,
        vertex: &GpuShader,
        fragment: &GpuShader,
    ) -> Result<(), String> {
        let (Some(vertex), Some(fragment)) = (vertex.compiled.as_ref(), fragment.compiled.as_ref())
        else {
            return Err("attached shader is not compiled".to_string());
        };
        let linked = link(
            &self.context.device,
            self.context.surface_format,
            vertex,
            fragment,
        )?;
        program.linked = Some(linked);
        Ok(())
    }

    fn delete_program(&mut self, program: GpuProgram) {
        trace!(linked = program.linked.is_some(), "releasing program object");
        drop(program);
    }

    fn uniform_location(&self, program: &GpuProgram, name: &str) -> Option<UniformSlot> {
        program.linked.as_ref()?.layout.slot(name)
    }

    fn set_uniform(&mut self, program: &mut GpuProgram, location: &UniformSlot, value: UniformValue) {
        if !location.kind.accepts(&value) {
            trace!(?location, ?value, "uniform type mismatch; skipping");
            return;
        }
        let Some(storage) = program
            .linked
            .as_mut()
            .and_then(|linked| linked.uniforms.as_mut())
        else {
            return;
        };

        let written = match &value {
            UniformValue::Float(v) => storage.write(*location, bytemuck::bytes_of(v)),
            UniformValue::Int(v) => storage.write(*location, bytemuck::bytes_of(v)),
            UniformValue::Vec2(v) => storage.write(*location, bytemuck::cast_slice(v.as_slice())),
            UniformValue::Vec4(v) => storage.write(*location, bytemuck::cast_slice(v.as_slice())),
        };
        if !written {
            trace!(?location, "uniform write outside block; skipping");
        }
    }

    fn resize(&mut self, size: SurfaceSize) {
        let target = PhysicalSize::new(size.width, size.height);
        if target != self.context.size {
            self.context.resize(target);
        }
    }

    fn clear(&mut self, color: [f64; 4]) {
        let [r, g, b, a] = color;
        self.pending_clear = Some(wgpu::Color { r, g, b, a });
    }

    fn draw_quad(&mut self, program: &GpuProgram) -> Result<(), FrameError> {
        let Some(linked) = program.linked.as_ref() else {
            return Err(FrameError::Transient("program is not linked".to_string()));
        };
        let load = match self.pending_clear.take() {
            Some(color) => wgpu::LoadOp::Clear(color),
            None => wgpu::LoadOp::Load,
        };
        self.submit_frame(load, Some(linked))
    }

    fn present_clear(&mut self, color: [f64; 4]) -> Result<(), FrameError> {
        self.pending_clear = None;
        let [r, g, b, a] = color;
        self.submit_frame(wgpu::LoadOp::Clear(wgpu::Color { r, g, b, a }), None)
    }
}
