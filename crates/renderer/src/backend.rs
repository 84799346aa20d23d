//! The GPU program object model the lifecycle code is written against.
//!
//! It mirrors the classic GL shape: shader objects are created from text and
//! compiled, two of them are linked into a program, programs expose uniform
//! locations by name, and a program draws the full-screen quad. The wgpu
//! implementation lives in [`crate::gpu`]; tests use an in-memory recorder.

use thiserror::Error;

/// Corners of the full-screen quad, drawn as a triangle strip.
pub const FULLSCREEN_QUAD: [[f32; 2]; 4] = [[-1.0, -1.0], [1.0, -1.0], [-1.0, 1.0], [1.0, 1.0]];

/// Pipeline stage of a shader object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

/// Value written into a uniform slot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UniformValue {
    Float(f32),
    Vec2([f32; 2]),
    Vec4([f32; 4]),
    Int(i32),
}

/// Drawable size in physical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
}

impl SurfaceSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn as_vec2(&self) -> [f32; 2] {
        [self.width as f32, self.height as f32]
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FrameError {
    /// The frame could not be produced but the next one may succeed.
    #[error("frame dropped: {0}")]
    Transient(String),
    /// The surface is unusable; the host loop should stop.
    #[error("surface failure: {0}")]
    Fatal(String),
}

pub trait GpuBackend {
    type Shader;
    type Program;
    type UniformLocation;

    fn create_shader(&mut self, stage: ShaderStage, source: &str) -> Self::Shader;

    /// Compiles a shader object, returning the compiler log on failure.
    fn compile_shader(&mut self, shader: &mut Self::Shader) -> Result<(), String>;

    fn delete_shader(&mut self, shader: Self::Shader);

    fn create_program(&mut self) -> Self::Program;

    /// Links two compiled stages into `program`, returning the link log on
    /// failure. The shader objects may be deleted afterwards.
    fn link_program(
        &mut self,
        program: &mut Self::Program,
        vertex: &Self::Shader,
        fragment: &Self::Shader,
    ) -> Result<(), String>;

    fn delete_program(&mut self, program: Self::Program);

    /// Looks up a uniform the linked program actually declares.
    fn uniform_location(
        &self,
        program: &Self::Program,
        name: &str,
    ) -> Option<Self::UniformLocation>;

    fn set_uniform(
        &mut self,
        program: &mut Self::Program,
        location: &Self::UniformLocation,
        value: UniformValue,
    );

    /// Matches the drawable surface and viewport to `size`.
    fn resize(&mut self, size: SurfaceSize);

    /// Requests that the next draw starts from a cleared target.
    fn clear(&mut self, color: [f64; 4]);

    /// Draws the four-vertex full-screen strip with `program`.
    fn draw_quad(&mut self, program: &Self::Program) -> Result<(), FrameError>;

    /// Presents a frame filled with `color` and nothing drawn on top.
    fn present_clear(&mut self, color: [f64; 4]) -> Result<(), FrameError>;
}
