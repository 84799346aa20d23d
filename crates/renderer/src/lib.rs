//! Renderer crate for the shader gallery.
//!
//! The crate turns gallery entries into GPU programs and keeps exactly one of
//! them on screen. The overall flow is:
//!
//! ```text
//!   Gallery entry ──▶ synthesize() ──▶ build_program() ──▶ ProgramSlot
//!         ▲                                   │                 │
//!         │ next / previous / jump_to         └─▶ diagnostics    ▼
//!   Session ◀── input (keys, swipes)            drive_frame() ─▶ uniforms ─▶ quad
//! ```
//!
//! [`Session`] owns the lifecycle and is generic over [`GpuBackend`], so the
//! activation and frame logic runs the same against wgpu or an in-memory
//! backend. [`Renderer`] is the thin entry point that opens the window and
//! drives a session backed by wgpu.

mod backend;
mod clock;
mod diagnostics;
mod frame;
mod gpu;
mod input;
mod program;
mod session;
mod slot;
mod synthesize;
#[cfg(test)]
mod testing;
mod types;
mod uniforms;
mod window;

use anyhow::Result;
use gallery::Gallery;
use tracing::info;

pub use backend::{
    FrameError, GpuBackend, ShaderStage, SurfaceSize, UniformValue, FULLSCREEN_QUAD,
};
pub use clock::{nominal_frame_index, FrameClock, NOMINAL_FRAME_RATE};
pub use diagnostics::{DiagnosticLog, DiagnosticsSink, ShaderDiagnostic};
pub use frame::{drive_frame, FrameOutcome, CLEAR_COLOR};
pub use input::{action_for_key, InputAction, SwipeTracker, MIN_SWIPE_DISTANCE};
pub use program::{build_program, BuildError, BuildStage};
pub use session::{ActivationError, Navigation, Session};
pub use slot::{CompiledProgram, ProgramSlot};
pub use synthesize::{synthesize, synthesize_fragment, VERTEX_SOURCE};
pub use types::{GpuPowerPreference, RendererConfig};
pub use uniforms::{bind_frame_uniforms, FrameUniform, FrameUniforms};

/// High-level entry point that owns the window configuration and the gallery
/// to present.
pub struct Renderer {
    config: RendererConfig,
    gallery: Gallery,
}

impl Renderer {
    pub fn new(config: RendererConfig, gallery: Gallery) -> Self {
        Self { config, gallery }
    }

    pub fn config(&self) -> &RendererConfig {
        &self.config
    }

    /// Opens the gallery window and blocks until it closes.
    ///
    /// Returns an error when the window or GPU cannot be initialised, or when
    /// presentation fails in a way the surface cannot recover from. Shader
    /// build failures are never fatal.
    pub fn run(self) -> Result<()> {
        info!(
            entries = self.gallery.len(),
            width = self.config.surface_size.0,
            height = self.config.surface_size.1,
            gpu_power = %self.config.gpu_power,
            "starting shader gallery"
        );
        window::run_gallery_window(self.config, self.gallery)
    }
}
