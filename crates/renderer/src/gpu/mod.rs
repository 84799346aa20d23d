//! wgpu backend for the GL-style program model in [`crate::backend`].
//!
//! - `compile` parses and validates GLSL 450 through naga and formats errors
//!   like a GL info log.
//! - `reflect` reads the uniform block out of a naga module so uniform
//!   lookups by name resolve to byte offsets.
//! - `pipeline` links two compiled stages into a render pipeline with its own
//!   uniform buffer.
//! - `context` owns the instance, device and surface for the window.
//! - `state` glues everything together as [`GpuState`].

mod compile;
mod context;
mod pipeline;
mod reflect;
mod state;

pub(crate) use state::GpuState;
