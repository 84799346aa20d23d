use std::fmt;

use thiserror::Error;

use crate::backend::{GpuBackend, ShaderStage};

/// Step of program construction that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildStage {
    Vertex,
    Fragment,
    Link,
}

impl From<ShaderStage> for BuildStage {
    fn from(stage: ShaderStage) -> Self {
        match stage {
            ShaderStage::Vertex => BuildStage::Vertex,
            ShaderStage::Fragment => BuildStage::Fragment,
        }
    }
}

impl fmt::Display for BuildStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BuildStage::Vertex => "vertex compile",
            BuildStage::Fragment => "fragment compile",
            BuildStage::Link => "link",
        })
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{stage} failed: {diagnostic}")]
pub struct BuildError {
    pub stage: BuildStage,
    pub diagnostic: String,
}

/// Compiles both stages and links them into a fresh program.
///
/// Every shader object created here is deleted before returning, and a
/// program that fails to link is deleted too. The caller's active program is
/// never touched.
pub fn build_program<B: GpuBackend>(
    backend: &mut B,
    vertex_source: &str,
    fragment_source: &str,
) -> Result<B::Program, BuildError> {
    let vertex = compile_stage(backend, ShaderStage::Vertex, vertex_source)?;
    let fragment = match compile_stage(backend, ShaderStage::Fragment, fragment_source) {
        Ok(fragment) => fragment,
        Err(err) => {
            backend.delete_shader(vertex);
            return Err(err);
        }
    };

    let mut program = backend.create_program();
    let linked = backend.link_program(&mut program, &vertex, &fragment);
    backend.delete_shader(vertex);
    backend.delete_shader(fragment);

    match linked {
        Ok(()) => Ok(program),
        Err(diagnostic) => {
            backend.delete_program(program);
            Err(BuildError {
                stage: BuildStage::Link,
                diagnostic,
            })
        }
    }
}

fn compile_stage<B: GpuBackend>(
    backend: &mut B,
    stage: ShaderStage,
    source: &str,
) -> Result<B::Shader, BuildError> {
    let mut shader = backend.create_shader(stage, source);
    match backend.compile_shader(&mut shader) {
        Ok(()) => Ok(shader),
        Err(diagnostic) => {
            backend.delete_shader(shader);
            Err(BuildError {
                stage: stage.into(),
                diagnostic,
            })
        }
    }
}
