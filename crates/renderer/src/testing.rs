//! In-memory backend that records every call the lifecycle code makes.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use crate::backend::{FrameError, GpuBackend, ShaderStage, SurfaceSize, UniformValue};

#[derive(Debug)]
pub(crate) struct MockShader {
    id: u32,
    stage: ShaderStage,
    source: String,
    compiled: bool,
}

#[derive(Debug)]
pub(crate) struct MockProgram {
    pub id: u32,
    uniforms: BTreeSet<String>,
    pub values: BTreeMap<String, UniformValue>,
    linked: bool,
}

#[derive(Debug, Default)]
pub(crate) struct RecordingBackend {
    next_id: u32,
    pub live_shaders: BTreeSet<u32>,
    pub live_programs: BTreeSet<u32>,
    pub shaders_created: usize,
    pub programs_created: usize,
    pub compiled_stages: Vec<ShaderStage>,
    pub bound: Vec<(String, UniformValue)>,
    pub draws: Vec<u32>,
    pub clears: Vec<[f64; 4]>,
    pub presented_clears: Vec<[f64; 4]>,
    pub resizes: Vec<SurfaceSize>,
    pub draw_failures: VecDeque<FrameError>,
    pub reject_links: bool,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    fn allocate_id(&mut self) -> u32 {
        self.next_id += 1;
        self.next_id
    }

    pub fn bound_names(&self) -> Vec<&str> {
        self.bound.iter().map(|(name, _)| name.as_str()).collect()
    }

    pub fn bound_value(&self, name: &str) -> Option<UniformValue> {
        self.bound
            .iter()
            .rev()
            .find(|(bound, _)| bound == name)
            .map(|(_, value)| *value)
    }
}

/// Member names of the `GalleryUniforms` block, as a linker would report them.
fn declared_uniforms(source: &str) -> BTreeSet<String> {
    let Some(start) = source.find("uniform GalleryUniforms {") else {
        return BTreeSet::new();
    };
    let block = &source[start..];
    let end = block.find("};").unwrap_or(block.len());
    block[..end]
        .lines()
        .skip(1)
        .filter_map(|line| line.trim().strip_suffix(';'))
        .filter_map(|decl| decl.split_whitespace().last())
        .map(str::to_string)
        .collect()
}

fn balanced(source: &str) -> bool {
    let mut depth = 0i32;
    for ch in source.chars() {
        match ch {
            '{' | '(' => depth += 1,
            '}' | ')' => depth -= 1,
            _ => {}
        }
        if depth < 0 {
            return false;
        }
    }
    depth == 0
}

impl GpuBackend for RecordingBackend {
    type Shader = MockShader;
    type Program = MockProgram;
    type UniformLocation = String;

    fn create_shader(&mut self, stage: ShaderStage, source: &str) -> MockShader {
        let id = self.allocate_id();
        self.live_shaders.insert(id);
        self.shaders_created += 1;
        MockShader {
            id,
            stage,
            source: source.to_string(),
            compiled: false,
        }
    }

    fn compile_shader(&mut self, shader: &mut MockShader) -> Result<(), String> {
        self.compiled_stages.push(shader.stage);
        if !balanced(&shader.source) {
            return Err("0:1: syntax error: unbalanced delimiters".to_string());
        }
        shader.compiled = true;
        Ok(())
    }

    fn delete_shader(&mut self, shader: MockShader) {
        assert!(
            self.live_shaders.remove(&shader.id),
            "shader {} deleted twice",
            shader.id
        );
    }

    fn create_program(&mut self) -> MockProgram {
        let id = self.allocate_id();
        self.live_programs.insert(id);
        self.programs_created += 1;
        MockProgram {
            id,
            uniforms: BTreeSet::new(),
            values: BTreeMap::new(),
            linked: false,
        }
    }

    fn link_program(
        &mut self,
        program: &mut MockProgram,
        vertex: &MockShader,
        fragment: &MockShader,
    ) -> Result<(), String> {
        if !vertex.compiled || !fragment.compiled {
            return Err("attached shader is not compiled".to_string());
        }
        if self.reject_links {
            return Err("link rejected".to_string());
        }
        if !fragment.source.contains("void main") {
            return Err("fragment stage has no main entry point".to_string());
        }
        program.uniforms = declared_uniforms(&fragment.source);
        program.linked = true;
        Ok(())
    }

    fn delete_program(&mut self, program: MockProgram) {
        assert!(
            self.live_programs.remove(&program.id),
            "program {} deleted twice",
            program.id
        );
    }

    fn uniform_location(&self, program: &MockProgram, name: &str) -> Option<String> {
        (program.linked && program.uniforms.contains(name)).then(|| name.to_string())
    }

    fn set_uniform(&mut self, program: &mut MockProgram, location: &String, value: UniformValue) {
        program.values.insert(location.clone(), value);
        self.bound.push((location.clone(), value));
    }

    fn resize(&mut self, size: SurfaceSize) {
        self.resizes.push(size);
    }

    fn clear(&mut self, color: [f64; 4]) {
        self.clears.push(color);
    }

    fn draw_quad(&mut self, program: &MockProgram) -> Result<(), FrameError> {
        if let Some(err) = self.draw_failures.pop_front() {
            return Err(err);
        }
        self.draws.push(program.id);
        Ok(())
    }

    fn present_clear(&mut self, color: [f64; 4]) -> Result<(), FrameError> {
        if let Some(err) = self.draw_failures.pop_front() {
            return Err(err);
        }
        self.presented_clears.push(color);
        Ok(())
    }
}
