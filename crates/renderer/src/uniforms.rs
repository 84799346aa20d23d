use crate::backend::{GpuBackend, SurfaceSize, UniformValue};
use crate::clock::nominal_frame_index;

/// Every uniform the frame driver knows how to feed, under both naming
/// conventions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameUniform {
    LegacyTime,
    LegacyResolution,
    Time,
    Resolution,
    Mouse,
    Frame,
}

impl FrameUniform {
    pub const ALL: [FrameUniform; 6] = [
        FrameUniform::LegacyTime,
        FrameUniform::LegacyResolution,
        FrameUniform::Time,
        FrameUniform::Resolution,
        FrameUniform::Mouse,
        FrameUniform::Frame,
    ];

    pub fn name(self) -> &'static str {
        match self {
            FrameUniform::LegacyTime => "t",
            FrameUniform::LegacyResolution => "r",
            FrameUniform::Time => "iTime",
            FrameUniform::Resolution => "iResolution",
            FrameUniform::Mouse => "iMouse",
            FrameUniform::Frame => "iFrame",
        }
    }
}

/// Per-frame inputs from which every uniform value is derived.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameUniforms {
    pub elapsed: f64,
    pub size: SurfaceSize,
}

impl FrameUniforms {
    pub fn new(elapsed: f64, size: SurfaceSize) -> Self {
        Self { elapsed, size }
    }

    pub fn frame_index(&self) -> i32 {
        nominal_frame_index(self.elapsed)
    }

    pub fn value(&self, uniform: FrameUniform) -> UniformValue {
        match uniform {
            FrameUniform::LegacyTime | FrameUniform::Time => {
                UniformValue::Float(self.elapsed as f32)
            }
            FrameUniform::LegacyResolution | FrameUniform::Resolution => {
                UniformValue::Vec2(self.size.as_vec2())
            }
            FrameUniform::Mouse => UniformValue::Vec4([0.0; 4]),
            FrameUniform::Frame => UniformValue::Int(self.frame_index()),
        }
    }
}

/// Writes every known uniform the program declares, skipping absent names.
///
/// Returns how many were bound.
pub fn bind_frame_uniforms<B: GpuBackend>(
    backend: &mut B,
    program: &mut B::Program,
    uniforms: &FrameUniforms,
) -> usize {
    let mut bound = 0;
    for uniform in FrameUniform::ALL {
        let Some(location) = backend.uniform_location(program, uniform.name()) else {
            continue;
        };
        backend.set_uniform(program, &location, uniforms.value(uniform));
        bound += 1;
    }
    bound
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values_follow_elapsed_and_size() {
        let uniforms = FrameUniforms::new(2.0, SurfaceSize::new(640, 480));
        assert_eq!(
            uniforms.value(FrameUniform::LegacyTime),
            UniformValue::Float(2.0)
        );
        assert_eq!(uniforms.value(FrameUniform::Time), UniformValue::Float(2.0));
        assert_eq!(
            uniforms.value(FrameUniform::Resolution),
            UniformValue::Vec2([640.0, 480.0])
        );
        assert_eq!(
            uniforms.value(FrameUniform::LegacyResolution),
            UniformValue::Vec2([640.0, 480.0])
        );
        assert_eq!(
            uniforms.value(FrameUniform::Mouse),
            UniformValue::Vec4([0.0; 4])
        );
        assert_eq!(uniforms.value(FrameUniform::Frame), UniformValue::Int(120));
    }

    #[test]
    fn names_are_unique() {
        let mut names: Vec<_> = FrameUniform::ALL.iter().map(|u| u.name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), FrameUniform::ALL.len());
    }
}
