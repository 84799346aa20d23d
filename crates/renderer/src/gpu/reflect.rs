use std::collections::BTreeMap;

use wgpu::naga::{AddressSpace, Module, Scalar, TypeInner, VectorSize};

use crate::backend::UniformValue;

/// Only set 0, binding 0 is wired to a buffer.
const UNIFORM_GROUP: u32 = 0;
const UNIFORM_BINDING: u32 = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniformKind {
    Float,
    Int,
    Vec2,
    Vec4,
    /// Declared but not writable through [`UniformValue`].
    Unsupported,
}

impl UniformKind {
    fn from_type(inner: &TypeInner) -> Self {
        match *inner {
            TypeInner::Scalar(scalar) if scalar == Scalar::F32 => UniformKind::Float,
            TypeInner::Scalar(scalar) if scalar == Scalar::I32 => UniformKind::Int,
            TypeInner::Vector {
                size: VectorSize::Bi,
                scalar,
            } if scalar == Scalar::F32 => UniformKind::Vec2,
            TypeInner::Vector {
                size: VectorSize::Quad,
                scalar,
            } if scalar == Scalar::F32 => UniformKind::Vec4,
            _ => UniformKind::Unsupported,
        }
    }

    pub fn accepts(self, value: &UniformValue) -> bool {
        matches!(
            (self, value),
            (UniformKind::Float, UniformValue::Float(_))
                | (UniformKind::Int, UniformValue::Int(_))
                | (UniformKind::Vec2, UniformValue::Vec2(_))
                | (UniformKind::Vec4, UniformValue::Vec4(_))
        )
    }
}

/// Byte offset and type of one uniform block member; the emulated GL
/// uniform location.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UniformSlot {
    pub offset: u32,
    pub kind: UniformKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct UniformBlock {
    pub span: u32,
    pub members: BTreeMap<String, UniformSlot>,
}

impl UniformBlock {
    /// Buffer size rounded up to a 16-byte multiple.
    pub fn buffer_size(&self) -> u64 {
        u64::from(self.span.max(16)).next_multiple_of(16)
    }
}

/// Resources a linked program reads, as found in its naga modules.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct UniformLayout {
    block: Option<UniformBlock>,
}

impl UniformLayout {
    pub fn reflect(module: &Module) -> Result<Self, String> {
        let mut block = None;
        for (_, global) in module.global_variables.iter() {
            match global.space {
                AddressSpace::Uniform => {}
                AddressSpace::Handle => {
                    return Err(format!(
                        "'{}': textures and samplers are not available to gallery shaders",
                        global.name.as_deref().unwrap_or("<anonymous>")
                    ));
                }
                AddressSpace::Storage { .. } => {
                    return Err("storage buffers are not available to gallery shaders".into());
                }
                _ => continue,
            }

            if block.is_some() {
                return Err("only one uniform block is supported".into());
            }
            match global.binding.as_ref() {
                Some(binding)
                    if binding.group == UNIFORM_GROUP && binding.binding == UNIFORM_BINDING => {}
                Some(binding) => {
                    return Err(format!(
                        "uniform block bound at set {}, binding {}; expected set {UNIFORM_GROUP}, binding {UNIFORM_BINDING}",
                        binding.group, binding.binding
                    ));
                }
                None => return Err("uniform block has no binding".into()),
            }

            let TypeInner::Struct { members, span } = &module.types[global.ty].inner else {
                return Err("uniforms must be declared inside a uniform block".into());
            };
            let members = members
                .iter()
                .filter_map(|member| {
                    let name = member.name.clone()?;
                    let kind = UniformKind::from_type(&module.types[member.ty].inner);
                    Some((
                        name,
                        UniformSlot {
                            offset: member.offset,
                            kind,
                        },
                    ))
                })
                .collect();
            block = Some(UniformBlock {
                span: *span,
                members,
            });
        }
        Ok(Self { block })
    }

    /// Combines the layouts of two stages; both must agree on a shared block.
    pub fn merge(self, other: Self) -> Result<Self, String> {
        match (self.block, other.block) {
            (Some(left), Some(right)) if left != right => {
                Err("vertex and fragment stages declare different uniform blocks".into())
            }
            (Some(block), _) | (None, Some(block)) => Ok(Self { block: Some(block) }),
            (None, None) => Ok(Self::default()),
        }
    }

    pub fn block(&self) -> Option<&UniformBlock> {
        self.block.as_ref()
    }

    pub fn slot(&self, name: &str) -> Option<UniformSlot> {
        self.block.as_ref()?.members.get(name).copied()
    }
}

#[cfg(test)]
mod tests {
    use gallery::Dialect;

    use super::*;
    use crate::backend::ShaderStage;
    use crate::gpu::compile::parse_glsl;
    use crate::synthesize::{synthesize_fragment, VERTEX_SOURCE};

    fn layout_for(source: &str, dialect: Dialect) -> UniformLayout {
        let text = synthesize_fragment(source, dialect);
        let module = parse_glsl(ShaderStage::Fragment, &text).unwrap();
        UniformLayout::reflect(&module).unwrap()
    }

    #[test]
    fn standard_block_exposes_both_conventions() {
        let layout = layout_for(
            "void mainImage(out vec4 c, in vec2 p) { c = vec4(iTime); }",
            Dialect::StandardInterface,
        );

        assert_eq!(layout.slot("iTime").map(|s| s.kind), Some(UniformKind::Float));
        assert_eq!(layout.slot("iTime").map(|s| s.offset), Some(0));
        assert_eq!(
            layout.slot("iResolution").map(|s| s.kind),
            Some(UniformKind::Vec2)
        );
        assert_eq!(layout.slot("iMouse").map(|s| s.kind), Some(UniformKind::Vec4));
        assert_eq!(layout.slot("iFrame").map(|s| s.kind), Some(UniformKind::Int));
        assert_eq!(layout.slot("t").map(|s| s.kind), Some(UniformKind::Float));
        assert_eq!(layout.slot("r").map(|s| s.kind), Some(UniformKind::Vec2));

        let mouse = layout.slot("iMouse").unwrap().offset;
        assert_eq!(mouse % 16, 0);
        let block = layout.block().unwrap();
        assert_eq!(block.buffer_size() % 16, 0);
        assert!(block.buffer_size() >= u64::from(block.span));
    }

    #[test]
    fn legacy_block_has_only_shorthand_names() {
        let layout = layout_for("void main() { o = vec4(t, r, 1.0); }", Dialect::Legacy);
        assert!(layout.slot("t").is_some());
        assert!(layout.slot("r").is_some());
        assert!(layout.slot("iTime").is_none());
        assert!(layout.slot("iFrame").is_none());
    }

    #[test]
    fn vertex_stage_has_no_resources() {
        let module = parse_glsl(ShaderStage::Vertex, VERTEX_SOURCE).unwrap();
        let layout = UniformLayout::reflect(&module).unwrap();
        assert!(layout.block().is_none());

        let fragment = layout_for("void main() { o = vec4(t); }", Dialect::Legacy);
        let merged = layout.merge(fragment.clone()).unwrap();
        assert_eq!(merged, fragment);
    }

    #[test]
    fn kinds_accept_matching_values_only() {
        assert!(UniformKind::Float.accepts(&UniformValue::Float(1.0)));
        assert!(UniformKind::Int.accepts(&UniformValue::Int(3)));
        assert!(!UniformKind::Vec2.accepts(&UniformValue::Vec4([0.0; 4])));
        assert!(!UniformKind::Unsupported.accepts(&UniformValue::Float(0.0)));
    }
}
