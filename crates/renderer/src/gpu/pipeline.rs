use wgpu::naga;

use super::reflect::{UniformLayout, UniformSlot};

/// Entry point name every GLSL stage is parsed under.
const ENTRY_POINT: &str = "main";

const QUAD_ATTRIBUTES: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x2];

/// A compiled stage: the validated naga module plus the device module.
pub(crate) struct CompiledStage {
    pub module: naga::Module,
    pub shader_module: wgpu::ShaderModule,
}

/// Everything a linked program needs to draw.
pub(crate) struct LinkedProgram {
    pub pipeline: wgpu::RenderPipeline,
    pub uniforms: Option<UniformStorage>,
    pub layout: UniformLayout,
}

/// Uniform buffer plus the CPU copy `set_uniform` writes into.
pub(crate) struct UniformStorage {
    pub buffer: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
    pub staging: Vec<u8>,
}

impl UniformStorage {
    pub fn write(&mut self, slot: UniformSlot, bytes: &[u8]) -> bool {
        let start = slot.offset as usize;
        match self.staging.get_mut(start..start + bytes.len()) {
            Some(target) => {
                target.copy_from_slice(bytes);
                true
            }
            None => false,
        }
    }
}

fn require_entry_point(module: &naga::Module, stage: naga::ShaderStage) -> Result<(), String> {
    if module
        .entry_points
        .iter()
        .any(|entry| entry.stage == stage && entry.name == ENTRY_POINT)
    {
        Ok(())
    } else {
        Err(format!("no {stage:?} entry point named '{ENTRY_POINT}'"))
    }
}

/// Checks the two stages fit together and builds the render pipeline.
///
/// Device validation errors raised while building are captured and returned
/// as the link log.
pub(crate) fn link(
    device: &wgpu::Device,
    surface_format: wgpu::TextureFormat,
    vertex: &CompiledStage,
    fragment: &CompiledStage,
) -> Result<LinkedProgram, String> {
    require_entry_point(&vertex.module, naga::ShaderStage::Vertex)?;
    require_entry_point(&fragment.module, naga::ShaderStage::Fragment)?;
    let layout =
        UniformLayout::reflect(&vertex.module)?.merge(UniformLayout::reflect(&fragment.module)?)?;

    device.push_error_scope(wgpu::ErrorFilter::Validation);

    let uniform_layout = layout.block().map(|_| {
        device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("gallery uniform layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        })
    });

    let uniforms = match (layout.block(), uniform_layout.as_ref()) {
        (Some(block), Some(bind_layout)) => {
            let size = block.buffer_size();
            let buffer = device.create_buffer(&wgpu::BufferDescriptor {
                label: Some("gallery uniforms"),
                size,
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            });
            let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("gallery uniform bind group"),
                layout: bind_layout,
                entries: &[wgpu::BindGroupEntry {
                    binding: 0,
                    resource: buffer.as_entire_binding(),
                }],
            });
            Some(UniformStorage {
                buffer,
                bind_group,
                staging: vec![0; size as usize],
            })
        }
        _ => None,
    };

    let bind_group_layouts: Vec<&wgpu::BindGroupLayout> = uniform_layout.iter().collect();
    let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("gallery pipeline layout"),
        bind_group_layouts: &bind_group_layouts,
        push_constant_ranges: &[],
    });

    let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("gallery pipeline"),
        layout: Some(&pipeline_layout),
        vertex: wgpu::VertexState {
            module: &vertex.shader_module,
            entry_point: Some(ENTRY_POINT),
            buffers: &[wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &QUAD_ATTRIBUTES,
            }],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleStrip,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: None,
            polygon_mode: wgpu::PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        },
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        fragment: Some(wgpu::FragmentState {
            module: &fragment.shader_module,
            entry_point: Some(ENTRY_POINT),
            targets: &[Some(wgpu::ColorTargetState {
                format: surface_format,
                blend: None,
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        multiview: None,
        cache: None,
    });

    if let Some(err) = pollster::block_on(device.pop_error_scope()) {
        return Err(err.to_string());
    }

    Ok(LinkedProgram {
        pipeline,
        uniforms,
        layout,
    })
}
