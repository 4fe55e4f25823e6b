use crate::shaders;
use bytemuck::{Pod, Zeroable};
use facecube_common::{FaceId, FaceMap};
use facecube_render::{CubeGeometry, InteractiveCube, OrbitCamera};
use facecube_texture::{Surface, SurfaceId};
use glam::Mat4;
use wgpu::util::DeviceExt;

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct Uniforms {
    view_proj: [[f32; 4]; 4],
    model: [[f32; 4]; 4],
}

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct Vertex {
    position: [f32; 3],
    uv: [f32; 2],
}

fn cube_mesh(geometry: &CubeGeometry) -> (Vec<Vertex>, Vec<u16>) {
    let vertices = geometry
        .vertices()
        .into_iter()
        .map(|v| Vertex {
            position: v.position,
            uv: v.uv,
        })
        .collect();
    (vertices, geometry.indices())
}

/// Faces whose bound surface differs from what the GPU holds.
fn pending_uploads(uploaded: &FaceMap<Option<SurfaceId>>, cube: &InteractiveCube) -> Vec<FaceId> {
    FaceId::ALL
        .into_iter()
        .filter(|&face| {
            let bound = cube.materials().get(face).map(Surface::id);
            bound.is_some() && bound != *uploaded.get(face)
        })
        .collect()
}

/// GPU copy of one face's surface.
struct FaceTexture {
    texture: wgpu::Texture,
    bind_group: wgpu::BindGroup,
    size: (u32, u32),
}

/// wgpu-based cube renderer.
pub struct WgpuRenderer {
    pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,
    texture_layout: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    faces: Vec<FaceTexture>,
    uploaded: FaceMap<Option<SurfaceId>>,
    depth_texture: wgpu::TextureView,
    surface_format: wgpu::TextureFormat,
}

impl WgpuRenderer {
    pub fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        surface_format: wgpu::TextureFormat,
        width: u32,
        height: u32,
        geometry: &CubeGeometry,
    ) -> Self {
        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("uniform_buffer"),
            contents: bytemuck::bytes_of(&Uniforms {
                view_proj: Mat4::IDENTITY.to_cols_array_2d(),
                model: Mat4::IDENTITY.to_cols_array_2d(),
            }),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let uniform_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("uniform_bind_group_layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let uniform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("uniform_bind_group"),
            layout: &uniform_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let texture_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("face_texture_layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("face_sampler"),
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("pipeline_layout"),
            bind_group_layouts: &[&uniform_layout, &texture_layout],
            push_constant_ranges: &[],
        });

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("cube_shader"),
            source: wgpu::ShaderSource::Wgsl(shaders::CUBE_SHADER.into()),
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("cube_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<Vertex>() as u64,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &wgpu::vertex_attr_array![
                        0 => Float32x3,
                        1 => Float32x2,
                    ],
                }],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                cull_mode: Some(wgpu::Face::Back),
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: wgpu::TextureFormat::Depth32Float,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: Default::default(),
                bias: Default::default(),
            }),
            multisample: Default::default(),
            multiview: None,
            cache: None,
        });

        let (verts, indices) = cube_mesh(geometry);
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("cube_vertex_buffer"),
            contents: bytemuck::cast_slice(&verts),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("cube_index_buffer"),
            contents: bytemuck::cast_slice(&indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        // 1x1 white placeholders until the first surfaces arrive.
        let faces = FaceId::ALL
            .iter()
            .map(|face| {
                let texture =
                    Self::create_face_texture(device, &texture_layout, &sampler, *face, (1, 1));
                Self::write_face_pixels(queue, &texture.texture, (1, 1), &[255, 255, 255, 255]);
                texture
            })
            .collect();

        let depth_texture = Self::create_depth_texture(device, width, height);

        Self {
            pipeline,
            uniform_buffer,
            uniform_bind_group,
            texture_layout,
            sampler,
            vertex_buffer,
            index_buffer,
            faces,
            uploaded: FaceMap::default(),
            depth_texture,
            surface_format,
        }
    }

    pub fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        self.depth_texture = Self::create_depth_texture(device, width, height);
    }

    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.surface_format
    }

    /// Upload faces whose surface changed since the last call. Returns them.
    pub fn sync_faces(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        cube: &InteractiveCube,
    ) -> Vec<FaceId> {
        let pending = pending_uploads(&self.uploaded, cube);
        for &face in &pending {
            let Some(surface) = cube.materials().get(face) else {
                continue;
            };
            let size = (surface.width(), surface.height());
            if self.faces[face.index()].size != size {
                self.faces[face.index()] = Self::create_face_texture(
                    device,
                    &self.texture_layout,
                    &self.sampler,
                    face,
                    size,
                );
            }
            Self::write_face_pixels(queue, &self.faces[face.index()].texture, size, surface.pixels());
            self.uploaded.replace(face, Some(surface.id()));
            tracing::debug!(%face, surface = %surface.id(), "face texture uploaded");
        }
        pending
    }

    /// Render one frame: the cube with its current face textures.
    pub fn render(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        view: &wgpu::TextureView,
        camera: &OrbitCamera,
        cube: &InteractiveCube,
    ) {
        self.sync_faces(device, queue, cube);

        queue.write_buffer(
            &self.uniform_buffer,
            0,
            bytemuck::bytes_of(&Uniforms {
                view_proj: camera.view_projection().to_cols_array_2d(),
                model: cube.transform().matrix().to_cols_array_2d(),
            }),
        );

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("render_encoder"),
        });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("main_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: 0.1,
                            g: 0.1,
                            b: 0.15,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                ..Default::default()
            });

            pass.set_pipeline(&self.pipeline);
            pass.set_bind_group(0, &self.uniform_bind_group, &[]);
            pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
            pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint16);
            for face in FaceId::ALL {
                pass.set_bind_group(1, &self.faces[face.index()].bind_group, &[]);
                pass.draw_indexed(cube.geometry().index_range(face), 0, 0..1);
            }
        }

        queue.submit(std::iter::once(encoder.finish()));
    }

    fn create_face_texture(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        sampler: &wgpu::Sampler,
        face: FaceId,
        (width, height): (u32, u32),
    ) -> FaceTexture {
        let label = format!("face_texture_{}", face.index());
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label.as_str()),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        let view = texture.create_view(&Default::default());
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label.as_str()),
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
            ],
        });
        FaceTexture {
            texture,
            bind_group,
            size: (width, height),
        }
    }

    fn write_face_pixels(
        queue: &wgpu::Queue,
        texture: &wgpu::Texture,
        (width, height): (u32, u32),
        rgba: &[u8],
    ) {
        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            rgba,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * width),
                rows_per_image: Some(height),
            },
            wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
        );
    }

    fn create_depth_texture(
        device: &wgpu::Device,
        width: u32,
        height: u32,
    ) -> wgpu::TextureView {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("depth_texture"),
            size: wgpu::Extent3d {
                width: width.max(1),
                height: height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Depth32Float,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        texture.create_view(&Default::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use facecube_render::ClickReport;
    use facecube_texture::{TextureMode, TextureSynthesizer};

    #[test]
    fn mesh_keeps_geometry_layout() {
        let (verts, indices) = cube_mesh(&CubeGeometry::default());
        assert_eq!(verts.len(), 24);
        assert_eq!(indices.len(), 36);
        assert_eq!(std::mem::size_of::<Vertex>(), 20);
    }

    #[test]
    fn unbound_cube_needs_no_upload() {
        let cube = InteractiveCube::new(ClickReport::FaceOnly);
        assert!(pending_uploads(&FaceMap::default(), &cube).is_empty());
    }

    #[test]
    fn uploads_track_surface_identity() {
        let synth = TextureSynthesizer::new();
        let mut set = FaceMap::from_fn(|_| synth.synthesize("", facecube_common::Rgb::WHITE, TextureMode::Label));
        let mut cube = InteractiveCube::new(ClickReport::FaceOnly);
        cube.render(&set);

        let mut uploaded: FaceMap<Option<SurfaceId>> = FaceMap::default();
        assert_eq!(pending_uploads(&uploaded, &cube), FaceId::ALL.to_vec());
        for face in FaceId::ALL {
            uploaded.replace(face, Some(set.get(face).id()));
        }
        assert!(pending_uploads(&uploaded, &cube).is_empty());

        set.replace(FaceId::Left, synth.synthesize("x", facecube_common::Rgb::WHITE, TextureMode::Label));
        cube.render(&set);
        assert_eq!(pending_uploads(&uploaded, &cube), vec![FaceId::Left]);
    }
}
