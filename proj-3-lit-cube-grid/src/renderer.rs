use crate::{FRAGMENT_FUNCTION, VERTEX_FUNCTION};
use metal_app::components::*;
use metal_app::metal::*;
use metal_app::metal_types::*;
use metal_app::typed_buffer::TypedBuffer;
use metal_app::*;

/// Buffers rewritten every frame. `extra` carries whatever else a project needs per frame.
pub struct FrameResources<E> {
    pub instances: TypedBuffer<InstanceData>,
    pub camera: TypedBuffer<CameraData>,
    pub extra: E,
}

/// Draws a grid of textured, lit cubes with one instanced draw per frame.
pub struct CubeGridRenderer<E = ()> {
    depth_state: DepthStencilState,
    depth_texture: DepthTexture,
    device: Device,
    frames: FrameRing<FrameResources<E>, DispatchGate>,
    indices: TypedBuffer<u16>,
    library: Library,
    pipeline_state: RenderPipelineState,
    scene: Scene<CubeGrid>,
    texture: Texture,
    vertices: TypedBuffer<VertexData>,
}

impl<E> CubeGridRenderer<E> {
    /// `shader_source` must provide the entry points of [`crate::SHADER_SOURCE`].
    /// `create_extra` is called once per frame slot.
    pub fn new(
        device: Device,
        config: &AppConfig,
        shader_source: &str,
        texture: Texture,
        mut create_extra: impl FnMut(&DeviceRef, usize) -> Result<E, AppError>,
    ) -> Result<Self, AppError> {
        let grid = CubeGrid::new(config.grid_dims());
        let instance_count = grid.instance_count();
        let library = new_library(&device, "Cube Grid Shaders", shader_source)?;
        let depth_texture = DepthTexture::new("Depth");
        let CreateRenderPipelineResults { pipeline_state, .. } = create_pipeline(
            &device,
            &library,
            &new_render_pipeline_descriptor(Some(depth_texture.format())),
            "Cube Grid Pipeline",
            VERTEX_FUNCTION,
            1,
            FRAGMENT_FUNCTION,
        )?;
        let frames = FrameRing::try_from_fn(config.frames_in_flight(), |i| {
            Ok(FrameResources {
                instances: TypedBuffer::with_capacity(
                    &format!("Instances {i}"),
                    &device,
                    instance_count,
                ),
                camera: TypedBuffer::with_capacity(&format!("Camera {i}"), &device, 1),
                extra: create_extra(&device, i)?,
            })
        })?;
        log::info!(
            "Drawing {instance_count} cubes ({:?}) with {} frames in flight",
            grid.dims,
            frames.len()
        );
        Ok(Self {
            depth_state: new_depth_state(&device),
            depth_texture,
            frames,
            indices: TypedBuffer::from_data("Cube Indices", &device, &textured_cube_indices()),
            library,
            pipeline_state,
            scene: Scene::new(grid),
            texture,
            vertices: TypedBuffer::from_data("Cube Vertices", &device, &textured_cube_vertices()),
            device,
        })
    }

    #[inline]
    pub fn device(&self) -> &Device {
        &self.device
    }

    #[inline]
    pub fn library(&self) -> &Library {
        &self.library
    }

    /// Encodes one frame. `encode_before_pass` runs after the instance and camera buffers are
    /// written and before the render pass, with this frame's `extra` slot and the cube texture.
    pub fn render<'a>(
        &mut self,
        command_queue: &'a CommandQueue,
        render_target: &TextureRef,
        encode_before_pass: impl FnOnce(&CommandBufferRef, &mut E, &TextureRef),
    ) -> Result<&'a CommandBufferRef, AppError> {
        let InFlightFrame { slot, ticket, .. } = self.frames.begin_frame();
        let command_buffer = command_queue.new_command_buffer();
        command_buffer.set_label("Cube Grid Command Buffer");
        release_on_completion(command_buffer, ticket);

        self.scene.advance(
            slot.instances.contents_mut(),
            &mut slot.camera.contents_mut()[0],
        )?;

        encode_before_pass(command_buffer, &mut slot.extra, &self.texture);

        let depth = self.depth_texture.texture_for(&self.device, render_target);
        let encoder = command_buffer
            .new_render_command_encoder(new_render_pass_descriptor(render_target, Some(depth)));
        encoder.set_label("Cube Grid");
        encoder.set_render_pipeline_state(&self.pipeline_state);
        encoder.set_depth_stencil_state(&self.depth_state);
        encoder.set_cull_mode(MTLCullMode::Back);
        encoder.set_front_facing_winding(MTLWinding::CounterClockwise);
        encoder.set_vertex_buffer(
            VertexBufferIndex::Vertices as _,
            Some(self.vertices.raw()),
            0,
        );
        encoder.set_vertex_buffer(
            VertexBufferIndex::Instances as _,
            Some(slot.instances.raw()),
            0,
        );
        encoder.set_vertex_buffer(VertexBufferIndex::Camera as _, Some(slot.camera.raw()), 0);
        encoder.set_fragment_texture(FragTextureIndex::Texture as _, Some(&self.texture));
        encoder.draw_indexed_primitives_instanced(
            MTLPrimitiveType::Triangle,
            CUBE_INDEX_COUNT as _,
            MTLIndexType::UInt16,
            self.indices.raw(),
            0,
            self.scene.instance_count() as _,
        );
        encoder.end_encoding();
        Ok(command_buffer)
    }

    #[inline]
    pub fn on_event(&mut self, event: UserEvent) {
        self.scene.on_event(event);
    }
}
