use metal_app::{AppConfig, AppError};

#[cfg(target_os = "macos")]
mod delegate {
    use metal_app::components::*;
    use metal_app::metal::*;
    use metal_app::metal_types::*;
    use metal_app::typed_buffer::TypedBuffer;
    use metal_app::*;

    struct FrameResources {
        instances: TypedBuffer<ColoredInstanceData>,
        camera: TypedBuffer<CameraData>,
    }

    pub struct Delegate {
        depth_state: DepthStencilState,
        depth_texture: DepthTexture,
        device: Device,
        frames: FrameRing<FrameResources, DispatchGate>,
        indices: TypedBuffer<u16>,
        pipeline_state: RenderPipelineState,
        scene: Scene<CubeWave>,
        vertices: TypedBuffer<float3>,
    }

    impl RendererDelgate for Delegate {
        fn new(device: Device, config: &AppConfig) -> Result<Self, AppError> {
            let wave = CubeWave::default();
            let library = new_library(&device, "Cube Wave Shaders", include_str!("shaders.metal"))?;
            let depth_texture = DepthTexture::new("Depth");
            let CreateRenderPipelineResults { pipeline_state, .. } = create_pipeline(
                &device,
                &library,
                &new_render_pipeline_descriptor(Some(depth_texture.format())),
                "Cube Wave Pipeline",
                "vertexMain",
                1,
                "fragmentMain",
            )?;
            let frames = FrameRing::try_from_fn(config.frames_in_flight(), |i| {
                Ok(FrameResources {
                    instances: TypedBuffer::with_capacity(
                        &format!("Instances {i}"),
                        &device,
                        wave.instance_count,
                    ),
                    camera: TypedBuffer::with_capacity(&format!("Camera {i}"), &device, 1),
                })
            })?;
            log::info!(
                "Drawing {} cubes with {} frames in flight",
                wave.instance_count,
                frames.len()
            );
            Ok(Self {
                depth_state: new_depth_state(&device),
                depth_texture,
                frames,
                indices: TypedBuffer::from_data("Cube Indices", &device, &POSITION_CUBE_INDICES),
                pipeline_state,
                scene: Scene::new(wave),
                vertices: TypedBuffer::from_data("Cube Vertices", &device, &POSITION_CUBE_VERTICES),
                device,
            })
        }

        fn render<'a>(
            &mut self,
            command_queue: &'a CommandQueue,
            render_target: &TextureRef,
        ) -> Result<&'a CommandBufferRef, AppError> {
            let InFlightFrame { slot, ticket, .. } = self.frames.begin_frame();
            let command_buffer = command_queue.new_command_buffer();
            command_buffer.set_label("Cube Wave Command Buffer");
            release_on_completion(command_buffer, ticket);

            self.scene.advance(
                slot.instances.contents_mut(),
                &mut slot.camera.contents_mut()[0],
            )?;

            let depth = self.depth_texture.texture_for(&self.device, render_target);
            let encoder = command_buffer
                .new_render_command_encoder(new_render_pass_descriptor(render_target, Some(depth)));
            encoder.set_label("Cube Wave");
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

        fn on_event(&mut self, event: UserEvent) {
            self.scene.on_event(event);
        }
    }
}

#[cfg(target_os = "macos")]
fn run(config: AppConfig) -> Result<(), AppError> {
    metal_app::launch_application::<delegate::Delegate>("Project 2 - Instancing", config)
}

#[cfg(not(target_os = "macos"))]
fn run(_config: AppConfig) -> Result<(), AppError> {
    Err(AppError::UnsupportedPlatform(env!("CARGO_PKG_NAME")))
}

fn main() {
    metal_app::init_logging();
    if let Err(error) = run(AppConfig::from_env_args()) {
        log::error!("{error}");
        std::process::exit(1);
    }
}
