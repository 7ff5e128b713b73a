use metal_app::metal_types::{float3, TriangleVertex};
use metal_app::{AppConfig, AppError};

#[cfg_attr(not(target_os = "macos"), allow(dead_code))]
const TRIANGLE_VERTICES: [TriangleVertex; 3] = [
    TriangleVertex {
        position: float3::new(-0.8, 0.8, 0.),
        color: float3::new(1., 0.3, 0.2),
    },
    TriangleVertex {
        position: float3::new(0., -0.8, 0.),
        color: float3::new(0.8, 1., 0.),
    },
    TriangleVertex {
        position: float3::new(0.8, 0.8, 0.),
        color: float3::new(0.8, 0., 1.),
    },
];

#[cfg(target_os = "macos")]
mod delegate {
    use super::TRIANGLE_VERTICES;
    use metal_app::metal::*;
    use metal_app::metal_types::{TriangleVertex, VertexBufferIndex};
    use metal_app::typed_buffer::TypedBuffer;
    use metal_app::*;

    pub struct Delegate {
        pipeline_state: RenderPipelineState,
        vertices: TypedBuffer<TriangleVertex>,
    }

    impl RendererDelgate for Delegate {
        fn new(device: Device, _config: &AppConfig) -> Result<Self, AppError> {
            let library = new_library(&device, "Triangle Shaders", include_str!("shaders.metal"))?;
            let CreateRenderPipelineResults { pipeline_state, .. } = create_pipeline(
                &device,
                &library,
                &new_render_pipeline_descriptor(None),
                "Triangle Pipeline",
                "vertexMain",
                1,
                "fragmentMain",
            )?;
            Ok(Self {
                pipeline_state,
                vertices: TypedBuffer::from_data("Triangle Vertices", &device, &TRIANGLE_VERTICES),
            })
        }

        fn render<'a>(
            &mut self,
            command_queue: &'a CommandQueue,
            render_target: &TextureRef,
        ) -> Result<&'a CommandBufferRef, AppError> {
            let command_buffer = command_queue.new_command_buffer();
            command_buffer.set_label("Triangle Command Buffer");
            let encoder = command_buffer
                .new_render_command_encoder(new_render_pass_descriptor(render_target, None));
            encoder.set_render_pipeline_state(&self.pipeline_state);
            encoder.set_vertex_buffer(
                VertexBufferIndex::Vertices as _,
                Some(self.vertices.raw()),
                0,
            );
            encoder.draw_primitives(MTLPrimitiveType::Triangle, 0, self.vertices.len as _);
            encoder.end_encoding();
            Ok(command_buffer)
        }
    }
}

#[cfg(target_os = "macos")]
fn run(config: AppConfig) -> Result<(), AppError> {
    metal_app::launch_application::<delegate::Delegate>("Project 1 - Triangle", config)
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_triangle_is_counter_clockwise_in_clip_space() {
        let [a, b, c] = TRIANGLE_VERTICES.map(|v| v.position);
        assert!((b - a).cross(c - a).z() > 0.);
        assert!(TRIANGLE_VERTICES
            .iter()
            .all(|v| v.position.x().abs() <= 1. && v.position.y().abs() <= 1.));
    }
}
