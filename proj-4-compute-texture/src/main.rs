use metal_app::{AppConfig, AppError};

#[cfg_attr(not(target_os = "macos"), allow(dead_code))]
const KERNEL_FUNCTION: &str = "mandelbrotSet";
#[cfg_attr(not(target_os = "macos"), allow(dead_code))]
const KERNEL_SOURCE: &str = include_str!("mandelbrot.metal");

/// Threadgroup of one SIMD group wide and as tall as the pipeline allows.
#[cfg_attr(not(target_os = "macos"), allow(dead_code))]
fn threadgroup_size(thread_execution_width: u64, max_total_threads: u64) -> (u64, u64) {
    let width = thread_execution_width.max(1);
    (width, (max_total_threads / width).max(1))
}

#[cfg(target_os = "macos")]
mod delegate {
    use super::{threadgroup_size, KERNEL_FUNCTION, KERNEL_SOURCE};
    use metal_app::components::{mandelbrot_rgba, MANDELBROT_TEXTURE_SIZE};
    use metal_app::metal::*;
    use metal_app::metal_types::{ComputeBufferIndex, ComputeTextureIndex, MandelbrotParams};
    use metal_app::typed_buffer::TypedBuffer;
    use metal_app::*;
    use proj_3_lit_cube_grid::{CubeGridRenderer, SHADER_SOURCE};

    pub struct Delegate {
        compute_pipeline: ComputePipelineState,
        frame: u32,
        max_iterations: u32,
        renderer: CubeGridRenderer<TypedBuffer<MandelbrotParams>>,
    }

    impl RendererDelgate for Delegate {
        fn new(device: Device, config: &AppConfig) -> Result<Self, AppError> {
            let size = MANDELBROT_TEXTURE_SIZE;
            let texture = debug_time("Mandelbrot CPU reference", || {
                new_rgba_texture(
                    &device,
                    "Mandelbrot",
                    (size as u32, size as u32),
                    MTLTextureUsage::ShaderRead | MTLTextureUsage::ShaderWrite,
                    &mandelbrot_rgba(0, size, size, config.max_iterations),
                )
            });
            let renderer = CubeGridRenderer::new(
                device,
                config,
                &format!("{SHADER_SOURCE}\n{KERNEL_SOURCE}"),
                texture,
                |device, i| {
                    Ok(TypedBuffer::with_capacity(
                        &format!("Mandelbrot Params {i}"),
                        device,
                        1,
                    ))
                },
            )?;
            let compute_pipeline = create_compute_pipeline(
                renderer.device(),
                renderer.library(),
                "Mandelbrot Pipeline",
                KERNEL_FUNCTION,
            )?;
            Ok(Self {
                compute_pipeline,
                frame: 0,
                max_iterations: config.max_iterations,
                renderer,
            })
        }

        fn render<'a>(
            &mut self,
            command_queue: &'a CommandQueue,
            render_target: &TextureRef,
        ) -> Result<&'a CommandBufferRef, AppError> {
            let params = MandelbrotParams {
                frame: self.frame,
                max_iterations: self.max_iterations,
            };
            self.frame = self.frame.wrapping_add(1);
            let pipeline = &self.compute_pipeline;
            self.renderer.render(
                command_queue,
                render_target,
                |command_buffer, params_buffer, texture| {
                    params_buffer.contents_mut()[0] = params;
                    let encoder = command_buffer.new_compute_command_encoder();
                    encoder.set_label("Mandelbrot");
                    encoder.set_compute_pipeline_state(pipeline);
                    encoder.set_texture(ComputeTextureIndex::Output as _, Some(texture));
                    encoder.set_buffer(
                        ComputeBufferIndex::Params as _,
                        Some(params_buffer.raw()),
                        0,
                    );
                    let (w, h) = threadgroup_size(
                        pipeline.thread_execution_width(),
                        pipeline.max_total_threads_per_threadgroup(),
                    );
                    encoder.dispatch_threads(
                        MTLSize::new(texture.width(), texture.height(), 1),
                        MTLSize::new(w, h, 1),
                    );
                    encoder.end_encoding();
                },
            )
        }

        #[inline]
        fn on_event(&mut self, event: UserEvent) {
            self.renderer.on_event(event);
        }
    }
}

#[cfg(target_os = "macos")]
fn run(config: AppConfig) -> Result<(), AppError> {
    metal_app::launch_application::<delegate::Delegate>("Project 4 - Compute Texture", config)
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
    fn test_threadgroup_size() {
        assert_eq!(threadgroup_size(32, 1024), (32, 32));
        assert_eq!(threadgroup_size(64, 1024), (64, 16));
        assert_eq!(threadgroup_size(0, 0), (1, 1));
    }

    #[test]
    fn test_kernel_source_declares_kernel() {
        assert!(KERNEL_SOURCE.contains(&format!("kernel void {KERNEL_FUNCTION}(")));
        assert!(!KERNEL_SOURCE.contains("#include"));
    }
}
