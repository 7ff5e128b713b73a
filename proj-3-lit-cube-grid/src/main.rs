use metal_app::{AppConfig, AppError};

#[cfg(target_os = "macos")]
mod delegate {
    use metal_app::components::{checkerboard_rgba, CHECKERBOARD_SIZE};
    use metal_app::metal::*;
    use metal_app::*;
    use proj_3_lit_cube_grid::{CubeGridRenderer, SHADER_SOURCE};

    pub struct Delegate {
        renderer: CubeGridRenderer,
    }

    impl RendererDelgate for Delegate {
        fn new(device: Device, config: &AppConfig) -> Result<Self, AppError> {
            let size = CHECKERBOARD_SIZE as u32;
            let texture = debug_time("Checkerboard texture", || {
                new_rgba_texture(
                    &device,
                    "Checkerboard",
                    (size, size),
                    MTLTextureUsage::ShaderRead,
                    &checkerboard_rgba(CHECKERBOARD_SIZE, CHECKERBOARD_SIZE),
                )
            });
            Ok(Self {
                renderer: CubeGridRenderer::new(device, config, SHADER_SOURCE, texture, |_, _| {
                    Ok(())
                })?,
            })
        }

        #[inline]
        fn render<'a>(
            &mut self,
            command_queue: &'a CommandQueue,
            render_target: &TextureRef,
        ) -> Result<&'a CommandBufferRef, AppError> {
            self.renderer
                .render(command_queue, render_target, |_, _, _| {})
        }

        #[inline]
        fn on_event(&mut self, event: UserEvent) {
            self.renderer.on_event(event);
        }
    }
}

#[cfg(target_os = "macos")]
fn run(config: AppConfig) -> Result<(), AppError> {
    metal_app::launch_application::<delegate::Delegate>("Project 3 - Lit Cube Grid", config)
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
