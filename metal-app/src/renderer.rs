use crate::{AppConfig, AppError, Size, Unit, UserEvent, DEFAULT_PIXEL_FORMAT};
use cocoa::appkit::CGFloat;
use core_graphics_types::geometry::CGSize;
use metal::*;
use objc::rc::autoreleasepool;

/// Implemented by each project; the application drives it once per display refresh.
pub trait RendererDelgate: Sized {
    fn new(device: Device, config: &AppConfig) -> Result<Self, AppError>;

    /// Encodes a frame into a command buffer from `command_queue`. The caller presents and
    /// commits it.
    fn render<'a>(
        &mut self,
        command_queue: &'a CommandQueue,
        render_target: &TextureRef,
    ) -> Result<&'a CommandBufferRef, AppError>;

    #[inline]
    fn on_event(&mut self, _event: UserEvent) {}
}

pub(crate) struct MetalRenderer<R: RendererDelgate> {
    backing_scale_factor: Unit,
    command_queue: CommandQueue,
    pub(crate) layer: MetalLayer,
    screen_size: Size,
    delegate: R,
}

unsafe impl<R: RendererDelgate> Send for MetalRenderer<R> {}

impl<R: RendererDelgate> MetalRenderer<R> {
    #[inline]
    pub(crate) fn new(backing_scale_factor: Unit, config: &AppConfig) -> Result<Self, AppError> {
        let device = Device::system_default().ok_or(AppError::NoDevice)?;
        log::info!("Using Metal device: {}", device.name());
        let command_queue = device.new_command_queue();
        command_queue.set_label("Command Queue");
        let layer = MetalLayer::new();
        layer.set_device(&device);
        layer.set_pixel_format(DEFAULT_PIXEL_FORMAT);
        layer.set_framebuffer_only(true);
        layer.set_presents_with_transaction(false);
        Ok(Self {
            backing_scale_factor,
            delegate: R::new(device, config)?,
            layer,
            screen_size: [0.; 2],
            command_queue,
        })
    }

    #[inline]
    pub(crate) fn update_size(&mut self, size: Size) {
        let size = size.map(|v| v * self.backing_scale_factor);
        if self.screen_size != size {
            log::info!("Drawable resized to {}x{}", size[0], size[1]);
            self.layer
                .set_drawable_size(CGSize::new(size[0] as CGFloat, size[1] as CGFloat));
            self.screen_size = size;
            self.delegate.on_event(UserEvent::window_resize(size));
        }
    }

    #[inline]
    pub(crate) fn render(&mut self) {
        autoreleasepool(|| {
            if let Some(drawable) = self.layer.next_drawable() {
                match self
                    .delegate
                    .render(&self.command_queue, drawable.texture())
                {
                    Ok(command_buffer) => {
                        command_buffer.present_drawable(drawable);
                        command_buffer.commit();
                    }
                    Err(error) => log::error!("Failed to render frame: {error}"),
                }
            };
        });
    }

    #[inline]
    pub(crate) fn on_event(&mut self, event: UserEvent) {
        self.delegate.on_event(event);
    }
}
