use metal::{
    DeviceRef, MTLPixelFormat, MTLStorageMode, MTLTextureUsage, Texture, TextureDescriptor,
    TextureRef,
};

/// Depth attachment that follows the size of the render target it is paired with.
pub struct DepthTexture {
    label: &'static str,
    format: MTLPixelFormat,
    texture: Option<Texture>,
}

impl DepthTexture {
    pub const DEFAULT_FORMAT: MTLPixelFormat = MTLPixelFormat::Depth16Unorm;

    #[inline]
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            format: Self::DEFAULT_FORMAT,
            texture: None,
        }
    }

    #[inline]
    pub fn format(&self) -> MTLPixelFormat {
        self.format
    }

    /// Returns a depth texture sized like `render_target`, reallocating after a resize.
    pub fn texture_for(&mut self, device: &DeviceRef, render_target: &TextureRef) -> &TextureRef {
        let (width, height) = (render_target.width(), render_target.height());
        if self
            .texture
            .as_ref()
            .is_some_and(|t| t.width() != width || t.height() != height)
        {
            self.texture = None;
        }
        let (label, format) = (self.label, self.format);
        self.texture.get_or_insert_with(|| {
            log::debug!("Allocating {label} ({width}x{height})");
            let desc = TextureDescriptor::new();
            desc.set_width(width);
            desc.set_height(height);
            desc.set_pixel_format(format);
            desc.set_storage_mode(MTLStorageMode::Private);
            desc.set_usage(MTLTextureUsage::RenderTarget);
            let texture = device.new_texture(&desc);
            texture.set_label(label);
            texture
        })
    }
}
