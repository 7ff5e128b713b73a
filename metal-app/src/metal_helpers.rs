use crate::AppError;
use metal::*;
use std::ffi::c_void;

pub const DEFAULT_PIXEL_FORMAT: MTLPixelFormat = MTLPixelFormat::BGRA8Unorm_sRGB;

pub const DEFAULT_RESOURCE_OPTIONS: MTLResourceOptions = MTLResourceOptions::from_bits_truncate(
    MTLResourceOptions::StorageModeShared.bits()
        | MTLResourceOptions::CPUCacheModeWriteCombined.bits(),
);

/// Compiles Metal Shading Language source at runtime.
pub fn new_library(
    device: &DeviceRef,
    label: &'static str,
    source: &str,
) -> Result<Library, AppError> {
    let library = crate::debug_time(label, || {
        device.new_library_with_source(source, &CompileOptions::new())
    })
    .map_err(|message| AppError::ShaderCompile { label, message })?;
    library.set_label(label);
    Ok(library)
}

#[inline]
pub fn get_function(library: &LibraryRef, name: &'static str) -> Result<Function, AppError> {
    library
        .get_function(name, None)
        .map_err(|message| AppError::FunctionNotFound { name, message })
}

pub struct CreateRenderPipelineResults {
    pub vertex_function: Function,
    pub fragment_function: Function,
    pub pipeline_state: RenderPipelineState,
}

/// Fills in the shader functions of `base_pipeline_desc` and builds the pipeline state. The first
/// `num_vertex_immutable_buffers` vertex buffers are marked immutable.
pub fn create_pipeline(
    device: &DeviceRef,
    library: &LibraryRef,
    base_pipeline_desc: &RenderPipelineDescriptorRef,
    label: &'static str,
    vertex_func_name: &'static str,
    num_vertex_immutable_buffers: u32,
    frag_func_name: &'static str,
) -> Result<CreateRenderPipelineResults, AppError> {
    base_pipeline_desc.set_label(label);

    let vertex_function = get_function(library, vertex_func_name)?;
    base_pipeline_desc.set_vertex_function(Some(&vertex_function));
    if let Some(buffers) = base_pipeline_desc.vertex_buffers() {
        for buffer_index in 0..num_vertex_immutable_buffers {
            if let Some(buffer) = buffers.object_at(buffer_index as _) {
                buffer.set_mutability(MTLMutability::Immutable);
            }
        }
    }

    let fragment_function = get_function(library, frag_func_name)?;
    base_pipeline_desc.set_fragment_function(Some(&fragment_function));

    let pipeline_state = device
        .new_render_pipeline_state(base_pipeline_desc)
        .map_err(|message| AppError::PipelineCreation { label, message })?;
    log::info!("Created render pipeline {label}");
    Ok(CreateRenderPipelineResults {
        vertex_function,
        fragment_function,
        pipeline_state,
    })
}

/// Render pipeline descriptor drawing into the layer's color format.
pub fn new_render_pipeline_descriptor(
    depth_format: Option<MTLPixelFormat>,
) -> RenderPipelineDescriptor {
    let desc = RenderPipelineDescriptor::new();
    if let Some(color) = desc.color_attachments().object_at(0) {
        color.set_pixel_format(DEFAULT_PIXEL_FORMAT);
    }
    if let Some(depth_format) = depth_format {
        desc.set_depth_attachment_pixel_format(depth_format);
    }
    desc
}

pub fn create_compute_pipeline(
    device: &DeviceRef,
    library: &LibraryRef,
    label: &'static str,
    kernel_func_name: &'static str,
) -> Result<ComputePipelineState, AppError> {
    let function = get_function(library, kernel_func_name)?;
    let pipeline_state = device
        .new_compute_pipeline_state_with_function(&function)
        .map_err(|message| AppError::PipelineCreation { label, message })?;
    log::info!(
        "Created compute pipeline {label} (thread execution width {})",
        pipeline_state.thread_execution_width()
    );
    Ok(pipeline_state)
}

/// Less-than depth compare with depth writes enabled.
pub fn new_depth_state(device: &DeviceRef) -> DepthStencilState {
    let desc = DepthStencilDescriptor::new();
    desc.set_depth_compare_function(MTLCompareFunction::Less);
    desc.set_depth_write_enabled(true);
    device.new_depth_stencil_state(&desc)
}

/// Releases `ticket` once the GPU has finished with `command_buffer`.
pub fn release_on_completion<G: crate::FrameGate>(
    command_buffer: &CommandBufferRef,
    ticket: crate::FrameTicket<G>,
) {
    let release = ticket.into_completion_handler();
    let block = block::ConcreteBlock::new(move |_: &CommandBufferRef| release()).copy();
    command_buffer.add_completed_handler(&block);
}

pub const DEFAULT_CLEAR_COLOR: (f64, f64, f64, f64) = (1., 1., 1., 1.);

/// Clears and stores `render_target`. A depth attachment, when given, is cleared to 1.0 and
/// discarded after the pass.
pub fn new_render_pass_descriptor<'a>(
    render_target: &TextureRef,
    depth: Option<&TextureRef>,
) -> &'a RenderPassDescriptorRef {
    let desc = RenderPassDescriptor::new();
    if let Some(color) = desc.color_attachments().object_at(0) {
        let (r, g, b, a) = DEFAULT_CLEAR_COLOR;
        color.set_texture(Some(render_target));
        color.set_load_action(MTLLoadAction::Clear);
        color.set_clear_color(MTLClearColor::new(r, g, b, a));
        color.set_store_action(MTLStoreAction::Store);
    }
    if let Some(depth_texture) = depth {
        if let Some(attachment) = desc.depth_attachment() {
            attachment.set_texture(Some(depth_texture));
            attachment.set_load_action(MTLLoadAction::Clear);
            attachment.set_clear_depth(1.);
            attachment.set_store_action(MTLStoreAction::DontCare);
        }
    }
    desc
}

/// RGBA8 texture filled with `rgba`, tightly packed rows of `width` texels.
pub fn new_rgba_texture(
    device: &DeviceRef,
    label: &str,
    (width, height): (u32, u32),
    usage: MTLTextureUsage,
    rgba: &[u8],
) -> Texture {
    const BYTES_PER_PIXEL: u64 = 4;
    debug_assert_eq!(rgba.len() as u64, BYTES_PER_PIXEL * width as u64 * height as u64);
    let desc = TextureDescriptor::new();
    desc.set_width(width as _);
    desc.set_height(height as _);
    desc.set_pixel_format(MTLPixelFormat::RGBA8Unorm);
    desc.set_texture_type(MTLTextureType::D2);
    desc.set_usage(usage);
    let texture = device.new_texture(&desc);
    texture.set_label(label);
    texture.replace_region(
        MTLRegion::new_2d(0, 0, width as _, height as _),
        0,
        rgba.as_ptr() as *const c_void,
        BYTES_PER_PIXEL * width as u64,
    );
    texture
}
