use std::os::raw::c_ushort;

pub type Unit = f32;
pub type Size = [Unit; 2];

#[derive(Copy, Clone, PartialEq, Debug)]
pub enum UserEvent {
    #[non_exhaustive]
    KeyDown { key_code: c_ushort },
    /// Drawable size in pixels (already multiplied by the backing scale factor).
    #[non_exhaustive]
    WindowResize { size: Size },
}

impl UserEvent {
    #[inline]
    pub const fn window_resize(size: Size) -> Self {
        Self::WindowResize { size }
    }

    #[inline]
    pub const fn key_down(key_code: c_ushort) -> Self {
        Self::KeyDown { key_code }
    }
}
