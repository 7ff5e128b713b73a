use crate::UserEvent;
use metal_types::{f32x4x4, CameraData};

const FOV_Y_DEGREES: f32 = 45.;
const N: f32 = 0.03;
const F: f32 = 500.;

/// Fixed camera at the origin looking down -Z. Only the aspect ratio changes, following the
/// drawable size.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Camera {
    pub fov_y: f32,
    pub near: f32,
    pub far: f32,
    pub aspect_ratio: f32,
    pub world_transform: f32x4x4,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            fov_y: FOV_Y_DEGREES.to_radians(),
            near: N,
            far: F,
            aspect_ratio: 1.,
            world_transform: f32x4x4::identity(),
        }
    }
}

impl Camera {
    /// Returns `true` when the camera changed.
    #[inline]
    pub fn on_event(&mut self, event: UserEvent) -> bool {
        match event {
            UserEvent::WindowResize { size: [w, h], .. } if w > 0. && h > 0. => {
                let aspect_ratio = w / h;
                let changed = aspect_ratio != self.aspect_ratio;
                self.aspect_ratio = aspect_ratio;
                changed
            }
            _ => false,
        }
    }

    #[inline]
    pub fn camera_data(&self) -> CameraData {
        CameraData {
            perspective_transform: f32x4x4::perspective(
                self.fov_y,
                self.aspect_ratio,
                self.near,
                self.far,
            ),
            world_transform: self.world_transform,
            world_normal_transform: self.world_transform.discard_translation(),
        }
    }
}
