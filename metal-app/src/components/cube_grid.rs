use crate::AppError;
use metal_types::{f32x4x4, float3, float4, InstanceData};
use std::f32::consts::PI;

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct GridDims {
    pub rows: usize,
    pub columns: usize,
    pub layers: usize,
}

impl GridDims {
    #[inline]
    pub const fn new(rows: usize, columns: usize, layers: usize) -> Self {
        Self {
            rows,
            columns,
            layers,
        }
    }

    #[inline]
    pub const fn instance_count(&self) -> usize {
        self.rows * self.columns * self.layers
    }

    /// Grid cell of instance `index`: rows vary fastest, then columns, then layers.
    #[inline]
    pub const fn cell_of(&self, index: usize) -> [usize; 3] {
        [
            index % self.rows,
            (index / self.rows) % self.columns,
            index / (self.rows * self.columns),
        ]
    }
}

impl Default for GridDims {
    fn default() -> Self {
        Self::new(10, 10, 10)
    }
}

/// Animation angle added every frame, in radians.
pub const ANGLE_PER_FRAME: f32 = 0.01;

/// Gradient from red to green across the instances, with blue pulsing once over the range.
#[inline]
pub fn instance_color(index: usize, count: usize) -> float4 {
    let r = index as f32 / count as f32;
    float4::new(r, 1. - r, (2. * PI * r).sin(), 1.)
}

/// Spins `object_rotation` about a pivot instead of the origin.
#[inline]
pub fn rotate_about(pivot: float3, object_rotation: f32x4x4) -> f32x4x4 {
    f32x4x4::translate_by(pivot) * object_rotation * f32x4x4::translate_by(-pivot)
}

/// A block of textured cubes spinning in front of the camera.
#[derive(Copy, Clone, Debug)]
pub struct CubeGrid {
    pub dims: GridDims,
    pub cube_scale: f32,
    pub center: float3,
}

impl CubeGrid {
    pub const DEFAULT_CUBE_SCALE: f32 = 0.2;
    pub const DEFAULT_CENTER: float3 = float3::new(0., 0., -10.);

    #[inline]
    pub const fn new(dims: GridDims) -> Self {
        Self {
            dims,
            cube_scale: Self::DEFAULT_CUBE_SCALE,
            center: Self::DEFAULT_CENTER,
        }
    }

    #[inline]
    pub const fn instance_count(&self) -> usize {
        self.dims.instance_count()
    }

    /// Offset of a cell from the grid center. Cell centers are two cube-widths apart.
    pub fn cell_offset(&self, [ix, iy, iz]: [usize; 3]) -> float3 {
        let s = self.cube_scale;
        let half = |n: usize| n as f32 / 2.;
        float3::new(
            (ix as f32 - half(self.dims.rows)) * 2. * s + s,
            (iy as f32 - half(self.dims.columns)) * 2. * s + s,
            (iz as f32 - half(self.dims.layers)) * 2. * s,
        )
    }

    pub fn instance(&self, index: usize, angle: f32, object_rotation: f32x4x4) -> InstanceData {
        let cell @ [ix, iy, _] = self.dims.cell_of(index);
        let wobble_x = f32x4x4::z_rotate(angle * (ix as f32).sin());
        let wobble_y = f32x4x4::z_rotate(angle * (iy as f32).cos());
        let transform = object_rotation
            * f32x4x4::translate_by(self.center + self.cell_offset(cell))
            * wobble_y
            * wobble_x
            * f32x4x4::uniform_scale(self.cube_scale);
        InstanceData {
            transform,
            normal_transform: transform.discard_translation(),
            color: instance_color(index, self.instance_count()),
        }
    }

    /// Fills `instances` for the given animation angle.
    pub fn write_instances(
        &self,
        angle: f32,
        instances: &mut [InstanceData],
    ) -> Result<(), AppError> {
        let expected = self.instance_count();
        if instances.len() != expected {
            return Err(AppError::InstanceCountMismatch {
                expected,
                actual: instances.len(),
            });
        }
        let object_rotation = rotate_about(
            self.center,
            f32x4x4::y_rotate(-angle) * f32x4x4::y_rotate(angle * 0.5),
        );
        for (index, instance) in instances.iter_mut().enumerate() {
            *instance = self.instance(index, angle, object_rotation);
        }
        Ok(())
    }
}
