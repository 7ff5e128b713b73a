use super::{instance_color, rotate_about};
use crate::AppError;
use metal_types::{f32x4x4, float3, ColoredInstanceData};
use std::f32::consts::PI;

/// A row of small cubes riding a sine wave.
#[derive(Copy, Clone, Debug)]
pub struct CubeWave {
    pub instance_count: usize,
    pub cube_scale: f32,
    pub center: float3,
}

impl Default for CubeWave {
    fn default() -> Self {
        Self {
            instance_count: Self::DEFAULT_INSTANCE_COUNT,
            cube_scale: 0.1,
            center: float3::new(0., 0., -5.),
        }
    }
}

impl CubeWave {
    pub const DEFAULT_INSTANCE_COUNT: usize = 32;

    /// Offset from the center: X spreads instances across [-1, 1], Y follows one sine period.
    pub fn offset(&self, index: usize, angle: f32) -> float3 {
        let count = self.instance_count as f32;
        let t = index as f32 / count;
        float3::new(
            (t * 2. - 1.) + 1. / count,
            ((t + angle) * 2. * PI).sin(),
            0.,
        )
    }

    pub fn write_instances(
        &self,
        angle: f32,
        instances: &mut [ColoredInstanceData],
    ) -> Result<(), AppError> {
        if instances.len() != self.instance_count {
            return Err(AppError::InstanceCountMismatch {
                expected: self.instance_count,
                actual: instances.len(),
            });
        }
        let object_rotation = rotate_about(self.center, f32x4x4::y_rotate(-angle));
        let spin = f32x4x4::z_rotate(angle);
        let local = spin * spin * f32x4x4::uniform_scale(self.cube_scale);
        for (index, instance) in instances.iter_mut().enumerate() {
            let translate = f32x4x4::translate_by(self.center + self.offset(index, angle));
            *instance = ColoredInstanceData {
                transform: object_rotation * translate * local,
                color: instance_color(index, self.instance_count),
            };
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use metal_types::float4;

    #[test]
    fn test_offsets_span_unit_range() {
        let wave = CubeWave::default();
        let first = wave.offset(0, 0.);
        let last = wave.offset(31, 0.);
        assert!((first.x() - (-1. + 1. / 32.)).abs() < 1e-6);
        assert!((last.x() - (1. - 1. / 32.)).abs() < 1e-6);
        assert!(first.y().abs() < 1e-6);
        // A quarter of the way in, the wave peaks.
        assert!((wave.offset(8, 0.).y() - 1.).abs() < 1e-6);
    }

    #[test]
    fn test_wave_travels_with_angle() {
        let wave = CubeWave::default();
        assert!((wave.offset(0, 0.25).y() - 1.).abs() < 1e-5);
    }

    #[test]
    fn test_write_instances() {
        let wave = CubeWave::default();
        let mut instances = vec![ColoredInstanceData::default(); wave.instance_count];
        wave.write_instances(0., &mut instances).expect("matching count");
        let origin = instances[8].transform * float4::new(0., 0., 0., 1.);
        let expected = wave.center + wave.offset(8, 0.);
        assert!((origin.xyz() - expected).length() < 1e-5);
        assert_eq!(instances[0].color, float4::new(0., 1., 0., 1.));

        let mut too_few = vec![ColoredInstanceData::default(); 3];
        assert!(wave.write_instances(0., &mut too_few).is_err());
    }

    #[test]
    fn test_transforms_at_nonzero_angle() {
        let wave = CubeWave::default();
        let angle = 0.7;
        let mut instances = vec![ColoredInstanceData::default(); wave.instance_count];
        wave.write_instances(angle, &mut instances).expect("matching count");

        let spin = f32x4x4::translate(0., 0., -5.)
            * f32x4x4::y_rotate(-angle)
            * f32x4x4::translate(0., 0., 5.);
        for index in [0, 3, 8, 17, 31] {
            let t = index as f32 / 32.;
            let expected = spin
                * f32x4x4::translate(
                    t * 2. - 1. + 1. / 32.,
                    ((t + angle) * 2. * PI).sin(),
                    -5.,
                )
                * f32x4x4::z_rotate(angle)
                * f32x4x4::z_rotate(angle)
                * f32x4x4::scale(0.1, 0.1, 0.1, 1.);
            let actual = instances[index].transform;
            for (a, e) in actual.columns.iter().flatten().zip(expected.columns.iter().flatten()) {
                assert!((a - e).abs() < 1e-5, "{actual:?} != {expected:?}");
            }
        }
    }
}
