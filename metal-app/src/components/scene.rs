use super::{Camera, CubeGrid, CubeWave, ANGLE_PER_FRAME};
use crate::{AppError, UserEvent};
use metal_types::{CameraData, ColoredInstanceData, InstanceData};

/// Something that lays out per-instance shader data for an animation angle.
pub trait InstanceWriter {
    type Instance: Copy;

    fn instance_count(&self) -> usize;

    fn write_instances(&self, angle: f32, instances: &mut [Self::Instance])
        -> Result<(), AppError>;
}

impl InstanceWriter for CubeGrid {
    type Instance = InstanceData;

    #[inline]
    fn instance_count(&self) -> usize {
        CubeGrid::instance_count(self)
    }

    #[inline]
    fn write_instances(&self, angle: f32, instances: &mut [InstanceData]) -> Result<(), AppError> {
        CubeGrid::write_instances(self, angle, instances)
    }
}

impl InstanceWriter for CubeWave {
    type Instance = ColoredInstanceData;

    #[inline]
    fn instance_count(&self) -> usize {
        self.instance_count
    }

    #[inline]
    fn write_instances(
        &self,
        angle: f32,
        instances: &mut [ColoredInstanceData],
    ) -> Result<(), AppError> {
        CubeWave::write_instances(self, angle, instances)
    }
}

/// The animated part of a frame: the angle, the camera, and the instances they drive.
pub struct Scene<W> {
    pub writer: W,
    pub camera: Camera,
    angle: f32,
}

impl<W: InstanceWriter> Scene<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            camera: Camera::default(),
            angle: 0.,
        }
    }

    #[inline]
    pub fn angle(&self) -> f32 {
        self.angle
    }

    #[inline]
    pub fn instance_count(&self) -> usize {
        self.writer.instance_count()
    }

    /// Steps the animation one frame and fills a frame slot's instance and camera data.
    /// Returns the angle the slot was written with.
    pub fn advance(
        &mut self,
        instances: &mut [W::Instance],
        camera: &mut CameraData,
    ) -> Result<f32, AppError> {
        self.angle += ANGLE_PER_FRAME;
        self.writer.write_instances(self.angle, instances)?;
        *camera = self.camera.camera_data();
        Ok(self.angle)
    }

    #[inline]
    pub fn on_event(&mut self, event: UserEvent) -> bool {
        self.camera.on_event(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::GridDims;
    use crate::FrameRing;

    type Slot = (Vec<InstanceData>, CameraData);

    #[test]
    fn test_each_frame_fills_the_next_slot() {
        let grid = CubeGrid::new(GridDims::new(2, 3, 2));
        let mut scene = Scene::new(grid);
        let mut ring = FrameRing::<Slot>::try_from_fn(3, |_| {
            Ok((vec![InstanceData::default(); 12], CameraData::default()))
        })
        .expect("valid ring");

        for k in 1..=7 {
            let frame = ring.begin_frame();
            assert_eq!(frame.index, k % 3);
            let (instances, camera) = frame.slot;
            let angle = scene.advance(instances, camera).expect("matching count");
            assert!((angle - k as f32 * 0.01).abs() < 1e-5);

            let mut expected = vec![InstanceData::default(); 12];
            grid.write_instances(angle, &mut expected).expect("matching count");
            assert_eq!(*instances, expected);
            assert_eq!(*camera, scene.camera.camera_data());
        }
    }

    #[test]
    fn test_mismatched_slot_is_left_untouched() {
        let mut scene = Scene::new(CubeWave::default());
        let mut ring = FrameRing::<(Vec<ColoredInstanceData>, CameraData)>::new(vec![
            (vec![ColoredInstanceData::default(); 32], CameraData::default()),
            (vec![ColoredInstanceData::default(); 5], CameraData::default()),
        ])
        .expect("valid ring");

        {
            let frame = ring.begin_frame();
            assert_eq!(frame.index, 1);
            let (instances, camera) = frame.slot;
            assert!(matches!(
                scene.advance(instances, camera),
                Err(AppError::InstanceCountMismatch {
                    expected: 32,
                    actual: 5
                })
            ));
            assert!(instances.iter().all(|i| *i == ColoredInstanceData::default()));
            assert_eq!(*camera, CameraData::default());
        }

        let frame = ring.begin_frame();
        assert_eq!(frame.index, 0);
        let (instances, camera) = frame.slot;
        let angle = scene.advance(instances, camera).expect("matching count");
        assert!((angle - 0.02).abs() < 1e-6);
        assert_ne!(instances[0], ColoredInstanceData::default());
    }
}
