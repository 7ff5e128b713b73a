//! Structs shared between the CPU and the shaders. Field order and types must match the
//! declarations in each project's `shaders.metal`.
use crate::{float2, float3, float3x3, float4, float4x4, uint};

#[repr(C)]
#[derive(Copy, Clone, Default, PartialEq, Debug)]
pub struct TriangleVertex {
    pub position: float3,
    pub color: float3,
}

#[repr(C)]
#[derive(Copy, Clone, Default, PartialEq, Debug)]
pub struct VertexData {
    pub position: float3,
    pub normal: float3,
    pub tex_coord: float2,
}

/// Per-instance data for the untextured, unlit cubes.
#[repr(C)]
#[derive(Copy, Clone, Default, PartialEq, Debug)]
pub struct ColoredInstanceData {
    pub transform: float4x4,
    pub color: float4,
}

#[repr(C)]
#[derive(Copy, Clone, Default, PartialEq, Debug)]
pub struct InstanceData {
    pub transform: float4x4,
    pub normal_transform: float3x3,
    pub color: float4,
}

#[repr(C)]
#[derive(Copy, Clone, Default, PartialEq, Debug)]
pub struct CameraData {
    pub perspective_transform: float4x4,
    pub world_transform: float4x4,
    pub world_normal_transform: float3x3,
}

#[repr(C)]
#[derive(Copy, Clone, Default, PartialEq, Eq, Debug)]
pub struct MandelbrotParams {
    pub frame: uint,
    pub max_iterations: uint,
}

#[repr(u64)]
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum VertexBufferIndex {
    Vertices = 0,
    Instances = 1,
    Camera = 2,
}

#[repr(u64)]
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum FragTextureIndex {
    Texture = 0,
}

#[repr(u64)]
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum ComputeTextureIndex {
    Output = 0,
}

#[repr(u64)]
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum ComputeBufferIndex {
    Params = 0,
}

const _: [(); 32] = [(); std::mem::size_of::<TriangleVertex>()];
const _: [(); 48] = [(); std::mem::size_of::<VertexData>()];
const _: [(); 80] = [(); std::mem::size_of::<ColoredInstanceData>()];
const _: [(); 128] = [(); std::mem::size_of::<InstanceData>()];
const _: [(); 176] = [(); std::mem::size_of::<CameraData>()];
const _: [(); 8] = [(); std::mem::size_of::<MandelbrotParams>()];

#[cfg(test)]
mod test {
    use super::*;
    use std::mem::{align_of, offset_of};

    #[test]
    fn test_msl_field_offsets() {
        assert_eq!(offset_of!(VertexData, normal), 16);
        assert_eq!(offset_of!(VertexData, tex_coord), 32);
        assert_eq!(offset_of!(InstanceData, normal_transform), 64);
        assert_eq!(offset_of!(InstanceData, color), 112);
        assert_eq!(offset_of!(CameraData, world_transform), 64);
        assert_eq!(offset_of!(CameraData, world_normal_transform), 128);
        assert_eq!(align_of::<InstanceData>(), 16);
    }
}
