mod matrix;
mod shader_types;

pub use matrix::*;
pub use shader_types::*;

/**************************************************************************************************
 Rust mirrors of the Metal Shading Language vector/matrix types.

 Sizes and alignments match MSL (MSL reference, table 2.3), so these
 can be written directly into buffers read by shaders.
***************************************************************************************************/
use std::ops::{Add, Neg, Sub};

#[allow(non_camel_case_types)]
pub type uint = u32;

#[allow(non_camel_case_types)]
#[repr(C, align(8))]
#[derive(Copy, Clone, Default, PartialEq, Debug)]
pub struct float2(pub [f32; 2]);

/// MSL `float3` occupies 16 bytes; the 4th lane is padding.
#[allow(non_camel_case_types)]
#[repr(C, align(16))]
#[derive(Copy, Clone, Default, PartialEq, Debug)]
pub struct float3(pub [f32; 3]);

#[allow(non_camel_case_types)]
#[repr(C, align(16))]
#[derive(Copy, Clone, Default, PartialEq, Debug)]
pub struct float4(pub [f32; 4]);

impl float2 {
    #[inline(always)]
    pub const fn new(x: f32, y: f32) -> Self {
        Self([x, y])
    }
}

impl float3 {
    #[inline(always)]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self([x, y, z])
    }

    #[inline]
    pub fn dot(self, rhs: Self) -> f32 {
        let [x0, y0, z0] = self.0;
        let [x1, y1, z1] = rhs.0;
        x0 * x1 + y0 * y1 + z0 * z1
    }

    #[inline]
    pub fn cross(self, rhs: Self) -> Self {
        let [x0, y0, z0] = self.0;
        let [x1, y1, z1] = rhs.0;
        Self([y0 * z1 - z0 * y1, z0 * x1 - x0 * z1, x0 * y1 - y0 * x1])
    }

    #[inline]
    pub fn length(self) -> f32 {
        self.dot(self).sqrt()
    }

    #[inline]
    pub fn normalize(self) -> Self {
        let len = self.length();
        Self(self.0.map(|v| v / len))
    }

    #[inline(always)]
    pub const fn x(&self) -> f32 {
        self.0[0]
    }

    #[inline(always)]
    pub const fn y(&self) -> f32 {
        self.0[1]
    }

    #[inline(always)]
    pub const fn z(&self) -> f32 {
        self.0[2]
    }
}

impl Add for float3 {
    type Output = float3;

    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        let [x0, y0, z0] = self.0;
        let [x1, y1, z1] = rhs.0;
        Self([x0 + x1, y0 + y1, z0 + z1])
    }
}

impl Sub for float3 {
    type Output = float3;

    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        self + (-rhs)
    }
}

impl Neg for float3 {
    type Output = float3;

    #[inline]
    fn neg(self) -> Self::Output {
        Self(self.0.map(|v| -v))
    }
}

impl float4 {
    #[inline(always)]
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self([x, y, z, w])
    }

    #[inline(always)]
    pub const fn xyz(&self) -> float3 {
        float3([self.0[0], self.0[1], self.0[2]])
    }
}

#[inline]
pub(crate) fn dot4(lhs: [f32; 4], rhs: [f32; 4]) -> f32 {
    lhs[0] * rhs[0] + lhs[1] * rhs[1] + lhs[2] * rhs[2] + lhs[3] * rhs[3]
}

// Hard fail at compile time if Rust<->MSL layout drifts.
const _: [(); 8] = [(); std::mem::size_of::<float2>()];
const _: [(); 16] = [(); std::mem::size_of::<float3>()];
const _: [(); 16] = [(); std::mem::size_of::<float4>()];

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_cross() {
        let x = float3::new(1., 0., 0.);
        let y = float3::new(0., 1., 0.);
        assert_eq!(x.cross(y), float3::new(0., 0., 1.));
        assert_eq!(y.cross(x), float3::new(0., 0., -1.));
    }

    #[test]
    fn test_normalize() {
        let v = float3::new(1., 1., 0.8).normalize();
        assert!((v.length() - 1.).abs() < 1e-6);
    }

    #[test]
    fn test_add_sub() {
        let a = float3::new(0., 0., -10.);
        let b = float3::new(1., 2., 3.);
        assert_eq!(a + b, float3::new(1., 2., -7.));
        assert_eq!((a + b) - b, a);
    }
}
