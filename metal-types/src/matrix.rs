use crate::{dot4, float3, float4};
use std::{
    fmt::Debug,
    ops::{Mul, Sub},
};

/// Column-major 4x4 matrix, laid out like MSL `float4x4`.
#[allow(non_camel_case_types)]
#[repr(C, align(16))]
#[derive(Copy, Clone, PartialEq)]
pub struct float4x4 {
    pub columns: [[f32; 4]; 4],
}

/// Column-major 3x3 matrix, laid out like MSL `float3x3` (each column padded to 16 bytes).
#[allow(non_camel_case_types)]
#[repr(C, align(16))]
#[derive(Copy, Clone, Default, PartialEq, Debug)]
pub struct float3x3 {
    pub columns: [float3; 3],
}

#[allow(non_camel_case_types)]
pub type f32x4x4 = float4x4;

impl Default for f32x4x4 {
    #[inline]
    fn default() -> Self {
        Self::identity()
    }
}

impl f32x4x4 {
    /// Builds a matrix from rows (reads like the math on paper).
    #[inline]
    pub const fn new(row1: [f32; 4], row2: [f32; 4], row3: [f32; 4], row4: [f32; 4]) -> Self {
        f32x4x4 {
            columns: [
                [row1[0], row2[0], row3[0], row4[0]],
                [row1[1], row2[1], row3[1], row4[1]],
                [row1[2], row2[2], row3[2], row4[2]],
                [row1[3], row2[3], row3[3], row4[3]],
            ],
        }
    }

    #[inline]
    pub const fn transpose(&self) -> Self {
        let c = self.columns;
        f32x4x4 {
            columns: [
                [c[0][0], c[1][0], c[2][0], c[3][0]],
                [c[0][1], c[1][1], c[2][1], c[3][1]],
                [c[0][2], c[1][2], c[2][2], c[3][2]],
                [c[0][3], c[1][3], c[2][3], c[3][3]],
            ],
        }
    }

    #[inline]
    pub const fn translate(x: f32, y: f32, z: f32) -> Self {
        Self::new(
            [1., 0., 0., x],
            [0., 1., 0., y],
            [0., 0., 1., z],
            [0., 0., 0., 1.],
        )
    }

    #[inline]
    pub const fn translate_by(v: float3) -> Self {
        Self::translate(v.0[0], v.0[1], v.0[2])
    }

    #[inline]
    pub const fn scale(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self::new(
            [x, 0., 0., 0.],
            [0., y, 0., 0.],
            [0., 0., z, 0.],
            [0., 0., 0., w],
        )
    }

    #[inline]
    pub const fn uniform_scale(s: f32) -> Self {
        Self::scale(s, s, s, 1.)
    }

    #[inline]
    pub const fn identity() -> Self {
        Self::scale(1., 1., 1., 1.)
    }

    #[inline]
    pub fn x_rotate(xrot: f32) -> Self {
        let (s, c) = xrot.sin_cos();
        Self::new(
            [1., 0., 0., 0.],
            [0., c, s, 0.],
            [0., -s, c, 0.],
            [0., 0., 0., 1.],
        )
    }

    #[inline]
    pub fn y_rotate(yrot: f32) -> Self {
        let (s, c) = yrot.sin_cos();
        Self::new(
            [c, 0., s, 0.],
            [0., 1., 0., 0.],
            [-s, 0., c, 0.],
            [0., 0., 0., 1.],
        )
    }

    #[inline]
    pub fn z_rotate(zrot: f32) -> Self {
        let (s, c) = zrot.sin_cos();
        Self::new(
            [c, s, 0., 0.],
            [-s, c, 0., 0.],
            [0., 0., 1., 0.],
            [0., 0., 0., 1.],
        )
    }

    /// Right-handed perspective projection looking down -Z, mapping depth `[near, far]` to
    /// Metal's NDC depth range `[0, 1]` (**NOT [-1, 1]** like OpenGL).
    #[inline]
    pub fn perspective(fov_y_radians: f32, aspect_ratio: f32, near: f32, far: f32) -> Self {
        let ys = 1. / (fov_y_radians * 0.5).tan();
        let xs = ys / aspect_ratio;
        let zs = far / (near - far);
        Self::new(
            [xs, 0., 0., 0.],
            [0., ys, 0., 0.],
            [0., 0., zs, near * zs],
            [0., 0., -1., 0.],
        )
    }

    /// Upper-left 3x3 (rotation and scale), used to transform normals.
    #[inline]
    pub const fn discard_translation(&self) -> float3x3 {
        let c = self.columns;
        float3x3 {
            columns: [
                float3([c[0][0], c[0][1], c[0][2]]),
                float3([c[1][0], c[1][1], c[1][2]]),
                float3([c[2][0], c[2][1], c[2][2]]),
            ],
        }
    }

    #[inline]
    pub const fn row<const N: usize>(&self) -> [f32; 4] {
        let c = self.columns;
        [c[0][N], c[1][N], c[2][N], c[3][N]]
    }
}

impl float3x3 {
    #[inline]
    pub fn mul_vector(&self, v: float3) -> float3 {
        let c = self.columns;
        let [x, y, z] = v.0;
        float3([
            c[0].0[0] * x + c[1].0[0] * y + c[2].0[0] * z,
            c[0].0[1] * x + c[1].0[1] * y + c[2].0[1] * z,
            c[0].0[2] * x + c[1].0[2] * y + c[2].0[2] * z,
        ])
    }
}

impl Mul<float4> for f32x4x4 {
    type Output = float4;

    #[inline]
    fn mul(self, rhs: float4) -> Self::Output {
        float4(self.transpose().columns.map(|r| dot4(r, rhs.0)))
    }
}

impl Mul<f32x4x4> for f32x4x4 {
    type Output = f32x4x4;

    #[inline]
    fn mul(self, rhs: f32x4x4) -> Self::Output {
        let rows = self.transpose().columns;
        Self {
            columns: rhs.columns.map(|col| {
                [
                    dot4(rows[0], col),
                    dot4(rows[1], col),
                    dot4(rows[2], col),
                    dot4(rows[3], col),
                ]
            }),
        }
    }
}

impl Sub<f32x4x4> for f32x4x4 {
    type Output = f32x4x4;

    #[inline]
    fn sub(self, rhs: f32x4x4) -> Self::Output {
        let mut columns = self.columns;
        for (l, r) in columns.iter_mut().zip(rhs.columns) {
            for (l, r) in l.iter_mut().zip(r) {
                *l -= r;
            }
        }
        Self { columns }
    }
}

impl Debug for f32x4x4 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let str_row = |row: [f32; 4]| {
            let s = row
                .map(|e| format!("{e:>+10.5}").replace('+', " "))
                .join(",");
            format!("[{s}]")
        };
        f.debug_tuple("f32x4x4")
            .field(&str_row(self.row::<0>()))
            .field(&str_row(self.row::<1>()))
            .field(&str_row(self.row::<2>()))
            .field(&str_row(self.row::<3>()))
            .finish()
    }
}

const _: [(); 64] = [(); std::mem::size_of::<float4x4>()];
const _: [(); 48] = [(); std::mem::size_of::<float3x3>()];

#[cfg(test)]
mod test {
    use super::*;
    use std::f32::consts::PI;

    const TOLERANCE: f32 = 1e-5;

    fn assert_close(actual: f32x4x4, expected: f32x4x4) {
        let diff = actual - expected;
        let pass = diff.columns.iter().flatten().all(|v| v.abs() < TOLERANCE);
        if !pass {
            dbg!(expected, actual);
        }
        assert!(pass);
    }

    fn assert_close_f4(actual: float4, expected: float4) {
        let pass = actual
            .0
            .iter()
            .zip(expected.0)
            .all(|(a, e)| (a - e).abs() < TOLERANCE);
        if !pass {
            dbg!(expected, actual);
        }
        assert!(pass);
    }

    #[test]
    fn test_translate() {
        let t = f32x4x4::translate(40., 50., 60.);
        let p = float4::new(1., 2., 3., 1.);
        assert_eq!(t * p, float4::new(41., 52., 63., 1.));
        assert_eq!(t.columns[3], [40., 50., 60., 1.]);
    }

    #[test]
    fn test_row() {
        let m = f32x4x4::new(
            [5., 6., 7., 8.],
            [9., 10., 11., 12.],
            [13., 14., 15., 16.],
            [17., 18., 19., 20.],
        );

        assert_eq!(m.row::<0>(), [5., 6., 7., 8.]);
        assert_eq!(m.row::<3>(), [17., 18., 19., 20.]);
        assert_eq!(m.columns[0], [5., 9., 13., 17.]);
    }

    #[test]
    fn test_mul_with_float4() {
        let m = f32x4x4::new(
            [5., 6., 7., 8.],
            [9., 10., 11., 12.],
            [13., 14., 15., 16.],
            [17., 18., 19., 20.],
        );

        let result = m * float4::new(1., 2., 3., 4.);
        assert_eq!(
            result,
            float4::new(
                5. * 1. + 6. * 2. + 7. * 3. + 8. * 4.,
                9. * 1. + 10. * 2. + 11. * 3. + 12. * 4.,
                13. * 1. + 14. * 2. + 15. * 3. + 16. * 4.,
                17. * 1. + 18. * 2. + 19. * 3. + 20. * 4.,
            )
        )
    }

    #[test]
    fn test_mul_with_f32x4x4() {
        let left = f32x4x4::new(
            [1., 2., 3., 4.],
            [5., 6., 7., 8.],
            [9., 10., 11., 12.],
            [13., 14., 15., 16.],
        );
        let right = f32x4x4::new(
            [17., 18., 19., 20.],
            [21., 22., 23., 24.],
            [25., 26., 27., 28.],
            [29., 30., 31., 32.],
        );

        let result = left * right;
        assert_eq!(
            result.row::<0>(),
            [
                1. * 17. + 2. * 21. + 3. * 25. + 4. * 29.,
                1. * 18. + 2. * 22. + 3. * 26. + 4. * 30.,
                1. * 19. + 2. * 23. + 3. * 27. + 4. * 31.,
                1. * 20. + 2. * 24. + 3. * 28. + 4. * 32.,
            ]
        );
        assert_eq!(
            result.row::<3>()[0],
            13. * 17. + 14. * 21. + 15. * 25. + 16. * 29.
        );
    }

    #[test]
    fn test_multiplication_applies_right_to_left() {
        // Scale first, then translate.
        let m = f32x4x4::translate(1., 0., 0.) * f32x4x4::uniform_scale(2.);
        assert_eq!(m * float4::new(1., 1., 1., 1.), float4::new(3., 2., 2., 1.));
    }

    #[test]
    fn test_rotations() {
        let p = float4::new(1., 0., 0., 1.);
        // Rows follow the `simd_matrix_from_rows` convention: +angle turns +X toward -Y.
        assert_close_f4(f32x4x4::z_rotate(PI / 2.) * p, float4::new(0., -1., 0., 1.));
        assert_close_f4(f32x4x4::y_rotate(PI / 2.) * p, float4::new(0., 0., -1., 1.));
        assert_close_f4(
            f32x4x4::x_rotate(PI / 2.) * float4::new(0., 1., 0., 1.),
            float4::new(0., 0., -1., 1.),
        );
        assert_close(
            f32x4x4::y_rotate(0.3) * f32x4x4::y_rotate(-0.3),
            f32x4x4::identity(),
        );
    }

    #[test]
    fn test_perspective_maps_depth_to_unit_range() {
        let m = f32x4x4::perspective(45_f32.to_radians(), 1., 0.03, 500.);
        let project = |z: f32| {
            let clip = m * float4::new(0., 0., z, 1.);
            clip.0[2] / clip.0[3]
        };
        assert!((project(-0.03) - 0.).abs() < TOLERANCE);
        assert!((project(-500.) - 1.).abs() < 1e-4);
        let mid = project(-10.);
        assert!(mid > 0. && mid < 1.);
    }

    #[test]
    fn test_perspective_aspect_ratio_scales_x() {
        let square = f32x4x4::perspective(1., 1., 0.1, 10.);
        let wide = f32x4x4::perspective(1., 2., 0.1, 10.);
        assert!((square.columns[0][0] / 2. - wide.columns[0][0]).abs() < TOLERANCE);
        assert_eq!(square.columns[1][1], wide.columns[1][1]);
    }

    #[test]
    fn test_discard_translation() {
        let r = f32x4x4::z_rotate(1.) * f32x4x4::y_rotate(2.);
        let m = f32x4x4::translate(40., 50., 60.) * r;
        assert_eq!(m.discard_translation(), r.discard_translation());
        let n = float3::new(0., 0., 1.);
        let rotated = m.discard_translation().mul_vector(n);
        let expected = (r * float4::new(0., 0., 1., 0.)).xyz();
        assert!((rotated - expected).length() < TOLERANCE);
    }
}
