//! CPU reference for the Mandelbrot compute kernel. The kernel in `proj-4-compute-texture` must
//! produce the same texels; this version seeds the texture before the first compute pass.
use super::BYTES_PER_PIXEL;
use std::f32::consts::TAU;

pub const MANDELBROT_TEXTURE_SIZE: usize = 128;
pub const DEFAULT_MAX_ITERATIONS: u32 = 1000;

const ZOOM_FREQUENCY: f32 = 0.01;
const ZOOM_EXPONENT: i32 = 4;
const ZOOM_LOW: f32 = 0.62;
const ZOOM_RANGE: f32 = 0.38;
const PIXEL_OFFSET: [f32; 2] = [-0.2, -0.35];
const ORIGIN: [f32; 2] = [-1.2, -0.32];
const SCALE: [f32; 2] = [2.2, 2.0];

/// Zoom factor for an animation frame, oscillating between `0.62^4` and `1`.
#[inline]
pub fn zoom_for_frame(frame: u32) -> f32 {
    (ZOOM_LOW + ZOOM_RANGE * (ZOOM_FREQUENCY * frame as f32).cos()).powi(ZOOM_EXPONENT)
}

/// Point of the complex plane sampled by texel `(x, y)` of a `width` x `height` texture.
#[inline]
pub fn sample_point(zoom: f32, [x, y]: [usize; 2], [width, height]: [usize; 2]) -> [f32; 2] {
    [
        zoom * SCALE[0] * (x as f32 / width as f32 + PIXEL_OFFSET[0]) + ORIGIN[0],
        zoom * SCALE[1] * (y as f32 / height as f32 + PIXEL_OFFSET[1]) + ORIGIN[1],
    ]
}

/// Iterations of `z = z² + c` before `|z| > 2`, capped at `max_iterations`.
#[inline]
pub fn escape_iterations([cx, cy]: [f32; 2], max_iterations: u32) -> u32 {
    let (mut x, mut y) = (0_f32, 0_f32);
    let mut iteration = 0;
    while x * x + y * y <= 4. && iteration < max_iterations {
        let xtmp = x * x - y * y + cx;
        y = 2. * x * y + cy;
        x = xtmp;
        iteration += 1;
    }
    iteration
}

/// Grey level in `[0, 1]`, banded by iteration count.
#[inline]
pub fn shade(iterations: u32) -> f32 {
    0.5 + 0.5 * (3. + iterations as f32 * 0.15).cos()
}

/// Renders one animation frame as tightly packed RGBA8 rows.
pub fn mandelbrot_rgba(frame: u32, width: usize, height: usize, max_iterations: u32) -> Vec<u8> {
    let zoom = zoom_for_frame(frame);
    let mut pixels = Vec::with_capacity(width * height * BYTES_PER_PIXEL);
    for y in 0..height {
        for x in 0..width {
            let c = sample_point(zoom, [x, y], [width, height]);
            let grey = (shade(escape_iterations(c, max_iterations)) * 255.).round() as u8;
            pixels.extend_from_slice(&[grey, grey, grey, 0xFF]);
        }
    }
    pixels
}

/// Frames in one full zoom cycle.
#[inline]
pub fn zoom_period_frames() -> f32 {
    TAU / ZOOM_FREQUENCY
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zoom_oscillates() {
        assert!((zoom_for_frame(0) - 1.).abs() < 1e-6);
        let half_period = (zoom_period_frames() / 2.).round() as u32;
        assert!((zoom_for_frame(half_period) - 0.24_f32.powi(4)).abs() < 1e-4);
        for frame in (0..1000).step_by(7) {
            let zoom = zoom_for_frame(frame);
            assert!(zoom > 0. && zoom <= 1. + 1e-6);
        }
    }

    #[test]
    fn test_escape_iterations() {
        // Inside the main cardioid and period-2 bulb.
        assert_eq!(escape_iterations([0., 0.], 100), 100);
        assert_eq!(escape_iterations([-1., 0.], 100), 100);
        // Far outside escapes on the first step.
        assert_eq!(escape_iterations([3., 3.], 100), 1);
        assert_eq!(escape_iterations([1., 0.], 100), 3);
    }

    #[test]
    fn test_sample_point_corners() {
        let [x, y] = sample_point(1., [0, 0], [128, 128]);
        assert!((x - (2.2 * -0.2 - 1.2)).abs() < 1e-6);
        assert!((y - (2.0 * -0.35 - 0.32)).abs() < 1e-6);
    }

    #[test]
    fn test_shade_range() {
        for n in 0..200 {
            let s = shade(n);
            assert!((0. ..=1.).contains(&s));
        }
    }

    #[test]
    fn test_mandelbrot_rgba() {
        let pixels = mandelbrot_rgba(0, 16, 8, 64);
        assert_eq!(pixels.len(), 16 * 8 * BYTES_PER_PIXEL);
        assert!(pixels.chunks(4).all(|p| p[0] == p[1] && p[1] == p[2] && p[3] == 0xFF));
        // Frame 0 frames part of the set, so not every texel escapes at the same time.
        let first = pixels[0];
        assert!(pixels.chunks(4).any(|p| p[0] != first));
    }
}
