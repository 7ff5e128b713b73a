pub const BYTES_PER_PIXEL: usize = 4; // RGBA8
pub const CHECKERBOARD_SIZE: usize = 128;

const LIGHT: u8 = 0xFF;
const DARK: u8 = 0x0A;
/// Squares are 64 texels wide.
const SQUARE_BIT: usize = 0b100_0000;

/// Two-tone checkerboard as tightly packed RGBA8 rows.
pub fn checkerboard_rgba(width: usize, height: usize) -> Vec<u8> {
    let mut pixels = Vec::with_capacity(width * height * BYTES_PER_PIXEL);
    for y in 0..height {
        for x in 0..width {
            let c = if (x ^ y) & SQUARE_BIT != 0 { LIGHT } else { DARK };
            pixels.extend_from_slice(&[c, c, c, 0xFF]);
        }
    }
    pixels
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texel(pixels: &[u8], width: usize, x: usize, y: usize) -> &[u8] {
        let i = (y * width + x) * BYTES_PER_PIXEL;
        &pixels[i..i + BYTES_PER_PIXEL]
    }

    #[test]
    fn test_checkerboard() {
        let size = CHECKERBOARD_SIZE;
        let pixels = checkerboard_rgba(size, size);
        assert_eq!(pixels.len(), size * size * 4);
        assert_eq!(texel(&pixels, size, 0, 0), [DARK, DARK, DARK, 0xFF]);
        assert_eq!(texel(&pixels, size, 63, 63), [DARK, DARK, DARK, 0xFF]);
        assert_eq!(texel(&pixels, size, 64, 0), [LIGHT, LIGHT, LIGHT, 0xFF]);
        assert_eq!(texel(&pixels, size, 0, 64), [LIGHT, LIGHT, LIGHT, 0xFF]);
        assert_eq!(texel(&pixels, size, 64, 64), [DARK, DARK, DARK, 0xFF]);
        assert_eq!(texel(&pixels, size, 127, 0), [LIGHT, LIGHT, LIGHT, 0xFF]);
    }
}
