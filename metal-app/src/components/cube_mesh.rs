use metal_types::{float2, float3, VertexData};

const S: f32 = 0.5;

pub const CUBE_INDEX_COUNT: usize = 36;

/// Unit cube with a separate quad per face so each face gets its own normal and UVs.
pub fn textured_cube_vertices() -> [VertexData; 24] {
    let v = |p: [f32; 3], n: [f32; 3], uv: [f32; 2]| VertexData {
        position: float3(p),
        normal: float3(n),
        tex_coord: float2(uv),
    };
    [
        // Front (+Z)
        v([-S, -S, S], [0., 0., 1.], [0., 1.]),
        v([S, -S, S], [0., 0., 1.], [1., 1.]),
        v([S, S, S], [0., 0., 1.], [1., 0.]),
        v([-S, S, S], [0., 0., 1.], [0., 0.]),
        // Right (+X)
        v([S, -S, S], [1., 0., 0.], [0., 1.]),
        v([S, -S, -S], [1., 0., 0.], [1., 1.]),
        v([S, S, -S], [1., 0., 0.], [1., 0.]),
        v([S, S, S], [1., 0., 0.], [0., 0.]),
        // Back (-Z)
        v([S, -S, -S], [0., 0., -1.], [0., 1.]),
        v([-S, -S, -S], [0., 0., -1.], [1., 1.]),
        v([-S, S, -S], [0., 0., -1.], [1., 0.]),
        v([S, S, -S], [0., 0., -1.], [0., 0.]),
        // Left (-X)
        v([-S, -S, -S], [-1., 0., 0.], [0., 1.]),
        v([-S, -S, S], [-1., 0., 0.], [1., 1.]),
        v([-S, S, S], [-1., 0., 0.], [1., 0.]),
        v([-S, S, -S], [-1., 0., 0.], [0., 0.]),
        // Top (+Y)
        v([-S, S, S], [0., 1., 0.], [0., 1.]),
        v([S, S, S], [0., 1., 0.], [1., 1.]),
        v([S, S, -S], [0., 1., 0.], [1., 0.]),
        v([-S, S, -S], [0., 1., 0.], [0., 0.]),
        // Bottom (-Y)
        v([-S, -S, -S], [0., -1., 0.], [0., 1.]),
        v([S, -S, -S], [0., -1., 0.], [1., 1.]),
        v([S, -S, S], [0., -1., 0.], [1., 0.]),
        v([-S, -S, S], [0., -1., 0.], [0., 0.]),
    ]
}

/// Two counter-clockwise triangles per quad of [`textured_cube_vertices`].
pub const fn textured_cube_indices() -> [u16; CUBE_INDEX_COUNT] {
    let mut indices = [0; CUBE_INDEX_COUNT];
    let mut face = 0;
    while face < 6 {
        let base = (face * 4) as u16;
        let i = face * 6;
        indices[i] = base;
        indices[i + 1] = base + 1;
        indices[i + 2] = base + 2;
        indices[i + 3] = base + 2;
        indices[i + 4] = base + 3;
        indices[i + 5] = base;
        face += 1;
    }
    indices
}

/// Corners only, shared between faces. Used where no lighting or texturing is needed.
pub const POSITION_CUBE_VERTICES: [float3; 8] = [
    float3::new(-S, -S, S),
    float3::new(S, -S, S),
    float3::new(S, S, S),
    float3::new(-S, S, S),
    float3::new(-S, -S, -S),
    float3::new(-S, S, -S),
    float3::new(S, S, -S),
    float3::new(S, -S, -S),
];

#[rustfmt::skip]
pub const POSITION_CUBE_INDICES: [u16; CUBE_INDEX_COUNT] = [
    0, 1, 2,  2, 3, 0, // front
    1, 7, 6,  6, 2, 1, // right
    7, 4, 5,  5, 6, 7, // back
    4, 0, 3,  3, 5, 4, // left
    3, 2, 6,  6, 5, 3, // top
    4, 7, 1,  1, 0, 4, // bottom
];

#[cfg(test)]
mod tests {
    use super::*;

    fn face_normal(a: float3, b: float3, c: float3) -> float3 {
        (b - a).cross(c - a)
    }

    #[test]
    fn test_textured_cube_winds_counter_clockwise_outward() {
        let vertices = textured_cube_vertices();
        let indices = textured_cube_indices();
        assert!(indices.iter().all(|&i| (i as usize) < vertices.len()));
        for tri in indices.chunks(3) {
            let [a, b, c] = [0, 1, 2].map(|k| vertices[tri[k] as usize]);
            let n = face_normal(a.position, b.position, c.position).normalize();
            assert!((n - a.normal).length() < 1e-6, "{tri:?}");
        }
    }

    #[test]
    fn test_textured_cube_normals_are_unit_and_uvs_in_range() {
        for v in textured_cube_vertices() {
            assert!((v.normal.length() - 1.).abs() < 1e-6);
            assert!(v.tex_coord.0.iter().all(|&t| (0. ..=1.).contains(&t)));
            // Each vertex lies on the face its normal points out of.
            assert!((v.position.dot(v.normal) - S).abs() < 1e-6);
        }
    }

    #[test]
    fn test_position_cube_winds_counter_clockwise_outward() {
        assert!(POSITION_CUBE_INDICES
            .iter()
            .all(|&i| (i as usize) < POSITION_CUBE_VERTICES.len()));
        for tri in POSITION_CUBE_INDICES.chunks(3) {
            let [a, b, c] = [0, 1, 2].map(|k| POSITION_CUBE_VERTICES[tri[k] as usize]);
            let centroid = float3::new(
                (a.x() + b.x() + c.x()) / 3.,
                (a.y() + b.y() + c.y()) / 3.,
                (a.z() + b.z() + c.z()) / 3.,
            );
            assert!(face_normal(a, b, c).dot(centroid) > 0., "{tri:?}");
        }
    }
}
