#[cfg(target_os = "macos")]
mod renderer;

#[cfg(target_os = "macos")]
pub use renderer::*;

/// Vertex and fragment stages for the lit, textured cubes. Other libraries may append kernels to
/// this source as long as they keep these entry points.
pub const SHADER_SOURCE: &str = include_str!("shaders.metal");
pub const VERTEX_FUNCTION: &str = "vertexMain";
pub const FRAGMENT_FUNCTION: &str = "fragmentMain";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shader_source_declares_entry_points() {
        assert!(SHADER_SOURCE.contains(&format!("vertex {VERTEX_FUNCTION}(")));
        assert!(SHADER_SOURCE.contains(&format!("fragment {FRAGMENT_FUNCTION}(")));
        assert!(SHADER_SOURCE.contains("[[ buffer( 2 ) ]]"));
        assert!(SHADER_SOURCE.contains("[[ texture( 0 ) ]]"));
    }
}
