mod camera;
mod checkerboard;
mod cube_grid;
mod cube_mesh;
mod cube_wave;
#[cfg(target_os = "macos")]
mod depth_texture;
mod mandelbrot;
mod scene;

pub use camera::*;
pub use checkerboard::*;
pub use cube_grid::*;
pub use cube_mesh::*;
pub use cube_wave::*;
#[cfg(target_os = "macos")]
pub use depth_texture::*;
pub use mandelbrot::*;
pub use scene::*;
