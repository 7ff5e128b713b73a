use crate::{
    components::{GridDims, DEFAULT_MAX_ITERATIONS},
    frame_ring::MAX_FRAMES_IN_FLIGHT,
};
use clap::Parser;

/// Command line configuration shared by every project binary.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(about = "Instanced cube demos rendered with Metal")]
pub struct AppConfig {
    /// Number of frames the CPU may encode ahead of the GPU.
    #[arg(
        long,
        default_value_t = MAX_FRAMES_IN_FLIGHT as u32,
        value_parser = clap::value_parser!(u32).range(1..=MAX_FRAMES_IN_FLIGHT as i64)
    )]
    pub frames_in_flight: u32,

    /// Cubes along the X axis of the grid.
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u32).range(1..=64))]
    pub rows: u32,

    /// Cubes along the Y axis of the grid.
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u32).range(1..=64))]
    pub columns: u32,

    /// Cubes along the Z axis of the grid.
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u32).range(1..=64))]
    pub layers: u32,

    /// Escape-time iteration cap for the Mandelbrot texture.
    #[arg(
        long,
        default_value_t = DEFAULT_MAX_ITERATIONS,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub max_iterations: u32,

    /// Initial window content width, in points.
    #[arg(long, default_value_t = 512)]
    pub width: u32,

    /// Initial window content height, in points.
    #[arg(long, default_value_t = 512)]
    pub height: u32,
}

impl AppConfig {
    #[inline]
    pub fn from_env_args() -> Self {
        Self::parse()
    }

    #[inline]
    pub fn grid_dims(&self) -> GridDims {
        GridDims::new(self.rows as _, self.columns as _, self.layers as _)
    }

    #[inline]
    pub fn frames_in_flight(&self) -> usize {
        self.frames_in_flight as _
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::parse_from([env!("CARGO_PKG_NAME")])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.frames_in_flight, 3);
        assert_eq!(config.grid_dims().instance_count(), 1000);
        assert_eq!(config.max_iterations, DEFAULT_MAX_ITERATIONS);
        assert_eq!(DEFAULT_MAX_ITERATIONS, 1000);
        assert_eq!((config.width, config.height), (512, 512));
    }

    #[test]
    fn test_overrides() {
        let config = AppConfig::try_parse_from([
            "proj",
            "--frames-in-flight",
            "2",
            "--rows",
            "4",
            "--columns",
            "3",
            "--layers",
            "2",
        ])
        .expect("valid arguments");
        assert_eq!(config.frames_in_flight(), 2);
        assert_eq!(config.grid_dims(), GridDims::new(4, 3, 2));
        assert_eq!(config.max_iterations, DEFAULT_MAX_ITERATIONS);

        let config = AppConfig::try_parse_from(["proj", "--max-iterations", "64"])
            .expect("valid arguments");
        assert_eq!(config.max_iterations, 64);
    }

    #[test]
    fn test_rejects_out_of_range() {
        assert!(AppConfig::try_parse_from(["proj", "--frames-in-flight", "4"]).is_err());
        assert!(AppConfig::try_parse_from(["proj", "--frames-in-flight", "0"]).is_err());
        assert!(AppConfig::try_parse_from(["proj", "--rows", "0"]).is_err());
        assert!(AppConfig::try_parse_from(["proj", "--max-iterations", "0"]).is_err());
    }
}
