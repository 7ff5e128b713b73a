#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("No Metal device found")]
    NoDevice,
    #[error("Failed to compile shader library {label}: {message}")]
    ShaderCompile {
        label: &'static str,
        message: String,
    },
    #[error("Shader function {name} not found: {message}")]
    FunctionNotFound { name: &'static str, message: String },
    #[error("Failed to create pipeline {label}: {message}")]
    PipelineCreation {
        label: &'static str,
        message: String,
    },
    #[error("Could not create display link")]
    DisplayLink,
    #[error("Could not declare Objective-C class {0}")]
    ObjcClass(&'static str),
    #[error("Frame ring needs between 1 and {max} slots, got {actual}")]
    InvalidFrameRing { max: usize, actual: usize },
    #[error("Expected {expected} instances, got {actual}")]
    InstanceCountMismatch { expected: usize, actual: usize },
    #[error("{0} requires macOS")]
    UnsupportedPlatform(&'static str),
}
