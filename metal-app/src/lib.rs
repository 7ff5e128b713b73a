#[cfg(target_os = "macos")]
#[macro_use]
pub extern crate objc;
#[cfg(target_os = "macos")]
#[macro_use]
pub extern crate cocoa;

#[cfg(target_os = "macos")]
mod application;
pub mod components;
mod config;
mod error;
mod events;
pub mod frame_ring;
mod logging;
#[cfg(target_os = "macos")]
mod metal_helpers;
#[cfg(target_os = "macos")]
mod renderer;
mod time;
#[cfg(target_os = "macos")]
pub mod typed_buffer;

#[cfg(target_os = "macos")]
pub use application::launch_application;
pub use config::*;
pub use error::*;
pub use events::*;
#[cfg(target_os = "macos")]
pub use frame_ring::DispatchGate;
pub use frame_ring::{FrameGate, FrameRing, FrameTicket, InFlightFrame, MAX_FRAMES_IN_FLIGHT};
pub use logging::*;
#[cfg(target_os = "macos")]
pub use metal;
#[cfg(target_os = "macos")]
pub use metal_helpers::*;
pub use metal_types;
#[cfg(target_os = "macos")]
pub use renderer::RendererDelgate;
pub use time::*;
