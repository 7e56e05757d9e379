#![doc = include_str!("../README.md")]

mod buffer;
mod camera;
mod config;
mod decoder;
mod error;
mod input;
mod ply;
mod quad;
mod renderer;
pub mod shader;
mod sort;
mod splat;
mod viewer;

pub use buffer::*;
pub use camera::*;
pub use config::*;
pub use decoder::*;
pub use error::*;
pub use input::*;
pub use ply::*;
pub use quad::*;
pub use renderer::*;
pub use sort::*;
pub use splat::*;
pub use viewer::*;

pub use glam;
