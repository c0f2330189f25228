pub mod camera;
pub mod clock;
pub mod constants;
pub mod dots;
pub mod engine;
pub mod error;
pub mod field;
#[cfg(feature = "gpu")]
pub mod gpu;
pub mod lattice;
pub mod mesh;
pub mod pointer;
pub mod profile;
pub mod source;
pub mod tier;
pub mod writer;

pub static GRID_WGSL: &str = include_str!("../shaders/grid.wgsl");

pub use camera::*;
pub use clock::*;
pub use constants::*;
pub use dots::*;
pub use engine::*;
pub use error::*;
pub use field::*;
pub use lattice::*;
pub use mesh::*;
pub use pointer::*;
pub use profile::*;
pub use source::*;
pub use tier::*;
pub use writer::*;
