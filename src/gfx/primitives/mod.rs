//! Cached primitive construction: upload geometry once under a caller-chosen
//! name, then redraw it by name every frame.

pub mod device;
pub mod error;
pub mod primitive_cache;
pub mod topology;

#[cfg(test)]
pub(crate) mod testing;

pub use device::{DrawCall, DrawTarget, PrimitiveDevice, VertexLayout};
pub use error::PrimitiveError;
pub use primitive_cache::{PrimitiveCache, PrimitiveData, PrimitiveRecord};
pub use topology::Topology;
