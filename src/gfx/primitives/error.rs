use thiserror::Error;

use super::topology::Topology;

/// Contract violations reported by the primitive cache.
///
/// These are programmer errors: the offending call is rejected without
/// touching the GPU, and the frame carries on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PrimitiveError {
    #[error("primitive name must not be empty")]
    EmptyName,

    #[error("primitive `{name}` has no positions")]
    EmptyGeometry { name: String },

    #[error("topology mismatch for cached primitive `{name}`: registered as {registered}, requested {requested}")]
    TopologyMismatch {
        name: String,
        registered: Topology,
        requested: Topology,
    },

    #[error("layout mismatch for cached primitive `{name}`: registered with {registered} auxiliary attributes, given {requested}")]
    LayoutMismatch {
        name: String,
        registered: u32,
        requested: u32,
    },

    #[error("primitive `{name}` has {positions} positions but only {rows} auxiliary rows")]
    AuxiliaryShortfall {
        name: String,
        positions: usize,
        rows: usize,
    },

    #[error("primitive `{name}`: auxiliary row {row} has {len} floats, expected {expected}")]
    InconsistentAuxiliaryRow {
        name: String,
        row: usize,
        len: usize,
        expected: usize,
    },

    #[error("primitive `{name}`: index {index} out of range for {vertices} vertices")]
    IndexOutOfRange {
        name: String,
        index: u32,
        vertices: usize,
    },
}
