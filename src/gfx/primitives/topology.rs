use std::fmt;

/// How a primitive's vertex or index stream is assembled into geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topology {
    Points,
    Lines,
    LineStrip,
    /// A line strip whose last vertex connects back to the first.
    LineLoop,
    Triangles,
    TriangleStrip,
}

impl Topology {
    pub const ALL: [Topology; 6] = [
        Topology::Points,
        Topology::Lines,
        Topology::LineStrip,
        Topology::LineLoop,
        Topology::Triangles,
        Topology::TriangleStrip,
    ];

    /// Strip-like topologies, which need a strip index format on wgpu.
    pub fn is_strip(self) -> bool {
        matches!(self, Topology::LineStrip | Topology::LineLoop | Topology::TriangleStrip)
    }
}

impl fmt::Display for Topology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Topology::Points => "points",
            Topology::Lines => "lines",
            Topology::LineStrip => "line strip",
            Topology::LineLoop => "line loop",
            Topology::Triangles => "triangles",
            Topology::TriangleStrip => "triangle strip",
        };
        f.write_str(name)
    }
}
