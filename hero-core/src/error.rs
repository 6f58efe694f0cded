/// Error types for geometry construction and page mounting
use thiserror::Error;

/// Input validation failures while building primitives or merging them
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GeometryError {
    #[error("{what} must be finite and positive, got {value}")]
    InvalidDimension { what: &'static str, value: f32 },

    #[error("index {index} is out of range for {vertex_count} vertices")]
    IndexOutOfRange { index: u32, vertex_count: usize },

    #[error("triangle list length {len} is not a multiple of 3")]
    IncompleteTriangle { len: usize },

    #[error("a cone needs at least 3 segments, got {segments}")]
    TooFewSegments { segments: u32 },

    #[error("merged mesh would hold {count} vertices, more than a u32 index can address")]
    TooManyVertices { count: usize },
}

/// Failures that prevent a page component from mounting
#[derive(Debug, Error)]
pub enum HeroError {
    #[error("tower geometry: {0}")]
    Geometry(#[from] GeometryError),

    #[error("{0} list must not be empty")]
    EmptyList(&'static str),

    #[error("{0} delay must be longer than zero")]
    ZeroDelay(&'static str),
}
