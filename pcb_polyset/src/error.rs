//! Error types.
//!
//! Each layer of the crate has its own error enum, [Error] ties them together for callers that
//! drive the whole pipeline (board -> shapes -> per net polygons -> diff).

/// Failures of the polygon engine or of coordinate conversion.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GeometryError {
    #[error("coordinate is NaN or infinite")]
    NonFiniteCoordinate,
    #[error("coordinate {value_mm} mm is outside of the supported range")]
    CoordinateOutOfRange { value_mm: f64 },
    #[error("ring has {point_count} distinct points, at least 3 are required")]
    DegenerateRing { point_count: usize },
    #[error("polygon index {index} out of range for set with {count} polygons")]
    InvalidPolygonIndex { index: usize, count: usize },
    #[error("edge intersections did not settle after {passes} passes")]
    UnresolvedIntersections { passes: usize },
    #[error("result boundary does not close at ({x}, {y})")]
    OpenBoundary { x: i64, y: i64 },
    #[error("no outline edge found left of hole vertex ({x}, {y})")]
    FractureFailed { x: i64, y: i64 },
}

/// Failures resolving board references (layers and nets).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("unknown layer name '{name}'")]
    UnknownLayer { name: String },
    #[error("layer id {id} is out of range")]
    InvalidLayerId { id: u8 },
    #[error("no net registered for net code {code}")]
    MissingNetMapping { code: u32 },
}

/// Failures converting a board item to a polygon set.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ExtractError {
    #[error("board item kind '{kind}' has no shape conversion")]
    UnsupportedItemKind { kind: &'static str },
    #[error(transparent)]
    Geometry(#[from] GeometryError),
}

/// Crate level error.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Geometry(#[from] GeometryError),
    #[error(transparent)]
    Board(#[from] BoardError),
    #[error(transparent)]
    Extract(#[from] ExtractError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
