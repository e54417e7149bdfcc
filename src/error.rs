use thiserror::Error;

/// Contract violations raised by the tracing core.
///
/// Every variant signals a bug in the caller (a malformed scene or an invalid
/// geometric operation), never a transient condition. Nothing inside the
/// crate catches these; they are propagated with `?` up to whoever built the
/// scene.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TraceError {
    /// A point was given where a vector is required, or the other way around.
    #[error("geometric type violation: {0}")]
    GeometricTypeViolation(&'static str),

    /// Matrix shapes don't fit the requested operation.
    #[error("dimension mismatch: {0}")]
    DimensionMismatch(String),

    /// An inverse was requested for a matrix with a zero determinant.
    #[error("matrix is not invertible (determinant is zero)")]
    SingularMatrix,

    /// A material scalar was negative.
    #[error("invalid material: {0} must be non-negative, got {1}")]
    InvalidMaterial(&'static str, f64),

    /// A tuple or matrix was divided by a (near-)zero scalar.
    #[error("division by zero")]
    DivisionByZero,

    /// Shading or a shadow test was requested on a world without a light.
    #[error("world has no light source")]
    MissingLight,
}

pub type TraceResult<T> = Result<T, TraceError>;

/// Failures while loading a scene description.
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("could not read scene file: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed scene description: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid scene: {0}")]
    Trace(#[from] TraceError),

    /// The shape kind and the name of the shape that used it.
    #[error("unknown shape type '{0}' for shape '{1}'")]
    UnknownShape(String, String),
}
