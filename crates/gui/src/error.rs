//! Viewer errors

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ViewerError {
    #[error("Failed to access scene file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid scene JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Field(#[from] shared::FieldError),

    #[error(transparent)]
    Geometry(#[from] shared::GeometryError),
}
