use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    #[error("A menu needs at least one sector")]
    EmptyLayout,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum OptionsError {
    #[error("Menu has no items")]
    NoItems,
    #[error("Invalid radii: inner {inner}, outer {outer} (need 0 <= inner < outer)")]
    InvalidRadii { inner: f64, outer: f64 },
    #[error(transparent)]
    Geometry(#[from] GeometryError),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LockError {
    #[error("Pointer lock is not supported here")]
    Unsupported,
    #[error("Pointer lock request rejected: {0}")]
    Rejected(String),
}
