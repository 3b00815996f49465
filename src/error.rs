// src/error.rs

use crate::geom::Point;
use thiserror::Error;

/// Errors surfaced by the screen driver.
///
/// Native-call failures carry the diagnostic reported by SDL's last-error
/// mechanism; precondition failures carry a fixed message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScreenError {
    /// A native resource (surface, texture) could not be created.
    #[error("allocation failed: {0}")]
    Allocation(String),
    /// The operation needs a resource that does not exist yet.
    #[error("{0}")]
    Prereq(&'static str),
    /// A native call reported a platform-level failure.
    #[error("platform error: {0}")]
    Platform(String),
    /// Deliberately unsupported operation.
    #[error("{0} is not implemented")]
    NotImplemented(&'static str),
    /// A buffer or texture was requested with a negative dimension.
    #[error("invalid size {}x{}", .0.x, .0.y)]
    InvalidSize(Point),
}

impl ScreenError {
    pub(crate) fn allocation(err: anyhow::Error) -> Self {
        ScreenError::Allocation(format!("{err:#}"))
    }

    pub(crate) fn platform(err: anyhow::Error) -> Self {
        ScreenError::Platform(format!("{err:#}"))
    }
}

pub type Result<T, E = ScreenError> = std::result::Result<T, E>;
