/// Convenience result type used across the try-on pipeline.
pub type TryOnResult<T> = Result<T, TryOnError>;

/// Top-level error taxonomy for capture, compositing, and export.
///
/// None of these are fatal: the controller always returns to `Idle` or stays `Streaming`
/// after reporting one.
#[derive(thiserror::Error, Debug)]
pub enum TryOnError {
    /// The user (or OS policy) refused camera access.
    #[error("permission denied: {0}")]
    PermissionDenied(String),

    /// No camera could be opened with the requested constraints.
    #[error("device unavailable: {0}")]
    DeviceUnavailable(String),

    /// A snapshot was requested before any frame was composited.
    #[error("snapshot unavailable: {0}")]
    SnapshotUnavailable(String),

    /// Invalid user-provided configuration or catalog data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors while reading or drawing a frame.
    #[error("evaluation error: {0}")]
    Evaluation(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TryOnError {
    /// Build a [`TryOnError::PermissionDenied`] value.
    pub fn permission_denied(msg: impl Into<String>) -> Self {
        Self::PermissionDenied(msg.into())
    }

    /// Build a [`TryOnError::DeviceUnavailable`] value.
    pub fn device_unavailable(msg: impl Into<String>) -> Self {
        Self::DeviceUnavailable(msg.into())
    }

    /// Build a [`TryOnError::SnapshotUnavailable`] value.
    pub fn snapshot_unavailable(msg: impl Into<String>) -> Self {
        Self::SnapshotUnavailable(msg.into())
    }

    /// Build a [`TryOnError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`TryOnError::Evaluation`] value.
    pub fn evaluation(msg: impl Into<String>) -> Self {
        Self::Evaluation(msg.into())
    }

    /// True for the two camera-acquisition failure kinds.
    pub fn is_acquisition_failure(&self) -> bool {
        matches!(self, Self::PermissionDenied(_) | Self::DeviceUnavailable(_))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
