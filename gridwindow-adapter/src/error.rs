use gridwindow::ConfigError;

/// Lifecycle misuse reported by [`crate::GridController`].
///
/// Geometry problems (unmounted elements, zero-sized containers) are never errors; the
/// controller degrades to an empty window and recomputes on the next event instead.
#[derive(Clone, Copy, Debug, PartialEq, thiserror::Error)]
pub enum GridError {
    #[error("grid controller has been destroyed and cannot be reused")]
    Destroyed,
    #[error("grid controller is already initialized")]
    AlreadyInitialized,
    #[error("grid controller has not been initialized")]
    NotInitialized,
    #[error(transparent)]
    Config(#[from] ConfigError),
}
