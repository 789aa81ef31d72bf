//! Error types for the playback session

/// Result type alias for playback session operations
pub type Result<T> = std::result::Result<T, SessionError>;

/// Errors that can occur while coordinating a playback session
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// The audio route rejected the category configuration
    #[error("Audio route configuration failed: {0}")]
    RouteConfiguration(String),

    /// The audio route rejected an activation change
    #[error("Audio route activation failed: {0}")]
    RouteActivation(String),

    /// Artwork retrieval failed
    ///
    /// The session logs these and publishes the now-playing snapshot
    /// without artwork; the cause only matters for diagnostics.
    #[error("Artwork fetch failed: {0}")]
    Artwork(#[from] anyhow::Error),
}

impl SessionError {
    /// Create a route configuration error
    pub fn route_configuration(msg: impl Into<String>) -> Self {
        Self::RouteConfiguration(msg.into())
    }

    /// Create a route activation error
    pub fn route_activation(msg: impl Into<String>) -> Self {
        Self::RouteActivation(msg.into())
    }

    /// Wrap any error as an artwork fetch failure
    pub fn artwork<E>(err: E) -> Self
    where
        E: Into<anyhow::Error>,
    {
        Self::Artwork(err.into())
    }
}
