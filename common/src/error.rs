use thiserror::Error;

/// Domain-specific errors for loading a network snapshot
#[derive(Error, Debug)]
pub enum NetworkError {
    #[error("Failed to read network snapshot {path}: {source}")]
    ReadError {
        path: String,
        source: std::io::Error,
    },

    #[error("Network snapshot parsing failed: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Duplicate node id {0} in snapshot")]
    DuplicateNode(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Domain-specific errors raised by the presentation collaborators
/// (marker/line handles and the map widget)
#[derive(Error, Debug)]
pub enum ViewError {
    #[error("Marker handle for node {0} is detached")]
    MarkerDetached(String),

    #[error("Line handle for link {0} is detached")]
    LineDetached(String),

    #[error("Camera command rejected: {0}")]
    CameraRejected(String),

    #[error("Navigation to {path} failed: {reason}")]
    NavigationFailed { path: String, reason: String },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Domain-specific errors for map view configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(String),

    #[error("Invalid padding divisor: {0} (must be greater than 0)")]
    InvalidPaddingDivisor(f64),

    #[error("Invalid default center: lat {lat}, lng {lng}")]
    InvalidCenter { lat: f64, lng: f64 },

    #[error("Invalid default zoom: {0}")]
    InvalidZoom(u8),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Convenience type alias for Results using NetworkError
pub type NetworkResult<T> = Result<T, NetworkError>;

/// Convenience type alias for Results using ViewError
pub type ViewResult<T> = Result<T, ViewError>;

/// Convenience type alias for Results using ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;
