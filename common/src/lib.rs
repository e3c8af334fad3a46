pub mod error;
pub mod filters;
pub mod geo;
pub mod network;

pub use error::{ConfigError, NetworkError, ViewError};
pub use filters::Filters;
pub use geo::{GeoBounds, LngLat};
pub use network::{Kiosk, Link, LinkEndpoint, LinkKey, Network, Node, NodeId, NodeStatus};
