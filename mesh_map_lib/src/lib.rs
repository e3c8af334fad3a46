pub mod args;
pub use args::MapArgs;
pub mod config;
pub mod controller;
pub mod fingerprint;
pub mod registry;
pub mod render;
pub mod route;
pub mod selection;
pub mod shortcuts;
pub mod viewport;
pub mod visibility;

pub use config::MapViewConfig;
pub use controller::{SelectionController, Transition, ViewProps};
pub use registry::{BatchOutcome, HandleRegistry, VisibilityHandle};
pub use route::{MemoryHistory, Navigation, RouteMatch, Router};
pub use selection::Selection;
pub use shortcuts::{InputSurface, Key, KeyEvent, ShortcutSubscription};
pub use viewport::{CameraCommand, InitialView, MapWidget};
pub use visibility::Visibility;

// Exported unconditionally so integration tests and the driver binary can
// use the recording handles without a feature flag.
pub mod test_helpers {
    pub mod handles;
    pub mod util;
}

/// Initialize a tracing subscriber for tests. Safe to call multiple times.
pub fn init_test_tracing() {
    use std::sync::Once;
    static START: Once = Once::new();
    START.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .try_init();
    });
}
