//! Platform abstraction layer
//!
//! Engine-side collaborators the simulation talks to:
//! - Camera viewport -> world transform
//! - Logger initialization (env_logger natively, console on web)

pub mod camera;

pub use camera::{CameraView, OrthographicCamera};

/// Initialize the platform logger. Safe to call more than once.
#[cfg(not(target_arch = "wasm32"))]
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();
}

/// Initialize the platform logger. Safe to call more than once.
#[cfg(target_arch = "wasm32")]
pub fn init_logging() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
}
