//! Error types for the launcher and game app.

use thiserror::Error;

/// Result type alias using [`AppError`].
pub type Result<T> = std::result::Result<T, AppError>;

/// Top-level error type for everything outside the simulation.
///
/// The simulation itself is infallible by design; errors can only come from
/// platform setup (window, GPU) and configuration loading.
#[derive(Debug, Error)]
pub enum AppError {
    /// The windowing event loop could not be created or exited abnormally.
    #[error("event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    /// Window creation failed.
    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),

    /// GPU surface creation failed.
    #[error("failed to create rendering surface: {0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),

    /// No suitable GPU adapter was found.
    #[error("no suitable GPU adapter: {0}")]
    RequestAdapter(#[from] wgpu::RequestAdapterError),

    /// Device request was rejected by the adapter.
    #[error("failed to acquire GPU device: {0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),

    /// A tuning override file existed but could not be read.
    #[error("failed to read tuning file '{path}': {source}")]
    TuningRead {
        /// Path to the file that failed to load.
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// A tuning override file existed but was not valid JSON.
    #[error("failed to parse tuning file '{path}': {source}")]
    TuningParse {
        /// Path to the file that failed to parse.
        path: String,
        #[source]
        source: serde_json::Error,
    },
}
