use thiserror::Error;

/// Failure while bringing up the window and its OpenGL context.
///
/// Underlying errors are kept as `source` and are not repeated in the message,
/// so `{:#}` formatting prints each cause once.
#[derive(Debug, Error)]
pub enum InitError {
    #[error("failed to create window and GL display: {0}")]
    Display(String),

    #[error("GL display was created without a window")]
    MissingWindow,

    #[error("window handle unavailable")]
    Handle(#[from] raw_window_handle::HandleError),

    #[error("failed to create OpenGL {major}.{minor} context")]
    Context {
        major: u8,
        minor: u8,
        #[source]
        source: glutin::error::Error,
    },

    #[error("failed to create window surface")]
    Surface(#[source] glutin::error::Error),

    #[error("failed to make GL context current")]
    MakeCurrent(#[source] glutin::error::Error),

    #[error("window has zero size")]
    ZeroSize,
}
