use thiserror::Error;

#[derive(Error, Debug)]
pub enum SurfaceError {
    #[error("invalid surface size {width}x{height}")]
    InvalidSize { width: u32, height: u32 },

    #[error("no drawing surface attached")]
    Unavailable,

    #[error("PNG encoding failed: {0}")]
    Encode(String),

    #[error("font could not be loaded: {0}")]
    Font(String),

    #[error("malformed data URL: {0}")]
    DataUrl(String),
}
