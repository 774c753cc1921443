// Veracity Error Types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum VeracityError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Frame decode error: {0}")]
    FrameDecode(String),

    #[error("Invalid frame dimensions: {width}x{height} with {len} bytes")]
    InvalidFrame { width: u32, height: u32, len: usize },

    #[error("Region out of bounds: ({x},{y}) {width}x{height} in {frame_width}x{frame_height} frame")]
    RegionOutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
        frame_width: u32,
        frame_height: u32,
    },

    #[error("Face detector error: {0}")]
    Detector(String),

    #[error("Oracle error: {0}")]
    Oracle(String),

    #[error("{0}")]
    Other(String),
}

impl From<anyhow::Error> for VeracityError {
    fn from(err: anyhow::Error) -> Self {
        VeracityError::Other(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, VeracityError>;
