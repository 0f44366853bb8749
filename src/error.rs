use std::path::PathBuf;
use thiserror::Error;

/// Fatal segmentation errors. Sparse or noisy input is never an error; it
/// produces fallbacks or an empty report instead.
#[derive(Debug, Error, PartialEq)]
pub enum SegmentError {
    #[error("invalid page bounds {width}x{height}: dimensions must be finite and positive")]
    InvalidPage { width: f32, height: f32 },
    #[error("invalid parameter `{name}` = {value}")]
    InvalidParams { name: &'static str, value: f32 },
}

/// Host-side failures while loading pages/configs or writing artifacts.
#[derive(Debug, Error)]
pub enum IoError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("failed to serialize JSON for {path}: {source}")]
    Serialize {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("failed to save image {path}: {source}")]
    Image {
        path: PathBuf,
        source: image::ImageError,
    },
    #[error(transparent)]
    Segment(#[from] SegmentError),
}
