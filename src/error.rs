use thiserror::Error;

pub type DecoResult<T> = Result<T, DecoError>;

#[derive(Debug, Error)]
pub enum DecoError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("invalid event: {0}")]
    InvalidEvent(String),

    #[error("series index out of range: index={index}, series count={len}")]
    SeriesIndexOutOfRange { index: usize, len: usize },

    #[error("invalid data: {0}")]
    InvalidData(String),
}
