use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("invalid interval: {0} days (must be >= 1)")]
    InvalidInterval(u32),

    #[error("label anchor out of range for {interval}-day interval")]
    AnchorOutOfRange { interval: u32 },

    #[error("timestamp out of range for label index {index}")]
    TimestampOutOfRange { index: f64 },
}
