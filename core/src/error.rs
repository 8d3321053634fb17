use thiserror::Error;

/// Configuration-time failures. The running pipeline itself is infallible:
/// frame outcomes are values, never errors, and the receiver never halts.
#[derive(Debug, Error)]
pub enum ReceiverError {
    #[error("release code must not be empty")]
    EmptyReleaseCode,

    #[error("detection window must be at least 2 samples")]
    WindowTooSmall,

    #[error("tone frequency {0} Hz is not below the Nyquist rate")]
    ToneOutOfRange(f32),

    #[error("bit period must span more than one detection window")]
    BitRateTooFast,

    #[error("detection threshold must be positive")]
    InvalidThreshold,

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, ReceiverError>;
