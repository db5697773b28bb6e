use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("display range must satisfy min < max with finite bounds, got {min}..{max}")]
    InvalidRange { min: f32, max: f32 },
    #[error("unknown ABI channel: {0}")]
    UnknownChannel(String),
    #[error("short-wave and long-wave channels must differ, both are {0}")]
    SameChannel(String),
}
