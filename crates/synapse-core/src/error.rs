use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Request to {path} failed: {message}")]
    Transport { path: String, message: String },

    #[error("Backend answered {status} for {path}")]
    Status { path: String, status: u16 },

    #[error("Could not decode response from {path}: {message}")]
    Decode { path: String, message: String },
}

pub type Result<T> = std::result::Result<T, Error>;
