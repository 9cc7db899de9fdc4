use thiserror::Error;

#[derive(Error, Debug)]
pub enum CausewayError {
    #[error("unknown severity name: {0:?} (expected trace, debug, info, warn, or error)")]
    UnknownSeverity(String),

    #[error("configuration error: {0}")]
    Config(String),
}
