use std::path::PathBuf;

use thiserror::Error;

/// Every way a signing run can fail. All variants abort the run.
#[derive(Debug, Error)]
pub enum SignerError {
    #[error("config error: {0}")]
    Config(String),
    #[error("malformed whitelist entry #{index}: {reason}")]
    MalformedEntry { index: usize, reason: String },
    #[error("malformed whitelist: {0}")]
    MalformedWhitelist(#[source] serde_json::Error),
    #[error("signature error: {0}")]
    Signature(String),
    #[error("failed to encode signatures: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("io error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T, E = SignerError> = std::result::Result<T, E>;
