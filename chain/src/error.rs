use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChainError {
    #[error("request to {endpoint} failed: {reason}")]
    Request { endpoint: String, reason: String },

    #[error("node returned HTTP {0}")]
    HttpStatus(u16),

    #[error("JSON-RPC error {code}: {message}")]
    Rpc { code: i64, message: String },

    #[error("invalid response for {method}: {reason}")]
    InvalidResponse { method: String, reason: String },

    #[error("transaction relay rejected {method}: {reason}")]
    Relay { method: String, reason: String },
}
