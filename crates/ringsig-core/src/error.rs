//! Error types for ring signature operations

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for ring signature operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while generating or verifying a ring signature
#[derive(Debug, Error)]
pub enum Error {
    /// Ring member identity could not be decoded to bytes
    #[error("Invalid identity encoding: {0}")]
    InvalidIdentityEncoding(String),

    /// Scalar is zero or not below the curve order
    #[error("Invalid private key: {0}")]
    InvalidPrivateKey(String),

    /// Signer position does not address a ring member
    #[error("Signer index {index} out of range for ring of {ring_size}")]
    SignerIndexOutOfRange { index: usize, ring_size: usize },

    /// Supplied ring does not match the ring the signature was bound to
    #[error("Ring commitment mismatch")]
    RingMismatch,

    /// No public key could be recovered from the signature
    #[error("Public key recovery failed")]
    RecoveryFailed,

    /// Signature does not verify against the recovered key
    #[error("Invalid signature")]
    SignatureInvalid,

    /// Ring violates the composition policy (size, duplicates)
    #[error("Invalid ring: {0}")]
    InvalidRing(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Deserialization error
    #[error("Deserialization error: {0}")]
    Deserialization(String),
}

impl Error {
    /// Protocol-level classification of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidIdentityEncoding(_) => ErrorKind::InvalidIdentityEncoding,
            Error::InvalidPrivateKey(_) => ErrorKind::InvalidPrivateKey,
            Error::SignerIndexOutOfRange { .. } => ErrorKind::SignerIndexOutOfRange,
            Error::RingMismatch => ErrorKind::RingMismatch,
            Error::RecoveryFailed => ErrorKind::RecoveryFailed,
            Error::SignatureInvalid => ErrorKind::SignatureInvalid,
            Error::InvalidRing(_) => ErrorKind::InvalidRing,
            Error::Serialization(_) | Error::Deserialization(_) => ErrorKind::Encoding,
        }
    }
}

/// Plain error classification, carried inside verification results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorKind {
    InvalidIdentityEncoding,
    InvalidPrivateKey,
    SignerIndexOutOfRange,
    RingMismatch,
    RecoveryFailed,
    SignatureInvalid,
    InvalidRing,
    Encoding,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            ErrorKind::InvalidIdentityEncoding => "invalid identity encoding",
            ErrorKind::InvalidPrivateKey => "invalid private key",
            ErrorKind::SignerIndexOutOfRange => "signer index out of range",
            ErrorKind::RingMismatch => "ring commitment mismatch",
            ErrorKind::RecoveryFailed => "could not recover public key",
            ErrorKind::SignatureInvalid => "signature verification failed",
            ErrorKind::InvalidRing => "invalid ring",
            ErrorKind::Encoding => "encoding error",
        };
        f.write_str(text)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        if e.is_data() || e.is_syntax() || e.is_eof() {
            Error::Deserialization(e.to_string())
        } else {
            Error::Serialization(e.to_string())
        }
    }
}
