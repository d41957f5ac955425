use std::{fmt, io};

use thiserror::Error;

/// Why a decryption was rejected by the cipher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CryptoFailure {
    /// Ciphertext length is not a whole number of blocks.
    Misaligned { len: usize },
    /// The last block did not carry valid PKCS#7 padding.
    BadPadding,
}

impl fmt::Display for CryptoFailure {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CryptoFailure::Misaligned { len } => write!(
                f,
                "ciphertext length {} is not a multiple of the block size",
                len
            ),
            CryptoFailure::BadPadding => write!(f, "invalid padding"),
        }
    }
}

/// Coarse classification of a [`UtilError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidArgument,
    MalformedInput,
    Cryptographic,
    Io,
}

#[derive(Debug, Error)]
pub enum UtilError {
    /// An argument was empty or had the wrong length. `param` names it.
    #[error("invalid argument: {param}")]
    InvalidArgument { param: &'static str },

    /// Input could not be decoded (bad base64, bad gzip framing, wrong size).
    #[error("malformed input: {context}")]
    MalformedInput {
        context: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("decryption failed: {0}")]
    Crypto(CryptoFailure),

    #[error("codec error: {0}")]
    Io(#[from] io::Error),
}

impl UtilError {
    pub(crate) fn invalid_argument(param: &'static str) -> Self {
        UtilError::InvalidArgument { param }
    }

    pub(crate) fn malformed<E>(context: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        UtilError::MalformedInput {
            context: context.into(),
            source: Some(Box::new(source)),
        }
    }

    pub(crate) fn malformed_msg(context: impl Into<String>) -> Self {
        UtilError::MalformedInput {
            context: context.into(),
            source: None,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            UtilError::InvalidArgument { .. } => ErrorKind::InvalidArgument,
            UtilError::MalformedInput { .. } => ErrorKind::MalformedInput,
            UtilError::Crypto(_) => ErrorKind::Cryptographic,
            UtilError::Io(_) => ErrorKind::Io,
        }
    }
}

impl From<UtilError> for io::Error {
    fn from(err: UtilError) -> Self {
        match err {
            UtilError::Io(err) => err,
            UtilError::InvalidArgument { .. } => {
                io::Error::new(io::ErrorKind::InvalidInput, err.to_string())
            }
            UtilError::MalformedInput { .. } | UtilError::Crypto(_) => {
                io::Error::new(io::ErrorKind::InvalidData, err.to_string())
            }
        }
    }
}
