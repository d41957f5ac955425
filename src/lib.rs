//! Compression and encryption helpers for AssetQL.
//!
//! Two independent, stateless modules:
//!
//! - [`compression`]: gzip over byte buffers.
//! - [`cryptography`]: AES-256-CBC with caller-supplied key material.
//!
//! Every function allocates its own codec or cipher per call, so all of
//! them can be used from any thread without coordination.

pub mod compression;
pub mod config;
pub mod cryptography;
pub mod errors;

pub use compression::{compress_data, decompress_data};
pub use cryptography::{
    decrypt_with_aes_cbc, encrypt_with_aes_cbc, export_key, generate_key, import_key, CryptoKey,
};
pub use errors::{CryptoFailure, ErrorKind, UtilError};
