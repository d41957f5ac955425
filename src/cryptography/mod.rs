//! AES-256-CBC with PKCS#7 padding over in-memory buffers.
//!
//! Key material (`iv` + `key`) is supplied by the caller and travels out of
//! band in the export format: base64 of the 16 IV bytes followed by the 32
//! key bytes. Ciphertext carries no IV and no authentication tag, so this
//! provides confidentiality only. Tampering is not detected.

pub mod encryption;
pub mod key;

pub use encryption::{decrypt_with_aes_cbc, encrypt_with_aes_cbc, fill_random};
pub use key::{export_key, generate_key, import_key, CryptoKey};
