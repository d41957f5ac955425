use std::{fmt, str::FromStr};

use base64::{engine::general_purpose::STANDARD, Engine as _};
use dusa_collection_utils::core::logger::LogLevel;
use dusa_collection_utils::log;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::config::{EXPORTED_KEY_LEN, IV_LEN, KEY_LEN};
use crate::errors::UtilError;

use super::encryption::fill_random;

/// IV and key for AES-256-CBC.
///
/// Fields are public so a host can assemble material from its own storage;
/// lengths are checked when the key is used. Bytes are wiped on drop.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct CryptoKey {
    pub iv: Vec<u8>,
    pub key: Vec<u8>,
}

impl CryptoKey {
    pub fn new(iv: [u8; IV_LEN], key: [u8; KEY_LEN]) -> Self {
        Self {
            iv: iv.to_vec(),
            key: key.to_vec(),
        }
    }
}

impl fmt::Debug for CryptoKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("CryptoKey")
            .field("iv", &format_args!("<{} bytes>", self.iv.len()))
            .field("key", &format_args!("<redacted {} bytes>", self.key.len()))
            .finish()
    }
}

/// Fresh random IV and key.
pub fn generate_key() -> CryptoKey {
    let mut iv = [0u8; IV_LEN];
    let mut key = [0u8; KEY_LEN];
    fill_random(&mut iv);
    fill_random(&mut key);

    let generated = CryptoKey::new(iv, key);
    iv.zeroize();
    key.zeroize();

    log!(LogLevel::Trace, "Generated new AES-256-CBC key material");
    generated
}

/// Base64 of `iv || key`.
pub fn export_key(crypto_key: &CryptoKey) -> String {
    let mut unified: Vec<u8> = Vec::with_capacity(crypto_key.iv.len() + crypto_key.key.len());
    unified.extend_from_slice(&crypto_key.iv);
    unified.extend_from_slice(&crypto_key.key);

    let encoded = STANDARD.encode(&unified);
    unified.zeroize();
    encoded
}

/// Inverse of [`export_key`]. The decoded blob must be exactly
/// [`EXPORTED_KEY_LEN`] bytes.
pub fn import_key(encoded: &str) -> Result<CryptoKey, UtilError> {
    let mut unified = STANDARD
        .decode(encoded.trim())
        .map_err(|err| UtilError::malformed("key is not valid base64", err))?;

    if unified.len() != EXPORTED_KEY_LEN {
        let len = unified.len();
        unified.zeroize();
        return Err(UtilError::malformed_msg(format!(
            "exported key must decode to {} bytes, got {}",
            EXPORTED_KEY_LEN, len
        )));
    }

    let (iv, key) = unified.split_at(IV_LEN);
    let imported = CryptoKey {
        iv: iv.to_vec(),
        key: key.to_vec(),
    };
    unified.zeroize();
    Ok(imported)
}

impl fmt::Display for CryptoKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&export_key(self))
    }
}

impl FromStr for CryptoKey {
    type Err = UtilError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        import_key(s)
    }
}

impl Serialize for CryptoKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&export_key(self))
    }
}

impl<'de> Deserialize<'de> for CryptoKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        import_key(&encoded).map_err(serde::de::Error::custom)
    }
}
