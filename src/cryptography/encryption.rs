use cbc::cipher::{block_padding::Pkcs7, BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use dusa_collection_utils::core::logger::LogLevel;
use dusa_collection_utils::log;
use rand::RngCore;

use crate::config::{BLOCK_SIZE, IV_LEN, KEY_LEN};
use crate::errors::{CryptoFailure, UtilError};

use super::key::CryptoKey;

type Aes256CbcEnc = cbc::Encryptor<aes::Aes256>;
type Aes256CbcDec = cbc::Decryptor<aes::Aes256>;

/// Checks shared by encrypt and decrypt. `data_param` names the buffer in
/// the error.
fn check_arguments(
    data: &[u8],
    data_param: &'static str,
    crypto_key: &CryptoKey,
) -> Result<(), UtilError> {
    if data.is_empty() {
        return Err(UtilError::invalid_argument(data_param));
    }
    if crypto_key.key.len() != KEY_LEN {
        return Err(UtilError::invalid_argument("key"));
    }
    if crypto_key.iv.len() != IV_LEN {
        return Err(UtilError::invalid_argument("iv"));
    }
    Ok(())
}

pub fn encrypt_with_aes_cbc(data: &[u8], crypto_key: &CryptoKey) -> Result<Vec<u8>, UtilError> {
    check_arguments(data, "plaintext", crypto_key)?;

    let cipher = Aes256CbcEnc::new_from_slices(&crypto_key.key, &crypto_key.iv)
        .map_err(|_| UtilError::invalid_argument("key"))?;
    let ciphertext = cipher.encrypt_padded_vec_mut::<Pkcs7>(data);

    log!(
        LogLevel::Trace,
        "Encrypted {} bytes into {} bytes",
        data.len(),
        ciphertext.len()
    );
    Ok(ciphertext)
}

pub fn decrypt_with_aes_cbc(data: &[u8], crypto_key: &CryptoKey) -> Result<Vec<u8>, UtilError> {
    check_arguments(data, "ciphertext", crypto_key)?;

    if data.len() % BLOCK_SIZE != 0 {
        return Err(UtilError::Crypto(CryptoFailure::Misaligned { len: data.len() }));
    }

    let cipher = Aes256CbcDec::new_from_slices(&crypto_key.key, &crypto_key.iv)
        .map_err(|_| UtilError::invalid_argument("key"))?;
    let plaintext = cipher
        .decrypt_padded_vec_mut::<Pkcs7>(data)
        .map_err(|_| UtilError::Crypto(CryptoFailure::BadPadding))?;

    log!(
        LogLevel::Trace,
        "Decrypted {} bytes into {} bytes",
        data.len(),
        plaintext.len()
    );
    Ok(plaintext)
}

/// Fill `buffer` from the thread-local CSPRNG.
pub fn fill_random(buffer: &mut [u8]) {
    let mut rng = rand::thread_rng();
    rng.fill_bytes(buffer);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cryptography::key::generate_key;
    use crate::errors::ErrorKind;

    fn nist_key() -> CryptoKey {
        // NIST SP 800-38A, F.2.5 CBC-AES256.Encrypt
        CryptoKey {
            iv: hex::decode("000102030405060708090a0b0c0d0e0f").unwrap(),
            key: hex::decode("603deb1015ca71be2b73aef0857d77811f352c073b6108d72d9810a30914dff4")
                .unwrap(),
        }
    }

    fn param_of(err: UtilError) -> &'static str {
        match err {
            UtilError::InvalidArgument { param } => param,
            other => panic!("expected invalid argument, got {:?}", other),
        }
    }

    #[test]
    fn matches_nist_vector() {
        let plaintext = hex::decode("6bc1bee22e409f96e93d7e117393172a").unwrap();
        let ciphertext = encrypt_with_aes_cbc(&plaintext, &nist_key()).unwrap();

        // one data block plus one full padding block
        assert_eq!(ciphertext.len(), 32);
        assert_eq!(
            hex::encode(&ciphertext[..16]),
            "f58c4c04d6e5f1ba779eabfb5f7bfbd6"
        );
        assert_eq!(
            decrypt_with_aes_cbc(&ciphertext, &nist_key()).unwrap(),
            plaintext
        );
    }

    #[test]
    fn round_trip_various_lengths() {
        let key = generate_key();
        for len in [1usize, 15, 16, 17, 31, 32, 1000] {
            let plaintext: Vec<u8> = (0..len).map(|i| (i % 251) as u8).collect();
            let ciphertext = encrypt_with_aes_cbc(&plaintext, &key).unwrap();
            assert_eq!(ciphertext.len(), BLOCK_SIZE * (len / BLOCK_SIZE + 1));
            assert_eq!(decrypt_with_aes_cbc(&ciphertext, &key).unwrap(), plaintext);
        }
    }

    #[test]
    fn same_key_is_deterministic() {
        let key = generate_key();
        let a = encrypt_with_aes_cbc(b"repeatable", &key).unwrap();
        let b = encrypt_with_aes_cbc(b"repeatable", &key).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn encrypt_names_invalid_argument() {
        let key = generate_key();
        assert_eq!(
            param_of(encrypt_with_aes_cbc(&[], &key).unwrap_err()),
            "plaintext"
        );

        let mut no_key = key.clone();
        no_key.key.clear();
        assert_eq!(param_of(encrypt_with_aes_cbc(b"data", &no_key).unwrap_err()), "key");

        let mut no_iv = key.clone();
        no_iv.iv.clear();
        assert_eq!(param_of(encrypt_with_aes_cbc(b"data", &no_iv).unwrap_err()), "iv");
    }

    #[test]
    fn rejects_wrong_key_sizes() {
        let mut short_key = generate_key();
        short_key.key.truncate(16);
        assert_eq!(
            param_of(encrypt_with_aes_cbc(b"data", &short_key).unwrap_err()),
            "key"
        );

        let mut long_iv = generate_key();
        long_iv.iv.push(0);
        assert_eq!(
            param_of(decrypt_with_aes_cbc(&[0u8; 16], &long_iv).unwrap_err()),
            "iv"
        );
    }

    #[test]
    fn decrypt_names_invalid_argument() {
        let key = generate_key();
        assert_eq!(
            param_of(decrypt_with_aes_cbc(&[], &key).unwrap_err()),
            "ciphertext"
        );
    }

    #[test]
    fn decrypt_rejects_misaligned_ciphertext() {
        let key = generate_key();
        let mut ciphertext = encrypt_with_aes_cbc(b"aligned data", &key).unwrap();
        ciphertext.pop();

        match decrypt_with_aes_cbc(&ciphertext, &key) {
            Err(UtilError::Crypto(CryptoFailure::Misaligned { len })) => assert_eq!(len, 15),
            other => panic!("expected misaligned error, got {:?}", other),
        }
    }

    #[test]
    fn decrypt_rejects_bad_padding() {
        let key = nist_key();
        let plaintext = hex::decode("6bc1bee22e409f96e93d7e117393172a").unwrap();
        let ciphertext = encrypt_with_aes_cbc(&plaintext, &key).unwrap();

        // Only the first block decrypts; it holds data bytes, not padding.
        let err = decrypt_with_aes_cbc(&ciphertext[..16], &key).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Cryptographic);
    }

    #[test]
    fn wrong_iv_only_garbles_first_block() {
        let key = generate_key();
        let plaintext = vec![0x42u8; 48];
        let ciphertext = encrypt_with_aes_cbc(&plaintext, &key).unwrap();

        let mut other_iv = key.clone();
        other_iv.iv[0] ^= 0x01;
        let decrypted = decrypt_with_aes_cbc(&ciphertext, &other_iv).unwrap();
        assert_ne!(decrypted[..16], plaintext[..16]);
        assert_eq!(decrypted[16..], plaintext[16..]);
    }

    #[test]
    fn fill_random_writes_buffer() {
        let mut buffer = [0u8; 64];
        fill_random(&mut buffer);
        assert!(buffer.iter().any(|&b| b != 0));
    }
}
