use flate2::Compression;

/// IV length for AES-CBC (one block).
pub const IV_LEN: usize = 16;

/// AES-256 key length.
pub const KEY_LEN: usize = 32;

pub const BLOCK_SIZE: usize = 16;

/// Raw length of an exported key: `iv || key`.
pub const EXPORTED_KEY_LEN: usize = IV_LEN + KEY_LEN;

pub fn compression_level() -> Compression {
    Compression::default()
}
