//! Gzip (RFC 1952) over in-memory buffers.

use std::io::{Read, Write};

use dusa_collection_utils::core::logger::LogLevel;
use dusa_collection_utils::log;
use flate2::{bufread::GzDecoder, write::GzEncoder};

use crate::config::compression_level;
use crate::errors::UtilError;

/// Gzip-compress `data` with the codec's default level.
pub fn compress_data(data: &[u8]) -> Result<Vec<u8>, UtilError> {
    let mut encoder = GzEncoder::new(Vec::new(), compression_level());
    encoder.write_all(data)?;
    let compressed = encoder.finish()?;

    log!(
        LogLevel::Trace,
        "Compressed {} bytes into {} bytes",
        data.len(),
        compressed.len()
    );
    Ok(compressed)
}

/// Inflate a gzip stream produced by [`compress_data`] or any gzip encoder.
pub fn decompress_data(data: &[u8]) -> Result<Vec<u8>, UtilError> {
    if data.is_empty() {
        return Err(UtilError::malformed_msg("empty gzip stream"));
    }

    let mut decoder = GzDecoder::new(data);
    let mut decompressed_data = Vec::new();
    decoder
        .read_to_end(&mut decompressed_data)
        .map_err(|err| UtilError::malformed("invalid gzip stream", err))?;

    log!(
        LogLevel::Trace,
        "Decompressed {} bytes into {} bytes",
        data.len(),
        decompressed_data.len()
    );
    Ok(decompressed_data)
}
