use bytes::Bytes;

use crate::{
    resources::CompressionMethod,
    utils::compression::{huffman::huffman_decode, lzw::decompress_lzw},
};

use super::{LoadError, ResourceHeader};

/// Turns a resource payload into its decoded bytes, checking the result
/// against the size declared in the header.
pub(super) fn decode_contents(header: &ResourceHeader, payload: Bytes) -> Result<Bytes, LoadError> {
    let method = CompressionMethod::try_from(header.method()).map_err(|_| {
        LoadError::UnsupportedCompression {
            method: header.method(),
        }
    })?;
    let declared = usize::from(header.decompressed_size());
    let decoded = match method {
        CompressionMethod::Uncompressed => payload,
        CompressionMethod::Lzw => decompress_lzw(&payload, declared)
            .map(Bytes::from)
            .map_err(|e| LoadError::DecompressionFailed {
                method,
                source: e.into(),
            })?,
        CompressionMethod::Huffman => huffman_decode(&payload, declared)
            .map(Bytes::from)
            .map_err(|e| LoadError::DecompressionFailed {
                method,
                source: e.into(),
            })?,
    };
    if decoded.len() != declared {
        return Err(LoadError::SizeMismatch {
            declared,
            actual: decoded.len(),
        });
    }
    Ok(decoded)
}
