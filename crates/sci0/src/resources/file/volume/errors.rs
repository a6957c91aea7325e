use crate::{
    resources::{CompressionMethod, ErrorKind, ResourceKey},
    source::SourceError,
    utils::compression::{huffman::HuffmanError, lzw::LzwError},
};

#[derive(Debug, thiserror::Error)]
pub enum DecompressionError {
    #[error(transparent)]
    Lzw(#[from] LzwError),
    #[error(transparent)]
    Huffman(#[from] HuffmanError),
}

/// Why a single map entry could not be turned into resource bytes.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("Data file {file_name} is unavailable")]
    FileUnavailable {
        file_name: String,
        #[source]
        source: SourceError,
    },
    #[error("Resource header at offset {offset:#x} is truncated ({available} bytes left)")]
    TruncatedHeader { offset: u32, available: usize },
    #[error("Resource payload needs {required} bytes, but only {available} are left")]
    TruncatedPayload { required: usize, available: usize },
    #[error("Resource header key {found:#06x} does not match map entry {expected}")]
    KeyMismatch { expected: ResourceKey, found: u16 },
    #[error("Resource header compressed size {size} is too small to cover its own fields")]
    InvalidCompressedSize { size: u16 },
    #[error("Unsupported compression method {method}")]
    UnsupportedCompression { method: u16 },
    #[error("{method} decompression failed")]
    DecompressionFailed {
        method: CompressionMethod,
        #[source]
        source: DecompressionError,
    },
    #[error("Decoded {actual} bytes, but the header declares {declared}")]
    SizeMismatch { declared: usize, actual: usize },
}

impl LoadError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            LoadError::FileUnavailable { .. } => ErrorKind::FileUnavailable,
            LoadError::TruncatedHeader { .. } => ErrorKind::TruncatedHeader,
            LoadError::TruncatedPayload { .. } => ErrorKind::TruncatedPayload,
            LoadError::KeyMismatch { .. } => ErrorKind::KeyMismatch,
            LoadError::InvalidCompressedSize { .. } => ErrorKind::InvalidCompressedSize,
            LoadError::UnsupportedCompression { .. } => ErrorKind::UnsupportedCompression,
            LoadError::DecompressionFailed { .. } => ErrorKind::DecompressionFailed,
            LoadError::SizeMismatch { .. } => ErrorKind::SizeMismatch,
        }
    }
}
