//! Decompressors for the SCI0 resource compression methods.

mod bits;
mod errors;
pub mod huffman;
pub mod lzw;

#[cfg(test)]
mod writer;

pub use self::errors::UnexpectedEndOfInput;
