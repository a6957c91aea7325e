//! Provides tools for reading SCI0 game resource archives.
//!
//! This covers the `RESOURCE.MAP` index, the numbered `RESOURCE.NNN` data
//! files and the two SCI0 compression schemes (LZW and the packed-tree
//! Huffman variant), along with parsers for a few of the resource formats.
//! Files are fetched through the [`source::ByteSource`] trait, so archives can
//! be read from a directory, over HTTP, or from memory.

pub mod resources;
pub mod source;
pub mod utils;
