mod contents;
mod errors;
mod raw_header;
mod volume_file;

pub use self::{
    errors::{DecompressionError, LoadError},
    raw_header::ResourceHeader,
    volume_file::ResourceLoader,
};
