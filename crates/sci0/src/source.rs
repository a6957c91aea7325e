//! Named-file byte sources that the resource loader reads game files from.

mod caching;
mod dir;
#[cfg(feature = "http")]
mod http;
mod mem;

use std::{io, sync::Arc};

use bytes::Bytes;

pub use self::{caching::CachingSource, dir::DirSource, mem::MemSource};

#[cfg(feature = "http")]
pub use self::http::HttpSource;

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("File {name} not found")]
    NotFound { name: String },
    #[error("I/O error reading {name}: {source}")]
    Io {
        name: String,
        #[source]
        source: io::Error,
    },
    #[error("HTTP error fetching {name}: {message}")]
    Http { name: String, message: String },
}

impl SourceError {
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            SourceError::NotFound { name }
            | SourceError::Io { name, .. }
            | SourceError::Http { name, .. } => name,
        }
    }
}

/// Supplies the raw contents of game files by name, e.g. `RESOURCE.MAP`.
///
/// Calls may block. Implementations must be usable from several threads at
/// once, since the archive can load entries in parallel.
pub trait ByteSource: Send + Sync {
    fn get(&self, name: &str) -> Result<Bytes, SourceError>;
}

impl<S: ByteSource + ?Sized> ByteSource for &S {
    fn get(&self, name: &str) -> Result<Bytes, SourceError> {
        (**self).get(name)
    }
}

impl<S: ByteSource + ?Sized> ByteSource for Box<S> {
    fn get(&self, name: &str) -> Result<Bytes, SourceError> {
        (**self).get(name)
    }
}

impl<S: ByteSource + ?Sized> ByteSource for Arc<S> {
    fn get(&self, name: &str) -> Result<Bytes, SourceError> {
        (**self).get(name)
    }
}
