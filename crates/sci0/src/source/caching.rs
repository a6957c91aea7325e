use std::collections::HashMap;

use bytes::Bytes;
use parking_lot::Mutex;

use super::{ByteSource, SourceError};

/// Remembers every file fetched through the inner source, so a repeated name
/// returns the same bytes without another fetch. Failures are not cached.
#[derive(Debug)]
pub struct CachingSource<S> {
    inner: S,
    cache: Mutex<HashMap<String, Bytes>>,
}

impl<S: ByteSource> CachingSource<S> {
    pub fn new(inner: S) -> Self {
        CachingSource {
            inner,
            cache: Mutex::new(HashMap::new()),
        }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S: ByteSource> ByteSource for CachingSource<S> {
    fn get(&self, name: &str) -> Result<Bytes, SourceError> {
        if let Some(data) = self.cache.lock().get(name) {
            log::debug!("Cache hit for {name}");
            return Ok(data.clone());
        }
        // The lock is not held across the fetch, so two threads may race to
        // fetch the same file. The first one stored wins.
        let data = self.inner.get(name)?;
        Ok(self
            .cache
            .lock()
            .entry(name.to_string())
            .or_insert(data)
            .clone())
    }
}
