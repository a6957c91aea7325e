use bytes::Bytes;
use reqwest::{StatusCode, blocking::Client};
use url::Url;

use super::{ByteSource, SourceError};

/// Fetches files relative to a base URL with a blocking HTTP client.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: Client,
    base: Url,
}

impl HttpSource {
    /// Creates a source for files under `base`. A trailing `/` is added if
    /// missing, so `http://host/games/kq4` resolves `RESOURCE.MAP` to
    /// `http://host/games/kq4/RESOURCE.MAP`.
    pub fn new(base: &str) -> Result<Self, url::ParseError> {
        Self::with_client(Client::new(), base)
    }

    pub fn with_client(client: Client, base: &str) -> Result<Self, url::ParseError> {
        let base = if base.ends_with('/') {
            Url::parse(base)?
        } else {
            Url::parse(&format!("{base}/"))?
        };
        Ok(HttpSource { client, base })
    }

    #[must_use]
    pub fn base(&self) -> &Url {
        &self.base
    }

    fn url_for(&self, name: &str) -> Result<Url, SourceError> {
        self.base.join(name).map_err(|e| SourceError::Http {
            name: name.to_string(),
            message: e.to_string(),
        })
    }
}

impl ByteSource for HttpSource {
    fn get(&self, name: &str) -> Result<Bytes, SourceError> {
        let url = self.url_for(name)?;
        log::debug!("Fetching {url}");
        let http_err = |e: reqwest::Error| SourceError::Http {
            name: name.to_string(),
            message: e.to_string(),
        };
        let response = self.client.get(url).send().map_err(http_err)?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(SourceError::NotFound {
                name: name.to_string(),
            });
        }
        response
            .error_for_status()
            .and_then(reqwest::blocking::Response::bytes)
            .map_err(http_err)
    }
}
