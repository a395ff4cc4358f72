// SPDX-License-Identifier: Apache-2.0

//! Object-storage access for model artifacts.
//!
//! The storage service itself is an external collaborator; this module only
//! defines the fetch seam and a path-style HTTP implementation of it.

use async_trait::async_trait;
use std::path::Path;

use crate::error::{BridgeError, Result};

/// Fetches a single object out of the configured bucket into a local file.
#[async_trait]
pub trait ArtifactStore: Send + Sync {
    async fn fetch(&self, key: &str, dest: &Path) -> Result<()>;
}

/// Path-style HTTP store: objects live at `<endpoint>/<bucket>/<key>`.
/// The access key pair is sent as basic auth when supplied.
pub struct HttpArtifactStore {
    endpoint: String,
    bucket: String,
    access_key: Option<String>,
    secret_key: Option<String>,
    client: reqwest::Client,
}

impl HttpArtifactStore {
    pub fn new(
        endpoint: &str,
        bucket: &str,
        access_key: Option<String>,
        secret_key: Option<String>,
    ) -> Self {
        let endpoint = endpoint.trim_end_matches('/');
        let endpoint = if endpoint.contains("://") {
            endpoint.to_string()
        } else {
            format!("https://{}", endpoint)
        };

        Self {
            endpoint,
            bucket: bucket.to_string(),
            access_key,
            secret_key,
            client: reqwest::Client::new(),
        }
    }

    fn object_url(&self, key: &str) -> String {
        format!("{}/{}/{}", self.endpoint, self.bucket, key)
    }
}

#[async_trait]
impl ArtifactStore for HttpArtifactStore {
    async fn fetch(&self, key: &str, dest: &Path) -> Result<()> {
        let url = self.object_url(key);
        let mut request = self.client.get(&url);
        if let Some(access_key) = &self.access_key {
            request = request.basic_auth(access_key, self.secret_key.as_deref());
        }

        let response = request.send().await?.error_for_status().map_err(|e| {
            BridgeError::Storage(format!("download of '{}' failed: {}", url, e))
        })?;
        let bytes = response.bytes().await?;
        tokio::fs::write(dest, &bytes).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_url_is_path_style() {
        let store = HttpArtifactStore::new("https://s3.example.com", "models", None, None);
        assert_eq!(
            store.object_url("t1/model.pt"),
            "https://s3.example.com/models/t1/model.pt"
        );
    }

    #[test]
    fn test_scheme_is_added_when_missing() {
        let store = HttpArtifactStore::new("s3.example.com/", "models", None, None);
        assert_eq!(
            store.object_url("k"),
            "https://s3.example.com/models/k"
        );
    }
}
