//! Storage locations backed by `object_store`

use crate::config::StorageCredentials;
use crate::error::{Error, Result};
use bytes::Bytes;
use futures::TryStreamExt;
use object_store::aws::AmazonS3Builder;
use object_store::local::LocalFileSystem;
use object_store::path::Path as ObjectPath;
use object_store::{ObjectMeta, ObjectStore};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

/// A store plus a prefix inside it, parsed from a location URL
#[derive(Debug, Clone)]
pub struct StorageLocation {
    /// The object store implementation
    store: Arc<dyn ObjectStore>,
    /// Base path prefix within the bucket (or filesystem root)
    prefix: ObjectPath,
    /// Scheme for logging (s3, file)
    scheme: String,
    /// Bucket name, empty for local paths
    bucket: String,
    /// Filesystem directory for local locations
    local_root: Option<PathBuf>,
}

/// URL schemes served by the S3 client
pub const S3_SCHEMES: [&str; 3] = ["s3", "s3a", "s3n"];

/// Every URL scheme a location may use
pub const SUPPORTED_SCHEMES: [&str; 4] = ["s3", "s3a", "s3n", "file"];

impl StorageLocation {
    /// Parse a location URL and create the matching object store
    ///
    /// S3 clients are built from `credentials` only; the process environment
    /// is not consulted.
    pub fn parse(url: &str, credentials: Option<&StorageCredentials>) -> Result<Self> {
        for scheme in S3_SCHEMES {
            if let Some(rest) = url.strip_prefix(&format!("{scheme}://")) {
                return Self::parse_s3(url, rest, credentials);
            }
        }

        if url.contains("://") && !url.starts_with("file://") {
            return Err(Error::config(format!("Unsupported storage scheme: {url}")));
        }

        Self::parse_local(url)
    }

    /// Parse S3 URL (any of the s3/s3a/s3n spellings)
    fn parse_s3(
        url: &str,
        without_scheme: &str,
        credentials: Option<&StorageCredentials>,
    ) -> Result<Self> {
        let (bucket, prefix) = match without_scheme.find('/') {
            Some(idx) => (&without_scheme[..idx], &without_scheme[idx + 1..]),
            None => (without_scheme, ""),
        };

        if bucket.is_empty() {
            return Err(Error::config(format!("Missing bucket in S3 URL: {url}")));
        }

        let mut builder = AmazonS3Builder::new().with_bucket_name(bucket);

        if let Some(creds) = credentials {
            builder = builder
                .with_access_key_id(&creds.access_key_id)
                .with_secret_access_key(&creds.secret_access_key);

            if let Some(region) = &creds.region {
                builder = builder.with_region(region);
            }
            if let Some(endpoint) = &creds.endpoint {
                builder = builder
                    .with_endpoint(endpoint)
                    .with_allow_http(endpoint.starts_with("http://"));
            }
        }

        let store = builder
            .build()
            .map_err(|e| Error::config(format!("Failed to create S3 client: {e}")))?;

        let prefix = ObjectPath::parse(prefix.trim_matches('/'))
            .map_err(|e| Error::config(format!("Invalid S3 key prefix in {url}: {e}")))?;

        Ok(Self {
            store: Arc::new(store),
            prefix,
            scheme: "s3".to_string(),
            bucket: bucket.to_string(),
            local_root: None,
        })
    }

    /// Parse local filesystem path
    fn parse_local(path: &str) -> Result<Self> {
        let path = path.strip_prefix("file://").unwrap_or(path);
        if path.is_empty() {
            return Err(Error::config("Empty local path"));
        }

        let absolute = std::path::absolute(path)
            .map_err(|e| Error::config(format!("Failed to resolve path {path}: {e}")))?;

        let prefix = ObjectPath::from_absolute_path(&absolute)
            .map_err(|e| Error::config(format!("Invalid local path {path}: {e}")))?;

        Ok(Self {
            store: Arc::new(LocalFileSystem::new()),
            prefix,
            scheme: "file".to_string(),
            bucket: String::new(),
            local_root: Some(absolute),
        })
    }

    /// Check if this is a cloud location (not local)
    pub fn is_cloud(&self) -> bool {
        self.scheme != "file"
    }

    /// Get the scheme (s3, file)
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// Prefix inside the store
    pub fn prefix(&self) -> &ObjectPath {
        &self.prefix
    }

    /// Render a store path for logs and errors
    pub fn display(&self, path: &ObjectPath) -> String {
        if self.is_cloud() {
            format!("{}://{}/{path}", self.scheme, self.bucket)
        } else {
            format!("/{path}")
        }
    }

    /// Build a path under this location from already-escaped segments
    ///
    /// Segments are stored verbatim, so a Hive escape such as `%2F` reaches
    /// the store unchanged. Empty segments, `.`/`..` and segments holding
    /// `/` or control characters are rejected.
    pub fn child<I, S>(&self, segments: I) -> Result<ObjectPath>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut raw = self.prefix.as_ref().to_string();
        for segment in segments {
            let segment = segment.as_ref();
            if segment.is_empty() || segment.contains('/') {
                return Err(Error::storage(
                    self.display(&self.prefix),
                    format!("invalid path segment '{segment}'"),
                ));
            }
            if !raw.is_empty() {
                raw.push('/');
            }
            raw.push_str(segment);
        }

        ObjectPath::parse(&raw).map_err(|e| Error::storage(raw.clone(), e.to_string()))
    }

    /// Segments of `path` below this location's prefix, as stored
    pub fn relative_segments(&self, path: &ObjectPath) -> Vec<String> {
        path.prefix_match(&self.prefix)
            .map(|parts| parts.map(|p| p.as_ref().to_string()).collect())
            .unwrap_or_default()
    }

    /// Whether the location itself names a single object
    pub async fn is_object(&self) -> Result<bool> {
        if let Some(root) = &self.local_root {
            return Ok(tokio::fs::metadata(root)
                .await
                .map(|m| m.is_file())
                .unwrap_or(false));
        }
        if self.prefix.as_ref().is_empty() {
            return Ok(false);
        }
        match self.store.head(&self.prefix).await {
            Ok(_) => Ok(true),
            Err(object_store::Error::NotFound { .. }) => Ok(false),
            Err(e) => Err(Error::storage(self.display(&self.prefix), e.to_string())),
        }
    }

    /// List every object under the location, sorted by path
    pub async fn list(&self) -> Result<Vec<ObjectMeta>> {
        let prefix = (!self.prefix.as_ref().is_empty()).then_some(&self.prefix);

        let listed = self.store.list(prefix).try_collect::<Vec<_>>().await;
        let mut objects = match listed {
            Ok(objects) => objects,
            Err(object_store::Error::NotFound { .. }) => Vec::new(),
            Err(e) => return Err(Error::storage(self.display(&self.prefix), e.to_string())),
        };

        objects.sort_by(|a, b| a.location.cmp(&b.location));
        Ok(objects)
    }

    /// Whether any object exists under the location
    pub async fn has_data(&self) -> Result<bool> {
        Ok(!self.list().await?.is_empty())
    }

    /// Read a whole object
    pub async fn get(&self, path: &ObjectPath) -> Result<Bytes> {
        let result = self
            .store
            .get(path)
            .await
            .map_err(|e| Error::storage(self.display(path), e.to_string()))?;

        result
            .bytes()
            .await
            .map_err(|e| Error::storage(self.display(path), e.to_string()))
    }

    /// Write bytes to an object, returning its display path
    pub async fn put(&self, path: &ObjectPath, data: Bytes) -> Result<String> {
        self.store
            .put(path, data.into())
            .await
            .map_err(|e| Error::storage(self.display(path), e.to_string()))?;

        Ok(self.display(path))
    }

    /// Delete every object under the location, returning how many were removed
    ///
    /// Local locations also lose their (now empty) directory tree.
    pub async fn delete_all(&self) -> Result<usize> {
        let objects = self.list().await?;

        for object in &objects {
            self.store
                .delete(&object.location)
                .await
                .map_err(|e| Error::storage(self.display(&object.location), e.to_string()))?;
        }

        if let Some(root) = &self.local_root {
            match tokio::fs::remove_dir_all(root).await {
                Ok(()) => {}
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => {
                    return Err(Error::storage(root.display().to_string(), e.to_string()));
                }
            }
        }

        debug!(
            location = %self.display(&self.prefix),
            deleted = objects.len(),
            "Cleared location"
        );
        Ok(objects.len())
    }
}
