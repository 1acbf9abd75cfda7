use async_trait::async_trait;
use s3::creds::Credentials;
use s3::error::S3Error;
use s3::{Bucket, Region};
use tracing::{debug, warn};

use super::error::StorageError;
use super::key::validate_key;
use super::traits::ObjectStore;
use crate::config::BucketConfig;

/// Object store over an S3-compatible bucket.
///
/// Objects are written with a canned ACL (public-read by default) and their
/// locations are fully-qualified public URLs.
pub struct BucketStore {
    bucket: Box<Bucket>,
    /// Same bucket with the ACL header attached; only used for uploads.
    writer: Box<Bucket>,
    public_base: String,
}

impl BucketStore {
    pub fn new(config: &BucketConfig) -> Result<Self, StorageError> {
        if config.name.trim().is_empty() {
            return Err(StorageError::Unavailable("bucket name is not configured".into()));
        }

        let region = match &config.endpoint {
            Some(endpoint) => Region::Custom {
                region: config.region.clone(),
                endpoint: endpoint.trim_end_matches('/').to_string(),
            },
            None => config
                .region
                .parse::<Region>()
                .map_err(|e| StorageError::Unavailable(format!("invalid region: {e}")))?,
        };

        let credentials = match (&config.access_key, &config.secret_key) {
            (Some(access), Some(secret)) => {
                Credentials::new(Some(access.as_str()), Some(secret.as_str()), None, None, None)
            }
            _ => Credentials::default(),
        }
        .map_err(|e| StorageError::Unavailable(format!("bucket credentials: {e}")))?;

        let mut bucket = Bucket::new(&config.name, region, credentials)
            .map_err(|e| StorageError::Unavailable(format!("bucket client: {e}")))?;
        if config.endpoint.is_some() {
            bucket = bucket.with_path_style();
        }

        let mut writer = bucket.clone();
        writer.add_header("x-amz-acl", &config.acl);

        Ok(Self {
            bucket,
            writer,
            public_base: public_base_url(config),
        })
    }

    pub fn public_base(&self) -> &str {
        &self.public_base
    }
}

/// Base URL that public object URLs are built from.
///
/// An explicit `public_url` wins; a custom endpoint yields path-style URLs;
/// plain AWS yields virtual-hosted URLs.
pub fn public_base_url(config: &BucketConfig) -> String {
    if let Some(url) = &config.public_url {
        return url.trim_end_matches('/').to_string();
    }
    match &config.endpoint {
        Some(endpoint) => format!("{}/{}", endpoint.trim_end_matches('/'), config.name),
        None => format!("https://{}.s3.{}.amazonaws.com", config.name, config.region),
    }
}

fn checked_key(key: &str) -> Result<&str, StorageError> {
    validate_key(key).map_err(|e| StorageError::InvalidKey(e.into()))
}

fn map_s3_error(op: &str, key: &str, err: S3Error) -> StorageError {
    match err {
        S3Error::HttpFailWithBody(401 | 403, body) => {
            StorageError::Unavailable(format!("{op} {key} was denied: {body}"))
        }
        S3Error::HttpFailWithBody(404, _) => StorageError::NotFound(key.to_string()),
        S3Error::HttpFailWithBody(status, body) => {
            StorageError::Backend(format!("{op} {key} returned HTTP {status}: {body}"))
        }
        other => StorageError::Unavailable(format!("{op} {key}: {other}")),
    }
}

fn check_status(op: &str, key: &str, status: u16) -> Result<(), StorageError> {
    match status {
        200..=299 => Ok(()),
        401 | 403 => Err(StorageError::Unavailable(format!(
            "{op} {key} was denied (HTTP {status})"
        ))),
        404 => Err(StorageError::NotFound(key.to_string())),
        _ => Err(StorageError::Backend(format!(
            "{op} {key} returned HTTP {status}"
        ))),
    }
}

/// Interpret a HEAD answer: present, absent, or a failure worth reporting.
fn object_exists(key: &str, status: u16) -> Result<bool, StorageError> {
    match check_status("head", key, status) {
        Ok(()) => Ok(true),
        Err(StorageError::NotFound(_)) => Ok(false),
        Err(e) => Err(e),
    }
}

#[async_trait]
impl ObjectStore for BucketStore {
    async fn put(
        &self,
        key: &str,
        data: &[u8],
        content_type: &str,
    ) -> Result<String, StorageError> {
        let key = checked_key(key)?;
        let response = self
            .writer
            .put_object_with_content_type(key, data, content_type)
            .await
            .map_err(|e| map_s3_error("put", key, e))?;
        check_status("put", key, response.status_code())?;

        debug!(key, bytes = data.len(), "Uploaded object to bucket");
        Ok(self.location(key))
    }

    async fn get(&self, key: &str) -> Result<Vec<u8>, StorageError> {
        let key = checked_key(key)?;
        let response = self
            .bucket
            .get_object(key)
            .await
            .map_err(|e| map_s3_error("get", key, e))?;
        check_status("get", key, response.status_code())?;
        Ok(response.bytes().to_vec())
    }

    async fn delete(&self, key: &str) -> Result<bool, StorageError> {
        let key = checked_key(key)?;

        // DELETE answers 204 whether or not the object existed.
        let status = match self.bucket.head_object(key).await {
            Ok((_, status)) | Err(S3Error::HttpFailWithBody(status, _)) => status,
            Err(e) => return Err(map_s3_error("head", key, e)),
        };
        if !object_exists(key, status)? {
            return Ok(false);
        }

        let response = self
            .bucket
            .delete_object(key)
            .await
            .map_err(|e| map_s3_error("delete", key, e))?;
        match check_status("delete", key, response.status_code()) {
            Ok(()) => Ok(true),
            Err(StorageError::NotFound(_)) => {
                warn!(key, "Object vanished between HEAD and DELETE");
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }

    async fn list(&self, prefix: &str) -> Result<Vec<String>, StorageError> {
        let prefix = checked_key(prefix)?;
        let pages = self
            .bucket
            .list(format!("{prefix}/"), Some("/".to_string()))
            .await
            .map_err(|e| map_s3_error("list", prefix, e))?;

        let mut keys: Vec<String> = pages
            .into_iter()
            .flat_map(|page| page.contents)
            .map(|object| object.key)
            .collect();
        keys.sort();
        Ok(keys)
    }

    fn location(&self, key: &str) -> String {
        format!("{}/{key}", self.public_base)
    }

    fn key_from_location(&self, location: &str) -> Option<String> {
        let key = location
            .trim()
            .strip_prefix(&self.public_base)?
            .strip_prefix('/')?;
        validate_key(key).ok().map(str::to_string)
    }
}
