use std::path::PathBuf;

use serde::Deserialize;

/// Which object store backs the image pipeline.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Local directory tree served as static files.
    #[default]
    Filesystem,
    /// S3-compatible bucket with public-read objects.
    Bucket,
    /// Process-local map. Nothing survives a restart.
    Memory,
}

/// Filesystem backend settings.
#[derive(Debug, Deserialize, Clone)]
pub struct FilesystemConfig {
    /// Static root that artifact paths are relative to. Default: "static".
    #[serde(default = "default_fs_root")]
    pub root: PathBuf,
}

impl Default for FilesystemConfig {
    fn default() -> Self {
        Self {
            root: default_fs_root(),
        }
    }
}

/// Object storage backend settings.
#[derive(Debug, Deserialize, Clone)]
pub struct BucketConfig {
    /// Bucket name. Required when the bucket backend is selected.
    #[serde(default)]
    pub name: String,
    /// Region name. Default: "us-east-1".
    #[serde(default = "default_region")]
    pub region: String,
    /// Custom S3-compatible endpoint (MinIO, R2, ...). Enables path-style addressing.
    #[serde(default)]
    pub endpoint: Option<String>,
    /// Access key. Falls back to the AWS environment/profile chain when unset.
    #[serde(default)]
    pub access_key: Option<String>,
    #[serde(default)]
    pub secret_key: Option<String>,
    /// Base URL used to build public artifact URLs, overriding the derived one.
    #[serde(default)]
    pub public_url: Option<String>,
    /// Canned ACL applied to every upload. Default: "public-read".
    #[serde(default = "default_acl")]
    pub acl: String,
}

impl Default for BucketConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            region: default_region(),
            endpoint: None,
            access_key: None,
            secret_key: None,
            public_url: None,
            acl: default_acl(),
        }
    }
}

/// Storage and image pipeline configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,
    #[serde(default)]
    pub filesystem: FilesystemConfig,
    #[serde(default)]
    pub bucket: BucketConfig,
    /// Whether removing an artifact that is already gone is an error.
    /// Unset means strict for the filesystem backend and lenient otherwise.
    #[serde(default)]
    pub strict_delete: Option<bool>,
    /// JPEG quality of stored artifacts (1-100). Default: 90.
    #[serde(default = "default_jpeg_quality")]
    pub jpeg_quality: u8,
    /// Largest accepted upload in bytes. Default: 10 MiB.
    #[serde(default = "default_max_upload_size")]
    pub max_upload_size: u64,
}

fn default_fs_root() -> PathBuf {
    PathBuf::from("static")
}
fn default_region() -> String {
    "us-east-1".into()
}
fn default_acl() -> String {
    "public-read".into()
}
fn default_jpeg_quality() -> u8 {
    90
}
fn default_max_upload_size() -> u64 {
    10 * 1024 * 1024
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            filesystem: FilesystemConfig::default(),
            bucket: BucketConfig::default(),
            strict_delete: None,
            jpeg_quality: default_jpeg_quality(),
            max_upload_size: default_max_upload_size(),
        }
    }
}

impl StorageConfig {
    /// Effective delete strictness for the selected backend.
    pub fn strict_delete(&self) -> bool {
        self.strict_delete
            .unwrap_or(self.backend == StorageBackend::Filesystem)
    }
}
