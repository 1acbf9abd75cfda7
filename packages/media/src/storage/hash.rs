use std::fmt;

use md5::{Digest, Md5};

/// MD5 digest of an upload's raw bytes. Rendered as 32 lowercase hex
/// characters, it becomes the artifact's file name.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContentHash([u8; 16]);

impl ContentHash {
    pub fn compute(data: &[u8]) -> Self {
        Self(Md5::digest(data).into())
    }
}

impl fmt::Debug for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ContentHash({self})")
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}
