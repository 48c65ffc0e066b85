//! Document identifiers and sharded-path derivation.
//!
//! Records arrive from two generations of registration flow, so identifiers are
//! treated as opaque strings: database object ids (`64f0a1b2c3d4e5f6a7b8c9d0`)
//! and canonical UUIDs (`550e8400e29b41d4a716446655440000`) are both valid.
//!
//! An identifier is 1 to 64 characters drawn from ASCII letters, digits, `-`
//! and `_`. Anything else cannot name a stored document, and the restricted
//! alphabet keeps identifiers safe to use as file names.
//!
//! ## Sharded layout
//! For an identifier `id`, the file store keeps the document at:
//! `collection/<id[0..2]>/<id[2..4]>/<id>.json`
//!
//! Shard components are lowercased, and identifiers shorter than four
//! characters are padded with `_` for the shard components only.

use crate::error::{StoreError, StoreResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::{fmt, str::FromStr};

const MAX_ID_LEN: usize = 64;

/// A validated document identifier.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DocumentId(String);

impl DocumentId {
    /// Generates a fresh identifier (a canonical UUID: 32 lowercase hex characters).
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().simple().to_string())
    }

    /// Validates an externally supplied identifier.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidIdentifier`] if `input` is empty, longer than
    /// 64 characters, or contains characters outside `[A-Za-z0-9_-]`.
    pub fn parse(input: &str) -> StoreResult<Self> {
        if Self::is_valid(input) {
            return Ok(Self(input.to_owned()));
        }
        Err(StoreError::InvalidIdentifier(format!(
            "identifier must be 1-{MAX_ID_LEN} characters of [A-Za-z0-9_-], got: '{input}'"
        )))
    }

    /// Purely syntactic check used before [`parse`](Self::parse).
    pub fn is_valid(input: &str) -> bool {
        !input.is_empty()
            && input.len() <= MAX_ID_LEN
            && input
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `parent_dir/<s1>/<s2>/<id>.<extension>`.
    pub fn sharded_file(&self, parent_dir: &Path, extension: &str) -> PathBuf {
        let mut shard: Vec<char> = self.0.to_ascii_lowercase().chars().take(4).collect();
        shard.resize(4, '_');
        let s1: String = shard[0..2].iter().collect();
        let s2: String = shard[2..4].iter().collect();
        parent_dir
            .join(s1)
            .join(s2)
            .join(format!("{}.{}", self.0, extension))
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for DocumentId {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DocumentId::parse(s)
    }
}

impl TryFrom<String> for DocumentId {
    type Error = StoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if Self::is_valid(&value) {
            return Ok(Self(value));
        }
        Self::parse(&value)
    }
}

impl From<DocumentId> for String {
    fn from(id: DocumentId) -> Self {
        id.0
    }
}

impl AsRef<str> for DocumentId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
