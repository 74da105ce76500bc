//! Secrets bootstrap.
//!
//! # Responsibilities
//! - Read the signing key pair from the secrets directory
//! - Read and parse database connection info
//!
//! # Design Decisions
//! - Consumed by handlers that need credentials, never by the router
//! - Errors name the offending file so a misconfigured deployment is
//!   diagnosable from the log line alone
//! - Key material is kept out of Debug output

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

const PUBLIC_KEY_FILE: &str = "key.pub.pem";
const PRIVATE_KEY_FILE: &str = "key.pem";
const CONNECTION_INFO_FILE: &str = "database.json";

/// Error type for secrets loading.
#[derive(Debug, Error)]
pub enum SecretsError {
    #[error("could not read secret file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not parse connection info file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// PEM-encoded signing key pair.
#[derive(Clone)]
pub struct KeyPair {
    pub public: String,
    pub private: String,
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPair")
            .field("public", &self.public)
            .field("private", &"<redacted>")
            .finish()
    }
}

/// Database connection parameters, parsed from `database.json`.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ConnectionInfo {
    pub host: String,
    pub port: u16,
    pub database: String,
    pub user: String,
    pub password: String,
}

/// Read-only access to the secrets directory.
pub struct SecretsStore {
    root: PathBuf,
}

impl SecretsStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Read the public and private key files concurrently.
    pub async fn key_pair(&self) -> Result<KeyPair, SecretsError> {
        let (public, private) = tokio::try_join!(
            self.read_file(PUBLIC_KEY_FILE),
            self.read_file(PRIVATE_KEY_FILE)
        )?;
        Ok(KeyPair { public, private })
    }

    /// Read and parse the database connection info file.
    pub async fn connection_info(&self) -> Result<ConnectionInfo, SecretsError> {
        let raw = self.read_file(CONNECTION_INFO_FILE).await?;
        serde_json::from_str(&raw).map_err(|source| SecretsError::Parse {
            path: self.root.join(CONNECTION_INFO_FILE),
            source,
        })
    }

    async fn read_file(&self, name: &str) -> Result<String, SecretsError> {
        let path = self.root.join(name);
        tokio::fs::read_to_string(&path)
            .await
            .map_err(|source| SecretsError::Read { path, source })
    }
}
