// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Persisted credential store
//!
//! A small key-value JSON file holding the access token and the cached
//! user profile, or an in-memory map with the same semantics.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::auth::User;
use crate::error::{GreenLoopError, Result};

/// On-disk layout of the credentials file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct StoredCredentials {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    user: Option<User>,
}

enum Backing {
    File(PathBuf),
    Memory(Mutex<StoredCredentials>),
}

/// Credential store for the access token and user profile
pub struct CredentialStore {
    backing: Backing,
}

impl CredentialStore {
    /// Open a store backed by a JSON file (created lazily on first save)
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self {
            backing: Backing::File(path.into()),
        }
    }

    /// Create a store that lives only in memory
    pub fn in_memory() -> Self {
        Self {
            backing: Backing::Memory(Mutex::new(StoredCredentials::default())),
        }
    }

    /// Path of the backing file, if any
    pub fn path(&self) -> Option<&Path> {
        match &self.backing {
            Backing::File(path) => Some(path),
            Backing::Memory(_) => None,
        }
    }

    /// Read the access token
    pub fn token(&self) -> Result<Option<String>> {
        Ok(self.read()?.token)
    }

    /// Read the cached user profile
    pub fn user(&self) -> Result<Option<User>> {
        Ok(self.read()?.user)
    }

    /// Persist a token and user together
    pub fn save(&self, token: &str, user: &User) -> Result<()> {
        self.write(StoredCredentials {
            token: Some(token.to_string()),
            user: Some(user.clone()),
        })
    }

    /// Remove all persisted credentials. Clearing an empty store is a no-op.
    pub fn clear(&self) -> Result<()> {
        match &self.backing {
            Backing::File(path) => match std::fs::remove_file(path) {
                Ok(()) => Ok(()),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
                Err(e) => Err(e.into()),
            },
            Backing::Memory(cell) => {
                *lock(cell) = StoredCredentials::default();
                Ok(())
            }
        }
    }

    fn read(&self) -> Result<StoredCredentials> {
        match &self.backing {
            Backing::File(path) => {
                if !path.exists() {
                    return Ok(StoredCredentials::default());
                }
                let content = std::fs::read_to_string(path)?;
                serde_json::from_str(&content).map_err(|e| {
                    GreenLoopError::Store(format!(
                        "corrupt credentials file {}: {}",
                        path.display(),
                        e
                    ))
                })
            }
            Backing::Memory(cell) => Ok(lock(cell).clone()),
        }
    }

    fn write(&self, credentials: StoredCredentials) -> Result<()> {
        match &self.backing {
            Backing::File(path) => {
                if let Some(parent) = path.parent() {
                    std::fs::create_dir_all(parent)?;
                }
                let content = serde_json::to_string_pretty(&credentials)?;
                std::fs::write(path, content)?;
                Ok(())
            }
            Backing::Memory(cell) => {
                *lock(cell) = credentials;
                Ok(())
            }
        }
    }
}

fn lock(cell: &Mutex<StoredCredentials>) -> std::sync::MutexGuard<'_, StoredCredentials> {
    match cell.lock() {
        Ok(guard) => guard,
        Err(poisoned) => {
            tracing::warn!("Credential store lock was poisoned, recovering");
            poisoned.into_inner()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample_user() -> User {
        User {
            id: 1,
            first_name: "An".to_string(),
            last_name: "Pham".to_string(),
            email: "an@example.com".to_string(),
            role: Some("user".to_string()),
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_empty_file_store_reads_none() {
        let temp_dir = TempDir::new().unwrap();
        let store = CredentialStore::open(temp_dir.path().join("credentials.json"));
        assert!(store.token().unwrap().is_none());
        assert!(store.user().unwrap().is_none());
    }

    #[test]
    fn test_file_store_save_then_read() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("sub").join("credentials.json");
        let store = CredentialStore::open(&path);

        store.save("tok-1", &sample_user()).unwrap();

        assert!(path.exists());
        assert_eq!(store.token().unwrap().as_deref(), Some("tok-1"));
        assert_eq!(store.user().unwrap(), Some(sample_user()));

        // A second handle on the same file sees the data.
        let reopened = CredentialStore::open(&path);
        assert_eq!(reopened.token().unwrap().as_deref(), Some("tok-1"));
    }

    #[test]
    fn test_file_store_clear_is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("credentials.json");
        let store = CredentialStore::open(&path);
        store.save("tok", &sample_user()).unwrap();

        store.clear().unwrap();
        store.clear().unwrap();

        assert!(!path.exists());
        assert!(store.token().unwrap().is_none());
    }

    #[test]
    fn test_corrupt_file_is_store_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("credentials.json");
        std::fs::write(&path, "{\"user\": 42").unwrap();
        let store = CredentialStore::open(&path);

        assert!(matches!(store.user(), Err(GreenLoopError::Store(_))));
        assert!(matches!(store.token(), Err(GreenLoopError::Store(_))));

        store.clear().unwrap();
        assert!(store.user().unwrap().is_none());
    }

    #[test]
    fn test_in_memory_store() {
        let store = CredentialStore::in_memory();
        assert!(store.path().is_none());
        store.save("mem", &sample_user()).unwrap();
        assert_eq!(store.token().unwrap().as_deref(), Some("mem"));
        store.clear().unwrap();
        assert!(store.user().unwrap().is_none());
    }
}
