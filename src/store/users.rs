//! Credential store
//!
//! `usuarios.json`: an unordered list of `{username, passwordHash, nome}`
//! records, seeded with a default administrator on first access and never
//! mutated by the application afterwards. Passwords are stored as the
//! lowercase hex SHA-256 of the plaintext, the format existing user files
//! already use.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::info;

use super::{StoreError, ensure_file};

const USERS_FILE: &str = "usuarios.json";

const DEFAULT_ADMIN_USERNAME: &str = "admin";
const DEFAULT_ADMIN_PASSWORD: &str = "admin123";
const DEFAULT_ADMIN_NOME: &str = "Administrador";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub username: String,
    pub password_hash: String,
    pub nome: String,
}

#[derive(Clone)]
pub struct UserStore {
    path: PathBuf,
}

impl UserStore {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join(USERS_FILE),
        }
    }

    pub async fn load(&self) -> Result<Vec<UserRecord>, StoreError> {
        self.bootstrap().await?;
        let raw = fs::read(&self.path).await?;
        Ok(serde_json::from_slice(&raw)?)
    }

    /// Linear scan; usernames are assumed unique but not enforced.
    pub async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<UserRecord>, StoreError> {
        let users = self.load().await?;
        Ok(users.into_iter().find(|user| user.username == username))
    }

    pub fn password_matches(record: &UserRecord, password: &str) -> bool {
        hash_password(password) == record.password_hash
    }

    async fn bootstrap(&self) -> Result<(), StoreError> {
        if fs::try_exists(&self.path).await? {
            return Ok(());
        }

        let default_users = vec![UserRecord {
            username: DEFAULT_ADMIN_USERNAME.to_string(),
            password_hash: hash_password(DEFAULT_ADMIN_PASSWORD),
            nome: DEFAULT_ADMIN_NOME.to_string(),
        }];

        ensure_file(&self.path, &serde_json::to_vec_pretty(&default_users)?).await?;
        info!(path = %self.path.display(), "user store bootstrapped with default administrator");
        Ok(())
    }
}

/// Lowercase hex SHA-256
pub fn hash_password(password: &str) -> String {
    let digest = Sha256::digest(password.as_bytes());
    digest.iter().map(|byte| format!("{byte:02x}")).collect()
}
