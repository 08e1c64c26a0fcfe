use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use tokio::sync::Mutex;

use crate::{
    error::{AppError, AppResult},
    models::{User, UsersDocument},
};

/// Storage for registered accounts
///
/// Emails are compared verbatim; callers normalize them first.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait UserRepository: Send + Sync {
    /// Returns every stored user, or an empty list if storage is unreadable
    async fn load(&self) -> Vec<User>;

    /// Replaces the stored list with `users`
    async fn save(&self, users: &[User]) -> AppResult<()>;

    /// The user registered under `email`, if any
    async fn find_by_email(&self, email: &str) -> Option<User>;

    /// Appends `user` unless its email is taken
    async fn insert(&self, user: User) -> AppResult<()>;
}

/// `users.json` on local disk
///
/// The file is rewritten in full on every save. Inserts through one store
/// (and its clones) are serialized; other processes writing the same file are not.
#[derive(Debug, Clone)]
pub struct JsonUserStore {
    path: PathBuf,
    write_lock: Arc<Mutex<()>>,
}

impl JsonUserStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Creates the parent directory and an empty users document if the file is absent
    pub async fn ensure_exists(&self) -> AppResult<()> {
        if tokio::fs::try_exists(&self.path).await? {
            return Ok(());
        }

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        self.write_document(&UsersDocument::default()).await?;

        tracing::info!(path = %self.path.display(), "Created empty users file");
        Ok(())
    }

    async fn write_document(&self, document: &UsersDocument) -> AppResult<()> {
        let json = serde_json::to_vec_pretty(document)?;
        tokio::fs::write(&self.path, json).await?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl UserRepository for JsonUserStore {
    async fn load(&self) -> Vec<User> {
        let Ok(bytes) = tokio::fs::read(&self.path).await else {
            return Vec::new();
        };
        serde_json::from_slice::<UsersDocument>(&bytes)
            .map(|doc| doc.users)
            .unwrap_or_default()
    }

    async fn save(&self, users: &[User]) -> AppResult<()> {
        let document = UsersDocument {
            users: users.to_vec(),
        };
        self.write_document(&document).await?;
        tracing::debug!(path = %self.path.display(), users = users.len(), "Users saved");
        Ok(())
    }

    async fn find_by_email(&self, email: &str) -> Option<User> {
        self.load().await.into_iter().find(|u| u.email == email)
    }

    async fn insert(&self, user: User) -> AppResult<()> {
        let _guard = self.write_lock.lock().await;

        let mut users = self.load().await;
        if users.iter().any(|u| u.email == user.email) {
            return Err(AppError::DuplicateEmail);
        }
        users.push(user);
        self.save(&users).await
    }
}
