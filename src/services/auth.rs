use std::sync::Arc;

use crate::{
    db::UserRepository,
    error::{AppError, AppResult},
    models::User,
};

/// Registration and login against a [`UserRepository`]
///
/// Passwords are compared verbatim.
pub struct AuthService {
    repository: Arc<dyn UserRepository>,
}

impl AuthService {
    pub fn new(repository: Arc<dyn UserRepository>) -> Self {
        Self { repository }
    }

    /// Creates an account; the returned user should be logged in by the caller
    pub async fn register(&self, name: &str, email: &str, password: &str) -> AppResult<User> {
        let name = name.trim();
        let email = normalize_email(email);
        let password = password.trim();

        if name.is_empty() || email.is_empty() || password.is_empty() {
            return Err(AppError::MissingFields);
        }

        let user = User::new(name.to_string(), email, password.to_string());
        match self.repository.insert(user.clone()).await {
            Ok(()) => {
                tracing::info!(email = %user.email, "User registered");
                Ok(user)
            }
            Err(AppError::DuplicateEmail) => {
                tracing::info!(email = %user.email, "Registration rejected: email exists");
                Err(AppError::DuplicateEmail)
            }
            Err(err) => Err(err),
        }
    }

    /// Checks credentials and returns the matching user
    pub async fn login(&self, email: &str, password: &str) -> AppResult<User> {
        let email = normalize_email(email);
        let password = password.trim();

        match self.repository.find_by_email(&email).await {
            Some(user) if user.password == password => {
                tracing::info!(email = %email, "Login succeeded");
                Ok(user)
            }
            _ => {
                tracing::info!(email = %email, "Login failed");
                Err(AppError::InvalidCredentials)
            }
        }
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
