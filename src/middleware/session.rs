use std::sync::Arc;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::COOKIE, request::Parts},
};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::api::AppState;

/// Name of the cookie carrying the signed username
pub const SESSION_COOKIE: &str = "session";

type HmacSha256 = Hmac<Sha256>;

/// Signs and verifies session cookie values
///
/// A value is `base64url(username) "." base64url(hmac_sha256(secret, username))`.
#[derive(Clone)]
pub struct SessionSigner {
    key: Arc<[u8]>,
}

impl SessionSigner {
    pub fn new(secret: &str) -> Self {
        Self {
            key: Arc::from(secret.as_bytes()),
        }
    }

    fn mac(&self) -> HmacSha256 {
        HmacSha256::new_from_slice(&self.key).expect("HMAC can take key of any size")
    }

    /// Produces the signed cookie value for `username`
    pub fn sign(&self, username: &str) -> String {
        let mut mac = self.mac();
        mac.update(username.as_bytes());
        let signature = mac.finalize().into_bytes();

        format!(
            "{}.{}",
            URL_SAFE_NO_PAD.encode(username.as_bytes()),
            URL_SAFE_NO_PAD.encode(signature)
        )
    }

    /// Returns the username if `value` carries a valid signature
    pub fn verify(&self, value: &str) -> Option<String> {
        let (payload, signature) = value.split_once('.')?;
        let username = URL_SAFE_NO_PAD.decode(payload).ok()?;
        let signature = URL_SAFE_NO_PAD.decode(signature).ok()?;

        let mut mac = self.mac();
        mac.update(&username);
        mac.verify_slice(&signature).ok()?;

        String::from_utf8(username).ok()
    }

    /// `Set-Cookie` header value that logs `username` in
    pub fn login_cookie(&self, username: &str) -> String {
        format!(
            "{}={}; Path=/; HttpOnly; SameSite=Lax",
            SESSION_COOKIE,
            self.sign(username)
        )
    }

    /// `Set-Cookie` header value that clears the session
    pub fn logout_cookie() -> String {
        format!("{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0", SESSION_COOKIE)
    }
}

/// Finds the raw session cookie value among `Cookie` headers
fn session_cookie_value(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|header| header.to_str().ok())
        .flat_map(|header| header.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value)
}

/// The logged-in user, if any
///
/// Missing, malformed or tampered cookies all read as anonymous.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub username: Option<String>,
}

#[async_trait]
impl FromRequestParts<AppState> for Session {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let username = session_cookie_value(parts).and_then(|value| state.sessions.verify(value));
        Ok(Session { username })
    }
}
