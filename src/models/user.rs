use serde::{Deserialize, Serialize};

/// A registered account as stored in the users document
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl User {
    pub fn new(name: String, email: String, password: String) -> Self {
        Self {
            name,
            email,
            password,
        }
    }

    /// Name shown in the session; falls back to the email for nameless accounts
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            &self.email
        } else {
            &self.name
        }
    }
}

/// On-disk layout of `users.json`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UsersDocument {
    #[serde(default)]
    pub users: Vec<User>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_falls_back_to_email() {
        let user = User::new(String::new(), "ana@example.com".into(), "pw".into());
        assert_eq!(user.display_name(), "ana@example.com");

        let user = User::new("Ana".into(), "ana@example.com".into(), "pw".into());
        assert_eq!(user.display_name(), "Ana");
    }

    #[test]
    fn test_users_document_shape() {
        let doc = UsersDocument {
            users: vec![User::new("Ana".into(), "ana@example.com".into(), "pw".into())],
        };
        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(json["users"][0]["email"], "ana@example.com");
        assert_eq!(json["users"][0]["password"], "pw");

        let empty: UsersDocument = serde_json::from_str("{}").unwrap();
        assert!(empty.users.is_empty());
    }
}
