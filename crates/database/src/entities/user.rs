//! The `users` entity and its client-safe projection.

use serde::{Deserialize, Serialize};

/// A persisted user row. Carries the password digest and is therefore never
/// serialized to clients; responses go through [`PublicProfile`].
#[derive(Debug, Clone)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub address: String,
    pub phone: String,
    pub password: String,
}

impl User {
    /// Projection of the fields safe to return to a caller.
    pub fn public_profile(&self) -> PublicProfile {
        PublicProfile {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
            address: self.address.clone(),
            phone: self.phone.clone(),
        }
    }
}

/// Insert payload for a new user. `password` must already be the digest, not
/// the plaintext.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub address: String,
    pub phone: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PublicProfile {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub address: String,
    pub phone: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_profile_excludes_password() {
        let user = User {
            id: 7,
            name: "t".to_string(),
            email: "t@m.com".to_string(),
            address: "t".to_string(),
            phone: "t".to_string(),
            password: "digest".to_string(),
        };

        let json = serde_json::to_value(user.public_profile()).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["email"], "t@m.com");
        assert!(json.get("password").is_none());
    }
}
