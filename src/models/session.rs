//! Session model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Client-cached proof of authentication.
///
/// This is both the body of a successful login response and the value the
/// session store keeps between runs. Identifiers are opaque to the client;
/// only `expired_at` is ever interpreted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Session ID
    pub id: String,
    /// Owning user ID, used to build the profile link
    #[serde(rename = "userID")]
    pub user_id: String,
    /// Display name
    pub username: String,
    /// Bearer credential
    pub token: String,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Expiration timestamp
    pub expired_at: DateTime<Utc>,
}

impl Session {
    /// Check whether the session is still valid at the given instant.
    ///
    /// A session is valid iff its expiry is strictly in the future. An
    /// expired session behaves exactly like an absent one.
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        self.expired_at > now
    }

    /// Check whether the session is valid right now
    pub fn is_valid(&self) -> bool {
        self.is_valid_at(Utc::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn session_expiring_at(expired_at: DateTime<Utc>) -> Session {
        Session {
            id: "c5b0f7ea-3c49-4a23-a0f1-0d6c1f6c1a11".to_string(),
            user_id: "2d5ad0b3-3412-4b7e-88f2-cbf0f0fa9d39".to_string(),
            username: "nerd".to_string(),
            token: "tok".to_string(),
            created_at: Utc::now(),
            expired_at,
        }
    }

    #[test]
    fn test_future_expiry_is_valid() {
        let session = session_expiring_at(Utc::now() + Duration::days(5));
        assert!(session.is_valid());
    }

    #[test]
    fn test_past_expiry_is_invalid() {
        let session = session_expiring_at(Utc::now() - Duration::seconds(1));
        assert!(!session.is_valid());
    }

    #[test]
    fn test_expiry_boundary_is_invalid() {
        // Validity requires the expiry to be strictly in the future.
        let now = Utc::now();
        let session = session_expiring_at(now);
        assert!(!session.is_valid_at(now));
    }

    #[test]
    fn test_wire_field_names() {
        let json = r#"{
            "id": "0b6f7f71-1c62-4e6e-9c42-cc17db7f11ce",
            "userID": "9be32f1f-4d05-4fb2-a6b0-caa8f3e45bb4",
            "username": "cook",
            "token": "secret-token",
            "createdAt": "2024-01-02T10:00:00Z",
            "expiredAt": "2024-01-07T10:00:00Z"
        }"#;

        let session: Session = serde_json::from_str(json).unwrap();
        assert_eq!(session.user_id, "9be32f1f-4d05-4fb2-a6b0-caa8f3e45bb4");
        assert_eq!(session.token, "secret-token");

        // And back out with the same names
        let value: serde_json::Value =
            serde_json::from_str(&serde_json::to_string(&session).unwrap()).unwrap();
        assert!(value.get("userID").is_some());
        assert!(value.get("expiredAt").is_some());
    }
}
