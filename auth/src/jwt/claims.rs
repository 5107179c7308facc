use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Session token payload.
///
/// Every field is covered by the signature, so changing any of them
/// invalidates the token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject: the user id, rendered as a decimal string
    pub sub: String,

    /// Username at the time the token was issued
    pub username: String,

    /// Issued at (Unix timestamp, seconds)
    pub iat: i64,

    /// Expires at (Unix timestamp, seconds)
    pub exp: i64,
}

impl Claims {
    /// Build claims for a user, valid from `issued_at` for `lifetime`.
    pub fn for_user(
        user_id: impl ToString,
        username: impl Into<String>,
        issued_at: DateTime<Utc>,
        lifetime: Duration,
    ) -> Self {
        let expires_at = issued_at + lifetime;

        Self {
            sub: user_id.to_string(),
            username: username.into(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        }
    }

    /// A token is no longer valid once `exp <= now`.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.exp <= now.timestamp()
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_for_user() {
        let issued_at = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let claims = Claims::for_user(42, "alice", issued_at, Duration::hours(168));

        assert_eq!(claims.sub, "42");
        assert_eq!(claims.username, "alice");
        assert_eq!(claims.iat, issued_at.timestamp());
        assert_eq!(claims.exp - claims.iat, 168 * 60 * 60);
    }

    #[test]
    fn test_is_expired_boundary() {
        let issued_at = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let claims = Claims::for_user(1, "bob", issued_at, Duration::seconds(10));

        assert!(!claims.is_expired(issued_at));
        assert!(!claims.is_expired(issued_at + Duration::seconds(9)));
        assert!(claims.is_expired(issued_at + Duration::seconds(10))); // exactly at expiry
        assert!(claims.is_expired(issued_at + Duration::seconds(11)));
    }
}
