//! QrToken entity - a single-use credential gating the check-in channel

use chrono::{DateTime, Duration, Utc};

/// Number of years used as the far-future expiry sentinel for permanent
/// kiosk tokens.
const PERMANENT_YEARS: i64 = 100;

/// QrToken entity
///
/// A token gates the check-in *channel*, not the customer identity: it has
/// no relationship to any customer record. It transitions
/// `used = false -> used = true` exactly once and is never un-marked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrToken {
    pub token: String,
    pub permanent: bool,
    pub used: bool,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl QrToken {
    /// Create a token valid for the given number of seconds
    pub fn new(token: String, validity_seconds: i64) -> Self {
        let now = Utc::now();
        Self {
            token,
            permanent: false,
            used: false,
            created_at: now,
            expires_at: now + Duration::seconds(validity_seconds),
        }
    }

    /// Create a permanently valid token for a static kiosk code
    ///
    /// Stored with a far-future `expires_at` sentinel so the expiry
    /// comparison stays uniform across both token kinds.
    pub fn permanent(token: String) -> Self {
        let now = Utc::now();
        Self {
            token,
            permanent: true,
            used: false,
            created_at: now,
            expires_at: now + Duration::days(PERMANENT_YEARS * 365),
        }
    }

    /// Check if the token has expired
    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }

    /// Check if the token is still redeemable
    pub fn is_valid(&self) -> bool {
        !self.used && !self.is_expired()
    }

    /// Seconds until expiry, clamped at zero
    pub fn remaining_seconds(&self) -> i64 {
        (self.expires_at - Utc::now()).num_seconds().max(0)
    }
}

/// Generate a cryptographically secure random token code
///
/// `ThreadRng` is a CSPRNG, so the resulting codes are not predictable or
/// enumerable.
pub fn generate_token_code() -> String {
    use rand::Rng;

    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
    const CODE_LEN: usize = 32;

    let mut rng = rand::thread_rng();
    (0..CODE_LEN)
        .map(|_| CHARSET[rng.gen_range(0..CHARSET.len())] as char)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_token_is_valid() {
        let token = QrToken::new(generate_token_code(), 60);
        assert!(token.is_valid());
        assert!(!token.is_expired());
        assert!(!token.used);
        assert!(token.remaining_seconds() > 0);
        assert!(token.remaining_seconds() <= 60);
    }

    #[test]
    fn test_expired_token_is_invalid() {
        let mut token = QrToken::new("abc".to_string(), 60);
        token.expires_at = Utc::now() - Duration::seconds(1);
        assert!(token.is_expired());
        assert!(!token.is_valid());
        assert_eq!(token.remaining_seconds(), 0);
    }

    #[test]
    fn test_used_token_is_invalid() {
        let mut token = QrToken::new("abc".to_string(), 60);
        token.used = true;
        assert!(!token.is_expired());
        assert!(!token.is_valid());
    }

    #[test]
    fn test_permanent_token_far_future() {
        let token = QrToken::permanent("kiosk".to_string());
        assert!(token.permanent);
        assert!(!token.is_expired());
        assert!(token.remaining_seconds() > 60 * 60 * 24 * 365);
    }

    #[test]
    fn test_generate_token_code() {
        let a = generate_token_code();
        let b = generate_token_code();
        assert_eq!(a.len(), 32);
        assert_eq!(b.len(), 32);
        assert_ne!(a, b);
        assert!(a.chars().all(|c| c.is_ascii_alphanumeric()));
    }
}
