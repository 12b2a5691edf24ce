//! One-time activation and password-reset codes. The cleartext code is
//! mailed to the user; only its SHA-256 digest is persisted.
use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};
use uuid::Uuid;

type CompareMac = Hmac<Sha256>;

const COMPARE_KEY: &[u8] = b"folio-cms/one-time-code";

pub fn generate_code() -> String {
    Uuid::new_v4().simple().to_string()
}

pub fn digest(code: &str) -> String {
    format!("{:x}", Sha256::digest(code.as_bytes()))
}

/// Compares a submitted code with a stored digest in constant time.
pub fn matches(code: &str, stored_digest: Option<&str>) -> bool {
    match stored_digest {
        Some(stored) if !code.is_empty() => constant_time_eq(&digest(code), stored),
        _ => false,
    }
}

/// Both sides go through the same HMAC so `verify_slice` compares
/// equal-length tags without short-circuiting.
fn constant_time_eq(left: &str, right: &str) -> bool {
    let tag = |value: &str| {
        CompareMac::new_from_slice(COMPARE_KEY).map(|mut mac| {
            mac.update(value.as_bytes());
            mac
        })
    };
    let (Ok(left), Ok(right)) = (tag(left), tag(right)) else {
        return false;
    };
    left.verify_slice(&right.finalize().into_bytes()).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_unique_hex() {
        let a = generate_code();
        let b = generate_code();
        assert_ne!(a, b);
        assert_eq!(a.len(), 32);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn digest_matching() {
        let code = generate_code();
        let stored = digest(&code);
        assert_eq!(stored.len(), 64);
        assert!(matches(&code, Some(&stored)));
        assert!(!matches("wrong", Some(&stored)));
        assert!(!matches(&code, None));
        assert!(!matches("", Some(&digest(""))));
    }

    #[test]
    fn constant_time_eq_rejects_prefixes_and_case_changes() {
        let stored = digest("activate-me");
        assert!(constant_time_eq(&stored, &stored.clone()));
        assert!(!constant_time_eq(&stored, &stored[..63]));
        assert!(!constant_time_eq(&stored, &stored.to_uppercase()));
        assert!(!constant_time_eq("", &stored));
    }
}
