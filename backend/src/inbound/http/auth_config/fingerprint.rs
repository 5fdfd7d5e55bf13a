//! Signing secret fingerprinting for operational visibility.
//!
//! Operators can confirm which secret a process loaded by comparing the
//! logged fingerprint, without the secret ever being written anywhere.

use sha2::{Digest, Sha256};

use super::SigningSecret;

/// Length of the fingerprint in bytes before hex encoding.
const FINGERPRINT_BYTES: usize = 8;

/// First 8 bytes of the secret's SHA-256 digest as lowercase hex.
///
/// # Examples
///
/// ```rust
/// use evstations::inbound::http::auth_config::SigningSecret;
/// use evstations::inbound::http::auth_config::fingerprint::secret_fingerprint;
///
/// let fp = secret_fingerprint(&SigningSecret::new(b"secret".to_vec()));
/// assert_eq!(fp.len(), 16);
/// ```
#[must_use]
pub fn secret_fingerprint(secret: &SigningSecret) -> String {
    let digest = Sha256::digest(secret.expose());
    hex::encode(&digest[..FINGERPRINT_BYTES])
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn fingerprint_is_stable_lowercase_hex() {
        let secret = SigningSecret::new(vec![b'a'; 32]);
        let fp = secret_fingerprint(&secret);

        assert_eq!(fp, secret_fingerprint(&secret));
        assert_eq!(fp.len(), FINGERPRINT_BYTES * 2);
        assert!(fp.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[rstest]
    fn different_secrets_differ() {
        let a = secret_fingerprint(&SigningSecret::new(vec![b'a'; 32]));
        let b = secret_fingerprint(&SigningSecret::new(vec![b'b'; 32]));
        assert_ne!(a, b);
    }

    #[rstest]
    fn fingerprint_does_not_contain_secret() {
        let secret = SigningSecret::new(b"abcdabcdabcdabcd".to_vec());
        assert!(!secret_fingerprint(&secret).contains("abcdabcd"));
    }
}
