//! HS256 JSON Web Token adapter implementing both token ports.
//!
//! Expiry is checked against the injected clock rather than inside
//! `jsonwebtoken`, so the half-open validity window `[iat, exp)` is exact and
//! testable.

use std::sync::Arc;

use chrono::{DateTime, SubsecRound, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use mockable::Clock;
use serde::{Deserialize, Serialize};

use crate::domain::ports::{TokenError, TokenIssuer, TokenVerifier};
use crate::domain::{AccessToken, EmailAddress, IdentityClaims, UserId};

/// Registered and private claims carried in the token body.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    email: String,
    iat: i64,
    exp: i64,
}

/// Token issuer and verifier sharing one process-wide secret.
#[derive(Clone)]
pub struct JwtTokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    clock: Arc<dyn Clock>,
}

impl JwtTokenService {
    /// Build the service from raw secret bytes.
    pub fn new(secret: &[u8], clock: Arc<dyn Clock>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.validate_exp = false;
        validation.set_required_spec_claims(&["exp", "sub"]);
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
            clock,
        }
    }
}

fn timestamp(seconds: i64, claim: &str) -> Result<DateTime<Utc>, TokenError> {
    DateTime::from_timestamp(seconds, 0)
        .ok_or_else(|| TokenError::invalid(format!("{claim} is out of range")))
}

impl TokenIssuer for JwtTokenService {
    fn issue(&self, subject: &UserId, email: &EmailAddress) -> Result<AccessToken, TokenError> {
        let now = self.clock.utc().trunc_subsecs(0);
        let identity = IdentityClaims::issue(subject.clone(), email.clone(), now);
        let claims = Claims {
            sub: subject.to_string(),
            email: email.to_string(),
            iat: identity.issued_at().timestamp(),
            exp: identity.expires_at().timestamp(),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map(AccessToken::new)
            .map_err(|err| TokenError::encoding(err.to_string()))
    }
}

impl TokenVerifier for JwtTokenService {
    fn verify(&self, token: &str) -> Result<IdentityClaims, TokenError> {
        let claims = decode::<Claims>(token, &self.decoding, &self.validation)
            .map_err(|err| TokenError::invalid(err.to_string()))?
            .claims;

        let subject =
            UserId::new(&claims.sub).map_err(|err| TokenError::invalid(err.to_string()))?;
        let email =
            EmailAddress::new(claims.email).map_err(|err| TokenError::invalid(err.to_string()))?;
        let identity = IdentityClaims::from_parts(
            subject,
            email,
            timestamp(claims.iat, "iat")?,
            timestamp(claims.exp, "exp")?,
        );

        if !identity.is_valid_at(self.clock.utc()) {
            return Err(TokenError::expired());
        }
        Ok(identity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TOKEN_LIFETIME;
    use crate::test_support::MutableClock;
    use chrono::TimeZone;
    use rstest::{fixture, rstest};

    const SECRET: &[u8] = b"an-adequately-long-test-signing-secret";

    fn issued_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 2, 3, 4, 5, 6)
            .single()
            .expect("valid fixture timestamp")
    }

    #[fixture]
    fn clock() -> Arc<MutableClock> {
        Arc::new(MutableClock::new(issued_at()))
    }

    fn identity() -> (UserId, EmailAddress) {
        (
            UserId::random(),
            EmailAddress::new("a@x.com").expect("email"),
        )
    }

    #[rstest]
    fn issued_token_round_trips(clock: Arc<MutableClock>) {
        let service = JwtTokenService::new(SECRET, clock);
        let (id, email) = identity();

        let token = service.issue(&id, &email).expect("issue");
        let claims = service.verify(token.as_str()).expect("verify");

        assert_eq!(claims.subject(), &id);
        assert_eq!(claims.email(), &email);
        assert_eq!(claims.issued_at(), issued_at());
        assert_eq!(claims.expires_at(), issued_at() + TOKEN_LIFETIME);
    }

    #[rstest]
    #[case(TOKEN_LIFETIME.num_seconds() - 1, true)]
    #[case(TOKEN_LIFETIME.num_seconds(), false)]
    #[case(TOKEN_LIFETIME.num_seconds() + 60, false)]
    fn expiry_instant_is_exclusive(
        clock: Arc<MutableClock>,
        #[case] elapsed: i64,
        #[case] accepted: bool,
    ) {
        let service = JwtTokenService::new(SECRET, Arc::clone(&clock) as Arc<dyn Clock>);
        let (id, email) = identity();
        let token = service.issue(&id, &email).expect("issue");

        clock.advance_seconds(elapsed);
        let result = service.verify(token.as_str());

        assert_eq!(result.is_ok(), accepted);
        if !accepted {
            assert_eq!(result.expect_err("expired"), TokenError::Expired);
        }
    }

    #[rstest]
    fn token_from_another_secret_is_invalid(clock: Arc<MutableClock>) {
        let issuer = JwtTokenService::new(b"some-other-secret-entirely-000000", clock.clone());
        let verifier = JwtTokenService::new(SECRET, clock);
        let (id, email) = identity();
        let token = issuer.issue(&id, &email).expect("issue");

        assert!(matches!(
            verifier.verify(token.as_str()),
            Err(TokenError::Invalid { .. })
        ));
    }

    #[rstest]
    #[case("")]
    #[case("not.a.token")]
    #[case("eyJhbGciOiJIUzI1NiJ9.e30.c2lnbmF0dXJl")]
    fn malformed_tokens_are_invalid(clock: Arc<MutableClock>, #[case] raw: &str) {
        let service = JwtTokenService::new(SECRET, clock);
        assert!(matches!(
            service.verify(raw),
            Err(TokenError::Invalid { .. })
        ));
    }
}
