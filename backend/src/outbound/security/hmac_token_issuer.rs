//! HS256 JSON Web Token adapter built on `hmac` and `sha2`.
//!
//! Tokens use the compact `header.payload.signature` form with unpadded
//! URL-safe base64 segments, so they interoperate with standard JWT tooling.

use std::sync::Arc;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::Duration;
use hmac::{Hmac, Mac};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use zeroize::Zeroizing;

use crate::domain::ports::{TokenError, TokenIssuer};
use crate::domain::{DonorId, Email, TokenClaims};

type HmacSha256 = Hmac<Sha256>;

const ALGORITHM: &str = "HS256";
const TOKEN_TYPE: &str = "JWT";

/// Default token lifetime.
pub const DEFAULT_TOKEN_TTL_HOURS: i64 = 24;

#[derive(Debug, Serialize, Deserialize)]
struct Header {
    alg: String,
    typ: Option<String>,
}

/// Signs and verifies HS256 bearer tokens with a shared secret.
pub struct HmacTokenIssuer {
    secret: Zeroizing<Vec<u8>>,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl HmacTokenIssuer {
    /// Create an issuer signing with `secret` and stamping `ttl` expiries.
    pub fn new(secret: impl Into<Vec<u8>>, ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            secret: Zeroizing::new(secret.into()),
            ttl,
            clock,
        }
    }

    fn mac(&self) -> Result<HmacSha256, TokenError> {
        HmacSha256::new_from_slice(&self.secret).map_err(|err| TokenError::signing(err.to_string()))
    }
}

fn encode_segment<T: Serialize>(value: &T) -> Result<String, TokenError> {
    let bytes = serde_json::to_vec(value).map_err(|err| TokenError::signing(err.to_string()))?;
    Ok(URL_SAFE_NO_PAD.encode(bytes))
}

fn decode_segment<T: for<'de> Deserialize<'de>>(segment: &str) -> Result<T, TokenError> {
    let bytes = URL_SAFE_NO_PAD
        .decode(segment)
        .map_err(|err| TokenError::malformed(err.to_string()))?;
    serde_json::from_slice(&bytes).map_err(|err| TokenError::malformed(err.to_string()))
}

impl TokenIssuer for HmacTokenIssuer {
    fn issue(&self, donor: DonorId, email: &Email) -> Result<String, TokenError> {
        let issued_at = self.clock.utc();
        let claims = TokenClaims {
            id: donor.get(),
            email: email.to_string(),
            iat: issued_at.timestamp(),
            exp: (issued_at + self.ttl).timestamp(),
        };
        let header = Header {
            alg: ALGORITHM.to_owned(),
            typ: Some(TOKEN_TYPE.to_owned()),
        };
        let signing_input = format!("{}.{}", encode_segment(&header)?, encode_segment(&claims)?);

        let mut mac = self.mac()?;
        mac.update(signing_input.as_bytes());
        let signature = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());
        Ok(format!("{signing_input}.{signature}"))
    }

    fn verify(&self, token: &str) -> Result<TokenClaims, TokenError> {
        let mut parts = token.split('.');
        let (Some(header_part), Some(claims_part), Some(signature_part), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(TokenError::malformed("expected three dot-separated segments"));
        };

        let header: Header = decode_segment(header_part)?;
        if header.alg != ALGORITHM {
            return Err(TokenError::malformed(format!(
                "unsupported algorithm {}",
                header.alg
            )));
        }

        let signature = URL_SAFE_NO_PAD
            .decode(signature_part)
            .map_err(|err| TokenError::malformed(err.to_string()))?;
        let mut mac = self.mac()?;
        mac.update(header_part.as_bytes());
        mac.update(b".");
        mac.update(claims_part.as_bytes());
        mac.verify_slice(&signature)
            .map_err(|_| TokenError::bad_signature())?;

        let claims: TokenClaims = decode_segment(claims_part)?;
        if claims.is_expired_at(self.clock.utc().timestamp()) {
            return Err(TokenError::expired());
        }
        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};
    use mockable::DefaultClock;
    use rstest::{fixture, rstest};

    struct FixtureClock(DateTime<Utc>);

    impl Clock for FixtureClock {
        fn local(&self) -> DateTime<chrono::Local> {
            self.0.with_timezone(&chrono::Local)
        }

        fn utc(&self) -> DateTime<Utc> {
            self.0
        }
    }

    fn at(seconds: i64) -> Arc<dyn Clock> {
        let instant = DateTime::from_timestamp(seconds, 0).expect("valid timestamp");
        Arc::new(FixtureClock(instant))
    }

    const ISSUED_AT: i64 = 1_767_225_600;

    #[fixture]
    fn issuer() -> HmacTokenIssuer {
        HmacTokenIssuer::new(b"test-secret".to_vec(), Duration::hours(24), at(ISSUED_AT))
    }

    #[fixture]
    fn email() -> Email {
        Email::new("priya@gmail.com").expect("valid email")
    }

    #[rstest]
    fn issued_token_verifies_with_claims(issuer: HmacTokenIssuer, email: Email) {
        let token = issuer.issue(DonorId::new(7), &email).expect("issues");
        assert_eq!(token.split('.').count(), 3);

        let claims = issuer.verify(&token).expect("verifies");
        assert_eq!(claims.donor_id(), DonorId::new(7));
        assert_eq!(claims.email, "priya@gmail.com");
        assert_eq!(claims.iat, ISSUED_AT);
        assert_eq!(claims.exp, ISSUED_AT + 24 * 60 * 60);
    }

    #[rstest]
    fn header_declares_hs256(issuer: HmacTokenIssuer, email: Email) {
        let token = issuer.issue(DonorId::new(1), &email).expect("issues");
        let header_part = token.split('.').next().expect("header segment");
        let header: Header = decode_segment(header_part).expect("decodes");
        assert_eq!(header.alg, "HS256");
        assert_eq!(header.typ.as_deref(), Some("JWT"));
    }

    #[rstest]
    fn token_from_another_secret_is_rejected(issuer: HmacTokenIssuer, email: Email) {
        let other = HmacTokenIssuer::new(b"other-secret".to_vec(), Duration::hours(24), at(ISSUED_AT));
        let token = other.issue(DonorId::new(1), &email).expect("issues");
        assert_eq!(issuer.verify(&token), Err(TokenError::BadSignature));
    }

    #[rstest]
    fn tampered_claims_are_rejected(issuer: HmacTokenIssuer, email: Email) {
        let token = issuer.issue(DonorId::new(1), &email).expect("issues");
        let mut parts: Vec<&str> = token.split('.').collect();
        let forged = encode_segment(&TokenClaims {
            id: 2,
            email: "priya@gmail.com".to_owned(),
            iat: ISSUED_AT,
            exp: ISSUED_AT + 10,
        })
        .expect("encodes");
        parts[1] = &forged;
        assert_eq!(issuer.verify(&parts.join(".")), Err(TokenError::BadSignature));
    }

    #[rstest]
    fn expired_token_is_rejected(issuer: HmacTokenIssuer, email: Email) {
        let token = issuer.issue(DonorId::new(1), &email).expect("issues");
        let later = HmacTokenIssuer::new(
            b"test-secret".to_vec(),
            Duration::hours(24),
            at(ISSUED_AT + 24 * 60 * 60),
        );
        assert_eq!(later.verify(&token), Err(TokenError::Expired));
    }

    #[rstest]
    #[case("")]
    #[case("not-a-token")]
    #[case("a.b")]
    #[case("a.b.c.d")]
    #[case("!!!.???.###")]
    fn malformed_tokens_are_rejected(issuer: HmacTokenIssuer, #[case] token: &str) {
        assert!(matches!(issuer.verify(token), Err(TokenError::Malformed { .. })));
    }

    #[rstest]
    fn works_with_the_system_clock(email: Email) {
        let issuer = HmacTokenIssuer::new(b"s".to_vec(), Duration::hours(1), Arc::new(DefaultClock));
        let token = issuer.issue(DonorId::new(3), &email).expect("issues");
        assert!(issuer.verify(&token).is_ok());
    }
}
