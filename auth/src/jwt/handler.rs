use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::errors::JwtError;

/// Signs and checks session tokens with a shared secret (HS256).
///
/// The handler only deals with the signature and the shape of the payload.
/// Expiry is judged by the caller against its own clock, see
/// [`crate::Authenticator::verify_token`].
pub struct JwtHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtHandler {
    /// Create a handler for the given secret.
    ///
    /// Rotating the secret invalidates every token signed with the old one.
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        }
    }

    /// Sign the claims into a compact JWT.
    ///
    /// # Errors
    /// * `SigningFailed` - Serialization or signing failed
    pub fn encode(&self, claims: &Claims) -> Result<String, JwtError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(|e| JwtError::SigningFailed(e.to_string()))
    }

    /// Check the signature and decode the claims.
    ///
    /// # Errors
    /// * `InvalidToken` - Malformed token, wrong algorithm, bad signature or missing claims
    pub fn decode(&self, token: &str) -> Result<Claims, JwtError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| JwtError::InvalidToken(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use chrono::Utc;

    use super::*;

    const SECRET: &[u8] = b"my_secret_key_at_least_32_bytes_long!";

    fn sample_claims() -> Claims {
        Claims::for_user(7, "alice", Utc::now(), Duration::hours(1))
    }

    #[test]
    fn test_encode_and_decode() {
        let handler = JwtHandler::new(SECRET);
        let claims = sample_claims();

        let token = handler.encode(&claims).expect("Failed to encode token");
        assert_eq!(token.split('.').count(), 3);

        let decoded = handler.decode(&token).expect("Failed to decode token");
        assert_eq!(decoded, claims);
    }

    #[test]
    fn test_decode_garbage() {
        let handler = JwtHandler::new(SECRET);

        assert!(matches!(
            handler.decode("invalid.token.here"),
            Err(JwtError::InvalidToken(_))
        ));
        assert!(handler.decode("").is_err());
    }

    #[test]
    fn test_decode_with_wrong_secret() {
        let signer = JwtHandler::new(b"secret1_at_least_32_bytes_long_key!");
        let verifier = JwtHandler::new(b"secret2_at_least_32_bytes_long_key!");

        let token = signer.encode(&sample_claims()).unwrap();

        assert!(verifier.decode(&token).is_err());
    }

    #[test]
    fn test_any_tampered_character_is_rejected() {
        let handler = JwtHandler::new(SECRET);
        let token = handler.encode(&sample_claims()).unwrap();

        for (i, c) in token.char_indices() {
            if c == '.' {
                continue;
            }
            let replacement = if c == 'A' { 'B' } else { 'A' };
            let mut tampered = token.clone();
            tampered.replace_range(i..i + 1, &replacement.to_string());

            assert!(
                handler.decode(&tampered).is_err(),
                "tampering at position {} was accepted",
                i
            );
        }
    }

    #[test]
    fn test_decode_does_not_judge_expiry() {
        let handler = JwtHandler::new(SECRET);
        let long_ago = Utc::now() - Duration::days(30);
        let claims = Claims::for_user(1, "old", long_ago, Duration::hours(1));

        let token = handler.encode(&claims).unwrap();

        assert_eq!(handler.decode(&token).unwrap(), claims);
    }
}
