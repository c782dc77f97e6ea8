use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::errors::TokenError;

/// Codec for compact signed claim tokens.
///
/// Generic over the claim type so services can define their own payload.
/// Uses HS256 (HMAC with SHA-256) with a server-held symmetric secret.
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
}

impl TokenCodec {
    /// Create a new codec with a secret key.
    ///
    /// # Arguments
    /// * `secret` - Secret key for signing tokens (should be stored securely)
    ///
    /// # Returns
    /// TokenCodec instance configured with HS256
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Store secrets in environment variables or secure vaults, never in code
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
        }
    }

    /// Serialize and sign a claim into a compact token string.
    ///
    /// # Arguments
    /// * `claim` - Claim to sign (must implement Serialize)
    ///
    /// # Returns
    /// Signed token string
    ///
    /// # Errors
    /// * `SigningFailed` - Claim serialization or signing failed
    pub fn sign<T: Serialize>(&self, claim: &T) -> Result<String, TokenError> {
        let header = Header::new(self.algorithm);

        encode(&header, claim, &self.encoding_key)
            .map_err(|e| TokenError::SigningFailed(e.to_string()))
    }

    /// Verify a token's signature and deserialize its claim.
    ///
    /// # Arguments
    /// * `token` - Signed token string
    ///
    /// # Returns
    /// The verified claim
    ///
    /// # Errors
    /// * `InvalidSignature` - Token was tampered with or signed elsewhere
    /// * `Malformed` - Token is not parseable as a signed claim
    pub fn verify<T: DeserializeOwned>(&self, token: &str) -> Result<T, TokenError> {
        let validation = self.validation();

        let token_data =
            decode::<T>(token, &self.decoding_key, &validation).map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                _ => TokenError::Malformed,
            })?;

        Ok(token_data.claims)
    }

    /// Decode a token's claim without verifying its signature.
    ///
    /// # Arguments
    /// * `token` - Token string to decode
    ///
    /// # Returns
    /// Decoded claim without signature verification
    ///
    /// # Errors
    /// * `Malformed` - Token format is invalid
    ///
    /// # Security Warning
    /// This does NOT validate the token signature. Only use for:
    /// - Debugging/logging purposes
    /// - Extracting claims before full validation
    /// - Never trust claims from this method for authorization decisions
    pub fn decode_unverified<T: DeserializeOwned>(&self, token: &str) -> Result<T, TokenError> {
        let mut validation = self.validation();
        validation.insecure_disable_signature_validation();

        let token_data = decode::<T>(token, &self.decoding_key, &validation)
            .map_err(|_| TokenError::Malformed)?;

        Ok(token_data.claims)
    }

    fn validation(&self) -> Validation {
        let mut validation = Validation::new(self.algorithm);
        // Claims carry an issued-at timestamp, not an expiry
        validation.required_spec_claims.clear();
        validation.validate_exp = false;
        validation
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct TestClaim {
        role: String,
        iat: i64,
    }

    fn claim() -> TestClaim {
        TestClaim {
            role: "staff".to_string(),
            iat: 1_700_000_000,
        }
    }

    #[test]
    fn test_sign_and_verify() {
        let codec = TokenCodec::new(b"my_secret_key_at_least_32_bytes_long!");

        let token = codec.sign(&claim()).expect("Failed to sign claim");
        assert!(!token.is_empty());

        let verified: TestClaim = codec.verify(&token).expect("Failed to verify token");
        assert_eq!(verified, claim());
    }

    #[test]
    fn test_verify_malformed_token() {
        let codec = TokenCodec::new(b"my_secret_key_at_least_32_bytes_long!");

        let result = codec.verify::<TestClaim>("not.a.token");
        assert!(matches!(result, Err(TokenError::Malformed)));
    }

    #[test]
    fn test_verify_with_wrong_secret() {
        let codec1 = TokenCodec::new(b"secret1_at_least_32_bytes_long_key!");
        let codec2 = TokenCodec::new(b"secret2_at_least_32_bytes_long_key!");

        let token = codec1.sign(&claim()).expect("Failed to sign claim");

        let result = codec2.verify::<TestClaim>(&token);
        assert!(matches!(result, Err(TokenError::InvalidSignature)));
    }

    #[test]
    fn test_verify_rejects_single_byte_tamper() {
        let codec = TokenCodec::new(b"my_secret_key_at_least_32_bytes_long!");

        let token = codec.sign(&claim()).expect("Failed to sign claim");

        // Flip one character of the payload segment
        let payload_start = token.find('.').unwrap() + 1;
        let mut bytes = token.into_bytes();
        bytes[payload_start] = if bytes[payload_start] == b'A' { b'B' } else { b'A' };
        let tampered = String::from_utf8(bytes).unwrap();

        let result = codec.verify::<TestClaim>(&tampered);
        assert!(result.is_err());
    }

    #[test]
    fn test_decode_unverified() {
        let codec1 = TokenCodec::new(b"secret1_at_least_32_bytes_long_key!");
        let codec2 = TokenCodec::new(b"secret2_at_least_32_bytes_long_key!");

        let token = codec1.sign(&claim()).expect("Failed to sign claim");

        // Decode without verification works even with a different secret
        let decoded: TestClaim = codec2
            .decode_unverified(&token)
            .expect("Failed to decode unverified");
        assert_eq!(decoded.role, "staff");
    }
}
