//! Session Token Codec
//!
//! The cookie value is `<session uuid>.<base64url HMAC-SHA256>`. The
//! signature proves the token was minted by this server; the session
//! row itself is the source of truth for validity.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use uuid::Uuid;

use crate::error::{AuthError, AuthResult};

type HmacSha256 = Hmac<Sha256>;

/// Sign a session ID into a cookie token.
pub fn sign(session_id: Uuid, secret: &[u8; 32]) -> String {
    let session_id = session_id.to_string();

    let mut mac =
        HmacSha256::new_from_slice(secret).expect("HMAC can take key of any size");
    mac.update(session_id.as_bytes());
    let signature = mac.finalize().into_bytes();

    format!("{}.{}", session_id, URL_SAFE_NO_PAD.encode(signature))
}

/// Verify a cookie token and extract the session ID.
///
/// Any malformed, tampered or unparsable token maps to
/// `AuthError::SessionInvalid`; callers never learn which check failed.
pub fn verify(token: &str, secret: &[u8; 32]) -> AuthResult<Uuid> {
    let (session_id_str, signature_b64) = token
        .split_once('.')
        .ok_or(AuthError::SessionInvalid)?;

    let mut mac =
        HmacSha256::new_from_slice(secret).expect("HMAC can take key of any size");
    mac.update(session_id_str.as_bytes());

    let signature = URL_SAFE_NO_PAD
        .decode(signature_b64)
        .map_err(|_| AuthError::SessionInvalid)?;

    mac.verify_slice(&signature)
        .map_err(|_| AuthError::SessionInvalid)?;

    session_id_str.parse().map_err(|_| AuthError::SessionInvalid)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: [u8; 32] = [7u8; 32];

    #[test]
    fn test_sign_verify_roundtrip() {
        let session_id = Uuid::new_v4();
        let token = sign(session_id, &SECRET);
        assert_eq!(verify(&token, &SECRET).unwrap(), session_id);
    }

    #[test]
    fn test_tampered_session_id_rejected() {
        let token = sign(Uuid::new_v4(), &SECRET);
        let other = Uuid::new_v4().to_string();
        let sig = token.split_once('.').unwrap().1;
        let forged = format!("{}.{}", other, sig);
        assert!(matches!(
            verify(&forged, &SECRET),
            Err(AuthError::SessionInvalid)
        ));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = sign(Uuid::new_v4(), &SECRET);
        let wrong = [8u8; 32];
        assert!(verify(&token, &wrong).is_err());
    }

    #[test]
    fn test_malformed_tokens_rejected() {
        assert!(verify("", &SECRET).is_err());
        assert!(verify("no-dot-here", &SECRET).is_err());
        assert!(verify("a.b.c", &SECRET).is_err());
        assert!(verify("not-a-uuid.!!!", &SECRET).is_err());
    }
}
