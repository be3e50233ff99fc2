// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Vaulter Contributors

//! RFC 6238 time-based one-time passwords.
//!
//! Standard parameters: HMAC-SHA1, 30-second step, 6 digits, and a ±1 step
//! tolerance window to absorb clock skew. A code stays accepted for the
//! whole step it belongs to; there is no replay protection within a step.
//! That limitation is inherited from the provisioning protocol and must
//! not be patched here without a protocol-level replay cache.

use std::time::{SystemTime, UNIX_EPOCH};

use data_encoding::BASE32_NOPAD;
use hmac::{Hmac, Mac};
use ring::rand::{SecureRandom, SystemRandom};
use sha1::Sha1;

/// Issuer embedded in provisioning URIs.
pub const ISSUER: &str = "Vaulter";

/// Time-step length in seconds.
pub const STEP_SECS: u64 = 30;

/// Number of code digits.
const DIGITS: u32 = 6;

/// Accepted clock-skew window, in steps, on each side of "now".
const SKEW_STEPS: i64 = 1;

/// Secret entropy in bytes (160 bits, above the 128-bit floor).
const SECRET_BYTES: usize = 20;

/// Errors from TOTP operations.
#[derive(Debug, thiserror::Error)]
pub enum TotpError {
    /// The stored secret does not decode as base32.
    #[error("OTP secret is not valid base32")]
    InvalidSecret,
    /// The system random generator failed.
    #[error("system random generator failed")]
    Rng,
}

/// Generate a fresh base32-encoded secret from the system CSPRNG.
pub fn generate_secret() -> Result<String, TotpError> {
    let mut bytes = [0u8; SECRET_BYTES];
    SystemRandom::new()
        .fill(&mut bytes)
        .map_err(|_| TotpError::Rng)?;
    Ok(BASE32_NOPAD.encode(&bytes))
}

/// Build the `otpauth://` URI an authenticator app enrolls from.
///
/// `label` must already be a sanitized account name; the secret and issuer
/// are query-encoded.
pub fn provisioning_uri(secret: &str, label: &str) -> String {
    let query = url::form_urlencoded::Serializer::new(String::new())
        .append_pair("secret", secret)
        .append_pair("issuer", ISSUER)
        .finish();
    format!("otpauth://totp/{ISSUER}:{label}?{query}")
}

/// Verify a submitted code against a secret at the current time.
pub fn verify(secret: &str, code: &str) -> Result<bool, TotpError> {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    verify_at(secret, code, now)
}

/// Verify a submitted code against a secret at an explicit unix time.
///
/// Accepts the code of the current step and of the steps `SKEW_STEPS`
/// before and after it.
pub(crate) fn verify_at(secret: &str, code: &str, unix_secs: u64) -> Result<bool, TotpError> {
    let submitted = code.trim();
    if submitted.len() != DIGITS as usize || !submitted.bytes().all(|b| b.is_ascii_digit()) {
        return Ok(false);
    }

    let key = decode_secret(secret)?;
    let step = (unix_secs / STEP_SECS) as i64;
    for offset in -SKEW_STEPS..=SKEW_STEPS {
        let counter = step + offset;
        if counter < 0 {
            continue;
        }
        if hotp(&key, counter as u64) == submitted {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Compute the code for a secret at an explicit unix time. Test hook for
/// driving the confirm/login flow deterministically.
pub(crate) fn code_at(secret: &str, unix_secs: u64) -> Result<String, TotpError> {
    let key = decode_secret(secret)?;
    Ok(hotp(&key, unix_secs / STEP_SECS))
}

fn decode_secret(secret: &str) -> Result<Vec<u8>, TotpError> {
    let normalized: String = secret
        .chars()
        .filter(|c| !c.is_ascii_whitespace() && *c != '=')
        .map(|c| c.to_ascii_uppercase())
        .collect();
    BASE32_NOPAD
        .decode(normalized.as_bytes())
        .map_err(|_| TotpError::InvalidSecret)
}

/// RFC 4226 HOTP with dynamic truncation, zero-padded to `DIGITS`.
fn hotp(key: &[u8], counter: u64) -> String {
    let mut mac = <Hmac<Sha1> as Mac>::new_from_slice(key)
        .unwrap_or_else(|_| unreachable!("HMAC accepts any key length"));
    mac.update(&counter.to_be_bytes());
    let digest = mac.finalize().into_bytes();

    let offset = (digest[digest.len() - 1] & 0x0f) as usize;
    let binary = ((u32::from(digest[offset]) & 0x7f) << 24)
        | (u32::from(digest[offset + 1]) << 16)
        | (u32::from(digest[offset + 2]) << 8)
        | u32::from(digest[offset + 3]);
    let code = binary % 10u32.pow(DIGITS);
    format!("{code:0width$}", width = DIGITS as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    // RFC 6238 appendix B secret: ASCII "12345678901234567890".
    const RFC_SECRET: &str = "GEZDGNBVGY3TQOJQGEZDGNBVGY3TQOJQ";

    #[test]
    fn rfc_6238_sha1_vectors() {
        assert_eq!(code_at(RFC_SECRET, 59).unwrap(), "287082");
        assert_eq!(code_at(RFC_SECRET, 1_111_111_109).unwrap(), "081804");
        assert_eq!(code_at(RFC_SECRET, 1_111_111_111).unwrap(), "050471");
        assert_eq!(code_at(RFC_SECRET, 1_234_567_890).unwrap(), "005924");
        assert_eq!(code_at(RFC_SECRET, 2_000_000_000).unwrap(), "279037");
    }

    #[test]
    fn current_step_code_verifies() {
        let t = 1_111_111_109;
        let code = code_at(RFC_SECRET, t).unwrap();
        assert!(verify_at(RFC_SECRET, &code, t).unwrap());
    }

    #[test]
    fn adjacent_steps_verify_but_stale_steps_do_not() {
        let t = 1_111_111_109;
        let previous = code_at(RFC_SECRET, t - STEP_SECS).unwrap();
        let next = code_at(RFC_SECRET, t + STEP_SECS).unwrap();
        let stale = code_at(RFC_SECRET, t - 3 * STEP_SECS).unwrap();

        assert!(verify_at(RFC_SECRET, &previous, t).unwrap());
        assert!(verify_at(RFC_SECRET, &next, t).unwrap());
        assert!(!verify_at(RFC_SECRET, &stale, t).unwrap());
    }

    #[test]
    fn code_from_other_secret_fails() {
        let other = generate_secret().unwrap();
        let t = 1_111_111_109;
        let code = code_at(&other, t).unwrap();
        assert!(!verify_at(RFC_SECRET, &code, t).unwrap());
    }

    #[test]
    fn malformed_codes_are_rejected_without_error() {
        let t = 1_111_111_109;
        assert!(!verify_at(RFC_SECRET, "12345", t).unwrap());
        assert!(!verify_at(RFC_SECRET, "1234567", t).unwrap());
        assert!(!verify_at(RFC_SECRET, "12a456", t).unwrap());
        assert!(!verify_at(RFC_SECRET, "", t).unwrap());
    }

    #[test]
    fn invalid_secret_is_an_error_not_a_mismatch() {
        let result = verify_at("not base32!!", "123456", 59);
        assert!(matches!(result, Err(TotpError::InvalidSecret)));
    }

    #[test]
    fn generated_secrets_are_base32_and_long_enough() {
        let secret = generate_secret().unwrap();
        // 20 bytes => 32 base32 chars, no padding.
        assert_eq!(secret.len(), 32);
        assert!(BASE32_NOPAD.decode(secret.as_bytes()).is_ok());

        // Two draws should never collide.
        assert_ne!(secret, generate_secret().unwrap());
    }

    #[test]
    fn provisioning_uri_embeds_issuer_label_and_secret() {
        let uri = provisioning_uri("JBSWY3DPEHPK3PXP", "alice");
        assert_eq!(
            uri,
            "otpauth://totp/Vaulter:alice?secret=JBSWY3DPEHPK3PXP&issuer=Vaulter"
        );
    }
}
