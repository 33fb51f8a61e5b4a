//! # Credential Comparison
//!
//! Passwords are held as given (hashing is out of scope for the mock
//! backend) but every comparison goes through a constant-time check.

use subtle::ConstantTimeEq;

/// Constant-time comparison of two byte slices
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    a.ct_eq(b).into()
}

/// Constant-time comparison of two strings
pub fn constant_time_str_eq(a: &str, b: &str) -> bool {
    constant_time_eq(a.as_bytes(), b.as_bytes())
}

/// Check a presented password against the stored one.
///
/// A user without a stored password (created by a credential-less
/// signup) accepts any password.
pub fn password_matches(stored: Option<&str>, presented: &str) -> bool {
    match stored {
        Some(stored) => constant_time_str_eq(stored, presented),
        None => true,
    }
}
