//! Small cryptographic helpers for admin authentication.

use rand::distributions::Alphanumeric;
use rand::Rng;

/// Length of generated signing secrets.
const GENERATED_SECRET_LEN: usize = 48;

/// Generate a random alphanumeric secret suitable as an HMAC key.
#[must_use]
pub fn generate_secret() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(GENERATED_SECRET_LEN)
        .map(char::from)
        .collect()
}

/// Constant-time string comparison.
///
/// Used when checking the submitted admin password so the comparison time
/// does not depend on how many leading bytes match.
#[must_use]
pub fn constant_time_eq(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut result = 0u8;
    for (x, y) in a.bytes().zip(b.bytes()) {
        result |= x ^ y;
    }
    result == 0
}
