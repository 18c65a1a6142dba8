//! Redaction of sensitive data in RPC error strings
//!
//! Node rejections and transport failures can echo request bodies back, so
//! before an error string is stored we redact:
//! - URLs with embedded credentials (any protocol)
//! - Hex strings of 64+ characters (private keys, raw signed payloads)
//!
//! Addresses (40 hex chars) and short quantities are left untouched so balance
//! failures stay readable.

use regex::Regex;
use std::sync::LazyLock;

static URL_WITH_CREDENTIALS_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[a-z][a-z0-9+.-]*://[^:@\s]+:[^@\s]+@[^\s]+")
        .expect("Failed to create url regex pattern")
});

static LONG_HEX_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:0x)?[0-9a-fA-F]{64,}").expect("Failed to create hex regex pattern")
});

pub fn sanitize_message(message: &str) -> String {
    let result = URL_WITH_CREDENTIALS_PATTERN.replace_all(message, "[REDACTED_URL]");
    LONG_HEX_PATTERN.replace_all(&result, "[REDACTED_HEX]").to_string()
}

/// Formats an error and redacts it unless the `unsafe-debug` feature is on.
#[macro_export]
macro_rules! sanitize_error {
    ($error:expr) => {{
        #[cfg(feature = "unsafe-debug")]
        {
            format!("{}", $error)
        }
        #[cfg(not(feature = "unsafe-debug"))]
        {
            $crate::sanitize::sanitize_message(&format!("{}", $error))
        }
    }};
}
