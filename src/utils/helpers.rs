//! Helper functions and utilities
//!
//! This module contains common helper functions used throughout the application.

use chrono::Utc;
use regex::Regex;
use std::fmt::Write;
use std::sync::OnceLock;

const TICKET_SUFFIX_LENGTH: usize = 4;

/// Validate email format
pub fn is_valid_email(email: &str) -> bool {
    static EMAIL_RE: OnceLock<Regex> = OnceLock::new();
    let re = EMAIL_RE.get_or_init(|| {
        Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap_or_else(|_| Regex::new(r"@").unwrap())
    });
    re.is_match(email)
}

/// Validate phone number format (basic validation)
pub fn is_valid_phone(phone: &str) -> bool {
    phone.chars().all(|c| c.is_ascii_digit() || c == '+' || c == '-' || c == ' ')
        && phone.chars().filter(|c| c.is_ascii_digit()).count() >= 10
}

/// Generate a ticket number: the last four digits of the current unix
/// timestamp in milliseconds followed by four random uppercase
/// alphanumeric characters
pub fn generate_ticket_number() -> String {
    use rand::Rng;
    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

    let millis = Utc::now().timestamp_millis().to_string();
    let short_time = &millis[millis.len().saturating_sub(4)..];

    let mut rng = rand::thread_rng();
    let suffix: String = (0..TICKET_SUFFIX_LENGTH)
        .map(|_| {
            let idx = rng.gen_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect();

    format!("{}{}", short_time, suffix)
}

/// Generate a gateway receipt id: ten random bytes, hex encoded
pub fn generate_receipt_id() -> String {
    use rand::Rng;
    let bytes: [u8; 10] = rand::thread_rng().gen();
    encode_hex(&bytes)
}

/// Encode bytes as a lowercase hex string
pub fn encode_hex(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        let _ = write!(out, "{:02x}", byte);
    }
    out
}

/// Normalize whitespace in text
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_valid_email() {
        assert!(is_valid_email("student@college.edu"));
        assert!(is_valid_email("a.b@c.d.e"));
        assert!(!is_valid_email("no-at-sign"));
        assert!(!is_valid_email("spaces in@mail.com"));
        assert!(!is_valid_email("missing@tld"));
    }

    #[test]
    fn test_is_valid_phone() {
        assert!(is_valid_phone("9876543210"));
        assert!(is_valid_phone("+91 98765 43210"));
        assert!(!is_valid_phone("12345"));
        assert!(!is_valid_phone("98765abcde"));
    }

    #[test]
    fn test_generate_ticket_number_format() {
        let ticket = generate_ticket_number();
        assert_eq!(ticket.len(), 8);
        assert!(ticket[..4].chars().all(|c| c.is_ascii_digit()));
        assert!(ticket[4..]
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
    }

    #[test]
    fn test_generate_receipt_id_is_twenty_hex_chars() {
        let receipt = generate_receipt_id();
        assert_eq!(receipt.len(), 20);
        assert!(receipt.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_encode_hex() {
        assert_eq!(encode_hex(&[0x00, 0xff, 0x10]), "00ff10");
        assert_eq!(encode_hex(&[]), "");
    }

    #[test]
    fn test_normalize_whitespace() {
        assert_eq!(normalize_whitespace("  hello   world "), "hello world");
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn encode_hex_doubles_the_length(bytes in proptest::collection::vec(any::<u8>(), 0..64)) {
                let encoded = encode_hex(&bytes);
                prop_assert_eq!(encoded.len(), bytes.len() * 2);
                prop_assert!(encoded.chars().all(|c| c.is_ascii_hexdigit()));
            }

            #[test]
            fn ticket_numbers_keep_their_shape(_seed in any::<u8>()) {
                let ticket = generate_ticket_number();
                prop_assert_eq!(ticket.len(), 8);
                prop_assert!(ticket[..4].chars().all(|c| c.is_ascii_digit()));
                prop_assert!(ticket[4..].chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
            }

            #[test]
            fn normalize_whitespace_is_idempotent(text in ".{0,64}") {
                let once = normalize_whitespace(&text);
                prop_assert_eq!(normalize_whitespace(&once), once);
            }
        }
    }
}
