/// Input validation utilities
use once_cell::sync::Lazy;
use regex::Regex;

// Compile regex patterns once at startup. These patterns are hardcoded
// and always valid, so expect() carries an explicit reason.
static USERNAME_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9_-]{3,32}$")
        .expect("hardcoded username regex is invalid - fix source code")
});

static PHONE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\+?[0-9][0-9\-\s]{5,13}[0-9]$")
        .expect("hardcoded phone regex is invalid - fix source code")
});

/// Validate username format (3-32 characters, alphanumeric with - and _)
pub fn validate_username(username: &str) -> bool {
    USERNAME_REGEX.is_match(username)
}

/// Validate phone number shape (digits with optional +, - and spaces).
/// Empty is allowed: profiles start out blank at signup.
pub fn validate_phone(phone: &str) -> bool {
    phone.is_empty() || PHONE_REGEX.is_match(phone)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_username() {
        assert!(validate_username("john_doe"));
        assert!(validate_username("user-123"));
        assert!(validate_username("abc"));
    }

    #[test]
    fn test_invalid_username() {
        assert!(!validate_username("ab"));
        assert!(!validate_username("has space"));
        assert!(!validate_username("way@too@odd"));
        assert!(!validate_username(&"x".repeat(33)));
    }

    #[test]
    fn test_valid_phone() {
        assert!(validate_phone("555-1000"));
        assert!(validate_phone("+49 170 1234567"));
        assert!(validate_phone("0401234567"));
        assert!(validate_phone(""));
    }

    #[test]
    fn test_invalid_phone() {
        assert!(!validate_phone("abc"));
        assert!(!validate_phone("12"));
        assert!(!validate_phone("123456789012345678"));
    }
}
