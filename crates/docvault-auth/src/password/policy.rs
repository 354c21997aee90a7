//! Password composition policy.

use docvault_core::config::auth::AuthConfig;

/// Composition rules a password must satisfy before it is hashed.
///
/// A password passes when it is at least `min_length` characters long
/// and contains a digit, a lowercase letter, an uppercase letter and a
/// symbol. A symbol is any character that is neither alphanumeric nor
/// whitespace. Length counts characters, not bytes.
#[derive(Debug, Clone)]
pub struct PasswordPolicy {
    min_length: usize,
}

impl PasswordPolicy {
    /// Build the policy from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            min_length: config.password_min_length,
        }
    }

    /// Check whether a candidate password satisfies the policy.
    pub fn validate(&self, password: &str) -> bool {
        if password.chars().count() < self.min_length {
            return false;
        }

        let mut has_digit = false;
        let mut has_lower = false;
        let mut has_upper = false;
        let mut has_symbol = false;

        for c in password.chars() {
            if !has_digit && c.is_numeric() {
                has_digit = true;
            } else if !has_lower && c.is_lowercase() {
                has_lower = true;
            } else if !has_upper && c.is_uppercase() {
                has_upper = true;
            } else if !has_symbol && !c.is_alphanumeric() && !c.is_whitespace() {
                has_symbol = true;
            }
        }

        has_digit && has_lower && has_upper && has_symbol
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy() -> PasswordPolicy {
        PasswordPolicy::new(&AuthConfig::default())
    }

    #[test]
    fn test_accepts_all_four_classes() {
        assert!(policy().validate("Abcd123!"));
    }

    #[test]
    fn test_rejects_too_short() {
        assert!(!policy().validate("Ab1!"));
    }

    #[test]
    fn test_rejects_missing_class() {
        let p = policy();
        assert!(!p.validate("abcd123!")); // no uppercase
        assert!(!p.validate("ABCD123!")); // no lowercase
        assert!(!p.validate("Abcdefg!")); // no digit
        assert!(!p.validate("Abcd1234")); // no symbol
    }

    #[test]
    fn test_whitespace_is_not_a_symbol() {
        assert!(!policy().validate("Abcd 1234"));
    }

    #[test]
    fn test_non_ascii_digits_satisfy_the_digit_class() {
        // Arabic-Indic one is numeric even though it is not an ASCII digit.
        assert!(policy().validate("Abcdefg١!"));
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        // Seven multibyte chars plus one of each required class is
        // still only length-checked per character.
        assert!(policy().validate("äöüßA1!x"));
    }
}
