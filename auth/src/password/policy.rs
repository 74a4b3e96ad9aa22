use std::fmt;

/// Characters accepted by the special-character rule.
pub const SPECIAL_CHARACTERS: &str = "!@#$%^&*";

/// A single password composition rule that was not met.
///
/// Variants are declared in the order they are reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyViolation {
    TooShort,
    MissingUppercase,
    MissingLowercase,
    MissingDigit,
    MissingSpecialCharacter,
}

impl fmt::Display for PolicyViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            PolicyViolation::TooShort => "Password must be at least 8 characters long",
            PolicyViolation::MissingUppercase => {
                "Password must contain at least one uppercase letter"
            }
            PolicyViolation::MissingLowercase => {
                "Password must contain at least one lowercase letter"
            }
            PolicyViolation::MissingDigit => "Password must contain at least one number",
            PolicyViolation::MissingSpecialCharacter => {
                "Password must contain at least one special character (!@#$%^&*)"
            }
        };
        f.write_str(message)
    }
}

/// Outcome of checking a candidate password.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordValidation {
    pub valid: bool,
    pub errors: Vec<PolicyViolation>,
}

impl PasswordValidation {
    /// Violation messages in reporting order.
    pub fn messages(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }
}

/// Password composition rules.
///
/// Every rule is evaluated, so a single call reports all violations at once.
#[derive(Debug, Clone, Copy, Default)]
pub struct PasswordPolicy;

impl PasswordPolicy {
    pub const MIN_LENGTH: usize = 8;

    pub fn new() -> Self {
        Self
    }

    /// Validate a candidate password.
    ///
    /// # Arguments
    /// * `password` - Plaintext candidate
    ///
    /// # Returns
    /// PasswordValidation listing every violated rule in fixed order
    pub fn validate(&self, password: &str) -> PasswordValidation {
        let mut errors = Vec::new();

        if password.chars().count() < Self::MIN_LENGTH {
            errors.push(PolicyViolation::TooShort);
        }
        if !password.chars().any(|c| c.is_ascii_uppercase()) {
            errors.push(PolicyViolation::MissingUppercase);
        }
        if !password.chars().any(|c| c.is_ascii_lowercase()) {
            errors.push(PolicyViolation::MissingLowercase);
        }
        if !password.chars().any(|c| c.is_ascii_digit()) {
            errors.push(PolicyViolation::MissingDigit);
        }
        if !password.chars().any(|c| SPECIAL_CHARACTERS.contains(c)) {
            errors.push(PolicyViolation::MissingSpecialCharacter);
        }

        PasswordValidation {
            valid: errors.is_empty(),
            errors,
        }
    }
}
