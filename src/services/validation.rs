//! Form-level validation rules for signup input.
//!
//! These gate the UI forms only; the signup and login flows themselves do
//! not re-check email or phone shape.

/// Special characters the password policy accepts.
const SPECIAL_CHARS: &str = "!@#$%^&*(),.?\":{}|<>";

pub const PASSWORD_TOO_SHORT: &str = "Password must be at least 8 characters long";
pub const PASSWORD_NO_UPPERCASE: &str = "Password must contain at least one uppercase letter";
pub const PASSWORD_NO_LOWERCASE: &str = "Password must contain at least one lowercase letter";
pub const PASSWORD_NO_DIGIT: &str = "Password must contain at least one number";
pub const PASSWORD_NO_SPECIAL: &str = "Password must contain at least one special character";

/// Collect every password-policy violation, one message per failed rule,
/// in fixed rule order. Rules do not short-circuit; an empty result means
/// the password is acceptable.
#[must_use]
pub fn validate_password(password: &str) -> Vec<&'static str> {
    let mut violations = Vec::new();
    if password.chars().count() < 8 {
        violations.push(PASSWORD_TOO_SHORT);
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        violations.push(PASSWORD_NO_UPPERCASE);
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        violations.push(PASSWORD_NO_LOWERCASE);
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        violations.push(PASSWORD_NO_DIGIT);
    }
    if !password.chars().any(|c| SPECIAL_CHARS.contains(c)) {
        violations.push(PASSWORD_NO_SPECIAL);
    }
    violations
}

/// Permissive email shape check: no whitespace anywhere, exactly one `@`
/// with a non-empty local part, and a domain containing a `.` with at least
/// one character on each side.
#[must_use]
pub fn validate_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    let chars: Vec<char> = domain.chars().collect();
    chars
        .iter()
        .enumerate()
        .any(|(i, c)| *c == '.' && i > 0 && i + 1 < chars.len())
}

/// Zimbabwe phone shape: after stripping whitespace, a `+263` or leading
/// `0` prefix followed by exactly nine digits. Digit count and prefixes
/// must stay fixed to remain compatible with already-stored numbers.
#[must_use]
pub fn validate_phone_number(phone: &str) -> bool {
    let stripped: String = phone.chars().filter(|c| !c.is_whitespace()).collect();
    let rest = if let Some(rest) = stripped.strip_prefix("+263") {
        rest
    } else if let Some(rest) = stripped.strip_prefix('0') {
        rest
    } else {
        return false;
    };
    rest.len() == 9 && rest.chars().all(|c| c.is_ascii_digit())
}

#[cfg(test)]
#[path = "validation_test.rs"]
mod tests;
