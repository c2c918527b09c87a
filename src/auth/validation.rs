//! Field validators shared by the login and password reset forms.

use regex::Regex;

/// Hint rendered under the new password field.
pub const PASSWORD_HINT: &str =
    "Please use 8 to 16 characters, including letters, numbers, and special characters.";

/// Basic email format check, used per field by the input layer.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").is_ok_and(|re| re.is_match(email.trim()))
}

/// Password format: 8 to 16 printable ASCII characters with at least one
/// letter, one digit and one special (punctuation) character.
#[must_use]
pub fn is_valid_password(password: &str) -> bool {
    // the regex crate has no look-ahead, so each class is checked on its own
    let shape = Regex::new(r"^[[:graph:]]{8,16}$").is_ok_and(|re| re.is_match(password));

    shape
        && Regex::new(r"[A-Za-z]").is_ok_and(|re| re.is_match(password))
        && Regex::new(r"[0-9]").is_ok_and(|re| re.is_match(password))
        && Regex::new(r"[[:punct:]]").is_ok_and(|re| re.is_match(password))
}
