pub mod health;
pub use self::health::health;

pub mod login;
pub use self::login::login;

// common functions for the handlers
use regex::Regex;

/// Strip separators (dashes, spaces) from a DNI or phone number.
#[must_use]
pub fn normalize_digits(input: &str) -> String {
    input.chars().filter(char::is_ascii_digit).collect()
}

/// DNI: exactly 13 digits once separators are stripped.
#[must_use]
pub fn valid_dni(dni: &str) -> bool {
    Regex::new(r"^\d{13}$").map_or(false, |re| re.is_match(dni))
}

/// Phone: exactly 8 digits once separators are stripped.
#[must_use]
pub fn valid_phone(phone: &str) -> bool {
    Regex::new(r"^\d{8}$").map_or(false, |re| re.is_match(phone))
}
