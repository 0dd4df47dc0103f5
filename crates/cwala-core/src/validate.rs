//! Field validation shared by the forms and the CLI.
//!
//! Each check returns `Err` with a short message suitable for inline
//! display under a form field.

/// Minimum password length accepted by the server.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Length of one-time codes.
pub const OTP_LEN: usize = 4;

/// Phone numbers are national format, digits only.
pub const PHONE_LEN: usize = 10;

/// Checks an email address: needs a user part, an `@`, and a dotted domain.
///
/// # Errors
/// Returns an error if the operation fails.
pub fn email(value: &str) -> Result<(), &'static str> {
    let value = value.trim();
    if value.is_empty() {
        return Err("Email is required");
    }
    if value.contains(char::is_whitespace) {
        return Err("Email must not contain spaces");
    }
    let Some((user, domain)) = value.split_once('@') else {
        return Err("Enter a valid email address");
    };
    if user.is_empty() || domain.is_empty() || !domain.contains('.') {
        return Err("Enter a valid email address");
    }
    Ok(())
}

/// Checks a password against the server's minimum length.
///
/// # Errors
/// Returns an error if the operation fails.
pub fn password(value: &str) -> Result<(), &'static str> {
    if value.is_empty() {
        return Err("Password is required");
    }
    if value.len() < MIN_PASSWORD_LEN {
        return Err("Password must be at least 6 characters");
    }
    Ok(())
}

/// Checks a phone number: exactly ten digits.
///
/// # Errors
/// Returns an error if the operation fails.
pub fn phone(value: &str) -> Result<(), &'static str> {
    let value = value.trim();
    if value.is_empty() {
        return Err("Phone number is required");
    }
    if value.len() != PHONE_LEN || !value.chars().all(|c| c.is_ascii_digit()) {
        return Err("Phone number must be 10 digits");
    }
    Ok(())
}

/// Checks a display name: non-empty after trimming.
///
/// # Errors
/// Returns an error if the operation fails.
pub fn name(value: &str) -> Result<(), &'static str> {
    if value.trim().is_empty() {
        return Err("Name is required");
    }
    Ok(())
}

/// Checks a one-time code: exactly four digits.
///
/// # Errors
/// Returns an error if the operation fails.
pub fn otp(value: &str) -> Result<(), &'static str> {
    if value.len() != OTP_LEN || !value.chars().all(|c| c.is_ascii_digit()) {
        return Err("Enter the 4-digit code");
    }
    Ok(())
}
