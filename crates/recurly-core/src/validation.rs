use crate::ValidationError;

/// Largest unit amount Recurly accepts, in cents.
pub const MAX_UNIT_AMOUNT_IN_CENTS: i64 = 10_000_000;
pub const MAX_CODE_LEN: usize = 50;
pub const MAX_NAME_LEN: usize = 255;
pub const MAX_ACCOUNTING_CODE_LEN: usize = 20;

/// Normalize a currency code to 3 uppercase ASCII letters.
pub fn validate_currency_code(input: &str) -> Result<String, ValidationError> {
    let normalized = input.trim().to_ascii_uppercase();
    let is_valid = normalized.len() == 3 && normalized.chars().all(|ch| ch.is_ascii_alphabetic());

    if !is_valid {
        return Err(ValidationError::InvalidCurrency {
            value: input.to_owned(),
        });
    }

    Ok(normalized)
}

pub(crate) fn require(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required { field });
    }
    Ok(())
}

pub(crate) fn max_len(field: &'static str, value: &str, max: usize) -> Result<(), ValidationError> {
    let len = value.chars().count();
    if len > max {
        return Err(ValidationError::TooLong { field, len, max });
    }
    Ok(())
}

/// Plan, add-on and accounting codes: lowercase letters, digits and `@-_.`.
pub(crate) fn lower_code(field: &'static str, value: &str, max: usize) -> Result<(), ValidationError> {
    code_chars(field, value, max, |ch| {
        ch.is_ascii_lowercase() || ch.is_ascii_digit() || matches!(ch, '@' | '-' | '_' | '.')
    })
}

/// Coupon codes additionally allow uppercase letters.
pub(crate) fn mixed_case_code(field: &'static str, value: &str, max: usize) -> Result<(), ValidationError> {
    code_chars(field, value, max, |ch| {
        ch.is_ascii_alphanumeric() || matches!(ch, '@' | '-' | '_' | '.')
    })
}

fn code_chars<F>(field: &'static str, value: &str, max: usize, allowed: F) -> Result<(), ValidationError>
where
    F: Fn(char) -> bool,
{
    if value.is_empty() {
        return Err(ValidationError::Required { field });
    }
    max_len(field, value, max)?;
    if let Some((index, ch)) = value.chars().enumerate().find(|(_, ch)| !allowed(*ch)) {
        return Err(ValidationError::InvalidChar { field, ch, index });
    }
    Ok(())
}

pub(crate) fn unit_amount(field: &'static str, cents: i64) -> Result<(), ValidationError> {
    if cents.unsigned_abs() > MAX_UNIT_AMOUNT_IN_CENTS.unsigned_abs() {
        return Err(ValidationError::OutOfRange {
            field,
            value: cents,
            reason: "magnitude must not exceed 10,000,000 cents",
        });
    }
    Ok(())
}

pub(crate) fn at_least_one(field: &'static str, value: i64) -> Result<(), ValidationError> {
    if value < 1 {
        return Err(ValidationError::OutOfRange {
            field,
            value,
            reason: "must be at least 1",
        });
    }
    Ok(())
}
