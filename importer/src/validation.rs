//! Key and value rules shared by the single-add form and bulk import.

use client::types::NewVariable;
use regex::Regex;
use std::sync::LazyLock;

pub const MAX_KEY_LENGTH: usize = 255;
pub const MAX_VALUE_LENGTH: usize = 10_000;

static KEY_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z][A-Z0-9_]*$").expect("key pattern compiles"));

/// Substrings that flag a key as holding a secret. Matched against the uppercased key.
pub const SENSITIVE_KEYWORDS: &[&str] = &[
    "SECRET",
    "PASSWORD",
    "PASSWD",
    "TOKEN",
    "KEY",
    "AUTH",
    "CREDENTIAL",
    "PRIVATE",
    "JWT",
    "API_KEY",
    "CERT",
    "SALT",
    // vendors whose variables are credentials more often than not
    "STRIPE",
    "AWS",
    "GITHUB",
    "SENDGRID",
    "TWILIO",
    "OPENAI",
];

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    #[error("Key is required")]
    KeyRequired,
    #[error("Key must be at most {max} characters")]
    KeyTooLong { max: usize },
    #[error("Invalid key format")]
    InvalidKeyFormat,
    #[error("Value is required")]
    ValueRequired,
    #[error("Value must be at most {max} characters")]
    ValueTooLong { max: usize },
}

/// Optional length caps. `None` means only the format rules apply.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Limits {
    pub max_key_length: Option<usize>,
    pub max_value_length: Option<usize>,
}

impl Limits {
    /// Bulk import: the key pattern is the only constraint.
    pub const fn bulk() -> Self {
        Limits {
            max_key_length: None,
            max_value_length: None,
        }
    }

    /// Single-add form.
    pub const fn single() -> Self {
        Limits {
            max_key_length: Some(MAX_KEY_LENGTH),
            max_value_length: Some(MAX_VALUE_LENGTH),
        }
    }
}

pub fn normalize_key(raw: &str) -> String {
    raw.trim().to_ascii_uppercase()
}

/// Checks an already normalized key against the key pattern.
pub fn is_valid_key(key: &str) -> bool {
    KEY_PATTERN.is_match(key)
}

pub fn is_sensitive(key: &str) -> bool {
    let key = key.to_ascii_uppercase();
    SENSITIVE_KEYWORDS.iter().any(|keyword| key.contains(keyword))
}

/// Returns the normalized key when it passes every rule.
pub fn validate_key(raw: &str, limits: &Limits) -> Result<String, FieldError> {
    let key = normalize_key(raw);

    if key.is_empty() {
        return Err(FieldError::KeyRequired);
    }

    if let Some(max) = limits.max_key_length
        && key.chars().count() > max
    {
        return Err(FieldError::KeyTooLong { max });
    }

    if !is_valid_key(&key) {
        return Err(FieldError::InvalidKeyFormat);
    }

    Ok(key)
}

pub fn validate_value(value: &str, limits: &Limits) -> Result<(), FieldError> {
    if value.is_empty() {
        return Err(FieldError::ValueRequired);
    }

    if let Some(max) = limits.max_value_length
        && value.chars().count() > max
    {
        return Err(FieldError::ValueTooLong { max });
    }

    Ok(())
}

/// Validates the single-add form and builds the create payload.
pub fn validate_single(key: &str, value: &str) -> Result<NewVariable, FieldError> {
    let limits = Limits::single();
    let key = validate_key(key, &limits)?;
    validate_value(value, &limits)?;

    Ok(NewVariable {
        sensitive: is_sensitive(&key),
        key,
        value: value.to_string(),
    })
}
