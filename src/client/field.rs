use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

use crate::error::{ClientError, Result};

/// Phone format: `+<1-3 digits>-<3 digits>-<3 digits>-<4 digits>`
pub const PHONE_PATTERN: &str = r"^\+\d{1,3}-\d{3}-\d{3}-\d{4}$";

static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(PHONE_PATTERN).expect("phone pattern is a valid regex"));

/// Letter categories (Lu, Ll, Lt, Lm, Lo) and plain spaces only
static LETTERS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\p{L} ]*$").expect("letters pattern is a valid regex"));

/// The five client attributes, in record order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Surname,
    Name,
    Patronymic,
    Address,
    Phone,
}

impl Field {
    pub const ALL: [Field; 5] = [
        Field::Surname,
        Field::Name,
        Field::Patronymic,
        Field::Address,
        Field::Phone,
    ];

    /// Key used in JSON and TOML records
    pub fn as_str(self) -> &'static str {
        match self {
            Field::Surname => "surname",
            Field::Name => "name",
            Field::Patronymic => "patronymic",
            Field::Address => "address",
            Field::Phone => "phone",
        }
    }

    /// Human-readable label used in the multi-line rendering
    pub fn label(self) -> &'static str {
        match self {
            Field::Surname => "Surname",
            Field::Name => "Name",
            Field::Patronymic => "Patronymic",
            Field::Address => "Address",
            Field::Phone => "Phone",
        }
    }

    pub fn rules(self) -> FieldRules<'static> {
        match self {
            Field::Surname | Field::Name => FieldRules {
                required: true,
                letters_only: true,
                pattern: None,
            },
            Field::Patronymic => FieldRules {
                required: false,
                letters_only: true,
                pattern: None,
            },
            Field::Address => FieldRules {
                required: true,
                letters_only: false,
                pattern: None,
            },
            Field::Phone => FieldRules {
                required: true,
                letters_only: false,
                pattern: Some(&*PHONE_RE),
            },
        }
    }

    /// Run this field's rules against `value`, handing it back untouched on success
    pub fn validate(self, value: String) -> Result<String> {
        validate_field(&value, self, &self.rules())?;
        Ok(value)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Constraints applied to a single textual value
#[derive(Debug, Clone, Copy)]
pub struct FieldRules<'a> {
    pub required: bool,
    pub letters_only: bool,
    pub pattern: Option<&'a Regex>,
}

/// Check `value` against `rules`, reporting failures against `field`.
///
/// Checks run in order: emptiness (on the trimmed value), letters-only
/// (spaces ignored), then the pattern, which must match at the start of the
/// value. The value itself is never trimmed or normalized.
pub fn validate_field(value: &str, field: Field, rules: &FieldRules<'_>) -> Result<()> {
    if rules.required && value.trim().is_empty() {
        return Err(ClientError::EmptyField(field));
    }

    if rules.letters_only && !LETTERS_RE.is_match(value) {
        return Err(ClientError::NonLetterContent(field));
    }

    if let Some(pattern) = rules.pattern {
        let matched_at_start = pattern.find(value).is_some_and(|m| m.start() == 0);
        if !matched_at_start {
            return Err(ClientError::PatternMismatch {
                field,
                pattern: pattern.as_str().to_string(),
            });
        }
    }

    Ok(())
}
