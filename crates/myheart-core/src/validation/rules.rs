//! Field rules and schema checking.

use std::str::FromStr;

use chrono::{NaiveDate, NaiveTime};
use once_cell::sync::Lazy;
use regex::Regex;

use super::{FormInput, ValidationErrors};

/// Message for numeric inputs that do not parse.
pub const NOT_A_NUMBER: &str = "Expected a number";
/// Message for malformed dates.
pub const BAD_DATE: &str = "Invalid date, expected YYYY-MM-DD";
/// Message for malformed times.
pub const BAD_TIME: &str = "Invalid time, expected HH:MM";

/// Upper bound for integer fields stored as `u32`.
pub const U32_MAX: i64 = u32::MAX as i64;

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const TIME_FORMAT: &str = "%H:%M";

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9_'+\-.]*[A-Za-z0-9_+\-]@([A-Za-z0-9][A-Za-z0-9\-]*\.)+[A-Za-z]{2,}$")
        .expect("email pattern compiles")
});

/// Check the shape of an email address.
pub fn is_valid_email(value: &str) -> bool {
    !value.starts_with('.') && !value.contains("..") && EMAIL_RE.is_match(value)
}

/// Count the ASCII digits in a phone number, ignoring separators.
pub fn phone_digits(value: &str) -> usize {
    value.chars().filter(char::is_ascii_digit).count()
}

/// An enumerated field with a fixed set of literal values.
pub trait Choice: Sized + Copy + 'static {
    /// Every variant, in display order.
    const ALL: &'static [Self];

    /// The literal accepted on input and emitted on output.
    fn as_str(&self) -> &'static str;

    /// Parse an exact literal.
    fn parse(value: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.as_str() == value)
    }

    /// All accepted literals.
    fn literals() -> Vec<&'static str> {
        Self::ALL.iter().map(Choice::as_str).collect()
    }
}

/// The constraint applied to one form field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Rule {
    /// Required text of at least `min_len` characters (after trimming).
    Text { min_len: usize },
    /// Required calendar date.
    Date,
    /// Required time of day.
    Time,
    /// Required email address.
    Email,
    /// Required phone number with at least `min_digits` digits.
    Phone { min_digits: usize },
    /// Required whole number in `[min, max]`.
    Integer { min: i64, max: i64 },
    /// Required decimal number, at least `min`.
    Decimal { min: f64 },
    /// Required value from a literal set.
    Choice(&'static [&'static str]),
    /// Required id of a record in another store.
    Reference,
    /// Free text that may be left empty.
    Optional,
}

/// One row of an entity schema.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSpec {
    /// Form key, e.g. `firstName`.
    pub name: &'static str,
    pub rule: Rule,
    /// Message shown when the rule fails.
    pub message: &'static str,
}

impl FieldSpec {
    pub const fn new(name: &'static str, rule: Rule, message: &'static str) -> Self {
        Self {
            name,
            rule,
            message,
        }
    }

    pub fn is_required(&self) -> bool {
        !matches!(self.rule, Rule::Optional)
    }

    /// Check a single raw value against this field's rule.
    pub fn check(&self, raw: &str) -> Result<(), &'static str> {
        let value = raw.trim();
        match self.rule {
            Rule::Optional => Ok(()),
            Rule::Text { min_len } => {
                if value.chars().count() >= min_len && !value.is_empty() {
                    Ok(())
                } else {
                    Err(self.message)
                }
            }
            Rule::Date => {
                if value.is_empty() {
                    Err(self.message)
                } else if NaiveDate::parse_from_str(value, DATE_FORMAT).is_err() {
                    Err(BAD_DATE)
                } else {
                    Ok(())
                }
            }
            Rule::Time => {
                if value.is_empty() {
                    Err(self.message)
                } else if NaiveTime::parse_from_str(value, TIME_FORMAT).is_err() {
                    Err(BAD_TIME)
                } else {
                    Ok(())
                }
            }
            Rule::Email => {
                if is_valid_email(value) {
                    Ok(())
                } else {
                    Err(self.message)
                }
            }
            Rule::Phone { min_digits } => {
                if phone_digits(value) >= min_digits {
                    Ok(())
                } else {
                    Err(self.message)
                }
            }
            Rule::Integer { min, max } => match value.parse::<i64>() {
                Ok(n) if (min..=max).contains(&n) => Ok(()),
                Ok(_) => Err(self.message),
                Err(_) => Err(NOT_A_NUMBER),
            },
            Rule::Decimal { min } => match value.parse::<f64>() {
                Ok(n) if n.is_finite() && n >= min => Ok(()),
                Ok(n) if n.is_finite() => Err(self.message),
                _ => Err(NOT_A_NUMBER),
            },
            Rule::Choice(literals) => {
                if literals.contains(&value) {
                    Ok(())
                } else {
                    Err(self.message)
                }
            }
            Rule::Reference => match value.parse::<u64>() {
                Ok(n) if n > 0 => Ok(()),
                _ => Err(self.message),
            },
        }
    }
}

/// A static, declarative rule set for one entity.
#[derive(Debug, Clone, Copy)]
pub struct Schema {
    fields: &'static [FieldSpec],
}

impl Schema {
    pub const fn new(fields: &'static [FieldSpec]) -> Self {
        Self { fields }
    }

    pub fn fields(&self) -> &'static [FieldSpec] {
        self.fields
    }

    pub fn field(&self, name: &str) -> Option<&'static FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Check every field independently and collect all failures.
    pub fn check<'a>(&self, input: &'a FormInput) -> Result<ValidatedForm<'a>, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        for field in self.fields {
            if let Err(message) = field.check(input.get(field.name)) {
                errors.add(field.name, message);
            }
        }
        errors.into_result()?;
        Ok(ValidatedForm { input })
    }
}

/// A form that passed its schema; exposes typed accessors.
#[derive(Debug, Clone, Copy)]
pub struct ValidatedForm<'a> {
    input: &'a FormInput,
}

impl<'a> ValidatedForm<'a> {
    /// Trimmed text value.
    pub fn text(&self, name: &str) -> String {
        self.input.get(name).trim().to_string()
    }

    /// Trimmed text, or `None` when left empty.
    pub fn optional(&self, name: &str) -> Option<String> {
        let value = self.input.get(name).trim();
        if value.is_empty() {
            None
        } else {
            Some(value.to_string())
        }
    }

    /// Parse a value into any `FromStr` type.
    pub fn parse<T: FromStr>(&self, name: &str) -> Result<T, ValidationErrors> {
        self.input
            .get(name)
            .trim()
            .parse()
            .map_err(|_| ValidationErrors::single(name, NOT_A_NUMBER))
    }

    /// Parse an enumerated value.
    pub fn choice<C: Choice>(&self, name: &str) -> Result<C, ValidationErrors> {
        C::parse(self.input.get(name).trim()).ok_or_else(|| {
            ValidationErrors::single(
                name,
                format!("Expected one of: {}", C::literals().join(", ")),
            )
        })
    }
}
