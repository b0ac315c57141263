//! Helpers shared by the submitted forms

use std::{borrow::Cow, collections::BTreeMap};

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use validator::{ValidationError, ValidationErrors};

/// Date format accepted by every date field
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Key for errors that belong to the whole form
pub const NON_FIELD_ERRORS: &str = "__all__";

/// A form submitted as a JSON object
pub trait SubmittedForm: DeserializeOwned + Default {
    /// Every field of the form, in declaration order
    const FIELDS: &'static [&'static str];
}

/// Result of cleaning a submitted form against the store
#[derive(Debug)]
pub enum FormOutcome<T> {
    /// The form was valid and the record was written
    Saved(T),
    /// Field-level errors; nothing was written
    Invalid(ValidationErrors),
}

/// Record a field-level error
pub fn add_error(
    errors: &mut ValidationErrors,
    field: &'static str,
    code: &'static str,
    message: impl Into<Cow<'static, str>>,
) {
    let mut error = ValidationError::new(code);
    error.message = Some(message.into());
    errors.add(field, error);
}

/// Parse an optional date field. Blank means "no date".
pub fn parse_optional_date(
    errors: &mut ValidationErrors,
    field: &'static str,
    raw: Option<&str>,
) -> Option<NaiveDate> {
    let raw = raw.map(str::trim).filter(|s| !s.is_empty())?;
    match NaiveDate::parse_from_str(raw, DATE_FORMAT) {
        Ok(date) => Some(date),
        Err(_) => {
            add_error(errors, field, "invalid", "Enter a valid date.");
            None
        }
    }
}

/// Parse a date field that must be present
pub fn parse_required_date(
    errors: &mut ValidationErrors,
    field: &'static str,
    raw: Option<&str>,
) -> Option<NaiveDate> {
    if raw.map(str::trim).filter(|s| !s.is_empty()).is_none() {
        add_error(errors, field, "required", "This field is required.");
        return None;
    }
    parse_optional_date(errors, field, raw)
}

/// Start from the derive-based checks of a form
pub fn derived_errors(result: Result<(), ValidationErrors>) -> ValidationErrors {
    result.err().unwrap_or_else(ValidationErrors::new)
}

pub fn has_errors(errors: &ValidationErrors) -> bool {
    !errors.errors().is_empty()
}

/// Decode a submitted form. A field whose value has the wrong type is
/// reported against that field and left empty in the returned form.
pub fn decode<F: SubmittedForm>(body: &[u8]) -> Result<F, (F, ValidationErrors)> {
    let mut errors = ValidationErrors::new();

    let value = if body.iter().all(u8::is_ascii_whitespace) {
        Value::Object(Map::new())
    } else {
        serde_json::from_slice::<Value>(body).unwrap_or(Value::Null)
    };
    let Value::Object(mut fields) = value else {
        add_error(
            &mut errors,
            NON_FIELD_ERRORS,
            "invalid",
            "Submit the form as a JSON object.",
        );
        return Err((F::default(), errors));
    };

    if let Ok(form) = serde_json::from_value::<F>(Value::Object(fields.clone())) {
        return Ok(form);
    }

    for &name in F::FIELDS {
        let Some(raw) = fields.get(name) else {
            continue;
        };
        let mut alone = Map::new();
        alone.insert(name.to_string(), raw.clone());
        if serde_json::from_value::<F>(Value::Object(alone)).is_err() {
            fields.remove(name);
            add_error(&mut errors, name, "invalid", "Enter a valid value.");
        }
    }

    if !has_errors(&errors) {
        add_error(&mut errors, NON_FIELD_ERRORS, "invalid", "Enter valid values.");
    }
    let form = serde_json::from_value::<F>(Value::Object(fields)).unwrap_or_default();
    Err((form, errors))
}

/// Flatten field errors to their display messages, keyed by field name
pub fn field_messages(errors: &ValidationErrors) -> BTreeMap<String, Vec<String>> {
    errors
        .field_errors()
        .into_iter()
        .map(|(field, list)| {
            let messages = list
                .iter()
                .map(|error| match &error.message {
                    Some(message) => message.to_string(),
                    None => error.code.to_string(),
                })
                .collect();
            (field.to_string(), messages)
        })
        .collect()
}
