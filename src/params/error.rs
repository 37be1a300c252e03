//! Parameter errors and the collected report returned when binding or
//! validation fails.

use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorKind {
    /// The value does not fit the declared parameter (type, whitelist, count).
    BindError,
    /// The value is well-typed but outside the accepted domain.
    RangeError,
}

/// One error, attributed to every field path it concerns
/// (e.g. `freq_ranges[2].freq_min`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParameterError {
    pub kind: ErrorKind,
    pub message: String,
    pub fields: Vec<String>,
}

impl ParameterError {
    pub fn bind(message: impl Into<String>, field: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::BindError,
            message: message.into(),
            fields: vec![field.into()],
        }
    }

    pub fn range(message: impl Into<String>, fields: Vec<String>) -> Self {
        Self {
            kind: ErrorKind::RangeError,
            message: message.into(),
            fields,
        }
    }
}

impl fmt::Display for ParameterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.fields.join(", "), self.message)
    }
}

/// Every error found in one pass. Never empty when returned as an error.
#[derive(Debug, Clone, PartialEq, Serialize, thiserror::Error)]
#[error("{count} parameter error(s):{details}", count = .errors.len(), details = render_lines(.errors))]
pub struct ValidationReport {
    pub errors: Vec<ParameterError>,
}

impl ValidationReport {
    /// Ok when nothing was collected.
    pub fn into_result(errors: Vec<ParameterError>) -> Result<(), ValidationReport> {
        if errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationReport { errors })
        }
    }

    /// Errors attributed to `field`.
    pub fn for_field<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a ParameterError> {
        self.errors
            .iter()
            .filter(move |e| e.fields.iter().any(|f| f == field))
    }
}

fn render_lines(errors: &[ParameterError]) -> String {
    errors.iter().map(|e| format!("\n  {e}")).collect()
}
