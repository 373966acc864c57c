//! Field validation helpers for inbound HTTP adapters.
//!
//! Handlers accept loosely typed request bodies and validate every field,
//! collecting all failures so the client sees the complete list at once.

use std::fmt::Display;

use chrono::NaiveDate;
use serde_json::Value;

use crate::domain::{Error, FieldViolation};

/// Wire name of a request field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    pub(crate) fn as_str(self) -> &'static str {
        self.0
    }
}

/// Accumulates field violations while a request is being validated.
#[derive(Debug, Default)]
pub(crate) struct Violations(Vec<FieldViolation>);

impl Violations {
    /// Validate a required string field with `parse`.
    ///
    /// Records a violation and returns `None` when the field is absent or
    /// rejected; the rejected text is echoed back as the violation value.
    pub(crate) fn field<T, E, F>(&mut self, name: FieldName, raw: Option<String>, parse: F) -> Option<T>
    where
        F: FnOnce(&str) -> Result<T, E>,
        E: Display,
    {
        let Some(raw) = raw else {
            self.0.push(FieldViolation::new(
                name.as_str(),
                format!("{} is required", name.as_str()),
                Value::Null,
            ));
            return None;
        };
        match parse(&raw) {
            Ok(value) => Some(value),
            Err(err) => {
                self.0
                    .push(FieldViolation::new(name.as_str(), err.to_string(), Value::String(raw)));
                None
            }
        }
    }

    /// Return `parsed` when nothing was rejected.
    pub(crate) fn finish<T>(self, parsed: Option<T>) -> Result<T, Error> {
        match parsed {
            Some(value) if self.0.is_empty() => Ok(value),
            _ => Err(Error::validation(self.0)),
        }
    }
}

/// Parse an ISO calendar date (`YYYY-MM-DD`).
pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| "date must be formatted as YYYY-MM-DD".to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DiaryTitle, ErrorKind};
    use rstest::rstest;
    use serde_json::json;

    const TITLE: FieldName = FieldName::new("title");
    const DATE: FieldName = FieldName::new("date");

    #[rstest]
    fn all_failures_are_collected_in_order() {
        let mut violations = Violations::default();
        let title = violations.field(TITLE, Some("  ".to_owned()), |raw| DiaryTitle::new(raw));
        let date = violations.field(DATE, None, parse_date);

        let err = violations
            .finish(title.zip(date))
            .expect_err("two violations");
        assert_eq!(err.kind(), ErrorKind::Validation);
        let fields: Vec<_> = err
            .validations()
            .iter()
            .map(|v| (v.field(), v.value().clone()))
            .collect();
        assert_eq!(fields, vec![("title", json!("  ")), ("date", Value::Null)]);
    }

    #[rstest]
    fn clean_input_passes_through() {
        let mut violations = Violations::default();
        let date = violations.field(DATE, Some("2024-03-24".to_owned()), parse_date);
        let parsed = violations.finish(date).expect("valid");
        assert_eq!(parsed, NaiveDate::from_ymd_opt(2024, 3, 24).expect("date"));
    }

    #[rstest]
    #[case("2024-02-30")]
    #[case("24/03/2024")]
    #[case("")]
    fn malformed_dates_are_rejected(#[case] raw: &str) {
        assert!(parse_date(raw).is_err());
    }
}
