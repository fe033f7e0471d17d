//! Input validation rules.
//!
//! Pure-logic field rules applied at the transport boundary, before any
//! request reaches the store. Each rule failure produces a `{field,
//! message}` pair that the API layer ships as `error.details`.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::entry::{EntryPatch, NewEntry};

/// Opaque token shape shared by entry ids and pagination cursors.
static ID_TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("valid regex"));

static YEAR_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d{4}$").expect("valid regex"));

/// Earliest accepted production year.
pub const MIN_YEAR: i32 = 1800;

/// How far into the future a year may point (announced productions).
pub const MAX_YEAR_AHEAD: i32 = 10;

/// A single failed field rule.
#[derive(Debug, Clone, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Serialize field errors into the `error.details` payload.
pub fn details_json(errors: &[FieldError]) -> serde_json::Value {
    serde_json::json!({ "fields": errors })
}

/// Check an entry id token. Used for path ids.
pub fn validate_entry_id(id: &str) -> Result<(), FieldError> {
    if id.is_empty() {
        return Err(FieldError::new("id", "Entry ID is required"));
    }
    if !ID_TOKEN_RE.is_match(id) {
        return Err(FieldError::new("id", "Invalid entry ID format"));
    }
    Ok(())
}

/// Check a pagination cursor token. Same shape as an entry id.
pub fn validate_cursor(cursor: &str) -> Result<(), FieldError> {
    if !ID_TOKEN_RE.is_match(cursor) {
        return Err(FieldError::new("cursor", "Invalid cursor format"));
    }
    Ok(())
}

/// Validate a full create payload. Collects every failed rule.
pub fn validate_new_entry(input: &NewEntry) -> Result<(), Vec<FieldError>> {
    let mut errors = Vec::new();

    check_text(&mut errors, "title", &input.title, "Title", 255);
    check_text(&mut errors, "director", &input.director, "Director", 255);
    check_text(&mut errors, "budget", &input.budget, "Budget", 100);
    check_text(&mut errors, "location", &input.location, "Location", 255);
    check_text(&mut errors, "duration", &input.duration, "Duration", 50);
    check_year(&mut errors, &input.year);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validate a partial update payload.
///
/// Present fields obey the create rules; a patch with no fields at all is
/// rejected, since applying it would only bump `updatedAt`.
pub fn validate_entry_patch(patch: &EntryPatch) -> Result<(), Vec<FieldError>> {
    if patch.is_empty() {
        return Err(vec![FieldError::new(
            "body",
            "At least one field must be provided",
        )]);
    }

    let mut errors = Vec::new();

    if let Some(title) = &patch.title {
        check_text(&mut errors, "title", title, "Title", 255);
    }
    if let Some(director) = &patch.director {
        check_text(&mut errors, "director", director, "Director", 255);
    }
    if let Some(budget) = &patch.budget {
        check_text(&mut errors, "budget", budget, "Budget", 100);
    }
    if let Some(location) = &patch.location {
        check_text(&mut errors, "location", location, "Location", 255);
    }
    if let Some(duration) = &patch.duration {
        check_text(&mut errors, "duration", duration, "Duration", 50);
    }
    if let Some(year) = &patch.year {
        check_year(&mut errors, year);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_text(
    errors: &mut Vec<FieldError>,
    field: &'static str,
    value: &str,
    label: &str,
    max_len: usize,
) {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        errors.push(FieldError::new(field, format!("{label} is required")));
    } else if trimmed.chars().count() > max_len {
        errors.push(FieldError::new(
            field,
            format!("{label} must be less than {max_len} characters"),
        ));
    }
}

fn check_year(errors: &mut Vec<FieldError>, year: &str) {
    let year = year.trim();
    if year.is_empty() {
        errors.push(FieldError::new("year", "Year is required"));
        return;
    }
    if !YEAR_RE.is_match(year) {
        errors.push(FieldError::new("year", "Year must be a 4-digit number"));
        return;
    }

    // The regex guarantees four digits.
    let value: i32 = year.parse().expect("checked digits");
    let max_year = current_year() + MAX_YEAR_AHEAD;
    if value < MIN_YEAR || value > max_year {
        errors.push(FieldError::new(
            "year",
            format!("Year must be between {MIN_YEAR} and {MAX_YEAR_AHEAD} years in the future"),
        ));
    }
}

fn current_year() -> i32 {
    use chrono::Datelike;
    chrono::Utc::now().year()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::EntryType;

    fn valid_new_entry() -> NewEntry {
        NewEntry {
            title: "Heat".into(),
            entry_type: EntryType::Movie,
            director: "Michael Mann".into(),
            budget: "$60,000,000".into(),
            location: "Los Angeles".into(),
            duration: "170 min".into(),
            year: "1995".into(),
        }
    }

    #[test]
    fn accepts_valid_payload() {
        assert!(validate_new_entry(&valid_new_entry()).is_ok());
    }

    #[test]
    fn rejects_blank_required_fields() {
        let mut input = valid_new_entry();
        input.title = "   ".into();
        input.director = String::new();

        let errors = validate_new_entry(&input).unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["title", "director"]);
        assert_eq!(errors[0].message, "Title is required");
    }

    #[test]
    fn rejects_overlong_fields() {
        let mut input = valid_new_entry();
        input.duration = "x".repeat(51);

        let errors = validate_new_entry(&input).unwrap_err();
        assert_eq!(errors[0].field, "duration");
        assert!(errors[0].message.contains("50"));
    }

    #[test]
    fn rejects_non_numeric_year() {
        let mut input = valid_new_entry();
        input.year = "199X".into();

        let errors = validate_new_entry(&input).unwrap_err();
        assert_eq!(errors[0].field, "year");
        assert_eq!(errors[0].message, "Year must be a 4-digit number");
    }

    #[test]
    fn rejects_out_of_range_year() {
        for year in ["1799", "9999"] {
            let mut input = valid_new_entry();
            input.year = year.into();
            assert!(validate_new_entry(&input).is_err(), "year {year}");
        }
        // Boundary values stay valid.
        let mut input = valid_new_entry();
        input.year = "1800".into();
        assert!(validate_new_entry(&input).is_ok());
    }

    #[test]
    fn near_future_year_allowed() {
        use chrono::Datelike;
        let mut input = valid_new_entry();
        input.year = (chrono::Utc::now().year() + MAX_YEAR_AHEAD).to_string();
        assert!(validate_new_entry(&input).is_ok());
    }

    #[test]
    fn patch_with_no_fields_rejected() {
        let errors = validate_entry_patch(&EntryPatch::default()).unwrap_err();
        assert_eq!(errors[0].field, "body");
    }

    #[test]
    fn patch_checks_present_fields_only() {
        let patch = EntryPatch {
            year: Some("12".into()),
            ..Default::default()
        };
        let errors = validate_entry_patch(&patch).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "year");

        let patch = EntryPatch {
            title: Some("Ronin".into()),
            ..Default::default()
        };
        assert!(validate_entry_patch(&patch).is_ok());
    }

    #[test]
    fn id_token_shape() {
        assert!(validate_entry_id("0190cafe-babe-7000-8000-1234567890ab").is_ok());
        assert!(validate_entry_id("abc_DEF-123").is_ok());
        assert!(validate_entry_id("").is_err());
        assert!(validate_entry_id("has space").is_err());
        assert!(validate_entry_id("semi;colon").is_err());
    }

    #[test]
    fn cursor_token_shape() {
        assert!(validate_cursor("abc123").is_ok());
        assert!(validate_cursor("nope!").is_err());
    }
}
