//! Write-path validation for movie payloads.
//!
//! Validators take an arbitrary JSON value and produce either a normalized
//! value (unknown fields stripped, defaults applied) or a list of
//! field-level violations, one per violated field/constraint. The input is
//! never mutated, and the result is deliberately a tagged value rather than
//! an error type: a rejected payload is an ordinary outcome, not a fault.
//!
//! [`validate_movie`] enforces every field for creation;
//! [`validate_partial_movie`] treats each field as individually optional but
//! applies the same per-field constraints to whatever is present. Partial
//! validation intentionally never enforces required-ness, and a
//! client-supplied `id` field is stripped along with all other unknown keys.

use serde::Serialize;
use serde_json::{Map, Value};
use url::Url;

use crate::movie::{Genre, MovieDraft, MoviePatch};

/// Earliest accepted release year.
pub const YEAR_MIN: i64 = 1900;
/// Latest accepted release year.
pub const YEAR_MAX: i64 = 2024;
/// Lowest accepted rating.
pub const RATE_MIN: f64 = 0.0;
/// Highest accepted rating.
pub const RATE_MAX: f64 = 10.0;

/// One violated field/constraint, surfaced verbatim to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    /// The payload field that failed.
    pub field: String,
    /// Human-readable description of the failed constraint.
    pub message: String,
}

impl FieldViolation {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// Validates a full creation payload.
///
/// Every field is required except `rate`, which defaults to 0. Unknown
/// fields are stripped.
///
/// # Errors
///
/// Returns one [`FieldViolation`] per violated field.
pub fn validate_movie(payload: &Value) -> Result<MovieDraft, Vec<FieldViolation>> {
    let object = require_object(payload)?;

    match (
        require(title(object), "title"),
        require(year(object), "year"),
        require(duration(object), "duration"),
        rate(object).map(|rate| rate.unwrap_or(RATE_MIN)),
        require(poster(object), "poster"),
        require(genre(object), "genre"),
    ) {
        (Ok(title), Ok(year), Ok(duration), Ok(rate), Ok(poster), Ok(genre)) => Ok(MovieDraft {
            title,
            year,
            duration,
            rate,
            poster,
            genre,
        }),
        (title, year, duration, rate, poster, genre) => Err([
            title.err(),
            year.err(),
            duration.err(),
            rate.err(),
            poster.err(),
            genre.err(),
        ]
        .into_iter()
        .flatten()
        .collect()),
    }
}

/// Validates a partial update payload.
///
/// Fields that are absent stay absent in the resulting patch; fields that
/// are present must satisfy their own constraint. No defaults are applied.
///
/// # Errors
///
/// Returns one [`FieldViolation`] per violated field.
pub fn validate_partial_movie(payload: &Value) -> Result<MoviePatch, Vec<FieldViolation>> {
    let object = require_object(payload)?;

    match (
        title(object),
        year(object),
        duration(object),
        rate(object),
        poster(object),
        genre(object),
    ) {
        (Ok(title), Ok(year), Ok(duration), Ok(rate), Ok(poster), Ok(genre)) => Ok(MoviePatch {
            title,
            year,
            duration,
            rate,
            poster,
            genre,
        }),
        (title, year, duration, rate, poster, genre) => Err([
            title.err(),
            year.err(),
            duration.err(),
            rate.err(),
            poster.err(),
            genre.err(),
        ]
        .into_iter()
        .flatten()
        .collect()),
    }
}

fn require_object(payload: &Value) -> Result<&Map<String, Value>, Vec<FieldViolation>> {
    payload
        .as_object()
        .ok_or_else(|| vec![FieldViolation::new("body", "payload must be a JSON object")])
}

fn require<T>(
    value: Result<Option<T>, FieldViolation>,
    field: &str,
) -> Result<T, FieldViolation> {
    value?.ok_or_else(|| FieldViolation::new(field, format!("{field} is required")))
}

fn title(object: &Map<String, Value>) -> Result<Option<String>, FieldViolation> {
    let Some(value) = object.get("title") else {
        return Ok(None);
    };
    value
        .as_str()
        .filter(|title| !title.trim().is_empty())
        .map(|title| Some(title.to_string()))
        .ok_or_else(|| FieldViolation::new("title", "title must be a non-empty string"))
}

fn year(object: &Map<String, Value>) -> Result<Option<i32>, FieldViolation> {
    let Some(value) = object.get("year") else {
        return Ok(None);
    };
    let Some(year) = value.as_i64() else {
        return Err(FieldViolation::new("year", "year must be an integer"));
    };
    if !(YEAR_MIN..=YEAR_MAX).contains(&year) {
        return Err(FieldViolation::new(
            "year",
            format!("year must be between {YEAR_MIN} and {YEAR_MAX}"),
        ));
    }
    i32::try_from(year).map(Some).map_err(|_| {
        FieldViolation::new(
            "year",
            format!("year must be between {YEAR_MIN} and {YEAR_MAX}"),
        )
    })
}

fn duration(object: &Map<String, Value>) -> Result<Option<u32>, FieldViolation> {
    let Some(value) = object.get("duration") else {
        return Ok(None);
    };
    value
        .as_i64()
        .filter(|minutes| *minutes >= 1)
        .and_then(|minutes| u32::try_from(minutes).ok())
        .map(Some)
        .ok_or_else(|| FieldViolation::new("duration", "duration must be a positive integer"))
}

fn rate(object: &Map<String, Value>) -> Result<Option<f64>, FieldViolation> {
    let Some(value) = object.get("rate") else {
        return Ok(None);
    };
    value
        .as_f64()
        .filter(|rate| (RATE_MIN..=RATE_MAX).contains(rate))
        .map(Some)
        .ok_or_else(|| {
            FieldViolation::new(
                "rate",
                format!("rate must be a number between {RATE_MIN} and {RATE_MAX}"),
            )
        })
}

fn poster(object: &Map<String, Value>) -> Result<Option<String>, FieldViolation> {
    let Some(value) = object.get("poster") else {
        return Ok(None);
    };
    value
        .as_str()
        .filter(|poster| Url::parse(poster).is_ok())
        .map(|poster| Some(poster.to_string()))
        .ok_or_else(|| FieldViolation::new("poster", "poster must be a valid URL"))
}

fn genre(object: &Map<String, Value>) -> Result<Option<Vec<Genre>>, FieldViolation> {
    let Some(value) = object.get("genre") else {
        return Ok(None);
    };
    let Some(entries) = value.as_array() else {
        return Err(genre_shape_violation());
    };
    if entries.is_empty() {
        return Err(genre_shape_violation());
    }

    let mut genres = Vec::with_capacity(entries.len());
    for entry in entries {
        let Some(name) = entry.as_str() else {
            return Err(genre_shape_violation());
        };
        let Some(genre) = Genre::from_name(name) else {
            return Err(FieldViolation::new("genre", format!("unknown genre: {name}")));
        };
        genres.push(genre);
    }
    Ok(Some(genres))
}

fn genre_shape_violation() -> FieldViolation {
    FieldViolation::new("genre", "genre must be a non-empty array of genre names")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn full_payload() -> Value {
        json!({
            "title": "Alien",
            "year": 1979,
            "duration": 117,
            "rate": 8.5,
            "poster": "https://images.example.com/alien.jpg",
            "genre": ["Horror", "Sci-Fi"],
        })
    }

    #[test]
    fn accepts_a_complete_payload() {
        let draft = validate_movie(&full_payload()).expect("valid payload");
        assert_eq!(draft.title, "Alien");
        assert_eq!(draft.year, 1979);
        assert_eq!(draft.duration, 117);
        assert!((draft.rate - 8.5).abs() < f64::EPSILON);
        assert_eq!(draft.genre, vec![Genre::Horror, Genre::SciFi]);
    }

    #[test]
    fn strips_unknown_fields_and_defaults_rate() {
        let mut payload = full_payload();
        let object = payload.as_object_mut().expect("object");
        object.remove("rate");
        object.insert("director".to_string(), json!("Ridley Scott"));
        object.insert("id".to_string(), json!("client-chosen"));

        let draft = validate_movie(&payload).expect("valid payload");
        assert!((draft.rate - RATE_MIN).abs() < f64::EPSILON);
    }

    #[test]
    fn reports_one_violation_per_missing_field() {
        let violations = validate_movie(&json!({})).unwrap_err();
        let fields: Vec<&str> = violations.iter().map(|v| v.field.as_str()).collect();
        assert_eq!(
            fields,
            vec!["title", "year", "duration", "poster", "genre"]
        );
    }

    #[test]
    fn rejects_out_of_range_fields() {
        let payload = json!({
            "title": "   ",
            "year": 1899,
            "duration": 0,
            "rate": 10.5,
            "poster": "not a url",
            "genre": [],
        });
        let violations = validate_movie(&payload).unwrap_err();
        let fields: Vec<&str> = violations.iter().map(|v| v.field.as_str()).collect();
        assert_eq!(
            fields,
            vec!["title", "year", "duration", "rate", "poster", "genre"]
        );
    }

    #[test]
    fn rejects_fractional_year() {
        let mut payload = full_payload();
        payload["year"] = json!(1999.5);
        let violations = validate_movie(&payload).unwrap_err();
        assert_eq!(violations[0].field, "year");
        assert_eq!(violations[0].message, "year must be an integer");
    }

    #[test]
    fn rejects_unknown_genre_by_name() {
        let mut payload = full_payload();
        payload["genre"] = json!(["Horror", "Musical"]);
        let violations = validate_movie(&payload).unwrap_err();
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].field, "genre");
        assert_eq!(violations[0].message, "unknown genre: Musical");
    }

    #[test]
    fn genre_names_are_case_sensitive_on_the_write_path() {
        let mut payload = full_payload();
        payload["genre"] = json!(["horror"]);
        let violations = validate_movie(&payload).unwrap_err();
        assert_eq!(violations[0].field, "genre");
    }

    #[test]
    fn rejects_non_object_payloads() {
        let violations = validate_movie(&json!(["not", "an", "object"])).unwrap_err();
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].field, "body");
    }

    #[test]
    fn partial_accepts_an_empty_object() {
        let patch = validate_partial_movie(&json!({})).expect("empty patch");
        assert_eq!(patch, MoviePatch::default());
    }

    #[test]
    fn partial_keeps_only_present_fields() {
        let patch = validate_partial_movie(&json!({ "rate": 9.5 })).expect("rate patch");
        assert_eq!(patch.rate, Some(9.5));
        assert_eq!(patch.title, None);
        assert_eq!(patch.genre, None);
    }

    #[test]
    fn partial_still_enforces_field_constraints() {
        let violations = validate_partial_movie(&json!({ "rate": 11 })).unwrap_err();
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].field, "rate");
    }

    #[test]
    fn partial_rejects_null_fields() {
        let violations = validate_partial_movie(&json!({ "title": null })).unwrap_err();
        assert_eq!(violations[0].field, "title");
    }

    #[test]
    fn partial_ignores_client_supplied_id() {
        let patch =
            validate_partial_movie(&json!({ "id": "01ARZ3NDEKTSV4RRFFQ69G5FAV" })).expect("patch");
        assert_eq!(patch, MoviePatch::default());
    }
}
