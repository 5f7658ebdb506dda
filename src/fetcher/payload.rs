//! @ai:module:intent Validate remote production payloads into canonical series
//! @ai:module:layer infrastructure
//! @ai:module:public_api normalize_payload, DATA_FIELD, PERIOD_FIELD, VALUE_FIELD
//! @ai:module:stateless true

use crate::error::{Error, Result};
use crate::series::TimeSeriesPoint;
use serde_json::Value;

pub const DATA_FIELD: &str = "data";
pub const PERIOD_FIELD: &str = "year";
pub const VALUE_FIELD: &str = "production";

/// @ai:intent Convert a raw JSON body into a sorted series
/// @ai:pre body is an object with a `data` array of `{year, production}` records
/// @ai:post periods strictly ascending, values are magnitudes of the raw figures
/// @ai:effects pure
pub fn normalize_payload(body: &Value) -> Result<Vec<TimeSeriesPoint>> {
    let records = body
        .get(DATA_FIELD)
        .and_then(Value::as_array)
        .ok_or_else(|| Error::InvalidResponseShape {
            reason: format!("expected a `{}` list of records", DATA_FIELD),
            malformed_records: 0,
        })?;

    let mut points = Vec::with_capacity(records.len());
    let mut malformed = Vec::new();

    for (index, record) in records.iter().enumerate() {
        match parse_record(record) {
            Some(point) => points.push(point),
            None => malformed.push(index),
        }
    }

    // One bad record rejects the whole batch.
    if !malformed.is_empty() {
        return Err(Error::InvalidResponseShape {
            reason: format!("malformed records at positions {:?}", malformed),
            malformed_records: malformed.len(),
        });
    }

    points.sort_by_key(|point| point.period);

    if let Some(pair) = points.windows(2).find(|pair| pair[0].period == pair[1].period) {
        return Err(Error::InvalidResponseShape {
            reason: format!("duplicate period {}", pair[0].period),
            malformed_records: 0,
        });
    }

    Ok(points)
}

fn parse_record(record: &Value) -> Option<TimeSeriesPoint> {
    let period = coerce_period(record.get(PERIOD_FIELD)?)?;
    let value = record.get(VALUE_FIELD)?.as_f64()?;

    if !value.is_finite() {
        return None;
    }

    Some(TimeSeriesPoint::new(period, value))
}

/// @ai:intent Accept integer, float or numeric-string years, truncating fractions
/// @ai:effects pure
fn coerce_period(raw: &Value) -> Option<i32> {
    let number = match raw {
        Value::Number(number) => number.as_f64()?,
        Value::String(text) => text.trim().parse::<f64>().ok()?,
        _ => return None,
    };

    if !number.is_finite() || number < f64::from(i32::MIN) || number > f64::from(i32::MAX) {
        return None;
    }

    Some(number.trunc() as i32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_normalize_takes_absolute_values_and_sorts() {
        let body = json!({
            "data": [
                {"year": 2026, "production": -310.5},
                {"year": 2025, "production": 298.0}
            ]
        });

        let series = normalize_payload(&body).unwrap();
        assert_eq!(
            series,
            vec![TimeSeriesPoint::new(2025, 298.0), TimeSeriesPoint::new(2026, 310.5)]
        );
    }

    #[test]
    fn test_normalize_coerces_period_representations() {
        let body = json!({
            "data": [
                {"year": "2024", "production": 1},
                {"year": 2025.0, "production": 2},
                {"year": 2026.7, "production": 3}
            ]
        });

        let periods: Vec<_> = normalize_payload(&body)
            .unwrap()
            .iter()
            .map(|p| p.period)
            .collect();
        assert_eq!(periods, vec![2024, 2025, 2026]);
    }

    #[test]
    fn test_missing_list_field_is_invalid_shape() {
        let err = normalize_payload(&json!({"rows": []})).unwrap_err();
        assert!(matches!(err, Error::InvalidResponseShape { malformed_records: 0, .. }));

        let err = normalize_payload(&json!([{"year": 2025, "production": 1}])).unwrap_err();
        assert!(matches!(err, Error::InvalidResponseShape { .. }));
    }

    #[test]
    fn test_non_numeric_production_rejects_whole_batch() {
        let body = json!({
            "data": [
                {"year": 2025, "production": 12.0},
                {"year": 2026, "production": "13.5"},
                {"year": 2027}
            ]
        });

        let err = normalize_payload(&body).unwrap_err();
        assert!(matches!(err, Error::InvalidResponseShape { malformed_records: 2, .. }));
    }

    #[test]
    fn test_duplicate_periods_are_invalid_shape() {
        let body = json!({
            "data": [
                {"year": 2025, "production": 1.0},
                {"year": "2025", "production": 2.0}
            ]
        });

        let err = normalize_payload(&body).unwrap_err();
        assert!(err.to_string().contains("duplicate period 2025"));
    }

    #[test]
    fn test_empty_list_is_valid() {
        let series = normalize_payload(&json!({"data": []})).unwrap();
        assert!(series.is_empty());
    }
}
