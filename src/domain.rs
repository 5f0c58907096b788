use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::ApiError;

/// one persisted sensor reading, as returned by GET /get-sensor-data
#[derive(Clone, Serialize, Deserialize, Debug, sqlx::FromRow)]
pub struct Reading {
    /// row identity; also the insert-order tiebreak for retrieval
    pub id: i64,
    /// temperature in celsius
    pub temperature: Option<f64>,
    /// relative humidity (0-100%)
    pub humidity: Option<f64>,
    /// co2 concentration in ppm
    pub co2: Option<f64>,
    /// illuminance in lux
    pub lux: Option<f64>,
    /// short text label (e.g., "Good", "Poor")
    pub air_quality: Option<String>,
    /// store-assigned UTC timestamp, millisecond precision
    pub created_at: String,
}

/// ingestion body for POST /sensor-data
///
/// every field is Option<Value> so validation can distinguish a missing
/// key from a key that is present with any value at all. a JSON null, a
/// string or a negative number all count as present; only a truly absent
/// key fails validation.
#[derive(Deserialize, Debug)]
pub struct ReadingPayload {
    #[serde(default, deserialize_with = "present")]
    pub temperature: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub humidity: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub co2: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub lux: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub air_quality: Option<Value>,
}

/// a key that appears in the body deserializes to Some, whatever its
/// value. serde's stock Option handling folds JSON null into None,
/// which would make `"humidity": null` look absent; wrapping the raw
/// value here keeps null distinct from a missing key.
fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// validated reading ready for insertion; no id or timestamp yet
#[derive(Debug, Clone, PartialEq)]
pub struct NewReading {
    pub temperature: Option<f64>,
    pub humidity: Option<f64>,
    pub co2: Option<f64>,
    pub lux: Option<f64>,
    pub air_quality: Option<String>,
}

impl ReadingPayload {
    /// presence check only. types and ranges are deliberately not
    /// enforced; values the store cannot hold as a number become NULL.
    pub fn validate(self) -> Result<NewReading, ApiError> {
        let (Some(temperature), Some(humidity), Some(co2), Some(lux), Some(air_quality)) = (
            self.temperature,
            self.humidity,
            self.co2,
            self.lux,
            self.air_quality,
        ) else {
            return Err(ApiError::MissingField);
        };

        Ok(NewReading {
            temperature: to_real(&temperature),
            humidity: to_real(&humidity),
            co2: to_real(&co2),
            lux: to_real(&lux),
            air_quality: to_label(&air_quality),
        })
    }
}

/// numeric coercion for storage: numbers pass through, numeric strings
/// parse, everything else (null, booleans, objects) stores NULL
fn to_real(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// label coercion: strings pass through, null stores NULL, any other
/// JSON value keeps its textual form
fn to_label(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Null => None,
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(body: Value) -> ReadingPayload {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn full_payload_validates() {
        let reading = payload(json!({
            "temperature": 21.5, "humidity": 40.0, "co2": 450.0,
            "lux": 300.0, "air_quality": "Good"
        }))
        .validate()
        .unwrap();

        assert_eq!(reading.temperature, Some(21.5));
        assert_eq!(reading.air_quality.as_deref(), Some("Good"));
    }

    #[test]
    fn missing_any_field_is_rejected() {
        for field in ["temperature", "humidity", "co2", "lux", "air_quality"] {
            let mut body = json!({
                "temperature": 21.5, "humidity": 40.0, "co2": 450.0,
                "lux": 300.0, "air_quality": "Good"
            });
            body.as_object_mut().unwrap().remove(field);
            assert!(
                payload(body).validate().is_err(),
                "payload without {field} should fail the presence check"
            );
        }
    }

    #[test]
    fn null_counts_as_present() {
        let reading = payload(json!({
            "temperature": null, "humidity": 40.0, "co2": 450.0,
            "lux": 300.0, "air_quality": null
        }))
        .validate()
        .unwrap();

        assert_eq!(reading.temperature, None);
        assert_eq!(reading.air_quality, None);
    }

    #[test]
    fn all_null_payload_validates_to_empty_reading() {
        let reading = payload(json!({
            "temperature": null, "humidity": null, "co2": null,
            "lux": null, "air_quality": null
        }))
        .validate()
        .unwrap();

        assert_eq!(
            reading,
            NewReading {
                temperature: None,
                humidity: None,
                co2: None,
                lux: None,
                air_quality: None,
            }
        );
    }

    #[test]
    fn odd_types_pass_validation_and_coerce() {
        let reading = payload(json!({
            "temperature": "21.5", "humidity": "not a number", "co2": -50,
            "lux": true, "air_quality": 3
        }))
        .validate()
        .unwrap();

        assert_eq!(reading.temperature, Some(21.5));
        assert_eq!(reading.humidity, None);
        assert_eq!(reading.co2, Some(-50.0));
        assert_eq!(reading.lux, None);
        assert_eq!(reading.air_quality.as_deref(), Some("3"));
    }
}
