//! Timestamp wire format.
//!
//! The service encodes instants as seconds since the Unix epoch, with an
//! optional fractional part (`1594246400.123`). Fields use
//! `#[serde(with = "crate::time::epoch_seconds")]`.

/// Serde adapter for `Option<DateTime<Utc>>` as fractional epoch seconds.
pub mod epoch_seconds {
    use chrono::{DateTime, TimeZone, Utc};
    use serde::{de, Deserialize, Deserializer, Serializer};

    /// Serializes a present timestamp as epoch seconds.
    ///
    /// # Errors
    ///
    /// Propagates serializer errors.
    #[allow(clippy::ref_option, clippy::cast_precision_loss)]
    pub fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(instant) if instant.timestamp_subsec_millis() == 0 => {
                serializer.serialize_i64(instant.timestamp())
            }
            Some(instant) => {
                serializer.serialize_f64(instant.timestamp_millis() as f64 / 1000.0)
            }
            None => serializer.serialize_none(),
        }
    }

    /// Deserializes integer or fractional epoch seconds.
    ///
    /// # Errors
    ///
    /// Fails if the value is not a number or is out of range.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let Some(seconds) = Option::<f64>::deserialize(deserializer)? else {
            return Ok(None);
        };
        from_seconds(seconds)
            .map(Some)
            .ok_or_else(|| de::Error::custom(format!("timestamp out of range: {seconds}")))
    }

    #[allow(clippy::cast_possible_truncation)]
    fn from_seconds(seconds: f64) -> Option<DateTime<Utc>> {
        if !seconds.is_finite() {
            return None;
        }
        let millis = (seconds * 1000.0).round() as i64;
        Utc.timestamp_millis_opt(millis).single()
    }
}
