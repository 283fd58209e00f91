//! Best-effort date coercion over decoded payloads.

use chrono::{DateTime, Utc};

use crate::json::Json;

/// Rewrite designated string values to [`Json::Datetime`], in place.
///
/// The input is treated as a sequence: a lone object is a one-element
/// sequence, an array is iterated as-is, anything else is left alone. Within
/// an object, a value under a designated key is replaced when it is a string
/// that parses as RFC 3339; strings that fail to parse are left untouched.
/// Object and array values recurse with the same key list, so coercion
/// applies at arbitrary nesting depth.
pub fn coerce_dates(value: &mut Json, keys: &[String]) {
    match value {
        Json::Object(_) => coerce_entries(value, keys),
        Json::Array(items) => {
            for item in items.iter_mut() {
                if item.is_object() {
                    coerce_entries(item, keys);
                }
            }
        }
        _ => {}
    }
}

fn coerce_entries(value: &mut Json, keys: &[String]) {
    let Json::Object(map) = value else { return };
    for (key, value) in map.iter_mut() {
        if keys.iter().any(|k| k == key) {
            if let Json::String(s) = value {
                if let Some(dt) = parse_datetime(s) {
                    *value = Json::Datetime(dt);
                }
            }
        }
        match value {
            Json::Object(_) => coerce_entries(value, keys),
            Json::Array(_) => coerce_dates(value, keys),
            _ => {}
        }
    }
}

fn parse_datetime(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn keys(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_coerces_designated_keys_at_any_depth() {
        let mut payload = Json::from(json!({
            "created_at": "2020-01-01T00:00:00Z",
            "nested": { "updated_at": "2021-01-01T00:00:00Z" },
            "other": "x"
        }));
        coerce_dates(&mut payload, &keys(&["created_at", "updated_at"]));

        assert_eq!(
            payload.get("created_at").and_then(Json::as_datetime),
            Some(Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap())
        );
        assert_eq!(
            payload
                .get("nested")
                .and_then(|n| n.get("updated_at"))
                .and_then(Json::as_datetime),
            Some(Utc.with_ymd_and_hms(2021, 1, 1, 0, 0, 0).unwrap())
        );
        assert_eq!(payload.get("other").and_then(Json::as_str), Some("x"));
    }

    #[test]
    fn test_array_payloads_are_iterated() {
        let mut payload = Json::from(json!([
            { "created_at": "2020-01-01T00:00:00Z" },
            { "created_at": "2021-06-15T12:30:00Z" },
            "not an object"
        ]));
        coerce_dates(&mut payload, &keys(&["created_at"]));

        let items = payload.as_array().unwrap();
        assert!(items[0].get("created_at").unwrap().as_datetime().is_some());
        assert!(items[1].get("created_at").unwrap().as_datetime().is_some());
        assert_eq!(items[2], Json::String("not an object".into()));
    }

    #[test]
    fn test_objects_nested_in_arrays_are_reached() {
        let mut payload = Json::from(json!({
            "events": [{ "at": "2022-02-02T02:02:02Z" }]
        }));
        coerce_dates(&mut payload, &keys(&["at"]));

        let events = payload.get("events").unwrap().as_array().unwrap();
        assert!(events[0].get("at").unwrap().as_datetime().is_some());
    }

    #[test]
    fn test_malformed_date_left_as_string() {
        let mut payload = Json::from(json!({ "created_at": "yesterday-ish" }));
        coerce_dates(&mut payload, &keys(&["created_at"]));

        assert_eq!(
            payload.get("created_at").and_then(Json::as_str),
            Some("yesterday-ish")
        );
    }

    #[test]
    fn test_non_string_designated_values_untouched() {
        let mut payload = Json::from(json!({ "created_at": 1577836800 }));
        coerce_dates(&mut payload, &keys(&["created_at"]));

        assert_eq!(payload, Json::from(json!({ "created_at": 1577836800 })));
    }

    #[test]
    fn test_scalar_payload_is_a_no_op() {
        let mut payload = Json::from(json!("2020-01-01T00:00:00Z"));
        coerce_dates(&mut payload, &keys(&["created_at"]));
        assert_eq!(payload, Json::String("2020-01-01T00:00:00Z".into()));
    }

    #[test]
    fn test_offset_timestamps_normalize_to_utc() {
        let mut payload = Json::from(json!({ "at": "2020-01-01T05:00:00+05:00" }));
        coerce_dates(&mut payload, &keys(&["at"]));

        assert_eq!(
            payload.get("at").and_then(Json::as_datetime),
            Some(Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap())
        );
    }
}
