use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// One opaque catalog row, passed through with its key order intact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    pub data: serde_json::Map<String, serde_json::Value>,
}

/// The two record categories published by the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dataset {
    Assessment,
    Commercial,
}

impl Dataset {
    pub fn as_str(&self) -> &'static str {
        match self {
            Dataset::Assessment => "assessment",
            Dataset::Commercial => "commercial",
        }
    }
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Property index number. Never validated, only forwarded.
///
/// Batch bodies may carry pins as JSON strings or integers. `text` is what
/// goes to the catalog; `raw` is the caller's value, echoed back unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pin {
    text: String,
    raw: serde_json::Value,
}

impl Pin {
    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn raw(&self) -> &serde_json::Value {
        &self.raw
    }
}

impl fmt::Display for Pin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl From<String> for Pin {
    fn from(value: String) -> Self {
        Pin {
            raw: serde_json::Value::String(value.clone()),
            text: value,
        }
    }
}

impl From<&str> for Pin {
    fn from(value: &str) -> Self {
        Pin::from(value.to_string())
    }
}

impl Serialize for Pin {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.raw.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Pin {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct PinVisitor;

        impl Visitor<'_> for PinVisitor {
            type Value = Pin;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a pin as a string or integer")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<Pin, E> {
                Ok(Pin::from(v))
            }

            fn visit_string<E: de::Error>(self, v: String) -> std::result::Result<Pin, E> {
                Ok(Pin::from(v))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<Pin, E> {
                Ok(Pin {
                    text: v.to_string(),
                    raw: serde_json::Value::from(v),
                })
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<Pin, E> {
                Ok(Pin {
                    text: v.to_string(),
                    raw: serde_json::Value::from(v),
                })
            }
        }

        deserializer.deserialize_any(PinVisitor)
    }
}

/// Settled result of one outbound lookup.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LookupOutcome {
    pub success: bool,
    pub data: Vec<Record>,
}

impl LookupOutcome {
    pub fn succeeded(data: Vec<Record>) -> Self {
        Self {
            success: true,
            data,
        }
    }

    pub fn failed() -> Self {
        Self {
            success: false,
            data: Vec::new(),
        }
    }
}

impl<E> From<std::result::Result<Vec<Record>, E>> for LookupOutcome {
    fn from(result: std::result::Result<Vec<Record>, E>) -> Self {
        match result {
            Ok(records) => LookupOutcome::succeeded(records),
            Err(_) => LookupOutcome::failed(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertyResult {
    pub pin: Pin,
    pub assessment: LookupOutcome,
    pub commercial: LookupOutcome,
}

/// One slot of a batch response. `success` reports whether the per-pin
/// aggregation itself finished; dataset failures live in `data`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchItemResult {
    pub pin: Pin,
    pub success: bool,
    pub data: Option<PropertyResult>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pin_accepts_strings_and_numbers() {
        let pins: Vec<Pin> = serde_json::from_str(r#"["17-04-214-005", 1704214005]"#).unwrap();
        assert_eq!(pins[0], Pin::from("17-04-214-005"));
        assert_eq!(pins[1].as_str(), "1704214005");
    }

    #[test]
    fn test_pin_echoes_caller_value() {
        let input = serde_json::json!(["17-04-214-005", 17042140050000u64, -3]);
        let pins: Vec<Pin> = serde_json::from_value(input.clone()).unwrap();

        assert_eq!(serde_json::to_value(&pins).unwrap(), input);
        assert_eq!(pins[1].raw(), &serde_json::json!(17042140050000u64));
        assert_eq!(pins[2].as_str(), "-3");
    }

    #[test]
    fn test_pin_rejects_other_shapes() {
        assert!(serde_json::from_str::<Pin>("true").is_err());
        assert!(serde_json::from_str::<Pin>("null").is_err());
        assert!(serde_json::from_str::<Pin>(r#"{"pin": "1"}"#).is_err());
        assert!(serde_json::from_str::<Pin>("1.5").is_err());
    }

    #[test]
    fn test_record_keeps_key_order() {
        let raw = r#"{"year":"2023","pin":"1","class":"2-11"}"#;
        let record: Record = serde_json::from_str(raw).unwrap();
        assert_eq!(serde_json::to_string(&record).unwrap(), raw);
    }

    #[test]
    fn test_failed_outcome_serializes_empty_data() {
        let outcome: LookupOutcome = Err::<Vec<Record>, ()>(()).into();
        assert_eq!(
            serde_json::to_value(&outcome).unwrap(),
            serde_json::json!({"success": false, "data": []})
        );
    }

    #[test]
    fn test_batch_item_serializes_null_data() {
        let item = BatchItemResult {
            pin: Pin::from("123"),
            success: false,
            data: None,
        };
        assert_eq!(
            serde_json::to_value(&item).unwrap(),
            serde_json::json!({"pin": "123", "success": false, "data": null})
        );
    }
}
