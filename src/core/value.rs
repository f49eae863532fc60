//! Parameter values flowing through the filter tree

use chrono::{DateTime, FixedOffset, NaiveDate, SecondsFormat};
use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use serde_json::{Number, Value};

/// Ordered mapping used for both raw input and filtered output
///
/// Insertion order is preserved, so filtered output follows declaration order.
pub type ParamMap = IndexMap<String, ParamValue>;

/// A dynamically typed parameter value
///
/// Raw request input is converted into this tree before filtering; casters
/// produce values of the same type so that times and dates survive the
/// round trip without being flattened to strings.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ParamValue {
    #[default]
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    Time(DateTime<FixedOffset>),
    Date(NaiveDate),
    Array(Vec<ParamValue>),
    Map(ParamMap),
}

impl ParamValue {
    /// Check if the value is null (the `nil?` predicate)
    pub fn is_nil(&self) -> bool {
        matches!(self, ParamValue::Null)
    }

    /// Emptiness of strings and collections (the `empty?` predicate)
    ///
    /// Returns `None` for variants that have no notion of emptiness.
    pub fn emptiness(&self) -> Option<bool> {
        match self {
            ParamValue::String(s) => Some(s.is_empty()),
            ParamValue::Array(items) => Some(items.is_empty()),
            ParamValue::Map(map) => Some(map.is_empty()),
            _ => None,
        }
    }

    /// Get the value as a string slice if possible
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParamValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get the value as an integer if possible
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            ParamValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Get the value as a float, widening integers
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ParamValue::Float(f) => Some(*f),
            ParamValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ParamValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_time(&self) -> Option<&DateTime<FixedOffset>> {
        match self {
            ParamValue::Time(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[ParamValue]> {
        match self {
            ParamValue::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&ParamMap> {
        match self {
            ParamValue::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Truthiness in the loose sense: everything but `null` and `false`
    pub fn is_truthy(&self) -> bool {
        !matches!(self, ParamValue::Null | ParamValue::Bool(false))
    }

    /// Short name of the variant, used in cast error messages
    pub fn kind(&self) -> &'static str {
        match self {
            ParamValue::Null => "null",
            ParamValue::Bool(_) => "boolean",
            ParamValue::Integer(_) => "integer",
            ParamValue::Float(_) => "float",
            ParamValue::String(_) => "string",
            ParamValue::Time(_) => "time",
            ParamValue::Date(_) => "date",
            ParamValue::Array(_) => "array",
            ParamValue::Map(_) => "map",
        }
    }

    /// Convert into a `serde_json::Value`
    ///
    /// Times become RFC 3339 strings and dates `YYYY-MM-DD` strings.
    /// Non-finite floats become `null`.
    pub fn to_json(&self) -> Value {
        match self {
            ParamValue::Null => Value::Null,
            ParamValue::Bool(b) => Value::Bool(*b),
            ParamValue::Integer(i) => Value::Number((*i).into()),
            ParamValue::Float(f) => Number::from_f64(*f).map_or(Value::Null, Value::Number),
            ParamValue::String(s) => Value::String(s.clone()),
            ParamValue::Time(t) => Value::String(t.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
            ParamValue::Date(d) => Value::String(d.format("%Y-%m-%d").to_string()),
            ParamValue::Array(items) => Value::Array(items.iter().map(Self::to_json).collect()),
            ParamValue::Map(map) => Value::Object(
                map.iter()
                    .map(|(key, value)| (key.clone(), value.to_json()))
                    .collect(),
            ),
        }
    }
}

impl Serialize for ParamValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ParamValue::Null => serializer.serialize_unit(),
            ParamValue::Bool(b) => serializer.serialize_bool(*b),
            ParamValue::Integer(i) => serializer.serialize_i64(*i),
            ParamValue::Float(f) => serializer.serialize_f64(*f),
            ParamValue::String(s) => serializer.serialize_str(s),
            ParamValue::Time(t) => {
                serializer.serialize_str(&t.to_rfc3339_opts(SecondsFormat::AutoSi, true))
            }
            ParamValue::Date(d) => serializer.collect_str(&d.format("%Y-%m-%d")),
            ParamValue::Array(items) => items.serialize(serializer),
            ParamValue::Map(map) => map.serialize(serializer),
        }
    }
}

impl From<Value> for ParamValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => ParamValue::Null,
            Value::Bool(b) => ParamValue::Bool(b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => ParamValue::Integer(i),
                // u64 beyond i64::MAX and real numbers both land here
                None => ParamValue::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            Value::String(s) => ParamValue::String(s),
            Value::Array(items) => ParamValue::Array(items.into_iter().map(Into::into).collect()),
            Value::Object(map) => ParamValue::Map(
                map.into_iter()
                    .map(|(key, value)| (key, value.into()))
                    .collect(),
            ),
        }
    }
}

impl From<&Value> for ParamValue {
    fn from(value: &Value) -> Self {
        value.clone().into()
    }
}

impl From<ParamValue> for Value {
    fn from(value: ParamValue) -> Self {
        value.to_json()
    }
}

impl From<ParamMap> for ParamValue {
    fn from(map: ParamMap) -> Self {
        ParamValue::Map(map)
    }
}

impl From<Vec<ParamValue>> for ParamValue {
    fn from(items: Vec<ParamValue>) -> Self {
        ParamValue::Array(items)
    }
}

impl From<bool> for ParamValue {
    fn from(b: bool) -> Self {
        ParamValue::Bool(b)
    }
}

impl From<i64> for ParamValue {
    fn from(i: i64) -> Self {
        ParamValue::Integer(i)
    }
}

impl From<i32> for ParamValue {
    fn from(i: i32) -> Self {
        ParamValue::Integer(i.into())
    }
}

impl From<f64> for ParamValue {
    fn from(f: f64) -> Self {
        ParamValue::Float(f)
    }
}

impl From<&str> for ParamValue {
    fn from(s: &str) -> Self {
        ParamValue::String(s.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(s: String) -> Self {
        ParamValue::String(s)
    }
}

impl From<DateTime<FixedOffset>> for ParamValue {
    fn from(t: DateTime<FixedOffset>) -> Self {
        ParamValue::Time(t)
    }
}

impl From<NaiveDate> for ParamValue {
    fn from(d: NaiveDate) -> Self {
        ParamValue::Date(d)
    }
}

impl<T: Into<ParamValue>> From<Option<T>> for ParamValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(ParamValue::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_param_value_string() {
        let value = ParamValue::from("test");
        assert_eq!(value.as_str(), Some("test"));
        assert_eq!(value.as_i64(), None);
        assert!(!value.is_nil());
    }

    #[test]
    fn test_param_value_null() {
        let value = ParamValue::Null;
        assert!(value.is_nil());
        assert!(!value.is_truthy());
        assert_eq!(value.emptiness(), None);
    }

    #[test]
    fn test_emptiness_of_collections() {
        assert_eq!(ParamValue::from("").emptiness(), Some(true));
        assert_eq!(ParamValue::from("x").emptiness(), Some(false));
        assert_eq!(ParamValue::Array(vec![]).emptiness(), Some(true));
        assert_eq!(ParamValue::Map(ParamMap::new()).emptiness(), Some(true));
        assert_eq!(ParamValue::Integer(0).emptiness(), None);
        assert_eq!(ParamValue::Bool(false).emptiness(), None);
    }

    #[test]
    fn test_from_json_keeps_structure() {
        let value = ParamValue::from(json!({
            "title": "woo",
            "count": 3,
            "ratio": 1.5,
            "tags": ["a", null],
        }));
        let map = value.as_map().expect("should be a map");
        assert_eq!(map["title"], ParamValue::from("woo"));
        assert_eq!(map["count"], ParamValue::Integer(3));
        assert_eq!(map["ratio"], ParamValue::Float(1.5));
        assert_eq!(
            map["tags"],
            ParamValue::Array(vec![ParamValue::from("a"), ParamValue::Null])
        );
    }

    #[test]
    fn test_to_json_renders_time_and_date() {
        let time = DateTime::parse_from_rfc3339("2014-12-25T14:00:00+01:00").unwrap();
        let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        assert_eq!(
            ParamValue::Time(time).to_json(),
            json!("2014-12-25T14:00:00+01:00")
        );
        assert_eq!(ParamValue::Date(date).to_json(), json!("2024-01-15"));
    }

    #[test]
    fn test_serialize_matches_to_json() {
        let mut map = ParamMap::new();
        map.insert("b".into(), ParamValue::Integer(1));
        map.insert("a".into(), ParamValue::from("x"));
        let value = ParamValue::Map(map);

        let serialized = serde_json::to_string(&value).expect("serialize should succeed");
        assert_eq!(serialized, r#"{"b":1,"a":"x"}"#);
    }

    #[test]
    fn test_to_json_keeps_insertion_order() {
        let mut map = ParamMap::new();
        map.insert("title".into(), ParamValue::from("woo"));
        map.insert("profile".into(), ParamValue::Map(ParamMap::new()));
        map.insert("age".into(), ParamValue::Integer(3));

        let json = ParamValue::Map(map).to_json();
        let keys: Vec<&str> = json
            .as_object()
            .expect("a map renders as an object")
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(keys, ["title", "profile", "age"]);
        assert_eq!(json.to_string(), r#"{"title":"woo","profile":{},"age":3}"#);
    }

    #[test]
    fn test_non_finite_float_becomes_null_json() {
        assert_eq!(ParamValue::Float(f64::NAN).to_json(), Value::Null);
    }

    #[test]
    fn test_option_conversion() {
        assert_eq!(ParamValue::from(None::<i64>), ParamValue::Null);
        assert_eq!(ParamValue::from(Some(7)), ParamValue::Integer(7));
    }
}
