// Defensive access to a player's stat record.
//
// Records arrive as free-form JSON objects. Nothing about their keys or
// nesting is guaranteed, so every read goes through `lookup`, which yields
// `None` at the first missing level instead of failing.

use serde_json::{Map, Value};

/// Text written into a prompt wherever a stat is absent (or JSON `null`).
pub const ABSENT: &str = "None";

/// One player's stat mapping, keys kept in the order the client sent them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatRecord {
    fields: Map<String, Value>,
}

impl StatRecord {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// Build a record from an arbitrary JSON value. Anything other than an
    /// object becomes an empty record.
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Object(map) => Self::new(map.clone()),
            _ => Self::default(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Follow a dotted path (`"highlights.workrate"`) through nested objects.
    ///
    /// Returns `None` if any segment is missing or an intermediate value is
    /// not an object.
    pub fn lookup(&self, path: &str) -> Option<&Value> {
        let mut segments = path.split('.');
        let mut current = self.fields.get(segments.next()?)?;
        for segment in segments {
            current = current.as_object()?.get(segment)?;
        }
        Some(current)
    }

    /// Prompt text for the value at `path`, or [`ABSENT`].
    pub fn display(&self, path: &str) -> String {
        display_value(self.lookup(path))
    }

    /// Render every top-level entry as a `key: value` line, in record order.
    pub fn render_flat(&self) -> String {
        self.fields
            .iter()
            .map(|(key, value)| format!("{key}: {}", display_value(Some(value))))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Strings are written bare; `null` and missing values become [`ABSENT`];
/// everything else uses its compact JSON form.
pub fn display_value(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => ABSENT.to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> StatRecord {
        StatRecord::from_value(&value)
    }

    #[test]
    fn lookup_top_level_and_nested() {
        let r = record(json!({
            "goals": 3,
            "technical": { "passing": { "accuracy": 87 } }
        }));
        assert_eq!(r.lookup("goals"), Some(&json!(3)));
        assert_eq!(r.lookup("technical.passing.accuracy"), Some(&json!(87)));
    }

    #[test]
    fn lookup_missing_levels_yield_none() {
        let r = record(json!({ "goals": 3, "technical": { "passing": 80 } }));
        assert_eq!(r.lookup("assists"), None);
        assert_eq!(r.lookup("highlights.workrate"), None);
        assert_eq!(r.lookup("technical.dribbling"), None);
    }

    #[test]
    fn lookup_through_non_object_yields_none() {
        let r = record(json!({ "goals": 3 }));
        assert_eq!(r.lookup("goals.total"), None);
    }

    #[test]
    fn non_object_value_becomes_empty_record() {
        assert!(record(json!([1, 2, 3])).is_empty());
        assert!(record(json!("striker")).is_empty());
        assert!(record(Value::Null).is_empty());
    }

    #[test]
    fn display_formats_each_kind() {
        let r = record(json!({
            "position": "Winger",
            "goals": 2,
            "rating": 7.5,
            "captain": true,
            "injury": null,
            "trend": { "form": "up" }
        }));
        assert_eq!(r.display("position"), "Winger");
        assert_eq!(r.display("goals"), "2");
        assert_eq!(r.display("rating"), "7.5");
        assert_eq!(r.display("captain"), "true");
        assert_eq!(r.display("injury"), ABSENT);
        assert_eq!(r.display("trend"), r#"{"form":"up"}"#);
        assert_eq!(r.display("missing"), ABSENT);
    }

    #[test]
    fn render_flat_keeps_client_key_order() {
        let r: StatRecord = StatRecord::from_value(
            &serde_json::from_str(r#"{"time": 90, "assists": 1, "position": "CM"}"#).unwrap(),
        );
        assert_eq!(r.render_flat(), "time: 90\nassists: 1\nposition: CM");
    }

    #[test]
    fn render_flat_of_empty_record_is_empty() {
        assert_eq!(StatRecord::default().render_flat(), "");
    }
}
