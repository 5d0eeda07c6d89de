//! # Disclosure Frames
//!
//! A frame mirrors the shape of the payload and says, per member, what to
//! conceal:
//!
//! | Frame value            | Meaning                                           |
//! |------------------------|---------------------------------------------------|
//! | `true`                 | conceal the member behind a digest in `_sd`       |
//! | `false` / absent       | leave the member in plaintext                     |
//! | object                 | recurse into the member (which must be an object) |
//! | array of booleans      | conceal individual array elements                 |
//! | `"__decoyCount": n`    | add `n` decoy digests to this level's `_sd`       |
//!
//! Frames parsed from JSON or YAML are validated up front into the closed
//! [`FrameNode`] set, so the walker never meets an unrecognized shape.
//! Entries keep the order in which they were parsed or built; that order
//! decides the order of salt calls and of the resulting disclosures.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use sdf_core::error::json_type_name;
use sdf_core::{SdError, DECOY_COUNT_KEY};

use crate::decoy::DecoyCount;

/// What to do with one frame member.
#[derive(Debug, Clone, PartialEq)]
pub enum FrameNode {
    /// `true` conceals the member, `false` leaves it in plaintext.
    Disclose(bool),
    /// Recurse into a nested object.
    Nested(DisclosureFrame),
    /// Per-element flags for an array. Missing trailing flags mean `false`.
    Elements(Vec<bool>),
    /// Add decoy digests at this level.
    Decoys(DecoyCount),
}

/// One `(key, node)` pair of a frame level.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameEntry {
    key: String,
    node: FrameNode,
}

impl FrameEntry {
    /// The member name this entry applies to.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The action for the member.
    pub fn node(&self) -> &FrameNode {
        &self.node
    }
}

/// A disclosure frame for one object level, with nested levels inside.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "Value", into = "Value")]
pub struct DisclosureFrame {
    entries: Vec<FrameEntry>,
}

impl DisclosureFrame {
    /// An empty frame: nothing is concealed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Conceal `key` at this level.
    pub fn disclose(self, key: impl Into<String>) -> Self {
        self.with(key, FrameNode::Disclose(true))
    }

    /// Explicitly keep `key` in plaintext.
    pub fn plaintext(self, key: impl Into<String>) -> Self {
        self.with(key, FrameNode::Disclose(false))
    }

    /// Apply `frame` to the object at `key`.
    pub fn nested(self, key: impl Into<String>, frame: DisclosureFrame) -> Self {
        self.with(key, FrameNode::Nested(frame))
    }

    /// Conceal the elements of the array at `key` whose flag is `true`.
    pub fn elements(self, key: impl Into<String>, flags: impl IntoIterator<Item = bool>) -> Self {
        self.with(key, FrameNode::Elements(flags.into_iter().collect()))
    }

    /// Add `count` decoy digests at this level.
    pub fn decoys(self, count: usize) -> Self {
        self.with(DECOY_COUNT_KEY, FrameNode::Decoys(DecoyCount::from(count)))
    }

    /// Set the node for `key`, replacing an existing entry in place.
    pub fn with(mut self, key: impl Into<String>, node: FrameNode) -> Self {
        let key = key.into();
        match self.entries.iter_mut().find(|e| e.key == key) {
            Some(entry) => entry.node = node,
            None => self.entries.push(FrameEntry { key, node }),
        }
        self
    }

    /// Entries of this level, in application order.
    pub fn entries(&self) -> &[FrameEntry] {
        &self.entries
    }

    /// Look up the node for `key`.
    pub fn get(&self, key: &str) -> Option<&FrameNode> {
        self.entries.iter().find(|e| e.key == key).map(|e| &e.node)
    }

    /// Number of entries at this level.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when this level has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Parse and validate a frame from JSON.
    ///
    /// # Errors
    ///
    /// - `SdError::InvalidFrameEntry` for any value outside the recognized
    ///   shapes, including a non-object frame root and non-boolean array
    ///   flags (reported with the key `name[i]`).
    /// - `SdError::InvalidArgument` for a `__decoyCount` that is negative,
    ///   fractional, or above `MAX_DECOY_COUNT`.
    pub fn from_value(value: &Value) -> Result<Self, SdError> {
        match value {
            Value::Object(map) => parse_level(map, ""),
            other => Err(SdError::InvalidFrameEntry {
                key: String::new(),
                path: String::new(),
                found: json_type_name(other),
            }),
        }
    }

    /// Render the frame as JSON.
    pub fn to_value(&self) -> Value {
        let mut map = Map::new();
        for entry in &self.entries {
            let value = match &entry.node {
                FrameNode::Disclose(flag) => Value::Bool(*flag),
                FrameNode::Nested(frame) => frame.to_value(),
                FrameNode::Elements(flags) => {
                    Value::Array(flags.iter().copied().map(Value::Bool).collect())
                }
                FrameNode::Decoys(count) => Value::from(count.get()),
            };
            map.insert(entry.key.clone(), value);
        }
        Value::Object(map)
    }
}

impl TryFrom<Value> for DisclosureFrame {
    type Error = SdError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::from_value(&value)
    }
}

impl From<DisclosureFrame> for Value {
    fn from(frame: DisclosureFrame) -> Self {
        frame.to_value()
    }
}

/// Join a dot path and a member name.
pub(crate) fn join_path(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{prefix}.{key}")
    }
}

fn parse_level(map: &Map<String, Value>, path: &str) -> Result<DisclosureFrame, SdError> {
    let mut frame = DisclosureFrame::new();
    for (key, value) in map {
        let invalid = |found: &'static str| SdError::InvalidFrameEntry {
            key: key.clone(),
            path: path.to_string(),
            found,
        };

        let node = match value {
            Value::Number(n) if key == DECOY_COUNT_KEY => FrameNode::Decoys(DecoyCount::try_from(n)?),
            _ if key == DECOY_COUNT_KEY => return Err(invalid(json_type_name(value))),
            Value::Bool(flag) => FrameNode::Disclose(*flag),
            Value::Object(inner) => FrameNode::Nested(parse_level(inner, &join_path(path, key))?),
            Value::Array(items) => {
                let mut flags = Vec::with_capacity(items.len());
                for (i, item) in items.iter().enumerate() {
                    match item {
                        Value::Bool(flag) => flags.push(*flag),
                        other => {
                            return Err(SdError::InvalidFrameEntry {
                                key: format!("{key}[{i}]"),
                                path: path.to_string(),
                                found: json_type_name(other),
                            })
                        }
                    }
                }
                FrameNode::Elements(flags)
            }
            Value::Null | Value::Number(_) | Value::String(_) => {
                return Err(invalid(json_type_name(value)))
            }
        };
        frame.entries.push(FrameEntry {
            key: key.clone(),
            node,
        });
    }
    Ok(frame)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parse_all_shapes() {
        let frame = DisclosureFrame::from_value(&json!({
            "name": true,
            "age": false,
            "address": {"street": true, "__decoyCount": 2},
            "nationalities": [true, false],
            "__decoyCount": 1
        }))
        .unwrap();

        assert_eq!(frame.get("name"), Some(&FrameNode::Disclose(true)));
        assert_eq!(frame.get("age"), Some(&FrameNode::Disclose(false)));
        assert_eq!(
            frame.get("nationalities"),
            Some(&FrameNode::Elements(vec![true, false]))
        );
        assert_eq!(
            frame.get(DECOY_COUNT_KEY),
            Some(&FrameNode::Decoys(DecoyCount::from(1)))
        );
        match frame.get("address") {
            Some(FrameNode::Nested(inner)) => {
                assert_eq!(inner.get("street"), Some(&FrameNode::Disclose(true)));
                assert_eq!(
                    inner.get(DECOY_COUNT_KEY),
                    Some(&FrameNode::Decoys(DecoyCount::from(2)))
                );
            }
            other => panic!("expected nested frame, got {other:?}"),
        }
    }

    #[test]
    fn string_entry_is_invalid() {
        let err = DisclosureFrame::from_value(&json!({"name": "yes"})).unwrap_err();
        match err {
            SdError::InvalidFrameEntry { key, path, found } => {
                assert_eq!(key, "name");
                assert_eq!(path, "");
                assert_eq!(found, "string");
            }
            other => panic!("expected InvalidFrameEntry, got {other:?}"),
        }
    }

    #[test]
    fn nested_invalid_entry_reports_path() {
        let err =
            DisclosureFrame::from_value(&json!({"a": {"b": {"c": null}}})).unwrap_err();
        match err {
            SdError::InvalidFrameEntry { key, path, found } => {
                assert_eq!(key, "c");
                assert_eq!(path, "a.b");
                assert_eq!(found, "null");
            }
            other => panic!("expected InvalidFrameEntry, got {other:?}"),
        }
    }

    #[test]
    fn number_outside_decoy_key_is_invalid() {
        let err = DisclosureFrame::from_value(&json!({"age": 3})).unwrap_err();
        assert!(matches!(err, SdError::InvalidFrameEntry { found: "number", .. }));
    }

    #[test]
    fn non_number_decoy_count_is_invalid() {
        let err = DisclosureFrame::from_value(&json!({"__decoyCount": true})).unwrap_err();
        assert!(matches!(err, SdError::InvalidFrameEntry { found: "boolean", .. }));
    }

    #[test]
    fn negative_decoy_count_is_invalid_argument() {
        let err = DisclosureFrame::from_value(&json!({"__decoyCount": -1})).unwrap_err();
        assert!(matches!(err, SdError::InvalidArgument { .. }));
    }

    #[test]
    fn non_boolean_array_flag_is_invalid() {
        let err = DisclosureFrame::from_value(&json!({"items": [true, 1]})).unwrap_err();
        match err {
            SdError::InvalidFrameEntry { key, found, .. } => {
                assert_eq!(key, "items[1]");
                assert_eq!(found, "number");
            }
            other => panic!("expected InvalidFrameEntry, got {other:?}"),
        }
    }

    #[test]
    fn non_object_root_is_invalid() {
        let err = DisclosureFrame::from_value(&json!([true])).unwrap_err();
        assert!(matches!(err, SdError::InvalidFrameEntry { found: "array", .. }));
    }

    #[test]
    fn parsed_entries_keep_document_order() {
        let source: Value =
            serde_json::from_str(r#"{"name": true, "age": true, "__decoyCount": 1, "city": false}"#)
                .unwrap();
        let frame = DisclosureFrame::from_value(&source).unwrap();
        let keys: Vec<&str> = frame.entries().iter().map(FrameEntry::key).collect();
        assert_eq!(keys, vec!["name", "age", DECOY_COUNT_KEY, "city"]);

        let yaml: DisclosureFrame = serde_yaml::from_str("zeta: true\nalpha: true\n").unwrap();
        let keys: Vec<&str> = yaml.entries().iter().map(FrameEntry::key).collect();
        assert_eq!(keys, vec!["zeta", "alpha"]);
    }

    #[test]
    fn builder_preserves_insertion_order() {
        let frame = DisclosureFrame::new()
            .disclose("zeta")
            .decoys(2)
            .disclose("alpha");
        let keys: Vec<&str> = frame.entries().iter().map(FrameEntry::key).collect();
        assert_eq!(keys, vec!["zeta", DECOY_COUNT_KEY, "alpha"]);
    }

    #[test]
    fn builder_replaces_duplicate_key_in_place() {
        let frame = DisclosureFrame::new()
            .disclose("a")
            .disclose("b")
            .plaintext("a");
        assert_eq!(frame.len(), 2);
        assert_eq!(frame.entries()[0].key(), "a");
        assert_eq!(frame.entries()[0].node(), &FrameNode::Disclose(false));
    }

    #[test]
    fn to_value_round_trips() {
        let source = json!({
            "name": true,
            "address": {"street": true, "__decoyCount": 1},
            "items": [false, true]
        });
        let frame = DisclosureFrame::from_value(&source).unwrap();
        assert_eq!(frame.to_value(), source);
    }

    #[test]
    fn deserialize_through_serde() {
        let frame: DisclosureFrame =
            serde_json::from_str(r#"{"name": true, "items": [true]}"#).unwrap();
        assert_eq!(frame.len(), 2);

        let err = serde_json::from_str::<DisclosureFrame>(r#"{"name": "x"}"#).unwrap_err();
        assert!(err.to_string().contains("invalid frame entry"));
    }

    #[test]
    fn deserialize_from_yaml() {
        let yaml = "name: true\naddress:\n  street: true\n  __decoyCount: 2\nitems: [true, false]\n";
        let frame: DisclosureFrame = serde_yaml::from_str(yaml).unwrap();
        assert!(matches!(frame.get("address"), Some(FrameNode::Nested(_))));
        assert_eq!(frame.get("items"), Some(&FrameNode::Elements(vec![true, false])));
    }

    #[test]
    fn join_path_handles_root() {
        assert_eq!(join_path("", "a"), "a");
        assert_eq!(join_path("a", "b"), "a.b");
    }
}
