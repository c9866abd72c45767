//! Element descriptors.
//!
//! A descriptor is the static metadata an upstream package publishes for an
//! element type. Fields the SDK does not model are kept verbatim in
//! `extra` so that a descriptor survives composition without losing data.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Static description of a content element type.
///
/// Only the type tag is required. Every other field is kept exactly as the
/// upstream package published it: absent fields stay absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementDescriptor {
    /// Type tag the host keys elements by (e.g. "FILL_BLANK").
    #[serde(rename = "type")]
    pub type_tag: String,

    /// Human-readable name shown in the authoring toolbar.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// JSON Schema describing the element's data.
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub schema: Option<Value>,

    /// Data a freshly inserted element starts with.
    #[serde(
        rename = "initState",
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub init_state: Option<Value>,

    /// Presentation hints for the authoring UI (icon, width, ...).
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub ui: Option<Value>,

    /// Any other upstream fields, passed through untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A field that is present deserializes to `Some`, even when it is `null`.
fn present<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Value>, D::Error> {
    Value::deserialize(deserializer).map(Some)
}

impl ElementDescriptor {
    /// A descriptor carrying only its type tag.
    pub fn new(type_tag: impl Into<String>) -> Self {
        Self {
            type_tag: type_tag.into(),
            name: None,
            schema: None,
            init_state: None,
            ui: None,
            extra: Map::new(),
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn schema(mut self, schema: Value) -> Self {
        self.schema = Some(schema);
        self
    }

    pub fn init_state(mut self, init_state: Value) -> Self {
        self.init_state = Some(init_state);
        self
    }

    pub fn ui(mut self, ui: Value) -> Self {
        self.ui = Some(ui);
        self
    }

    /// Attach an additional pass-through field.
    pub fn field(mut self, key: &str, value: Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }

    pub fn type_tag(&self) -> &str {
        &self.type_tag
    }

    /// All fields as a flat JSON object, keyed the way they serialize.
    ///
    /// Modelled fields take precedence over a pass-through field of the
    /// same name.
    pub fn fields(&self) -> Map<String, Value> {
        let mut fields = self.extra.clone();
        fields.insert("type".into(), Value::String(self.type_tag.clone()));
        if let Some(name) = &self.name {
            fields.insert("name".into(), Value::String(name.clone()));
        }
        let modelled = [
            ("schema", &self.schema),
            ("initState", &self.init_state),
            ("ui", &self.ui),
        ];
        for (key, value) in modelled {
            if let Some(value) = value {
                fields.insert(key.into(), value.clone());
            }
        }
        fields
    }

    /// Look up any field by its serialized name.
    pub fn get(&self, field: &str) -> Option<Value> {
        self.fields().remove(field)
    }

    /// Serialized names of every field, sorted.
    pub fn field_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.fields().keys().cloned().collect();
        names.sort();
        names
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn unknown_fields_pass_through_deserialization() {
        let descriptor: ElementDescriptor = serde_json::from_value(json!({
            "type": "FILL_BLANK",
            "name": "Fill in the blank",
            "schema": { "type": "object" },
            "isQuestion": true,
            "version": "1.0"
        }))
        .unwrap();

        assert_eq!(descriptor.type_tag(), "FILL_BLANK");
        assert_eq!(descriptor.extra.get("isQuestion"), Some(&json!(true)));
        assert_eq!(descriptor.get("version"), Some(json!("1.0")));
    }

    #[test]
    fn serialization_round_trips_extra_fields() {
        let descriptor = ElementDescriptor::new("FILL_BLANK")
            .name("Fill in the blank")
            .field("isQuestion", json!(true));
        let value = serde_json::to_value(&descriptor).unwrap();

        assert_eq!(value["type"], "FILL_BLANK");
        assert_eq!(value["isQuestion"], true);
        assert_eq!(
            serde_json::from_value::<ElementDescriptor>(value).unwrap(),
            descriptor
        );
    }

    #[test]
    fn fields_match_serialized_form() {
        let descriptor = ElementDescriptor::new("HTML")
            .name("Rich text")
            .ui(json!({ "icon": "mdi-text" }))
            .field("category", json!("content"));
        let serialized = serde_json::to_value(&descriptor).unwrap();

        assert_eq!(Value::Object(descriptor.fields()), serialized);
    }

    #[test]
    fn modelled_fields_win_over_extra() {
        let descriptor = ElementDescriptor::new("HTML").field("type", json!("OTHER"));
        assert_eq!(descriptor.get("type"), Some(json!("HTML")));
    }

    #[test]
    fn field_names_are_sorted() {
        let descriptor = ElementDescriptor::new("HTML")
            .name("Rich text")
            .schema(json!({}))
            .field("abc", json!(1));
        assert_eq!(descriptor.field_names(), vec!["abc", "name", "schema", "type"]);
    }

    #[test]
    fn type_and_schema_only_descriptor_deserializes() {
        let descriptor: ElementDescriptor = serde_json::from_value(json!({
            "type": "FILL_BLANK",
            "schema": { "a": 1 }
        }))
        .unwrap();

        assert!(descriptor.name.is_none());
        assert!(descriptor.init_state.is_none());
        assert_eq!(descriptor.field_names(), vec!["schema", "type"]);
    }

    #[test]
    fn null_fields_are_kept() {
        let published = json!({ "type": "HTML", "schema": null, "ui": null });
        let descriptor: ElementDescriptor = serde_json::from_value(published.clone()).unwrap();

        assert_eq!(descriptor.schema, Some(Value::Null));
        assert_eq!(serde_json::to_value(&descriptor).unwrap(), published);
    }

    #[test]
    fn absent_fields_stay_absent() {
        let descriptor: ElementDescriptor =
            serde_json::from_value(json!({ "type": "HTML", "name": "Rich text" })).unwrap();

        assert!(descriptor.schema.is_none());
        assert!(descriptor.ui.is_none());
        assert!(descriptor.extra.is_empty());
        assert_eq!(
            serde_json::to_value(&descriptor).unwrap(),
            json!({ "type": "HTML", "name": "Rich text" })
        );
    }
}
