use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Configuration key toggling whether NER annotations may overlap inside a collection.
pub const CONFIG_ALLOW_OVERLAPPING_NER_ANNOTATIONS: &str = "allow_overlapping_ner_annotations";

/// A named group of documents or images together with the people allowed to
/// see and annotate them.
///
/// The same record is used both for the creation payload (where `id` is empty
/// and skipped on serialization) and for the collection returned by the backend.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Collection {
    /// Backend identifier. Empty until the collection has been created.
    #[serde(rename = "_id", default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub creator_id: String,
    #[serde(default)]
    pub annotators: Vec<String>,
    #[serde(default)]
    pub viewers: Vec<String>,
    #[serde(default)]
    pub labels: Vec<String>,
    pub metadata: CollectionMetadata,
    #[serde(default)]
    pub archived: bool,
    #[serde(default)]
    pub configuration: Configuration,
}

/// Dublin-core style descriptive metadata of a collection.
///
/// Only `title` and `description` are mandatory; the remaining terms are free
/// text and omitted from the payload when unset.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CollectionMetadata {
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contributor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coverage: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rights: Option<String>,
}

/// Free-form collection flags.
///
/// Known flags get typed accessors; anything else the backend understands can
/// still be carried through `set`/`get` without changing this type.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Configuration(Map<String, Value>);

impl Configuration {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    /// Returns the overlap flag, treating a missing or non-boolean entry as `false`.
    pub fn allow_overlapping_ner_annotations(&self) -> bool {
        self.get(CONFIG_ALLOW_OVERLAPPING_NER_ANNOTATIONS)
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    pub fn set_allow_overlapping_ner_annotations(&mut self, allow: bool) {
        self.set(CONFIG_ALLOW_OVERLAPPING_NER_ANNOTATIONS, allow);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_collection_payload_omits_id_and_unset_metadata() {
        let collection = Collection {
            creator_id: "u1".to_string(),
            metadata: CollectionMetadata {
                title: "Tweets".to_string(),
                description: "Sample".to_string(),
                kind: Some("text".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };

        let json = serde_json::to_value(&collection).unwrap();
        assert!(json.get("_id").is_none());
        assert_eq!(json["metadata"]["type"], "text");
        assert!(json["metadata"].get("rights").is_none());
    }

    #[test]
    fn created_collection_reads_backend_id() {
        let json = r#"{
            "_id": "abc123",
            "creator_id": "u1",
            "metadata": {"title": "t", "description": "d"},
            "configuration": {"allow_overlapping_ner_annotations": true, "extra": 3}
        }"#;
        let collection: Collection = serde_json::from_str(json).unwrap();

        assert_eq!(collection.id, "abc123");
        assert!(collection.configuration.allow_overlapping_ner_annotations());
        assert_eq!(collection.configuration.get("extra"), Some(&Value::from(3)));
        assert!(!collection.archived);
    }

    #[test]
    fn overlap_flag_defaults_to_false_when_absent() {
        let mut configuration = Configuration::default();
        assert!(!configuration.allow_overlapping_ner_annotations());

        configuration.set_allow_overlapping_ner_annotations(true);
        assert!(configuration.allow_overlapping_ner_annotations());
        assert_eq!(configuration.len(), 1);
    }
}
