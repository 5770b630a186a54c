use serde::{Deserialize, Serialize};

/// A backend processing configuration selectable when creating a collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pipeline {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: String,
}

impl Pipeline {
    /// Text shown in the pipeline selector.
    pub fn display_name(&self) -> &str {
        self.title
            .as_deref()
            .or(self.name.as_deref())
            .unwrap_or(&self.id)
    }
}

/// Looks up the description of the pipeline with the given id.
pub fn pipeline_description<'a>(pipelines: &'a [Pipeline], pipeline_id: &str) -> Option<&'a str> {
    pipelines
        .iter()
        .find(|pipeline| pipeline.id == pipeline_id)
        .map(|pipeline| pipeline.description.as_str())
}
