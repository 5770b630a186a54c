use std::fmt;

use serde_json::{Map, Value};
use thiserror::Error;

use super::CollectionForm;

/// Form fields that can carry a validation error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    CreatorName,
    CreatorId,
    TrainEvery,
    Overlap,
    PipelineId,
    ClassifierParameters,
    MetadataTitle,
    MetadataDescription,
    Labels,
    Annotators,
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FormField::CreatorName => "Creator name",
            FormField::CreatorId => "Creator ID",
            FormField::TrainEvery => "Train every",
            FormField::Overlap => "Overlap",
            FormField::PipelineId => "Pipeline",
            FormField::ClassifierParameters => "Classifier parameters",
            FormField::MetadataTitle => "Title",
            FormField::MetadataDescription => "Description",
            FormField::Labels => "Labels",
            FormField::Annotators => "Annotators",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FieldError {
    #[error("{0} is required.")]
    Required(FormField),
    #[error("{field} must be at least {min}.")]
    BelowMinimum { field: FormField, min: f64 },
    #[error("{field} must be at most {max}.")]
    AboveMaximum { field: FormField, max: f64 },
    #[error("Invalid JSON: {0}")]
    InvalidJson(String),
    #[error("At least one label is required.")]
    NoLabels,
    #[error("All annotators must also be viewers.")]
    AnnotatorsNotViewers,
}

impl FieldError {
    pub fn field(&self) -> FormField {
        match self {
            FieldError::Required(field)
            | FieldError::BelowMinimum { field, .. }
            | FieldError::AboveMaximum { field, .. } => *field,
            FieldError::InvalidJson(_) => FormField::ClassifierParameters,
            FieldError::NoLabels => FormField::Labels,
            FieldError::AnnotatorsNotViewers => FormField::Annotators,
        }
    }
}

/// All validation errors of one form, in field order.
#[derive(Debug, Clone, PartialEq, Default, Error)]
#[error("{} field(s) need attention", .0.len())]
pub struct FormErrors(pub Vec<FieldError>);

impl FormErrors {
    pub fn for_field(&self, field: FormField) -> Option<&FieldError> {
        self.0.iter().find(|error| error.field() == field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }
}

/// Parses the classifier parameters field.
///
/// A blank field means "no parameters". Anything else must be a JSON object;
/// the error carries the parser message or the type that was found instead.
pub fn parse_classifier_parameters(raw: &str) -> Result<Option<Map<String, Value>>, FieldError> {
    if raw.trim().is_empty() {
        return Ok(None);
    }
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(map)) => Ok(Some(map)),
        Ok(other) => Err(FieldError::InvalidJson(format!(
            "Needs to be object and not {}",
            json_type_name(&other)
        ))),
        Err(err) => Err(FieldError::InvalidJson(err.to_string())),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn required_text(errors: &mut Vec<FieldError>, field: FormField, value: &str) {
    if value.trim().is_empty() {
        errors.push(FieldError::Required(field));
    }
}

impl CollectionForm {
    /// Checks every rule that blocks submission.
    ///
    /// Labels are checked first so the "at least one label" message is
    /// always the first one reported.
    pub fn validate(&self) -> Result<(), FormErrors> {
        let mut errors = Vec::new();

        if self.labels.iter().all(|label| label.trim().is_empty()) {
            errors.push(FieldError::NoLabels);
        }

        required_text(&mut errors, FormField::CreatorName, &self.creator_name);
        required_text(&mut errors, FormField::CreatorId, &self.creator_id);

        match self.train_every {
            None => errors.push(FieldError::Required(FormField::TrainEvery)),
            Some(value) if value < 1 => errors.push(FieldError::BelowMinimum {
                field: FormField::TrainEvery,
                min: 1.0,
            }),
            Some(_) => {}
        }

        match self.overlap {
            None => errors.push(FieldError::Required(FormField::Overlap)),
            Some(value) if value.is_nan() || value < 0.0 => {
                errors.push(FieldError::BelowMinimum {
                    field: FormField::Overlap,
                    min: 0.0,
                })
            }
            Some(value) if value > 1.0 => errors.push(FieldError::AboveMaximum {
                field: FormField::Overlap,
                max: 1.0,
            }),
            Some(_) => {}
        }

        required_text(
            &mut errors,
            FormField::PipelineId,
            self.pipeline_id.as_deref().unwrap_or_default(),
        );

        if let Err(err) = parse_classifier_parameters(&self.classifier_parameters) {
            errors.push(err);
        }

        required_text(&mut errors, FormField::MetadataTitle, &self.metadata.title);
        required_text(
            &mut errors,
            FormField::MetadataDescription,
            &self.metadata.description,
        );

        if let Some(err) = self.annotator_error() {
            errors.push(err.clone());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(FormErrors(errors))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::user::User;

    fn valid_form() -> CollectionForm {
        let mut form = CollectionForm::new(&User {
            id: "u1".to_string(),
            display_name: "Ada".to_string(),
        });
        form.labels = vec!["PER".to_string(), "LOC".to_string()];
        form.pipeline_id = Some("p1".to_string());
        form.metadata.title = "Tweets".to_string();
        form.metadata.description = "Sampled tweets".to_string();
        form
    }

    #[test]
    fn complete_form_is_valid() {
        assert_eq!(valid_form().validate(), Ok(()));
    }

    #[test]
    fn missing_labels_is_reported_first() {
        let mut form = valid_form();
        form.labels.clear();
        form.metadata.title.clear();

        let errors = form.validate().unwrap_err();

        assert_eq!(errors.0[0], FieldError::NoLabels);
        assert_eq!(errors.0[0].to_string(), "At least one label is required.");
        assert_eq!(
            errors.for_field(FormField::MetadataTitle),
            Some(&FieldError::Required(FormField::MetadataTitle))
        );
    }

    #[test]
    fn numeric_ranges_are_enforced() {
        let mut form = valid_form();
        form.train_every = Some(0);
        form.overlap = Some(1.5);

        let errors = form.validate().unwrap_err();

        assert_eq!(
            errors.for_field(FormField::TrainEvery).map(ToString::to_string),
            Some("Train every must be at least 1.".to_string())
        );
        assert_eq!(
            errors.for_field(FormField::Overlap),
            Some(&FieldError::AboveMaximum {
                field: FormField::Overlap,
                max: 1.0
            })
        );

        form.train_every = None;
        form.overlap = Some(-0.1);
        let errors = form.validate().unwrap_err();
        assert_eq!(
            errors.for_field(FormField::TrainEvery),
            Some(&FieldError::Required(FormField::TrainEvery))
        );
        assert!(matches!(
            errors.for_field(FormField::Overlap),
            Some(FieldError::BelowMinimum { .. })
        ));
    }

    #[test]
    fn overlap_bounds_are_inclusive() {
        let mut form = valid_form();
        form.overlap = Some(1.0);
        assert!(form.validate().is_ok());
        form.overlap = Some(0.0);
        assert!(form.validate().is_ok());
    }

    #[test]
    fn classifier_parameters_must_be_a_json_object() {
        assert_eq!(parse_classifier_parameters(""), Ok(None));
        assert_eq!(parse_classifier_parameters("   "), Ok(None));

        let parsed = parse_classifier_parameters(r#"{"C": 0.5}"#).unwrap().unwrap();
        assert_eq!(parsed.get("C"), Some(&Value::from(0.5)));

        assert_eq!(
            parse_classifier_parameters("42"),
            Err(FieldError::InvalidJson("Needs to be object and not number".to_string()))
        );
        assert_eq!(
            parse_classifier_parameters("[1, 2]"),
            Err(FieldError::InvalidJson("Needs to be object and not array".to_string()))
        );
        match parse_classifier_parameters("{oops") {
            Err(FieldError::InvalidJson(message)) => assert!(message.contains("line 1")),
            other => panic!("expected parser error, got {other:?}"),
        }
    }

    #[test]
    fn invalid_classifier_json_blocks_submission() {
        let mut form = valid_form();
        form.classifier_parameters = "\"just a string\"".to_string();

        let errors = form.validate().unwrap_err();

        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors.0[0].to_string(),
            "Invalid JSON: Needs to be object and not string"
        );
        assert_eq!(errors.0[0].field(), FormField::ClassifierParameters);
    }

    #[test]
    fn annotator_subset_violation_blocks_until_restored() {
        let mut form = valid_form();
        form.set_viewers(vec!["u1".to_string()]);
        form.set_annotators(vec!["u2".to_string()]);

        let errors = form.validate().unwrap_err();
        assert_eq!(
            errors.for_field(FormField::Annotators),
            Some(&FieldError::AnnotatorsNotViewers)
        );

        form.set_viewers(vec!["u1".to_string(), "u2".to_string()]);
        assert_eq!(form.validate(), Ok(()));
    }
}
