//! Typed state of the "create metrics collection" form.
//!
//! `CollectionForm` holds every field the user can edit, plus the values
//! derived from the CSV sniff. It is created fresh for each form, mutated by
//! the view through plain field access and the setters below, validated in
//! `validation`, and turned into a backend request in `submit`.

mod submit;
mod validation;

pub use submit::{submit_collection, SubmitError};
pub use validation::{parse_classifier_parameters, FieldError, FormErrors, FormField};

use crate::model::collection::{CollectionMetadata, Configuration};
use crate::model::user::User;
use crate::sniff::CsvSniffResult;

pub const DEFAULT_TRAIN_EVERY: i64 = 100;
pub const DEFAULT_OVERLAP: f64 = 0.0;

#[derive(Debug, Clone, PartialEq)]
pub struct CollectionForm {
    pub creator_name: String,
    pub creator_id: String,
    pub train_every: Option<i64>,
    pub overlap: Option<f64>,
    pub pipeline_id: Option<String>,
    /// Raw text of the classifier parameters field; must be empty or a JSON object.
    pub classifier_parameters: String,
    pub metadata: CollectionMetadata,
    pub configuration: Configuration,
    pub labels: Vec<String>,
    csv: Option<CsvSelection>,
    annotators: Vec<String>,
    viewers: Vec<String>,
    annotator_error: Option<FieldError>,
}

/// The CSV file picked for the collection and what was derived from it.
#[derive(Debug, Clone, PartialEq)]
struct CsvSelection {
    file_name: String,
    header: Option<Vec<String>>,
    has_header: bool,
    text_col: usize,
}

impl CollectionForm {
    pub fn new(user: &User) -> Self {
        let mut configuration = Configuration::default();
        configuration.set_allow_overlapping_ner_annotations(true);
        Self {
            creator_name: user.display_name.clone(),
            creator_id: user.id.clone(),
            train_every: Some(DEFAULT_TRAIN_EVERY),
            overlap: Some(DEFAULT_OVERLAP),
            pipeline_id: None,
            classifier_parameters: String::new(),
            metadata: CollectionMetadata::default(),
            configuration,
            labels: Vec::new(),
            csv: None,
            annotators: Vec::new(),
            viewers: Vec::new(),
            annotator_error: None,
        }
    }

    /// Records a newly picked CSV file before anything was sniffed from it.
    ///
    /// The file is attached to the request from this point on; header and
    /// text column stay at their headerless defaults until `apply_sniff`.
    pub fn select_csv_file(&mut self, file_name: &str) {
        self.csv = Some(CsvSelection {
            file_name: file_name.to_string(),
            header: None,
            has_header: false,
            text_col: 0,
        });
    }

    /// Records a newly picked CSV file and the values sniffed from it,
    /// replacing whatever an earlier pick had set.
    pub fn apply_sniff(&mut self, file_name: &str, sniff: &CsvSniffResult) {
        self.csv = Some(CsvSelection {
            file_name: file_name.to_string(),
            header: sniff.header.clone(),
            has_header: sniff.has_header,
            text_col: if sniff.has_header {
                sniff.text_column_index
            } else {
                0
            },
        });
    }

    pub fn clear_csv(&mut self) {
        self.csv = None;
    }

    pub fn has_csv_file(&self) -> bool {
        self.csv.is_some()
    }

    pub fn csv_file_name(&self) -> Option<&str> {
        self.csv.as_ref().map(|csv| csv.file_name.as_str())
    }

    /// Fields of the sniffed first line, offered as text column choices.
    pub fn csv_header(&self) -> Option<&[String]> {
        self.csv.as_ref().and_then(|csv| csv.header.as_deref())
    }

    pub fn csv_has_header(&self) -> bool {
        self.csv.as_ref().is_some_and(|csv| csv.has_header)
    }

    pub fn csv_text_col(&self) -> usize {
        self.csv.as_ref().map_or(0, |csv| csv.text_col)
    }

    /// Lets the user override the sniffed header flag. No-op without a CSV file.
    pub fn set_csv_has_header(&mut self, has_header: bool) {
        if let Some(csv) = self.csv.as_mut() {
            csv.has_header = has_header;
        }
    }

    /// Lets the user pick another text column. No-op without a CSV file.
    pub fn set_csv_text_col(&mut self, text_col: usize) {
        if let Some(csv) = self.csv.as_mut() {
            csv.text_col = text_col;
        }
    }

    /// CSV parameters sent to the backend as `(text column, has header)`.
    ///
    /// Without a CSV file the backend gets `(0, false)`; without a header the
    /// text column is always `0`.
    pub fn csv_parameters(&self) -> (usize, bool) {
        match &self.csv {
            Some(csv) if csv.has_header => (csv.text_col, true),
            _ => (0, false),
        }
    }

    pub fn annotators(&self) -> &[String] {
        &self.annotators
    }

    pub fn viewers(&self) -> &[String] {
        &self.viewers
    }

    pub fn set_annotators(&mut self, annotators: Vec<String>) {
        self.annotators = annotators;
        self.viewers_or_annotators_changed();
    }

    pub fn set_viewers(&mut self, viewers: Vec<String>) {
        self.viewers = viewers;
        self.viewers_or_annotators_changed();
    }

    /// Blocking error raised while some annotator is not also a viewer.
    pub fn annotator_error(&self) -> Option<&FieldError> {
        self.annotator_error.as_ref()
    }

    fn viewers_or_annotators_changed(&mut self) {
        let all_viewers = self
            .annotators
            .iter()
            .all(|annotator| self.viewers.contains(annotator));
        self.annotator_error = if all_viewers {
            None
        } else {
            Some(FieldError::AnnotatorsNotViewers)
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        User {
            id: "u1".to_string(),
            display_name: "Ada".to_string(),
        }
    }

    fn sniffed(header: &[&str], has_header: bool, text_column_index: usize) -> CsvSniffResult {
        CsvSniffResult {
            header: Some(header.iter().map(|h| h.to_string()).collect()),
            has_header,
            text_column_index,
        }
    }

    #[test]
    fn new_form_has_defaults_from_user() {
        let form = CollectionForm::new(&user());

        assert_eq!(form.creator_name, "Ada");
        assert_eq!(form.creator_id, "u1");
        assert_eq!(form.train_every, Some(100));
        assert_eq!(form.overlap, Some(0.0));
        assert!(form.configuration.allow_overlapping_ner_annotations());
        assert!(!form.has_csv_file());
        assert_eq!(form.csv_parameters(), (0, false));
    }

    #[test]
    fn sniff_populates_csv_fields() {
        let mut form = CollectionForm::new(&user());
        form.apply_sniff("docs.csv", &sniffed(&["a", "b", "text", "c"], true, 2));

        assert_eq!(form.csv_file_name(), Some("docs.csv"));
        assert!(form.csv_has_header());
        assert_eq!(form.csv_text_col(), 2);
        assert_eq!(form.csv_header().map(<[String]>::len), Some(4));
        assert_eq!(form.csv_parameters(), (2, true));
    }

    #[test]
    fn reselecting_a_file_overwrites_previous_values() {
        let mut form = CollectionForm::new(&user());
        form.apply_sniff("first.csv", &sniffed(&["a", "b", "text", "c"], true, 2));
        form.apply_sniff("second.txt", &sniffed(&["onlyonefield"], false, 0));

        assert_eq!(form.csv_file_name(), Some("second.txt"));
        assert!(!form.csv_has_header());
        assert_eq!(form.csv_text_col(), 0);
        assert_eq!(
            form.csv_header(),
            Some(["onlyonefield".to_string()].as_slice())
        );
        assert_eq!(form.csv_parameters(), (0, false));
    }

    #[test]
    fn picked_file_is_recorded_before_sniff_lands() {
        let mut form = CollectionForm::new(&user());
        form.apply_sniff("first.csv", &sniffed(&["id", "text"], true, 1));
        form.select_csv_file("second.csv");

        assert!(form.has_csv_file());
        assert_eq!(form.csv_file_name(), Some("second.csv"));
        assert_eq!(form.csv_header(), None);
        assert_eq!(form.csv_parameters(), (0, false));

        form.apply_sniff("second.csv", &sniffed(&["a", "text"], true, 1));
        assert_eq!(form.csv_parameters(), (1, true));
    }

    #[test]
    fn text_column_is_ignored_once_header_is_unchecked() {
        let mut form = CollectionForm::new(&user());
        form.apply_sniff("docs.csv", &sniffed(&["id", "text"], true, 1));
        form.set_csv_has_header(false);

        assert_eq!(form.csv_parameters(), (0, false));

        form.set_csv_has_header(true);
        form.set_csv_text_col(0);
        assert_eq!(form.csv_parameters(), (0, true));
    }

    #[test]
    fn csv_overrides_without_file_do_nothing() {
        let mut form = CollectionForm::new(&user());
        form.set_csv_has_header(true);
        form.set_csv_text_col(3);

        assert_eq!(form.csv_parameters(), (0, false));
    }

    #[test]
    fn annotators_outside_viewers_raise_and_clear_error() {
        let mut form = CollectionForm::new(&user());
        form.set_viewers(vec!["u1".to_string()]);
        form.set_annotators(vec!["u1".to_string(), "u2".to_string()]);

        assert_eq!(form.annotator_error(), Some(&FieldError::AnnotatorsNotViewers));

        form.set_viewers(vec!["u1".to_string(), "u2".to_string()]);
        assert_eq!(form.annotator_error(), None);
    }
}
