//! Runtime state of the metrics collection form.

use common::events::EventBus;
use common::form::{CollectionForm, FormErrors};
use common::model::pipeline::Pipeline;
use common::model::user::User;
use common::sniff::SniffSession;
use yew::prelude::*;

use crate::services::browser_file::BrowserFile;

/// State container of the `MetricsDisplayComponent`.
///
/// Fields are `pub` because `update` and `view` read and mutate them directly.
pub struct MetricsDisplayComponent {
    /// Every editable field and the values sniffed from the CSV file.
    pub form: CollectionForm,

    /// Pipelines offered in the selector; empty until loaded.
    pub pipelines: Vec<Pipeline>,

    /// True while the pipelines request is in flight.
    pub loading: bool,

    /// Pipelines could not be loaded; the form cannot be submitted.
    pub backend_failed: bool,

    /// Set on the first submit attempt. Inline errors are only shown afterwards.
    pub submitted: bool,

    /// True while the creation request is in flight.
    pub submitting: bool,

    /// Id of the collection created by this form. The form is locked once set.
    pub created_id: Option<String>,

    /// Backend error of the last submit, rendered above the buttons.
    pub error_message: Option<String>,

    /// The CSV file picked by the user, attached to the creation request.
    pub csv_file: Option<BrowserFile>,

    /// Sniff of the latest picked file. Results of older picks are dropped.
    pub sniff: SniffSession,

    pub file_input_ref: NodeRef,

    /// Bus from context, if any. Creation events are published on it.
    pub bus: Option<EventBus>,

    /// Guard of the first-render pipeline load.
    pub loaded: bool,
}

impl MetricsDisplayComponent {
    pub fn new(user: &User, bus: Option<EventBus>) -> Self {
        Self {
            form: CollectionForm::new(user),
            pipelines: Vec::new(),
            loading: true,
            backend_failed: false,
            submitted: false,
            submitting: false,
            created_id: None,
            error_message: None,
            csv_file: None,
            sniff: SniffSession::new(),
            file_input_ref: NodeRef::default(),
            bus,
            loaded: false,
        }
    }

    /// Whether the submit button is live.
    pub fn can_submit(&self) -> bool {
        !self.submitting && !self.backend_failed && self.created_id.is_none()
    }

    /// Validation errors to render, or `None` before the first submit.
    pub fn visible_errors(&self) -> Option<FormErrors> {
        if !self.submitted {
            return None;
        }
        self.form.validate().err()
    }
}
