use log::{info, warn};
use thiserror::Error;

use super::{parse_classifier_parameters, CollectionForm, FormErrors, DEFAULT_OVERLAP};
use crate::events::{AppEvent, NotificationChannel};
use crate::model::collection::Collection;
use crate::repository::{CollectionRepository, NewCollectionRequest, RepositoryError};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SubmitError {
    /// Rejected locally; nothing was sent.
    #[error(transparent)]
    Invalid(#[from] FormErrors),
    /// The backend refused or could not be reached.
    #[error("Error: {0}")]
    Backend(#[from] RepositoryError),
}

impl CollectionForm {
    /// Validates the form and assembles the creation request.
    ///
    /// `csv_file` is only attached when a CSV file was sniffed into the form.
    pub fn build_request<F>(&self, csv_file: Option<F>) -> Result<NewCollectionRequest<F>, FormErrors> {
        self.validate()?;
        let classifier_parameters =
            parse_classifier_parameters(&self.classifier_parameters).map_err(|e| FormErrors(vec![e]))?;
        let (csv_text_col, csv_has_header) = self.csv_parameters();

        let collection = Collection {
            id: String::new(),
            creator_id: self.creator_id.clone(),
            annotators: self.annotators().to_vec(),
            viewers: self.viewers().to_vec(),
            labels: self.labels.clone(),
            metadata: self.metadata.clone(),
            archived: false,
            configuration: self.configuration.clone(),
        };

        Ok(NewCollectionRequest {
            collection,
            csv_file: csv_file.filter(|_| self.has_csv_file()),
            csv_text_col,
            csv_has_header,
            overlap: self.overlap.unwrap_or(DEFAULT_OVERLAP),
            train_every: self.train_every.unwrap_or(super::DEFAULT_TRAIN_EVERY),
            pipeline_id: self.pipeline_id.clone().unwrap_or_default(),
            classifier_parameters,
        })
    }
}

/// Validates `form`, creates the collection and announces it.
///
/// On success a user message and a `CollectionAddedOrArchived` event are
/// published. Nothing is published on failure, and there is no retry.
pub async fn submit_collection<R, N>(
    form: &CollectionForm,
    csv_file: Option<R::File>,
    repository: &R,
    notifier: &N,
) -> Result<Collection, SubmitError>
where
    R: CollectionRepository,
    N: NotificationChannel,
{
    let request = form.build_request(csv_file)?;
    info!(
        "creating collection '{}' with {} label(s)",
        request.collection.metadata.title,
        request.collection.labels.len()
    );

    let created = repository
        .post_collection(request)
        .await
        .inspect_err(|err| warn!("collection creation failed: {err}"))?;

    notifier.publish(AppEvent::UserMessage(format!(
        "Successfully added collection with ID {}",
        created.id
    )));
    notifier.publish(AppEvent::CollectionAddedOrArchived(created.clone()));
    Ok(created)
}
