//! Batch upload of images into a collection.
//!
//! A `BatchUploader` captures the files of the latest selection and, when
//! asked, uploads all of them into one collection. Every file becomes one
//! independent request; the requests are issued together in selection order
//! and joined, so the call resolves only when every request has settled.
//!
//! Reporting is all-or-nothing: `upload` yields the number of uploaded files or
//! the first error observed, and in that case files that did reach the backend
//! are not reported. Callers that must reconcile partial progress use
//! `upload_report`, which waits for every request and keeps the per-file outcome.

use futures::future::{join_all, try_join_all};
use log::{debug, info, warn};
use thiserror::Error;

use crate::events::{AppEvent, NotificationChannel};
use crate::model::file::NamedFile;
use crate::repository::{CollectionRepository, RepositoryError};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum UploadError {
    #[error("a collection identifier is required to upload images")]
    MissingCollectionId,
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Message shown to the user after a fully successful batch.
pub fn upload_success_message(count: usize) -> String {
    format!("Successfully uploaded {count} images.")
}

/// Outcome of one file of a batch, as collected by `upload_report`.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadOutcome {
    pub filename: String,
    pub result: Result<String, RepositoryError>,
}

/// Per-file result of a batch upload.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BatchReport {
    pub outcomes: Vec<UploadOutcome>,
}

impl BatchReport {
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.result.is_ok()).count()
    }

    pub fn failed(&self) -> impl Iterator<Item = &UploadOutcome> {
        self.outcomes.iter().filter(|o| o.result.is_err())
    }

    pub fn is_complete(&self) -> bool {
        self.outcomes.iter().all(|o| o.result.is_ok())
    }
}

pub struct BatchUploader<R: CollectionRepository, N> {
    repository: R,
    notifier: N,
    files: Vec<R::File>,
}

impl<R, N> Clone for BatchUploader<R, N>
where
    R: CollectionRepository + Clone,
    R::File: Clone,
    N: Clone,
{
    fn clone(&self) -> Self {
        Self {
            repository: self.repository.clone(),
            notifier: self.notifier.clone(),
            files: self.files.clone(),
        }
    }
}

impl<R: CollectionRepository, N: NotificationChannel> BatchUploader<R, N> {
    pub fn new(repository: R, notifier: N) -> Self {
        Self {
            repository,
            notifier,
            files: Vec::new(),
        }
    }

    /// Replaces the captured selection.
    pub fn select_files(&mut self, files: Vec<R::File>) {
        debug!("{} file(s) selected for upload", files.len());
        self.files = files;
    }

    pub fn selected_files(&self) -> &[R::File] {
        &self.files
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// Uploads every selected file into `collection_id`.
    ///
    /// Resolves to the number of uploaded files once all requests succeeded, or
    /// to the first error. An empty selection resolves to `0` without any
    /// request or notification. With `notify`, a successful batch publishes a
    /// user message and a `CollectionImagesUploaded` event.
    pub async fn upload(&self, collection_id: &str, notify: bool) -> Result<usize, UploadError> {
        if self.files.is_empty() {
            return Ok(0);
        }
        if collection_id.trim().is_empty() {
            return Err(UploadError::MissingCollectionId);
        }

        debug!(
            "uploading {} image(s) to collection {}",
            self.files.len(),
            collection_id
        );
        let uploaded = try_join_all(self.files.iter().map(|file| {
            self.repository
                .upload_collection_image(collection_id, file.name(), file)
        }))
        .await
        .inspect_err(|err| warn!("image upload to collection {collection_id} failed: {err}"))?;

        let count = uploaded.len();
        info!("uploaded {count} image(s) to collection {collection_id}");
        if notify {
            self.notify_uploaded(collection_id, count);
        }
        Ok(count)
    }

    /// Uploads every selected file and waits for all of them, failed or not.
    ///
    /// Notifications are only published when the whole batch succeeded.
    pub async fn upload_report(
        &self,
        collection_id: &str,
        notify: bool,
    ) -> Result<BatchReport, UploadError> {
        if self.files.is_empty() {
            return Ok(BatchReport::default());
        }
        if collection_id.trim().is_empty() {
            return Err(UploadError::MissingCollectionId);
        }

        let results = join_all(self.files.iter().map(|file| {
            self.repository
                .upload_collection_image(collection_id, file.name(), file)
        }))
        .await;
        let report = BatchReport {
            outcomes: self
                .files
                .iter()
                .zip(results)
                .map(|(file, result)| UploadOutcome {
                    filename: file.name().to_string(),
                    result,
                })
                .collect(),
        };

        let succeeded = report.succeeded();
        if report.is_complete() {
            info!("uploaded {succeeded} image(s) to collection {collection_id}");
            if notify {
                self.notify_uploaded(collection_id, succeeded);
            }
        } else {
            warn!(
                "{} of {} image upload(s) to collection {collection_id} failed",
                report.outcomes.len() - succeeded,
                report.outcomes.len()
            );
        }
        Ok(report)
    }

    fn notify_uploaded(&self, collection_id: &str, count: usize) {
        self.notifier
            .publish(AppEvent::UserMessage(upload_success_message(count)));
        self.notifier.publish(AppEvent::CollectionImagesUploaded {
            collection_id: collection_id.to_string(),
            count,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::file::MemoryFile;
    use crate::testing::{backend_error, Call, FakeRepository, RecordingChannel};
    use futures::executor::block_on;

    fn files(names: &[&str]) -> Vec<MemoryFile> {
        names
            .iter()
            .map(|name| MemoryFile::new(*name, name.as_bytes()))
            .collect()
    }

    fn uploader(
        repository: FakeRepository,
        names: &[&str],
    ) -> BatchUploader<FakeRepository, RecordingChannel> {
        let mut uploader = BatchUploader::new(repository, RecordingChannel::default());
        uploader.select_files(files(names));
        uploader
    }

    #[test]
    fn uploads_one_request_per_file_and_returns_count() {
        let uploader = uploader(FakeRepository::default(), &["a.png", "b.png", "c.png"]);

        let count = block_on(uploader.upload("c1", true)).unwrap();

        assert_eq!(count, 3);
        assert_eq!(uploader.repository().started(), vec!["a.png", "b.png", "c.png"]);
        assert!(uploader.repository().calls.borrow().iter().all(|call| match call {
            Call::Started { collection_id, .. } => collection_id == "c1",
            Call::Finished { .. } => true,
        }));
    }

    #[test]
    fn requests_are_issued_before_any_completes() {
        let uploader = uploader(FakeRepository::default(), &["a.png", "b.png", "c.png"]);

        block_on(uploader.upload("c1", false)).unwrap();

        let calls = uploader.repository().calls.borrow();
        let first_finish = calls
            .iter()
            .position(|call| matches!(call, Call::Finished { .. }))
            .unwrap();
        assert_eq!(first_finish, 3);
    }

    #[test]
    fn success_with_notify_publishes_message_and_domain_event() {
        let uploader = uploader(FakeRepository::default(), &["a.png", "b.png"]);

        block_on(uploader.upload("c1", true)).unwrap();

        assert_eq!(
            *uploader.notifier.events.borrow(),
            vec![
                AppEvent::UserMessage("Successfully uploaded 2 images.".to_string()),
                AppEvent::CollectionImagesUploaded {
                    collection_id: "c1".to_string(),
                    count: 2,
                },
            ]
        );
    }

    #[test]
    fn success_without_notify_is_silent() {
        let uploader = uploader(FakeRepository::default(), &["a.png"]);

        assert_eq!(block_on(uploader.upload("c1", false)), Ok(1));
        assert!(uploader.notifier.events.borrow().is_empty());
    }

    #[test]
    fn empty_selection_short_circuits_to_zero() {
        let uploader = uploader(FakeRepository::default(), &[]);

        assert_eq!(block_on(uploader.upload("c1", true)), Ok(0));
        assert_eq!(block_on(uploader.upload("", true)), Ok(0));
        assert!(uploader.repository().calls.borrow().is_empty());
        assert!(uploader.notifier.events.borrow().is_empty());
    }

    #[test]
    fn any_failure_fails_the_batch_with_that_error() {
        let uploader = uploader(
            FakeRepository::failing_on(&["b.png"]),
            &["a.png", "b.png", "c.png"],
        );

        let result = block_on(uploader.upload("c1", true));

        assert_eq!(result, Err(UploadError::Repository(backend_error("b.png"))));
        assert!(uploader.notifier.events.borrow().is_empty());
    }

    #[test]
    fn blank_collection_id_is_rejected_before_any_request() {
        let uploader = uploader(FakeRepository::default(), &["a.png"]);

        assert_eq!(
            block_on(uploader.upload("  ", true)),
            Err(UploadError::MissingCollectionId)
        );
        assert!(uploader.repository().calls.borrow().is_empty());
    }

    #[test]
    fn new_selection_replaces_the_previous_one() {
        let mut uploader = uploader(FakeRepository::default(), &["a.png", "b.png"]);
        uploader.select_files(files(&["z.png"]));

        assert_eq!(block_on(uploader.upload("c1", false)), Ok(1));
        assert_eq!(uploader.repository().started(), vec!["z.png"]);
    }

    #[test]
    fn report_keeps_per_file_outcomes_on_partial_failure() {
        let uploader = uploader(
            FakeRepository::failing_on(&["b.png"]),
            &["a.png", "b.png", "c.png"],
        );

        let report = block_on(uploader.upload_report("c1", true)).unwrap();

        assert_eq!(report.succeeded(), 2);
        assert!(!report.is_complete());
        let failed: Vec<_> = report.failed().map(|o| o.filename.as_str()).collect();
        assert_eq!(failed, vec!["b.png"]);
        assert_eq!(report.outcomes[0].result, Ok("img-a.png".to_string()));
        assert!(uploader.notifier.events.borrow().is_empty());
    }

    #[test]
    fn error_message_is_the_backend_payload() {
        let err = UploadError::Repository(backend_error("b.png"));
        assert_eq!(err.to_string(), r#"{"error":"cannot store b.png"}"#);
    }
}
