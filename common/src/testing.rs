//! In-memory collaborators shared by the unit tests of this crate.

use std::cell::RefCell;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use crate::events::{AppEvent, NotificationChannel};
use crate::model::collection::Collection;
use crate::model::file::MemoryFile;
use crate::model::pipeline::Pipeline;
use crate::repository::{
    CollectionRepository, NewCollectionRequest, PipelineDirectory, RepositoryError,
};

/// Returns `Pending` once, so concurrently joined futures interleave.
pub struct YieldNow(bool);

impl Future for YieldNow {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        if self.0 {
            Poll::Ready(())
        } else {
            self.0 = true;
            cx.waker().wake_by_ref();
            Poll::Pending
        }
    }
}

pub fn yield_now() -> YieldNow {
    YieldNow(false)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Started { collection_id: String, filename: String },
    Finished { filename: String },
}

#[derive(Default)]
pub struct FakeRepository {
    pub calls: RefCell<Vec<Call>>,
    pub failing: Vec<String>,
    pub posted: RefCell<Vec<NewCollectionRequest<MemoryFile>>>,
    pub post_error: Option<RepositoryError>,
    pub pipelines: Vec<Pipeline>,
}

impl FakeRepository {
    pub fn failing_on(filenames: &[&str]) -> Self {
        Self {
            failing: filenames.iter().map(|name| name.to_string()).collect(),
            ..Default::default()
        }
    }

    pub fn started(&self) -> Vec<String> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|call| match call {
                Call::Started { filename, .. } => Some(filename.clone()),
                Call::Finished { .. } => None,
            })
            .collect()
    }
}

pub fn backend_error(filename: &str) -> RepositoryError {
    RepositoryError::Backend {
        status: 500,
        body: format!(r#"{{"error":"cannot store {filename}"}}"#),
    }
}

impl CollectionRepository for FakeRepository {
    type File = MemoryFile;

    async fn upload_collection_image(
        &self,
        collection_id: &str,
        filename: &str,
        _file: &MemoryFile,
    ) -> Result<String, RepositoryError> {
        self.calls.borrow_mut().push(Call::Started {
            collection_id: collection_id.to_string(),
            filename: filename.to_string(),
        });
        yield_now().await;
        self.calls.borrow_mut().push(Call::Finished {
            filename: filename.to_string(),
        });
        if self.failing.iter().any(|name| name == filename) {
            Err(backend_error(filename))
        } else {
            Ok(format!("img-{filename}"))
        }
    }

    async fn post_collection(
        &self,
        request: NewCollectionRequest<MemoryFile>,
    ) -> Result<Collection, RepositoryError> {
        if let Some(error) = &self.post_error {
            return Err(error.clone());
        }
        let mut created = request.collection.clone();
        created.id = "new-collection".to_string();
        self.posted.borrow_mut().push(request);
        Ok(created)
    }
}

impl PipelineDirectory for FakeRepository {
    async fn get_all_pipelines(&self) -> Result<Vec<Pipeline>, RepositoryError> {
        Ok(self.pipelines.clone())
    }
}

#[derive(Default)]
pub struct RecordingChannel {
    pub events: RefCell<Vec<AppEvent>>,
}

impl NotificationChannel for RecordingChannel {
    fn publish(&self, event: AppEvent) {
        self.events.borrow_mut().push(event);
    }
}
