//! Collaborator interfaces of the collection backend.
//!
//! The domain logic in `upload` and `form` only talks to these traits. The
//! frontend implements them on top of `gloo-net`; tests use in-memory fakes.
//! All futures are `!Send`: everything runs on the single browser event loop.

use serde_json::{Map, Value};
use thiserror::Error;

use crate::model::collection::Collection;
use crate::model::file::NamedFile;
use crate::model::pipeline::Pipeline;

/// Failure of a call to the collection backend.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RepositoryError {
    /// The request never produced a response.
    #[error("network error: {0}")]
    Network(String),
    /// The backend answered with a non-success status. `body` is the
    /// serialized error the backend sent.
    #[error("{body}")]
    Backend { status: u16, body: String },
    /// A request could not be encoded or a response could not be decoded.
    #[error("invalid payload: {0}")]
    InvalidPayload(String),
}

/// Everything needed to create a collection, optionally seeded from a CSV file.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCollectionRequest<F> {
    pub collection: Collection,
    pub csv_file: Option<F>,
    pub csv_text_col: usize,
    pub csv_has_header: bool,
    pub overlap: f64,
    pub train_every: i64,
    pub pipeline_id: String,
    pub classifier_parameters: Option<Map<String, Value>>,
}

#[allow(async_fn_in_trait)]
pub trait CollectionRepository {
    type File: NamedFile;

    /// Uploads one image into a collection and returns the id the backend gave it.
    async fn upload_collection_image(
        &self,
        collection_id: &str,
        filename: &str,
        file: &Self::File,
    ) -> Result<String, RepositoryError>;

    /// Creates a collection and returns it as stored by the backend.
    async fn post_collection(
        &self,
        request: NewCollectionRequest<Self::File>,
    ) -> Result<Collection, RepositoryError>;
}

#[allow(async_fn_in_trait)]
pub trait PipelineDirectory {
    async fn get_all_pipelines(&self) -> Result<Vec<Pipeline>, RepositoryError>;
}
