//! HTTP client of the collection backend.
//!
//! Routes (relative to `ClientConfig::api_base_url`):
//! - `POST collections/image/{collection_id}`: multipart `file`; answers the new image id.
//! - `POST collections/`: multipart `collection` (JSON), optional `file`, `csvTextCol`,
//!   `csvHasHeader`, `overlap`, `train_every`, `pipelineId`, `classifierParameters`;
//!   answers the created collection.
//! - `GET pipelines/`: all pipelines.
//! - `GET auth/logged_in_user`: the user of the current session.
//!
//! Every request carries the session cookies. Authentication itself is handled
//! by the backend.

use common::model::collection::Collection;
use common::model::config::ClientConfig;
use common::model::pipeline::Pipeline;
use common::model::user::User;
use common::repository::{
    CollectionRepository, NewCollectionRequest, PipelineDirectory, RepositoryError,
};
use gloo_net::http::{Request, RequestBuilder};
use serde_json::Value;
use web_sys::{FormData, RequestCredentials};

use super::browser_file::BrowserFile;
use super::http::{decode_json, ensure_success, js_error, network_error, parse_identifier};

#[derive(Debug, Clone, PartialEq)]
pub struct ApiClient {
    config: ClientConfig,
}

impl ApiClient {
    pub fn new(config: ClientConfig) -> Self {
        Self { config }
    }

    fn get(&self, path: &str) -> RequestBuilder {
        Request::get(&self.config.endpoint(path)).credentials(RequestCredentials::Include)
    }

    fn post(&self, path: &str) -> RequestBuilder {
        Request::post(&self.config.endpoint(path)).credentials(RequestCredentials::Include)
    }

    pub async fn logged_in_user(&self) -> Result<User, RepositoryError> {
        let response = self
            .get("auth/logged_in_user")
            .send()
            .await
            .map_err(network_error)?;
        decode_json(ensure_success(response).await?).await
    }
}

fn collection_form_data(request: &NewCollectionRequest<BrowserFile>) -> Result<FormData, RepositoryError> {
    let collection = serde_json::to_string(&request.collection)
        .map_err(|err| RepositoryError::InvalidPayload(err.to_string()))?;
    let classifier_parameters = request
        .classifier_parameters
        .clone()
        .map_or(Value::Null, Value::Object)
        .to_string();

    let data = FormData::new().map_err(js_error)?;
    data.append_with_str("collection", &collection)
        .map_err(js_error)?;
    if let Some(file) = &request.csv_file {
        data.append_with_blob_and_filename("file", file.raw(), &file.raw().name())
            .map_err(js_error)?;
    }
    data.append_with_str("csvTextCol", &request.csv_text_col.to_string())
        .map_err(js_error)?;
    data.append_with_str("csvHasHeader", &request.csv_has_header.to_string())
        .map_err(js_error)?;
    data.append_with_str("overlap", &request.overlap.to_string())
        .map_err(js_error)?;
    data.append_with_str("train_every", &request.train_every.to_string())
        .map_err(js_error)?;
    data.append_with_str("pipelineId", &request.pipeline_id)
        .map_err(js_error)?;
    data.append_with_str("classifierParameters", &classifier_parameters)
        .map_err(js_error)?;
    Ok(data)
}

impl CollectionRepository for ApiClient {
    type File = BrowserFile;

    async fn upload_collection_image(
        &self,
        collection_id: &str,
        filename: &str,
        file: &BrowserFile,
    ) -> Result<String, RepositoryError> {
        let data = FormData::new().map_err(js_error)?;
        data.append_with_blob_and_filename("file", file.raw(), filename)
            .map_err(js_error)?;

        log::debug!("uploading {filename} to collection {collection_id}");
        let response = self
            .post(&format!("collections/image/{collection_id}"))
            .body(data)
            .map_err(network_error)?
            .send()
            .await
            .map_err(network_error)?;
        let body = ensure_success(response)
            .await?
            .text()
            .await
            .map_err(network_error)?;
        Ok(parse_identifier(&body))
    }

    async fn post_collection(
        &self,
        request: NewCollectionRequest<BrowserFile>,
    ) -> Result<Collection, RepositoryError> {
        let data = collection_form_data(&request)?;
        let response = self
            .post("collections/")
            .body(data)
            .map_err(network_error)?
            .send()
            .await
            .map_err(network_error)?;
        decode_json(ensure_success(response).await?).await
    }
}

impl PipelineDirectory for ApiClient {
    async fn get_all_pipelines(&self) -> Result<Vec<Pipeline>, RepositoryError> {
        let response = self.get("pipelines/").send().await.map_err(network_error)?;
        decode_json(ensure_success(response).await?).await
    }
}
