//! Properties of the `MetricsDisplayComponent`.

use common::model::collection::Collection;
use common::model::user::User;
use yew::prelude::*;

use crate::services::api::ApiClient;

#[derive(Properties, PartialEq, Clone)]
pub struct MetricsDisplayProps {
    /// Client of the collection backend, used for pipelines and creation.
    pub api: ApiClient,
    /// The logged-in user, recorded as the creator of the collection.
    pub user: User,
    /// Called with the collection returned by the backend after a successful creation.
    #[prop_or_default]
    pub on_created: Callback<Collection>,
}
