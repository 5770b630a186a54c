//! Root component.
//!
//! Startup: load the runtime configuration, apply its log level, then ask the
//! backend who is logged in. Once both are known the collection form is shown.
//! After a collection was created, its images can be uploaded from a top sheet.

use common::events::EventBus;
use common::model::collection::Collection;
use common::model::config::ClientConfig;
use common::model::user::User;
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::components::image_uploader::ImageUploaderDialog;
use crate::components::metrics_display::MetricsDisplayComponent;
use crate::components::toast::ToastHost;
use crate::services::api::ApiClient;
use crate::services::config::load_client_config;
use crate::tops_sheet::top_sheet::open_top_sheet;

pub enum Msg {
    ConfigLoaded(ClientConfig),
    UserLoaded(User),
    UserFailed(String),
    CollectionCreated(Collection),
    OpenUploader,
}

pub struct App {
    bus: EventBus,
    api: Option<ApiClient>,
    user: Option<User>,
    error: Option<String>,
    created: Option<Collection>,
    uploader_ref: NodeRef,
}

impl Component for App {
    type Message = Msg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        let link = ctx.link().clone();
        spawn_local(async move {
            link.send_message(Msg::ConfigLoaded(load_client_config().await));
        });
        Self {
            bus: EventBus::new(),
            api: None,
            user: None,
            error: None,
            created: None,
            uploader_ref: NodeRef::default(),
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::ConfigLoaded(config) => {
                log::set_max_level(config.level_filter());
                log::info!("using api at {}", config.api_base_url);
                let api = ApiClient::new(config);
                self.api = Some(api.clone());

                let link = ctx.link().clone();
                spawn_local(async move {
                    match api.logged_in_user().await {
                        Ok(user) => link.send_message(Msg::UserLoaded(user)),
                        Err(err) => link.send_message(Msg::UserFailed(err.to_string())),
                    }
                });
                true
            }
            Msg::UserLoaded(user) => {
                log::debug!("logged in as {}", user.id);
                self.user = Some(user);
                true
            }
            Msg::UserFailed(error) => {
                log::error!("could not load the logged-in user: {error}");
                self.error = Some(error);
                true
            }
            Msg::CollectionCreated(collection) => {
                self.created = Some(collection);
                true
            }
            Msg::OpenUploader => {
                open_top_sheet(&self.uploader_ref);
                false
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let content = match (&self.api, &self.user, &self.error) {
            (_, _, Some(error)) => html! {
                <div class="form-error">{ format!("Not signed in: {error}") }</div>
            },
            (Some(api), Some(user), None) => html! {
                <>
                    <MetricsDisplayComponent
                        api={api.clone()}
                        user={user.clone()}
                        on_created={link.callback(Msg::CollectionCreated)}
                    />
                    if let Some(collection) = &self.created {
                        <div class="created-collection">
                            <span>{ format!("Collection {} created.", collection.id) }</span>
                            <button type="button" class="btn" onclick={link.callback(|_| Msg::OpenUploader)}>
                                { "Upload images" }
                            </button>
                        </div>
                        <ImageUploaderDialog
                            collection_id={collection.id.clone()}
                            api={api.clone()}
                            node_ref={self.uploader_ref.clone()}
                        />
                    }
                </>
            },
            _ => html! { <div class="loading">{ "Loading..." }</div> },
        };

        html! {
            <ContextProvider<EventBus> context={self.bus.clone()}>
                <ToastHost />
                <main class="app">
                    <h1>{ "New metrics collection" }</h1>
                    { content }
                </main>
            </ContextProvider<EventBus>>
        }
    }
}
