//! Image upload into an existing collection.
//!
//! `ImageCollectionUploader` lets the user pick any number of images and sends
//! them in parallel through `BatchUploader`. The batch succeeds only when every
//! image was stored; the first failure is shown and nothing is announced.
//! `ImageUploaderDialog` hosts the uploader in a top sheet.

mod dialog;

pub use dialog::ImageUploaderDialog;

use common::events::{AppEvent, EventBus, Subscription};
use common::upload::BatchUploader;
use web_sys::HtmlInputElement;
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::components::helpers::show_toast;
use crate::services::api::ApiClient;
use crate::services::browser_file::BrowserFile;

#[derive(Properties, PartialEq, Clone)]
pub struct ImageUploaderProps {
    pub collection_id: AttrValue,
    pub api: ApiClient,
    /// Called with the number of stored images after a successful batch.
    #[prop_or_default]
    pub on_uploaded: Callback<usize>,
    /// Publish the success message and upload event. Off when the parent reports on its own.
    #[prop_or(true)]
    pub show_message: bool,
}

pub enum Msg {
    FilesSelected(Vec<BrowserFile>),
    Upload,
    Uploaded(usize),
    Failed(String),
}

pub struct ImageCollectionUploader {
    uploader: BatchUploader<ApiClient, EventBus>,
    uploading: bool,
    error: Option<String>,
    input_ref: NodeRef,
    _fallback: Option<Subscription>,
}

impl Component for ImageCollectionUploader {
    type Message = Msg;
    type Properties = ImageUploaderProps;

    fn create(ctx: &Context<Self>) -> Self {
        let (bus, fallback) = match ctx.link().context::<EventBus>(Callback::noop()) {
            Some((bus, _)) => (bus, None),
            None => {
                let bus = EventBus::new();
                let subscription = bus.subscribe(|event| {
                    if let AppEvent::UserMessage(message) = event {
                        show_toast(message);
                    }
                });
                (bus, Some(subscription))
            }
        };
        Self {
            uploader: BatchUploader::new(ctx.props().api.clone(), bus),
            uploading: false,
            error: None,
            input_ref: NodeRef::default(),
            _fallback: fallback,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::FilesSelected(files) => {
                log::debug!("{} image(s) selected", files.len());
                self.uploader.select_files(files);
                self.error = None;
                true
            }
            Msg::Upload => {
                if self.uploading {
                    return false;
                }
                self.uploading = true;
                self.error = None;

                let uploader = self.uploader.clone();
                let collection_id = ctx.props().collection_id.to_string();
                let notify = ctx.props().show_message;
                let link = ctx.link().clone();
                spawn_local(async move {
                    match uploader.upload(&collection_id, notify).await {
                        Ok(count) => link.send_message(Msg::Uploaded(count)),
                        Err(err) => link.send_message(Msg::Failed(err.to_string())),
                    }
                });
                true
            }
            Msg::Uploaded(count) => {
                self.uploading = false;
                self.uploader.select_files(Vec::new());
                if let Some(input) = self.input_ref.cast::<HtmlInputElement>() {
                    input.set_value("");
                }
                ctx.props().on_uploaded.emit(count);
                true
            }
            Msg::Failed(error) => {
                self.uploading = false;
                self.error = Some(format!("Error: {error}"));
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let selected = self.uploader.selected_files().len();
        let on_change = link.callback(|e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            Msg::FilesSelected(BrowserFile::from_input(&input))
        });

        html! {
            <div class="image-uploader">
                <input
                    ref={self.input_ref.clone()}
                    type="file"
                    accept="image/*"
                    multiple={true}
                    onchange={on_change}
                />
                <div class="image-uploader-status">
                    { format!("{selected} image(s) selected") }
                </div>
                if let Some(error) = &self.error {
                    <div class="form-error">{ error.clone() }</div>
                }
                <button
                    type="button"
                    class="btn primary"
                    disabled={self.uploading || selected == 0}
                    onclick={link.callback(|_| Msg::Upload)}
                >
                    { if self.uploading { "Uploading..." } else { "Upload" } }
                </button>
            </div>
        }
    }
}
