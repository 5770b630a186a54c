use yew::prelude::*;

use super::ImageCollectionUploader;
use crate::services::api::ApiClient;
use crate::tops_sheet::top_sheet::{close_top_sheet, TopSheet};

#[derive(Properties, PartialEq, Clone)]
pub struct ImageUploaderDialogProps {
    pub collection_id: AttrValue,
    pub api: ApiClient,
    /// Ref of the sheet; the parent opens it with `open_top_sheet`.
    pub node_ref: NodeRef,
    #[prop_or_default]
    pub on_uploaded: Callback<usize>,
}

/// Top sheet hosting an `ImageCollectionUploader`. Closes itself after a
/// successful batch.
#[function_component(ImageUploaderDialog)]
pub fn image_uploader_dialog(props: &ImageUploaderDialogProps) -> Html {
    let on_uploaded = {
        let sheet = props.node_ref.clone();
        let parent = props.on_uploaded.clone();
        Callback::from(move |count: usize| {
            close_top_sheet(&sheet);
            parent.emit(count);
        })
    };
    let on_close = {
        let sheet = props.node_ref.clone();
        Callback::from(move |_: MouseEvent| close_top_sheet(&sheet))
    };

    html! {
        <TopSheet node_ref={props.node_ref.clone()}>
            <div class="dialog-header">
                <h3>{ "Upload images" }</h3>
                <button type="button" class="btn icon" onclick={on_close}>{ "Close" }</button>
            </div>
            <ImageCollectionUploader
                collection_id={props.collection_id.clone()}
                api={props.api.clone()}
                on_uploaded={on_uploaded}
            />
        </TopSheet>
    }
}
