use common::events::{AppEvent, EventBus, Subscription};
use yew::{html, Callback, Component, Context, Html};

use super::helpers::show_toast;

/// Renders every `UserMessage` published on the event bus as a toast.
///
/// Needs an `EventBus` in context; without one it renders nothing and listens
/// to nothing.
pub struct ToastHost {
    _subscription: Option<Subscription>,
}

impl Component for ToastHost {
    type Message = ();
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        let subscription = ctx
            .link()
            .context::<EventBus>(Callback::noop())
            .map(|(bus, _)| bus.subscribe(on_event));
        if subscription.is_none() {
            log::warn!("no event bus in context, user messages will not be shown");
        }
        Self {
            _subscription: subscription,
        }
    }

    fn view(&self, _ctx: &Context<Self>) -> Html {
        html! {}
    }
}

fn on_event(event: &AppEvent) {
    match event {
        AppEvent::UserMessage(message) => show_toast(message),
        AppEvent::CollectionAddedOrArchived(collection) => {
            log::info!("collection {} added or archived", collection.id)
        }
        AppEvent::CollectionImagesUploaded {
            collection_id,
            count,
        } => log::info!("{count} image(s) added to collection {collection_id}"),
    }
}
