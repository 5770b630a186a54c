//! "Create metrics collection" form: root module wiring the Yew `Component`
//! implementation with submodules for state, update logic and view rendering.
//!
//! On first render the pipeline selector is loaded from the backend. A
//! successful creation is announced on the `EventBus` found in context and
//! reported to the parent through `on_created`.

use common::events::EventBus;
use yew::prelude::*;

mod messages;
mod metadata;
mod props;
mod state;
mod update;
mod view;

use messages::Msg;
use props::MetricsDisplayProps;
pub use state::MetricsDisplayComponent;

impl Component for MetricsDisplayComponent {
    type Message = Msg;
    type Properties = MetricsDisplayProps;

    fn create(ctx: &Context<Self>) -> Self {
        let bus = ctx
            .link()
            .context::<EventBus>(Callback::noop())
            .map(|(bus, _)| bus);
        MetricsDisplayComponent::new(&ctx.props().user, bus)
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        update::update(self, ctx, msg)
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        view::view(self, ctx)
    }

    fn rendered(&mut self, ctx: &Context<Self>, first_render: bool) {
        if first_render && !self.loaded {
            self.loaded = true;
            update::load_pipelines(ctx);
        }
    }

    fn destroy(&mut self, _ctx: &Context<Self>) {
        self.sniff.cancel();
    }
}
