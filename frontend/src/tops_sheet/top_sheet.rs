//! Sliding sheet used as dialog chrome.
//!
//! The sheet is always mounted; it becomes visible when the `show` class is
//! added to its root element. The class is added after a short delay so the
//! CSS transition runs even when the sheet was just mounted.

use gloo_timers::callback::Timeout;
use uuid::Uuid;
use web_sys::Element;
use yew::{html, Component, Context, Html, NodeRef, Properties};

const SHOW_CLASS: &str = "show";
const OPEN_DELAY_MS: u32 = 50;

pub struct TopSheet {
    id: String,
}

#[derive(Properties, PartialEq)]
pub struct Props {
    #[prop_or_default]
    pub children: Html,
    pub node_ref: NodeRef,
}

impl Component for TopSheet {
    type Message = ();
    type Properties = Props;

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            id: format!("sheet-{}", Uuid::new_v4()),
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        html! {
            <div class="top-sheet" id={self.id.clone()} ref={ctx.props().node_ref.clone()}>
                { ctx.props().children.clone() }
            </div>
        }
    }
}

pub fn open_top_sheet(sheet_ref: &NodeRef) {
    let sheet_ref = sheet_ref.clone();
    Timeout::new(OPEN_DELAY_MS, move || set_shown(&sheet_ref, true)).forget();
}

pub fn close_top_sheet(sheet_ref: &NodeRef) {
    set_shown(sheet_ref, false);
}

fn set_shown(sheet_ref: &NodeRef, shown: bool) {
    let Some(sheet) = sheet_ref.cast::<Element>() else {
        log::warn!("top sheet is not mounted");
        return;
    };
    let classes = sheet.class_list();
    let result = if shown {
        classes.add_1(SHOW_CLASS)
    } else {
        classes.remove_1(SHOW_CLASS)
    };
    if let Err(err) = result {
        log::warn!("could not toggle top sheet {}: {err:?}", sheet.id());
    }
}
