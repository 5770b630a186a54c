//! Free-text chooser rendering its values as removable chips.
//!
//! Used for annotators, viewers and labels. A value is added when Enter is
//! pressed in the text field; blank and duplicate values are ignored.

use web_sys::HtmlInputElement;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct ChipInputProps {
    pub label: AttrValue,
    pub values: Vec<String>,
    pub on_change: Callback<Vec<String>>,
    #[prop_or_default]
    pub placeholder: AttrValue,
    #[prop_or_default]
    pub error: Option<AttrValue>,
}

pub enum Msg {
    Draft(String),
    Commit,
    Remove(usize),
}

pub struct ChipInput {
    draft: String,
}

/// `values` with `draft` appended, or `None` when there is nothing new to add.
pub fn add_chip(values: &[String], draft: &str) -> Option<Vec<String>> {
    let value = draft.trim();
    if value.is_empty() || values.iter().any(|existing| existing == value) {
        return None;
    }
    let mut updated = values.to_vec();
    updated.push(value.to_string());
    Some(updated)
}

impl Component for ChipInput {
    type Message = Msg;
    type Properties = ChipInputProps;

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            draft: String::new(),
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        let props = ctx.props();
        match msg {
            Msg::Draft(draft) => {
                self.draft = draft;
                false
            }
            Msg::Commit => {
                if let Some(values) = add_chip(&props.values, &self.draft) {
                    props.on_change.emit(values);
                }
                self.draft.clear();
                true
            }
            Msg::Remove(index) => {
                if index < props.values.len() {
                    let mut values = props.values.clone();
                    values.remove(index);
                    props.on_change.emit(values);
                }
                false
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let props = ctx.props();
        let link = ctx.link();
        let on_input = link.callback(|e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            Msg::Draft(input.value())
        });
        let on_keydown = link.batch_callback(|e: KeyboardEvent| {
            if e.key() == "Enter" {
                e.prevent_default();
                Some(Msg::Commit)
            } else {
                None
            }
        });

        html! {
            <div class={classes!("chip-input", props.error.as_ref().map(|_| "invalid"))}>
                <label>{ props.label.clone() }</label>
                <div class="chips">
                    { for props.values.iter().enumerate().map(|(index, value)| html! {
                        <span class="chip">
                            { value.clone() }
                            <button
                                type="button"
                                class="chip-remove"
                                title="Remove"
                                onclick={link.callback(move |_| Msg::Remove(index))}
                            >
                                { "×" }
                            </button>
                        </span>
                    }) }
                </div>
                <input
                    type="text"
                    value={self.draft.clone()}
                    placeholder={props.placeholder.clone()}
                    oninput={on_input}
                    onkeydown={on_keydown}
                />
                {
                    if let Some(error) = &props.error {
                        html! { <div class="field-error">{ error.clone() }</div> }
                    } else {
                        html! {}
                    }
                }
            </div>
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adds_trimmed_new_values_only() {
        let values = vec!["PER".to_string()];

        assert_eq!(
            add_chip(&values, " LOC "),
            Some(vec!["PER".to_string(), "LOC".to_string()])
        );
        assert_eq!(add_chip(&values, "PER"), None);
        assert_eq!(add_chip(&values, "   "), None);
    }
}
