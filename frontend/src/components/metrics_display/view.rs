//! View of the metrics collection form.
//!
//! Sections, top to bottom: CSV seed file, training settings, metadata,
//! people and labels, then the submit row. Inline errors appear only after the
//! first submit attempt.

use common::form::{FormErrors, FormField};
use common::model::pipeline::pipeline_description;
use web_sys::{HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};
use yew::html::Scope;
use yew::prelude::*;

use super::messages::{FieldEdit, Msg};
use super::metadata::MetadataTerm;
use super::state::MetricsDisplayComponent;
use crate::components::chip_input::ChipInput;
use crate::services::browser_file::BrowserFile;

type Link = Scope<MetricsDisplayComponent>;

pub fn view(component: &MetricsDisplayComponent, ctx: &Context<MetricsDisplayComponent>) -> Html {
    let link = ctx.link();
    let errors = component.visible_errors();
    let errors = errors.as_ref();

    html! {
        <form class="metrics-form" onsubmit={link.callback(|e: SubmitEvent| {
            e.prevent_default();
            Msg::Submit
        })}>
            { build_csv_section(component, link) }
            { build_training_section(component, link, errors) }
            { build_metadata_section(component, link, errors) }
            { build_people_section(component, link, errors) }
            { build_submit_row(component) }
        </form>
    }
}

fn field_error(errors: Option<&FormErrors>, field: FormField) -> Option<AttrValue> {
    errors
        .and_then(|errors| errors.for_field(field))
        .map(|error| AttrValue::from(error.to_string()))
}

fn error_line(errors: Option<&FormErrors>, field: FormField) -> Html {
    match field_error(errors, field) {
        Some(message) => html! { <div class="field-error">{ message }</div> },
        None => html! {},
    }
}

fn text_input(
    label: &'static str,
    value: String,
    link: &Link,
    edit: fn(String) -> FieldEdit,
) -> Html {
    html! {
        <label class="form-field">
            <span>{ label }</span>
            <input
                type="text"
                value={value}
                oninput={link.callback(move |e: InputEvent| {
                    let input: HtmlInputElement = e.target_unchecked_into();
                    Msg::Edit(edit(input.value()))
                })}
            />
        </label>
    }
}

fn build_csv_section(component: &MetricsDisplayComponent, link: &Link) -> Html {
    let form = &component.form;
    let on_file = link.batch_callback(|e: Event| {
        let input: HtmlInputElement = e.target_unchecked_into();
        BrowserFile::from_input(&input)
            .into_iter()
            .next()
            .map(Msg::CsvFileSelected)
    });

    let header_controls = if form.has_csv_file() {
        let columns = form.csv_header().unwrap_or_default();
        let selected = form.csv_text_col();
        html! {
            <>
                <label class="form-field checkbox">
                    <input
                        type="checkbox"
                        checked={form.csv_has_header()}
                        onchange={link.callback(|e: Event| {
                            let input: HtmlInputElement = e.target_unchecked_into();
                            Msg::SetHasHeader(input.checked())
                        })}
                    />
                    <span>{ "First line is a header" }</span>
                </label>
                if form.csv_has_header() {
                    <label class="form-field">
                        <span>{ "Text column" }</span>
                        <select onchange={link.batch_callback(|e: Event| {
                            let select: HtmlSelectElement = e.target_unchecked_into();
                            select.value().parse().ok().map(Msg::SetTextColumn)
                        })}>
                            { for columns.iter().enumerate().map(|(index, name)| html! {
                                <option value={index.to_string()} selected={index == selected}>
                                    { name.clone() }
                                </option>
                            }) }
                        </select>
                    </label>
                }
            </>
        }
    } else {
        html! {}
    };

    html! {
        <fieldset class="form-section">
            <legend>{ "Documents" }</legend>
            <input
                ref={component.file_input_ref.clone()}
                type="file"
                accept=".csv,.tsv,.txt,text/csv"
                style="display: none"
                onchange={on_file}
            />
            <button type="button" class="btn" onclick={link.callback(|_| Msg::OpenFileDialog)}>
                { "Choose CSV file" }
            </button>
            <span class="file-name">
                { form.csv_file_name().unwrap_or("No file selected").to_string() }
            </span>
            { header_controls }
        </fieldset>
    }
}

fn build_training_section(
    component: &MetricsDisplayComponent,
    link: &Link,
    errors: Option<&FormErrors>,
) -> Html {
    let form = &component.form;
    let selected_pipeline = form.pipeline_id.clone().unwrap_or_default();
    let description = pipeline_description(&component.pipelines, &selected_pipeline);

    html! {
        <fieldset class="form-section">
            <legend>{ "Training" }</legend>
            <label class="form-field">
                <span>{ "Creator" }</span>
                <input type="text" readonly={true} value={form.creator_name.clone()} />
            </label>
            { error_line(errors, FormField::CreatorName) }
            { error_line(errors, FormField::CreatorId) }

            <label class="form-field">
                <span>{ "Train every" }</span>
                <input
                    type="number"
                    min="1"
                    step="1"
                    value={form.train_every.map(|v| v.to_string()).unwrap_or_default()}
                    oninput={link.callback(|e: InputEvent| {
                        let input: HtmlInputElement = e.target_unchecked_into();
                        Msg::Edit(FieldEdit::TrainEvery(input.value()))
                    })}
                />
            </label>
            { error_line(errors, FormField::TrainEvery) }

            <label class="form-field">
                <span>{ "Overlap" }</span>
                <input
                    type="number"
                    min="0"
                    max="1"
                    step="0.01"
                    value={form.overlap.map(|v| v.to_string()).unwrap_or_default()}
                    oninput={link.callback(|e: InputEvent| {
                        let input: HtmlInputElement = e.target_unchecked_into();
                        Msg::Edit(FieldEdit::Overlap(input.value()))
                    })}
                />
            </label>
            { error_line(errors, FormField::Overlap) }

            <label class="form-field">
                <span>{ "Pipeline" }</span>
                <select
                    disabled={component.loading || component.backend_failed}
                    onchange={link.callback(|e: Event| {
                        let select: HtmlSelectElement = e.target_unchecked_into();
                        Msg::Edit(FieldEdit::Pipeline(select.value()))
                    })}
                >
                    <option value="" selected={selected_pipeline.is_empty()}>{ "Select a pipeline" }</option>
                    { for component.pipelines.iter().map(|pipeline| html! {
                        <option value={pipeline.id.clone()} selected={pipeline.id == selected_pipeline}>
                            { pipeline.display_name().to_string() }
                        </option>
                    }) }
                </select>
            </label>
            if let Some(description) = description {
                <p class="pipeline-description">{ description.to_string() }</p>
            }
            { error_line(errors, FormField::PipelineId) }

            <label class="form-field">
                <span>{ "Classifier parameters (JSON object)" }</span>
                <textarea
                    rows="4"
                    value={form.classifier_parameters.clone()}
                    oninput={link.callback(|e: InputEvent| {
                        let area: HtmlTextAreaElement = e.target_unchecked_into();
                        Msg::Edit(FieldEdit::ClassifierParameters(area.value()))
                    })}
                />
            </label>
            { error_line(errors, FormField::ClassifierParameters) }
        </fieldset>
    }
}

fn build_metadata_section(
    component: &MetricsDisplayComponent,
    link: &Link,
    errors: Option<&FormErrors>,
) -> Html {
    let metadata = &component.form.metadata;
    html! {
        <fieldset class="form-section">
            <legend>{ "Metadata" }</legend>
            { text_input("Title", metadata.title.clone(), link, FieldEdit::Title) }
            { error_line(errors, FormField::MetadataTitle) }
            { text_input("Description", metadata.description.clone(), link, FieldEdit::Description) }
            { error_line(errors, FormField::MetadataDescription) }
            <details>
                <summary>{ "More metadata" }</summary>
                { for MetadataTerm::ALL.into_iter().map(|term| html! {
                    <label class="form-field">
                        <span>{ term.label() }</span>
                        <input
                            type="text"
                            value={term.value(metadata).unwrap_or_default().to_string()}
                            oninput={link.callback(move |e: InputEvent| {
                                let input: HtmlInputElement = e.target_unchecked_into();
                                Msg::Edit(FieldEdit::Metadata(term, input.value()))
                            })}
                        />
                    </label>
                }) }
            </details>
        </fieldset>
    }
}

fn build_people_section(
    component: &MetricsDisplayComponent,
    link: &Link,
    errors: Option<&FormErrors>,
) -> Html {
    let form = &component.form;
    let annotator_error = form
        .annotator_error()
        .map(|error| AttrValue::from(error.to_string()));

    html! {
        <fieldset class="form-section">
            <legend>{ "Labels and people" }</legend>
            <ChipInput
                label="Labels"
                placeholder="Add a label and press Enter"
                values={form.labels.clone()}
                on_change={link.callback(Msg::SetLabels)}
                error={field_error(errors, FormField::Labels)}
            />
            <ChipInput
                label="Viewers"
                placeholder="User id"
                values={form.viewers().to_vec()}
                on_change={link.callback(Msg::SetViewers)}
            />
            <ChipInput
                label="Annotators"
                placeholder="User id"
                values={form.annotators().to_vec()}
                on_change={link.callback(Msg::SetAnnotators)}
                error={annotator_error}
            />
            <label class="form-field checkbox">
                <input
                    type="checkbox"
                    checked={form.configuration.allow_overlapping_ner_annotations()}
                    onchange={link.callback(|e: Event| {
                        let input: HtmlInputElement = e.target_unchecked_into();
                        Msg::SetAllowOverlap(input.checked())
                    })}
                />
                <span>{ "Allow overlapping NER annotations" }</span>
            </label>
        </fieldset>
    }
}

fn build_submit_row(component: &MetricsDisplayComponent) -> Html {
    html! {
        <div class="form-actions">
            if let Some(message) = &component.error_message {
                <div class="form-error">{ message.clone() }</div>
            }
            <button type="submit" class="btn primary" disabled={!component.can_submit()}>
                { submit_label(component) }
            </button>
        </div>
    }
}

fn submit_label(component: &MetricsDisplayComponent) -> String {
    match &component.created_id {
        Some(id) => format!("Created collection {id}"),
        None if component.submitting => "Creating...".to_string(),
        None => "Create collection".to_string(),
    }
}
