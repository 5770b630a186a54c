//! Update function of the metrics collection form.
//!
//! Field edits mutate `CollectionForm` in place. Picking a CSV file records it
//! in the form at once and starts an asynchronous sniff; the `SniffSession`
//! only accepts the result of the latest pick. Submitting validates locally
//! and, if the form is clean, posts the collection through `submit_collection`.
//! A created collection locks the form.

use common::events::{AppEvent, EventBus, NotificationChannel};
use common::form::submit_collection;
use common::model::file::NamedFile;
use common::repository::PipelineDirectory;
use common::sniff::{CsvSniffer, LineReader};
use web_sys::HtmlInputElement;
use yew::platform::spawn_local;
use yew::prelude::*;

use super::messages::{FieldEdit, Msg};
use super::state::MetricsDisplayComponent;
use crate::components::helpers::{alert, optional_text, parse_optional_float, parse_optional_int, show_toast};
use crate::services::browser_file::BrowserFile;

/// Notification channel that shows toasts when the app provides no event bus.
struct ToastChannel;

impl NotificationChannel for ToastChannel {
    fn publish(&self, event: AppEvent) {
        if let AppEvent::UserMessage(message) = event {
            show_toast(&message);
        }
    }
}

pub fn update(
    component: &mut MetricsDisplayComponent,
    ctx: &Context<MetricsDisplayComponent>,
    msg: Msg,
) -> bool {
    match msg {
        Msg::PipelinesLoaded(pipelines) => {
            log::debug!("{} pipeline(s) available", pipelines.len());
            component.pipelines = pipelines;
            component.loading = false;
            true
        }
        Msg::PipelinesFailed(error) => {
            log::error!("loading pipelines failed: {error}");
            alert("Unable to load backend data (check console).");
            component.loading = false;
            component.backend_failed = true;
            true
        }
        Msg::OpenFileDialog => {
            if let Some(input) = component.file_input_ref.cast::<HtmlInputElement>() {
                input.click();
            }
            false
        }
        Msg::CsvFileSelected(file) => {
            start_sniff(component, ctx, file);
            true
        }
        Msg::CsvSniffed {
            ticket,
            file_name,
            result,
        } => {
            let Some(result) = component.sniff.finish(ticket, result) else {
                log::debug!("dropping stale sniff result of {file_name}");
                return false;
            };
            match result {
                Ok(sniff) => component.form.apply_sniff(&file_name, &sniff),
                Err(error) => {
                    // The file stays selected with headerless defaults.
                    log::warn!("could not inspect {file_name}: {error}");
                }
            }
            true
        }
        Msg::SetHasHeader(has_header) => {
            component.form.set_csv_has_header(has_header);
            true
        }
        Msg::SetTextColumn(index) => {
            component.form.set_csv_text_col(index);
            true
        }
        Msg::Edit(edit) => {
            apply_edit(component, edit);
            true
        }
        Msg::SetViewers(viewers) => {
            component.form.set_viewers(viewers);
            true
        }
        Msg::SetAnnotators(annotators) => {
            component.form.set_annotators(annotators);
            true
        }
        Msg::SetLabels(labels) => {
            component.form.labels = labels;
            true
        }
        Msg::SetAllowOverlap(allow) => {
            component
                .form
                .configuration
                .set_allow_overlapping_ner_annotations(allow);
            true
        }
        Msg::Submit => {
            component.submitted = true;
            component.error_message = None;
            if !component.can_submit() {
                return false;
            }
            if let Err(errors) = component.form.validate() {
                log::debug!("form not submitted: {errors}");
                return true;
            }
            component.submitting = true;
            submit(component, ctx);
            true
        }
        Msg::Created(collection) => {
            component.submitting = false;
            component.sniff.cancel();
            component.created_id = Some(collection.id.clone());
            ctx.props().on_created.emit(collection);
            true
        }
        Msg::SubmitFailed(error) => {
            component.submitting = false;
            component.error_message = Some(error);
            true
        }
    }
}

fn apply_edit(component: &mut MetricsDisplayComponent, edit: FieldEdit) {
    let form = &mut component.form;
    match edit {
        FieldEdit::TrainEvery(raw) => form.train_every = parse_optional_int(&raw),
        FieldEdit::Overlap(raw) => form.overlap = parse_optional_float(&raw),
        FieldEdit::Pipeline(id) => form.pipeline_id = optional_text(id),
        FieldEdit::ClassifierParameters(raw) => form.classifier_parameters = raw,
        FieldEdit::Title(title) => form.metadata.title = title,
        FieldEdit::Description(description) => form.metadata.description = description,
        FieldEdit::Metadata(term, value) => *term.slot(&mut form.metadata) = optional_text(value),
    }
}

/// Records `file` in the form right away, cancels any sniff in progress and
/// inspects the first line of `file`.
fn start_sniff(
    component: &mut MetricsDisplayComponent,
    ctx: &Context<MetricsDisplayComponent>,
    file: BrowserFile,
) {
    let file_name = file.name().to_string();
    component.form.select_csv_file(&file_name);
    component.csv_file = Some(file.clone());

    let mut reader = LineReader::new(file);
    let ticket = component.sniff.begin(&reader);

    let link = ctx.link().clone();
    spawn_local(async move {
        let result = CsvSniffer::new()
            .sniff(&mut reader)
            .await
            .map_err(|err| err.to_string());
        link.send_message(Msg::CsvSniffed {
            ticket,
            file_name,
            result,
        });
    });
}

fn submit(component: &MetricsDisplayComponent, ctx: &Context<MetricsDisplayComponent>) {
    let form = component.form.clone();
    let csv_file = component.csv_file.clone();
    let api = ctx.props().api.clone();
    let bus: Option<EventBus> = component.bus.clone();
    let link = ctx.link().clone();

    spawn_local(async move {
        let result = match &bus {
            Some(bus) => submit_collection(&form, csv_file, &api, bus).await,
            None => submit_collection(&form, csv_file, &api, &ToastChannel).await,
        };
        match result {
            Ok(collection) => link.send_message(Msg::Created(collection)),
            Err(err) => link.send_message(Msg::SubmitFailed(err.to_string())),
        }
    });
}

/// Loads the pipeline selector options.
pub fn load_pipelines(ctx: &Context<MetricsDisplayComponent>) {
    let api = ctx.props().api.clone();
    let link = ctx.link().clone();
    spawn_local(async move {
        match api.get_all_pipelines().await {
            Ok(pipelines) => link.send_message(Msg::PipelinesLoaded(pipelines)),
            Err(err) => link.send_message(Msg::PipelinesFailed(err.to_string())),
        }
    });
}
