use common::model::collection::Collection;
use common::model::pipeline::Pipeline;
use common::sniff::{CsvSniffResult, SniffTicket};

use super::metadata::MetadataTerm;
use crate::services::browser_file::BrowserFile;

pub enum Msg {
    PipelinesLoaded(Vec<Pipeline>),
    PipelinesFailed(String),
    OpenFileDialog,
    CsvFileSelected(BrowserFile),
    CsvSniffed {
        ticket: SniffTicket,
        file_name: String,
        result: Result<CsvSniffResult, String>,
    },
    SetHasHeader(bool),
    SetTextColumn(usize),
    Edit(FieldEdit),
    SetViewers(Vec<String>),
    SetAnnotators(Vec<String>),
    SetLabels(Vec<String>),
    SetAllowOverlap(bool),
    Submit,
    Created(Collection),
    SubmitFailed(String),
}

/// Raw input value of one text-like form field.
pub enum FieldEdit {
    TrainEvery(String),
    Overlap(String),
    Pipeline(String),
    ClassifierParameters(String),
    Title(String),
    Description(String),
    Metadata(MetadataTerm, String),
}
