use common::model::file::NamedFile;
use common::sniff::{ChunkSource, ReadError};
use gloo_file::futures::read_as_bytes;
use web_sys::{File, HtmlInputElement};

/// A file picked by the user in the browser.
///
/// Cloning is cheap: only the JS handle is copied, never the content. Content
/// is read lazily, range by range, when the sniffer asks for it.
#[derive(Debug, Clone, PartialEq)]
pub struct BrowserFile {
    raw: File,
    name: String,
}

impl BrowserFile {
    pub fn new(raw: File) -> Self {
        let name = raw.name();
        Self { raw, name }
    }

    pub fn raw(&self) -> &File {
        &self.raw
    }

    /// Every file currently selected in `input`, in selection order.
    pub fn from_input(input: &HtmlInputElement) -> Vec<BrowserFile> {
        let Some(list) = input.files() else {
            return Vec::new();
        };
        (0..list.length())
            .filter_map(|index| list.get(index))
            .map(BrowserFile::new)
            .collect()
    }
}

impl NamedFile for BrowserFile {
    fn name(&self) -> &str {
        &self.name
    }
}

impl ChunkSource for BrowserFile {
    fn len(&self) -> u64 {
        self.raw.size() as u64
    }

    async fn read_chunk(&self, start: u64, end: u64) -> Result<Vec<u8>, ReadError> {
        let part = self
            .raw
            .slice_with_f64_and_f64(start as f64, end as f64)
            .map_err(|err| ReadError(format!("{err:?}")))?;
        read_as_bytes(&gloo_file::Blob::from(part))
            .await
            .map_err(|err| ReadError(err.to_string()))
    }
}
