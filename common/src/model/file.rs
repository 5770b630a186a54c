/// A user-selected file as seen by the domain logic.
///
/// The browser hands over opaque `File` handles; the only property the
/// uploader needs up front is the name sent along with the content.
pub trait NamedFile {
    fn name(&self) -> &str;
}

/// In-memory file, used by tests and by any host that already holds the bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryFile {
    pub name: String,
    pub content: Vec<u8>,
}

impl MemoryFile {
    pub fn new(name: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }
}

impl NamedFile for MemoryFile {
    fn name(&self) -> &str {
        &self.name
    }
}
