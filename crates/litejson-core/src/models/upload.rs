use bytes::Bytes;

const UNKNOWN_FILE_NAME: &str = "unknown";

/// An uploaded file as handed over by the transport layer
#[derive(Clone, Debug, Default)]
pub struct UploadedFile {
    /// Raw payload; `None` when the request carried no file at all
    pub content: Option<Bytes>,
    pub name: Option<String>,
    /// Size announced by the transport, checked against the configured bounds
    pub declared_size: u64,
}

impl UploadedFile {
    /// File whose declared size is its actual length
    pub fn new(content: impl Into<Bytes>, name: impl Into<String>) -> Self {
        let content = content.into();
        Self {
            declared_size: content.len() as u64,
            content: Some(content),
            name: Some(name.into()),
        }
    }

    /// A request that carried no file
    pub fn missing() -> Self {
        Self::default()
    }

    /// Name used for reporting; falls back to `unknown` for unnamed uploads
    pub fn display_name(&self) -> &str {
        match self.name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => UNKNOWN_FILE_NAME,
        }
    }
}
