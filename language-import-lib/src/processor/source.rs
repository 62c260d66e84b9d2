use std::future::Future;
use std::path::{Path, PathBuf};

use crate::error::CsvError;

/// A file handed to the importer: a name, a size and text content that is
/// read once.
pub trait CsvSource {
    fn name(&self) -> &str;

    /// Size in bytes as reported by the uploader or the filesystem.
    fn size(&self) -> u64;

    fn read_text(&self) -> impl Future<Output = Result<String, CsvError>> + Send;
}

fn decode(bytes: &[u8]) -> Result<String, CsvError> {
    std::str::from_utf8(bytes)
        .map(str::to_owned)
        .map_err(|e| CsvError::ReadFailure(format!("file is not valid UTF-8 text: {}", e)))
}

/// An upload already held in memory, e.g. a multipart form field.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    name: String,
    bytes: Vec<u8>,
}

impl UploadedFile {
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }
}

impl CsvSource for UploadedFile {
    fn name(&self) -> &str {
        &self.name
    }

    fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    async fn read_text(&self) -> Result<String, CsvError> {
        decode(&self.bytes)
    }
}

/// A file on local disk. The size is taken from metadata when opened.
#[derive(Debug, Clone)]
pub struct LocalFile {
    path: PathBuf,
    name: String,
    size: u64,
}

impl LocalFile {
    pub async fn open<P: AsRef<Path>>(path: P) -> Result<Self, CsvError> {
        let path = path.as_ref().to_path_buf();
        let metadata = tokio::fs::metadata(&path).await.map_err(|e| {
            CsvError::ReadFailure(format!("cannot access '{}': {}", path.display(), e))
        })?;
        if !metadata.is_file() {
            return Err(CsvError::ReadFailure(format!(
                "'{}' is not a file",
                path.display()
            )));
        }
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        Ok(Self {
            path,
            name,
            size: metadata.len(),
        })
    }
}

impl CsvSource for LocalFile {
    fn name(&self) -> &str {
        &self.name
    }

    fn size(&self) -> u64 {
        self.size
    }

    async fn read_text(&self) -> Result<String, CsvError> {
        let bytes = tokio::fs::read(&self.path).await.map_err(|e| {
            CsvError::ReadFailure(format!("cannot read '{}': {}", self.path.display(), e))
        })?;
        decode(&bytes)
    }
}
