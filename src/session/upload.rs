use std::path::Path;
use std::sync::Arc;

use crate::foundation::error::{MockwearError, MockwearResult};

/// Raw bytes of a user-supplied design file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DesignUpload {
    /// Display name, usually the file name.
    pub name: String,
    /// Encoded PNG / JPEG / SVG payload.
    pub bytes: Arc<[u8]>,
}

impl DesignUpload {
    /// Wrap an in-memory payload.
    pub fn new(name: impl Into<String>, bytes: impl Into<Arc<[u8]>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }

    /// Read a design file from disk.
    pub fn from_path(path: impl AsRef<Path>) -> MockwearResult<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)
            .map_err(|e| MockwearError::upload(format!("read design '{}': {e}", path.display())))?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self::new(name, bytes))
    }
}
