use serde::{Deserialize, Serialize};

/// Metadata for one regular file under the served root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    pub name: String,
    #[serde(rename = "type")]
    pub mime_type: String,
    pub size_bytes: u64,
    pub created_at: String,
    pub modified_at: String,
    /// Parent directory relative to the root, `/`-separated; empty at the top level.
    pub subdirectory: String,
}

impl FileRecord {
    /// Relative path that the download endpoint accepts for this record.
    pub fn relative_path(&self) -> String {
        if self.subdirectory.is_empty() {
            self.name.clone()
        } else {
            format!("{}/{}", self.subdirectory, self.name)
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileListResponse {
    pub files: Vec<FileRecord>,
}
