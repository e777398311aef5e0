//! Upload defaults.

use serde::{Deserialize, Serialize};

fn default_placeholder_file_name() -> String {
    String::from("<<uploaded file>>")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UploadConfig {
    /// File name recorded when an upload carries neither a reference nor a
    /// file name.
    #[serde(default = "default_placeholder_file_name")]
    pub placeholder_file_name: String,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            placeholder_file_name: default_placeholder_file_name(),
        }
    }
}
