//! Media (image hosting) configuration.

use serde::{Deserialize, Serialize};

/// Public values the front-end needs for direct image uploads.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct MediaConfig {
    #[serde(default)]
    pub cloudinary_cloud_name: Option<String>,
    #[serde(default)]
    pub cloudinary_upload_preset: Option<String>,
}
