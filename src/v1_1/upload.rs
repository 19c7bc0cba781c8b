/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::v1_1::errors::CloudinaryError;
use crate::v1_1::parsers::{from_empty_str_to_none, from_number_or_string};
use crate::v1_1::{
    render_eager_list, ApiParams, EagerTransformation, FileSource, ParameterTable, ResourceType,
    Transformation,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Parameters of an upload request.
///
/// See [Cloudinary Upload API](https://cloudinary.com/documentation/image_upload_api_reference)
/// for more details on the individual fields.
#[derive(Debug, Clone, Default)]
pub struct ImageUploadParams {
    pub file: Option<FileSource>,
    pub public_id: Option<String>,
    pub resource_type: ResourceType,
    /// Delivery type, `upload` when unset
    pub delivery_type: Option<String>,
    pub format: Option<String>,
    /// Incoming transformation applied before storing
    pub transformation: Option<Transformation>,
    pub eager_transforms: Vec<EagerTransformation>,
    pub tags: Vec<String>,
    pub notification_url: Option<String>,
    pub eager_notification_url: Option<String>,
    pub backup: Option<bool>,
    pub exif: Option<bool>,
    pub faces: Option<bool>,
    pub colors: Option<bool>,
    pub image_metadata: Option<bool>,
    pub use_filename: Option<bool>,
    pub unique_filename: Option<bool>,
    pub eager_async: Option<bool>,
    pub invalidate: Option<bool>,
    pub overwrite: Option<bool>,
}

impl ImageUploadParams {
    pub fn new(file: FileSource) -> Self {
        Self {
            file: Some(file),
            ..Default::default()
        }
    }
}

impl ApiParams for ImageUploadParams {
    fn check(&self) -> Result<(), CloudinaryError> {
        if self.file.is_none() {
            return Err(CloudinaryError::Validation(
                "file must be specified in upload params".to_string(),
            ));
        }
        Ok(())
    }

    fn to_params(&self) -> ParameterTable {
        let mut params = ParameterTable::new();
        params
            .set_opt("public_id", self.public_id.as_deref())
            .set_opt("type", self.delivery_type.as_deref())
            .set_opt("format", self.format.as_deref())
            .set_opt("notification_url", self.notification_url.as_deref())
            .set_opt("eager_notification_url", self.eager_notification_url.as_deref())
            .set("tags", self.tags.join(","))
            .set("eager", render_eager_list(&self.eager_transforms));
        if let Some(t) = &self.transformation {
            params.set("transformation", t.generate());
        }

        for (key, flag) in [
            ("backup", self.backup),
            ("exif", self.exif),
            ("faces", self.faces),
            ("colors", self.colors),
            ("image_metadata", self.image_metadata),
            ("use_filename", self.use_filename),
            ("unique_filename", self.unique_filename),
            ("eager_async", self.eager_async),
            ("invalidate", self.invalidate),
            ("overwrite", self.overwrite),
        ] {
            if let Some(v) = flag {
                params.set_bool(key, v);
            }
        }
        params
    }

    fn resource_type(&self) -> &str {
        self.resource_type.as_str()
    }

    fn file(&self) -> Option<FileSource> {
        self.file.clone()
    }
}

/// Holds information returned from an upload.
#[derive(Deserialize, Debug, Clone)]
pub struct ImageUploadResult {
    pub public_id: String,

    #[serde(default, deserialize_with = "from_number_or_string")]
    pub version: Option<String>,

    #[serde(default, deserialize_with = "from_empty_str_to_none")]
    pub signature: Option<String>,

    #[serde(default)]
    pub width: u32,

    #[serde(default)]
    pub height: u32,

    #[serde(default, deserialize_with = "from_empty_str_to_none")]
    pub format: Option<String>,

    #[serde(default)]
    pub resource_type: Option<String>,

    #[serde(rename = "type", default)]
    pub delivery_type: Option<String>,

    #[serde(default)]
    pub bytes: u64,

    pub url: String,

    pub secure_url: String,

    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(default)]
    pub eager: Vec<EagerResult>,
}

/// One eager transformation generated during an upload
#[derive(Deserialize, Debug, Clone)]
pub struct EagerResult {
    #[serde(default)]
    pub transformation: String,

    pub url: String,

    pub secure_url: String,
}
