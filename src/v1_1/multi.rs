/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::v1_1::errors::CloudinaryError;
use crate::v1_1::parsers::from_number_or_string;
use crate::v1_1::{ApiParams, ParameterTable, Transformation};
use serde::Deserialize;

/// Combines every image carrying a tag into one animated image or PDF
#[derive(Debug, Clone, Default)]
pub struct MultiParams {
    pub tag: String,
    pub format: Option<String>,
    pub transformation: Option<Transformation>,
    pub notification_url: Option<String>,
    pub is_async: Option<bool>,
}

impl MultiParams {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            ..Default::default()
        }
    }
}

impl ApiParams for MultiParams {
    fn check(&self) -> Result<(), CloudinaryError> {
        if self.tag.is_empty() {
            return Err(CloudinaryError::Validation("tag must be set".to_string()));
        }
        Ok(())
    }

    fn to_params(&self) -> ParameterTable {
        let mut params = ParameterTable::new();
        params
            .set("tag", self.tag.as_str())
            .set_opt("format", self.format.as_deref())
            .set_opt("notification_url", self.notification_url.as_deref());
        if let Some(t) = &self.transformation {
            params.set("transformation", t.generate());
        }
        if let Some(v) = self.is_async {
            params.set_bool("async", v);
        }
        params
    }
}

/// Holds information on the generated multi-page resource
#[derive(Deserialize, Debug, Clone)]
pub struct MultiResult {
    #[serde(default)]
    pub url: Option<String>,

    #[serde(default)]
    pub secure_url: Option<String>,

    #[serde(default)]
    pub public_id: Option<String>,

    #[serde(default, deserialize_with = "from_number_or_string")]
    pub version: Option<String>,
}
