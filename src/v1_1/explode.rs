/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::v1_1::errors::CloudinaryError;
use crate::v1_1::{ApiParams, ParameterTable, Transformation};
use serde::Deserialize;

/// Splits a multi-page resource (PDF, animated GIF) into one image per page
#[derive(Debug, Clone)]
pub struct ExplodeParams {
    pub public_id: String,
    pub transformation: Transformation,
    pub format: Option<String>,
    pub notification_url: Option<String>,
}

impl ExplodeParams {
    pub fn new(public_id: &str, transformation: Transformation) -> Self {
        Self {
            public_id: public_id.to_string(),
            transformation,
            format: None,
            notification_url: None,
        }
    }
}

impl ApiParams for ExplodeParams {
    fn check(&self) -> Result<(), CloudinaryError> {
        if self.public_id.is_empty() {
            return Err(CloudinaryError::Validation("public id must be set".to_string()));
        }
        if self.transformation.is_empty() {
            return Err(CloudinaryError::Validation(
                "transformation must be set".to_string(),
            ));
        }
        Ok(())
    }

    fn to_params(&self) -> ParameterTable {
        let mut params = ParameterTable::new();
        params
            .set("public_id", self.public_id.as_str())
            .set("transformation", self.transformation.generate())
            .set_opt("format", self.format.as_deref())
            .set_opt("notification_url", self.notification_url.as_deref());
        params
    }
}

/// Acknowledgement of a queued transformation job
#[derive(Deserialize, Debug, Clone)]
pub struct TransformResult {
    #[serde(default)]
    pub message: String,
}
