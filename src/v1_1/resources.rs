/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::v1_1::errors::CloudinaryError;
use crate::v1_1::{ApiParams, ParameterTable, ResourceType};
use serde::Deserialize;
use std::collections::HashMap;

/// Deletes a single uploaded resource
#[derive(Debug, Clone, Default)]
pub struct DeletionParams {
    pub public_id: String,
    pub resource_type: ResourceType,
    pub delivery_type: Option<String>,
    pub invalidate: Option<bool>,
}

impl DeletionParams {
    pub fn new(public_id: &str) -> Self {
        Self {
            public_id: public_id.to_string(),
            ..Default::default()
        }
    }
}

impl ApiParams for DeletionParams {
    fn check(&self) -> Result<(), CloudinaryError> {
        if self.public_id.is_empty() {
            return Err(CloudinaryError::Validation("public id must be set".to_string()));
        }
        Ok(())
    }

    fn to_params(&self) -> ParameterTable {
        let mut params = ParameterTable::new();
        params
            .set("public_id", self.public_id.as_str())
            .set_opt("type", self.delivery_type.as_deref());
        if let Some(v) = self.invalidate {
            params.set_bool("invalidate", v);
        }
        params
    }

    fn resource_type(&self) -> &str {
        self.resource_type.as_str()
    }
}

/// Outcome of a single deletion, `ok` or `not found`
#[derive(Deserialize, Debug, Clone)]
pub struct DeletionResult {
    pub result: String,
}

/// Deletes resources in bulk through the admin API.
///
/// Exactly one of `public_ids`, `prefix`, `tag` or `all` selects what gets deleted.
#[derive(Debug, Clone, Default)]
pub struct DelResParams {
    pub public_ids: Vec<String>,
    pub prefix: Option<String>,
    pub tag: Option<String>,
    pub all: bool,
    pub resource_type: ResourceType,
    pub delivery_type: Option<String>,
    pub keep_original: Option<bool>,
}

impl DelResParams {
    pub fn from_public_ids(public_ids: &[&str]) -> Self {
        Self {
            public_ids: public_ids.iter().map(|v| v.to_string()).collect(),
            ..Default::default()
        }
    }

    /// Delivery type segment of the admin URL
    pub fn delivery_type(&self) -> &str {
        self.delivery_type.as_deref().unwrap_or("upload")
    }
}

impl ApiParams for DelResParams {
    fn check(&self) -> Result<(), CloudinaryError> {
        let selectors = [
            !self.public_ids.is_empty(),
            self.prefix.as_deref().is_some_and(|p| !p.is_empty()),
            self.tag.as_deref().is_some_and(|t| !t.is_empty()),
            self.all,
        ];
        match selectors.iter().filter(|s| **s).count() {
            1 => Ok(()),
            0 => Err(CloudinaryError::Validation(
                "one of public ids, prefix, tag or all must be set".to_string(),
            )),
            _ => Err(CloudinaryError::Validation(
                "only one of public ids, prefix, tag or all may be set".to_string(),
            )),
        }
    }

    fn to_params(&self) -> ParameterTable {
        let mut params = ParameterTable::new();
        params
            .set("public_ids", self.public_ids.clone())
            .set_opt("prefix", self.prefix.as_deref());
        if self.all {
            params.set_bool("all", true);
        }
        if let Some(v) = self.keep_original {
            params.set_bool("keep_original", v);
        }
        params
    }

    fn resource_type(&self) -> &str {
        self.resource_type.as_str()
    }
}

/// Resources deleted by a bulk delete, keyed by public id
#[derive(Deserialize, Debug, Clone)]
pub struct DelResResult {
    #[serde(default)]
    pub deleted: HashMap<String, String>,

    #[serde(default)]
    pub partial: bool,

    #[serde(default)]
    pub next_cursor: Option<String>,
}
