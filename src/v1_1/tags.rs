/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::v1_1::errors::CloudinaryError;
use crate::v1_1::{ApiParams, ParameterTable, ResourceType, TagCommand};
use serde::Deserialize;

/// Adds, removes or replaces a tag on a set of resources
#[derive(Debug, Clone)]
pub struct TagParams {
    pub tag: String,
    pub public_ids: Vec<String>,
    pub command: TagCommand,
    pub resource_type: ResourceType,
    pub delivery_type: Option<String>,
}

impl TagParams {
    pub fn new(command: TagCommand, tag: &str, public_ids: &[&str]) -> Self {
        Self {
            tag: tag.to_string(),
            public_ids: public_ids.iter().map(|v| v.to_string()).collect(),
            command,
            resource_type: ResourceType::Image,
            delivery_type: None,
        }
    }
}

impl ApiParams for TagParams {
    fn check(&self) -> Result<(), CloudinaryError> {
        if self.tag.is_empty() {
            return Err(CloudinaryError::Validation("tag must be set".to_string()));
        }
        if self.public_ids.is_empty() {
            return Err(CloudinaryError::Validation(
                "at least one public id must be set".to_string(),
            ));
        }
        Ok(())
    }

    fn to_params(&self) -> ParameterTable {
        let mut params = ParameterTable::new();
        params
            .set("tag", self.tag.as_str())
            .set("public_ids", self.public_ids.clone())
            .set("command", self.command.as_str())
            .set_opt("type", self.delivery_type.as_deref());
        params
    }

    fn resource_type(&self) -> &str {
        self.resource_type.as_str()
    }
}

/// Resources affected by a tags request
#[derive(Deserialize, Debug, Clone)]
pub struct TagResult {
    #[serde(default)]
    pub public_ids: Vec<String>,
}
