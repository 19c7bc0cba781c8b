/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::v1_1::errors::CloudinaryError;
use crate::v1_1::{ApiParams, ParameterTable, normalize_color};
use serde::Deserialize;

/// Generates an image out of a text string
#[derive(Debug, Clone, Default)]
pub struct TextParams {
    pub text: String,
    pub public_id: Option<String>,
    pub font_family: Option<String>,
    pub font_size: Option<u32>,
    pub font_color: Option<String>,
    pub font_weight: Option<String>,
    pub font_style: Option<String>,
    pub background: Option<String>,
    pub opacity: Option<u32>,
    pub text_decoration: Option<String>,
}

impl TextParams {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            ..Default::default()
        }
    }
}

impl ApiParams for TextParams {
    fn check(&self) -> Result<(), CloudinaryError> {
        if self.text.is_empty() {
            return Err(CloudinaryError::Validation("text must be set".to_string()));
        }
        Ok(())
    }

    fn to_params(&self) -> ParameterTable {
        let mut params = ParameterTable::new();
        params
            .set("text", self.text.as_str())
            .set_opt("public_id", self.public_id.as_deref())
            .set_opt("font_family", self.font_family.as_deref())
            .set_opt("font_size", self.font_size)
            .set_opt("font_color", self.font_color.as_deref().map(normalize_color))
            .set_opt("font_weight", self.font_weight.as_deref())
            .set_opt("font_style", self.font_style.as_deref())
            .set_opt("background", self.background.as_deref().map(normalize_color))
            .set_opt("opacity", self.opacity)
            .set_opt("text_decoration", self.text_decoration.as_deref());
        params
    }
}

/// Size of the generated text image
#[derive(Deserialize, Debug, Clone)]
pub struct TextResult {
    pub width: u32,

    pub height: u32,
}
