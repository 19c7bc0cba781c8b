/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */

use crate::v1_1::ApiStatusCodes;
use num_enum::TryFromPrimitiveError;
use std::io;
use thiserror::Error;

/// Error conditions that can be returned
#[derive(Error, Debug)]
pub enum CloudinaryError {
    #[error("I/O error")]
    Io(#[from] io::Error),

    #[error("Configuration error. {0}")]
    Configuration(String),

    #[error("Validation error. {0}")]
    Validation(String),

    #[error("Deserialization error")]
    Deserialization(#[from] serde_json::Error),

    #[error("URL Parse error")]
    UrlParsing(#[from] url::ParseError),

    #[error("No transport was configured for API calls")]
    TransportMissing(),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("API Response was error: {0}, msg: {1}")]
    ApiResponse(u16, String),

    #[error("API Response status code is invalid")]
    ApiResponseCode(#[from] TryFromPrimitiveError<ApiStatusCodes>),

    #[error("API Response is malformed: {0:?}")]
    ApiResponseMalformed(serde_json::Error),
}
