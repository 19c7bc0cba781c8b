/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::v1_1::errors::CloudinaryError;
use crate::v1_1::{html, signing, Config, HttpMethod, ParameterTable, Url};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use num_enum::TryFromPrimitive;
use serde::de::DeserializeOwned;
use std::path::PathBuf;
use std::sync::Arc;

// Root Cloudinary API
pub const API_ORIGIN: &str = "https://api.cloudinary.com";

pub const API_VERSION: &str = "v1_1";

/// File payload of an upload request
#[derive(Debug, Clone, PartialEq)]
pub enum FileSource {
    /// Local file the transport reads
    Path(PathBuf),
    /// In-memory content with the file name to report
    Bytes { name: String, data: Vec<u8> },
    /// Remote URL the service fetches itself
    Remote(String),
}

/// A fully prepared API request, ready for a [`Transport`].
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: HttpMethod,
    pub url: String,
    pub params: ParameterTable,
    pub file: Option<FileSource>,
    /// Value of the `Authorization` header, when the endpoint uses basic auth
    pub authorization: Option<String>,
}

/// Status and body returned by a [`Transport`]
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

/// Sends requests over the network on behalf of [`Api`].
///
/// The library never opens connections itself, consumers plug in their HTTP client here.
pub trait Transport: Send + Sync {
    fn send(&self, request: &ApiRequest) -> Result<RawResponse, CloudinaryError>;
}

/// Parameters of a request to the API
pub trait ApiParams {
    /// Validates the parameters before anything is sent
    fn check(&self) -> Result<(), CloudinaryError>;

    /// Maps the parameters into API notation
    fn to_params(&self) -> ParameterTable;

    fn resource_type(&self) -> &str {
        "image"
    }

    fn file(&self) -> Option<FileSource> {
        None
    }
}

/// Status codes the API answers with
#[derive(Debug, TryFromPrimitive)]
#[repr(u16)]
pub enum ApiStatusCodes {
    // Good Codes
    Ok = 200,

    // Failing Codes
    BadRequest = 400,
    Unauthorized = 401,
    Forbidden = 403,
    NotFound = 404,
    Conflict = 409,
    RateLimited = 420,
    TooManyRequests = 429,
    InternalServerError = 500,
    ServiceUnavailable = 503,
}

/// Builds API endpoint URLs of the form `<address>/v1_1/<cloud>/<resource_type>/<action>`.
#[derive(Debug, Clone)]
pub struct ApiUrl {
    address: String,
    cloud_name: String,
    resource_type: Option<String>,
    action: Option<String>,
    segments: Vec<String>,
}

impl ApiUrl {
    pub fn new(address: &str, cloud_name: &str) -> Self {
        Self {
            address: address.to_string(),
            cloud_name: cloud_name.to_string(),
            resource_type: None,
            action: None,
            segments: Vec::new(),
        }
    }

    pub fn cloudinary_addr(mut self, address: &str) -> Self {
        self.address = address.to_string();
        self
    }

    pub fn resource_type(mut self, resource_type: &str) -> Self {
        self.resource_type = Some(resource_type.to_string()).filter(|r| !r.is_empty());
        self
    }

    pub fn action(mut self, action: &str) -> Self {
        self.action = Some(action.to_string()).filter(|a| !a.is_empty());
        self
    }

    /// Appends a path segment after the action
    pub fn add(mut self, segment: &str) -> Self {
        self.segments.push(segment.to_string());
        self
    }

    pub fn build(&self) -> Result<String, CloudinaryError> {
        let path: Vec<&str> = [API_VERSION, self.cloud_name.as_str()]
            .into_iter()
            .chain(self.resource_type.as_deref())
            .chain(self.action.as_deref())
            .chain(self.segments.iter().map(String::as_str))
            .collect();
        let req_url = url::Url::parse(&self.address)?.join(&format!("/{}", path.join("/")))?;
        Ok(req_url.to_string())
    }
}

/// Directly communicates with the API.
#[derive(Clone)]
pub struct Api {
    config: Config,
    transport: Option<Arc<dyn Transport>>,
}

impl Api {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            transport: None,
        }
    }

    pub fn with_transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Delivery URL builder seeded with the account defaults
    pub fn url(&self) -> Url {
        let config = &self.config;
        let mut url = Url::new(&config.account.cloud_name)
            .api_secret(&config.account.api_secret)
            .secure(config.secure)
            .private_cdn(config.private_cdn)
            .cdn_subdomain(config.cdn_subdomain);
        if let Some(cname) = &config.cname {
            url = url.cname(cname);
        }
        if let Some(distribution) = &config.secure_distribution {
            url = url.secure_distribution(distribution);
        }
        url
    }

    /// Delivery URL builder for uploaded images
    pub fn url_img_up(&self) -> Url {
        self.url().resource_type("image").action("upload")
    }

    /// API endpoint builder for this account
    pub fn api_url_v(&self) -> ApiUrl {
        ApiUrl::new(&self.config.api_base_address, &self.config.account.cloud_name)
    }

    /// API endpoint builder for image uploads
    pub fn api_url_img_up_v(&self) -> ApiUrl {
        self.api_url_v().resource_type("image").action("upload")
    }

    /// Signs `params` with the account secret
    pub fn sign(&self, params: &ParameterTable) -> String {
        signing::sign(params, &self.config.account.api_secret)
    }

    /// Adds the timestamp, signature and api key a signed request needs
    pub fn prepare_params(&self, mut params: ParameterTable) -> ParameterTable {
        if !params.contains("timestamp") {
            params.set("timestamp", chrono::Utc::now().timestamp().to_string());
        }
        let signature = self.sign(&params);
        params.set("signature", signature);
        params.set("api_key", self.config.account.api_key.as_str());
        params
    }

    /// `Authorization` header value for endpoints using basic auth
    pub fn basic_authorization(&self) -> String {
        let account = &self.config.account;
        let credentials = format!("{}:{}", account.api_key, account.api_secret);
        format!("Basic {}", STANDARD.encode(credentials))
    }

    /// Sends a request through the configured transport and parses the response
    pub fn call<T: DeserializeOwned>(
        &self,
        method: HttpMethod,
        url: &str,
        params: ParameterTable,
        file: Option<FileSource>,
    ) -> Result<T, CloudinaryError> {
        self.send(ApiRequest {
            method,
            url: url.to_string(),
            params,
            file,
            authorization: None,
        })
    }

    /// Sends an already assembled request
    pub fn send<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T, CloudinaryError> {
        let transport = self
            .transport
            .as_ref()
            .ok_or(CloudinaryError::TransportMissing())?;
        log::debug!("{} {}", request.method, request.url);
        let resp = transport.send(&request)?;
        parse_response(resp)
    }

    /// Builds an `<input type='file'>` tag that uploads straight to the API with signed params
    pub fn build_upload_form(
        &self,
        field: &str,
        resource_type: &str,
        params: Option<ParameterTable>,
        html_options: &[(&str, &str)],
    ) -> Result<String, CloudinaryError> {
        let params = self.prepare_params(params.unwrap_or_default());
        let form_data: serde_json::Map<String, serde_json::Value> = params
            .iter()
            .map(|(k, v)| (k.to_string(), serde_json::Value::String(v.render(","))))
            .collect();
        let form_data = serde_json::to_string(&form_data)?;

        let upload_url = self
            .api_url_v()
            .resource_type(resource_type)
            .action("upload")
            .build()?;

        let mut class = "cloudinary-fileupload".to_string();
        let mut extra: Vec<(&str, &str)> = Vec::new();
        for (name, value) in html_options {
            if *name == "class" {
                class = format!("{class} {value}");
            } else {
                extra.push((*name, *value));
            }
        }

        let mut attrs: Vec<(&str, &str)> = vec![
            ("type", "file"),
            ("name", "file"),
            ("data-url", upload_url.as_str()),
            ("data-form-data", form_data.as_str()),
            ("data-cloudinary-field", field),
            ("class", class.as_str()),
        ];
        attrs.extend(extra);
        Ok(format!("<input{}/>", html::attributes(&attrs)))
    }
}

impl std::fmt::Debug for Api {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Api")
            .field("config", &self.config)
            .field("transport", &self.transport.is_some())
            .finish()
    }
}

/// Turns a raw response into the expected record, surfacing API error bodies
pub fn parse_response<T: DeserializeOwned>(resp: RawResponse) -> Result<T, CloudinaryError> {
    let body: serde_json::Value = match serde_json::from_str(&resp.body) {
        Ok(body) => body,
        Err(err) => {
            log::warn!("Api malformed response body: {err:?}");
            return Err(CloudinaryError::ApiResponseMalformed(err));
        }
    };

    if let Some(message) = body
        .get("error")
        .and_then(|e| e.get("message"))
        .and_then(serde_json::Value::as_str)
    {
        return Err(CloudinaryError::ApiResponse(resp.status, message.to_string()));
    }

    use ApiStatusCodes as S;
    match ApiStatusCodes::try_from(resp.status)? {
        S::Ok => (),
        _ => {
            return Err(CloudinaryError::ApiResponse(
                resp.status,
                "request failed".to_string(),
            ));
        }
    }

    serde_json::from_value(body).map_err(|err| {
        log::warn!("Api response did not match the expected record: {err:?}");
        CloudinaryError::ApiResponseMalformed(err)
    })
}
