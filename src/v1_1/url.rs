/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::v1_1::html;
use crate::v1_1::Transformation;
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE;
use sha1::{Digest, Sha1};

/// Shared secure distribution
pub const SHARED_CDN: &str = "cloudinary-a.akamaihd.net";

/// Shared host for plain http delivery
pub const RES_HOST: &str = "res.cloudinary.com";

/// Number of `aN.` CDN subdomains identifiers are spread over
pub const DEFAULT_SUBDOMAIN_POOL: u32 = 5;

// Actions whose absolute identifiers are returned untouched
const PASS_THROUGH_ACTIONS: [&str; 2] = ["upload", "asset"];

/// Builds delivery URLs.
///
/// Options are set fluently and [`Url::build_url`] renders without modifying the builder, so one
/// builder can produce several URLs. Clone it to derive variants.
///
/// ```rust
/// use cloudinary::v1_1::{Transformation, Url};
///
/// let base = Url::new("testcloud").resource_type("image").action("upload");
/// let variant = base.clone().transform(Transformation::new().crop("fill"));
/// assert_eq!(base.build_url("test"), "http://res.cloudinary.com/testcloud/image/upload/test");
/// assert_eq!(
///     variant.build_url("test"),
///     "http://res.cloudinary.com/testcloud/image/upload/c_fill/test"
/// );
/// ```
#[derive(Clone, Default)]
pub struct Url {
    cloud_name: String,
    api_secret: Option<String>,
    resource_type: Option<String>,
    action: Option<String>,
    version: Option<String>,
    format: Option<String>,
    signed: bool,
    secure: bool,
    private_cdn: bool,
    cdn_subdomain: bool,
    subdomain_pool: u32,
    cname: Option<String>,
    secure_distribution: Option<String>,
    transformation: Option<Transformation>,
    raw_transformations: Vec<String>,
}

impl Url {
    pub fn new(cloud_name: &str) -> Self {
        Self {
            cloud_name: cloud_name.to_string(),
            subdomain_pool: DEFAULT_SUBDOMAIN_POOL,
            ..Default::default()
        }
    }

    pub fn cloud_name(mut self, cloud_name: &str) -> Self {
        self.cloud_name = cloud_name.to_string();
        self
    }

    /// Secret used to compute URL signatures
    pub fn api_secret(mut self, secret: &str) -> Self {
        self.api_secret = Some(secret.to_string());
        self
    }

    pub fn resource_type(mut self, resource_type: &str) -> Self {
        self.resource_type = Some(resource_type.to_string());
        self
    }

    /// Delivery type, e.g. `upload`, `fetch`, `facebook` or `sprite`
    pub fn action(mut self, action: &str) -> Self {
        self.action = Some(action.to_string());
        self
    }

    pub fn version(mut self, version: impl ToString) -> Self {
        self.version = Some(version.to_string());
        self
    }

    pub fn format(mut self, format: &str) -> Self {
        self.format = Some(format.to_string());
        self
    }

    pub fn signed(mut self, signed: bool) -> Self {
        self.signed = signed;
        self
    }

    pub fn secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }

    pub fn private_cdn(mut self, private_cdn: bool) -> Self {
        self.private_cdn = private_cdn;
        self
    }

    pub fn cdn_subdomain(mut self, cdn_subdomain: bool) -> Self {
        self.cdn_subdomain = cdn_subdomain;
        self
    }

    /// Number of subdomains used when `cdn_subdomain` is on
    pub fn subdomain_pool(mut self, pool: u32) -> Self {
        self.subdomain_pool = pool.max(1);
        self
    }

    pub fn cname(mut self, cname: &str) -> Self {
        self.cname = Some(cname.to_string()).filter(|c| !c.is_empty());
        self
    }

    pub fn secure_distribution(mut self, distribution: &str) -> Self {
        self.secure_distribution = Some(distribution.to_string()).filter(|d| !d.is_empty());
        self
    }

    pub fn transform(mut self, transformation: Transformation) -> Self {
        self.transformation = Some(transformation);
        self
    }

    /// Appends a pre-rendered transformation segment such as `p_home_thing_`
    pub fn add(mut self, raw_transformation: &str) -> Self {
        if !raw_transformation.is_empty() {
            self.raw_transformations.push(raw_transformation.to_string());
        }
        self
    }

    pub fn get_transformation(&self) -> Option<&Transformation> {
        self.transformation.as_ref()
    }

    /// Renders the URL for `source`
    pub fn build_url(&self, source: &str) -> String {
        let action = self.action.as_deref().unwrap_or_default();
        let absolute = is_absolute_url(source);
        if absolute && (action.is_empty() || PASS_THROUGH_ACTIONS.contains(&action)) {
            return source.to_string();
        }

        let mut transformation = self.transformation.clone().unwrap_or_default();
        let source = if absolute {
            if let Some(format) = self.format.as_deref() {
                transformation = transformation.fetch_format(format);
            }
            smart_escape(source)
        } else {
            match self.format.as_deref() {
                Some(format) => format!("{source}.{format}"),
                None => source.to_string(),
            }
        };

        let rendered = transformation.generate();
        let raw = self.raw_transformations.iter().map(String::as_str);
        let transformation_path = join_segments(std::iter::once(rendered.as_str()).chain(raw));

        let version = match &self.version {
            Some(v) => format!("v{v}"),
            None if needs_default_version(&source, absolute) => "v1".to_string(),
            None => String::new(),
        };

        let rest = join_segments([version.as_str(), transformation_path.as_str(), source.as_str()]);
        let signature = if self.signed {
            self.url_signature(&rest)
        } else {
            String::new()
        };

        let url = join_segments([
            self.prefix(&source).as_str(),
            self.resource_type.as_deref().unwrap_or_default(),
            action,
            signature.as_str(),
            rest.as_str(),
        ]);
        log::debug!("built url: {url}");
        url
    }

    /// Builds an `<img>` tag for `source`.
    ///
    /// Caller attributes come first in the order given, followed by the width and height derived
    /// from the transformation unless the caller already supplied them.
    pub fn build_image_tag(&self, source: &str, attributes: &[(&str, &str)]) -> String {
        let url = self.build_url(source);
        let transformation = self.transformation.as_ref();
        let width = transformation.and_then(Transformation::html_width);
        let height = transformation.and_then(Transformation::html_height);

        let mut attrs: Vec<(&str, &str)> = attributes.to_vec();
        for (name, value) in [("width", width.as_deref()), ("height", height.as_deref())] {
            if let Some(v) = value {
                if !attrs.iter().any(|(n, _)| *n == name) {
                    attrs.push((name, v));
                }
            }
        }
        format!("<img src='{}'{}/>", html::escape(&url), html::attributes(&attrs))
    }

    // Scheme, host and optionally the cloud name
    fn prefix(&self, source: &str) -> String {
        let scheme = if self.secure { "https" } else { "http" };
        let (host, with_cloud_name) = if let Some(cname) = &self.cname {
            (self.subdomain(source, cname), true)
        } else if self.secure {
            let distribution = self.secure_distribution.as_deref().unwrap_or(SHARED_CDN);
            let with_cloud_name = !self.private_cdn || distribution == SHARED_CDN;
            (distribution.to_string(), with_cloud_name)
        } else if self.private_cdn {
            let host = format!("{}-{RES_HOST}", self.cloud_name);
            (self.subdomain(source, &host), false)
        } else {
            (self.subdomain(source, RES_HOST), true)
        };

        if with_cloud_name && !self.cloud_name.is_empty() {
            format!("{scheme}://{host}/{}", self.cloud_name)
        } else {
            format!("{scheme}://{host}")
        }
    }

    fn subdomain(&self, source: &str, host: &str) -> String {
        if self.cdn_subdomain {
            format!("a{}.{host}", shard(source, self.subdomain_pool))
        } else {
            host.to_string()
        }
    }

    fn url_signature(&self, to_sign: &str) -> String {
        match self.api_secret.as_deref() {
            Some(secret) => {
                let digest = Sha1::digest(format!("{to_sign}{secret}").as_bytes());
                let encoded = URL_SAFE.encode(digest);
                format!("s--{}--", &encoded[..8])
            }
            None => {
                log::warn!("signed url requested without an api secret, leaving it unsigned");
                String::new()
            }
        }
    }
}

impl std::fmt::Debug for Url {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Url")
            .field("cloud_name", &self.cloud_name)
            .field("api_secret", &self.api_secret.as_ref().map(|_| "xxx"))
            .field("resource_type", &self.resource_type)
            .field("action", &self.action)
            .field("version", &self.version)
            .field("format", &self.format)
            .field("signed", &self.signed)
            .field("secure", &self.secure)
            .field("private_cdn", &self.private_cdn)
            .field("cdn_subdomain", &self.cdn_subdomain)
            .field("cname", &self.cname)
            .field("secure_distribution", &self.secure_distribution)
            .field("transformation", &self.transformation)
            .field("raw_transformations", &self.raw_transformations)
            .finish()
    }
}

fn join_segments<'a>(segments: impl IntoIterator<Item = &'a str>) -> String {
    segments
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("/")
}

/// True for identifiers starting with `http://` or `https://`
pub fn is_absolute_url(source: &str) -> bool {
    let lower = source.get(..8).unwrap_or(source).to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

// Identifiers inside folders need a version unless they already carry one
fn needs_default_version(source: &str, absolute: bool) -> bool {
    if absolute || !source.contains('/') {
        return false;
    }
    let first = source.split('/').next().unwrap_or_default();
    let versioned = first
        .strip_prefix('v')
        .is_some_and(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()));
    !versioned
}

/// Subdomain index in `1..=pool` for an identifier
pub fn shard(source: &str, pool: u32) -> u32 {
    crc32fast::hash(source.as_bytes()) % pool.max(1) + 1
}

/// Percent-encodes everything outside `[A-Za-z0-9_.\-/:]`
pub fn smart_escape(source: &str) -> String {
    let keep = |c: char| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-' | '/' | ':');
    let mut escaped = String::with_capacity(source.len());
    let mut pending = String::new();
    for c in source.chars() {
        if keep(c) {
            if !pending.is_empty() {
                escaped.push_str(&urlencoding::encode(&pending));
                pending.clear();
            }
            escaped.push(c);
        } else {
            pending.push(c);
        }
    }
    if !pending.is_empty() {
        escaped.push_str(&urlencoding::encode(&pending));
    }
    escaped
}
