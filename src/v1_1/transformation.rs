/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::v1_1::macros::transformation_setters;
use crate::v1_1::{ParamValue, ParameterTable};
use std::fmt;

/// Transformation parameter names and the abbreviation used in the URL.
pub const PARAM_ABBREVIATIONS: [(&str, &str); 21] = [
    ("crop", "c"),
    ("width", "w"),
    ("height", "h"),
    ("transformation", "t"),
    ("gravity", "g"),
    ("quality", "q"),
    ("prefix", "p"),
    ("x", "x"),
    ("y", "y"),
    ("radius", "r"),
    ("background", "b"),
    ("overlay", "l"),
    ("underlay", "u"),
    ("default_image", "d"),
    ("angle", "a"),
    ("effect", "e"),
    ("density", "dn"),
    ("page", "pg"),
    ("border", "bo"),
    ("flags", "fl"),
    ("fetch_format", "f"),
];

// Crop modes whose output size is not the requested width/height
const HTML_SUPPRESSING_CROPS: [&str; 3] = ["fit", "limit", "mfit"];

/// Returns the URL abbreviation for a known transformation parameter
pub fn abbreviation(key: &str) -> Option<&'static str> {
    PARAM_ABBREVIATIONS
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, abbr)| *abbr)
}

/// Rewrites `#rrggbb` colors into the `rgb:rrggbb` form
pub fn normalize_color(color: &str) -> String {
    match color.strip_prefix('#') {
        Some(hex) => format!("rgb:{hex}"),
        None => color.to_string(),
    }
}

/// Border specification, either pre-formatted or a solid line of a given width and color.
#[derive(Debug, Clone, PartialEq)]
pub enum Border {
    Raw(String),
    Solid { width: u32, color: String },
}

impl Border {
    pub fn solid(width: u32, color: &str) -> Self {
        Border::Solid {
            width,
            color: color.to_string(),
        }
    }

    pub fn render(&self) -> String {
        match self {
            Border::Raw(s) => s.clone(),
            Border::Solid { width, color } => {
                format!("{width}px_solid_{}", normalize_color(color))
            }
        }
    }
}

impl From<&str> for Border {
    fn from(value: &str) -> Self {
        Border::Raw(value.to_string())
    }
}

impl From<String> for Border {
    fn from(value: String) -> Self {
        Border::Raw(value)
    }
}

impl From<(u32, &str)> for Border {
    fn from((width, color): (u32, &str)) -> Self {
        Border::solid(width, color)
    }
}

/// A chain of transformation stages.
///
/// Setters apply to the current stage. [`Transformation::chain`] closes the current stage and
/// starts a new one, so every call after it applies to the result of the previous stages.
///
/// ```rust
/// use cloudinary::v1_1::Transformation;
///
/// let t = Transformation::new().x(100).y(100).crop("fill").chain().crop("crop").width(100);
/// assert_eq!(t.generate(), "c_fill,x_100,y_100/c_crop,w_100");
/// assert_eq!(t.html_width().as_deref(), Some("100"));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Transformation {
    nested: Vec<ParameterTable>,
    params: ParameterTable,
}

impl Transformation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets any parameter on the current stage. Unknown keys render as `key_value`.
    pub fn param(mut self, key: &str, value: impl Into<ParamValue>) -> Self {
        self.params.set(key, value);
        self
    }

    transformation_setters! {
        /// Crop mode (`fill`, `crop`, `scale`, `fit`, `limit`, ...)
        crop => "crop",
        width => "width",
        height => "height",
        gravity => "gravity",
        quality => "quality",
        prefix => "prefix",
        x => "x",
        y => "y",
        radius => "radius",
        overlay => "overlay",
        underlay => "underlay",
        default_image => "default_image",
        /// A number, or several tokens such as `["exif", "12"]`
        angle => "angle",
        density => "density",
        page => "page",
        /// Named transformations, one or a list
        named => "transformation",
        /// One flag or a list of flags
        flags => "flags",
        fetch_format => "fetch_format",
    }

    pub fn background(self, color: &str) -> Self {
        self.param("background", normalize_color(color))
    }

    pub fn effect(self, name: &str) -> Self {
        self.param("effect", name)
    }

    /// Effect with a parameter, e.g. `sepia:10`
    pub fn effect_with_param(self, name: &str, param: impl fmt::Display) -> Self {
        self.param("effect", format!("{name}:{param}"))
    }

    pub fn border(self, border: impl Into<Border>) -> Self {
        self.param("border", border.into().render())
    }

    /// Sets width and height from a `<width>x<height>` string
    pub fn size(self, size: &str) -> Self {
        match size.split_once('x') {
            Some((w, h)) => self.width(w).height(h),
            None => self.width(size),
        }
    }

    /// Closes the current stage and opens a new one. Empty stages are discarded.
    pub fn chain(mut self) -> Self {
        if !self.params.is_empty() {
            let current = std::mem::take(&mut self.params);
            self.nested.push(current);
        }
        self
    }

    /// Stages that have already been closed by [`Transformation::chain`]
    pub fn nested_transforms(&self) -> &[ParameterTable] {
        &self.nested
    }

    /// The stage currently being built
    pub fn params(&self) -> &ParameterTable {
        &self.params
    }

    /// Every non-empty stage in application order
    pub fn stages(&self) -> impl Iterator<Item = &ParameterTable> {
        self.nested
            .iter()
            .chain(std::iter::once(&self.params))
            .filter(|p| !p.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.stages().next().is_none()
    }

    /// Renders the transformation as a URL path segment
    pub fn generate(&self) -> String {
        self.stages()
            .map(render_stage)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join("/")
    }

    /// Width to put on an HTML tag for the transformed image, if known
    pub fn html_width(&self) -> Option<String> {
        self.html_dimension("width")
    }

    /// Height to put on an HTML tag for the transformed image, if known
    pub fn html_height(&self) -> Option<String> {
        self.html_dimension("height")
    }

    fn html_dimension(&self, key: &str) -> Option<String> {
        let stage = self.stages().last()?;
        if stage.contains("overlay") || stage.contains("underlay") {
            return None;
        }
        let crop = stage.get("crop").and_then(ParamValue::as_text);
        if crop.is_some_and(|c| HTML_SUPPRESSING_CROPS.contains(&c)) {
            return None;
        }
        let value = stage.get(key)?;
        match value.as_number() {
            Some(n) if n >= 1.0 => Some(value.render(".")),
            _ => None,
        }
    }
}

impl fmt::Display for Transformation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.generate())
    }
}

// Known parameters sorted by abbreviation, then unknown parameters sorted by key
fn render_stage(params: &ParameterTable) -> String {
    let mut known: Vec<(&str, String)> = PARAM_ABBREVIATIONS
        .iter()
        .filter_map(|(key, abbr)| params.get(key).map(|v| (*abbr, v.render("."))))
        .collect();
    known.sort_by(|a, b| a.0.cmp(b.0));

    let extra = params
        .iter()
        .filter(|(key, _)| abbreviation(key).is_none())
        .map(|(key, v)| (key, v.render(".")));

    known
        .into_iter()
        .chain(extra)
        .filter(|(_, v)| !v.is_empty())
        .map(|(k, v)| format!("{k}_{v}"))
        .collect::<Vec<_>>()
        .join(",")
}

/// A transformation generated ahead of time at upload, optionally converted to another format.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EagerTransformation {
    transformation: Transformation,
    format: Option<String>,
}

impl EagerTransformation {
    pub fn new(transformation: Transformation) -> Self {
        Self {
            transformation,
            format: None,
        }
    }

    /// Builds one eager entry out of several transformations applied in order
    pub fn chained(transformations: impl IntoIterator<Item = Transformation>) -> Self {
        let nested = transformations
            .into_iter()
            .flat_map(|t| t.stages().cloned().collect::<Vec<_>>())
            .collect();
        Self::new(Transformation {
            nested,
            params: ParameterTable::new(),
        })
    }

    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    pub fn transformation(&self) -> &Transformation {
        &self.transformation
    }

    pub fn format(&self) -> Option<&str> {
        self.format.as_deref()
    }

    pub fn generate(&self) -> String {
        let transformation = self.transformation.generate();
        match self.format.as_deref().filter(|f| !f.is_empty()) {
            Some(format) if transformation.is_empty() => format.to_string(),
            Some(format) => format!("{transformation}/{format}"),
            None => transformation,
        }
    }
}

impl From<Transformation> for EagerTransformation {
    fn from(transformation: Transformation) -> Self {
        Self::new(transformation)
    }
}

/// Renders the `eager` upload parameter. Entries are separated by `|`.
pub fn render_eager_list(list: &[EagerTransformation]) -> String {
    list.iter()
        .map(EagerTransformation::generate)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("|")
}
