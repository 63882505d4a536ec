//! Query parameter validation and image transform translation
//!
//! Inbound `w`, `h`, `seed` and `format` parameters arrive as raw strings.
//! They are validated here and, for images, turned into the query string the
//! upstream CDN understands (`w`, `h`, `fit`, `crop`, `fm`).

use std::fmt;
use std::str::FromStr;

use crate::error::GatewayError;

/// Output formats the CDN can transcode to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImageFormat {
    #[default]
    Png,
    Jpg,
    Jpeg,
    Webp,
}

impl ImageFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Jpg => "jpg",
            ImageFormat::Jpeg => "jpeg",
            ImageFormat::Webp => "webp",
        }
    }

    /// Content-Type sent back with the image
    pub fn content_type(&self) -> String {
        format!("image/{}", self.as_str())
    }

    /// Parse the `format` parameter; absent or empty means png
    pub fn from_param(raw: Option<&str>) -> Result<Self, GatewayError> {
        match raw.map(str::trim).filter(|s| !s.is_empty()) {
            None => Ok(ImageFormat::default()),
            Some(s) => s
                .parse()
                .map_err(|_| GatewayError::invalid("Invalid format")),
        }
    }
}

impl FromStr for ImageFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "png" => Ok(ImageFormat::Png),
            "jpg" => Ok(ImageFormat::Jpg),
            "jpeg" => Ok(ImageFormat::Jpeg),
            "webp" => Ok(ImageFormat::Webp),
            other => Err(format!("unsupported format: {}", other)),
        }
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which image dimension a value belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    Width,
    Height,
}

impl Dimension {
    fn name(&self) -> &'static str {
        match self {
            Dimension::Width => "width",
            Dimension::Height => "height",
        }
    }
}

fn present(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|s| !s.is_empty())
}

/// Parse a `w`/`h` parameter as a positive pixel count.
///
/// Stricter than a plain "is it a number" check: `0`, fractions such as
/// `1.5`, and exponent forms such as `1e2` are all rejected, since none of
/// them is a pixel count the CDN can crop to.
pub fn parse_dimension(
    dimension: Dimension,
    raw: Option<&str>,
) -> Result<Option<u32>, GatewayError> {
    match present(raw) {
        None => Ok(None),
        Some(s) => match s.parse::<u32>() {
            Ok(v) if v > 0 => Ok(Some(v)),
            _ => Err(GatewayError::invalid(format!(
                "Invalid {} value",
                dimension.name()
            ))),
        },
    }
}

/// Parse the `seed` parameter as a non-negative integer.
///
/// Fractions and exponent forms (`2.5`, `1e2`) are rejected rather than
/// rounded, so each seed names exactly one search result.
pub fn parse_seed(raw: Option<&str>) -> Result<Option<u64>, GatewayError> {
    match present(raw) {
        None => Ok(None),
        Some(s) => s
            .parse::<u64>()
            .map(Some)
            .map_err(|_| GatewayError::invalid("Invalid seed value")),
    }
}

/// Resize and transcode request for one image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Transform {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub format: ImageFormat,
}

impl Transform {
    /// Validate raw `w`, `h` and `format` parameters, in that order
    pub fn from_params(
        w: Option<&str>,
        h: Option<&str>,
        format: Option<&str>,
    ) -> Result<Self, GatewayError> {
        let width = parse_dimension(Dimension::Width, w)?;
        let height = parse_dimension(Dimension::Height, h)?;
        let format = ImageFormat::from_param(format)?;
        Ok(Self {
            width,
            height,
            format,
        })
    }

    /// Query string appended to the photo's raw URL.
    ///
    /// A single dimension yields a square crop of that size. Every segment
    /// starts with `&` since the raw URL already carries a query.
    pub fn query_string(&self) -> String {
        let crop = match (self.width, self.height) {
            (Some(w), Some(h)) => Some((w, h)),
            (None, Some(h)) => Some((h, h)),
            (Some(w), None) => Some((w, w)),
            (None, None) => None,
        };

        let mut query = String::new();
        if let Some((w, h)) = crop {
            query.push_str(&format!("&w={}&h={}&fit=crop&crop=faces,center", w, h));
        }
        query.push_str(&format!("&fm={}", self.format));
        query
    }
}
