use std::fmt;
use std::path::Path;
use std::sync::Arc;

use serde::Serialize;

/// An image chosen by the user, held in memory until it is submitted.
#[derive(Clone, PartialEq, Eq)]
pub struct ImageFile {
    /// File name shown to the user and sent as the multipart filename.
    pub name: String,
    /// Declared media type, empty when nothing could be inferred.
    pub media_type: String,
    /// Raw file contents.
    pub bytes: Arc<[u8]>,
}

impl ImageFile {
    /// Wrap in-memory bytes with an explicit media type.
    pub fn new(name: impl Into<String>, media_type: impl Into<String>, bytes: impl Into<Arc<[u8]>>) -> Self {
        Self {
            name: name.into(),
            media_type: media_type.into(),
            bytes: bytes.into(),
        }
    }

    /// Read a file from disk, inferring its media type from the extension.
    pub fn from_path(path: &Path) -> std::io::Result<Self> {
        let bytes = std::fs::read(path)?;
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self::new(name, media_type_for_path(path), bytes))
    }

    /// True when the declared media type is an `image/*` type.
    pub fn is_image(&self) -> bool {
        self.media_type.starts_with("image/")
    }

    /// Media type to send on the wire.
    pub fn content_type(&self) -> &str {
        if self.media_type.trim().is_empty() {
            "application/octet-stream"
        } else {
            &self.media_type
        }
    }
}

impl fmt::Debug for ImageFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageFile")
            .field("name", &self.name)
            .field("media_type", &self.media_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Media type implied by a path's extension, or `""` when unknown.
pub fn media_type_for_path(path: &Path) -> &'static str {
    image::ImageFormat::from_path(path)
        .map(|format| format.to_mime_type())
        .unwrap_or("")
}

/// A nutrition figure as reported by the service.
///
/// The service emits numbers, numeric strings or free text; all three are
/// kept so nothing the service said is lost.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Quantity {
    /// A JSON number.
    Number(f64),
    /// A non-empty JSON string, trimmed.
    Text(String),
}

impl Quantity {
    /// Numeric value, parsing the leading number out of text values.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            Self::Text(text) => leading_number(text),
        }
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(value) => write!(f, "{}", format_number(*value)),
            Self::Text(text) => f.write_str(text),
        }
    }
}

/// One detected food component.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct IngredientRecord {
    pub name: String,
    pub calories: Option<Quantity>,
    pub protein_g: Option<Quantity>,
    pub carbs_g: Option<Quantity>,
    pub fat_g: Option<Quantity>,
}

/// Aggregates computed by the service.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct NutritionTotals {
    pub calories: Option<Quantity>,
    pub protein_g: Option<Quantity>,
    pub carbs_g: Option<Quantity>,
    pub fat_g: Option<Quantity>,
}

/// A successful prediction; `ingredients` is never empty.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PredictionResult {
    /// URL where the service exposes the uploaded image, may be empty.
    pub image_url: String,
    pub ingredients: Vec<IngredientRecord>,
    pub totals: NutritionTotals,
}

/// Render a number without a trailing `.0` for whole values.
pub(crate) fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{value:.0}")
    } else {
        format!("{value}")
    }
}

/// Parse the longest numeric prefix of `text`, ignoring leading whitespace.
fn leading_number(text: &str) -> Option<f64> {
    let text = text.trim_start();
    let bytes = text.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    let digits_start = end;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    let mut mantissa_digits = end - digits_start;
    if bytes.get(end) == Some(&b'.') {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while bytes.get(frac_end).is_some_and(u8::is_ascii_digit) {
            frac_end += 1;
        }
        mantissa_digits += frac_end - frac_start;
        if mantissa_digits > 0 {
            end = frac_end;
        }
    }
    if mantissa_digits == 0 {
        return None;
    }
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while bytes.get(exp_end).is_some_and(u8::is_ascii_digit) {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }
    text[..end].parse::<f64>().ok()
}
