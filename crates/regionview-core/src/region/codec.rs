//! Text encodings of region rectangles.
//!
//! # Query Parameter Form
//!
//! The persisted form is a comma-separated list of regions, each a
//! slash-separated quadruple in normalized image space:
//!
//! ```text
//! 0.1/0.2/0.3/0.4,0.5/0.1/0.2/0.2
//! ```
//!
//! Numbers are truncated toward zero to 4 decimal digits and printed in
//! their shortest form (`1`, `0.25`). Decoding is strict: every entry must
//! have exactly 4 numeric fields or the whole string is rejected.
//!
//! # Markup Form
//!
//! Regions authored by hand in host markup use `x,y,width,height`. Parsing
//! is permissive; missing or non-numeric fields become 0.

use crate::geometry::{parse_float, Rectangle};
use thiserror::Error;

/// Scale for the 4-decimal precision of the persisted form.
pub const PRECISION_SCALE: f64 = 10_000.0;

/// Scaled values closer than this to an integer are treated as that integer.
const SNAP_EPSILON: f64 = 1e-6;

/// Separator between regions in the persisted form.
const REGION_SEPARATOR: char = ',';

/// Separator between the fields of one region in the persisted form.
const FIELD_SEPARATOR: char = '/';

/// Error types for region decoding.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// An entry did not consist of exactly 4 numeric fields.
    #[error("Malformed region entry '{entry}': {reason}")]
    MalformedEncoding { entry: String, reason: String },
}

/// Truncate a coordinate toward zero to 4 decimal digits.
///
/// Values that already carry at most 4 decimals come back unchanged even if
/// their binary representation sits just below the decimal value.
pub fn crop_float(value: f64) -> f64 {
    let scaled = value * PRECISION_SCALE;
    let nearest = scaled.round();
    let kept = if (scaled - nearest).abs() < SNAP_EPSILON {
        nearest
    } else {
        scaled.trunc()
    };
    let cropped = kept / PRECISION_SCALE;
    // no "-0" in the output
    if cropped == 0.0 {
        0.0
    } else {
        cropped
    }
}

/// Format a coordinate for any of the text forms.
pub fn format_coord(value: f64) -> String {
    crop_float(value).to_string()
}

fn join_fields(rect: &Rectangle, separator: &str) -> String {
    [rect.x, rect.y, rect.width, rect.height]
        .iter()
        .map(|v| format_coord(*v))
        .collect::<Vec<_>>()
        .join(separator)
}

/// Encode rectangles into the persisted query parameter form.
///
/// An empty input yields an empty string.
///
/// ```text
/// [0.1, 0.2, 0.3, 0.4] [0.5, 0.1, 0.2, 0.2] -> 0.1/0.2/0.3/0.4,0.5/0.1/0.2/0.2
/// ```
pub fn encode_regions<'a>(rects: impl IntoIterator<Item = &'a Rectangle>) -> String {
    rects
        .into_iter()
        .map(|r| join_fields(r, "/"))
        .collect::<Vec<_>>()
        .join(",")
}

/// Decode the persisted query parameter form.
///
/// An empty or blank string decodes to no regions.
///
/// # Errors
///
/// Returns [`CodecError::MalformedEncoding`] for the first entry that does
/// not split into exactly 4 finite numbers. No partial result is returned.
pub fn decode_regions(encoded: &str) -> Result<Vec<Rectangle>, CodecError> {
    let encoded = encoded.trim();
    if encoded.is_empty() {
        return Ok(Vec::new());
    }
    encoded.split(REGION_SEPARATOR).map(decode_entry).collect()
}

fn decode_entry(entry: &str) -> Result<Rectangle, CodecError> {
    let malformed = |reason: String| CodecError::MalformedEncoding {
        entry: entry.to_string(),
        reason,
    };

    let fields: Vec<&str> = entry.split(FIELD_SEPARATOR).collect();
    if fields.len() != 4 {
        return Err(malformed(format!("expected 4 fields, found {}", fields.len())));
    }

    let mut values = [0.0f64; 4];
    for (value, field) in values.iter_mut().zip(&fields) {
        *value = match field.trim().parse::<f64>() {
            Ok(v) if v.is_finite() => v,
            _ => return Err(malformed(format!("'{}' is not a number", field))),
        };
    }

    let [x, y, width, height] = values;
    Ok(Rectangle::new(x, y, width, height))
}

/// Parse a markup coordinate attribute `x,y,width,height`.
///
/// Missing or non-numeric fields become 0; anything after the fourth field
/// is ignored.
pub fn parse_markup_coords(coords: &str) -> Rectangle {
    let mut fields = coords.split(REGION_SEPARATOR);
    let mut next = || parse_float(fields.next().unwrap_or(""));
    let (x, y, width, height) = (next(), next(), next(), next());
    Rectangle::new(x, y, width, height)
}

/// Format a rectangle as a markup coordinate attribute `x,y,width,height`.
pub fn markup_coords(rect: &Rectangle) -> String {
    join_fields(rect, ",")
}

/// Format a rectangle as an SVG-style attribute value `x y width height`.
pub fn svg_coords(rect: &Rectangle) -> String {
    join_fields(rect, " ")
}


// ============================================================================
// Property-Based Tests
// ============================================================================
