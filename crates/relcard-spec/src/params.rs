//! Request parameter parsing for the boundary layer.
//!
//! Both the HTTP endpoint and the CLI funnel their raw key/value pairs
//! through [`options_from_params`] so that defaults, clamping and rejection
//! of unknown enum values behave identically everywhere.

use std::collections::HashMap;
use std::str::FromStr;

use crate::error::ParamError;
use crate::options::{ImageGeneratorOptions, DEFAULT_HEIGHT, DEFAULT_WIDTH};

/// Smallest width/height accepted from a request; smaller values are clamped up.
pub const MIN_REQUEST_DIMENSION: i64 = 100;

/// Largest width/height accepted from a request; larger values are clamped down.
pub const MAX_REQUEST_DIMENSION: i64 = 4000;

/// Largest seed accepted from a request (2^53 - 2).
pub const MAX_REQUEST_SEED: u64 = 9_007_199_254_740_990;

/// Splits a URL query string into decoded key/value pairs.
///
/// `+` decodes to a space and `%XX` escapes to the byte they name; malformed
/// escapes are kept literally. Keys without `=` get an empty value.
pub fn parse_query(query: &str) -> Vec<(String, String)> {
    query
        .split('&')
        .filter(|part| !part.is_empty())
        .map(|part| match part.split_once('=') {
            Some((key, value)) => (percent_decode(key), percent_decode(value)),
            None => (percent_decode(part), String::new()),
        })
        .collect()
}

/// Decodes `application/x-www-form-urlencoded` text.
pub fn percent_decode(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'+' => {
                out.push(b' ');
                i += 1;
            }
            b'%' if i + 2 < bytes.len() => {
                match (hex_value(bytes[i + 1]), hex_value(bytes[i + 2])) {
                    (Some(hi), Some(lo)) => {
                        out.push((hi << 4) | lo);
                        i += 3;
                    }
                    _ => {
                        out.push(b'%');
                        i += 1;
                    }
                }
            }
            byte => {
                out.push(byte);
                i += 1;
            }
        }
    }
    String::from_utf8_lossy(&out).into_owned()
}

fn hex_value(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'a'..=b'f' => Some(byte - b'a' + 10),
        b'A'..=b'F' => Some(byte - b'A' + 10),
        _ => None,
    }
}

/// Parses the leading integer of a string the way lenient form handling does:
/// optional whitespace, optional sign, then digits up to the first non-digit.
/// Saturates instead of overflowing.
fn leading_int(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let mut value: i64 = 0;
    let mut seen = false;
    for byte in digits.bytes() {
        if !byte.is_ascii_digit() {
            break;
        }
        seen = true;
        value = value
            .saturating_mul(10)
            .saturating_add(i64::from(byte - b'0'));
    }

    seen.then(|| if negative { -value } else { value })
}

fn dimension(raw: Option<&str>, default: u32) -> u32 {
    let parsed = raw.and_then(leading_int).filter(|value| *value != 0);
    match parsed {
        Some(value) => value.clamp(MIN_REQUEST_DIMENSION, MAX_REQUEST_DIMENSION) as u32,
        None => default,
    }
}

fn closed<T>(raw: Option<&str>, param: &'static str) -> Result<Option<T>, ParamError>
where
    T: FromStr,
{
    match raw {
        None | Some("") => Ok(None),
        Some(value) => value
            .parse::<T>()
            .map(Some)
            .map_err(|_| ParamError::InvalidValue {
                param,
                value: value.to_string(),
            }),
    }
}

fn non_empty(raw: Option<&str>) -> Option<String> {
    raw.filter(|value| !value.is_empty()).map(str::to_string)
}

/// Builds generator options from request parameters.
///
/// Unknown parameter names are ignored; when a name repeats, the first
/// occurrence is used.
pub fn options_from_params<K, V>(pairs: &[(K, V)]) -> Result<ImageGeneratorOptions, ParamError>
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut params: HashMap<&str, &str> = HashMap::new();
    for (key, value) in pairs {
        params.entry(key.as_ref()).or_insert(value.as_ref());
    }
    let get = |name: &str| params.get(name).copied();

    let font_family = closed(get("fontFamily"), "fontFamily")?.unwrap_or_default();
    let font_weight = closed(get("fontWeight"), "fontWeight")?.unwrap_or_default();
    let label_font_family = closed(get("labelFontFamily"), "labelFontFamily")?;
    let label_font_weight = closed(get("labelFontWeight"), "labelFontWeight")?;
    let image_format = closed(get("imageFormat"), "imageFormat")?.unwrap_or_default();
    let noise_level = closed(get("noiseLevel"), "noiseLevel")?.unwrap_or_default();
    let pattern_type = closed(get("patternType"), "patternType")?;

    let seed = match get("seed") {
        None => None,
        Some(raw) => {
            let value = leading_int(raw).ok_or_else(|| ParamError::InvalidNumber {
                param: "seed",
                value: raw.to_string(),
            })?;
            Some((value.max(0) as u64).min(MAX_REQUEST_SEED))
        }
    };

    Ok(ImageGeneratorOptions {
        text: non_empty(get("text")),
        label: non_empty(get("label")),
        width: dimension(get("width"), DEFAULT_WIDTH),
        height: dimension(get("height"), DEFAULT_HEIGHT),
        font_family,
        font_weight,
        label_font_family,
        label_font_weight,
        primary_color: non_empty(get("primaryColor")),
        image_format,
        pattern_type,
        noise_level,
        seed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{FontFamily, ImageFormat, NoiseLevel, PatternType};
    use pretty_assertions::assert_eq;

    fn options(query: &str) -> Result<ImageGeneratorOptions, ParamError> {
        options_from_params(&parse_query(query))
    }

    #[test]
    fn test_empty_query_yields_defaults() {
        assert_eq!(options("").unwrap(), ImageGeneratorOptions::default());
    }

    #[test]
    fn test_full_query() {
        let parsed = options(
            "text=v1.2.3&width=1200&height=600&fontFamily=readexpro&fontWeight=bold\
             &imageFormat=png&noiseLevel=medium&seed=42&patternType=steps",
        )
        .unwrap();
        assert_eq!(parsed.text.as_deref(), Some("v1.2.3"));
        assert_eq!((parsed.width, parsed.height), (1200, 600));
        assert_eq!(parsed.font_family, FontFamily::Readexpro);
        assert_eq!(parsed.image_format, ImageFormat::Png);
        assert_eq!(parsed.noise_level, NoiseLevel::Medium);
        assert_eq!(parsed.pattern_type, Some(PatternType::Steps));
        assert_eq!(parsed.seed, Some(42));
    }

    #[test]
    fn test_unknown_font_family_is_rejected() {
        let err = options("fontFamily=foo").unwrap_err();
        assert_eq!(err.to_string(), "Invalid fontFamily");
        assert_eq!(err.value(), "foo");
    }

    #[test]
    fn test_each_enum_parameter_is_checked() {
        for param in [
            "fontWeight",
            "imageFormat",
            "noiseLevel",
            "patternType",
            "labelFontFamily",
            "labelFontWeight",
        ] {
            let err = options(&format!("{param}=nope")).unwrap_err();
            assert_eq!(err.param(), param);
        }
    }

    #[test]
    fn test_dimensions_are_clamped_or_defaulted() {
        let parsed = options("width=5&height=99999").unwrap();
        assert_eq!((parsed.width, parsed.height), (100, 4000));

        let parsed = options("width=abc&height=0").unwrap();
        assert_eq!((parsed.width, parsed.height), (1920, 1080));

        let parsed = options("width=640px&height=-20").unwrap();
        assert_eq!((parsed.width, parsed.height), (640, 100));
    }

    #[test]
    fn test_seed_is_clamped_and_validated() {
        assert_eq!(options("seed=-7").unwrap().seed, Some(0));
        assert_eq!(
            options("seed=99999999999999999999").unwrap().seed,
            Some(MAX_REQUEST_SEED)
        );
        let err = options("seed=abc").unwrap_err();
        assert_eq!(err.code(), "P002");
    }

    #[test]
    fn test_empty_strings_are_absent() {
        let parsed = options("text=&primaryColor=&patternType=").unwrap();
        assert!(parsed.text.is_none());
        assert!(parsed.primary_color.is_none());
        assert!(parsed.pattern_type.is_none());
    }

    #[test]
    fn test_percent_decoding() {
        assert_eq!(percent_decode("v1.0+%F0%9F%9A%80"), "v1.0 \u{1F680}");
        assert_eq!(percent_decode("%23ff0000"), "#ff0000");
        assert_eq!(percent_decode("100%"), "100%");
        assert_eq!(percent_decode("%zz"), "%zz");
    }

    #[test]
    fn test_first_duplicate_wins() {
        let parsed = options("text=a&text=b").unwrap();
        assert_eq!(parsed.text.as_deref(), Some("a"));

        // A bad repeat is never looked at.
        let parsed = options("fontFamily=inter&fontFamily=foo&seed=5&seed=x").unwrap();
        assert_eq!(parsed.seed, Some(5));
    }
}
