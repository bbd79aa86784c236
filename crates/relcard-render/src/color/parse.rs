//! CSS color string parsing.
//!
//! Everything `csscolorparser` understands is accepted: hex, named colors,
//! `rgb()`, `hsl()`, `hwb()`, `lab()`, `lch()`, `oklab()` and `oklch()`.

/// A parsed color as gamma-encoded sRGB plus alpha.
///
/// Channels are not clamped; wide-gamut inputs may fall slightly outside
/// [0, 1] and are brought into gamut when converted for drawing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CssColor {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub alpha: f64,
}

/// Parse a CSS color string. Returns `None` for anything unrecognized.
pub fn parse_css_color(input: &str) -> Option<CssColor> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }

    match csscolorparser::parse(trimmed) {
        Ok(color) => Some(CssColor {
            r: f64::from(color.r),
            g: f64::from(color.g),
            b: f64::from(color.b),
            alpha: f64::from(color.a).clamp(0.0, 1.0),
        }),
        Err(e) => {
            log::debug!("unrecognized color {:?}: {}", trimmed, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn srgb8(color: CssColor) -> [u8; 4] {
        [color.r, color.g, color.b, color.alpha].map(|v| (v.clamp(0.0, 1.0) * 255.0).round() as u8)
    }

    #[test]
    fn test_hex_forms() {
        assert_eq!(srgb8(parse_css_color("#f00").unwrap()), [255, 0, 0, 255]);
        assert_eq!(srgb8(parse_css_color("#0f08").unwrap()), [0, 255, 0, 136]);
        assert_eq!(srgb8(parse_css_color("#336699").unwrap()), [51, 102, 153, 255]);
        assert_eq!(srgb8(parse_css_color("#33669980").unwrap()), [51, 102, 153, 128]);
        assert!(parse_css_color("#12345").is_none());
        assert!(parse_css_color("#gg0000").is_none());
    }

    #[test]
    fn test_rgb_functions() {
        assert_eq!(srgb8(parse_css_color("rgb(10, 20, 30)").unwrap()), [10, 20, 30, 255]);
        assert_eq!(srgb8(parse_css_color("rgba(10,20,30,0.5)").unwrap()), [10, 20, 30, 128]);
        assert_eq!(srgb8(parse_css_color(" rgb(100% 0% 50% / 25%) ").unwrap()), [255, 0, 128, 64]);
        assert!(parse_css_color("rgb(1, 2)").is_none());
    }

    #[test]
    fn test_hsl_function() {
        assert_eq!(srgb8(parse_css_color("hsl(120, 100%, 50%)").unwrap()), [0, 255, 0, 255]);
        assert_eq!(srgb8(parse_css_color("HSL(240deg 100% 50%)").unwrap()), [0, 0, 255, 255]);
    }

    #[test]
    fn test_hwb_function() {
        let [r, g, b, a] = srgb8(parse_css_color("hwb(120 10% 20%)").unwrap());
        assert!(r.abs_diff(26) <= 1 && b.abs_diff(26) <= 1, "{r} {b}");
        assert!(g.abs_diff(204) <= 1, "{g}");
        assert_eq!(a, 255);
    }

    #[test]
    fn test_lab_and_lch_functions() {
        // Both describe a warm orange-brown.
        for input in ["lab(50% 40 59.5)", "lch(52.2% 72.2 50)"] {
            let color = parse_css_color(input).unwrap();
            assert!(color.r > color.g && color.g > color.b, "{input} -> {color:?}");
            assert_eq!(color.alpha, 1.0);
        }
    }

    #[test]
    fn test_oklab_and_oklch_functions() {
        let color = parse_css_color("oklab(0.6 0.1 0.1)").unwrap();
        assert!(color.r > color.g && color.g > color.b, "{color:?}");

        let color = parse_css_color("oklch(0.7 0.12 250 / 0.5)").unwrap();
        assert!(color.b > color.r, "{color:?}");
        assert_eq!(color.alpha, 0.5);
    }

    #[test]
    fn test_named_colors() {
        assert_eq!(srgb8(parse_css_color("RebeccaPurple").unwrap()), [102, 51, 153, 255]);
        assert_eq!(srgb8(parse_css_color("transparent").unwrap()), [0, 0, 0, 0]);
        assert!(parse_css_color("notacolor").is_none());
        assert!(parse_css_color("").is_none());
        assert!(parse_css_color("   ").is_none());
    }
}
