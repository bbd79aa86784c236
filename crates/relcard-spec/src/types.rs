//! Closed parameter sets accepted by the generator.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A string did not name any member of a closed parameter set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind}: {value}")]
pub struct UnknownVariant {
    /// Which parameter set was being parsed (e.g. "font family").
    pub kind: &'static str,
    /// The rejected input.
    pub value: String,
}

impl UnknownVariant {
    fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

/// Font families that ship with the service.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontFamily {
    Bigshoulders,
    Inter,
    Jetbrainsmono,
    Lato,
    Opensans,
    Poppins,
    Quicksand,
    Raleway,
    #[default]
    Readexpro,
    Redhattext,
    Roboto,
    Robotomono,
    Rubik,
    Sourcecodepro,
}

impl FontFamily {
    /// Returns the family as it appears in request parameters and font file names.
    pub fn as_str(&self) -> &'static str {
        match self {
            FontFamily::Bigshoulders => "bigshoulders",
            FontFamily::Inter => "inter",
            FontFamily::Jetbrainsmono => "jetbrainsmono",
            FontFamily::Lato => "lato",
            FontFamily::Opensans => "opensans",
            FontFamily::Poppins => "poppins",
            FontFamily::Quicksand => "quicksand",
            FontFamily::Raleway => "raleway",
            FontFamily::Readexpro => "readexpro",
            FontFamily::Redhattext => "redhattext",
            FontFamily::Roboto => "roboto",
            FontFamily::Robotomono => "robotomono",
            FontFamily::Rubik => "rubik",
            FontFamily::Sourcecodepro => "sourcecodepro",
        }
    }

    /// Returns all font families.
    pub fn all() -> &'static [FontFamily] {
        &[
            FontFamily::Bigshoulders,
            FontFamily::Inter,
            FontFamily::Jetbrainsmono,
            FontFamily::Lato,
            FontFamily::Opensans,
            FontFamily::Poppins,
            FontFamily::Quicksand,
            FontFamily::Raleway,
            FontFamily::Readexpro,
            FontFamily::Redhattext,
            FontFamily::Roboto,
            FontFamily::Robotomono,
            FontFamily::Rubik,
            FontFamily::Sourcecodepro,
        ]
    }
}

impl std::fmt::Display for FontFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for FontFamily {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FontFamily::all()
            .iter()
            .copied()
            .find(|family| family.as_str() == s)
            .ok_or_else(|| UnknownVariant::new("font family", s))
    }
}

/// Font weights available for every family.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    #[default]
    Bold,
    Medium,
    Light,
}

impl FontWeight {
    pub fn as_str(&self) -> &'static str {
        match self {
            FontWeight::Bold => "bold",
            FontWeight::Medium => "medium",
            FontWeight::Light => "light",
        }
    }

    pub fn all() -> &'static [FontWeight] {
        &[FontWeight::Bold, FontWeight::Medium, FontWeight::Light]
    }
}

impl std::fmt::Display for FontWeight {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for FontWeight {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bold" => Ok(FontWeight::Bold),
            "medium" => Ok(FontWeight::Medium),
            "light" => Ok(FontWeight::Light),
            _ => Err(UnknownVariant::new("font weight", s)),
        }
    }
}

/// Output encodings. `Jpg` is an alias of `Jpeg`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    Jpeg,
    Jpg,
    #[default]
    Png,
    Webp,
}

impl ImageFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageFormat::Jpeg => "jpeg",
            ImageFormat::Jpg => "jpg",
            ImageFormat::Png => "png",
            ImageFormat::Webp => "webp",
        }
    }

    pub fn all() -> &'static [ImageFormat] {
        &[
            ImageFormat::Jpeg,
            ImageFormat::Jpg,
            ImageFormat::Png,
            ImageFormat::Webp,
        ]
    }

    /// MIME type sent as `Content-Type` for this format.
    pub fn mime_type(&self) -> &'static str {
        match self {
            ImageFormat::Jpeg | ImageFormat::Jpg => "image/jpeg",
            ImageFormat::Png => "image/png",
            ImageFormat::Webp => "image/webp",
        }
    }

    /// Conventional file extension (without the dot).
    pub fn extension(&self) -> &'static str {
        self.as_str()
    }

    /// Whether this format is encoded as JPEG.
    pub fn is_jpeg(&self) -> bool {
        matches!(self, ImageFormat::Jpeg | ImageFormat::Jpg)
    }
}

impl std::fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ImageFormat {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "jpeg" => Ok(ImageFormat::Jpeg),
            "jpg" => Ok(ImageFormat::Jpg),
            "png" => Ok(ImageFormat::Png),
            "webp" => Ok(ImageFormat::Webp),
            _ => Err(UnknownVariant::new("image format", s)),
        }
    }
}

/// Procedural line/shape patterns drawn over the background.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatternType {
    Grid,
    Dots,
    Waves,
    Triangles,
    Hexagons,
    Concentric,
    Circuitry,
    Maze,
    Steps,
    Geometry,
}

impl PatternType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PatternType::Grid => "grid",
            PatternType::Dots => "dots",
            PatternType::Waves => "waves",
            PatternType::Triangles => "triangles",
            PatternType::Hexagons => "hexagons",
            PatternType::Concentric => "concentric",
            PatternType::Circuitry => "circuitry",
            PatternType::Maze => "maze",
            PatternType::Steps => "steps",
            PatternType::Geometry => "geometry",
        }
    }

    pub fn all() -> &'static [PatternType] {
        &[
            PatternType::Grid,
            PatternType::Dots,
            PatternType::Waves,
            PatternType::Triangles,
            PatternType::Hexagons,
            PatternType::Concentric,
            PatternType::Circuitry,
            PatternType::Maze,
            PatternType::Steps,
            PatternType::Geometry,
        ]
    }

    /// Patterns eligible for random selection when none is requested.
    ///
    /// `Geometry` is only drawn when asked for explicitly.
    pub fn random_candidates() -> &'static [PatternType] {
        &PatternType::all()[..9]
    }
}

impl std::fmt::Display for PatternType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for PatternType {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PatternType::all()
            .iter()
            .copied()
            .find(|pattern| pattern.as_str() == s)
            .ok_or_else(|| UnknownVariant::new("pattern type", s))
    }
}

/// Strength of the film-grain overlay.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoiseLevel {
    Low,
    #[default]
    Medium,
    High,
}

impl NoiseLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            NoiseLevel::Low => "low",
            NoiseLevel::Medium => "medium",
            NoiseLevel::High => "high",
        }
    }

    pub fn all() -> &'static [NoiseLevel] {
        &[NoiseLevel::Low, NoiseLevel::Medium, NoiseLevel::High]
    }
}

impl std::fmt::Display for NoiseLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for NoiseLevel {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(NoiseLevel::Low),
            "medium" => Ok(NoiseLevel::Medium),
            "high" => Ok(NoiseLevel::High),
            _ => Err(UnknownVariant::new("noise level", s)),
        }
    }
}
