//! Typeface loading and the fallback chain.
//!
//! A [`FontStack`] asks each [`FontSource`] in order and uses the first
//! typeface returned. When every source comes up empty the built-in bitmap
//! face is used, so text always renders.

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use fontdue::{Font, FontSettings};
use relcard_spec::{FontFamily, FontWeight};
use tiny_skia::Pixmap;

use super::bitmap;

/// File loaded by [`FileSource`] when the requested face is missing.
pub const FALLBACK_FONT_FILE: &str = "readexpro-bold.ttf";

/// Horizontal advance and ink extent of a run of text, in pixels.
///
/// `ascent` and `descent` are distances above and below the baseline of the
/// inked pixels, not the font's design metrics.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TextMetrics {
    pub width: f32,
    pub ascent: f32,
    pub descent: f32,
}

impl TextMetrics {
    pub fn ink_height(&self) -> f32 {
        self.ascent + self.descent
    }
}

/// Rendered coverage of a run of text.
pub struct TextRaster {
    /// White, premultiplied; alpha is glyph coverage.
    pub coverage: Pixmap,
    /// X of the pen start inside `coverage`.
    pub origin_x: f32,
    /// Y of the baseline inside `coverage`.
    pub baseline: f32,
    pub metrics: TextMetrics,
}

/// A face that can measure and rasterize text.
#[derive(Clone)]
pub enum Typeface {
    Outline(Arc<Font>),
    Builtin,
}

impl fmt::Debug for Typeface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Typeface::Outline(font) => write!(f, "Outline({} glyphs)", font.glyph_count()),
            Typeface::Builtin => write!(f, "Builtin"),
        }
    }
}

impl Typeface {
    /// Parse a TrueType/OpenType file.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, String> {
        Font::from_bytes(bytes, FontSettings::default())
            .map(|font| Typeface::Outline(Arc::new(font)))
            .map_err(|e| e.to_string())
    }

    pub fn is_builtin(&self) -> bool {
        matches!(self, Typeface::Builtin)
    }

    pub fn measure(&self, text: &str, px: f32) -> TextMetrics {
        match self {
            Typeface::Outline(font) => measure_outline(font, text, px),
            Typeface::Builtin => bitmap::measure(text, px),
        }
    }

    /// Rasterize `text` at `px`. `None` only for sizes too small to allocate.
    pub fn rasterize(&self, text: &str, px: f32) -> Option<TextRaster> {
        match self {
            Typeface::Outline(font) => rasterize_outline(font, text, px),
            Typeface::Builtin => bitmap::rasterize(text, px),
        }
    }
}

/// Pen x for each glyph, kerning applied.
fn pen_positions(font: &Font, text: &str, px: f32) -> (Vec<(char, f32)>, f32) {
    let mut positions = Vec::with_capacity(text.len());
    let mut pen = 0.0;
    let mut previous: Option<char> = None;

    for ch in text.chars() {
        if let Some(left) = previous {
            pen += font.horizontal_kern(left, ch, px).unwrap_or(0.0);
        }
        positions.push((ch, pen));
        pen += font.metrics(ch, px).advance_width;
        previous = Some(ch);
    }

    (positions, pen)
}

fn measure_outline(font: &Font, text: &str, px: f32) -> TextMetrics {
    let (positions, width) = pen_positions(font, text, px);
    let mut ascent: f32 = 0.0;
    let mut descent: f32 = 0.0;

    for (ch, _) in positions {
        let metrics = font.metrics(ch, px);
        if metrics.width == 0 || metrics.height == 0 {
            continue;
        }
        ascent = ascent.max((metrics.height as i32 + metrics.ymin) as f32);
        descent = descent.max(-metrics.ymin as f32);
    }

    TextMetrics {
        width,
        ascent,
        descent,
    }
}

fn rasterize_outline(font: &Font, text: &str, px: f32) -> Option<TextRaster> {
    let metrics = measure_outline(font, text, px);
    let (positions, _) = pen_positions(font, text, px);

    let glyphs: Vec<_> = positions
        .into_iter()
        .map(|(ch, pen)| {
            let (glyph, bitmap) = font.rasterize(ch, px);
            (pen, glyph, bitmap)
        })
        .collect();

    let left = glyphs
        .iter()
        .map(|(pen, glyph, _)| (pen + glyph.xmin as f32).floor())
        .fold(0.0f32, f32::min);
    let right = glyphs
        .iter()
        .map(|(pen, glyph, _)| (pen + glyph.xmin as f32).floor() + glyph.width as f32)
        .fold(metrics.width.ceil(), f32::max);

    let baseline = metrics.ascent.ceil();
    let width = (right - left).max(1.0) as u32;
    let height = (baseline + metrics.descent.ceil()).max(1.0) as u32;
    let mut coverage = Pixmap::new(width, height)?;

    let stride = width as i64;
    let data = coverage.data_mut();
    for (pen, glyph, bitmap) in &glyphs {
        let x0 = (pen + glyph.xmin as f32).floor() as i64 - left as i64;
        let y0 = baseline as i64 - (glyph.height as i64 + i64::from(glyph.ymin));

        for row in 0..glyph.height {
            let y = y0 + row as i64;
            if y < 0 || y >= i64::from(height) {
                continue;
            }
            for column in 0..glyph.width {
                let x = x0 + column as i64;
                if x < 0 || x >= stride {
                    continue;
                }
                let value = bitmap[row * glyph.width + column];
                let offset = ((y * stride + x) * 4) as usize;
                // Overlapping glyphs keep the stronger coverage.
                if value > data[offset + 3] {
                    data[offset..offset + 4].copy_from_slice(&[value; 4]);
                }
            }
        }
    }

    Some(TextRaster {
        coverage,
        origin_x: -left,
        baseline,
        metrics,
    })
}

/// Something that may be able to provide a face for a family and weight.
pub trait FontSource: Send + Sync {
    fn load(&self, family: FontFamily, weight: FontWeight) -> Option<Typeface>;
}

/// File name used for a family/weight pair, e.g. `inter-medium.ttf`.
pub fn font_file_name(family: FontFamily, weight: FontWeight) -> String {
    format!("{family}-{weight}.ttf")
}

fn read_typeface(path: &Path) -> Option<Typeface> {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => {
            log::debug!("cannot read font {}: {e}", path.display());
            return None;
        }
    };
    match Typeface::from_bytes(&bytes) {
        Ok(face) => Some(face),
        Err(e) => {
            log::warn!("cannot parse font {}: {e}", path.display());
            None
        }
    }
}

/// Reads `{dir}/{family}-{weight}.ttf` on every request.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    dir: PathBuf,
}

impl DirectorySource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl FontSource for DirectorySource {
    fn load(&self, family: FontFamily, weight: FontWeight) -> Option<Typeface> {
        read_typeface(&self.dir.join(font_file_name(family, weight)))
    }
}

/// Always reads one fixed file, whatever face was asked for.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl FontSource for FileSource {
    fn load(&self, _family: FontFamily, _weight: FontWeight) -> Option<Typeface> {
        read_typeface(&self.path)
    }
}

/// Faces parsed once up front. Never changes after construction.
#[derive(Default)]
pub struct PreloadedSource {
    faces: HashMap<(FontFamily, FontWeight), Typeface>,
}

impl PreloadedSource {
    pub fn from_faces<I>(faces: I) -> Self
    where
        I: IntoIterator<Item = ((FontFamily, FontWeight), Typeface)>,
    {
        Self {
            faces: faces.into_iter().collect(),
        }
    }

    /// Load every family/weight pair present in `dir`; missing files are skipped.
    pub fn from_directory(dir: &Path) -> Self {
        let source = DirectorySource::new(dir);
        let faces = FontFamily::all().iter().flat_map(|&family| {
            let source = &source;
            FontWeight::all().iter().filter_map(move |&weight| {
                source.load(family, weight).map(|face| ((family, weight), face))
            })
        });
        let preloaded = Self::from_faces(faces);
        log::info!("preloaded {} font faces from {}", preloaded.len(), dir.display());
        preloaded
    }

    pub fn len(&self) -> usize {
        self.faces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }
}

impl FontSource for PreloadedSource {
    fn load(&self, family: FontFamily, weight: FontWeight) -> Option<Typeface> {
        self.faces.get(&(family, weight)).cloned()
    }
}

/// Ordered fallback chain ending in the built-in face.
#[derive(Default)]
pub struct FontStack {
    sources: Vec<Box<dyn FontSource>>,
}

impl FontStack {
    /// A stack with no sources: always the built-in face.
    pub fn builtin_only() -> Self {
        Self::default()
    }

    /// Per-request disk reads from `dir`, then the fixed fallback file there.
    pub fn for_directory(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self::default()
            .with_source(DirectorySource::new(dir))
            .with_source(FileSource::new(dir.join(FALLBACK_FONT_FILE)))
    }

    /// Everything in `dir` parsed now, then the fixed fallback file there.
    pub fn preloaded(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self::default()
            .with_source(PreloadedSource::from_directory(dir))
            .with_source(FileSource::new(dir.join(FALLBACK_FONT_FILE)))
    }

    pub fn with_source(mut self, source: impl FontSource + 'static) -> Self {
        self.sources.push(Box::new(source));
        self
    }

    /// First face any source provides, else the built-in one. Never fails.
    pub fn resolve(&self, family: FontFamily, weight: FontWeight) -> Typeface {
        if let Some(face) = self
            .sources
            .iter()
            .find_map(|source| source.load(family, weight))
        {
            return face;
        }

        if !self.sources.is_empty() {
            log::warn!(
                "no font found for {}, using the built-in face",
                font_file_name(family, weight)
            );
        }
        Typeface::Builtin
    }
}
