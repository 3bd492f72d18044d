/// Images and the loader that produces them.
///
/// An `Image` is not a bitmap.  It records a pixel size (which is what the
/// game logic cares about: it decides every bounding box), plus the glyph,
/// colour and shape the terminal backend paints, and the transforms that
/// were applied to it.
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::geometry::Rect;

// ── Asset names ───────────────────────────────────────────────────────────────

pub const BACKGROUND: &str = "background";
/// Player pose, facing left.
pub const KOKATON: &str = "kokaton/3";
pub const KOKATON_VICTORY: &str = "kokaton/6";
pub const KOKATON_DEFEAT: &str = "kokaton/8";
/// Beam sprite, pointing right.
pub const BEAM: &str = "beam";
pub const EXPLOSION: &str = "explosion";

pub const MANIFEST_FILE: &str = "sprites.json";
const EMBEDDED_MANIFEST: &str = include_str!("../assets/sprites.json");

// ── Errors ────────────────────────────────────────────────────────────────────

/// Missing or corrupt asset.  Fatal at startup.
#[derive(Debug)]
pub enum AssetLoadError {
    Io { path: PathBuf, source: std::io::Error },
    Parse { origin: String, source: serde_json::Error },
    Missing(String),
    Invalid { name: String, reason: &'static str },
}

impl fmt::Display for AssetLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetLoadError::Io { path, .. } => {
                write!(f, "cannot read sprite manifest {}", path.display())
            }
            AssetLoadError::Parse { origin, .. } => {
                write!(f, "malformed sprite manifest {}", origin)
            }
            AssetLoadError::Missing(name) => write!(f, "image '{}' not found", name),
            AssetLoadError::Invalid { name, reason } => {
                write!(f, "image '{}' is invalid: {}", name, reason)
            }
        }
    }
}

impl std::error::Error for AssetLoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AssetLoadError::Io { source, .. } => Some(source),
            AssetLoadError::Parse { source, .. } => Some(source),
            _ => None,
        }
    }
}

// ── Colour & shape ────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    pub const WHITE: Rgb = Rgb(255, 255, 255);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Shape {
    #[default]
    Box,
    /// Ellipse inscribed in the image box.
    Disc,
}

// ── Image ─────────────────────────────────────────────────────────────────────

/// Angles closer than this to zero take the zoom-only path.
const ANGLE_EPSILON: f32 = 0.001;

/// Arrows in counter-clockwise order, 45° apart.
const ARROW_RING: [char; 8] = ['→', '↗', '↑', '↖', '←', '↙', '↓', '↘'];
/// Line glyphs, 45° apart (period 180°).
const LINE_RING: [char; 4] = ['-', '/', '|', '\\'];

const MIRROR_H: [(char, char); 6] = [
    ('→', '←'),
    ('↗', '↖'),
    ('↘', '↙'),
    ('/', '\\'),
    ('<', '>'),
    ('(', ')'),
];
const MIRROR_V: [(char, char); 6] = [
    ('↑', '↓'),
    ('↗', '↘'),
    ('↖', '↙'),
    ('/', '\\'),
    ('^', 'v'),
    ('M', 'W'),
];

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Image {
    pub width: i32,
    pub height: i32,
    pub glyph: char,
    pub color: Rgb,
    pub shape: Shape,
    /// Accumulated rotation in degrees (counter-clockwise).
    pub angle: f32,
    pub flipped_x: bool,
    pub flipped_y: bool,
}

impl Image {
    pub fn new(width: i32, height: i32, glyph: char, color: Rgb) -> Self {
        Self {
            width,
            height,
            glyph,
            color,
            shape: Shape::Box,
            angle: 0.0,
            flipped_x: false,
            flipped_y: false,
        }
    }

    /// Filled circle of the given radius on a 2r×2r canvas.
    pub fn disc(radius: i32, color: Rgb) -> Self {
        Self {
            shape: Shape::Disc,
            ..Self::new(2 * radius, 2 * radius, '●', color)
        }
    }

    /// The image's box at the origin.
    pub fn rect(&self) -> Rect {
        Rect::new(0, 0, self.width, self.height)
    }

    /// Rotate counter-clockwise by `angle` degrees and scale by `zoom`.
    /// The result is sized to the rotated content's bounding box.
    pub fn rotozoom(&self, angle: f32, zoom: f32) -> Image {
        let (width, height) = rotozoom_size(self.width, self.height, angle, zoom);
        Image {
            width,
            height,
            glyph: turn_glyph(self.glyph, angle),
            angle: self.angle + angle,
            ..*self
        }
    }

    /// Mirror horizontally (`x`) and/or vertically (`y`).  Size is unchanged.
    pub fn flip(&self, x: bool, y: bool) -> Image {
        let mut glyph = self.glyph;
        if x {
            glyph = mirror_glyph(glyph, &MIRROR_H);
        }
        if y {
            glyph = mirror_glyph(glyph, &MIRROR_V);
        }
        Image {
            glyph,
            flipped_x: self.flipped_x ^ x,
            flipped_y: self.flipped_y ^ y,
            ..*self
        }
    }
}

fn rotozoom_size(width: i32, height: i32, angle: f32, zoom: f32) -> (i32, i32) {
    let zoom = zoom as f64;
    if angle.abs() < ANGLE_EPSILON {
        let w = ((width as f64 * zoom + 0.5) as i32).max(1);
        let h = ((height as f64 * zoom + 0.5) as i32).max(1);
        return (w, h);
    }

    let rad = (angle as f64).to_radians();
    let (sin, cos) = (rad.sin() * zoom, rad.cos() * zoom);
    let (x, y) = (width as f64 / 2.0, height as f64 / 2.0);
    let (cx, cy, sx, sy) = (cos * x, cos * y, sin * x, sin * y);

    let half = |a: f64, b: f64| {
        let extent = [a + b, a - b, -a + b, -a - b]
            .into_iter()
            .map(f64::abs)
            .fold(0.0, f64::max);
        // trig noise (cos 90° is not exactly zero) must not push an exact
        // edge up to the next pixel
        ((extent - 1e-6).ceil() as i32).max(1)
    };
    (2 * half(cx, sy), 2 * half(sx, cy))
}

fn turn_glyph(glyph: char, angle: f32) -> char {
    let steps = angle / 45.0;
    if (steps - steps.round()).abs() > ANGLE_EPSILON {
        return glyph;
    }
    let steps = steps.round() as i32;
    for ring in [&ARROW_RING[..], &LINE_RING[..]] {
        if let Some(i) = ring.iter().position(|&c| c == glyph) {
            let len = ring.len() as i32;
            return ring[(i as i32 + steps).rem_euclid(len) as usize];
        }
    }
    glyph
}

fn mirror_glyph(glyph: char, pairs: &[(char, char)]) -> char {
    for &(a, b) in pairs {
        if glyph == a {
            return b;
        }
        if glyph == b {
            return a;
        }
    }
    glyph
}

// ── Loading ───────────────────────────────────────────────────────────────────

pub trait ImageLoader {
    fn load(&self, name: &str) -> Result<Image, AssetLoadError>;
}

#[derive(Debug, Deserialize)]
struct Manifest {
    images: HashMap<String, ImageSpec>,
}

#[derive(Clone, Debug, Deserialize)]
struct ImageSpec {
    width: i32,
    height: i32,
    glyph: String,
    color: Rgb,
    #[serde(default)]
    shape: Shape,
}

/// Loads images from a JSON sprite manifest.
#[derive(Debug)]
pub struct ManifestLoader {
    images: HashMap<String, ImageSpec>,
}

impl ManifestLoader {
    /// The manifest compiled into the binary.
    pub fn embedded() -> Result<Self, AssetLoadError> {
        Self::from_json("<embedded>", EMBEDDED_MANIFEST)
    }

    /// Reads `sprites.json` from `dir`.
    pub fn from_dir(dir: &Path) -> Result<Self, AssetLoadError> {
        let path = dir.join(MANIFEST_FILE);
        let text = std::fs::read_to_string(&path).map_err(|source| AssetLoadError::Io {
            path: path.clone(),
            source,
        })?;
        Self::from_json(&path.display().to_string(), &text)
    }

    pub fn from_json(origin: &str, text: &str) -> Result<Self, AssetLoadError> {
        let manifest: Manifest =
            serde_json::from_str(text).map_err(|source| AssetLoadError::Parse {
                origin: origin.to_string(),
                source,
            })?;
        log::debug!("sprite manifest {}: {} images", origin, manifest.images.len());
        Ok(Self {
            images: manifest.images,
        })
    }
}

impl ImageLoader for ManifestLoader {
    fn load(&self, name: &str) -> Result<Image, AssetLoadError> {
        let spec = self
            .images
            .get(name)
            .ok_or_else(|| AssetLoadError::Missing(name.to_string()))?;
        let invalid = |reason| AssetLoadError::Invalid {
            name: name.to_string(),
            reason,
        };

        if spec.width <= 0 || spec.height <= 0 {
            return Err(invalid("size must be positive"));
        }
        let mut chars = spec.glyph.chars();
        let glyph = match (chars.next(), chars.next()) {
            (Some(c), None) => c,
            (None, _) => return Err(invalid("glyph is empty")),
            (Some(_), Some(_)) => return Err(invalid("glyph must be a single character")),
        };

        Ok(Image {
            shape: spec.shape,
            ..Image::new(spec.width, spec.height, glyph, spec.color)
        })
    }
}

// ── Bundle ────────────────────────────────────────────────────────────────────

/// Every image the game needs, loaded once at startup.
#[derive(Clone, Debug, PartialEq)]
pub struct Assets {
    pub background: Image,
    pub kokaton: Image,
    pub victory: Image,
    pub defeat: Image,
    pub beam: Image,
    pub explosion: Image,
}

impl Assets {
    pub fn load<L: ImageLoader + ?Sized>(loader: &L) -> Result<Self, AssetLoadError> {
        Ok(Self {
            background: loader.load(BACKGROUND)?,
            kokaton: loader.load(KOKATON)?,
            victory: loader.load(KOKATON_VICTORY)?,
            defeat: loader.load(KOKATON_DEFEAT)?,
            beam: loader.load(BEAM)?,
            explosion: loader.load(EXPLOSION)?,
        })
    }
}
