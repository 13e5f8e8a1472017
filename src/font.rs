//! Typeface loading and text outline geometry.
//!
//! Fonts use the JSON "typeface" layout produced by facetype.js: a
//! `resolution` (units per em) and a map of glyphs, each with a horizontal
//! advance `ha` and an outline string `o` made of drawing commands:
//!
//! | Command | Operands | Meaning |
//! |---------|----------|---------|
//! | `m` | `x y` | start a new contour |
//! | `l` | `x y` | straight line |
//! | `q` | `x y cpx cpy` | quadratic curve ending at `(x, y)` |
//! | `b` | `x y c1x c1y c2x c2y` | cubic curve ending at `(x, y)` |
//!
//! Curves are flattened when the font is parsed, so a [`Glyph`] is a list of
//! polylines in font units. [`Font::text_segments`] lays a string out along
//! +X at a given size and returns line segments ready for the line renderer.
//!
//! Loading happens on a short-lived thread; [`load`] returns a [`PendingFont`]
//! that the frame loop polls without blocking.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::str::SplitWhitespace;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use glam::{Vec2, Vec3};
use serde::Deserialize;

use crate::error::FontError;

/// Line segments used to approximate one curve command.
const CURVE_SEGMENTS: usize = 8;

#[derive(Deserialize)]
struct TypefaceFile {
    #[serde(rename = "familyName", default)]
    family_name: String,
    resolution: f32,
    glyphs: HashMap<String, GlyphDef>,
}

#[derive(Deserialize)]
struct GlyphDef {
    ha: f32,
    #[serde(default)]
    o: Option<String>,
}

/// One character: its advance and its outline as polylines in font units.
#[derive(Debug, Clone, PartialEq)]
pub struct Glyph {
    pub advance: f32,
    pub contours: Vec<Vec<Vec2>>,
}

/// A parsed typeface.
#[derive(Debug, Clone)]
pub struct Font {
    family: String,
    resolution: f32,
    glyphs: HashMap<char, Glyph>,
}

impl Font {
    /// Parse a typeface JSON document.
    pub fn parse(json: &str) -> Result<Self, FontError> {
        let file: TypefaceFile = serde_json::from_str(json)?;
        let resolution = if file.resolution > 0.0 { file.resolution } else { 1000.0 };

        let mut glyphs = HashMap::with_capacity(file.glyphs.len());
        for (key, def) in file.glyphs {
            let mut chars = key.chars();
            let (Some(ch), None) = (chars.next(), chars.next()) else {
                continue;
            };
            let contours = match def.o.as_deref() {
                Some(outline) => parse_outline(ch, outline)?,
                None => Vec::new(),
            };
            glyphs.insert(
                ch,
                Glyph {
                    advance: def.ha,
                    contours,
                },
            );
        }

        Ok(Self {
            family: file.family_name,
            resolution,
            glyphs,
        })
    }

    /// Read and parse a typeface file, blocking the caller.
    pub fn from_path(path: &Path) -> Result<Self, FontError> {
        let json = std::fs::read_to_string(path).map_err(|source| FontError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&json)
    }

    pub fn family(&self) -> &str {
        &self.family
    }

    /// Font units per em.
    pub fn resolution(&self) -> f32 {
        self.resolution
    }

    pub fn glyph(&self, ch: char) -> Option<&Glyph> {
        self.glyphs.get(&ch)
    }

    /// Lay out `text` starting at the origin, glyph height `size`, in the XY
    /// plane. Characters missing from the font are skipped without advancing.
    pub fn text_segments(&self, text: &str, size: f32) -> Vec<(Vec3, Vec3)> {
        let scale = size / self.resolution;
        let mut pen_x = 0.0;
        let mut segments = Vec::new();

        for ch in text.chars() {
            let Some(glyph) = self.glyphs.get(&ch) else {
                continue;
            };
            for contour in &glyph.contours {
                for pair in contour.windows(2) {
                    let a = Vec3::new(pen_x + pair[0].x * scale, pair[0].y * scale, 0.0);
                    let b = Vec3::new(pen_x + pair[1].x * scale, pair[1].y * scale, 0.0);
                    segments.push((a, b));
                }
            }
            pen_x += glyph.advance * scale;
        }

        segments
    }
}

fn parse_outline(glyph: char, outline: &str) -> Result<Vec<Vec<Vec2>>, FontError> {
    let mut tokens = outline.split_whitespace();
    let mut contours: Vec<Vec<Vec2>> = Vec::new();
    let mut current: Vec<Vec2> = Vec::new();

    while let Some(command) = tokens.next() {
        match command {
            "m" => {
                if current.len() > 1 {
                    contours.push(std::mem::take(&mut current));
                }
                current.clear();
                current.push(next_point(glyph, &mut tokens)?);
            }
            "l" => {
                let p = next_point(glyph, &mut tokens)?;
                current.push(p);
            }
            "q" => {
                let end = next_point(glyph, &mut tokens)?;
                let control = next_point(glyph, &mut tokens)?;
                let start = current.last().copied().unwrap_or(end);
                for i in 1..=CURVE_SEGMENTS {
                    let t = i as f32 / CURVE_SEGMENTS as f32;
                    current.push(quadratic(start, control, end, t));
                }
            }
            "b" => {
                let end = next_point(glyph, &mut tokens)?;
                let c1 = next_point(glyph, &mut tokens)?;
                let c2 = next_point(glyph, &mut tokens)?;
                let start = current.last().copied().unwrap_or(end);
                for i in 1..=CURVE_SEGMENTS {
                    let t = i as f32 / CURVE_SEGMENTS as f32;
                    current.push(cubic(start, c1, c2, end, t));
                }
            }
            "z" => {
                if let Some(&first) = current.first() {
                    current.push(first);
                }
            }
            other => {
                return Err(FontError::Outline {
                    glyph,
                    message: format!("unknown command {other:?}"),
                })
            }
        }
    }

    if current.len() > 1 {
        contours.push(current);
    }
    Ok(contours)
}

fn next_point(glyph: char, tokens: &mut SplitWhitespace<'_>) -> Result<Vec2, FontError> {
    let mut number = || -> Result<f32, FontError> {
        let token = tokens.next().ok_or_else(|| FontError::Outline {
            glyph,
            message: "outline ended mid-command".to_string(),
        })?;
        token.parse::<f32>().map_err(|_| FontError::Outline {
            glyph,
            message: format!("expected a number, found {token:?}"),
        })
    };
    let x = number()?;
    let y = number()?;
    Ok(Vec2::new(x, y))
}

fn quadratic(p0: Vec2, p1: Vec2, p2: Vec2, t: f32) -> Vec2 {
    let u = 1.0 - t;
    p0 * (u * u) + p1 * (2.0 * u * t) + p2 * (t * t)
}

fn cubic(p0: Vec2, p1: Vec2, p2: Vec2, p3: Vec2, t: f32) -> Vec2 {
    let u = 1.0 - t;
    p0 * (u * u * u) + p1 * (3.0 * u * u * t) + p2 * (3.0 * u * t * t) + p3 * (t * t * t)
}

/// Start loading a typeface in the background.
pub fn load(path: impl Into<PathBuf>) -> PendingFont {
    let path = path.into();
    let (tx, rx) = mpsc::channel();
    let thread_path = path.clone();

    let spawned = thread::Builder::new()
        .name("font-loader".to_string())
        .spawn(move || {
            // the receiver may already be gone if the window closed
            let _ = tx.send(Font::from_path(&thread_path));
        });

    match spawned {
        Ok(_) => PendingFont { path, rx },
        Err(source) => {
            let (tx, rx) = mpsc::channel();
            let _ = tx.send(Err(FontError::Io {
                path: path.clone(),
                source,
            }));
            PendingFont { path, rx }
        }
    }
}

/// A font that is still loading.
#[derive(Debug)]
pub struct PendingFont {
    path: PathBuf,
    rx: Receiver<Result<Font, FontError>>,
}

impl PendingFont {
    /// A handle that resolves to `result` on its first poll.
    pub fn resolved(path: impl Into<PathBuf>, result: Result<Font, FontError>) -> Self {
        let (tx, rx) = mpsc::channel();
        let _ = tx.send(result);
        Self {
            path: path.into(),
            rx,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Check for a result without blocking. `None` while still loading.
    ///
    /// Once a result has been returned the handle is spent; later polls
    /// report [`FontError::LoaderDisconnected`].
    pub fn poll(&mut self) -> Option<Result<Font, FontError>> {
        match self.rx.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Err(FontError::LoaderDisconnected)),
        }
    }

    /// Block until the loader delivers.
    pub fn wait(self) -> Result<Font, FontError> {
        self.rx.recv().map_err(|_| FontError::LoaderDisconnected)?
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TINY: &str = r#"{
        "familyName": "Tiny",
        "resolution": 100,
        "glyphs": {
            "1": { "ha": 60, "o": "m 30 0 l 30 100" },
            "L": { "ha": 80, "x_min": 0, "x_max": 70, "o": "m 0 100 l 0 0 l 70 0" },
            " ": { "ha": 40 },
            "c": { "ha": 50, "o": "m 0 0 q 100 0 50 50" },
            "s": { "ha": 50, "o": "m 0 0 b 90 0 30 60 60 60" }
        }
    }"#;

    #[test]
    fn test_parse_glyphs() {
        let font = Font::parse(TINY).unwrap();
        assert_eq!(font.family(), "Tiny");
        assert_eq!(font.resolution(), 100.0);

        let one = font.glyph('1').unwrap();
        assert_eq!(one.advance, 60.0);
        assert_eq!(one.contours, vec![vec![Vec2::new(30.0, 0.0), Vec2::new(30.0, 100.0)]]);
        assert!(font.glyph(' ').unwrap().contours.is_empty());
    }

    #[test]
    fn test_curves_are_flattened_to_endpoint() {
        let font = Font::parse(TINY).unwrap();

        let quad = &font.glyph('c').unwrap().contours[0];
        assert_eq!(quad.len(), 1 + CURVE_SEGMENTS);
        assert_eq!(*quad.last().unwrap(), Vec2::new(100.0, 0.0));
        // halfway between the chord midpoint and the control point
        let mid = quad[CURVE_SEGMENTS / 2];
        assert!((mid - Vec2::new(50.0, 25.0)).length() < 1e-4);

        let cubic = &font.glyph('s').unwrap().contours[0];
        assert_eq!(cubic.len(), 1 + CURVE_SEGMENTS);
        assert!((*cubic.last().unwrap() - Vec2::new(90.0, 0.0)).length() < 1e-4);
    }

    #[test]
    fn test_text_segments_scale_and_advance() {
        let font = Font::parse(TINY).unwrap();
        let segments = font.text_segments("11", 0.5);

        assert_eq!(segments.len(), 2);
        let (a, b) = segments[0];
        assert!((a - Vec3::new(0.15, 0.0, 0.0)).length() < 1e-6);
        assert!((b - Vec3::new(0.15, 0.5, 0.0)).length() < 1e-6);
        assert!((segments[1].0.x - 0.45).abs() < 1e-6);
    }

    #[test]
    fn test_missing_characters_are_skipped() {
        let font = Font::parse(TINY).unwrap();
        assert_eq!(font.text_segments("1?1", 1.0), font.text_segments("11", 1.0));
        assert!(font.text_segments("???", 1.0).is_empty());
    }

    #[test]
    fn test_bad_outline_is_reported() {
        let json = r#"{ "resolution": 10, "glyphs": { "x": { "ha": 5, "o": "m 0 0 w 1 1" } } }"#;
        let err = Font::parse(json).unwrap_err();
        assert!(matches!(err, FontError::Outline { glyph: 'x', .. }));

        let json = r#"{ "resolution": 10, "glyphs": { "x": { "ha": 5, "o": "m 0" } } }"#;
        assert!(matches!(Font::parse(json), Err(FontError::Outline { .. })));
    }

    #[test]
    fn test_pending_font_resolves_once() {
        let font = Font::parse(TINY).unwrap();
        let mut pending = PendingFont::resolved("tiny.json", Ok(font));

        assert!(matches!(pending.poll(), Some(Ok(_))));
        assert!(matches!(pending.poll(), Some(Err(FontError::LoaderDisconnected))));
    }

    #[test]
    fn test_load_missing_file_fails() {
        let pending = load("/definitely/not/here.typeface.json");
        assert!(matches!(pending.wait(), Err(FontError::Io { .. })));
    }
}
