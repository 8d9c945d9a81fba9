//! Per-tile request URL templates.
//!
//! A template is a URL with `{name}` placeholders substituted per tile:
//!
//! | Placeholder | Value                                             |
//! |-------------|---------------------------------------------------|
//! | `{x}`       | tile column                                       |
//! | `{y}`       | tile row                                          |
//! | `{z}`       | zoom level                                        |
//! | `{q}`       | Bing-style quadkey                                |
//! | `{bbox}`    | tile bounds as `left,bottom,right,top` (WMS BBOX) |
//!
//! Unknown placeholders are rejected when the template is parsed, so a typo
//! fails before any request is made.

use std::fmt;
use std::str::FromStr;

use regex::{Captures, Regex};
use thiserror::Error;

use crate::coord::{format_tile_bbox, TileId};

/// Template errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TemplateError {
    /// Template string is empty
    #[error("URL template is empty")]
    Empty,

    /// Template contains a placeholder that is not recognised
    #[error("Unknown placeholder '{{{0}}}' in URL template (expected one of {{x}}, {{y}}, {{z}}, {{q}}, {{bbox}})")]
    UnknownPlaceholder(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Placeholder {
    X,
    Y,
    Z,
    Quadkey,
    Bbox,
}

impl Placeholder {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "x" => Some(Self::X),
            "y" => Some(Self::Y),
            "z" => Some(Self::Z),
            "q" => Some(Self::Quadkey),
            "bbox" => Some(Self::Bbox),
            _ => None,
        }
    }

    fn value(self, tile: &TileId) -> String {
        match self {
            Self::X => tile.x.to_string(),
            Self::Y => tile.y.to_string(),
            Self::Z => tile.z.to_string(),
            Self::Quadkey => tile.quadkey(),
            Self::Bbox => format_tile_bbox(tile),
        }
    }
}

/// A validated URL template.
#[derive(Debug, Clone)]
pub struct UrlTemplate {
    raw: String,
    pattern: Regex,
}

impl UrlTemplate {
    /// Parses and validates a template.
    pub fn new(raw: impl Into<String>) -> Result<Self, TemplateError> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(TemplateError::Empty);
        }

        let pattern = placeholder_pattern();
        for caps in pattern.captures_iter(&raw) {
            let name = &caps[1];
            if Placeholder::from_name(name).is_none() {
                return Err(TemplateError::UnknownPlaceholder(name.to_string()));
            }
        }

        Ok(Self { raw, pattern })
    }

    /// Substitutes every placeholder for `tile`.
    pub fn render(&self, tile: &TileId) -> String {
        self.pattern
            .replace_all(&self.raw, |caps: &Captures| {
                // Validated in `new`
                Placeholder::from_name(&caps[1])
                    .map(|p| p.value(tile))
                    .unwrap_or_else(|| caps[0].to_string())
            })
            .into_owned()
    }

    /// Whether the template addresses tiles by `{x}`/`{y}`/`{z}`, `{q}` or
    /// `{bbox}`. A template with none requests the same URL for every tile.
    pub fn is_tile_specific(&self) -> bool {
        self.pattern.is_match(&self.raw)
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl FromStr for UrlTemplate {
    type Err = TemplateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Display for UrlTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

fn placeholder_pattern() -> Regex {
    // Literal pattern; cannot fail to compile
    Regex::new(r"\{([A-Za-z_][A-Za-z0-9_-]*)\}").expect("placeholder pattern is valid")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tile(x: u32, y: u32, z: u8) -> TileId {
        TileId { x, y, z }
    }

    #[test]
    fn test_render_xyz() {
        let template = UrlTemplate::new("https://tile.example.com/{z}/{x}/{y}.png").unwrap();
        assert_eq!(
            template.render(&tile(4823, 6160, 14)),
            "https://tile.example.com/14/4823/6160.png"
        );
    }

    #[test]
    fn test_render_repeated_and_reordered() {
        let template = UrlTemplate::new("http://h/{y}/{x}?z={z}&again={x}").unwrap();
        assert_eq!(template.render(&tile(1, 2, 3)), "http://h/2/1?z=3&again=1");
    }

    #[test]
    fn test_render_quadkey() {
        let template = UrlTemplate::new("http://ecn.t0.example.net/tiles/a{q}.jpeg").unwrap();
        assert_eq!(
            template.render(&tile(3, 5, 3)),
            "http://ecn.t0.example.net/tiles/a213.jpeg"
        );
    }

    #[test]
    fn test_render_wms_bbox() {
        let template = UrlTemplate::new(
            "http://wms.example.com/?SERVICE=WMS&REQUEST=GetMap&SRS=EPSG:4326&BBOX={bbox}",
        )
        .unwrap();
        assert_eq!(
            template.render(&tile(1, 1, 1)),
            "http://wms.example.com/?SERVICE=WMS&REQUEST=GetMap&SRS=EPSG:4326&BBOX=0.000000000,-85.051128780,180.000000000,0.000000000"
        );
    }

    #[test]
    fn test_unknown_placeholder_rejected() {
        let err = UrlTemplate::new("http://h/{zoom}/{x}/{y}").unwrap_err();
        assert_eq!(err, TemplateError::UnknownPlaceholder("zoom".to_string()));
        assert!(err.to_string().contains("{zoom}"));
    }

    #[test]
    fn test_empty_rejected() {
        assert_eq!(UrlTemplate::new("  ").unwrap_err(), TemplateError::Empty);
    }

    #[test]
    fn test_non_placeholder_braces_left_alone() {
        let template = UrlTemplate::new("http://h/{x}/{y}/{z}?q={}").unwrap();
        assert_eq!(template.render(&tile(0, 0, 0)), "http://h/0/0/0?q={}");
    }

    #[test]
    fn test_is_tile_specific() {
        assert!(UrlTemplate::new("http://h/{z}").unwrap().is_tile_specific());
        assert!(!UrlTemplate::new("http://h/static.png")
            .unwrap()
            .is_tile_specific());
    }

    #[test]
    fn test_from_str_and_display() {
        let template: UrlTemplate = "http://h/{z}/{x}/{y}".parse().unwrap();
        assert_eq!(template.to_string(), "http://h/{z}/{x}/{y}");
        assert_eq!(template.as_str(), "http://h/{z}/{x}/{y}");
    }
}
