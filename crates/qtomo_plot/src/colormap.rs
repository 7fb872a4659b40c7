//! Colors and colormaps
//!
//! Gantree: L6_Plot → Colormap
//!
//! Linear segmented colormaps over `[0, 1]` and the normalization that maps
//! data values onto that range.

use qtomo_core::{TomoError, TomoResult};
use std::f64::consts::PI;
use std::fmt;

// ============================================================================
// Rgba
// ============================================================================

/// RGBA color with channels in `[0, 1]`
/// Gantree: Rgba // 색상
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    /// Red
    pub r: f64,
    /// Green
    pub g: f64,
    /// Blue
    pub b: f64,
    /// Alpha (0 = transparent)
    pub a: f64,
}

impl Rgba {
    /// Opaque color from 8-bit channels
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: f64::from(r) / 255.0,
            g: f64::from(g) / 255.0,
            b: f64::from(b) / 255.0,
            a: 1.0,
        }
    }

    /// Parse `#rrggbb`
    pub fn from_hex(hex: &str) -> TomoResult<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        let invalid = || TomoError::InvalidConfig(format!("invalid color: {hex}"));
        if digits.len() != 6 {
            return Err(invalid());
        }
        let channel = |i: usize| {
            digits
                .get(i..i + 2)
                .and_then(|s| u8::from_str_radix(s, 16).ok())
                .ok_or_else(invalid)
        };
        Ok(Self::from_rgb8(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Same color with a new alpha
    pub fn with_alpha(mut self, a: f64) -> Self {
        self.a = a.clamp(0.0, 1.0);
        self
    }

    /// Scale RGB channels, used for shading bar faces
    pub fn shade(self, factor: f64) -> Self {
        Self {
            r: (self.r * factor).clamp(0.0, 1.0),
            g: (self.g * factor).clamp(0.0, 1.0),
            b: (self.b * factor).clamp(0.0, 1.0),
            a: self.a,
        }
    }

    /// `#rrggbb`, alpha dropped
    pub fn to_hex(&self) -> String {
        let q = |c: f64| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!("#{:02x}{:02x}{:02x}", q(self.r), q(self.g), q(self.b))
    }

    fn lerp(self, other: Rgba, t: f64) -> Rgba {
        Rgba {
            r: self.r + (other.r - self.r) * t,
            g: self.g + (other.g - self.g) * t,
            b: self.b + (other.b - self.b) * t,
            a: self.a + (other.a - self.a) * t,
        }
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

// ============================================================================
// Normalize
// ============================================================================

/// Linear map from `[vmin, vmax]` onto `[0, 1]`
/// Gantree: Normalize // 정규화
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Normalize {
    /// Value mapped to 0
    pub vmin: f64,
    /// Value mapped to 1
    pub vmax: f64,
}

impl Normalize {
    /// Create; `vmin` must be below `vmax`
    pub fn new(vmin: f64, vmax: f64) -> TomoResult<Self> {
        if !(vmin < vmax) {
            return Err(TomoError::InvalidConfig(format!(
                "normalization range [{vmin}, {vmax}] is empty"
            )));
        }
        Ok(Self { vmin, vmax })
    }

    /// Phase range `[-π, π]`
    pub fn phase() -> Self {
        Self { vmin: -PI, vmax: PI }
    }

    /// Signed unit range `[-1, 1]`
    pub fn unit() -> Self {
        Self {
            vmin: -1.0,
            vmax: 1.0,
        }
    }

    /// Normalized value, unclipped
    pub fn apply(&self, value: f64) -> f64 {
        (value - self.vmin) / (self.vmax - self.vmin)
    }
}

// ============================================================================
// Colormap
// ============================================================================

/// Colormap interpolating linearly between evenly spaced anchor colors
/// Gantree: Colormap // 컬러맵
#[derive(Debug, Clone, PartialEq)]
pub struct Colormap {
    name: String,
    colors: Vec<Rgba>,
}

impl Colormap {
    /// Build from at least two anchor colors
    pub fn from_list(name: &str, colors: Vec<Rgba>) -> TomoResult<Self> {
        if colors.len() < 2 {
            return Err(TomoError::InvalidConfig(format!(
                "colormap {name} needs at least two colors"
            )));
        }
        Ok(Self {
            name: name.to_string(),
            colors,
        })
    }

    /// Colormap name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Anchor colors
    pub fn colors(&self) -> &[Rgba] {
        &self.colors
    }

    /// Color at `t`, clamped to `[0, 1]`; NaN maps to the first anchor
    /// Gantree: at(t) -> Rgba // 보간
    pub fn at(&self, t: f64) -> Rgba {
        if t.is_nan() {
            return self.colors[0];
        }
        let segments = (self.colors.len() - 1) as f64;
        let pos = t.clamp(0.0, 1.0) * segments;
        let i = (pos.floor() as usize).min(self.colors.len() - 2);
        self.colors[i].lerp(self.colors[i + 1], pos - i as f64)
    }

    /// Color of a data value under `norm`
    pub fn map(&self, value: f64, norm: &Normalize) -> Rgba {
        self.at(norm.apply(value))
    }
}

/// Cyclic four-color map for complex phases; both ends share a color so
/// `-π` and `π` look the same
pub fn phase_colormap() -> Colormap {
    let anchors = [
        Rgba::from_rgb8(0x1f, 0x4e, 0x79),
        Rgba::from_rgb8(0x3d, 0xcb, 0xda),
        Rgba::from_rgb8(0xf2, 0xc1, 0x4e),
        Rgba::from_rgb8(0xd1, 0x49, 0x5b),
    ];
    let mut colors = anchors.to_vec();
    colors.push(anchors[0]);
    Colormap {
        name: "phase4".to_string(),
        colors,
    }
}

/// Three-color diverging map for signed values
pub fn diverging_colormap() -> Colormap {
    Colormap {
        name: "diverging3".to_string(),
        colors: vec![
            Rgba::from_rgb8(0x1f, 0x4e, 0x79),
            Rgba::from_rgb8(0xff, 0xff, 0xff),
            Rgba::from_rgb8(0xd1, 0x49, 0x5b),
        ],
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_hex_roundtrip() {
        let c = Rgba::from_hex("#3dcbda").unwrap();
        assert_eq!(c.to_hex(), "#3dcbda");
        assert!(Rgba::from_hex("#12345").is_err());
        assert!(Rgba::from_hex("zzzzzz").is_err());
    }

    #[test]
    fn test_normalize() {
        let n = Normalize::new(-1.0, 1.0).unwrap();
        assert_relative_eq!(n.apply(0.0), 0.5);
        assert_relative_eq!(Normalize::phase().apply(PI), 1.0);
        assert!(Normalize::new(1.0, 1.0).is_err());
    }

    #[test]
    fn test_colormap_endpoints() {
        let cmap = diverging_colormap();
        assert_eq!(cmap.at(0.0), cmap.colors()[0]);
        assert_eq!(cmap.at(1.0).to_hex(), "#d1495b");
        assert_eq!(cmap.at(0.5).to_hex(), "#ffffff");
        assert_eq!(cmap.at(2.0), cmap.at(1.0));
    }

    #[test]
    fn test_phase_colormap_is_cyclic() {
        let cmap = phase_colormap();
        let norm = Normalize::phase();
        assert_eq!(cmap.map(-PI, &norm).to_hex(), cmap.map(PI, &norm).to_hex());
        assert_eq!(cmap.colors().len(), 5);
    }

    #[test]
    fn test_from_list_requires_two_colors() {
        assert!(Colormap::from_list("one", vec![Rgba::from_rgb8(0, 0, 0)]).is_err());
    }

    #[test]
    fn test_shade_and_alpha() {
        let c = Rgba::from_rgb8(200, 100, 50).shade(0.5).with_alpha(0.0);
        assert_eq!(c.to_hex(), "#643219");
        assert_eq!(c.a, 0.0);
    }
}
