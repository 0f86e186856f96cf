//! Named colormaps, sampled by linear interpolation between anchor colours.

use magno_types::error::MagnoError;
use plotters::style::RGBColor;
use std::fmt;
use std::str::FromStr;

type Anchor = (f64, [u8; 3]);

const VIRIDIS: &[Anchor] = &[
    (0.0, [68, 1, 84]),
    (0.125, [71, 44, 122]),
    (0.25, [59, 81, 139]),
    (0.375, [44, 113, 142]),
    (0.5, [33, 144, 141]),
    (0.625, [39, 173, 129]),
    (0.75, [92, 200, 99]),
    (0.875, [170, 220, 50]),
    (1.0, [253, 231, 37]),
];

const PLASMA: &[Anchor] = &[
    (0.0, [13, 8, 135]),
    (0.125, [65, 4, 157]),
    (0.25, [106, 0, 168]),
    (0.375, [143, 13, 164]),
    (0.5, [177, 42, 144]),
    (0.625, [204, 71, 120]),
    (0.75, [225, 100, 98]),
    (0.875, [248, 149, 64]),
    (1.0, [240, 249, 33]),
];

const INFERNO: &[Anchor] = &[
    (0.0, [0, 0, 4]),
    (0.125, [31, 12, 72]),
    (0.25, [85, 15, 109]),
    (0.375, [136, 34, 106]),
    (0.5, [186, 54, 85]),
    (0.625, [227, 89, 51]),
    (0.75, [249, 140, 10]),
    (0.875, [249, 201, 50]),
    (1.0, [252, 255, 164]),
];

const MAGMA: &[Anchor] = &[
    (0.0, [0, 0, 4]),
    (0.125, [28, 16, 68]),
    (0.25, [79, 18, 123]),
    (0.375, [129, 37, 129]),
    (0.5, [181, 54, 122]),
    (0.625, [229, 80, 100]),
    (0.75, [251, 135, 97]),
    (0.875, [254, 194, 135]),
    (1.0, [252, 253, 191]),
];

const COOLWARM: &[Anchor] = &[
    (0.0, [59, 76, 192]),
    (0.25, [141, 176, 254]),
    (0.5, [221, 221, 221]),
    (0.75, [244, 154, 123]),
    (1.0, [180, 4, 38]),
];

const GRAY: &[Anchor] = &[(0.0, [0, 0, 0]), (1.0, [255, 255, 255])];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColormapKind {
    Viridis,
    Plasma,
    Inferno,
    Magma,
    Coolwarm,
    Gray,
}

impl ColormapKind {
    fn anchors(self) -> &'static [Anchor] {
        match self {
            ColormapKind::Viridis => VIRIDIS,
            ColormapKind::Plasma => PLASMA,
            ColormapKind::Inferno => INFERNO,
            ColormapKind::Magma => MAGMA,
            ColormapKind::Coolwarm => COOLWARM,
            ColormapKind::Gray => GRAY,
        }
    }

    fn name(self) -> &'static str {
        match self {
            ColormapKind::Viridis => "viridis",
            ColormapKind::Plasma => "plasma",
            ColormapKind::Inferno => "inferno",
            ColormapKind::Magma => "magma",
            ColormapKind::Coolwarm => "coolwarm",
            ColormapKind::Gray => "gray",
        }
    }
}

/// A colormap, optionally reversed (`_r` suffix, as in matplotlib).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Colormap {
    pub kind: ColormapKind,
    pub reversed: bool,
}

impl Default for Colormap {
    fn default() -> Self {
        Colormap {
            kind: ColormapKind::Viridis,
            reversed: false,
        }
    }
}

impl Colormap {
    /// Colour for `x` in [0, 1]; out-of-range and NaN inputs are clamped
    /// (NaN maps to the low end).
    pub fn colour(&self, x: f64) -> RGBColor {
        let mut x = if x.is_nan() { 0.0 } else { x.clamp(0.0, 1.0) };
        if self.reversed {
            x = 1.0 - x;
        }
        let anchors = self.kind.anchors();
        let upper = anchors
            .iter()
            .position(|&(pos, _)| pos >= x)
            .unwrap_or(anchors.len() - 1)
            .max(1);
        let (p0, c0) = anchors[upper - 1];
        let (p1, c1) = anchors[upper];
        let t = if p1 > p0 { (x - p0) / (p1 - p0) } else { 0.0 };
        let lerp = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
        RGBColor(lerp(c0[0], c1[0]), lerp(c0[1], c1[1]), lerp(c0[2], c1[2]))
    }
}

impl FromStr for Colormap {
    type Err = MagnoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        let (base, reversed) = match lower.strip_suffix("_r") {
            Some(base) => (base, true),
            None => (lower.as_str(), false),
        };
        let kind = match base {
            "viridis" => ColormapKind::Viridis,
            "plasma" => ColormapKind::Plasma,
            "inferno" => ColormapKind::Inferno,
            "magma" => ColormapKind::Magma,
            "coolwarm" => ColormapKind::Coolwarm,
            "gray" | "grey" => ColormapKind::Gray,
            _ => {
                return Err(MagnoError::ConfigError(format!(
                    "unknown colormap '{s}' (expected viridis, plasma, inferno, magma, coolwarm or gray)"
                )))
            }
        };
        Ok(Colormap { kind, reversed })
    }
}

impl fmt::Display for Colormap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind.name())?;
        if self.reversed {
            write!(f, "_r")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rgb(c: RGBColor) -> (u8, u8, u8) {
        (c.0, c.1, c.2)
    }

    #[test]
    fn test_viridis_endpoints() {
        let cmap: Colormap = "viridis".parse().unwrap();
        assert_eq!(rgb(cmap.colour(0.0)), (68, 1, 84));
        assert_eq!(rgb(cmap.colour(1.0)), (253, 231, 37));
        assert_eq!(rgb(cmap.colour(0.5)), (33, 144, 141));
    }

    #[test]
    fn test_clamps_out_of_range() {
        let cmap = Colormap::default();
        assert_eq!(rgb(cmap.colour(-3.0)), rgb(cmap.colour(0.0)));
        assert_eq!(rgb(cmap.colour(7.0)), rgb(cmap.colour(1.0)));
        assert_eq!(rgb(cmap.colour(f64::NAN)), rgb(cmap.colour(0.0)));
    }

    #[test]
    fn test_gray_is_linear() {
        let cmap: Colormap = "grey".parse().unwrap();
        assert_eq!(rgb(cmap.colour(0.5)), (128, 128, 128));
        assert_eq!(rgb(cmap.colour(0.25)), (64, 64, 64));
    }

    #[test]
    fn test_reversed_suffix() {
        let fwd: Colormap = "magma".parse().unwrap();
        let rev: Colormap = "Magma_r".parse().unwrap();
        assert!(rev.reversed);
        assert_eq!(rgb(rev.colour(0.0)), rgb(fwd.colour(1.0)));
        assert_eq!(rgb(rev.colour(0.3)), rgb(fwd.colour(0.7)));
        assert_eq!(rev.to_string(), "magma_r");
    }

    #[test]
    fn test_unknown_name_rejected() {
        match "jet".parse::<Colormap>() {
            Err(MagnoError::ConfigError(msg)) => assert!(msg.contains("jet")),
            other => panic!("expected config error, got {other:?}"),
        }
    }

    #[test]
    fn test_bwr_is_not_coolwarm() {
        assert!("bwr".parse::<Colormap>().is_err());
        assert!("bwr_r".parse::<Colormap>().is_err());
        assert!("coolwarm_r".parse::<Colormap>().is_ok());
    }
}
