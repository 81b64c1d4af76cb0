use crate::foundation::error::{FxError, FxResult};

pub use kurbo::{Point, Rect, Vec2};

/// Drawing-surface size in canvas units (CSS pixels for the page host).
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SurfaceSize {
    pub width: f64,
    pub height: f64,
}

impl SurfaceSize {
    pub fn new(width: f64, height: f64) -> FxResult<Self> {
        if !(width.is_finite() && height.is_finite()) {
            return Err(FxError::validation("surface size must be finite"));
        }
        if width <= 0.0 || height <= 0.0 {
            return Err(FxError::validation(format!(
                "surface size must be positive, got {width}x{height}"
            )));
        }
        Ok(Self { width, height })
    }

    pub fn contains(self, p: Point) -> bool {
        (0.0..=self.width).contains(&p.x) && (0.0..=self.height).contains(&p.y)
    }

    pub fn to_rect(self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }

    /// Whole-pixel raster dimensions, rounded up so the full surface is covered.
    pub fn pixel_dims(self) -> (u32, u32) {
        (self.width.ceil() as u32, self.height.ceil() as u32)
    }
}

/// Straight (non-premultiplied) RGBA8.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Multiplies alpha by `opacity` (clamped to `[0, 1]`).
    pub fn with_opacity(self, opacity: f64) -> Self {
        let o = opacity.clamp(0.0, 1.0);
        Self {
            a: (f64::from(self.a) * o).round() as u8,
            ..self
        }
    }

    pub fn to_premul(self) -> [u8; 4] {
        fn premul(c: u8, a: u8) -> u8 {
            let c = u16::from(c);
            let a = u16::from(a);
            (((c * a) + 127) / 255) as u8
        }

        [
            premul(self.r, self.a),
            premul(self.g, self.a),
            premul(self.b, self.a),
            self.a,
        ]
    }

    /// Parses `#rrggbb` or `#rrggbbaa`.
    pub fn parse_hex(s: &str) -> FxResult<Self> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        if hex.len() != 6 && hex.len() != 8 {
            return Err(FxError::validation(format!("invalid hex colour '{s}'")));
        }
        let byte = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .map_err(|_| FxError::validation(format!("invalid hex colour '{s}'")))
        };
        Ok(Self {
            r: byte(0)?,
            g: byte(2)?,
            b: byte(4)?,
            a: if hex.len() == 8 { byte(6)? } else { 255 },
        })
    }
}

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn surface_size_rejects_degenerate_values() {
        assert!(SurfaceSize::new(0.0, 10.0).is_err());
        assert!(SurfaceSize::new(10.0, -1.0).is_err());
        assert!(SurfaceSize::new(f64::NAN, 10.0).is_err());
        assert!(SurfaceSize::new(f64::INFINITY, 10.0).is_err());
        assert!(SurfaceSize::new(800.0, 600.0).is_ok());
    }

    #[test]
    fn surface_contains_is_inclusive_on_edges() {
        let s = SurfaceSize::new(10.0, 5.0).unwrap();
        assert!(s.contains(Point::new(0.0, 0.0)));
        assert!(s.contains(Point::new(10.0, 5.0)));
        assert!(!s.contains(Point::new(10.01, 5.0)));
        assert!(!s.contains(Point::new(-0.01, 2.0)));
        assert_eq!(s.pixel_dims(), (10, 5));
    }

    #[test]
    fn hex_parsing_accepts_both_forms() {
        assert_eq!(
            Rgba8::parse_hex("#64ffda").unwrap(),
            Rgba8::rgb(0x64, 0xff, 0xda)
        );
        assert_eq!(Rgba8::parse_hex("0a0b0c80").unwrap().a, 0x80);
        assert!(Rgba8::parse_hex("#12345").is_err());
        assert!(Rgba8::parse_hex("#zzzzzz").is_err());
    }

    #[test]
    fn opacity_scales_alpha_and_premul_rounds() {
        let c = Rgba8::rgb(255, 0, 0).with_opacity(0.5);
        assert_eq!(c.a, 128);
        assert_eq!(c.to_premul(), [128, 0, 0, 128]);
        assert_eq!(Rgba8::rgb(1, 2, 3).with_opacity(2.0).a, 255);
    }
}
