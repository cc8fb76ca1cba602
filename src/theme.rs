//! Globe palette: warm accent highlights over dim neutral particles

/// Straight-alpha color, converted to a CSS `rgba()` string at draw time
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn from_rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Multiply alpha by `factor`, clamped to [0, 1]
    pub fn fade(self, factor: f32) -> Self {
        Self {
            a: (self.a * factor).clamp(0.0, 1.0),
            ..self
        }
    }

    pub fn to_css(self) -> String {
        let a = self.a.clamp(0.0, 1.0);
        format!("rgba({},{},{},{})", self.r, self.g, self.b, a)
    }
}

pub mod colors {
    use super::Rgba;

    // === Particles ===
    pub const ACCENT: Rgba = Rgba::from_rgba(255, 107, 53, 1.0);    // #FF6B35 - highlight points
    pub const NEUTRAL: Rgba = Rgba::from_rgba(200, 205, 215, 0.7);  // #C8CDD7 - regular points

    // === Glow ===
    pub const GLOW: Rgba = Rgba::from_rgba(255, 107, 53, 0.8);
    pub const GLOW_BLUR: f64 = 12.0;

    // === Network arcs ===
    pub const ARC: Rgba = Rgba::from_rgb(255, 255, 255);
    pub const ARC_ALPHA: f32 = 0.15;
    pub const ARC_WIDTH: f64 = 0.6;
}
