/// RGBA color used by the simulation's cosmetic state.
///
/// Kept independent of any terminal color type so the simulation can be
/// tested without a rendering surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// Half brightness, fully transparent. Explosion particles fade toward this.
    pub const fn faded(self) -> Self {
        Self::new(self.r / 2, self.g / 2, self.b / 2, 0)
    }

    /// Linear interpolation toward `end`; `t` is clamped to `[0, 1]`.
    pub fn lerp(self, end: Rgba, t: f32) -> Rgba {
        let t = t.clamp(0.0, 1.0);
        let channel = |a: u8, b: u8| -> u8 {
            let a = a as f32;
            let b = b as f32;
            (a + (b - a) * t).round().clamp(0.0, 255.0) as u8
        };
        Rgba {
            r: channel(self.r, end.r),
            g: channel(self.g, end.g),
            b: channel(self.b, end.b),
            a: channel(self.a, end.a),
        }
    }
}

pub const NEON_CYAN: Rgba = Rgba::opaque(0, 255, 255);
pub const NEON_PINK: Rgba = Rgba::opaque(255, 0, 255);
pub const NEON_GREEN: Rgba = Rgba::opaque(0, 255, 100);
pub const NEON_ORANGE: Rgba = Rgba::opaque(255, 150, 0);
pub const NEON_YELLOW: Rgba = Rgba::opaque(255, 255, 0);
pub const RED: Rgba = Rgba::opaque(255, 0, 0);
