//! RGBA color type and predefined color constants.

use serde::{Deserialize, Serialize};

/// Straight (non-premultiplied) RGBA color, components in 0.0-1.0.
///
/// # Examples
///
/// ```
/// use scribble::draw::Color;
/// let red = Color { r: 1.0, g: 0.0, b: 0.0, a: 1.0 };
/// let translucent = red.with_alpha(0.5);
/// assert_eq!(translucent.a, 0.5);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    /// Opacity; tools snapshot it at drag start and stroke at full opacity
    pub a: f64,
}

impl Color {
    /// Creates a new color from RGBA components.
    pub const fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Returns the same color with its alpha replaced (clamped to 0.0-1.0).
    pub fn with_alpha(self, alpha: f64) -> Self {
        Self {
            a: alpha.clamp(0.0, 1.0),
            ..self
        }
    }

    /// True when painting with this color would leave marks.
    pub fn is_visible(&self) -> bool {
        self.a > 0.0
    }

    /// Sets this color as the Cairo source.
    pub(crate) fn set_source(&self, ctx: &cairo::Context) {
        ctx.set_source_rgba(self.r, self.g, self.b, self.a);
    }
}

/// Opaque palette entries, also reachable by name through config color specs.
pub const RED: Color = Color::new(1.0, 0.0, 0.0, 1.0);
pub const GREEN: Color = Color::new(0.0, 1.0, 0.0, 1.0);
pub const BLUE: Color = Color::new(0.0, 0.0, 1.0, 1.0);
pub const YELLOW: Color = Color::new(1.0, 1.0, 0.0, 1.0);
pub const ORANGE: Color = Color::new(1.0, 0.5, 0.0, 1.0);
pub const PINK: Color = Color::new(1.0, 0.0, 1.0, 1.0);
pub const WHITE: Color = Color::new(1.0, 1.0, 1.0, 1.0);
pub const BLACK: Color = Color::new(0.0, 0.0, 0.0, 1.0);

/// Fully transparent black; painting with it leaves no marks.
pub const TRANSPARENT: Color = Color::new(0.0, 0.0, 0.0, 0.0);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_alpha_clamps_and_keeps_rgb() {
        let c = RED.with_alpha(1.7);
        assert_eq!(c, RED);
        let c = BLUE.with_alpha(-0.2);
        assert_eq!((c.r, c.g, c.b, c.a), (0.0, 0.0, 1.0, 0.0));
        assert!(!c.is_visible());
    }
}
