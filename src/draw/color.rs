//! RGBA color type and the small palette available for pen strokes.

/// Represents an RGBA color with floating-point components.
///
/// All components are in the range 0.0 (minimum) to 1.0 (maximum), which is
/// what Cairo expects for `set_source_rgba`.
///
/// # Examples
///
/// ```
/// use sketchrefine::draw::Color;
/// let ink = Color::new(0.0, 0.0, 0.0, 1.0);
/// assert!(ink.is_opaque());
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Color {
    /// Creates a new color from RGBA components in the 0.0 - 1.0 range.
    pub fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Creates an opaque color from 0-255 channel values.
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f64 / 255.0,
            g: g as f64 / 255.0,
            b: b as f64 / 255.0,
            a: 1.0,
        }
    }

    pub fn is_opaque(&self) -> bool {
        self.a >= 1.0
    }
}

// ============================================================================
// Palette
// ============================================================================

/// Default ink for sketches.
pub const BLACK: Color = Color {
    r: 0.0,
    g: 0.0,
    b: 0.0,
    a: 1.0,
};

/// Paper color used behind every export.
pub const WHITE: Color = Color {
    r: 1.0,
    g: 1.0,
    b: 1.0,
    a: 1.0,
};

pub const GRAPHITE: Color = Color {
    r: 0.25,
    g: 0.25,
    b: 0.27,
    a: 1.0,
};

pub const SEPIA: Color = Color {
    r: 0.44,
    g: 0.26,
    b: 0.08,
    a: 1.0,
};

pub const RED: Color = Color {
    r: 1.0,
    g: 0.0,
    b: 0.0,
    a: 1.0,
};

pub const BLUE: Color = Color {
    r: 0.0,
    g: 0.0,
    b: 1.0,
    a: 1.0,
};
