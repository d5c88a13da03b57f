/// RGBA color in linear space, as consumed by the shaders.
///
/// Values written by users (hex codes, 0–255 channels) are sRGB and go through
/// [`Color::from_srgb8`] / [`Color::from_hex`] so that lighting math happens in
/// linear space and the sRGB surface re-encodes on output.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const WHITE: Color = Color::rgba(1.0, 1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgba(0.0, 0.0, 0.0, 1.0);
    pub const TRANSPARENT: Color = Color::rgba(0.0, 0.0, 0.0, 0.0);

    /// Build a color from 8-bit sRGB channels.
    pub fn from_srgb8(r: u8, g: u8, b: u8) -> Self {
        Self::rgb(
            srgb_to_linear(r as f32 / 255.0),
            srgb_to_linear(g as f32 / 255.0),
            srgb_to_linear(b as f32 / 255.0),
        )
    }

    /// Build a color from a `0xRRGGBB` sRGB code.
    pub fn from_hex(hex: u32) -> Self {
        Self::from_srgb8((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
    }

    /// Same color with alpha scaled by `factor`.
    pub fn faded(self, factor: f32) -> Self {
        Self {
            a: self.a * factor.clamp(0.0, 1.0),
            ..self
        }
    }

    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_channels_decode_in_order() {
        let c = Color::from_hex(0x00ff83);
        assert_eq!(c.r, 0.0);
        assert!((c.g - 1.0).abs() < 1e-6);
        assert!(c.b > 0.2 && c.b < 0.25);
        assert_eq!(c.a, 1.0);
    }

    #[test]
    fn srgb_endpoints_are_fixed() {
        assert_eq!(Color::from_srgb8(0, 0, 0), Color::BLACK);
        let white = Color::from_srgb8(255, 255, 255);
        assert!((white.r - 1.0).abs() < 1e-6);
    }

    #[test]
    fn faded_clamps_factor() {
        assert_eq!(Color::WHITE.faded(2.0).a, 1.0);
        assert_eq!(Color::WHITE.faded(-1.0).a, 0.0);
        assert_eq!(Color::WHITE.faded(0.5).a, 0.5);
    }
}
