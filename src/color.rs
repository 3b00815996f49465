// src/color.rs

//! Defines the portable `Color`, the compositing `DrawOp`, and conversions to
//! the 8-bit values handed to SDL.

use serde::{Deserialize, Serialize};

/// An alpha-premultiplied RGBA color with 16 bits per channel.
///
/// This is the precision used at the API boundary. SDL only ever sees 8-bit
/// channels, produced by [`Color::to_rgba8`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Color {
    pub r: u16,
    pub g: u16,
    pub b: u16,
    pub a: u16,
}

impl Color {
    pub const BLACK: Color = Color::new(0, 0, 0, 0xFFFF);
    pub const WHITE: Color = Color::new(0xFFFF, 0xFFFF, 0xFFFF, 0xFFFF);
    pub const TRANSPARENT: Color = Color::new(0, 0, 0, 0);

    pub const fn new(r: u16, g: u16, b: u16, a: u16) -> Self {
        Color { r, g, b, a }
    }

    /// Widens already-premultiplied 8-bit channels.
    pub const fn rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Color::new(widen(r), widen(g), widen(b), widen(a))
    }

    /// Widens non-premultiplied 8-bit channels, premultiplying by alpha.
    pub fn nrgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        let a16 = widen(a) as u32;
        let mul = |c: u8| (widen(c) as u32 * a16 / 0xFFFF) as u16;
        Color::new(mul(r), mul(g), mul(b), a16 as u16)
    }

    /// Narrows each channel to 8 bits as `channel * 255 / 0xFFFF`.
    pub fn to_rgba8(self) -> [u8; 4] {
        [
            narrow(self.r),
            narrow(self.g),
            narrow(self.b),
            narrow(self.a),
        ]
    }
}

const fn widen(c: u8) -> u16 {
    c as u16 * 0x101
}

fn narrow(c: u16) -> u8 {
    (c as u32 * 255 / 0xFFFF) as u8
}

/// Compositing mode for fills and copies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DrawOp {
    /// The source replaces the destination.
    #[default]
    Src,
    /// The source is blended over the destination by its alpha.
    Over,
}

/// A color as handed to the native pixel-mapping calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NativeColor {
    /// Mapped with `SDL_MapRGB`; the surface's alpha (if any) becomes opaque.
    Rgb(u8, u8, u8),
    /// Mapped with `SDL_MapRGBA`.
    Rgba(u8, u8, u8, u8),
}

/// Selects the native mapping for `color` under `op`: `Src` drops alpha,
/// `Over` keeps it so the blitter can blend.
pub fn to_native_color(color: Color, op: DrawOp) -> NativeColor {
    let [r, g, b, a] = color.to_rgba8();
    match op {
        DrawOp::Src => NativeColor::Rgb(r, g, b),
        DrawOp::Over => NativeColor::Rgba(r, g, b, a),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn it_should_narrow_full_and_empty_channels_exactly() {
        assert_eq!(Color::BLACK.to_rgba8(), [0, 0, 0, 255]);
        assert_eq!(Color::WHITE.to_rgba8(), [255, 255, 255, 255]);
        assert_eq!(Color::rgba8(255, 0, 255, 255).to_rgba8(), [255, 0, 255, 255]);
    }

    #[test]
    fn it_should_premultiply_non_premultiplied_input() {
        let c = Color::nrgba8(255, 128, 0, 0);
        assert_eq!(c, Color::TRANSPARENT);
        let opaque = Color::nrgba8(12, 34, 56, 255);
        assert_eq!(opaque.to_rgba8(), [12, 34, 56, 255]);
    }

    proptest! {
        #[test]
        fn src_discards_alpha_and_over_keeps_it(r: u16, g: u16, b: u16, a: u16) {
            let c = Color::new(r, g, b, a);
            let expect = |v: u16| (v as u32 * 255 / 0xFFFF) as u8;
            prop_assert_eq!(
                to_native_color(c, DrawOp::Src),
                NativeColor::Rgb(expect(r), expect(g), expect(b))
            );
            prop_assert_eq!(
                to_native_color(c, DrawOp::Over),
                NativeColor::Rgba(expect(r), expect(g), expect(b), expect(a))
            );
        }

        #[test]
        fn eight_bit_channels_survive_a_round_trip(r: u8, g: u8, b: u8, a: u8) {
            prop_assert_eq!(Color::rgba8(r, g, b, a).to_rgba8(), [r, g, b, a]);
        }
    }
}
