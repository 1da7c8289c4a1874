//! 32×32 monochrome icons for the carousel and the home screen.
//!
//! Icons are drawn as 8×8 glyphs and scaled ×4 at compile time into the
//! row-major, MSB-first 1 bpp layout the display expects (4 bytes per row).

use menu::Icon;

/// Bytes in one 32×32 icon.
pub const ICON_BYTES: usize = 128;

/// Scale an 8×8 glyph to 32×32.
#[allow(clippy::indexing_slicing, clippy::arithmetic_side_effects)] // const-evaluated; bounds fixed by the loop limits
const fn scale(glyph: [u8; 8]) -> [u8; ICON_BYTES] {
    let mut out = [0u8; ICON_BYTES];
    let mut row = 0;
    while row < 32 {
        let src = glyph[row / 4];
        let mut col = 0;
        while col < 4 {
            // Each output byte covers two source pixels.
            let hi = (src >> (7 - col * 2)) & 1;
            let lo = (src >> (6 - col * 2)) & 1;
            out[row * 4 + col] = (hi * 0xF0) | (lo * 0x0F);
            col += 1;
        }
        row += 1;
    }
    out
}

/// Thermometer.
pub static CLIMATE: [u8; ICON_BYTES] = scale([
    0b0001_1000,
    0b0010_0100,
    0b0010_0100,
    0b0010_0100,
    0b0011_1100,
    0b0111_1110,
    0b0111_1110,
    0b0011_1100,
]);

/// Light bulb.
pub static LIGHT: [u8; ICON_BYTES] = scale([
    0b0011_1100,
    0b0100_0010,
    0b1000_0001,
    0b1000_0001,
    0b0100_0010,
    0b0011_1100,
    0b0011_1100,
    0b0001_1000,
]);

/// Particle cloud.
pub static PM25: [u8; ICON_BYTES] = scale([
    0b0000_0000,
    0b0100_0100,
    0b0001_0001,
    0b1000_1000,
    0b0010_0010,
    0b0100_0100,
    0b0001_0001,
    0b0000_0000,
]);

/// Signal arcs.
pub static WIFI: [u8; ICON_BYTES] = scale([
    0b0011_1100,
    0b0100_0010,
    0b1001_1001,
    0b0010_0100,
    0b0000_0000,
    0b0001_1000,
    0b0001_1000,
    0b0000_0000,
]);

/// Gear.
pub static SETTINGS: [u8; ICON_BYTES] = scale([
    0b0001_1000,
    0b0101_1010,
    0b0010_0100,
    0b1100_0011,
    0b1100_0011,
    0b0010_0100,
    0b0101_1010,
    0b0001_1000,
]);

/// Sun, shown in daylight.
pub static SUN: [u8; ICON_BYTES] = scale([
    0b1001_0001,
    0b0100_0010,
    0b0011_1100,
    0b1111_1100,
    0b0011_1111,
    0b0011_1100,
    0b0100_0010,
    0b1000_1001,
]);

/// Crescent moon, shown below the night threshold.
pub static MOON: [u8; ICON_BYTES] = scale([
    0b0011_1000,
    0b0111_0000,
    0b1110_0000,
    0b1110_0000,
    0b1110_0000,
    0b1111_0000,
    0b0111_1100,
    0b0011_1000,
]);

/// Bell.
pub static BELL: [u8; ICON_BYTES] = scale([
    0b0001_1000,
    0b0011_1100,
    0b0111_1110,
    0b0111_1110,
    0b0111_1110,
    0b1111_1111,
    0b0000_0000,
    0b0001_1000,
]);

/// Wrap one of the bitmaps above as a carousel [`Icon`].
#[must_use]
pub fn icon(data: &'static [u8; ICON_BYTES]) -> Icon {
    Icon::square(data)
}
