//! Display abstraction layer
//!
//! The menu core and the page modules only ever talk to the panel through
//! [`Display`]. Calls are synchronous and infallible from the caller's point of
//! view: a driver that hits a bus error logs it and carries on, because a
//! menu frame has no meaningful recovery path other than drawing the next one.

use crate::config::{LINE_HEIGHT, SCREEN_WIDTH};

/// Drawing primitives used by the menu engine.
///
/// Coordinates follow `embedded-graphics`: origin top-left, `x` to the right,
/// `y` downwards. Bitmaps are 1 bit per pixel, row-major, MSB first, each row
/// padded to a whole byte.
pub trait Display {
    /// Draw a monochrome bitmap. `inverted` swaps on and off pixels.
    fn draw_bitmap(&mut self, x: i32, y: i32, width: u32, height: u32, data: &[u8], inverted: bool);

    /// Draw `text` with its top-left corner at (`x`, `y`).
    fn draw_text(&mut self, x: i32, y: i32, text: &str);

    /// Draw an outlined progress bar filled in proportion to its value.
    fn draw_progress_bar(&mut self, bar: &ProgressBar);

    /// Blank the whole frame.
    fn clear(&mut self);

    /// Blank a rectangle.
    fn clear_region(&mut self, x: i32, y: i32, width: u32, height: u32);

    /// Blank one text line (`LINE_HEIGHT` pixels tall).
    fn clear_line(&mut self, line: u8);

    /// Push the whole frame to the panel.
    fn present(&mut self);

    /// Push only the regions touched since the last present.
    fn present_dirty(&mut self);

    /// Clear a text line and print `text` at its left edge.
    fn print_line(&mut self, line: u8, text: &str) {
        self.clear_line(line);
        self.draw_text(0, line_y(line), text);
    }
}

/// Top pixel row of text line `line`.
#[must_use]
pub const fn line_y(line: u8) -> i32 {
    (line as i32).saturating_mul(LINE_HEIGHT as i32)
}

/// X offset that centres `len` glyphs of `glyph_width` pixels on the screen.
#[must_use]
pub fn centered_x(len: usize, glyph_width: u32) -> i32 {
    let text_width = u32::try_from(len)
        .unwrap_or(u32::MAX)
        .saturating_mul(glyph_width);
    let free = SCREEN_WIDTH.saturating_sub(text_width);
    i32::try_from(free / 2).unwrap_or(0)
}

/// Geometry and value of a progress bar. Bars taller than they are wide
/// fill bottom-up, all others fill left to right.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ProgressBar {
    /// Left edge.
    pub x: i32,
    /// Top edge.
    pub y: i32,
    /// Outline width in pixels.
    pub width: u32,
    /// Outline height in pixels.
    pub height: u32,
    /// Current value (clamped into `min..=max` when drawn).
    pub value: i32,
    /// Value shown as an empty bar.
    pub min: i32,
    /// Value shown as a full bar.
    pub max: i32,
}

impl ProgressBar {
    /// Full-width bar spanning `min..=max` at row `y`.
    #[must_use]
    pub const fn full_width(y: i32, height: u32, value: i32, min: i32, max: i32) -> Self {
        Self {
            x: 0,
            y,
            width: SCREEN_WIDTH,
            height,
            value,
            min,
            max,
        }
    }

    /// Whether the bar fills bottom-up.
    #[must_use]
    pub const fn is_vertical(&self) -> bool {
        self.height > self.width
    }

    /// Length of the filled part inside the one-pixel outline, measured along
    /// the bar's long axis.
    ///
    /// Values outside the range saturate at empty or full; a degenerate range
    /// (`max <= min`) draws an empty bar.
    #[must_use]
    pub fn fill_len(&self) -> u32 {
        let long = if self.is_vertical() { self.height } else { self.width };
        let inner = i64::from(long.saturating_sub(2));
        let span = i64::from(self.max).saturating_sub(i64::from(self.min));
        if span <= 0 {
            return 0;
        }
        let offset = i64::from(self.value.clamp(self.min, self.max)).saturating_sub(i64::from(self.min));
        let filled = inner.saturating_mul(offset) / span;
        u32::try_from(filled).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fill_len_is_proportional() {
        let bar = ProgressBar::full_width(0, 8, 50, 0, 100);
        assert_eq!(bar.fill_len(), 63, "half of the 126 px interior");
    }

    #[test]
    fn fill_len_saturates_outside_range() {
        let low = ProgressBar::full_width(0, 8, -20, 0, 100);
        let high = ProgressBar::full_width(0, 8, 400, 0, 100);
        assert_eq!(low.fill_len(), 0);
        assert_eq!(high.fill_len(), 126);
    }

    #[test]
    fn tall_bars_fill_along_their_height() {
        let bar = ProgressBar {
            x: 60,
            y: 0,
            width: 4,
            height: 64,
            value: 30,
            min: 0,
            max: 60,
        };
        assert!(bar.is_vertical());
        assert_eq!(bar.fill_len(), 31);
    }

    #[test]
    fn degenerate_range_draws_empty() {
        let bar = ProgressBar::full_width(0, 8, 5, 10, 10);
        assert_eq!(bar.fill_len(), 0);
    }

    #[test]
    fn centered_x_for_short_and_overlong_text() {
        assert_eq!(centered_x(4, 6), 52);
        assert_eq!(centered_x(40, 6), 0, "text wider than the panel starts at 0");
    }

    #[test]
    fn line_y_steps_by_line_height() {
        assert_eq!(line_y(0), 0);
        assert_eq!(line_y(3), 48);
    }
}
