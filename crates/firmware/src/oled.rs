//! SSD1306 OLED adapter.
//!
//! [`OledCanvas`] implements the menu's [`Display`] contract on top of any
//! `embedded-graphics` [`DrawTarget`] with [`BinaryColor`] pixels. Drawing
//! only touches the target's frame buffer; `present` / `present_dirty` mark a
//! flush as pending and [`OledCanvas::flush`] pushes it over the bus.
//!
//! The ssd1306 buffered graphics mode tracks the changed area itself, so a
//! dirty present and a full present cost the same here; the distinction is
//! kept for drivers that can do better.

use embedded_graphics::mono_font::ascii::FONT_6X10;
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use embedded_graphics::text::{Baseline, Text};
use platform::config::{LINE_HEIGHT, SCREEN_WIDTH};
use platform::{line_y, Display, ProgressBar};
use ssd1306::mode::BufferedGraphicsMode;
use ssd1306::prelude::{DisplaySize, WriteOnlyDataCommand};
use ssd1306::Ssd1306;

/// Failure to push a frame to the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PanelError {
    /// I2C/SPI transfer failed.
    Bus,
}

impl core::fmt::Display for PanelError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Bus => f.write_str("display bus error"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for PanelError {}

/// A frame buffer that can be pushed to the physical panel.
pub trait Panel: DrawTarget<Color = BinaryColor> {
    /// Send the buffered frame to the panel.
    fn push_frame(&mut self) -> Result<(), PanelError>;
}

impl<DI, SIZE> Panel for Ssd1306<DI, SIZE, BufferedGraphicsMode<SIZE>>
where
    DI: WriteOnlyDataCommand,
    SIZE: DisplaySize,
{
    fn push_frame(&mut self) -> Result<(), PanelError> {
        self.flush().map_err(|_| PanelError::Bus)
    }
}

/// Kind of flush requested since the last one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PendingFlush {
    /// Only regions touched since the last present.
    Dirty,
    /// The whole frame.
    Full,
}

/// [`Display`] over an `embedded-graphics` target.
#[derive(Debug)]
pub struct OledCanvas<T> {
    target: T,
    pending: Option<PendingFlush>,
    draw_errors: u32,
}

impl<T> OledCanvas<T>
where
    T: DrawTarget<Color = BinaryColor>,
{
    /// Wrap a target. Nothing is pending until the first present.
    pub const fn new(target: T) -> Self {
        Self {
            target,
            pending: None,
            draw_errors: 0,
        }
    }

    /// Flush requested by the last present, if not yet pushed.
    pub fn pending(&self) -> Option<PendingFlush> {
        self.pending
    }

    /// Number of draw calls the target rejected.
    pub fn draw_errors(&self) -> u32 {
        self.draw_errors
    }

    /// The wrapped target.
    pub fn target(&self) -> &T {
        &self.target
    }

    /// The wrapped target, mutably.
    pub fn target_mut(&mut self) -> &mut T {
        &mut self.target
    }

    /// Unwrap the target.
    pub fn into_inner(self) -> T {
        self.target
    }

    fn note<R, E>(&mut self, result: Result<R, E>) {
        if result.is_err() {
            self.draw_errors = self.draw_errors.saturating_add(1);
            #[cfg(feature = "defmt")]
            defmt::warn!("oled: draw failed ({} so far)", self.draw_errors);
        }
    }

    fn fill(&mut self, x: i32, y: i32, width: u32, height: u32, color: BinaryColor) {
        let area = Rectangle::new(Point::new(x, y), Size::new(width, height));
        let result = self.target.fill_solid(&area, color);
        self.note(result);
    }
}

impl<T: Panel> OledCanvas<T> {
    /// Push the pending frame, if any. Returns whether a frame was sent.
    ///
    /// A failed push keeps the flush pending so the next tick retries it.
    pub fn flush(&mut self) -> Result<bool, PanelError> {
        if self.pending.is_none() {
            return Ok(false);
        }
        self.target.push_frame()?;
        self.pending = None;
        Ok(true)
    }
}

/// Pixels of a 1 bpp, row-major, MSB-first bitmap. Missing bytes read as off.
#[allow(clippy::arithmetic_side_effects)] // row/col bounded by width/height; stride = ceil(width / 8)
fn bitmap_pixels(
    origin: Point,
    width: u32,
    height: u32,
    data: &[u8],
    inverted: bool,
) -> impl Iterator<Item = Pixel<BinaryColor>> + '_ {
    let stride = width.div_ceil(8);
    (0..height).flat_map(move |row| {
        (0..width).map(move |col| {
            let index = usize::try_from(row * stride + col / 8).unwrap_or(usize::MAX);
            let byte = data.get(index).copied().unwrap_or(0);
            let set = (byte >> (7 - col % 8)) & 1 == 1;
            let point = origin + Point::new(col as i32, row as i32);
            Pixel(point, BinaryColor::from(set != inverted))
        })
    })
}

impl<T> Display for OledCanvas<T>
where
    T: DrawTarget<Color = BinaryColor>,
{
    fn draw_bitmap(&mut self, x: i32, y: i32, width: u32, height: u32, data: &[u8], inverted: bool) {
        let pixels = bitmap_pixels(Point::new(x, y), width, height, data, inverted);
        let result = self.target.draw_iter(pixels);
        self.note(result);
    }

    fn draw_text(&mut self, x: i32, y: i32, text: &str) {
        let style = MonoTextStyle::new(&FONT_6X10, BinaryColor::On);
        let result = Text::with_baseline(text, Point::new(x, y), style, Baseline::Top).draw(&mut self.target);
        self.note(result);
    }

    fn draw_progress_bar(&mut self, bar: &ProgressBar) {
        let outline = Rectangle::new(Point::new(bar.x, bar.y), Size::new(bar.width, bar.height))
            .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
            .draw(&mut self.target);
        self.note(outline);

        let inner_x = bar.x.saturating_add(1);
        let inner_y = bar.y.saturating_add(1);
        let inner_w = bar.width.saturating_sub(2);
        let inner_h = bar.height.saturating_sub(2);
        self.fill(inner_x, inner_y, inner_w, inner_h, BinaryColor::Off);

        let filled = bar.fill_len();
        if filled == 0 {
            return;
        }
        if bar.is_vertical() {
            // Vertical bars fill from the bottom up.
            let empty = i32::try_from(inner_h.saturating_sub(filled)).unwrap_or(0);
            self.fill(inner_x, inner_y.saturating_add(empty), inner_w, filled, BinaryColor::On);
        } else {
            self.fill(inner_x, inner_y, filled, inner_h, BinaryColor::On);
        }
    }

    fn clear(&mut self) {
        let result = self.target.clear(BinaryColor::Off);
        self.note(result);
    }

    fn clear_region(&mut self, x: i32, y: i32, width: u32, height: u32) {
        self.fill(x, y, width, height, BinaryColor::Off);
    }

    fn clear_line(&mut self, line: u8) {
        self.fill(0, line_y(line), SCREEN_WIDTH, LINE_HEIGHT, BinaryColor::Off);
    }

    fn present(&mut self) {
        self.pending = Some(PendingFlush::Full);
    }

    fn present_dirty(&mut self) {
        if self.pending.is_none() {
            self.pending = Some(PendingFlush::Dirty);
        }
    }
}
