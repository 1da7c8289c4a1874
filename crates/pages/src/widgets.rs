//! Drawing helpers shared by the pages.

use core::fmt::Write;

use heapless::String;
use platform::config::{GLYPH_WIDTH, SCREEN_WIDTH};
use platform::{line_y, Display, ProgressBar};

/// One formatted text line.
pub(crate) type Line = String<32>;

/// Format into a [`Line`], truncating what does not fit.
pub(crate) fn line(args: core::fmt::Arguments<'_>) -> Line {
    let mut out = Line::new();
    let _ = out.write_fmt(args);
    out
}

/// Left edge of the bar drawn by [`labeled_bar`].
const BAR_X: i32 = 20;
/// Width of the bar drawn by [`labeled_bar`].
const BAR_WIDTH: u32 = 84;
/// Height of the bar drawn by [`labeled_bar`].
const BAR_HEIGHT: u32 = 8;

/// Range bar on text line `line_no` with the range ends printed either side.
pub(crate) fn labeled_bar(
    display: &mut dyn Display,
    line_no: u8,
    low: &str,
    high: &str,
    value: i32,
    range: (i32, i32),
) {
    let y = line_y(line_no);
    display.clear_line(line_no);
    display.draw_text(0, y, low);
    display.draw_text(right_aligned_x(high), y, high);
    display.draw_progress_bar(&ProgressBar {
        x: BAR_X,
        y: y.saturating_add(2),
        width: BAR_WIDTH,
        height: BAR_HEIGHT,
        value,
        min: range.0,
        max: range.1,
    });
}

/// X position that puts `text` flush with the right screen edge.
pub(crate) fn right_aligned_x(text: &str) -> i32 {
    let width = u32::try_from(text.chars().count())
        .unwrap_or(u32::MAX)
        .saturating_mul(GLYPH_WIDTH);
    i32::try_from(SCREEN_WIDTH.saturating_sub(width)).unwrap_or(0)
}

/// `value` in tenths as `12.3`, keeping the sign of values above -1.
pub(crate) fn tenths(value: i16) -> Line {
    let sign = if value < 0 { "-" } else { "" };
    let abs = value.unsigned_abs();
    let whole = abs.checked_div(10).unwrap_or(0);
    let frac = abs.checked_rem(10).unwrap_or(0);
    line(format_args!("{sign}{whole}.{frac}"))
}

/// `OK` or `NO`.
pub(crate) fn ok_no(up: bool) -> &'static str {
    if up {
        "OK"
    } else {
        "NO"
    }
}

/// Two-line notice shown by sensor pages while their sensor is switched off.
pub(crate) fn sensor_off(display: &mut dyn Display, sensor: &str) {
    display.print_line(0, "No Data");
    display.clear_line(1);
    display.print_line(2, &line(format_args!("{sensor} off")));
    display.clear_line(3);
}

/// Two-line notice shown by sensor pages while their sensor reports a fault.
pub(crate) fn sensor_fault(display: &mut dyn Display, sensor: &str) {
    display.print_line(0, "Sensor error");
    display.clear_line(1);
    display.print_line(2, &line(format_args!("check {sensor}")));
    display.clear_line(3);
}
